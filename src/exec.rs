use std::env;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tracing::{debug, warn};

use crate::source::{ItemSource, Record, SourceError, decode_records};

/// [`ItemSource`] backed by the `wp` command-line tool.
#[derive(Debug, Clone)]
pub struct WpCli {
    pub program: String,
    /// WordPress root, passed as `--path=`.
    pub path: Option<PathBuf>,
    pub allow_root: bool,
}

impl Default for WpCli {
    fn default() -> Self {
        Self {
            program: "wp".to_string(),
            path: None,
            allow_root: false,
        }
    }
}

impl WpCli {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: Option<PathBuf>) -> Self {
        self.path = path;
        self
    }

    #[must_use]
    pub fn with_allow_root(mut self, allow_root: bool) -> Self {
        self.allow_root = allow_root;
        self
    }

    /// Full argument vector for one call, global flags appended after `args`.
    #[must_use]
    pub fn build_args(&self, args: &[&str]) -> Vec<String> {
        let mut out: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
        if let Some(path) = &self.path {
            out.push(format!("--path={}", path.display()));
        }
        if self.allow_root {
            out.push("--allow-root".to_string());
        }
        out
    }

    fn run(&self, args: &[&str]) -> Result<Output, SourceError> {
        let argv = self.build_args(args);
        debug!(program = %self.program, args = ?argv, "invoking item source");
        let mut cmd = Command::new(&self.program);
        cmd.args(&argv)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // wp-cli pipes help and long output through a pager otherwise
        cmd.env("PAGER", "cat");
        if let Ok(cwd) = env::current_dir() {
            cmd.current_dir(cwd);
        }
        let output = cmd.output().map_err(|source| SourceError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(code = ?output.status.code(), %stderr, "item source call failed");
            return Err(SourceError::Failed {
                command: args.join(" "),
                code: output.status.code(),
                stderr,
            });
        }
        Ok(output)
    }
}

impl ItemSource for WpCli {
    fn invoke(&mut self, args: &[&str]) -> Result<Vec<Record>, SourceError> {
        let mut full: Vec<&str> = args.to_vec();
        if !args.iter().any(|a| a.starts_with("--format")) {
            full.push("--format=json");
        }
        let output = self.run(&full)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        decode_records(&args.join(" "), &stdout)
    }

    fn invoke_and_discard(&mut self, args: &[&str]) -> Result<(), SourceError> {
        self.run(args).map(|_| ())
    }
}
