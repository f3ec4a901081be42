#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lazywp::App;
use lazywp::registry::Registry;
use lazywp::source::{ItemSource, Record, SourceError};
use lazywp::theme::Theme;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

#[derive(Default)]
pub struct Site {
    pub plugins: Vec<Record>,
    pub themes: Vec<Record>,
    pub calls: Vec<String>,
    /// Fail every list call.
    pub fail_lists: bool,
    /// Fail every mutation.
    pub fail_mutations: bool,
}

/// In-memory WordPress site; clones share state so tests can inspect it.
#[derive(Clone, Default)]
pub struct FakeSite(pub Rc<RefCell<Site>>);

impl FakeSite {
    pub fn with_plugins(names: &[&str]) -> Self {
        let site = Self::default();
        site.0.borrow_mut().plugins = names.iter().map(|n| record(n, "inactive", "none")).collect();
        site
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.borrow().calls.clone()
    }

    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.ends_with(" list"))
            .collect()
    }
}

fn failure(args: &[&str]) -> SourceError {
    SourceError::Failed {
        command: args.join(" "),
        code: Some(1),
        stderr: "Error: This does not seem to be a WordPress installation.".into(),
    }
}

impl ItemSource for FakeSite {
    fn invoke(&mut self, args: &[&str]) -> Result<Vec<Record>, SourceError> {
        let mut site = self.0.borrow_mut();
        site.calls.push(args.join(" "));
        if site.fail_lists {
            return Err(failure(args));
        }
        Ok(match args {
            ["plugin", "list", ..] => site.plugins.clone(),
            ["theme", "list", ..] => site.themes.clone(),
            _ => Vec::new(),
        })
    }

    fn invoke_and_discard(&mut self, args: &[&str]) -> Result<(), SourceError> {
        let mut site = self.0.borrow_mut();
        site.calls.push(args.join(" "));
        if site.fail_mutations {
            return Err(failure(args));
        }
        match args {
            ["plugin", "delete", name] => site.plugins.retain(|p| p.name != *name),
            ["plugin", "install", name] => {
                let installed = record(name, "inactive", "none");
                site.plugins.push(installed);
            }
            ["plugin", "activate", name] => {
                if let Some(p) = site.plugins.iter_mut().find(|p| p.name == *name) {
                    *p = record(name, "active", &p.update);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

pub fn record(name: &str, status: &str, update: &str) -> Record {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "status": status,
        "version": "1.0.0",
        "update": update,
        "auto_update": "off",
    }))
    .unwrap()
}

pub struct Harness {
    pub app: App,
    pub terminal: Terminal<TestBackend>,
    pub site: FakeSite,
}

impl Harness {
    pub fn new(site: FakeSite, width: u16, height: u16) -> Self {
        Self::with_registry(lazywp::default_registry().unwrap(), site, width, height)
    }

    pub fn with_registry(registry: Registry, site: FakeSite, width: u16, height: u16) -> Self {
        let app = App::new(registry, Box::new(site.clone()), Theme::builtin_dark(), 25).unwrap();
        let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut h = Self { app, terminal, site };
        h.tick();
        h
    }

    pub fn tick(&mut self) {
        self.app.tick(&mut self.terminal).unwrap();
    }

    /// Press a key, then refresh and redraw like one loop iteration.
    pub fn press(&mut self, code: KeyCode) {
        self.app
            .handle_key(KeyEvent::new(code, KeyModifiers::NONE), &mut self.terminal)
            .unwrap();
        self.tick();
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    /// Tab into the menu and open the entry `index` rows below the active one.
    pub fn open_module(&mut self, index: usize) {
        self.press(KeyCode::Tab);
        for _ in 0..index {
            self.press(KeyCode::Down);
        }
        self.press(KeyCode::Enter);
    }

    pub fn screen(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        let cells: Vec<char> = buffer
            .content
            .iter()
            .map(|cell| cell.symbol().chars().next().unwrap_or(' '))
            .collect();
        cells
            .chunks(width)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
