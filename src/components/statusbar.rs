use crate::compositor;
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::layout::Rect;

pub const GLOBAL_HINTS: [&str; 3] = ["tab: switch pane", "?: help", "q: quit"];

pub struct Statusbar;

impl Statusbar {
    /// Module hints first, then the global ones, joined with ` | `.
    #[must_use]
    pub fn text(module_hints: &[&str]) -> String {
        module_hints
            .iter()
            .chain(GLOBAL_HINTS.iter())
            .copied()
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub fn render(module_hints: &[&str], area: Rect, f: &mut Frame, theme: &Theme) {
        compositor::render_status_bar(&format!(" {}", Self::text(module_hints)), area, f, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_hints_come_before_global_hints() {
        assert_eq!(
            Statusbar::text(&["a: activate"]),
            "a: activate | tab: switch pane | ?: help | q: quit"
        );
    }
}
