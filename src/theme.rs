use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

/// Named color roles; every styled cell on screen uses exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Default,
    Hover,
    Active,
    ActiveHover,
    BorderActive,
    BorderInactive,
    MenuActive,
    StatusBar,
    Title,
    MessageBox,
    ConfirmBox,
    ConfirmButton,
    ConfirmButtonFocus,
    InputBox,
    InputField,
}

impl ColorRole {
    pub const ALL: [ColorRole; 15] = [
        ColorRole::Default,
        ColorRole::Hover,
        ColorRole::Active,
        ColorRole::ActiveHover,
        ColorRole::BorderActive,
        ColorRole::BorderInactive,
        ColorRole::MenuActive,
        ColorRole::StatusBar,
        ColorRole::Title,
        ColorRole::MessageBox,
        ColorRole::ConfirmBox,
        ColorRole::ConfirmButton,
        ColorRole::ConfirmButtonFocus,
        ColorRole::InputBox,
        ColorRole::InputField,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ColorRole::Default => "default",
            ColorRole::Hover => "hover",
            ColorRole::Active => "active",
            ColorRole::ActiveHover => "active_hover",
            ColorRole::BorderActive => "border_active",
            ColorRole::BorderInactive => "border_inactive",
            ColorRole::MenuActive => "menu_active",
            ColorRole::StatusBar => "statusbar",
            ColorRole::Title => "title",
            ColorRole::MessageBox => "msgbox",
            ColorRole::ConfirmBox => "confirm",
            ColorRole::ConfirmButton => "confirm_button",
            ColorRole::ConfirmButtonFocus => "confirm_button_focus",
            ColorRole::InputBox => "input",
            ColorRole::InputField => "input_field",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

/// Foreground/background pair for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleColors {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl RoleColors {
    const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            bold: false,
        }
    }

    const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn style(self) -> Style {
        let style = Style::default().fg(self.fg).bg(self.bg);
        if self.bold {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    roles: HashMap<ColorRole, RoleColors>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin_dark()
    }
}

impl Theme {
    #[must_use]
    pub fn builtin_dark() -> Self {
        let roles = ColorRole::ALL
            .into_iter()
            .map(|role| {
                let colors = match role {
                    ColorRole::Default => RoleColors::new(Color::White, Color::Reset),
                    ColorRole::Hover => RoleColors::new(Color::Black, Color::White),
                    ColorRole::Active => RoleColors::new(Color::Yellow, Color::Reset),
                    ColorRole::ActiveHover => RoleColors::new(Color::Black, Color::Yellow),
                    ColorRole::BorderActive => RoleColors::new(Color::Green, Color::Reset),
                    ColorRole::BorderInactive => RoleColors::new(Color::DarkGray, Color::Reset),
                    ColorRole::MenuActive => RoleColors::new(Color::Black, Color::Green),
                    ColorRole::StatusBar => RoleColors::new(Color::Black, Color::Cyan),
                    ColorRole::Title => RoleColors::new(Color::White, Color::Reset).bold(),
                    ColorRole::MessageBox => RoleColors::new(Color::White, Color::Blue),
                    ColorRole::ConfirmBox => RoleColors::new(Color::White, Color::Red),
                    ColorRole::ConfirmButton => RoleColors::new(Color::White, Color::Red),
                    ColorRole::ConfirmButtonFocus => {
                        RoleColors::new(Color::Red, Color::White).bold()
                    }
                    ColorRole::InputBox => RoleColors::new(Color::Black, Color::Gray),
                    ColorRole::InputField => RoleColors::new(Color::White, Color::Black),
                };
                (role, colors)
            })
            .collect();
        Self { roles }
    }

    #[must_use]
    pub fn builtin_light() -> Self {
        let mut theme = Self::builtin_dark();
        theme.set(ColorRole::Default, RoleColors::new(Color::Black, Color::Reset));
        theme.set(ColorRole::Hover, RoleColors::new(Color::White, Color::Black));
        theme.set(ColorRole::Active, RoleColors::new(Color::Magenta, Color::Reset));
        theme.set(
            ColorRole::ActiveHover,
            RoleColors::new(Color::White, Color::Magenta),
        );
        theme.set(
            ColorRole::BorderInactive,
            RoleColors::new(Color::Gray, Color::Reset),
        );
        theme.set(ColorRole::Title, RoleColors::new(Color::Black, Color::Reset).bold());
        theme
    }

    /// Pick a builtin palette by name; unknown names fall back to dark.
    #[must_use]
    pub fn by_name(name: Option<&str>) -> Self {
        match name.map(str::to_ascii_lowercase) {
            Some(n) if n == "light" => Self::builtin_light(),
            _ => Self::builtin_dark(),
        }
    }

    pub fn set(&mut self, role: ColorRole, colors: RoleColors) {
        self.roles.insert(role, colors);
    }

    #[must_use]
    pub fn colors(&self, role: ColorRole) -> RoleColors {
        self.roles
            .get(&role)
            .copied()
            .unwrap_or(RoleColors::new(Color::Reset, Color::Reset))
    }

    #[must_use]
    pub fn style(&self, role: ColorRole) -> Style {
        self.colors(role).style()
    }

    /// Apply `role -> "fg[,bg]"` overrides. Returns the keys that could not be applied.
    pub fn apply_overrides<S: ::std::hash::BuildHasher>(
        &mut self,
        overrides: &HashMap<String, String, S>,
    ) -> Vec<String> {
        let mut rejected = Vec::new();
        for (key, value) in overrides {
            let Some(role) = ColorRole::from_name(key) else {
                rejected.push(key.clone());
                continue;
            };
            match parse_role_colors(value) {
                Some((fg, bg)) => {
                    let mut colors = self.colors(role);
                    colors.fg = fg;
                    if let Some(bg) = bg {
                        colors.bg = bg;
                    }
                    self.set(role, colors);
                }
                None => rejected.push(key.clone()),
            }
        }
        rejected.sort();
        rejected
    }
}

/// Parse `"fg"` or `"fg,bg"`.
#[must_use]
pub fn parse_role_colors(spec: &str) -> Option<(Color, Option<Color>)> {
    match spec.split_once(',') {
        Some((fg, bg)) => Some((parse_color(fg)?, Some(parse_color(bg)?))),
        None => Some((parse_color(spec)?, None)),
    }
}

#[must_use]
pub fn parse_color(spec: &str) -> Option<Color> {
    let s = spec.trim();
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        ) {
            return Some(Color::Rgb(r, g, b));
        }
    }
    match s.to_ascii_lowercase().as_str() {
        "default" | "reset" => Some(Color::Reset),
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!(parse_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_color("00ff00"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_color(" Grey "), Some(Color::Gray));
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn role_names_round_trip() {
        for role in ColorRole::ALL {
            assert_eq!(ColorRole::from_name(role.name()), Some(role));
        }
    }

    #[test]
    fn overrides_apply_and_report_rejects() {
        let mut theme = Theme::builtin_dark();
        let mut overrides = HashMap::new();
        overrides.insert("hover".to_string(), "red,white".to_string());
        overrides.insert("border_active".to_string(), "blue".to_string());
        overrides.insert("sparkles".to_string(), "red".to_string());
        overrides.insert("statusbar".to_string(), "nope".to_string());
        let rejected = theme.apply_overrides(&overrides);
        assert_eq!(rejected, vec!["sparkles".to_string(), "statusbar".to_string()]);
        assert_eq!(theme.colors(ColorRole::Hover).fg, Color::Red);
        assert_eq!(theme.colors(ColorRole::Hover).bg, Color::White);
        assert_eq!(theme.colors(ColorRole::BorderActive).fg, Color::Blue);
    }
}
