use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// One style per kind of thing lexindex prints
#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub group: Style,
    pub count: Style,
    pub headword: Style,
    pub grammar: Style,
    pub meaning: Style,
    pub ok: Style,
    pub problem: Style,
    pub caution: Style,
    pub dim: Style,
}

impl Theme {
    /// Colored on an interactive terminal unless `NO_COLOR` is set
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        if no_color || !console::Term::stdout().is_term() {
            Self::plain()
        } else {
            Self::colored()
        }
    }

    pub fn colored() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            group: Style::new().blue().bold(),
            count: Style::new().bright_black(),
            headword: Style::new().bright_white().bold(),
            grammar: Style::new().magenta().italic(),
            meaning: Style::new().white(),
            ok: Style::new().green().bold(),
            problem: Style::new().red().bold(),
            caution: Style::new().yellow().bold(),
            dim: Style::new().white().dimmed(),
        }
    }

    pub fn plain() -> Self {
        Self {
            title: Style::new(),
            group: Style::new(),
            count: Style::new(),
            headword: Style::new(),
            grammar: Style::new(),
            meaning: Style::new(),
            ok: Style::new(),
            problem: Style::new(),
            caution: Style::new(),
            dim: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
