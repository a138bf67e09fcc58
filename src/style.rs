use std::{fmt::Display, io::IsTerminal, sync::LazyLock};

use anstyle::{AnsiColor, Style};

/// How output written to stderr should be styled.
///
/// When stderr isn't a terminal, or colors have been disabled, every style
/// is empty and data renders unchanged.
#[derive(Clone, Debug)]
pub struct Theme {
    highlight: Option<Style>,
}

impl Theme {
    /// Returns the theme for stderr.
    pub fn stderr() -> &'static Theme {
        static THEME: LazyLock<Theme> = LazyLock::new(|| {
            if !std::io::stderr().is_terminal() || !can_use_colors() {
                return Theme { highlight: None };
            }
            let highlight =
                Style::new().bold().fg_color(Some(AnsiColor::Magenta.into()));
            Theme { highlight: Some(highlight) }
        });
        &*THEME
    }

    pub fn highlight<T: Display>(&self, data: T) -> Styled<'_, T> {
        Styled { data, style: self.highlight.as_ref() }
    }
}

/// A possibly unstyled piece of renderable data.
#[derive(Clone, Debug)]
pub struct Styled<'s, T> {
    data: T,
    style: Option<&'s Style>,
}

impl<'s, T: Display> Display for Styled<'s, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let Some(style) = self.style else {
            return self.data.fmt(f);
        };
        write!(f, "{style}{}{style:#}", self.data)
    }
}

/// Whether colors have been globally disabled via `NO_COLOR` or
/// `TERM=dumb`.
fn can_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    std::env::var_os("TERM").map_or(true, |v| v != "dumb")
}
