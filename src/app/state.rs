/// One-line feedback shown next to the export button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

impl StatusLine {
    pub(crate) fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub(crate) fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Which screen the current frame draws. Derived from identity, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Login,
    Dashboard,
}

impl Screen {
    pub(crate) fn for_identity(logged_in: bool) -> Self {
        if logged_in {
            Screen::Dashboard
        } else {
            Screen::Login
        }
    }
}
