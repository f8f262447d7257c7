use std::fmt;

/// Prefix added when the last choice was not on the menu
pub const INVALID_PREFIX: &str = "Invalid selection. ";

/// Body of the screen shown for input the menu cannot place
pub const UNPROCESSED_BODY: &str =
    "We couldn't process your request. Please try again.\n\n0. Back to Main Menu";

/// Body returned to the gateway when handling fails
pub const ERROR_BODY: &str = "An error occurred. Please try again later.";

/// One USSD screen. Renders with the gateway's `CON `/`END ` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// More input expected
    Continue(String),
    /// Session ends
    End(String),
}

impl Screen {
    /// Re-render a menu after an invalid choice
    pub fn invalid(body: &str) -> Self {
        Screen::Continue(format!("{}{}", INVALID_PREFIX, body))
    }

    pub fn error() -> Self {
        Screen::End(ERROR_BODY.to_string())
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Screen::End(_))
    }

    pub fn body(&self) -> &str {
        match self {
            Screen::Continue(body) | Screen::End(body) => body,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Continue(body) => write!(f, "CON {}", body),
            Screen::End(body) => write!(f, "END {}", body),
        }
    }
}
