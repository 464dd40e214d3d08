use std::fmt;

/// Step of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    CheckingConnectivity,
    CheckingSession,
    LoggingIn,
    Fetching,
    Rendering,
    Finished(Terminal),
}

/// How a run ended; each variant renders its own payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminal {
    /// No network path to the internet
    Offline,
    /// The service rejected the credentials
    LoginFailed,
    /// The account has no card
    NoCard,
    /// Any other failure, with its message
    Error(String),
    /// Full balance view rendered
    Done,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::CheckingConnectivity => write!(f, "checking connectivity"),
            RunState::CheckingSession => write!(f, "checking session"),
            RunState::LoggingIn => write!(f, "logging in"),
            RunState::Fetching => write!(f, "fetching"),
            RunState::Rendering => write!(f, "rendering"),
            RunState::Finished(terminal) => write!(f, "finished ({})", terminal),
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Offline => write!(f, "offline"),
            Terminal::LoginFailed => write!(f, "login failed"),
            Terminal::NoCard => write!(f, "no card"),
            Terminal::Error(message) => write!(f, "error: {}", message),
            Terminal::Done => write!(f, "done"),
        }
    }
}
