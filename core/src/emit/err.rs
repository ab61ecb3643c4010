use crate::error::{Level, Location, Span, VyprErrorExt};

#[derive(Debug, Clone)]
pub struct EmitError {
    level: Level,
    message: String,
    issuer: String,
}

impl EmitError {
    pub fn with(level: Level, message: String, issuer: String) -> Self {
        EmitError {
            level,
            message,
            issuer,
        }
    }
}

impl std::fmt::Display for EmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VYPR | {} | {} | {}", self.level, self.issuer, self.message)
    }
}

impl std::error::Error for EmitError {}

impl VyprErrorExt for EmitError {
    fn level(&self) -> Level {
        self.level
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn issuer(&self) -> String {
        self.issuer.clone()
    }

    fn location(&self) -> Option<Location> {
        None
    }

    fn span(&self) -> Option<Span> {
        None
    }
}
