use crate::error::{Level, Location, Span, VyprErrorExt};

#[derive(Debug, Clone)]
pub struct SemanticError {
    level: Level,
    message: String,
    issuer: String,
    location: Option<Location>,
    span: Option<Span>,
}

impl SemanticError {
    pub fn with(
        level: Level,
        message: String,
        issuer: String,
        location: Option<Location>,
        span: Option<Span>,
    ) -> Self {
        SemanticError {
            level,
            message,
            issuer,
            location,
            span,
        }
    }
}

impl std::fmt::Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let loc_str = match &self.location {
            Some(loc) => format!("{}:{}:{}", loc.file, loc.line, loc.column),
            None => "unknown".to_string(),
        };

        write!(
            f,
            "VYPR | {} | {} | {} | {}",
            self.level, loc_str, self.issuer, self.message
        )
    }
}

impl std::error::Error for SemanticError {}

impl VyprErrorExt for SemanticError {
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
        self.location.clone()
    }

    fn span(&self) -> Option<Span> {
        self.span.clone()
    }
}
