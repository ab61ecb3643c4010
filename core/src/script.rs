use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{Level, Location, Span};
use crate::VyprErrorExt;

/// A Vypr source file loaded into memory.
#[derive(Debug, Clone)]
pub struct Script {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
}

impl Script {
    pub fn new(path: PathBuf) -> Result<Self, Box<dyn VyprErrorExt>> {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::<dyn VyprErrorExt>::from(Box::new(ScriptError::from_io(path.clone(), &e)))
        })?;
        Ok(Script {
            name,
            path,
            content,
        })
    }

    /// Build a script from an in-memory source string. Used by tests and by
    /// callers that already hold the source text.
    pub fn from_source(name: &str, content: &str) -> Self {
        Script {
            name: name.to_string(),
            path: PathBuf::from(name),
            content: content.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn display_content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} lines)", self.name, self.content.lines().count())
    }
}

/// A source file that could not be loaded. `read_to_string` fails for more
/// reasons than a missing file, so the message names the actual cause:
/// absent, unreadable, not UTF-8 text, or some other I/O failure.
#[derive(Debug, Clone)]
pub struct ScriptError {
    pub path: PathBuf,
    kind: ErrorKind,
    detail: String,
}

impl ScriptError {
    pub fn from_io(path: PathBuf, error: &std::io::Error) -> Self {
        ScriptError {
            path,
            kind: error.kind(),
            detail: error.to_string(),
        }
    }
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ScriptError {}

impl VyprErrorExt for ScriptError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        match self.kind {
            ErrorKind::NotFound => format!("Missing script at {:?}", self.path),
            ErrorKind::PermissionDenied => {
                format!("Cannot read script at {:?}: permission denied", self.path)
            }
            // read_to_string reports non-UTF-8 content as InvalidData.
            ErrorKind::InvalidData => {
                format!("Script at {:?} is not valid UTF-8 text", self.path)
            }
            _ => format!("Could not read script at {:?}: {}", self.path, self.detail),
        }
    }

    fn issuer(&self) -> String {
        "vypr.script".to_string()
    }

    fn location(&self) -> Option<Location> {
        None
    }

    fn span(&self) -> Option<Span> {
        None
    }
}
