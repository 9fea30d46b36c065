use miette::Diagnostic;
use thiserror::Error;

/// Main error type for spritegen operations
#[derive(Error, Diagnostic, Debug)]
pub enum SpriteError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(spritegen::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(spritegen::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Definition error: {message}")]
    #[diagnostic(code(spritegen::definition))]
    Definition {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Canvas error: {message}")]
    #[diagnostic(code(spritegen::canvas))]
    Canvas { message: String },

    #[error("Build error: {message}")]
    #[diagnostic(code(spritegen::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl SpriteError {
    /// Shorthand for a canvas error.
    pub fn canvas(message: impl Into<String>) -> Self {
        Self::Canvas {
            message: message.into(),
        }
    }

    /// Shorthand for a definition error without help text.
    pub fn definition(message: impl Into<String>) -> Self {
        Self::Definition {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpriteError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_io_error_names_path() {
        let err = SpriteError::Io {
            path: PathBuf::from("dist/sprites/ui"),
            message: "permission denied".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "IO error with dist/sprites/ui: permission denied"
        );
        assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("spritegen::io"));
    }
}
