use std::fmt;

/// Result type alias for configuration operations
pub type ParseResult<T> = Result<T, ConfigError>;

/// Errors that can occur while reading, writing or mutating a configuration tree
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Stream open/read/write failure
    IoError { path: String, message: String },

    /// Grammar violation while reading
    ParseError { line: usize, message: String },

    /// A setting's fixed type does not match the requested one
    TypeMismatch { expected: String, found: String },

    /// Name or path lookup miss
    NotFound { name: String },

    /// Duplicate member name on a programmatic add
    AlreadyExists { name: String },

    /// Out-of-range type code, index or otherwise unusable argument
    InvalidArgument { message: String },
}

impl ConfigError {
    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        ConfigError::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        ConfigError::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(name: impl Into<String>) -> Self {
        ConfigError::NotFound { name: name.into() }
    }

    /// Create an already exists error
    pub fn already_exists(name: impl Into<String>) -> Self {
        ConfigError::AlreadyExists { name: name.into() }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ConfigError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Line number carried by a parse error
    pub fn line(&self) -> Option<usize> {
        match self {
            ConfigError::ParseError { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError { path, message } => {
                write!(f, "I/O error for '{}': {}", path, message)
            }
            ConfigError::ParseError { line, message } => {
                write!(f, "Parse error at line {}: {}", line, message)
            }
            ConfigError::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {}, found {}", expected, found)
            }
            ConfigError::NotFound { name } => {
                write!(f, "Setting '{}' not found", name)
            }
            ConfigError::AlreadyExists { name } => {
                write!(f, "Setting '{}' already exists", name)
            }
            ConfigError::InvalidArgument { message } => {
                write!(f, "Invalid argument: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError {
            path: String::from("<stream>"),
            message: err.to_string(),
        }
    }
}

impl<R: pest::RuleType> From<pest::error::Error<R>> for ConfigError {
    fn from(err: pest::error::Error<R>) -> Self {
        let line = match err.line_col {
            pest::error::LineColLocation::Pos((line, _)) => line,
            pest::error::LineColLocation::Span((line, _), _) => line,
        };

        ConfigError::ParseError {
            line,
            message: err.variant.to_string(),
        }
    }
}
