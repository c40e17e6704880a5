use std::fmt;

#[derive(Debug)]
pub enum FormError {
    /// merge_all needs at least two values to fold
    InsufficientInput { count: usize },

    /// Reading or writing a file failed
    Io { path: String, source: std::io::Error },

    /// JSON parsing or encoding failed
    JsonParse { context: String, source: serde_json::Error },

    /// YAML parsing failed
    YamlParse { context: String, source: serde_yaml::Error },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::InsufficientInput { count } => {
                write!(
                    f,
                    "merge_all needs at least two values, got {}",
                    count
                )
            }
            FormError::Io { path, source } => {
                write!(f, "I/O error on '{}': {}", path, source)
            }
            FormError::JsonParse { context, source } => {
                write!(f, "JSON error ({}): {}", context, source)
            }
            FormError::YamlParse { context, source } => {
                write!(f, "YAML error ({}): {}", context, source)
            }
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormError::Io { source, .. } => Some(source),
            FormError::JsonParse { source, .. } => Some(source),
            FormError::YamlParse { source, .. } => Some(source),
            FormError::InsufficientInput { .. } => None,
        }
    }
}
