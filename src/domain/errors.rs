// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the error types that can occur when loading, resolving,
//! or validating configuration documents. All errors use `thiserror` for proper
//! error handling and conversion.
//!
//! Structural parse failures are fatal and abort loading at the offending
//! line; schema findings are collected into [`ConfigError::Validation`] so a
//! caller can report everything wrong with a document in one pass.

use std::fmt;
use thiserror::Error;

/// Structural categories of parse failure.
///
/// Each variant corresponds to one way an input line can violate the file
/// grammar. The offending line number is carried alongside the kind in
/// [`ConfigError::Parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A broken section header, or content appearing before the first
    /// section header.
    MalformedSection,
    /// A section header re-using a name that already appeared in the
    /// document.
    DuplicateSection,
    /// A continuation line with no key-value entry to continue.
    UnterminatedContinuation,
    /// A line inside a section that is neither a header, a comment, a
    /// continuation, nor a key-value pair.
    MalformedLine,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ParseErrorKind::MalformedSection => "malformed section header",
            ParseErrorKind::DuplicateSection => "duplicate section",
            ParseErrorKind::UnterminatedContinuation => "unterminated continuation",
            ParseErrorKind::MalformedLine => "malformed line",
        };
        write!(f, "{}", text)
    }
}

/// A single finding produced by schema validation.
///
/// Findings always name the section they refer to, and the key as well when
/// the finding is key-scoped. Validation collects findings instead of
/// stopping at the first one, so one pass surfaces every problem in a
/// document.
///
/// # Examples
///
/// ```
/// use inicfg::domain::errors::ValidationError;
///
/// let err = ValidationError::missing_key("server:main", "listen");
/// assert_eq!(
///     err.to_string(),
///     "Section '[server:main]' is missing required key 'listen'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The section the finding refers to.
    pub section: String,
    /// The key within the section, when the finding is key-scoped.
    pub key: Option<String>,
    /// What went wrong.
    pub kind: ValidationErrorKind,
}

/// The specific problem behind a [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required section is absent from the document.
    MissingSection,
    /// A required key is absent from a section that is present.
    MissingKey,
    /// A value is present but failed coercion to the declared type.
    TypeMismatch {
        /// The type the schema declares for this key.
        expected: String,
        /// The raw text that failed to coerce.
        got: String,
    },
    /// Interpolating the value failed, so its type could not be checked.
    Unresolvable {
        /// Description of the interpolation failure.
        message: String,
    },
}

impl ValidationError {
    /// Creates a finding for a required section that is absent.
    pub fn missing_section(section: impl Into<String>) -> Self {
        ValidationError {
            section: section.into(),
            key: None,
            kind: ValidationErrorKind::MissingSection,
        }
    }

    /// Creates a finding for a required key that is absent.
    pub fn missing_key(section: impl Into<String>, key: impl Into<String>) -> Self {
        ValidationError {
            section: section.into(),
            key: Some(key.into()),
            kind: ValidationErrorKind::MissingKey,
        }
    }

    /// Creates a finding for a value that failed type coercion.
    pub fn type_mismatch(
        section: impl Into<String>,
        key: impl Into<String>,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        ValidationError {
            section: section.into(),
            key: Some(key.into()),
            kind: ValidationErrorKind::TypeMismatch {
                expected: expected.into(),
                got: got.into(),
            },
        }
    }

    /// Creates a finding for a value whose interpolation failed.
    pub fn unresolvable(
        section: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ValidationError {
            section: section.into(),
            key: Some(key.into()),
            kind: ValidationErrorKind::Unresolvable {
                message: message.into(),
            },
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.key.as_deref().unwrap_or("");
        match &self.kind {
            ValidationErrorKind::MissingSection => {
                write!(f, "Required section '[{}]' is missing", self.section)
            }
            ValidationErrorKind::MissingKey => write!(
                f,
                "Section '[{}]' is missing required key '{}'",
                self.section, key
            ),
            ValidationErrorKind::TypeMismatch { expected, got } => write!(
                f,
                "Section '[{}]', key '{}': expected {}, got '{}'",
                self.section, key, expected, got
            ),
            ValidationErrorKind::Unresolvable { message } => write!(
                f,
                "Section '[{}]', key '{}': {}",
                self.section, key, message
            ),
        }
    }
}

fn render_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n  ")
}

/// The main error type for configuration operations.
///
/// This enum represents all possible errors that can occur when loading,
/// resolving, or validating configuration. It is marked as
/// `#[non_exhaustive]` to allow for future additions without breaking
/// backwards compatibility.
///
/// # Examples
///
/// ```
/// use inicfg::domain::errors::ConfigError;
///
/// fn get_config_value() -> Result<String, ConfigError> {
///     Err(ConfigError::KeyNotFound {
///         section: "server:main".to_string(),
///         key: "listen".to_string(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The input text violated the file grammar.
    ///
    /// Loading stops at the offending line; no partial document is returned.
    #[error("Parse error at line {line}: {kind}")]
    Parse {
        /// The structural category of the failure.
        kind: ParseErrorKind,
        /// The 1-based line number the failure was detected on.
        line: usize,
    },

    /// The requested section does not exist in the document.
    #[error("Section '[{section}]' not found")]
    SectionNotFound {
        /// The section that was requested.
        section: String,
    },

    /// The requested key exists neither in the section nor in `[DEFAULT]`.
    #[error("Key '{key}' not found in section '[{section}]'")]
    KeyNotFound {
        /// The section that was searched.
        section: String,
        /// The key that was not found.
        key: String,
    },

    /// A value failed coercion to the requested type.
    #[error("Section '[{section}]', key '{key}': expected {expected}, got '{got}'")]
    TypeMismatch {
        /// The section the value came from.
        section: String,
        /// The key the value came from.
        key: String,
        /// The requested target type.
        expected: String,
        /// The raw text that failed to coerce.
        got: String,
    },

    /// An interpolation placeholder referenced a name absent from the
    /// context.
    #[error("Unresolved interpolation placeholder '%({name})s'")]
    UnresolvedPlaceholder {
        /// The referenced name.
        name: String,
    },

    /// An interpolation expression was syntactically invalid.
    #[error("Bad interpolation syntax: {message}")]
    InterpolationSyntax {
        /// Description of the syntax problem.
        message: String,
    },

    /// Placeholder expansion recursed past the depth limit.
    #[error("Interpolation depth exceeded while expanding '%({name})s'")]
    InterpolationDepth {
        /// The placeholder being expanded when the limit was hit.
        name: String,
    },

    /// The document failed schema validation.
    ///
    /// Carries every finding from the validation pass so the caller can
    /// report them all at once instead of stopping at the first.
    #[error("Configuration failed validation:\n  {}", render_validation(.errors))]
    Validation {
        /// All findings, in schema order.
        errors: Vec<ValidationError>,
    },

    /// An error occurred in a configuration source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error.
        source_name: String,
        /// The error message.
        message: String,
        /// The underlying error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error occurred in a configuration watcher.
    #[error("Configuration watcher error: {message}")]
    WatcherError {
        /// The error message.
        message: String,
        /// The underlying error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a [`ConfigError::Parse`] for the given kind and line.
    pub fn parse(kind: ParseErrorKind, line: usize) -> Self {
        ConfigError::Parse { kind, line }
    }

    /// Creates a [`ConfigError::TypeMismatch`] naming the value's origin.
    pub fn type_mismatch(
        section: impl Into<String>,
        key: impl Into<String>,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        ConfigError::TypeMismatch {
            section: section.into(),
            key: key.into(),
            expected: expected.into(),
            got: got.into(),
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let error = ConfigError::parse(ParseErrorKind::MalformedSection, 1);
        assert_eq!(
            error.to_string(),
            "Parse error at line 1: malformed section header"
        );

        let error = ConfigError::parse(ParseErrorKind::DuplicateSection, 7);
        assert_eq!(error.to_string(), "Parse error at line 7: duplicate section");

        let error = ConfigError::parse(ParseErrorKind::UnterminatedContinuation, 3);
        assert_eq!(
            error.to_string(),
            "Parse error at line 3: unterminated continuation"
        );

        let error = ConfigError::parse(ParseErrorKind::MalformedLine, 12);
        assert_eq!(error.to_string(), "Parse error at line 12: malformed line");
    }

    #[test]
    fn test_section_not_found_display() {
        let error = ConfigError::SectionNotFound {
            section: "server:main".to_string(),
        };
        assert_eq!(error.to_string(), "Section '[server:main]' not found");
    }

    #[test]
    fn test_key_not_found_display() {
        let error = ConfigError::KeyNotFound {
            section: "app:main".to_string(),
            key: "use".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Key 'use' not found in section '[app:main]'"
        );
    }

    #[test]
    fn test_type_mismatch_display() {
        let error = ConfigError::type_mismatch("app:main", "retry.attempts", "integer", "abc");
        assert_eq!(
            error.to_string(),
            "Section '[app:main]', key 'retry.attempts': expected integer, got 'abc'"
        );
    }

    #[test]
    fn test_unresolved_placeholder_display() {
        let error = ConfigError::UnresolvedPlaceholder {
            name: "here".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unresolved interpolation placeholder '%(here)s'"
        );
    }

    #[test]
    fn test_validation_display_lists_every_finding() {
        let error = ConfigError::Validation {
            errors: vec![
                ValidationError::missing_section("server:main"),
                ValidationError::missing_key("app:main", "use"),
            ],
        };
        let rendered = error.to_string();
        assert!(rendered.contains("Required section '[server:main]' is missing"));
        assert!(rendered.contains("Section '[app:main]' is missing required key 'use'"));
    }

    #[test]
    fn test_validation_error_type_mismatch_display() {
        let err = ValidationError::type_mismatch("server:main", "listen", "host:port", "nonsense");
        assert_eq!(
            err.to_string(),
            "Section '[server:main]', key 'listen': expected host:port, got 'nonsense'"
        );
    }

    #[test]
    fn test_validation_error_unresolvable_display() {
        let err = ValidationError::unresolvable(
            "app:main",
            "datastore.uri",
            "Unresolved interpolation placeholder '%(data_dir)s'",
        );
        assert!(err.to_string().contains("datastore.uri"));
        assert!(err.to_string().contains("%(data_dir)s"));
    }

    #[test]
    fn test_source_error_display() {
        let error = ConfigError::SourceError {
            source_name: "ini-file".to_string(),
            message: "Failed to read configuration file".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Configuration source 'ini-file' error: Failed to read configuration file"
        );
    }

    #[test]
    fn test_watcher_error_display() {
        let error = ConfigError::WatcherError {
            message: "File watcher failed".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Configuration watcher error: File watcher failed"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = ConfigError::from(io_error);
        assert!(matches!(error, ConfigError::IoError(_)));
    }

    #[test]
    fn test_parse_error_kind_equality() {
        assert_eq!(
            ParseErrorKind::MalformedSection,
            ParseErrorKind::MalformedSection
        );
        assert_ne!(
            ParseErrorKind::MalformedSection,
            ParseErrorKind::DuplicateSection
        );
    }
}
