// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed view over the logging topology sections.
//!
//! Deployment files describe their logging setup in the classic ini layout:
//! `[loggers]`, `[handlers]`, and `[formatters]` declare names in
//! comma-separated `keys` lists, and each declared name gets its own
//! `[logger_<name>]`, `[handler_<name>]`, or `[formatter_<name>]` section.
//! Extraction walks the whole topology and reports every missing section,
//! unknown level, and dangling reference at once instead of stopping at the
//! first.
//!
//! Formatter `format` and `datefmt` strings are read without interpolation:
//! their `%(asctime)s` style placeholders belong to the logging runtime that
//! will consume them, not to this crate.

use crate::domain::{ConfigDocument, ConfigError, ConfigValue, Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity threshold names understood by the logging sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// No explicit threshold; the effective level comes from the parent.
    NotSet,
    /// Verbose diagnostics.
    Debug,
    /// Routine operational messages.
    Info,
    /// Something unexpected that the application survived.
    Warning,
    /// An operation failed.
    Error,
    /// The application cannot continue.
    Critical,
}

impl LogLevel {
    /// Parses a level name, case-insensitively.
    ///
    /// `WARN` is accepted as an alias for `WARNING`.
    pub fn parse(raw: &str) -> Option<LogLevel> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "NOTSET" => Some(LogLevel::NotSet),
            "DEBUG" => Some(LogLevel::Debug),
            "INFO" => Some(LogLevel::Info),
            "WARNING" | "WARN" => Some(LogLevel::Warning),
            "ERROR" => Some(LogLevel::Error),
            "CRITICAL" => Some(LogLevel::Critical),
            _ => None,
        }
    }

    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::NotSet => "NOTSET",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One declared logger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Name from the `[loggers]` keys list.
    pub name: String,
    /// Threshold from `level`, when set.
    pub level: Option<LogLevel>,
    /// Names of the handlers this logger emits to.
    pub handlers: Vec<String>,
    /// Dotted path the logger is looked up under at runtime.
    pub qualname: Option<String>,
    /// Whether records propagate to ancestor loggers.
    pub propagate: Option<bool>,
}

/// One declared handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerSettings {
    /// Name from the `[handlers]` keys list.
    pub name: String,
    /// Handler class reference from the required `class` key.
    pub class_name: String,
    /// Threshold from `level`, when set.
    pub level: Option<LogLevel>,
    /// Name of the formatter this handler renders with, when set.
    pub formatter: Option<String>,
    /// Constructor arguments, passed through opaque.
    pub args: Option<String>,
}

/// One declared formatter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterSettings {
    /// Name from the `[formatters]` keys list.
    pub name: String,
    /// Record format string, uninterpolated.
    pub format: Option<String>,
    /// Date format string, uninterpolated.
    pub datefmt: Option<String>,
}

/// The complete logging topology of a deployment file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingTopology {
    /// Loggers in declaration order.
    pub loggers: Vec<LoggerSettings>,
    /// Handlers in declaration order.
    pub handlers: Vec<HandlerSettings>,
    /// Formatters in declaration order.
    pub formatters: Vec<FormatterSettings>,
}

impl LoggingTopology {
    /// The section declaring logger names.
    pub const LOGGERS_SECTION: &'static str = "loggers";
    /// The section declaring handler names.
    pub const HANDLERS_SECTION: &'static str = "handlers";
    /// The section declaring formatter names.
    pub const FORMATTERS_SECTION: &'static str = "formatters";

    /// Extracts the logging topology from a document.
    ///
    /// A document with none of the three declaration sections yields an
    /// empty topology. Once any of them is present, all three are required
    /// and the cross-references between them are checked; every problem
    /// found is collected into one [`ConfigError::Validation`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use inicfg::adapters::IniParser;
    /// use inicfg::ports::ConfigParser;
    /// use inicfg::settings::{LogLevel, LoggingTopology};
    ///
    /// # fn main() -> inicfg::domain::Result<()> {
    /// let doc = IniParser::new().parse(
    ///     "[loggers]\nkeys = root\n\n\
    ///      [handlers]\nkeys = console\n\n\
    ///      [formatters]\nkeys = generic\n\n\
    ///      [logger_root]\nlevel = INFO\nhandlers = console\n\n\
    ///      [handler_console]\nclass = StreamHandler\nformatter = generic\n\n\
    ///      [formatter_generic]\nformat = %(asctime)s %(message)s\n",
    /// )?;
    /// let topology = LoggingTopology::from_document(&doc)?;
    ///
    /// assert_eq!(topology.logger("root").unwrap().level, Some(LogLevel::Info));
    /// assert_eq!(
    ///     topology.formatter("generic").unwrap().format.as_deref(),
    ///     Some("%(asctime)s %(message)s"),
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_document(doc: &ConfigDocument) -> Result<Self> {
        if !doc.has_section(Self::LOGGERS_SECTION)
            && !doc.has_section(Self::HANDLERS_SECTION)
            && !doc.has_section(Self::FORMATTERS_SECTION)
        {
            return Ok(LoggingTopology::default());
        }

        let mut errors = Vec::new();
        let logger_names = declared_names(doc, Self::LOGGERS_SECTION, &mut errors);
        let handler_names = declared_names(doc, Self::HANDLERS_SECTION, &mut errors);
        let formatter_names = declared_names(doc, Self::FORMATTERS_SECTION, &mut errors);

        let mut topology = LoggingTopology::default();

        for name in &logger_names {
            let section = format!("logger_{name}");
            if !doc.has_section(&section) {
                errors.push(ValidationError::missing_section(&section));
                continue;
            }
            let level = read_level(doc, &section, &mut errors);
            let handlers = match read_optional(doc, &section, "handlers", &mut errors) {
                Some(value) => split_keys(value.as_str()),
                None => Vec::new(),
            };
            for handler in &handlers {
                if !handler_names.contains(handler) {
                    errors.push(ValidationError::unresolvable(
                        &section,
                        "handlers",
                        format!("handler '{handler}' is not declared in [handlers] keys"),
                    ));
                }
            }
            let qualname =
                read_optional(doc, &section, "qualname", &mut errors).map(|v| v.as_string());
            let propagate = match read_optional(doc, &section, "propagate", &mut errors) {
                Some(value) => match value.as_bool() {
                    Ok(flag) => Some(flag),
                    Err(_) => {
                        errors.push(ValidationError::type_mismatch(
                            &section,
                            "propagate",
                            "boolean",
                            value.as_str(),
                        ));
                        None
                    }
                },
                None => None,
            };
            topology.loggers.push(LoggerSettings {
                name: name.clone(),
                level,
                handlers,
                qualname,
                propagate,
            });
        }

        for name in &handler_names {
            let section = format!("handler_{name}");
            if !doc.has_section(&section) {
                errors.push(ValidationError::missing_section(&section));
                continue;
            }
            let class_name = match doc.get(&section, "class") {
                Ok(value) => value.as_string(),
                Err(ConfigError::KeyNotFound { .. }) => {
                    errors.push(ValidationError::missing_key(&section, "class"));
                    continue;
                }
                Err(err) => {
                    errors.push(ValidationError::unresolvable(
                        &section,
                        "class",
                        err.to_string(),
                    ));
                    continue;
                }
            };
            let level = read_level(doc, &section, &mut errors);
            let formatter =
                read_optional(doc, &section, "formatter", &mut errors).map(|v| v.as_string());
            if let Some(formatter) = &formatter {
                if !formatter_names.contains(formatter) {
                    errors.push(ValidationError::unresolvable(
                        &section,
                        "formatter",
                        format!("formatter '{formatter}' is not declared in [formatters] keys"),
                    ));
                }
            }
            let args = read_optional(doc, &section, "args", &mut errors).map(|v| v.as_string());
            topology.handlers.push(HandlerSettings {
                name: name.clone(),
                class_name,
                level,
                formatter,
                args,
            });
        }

        for name in &formatter_names {
            let section = format!("formatter_{name}");
            if !doc.has_section(&section) {
                errors.push(ValidationError::missing_section(&section));
                continue;
            }
            topology.formatters.push(FormatterSettings {
                name: name.clone(),
                format: optional_raw(doc, &section, "format"),
                datefmt: optional_raw(doc, &section, "datefmt"),
            });
        }

        if errors.is_empty() {
            Ok(topology)
        } else {
            Err(ConfigError::Validation { errors })
        }
    }

    /// Looks up a declared logger by name.
    pub fn logger(&self, name: &str) -> Option<&LoggerSettings> {
        self.loggers.iter().find(|l| l.name == name)
    }

    /// Looks up a declared handler by name.
    pub fn handler(&self, name: &str) -> Option<&HandlerSettings> {
        self.handlers.iter().find(|h| h.name == name)
    }

    /// Looks up a declared formatter by name.
    pub fn formatter(&self, name: &str) -> Option<&FormatterSettings> {
        self.formatters.iter().find(|f| f.name == name)
    }
}

/// Splits a comma-separated `keys` list, dropping empty segments.
fn split_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn declared_names(
    doc: &ConfigDocument,
    section: &str,
    errors: &mut Vec<ValidationError>,
) -> Vec<String> {
    if !doc.has_section(section) {
        errors.push(ValidationError::missing_section(section));
        return Vec::new();
    }
    match doc.get(section, "keys") {
        Ok(value) => split_keys(value.as_str()),
        Err(ConfigError::KeyNotFound { .. }) => {
            errors.push(ValidationError::missing_key(section, "keys"));
            Vec::new()
        }
        Err(err) => {
            errors.push(ValidationError::unresolvable(section, "keys", err.to_string()));
            Vec::new()
        }
    }
}

fn read_optional(
    doc: &ConfigDocument,
    section: &str,
    key: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<ConfigValue> {
    match doc.get(section, key) {
        Ok(value) => Some(value),
        Err(ConfigError::KeyNotFound { .. }) => None,
        Err(err) => {
            errors.push(ValidationError::unresolvable(section, key, err.to_string()));
            None
        }
    }
}

fn read_level(
    doc: &ConfigDocument,
    section: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<LogLevel> {
    let value = read_optional(doc, section, "level", errors)?;
    match LogLevel::parse(value.as_str()) {
        Some(level) => Some(level),
        None => {
            errors.push(ValidationError::type_mismatch(
                section,
                "level",
                "log level",
                value.as_str(),
            ));
            None
        }
    }
}

fn optional_raw(doc: &ConfigDocument, section: &str, key: &str) -> Option<String> {
    doc.get_raw(section, key).ok().map(str::to_string)
}
