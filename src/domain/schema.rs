// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative schema validation for configuration documents.
//!
//! A [`Schema`] names the sections and keys a host expects, whether each is
//! required, and the [`ValueKind`] each value must coerce to. Validation
//! walks the whole schema and collects every violation instead of stopping
//! at the first, so an operator sees the full list in one run.
//!
//! Sections and keys the schema does not name pass through unchecked; a
//! deployment file routinely carries sections that belong to other runtimes.

use crate::domain::config_value::ConfigValue;
use crate::domain::document::ConfigDocument;
use crate::domain::errors::{ConfigError, Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One `host:port` listen address.
///
/// The host may be a name, an IPv4 address, a bracketed IPv6 address
/// (`[::1]:8080`), or the `*` wildcard. The port must fit in a `u16`.
///
/// # Examples
///
/// ```
/// use inicfg::domain::schema::HostPort;
///
/// let hp = HostPort::parse("127.0.0.1:8080").unwrap();
/// assert_eq!(hp.host, "127.0.0.1");
/// assert_eq!(hp.port, 8080);
/// assert_eq!(hp.to_string(), "127.0.0.1:8080");
///
/// let hp = HostPort::parse("[::1]:6543").unwrap();
/// assert_eq!(hp.host, "::1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPort {
    /// Host name, address, or `*`.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl HostPort {
    /// Parses a single `host:port` pair, returning `None` when the text
    /// does not fit the form.
    pub fn parse(text: &str) -> Option<HostPort> {
        let text = text.trim();
        let (host, port) = if let Some(rest) = text.strip_prefix('[') {
            let (addr, rest) = rest.split_once(']')?;
            if addr.is_empty() {
                return None;
            }
            (addr.to_string(), rest.strip_prefix(':')?)
        } else {
            let (host, port) = text.rsplit_once(':')?;
            if host.is_empty() || host.contains(':') {
                return None;
            }
            (host.to_string(), port)
        };
        let port = port.parse::<u16>().ok()?;
        Some(HostPort { host, port })
    }
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// The type a schema key's resolved value must coerce to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Any string; always passes.
    Str,
    /// A signed 64-bit integer.
    Int,
    /// A boolean (true/yes/1/on, false/no/0/off, case-insensitive).
    Bool,
    /// A duration (bare seconds or `ms`/`s`/`m`/`h`/`d` suffix).
    Duration,
    /// One or more whitespace-separated `host:port` pairs.
    HostPort,
    /// One of a fixed set of strings, matched exactly.
    Enum(Vec<String>),
}

impl ValueKind {
    fn expected(&self) -> String {
        match self {
            ValueKind::Str => "string".to_string(),
            ValueKind::Int => "integer".to_string(),
            ValueKind::Bool => "boolean".to_string(),
            ValueKind::Duration => "duration".to_string(),
            ValueKind::HostPort => "host:port".to_string(),
            ValueKind::Enum(options) => format!("one of: {}", options.join(", ")),
        }
    }

    fn accepts(&self, value: &ConfigValue) -> bool {
        match self {
            ValueKind::Str => true,
            ValueKind::Int => value.as_i64().is_ok(),
            ValueKind::Bool => value.as_bool().is_ok(),
            ValueKind::Duration => value.as_duration().is_ok(),
            ValueKind::HostPort => {
                let mut tokens = value.as_str().split_whitespace().peekable();
                tokens.peek().is_some() && tokens.all(|t| HostPort::parse(t).is_some())
            }
            ValueKind::Enum(options) => options.iter().any(|o| o == value.as_str()),
        }
    }
}

/// A rule for one key within a section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySchema {
    name: String,
    required: bool,
    kind: ValueKind,
}

impl KeySchema {
    /// A key that must be present (directly or via `[DEFAULT]`).
    pub fn required(name: impl Into<String>, kind: ValueKind) -> Self {
        KeySchema {
            name: name.into(),
            required: true,
            kind,
        }
    }

    /// A key that is checked only when present.
    pub fn optional(name: impl Into<String>, kind: ValueKind) -> Self {
        KeySchema {
            name: name.into(),
            required: false,
            kind,
        }
    }

    /// Returns the key name this rule applies to.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The rules for one section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSchema {
    name: String,
    required: bool,
    keys: Vec<KeySchema>,
}

impl SectionSchema {
    /// A section that must be present.
    pub fn required(name: impl Into<String>) -> Self {
        SectionSchema {
            name: name.into(),
            required: true,
            keys: Vec::new(),
        }
    }

    /// A section whose rules apply only when it is present.
    pub fn optional(name: impl Into<String>) -> Self {
        SectionSchema {
            name: name.into(),
            required: false,
            keys: Vec::new(),
        }
    }

    /// Adds a key rule (builder style).
    pub fn key(mut self, key: KeySchema) -> Self {
        self.keys.push(key);
        self
    }

    /// Returns the section name this rule applies to.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A declarative description of the sections and keys a host expects.
///
/// # Examples
///
/// ```
/// use inicfg::domain::document::{ConfigDocument, Section};
/// use inicfg::domain::schema::{KeySchema, Schema, SectionSchema, ValueKind};
///
/// let schema = Schema::new().section(
///     SectionSchema::required("server:main")
///         .key(KeySchema::required("listen", ValueKind::HostPort)),
/// );
///
/// let mut doc = ConfigDocument::new();
/// doc.insert_section(Section::new("server:main"));
///
/// let errors = schema.validate(&doc);
/// assert_eq!(errors.len(), 1);
/// assert_eq!(
///     errors[0].to_string(),
///     "Section '[server:main]' is missing required key 'listen'"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    sections: Vec<SectionSchema>,
}

impl Schema {
    /// Creates an empty schema that accepts any document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a section rule (builder style).
    pub fn section(mut self, section: SectionSchema) -> Self {
        self.sections.push(section);
        self
    }

    /// Checks the document against every rule and returns all violations.
    ///
    /// A required section that is absent yields exactly one
    /// [`ValidationError`] and its key rules are skipped. Key rules check
    /// the resolved value, so an entry whose interpolation fails is
    /// reported as unresolvable rather than as a type mismatch.
    pub fn validate(&self, doc: &ConfigDocument) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for section in &self.sections {
            if !doc.has_section(&section.name) {
                if section.required {
                    errors.push(ValidationError::missing_section(&section.name));
                }
                continue;
            }
            for key in &section.keys {
                match doc.get(&section.name, &key.name) {
                    Ok(value) => {
                        if !key.kind.accepts(&value) {
                            errors.push(ValidationError::type_mismatch(
                                &section.name,
                                &key.name,
                                key.kind.expected(),
                                value.as_str(),
                            ));
                        }
                    }
                    Err(ConfigError::KeyNotFound { .. }) => {
                        if key.required {
                            errors.push(ValidationError::missing_key(&section.name, &key.name));
                        }
                    }
                    Err(err) => {
                        errors.push(ValidationError::unresolvable(
                            &section.name,
                            &key.name,
                            err.to_string(),
                        ));
                    }
                }
            }
        }
        errors
    }

    /// Validates and converts any violations into
    /// [`ConfigError::Validation`].
    pub fn check(&self, doc: &ConfigDocument) -> Result<()> {
        let errors = self.validate(doc);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation { errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::Section;
    use crate::domain::errors::ValidationErrorKind;

    fn deployment_schema() -> Schema {
        Schema::new()
            .section(
                SectionSchema::required("app:main")
                    .key(KeySchema::required("use", ValueKind::Str))
                    .key(KeySchema::optional("retry.attempts", ValueKind::Int)),
            )
            .section(
                SectionSchema::required("server:main")
                    .key(KeySchema::required("listen", ValueKind::HostPort)),
            )
            .section(
                SectionSchema::optional("pshell").key(KeySchema::optional("setup", ValueKind::Str)),
            )
    }

    fn valid_document() -> ConfigDocument {
        let mut doc = ConfigDocument::new();
        let mut app = Section::new("app:main");
        app.insert("use", "egg:myapp");
        app.insert("retry.attempts", "3");
        doc.insert_section(app);
        let mut server = Section::new("server:main");
        server.insert("listen", "127.0.0.1:8080 [::1]:8080");
        doc.insert_section(server);
        doc
    }

    #[test]
    fn test_valid_document_passes() {
        let errors = deployment_schema().validate(&valid_document());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert!(deployment_schema().check(&valid_document()).is_ok());
    }

    #[test]
    fn test_missing_required_section_is_one_error() {
        let mut doc = valid_document();
        doc = {
            let mut replacement = ConfigDocument::new();
            for section in doc.sections().filter(|s| s.name() != "server:main") {
                replacement.insert_section(section.clone());
            }
            replacement
        };
        let errors = deployment_schema().validate(&doc);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].section, "server:main");
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingSection);
    }

    #[test]
    fn test_missing_required_key_is_exactly_one_error() {
        let mut doc = valid_document();
        doc.insert_section(Section::new("server:main"));
        let errors = deployment_schema().validate(&doc);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].section, "server:main");
        assert_eq!(errors[0].key.as_deref(), Some("listen"));
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingKey);
    }

    #[test]
    fn test_optional_section_absent_is_skipped() {
        let errors = deployment_schema().validate(&valid_document());
        assert!(errors.iter().all(|e| e.section != "pshell"));
    }

    #[test]
    fn test_optional_key_absent_is_skipped() {
        let mut doc = valid_document();
        let mut app = Section::new("app:main");
        app.insert("use", "egg:myapp");
        doc.insert_section(app);
        assert!(deployment_schema().validate(&doc).is_empty());
    }

    #[test]
    fn test_type_mismatch_collected() {
        let mut doc = valid_document();
        doc.section_mut("app:main")
            .unwrap()
            .insert("retry.attempts", "abc");
        let errors = deployment_schema().validate(&doc);
        assert_eq!(errors.len(), 1);
        match &errors[0].kind {
            ValidationErrorKind::TypeMismatch { expected, got } => {
                assert_eq!(expected, "integer");
                assert_eq!(got, "abc");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_all_violations_collected_in_schema_order() {
        let mut doc = ConfigDocument::new();
        let mut app = Section::new("app:main");
        app.insert("retry.attempts", "many");
        doc.insert_section(app);

        let errors = deployment_schema().validate(&doc);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].key.as_deref(), Some("use"));
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingKey);
        assert!(matches!(
            errors[1].kind,
            ValidationErrorKind::TypeMismatch { .. }
        ));
        assert_eq!(errors[2].section, "server:main");
        assert_eq!(errors[2].kind, ValidationErrorKind::MissingSection);
    }

    #[test]
    fn test_type_check_runs_on_interpolated_value() {
        let mut doc = valid_document().with_var("attempts", "5");
        doc.section_mut("app:main")
            .unwrap()
            .insert("retry.attempts", "%(attempts)s");
        assert!(deployment_schema().validate(&doc).is_empty());
    }

    #[test]
    fn test_unresolvable_value_reported() {
        let mut doc = valid_document();
        doc.section_mut("app:main")
            .unwrap()
            .insert("retry.attempts", "%(nowhere)s");
        let errors = deployment_schema().validate(&doc);
        assert_eq!(errors.len(), 1);
        match &errors[0].kind {
            ValidationErrorKind::Unresolvable { message } => {
                assert!(message.contains("nowhere"));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_required_key_satisfied_by_default_section() {
        let mut doc = valid_document();
        let mut defaults = Section::new("DEFAULT");
        defaults.insert("use", "egg:fallback");
        doc.insert_section(defaults);
        doc.insert_section({
            let mut app = Section::new("app:main");
            app.insert("retry.attempts", "2");
            app
        });
        assert!(deployment_schema().validate(&doc).is_empty());
    }

    #[test]
    fn test_unknown_sections_and_keys_pass() {
        let mut doc = valid_document();
        let mut other = Section::new("filter:translogger");
        other.insert("anything", "goes");
        doc.insert_section(other);
        doc.section_mut("app:main").unwrap().insert("extra", "ok");
        assert!(deployment_schema().validate(&doc).is_empty());
    }

    #[test]
    fn test_check_wraps_errors() {
        let doc = ConfigDocument::new();
        let err = deployment_schema().check(&doc).unwrap_err();
        match err {
            ConfigError::Validation { errors } => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_value_kinds() {
        let cases = [
            (ValueKind::Str, "anything", true),
            (ValueKind::Int, "42", true),
            (ValueKind::Int, "4.2", false),
            (ValueKind::Bool, "on", true),
            (ValueKind::Bool, "maybe", false),
            (ValueKind::Duration, "30s", true),
            (ValueKind::Duration, "soon", false),
            (ValueKind::HostPort, "0.0.0.0:6543", true),
            (ValueKind::HostPort, "localhost:8080 [::1]:8080", true),
            (ValueKind::HostPort, "", false),
            (ValueKind::HostPort, "no-port", false),
        ];
        for (kind, raw, expected) in cases {
            let value = ConfigValue::new("s", "k", raw);
            assert_eq!(
                kind.accepts(&value),
                expected,
                "kind {kind:?} on {raw:?}"
            );
        }

        let level = ValueKind::Enum(vec!["DEBUG".to_string(), "INFO".to_string()]);
        assert!(level.accepts(&ConfigValue::new("s", "k", "INFO")));
        assert!(!level.accepts(&ConfigValue::new("s", "k", "LOUD")));
        assert_eq!(level.expected(), "one of: DEBUG, INFO");
    }

    #[test]
    fn test_host_port_forms() {
        assert_eq!(
            HostPort::parse("*:8080"),
            Some(HostPort {
                host: "*".to_string(),
                port: 8080
            })
        );
        assert_eq!(HostPort::parse("[::1]:6543").unwrap().host, "::1");
        assert_eq!(
            HostPort::parse("[2001:db8::1]:80").unwrap().to_string(),
            "[2001:db8::1]:80"
        );
        assert!(HostPort::parse("127.0.0.1").is_none());
        assert!(HostPort::parse(":8080").is_none());
        assert!(HostPort::parse("host:notaport").is_none());
        assert!(HostPort::parse("host:70000").is_none());
        assert!(HostPort::parse("::1:8080").is_none());
        assert!(HostPort::parse("[]:8080").is_none());
    }
}
