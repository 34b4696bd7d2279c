// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed views over the `[app:main]` and `[pshell]` sections.

use super::optional_string;
use crate::domain::{ConfigDocument, ConfigError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Retry budget used when `retry.attempts` is not configured.
pub const DEFAULT_RETRY_ATTEMPTS: i64 = 3;

/// Typed settings from the `[app:main]` section.
///
/// # Examples
///
/// ```rust
/// use inicfg::adapters::IniParser;
/// use inicfg::ports::ConfigParser;
/// use inicfg::settings::AppSettings;
///
/// # fn main() -> inicfg::domain::Result<()> {
/// let doc = IniParser::new().parse(
///     "[app:main]\nuse = egg:myapp\ndatastore.uri = file:///srv/Data.fs\n",
/// )?;
/// let app = AppSettings::from_document(&doc)?;
///
/// assert_eq!(app.use_spec, "egg:myapp");
/// assert_eq!(app.retry_attempts, 3);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// The application factory reference from the required `use` key.
    pub use_spec: String,
    /// Connection string for the backing datastore, passed through opaque.
    pub datastore_uri: Option<String>,
    /// Retry budget, defaulting to [`DEFAULT_RETRY_ATTEMPTS`].
    pub retry_attempts: i64,
    /// Inline shared secret for the auth subsystem, when configured.
    pub auth_secret: Option<String>,
    /// Remaining keys in section order, values interpolated.
    pub extras: Vec<(String, String)>,
}

impl AppSettings {
    /// The section this view reads.
    pub const SECTION: &'static str = "app:main";

    const RECOGNIZED: [&'static str; 4] =
        ["use", "datastore.uri", "retry.attempts", "auth.secret"];

    /// Extracts the application settings from a document.
    ///
    /// A secret configured inline is surfaced unchanged but flagged with a
    /// `warn` log record, since plaintext secret material in a deployment
    /// file usually deserves an operator's attention.
    ///
    /// # Returns
    ///
    /// * `Ok(AppSettings)` - The section was present and every value resolved
    /// * `Err(ConfigError)` - The section or its `use` key is missing, or a
    ///   value failed interpolation or coercion
    pub fn from_document(doc: &ConfigDocument) -> Result<Self> {
        let use_spec = doc.get_string(Self::SECTION, "use")?;
        let datastore_uri = optional_string(doc, Self::SECTION, "datastore.uri")?;
        let retry_attempts = match doc.get_int(Self::SECTION, "retry.attempts") {
            Ok(attempts) => attempts,
            Err(ConfigError::KeyNotFound { .. }) => DEFAULT_RETRY_ATTEMPTS,
            Err(err) => return Err(err),
        };
        let auth_secret = optional_string(doc, Self::SECTION, "auth.secret")?;
        if auth_secret.is_some() {
            warn!(
                section = Self::SECTION,
                key = "auth.secret",
                "Plaintext secret material in configuration file"
            );
        }

        let mut extras = Vec::new();
        if let Some(section) = doc.section(Self::SECTION) {
            for (key, _) in section.iter() {
                if Self::RECOGNIZED.contains(&key) {
                    continue;
                }
                extras.push((key.to_string(), doc.get_string(Self::SECTION, key)?));
            }
        }

        Ok(AppSettings {
            use_spec,
            datastore_uri,
            retry_attempts,
            auth_secret,
            extras,
        })
    }

    /// Returns the value of an unrecognized key, when present.
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Typed settings from the optional `[pshell]` section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PshellSettings {
    /// Setup hook reference invoked before an interactive shell opens.
    pub setup: Option<String>,
    /// Name to object-reference aliases for the shell namespace, in
    /// section order.
    pub aliases: Vec<(String, String)>,
}

impl PshellSettings {
    /// The section this view reads.
    pub const SECTION: &'static str = "pshell";

    /// Extracts the shell settings; an absent section yields the default.
    pub fn from_document(doc: &ConfigDocument) -> Result<Self> {
        let section = match doc.section(Self::SECTION) {
            Some(section) => section,
            None => return Ok(PshellSettings::default()),
        };

        let setup = optional_string(doc, Self::SECTION, "setup")?;
        let mut aliases = Vec::new();
        for (key, _) in section.iter() {
            if key == "setup" {
                continue;
            }
            aliases.push((key.to_string(), doc.get_string(Self::SECTION, key)?));
        }

        Ok(PshellSettings { setup, aliases })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::IniParser;
    use crate::ports::ConfigParser;

    fn document(content: &str) -> ConfigDocument {
        IniParser::new().parse(content).unwrap()
    }

    #[test]
    fn test_app_settings_full_section() {
        let doc = document(
            "[app:main]\n\
             use = egg:myapp\n\
             datastore.uri = file:///srv/app/Data.fs\n\
             retry.attempts = 5\n\
             auth.secret = sekrit\n\
             feature.debugtoolbar = false\n\
             cache.dir = /var/cache/myapp\n",
        );
        let app = AppSettings::from_document(&doc).unwrap();

        assert_eq!(app.use_spec, "egg:myapp");
        assert_eq!(app.datastore_uri.as_deref(), Some("file:///srv/app/Data.fs"));
        assert_eq!(app.retry_attempts, 5);
        assert_eq!(app.auth_secret.as_deref(), Some("sekrit"));
        assert_eq!(
            app.extras,
            vec![
                ("feature.debugtoolbar".to_string(), "false".to_string()),
                ("cache.dir".to_string(), "/var/cache/myapp".to_string()),
            ]
        );
        assert_eq!(app.extra("cache.dir"), Some("/var/cache/myapp"));
        assert_eq!(app.extra("missing"), None);
    }

    #[test]
    fn test_app_settings_defaults() {
        let doc = document("[app:main]\nuse = egg:myapp\n");
        let app = AppSettings::from_document(&doc).unwrap();

        assert_eq!(app.retry_attempts, DEFAULT_RETRY_ATTEMPTS);
        assert_eq!(app.datastore_uri, None);
        assert_eq!(app.auth_secret, None);
        assert!(app.extras.is_empty());
    }

    #[test]
    fn test_app_settings_requires_use() {
        let doc = document("[app:main]\nretry.attempts = 2\n");
        let err = AppSettings::from_document(&doc).unwrap_err();
        assert!(matches!(err, ConfigError::KeyNotFound { .. }));
    }

    #[test]
    fn test_app_settings_requires_section() {
        let doc = document("[server:main]\nlisten = *:8080\n");
        let err = AppSettings::from_document(&doc).unwrap_err();
        assert!(matches!(err, ConfigError::SectionNotFound { .. }));
    }

    #[test]
    fn test_app_settings_bad_retry_attempts() {
        let doc = document("[app:main]\nuse = egg:myapp\nretry.attempts = abc\n");
        let err = AppSettings::from_document(&doc).unwrap_err();
        match err {
            ConfigError::TypeMismatch { key, got, .. } => {
                assert_eq!(key, "retry.attempts");
                assert_eq!(got, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_app_settings_interpolates_extras() {
        let doc = document("[app:main]\nuse = egg:myapp\ncache.dir = %(here)s/cache\n")
            .with_var("here", "/srv/app");
        let app = AppSettings::from_document(&doc).unwrap();
        assert_eq!(app.extra("cache.dir"), Some("/srv/app/cache"));
    }

    #[test]
    fn test_pshell_settings_absent_section() {
        let doc = document("[app:main]\nuse = egg:myapp\n");
        let pshell = PshellSettings::from_document(&doc).unwrap();
        assert_eq!(pshell, PshellSettings::default());
    }

    #[test]
    fn test_pshell_settings_with_aliases() {
        let doc = document(
            "[pshell]\n\
             setup = myapp.pshell.setup\n\
             m = myapp.models\n\
             session = myapp.session.factory\n",
        );
        let pshell = PshellSettings::from_document(&doc).unwrap();

        assert_eq!(pshell.setup.as_deref(), Some("myapp.pshell.setup"));
        assert_eq!(
            pshell.aliases,
            vec![
                ("m".to_string(), "myapp.models".to_string()),
                ("session".to_string(), "myapp.session.factory".to_string()),
            ]
        );
    }
}
