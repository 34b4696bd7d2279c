// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed view over the `[server:main]` section.

use super::optional_string;
use crate::domain::{ConfigDocument, ConfigError, HostPort, Result};
use serde::{Deserialize, Serialize};

/// Typed settings from the `[server:main]` section.
///
/// The `listen` key holds one or more whitespace-separated `host:port`
/// pairs; they are surfaced as data for an external server runtime, never
/// bound by this crate.
///
/// # Examples
///
/// ```rust
/// use inicfg::adapters::IniParser;
/// use inicfg::ports::ConfigParser;
/// use inicfg::settings::ServerSettings;
///
/// # fn main() -> inicfg::domain::Result<()> {
/// let doc = IniParser::new().parse(
///     "[server:main]\nuse = egg:waitress#main\nlisten = 127.0.0.1:8080 [::1]:8080\n",
/// )?;
/// let server = ServerSettings::from_document(&doc)?;
///
/// assert_eq!(server.listen.len(), 2);
/// assert_eq!(server.listen[0].port, 8080);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// The server factory reference from the `use` key, when present.
    pub use_spec: Option<String>,
    /// Bind addresses from the required `listen` key.
    pub listen: Vec<HostPort>,
    /// Remaining keys in section order, values interpolated.
    pub extras: Vec<(String, String)>,
}

impl ServerSettings {
    /// The section this view reads.
    pub const SECTION: &'static str = "server:main";

    const RECOGNIZED: [&'static str; 2] = ["use", "listen"];

    /// Extracts the server settings from a document.
    ///
    /// # Returns
    ///
    /// * `Ok(ServerSettings)` - The section was present with a well-formed
    ///   `listen` list
    /// * `Err(ConfigError)` - The section or its `listen` key is missing, or
    ///   a `listen` token is not a `host:port` pair
    pub fn from_document(doc: &ConfigDocument) -> Result<Self> {
        let raw = doc.get_string(Self::SECTION, "listen")?;
        let mut listen = Vec::new();
        for token in raw.split_whitespace() {
            match HostPort::parse(token) {
                Some(pair) => listen.push(pair),
                None => {
                    return Err(ConfigError::type_mismatch(
                        Self::SECTION,
                        "listen",
                        "host:port",
                        token,
                    ))
                }
            }
        }
        if listen.is_empty() {
            return Err(ConfigError::type_mismatch(
                Self::SECTION,
                "listen",
                "host:port",
                raw,
            ));
        }

        let use_spec = optional_string(doc, Self::SECTION, "use")?;

        let mut extras = Vec::new();
        if let Some(section) = doc.section(Self::SECTION) {
            for (key, _) in section.iter() {
                if Self::RECOGNIZED.contains(&key) {
                    continue;
                }
                extras.push((key.to_string(), doc.get_string(Self::SECTION, key)?));
            }
        }

        Ok(ServerSettings {
            use_spec,
            listen,
            extras,
        })
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
    fn test_server_settings_single_listen() {
        let doc = document("[server:main]\nuse = egg:waitress#main\nlisten = 127.0.0.1:6543\n");
        let server = ServerSettings::from_document(&doc).unwrap();

        assert_eq!(server.use_spec.as_deref(), Some("egg:waitress#main"));
        assert_eq!(server.listen, vec![HostPort::parse("127.0.0.1:6543").unwrap()]);
        assert!(server.extras.is_empty());
    }

    #[test]
    fn test_server_settings_listen_list() {
        let doc = document("[server:main]\nlisten = *:8080 [::1]:8081 localhost:8082\n");
        let server = ServerSettings::from_document(&doc).unwrap();

        let hosts: Vec<&str> = server.listen.iter().map(|hp| hp.host.as_str()).collect();
        let ports: Vec<u16> = server.listen.iter().map(|hp| hp.port).collect();
        assert_eq!(hosts, vec!["*", "::1", "localhost"]);
        assert_eq!(ports, vec![8080, 8081, 8082]);
    }

    #[test]
    fn test_server_settings_missing_listen() {
        let doc = document("[server:main]\nuse = egg:waitress#main\n");
        let err = ServerSettings::from_document(&doc).unwrap_err();
        assert!(matches!(err, ConfigError::KeyNotFound { .. }));
    }

    #[test]
    fn test_server_settings_bad_listen_token() {
        let doc = document("[server:main]\nlisten = 127.0.0.1:8080 nonsense\n");
        let err = ServerSettings::from_document(&doc).unwrap_err();
        match err {
            ConfigError::TypeMismatch { key, got, .. } => {
                assert_eq!(key, "listen");
                assert_eq!(got, "nonsense");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_server_settings_empty_listen() {
        let doc = document("[server:main]\nlisten =\n");
        let err = ServerSettings::from_document(&doc).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    }

    #[test]
    fn test_server_settings_extras() {
        let doc = document("[server:main]\nlisten = *:8080\nmax_threads = 8\n");
        let server = ServerSettings::from_document(&doc).unwrap();
        assert_eq!(
            server.extras,
            vec![("max_threads".to_string(), "8".to_string())]
        );
    }
}
