// SPDX-License-Identifier: MIT OR Apache-2.0

//! INI file configuration source adapter.
//!
//! This module provides the line-oriented INI parser and an adapter that
//! reads configuration text from files on disk.

use crate::domain::document::Section;
use crate::domain::{ConfigDocument, ConfigError, ParseErrorKind, Result};
use crate::ports::{ConfigParser, ConfigSource};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Maximum allowed size for a configuration file (1 MiB).
const MAX_INI_FILE_SIZE: u64 = 1024 * 1024;

/// Parser for the INI deployment-file grammar.
///
/// The grammar is line oriented:
///
/// - `[name]` starts a section; only trailing whitespace may follow `]`.
/// - `key = value` or `key: value` adds an entry; the first `=` or `:`
///   splits, and both sides are trimmed. An empty value is allowed.
/// - `#` or `;` as the first non-blank character makes the line a comment.
/// - A non-blank line starting with whitespace continues the previous
///   entry's value; the trimmed text is appended after a newline.
/// - A blank line separates entries and ends any in-progress multi-line
///   value.
///
/// Parsing is all-or-nothing: the first structural violation aborts with
/// [`ConfigError::Parse`] carrying the 1-based line number.
///
/// # Examples
///
/// ```rust
/// use inicfg::adapters::IniParser;
/// use inicfg::ports::ConfigParser;
///
/// let parser = IniParser::new();
/// let doc = parser
///     .parse("[app:main]\nuse = egg:myapp\nretry.attempts = 3\n")
///     .unwrap();
/// assert_eq!(doc.get_string("app:main", "use").unwrap(), "egg:myapp");
/// ```
#[derive(Debug, Clone)]
pub struct IniParser;

impl IniParser {
    /// Creates a new INI parser.
    pub fn new() -> Self {
        IniParser
    }
}

impl Default for IniParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser for IniParser {
    fn parse(&self, content: &str) -> Result<ConfigDocument> {
        let mut doc = ConfigDocument::new();
        let mut current: Option<Section> = None;
        let mut current_key: Option<String> = None;

        for (idx, line) in content.lines().enumerate() {
            let lineno = idx + 1;
            let trimmed = line.trim();

            // Blank line: separator; ends any in-progress multi-line value.
            if trimmed.is_empty() {
                current_key = None;
                continue;
            }

            // Comment: skipped without disturbing continuation state.
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            // Continuation: leading whitespace on a non-blank line.
            if line.starts_with(|c: char| c.is_whitespace()) {
                match (current.as_mut(), &current_key) {
                    (None, _) => {
                        return Err(ConfigError::parse(ParseErrorKind::MalformedSection, lineno));
                    }
                    (Some(_), None) => {
                        return Err(ConfigError::parse(
                            ParseErrorKind::UnterminatedContinuation,
                            lineno,
                        ));
                    }
                    (Some(section), Some(key)) => {
                        let joined = match section.get(key) {
                            Some(existing) => format!("{}\n{}", existing, trimmed),
                            None => trimmed.to_string(),
                        };
                        section.insert(key.as_str(), joined);
                    }
                }
                continue;
            }

            // Section header.
            if let Some(rest) = trimmed.strip_prefix('[') {
                let close = rest.rfind(']').ok_or_else(|| {
                    ConfigError::parse(ParseErrorKind::MalformedSection, lineno)
                })?;
                if !rest[close + 1..].trim().is_empty() {
                    return Err(ConfigError::parse(ParseErrorKind::MalformedSection, lineno));
                }
                let name = rest[..close].trim();
                if name.is_empty() {
                    return Err(ConfigError::parse(ParseErrorKind::MalformedSection, lineno));
                }
                if let Some(finished) = current.take() {
                    doc.insert_section(finished);
                }
                if doc.has_section(name) {
                    return Err(ConfigError::parse(ParseErrorKind::DuplicateSection, lineno));
                }
                current = Some(Section::new(name));
                current_key = None;
                continue;
            }

            // Key-value entry.
            match current.as_mut() {
                None => {
                    // Content before the first section header.
                    return Err(ConfigError::parse(ParseErrorKind::MalformedSection, lineno));
                }
                Some(section) => {
                    let delim = trimmed
                        .find(|c| c == '=' || c == ':')
                        .ok_or_else(|| ConfigError::parse(ParseErrorKind::MalformedLine, lineno))?;
                    let key = trimmed[..delim].trim();
                    if key.is_empty() {
                        return Err(ConfigError::parse(ParseErrorKind::MalformedLine, lineno));
                    }
                    let value = trimmed[delim + 1..].trim();
                    section.insert(key, value);
                    current_key = Some(key.to_string());
                }
            }
        }

        if let Some(finished) = current.take() {
            doc.insert_section(finished);
        }

        debug!(sections = doc.len(), "Parsed configuration document");
        Ok(doc)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["ini", "conf"]
    }
}

/// Configuration source adapter for INI files on disk.
///
/// The adapter remembers the canonicalized file path and its parent
/// directory, which the loader publishes as the `__file__` and `here`
/// interpolation variables. Every [`read`](ConfigSource::read) re-reads the
/// file, so a reloading service picks up edits.
///
/// # Examples
///
/// ```rust,no_run
/// use inicfg::adapters::IniFileSource;
/// use inicfg::ports::ConfigSource;
///
/// // Load from a specific file
/// let source = IniFileSource::from_file("/etc/myapp/deploy.ini").unwrap();
///
/// // Load from the default OS location
/// let source = IniFileSource::from_default_location("myapp", "com.example").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct IniFileSource {
    /// Canonicalized path to the INI file
    file_path: PathBuf,
    /// Parent directory of the file, exposed as `here`
    here: Option<PathBuf>,
}

impl IniFileSource {
    /// Creates a source for a specific file path.
    ///
    /// The path is canonicalized up front, so the file must exist when the
    /// source is created.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the INI file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();

        let canonical_path = file_path
            .canonicalize()
            .map_err(|e| ConfigError::SourceError {
                source_name: "ini-file".to_string(),
                message: format!(
                    "Invalid or inaccessible path: {}",
                    file_path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("<unknown>")
                ),
                source: Some(Box::new(e)),
            })?;

        let here = canonical_path.parent().map(Path::to_path_buf);

        Ok(Self {
            file_path: canonical_path,
            here,
        })
    }

    /// Creates a source for the default OS-appropriate location.
    ///
    /// This method uses the `directories` crate to determine the appropriate
    /// configuration directory for the current operating system and expects
    /// a `deploy.ini` file there.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::with_filename(app_name, qualifier, "deploy.ini")
    }

    /// Creates a source with a custom file name in the default location.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name
    /// * `qualifier` - The organization/qualifier
    /// * `filename` - The configuration file name (e.g., "staging.ini")
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: "ini-file".to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        let config_file = proj_dirs.config_dir().join(filename);
        Self::from_file(config_file)
    }

    /// Returns the canonicalized path to the configuration file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn file_label(&self) -> &str {
        self.file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unknown>")
    }
}

impl ConfigSource for IniFileSource {
    fn name(&self) -> &str {
        "ini-file"
    }

    fn read(&self) -> Result<String> {
        let metadata = fs::metadata(&self.file_path).map_err(|e| ConfigError::SourceError {
            source_name: "ini-file".to_string(),
            message: format!("Failed to read file metadata: {}", self.file_label()),
            source: Some(Box::new(e)),
        })?;

        if metadata.len() > MAX_INI_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: "ini-file".to_string(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_INI_FILE_SIZE
                ),
                source: None,
            });
        }

        let content = fs::read_to_string(&self.file_path).map_err(|e| ConfigError::SourceError {
            source_name: "ini-file".to_string(),
            message: format!("Failed to read configuration file: {}", self.file_label()),
            source: Some(Box::new(e)),
        })?;

        debug!(
            path = %self.file_path.display(),
            bytes = content.len(),
            "Read configuration file"
        );
        Ok(content)
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.file_path)
    }

    fn here(&self) -> Option<&Path> {
        self.here.as_deref()
    }
}
