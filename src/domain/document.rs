// SPDX-License-Identifier: MIT OR Apache-2.0

//! The in-memory configuration document.
//!
//! A [`ConfigDocument`] is an ordered sequence of named [`Section`]s, each an
//! ordered list of key-value entries, plus the loader-injected interpolation
//! variables (`here`, `__file__`). Documents are built by a parser or by
//! hand, then treated as immutable once published; readers share them behind
//! an `Arc` and never need a lock.
//!
//! Key lookups fall back to the `[DEFAULT]` section, and resolved values are
//! interpolated against the variables, `[DEFAULT]`, and the entry's own
//! section before they reach the caller.

use crate::domain::config_value::ConfigValue;
use crate::domain::errors::{ConfigError, Result};
use crate::domain::interpolation::{expand, InterpolationContext};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Name of the section whose entries serve as fallbacks for every other
/// section and feed the interpolation context.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// A named, ordered collection of key-value entries.
///
/// Entries keep their insertion order. Re-inserting an existing key replaces
/// its value in place, so the entry keeps the position of its first
/// occurrence while the value of the last occurrence wins.
///
/// # Examples
///
/// ```
/// use inicfg::domain::document::Section;
///
/// let mut section = Section::new("app:main");
/// section.insert("use", "egg:myapp");
/// section.insert("retry.attempts", "3");
/// assert_eq!(section.get("use"), Some("egg:myapp"));
/// assert_eq!(section.keys().collect::<Vec<_>>(), vec!["use", "retry.attempts"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    /// Creates an empty section with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Section {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Returns the section's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts an entry, replacing the value in place if the key exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Looks up the raw value for a key in this section only.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if the section has an entry for the key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the section has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A parsed configuration document.
///
/// Sections keep the order they appeared in; lookups that miss in the named
/// section fall back to `[DEFAULT]`. The resolved accessors run placeholder
/// interpolation; [`get_raw`](ConfigDocument::get_raw) skips it for values
/// whose `%(...)s` syntax belongs to another runtime (logging format
/// strings).
///
/// # Examples
///
/// ```
/// use inicfg::domain::document::{ConfigDocument, Section};
///
/// let mut section = Section::new("app:main");
/// section.insert("datastore.uri", "file://%(here)s/Data.fs");
/// let mut doc = ConfigDocument::new().with_var("here", "/srv/app");
/// doc.insert_section(section);
///
/// let uri = doc.get_string("app:main", "datastore.uri").unwrap();
/// assert_eq!(uri, "file:///srv/app/Data.fs");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    sections: Vec<Section>,
    vars: HashMap<String, String>,
}

impl ConfigDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a loader-injected interpolation variable (builder style).
    ///
    /// Variables sit below `[DEFAULT]` and section entries in the
    /// interpolation context, so a document entry with the same name shadows
    /// the variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Looks up a loader-injected variable.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Inserts a section, replacing any existing section with the same name
    /// in place.
    pub fn insert_section(&mut self, section: Section) {
        match self
            .sections
            .iter()
            .position(|s| s.name() == section.name())
        {
            Some(idx) => self.sections[idx] = section,
            None => self.sections.push(section),
        }
    }

    /// Returns the section with the given name, if present.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name() == name)
    }

    /// Returns a mutable reference to the section with the given name.
    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name() == name)
    }

    /// Returns `true` if a section with the given name exists.
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.iter().any(|s| s.name() == name)
    }

    /// Iterates over sections in document order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Iterates over section names in document order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(Section::name)
    }

    /// Returns the number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Looks up the raw, uninterpolated value for a key.
    ///
    /// Misses in the named section fall back to `[DEFAULT]`. Errors are
    /// [`ConfigError::SectionNotFound`] when the section itself is absent
    /// and [`ConfigError::KeyNotFound`] when neither the section nor
    /// `[DEFAULT]` has the key.
    pub fn get_raw(&self, section: &str, key: &str) -> Result<&str> {
        let sect = self
            .section(section)
            .ok_or_else(|| ConfigError::SectionNotFound {
                section: section.to_string(),
            })?;
        if let Some(value) = sect.get(key) {
            return Ok(value);
        }
        if sect.name() != DEFAULT_SECTION {
            if let Some(defaults) = self.section(DEFAULT_SECTION) {
                if let Some(value) = defaults.get(key) {
                    return Ok(value);
                }
            }
        }
        Err(ConfigError::KeyNotFound {
            section: section.to_string(),
            key: key.to_string(),
        })
    }

    /// Looks up a key and resolves its placeholders.
    ///
    /// The interpolation context layers the loader variables, the
    /// `[DEFAULT]` entries, and the named section's entries, each overriding
    /// the previous.
    pub fn get(&self, section: &str, key: &str) -> Result<ConfigValue> {
        let raw = self.get_raw(section, key)?;
        let sect = self
            .section(section)
            .ok_or_else(|| ConfigError::SectionNotFound {
                section: section.to_string(),
            })?;
        let context = self.interpolation_context(sect);
        let resolved = expand(raw, &context)?;
        Ok(ConfigValue::new(section, key, resolved))
    }

    /// Looks up a key and returns the resolved value as a `String`.
    pub fn get_string(&self, section: &str, key: &str) -> Result<String> {
        Ok(self.get(section, key)?.as_string())
    }

    /// Looks up a key and coerces the resolved value to an `i64`.
    pub fn get_int(&self, section: &str, key: &str) -> Result<i64> {
        self.get(section, key)?.as_i64()
    }

    /// Looks up a key and coerces the resolved value to a boolean.
    pub fn get_bool(&self, section: &str, key: &str) -> Result<bool> {
        self.get(section, key)?.as_bool()
    }

    /// Looks up a key and coerces the resolved value to a [`Duration`].
    pub fn get_duration(&self, section: &str, key: &str) -> Result<Duration> {
        self.get(section, key)?.as_duration()
    }

    fn interpolation_context(&self, section: &Section) -> InterpolationContext {
        let mut context = InterpolationContext::new();
        for (name, value) in &self.vars {
            context.set(name, value);
        }
        if let Some(defaults) = self.section(DEFAULT_SECTION) {
            for (key, value) in defaults.iter() {
                context.set(key, value);
            }
        }
        for (key, value) in section.iter() {
            context.set(key, value);
        }
        context
    }

    /// Serializes the document back to INI text.
    ///
    /// Sections appear in stored order as `[name]` followed by
    /// `key = value` lines, with a blank line after each section. Embedded
    /// newlines in values are written as tab-indented continuation lines, so
    /// the output parses back to an equal document.
    pub fn to_ini_string(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push('[');
            out.push_str(section.name());
            out.push_str("]\n");
            for (key, value) in section.iter() {
                out.push_str(key);
                out.push_str(" = ");
                out.push_str(&value.replace('\n', "\n\t"));
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ini_string())
    }
}
