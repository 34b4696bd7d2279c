// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type with type-safe conversions.
//!
//! This module provides the `ConfigValue` type, which wraps a resolved
//! configuration value together with its origin and provides type-safe
//! conversion methods to various Rust types.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// A type-safe wrapper for a resolved configuration value.
///
/// `ConfigValue` stores the value as a string internally, after placeholder
/// interpolation has run, and remembers the section and key it came from so
/// conversion failures can name their origin. Documents return a uniform type
/// while callers get type safety at the point of use.
///
/// # Examples
///
/// ```
/// use inicfg::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::new("app:main", "retry.attempts", "42");
/// assert_eq!(value.as_str(), "42");
/// assert_eq!(value.as_i64().unwrap(), 42);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigValue {
    section: String,
    key: String,
    value: String,
}

impl ConfigValue {
    /// Creates a new `ConfigValue` recording the section and key it was
    /// resolved from.
    ///
    /// # Examples
    ///
    /// ```
    /// use inicfg::domain::config_value::ConfigValue;
    ///
    /// let value = ConfigValue::new("app:main", "use", "egg:myapp");
    /// assert_eq!(value.as_str(), "egg:myapp");
    /// ```
    pub fn new(
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        ConfigValue {
            section: section.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns the section this value was resolved from.
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Returns the key this value was resolved from.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Converts the value into a `String`.
    pub fn as_string(&self) -> String {
        self.value.clone()
    }

    /// Converts the value to a boolean.
    ///
    /// Recognizes the following values (case-insensitive):
    /// - `true`: "true", "yes", "1", "on"
    /// - `false`: "false", "no", "0", "off"
    ///
    /// # Examples
    ///
    /// ```
    /// use inicfg::domain::config_value::ConfigValue;
    ///
    /// let value = ConfigValue::new("app:main", "pyramid.debug_all", "yes");
    /// assert_eq!(value.as_bool().unwrap(), true);
    /// ```
    pub fn as_bool(&self) -> Result<bool> {
        match self.value.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(true),
            "false" | "no" | "0" | "off" => Ok(false),
            _ => Err(self.mismatch("boolean")),
        }
    }

    /// Converts the value to an `i32`.
    pub fn as_i32(&self) -> Result<i32> {
        self.value
            .trim()
            .parse::<i32>()
            .map_err(|_| self.mismatch("integer"))
    }

    /// Converts the value to an `i64`.
    ///
    /// # Examples
    ///
    /// ```
    /// use inicfg::domain::config_value::ConfigValue;
    ///
    /// let value = ConfigValue::new("app:main", "retry.attempts", "3");
    /// assert_eq!(value.as_i64().unwrap(), 3);
    /// ```
    pub fn as_i64(&self) -> Result<i64> {
        self.value
            .trim()
            .parse::<i64>()
            .map_err(|_| self.mismatch("integer"))
    }

    /// Converts the value to a `u32`.
    pub fn as_u32(&self) -> Result<u32> {
        self.value
            .trim()
            .parse::<u32>()
            .map_err(|_| self.mismatch("unsigned integer"))
    }

    /// Converts the value to a `u64`.
    pub fn as_u64(&self) -> Result<u64> {
        self.value
            .trim()
            .parse::<u64>()
            .map_err(|_| self.mismatch("unsigned integer"))
    }

    /// Converts the value to an `f64`.
    pub fn as_f64(&self) -> Result<f64> {
        self.value
            .trim()
            .parse::<f64>()
            .map_err(|_| self.mismatch("float"))
    }

    /// Converts the value to a [`Duration`].
    ///
    /// A bare integer is taken as seconds. A trailing unit of `ms`, `s`,
    /// `m`, `h`, or `d` selects milliseconds, seconds, minutes, hours, or
    /// days. A count whose conversion to seconds overflows is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use inicfg::domain::config_value::ConfigValue;
    /// use std::time::Duration;
    ///
    /// let value = ConfigValue::new("app:main", "retry.backoff", "500ms");
    /// assert_eq!(value.as_duration().unwrap(), Duration::from_millis(500));
    ///
    /// let value = ConfigValue::new("app:main", "session.timeout", "30");
    /// assert_eq!(value.as_duration().unwrap(), Duration::from_secs(30));
    /// ```
    pub fn as_duration(&self) -> Result<Duration> {
        let text = self.value.trim();
        let split = text
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len());
        let (count, unit) = text.split_at(split);
        let count: u64 = count.parse().map_err(|_| self.mismatch("duration"))?;
        let scaled = |per_unit: u64| {
            count
                .checked_mul(per_unit)
                .map(Duration::from_secs)
                .ok_or_else(|| self.mismatch("duration"))
        };
        match unit {
            "" | "s" => Ok(Duration::from_secs(count)),
            "ms" => Ok(Duration::from_millis(count)),
            "m" => scaled(60),
            "h" => scaled(3600),
            "d" => scaled(86400),
            _ => Err(self.mismatch("duration")),
        }
    }

    /// Parses the value into any type that implements `FromStr`.
    ///
    /// # Examples
    ///
    /// ```
    /// use inicfg::domain::config_value::ConfigValue;
    /// use std::net::IpAddr;
    ///
    /// let value = ConfigValue::new("server:main", "host", "127.0.0.1");
    /// let ip: IpAddr = value.parse().unwrap();
    /// assert_eq!(ip.to_string(), "127.0.0.1");
    /// ```
    pub fn parse<T>(&self) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.value
            .parse::<T>()
            .map_err(|_| self.mismatch(std::any::type_name::<T>()))
    }

    fn mismatch(&self, expected: &str) -> ConfigError {
        ConfigError::type_mismatch(&self.section, &self.key, expected, &self.value)
    }
}

impl From<ConfigValue> for String {
    fn from(value: ConfigValue) -> Self {
        value.value
    }
}

impl AsRef<str> for ConfigValue {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
