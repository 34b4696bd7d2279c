// SPDX-License-Identifier: MIT OR Apache-2.0

//! Placeholder interpolation for configuration values.
//!
//! Raw values may contain `%(name)s` placeholders that are substituted from
//! an [`InterpolationContext`] before the value reaches the caller. `%%`
//! escapes a literal percent sign. Substituted values are themselves
//! expanded, up to a fixed depth, so a placeholder may refer to another
//! placeholder-bearing entry.

use crate::domain::errors::{ConfigError, Result};
use std::collections::HashMap;

/// Maximum number of nested substitution rounds before expansion gives up.
pub const MAX_INTERPOLATION_DEPTH: usize = 10;

/// The name→value map that `%(name)s` placeholders resolve against.
///
/// Callers layer entries with [`set`](InterpolationContext::set); a later
/// `set` for the same name overrides an earlier one. Documents build the
/// context from loader variables, `[DEFAULT]` entries, and the current
/// section's entries, in that order.
///
/// # Examples
///
/// ```
/// use inicfg::domain::interpolation::{expand, InterpolationContext};
///
/// let mut ctx = InterpolationContext::new();
/// ctx.set("here", "/srv/app");
/// let resolved = expand("file://%(here)s/Data.fs", &ctx).unwrap();
/// assert_eq!(resolved, "file:///srv/app/Data.fs");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InterpolationContext {
    entries: HashMap<String, String>,
}

impl InterpolationContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a name, overriding any earlier value for it.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Looks up a name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }
}

/// Expands every `%(name)s` placeholder in `raw` against the context.
///
/// `%%` yields a literal `%`. A `%` followed by anything other than `%` or
/// `(` is rejected, as is a placeholder without a closing `)` or without the
/// trailing `s` conversion. Substituted values are expanded recursively up
/// to [`MAX_INTERPOLATION_DEPTH`].
pub fn expand(raw: &str, context: &InterpolationContext) -> Result<String> {
    expand_at_depth(raw, context, 1)
}

fn expand_at_depth(raw: &str, context: &InterpolationContext, depth: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];
        match rest.chars().next() {
            Some('%') => {
                out.push('%');
                rest = &rest[1..];
            }
            Some('(') => {
                let close = rest
                    .find(')')
                    .ok_or_else(|| ConfigError::InterpolationSyntax {
                        message: format!("missing ')' after '%({}'", &rest[1..]),
                    })?;
                let name = &rest[1..close];
                if name.is_empty() {
                    return Err(ConfigError::InterpolationSyntax {
                        message: "empty placeholder name in '%()s'".to_string(),
                    });
                }
                rest = &rest[close + 1..];
                if !rest.starts_with('s') {
                    return Err(ConfigError::InterpolationSyntax {
                        message: format!("placeholder '%({})' must be followed by 's'", name),
                    });
                }
                rest = &rest[1..];
                let value =
                    context
                        .get(name)
                        .ok_or_else(|| ConfigError::UnresolvedPlaceholder {
                            name: name.to_string(),
                        })?;
                if value.contains('%') {
                    if depth >= MAX_INTERPOLATION_DEPTH {
                        return Err(ConfigError::InterpolationDepth {
                            name: name.to_string(),
                        });
                    }
                    out.push_str(&expand_at_depth(value, context, depth + 1)?);
                } else {
                    out.push_str(value);
                }
            }
            Some(other) => {
                return Err(ConfigError::InterpolationSyntax {
                    message: format!("'%' must be followed by '%' or '(', found '{}'", other),
                });
            }
            None => {
                return Err(ConfigError::InterpolationSyntax {
                    message: "input ends with a bare '%'".to_string(),
                });
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}
