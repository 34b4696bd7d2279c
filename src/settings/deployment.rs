// SPDX-License-Identifier: MIT OR Apache-2.0

//! The aggregated typed view over a whole deployment document.

use super::{AppSettings, LoggingTopology, PshellSettings, ServerSettings};
use crate::domain::{ConfigDocument, KeySchema, Result, Schema, SectionSchema, ValueKind};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEPLOYMENT_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .section(
            SectionSchema::required(AppSettings::SECTION)
                .key(KeySchema::required("use", ValueKind::Str))
                .key(KeySchema::optional("datastore.uri", ValueKind::Str))
                .key(KeySchema::optional("retry.attempts", ValueKind::Int))
                .key(KeySchema::optional("auth.secret", ValueKind::Str)),
        )
        .section(
            SectionSchema::required(ServerSettings::SECTION)
                .key(KeySchema::optional("use", ValueKind::Str))
                .key(KeySchema::required("listen", ValueKind::HostPort)),
        )
        .section(
            SectionSchema::optional(PshellSettings::SECTION)
                .key(KeySchema::optional("setup", ValueKind::Str)),
        )
        .section(
            SectionSchema::optional(LoggingTopology::LOGGERS_SECTION)
                .key(KeySchema::required("keys", ValueKind::Str)),
        )
        .section(
            SectionSchema::optional(LoggingTopology::HANDLERS_SECTION)
                .key(KeySchema::required("keys", ValueKind::Str)),
        )
        .section(
            SectionSchema::optional(LoggingTopology::FORMATTERS_SECTION)
                .key(KeySchema::required("keys", ValueKind::Str)),
        )
});

/// Every recognized section of a deployment file, extracted together.
///
/// # Examples
///
/// ```rust
/// use inicfg::service::ConfigService;
/// use inicfg::settings::DeploymentSettings;
///
/// # fn main() -> inicfg::domain::Result<()> {
/// let service = ConfigService::builder()
///     .with_string(
///         "[app:main]\nuse = egg:myapp\n\n[server:main]\nlisten = 127.0.0.1:8080\n",
///     )
///     .with_schema(DeploymentSettings::schema().clone())
///     .build()?;
///
/// let settings = DeploymentSettings::from_document(&service.snapshot())?;
/// assert_eq!(settings.server.listen[0].port, 8080);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentSettings {
    /// The `[app:main]` section.
    pub app: AppSettings,
    /// The `[server:main]` section.
    pub server: ServerSettings,
    /// The optional `[pshell]` section.
    pub pshell: PshellSettings,
    /// The logging declaration sections and their subsections.
    pub logging: LoggingTopology,
}

impl DeploymentSettings {
    /// The schema a deployment document is validated against.
    ///
    /// The `logger_*`, `handler_*`, and `formatter_*` subsections are
    /// data-driven and cannot be declared statically;
    /// [`LoggingTopology::from_document`] cross-checks them instead.
    pub fn schema() -> &'static Schema {
        &DEPLOYMENT_SCHEMA
    }

    /// Extracts every recognized section from a document.
    pub fn from_document(doc: &ConfigDocument) -> Result<Self> {
        Ok(DeploymentSettings {
            app: AppSettings::from_document(doc)?,
            server: ServerSettings::from_document(doc)?,
            pshell: PshellSettings::from_document(doc)?,
            logging: LoggingTopology::from_document(doc)?,
        })
    }
}
