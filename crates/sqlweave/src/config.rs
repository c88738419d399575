//! Process-level settings loaded from TOML.
//!
//! ```toml
//! dialect = "postgres"
//! log_sql_max_len = 500
//! ```

use crate::dialect::{DialectRef, MySql, Postgres, Standard, set_default_dialect};
use crate::error::{QbError, QbResult};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Built-in dialect selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialectKind {
    #[default]
    Standard,
    Mysql,
    Postgres,
}

impl DialectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DialectKind::Standard => "standard",
            DialectKind::Mysql => "mysql",
            DialectKind::Postgres => "postgres",
        }
    }

    /// Shared handle to the selected dialect.
    pub fn into_dialect(self) -> DialectRef {
        match self {
            DialectKind::Standard => Standard.into(),
            DialectKind::Mysql => MySql.into(),
            DialectKind::Postgres => Postgres.into(),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialectKind {
    type Err = QbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "ansi" => Ok(DialectKind::Standard),
            "mysql" => Ok(DialectKind::Mysql),
            "postgres" | "postgresql" => Ok(DialectKind::Postgres),
            other => Err(QbError::config(format!("unknown dialect: {other}"))),
        }
    }
}

/// Crate settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Process default dialect.
    #[serde(default)]
    pub dialect: DialectKind,

    /// Truncation length for SQL in build logs; `0` disables truncation.
    #[serde(default)]
    pub log_sql_max_len: Option<usize>,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(raw: &str) -> QbResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Read and parse a TOML settings file.
    pub fn load(path: impl AsRef<Path>) -> QbResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            QbError::config(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Install these settings process-wide.
    ///
    /// Sets the default dialect and the build-log truncation length; returns
    /// the previously installed default dialect.
    pub fn apply(&self) -> DialectRef {
        if let Some(len) = self.log_sql_max_len {
            crate::trace::set_max_logged_sql(len);
        }
        set_default_dialect(self.dialect.into_dialect())
    }
}
