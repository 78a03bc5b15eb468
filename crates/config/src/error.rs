//! Config extraction errors.

use figment::error::Kind;
use std::fmt;

/// The message shown when the config could not be extracted from the figment.
pub const FAILED_TO_EXTRACT_CONFIG_MSG: &str = "failed to extract minty config:";

/// The settings that could not be extracted into a `Config`, one [`ConfigIssue`] per key.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("failed to extract minty config:{}", DisplayIssues(.issues))]
pub struct ExtractConfigError {
    issues: Vec<ConfigIssue>,
}

impl ExtractConfigError {
    pub fn new(error: figment::Error) -> Self {
        let mut issues: Vec<ConfigIssue> = Vec::with_capacity(error.count());
        for err in error {
            let issue = ConfigIssue::from(err);
            if !issues.contains(&issue) {
                issues.push(issue);
            }
        }
        Self { issues }
    }

    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }
}

/// A single rejected setting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigIssue {
    /// The config key, e.g. `eth_rpc_url`.
    pub key: Option<String>,
    /// Where the rejected value came from: the toml file or the environment.
    pub origin: Option<String>,
    pub message: String,
}

impl ConfigIssue {
    /// The `MINTY_` environment variable that overrides this key.
    pub fn env_var(&self) -> Option<String> {
        self.key.as_ref().map(|key| format!("MINTY_{}", key.replace('.', "_").to_uppercase()))
    }
}

impl From<figment::Error> for ConfigIssue {
    fn from(err: figment::Error) -> Self {
        let key = match &err.kind {
            Kind::MissingField(field) if err.path.is_empty() => Some(field.to_string()),
            _ if !err.path.is_empty() => Some(err.path.join(".")),
            _ => None,
        };
        let origin = err.metadata.as_ref().map(|meta| match &meta.source {
            Some(source) => source.to_string(),
            None => meta.name.to_string(),
        });
        Self { key, origin, message: err.kind.to_string() }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.key, self.env_var()) {
            (Some(key), Some(env)) => write!(f, "`{key}` (or {env}): {}", self.message)?,
            _ => f.write_str(&self.message)?,
        }
        if let Some(origin) = &self.origin {
            write!(f, ", from {origin}")?;
        }
        Ok(())
    }
}

struct DisplayIssues<'a>(&'a [ConfigIssue]);

impl fmt::Display for DisplayIssues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in self.0 {
            write!(f, "\n  {issue}")?;
        }
        Ok(())
    }
}
