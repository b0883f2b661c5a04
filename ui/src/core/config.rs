//! Startup configuration, assembled once by the platform crate and injected
//! through context. Nothing below the views reads the environment directly.

use dioxus::logger::tracing::info;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("database url `{url}` is invalid: {reason}")]
    InvalidDatabaseUrl { url: String, reason: String },
    #[error("database url must use http or https, got `{0}`")]
    UnsupportedScheme(String),
}

/// Realtime database endpoint, e.g. `https://<project>-default-rtdb.firebaseio.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    base_url: Url,
    auth: Option<String>,
}

impl DatabaseConfig {
    pub fn new(url: &str, auth: Option<String>) -> Result<Self, ConfigError> {
        let mut base_url = Url::parse(url).map_err(|err| ConfigError::InvalidDatabaseUrl {
            url: url.to_string(),
            reason: err.to_string(),
        })?;

        match base_url.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }

        // Collection paths are joined onto the base, which only keeps the
        // last segment when the path ends in a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            auth: auth.filter(|token| !token.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Database secret or ID token appended as the `auth` query parameter.
    pub fn auth(&self) -> Option<&str> {
        self.auth.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub liff_id: Option<String>,
    /// `None` runs the app against the in-memory demo store.
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Read the values baked in at build time:
    /// `MOODMETER_LIFF_ID`, `MOODMETER_DATABASE_URL`, `MOODMETER_DATABASE_AUTH`.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("MOODMETER_LIFF_ID"),
            option_env!("MOODMETER_DATABASE_URL"),
            option_env!("MOODMETER_DATABASE_AUTH"),
        )
    }

    pub fn from_values(
        liff_id: Option<&str>,
        database_url: Option<&str>,
        database_auth: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let liff_id = non_blank(liff_id);
        let database = match non_blank(database_url) {
            Some(url) => Some(DatabaseConfig::new(&url, non_blank(database_auth))?),
            None => {
                info!("MOODMETER_DATABASE_URL not set, using the in-memory demo store");
                None
            }
        };

        Ok(Self { liff_id, database })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
