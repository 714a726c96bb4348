use crate::adapters::serper::DEFAULT_SERPER_ENDPOINT;
use crate::utils::error::{Result, SleftError};
use crate::utils::validation::{
    validate_range, validate_socket_addr, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Process-wide configuration, loaded once at startup and passed explicitly
/// to every collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub persistence: Option<PersistenceConfig>,
    #[serde(default)]
    pub sessions: SessionsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Pins fit-score jitter for reproducible output.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    pub supabase_url: String,
    pub supabase_key: String,
    #[serde(default = "default_briefs_table")]
    pub briefs_table: String,
    #[serde(default = "default_snapshots_table")]
    pub snapshots_table: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsConfig {
    #[serde(default = "default_session_ttl")]
    pub ttl_seconds: u64,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}
fn default_search_endpoint() -> String {
    DEFAULT_SERPER_ENDPOINT.to_string()
}
fn default_timeout_seconds() -> u64 {
    10
}
fn default_briefs_table() -> String {
    "briefs".to_string()
}
fn default_snapshots_table() -> String {
    "snapshots".to_string()
}
fn default_session_ttl() -> u64 {
    30 * 60
}
fn default_sweep_interval() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_search_endpoint(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
            seed: None,
        }
    }
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_session_ttl(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

/// Upper bound for the session TTL and sweep interval (30 days).
pub const MAX_SESSION_TTL_SECONDS: u64 = 30 * 24 * 60 * 60;

/// Empty values and unresolved `${VAR}` placeholders count as unset.
fn is_unset(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || (value.starts_with("${") && value.ends_with('}'))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !is_unset(v))
}

impl AppConfig {
    /// Loads and parses a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SleftError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SleftError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Builds the configuration from environment variables alone.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(bind) = env_value("SLEFT_BIND") {
            config.server.bind = bind;
        }
        if let Some(endpoint) = env_value("SERPER_ENDPOINT") {
            config.search.endpoint = endpoint;
        }
        config.search.api_key = env_value("SERPER_API_KEY");
        config.search.seed = env_value("SLEFT_SEED").and_then(|s| s.parse().ok());

        if let (Some(url), Some(key)) = (env_value("SUPABASE_URL"), env_value("SUPABASE_SERVICE_KEY"))
        {
            config.persistence = Some(PersistenceConfig {
                supabase_url: url,
                supabase_key: key,
                briefs_table: default_briefs_table(),
                snapshots_table: default_snapshots_table(),
            });
        }

        if env_value("SLEFT_LOG_FORMAT").as_deref() == Some("json") {
            config.logging.format = LogFormat::Json;
        }

        config
    }

    /// Expands `${VAR}` references; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SleftError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// The search key, or `None` when searches should use demo data.
    pub fn search_api_key(&self) -> Option<&str> {
        self.search
            .api_key
            .as_deref()
            .filter(|key| !is_unset(key))
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search.timeout_seconds)
    }

    /// Persistence settings, ignored when either credential is unset.
    pub fn persistence(&self) -> Option<&PersistenceConfig> {
        self.persistence
            .as_ref()
            .filter(|p| !is_unset(&p.supabase_url) && !is_unset(&p.supabase_key))
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.sessions.ttl_seconds)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sessions.sweep_interval_seconds)
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_socket_addr("server.bind", &self.server.bind)?;
        validate_url("search.endpoint", &self.search.endpoint)?;
        validate_range("search.timeout_seconds", self.search.timeout_seconds, 1, 120)?;
        validate_range(
            "sessions.ttl_seconds",
            self.sessions.ttl_seconds,
            1,
            MAX_SESSION_TTL_SECONDS,
        )?;
        validate_range(
            "sessions.sweep_interval_seconds",
            self.sessions.sweep_interval_seconds,
            1,
            MAX_SESSION_TTL_SECONDS,
        )?;

        if let Some(persistence) = &self.persistence {
            // both credentials unset disables persistence; one alone is a mistake
            match (is_unset(&persistence.supabase_url), is_unset(&persistence.supabase_key)) {
                (true, true) => {}
                (true, false) => {
                    return Err(SleftError::MissingConfigError {
                        field: "persistence.supabase_url".to_string(),
                    })
                }
                (false, true) => {
                    return Err(SleftError::MissingConfigError {
                        field: "persistence.supabase_key".to_string(),
                    })
                }
                (false, false) => {
                    validate_url("persistence.supabase_url", &persistence.supabase_url)?
                }
            }
        }

        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.search.endpoint, "https://google.serper.dev");
        assert_eq!(config.search.timeout_seconds, 10);
        assert_eq!(config.sessions.ttl_seconds, 1800);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(config.search_api_key().is_none());
        assert!(config.persistence().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[server]
bind = "0.0.0.0:9000"

[search]
endpoint = "https://search.internal"
api_key = "abc123"
timeout_seconds = 5
seed = 7

[persistence]
supabase_url = "https://project.supabase.co"
supabase_key = "service"
snapshots_table = "signal_snapshots"

[sessions]
ttl_seconds = 600
sweep_interval_seconds = 30

[logging]
format = "json"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.search_api_key(), Some("abc123"));
        assert_eq!(config.search.seed, Some(7));
        let persistence = config.persistence().unwrap();
        assert_eq!(persistence.briefs_table, "briefs");
        assert_eq!(persistence.snapshots_table, "signal_snapshots");
        assert_eq!(config.session_ttl(), Duration::from_secs(600));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SLEFT_TEST_SERPER_KEY", "from-env");

        let config = AppConfig::from_toml_str(
            r#"
[search]
api_key = "${SLEFT_TEST_SERPER_KEY}"
"#,
        )
        .unwrap();
        assert_eq!(config.search_api_key(), Some("from-env"));

        std::env::remove_var("SLEFT_TEST_SERPER_KEY");
    }

    #[test]
    fn test_unresolved_placeholder_means_no_key() {
        let config = AppConfig::from_toml_str(
            r#"
[search]
api_key = "${SLEFT_TEST_DEFINITELY_UNSET_KEY}"

[persistence]
supabase_url = "https://project.supabase.co"
supabase_key = "${SLEFT_TEST_DEFINITELY_UNSET_DB_KEY}"
"#,
        )
        .unwrap();

        assert!(config.search_api_key().is_none());
        assert!(config.persistence().is_none());
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::from_toml_str(
            r#"
[search]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str(
            r#"
[server]
bind = "not-an-address"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str(
            r#"
[sessions]
ttl_seconds = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str(
            r#"
[sessions]
ttl_seconds = 9223372036854775807
"#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SleftError::InvalidConfigValueError { .. }));

        let config = AppConfig::from_toml_str(
            r#"
[sessions]
ttl_seconds = 2592000
"#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_half_configured_persistence_is_missing_config() {
        let config = AppConfig::from_toml_str(
            r#"
[persistence]
supabase_url = "https://project.supabase.co"
supabase_key = ""
"#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            SleftError::MissingConfigError { ref field } if field == "persistence.supabase_key"
        ));

        let config = AppConfig::from_toml_str(
            r#"
[persistence]
supabase_url = "${SLEFT_TEST_UNSET_SUPABASE_URL}"
supabase_key = "${SLEFT_TEST_UNSET_SUPABASE_KEY}"
"#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert!(config.persistence().is_none());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[server\nbind = 1").unwrap_err();
        assert!(matches!(err, SleftError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nbind = \"127.0.0.1:7070\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:7070");
    }
}
