#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("settings validation failed: {0}")]
    Settings(String),
    #[error("invalid value `{value}` for `{var}`: {reason}")]
    Env {
        var: String,
        value: String,
        reason: String,
    },
}

pub const SESSION_TTL_ENV_VAR: &str = "COACHFLOW_SESSION_TTL_SECONDS";
pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 1800;

/// Sessions and their active pointers share this single TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub session_ttl_seconds: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
        }
    }
}

impl EngineSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(SESSION_TTL_ENV_VAR) {
            Ok(raw) => {
                let session_ttl_seconds =
                    raw.trim().parse::<u64>().map_err(|err| ConfigError::Env {
                        var: SESSION_TTL_ENV_VAR.to_string(),
                        value: raw.clone(),
                        reason: err.to_string(),
                    })?;
                let settings = Self {
                    session_ttl_seconds,
                };
                settings.validate()?;
                Ok(settings)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_ttl_seconds == 0 {
            return Err(ConfigError::Settings(
                "`session_ttl_seconds` must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
