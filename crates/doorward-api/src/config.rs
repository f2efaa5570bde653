//! Server configuration read from the environment.

use std::net::SocketAddr;

use doorward_access::domain::policy::DefaultPinPolicy;
use doorward_access::domain::values::Pin;

use crate::error::AppError;

/// Runtime configuration for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// Port to bind (`PORT`, default `3000`).
    pub port: u16,
    /// Initial PIN policy for new doors (`DOORWARD_PIN_POLICY`,
    /// `DOORWARD_DEFAULT_PIN`).
    pub pin_policy: DefaultPinPolicy,
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;

        let default_pin = lookup("DOORWARD_DEFAULT_PIN")
            .map(|raw| {
                Pin::parse(&raw).map_err(|_| {
                    AppError::Config("DOORWARD_DEFAULT_PIN must be exactly 4 digits".to_string())
                })
            })
            .transpose()?;

        let pin_policy = match lookup("DOORWARD_PIN_POLICY").as_deref() {
            None | Some("fixed") => {
                default_pin.map_or_else(DefaultPinPolicy::default, DefaultPinPolicy::Fixed)
            }
            Some("random") => {
                if default_pin.is_some() {
                    return Err(AppError::Config(
                        "DOORWARD_DEFAULT_PIN cannot be combined with DOORWARD_PIN_POLICY=random"
                            .to_string(),
                    ));
                }
                DefaultPinPolicy::Random
            }
            Some(other) => {
                return Err(AppError::Config(format!(
                    "DOORWARD_PIN_POLICY must be `fixed` or `random`, got `{other}`"
                )));
            }
        };

        Ok(Self {
            host,
            port,
            pin_policy,
        })
    }

    /// Returns the socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host` and `port` do not form an address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
