use crate::{Result, UnmeshedError};

pub const ENV_AUTH_ID: &str = "UNMESHED_AUTH_ID";
pub const ENV_AUTH_TOKEN: &str = "UNMESHED_AUTH_TOKEN";
pub const ENV_BASE_URL: &str = "UNMESHED_BASE_URL";
pub const ENV_BASE_URL_PORT: &str = "UNMESHED_BASE_URL_PORT";
pub const ENV_ENGINE_HOST: &str = "UNMESHED_ENGINE_HOST";
pub const ENV_ENGINE_PORT: &str = "UNMESHED_ENGINE_PORT";

pub const DEFAULT_BASE_URL: &str = "http://localhost";
/// Port used when only the local default base URL is in effect.
pub const DEFAULT_LOCAL_PORT: u16 = 8080;
/// Port used when a base URL was supplied without a port (HTTPS).
pub const DEFAULT_REMOTE_PORT: u16 = 443;

/// Connection and tuning settings for an Unmeshed client.
///
/// Assembled once at startup and handed to the client; nothing else reads the
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub auth_id: String,
    pub auth_token: String,
    pub base_url: String,
    pub port: u16,
    pub work_request_batch_size: u32,
    pub response_submit_batch_size: u32,
    pub initial_delay_millis: u64,
    /// `None` means steps never time out.
    pub step_timeout_millis: Option<u64>,
}

impl ClientConfig {
    pub fn builder(auth_id: impl Into<String>, auth_token: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            auth_id: auth_id.into(),
            auth_token: auth_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            port: DEFAULT_LOCAL_PORT,
            work_request_batch_size: 10,
            response_submit_batch_size: 10,
            initial_delay_millis: 20,
            step_timeout_millis: None,
        }
    }

    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration from an arbitrary variable source.
    ///
    /// Credentials are required. The base URL falls back from `UNMESHED_BASE_URL`
    /// to `UNMESHED_ENGINE_HOST` to `http://localhost`; the port from
    /// `UNMESHED_BASE_URL_PORT` to `UNMESHED_ENGINE_PORT`, and otherwise to 443 for
    /// a supplied base URL or 8080 for the local default. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let auth_id = get(ENV_AUTH_ID).ok_or_else(|| UnmeshedError::MissingEnv(ENV_AUTH_ID.to_string()))?;
        let auth_token =
            get(ENV_AUTH_TOKEN).ok_or_else(|| UnmeshedError::MissingEnv(ENV_AUTH_TOKEN.to_string()))?;

        let base_url = get(ENV_BASE_URL).or_else(|| get(ENV_ENGINE_HOST));
        let port = match get(ENV_BASE_URL_PORT).or_else(|| get(ENV_ENGINE_PORT)) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| UnmeshedError::InvalidConfig(format!("invalid port {raw:?}")))?,
            None if base_url.is_some() => DEFAULT_REMOTE_PORT,
            None => DEFAULT_LOCAL_PORT,
        };

        ClientConfig::builder(auth_id, auth_token)
            .base_url(base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))
            .port(port)
            .build()
    }

    /// Base URL joined with the port, without a trailing slash.
    pub fn engine_url(&self) -> String {
        format!("{}:{}", self.base_url.trim_end_matches('/'), self.port)
    }
}

/// Builder returned by [`ClientConfig::builder`].
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    auth_id: String,
    auth_token: String,
    base_url: String,
    port: u16,
    work_request_batch_size: u32,
    response_submit_batch_size: u32,
    initial_delay_millis: u64,
    step_timeout_millis: Option<u64>,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn work_request_batch_size(mut self, size: u32) -> Self {
        self.work_request_batch_size = size;
        self
    }

    pub fn response_submit_batch_size(mut self, size: u32) -> Self {
        self.response_submit_batch_size = size;
        self
    }

    pub fn initial_delay_millis(mut self, millis: u64) -> Self {
        self.initial_delay_millis = millis;
        self
    }

    pub fn step_timeout_millis(mut self, millis: Option<u64>) -> Self {
        self.step_timeout_millis = millis;
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        for (field, value) in [
            ("auth_id", &self.auth_id),
            ("auth_token", &self.auth_token),
            ("base_url", &self.base_url),
        ] {
            if value.trim().is_empty() {
                return Err(UnmeshedError::InvalidConfig(format!("{field} must not be blank")));
            }
        }

        Ok(ClientConfig {
            auth_id: self.auth_id,
            auth_token: self.auth_token,
            base_url: self.base_url,
            port: self.port,
            work_request_batch_size: self.work_request_batch_size,
            response_submit_batch_size: self.response_submit_batch_size,
            initial_delay_millis: self.initial_delay_millis,
            step_timeout_millis: self.step_timeout_millis,
        })
    }
}
