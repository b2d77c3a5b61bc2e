use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_STATIC_ROOT: &str = "static";
pub const DEFAULT_FILE: &str = "index.html";
pub const DEFAULT_NOT_FOUND_PAGE: &str = "404.html";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config JSON format: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub default_server: DefaultServerConfig,
    pub routes: HashMap<String, RouteConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub ports: Vec<u16>,
    pub static_root: PathBuf,
    /// Any handling error ends the accept loop when set.
    pub fail_fast: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: String::from(DEFAULT_HOST),
            ports: vec![],
            static_root: PathBuf::from(DEFAULT_STATIC_ROOT),
            fail_fast: true,
        }
    }
}

impl ServerConfig {
    /// Host to bind. An empty host means every interface.
    pub fn bind_host(&self) -> &str {
        if self.host.is_empty() {
            DEFAULT_HOST
        } else {
            &self.host
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DefaultServerConfig {
    pub server_name: String,
    /// Status code ("404") to a page path relative to the static root.
    pub error_pages: HashMap<String, String>,
    /// Zero disables the limit.
    pub client_body_limit: u64,
}

impl DefaultServerConfig {
    pub fn error_page(&self, status_code: u16) -> Option<&str> {
        self.error_pages
            .get(&status_code.to_string())
            .map(String::as_str)
    }

    pub fn body_limit(&self) -> Option<usize> {
        limit(self.client_body_limit)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub root: Option<PathBuf>,
    pub methods: Vec<String>,
    pub redirect: Option<String>,
    pub default_file: Option<String>,
    pub directory_listing: bool,
    pub client_body_limit: u64,
}

impl RouteConfig {
    pub fn default_file(&self) -> &str {
        self.default_file.as_deref().unwrap_or(DEFAULT_FILE)
    }

    /// An empty method list allows every method the parser accepts.
    pub fn allows(&self, method: &str) -> bool {
        self.methods.is_empty() || self.methods.iter().any(|allowed| allowed == method)
    }

    pub fn body_limit(&self) -> Option<usize> {
        limit(self.client_body_limit)
    }
}

fn limit(value: u64) -> Option<usize> {
    match value {
        0 => None,
        value => Some(usize::try_from(value).unwrap_or(usize::MAX)),
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(value)?)
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Config::from_str(&data)
    }
}

pub struct ConfigBuilder {
    config: Config,
}

#[allow(clippy::new_without_default)]
impl ConfigBuilder {
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::default(),
        }
    }

    pub fn host(mut self, host: &str) -> Self {
        self.config.server.host = host.to_string();

        self
    }

    pub fn ports(mut self, ports: &[u16]) -> Self {
        self.config.server.ports = ports.to_vec();

        self
    }

    pub fn static_root(mut self, static_root: impl Into<PathBuf>) -> Self {
        self.config.server.static_root = static_root.into();

        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.config.server.fail_fast = fail_fast;

        self
    }

    pub fn error_page(mut self, status_code: u16, path: &str) -> Self {
        self.config
            .default_server
            .error_pages
            .insert(status_code.to_string(), path.to_string());

        self
    }

    pub fn client_body_limit(mut self, limit: u64) -> Self {
        self.config.default_server.client_body_limit = limit;

        self
    }

    pub fn route(mut self, path: &str, route: RouteConfig) -> Self {
        self.config.routes.insert(path.to_string(), route);

        self
    }

    pub fn get(self) -> Config {
        self.config
    }
}
