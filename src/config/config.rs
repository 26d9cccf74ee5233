use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    /// Web origins allowed to make credentialed cross-origin calls.
    /// An empty list disables the allow-list entirely.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

/// Per-request policy flags. The upstream deployments diverged on every one
/// of these; here they are explicit switches on a single service.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_true")]
    pub validate_fields: bool,
    #[serde(default)]
    pub expose_debug_endpoint: bool,
    #[serde(default = "default_true")]
    pub security_headers: bool,
    #[serde(default = "default_true")]
    pub compression: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            validate_fields: true,
            expose_debug_endpoint: false,
            security_headers: true,
            compression: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("MSGBOARD").separator("__"))
            .build()?;

        let mut app_config: AppConfig = settings.try_deserialize()?;

        // Expand environment variables if present like ${DATABASE_URL}
        app_config.database.url = expand_env(&app_config.database.url);
        app_config.cors.allowed_origins = app_config
            .cors
            .allowed_origins
            .iter()
            .map(|origin| expand_env(origin))
            .filter(|origin| !origin.is_empty())
            .collect();

        // A bare PORT variable wins over the configured port, matching how
        // hosting platforms hand out listen ports.
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                app_config.server.port = port;
            }
        }

        Ok(app_config)
    }
}

fn expand_env(val: &str) -> String {
    if val.starts_with("${") && val.ends_with('}') {
        let var_name = &val[2..val.len() - 1];
        std::env::var(var_name).unwrap_or_else(|_| "".to_string())
    } else {
        val.to_string()
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_max_requests() -> u32 {
    100
}

fn default_window_secs() -> u64 {
    900
}

fn default_true() -> bool {
    true
}
