use serde::{Deserialize, Serialize};

use crate::errors::{Result, ShortgateError};

/// Environment variable prefix, e.g. `SHORTGATE__AUTH__APP_SECRET`
pub const ENV_PREFIX: &str = "SHORTGATE";

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 启动时加载一次的静态配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub permission: PermissionConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML > 默认值
    /// ENV 前缀：SHORTGATE，分隔符：__
    /// 示例：SHORTGATE__SERVER__PORT=9999
    ///
    /// An explicitly given path must exist; the default `config.toml` is optional.
    pub fn load(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let (path, required) = match path {
            Some(p) => (p, true),
            None => (DEFAULT_CONFIG_PATH, false),
        };

        let settings = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ShortgateError::config(format!("failed to build config: {}", e)))?;

        settings
            .try_deserialize::<StaticConfig>()
            .map_err(|e| ShortgateError::config(format!("failed to deserialize config: {}", e)))
    }

    /// 生成示例 TOML 配置
    pub fn generate_sample_config() -> Result<String> {
        toml::to_string_pretty(&Self::default())
            .map_err(|e| ShortgateError::config(format!("cannot render sample config: {}", e)))
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ShortgateError::config(format!("cannot render config: {}", e)))?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| ShortgateError::config(format!("cannot create directory: {}", e)))?;
        }

        std::fs::write(path, content)
            .map_err(|e| ShortgateError::config(format!("cannot write config: {}", e)))
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Time allowed for a client to send the request head
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Keep-alive for idle connections
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    /// Grace period for in-flight requests on shutdown
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

/// 数据库连接配置
///
/// `memory://` keeps links in process memory only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

/// Token verification and admin gating
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret shared with the token issuer
    #[serde(default)]
    pub app_secret: String,
    #[serde(default)]
    pub admin_gate: AdminGateConfig,
}

/// Which checks must pass before a caller counts as admin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminGateConfig {
    /// Ask the permission authority
    #[serde(default = "default_true")]
    pub permission_service: bool,
    /// Trust the `is_admin` claim inside the token
    #[serde(default)]
    pub token_claim: bool,
}

/// Remote permission authority (gRPC)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionConfig {
    #[serde(default = "default_permission_address")]
    pub address: String,
    /// Per-attempt timeout
    #[serde(default = "default_permission_timeout_ms")]
    pub timeout_ms: u64,
    /// Total attempts per call, not extra retries
    #[serde(default = "default_permission_retries")]
    pub retries_count: u32,
    #[serde(default = "default_app_id")]
    pub app_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    #[serde(default = "default_alias_length")]
    pub alias_length: usize,
    #[serde(default = "default_max_alias_attempts")]
    pub max_alias_attempts: u32,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_true() -> bool {
    true
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_request_timeout_secs() -> u64 {
    4
}

fn default_idle_timeout_secs() -> u64 {
    60
}

fn default_shutdown_timeout_secs() -> u64 {
    3
}

fn default_database_url() -> String {
    "shortgate.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_permission_address() -> String {
    "localhost:44044".to_string()
}

fn default_permission_timeout_ms() -> u64 {
    1000
}

fn default_permission_retries() -> u32 {
    3
}

fn default_app_id() -> i32 {
    1
}

fn default_alias_length() -> usize {
    6
}

fn default_max_alias_attempts() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            workers: default_workers(),
            request_timeout_secs: default_request_timeout_secs(),
            idle_timeout_secs: default_idle_timeout_secs(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for AdminGateConfig {
    fn default() -> Self {
        Self {
            permission_service: true,
            token_claim: false,
        }
    }
}

impl Default for PermissionConfig {
    fn default() -> Self {
        Self {
            address: default_permission_address(),
            timeout_ms: default_permission_timeout_ms(),
            retries_count: default_permission_retries(),
            app_id: default_app_id(),
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            alias_length: default_alias_length(),
            max_alias_attempts: default_max_alias_attempts(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
