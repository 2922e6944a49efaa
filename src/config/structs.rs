use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    pub upload: UploadConfig,
    pub auth: AuthConfig,
    pub collaborators: CollaboratorConfig,
    #[serde(default)]
    pub sessions: SessionConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
    #[serde(default)]
    pub seed_demo_data: bool, // 空库时写入演示用户与作业
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub secret: String,
    pub access_token_expiry: i64, // 分钟
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub default_ttl: u64,
    pub memory: MemoryConfig,
}

/// 内存缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub max_capacity: u64,
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub max_age: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: String,                 // 上传目录
    pub max_size: usize,             // 单文件最大字节数
    pub document_types: Vec<String>, // 作业源文档允许的扩展名
    pub video_types: Vec<String>,    // 视频作业允许的扩展名
}

/// 登录配置（演示环境的简单口令校验）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing, default)]
    pub demo_password: String,
}

/// 外部协作方（评分 / 导入）配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorConfig {
    pub timeout_secs: u64, // 单次调用超时
    pub retries: u32,      // 瞬时失败后的自动重试次数
    pub mock: MockCollaboratorConfig,
}

/// 模拟协作方的延迟与故障注入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockCollaboratorConfig {
    pub worksheet_latency_ms: u64,
    pub video_latency_ms: u64,
    pub ingestion_latency_ms: u64,
    #[serde(default = "default_chat_latency_min_ms")]
    pub chat_latency_min_ms: u64,
    #[serde(default = "default_chat_latency_max_ms")]
    pub chat_latency_max_ms: u64,
    #[serde(default = "default_analytics_latency_ms")]
    pub analytics_latency_ms: u64,
    #[serde(default)]
    pub failure_rate: f64, // 0.0 ~ 1.0
}

fn default_chat_latency_min_ms() -> u64 {
    500
}

fn default_chat_latency_max_ms() -> u64 {
    1000
}

fn default_analytics_latency_ms() -> u64 {
    1500
}

/// 工作表会话配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub idle_timeout_secs: u64,   // 会话空闲多久后被清理
    pub sweep_interval_secs: u64, // 清理任务的执行间隔
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 1800,
            sweep_interval_secs: 60,
        }
    }
}
