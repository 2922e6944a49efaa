use crate::cache::{MokaCacheWrapper, ObjectCache};
use crate::collaborators::{
    Analyst, CallPolicy, Chatter, Grader, Ingestor, MockAnalyst, MockChatter, MockGrader,
    MockIngestor,
};
use crate::config::AppConfig;
use crate::storage::Storage;
use crate::worksheet::{FormSessions, SubmissionAssembler};
use actix_web::web;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::seed::seed_demo_data;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub ingestor: Arc<dyn Ingestor>,
    pub chatter: Arc<dyn Chatter>,
    pub analyst: Arc<dyn Analyst>,
    pub call_policy: CallPolicy,
    pub assembler: web::Data<SubmissionAssembler>,
    // 所有 worker 共享同一份会话表
    pub sessions: web::Data<FormSessions>,
}

/// 创建缓存实例
fn create_cache(config: &AppConfig) -> Arc<dyn ObjectCache> {
    warn!(
        "Creating Moka (in-memory) cache backend, capacity {}, ttl {}s",
        config.cache.memory.max_capacity, config.cache.default_ttl
    );
    Arc::new(MokaCacheWrapper::from_config(&config.cache))
}

/// 定期清理长时间未访问的表单会话
fn spawn_session_sweeper(sessions: web::Data<FormSessions>, every: Duration) {
    actix_web::rt::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let evicted = sessions.evict_idle();
            if evicted > 0 {
                debug!(
                    "Evicted {} idle worksheet sessions, {} remaining",
                    evicted,
                    sessions.len()
                );
            }
        }
    });
}

/// 准备服务器启动的上下文
/// 包括存储、缓存、协作方和表单会话
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = AppConfig::get();

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化演示数据（仅空库）
    if config.app.seed_demo_data {
        seed_demo_data(storage.as_ref()).await;
    }

    let cache = create_cache(config);
    warn!("Cache backend initialized");

    let call_policy = CallPolicy::from_config(&config.collaborators);
    let grader: Arc<dyn Grader> = Arc::new(MockGrader::from_config(&config.collaborators.mock));
    let ingestor: Arc<dyn Ingestor> =
        Arc::new(MockIngestor::from_config(&config.collaborators.mock));
    let chatter: Arc<dyn Chatter> = Arc::new(MockChatter::from_config(&config.collaborators.mock));
    let analyst: Arc<dyn Analyst> = Arc::new(MockAnalyst::from_config(&config.collaborators.mock));
    debug!(
        "Collaborators ready: timeout {:?}, retries {}",
        call_policy.timeout, call_policy.retries
    );

    let assembler = SubmissionAssembler::new(grader, storage.clone(), call_policy);

    let sessions = web::Data::new(FormSessions::new(config.sessions.idle_timeout()));
    spawn_session_sweeper(sessions.clone(), config.sessions.sweep_interval());

    StartupContext {
        storage,
        cache,
        ingestor,
        chatter,
        analyst,
        call_policy,
        assembler: web::Data::new(assembler),
        sessions,
    }
}
