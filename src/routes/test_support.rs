//! 路由测试辅助：预置数据的存储、完整的测试应用、登录和 multipart 请求体

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::collaborators::{
    Analyst, CallPolicy, Chatter, Grader, Ingestor, MockAnalyst, MockChatter, MockGrader,
    MockIngestor,
};
use crate::errors::Result;
use crate::models::files::UploadedFile;
use crate::runtime::lifetime::seed::seed_demo_data;
use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
use crate::worksheet::RawWorksheetSchema;

pub const BOUNDARY: &str = "----eduportal-test-boundary";

/// 测试应用使用的协作方，默认全部为零延迟的模拟实现
pub struct TestCollaborators {
    pub grader: Arc<dyn Grader>,
    pub ingestor: Arc<dyn Ingestor>,
    pub chatter: Arc<dyn Chatter>,
    pub analyst: Arc<dyn Analyst>,
    pub call_policy: CallPolicy,
}

impl Default for TestCollaborators {
    fn default() -> Self {
        Self {
            grader: Arc::new(MockGrader::new(Duration::ZERO, Duration::ZERO, 0.0)),
            ingestor: Arc::new(MockIngestor::new(Duration::ZERO, 0.0)),
            chatter: Arc::new(MockChatter::new(Duration::ZERO, Duration::ZERO, 0.0)),
            analyst: Arc::new(MockAnalyst::new(Duration::ZERO, 0.0)),
            call_policy: CallPolicy::new(Duration::from_secs(5), 0),
        }
    }
}

/// 返回固定结构并记录收到的文档
pub struct ScriptedIngestor {
    schema: RawWorksheetSchema,
    pub seen: Mutex<Vec<UploadedFile>>,
}

impl ScriptedIngestor {
    pub fn new(schema: RawWorksheetSchema) -> Self {
        Self {
            schema,
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Ingestor for ScriptedIngestor {
    async fn ingest(&self, document: &UploadedFile) -> Result<RawWorksheetSchema> {
        self.seen.lock().unwrap().push(document.clone());
        Ok(self.schema.clone())
    }
}

pub async fn seeded_sea_orm() -> SeaOrmStorage {
    let storage = SeaOrmStorage::connect_memory().await.unwrap();
    seed_demo_data(&storage).await;
    storage
}

pub async fn seeded_storage() -> Arc<dyn Storage> {
    Arc::new(seeded_sea_orm().await)
}

/// 按标题查找预置作业的 ID
pub async fn assignment_id(storage: &dyn Storage, title: &str) -> i64 {
    storage
        .list_assignments(Default::default())
        .await
        .unwrap()
        .into_iter()
        .find(|a| a.title == title)
        .unwrap()
        .id
}

/// 组装 multipart 请求体，返回 (Content-Type, 请求体)
pub fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &[u8])]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (file_name, content) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// 构建挂载全部路由的测试应用
///
/// `portal_app!(storage)` 使用默认协作方和新的会话表；
/// `portal_app!(storage, sessions, collaborators)` 由调用方提供两者。
macro_rules! portal_app {
    ($storage:expr) => {
        $crate::routes::test_support::portal_app!(
            $storage,
            actix_web::web::Data::new($crate::worksheet::FormSessions::default()),
            $crate::routes::test_support::TestCollaborators::default()
        )
    };
    ($storage:expr, $sessions:expr, $collaborators:expr) => {{
        use actix_web::web;
        let storage: std::sync::Arc<dyn $crate::storage::Storage> = $storage;
        let sessions: web::Data<$crate::worksheet::FormSessions> = $sessions;
        let collaborators: $crate::routes::test_support::TestCollaborators = $collaborators;
        let cache: std::sync::Arc<dyn $crate::cache::ObjectCache> = std::sync::Arc::new(
            $crate::cache::MokaCacheWrapper::new(100, std::time::Duration::from_secs(60)),
        );
        let assembler = $crate::worksheet::SubmissionAssembler::new(
            collaborators.grader.clone(),
            storage.clone(),
            collaborators.call_policy,
        );
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache))
                .app_data(web::Data::new(collaborators.ingestor.clone()))
                .app_data(web::Data::new(collaborators.chatter.clone()))
                .app_data(web::Data::new(collaborators.analyst.clone()))
                .app_data(web::Data::new(collaborators.call_policy))
                .app_data(web::Data::new(assembler))
                .app_data(sessions)
                .app_data(web::Data::new($crate::models::AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .configure($crate::routes::configure_auth_routes)
                .configure($crate::routes::configure_user_routes)
                .configure($crate::routes::configure_assignments_routes)
                .configure($crate::routes::configure_worksheets_routes)
                .configure($crate::routes::configure_homeworks_routes)
                .configure($crate::routes::configure_doubts_routes)
                .configure($crate::routes::configure_students_routes)
                .configure($crate::routes::configure_system_routes),
        )
        .await
    }};
}

/// 用演示口令登录，返回 Authorization 请求头
macro_rules! login {
    ($app:expr, $role:expr, $username:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(serde_json::json!({
                "role": $role,
                "username": $username,
                "password": $crate::config::AppConfig::get().auth.demo_password,
            }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (
            "Authorization",
            format!("Bearer {}", body["data"]["access_token"].as_str().unwrap()),
        )
    }};
}

/// 发送请求并读取 (状态码, JSON 响应体)
macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req).await;
        let status = resp.status();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
}

pub(crate) use {call_json, login, portal_app};
