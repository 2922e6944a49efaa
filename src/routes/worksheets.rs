use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::AnswerBatchRequest;
use crate::models::users::entities::UserRole;
use crate::services::WorksheetService;

// 懒加载的全局 WorksheetService 实例
static WORKSHEET_SERVICE: Lazy<WorksheetService> = Lazy::new(WorksheetService::new_lazy);

// 获取工作表表单
pub async fn get_form(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    WORKSHEET_SERVICE.get_form(&req, path.into_inner()).await
}

// 批量更新答案
pub async fn update_answers(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<AnswerBatchRequest>,
) -> ActixResult<HttpResponse> {
    WORKSHEET_SERVICE
        .update_answers(&req, path.into_inner(), body.into_inner())
        .await
}

// 提交工作表
pub async fn submit(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    WORKSHEET_SERVICE.submit(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_worksheets_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/worksheets")
            .wrap(middlewares::RequireRole::new_any(UserRole::student_roles()))
            .wrap(middlewares::RequireJWT)
            .route("/{id}/form", web::get().to(get_form))
            .route("/{id}/answers", web::put().to(update_answers))
            .route("/{id}/submit", web::post().to(submit)),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web};
    use sea_orm::{ActiveModelTrait, Set};
    use serde_json::json;

    use crate::routes::test_support::{
        TestCollaborators, assignment_id, call_json, login, portal_app, seeded_sea_orm,
        seeded_storage,
    };
    use crate::services::worksheets::WORKSHEET_UNAVAILABLE;
    use crate::storage::Storage;
    use crate::worksheet::FormSessions;

    #[actix_web::test]
    async fn test_worksheet_flow_over_http() {
        let storage = seeded_storage().await;
        let grammar_id = assignment_id(storage.as_ref(), "Grammar Worksheet 1").await;
        let vocabulary_id = assignment_id(storage.as_ref(), "Vocabulary Worksheet").await;
        let app = portal_app!(storage);
        let bearer = login!(app, "student", "S001");

        // 打开表单
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/worksheets/{grammar_id}/form"))
            .insert_header(bearer.clone())
            .to_request();
        let (_, body) = call_json!(app, req);
        assert_eq!(body["data"]["state"], "not_started");
        assert_eq!(body["data"]["form"]["read_only"], false);
        assert_eq!(body["data"]["form"]["questions"][0]["control"]["type"], "inline_text");

        // 作答
        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/worksheets/{grammar_id}/answers"))
            .insert_header(bearer.clone())
            .set_json(json!({"events": [
                {"question_ref": "q-1", "value": "under"},
                {"question_ref": "q-2", "value": "The dogs run fast."},
                {"question_ref": "q-9", "value": "x"},
            ]}))
            .to_request();
        let (_, body) = call_json!(app, req);
        assert_eq!(
            body["data"]["outcomes"],
            json!(["applied", "applied", "unknown_question"])
        );
        assert_eq!(
            body["data"]["form"]["form"]["questions"][0]["control"]["value"],
            "under"
        );

        // 提交并评分
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/worksheets/{grammar_id}/submit"))
            .insert_header(bearer.clone())
            .to_request();
        let (status, body) = call_json!(app, req);
        assert_eq!(status, StatusCode::OK);
        let submission = &body["data"]["submission"];
        assert_eq!(submission["status"], "graded");
        let score = submission["feedback"]["score"].as_i64().unwrap();
        assert!((0..=100).contains(&score));
        assert_eq!(submission["text_answers"]["q-1"], "under");

        // 重复提交
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/worksheets/{grammar_id}/submit"))
            .insert_header(bearer.clone())
            .to_request();
        let (status, body) = call_json!(app, req);
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], 5001);

        // 已评分的表单只读并带反馈
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/worksheets/{grammar_id}/form"))
            .insert_header(bearer.clone())
            .to_request();
        let (_, body) = call_json!(app, req);
        assert_eq!(body["data"]["state"], "graded");
        assert_eq!(body["data"]["form"]["read_only"], true);
        assert!(body["data"]["feedback"]["score"].is_number());

        // 已评分后再作答只会得到只读结果
        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/worksheets/{grammar_id}/answers"))
            .insert_header(bearer.clone())
            .set_json(json!({"events": [{"question_ref": "q-1", "value": "on"}]}))
            .to_request();
        let (status, body) = call_json!(app, req);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["outcomes"], json!(["read_only"]));
        assert_eq!(
            body["data"]["form"]["form"]["questions"][0]["control"]["value"],
            "under"
        );

        // 没有结构的工作表
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/worksheets/{vocabulary_id}/form"))
            .insert_header(bearer.clone())
            .to_request();
        let (status, body) = call_json!(app, req);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], WORKSHEET_UNAVAILABLE);

        // 注销后令牌失效
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .insert_header(bearer.clone())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(bearer)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_submitted_worksheet_leaves_no_session_behind() {
        let storage = seeded_storage().await;
        let grammar_id = assignment_id(storage.as_ref(), "Grammar Worksheet 1").await;
        let sessions = web::Data::new(FormSessions::default());
        let app = portal_app!(storage, sessions.clone(), TestCollaborators::default());
        let bearer = login!(app, "student", "S001");

        let form = || {
            test::TestRequest::get()
                .uri(&format!("/api/v1/worksheets/{grammar_id}/form"))
                .insert_header(bearer.clone())
                .to_request()
        };

        let (status, _) = call_json!(app, form());
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sessions.len(), 1);

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/worksheets/{grammar_id}/submit"))
            .insert_header(bearer.clone())
            .to_request();
        let (status, _) = call_json!(app, req);
        assert_eq!(status, StatusCode::OK);
        assert!(sessions.is_empty());

        // 反复查看已评分的表单不会重新登记会话
        for _ in 0..3 {
            let (status, body) = call_json!(app, form());
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["data"]["state"], "graded");
        }
        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/worksheets/{grammar_id}/answers"))
            .insert_header(bearer.clone())
            .set_json(json!({"events": [{"question_ref": "q-1", "value": "on"}]}))
            .to_request();
        let (status, _) = call_json!(app, req);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sessions.len(), 0);
    }

    #[actix_web::test]
    async fn test_stored_schema_that_fails_validation_is_unavailable() {
        let storage = seeded_sea_orm().await;
        let teacher = storage
            .get_user_by_role_and_username(crate::models::users::entities::UserRole::Teacher, "T001")
            .await
            .unwrap()
            .unwrap();
        // 选择题没有选项
        let broken = crate::entity::assignments::ActiveModel {
            title: Set("Broken Worksheet".into()),
            kind: Set("worksheet".into()),
            class_name: Set("5".into()),
            section: Set("A".into()),
            instructions: Set(String::new()),
            created_by: Set(teacher.id),
            due_date: Set(chrono::Utc::now().timestamp() + 86_400),
            form_schema: Set(Some(
                json!({
                    "title": "Broken",
                    "instructions": "",
                    "questions": [
                        {"id": 1, "type": "multiple-choice", "question": "Pick one", "options": []}
                    ]
                })
                .to_string(),
            )),
            source_document: Set(None),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap();

        let app = portal_app!(std::sync::Arc::new(storage));
        let bearer = login!(app, "student", "S001");
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/worksheets/{}/form", broken.id))
            .insert_header(bearer)
            .to_request();
        let (status, body) = call_json!(app, req);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 4002);
        assert_eq!(body["message"], WORKSHEET_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_role_and_credential_checks() {
        let storage = seeded_storage().await;
        let grammar_id = assignment_id(storage.as_ref(), "Grammar Worksheet 1").await;
        let app = portal_app!(storage);

        let login = |role: &str, password: &str| {
            test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .set_json(json!({"role": role, "username": "T001", "password": password}))
                .to_request()
        };
        let demo_password = crate::config::AppConfig::get().auth.demo_password.as_str();

        // 身份不匹配
        let resp = test::call_service(&app, login("student", demo_password)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // 口令错误
        let resp = test::call_service(&app, login("teacher", "not-the-password")).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = test::call_service(&app, login("teacher", demo_password)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let token = body["data"]["access_token"].as_str().unwrap().to_string();

        // 教师不能作答工作表
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/worksheets/{grammar_id}/form"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        // 没有令牌
        let req = test::TestRequest::get()
            .uri("/api/v1/users/students")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
