use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::HomeworkService;

// 懒加载的全局 HomeworkService 实例
static HOMEWORK_SERVICE: Lazy<HomeworkService> = Lazy::new(HomeworkService::new_lazy);

// 提交视频作业
pub async fn submit_homework(
    req: HttpRequest,
    path: web::Path<i64>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .submit_homework(&req, path.into_inner(), payload)
        .await
}

// 配置路由
pub fn configure_homeworks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/homeworks")
            .wrap(middlewares::RequireRole::new_any(UserRole::student_roles()))
            .wrap(middlewares::RequireJWT)
            .route("/{id}/submit", web::post().to(submit_homework)),
    );
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use actix_web::{http::StatusCode, test};

    use crate::config::AppConfig;
    use crate::routes::test_support::{
        assignment_id, call_json, login, multipart_body, portal_app, seeded_storage,
    };
    use crate::storage::Storage;

    const VIDEO: &[u8] = b"\x00\x00\x00\x18ftypmp42 test video";

    fn submit_request(
        assignment_id: i64,
        bearer: (&'static str, String),
        files: &[(&str, &[u8])],
    ) -> test::TestRequest {
        let (content_type, body) = multipart_body(&[], files);
        test::TestRequest::post()
            .uri(&format!("/api/v1/homeworks/{assignment_id}/submit"))
            .insert_header(bearer)
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn test_submit_video_homework_once() {
        let storage = seeded_storage().await;
        let homework_id = assignment_id(storage.as_ref(), "Prepositions Video Homework").await;
        let app = portal_app!(storage.clone());
        let alice = login!(app, "student", "S001");
        let video: [(&str, &[u8]); 1] = [("my_room.mp4", VIDEO)];

        let req = submit_request(homework_id, alice.clone(), &video).to_request();
        let (status, body) = call_json!(app, req);
        assert_eq!(status, StatusCode::OK);
        let submission = &body["data"]["submission"];
        assert_eq!(submission["status"], "graded");
        let content_ref = submission["content_ref"].as_str().unwrap().to_string();
        assert!(content_ref.ends_with(".mp4"));
        let stored = Path::new(&AppConfig::get().upload.dir).join(&content_ref);
        assert!(stored.exists());
        let _ = std::fs::remove_file(stored);

        let req = submit_request(homework_id, alice, &video).to_request();
        let (status, body) = call_json!(app, req);
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], 5001);
        assert_eq!(storage.count_submissions().await.unwrap(), 2);
    }

    #[actix_web::test]
    async fn test_graded_homework_cannot_be_resubmitted() {
        let storage = seeded_storage().await;
        let homework_id = assignment_id(storage.as_ref(), "Prepositions Video Homework").await;
        let app = portal_app!(storage.clone());
        let bob = login!(app, "student", "S002");
        let video: [(&str, &[u8]); 1] = [("retake.mp4", VIDEO)];

        let req = submit_request(homework_id, bob, &video).to_request();
        let (status, body) = call_json!(app, req);
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], 5001);
        assert_eq!(storage.count_submissions().await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_submit_rejections() {
        let storage = seeded_storage().await;
        let homework_id = assignment_id(storage.as_ref(), "Prepositions Video Homework").await;
        let grammar_id = assignment_id(storage.as_ref(), "Grammar Worksheet 1").await;
        let app = portal_app!(storage.clone());
        let alice = login!(app, "student", "S001");
        let video: [(&str, &[u8]); 1] = [("my_room.mp4", VIDEO)];

        // 工作表不能按视频作业提交
        let req = submit_request(grammar_id, alice.clone(), &video).to_request();
        let (status, _) = call_json!(app, req);
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let req = submit_request(9999, alice.clone(), &video).to_request();
        let (status, body) = call_json!(app, req);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 4000);

        // 没有文件
        let req = submit_request(homework_id, alice.clone(), &[]).to_request();
        let (status, _) = call_json!(app, req);
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let pdf: [(&str, &[u8]); 1] = [("essay.pdf", b"%PDF")];
        let req = submit_request(homework_id, alice.clone(), &pdf).to_request();
        let (status, body) = call_json!(app, req);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 6001);

        // 教师不能提交
        let teacher = login!(app, "teacher", "T001");
        let req = submit_request(homework_id, teacher, &video).to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        assert_eq!(storage.count_submissions().await.unwrap(), 1);
    }
}
