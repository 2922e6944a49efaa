pub mod answers;
pub mod form;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::models::assignments::entities::Assignment;
use crate::models::submissions::{entities::Submission, requests::AnswerBatchRequest};
use crate::models::submissions::responses::WorksheetFormResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::worksheet::{FormSession, FormSessions, SessionKey, SubmissionAssembler, WorksheetSchema};

/// 工作表没有可用结构时给学生的提示
pub const WORKSHEET_UNAVAILABLE: &str = "This worksheet is not available as an interactive form.";

pub struct WorksheetService {
    storage: Option<Arc<dyn Storage>>,
}

/// 打开会话所需的上下文
pub(crate) struct OpenedWorksheet {
    pub key: SessionKey,
    pub assignment: Assignment,
    pub schema: Arc<WorksheetSchema>,
    pub prior: Option<Submission>,
}

impl OpenedWorksheet {
    /// 在登记的会话上执行操作；没有登记时按最新提交临时恢复
    pub fn with_session<R>(
        &self,
        sessions: &FormSessions,
        f: impl FnOnce(&mut FormSession) -> R,
    ) -> R {
        sessions.with_or_else(
            &self.key,
            || FormSession::resume(self.schema.clone(), self.prior.as_ref()),
            f,
        )
    }

    pub fn view(&self, session: &FormSession) -> WorksheetFormResponse {
        WorksheetFormResponse {
            assignment_id: self.assignment.id,
            title: self.assignment.title.clone(),
            due_date: self.assignment.due_date,
            state: session.state(),
            processing: session.is_processing(),
            form: session.render(),
            feedback: self.prior.as_ref().and_then(|s| s.feedback.clone()),
        }
    }
}

impl WorksheetService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_sessions<'a>(&self, request: &'a HttpRequest) -> &'a FormSessions {
        request
            .app_data::<web::Data<FormSessions>>()
            .expect("FormSessions not found in app data")
            .get_ref()
    }

    pub(crate) fn get_assembler<'a>(&self, request: &'a HttpRequest) -> &'a SubmissionAssembler {
        request
            .app_data::<web::Data<SubmissionAssembler>>()
            .expect("SubmissionAssembler not found in app data")
            .get_ref()
    }

    /// 加载作业与结构，并在需要时登记当前学生的会话
    ///
    /// 已有会话保持不变。只有尚未提交过的会话才会登记，
    /// 已提交的作业每次按最新提交临时恢复。
    pub(crate) async fn open(
        &self,
        request: &HttpRequest,
        student_id: i64,
        assignment_id: i64,
    ) -> Result<OpenedWorksheet, HttpResponse> {
        let storage = self.get_storage(request);

        let assignment = match storage.get_assignment_by_id(assignment_id).await {
            Ok(Some(assignment)) => assignment,
            Ok(None) => {
                return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::AssignmentNotFound,
                    "作业不存在",
                )));
            }
            Err(e) => return Err(internal_error(format!("获取作业失败: {e}"))),
        };

        let schema = match assignment.worksheet_schema() {
            Ok(Some(schema)) if assignment.is_worksheet() => schema,
            Ok(_) => return Err(unavailable()),
            Err(e) => {
                tracing::warn!("Stored schema of assignment {} is invalid: {}", assignment_id, e);
                return Err(unavailable());
            }
        };

        let prior = match storage
            .get_submission_for_assignment(assignment_id, student_id)
            .await
        {
            Ok(prior) => prior,
            Err(e) => return Err(internal_error(format!("获取提交失败: {e}"))),
        };

        let schema = Arc::new(schema);
        let key = (student_id, assignment_id);
        let sessions = self.get_sessions(request);
        // 顺便刷新已有会话的最近访问时间
        if sessions.with(&key, |_| ()).is_none() {
            let session = FormSession::resume(schema.clone(), prior.as_ref());
            if session.is_open() {
                sessions.insert_if_absent(key, session);
            }
        }

        Ok(OpenedWorksheet {
            key,
            assignment,
            schema,
            prior,
        })
    }

    pub async fn get_form(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        form::get_form(self, request, assignment_id).await
    }

    pub async fn update_answers(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        batch: AnswerBatchRequest,
    ) -> ActixResult<HttpResponse> {
        answers::update_answers(self, request, assignment_id, batch).await
    }

    pub async fn submit(&self, request: &HttpRequest, assignment_id: i64) -> ActixResult<HttpResponse> {
        submit::submit_worksheet(self, request, assignment_id).await
    }
}

fn unavailable() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::WorksheetUnavailable,
        WORKSHEET_UNAVAILABLE,
    ))
}

fn internal_error(message: String) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        message,
    ))
}
