pub mod ask;
pub mod history;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::collaborators::{CallPolicy, Chatter};
use crate::models::doubts::requests::AskDoubtRequest;
use crate::storage::Storage;

/// 答疑窗口打开时的第一句话
pub const DOUBT_GREETING: &str = "Hello! How can I help you with your studies today?";

pub struct DoubtService {
    storage: Option<Arc<dyn Storage>>,
}

impl DoubtService {
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

    pub(crate) fn get_chatter(&self, request: &HttpRequest) -> Arc<dyn Chatter> {
        request
            .app_data::<web::Data<Arc<dyn Chatter>>>()
            .expect("Chatter not found in app data")
            .get_ref()
            .clone()
    }

    pub(crate) fn get_call_policy(&self, request: &HttpRequest) -> CallPolicy {
        *request
            .app_data::<web::Data<CallPolicy>>()
            .expect("CallPolicy not found in app data")
            .get_ref()
    }

    pub async fn get_history(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        history::get_history(self, request).await
    }

    pub async fn ask(
        &self,
        request: &HttpRequest,
        body: AskDoubtRequest,
    ) -> ActixResult<HttpResponse> {
        ask::ask(self, request, body).await
    }
}
