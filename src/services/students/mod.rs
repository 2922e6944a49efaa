pub mod analytics;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::collaborators::{Analyst, CallPolicy};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    pub(crate) fn get_analyst(&self, request: &HttpRequest) -> Arc<dyn Analyst> {
        request
            .app_data::<web::Data<Arc<dyn Analyst>>>()
            .expect("Analyst not found in app data")
            .get_ref()
            .clone()
    }

    pub(crate) fn get_call_policy(&self, request: &HttpRequest) -> CallPolicy {
        *request
            .app_data::<web::Data<CallPolicy>>()
            .expect("CallPolicy not found in app data")
            .get_ref()
    }

    pub async fn get_analytics(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        analytics::get_analytics(self, request, student_id).await
    }
}
