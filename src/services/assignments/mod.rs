pub mod create;
pub mod detail;
pub mod list;
pub mod statuses;
pub mod submissions;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::collaborators::{CallPolicy, Ingestor};
use crate::models::assignments::requests::{AssignmentListQuery, AssignmentStatusQuery};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    pub(crate) fn get_ingestor(&self, request: &HttpRequest) -> Arc<dyn Ingestor> {
        request
            .app_data::<web::Data<Arc<dyn Ingestor>>>()
            .expect("Ingestor not found in app data")
            .get_ref()
            .clone()
    }

    pub(crate) fn get_call_policy(&self, request: &HttpRequest) -> CallPolicy {
        *request
            .app_data::<web::Data<CallPolicy>>()
            .expect("CallPolicy not found in app data")
            .get_ref()
    }

    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        query: AssignmentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, query).await
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, payload).await
    }

    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, request, assignment_id).await
    }

    pub async fn get_statuses(
        &self,
        request: &HttpRequest,
        query: AssignmentStatusQuery,
    ) -> ActixResult<HttpResponse> {
        statuses::get_statuses(self, request, query).await
    }

    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        submissions::list_submissions(self, request, assignment_id).await
    }

    pub async fn my_submission(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        submissions::my_submission(self, request, assignment_id).await
    }
}
