use serde::Serialize;
use serde_json::Value;

use super::segment;
use crate::client::ApiClient;
use crate::envelope::PageRequest;
use crate::error::Result;
use crate::model::{Page, User};
use crate::transport::{ApiRequest, Transport};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserFilters {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub role: Option<String>,
    pub campus: Option<String>,
    pub college: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    pub async fn list_users(&self, filters: &UserFilters) -> Result<Page<User>> {
        let request = ApiRequest::get("/admin/users").with_filters(filters)?;
        let page = PageRequest::new(filters.page, filters.limit);
        self.envelope(request).await?.into_page(&page)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        let path = format!("/admin/users/{}", segment(user_id));
        self.envelope(ApiRequest::get(path)).await?.into_item()
    }

    pub async fn deactivate_user(&self, user_id: &str) -> Result<Value> {
        let path = format!("/admin/users/{}/deactivate", segment(user_id));
        self.execute(ApiRequest::post(path)).await
    }

    pub async fn activate_user(&self, user_id: &str) -> Result<Value> {
        let path = format!("/admin/users/{}/activate", segment(user_id));
        self.execute(ApiRequest::post(path)).await
    }
}
