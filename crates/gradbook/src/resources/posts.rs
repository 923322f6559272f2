use serde::Serialize;
use serde_json::Value;

use super::segment;
use crate::client::ApiClient;
use crate::envelope::PageRequest;
use crate::error::Result;
use crate::model::{Page, Post};
use crate::transport::{ApiRequest, Transport};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFilters {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub user_id: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    pub async fn list_posts(&self, filters: &PostFilters) -> Result<Page<Post>> {
        let request = ApiRequest::get("/posts").with_filters(filters)?;
        let page = PageRequest::new(filters.page, filters.limit);
        self.envelope(request).await?.into_page(&page)
    }

    pub async fn get_post(&self, post_id: &str) -> Result<Post> {
        let path = format!("/posts/{}", segment(post_id));
        self.envelope(ApiRequest::get(path)).await?.into_item()
    }

    /// The backend keeps the document and marks it inactive.
    pub async fn soft_delete_post(&self, post_id: &str) -> Result<Value> {
        let path = format!("/posts/{}", segment(post_id));
        self.execute(ApiRequest::delete(path)).await
    }
}
