use serde::Serialize;
use serde_json::Value;

use super::segment;
use crate::client::ApiClient;
use crate::envelope::PageRequest;
use crate::error::Result;
use crate::model::{Page, Tag};
use crate::transport::{ApiRequest, Transport};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagFilters {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    pub async fn list_tags(&self, filters: &TagFilters) -> Result<Page<Tag>> {
        let request = ApiRequest::get("/admin/tags").with_filters(filters)?;
        let page = PageRequest::new(filters.page, filters.limit);
        self.envelope(request).await?.into_page(&page)
    }

    pub async fn get_tag(&self, tag_id: &str) -> Result<Tag> {
        let path = format!("/admin/tags/{}", segment(tag_id));
        self.envelope(ApiRequest::get(path)).await?.into_item()
    }

    pub async fn create_tag(&self, input: &TagInput) -> Result<Value> {
        self.post("/admin/tags", input).await
    }

    pub async fn update_tag(&self, tag_id: &str, input: &TagInput) -> Result<Value> {
        let path = format!("/admin/tags/{}", segment(tag_id));
        self.put(&path, input).await
    }

    pub async fn delete_tag(&self, tag_id: &str) -> Result<Value> {
        let path = format!("/admin/tags/{}", segment(tag_id));
        self.delete(&path).await
    }
}
