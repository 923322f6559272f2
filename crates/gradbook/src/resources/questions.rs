use serde::Serialize;
use serde_json::Value;

use super::segment;
use crate::client::ApiClient;
use crate::envelope::PageRequest;
use crate::error::Result;
use crate::model::{Page, Question, QuestionType};
use crate::transport::{ApiRequest, Transport};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuestionFilters {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
}

/// Body for creating or replacing a question template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionInput {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    pub async fn list_questions(&self, filters: &QuestionFilters) -> Result<Page<Question>> {
        let request = ApiRequest::get("/admin/questions").with_filters(filters)?;
        let page = PageRequest::new(filters.page, filters.limit);
        self.envelope(request).await?.into_page(&page)
    }

    pub async fn get_question(&self, question_id: &str) -> Result<Question> {
        let path = format!("/admin/questions/{}", segment(question_id));
        self.envelope(ApiRequest::get(path)).await?.into_item()
    }

    pub async fn create_question(&self, input: &QuestionInput) -> Result<Value> {
        self.post("/admin/questions", input).await
    }

    pub async fn update_question(&self, question_id: &str, input: &QuestionInput) -> Result<Value> {
        let path = format!("/admin/questions/{}", segment(question_id));
        self.put(&path, input).await
    }

    pub async fn delete_question(&self, question_id: &str) -> Result<Value> {
        let path = format!("/admin/questions/{}", segment(question_id));
        self.delete(&path).await
    }
}
