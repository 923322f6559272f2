use serde::Serialize;
use serde_json::Value;

use super::segment;
use crate::client::ApiClient;
use crate::envelope::PageRequest;
use crate::error::{Error, Result};
use crate::model::{Page, Report, ReportStatus};
use crate::transport::{ApiRequest, Transport};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportFilters {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Moderator decision on a report. `Pending` is not a valid outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReport {
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_notes: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    pub async fn list_reports(&self, filters: &ReportFilters) -> Result<Page<Report>> {
        let request = ApiRequest::get("/admin/reports").with_filters(filters)?;
        let page = PageRequest::new(filters.page, filters.limit);
        self.envelope(request).await?.into_page(&page)
    }

    pub async fn get_report(&self, report_id: &str) -> Result<Report> {
        let path = format!("/admin/reports/{}", segment(report_id));
        self.envelope(ApiRequest::get(path)).await?.into_item()
    }

    pub async fn review_report(&self, report_id: &str, review: &ReviewReport) -> Result<Value> {
        if review.status == ReportStatus::Pending {
            return Err(Error::Message(
                "a review must move the report out of pending".to_string(),
            ));
        }
        let path = format!("/admin/reports/{}/review", segment(report_id));
        self.put(&path, review).await
    }
}
