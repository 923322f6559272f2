//! Campus → college → department hierarchy.

use serde::Serialize;
use serde_json::Value;

use super::segment;
use crate::client::ApiClient;
use crate::error::Result;
use crate::model::{Campus, College, Department};
use crate::transport::{ApiRequest, Transport};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCampus {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCollege {
    pub name: String,
    pub campus_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDepartment {
    pub name: String,
    pub college_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    /// Full tree: campuses with nested colleges and departments.
    pub async fn academic_structure(&self) -> Result<Vec<Campus>> {
        self.envelope(ApiRequest::get("/categories/structure"))
            .await?
            .into_list()
    }

    pub async fn campuses(&self) -> Result<Vec<Campus>> {
        self.envelope(ApiRequest::get("/categories/campuses"))
            .await?
            .into_list()
    }

    /// Colleges of one campus, or all colleges when `campus_id` is `None`.
    pub async fn colleges(&self, campus_id: Option<&str>) -> Result<Vec<College>> {
        let path = match campus_id {
            Some(id) => format!("/categories/campuses/{}/colleges", segment(id)),
            None => "/categories/colleges".to_string(),
        };
        self.envelope(ApiRequest::get(path)).await?.into_list()
    }

    /// Departments of one college, or all departments when `college_id` is `None`.
    pub async fn departments(&self, college_id: Option<&str>) -> Result<Vec<Department>> {
        let path = match college_id {
            Some(id) => format!("/categories/colleges/{}/departments", segment(id)),
            None => "/categories/departments".to_string(),
        };
        self.envelope(ApiRequest::get(path)).await?.into_list()
    }

    pub async fn create_campus(&self, campus: &NewCampus) -> Result<Value> {
        self.post("/admin/campuses", campus).await
    }

    pub async fn create_college(&self, college: &NewCollege) -> Result<Value> {
        self.post("/admin/colleges", college).await
    }

    pub async fn create_department(&self, department: &NewDepartment) -> Result<Value> {
        self.post("/admin/departments", department).await
    }
}
