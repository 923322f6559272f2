use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::model::AdminUser;
use crate::transport::{ApiRequest, Transport};

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub user: AdminUser,
    pub token: String,
}

impl<T: Transport> ApiClient<T> {
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let request = ApiRequest::post("/auth/login").with_json(&Credentials { email, password })?;
        let body = self.execute(request).await?;
        Envelope::from_value(body).into_item()
    }
}
