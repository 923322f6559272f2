use crate::client::ApiClient;
use crate::error::Result;
use crate::model::Analytics;
use crate::transport::{ApiRequest, Transport};

impl<T: Transport> ApiClient<T> {
    /// Dashboard aggregates; an empty body reads as the all-zero snapshot.
    pub async fn analytics(&self) -> Result<Analytics> {
        self.envelope(ApiRequest::get("/admin/analytics"))
            .await?
            .into_item_or_default()
    }
}
