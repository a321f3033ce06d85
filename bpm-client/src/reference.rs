//! Reference data endpoints

use bpm_core::domain::record::RawRecord;
use bpm_core::domain::resource::ReferenceData;
use reqwest::Method;

use crate::BpmClient;
use crate::error::Result;
use crate::transport::ApiRequest;

impl BpmClient {
    /// List one reference collection
    pub async fn list_reference(&self, data: ReferenceData) -> Result<Vec<RawRecord>> {
        let response = self
            .execute(ApiRequest::new(Method::GET, data.path()))
            .await?;

        self.handle_response(&response)
    }

    /// List BPM users
    pub async fn list_users(&self) -> Result<Vec<RawRecord>> {
        self.list_reference(ReferenceData::Users).await
    }

    /// List the channels leads can come from
    pub async fn list_lead_sources(&self) -> Result<Vec<RawRecord>> {
        self.list_reference(ReferenceData::LeadSources).await
    }

    /// List the statuses a lead can be in
    pub async fn list_lead_status_options(&self) -> Result<Vec<RawRecord>> {
        self.list_reference(ReferenceData::LeadStatusOptions).await
    }
}

#[cfg(test)]
mod tests {
    use crate::BpmClient;
    use crate::testing::FakeTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_reference_paths() {
        let transport = FakeTransport::new();
        transport.respond_json(200, json!([{ "id": 1, "name": "ops" }]));
        transport.respond_json(200, json!([{ "id": 1, "source": "Web" }]));
        transport.respond_json(200, json!([{ "id": 1, "status": "New" }]));
        let client = BpmClient::with_transport(transport.clone());

        assert_eq!(client.list_users().await.unwrap().len(), 1);
        assert_eq!(client.list_lead_sources().await.unwrap().len(), 1);
        assert_eq!(client.list_lead_status_options().await.unwrap().len(), 1);

        let paths: Vec<_> = transport.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["users", "lead_sources", "lead_status"]);
    }

    #[tokio::test]
    async fn test_reference_needs_no_token() {
        let transport = FakeTransport::new();
        transport.respond_json(200, json!([]));
        let client = BpmClient::with_transport(transport.clone());

        client.list_users().await.unwrap();

        assert!(transport.requests()[0].bearer.is_none());
    }
}
