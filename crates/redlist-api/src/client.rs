//! Red List API HTTP client

use crate::error::{RedListError, Result};
use crate::pacer::Pacer;
use crate::types::*;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the IUCN Red List species registry
///
/// Every request carries the API token as a `token` query parameter and is
/// gated by the client's [`Pacer`]. Failures are returned, never retried.
pub struct RedListClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    pacer: Pacer,
}

impl RedListClient {
    /// Create a client with the default pacing (1.5s before every call) and a 30 second timeout
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        Self::with_timeout(base_url, token, Duration::from_secs(30))
    }

    /// Create a client with a custom timeout
    pub fn with_timeout(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            pacer: Pacer::default(),
        })
    }

    /// Replace the pacing policy
    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }

    /// Total number of species in the registry
    pub async fn species_count(&self) -> Result<SpeciesCount> {
        self.get("speciescount").await
    }

    /// One page of the species listing (pages start at 0)
    pub async fn species_page(&self, page: u64) -> Result<SpeciesPage> {
        self.get(&format!("species/page/{}", page)).await
    }

    /// Latest assessment record for a species
    pub async fn species(&self, name: &str) -> Result<NamedResult<SpeciesRecord>> {
        self.get(&format!("species/{}", urlencoding::encode(name)))
            .await
    }

    pub async fn citation(&self, name: &str) -> Result<CitationResponse> {
        self.get(&format!("species/citation/{}", urlencoding::encode(name)))
            .await
    }

    pub async fn threats(&self, name: &str) -> Result<NamedResult<Threat>> {
        self.get(&format!("threats/species/name/{}", urlencoding::encode(name)))
            .await
    }

    pub async fn measures(&self, name: &str) -> Result<NamedResult<Measure>> {
        self.get(&format!("measures/species/name/{}", urlencoding::encode(name)))
            .await
    }

    /// Assessment history, most recent first
    pub async fn history(&self, name: &str) -> Result<NamedResult<HistoricAssessment>> {
        self.get(&format!("species/history/name/{}", urlencoding::encode(name)))
            .await
    }

    pub async fn countries(&self, name: &str) -> Result<NamedResult<CountryOccurrence>> {
        self.get(&format!("species/countries/name/{}", urlencoding::encode(name)))
            .await
    }

    pub async fn habitats(&self, name: &str) -> Result<NamedResult<Habitat>> {
        self.get(&format!("habitats/species/name/{}", urlencoding::encode(name)))
            .await
    }

    pub async fn narrative(&self, name: &str) -> Result<NamedResult<Narrative>> {
        self.get(&format!("species/narrative/{}", urlencoding::encode(name)))
            .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.pacer.wait().await;

        let url = format!(
            "{}/{}?token={}",
            self.base_url,
            path,
            urlencoding::encode(&self.token)
        );
        debug!(path, "Red List request");

        let response = self.http.get(&url).send().await.map_err(|e| {
            // reqwest errors embed the URL, which carries the token
            let e = e.without_url();
            warn!(path, error = %e, "Red List request failed");
            RedListError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(path, %status, "Red List returned an error status");
            return Err(RedListError::Status {
                status,
                path: path.to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| e.without_url())?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!(path, error = %e, "Red List response did not parse");
            RedListError::Json(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacer::PacingPolicy;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn test_client(server: &MockServer) -> RedListClient {
        RedListClient::new(&server.uri(), "test-token")
            .unwrap()
            .with_pacer(Pacer::new(PacingPolicy::Unthrottled))
    }

    #[tokio::test]
    async fn test_species_count_sends_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/speciescount"))
            .and(query_param("token", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": "10001"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let count = client.species_count().await.unwrap();
        assert_eq!(count.count, Some(10001));
    }

    #[tokio::test]
    async fn test_species_name_is_percent_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/species/Gorilla%20gorilla"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Gorilla gorilla",
                "result": [{"scientific_name": "Gorilla gorilla", "family": "HOMINIDAE"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let record = client.species("Gorilla gorilla").await.unwrap();
        assert_eq!(record.result[0].family.as_deref(), Some("HOMINIDAE"));
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/species/page/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page": 2, "result": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = RedListClient::new(&format!("{}/", server.uri()), "t")
            .unwrap()
            .with_pacer(Pacer::new(PacingPolicy::Unthrottled));
        let page = client.species_page(2).await.unwrap();
        assert_eq!(page.page, Some(2));
        assert!(page.result.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_returned() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/threats/species/name/Pan%20paniscus"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let err = client.threats("Pan paniscus").await.unwrap_err();
        match err {
            RedListError::Status { status, path } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(path, "threats/species/name/Pan%20paniscus");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/speciescount"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let err = client.species_count().await.unwrap_err();
        assert!(matches!(err, RedListError::Json(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error_without_token() {
        let client = RedListClient::with_timeout(
            "http://127.0.0.1:9",
            "secret-token",
            Duration::from_secs(2),
        )
        .unwrap()
        .with_pacer(Pacer::new(PacingPolicy::Unthrottled));
        let err = client.species_count().await.unwrap_err();
        assert!(matches!(err, RedListError::Http(_)));
        assert!(!err.to_string().contains("secret-token"));
    }

    #[tokio::test]
    async fn test_every_request_goes_through_pacer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/speciescount"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 1})))
            .expect(3)
            .mount(&server)
            .await;

        let client = RedListClient::new(&server.uri(), "t")
            .unwrap()
            .with_pacer(Pacer::new(PacingPolicy::MinInterval(Duration::from_millis(100))));
        let start = std::time::Instant::now();
        for _ in 0..3 {
            client.species_count().await.unwrap();
        }
        assert!(start.elapsed() >= Duration::from_millis(200));
    }
}
