//! Remote mapping source: GET an endpoint that returns a JSON array of
//! mappings (`{topic, category|type, pdfUrl}`).

use coursedocs_core::{Error, MappingSource, Result, TopicMapping};
use std::time::Duration;

fn timeout_from_env() -> Duration {
    std::env::var("COURSEDOCS_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(30))
}

#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteSource {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        // Validate up front so a bad endpoint fails at construction, not on
        // the first listing.
        url::Url::parse(endpoint.trim()).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        let client = reqwest::Client::builder()
            .user_agent("coursedocs-local/0.1")
            .redirect(reqwest::redirect::Policy::limited(10))
            // Safety defaults: avoid "hang forever" on DNS/TLS/body stalls.
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout_from_env())
            .build()
            .map_err(|e| Error::Source(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim().to_string(),
        })
    }

    /// Endpoint from `COURSEDOCS_ENDPOINT`; `NotConfigured` when unset.
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("COURSEDOCS_ENDPOINT")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::NotConfigured("COURSEDOCS_ENDPOINT is not set".to_string()))?;
        Self::new(endpoint)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl MappingSource for RemoteSource {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn list_mappings(&self) -> Result<Vec<TopicMapping>> {
        let resp = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| Error::Source(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Source(format!(
                "{} returned status {}",
                self.endpoint,
                status.as_u16()
            )));
        }
        let mappings: Vec<TopicMapping> = resp
            .json()
            .await
            .map_err(|e| Error::Source(format!("bad mapping payload: {e}")))?;
        tracing::debug!(
            endpoint = %self.endpoint,
            count = mappings.len(),
            "listed mappings from remote source"
        );
        Ok(mappings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::header, http::StatusCode, routing::get, Router};
    use coursedocs_core::Resolver;
    use std::net::SocketAddr;

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn lists_mappings_in_the_legacy_wire_shape() {
        let body = r#"[
            {"topic":"Mechanics","type":"theory","pdfUrl":"https://drive.google.com/file/d/XYZ/view"},
            {"topic":"Optics","type":"theory","pdfUrl":"https://drive.google.com/file/d/OPT/view"}
        ]"#;
        let app = Router::new().route(
            "/mappings",
            get(move || async move { ([(header::CONTENT_TYPE, "application/json")], body) }),
        );
        let addr = serve(app).await;

        let src = RemoteSource::new(format!("http://{addr}/mappings")).unwrap();
        let mappings = src.list_mappings().await.unwrap();
        assert_eq!(mappings.len(), 2);

        // The remote listing drops straight into the resolver.
        let r = Resolver::new(mappings).unwrap();
        let m = r.lookup(Some("Mechanics"), Some("theory")).unwrap();
        assert_eq!(m.source_url, "https://drive.google.com/file/d/XYZ/view");
    }

    #[tokio::test]
    async fn non_2xx_is_a_source_error() {
        let app = Router::new().route(
            "/mappings",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let addr = serve(app).await;

        let src = RemoteSource::new(format!("http://{addr}/mappings")).unwrap();
        let err = src.list_mappings().await.unwrap_err();
        assert!(matches!(err, Error::Source(_)), "got {err}");
        assert!(err.to_string().contains("500"), "got {err}");
    }

    #[tokio::test]
    async fn malformed_payload_is_a_source_error() {
        let app = Router::new().route(
            "/mappings",
            get(|| async { ([(header::CONTENT_TYPE, "application/json")], r#"{"not":"an array"}"#) }),
        );
        let addr = serve(app).await;

        let src = RemoteSource::new(format!("http://{addr}/mappings")).unwrap();
        let err = src.list_mappings().await.unwrap_err();
        assert!(matches!(err, Error::Source(_)), "got {err}");
    }

    #[test]
    fn bad_endpoint_fails_at_construction() {
        let err = RemoteSource::new("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)), "got {err}");
    }
}
