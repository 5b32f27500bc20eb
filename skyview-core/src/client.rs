//! Access to the weather backend.
//!
//! [`WeatherClient`] is the seam between the view controller and the network;
//! [`HttpWeatherClient`] is the real implementation over `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::{fmt::Debug, time::Duration};
use tracing::{debug, instrument};

use crate::{
    Config,
    error::ClientError,
    model::{HistoryEntry, WeatherReading},
};

#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    /// `GET {base}/weather/{city}`
    async fn lookup(&self, city: &str) -> Result<WeatherReading, ClientError>;

    /// `GET {base}/history`
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpWeatherClient {
    base_url: Url,
    http: Client,
}

impl HttpWeatherClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, http })
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    /// Append path segments to the base URL, percent-encoding each one.
    ///
    /// `.` and `..` are refused: URL normalization would drop them and hit a
    /// different endpoint.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        if let Some(dot) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(ClientError::InvalidUrl(format!(
                "path segment '{dot}' is not allowed"
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        debug!(%url, "sending request");

        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherClient for HttpWeatherClient {
    #[instrument(skip(self))]
    async fn lookup(&self, city: &str) -> Result<WeatherReading, ClientError> {
        let url = self.endpoint(&["weather", city])?;
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, ClientError> {
        let url = self.endpoint(&["history"])?;
        self.get_json(url).await
    }
}

/// Parse and check a backend base URL. Only http(s) URLs with a host are accepted.
pub fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw.trim()).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl(format!(
            "{raw}: expected an http:// or https:// URL"
        )));
    }

    Ok(url)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let head: String = body.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpWeatherClient {
        HttpWeatherClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = HttpWeatherClient::new("ftp://example.com", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));

        let err = HttpWeatherClient::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn endpoint_handles_trailing_slash_and_encoding() {
        let client =
            HttpWeatherClient::new("https://example.com/api/", Duration::from_secs(1)).unwrap();

        let url = client.endpoint(&["weather", "New York"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/weather/New%20York");

        let url = client.endpoint(&["weather", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/weather/a%2Fb");
    }

    #[test]
    fn endpoint_refuses_dot_segments() {
        let client = HttpWeatherClient::new("https://example.com", Duration::from_secs(1)).unwrap();

        for dot in [".", ".."] {
            let err = client.endpoint(&["weather", dot]).unwrap_err();
            assert!(matches!(err, ClientError::InvalidUrl(_)));
        }

        let url = client.endpoint(&["weather", "..."]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/weather/...");
    }

    #[test]
    fn truncate_body_is_char_safe() {
        let long = "é".repeat(300);
        let truncated = truncate_body(&long);

        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[tokio::test]
    async fn lookup_parses_reading() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather/Paris"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "city": "Paris",
                "description": "clear sky",
                "temperature": 18.5
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reading = client_for(&server).lookup("Paris").await.unwrap();

        assert_eq!(reading.city, "Paris");
        assert_eq!(reading.description, "clear sky");
        assert_eq!(reading.temperature, 18.5);
    }

    #[tokio::test]
    async fn lookup_encodes_city_segment() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather/New%20York"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "city": "New York",
                "description": "rain",
                "temperature": 9.0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reading = client_for(&server).lookup("New York").await.unwrap();
        assert_eq!(reading.city, "New York");
    }

    #[tokio::test]
    async fn lookup_non_success_is_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather/Atlantis"))
            .respond_with(ResponseTemplate::new(404).set_body_string("city not found"))
            .mount(&server)
            .await;

        let err = client_for(&server).lookup("Atlantis").await.unwrap_err();

        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "city not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn lookup_bad_json_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather/Paris"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).lookup("Paris").await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn lookup_transport_failure() {
        // Nothing listens on the discard port of localhost in the test environment.
        let client = HttpWeatherClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

        let err = client.lookup("Paris").await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[tokio::test]
    async fn fetch_history_keeps_server_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/history"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"city": "Oslo", "description": "snow", "temperature": -3.2,
                 "timestamp": "2024-01-15T10:30:00Z"},
                {"city": "Paris", "description": "clear sky", "temperature": 18.5,
                 "timestamp": 1705314600000i64}
            ])))
            .mount(&server)
            .await;

        let history = client_for(&server).fetch_history().await.unwrap();

        let cities: Vec<_> = history.iter().map(|h| h.city.as_str()).collect();
        assert_eq!(cities, ["Oslo", "Paris"]);
        assert_eq!(history[0].timestamp, history[1].timestamp);
    }

    #[tokio::test]
    async fn fetch_history_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/history"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_history().await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 500, .. }));
    }
}
