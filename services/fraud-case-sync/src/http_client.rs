// Thin HTTP adapter shared by the source and destination API calls

use crate::error::HttpError;
use crate::REQUEST_TIMEOUT;
use bytes::Bytes;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Header carrying API keys on both APIs
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// A single outgoing request
#[derive(Clone)]
pub struct ApiRequest<'a> {
    method: Method,
    url: &'a str,
    headers: Vec<(&'static str, String)>,
    query: Vec<(&'static str, String)>,
    body: Option<Vec<u8>>,
}

impl<'a> ApiRequest<'a> {
    pub fn new(method: Method, url: &'a str) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn query(mut self, name: &'static str, value: impl ToString) -> Self {
        self.query.push((name, value.to_string()));
        self
    }

    /// Serialize `body` as the JSON request body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(body)?);
        self.headers
            .push(("Content-Type", "application/json".to_string()));
        Ok(self)
    }
}

/// Raw status and body of a completed request
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl ApiResponse {
    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_slice(&self.body).map_err(|source| HttpError::Decode {
            source,
            body: self.text(),
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, HttpError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client })
    }

    /// Perform one request. No retries, no status interpretation.
    pub async fn execute(&self, request: ApiRequest<'_>) -> Result<ApiResponse, HttpError> {
        let mut builder = self.client.request(request.method, request.url);

        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pong {
        ok: bool,
    }

    #[tokio::test]
    async fn test_sends_headers_query_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/items"))
            .and(header("X-API-KEY", "key-1"))
            .and(header("Content-Type", "application/json"))
            .and(query_param("page", "3"))
            .and(body_json(serde_json::json!([1, 2])))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/items", server.uri());
        let request = ApiRequest::new(Method::PUT, &url)
            .header(API_KEY_HEADER, "key-1")
            .query("page", 3)
            .json(&[1, 2])
            .unwrap();

        let response = HttpClient::new().unwrap().execute(request).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json::<Pong>().unwrap(), Pong { ok: true });
    }

    #[tokio::test]
    async fn test_status_is_returned_not_interpreted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let url = server.uri();
        let response = HttpClient::new()
            .unwrap()
            .execute(ApiRequest::new(Method::GET, &url))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.text(), "down");
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let url = server.uri();
        let response = HttpClient::new()
            .unwrap()
            .execute(ApiRequest::new(Method::GET, &url))
            .await
            .unwrap();

        match response.json::<Pong>() {
            Err(HttpError::Decode { body, .. }) => assert_eq!(body, "<html>"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Nothing listens on the discard port
        let result = HttpClient::new()
            .unwrap()
            .execute(ApiRequest::new(Method::GET, "http://127.0.0.1:9/"))
            .await;
        assert!(matches!(result, Err(HttpError::Transport(_))));
    }
}
