//! The request/response boundary the list and item operations are built on.
//!
//! [`OtcClient`](crate::OtcClient) implements [`Transport`] over HTTP. Tests
//! substitute in-memory implementations.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{OtcError, Result};

/// Cloud services reachable through the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Service {
    /// Distributed cache service.
    Dcs,
    /// Distributed message service.
    Dms,
    FunctionGraph,
    ModelArts,
    /// Relational database service.
    Rds,
}

impl Service {
    pub const ALL: [Service; 5] = [
        Service::Dcs,
        Service::Dms,
        Service::FunctionGraph,
        Service::ModelArts,
        Service::Rds,
    ];

    /// Host label of the service endpoint.
    pub fn endpoint_name(&self) -> &'static str {
        match self {
            Service::Dcs => "dcs",
            Service::Dms => "dms",
            Service::FunctionGraph => "functiongraph",
            Service::ModelArts => "modelarts",
            Service::Rds => "rds",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// One outgoing request, relative to the service endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub service: Service,
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(service: Service, method: Method, path: impl Into<String>) -> Self {
        Self {
            service,
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Value of a query parameter, if present.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Status and decoded body of a response. An empty body decodes to `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
    /// Parsed `retry-after` header, when the server sent one.
    pub retry_after_secs: Option<u64>,
}

impl RawResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            retry_after_secs: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body of a 2xx response, or the error a failed one stands for.
    pub fn into_result(self) -> Result<Value> {
        if self.is_success() {
            return Ok(self.body);
        }
        if self.status == 429 {
            return Err(OtcError::RateLimited {
                retry_after_secs: self.retry_after_secs,
            });
        }
        Err(OtcError::ApiError {
            message: error_message(&self.body, self.status),
            status_code: Some(self.status),
        })
    }
}

/// Pull a human readable message out of an error body.
fn error_message(body: &Value, status: u16) -> String {
    let text = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
    let code = text("error_code");

    let message = text("error_msg")
        .or_else(|| text("message"))
        .or_else(|| {
            body.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .or_else(|| text("error"));

    match (code, message) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (None, Some(message)) => message,
        _ => match body {
            Value::Null => format!("HTTP {status}"),
            Value::String(s) if !s.is_empty() => s.clone(),
            other => format!("HTTP {status}: {other}"),
        },
    }
}

/// Request/response boundary.
///
/// Only [`Transport::execute`] must be provided. The helpers turn non-2xx
/// responses into errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Project the session is scoped to; fills `{project_id}` in paths.
    fn project_id(&self) -> &str;

    /// Region of the session, attached to bound records as ambient context.
    fn region(&self) -> Option<&str> {
        None
    }

    /// Send one request and return whatever status came back.
    async fn execute(&self, request: Request) -> Result<RawResponse>;

    async fn get(&self, service: Service, path: &str, query: Vec<(String, String)>) -> Result<Value> {
        let request = Request::new(service, Method::Get, path).with_query(query);
        self.execute(request).await?.into_result()
    }

    async fn post(&self, service: Service, path: &str, body: Value) -> Result<Value> {
        let request = Request::new(service, Method::Post, path).with_body(body);
        self.execute(request).await?.into_result()
    }

    async fn put(&self, service: Service, path: &str, body: Value) -> Result<Value> {
        let request = Request::new(service, Method::Put, path).with_body(body);
        self.execute(request).await?.into_result()
    }

    async fn delete(&self, service: Service, path: &str) -> Result<Value> {
        let request = Request::new(service, Method::Delete, path);
        self.execute(request).await?.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_returns_body() {
        let response = RawResponse::new(200, json!({"queues": []}));
        assert_eq!(response.into_result().unwrap(), json!({"queues": []}));
    }

    #[test]
    fn test_error_message_prefers_provider_fields() {
        let response = RawResponse::new(
            404,
            json!({"error_code": "DCS.4001", "error_msg": "instance not found"}),
        );
        match response.into_result().unwrap_err() {
            OtcError::ApiError {
                message,
                status_code,
            } => {
                assert_eq!(message, "DCS.4001: instance not found");
                assert_eq!(status_code, Some(404));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nested_error_message() {
        let response = RawResponse::new(400, json!({"error": {"message": "bad marker", "code": 400}}));
        let err = response.into_result().unwrap_err();
        assert_eq!(err.to_string(), "API error: bad marker");
    }

    #[test]
    fn test_empty_error_body() {
        let err = RawResponse::new(500, Value::Null).into_result().unwrap_err();
        assert_eq!(err.to_string(), "API error: HTTP 500");
    }

    #[test]
    fn test_rate_limited() {
        let mut response = RawResponse::new(429, Value::Null);
        response.retry_after_secs = Some(3);
        assert!(matches!(
            response.into_result(),
            Err(OtcError::RateLimited {
                retry_after_secs: Some(3)
            })
        ));
    }

    #[test]
    fn test_query_value() {
        let request = Request::new(Service::Dcs, Method::Get, "/v1.0/p/instances")
            .with_query(vec![("limit".to_string(), "10".to_string())]);
        assert_eq!(request.query_value("limit"), Some("10"));
        assert_eq!(request.query_value("start"), None);
    }
}
