//! Cloud API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Resource operations are implemented via traits on resource types.

use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::error::{OtcError, Result};
use crate::transport::{Method, RawResponse, Request, Service, Transport};

const DEFAULT_REGION: &str = "eu-de";
const ENDPOINT_DOMAIN: &str = "otc.t-systems.com";
const USER_AGENT: &str = concat!("otcapi/", env!("CARGO_PKG_VERSION"));
const AUTH_HEADER: &str = "X-Auth-Token";

/// Low-level API client.
///
/// Holds an already issued token, the project the session is scoped to and
/// the region used to derive service endpoints. Each service is reached at
/// `https://{service}.{region}.otc.t-systems.com/` unless overridden.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use otcapi::{OtcClient, Service};
///
/// # fn example() -> otcapi::Result<()> {
/// // Create from environment variables
/// let client = OtcClient::from_env()?;
///
/// // Or configure manually
/// let client = OtcClient::new("token", "project-id", "eu-de")?
///     .with_endpoint(Service::Rds, "https://rds.example.com")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct OtcClient {
    http: Client,
    token: String,
    project_id: String,
    region: String,
    base_url: Option<Arc<Url>>,
    endpoints: Arc<BTreeMap<Service, Url>>,
}

impl std::fmt::Debug for OtcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtcClient")
            .field("project_id", &self.project_id)
            .field("region", &self.region)
            .field("base_url", &self.base_url.as_ref().map(|u| u.as_str()))
            .finish_non_exhaustive()
    }
}

impl OtcClient {
    /// Create a client from environment variables.
    ///
    /// Reads `OTC_AUTH_TOKEN` and `OTC_PROJECT_ID` (both required),
    /// `OTC_REGION` (defaults to `eu-de`) and `OTC_ENDPOINT` (optional base
    /// URL that every service is routed to).
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is not set or the endpoint is
    /// not a valid URL.
    pub fn from_env() -> Result<Self> {
        let required = |name: &str| {
            env::var(name).map_err(|_| {
                OtcError::ConfigMissing(format!("{name} environment variable not set"))
            })
        };

        let token = required("OTC_AUTH_TOKEN")?;
        let project_id = required("OTC_PROJECT_ID")?;
        let region = env::var("OTC_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());

        let client = Self::new(&token, &project_id, &region)?;
        match env::var("OTC_ENDPOINT") {
            Ok(endpoint) if !endpoint.is_empty() => client.with_base_url(&endpoint),
            _ => Ok(client),
        }
    }

    /// Create a new client for the given token, project and region.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(token: &str, project_id: &str, region: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .gzip(true)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(OtcError::HttpError)?;

        Ok(Self {
            http,
            token: token.to_string(),
            project_id: project_id.to_string(),
            region: region.to_string(),
            base_url: None,
            endpoints: Arc::new(BTreeMap::new()),
        })
    }

    /// Route every service without its own endpoint to `base_url`.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = Some(Arc::new(parse_base(base_url)?));
        Ok(self)
    }

    /// Use a specific endpoint for one service.
    pub fn with_endpoint(mut self, service: Service, endpoint: &str) -> Result<Self> {
        let url = parse_base(endpoint)?;
        Arc::make_mut(&mut self.endpoints).insert(service, url);
        Ok(self)
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Base URL requests for `service` are resolved against.
    pub fn endpoint(&self, service: Service) -> Result<Url> {
        if let Some(url) = self.endpoints.get(&service) {
            return Ok(url.clone());
        }
        if let Some(url) = &self.base_url {
            return Ok(url.as_ref().clone());
        }
        parse_base(&format!(
            "https://{}.{}.{}",
            service.endpoint_name(),
            self.region,
            ENDPOINT_DOMAIN
        ))
    }

    fn url_for(&self, service: Service, path: &str) -> Result<Url> {
        Ok(self.endpoint(service)?.join(path.trim_start_matches('/'))?)
    }
}

#[async_trait]
impl Transport for OtcClient {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn region(&self) -> Option<&str> {
        Some(&self.region)
    }

    #[tracing::instrument(skip(self, request), fields(method = request.method.as_str(), path = %request.path))]
    async fn execute(&self, request: Request) -> Result<RawResponse> {
        let url = self.url_for(request.service, &request.path)?;

        let mut builder = match request.method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
            Method::Put => self.http.put(url),
            Method::Delete => self.http.delete(url),
        }
        .header(AUTH_HEADER, &self.token);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(OtcError::HttpError)?;
        let status = response.status();
        let retry_after_secs = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let text = response.text().await.map_err(OtcError::HttpError)?;

        tracing::debug!(status = status.as_u16(), bytes = text.len(), "response received");

        let body = if text.trim().is_empty() {
            Value::Null
        } else if status.is_success() {
            serde_json::from_str(&text)?
        } else {
            // Error bodies are not always JSON.
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(RawResponse {
            status: status.as_u16(),
            body,
            retry_after_secs,
        })
    }
}

/// Parse a base URL, making sure it ends with `/` so joins keep its path.
fn parse_base(raw: &str) -> Result<Url> {
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{raw}/"))?)
    }
}
