//! HTTP client for the catalog REST API
//!
//! Uses a blocking reqwest client with basic authentication. All resource
//! calls go through `<url>/rest/2.0/...`.

use super::{
    CatalogBackend, CatalogError, CatalogObject, CatalogResult, ImportJobBackend, Job,
    PagedResponse,
};
use crate::config::CatalogConfig;
use crate::models::ObjectKind;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, multipart};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// REST API prefix appended to the configured base URL
pub const REST_API_PREFIX: &str = "/rest/2.0";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of characters of an error body kept in [`CatalogError::Api`]
const ERROR_BODY_LIMIT: usize = 500;

/// Catalog REST client
pub struct CatalogClient {
    http: Client,
    base_url: String,
    username: String,
    password: String,
}

impl CatalogClient {
    pub fn new(
        url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> CatalogResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: api_base_url(url),
            username: username.into(),
            password: password.into(),
        })
    }

    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        Self::new(&config.url, &config.username, &config.password)
    }

    /// Base URL including the REST prefix
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, kind: ObjectKind) -> String {
        format!("{}/{}", self.base_url, kind.resource_path())
    }

    fn object_url(&self, kind: ObjectKind, id: &Uuid) -> String {
        format!("{}/{}/{}", self.base_url, kind.resource_path(), id)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> CatalogResult<T> {
        let response = request
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .send()
            .map_err(|e| CatalogError::Transport(format!("{}: {}", what, e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| CatalogError::Transport(format!("{}: {}", what, e)))?;
        debug!("{} -> HTTP {}", what, status.as_u16());

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| CatalogError::UnexpectedShape(format!("{}: {}", what, e)))
    }
}

/// Normalize the configured URL into the REST base URL
pub fn api_base_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    if trimmed.ends_with(REST_API_PREFIX) {
        trimmed.to_string()
    } else {
        format!("{}{}", trimmed, REST_API_PREFIX)
    }
}

impl CatalogBackend for CatalogClient {
    fn fetch(&self, kind: ObjectKind, id: &Uuid) -> CatalogResult<CatalogObject> {
        let what = format!("GET {} {}", kind, id);
        self.send(self.http.get(self.object_url(kind, id)), &what)
    }

    fn search(
        &self,
        kind: ObjectKind,
        query: &[(&str, String)],
    ) -> CatalogResult<Vec<CatalogObject>> {
        let what = format!("search {}", kind);
        let page: PagedResponse =
            self.send(self.http.get(self.collection_url(kind)).query(query), &what)?;
        Ok(page.results)
    }

    fn add(&self, kind: ObjectKind, body: &JsonValue) -> CatalogResult<CatalogObject> {
        let what = format!("POST {}", kind);
        self.send(self.http.post(self.collection_url(kind)).json(body), &what)
    }

    fn change(&self, kind: ObjectKind, id: &Uuid, body: &JsonValue) -> CatalogResult<CatalogObject> {
        let what = format!("PATCH {} {}", kind, id);
        self.send(self.http.patch(self.object_url(kind, id)).json(body), &what)
    }
}

impl ImportJobBackend for CatalogClient {
    fn submit_import(&self, file: &Path, file_name: &str) -> CatalogResult<Job> {
        let form = multipart::Form::new()
            .text("fileName", file_name.to_string())
            .file("file", file)
            .map_err(|e| CatalogError::Io(format!("{}: {}", file.display(), e)))?;

        let url = format!("{}/import/json-job", self.base_url);
        self.send(self.http.post(url).multipart(form), "POST import job")
    }

    fn get_job(&self, id: &Uuid) -> CatalogResult<Job> {
        let url = format!("{}/jobs/{}", self.base_url, id);
        self.send(self.http.get(url), &format!("GET job {}", id))
    }
}
