//! HTTP object store
//!
//! Uploads objects with `PUT {endpoint}/{bucket}/{key}`. This is the path
//! style understood by S3-compatible gateways, GCS's XML API and most
//! presigning proxies. An optional bearer token is sent with every request.

use super::traits::{validate_key, ObjectStore};
use crate::config::SecretString;
use crate::domain::{CourseGraphError, Result, StorageError};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

/// Object store reached over HTTP
pub struct HttpObjectStore {
    client: Client,
    endpoint: Url,
    bucket: String,
    token: Option<SecretString>,
}

impl HttpObjectStore {
    /// Create a new HTTP object store
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unusable endpoint or bucket, and
    /// `StorageError::ConnectionFailed` if the HTTP client cannot be built.
    pub fn new(
        endpoint: &str,
        bucket: &str,
        token: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            CourseGraphError::Configuration(format!("Invalid upload endpoint '{endpoint}': {e}"))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(CourseGraphError::Configuration(format!(
                "Upload endpoint cannot be used as a base URL: {endpoint}"
            )));
        }
        validate_key(bucket)?;

        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            bucket: bucket.to_string(),
            token,
        })
    }

    /// Full URL of an object
    pub fn object_url(&self, key: &str) -> Result<Url> {
        validate_key(key)?;
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                CourseGraphError::Configuration(format!(
                    "Upload endpoint cannot be used as a base URL: {}",
                    self.endpoint
                ))
            })?
            .pop_if_empty()
            .push(&self.bucket)
            .push(key);
        Ok(url)
    }
}

fn content_type_for(key: &str) -> &'static str {
    if key.ends_with(".csv") {
        "text/csv"
    } else {
        "application/octet-stream"
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    fn describe(&self) -> String {
        format!("{}/{}", self.endpoint.as_str().trim_end_matches('/'), self.bucket)
    }

    async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<()> {
        let url = self.object_url(key)?;
        let size = body.len();

        let mut request = self
            .client
            .put(url.clone())
            .header(CONTENT_TYPE, content_type_for(key))
            .body(body);
        if let Some(token) = &self.token {
            request = request.header(
                AUTHORIZATION,
                format!("Bearer {}", token.expose_secret().as_str()),
            );
        }

        let response = request
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(format!("{url}: {e}")))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(key = %key, bytes = size, status = status.as_u16(), "Uploaded object");
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(StorageError::AuthenticationFailed(format!("{status} for {key}")).into())
            }
            _ => Err(StorageError::UploadFailed {
                key: key.to_string(),
                status: status.as_u16(),
                message,
            }
            .into()),
        }
    }
}
