//! HTTP client for the CloudFormation response URL.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

use crate::errors::ResourceError;

/// Delivers a serialized lifecycle response.
#[async_trait]
pub trait CallbackSender: Send + Sync {
    /// PUTs `body` to `url` and returns the HTTP status code.
    async fn put_response(&self, url: &Url, body: String) -> Result<u16, ResourceError>;
}

/// [`CallbackSender`] backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpCallbackSender {
    client: Client,
}

impl HttpCallbackSender {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the PUT request. The pre-signed S3 URL is signed without a
    /// content type, so the header is sent blank.
    pub fn build_request(&self, url: &Url, body: String) -> Result<reqwest::Request, ResourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(""));
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));

        Ok(self
            .client
            .put(url.clone())
            .headers(headers)
            .body(body)
            .build()?)
    }
}

#[async_trait]
impl CallbackSender for HttpCallbackSender {
    async fn put_response(&self, url: &Url, body: String) -> Result<u16, ResourceError> {
        let request = self.build_request(url, body)?;
        let resp = self.client.execute(request).await?;
        Ok(resp.status().as_u16())
    }
}
