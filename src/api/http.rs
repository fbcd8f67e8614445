//! reqwest による FileApi / ReportApi の実装

use super::{FileApi, ReportApi};
use crate::error::{AppError, Result};
use comprobantes_common::{Comprobante, Endpoints, ReportRequest};
use reqwest::header::{HeaderValue, CACHE_CONTROL};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpClient {
    /// timeout が None の場合は reqwest の既定（無制限）
    pub fn new(endpoints: Endpoints, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get(&self, url: Url, no_cache: bool) -> Result<reqwest::Response> {
        tracing::debug!(%url, "GET");
        let mut request = self.client.get(url.clone());
        if no_cache {
            request = request.header(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    async fn get_bytes(&self, url: Url, no_cache: bool) -> Result<Vec<u8>> {
        let response = self.get(url, no_cache).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

impl FileApi for HttpClient {
    async fn search(&self, term: &str) -> Result<Vec<Comprobante>> {
        let url = self.endpoints.search_url(term)?;
        let response = self.get(url, false).await?;
        Ok(response.json::<Vec<Comprobante>>().await?)
    }

    async fn download_multiple(&self, filenames: &str) -> Result<Vec<u8>> {
        let url = self.endpoints.download_multiple_url(filenames)?;
        self.get_bytes(url, false).await
    }

    async fn preview(&self, resource_path: &str) -> Result<Vec<u8>> {
        let url = Url::parse(&self.endpoints.preview_url(resource_path))?;
        self.get_bytes(url, true).await
    }
}

impl ReportApi for HttpClient {
    async fn excel_report(&self, request: &ReportRequest) -> Result<Vec<u8>> {
        let url = Url::parse(&self.endpoints.report_url(request))?;
        self.get_bytes(url, false).await
    }
}
