use std::time::Duration;

use anyhow::Context;
use reqwest::header::{ACCEPT, CACHE_CONTROL, EXPIRES, HeaderMap, HeaderValue, LOCATION, PRAGMA};
use serde_json::{Value, json};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::extract::SearchDomain;

/// Status and raw body of an upstream call, kept unparsed so handlers can
/// relay whatever the Content API produced.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

/// Client for the external travel Content API. Every request carries the
/// static `x-api-key` header; the key is attached once at construction.
pub struct ContentApi {
    client: reqwest::Client,
    base_url: String,
    poll_interval: Duration,
    max_poll_attempts: u32,
    // Distinct from the poll loop's own attempt budget.
    cancellation_timeout: Duration,
}

impl ContentApi {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&config.content_api_key)
                .context("CONTENT_API_KEY contains invalid header characters")?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.content_api_base.trim_end_matches('/').to_string(),
            poll_interval: config.poll_interval,
            max_poll_attempts: config.max_poll_attempts,
            cancellation_timeout: config.cancellation_timeout,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn max_poll_attempts(&self) -> u32 {
        self.max_poll_attempts
    }

    /// Submit a search creation request and return the `Location` header of
    /// the created resource (empty string when the header is absent).
    pub async fn create_search(&self, domain: &SearchDomain, body: &Value) -> Result<String> {
        let url = format!("{}/{}", self.base_url, domain.kind);
        info!("creating search at {url}");

        let resp = self.client.post(&url).json(body).send().await?;
        let status = resp.status();
        debug!("search creation response status: {status}");

        if !status.is_success() {
            let body = resp.text().await?;
            error!("search creation failed: {} - {body}", status.as_u16());
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let location = resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        debug!("Location header from search creation: {location}");
        Ok(location)
    }

    /// One status probe of the offers endpoint, with cache-busting headers so
    /// intermediaries never replay a stale 202.
    pub async fn offers_attempt(
        &self,
        domain: &SearchDomain,
        search_id: &str,
    ) -> Result<UpstreamResponse> {
        let url = format!("{}/{}/{}/offers", self.base_url, domain.kind, search_id);
        let resp = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-cache, no-store, must-revalidate")
            .header(PRAGMA, "no-cache")
            .header(EXPIRES, "0")
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(UpstreamResponse { status, body })
    }

    /// Places lookup by exact IATA code. Returns the upstream `items` array.
    pub async fn places_by_iata(&self, iata: &str) -> Result<Value> {
        let url = format!("{}/places", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("filter[iata][eq]", iata), ("page[limit]", "5")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = resp.json().await?;
        Ok(data.get("items").cloned().unwrap_or_else(|| json!([])))
    }

    /// Railway-station name lookup used by the suggestions endpoint.
    pub async fn station_suggestions(&self, name: &str) -> Result<Value> {
        let url = format!("{}/places", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("filter[name][like]", name),
                ("filter[type][eq]", "railway-station"),
                ("page[limit]", "5"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = resp.json().await?;
        Ok(data.get("items").cloned().unwrap_or_else(|| json!([])))
    }

    pub async fn create_booking(&self, payload: &Value) -> Result<UpstreamResponse> {
        let url = format!("{}/bookings", self.base_url);
        info!("proxying booking creation to {url}");
        let resp = self.client.post(&url).json(payload).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        debug!("booking creation response status: {status}");
        Ok(UpstreamResponse { status, body })
    }

    pub async fn request_cancellation(&self, payload: &Value) -> Result<UpstreamResponse> {
        let url = format!("{}/cancellations/request", self.base_url);
        info!("proxying cancellation request to {url}");
        let resp = self
            .client
            .post(&url)
            .timeout(self.cancellation_timeout)
            .json(payload)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(UpstreamResponse { status, body })
    }

    pub async fn confirm_cancellation(
        &self,
        booking_id: &str,
        payload: &Value,
    ) -> Result<UpstreamResponse> {
        let url = format!("{}/bookings/{booking_id}/confirm-cancellation", self.base_url);
        info!("proxying cancellation confirmation to {url}");
        let resp = self.client.post(&url).json(payload).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(UpstreamResponse { status, body })
    }
}
