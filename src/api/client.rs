//! HTTP client for the PokeAPI
//!
//! This module wraps reqwest with the cache-before-fetch flow used by the
//! commands: location listings and area lookups go through the response
//! cache keyed by request URL, while pokemon lookups always hit the network.

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::cache::Cache;

use super::{LocationArea, LocationAreaPage, Pokemon};

/// Base URL for the PokeAPI
const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Errors that can occur when fetching data from the PokeAPI
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Server answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    BadStatus {
        /// The URL that was requested
        url: String,
        /// The status code received
        status: StatusCode,
    },
}

/// Client for fetching PokeAPI data, with response caching
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    cache: Cache,
}

impl PokeApiClient {
    /// Create a new client backed by the given response cache
    pub fn new(cache: Cache) -> Self {
        Self {
            client: Client::new(),
            cache,
        }
    }

    /// Create a new client with a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(client: Client, cache: Cache) -> Self {
        Self { client, cache }
    }

    /// Returns the URL of the first location-area listing page
    pub fn first_location_page_url() -> String {
        format!("{}/location-area/?offset=0&limit=20", POKEAPI_BASE_URL)
    }

    /// Performs a GET request and returns the raw response body.
    ///
    /// Statuses above 299 are treated as errors even when the body parses.
    ///
    /// # Arguments
    /// * `url` - The full URL to request
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - The response body bytes
    /// * `Err(ApiError)` - If the request fails or the status is non-success
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.as_u16() > 299 {
            return Err(ApiError::BadStatus {
                url: url.to_string(),
                status,
            });
        }

        Ok(body.to_vec())
    }

    /// Returns the cached body for `url`, fetching and caching it on a miss.
    ///
    /// The full request URL is the cache key, so distinct resources never
    /// collide. A hit skips the network entirely; a miss populates the cache
    /// with the freshly fetched bytes.
    pub async fn fetch_bytes_cached(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        if let Some(bytes) = self.cache.get(url) {
            return Ok(bytes);
        }

        let bytes = self.fetch_bytes(url).await?;
        self.cache.add(url, bytes.clone());
        Ok(bytes)
    }

    /// Fetch one page of the location-area listing (cached)
    ///
    /// # Arguments
    /// * `url` - Page URL, usually taken from a previous page's
    ///   `next`/`previous` field or [`Self::first_location_page_url`]
    pub async fn fetch_location_page(&self, url: &str) -> Result<LocationAreaPage, ApiError> {
        let bytes = self.fetch_bytes_cached(url).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Fetch a single location area by name (cached)
    pub async fn fetch_location_area(&self, name: &str) -> Result<LocationArea, ApiError> {
        let url = format!("{}/location-area/{}/", POKEAPI_BASE_URL, name);
        let bytes = self.fetch_bytes_cached(&url).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Fetch a pokemon by name.
    ///
    /// Deliberately uncached: every catch attempt refetches.
    pub async fn fetch_pokemon(&self, name: &str) -> Result<Pokemon, ApiError> {
        let url = format!("{}/pokemon/{}", POKEAPI_BASE_URL, name);
        let bytes = self.fetch_bytes(&url).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
