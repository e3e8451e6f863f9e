// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! REST client for the hosted backend's table API.
//!
//! Handles:
//! - Filtered selects with embedded relations
//! - Single-row inserts returning the stored row
//! - Filtered updates returning the changed rows
//! - Per-user bearer scoping for row-level security

use crate::db::query::{Filter, Query};
use crate::error::AppError;
use serde_json::Value;

/// Table API client.
#[derive(Clone)]
pub struct PostgrestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    bearer: Option<String>,
}

impl PostgrestClient {
    /// Create a client for `{project_url}/rest/v1` authenticated with the anon key.
    pub fn new(project_url: &str, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            api_key,
            bearer: None,
        }
    }

    /// Copy of this client that acts as the signed-in user.
    pub fn with_bearer(&self, access_token: &str) -> Self {
        Self {
            bearer: Some(access_token.to_string()),
            ..self.clone()
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer.as_deref().unwrap_or(&self.api_key))
    }

    /// Run a select and return the raw rows.
    pub async fn select(&self, query: &Query) -> Result<Vec<Value>, AppError> {
        let response = self
            .authorized(self.http.get(self.table_url(&query.table)))
            .query(&query.to_params())
            .send()
            .await
            .map_err(|e| AppError::Backend(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Insert one row and return it as stored.
    pub async fn insert(&self, table: &str, row: &Value) -> Result<Value, AppError> {
        let response = self
            .authorized(self.http.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await
            .map_err(|e| AppError::Backend(e.to_string()))?;

        let rows: Vec<Value> = self.check_response_json(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::Backend(format!("Insert into {} returned no row", table)))
    }

    /// Patch every row matching `filters` and return the updated rows.
    pub async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: &Value,
    ) -> Result<Vec<Value>, AppError> {
        let params: Vec<(String, String)> = filters.iter().map(Filter::to_param).collect();

        let response = self
            .authorized(self.http.patch(self.table_url(table)))
            .header("Prefer", "return=representation")
            .query(&params)
            .json(patch)
            .send()
            .await
            .map_err(|e| AppError::Backend(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> serde::Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 401 {
                tracing::warn!("Backend rejected credentials (401)");
            }

            return Err(AppError::Backend(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Backend(format!("JSON parse error: {}", e)))
    }
}
