//! PostgREST profile store - the real backend adapter.
//!
//! Speaks the PostgREST dialect Supabase exposes over `/rest/v1`: equality
//! filters and ordering ride in the query string, single-row resolution is
//! negotiated with the `vnd.pgrst.object+json` accept header, and writes
//! ask for `return=minimal` since callers re-read through the resolution
//! path anyway. Row-level security errors come back as HTTP failures and
//! surface as `StoreError::Remote`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, Secret};

use crate::domain::foundation::UserId;
use crate::domain::profile::Profile;
use crate::ports::{ProfileQuery, ProfileStore, StoreCapabilities, StoreError};

/// Columns fetched for every profile read.
const SELECT_COLUMNS: &str = "id,email,full_name,role,is_member";

/// PostgREST resolves a single-object request with 406 when no row matches.
const NO_SINGLE_ROW: StatusCode = StatusCode::NOT_ACCEPTABLE;

pub struct PostgrestStore {
    http: reqwest::Client,
    table_url: String,
    api_key: Secret<String>,
}

impl PostgrestStore {
    /// Adapter over `{base_url}/rest/v1/{table}`.
    pub fn new(base_url: &str, api_key: Secret<String>, table: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            table_url: format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table),
            api_key,
        }
    }

    fn auth_headers(&self) -> HeaderMap {
        let key = self.api_key.expose_secret();
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(key) {
            headers.insert("apikey", value);
        }
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {key}")) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    fn read_params(query: &ProfileQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![("select", SELECT_COLUMNS.to_string())];
        if let Some(id) = &query.filter_id {
            params.push(("id", format!("eq.{id}")));
        }
        if query.order_by_full_name {
            // Nulls-first keeps nameless rows at the top of the roster.
            params.push(("order", "full_name.asc.nullsfirst".to_string()));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::remote(format!("{status}: {body}")))
    }
}

#[async_trait]
impl ProfileStore for PostgrestStore {
    fn capabilities(&self) -> StoreCapabilities {
        StoreCapabilities::FULL
    }

    async fn select(&self, query: &ProfileQuery) -> Result<Vec<Profile>, StoreError> {
        let response = self
            .http
            .get(&self.table_url)
            .headers(self.auth_headers())
            .query(&Self::read_params(query))
            .send()
            .await
            .map_err(|e| StoreError::remote(e.to_string()))?;

        Self::ensure_success(response)
            .await?
            .json::<Vec<Profile>>()
            .await
            .map_err(|e| StoreError::remote(format!("malformed row payload: {e}")))
    }

    async fn select_single(&self, id: &UserId) -> Result<Profile, StoreError> {
        let query = ProfileQuery::all().with_filter_id(id.clone());
        let response = self
            .http
            .get(&self.table_url)
            .headers(self.auth_headers())
            .header(ACCEPT, "application/vnd.pgrst.object+json")
            .query(&Self::read_params(&query))
            .send()
            .await
            .map_err(|e| StoreError::remote(e.to_string()))?;

        if response.status() == NO_SINGLE_ROW {
            return Err(StoreError::NotFound);
        }
        Self::ensure_success(response)
            .await?
            .json::<Profile>()
            .await
            .map_err(|e| StoreError::remote(format!("malformed row payload: {e}")))
    }

    async fn insert(&self, profile: &Profile) -> Result<(), StoreError> {
        let response = self
            .http
            .post(&self.table_url)
            .headers(self.auth_headers())
            .header("Prefer", "return=minimal")
            .json(profile)
            .send()
            .await
            .map_err(|e| StoreError::remote(e.to_string()))?;

        Self::ensure_success(response).await.map(|_| ())
    }

    async fn update_membership(&self, id: &UserId, is_member: bool) -> Result<(), StoreError> {
        let response = self
            .http
            .patch(&self.table_url)
            .headers(self.auth_headers())
            .header("Prefer", "return=minimal")
            .query(&[("id", format!("eq.{id}"))])
            .json(&serde_json::json!({ "is_member": is_member }))
            .send()
            .await
            .map_err(|e| StoreError::remote(e.to_string()))?;

        Self::ensure_success(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PostgrestStore {
        PostgrestStore::new(
            "https://example.supabase.co/",
            Secret::new("anon-key".to_string()),
            "profiles",
        )
    }

    #[test]
    fn table_url_joins_without_double_slash() {
        assert_eq!(store().table_url, "https://example.supabase.co/rest/v1/profiles");
    }

    #[test]
    fn read_params_cover_every_advertised_capability() {
        let query = ProfileQuery::all()
            .with_filter_id(UserId::new("user-1").unwrap())
            .with_name_order()
            .with_limit(50);

        let params = PostgrestStore::read_params(&query);
        assert_eq!(
            params,
            vec![
                ("select", SELECT_COLUMNS.to_string()),
                ("id", "eq.user-1".to_string()),
                ("order", "full_name.asc.nullsfirst".to_string()),
                ("limit", "50".to_string()),
            ]
        );
    }

    #[test]
    fn base_query_carries_only_the_column_list() {
        let params = PostgrestStore::read_params(&ProfileQuery::all());
        assert_eq!(params, vec![("select", SELECT_COLUMNS.to_string())]);
    }

    #[test]
    fn auth_headers_carry_key_and_bearer_token() {
        let headers = store().auth_headers();
        assert_eq!(headers.get("apikey").unwrap().to_str().unwrap(), "anon-key");
        assert_eq!(
            headers.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer anon-key"
        );
    }

    #[test]
    fn advertises_the_full_capability_surface() {
        assert_eq!(store().capabilities(), StoreCapabilities::FULL);
    }
}
