//! Generic CRUD client over one resource endpoint.
//!
//! # Design
//! `ResourceClient<T>` turns the logical verb set (`list`, `get`,
//! `create`, `update`, `delete`) into transport calls against a fixed
//! endpoint path. Concrete resources hold one by composition and layer
//! typed constructors on top, so URL building and response decoding live
//! in exactly one place.
//!
//! List endpoints may answer with a bare JSON array or a pagination
//! envelope; `ListResponse` models both shapes and never guesses which
//! one the server chose. `into_records()` is the single normalization
//! point used by every natural-key helper.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{HttpMethod, Payload, Transport};

/// Pagination envelope returned by list endpoints that paginate.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Total record count across all pages.
    pub count: u64,
    /// Opaque continuation URL, absent on the last page.
    pub next: Option<String>,
    /// Opaque continuation URL, absent on the first page.
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// The two shapes a list endpoint may produce.
///
/// Deserialized untagged: an envelope object matches `Paged`, a bare
/// array matches `Flat`. Callers who want the envelope metadata match on
/// the variant; everyone else calls [`ListResponse::into_records`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paged(Page<T>),
    Flat(Vec<T>),
}

impl<T> ListResponse<T> {
    /// Collapse either shape into the plain record sequence.
    pub fn into_records(self) -> Vec<T> {
        match self {
            ListResponse::Paged(page) => page.results,
            ListResponse::Flat(records) => records,
        }
    }
}

/// Query parameters for `list`: pagination plus arbitrary field filters.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    page: Option<u32>,
    page_size: Option<u32>,
    filters: Vec<(String, String)>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Add a server-side filter, e.g. `filter("email", "ana@example.com")`.
    pub fn filter(mut self, key: &str, value: impl ToString) -> Self {
        self.filters.push((key.to_string(), value.to_string()));
        self
    }

    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = self.filters.clone();
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            query.push(("page_size".to_string(), page_size.to_string()));
        }
        query
    }
}

/// Generic CRUD surface for one endpoint, parameterized by record type.
pub struct ResourceClient<T> {
    transport: Arc<Transport>,
    base_url: String,
    endpoint: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> ResourceClient<T> {
    pub fn new(transport: Arc<Transport>, base_url: &str, endpoint: &'static str) -> Self {
        Self {
            transport,
            base_url: format!("{}/", base_url.trim_end_matches('/')),
            endpoint,
            _record: PhantomData,
        }
    }

    /// Collection URL, or the record URL when `id` is given. Every
    /// segment is trailing-slash terminated, whatever the configured base
    /// looked like.
    pub fn url(&self, id: Option<u64>) -> String {
        match id {
            Some(id) => format!("{}{}/{id}/", self.base_url, self.endpoint),
            None => format!("{}{}/", self.base_url, self.endpoint),
        }
    }

    /// Fetch the collection in whatever shape the server answers with.
    pub fn list(&self, params: &ListParams) -> Result<ListResponse<T>, ApiError> {
        let payload =
            self.transport
                .execute(HttpMethod::Get, &self.url(None), &params.to_query(), None)?;
        decode(payload)
    }

    pub fn get(&self, id: u64) -> Result<T, ApiError> {
        let payload = self
            .transport
            .execute(HttpMethod::Get, &self.url(Some(id)), &[], None)?;
        decode(payload)
    }

    pub fn create<B: Serialize>(&self, data: &B) -> Result<T, ApiError> {
        let body =
            serde_json::to_string(data).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let payload =
            self.transport
                .execute(HttpMethod::Post, &self.url(None), &[], Some(&body))?;
        decode(payload)
    }

    /// Partial update: only the fields present in `data` change
    /// server-side.
    pub fn update<B: Serialize>(&self, id: u64, data: &B) -> Result<T, ApiError> {
        let body =
            serde_json::to_string(data).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let payload =
            self.transport
                .execute(HttpMethod::Patch, &self.url(Some(id)), &[], Some(&body))?;
        decode(payload)
    }

    /// True once the server confirms removal with 204.
    pub fn delete(&self, id: u64) -> Result<bool, ApiError> {
        self.transport
            .execute(HttpMethod::Delete, &self.url(Some(id)), &[], None)?;
        Ok(true)
    }
}

fn decode<D: DeserializeOwned>(payload: Payload) -> Result<D, ApiError> {
    match payload {
        Payload::Json(value) => {
            serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
        }
        Payload::Empty => Err(ApiError::Deserialization(
            "expected a body, got 204 No Content".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Rec {
        id: u64,
    }

    fn client(base: &str) -> ResourceClient<Rec> {
        ResourceClient::new(Arc::new(Transport::new(None)), base, "clients")
    }

    #[test]
    fn urls_are_stable_with_and_without_trailing_slash() {
        for base in ["http://h/api/v1", "http://h/api/v1/"] {
            let c = client(base);
            assert_eq!(c.url(None), "http://h/api/v1/clients/");
            assert_eq!(c.url(Some(7)), "http://h/api/v1/clients/7/");
        }
    }

    #[test]
    fn list_params_collect_pagination_and_filters() {
        let params = ListParams::new().page(2).page_size(50).filter("email", "a@b.c");
        let query = params.to_query();
        assert!(query.contains(&("page".to_string(), "2".to_string())));
        assert!(query.contains(&("page_size".to_string(), "50".to_string())));
        assert!(query.contains(&("email".to_string(), "a@b.c".to_string())));
    }

    #[test]
    fn empty_params_produce_no_query() {
        assert!(ListParams::new().to_query().is_empty());
    }

    #[test]
    fn flat_and_paged_shapes_normalize_to_the_same_records() {
        let flat: ListResponse<Rec> = serde_json::from_str(r#"[{"id":1}]"#).unwrap();
        let paged: ListResponse<Rec> = serde_json::from_str(
            r#"{"count":1,"next":null,"previous":null,"results":[{"id":1}]}"#,
        )
        .unwrap();
        assert!(matches!(flat, ListResponse::Flat(_)));
        assert!(matches!(paged, ListResponse::Paged(_)));
        assert_eq!(flat.into_records(), vec![Rec { id: 1 }]);
        assert_eq!(paged.into_records(), vec![Rec { id: 1 }]);
    }

    #[test]
    fn envelope_metadata_is_preserved() {
        let paged: ListResponse<Rec> = serde_json::from_str(
            r#"{"count":12,"next":"http://h/api/v1/clients/?page=2","previous":null,"results":[]}"#,
        )
        .unwrap();
        match paged {
            ListResponse::Paged(page) => {
                assert_eq!(page.count, 12);
                assert_eq!(page.next.as_deref(), Some("http://h/api/v1/clients/?page=2"));
                assert!(page.previous.is_none());
            }
            ListResponse::Flat(_) => panic!("expected an envelope"),
        }
    }
}
