//! Client-facing cursor of the transaction listing.
//!
//! The client echoes `next_page_params` back as a query value holding the JSON
//! object `{"pageKey": "<indexer cursor>"}`, usually percent-encoded once more
//! on top of the query-string encoding. The indexer cursor itself is never
//! inspected.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use utoipa::ToSchema;

use crate::upstream::Cursor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransactionsPageParams {
    #[serde(rename = "pageKey")]
    pub page_key: String,
}

impl TransactionsPageParams {
    #[must_use]
    pub fn from_cursor(cursor: &Cursor) -> Self {
        Self { page_key: cursor.as_str().to_string() }
    }

    /// Percent-encoded JSON for the `next_page_params` query parameter of the next request.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        let json = serde_json::json!({ "pageKey": self.page_key }).to_string();
        form_urlencoded::byte_serialize(json.as_bytes()).collect()
    }
}

/// Decodes a `next_page_params` query value into an indexer cursor.
///
/// Accepts the JSON as-is or percent-encoded. Anything unparseable, and an
/// empty `pageKey`, mean "first page".
#[must_use]
pub fn decode_page_cursor(raw: Option<&str>) -> Option<Cursor> {
    let raw = raw.map(str::trim).filter(|r| !r.is_empty())?;

    let params = serde_json::from_str::<TransactionsPageParams>(raw)
        .or_else(|_| serde_json::from_str(&percent_decode(raw)))
        .inspect_err(|e| tracing::debug!(error = %e, "ignoring unparseable page cursor"))
        .ok()?;

    Some(params.page_key).filter(|key| !key.is_empty()).map(Cursor)
}

/// Percent decoding in which `+` stays literal and `&`/`=` are data.
fn percent_decode(raw: &str) -> String {
    let escaped = raw.replace('+', "%2B").replace('&', "%26").replace('=', "%3D");
    form_urlencoded::parse(escaped.as_bytes())
        .next()
        .map(|(decoded, _)| decoded.into_owned())
        .unwrap_or_default()
}
