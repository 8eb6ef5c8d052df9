//! Request/response records and the session history

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// HTTP Method enum, in selector order (GET first, HEAD last)
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
}

impl HttpMethod {
    /// Every method, in the order the selector walks them
    pub const ALL: [HttpMethod; 6] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::DELETE,
        HttpMethod::PATCH,
        HttpMethod::HEAD,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::HEAD => "HEAD",
        }
    }

    /// Position in [`HttpMethod::ALL`]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    /// Case-insensitive lookup, used when seeding a draft from the command line
    pub fn parse(s: &str) -> Option<HttpMethod> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// One request header. Duplicate keys are kept in insertion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        HeaderEntry {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Headers with an empty key or value are never sent
    pub fn is_complete(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty()
    }
}

/// Immutable snapshot of the draft taken at submission time
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub id: Uuid,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<HeaderEntry>,
    pub params: BTreeMap<String, String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl RequestRecord {
    /// Stamp a fresh identifier and creation time onto the given request parts
    pub fn new(
        method: HttpMethod,
        url: impl Into<String>,
        headers: Vec<HeaderEntry>,
        params: BTreeMap<String, String>,
        body: impl Into<String>,
    ) -> Self {
        RequestRecord {
            id: Uuid::new_v4(),
            method,
            url: url.into(),
            headers,
            params,
            body: body.into(),
            created_at: Utc::now(),
        }
    }
}

/// Completed exchange, produced only by the request executor.
///
/// `headers` keeps a single value per name: when the server repeats a header
/// only the first value survives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub status_code: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub size: usize,
    #[serde(rename = "duration_ms", with = "duration_ms")]
    pub elapsed: Duration,
    pub completed_at: DateTime<Utc>,
}

impl ResponseRecord {
    /// Collapse a raw multi-valued header list, first occurrence wins
    pub fn collapse_headers<I>(raw: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut headers = BTreeMap::new();
        for (key, value) in raw {
            headers.entry(key).or_insert(value);
        }
        headers
    }
}

/// Serialization collaborator: human-readable text form of a record
pub trait DisplayText {
    fn to_display_text(&self) -> serde_json::Result<String>;
}

impl DisplayText for RequestRecord {
    fn to_display_text(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl DisplayText for ResponseRecord {
    fn to_display_text(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Append-only request history.
///
/// Records are shared with the executor behind `Arc`, so once appended they
/// cannot change. Growth is unbounded for the lifetime of the process.
#[derive(Clone, Debug, Default)]
pub struct History {
    records: Vec<Arc<RequestRecord>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Arc<RequestRecord>) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<RequestRecord>> {
        self.records.get(index)
    }

    pub fn last(&self) -> Option<&Arc<RequestRecord>> {
        self.records.last()
    }

    /// Cheap snapshot for the render state
    pub fn snapshot(&self) -> Vec<Arc<RequestRecord>> {
        self.records.clone()
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_order_and_parse() {
        assert_eq!(HttpMethod::ALL.first(), Some(&HttpMethod::GET));
        assert_eq!(HttpMethod::ALL.last(), Some(&HttpMethod::HEAD));
        assert_eq!(HttpMethod::PATCH.index(), 4);
        assert_eq!(HttpMethod::parse("delete"), Some(HttpMethod::DELETE));
        assert_eq!(HttpMethod::parse("TRACE"), None);
    }

    #[test]
    fn test_collapse_headers_first_value_wins() {
        let headers = ResponseRecord::collapse_headers(vec![
            ("set-cookie".to_string(), "a=1".to_string()),
            ("content-type".to_string(), "text/plain".to_string()),
            ("set-cookie".to_string(), "b=2".to_string()),
        ]);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["set-cookie"], "a=1");
    }

    #[test]
    fn test_history_preserves_insertion_order() {
        let mut history = History::new();
        let first = Arc::new(RequestRecord::new(
            HttpMethod::GET,
            "https://example.com/a",
            vec![],
            BTreeMap::new(),
            "",
        ));
        let second = Arc::new(RequestRecord::new(
            HttpMethod::POST,
            "https://example.com/b",
            vec![],
            BTreeMap::new(),
            "{}",
        ));
        history.push(first.clone());
        history.push(second.clone());

        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0).unwrap().id, first.id);
        assert_eq!(history.last().unwrap().id, second.id);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_response_display_text_uses_millis() {
        let response = ResponseRecord {
            status_code: 200,
            status_text: "200 OK".to_string(),
            headers: BTreeMap::new(),
            body: "[]".to_string(),
            size: 2,
            elapsed: Duration::from_millis(5),
            completed_at: Utc::now(),
        };
        let text = response.to_display_text().unwrap();
        assert!(text.contains("\"duration_ms\": 5"));
        assert!(text.contains("\"status_text\": \"200 OK\""));
    }
}
