use std::fmt;

use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static AUDIT_DATETIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}[+-]\d{2}:\d{2}$")
        .expect("audit datetime pattern is valid")
});

/// A domain from a result listing. Audit dates are only present when the
/// query asked for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub domain_name: String,
    pub audit_created_date: Option<DateTime<FixedOffset>>,
    pub audit_updated_date: Option<DateTime<FixedOffset>>,
}

impl Domain {
    /// A listing entry that is just the bare name.
    pub fn name_only(name: impl Into<String>) -> Self {
        Self {
            domain_name: name.into(),
            audit_created_date: None,
            audit_updated_date: None,
        }
    }

    /// A listing entry of the form
    /// `{"domainName": ..., "audit": {"createdDate": ..., "updatedDate": ...}}`.
    pub fn from_object(values: &Map<String, Value>) -> Self {
        let audit = values.get("audit").and_then(Value::as_object);

        Self {
            domain_name: string_value(values, "domainName"),
            audit_created_date: audit.and_then(|a| datetime_value(a, "createdDate")),
            audit_updated_date: audit.and_then(|a| datetime_value(a, "updatedDate")),
        }
    }

    /// Dispatch on the entry shape. Anything that is neither a string nor an
    /// object yields a domain with an empty name.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(name) => Self::name_only(name.as_str()),
            Value::Object(values) => Self::from_object(values),
            _ => Self::name_only(""),
        }
    }
}

/// One page of reverse WHOIS results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub domains_count: u64,
    pub next_page_search_after: Option<u64>,
    pub domains_list: Vec<Domain>,
}

impl Response {
    pub fn from_object(values: &Map<String, Value>) -> Self {
        let domains_list = match values.get("domainsList") {
            Some(Value::Array(items)) => items.iter().map(Domain::from_value).collect(),
            _ => Vec::new(),
        };

        Self {
            domains_count: uint_value(values, "domainsCount").unwrap_or(0),
            next_page_search_after: uint_value(values, "nextPageSearchAfter"),
            domains_list,
        }
    }

    /// Whether the service handed back a cursor for a further page.
    pub fn has_next(&self) -> bool {
        matches!(self.next_page_search_after, Some(cursor) if cursor != 0)
    }
}

/// An error reported in the body of an API reply,
/// e.g. `{"code": 403, "messages": "Access restricted..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub code: i64,
    pub message: String,
}

impl ErrorMessage {
    pub fn from_object(values: &Map<String, Value>) -> Self {
        Self {
            code: int_value(values, "code").unwrap_or(0),
            message: string_value(values, "messages"),
        }
    }

    /// Recognise an error object in a raw reply body. Listings are never
    /// mistaken for errors.
    pub fn from_body(body: &str) -> Option<Self> {
        if body.contains("\"domainsCount\"") {
            return None;
        }
        let value: Value = serde_json::from_str(body).ok()?;
        let values = value.as_object()?;
        if values.contains_key("domainsCount") {
            return None;
        }
        if values.contains_key("code") || values.contains_key("messages") {
            Some(Self::from_object(values))
        } else {
            None
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

fn string_value(values: &Map<String, Value>, key: &str) -> String {
    match values.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | Some(Value::Bool(false)) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Integer field, tolerating numeric strings. Null, `false` and missing
/// keys are absent.
fn int_value(values: &Map<String, Value>, key: &str) -> Option<i64> {
    match values.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(true) => Some(1),
        _ => None,
    }
}

/// Unsigned counterpart of [`int_value`]; negative values are absent.
fn uint_value(values: &Map<String, Value>, key: &str) -> Option<u64> {
    match values.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(true) => Some(1),
        _ => None,
    }
}

/// Audit timestamps must be exactly `YYYY-MM-DDTHH:MM:SS±HH:MM`; any other
/// shape is treated as absent.
fn datetime_value(values: &Map<String, Value>, key: &str) -> Option<DateTime<FixedOffset>> {
    let raw = values.get(key)?.as_str()?;
    if !AUDIT_DATETIME_RE.is_match(raw) {
        return None;
    }
    DateTime::parse_from_rfc3339(raw).ok()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_domain_from_string() {
        let domain = Domain::from_value(&json!("airbnb.app"));
        assert_eq!(domain, Domain::name_only("airbnb.app"));
        assert!(domain.audit_created_date.is_none());
    }

    #[test]
    fn test_domain_with_audit_dates() {
        let domain = Domain::from_value(&json!({
            "domainName": "airbnbhost.app",
            "audit": {
                "createdDate": "2021-01-10T18:52:41+00:00",
                "updatedDate": "2021-02-03T01:02:03-05:30"
            }
        }));

        assert_eq!(domain.domain_name, "airbnbhost.app");
        let created = domain.audit_created_date.unwrap();
        assert_eq!(created, Utc.with_ymd_and_hms(2021, 1, 10, 18, 52, 41).unwrap());
        assert_eq!(created.offset().local_minus_utc(), 0);

        let updated = domain.audit_updated_date.unwrap();
        assert_eq!(updated.offset().local_minus_utc(), -(5 * 3600 + 30 * 60));
        assert_eq!(updated.format("%Y-%m-%dT%H:%M:%S%z").to_string(), "2021-02-03T01:02:03-0530");
    }

    #[test]
    fn test_domain_rejects_loose_datetimes() {
        let domain = Domain::from_value(&json!({
            "domainName": "example.com",
            "audit": {
                "createdDate": "2021-01-10 18:52:41 UTC",
                "updatedDate": "2021-01-10T18:52:41Z"
            }
        }));
        assert!(domain.audit_created_date.is_none());
        assert!(domain.audit_updated_date.is_none());
    }

    #[test]
    fn test_domain_without_audit_block() {
        let domain = Domain::from_value(&json!({"domainName": "example.com"}));
        assert_eq!(domain, Domain::name_only("example.com"));
    }

    #[test]
    fn test_has_next() {
        let mut response = Response {
            domains_count: 0,
            next_page_search_after: None,
            domains_list: Vec::new(),
        };
        assert!(!response.has_next());

        response.next_page_search_after = Some(0);
        assert!(!response.has_next());

        response.next_page_search_after = Some(1_613_049_577);
        assert!(response.has_next());
    }

    #[test]
    fn test_response_lenient_integers() {
        let response = Response::from_object(&object(json!({
            "domainsCount": "12",
            "nextPageSearchAfter": 99,
            "domainsList": "not a list"
        })));
        assert_eq!(response.domains_count, 12);
        assert_eq!(response.next_page_search_after, Some(99));
        assert!(response.domains_list.is_empty());
    }

    #[test]
    fn test_response_cursor_keeps_full_u64_range() {
        let value: Value = serde_json::from_str(
            r#"{"domainsCount": 1, "nextPageSearchAfter": 18446744073709551615, "domainsList": []}"#,
        )
        .unwrap();
        let response = Response::from_object(value.as_object().unwrap());
        assert_eq!(response.next_page_search_after, Some(u64::MAX));
        assert!(response.has_next());

        let response = Response::from_object(&object(json!({
            "domainsCount": -3,
            "nextPageSearchAfter": -1
        })));
        assert_eq!(response.domains_count, 0);
        assert_eq!(response.next_page_search_after, None);
    }

    #[test]
    fn test_error_message() {
        let error = ErrorMessage::from_object(&object(json!({
            "code": 403,
            "messages": "Access restricted. Check credits balance or enter the correct API key."
        })));
        assert_eq!(error.code, 403);
        assert_eq!(
            error.message,
            "Access restricted. Check credits balance or enter the correct API key."
        );
    }

    #[test]
    fn test_error_message_defaults() {
        let error = ErrorMessage::from_object(&Map::new());
        assert_eq!(error, ErrorMessage::default());
        assert_eq!(error.code, 0);
        assert_eq!(error.message, "");
    }

    #[test]
    fn test_error_message_from_body() {
        assert!(ErrorMessage::from_body(r#"{"code": 400, "messages": "bad"}"#).is_some());
        assert!(ErrorMessage::from_body(r#"{"domainsCount": 0, "code": 1}"#).is_none());
        assert!(ErrorMessage::from_body("<?xml version=\"1.0\"?>").is_none());
    }
}
