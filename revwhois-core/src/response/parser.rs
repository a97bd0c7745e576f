use serde_json::Value;
use tracing::debug;

use super::types::Response;
use crate::error::{ReverseWhoisError, Result};

/// Parse a JSON reply body into a [`Response`] page.
///
/// The body must be valid JSON with a `domainsCount` key at its root.
pub fn parse_response(raw: &str) -> Result<Response> {
    let parsed: Value = serde_json::from_str(raw)
        .map_err(|e| ReverseWhoisError::unparsable("Could not parse API response", Some(e)))?;

    let root = parsed
        .as_object()
        .filter(|values| values.contains_key("domainsCount"))
        .ok_or_else(|| {
            ReverseWhoisError::unparsable("Could not find the correct root element.", None)
        })?;

    let response = Response::from_object(root);
    debug!(
        domains_count = response.domains_count,
        page_size = response.domains_list.len(),
        has_next = response.has_next(),
        "Parsed response page"
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Domain;

    const RESPONSE_OK: &str = r#"{
        "nextPageSearchAfter": null,
        "domainsCount": 2,
        "domainsList": ["airbnb.app", "airbnbhost.app"]
    }"#;

    const RESPONSE_WITH_DATES: &str = r#"{
        "nextPageSearchAfter": 1612983163,
        "domainsCount": 2,
        "domainsList": [
            {
                "domainName": "airbnb.app",
                "audit": {
                    "createdDate": "2021-01-10T18:52:41+00:00",
                    "updatedDate": "2021-01-10T18:52:41+00:00"
                }
            },
            {
                "domainName": "airbnbhost.app",
                "audit": {
                    "createdDate": "2021-01-10T18:52:41+00:00",
                    "updatedDate": "2021-01-10T18:52:41+00:00"
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_name_only_listing() {
        let response =
            parse_response(r#"{"domainsCount":2,"nextPageSearchAfter":null,"domainsList":["a.com","b.com"]}"#)
                .unwrap();

        assert_eq!(response.domains_count, 2);
        assert!(!response.has_next());
        assert_eq!(
            response.domains_list,
            vec![Domain::name_only("a.com"), Domain::name_only("b.com")]
        );
    }

    #[test]
    fn test_parse_ok() {
        let response = parse_response(RESPONSE_OK).unwrap();
        assert_eq!(response.domains_count, 2);
        assert_eq!(response.domains_list[0].domain_name, "airbnb.app");
        assert_eq!(response.next_page_search_after, None);
    }

    #[test]
    fn test_parse_with_dates() {
        let response = parse_response(RESPONSE_WITH_DATES).unwrap();
        assert!(response.has_next());
        assert_eq!(response.next_page_search_after, Some(1_612_983_163));

        let domain = &response.domains_list[1];
        assert_eq!(domain.domain_name, "airbnbhost.app");
        assert_eq!(
            domain
                .audit_updated_date
                .unwrap()
                .format("%Y-%m-%dT%H:%M:%S%z")
                .to_string(),
            "2021-01-10T18:52:41+0000"
        );
    }

    #[test]
    fn test_invalid_json_is_unparsable() {
        let err = parse_response("<?xml version=\"1.0\"?><domains/>").unwrap_err();
        match err {
            ReverseWhoisError::UnparsableApiResponse { source, .. } => assert!(source.is_some()),
            other => panic!("Expected UnparsableApiResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_root_element() {
        for body in [r#"{"code": 403, "messages": "denied"}"#, "[1, 2]", "42"] {
            let err = parse_response(body).unwrap_err();
            match err {
                ReverseWhoisError::UnparsableApiResponse { source, message } => {
                    assert!(source.is_none());
                    assert_eq!(message, "Could not find the correct root element.");
                }
                other => panic!("Expected UnparsableApiResponse, got {:?}", other),
            }
        }
    }
}
