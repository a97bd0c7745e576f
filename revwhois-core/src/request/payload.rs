use serde::Serialize;

use super::{AdvancedTerm, BasicTerms, Mode, ResponseFormat, SearchType};
use crate::validation::{SearchTerms, ValidatedQuery};

/// The JSON body POSTed to the API. Absent values are skipped on
/// serialization, so the service never sees a null-valued key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    api_key: String,
    mode: Mode,
    punycode: bool,
    search_type: SearchType,
    include_audit_dates: bool,
    response_format: ResponseFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_date_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_date_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expired_date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expired_date_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_after: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    basic_search_terms: Option<BasicTerms>,
    #[serde(skip_serializing_if = "Option::is_none")]
    advanced_search_terms: Option<Vec<AdvancedTerm>>,
}

impl RequestPayload {
    pub fn new(api_key: &str, query: ValidatedQuery) -> Self {
        let (basic_search_terms, advanced_search_terms) = match query.terms {
            SearchTerms::Basic(terms) => (Some(terms), None),
            SearchTerms::Advanced(terms) => (None, Some(terms)),
        };

        Self {
            api_key: api_key.to_string(),
            mode: query.mode,
            punycode: query.punycode,
            search_type: query.search_type,
            include_audit_dates: query.include_audit_dates,
            response_format: query.response_format,
            created_date_from: query.created_date_from,
            created_date_to: query.created_date_to,
            updated_date_from: query.updated_date_from,
            updated_date_to: query.updated_date_to,
            expired_date_from: query.expired_date_from,
            expired_date_to: query.expired_date_to,
            search_after: query.search_after,
            basic_search_terms,
            advanced_search_terms,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn response_format(&self) -> ResponseFormat {
        self.response_format
    }

    pub fn search_after(&self) -> Option<u64> {
        self.search_after
    }
}
