//! Validation and normalization of search options.
//!
//! Every check here runs before a request is built, so a failure never
//! reaches the network.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::{ReverseWhoisError, Result};
use crate::fields::Field;
use crate::request::{AdvancedTerm, BasicTerms, Mode, QueryOptions, ResponseFormat, SearchType};

pub const MAX_INCLUDE_TERMS: usize = 4;
pub const MAX_EXCLUDE_TERMS: usize = 4;
pub const MAX_ADVANCED_TERMS: usize = 4;
pub const MIN_TERM_LENGTH: usize = 2;

static API_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^at_[a-z0-9]{29}$").expect("API key pattern is valid"));

/// Search terms after validation. Exactly one form is ever sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerms {
    Basic(BasicTerms),
    Advanced(Vec<AdvancedTerm>),
}

/// A fully validated query with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuery {
    pub terms: SearchTerms,
    pub mode: Mode,
    pub search_type: SearchType,
    pub punycode: bool,
    pub include_audit_dates: bool,
    pub response_format: ResponseFormat,
    pub search_after: Option<u64>,
    pub created_date_from: Option<String>,
    pub created_date_to: Option<String>,
    pub updated_date_from: Option<String>,
    pub updated_date_to: Option<String>,
    pub expired_date_from: Option<String>,
    pub expired_date_to: Option<String>,
}

/// Check an API key against the `at_` + 29 alphanumerics format.
pub fn validate_api_key(api_key: &str) -> Result<String> {
    if api_key.is_empty() {
        return Err(ReverseWhoisError::EmptyApiKey);
    }
    if API_KEY_RE.is_match(api_key) {
        Ok(api_key.to_string())
    } else {
        Err(ReverseWhoisError::parameter("Invalid API key format."))
    }
}

/// Drop empty entries and enforce 1 to 4 include and 0 to 4 exclude terms.
/// Order is preserved.
pub fn validate_basic_terms(terms: &BasicTerms) -> Result<BasicTerms> {
    let include = non_empty(&terms.include);
    let exclude = non_empty(&terms.exclude);

    if include.is_empty() || include.len() > MAX_INCLUDE_TERMS {
        return Err(ReverseWhoisError::parameter(
            "Include terms list must include from 1 to 4 terms.",
        ));
    }
    if exclude.len() > MAX_EXCLUDE_TERMS {
        return Err(ReverseWhoisError::parameter(
            "Exclude terms list must include from 0 to 4 terms.",
        ));
    }

    Ok(BasicTerms { include, exclude })
}

fn non_empty(terms: &[String]) -> Vec<String> {
    terms.iter().filter(|t| !t.is_empty()).cloned().collect()
}

pub fn validate_advanced_terms(terms: &[AdvancedTerm]) -> Result<Vec<AdvancedTerm>> {
    if terms.is_empty() || terms.len() > MAX_ADVANCED_TERMS {
        return Err(ReverseWhoisError::parameter(
            "Terms list must include from 1 to 4 items.",
        ));
    }
    for item in terms {
        if item.term.chars().count() < MIN_TERM_LENGTH {
            return Err(ReverseWhoisError::parameter("Term should be non-empty string."));
        }
    }
    Ok(terms.to_vec())
}

/// Build basic terms from loosely typed JSON such as
/// `{"include": ["medicine", 42], "exclude": ["blog"]}`.
///
/// Scalars are stringified; `null`, `false` and empty strings are dropped.
pub fn basic_terms_from_json(value: &Value) -> Result<BasicTerms> {
    let shape_error = || ReverseWhoisError::parameter("Expected a dict with 2 lists of strings.");

    let object = match value {
        Value::Null => return Err(ReverseWhoisError::parameter("Terms list cannot be None.")),
        Value::Object(object) => object,
        _ => return Err(shape_error()),
    };

    let list = |key: &str| -> Result<Vec<String>> {
        match object.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::Null | Value::Bool(false) => None,
                    Value::String(s) if s.is_empty() => None,
                    Value::String(s) => Some(Ok(s.clone())),
                    Value::Bool(true) | Value::Number(_) => Some(Ok(item.to_string())),
                    _ => Some(Err(shape_error())),
                })
                .collect(),
            Some(_) => Err(shape_error()),
        }
    };

    let terms = BasicTerms {
        include: list("include")?,
        exclude: list("exclude")?,
    };
    validate_basic_terms(&terms)
}

/// Build advanced terms from JSON such as
/// `[{"field": "domainName", "term": "facebook.*"}]`.
pub fn advanced_terms_from_json(value: &Value) -> Result<Vec<AdvancedTerm>> {
    let items = match value {
        Value::Null => return Err(ReverseWhoisError::parameter("Terms list cannot be None.")),
        Value::Array(items) => items,
        _ => {
            return Err(ReverseWhoisError::parameter(
                "Expected a list of pairs field <-> term.",
            ))
        }
    };

    let mut terms = Vec::with_capacity(items.len());
    for item in items {
        let (Some(field), Some(term)) = (item.get("field"), item.get("term")) else {
            return Err(ReverseWhoisError::parameter(
                "Invalid advanced search terms format.",
            ));
        };
        let field: Field = field
            .as_str()
            .ok_or_else(|| ReverseWhoisError::parameter("Unknown field name."))?
            .parse()?;
        let term = term
            .as_str()
            .ok_or_else(|| ReverseWhoisError::parameter("Term should be non-empty string."))?;
        terms.push(AdvancedTerm::new(field, term));
    }

    validate_advanced_terms(&terms)
}

/// Exactly one of the two term forms must be supplied and valid.
pub fn validate_search_terms(
    basic: Option<&BasicTerms>,
    advanced: Option<&[AdvancedTerm]>,
) -> Result<SearchTerms> {
    match (basic, advanced) {
        (Some(_), Some(_)) => Err(ReverseWhoisError::parameter(
            "basic_terms and advanced_terms are mutually exclusive",
        )),
        (Some(basic), None) => validate_basic_terms(basic).map(SearchTerms::Basic),
        (None, Some(advanced)) => validate_advanced_terms(advanced).map(SearchTerms::Advanced),
        (None, None) => Err(ReverseWhoisError::parameter(
            "one of basic_terms or advanced_terms is required",
        )),
    }
}

pub fn validate_response_format(value: &str) -> Result<ResponseFormat> {
    match value.to_lowercase().as_str() {
        "json" => Ok(ResponseFormat::Json),
        "xml" => Ok(ResponseFormat::Xml),
        _ => Err(ReverseWhoisError::parameter("Response format must be json or xml")),
    }
}

pub fn validate_search_type(value: &str) -> Result<SearchType> {
    match value.to_lowercase().as_str() {
        "current" => Ok(SearchType::Current),
        "historic" => Ok(SearchType::Historic),
        _ => Err(ReverseWhoisError::parameter("Search type must be current or historic")),
    }
}

pub fn validate_mode(value: &str) -> Result<Mode> {
    match value.to_lowercase().as_str() {
        "preview" => Ok(Mode::Preview),
        "purchase" => Ok(Mode::Purchase),
        _ => Err(ReverseWhoisError::parameter("Mode must be preview or purchase")),
    }
}

pub fn validate_search_after(value: Option<u64>) -> Result<Option<u64>> {
    match value {
        Some(0) => Err(ReverseWhoisError::parameter(
            "Search after parameter value must be an integer greater than zero or None",
        )),
        other => Ok(other),
    }
}

/// ISO calendar date (`YYYY-MM-DD`) for a date bound, absent stays absent.
pub fn format_date(value: Option<NaiveDate>) -> Option<String> {
    value.map(|date| date.format("%Y-%m-%d").to_string())
}

/// Validate every option of a query at once and apply defaults.
pub fn validate_query(options: &QueryOptions) -> Result<ValidatedQuery> {
    let terms = validate_search_terms(
        options.basic_terms.as_ref(),
        options.advanced_terms.as_deref(),
    )?;

    Ok(ValidatedQuery {
        terms,
        mode: options.mode.unwrap_or_default(),
        search_type: options.search_type.unwrap_or_default(),
        punycode: options.punycode.unwrap_or(true),
        include_audit_dates: options.include_audit_dates.unwrap_or(false),
        response_format: options.response_format.unwrap_or_default(),
        search_after: validate_search_after(options.search_after)?,
        created_date_from: format_date(options.created_date_from),
        created_date_to: format_date(options.created_date_to),
        updated_date_from: format_date(options.updated_date_from),
        updated_date_to: format_date(options.updated_date_to),
        expired_date_from: format_date(options.expired_date_from),
        expired_date_to: format_date(options.expired_date_to),
    })
}
