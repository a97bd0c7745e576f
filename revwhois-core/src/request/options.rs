use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ReverseWhoisError;
use crate::fields::Field;
use crate::validation;

/// Preview returns counts and a sample; purchase returns the billed listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Preview,
    Purchase,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Preview => "preview",
            Mode::Purchase => "purchase",
        }
    }
}

/// Which WHOIS snapshot to search: live records or historic ones as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Current,
    Historic,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Current => "current",
            SearchType::Historic => "historic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Xml => "xml",
        }
    }
}

macro_rules! impl_wire_enum {
    ($ty:ty, $validate:path) => {
        impl FromStr for $ty {
            type Err = ReverseWhoisError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $validate(s)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_wire_enum!(Mode, validation::validate_mode);
impl_wire_enum!(SearchType, validation::validate_search_type);
impl_wire_enum!(ResponseFormat, validation::validate_response_format);

/// Keyword search: domains whose records contain every `include` term and
/// none of the `exclude` terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicTerms {
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl BasicTerms {
    pub fn new<I, S>(include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: Vec::new(),
        }
    }

    pub fn exclude<I, S>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = exclude.into_iter().map(Into::into).collect();
        self
    }
}

/// A term matched against one specific record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedTerm {
    pub field: Field,
    pub term: String,
}

impl AdvancedTerm {
    pub fn new(field: Field, term: impl Into<String>) -> Self {
        Self {
            field,
            term: term.into(),
        }
    }
}

/// Every option a search accepts. `None` means "not supplied"; defaults are
/// filled in by [`validation::validate_query`], so an explicit value equal to
/// the default is still distinguishable here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub basic_terms: Option<BasicTerms>,
    pub advanced_terms: Option<Vec<AdvancedTerm>>,
    pub mode: Option<Mode>,
    pub search_type: Option<SearchType>,
    pub punycode: Option<bool>,
    pub include_audit_dates: Option<bool>,
    pub response_format: Option<ResponseFormat>,
    pub search_after: Option<u64>,
    pub created_date_from: Option<NaiveDate>,
    pub created_date_to: Option<NaiveDate>,
    pub updated_date_from: Option<NaiveDate>,
    pub updated_date_to: Option<NaiveDate>,
    pub expired_date_from: Option<NaiveDate>,
    pub expired_date_to: Option<NaiveDate>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn basic(terms: BasicTerms) -> Self {
        Self::new().with_basic_terms(terms)
    }

    pub fn advanced(terms: Vec<AdvancedTerm>) -> Self {
        Self::new().with_advanced_terms(terms)
    }

    pub fn with_basic_terms(mut self, terms: BasicTerms) -> Self {
        self.basic_terms = Some(terms);
        self
    }

    pub fn with_advanced_terms(mut self, terms: Vec<AdvancedTerm>) -> Self {
        self.advanced_terms = Some(terms);
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = Some(search_type);
        self
    }

    pub fn with_punycode(mut self, punycode: bool) -> Self {
        self.punycode = Some(punycode);
        self
    }

    pub fn with_include_audit_dates(mut self, include: bool) -> Self {
        self.include_audit_dates = Some(include);
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    pub fn with_search_after(mut self, search_after: u64) -> Self {
        self.search_after = Some(search_after);
        self
    }

    pub fn with_created_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.created_date_from = from;
        self.created_date_to = to;
        self
    }

    pub fn with_updated_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.updated_date_from = from;
        self.updated_date_to = to;
        self
    }

    pub fn with_expired_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.expired_date_from = from;
        self.expired_date_to = to;
        self
    }
}
