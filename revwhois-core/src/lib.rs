//! Client library for the reverse WHOIS API.
//!
//! Searches are described with [`QueryOptions`], validated locally, sent
//! through a [`Transport`] and parsed into [`Response`] pages.
//!
//! ```no_run
//! use revwhois_core::{BasicTerms, Client, QueryOptions};
//!
//! let client = Client::new("at_00000000000000000000000000000")?;
//! let options = QueryOptions::basic(BasicTerms::new(["medicine"]).exclude(["blog"]));
//!
//! for page in client.iterate_pages(&options).take(3) {
//!     for domain in page?.domains_list {
//!         println!("{}", domain.domain_name);
//!     }
//! }
//! # Ok::<(), revwhois_core::ReverseWhoisError>(())
//! ```

pub mod client;
pub mod colors;
pub mod error;
pub mod fields;
pub mod output;
pub mod pages;
pub mod request;
pub mod response;
pub mod transport;
pub mod validation;

pub use client::{Client, ClientBuilder};
pub use error::{Result, ReverseWhoisError};
pub use fields::Field;
pub use pages::Pages;
pub use request::{AdvancedTerm, BasicTerms, Mode, QueryOptions, RequestPayload, ResponseFormat, SearchType};
pub use response::{Domain, ErrorMessage, Response};
pub use transport::{HttpTransport, Transport, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

pub use output::{OutputFormat, OutputFormatter};
