use std::time::Duration;

use tracing::{debug, instrument};

use crate::error::{ReverseWhoisError, Result};
use crate::pages::Pages;
use crate::request::{Mode, QueryOptions, RequestPayload, ResponseFormat};
use crate::response::{parse_response, Response};
use crate::transport::{HttpTransport, Transport};
use crate::validation::{validate_api_key, validate_query};

/// Reverse WHOIS API client.
///
/// Every call validates its options before anything is sent, performs one
/// blocking round trip through the transport and parses the reply.
#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    api_key: String,
    transport: T,
}

impl Client<HttpTransport> {
    /// Client with the default endpoint and timeout.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn timeout(&self) -> Duration {
        self.transport.timeout()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.transport = self.transport.with_base_url(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.transport = self.transport.with_timeout(timeout);
        self
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(api_key: &str, transport: T) -> Result<Self> {
        Ok(Self {
            api_key: validate_api_key(api_key)?,
            transport,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn set_api_key(&mut self, api_key: &str) -> Result<()> {
        self.api_key = validate_api_key(api_key)?;
        Ok(())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Raw reply text in the requested response format (JSON or XML).
    #[instrument(skip(self, options))]
    pub fn raw_data(&self, options: &QueryOptions) -> Result<String> {
        let query = validate_query(options)?;
        let payload = RequestPayload::new(&self.api_key, query);
        self.transport.post(&payload)
    }

    /// Parsed page of results. The response format is always JSON here.
    pub fn data(&self, options: &QueryOptions) -> Result<Response> {
        let options = QueryOptions {
            response_format: Some(ResponseFormat::Json),
            ..options.clone()
        };
        let raw = self.raw_data(&options)?;
        parse_response(&raw)
    }

    pub fn preview(&self, options: &QueryOptions) -> Result<Response> {
        self.data(&options.clone().with_mode(Mode::Preview))
    }

    pub fn purchase(&self, options: &QueryOptions) -> Result<Response> {
        self.data(&options.clone().with_mode(Mode::Purchase))
    }

    /// The page following `current`, or `current` itself when there is none.
    /// Only the latter case avoids a network call.
    pub fn next_page(&self, current: Response, options: &QueryOptions) -> Result<Response> {
        match current.next_page_search_after {
            Some(cursor) if current.has_next() => self.purchase_after(cursor, options),
            _ => Ok(current),
        }
    }

    /// Lazily walk every page of a purchase query, starting with the first.
    pub fn iterate_pages(&self, options: &QueryOptions) -> Pages<'_, T> {
        Pages::new(self, options.clone())
    }

    pub(crate) fn purchase_after(&self, cursor: u64, options: &QueryOptions) -> Result<Response> {
        debug!(search_after = cursor, "Fetching next page");
        self.purchase(&options.clone().with_search_after(cursor))
    }
}

/// Builder for a [`Client`] over the default HTTP transport.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Client<HttpTransport>> {
        let api_key = self.api_key.ok_or(ReverseWhoisError::EmptyApiKey)?;
        let api_key = validate_api_key(&api_key)?;

        let mut transport = HttpTransport::new()?;
        if let Some(base_url) = self.base_url {
            transport = transport.with_base_url(base_url);
        }
        if let Some(timeout) = self.timeout {
            transport = transport.with_timeout(timeout);
        }

        Ok(Client { api_key, transport })
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use serde_json::Value;

    use super::*;
    use crate::fields::Field;
    use crate::request::{AdvancedTerm, BasicTerms};
    use crate::transport::{MockTransport, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

    const KEY: &str = "at_abcdefghijklmnopqrstuvwxyz012";

    fn basic() -> QueryOptions {
        QueryOptions::basic(BasicTerms::new(["medicine", "google"]).exclude(["blog"]))
    }

    fn body(payload: &RequestPayload) -> Value {
        serde_json::to_value(payload).unwrap()
    }

    fn page(count: u64, cursor: Option<u64>, names: &[&str]) -> String {
        serde_json::json!({
            "domainsCount": count,
            "nextPageSearchAfter": cursor,
            "domainsList": names,
        })
        .to_string()
    }

    fn client(transport: MockTransport) -> Client<MockTransport> {
        Client::with_transport(KEY, transport).unwrap()
    }

    #[test]
    fn test_empty_query_never_reaches_transport() {
        let mut transport = MockTransport::new();
        transport.expect_post().times(0);

        let client = client(transport);
        let err = client.data(&QueryOptions::new()).unwrap_err();
        assert!(matches!(err, ReverseWhoisError::Parameter(_)));
    }

    #[test]
    fn test_invalid_options_never_reach_transport() {
        let mut transport = MockTransport::new();
        transport.expect_post().times(0);
        let client = client(transport);

        let short_term = QueryOptions::advanced(vec![AdvancedTerm::new(Field::DomainName, "f")]);
        assert!(matches!(
            client.data(&short_term),
            Err(ReverseWhoisError::Parameter(_))
        ));
        assert!(matches!(
            client.raw_data(&basic().with_search_after(0)),
            Err(ReverseWhoisError::Parameter(_))
        ));
    }

    #[test]
    fn test_invalid_api_key_is_rejected_up_front() {
        let mut transport = MockTransport::new();
        transport.expect_post().times(0);

        assert!(matches!(
            Client::with_transport("at_00000", transport),
            Err(ReverseWhoisError::Parameter(_))
        ));

        assert!(matches!(
            Client::new("not-a-key"),
            Err(ReverseWhoisError::Parameter(_))
        ));
        assert!(matches!(
            Client::builder().build(),
            Err(ReverseWhoisError::EmptyApiKey)
        ));
    }

    #[test]
    fn test_builder_configuration() {
        let client = Client::new(KEY).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);

        let client = Client::builder()
            .api_key(KEY)
            .base_url("http://localhost:8080/api/v2")
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/v2");
        assert_eq!(client.timeout(), Duration::from_secs(3));
        assert_eq!(client.api_key(), KEY);
    }

    #[test]
    fn test_set_api_key_validates() {
        let mut client = client(MockTransport::new());
        assert!(client.set_api_key("bogus").is_err());
        assert_eq!(client.api_key(), KEY);
        assert!(client.set_api_key("at_ZYXWVUTSRQPONMLKJIHGFEDCBA987").is_ok());
    }

    #[test]
    fn test_data_forces_json_and_parses() {
        let mut transport = MockTransport::new();
        transport
            .expect_post()
            .withf(|payload| {
                let body = body(payload);
                body["responseFormat"] == "json" && body["apiKey"] == KEY && body["mode"] == "preview"
            })
            .times(1)
            .returning(|_| Ok(page(2, None, &["a.com", "b.com"])));

        let client = client(transport);
        let response = client
            .data(&basic().with_response_format(ResponseFormat::Xml))
            .unwrap();

        assert_eq!(response.domains_count, 2);
        assert!(!response.has_next());
        assert_eq!(response.domains_list.len(), 2);
    }

    #[test]
    fn test_raw_data_keeps_requested_format() {
        let mut transport = MockTransport::new();
        transport
            .expect_post()
            .withf(|payload| body(payload)["responseFormat"] == "xml")
            .times(1)
            .returning(|_| Ok("<?xml version=\"1.0\"?><domains/>".to_string()));

        let client = client(transport);
        let raw = client
            .raw_data(&basic().with_response_format(ResponseFormat::Xml))
            .unwrap();
        assert!(raw.starts_with("<?xml"));
    }

    #[test]
    fn test_preview_and_purchase_set_mode() {
        let mut transport = MockTransport::new();
        let mut seq = Sequence::new();
        transport
            .expect_post()
            .withf(|payload| payload.mode() == Mode::Preview)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(page(10, None, &[])));
        transport
            .expect_post()
            .withf(|payload| payload.mode() == Mode::Purchase)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(page(1, None, &["medicine.com"])));

        let client = client(transport);
        let options = basic().with_mode(Mode::Purchase);
        assert_eq!(client.preview(&options).unwrap().domains_count, 10);
        assert_eq!(
            client.purchase(&basic()).unwrap().domains_list[0].domain_name,
            "medicine.com"
        );
    }

    #[test]
    fn test_unparsable_reply() {
        let mut transport = MockTransport::new();
        transport
            .expect_post()
            .times(1)
            .returning(|_| Ok("{\"unexpected\": true}".to_string()));

        let client = client(transport);
        assert!(matches!(
            client.data(&basic()),
            Err(ReverseWhoisError::UnparsableApiResponse { .. })
        ));
    }

    #[test]
    fn test_transport_errors_propagate() {
        let mut transport = MockTransport::new();
        transport.expect_post().times(1).returning(|_| {
            Err(ReverseWhoisError::ApiAuth {
                status: 403,
                message: "Access restricted".to_string(),
            })
        });

        let client = client(transport);
        assert!(matches!(
            client.purchase(&basic()),
            Err(ReverseWhoisError::ApiAuth { status: 403, .. })
        ));
    }

    #[test]
    fn test_next_page_without_cursor_is_identity() {
        let mut transport = MockTransport::new();
        transport.expect_post().times(0);
        let client = client(transport);

        for cursor in [None, Some(0)] {
            let current = Response {
                domains_count: 1,
                next_page_search_after: cursor,
                domains_list: vec![crate::response::Domain::name_only("a.com")],
            };
            let next = client.next_page(current.clone(), &basic()).unwrap();
            assert_eq!(next, current);
        }
    }

    #[test]
    fn test_next_page_uses_cursor_in_purchase_mode() {
        let mut transport = MockTransport::new();
        transport
            .expect_post()
            .withf(|payload| payload.search_after() == Some(42) && payload.mode() == Mode::Purchase)
            .times(1)
            .returning(|_| Ok(page(3, None, &["c.com"])));

        let client = client(transport);
        let current = Response {
            domains_count: 3,
            next_page_search_after: Some(42),
            domains_list: Vec::new(),
        };
        let next = client.next_page(current, &basic().with_search_after(7)).unwrap();
        assert_eq!(next.domains_list[0].domain_name, "c.com");
    }
}
