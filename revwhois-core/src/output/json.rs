use serde::Serialize;

use super::OutputFormatter;
use crate::response::Response;

/// Serializes pages as JSON. A multi-page walk is merged into a single
/// listing carrying the total count and the cursor of the last page.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> String {
        let rendered = match self.pretty {
            true => serde_json::to_string_pretty(value),
            false => serde_json::to_string(value),
        };
        rendered.unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
    }
}

fn merge_pages(pages: &[Response]) -> Response {
    Response {
        domains_count: pages.first().map_or(0, |p| p.domains_count),
        next_page_search_after: pages.last().and_then(|p| p.next_page_search_after),
        domains_list: pages
            .iter()
            .flat_map(|p| p.domains_list.iter().cloned())
            .collect(),
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_page(&self, response: &Response) -> String {
        self.render(response)
    }

    fn format_pages(&self, pages: &[Response]) -> String {
        self.render(&merge_pages(pages))
    }
}
