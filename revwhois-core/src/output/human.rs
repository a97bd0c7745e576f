use chrono::{DateTime, FixedOffset};
use colored::Colorize;

use super::OutputFormatter;
use crate::colors::CatppuccinExt;
use crate::response::{Domain, Response};

fn format_timestamp(value: &DateTime<FixedOffset>) -> String {
    value.format("%Y-%m-%d %H:%M:%S %:z").to_string()
}

pub struct HumanFormatter {
    use_colors: bool,
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn label(&self, text: &str) -> String {
        if self.use_colors {
            text.sky().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn value(&self, text: &str) -> String {
        if self.use_colors {
            text.ctp_white().to_string()
        } else {
            text.to_string()
        }
    }

    fn muted(&self, text: &str) -> String {
        if self.use_colors {
            text.overlay1().to_string()
        } else {
            text.to_string()
        }
    }

    fn success(&self, text: &str) -> String {
        if self.use_colors {
            text.ctp_green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn header(&self, text: &str) -> String {
        if self.use_colors {
            format!("\n{}\n{}", text.lavender().bold(), "─".repeat(text.len()).subtext0())
        } else {
            format!("\n{}\n{}", text, "-".repeat(text.len()))
        }
    }

    fn format_domain(&self, domain: &Domain) -> String {
        let mut line = format!("  {}", self.value(&domain.domain_name));

        let mut audit = Vec::new();
        if let Some(created) = &domain.audit_created_date {
            audit.push(format!("created {}", format_timestamp(created)));
        }
        if let Some(updated) = &domain.audit_updated_date {
            audit.push(format!("updated {}", format_timestamp(updated)));
        }
        if !audit.is_empty() {
            line.push_str(&format!("  {}", self.muted(&format!("({})", audit.join(", ")))));
        }

        line
    }

    fn footer(&self, response: &Response) -> String {
        match response.next_page_search_after {
            Some(cursor) if response.has_next() => format!(
                "  {}: {}",
                self.label("Next page cursor"),
                self.value(&cursor.to_string())
            ),
            _ => format!("  {} Last page", self.success("✓")),
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_page(&self, response: &Response) -> String {
        let mut output = Vec::new();

        output.push(self.header(&format!(
            "Reverse WHOIS: {} domains",
            response.domains_count
        )));

        if response.domains_list.is_empty() {
            output.push(format!("  {}", self.muted("No domains in this page")));
        } else {
            output.extend(response.domains_list.iter().map(|d| self.format_domain(d)));
        }

        output.push(String::new());
        output.push(self.footer(response));
        output.join("\n")
    }

    fn format_pages(&self, pages: &[Response]) -> String {
        let listed: usize = pages.iter().map(|p| p.domains_list.len()).sum();
        let total = pages.first().map(|p| p.domains_count).unwrap_or(0);

        let mut output = Vec::new();
        output.push(self.header(&format!(
            "Reverse WHOIS: {} domains across {} pages",
            total,
            pages.len()
        )));
        for domain in pages.iter().flat_map(|p| p.domains_list.iter()) {
            output.push(self.format_domain(domain));
        }
        output.push(String::new());
        output.push(format!(
            "  {}: {}",
            self.label("Listed"),
            self.value(&listed.to_string())
        ));
        if let Some(last) = pages.last() {
            output.push(self.footer(last));
        }
        output.join("\n")
    }
}
