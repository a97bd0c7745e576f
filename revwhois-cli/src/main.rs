mod display;

use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use revwhois_core::colors::CatppuccinExt;
use revwhois_core::output::{get_formatter, OutputFormat, OutputFormatter};
use revwhois_core::validation::{advanced_terms_from_json, basic_terms_from_json};
use revwhois_core::{AdvancedTerm, BasicTerms, Client, Field, QueryOptions, ResponseFormat};
use tracing_subscriber::EnvFilter;

use crate::display::Spinner;

#[derive(Parser)]
#[command(name = "revwhois")]
#[command(about = "Reverse WHOIS search - find domains by registrant, registrar or keyword")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (human or json)
    #[arg(short, long, default_value = "human", global = true)]
    format: String,

    /// API key (at_ followed by 29 alphanumerics)
    #[arg(long, env = "REVERSE_WHOIS_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Override the API endpoint
    #[arg(long, env = "REVERSE_WHOIS_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Count matching domains without purchasing the listing
    Preview(SearchArgs),
    /// Fetch one page of matching domains
    Purchase(SearchArgs),
    /// Print the unparsed API reply
    Raw {
        #[command(flatten)]
        search: SearchArgs,
        /// Reply format (json or xml)
        #[arg(long, default_value = "json")]
        response_format: String,
    },
    /// Walk result pages until the last one or --max-pages
    Pages {
        #[command(flatten)]
        search: SearchArgs,
        /// Stop after this many pages
        #[arg(long, default_value_t = 10)]
        max_pages: usize,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Keyword every matching record must contain (up to 4)
    #[arg(short, long)]
    include: Vec<String>,

    /// Keyword matching records must not contain (up to 4)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Field-scoped term as FIELD=TERM, e.g. registrantContact.email=admin@example.com
    #[arg(short, long)]
    term: Vec<String>,

    /// Basic terms as JSON: {"include": [...], "exclude": [...]}
    #[arg(long, conflicts_with_all = ["include", "exclude"])]
    basic_json: Option<String>,

    /// Advanced terms as JSON: [{"field": ..., "term": ...}]
    #[arg(long, conflicts_with = "term")]
    advanced_json: Option<String>,

    /// Search type (current or historic)
    #[arg(long)]
    search_type: Option<String>,

    /// Send domain names in their Unicode form
    #[arg(long)]
    no_punycode: bool,

    /// Include audit created/updated dates for each domain
    #[arg(long)]
    audit_dates: bool,

    /// Resume from a pagination cursor
    #[arg(long)]
    search_after: Option<u64>,

    #[arg(long, value_name = "YYYY-MM-DD")]
    created_from: Option<NaiveDate>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    created_to: Option<NaiveDate>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    updated_from: Option<NaiveDate>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    updated_to: Option<NaiveDate>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    expired_from: Option<NaiveDate>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    expired_to: Option<NaiveDate>,
}

impl SearchArgs {
    fn to_options(&self) -> anyhow::Result<QueryOptions> {
        let mut options = QueryOptions::new();

        if let Some(json) = &self.basic_json {
            let value = serde_json::from_str(json).context("--basic-json is not valid JSON")?;
            options = options.with_basic_terms(basic_terms_from_json(&value)?);
        } else if !self.include.is_empty() || !self.exclude.is_empty() {
            options = options
                .with_basic_terms(BasicTerms::new(&self.include).exclude(&self.exclude));
        }

        if let Some(json) = &self.advanced_json {
            let value = serde_json::from_str(json).context("--advanced-json is not valid JSON")?;
            options = options.with_advanced_terms(advanced_terms_from_json(&value)?);
        } else if !self.term.is_empty() {
            let terms = self
                .term
                .iter()
                .map(|t| parse_field_term(t))
                .collect::<anyhow::Result<Vec<_>>>()?;
            options = options.with_advanced_terms(terms);
        }

        if let Some(search_type) = &self.search_type {
            options = options.with_search_type(search_type.parse()?);
        }
        if self.no_punycode {
            options = options.with_punycode(false);
        }
        if self.audit_dates {
            options = options.with_include_audit_dates(true);
        }
        if let Some(search_after) = self.search_after {
            options = options.with_search_after(search_after);
        }

        Ok(options
            .with_created_dates(self.created_from, self.created_to)
            .with_updated_dates(self.updated_from, self.updated_to)
            .with_expired_dates(self.expired_from, self.expired_to))
    }
}

fn parse_field_term(raw: &str) -> anyhow::Result<AdvancedTerm> {
    let (field, term) = raw
        .split_once('=')
        .with_context(|| format!("Expected FIELD=TERM, got '{}'", raw))?;
    let field: Field = field.trim().parse()?;
    Ok(AdvancedTerm::new(field, term))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output_format: OutputFormat = cli.format.parse().unwrap_or_default();

    let mut builder = Client::builder()
        .api_key(cli.api_key.as_str())
        .timeout(Duration::from_secs(cli.timeout));
    if let Some(base_url) = &cli.base_url {
        builder = builder.base_url(base_url.as_str());
    }

    let client = match builder.build() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{} {}", "Error:".ctp_red(), e);
            std::process::exit(1);
        }
    };

    execute_command(&client, cli.command, output_format)
}

fn execute_command(
    client: &Client,
    command: Commands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let formatter = get_formatter(output_format);

    match command {
        Commands::Preview(search) => {
            let options = search.to_options()?;
            let spinner = Spinner::new("Querying reverse WHOIS preview...");
            let result = client.preview(&options);
            spinner.finish();
            print_or_exit(result.map(|page| formatter.format_page(&page)));
        }
        Commands::Purchase(search) => {
            let options = search.to_options()?;
            let spinner = Spinner::new("Fetching reverse WHOIS results...");
            let result = client.purchase(&options);
            spinner.finish();
            print_or_exit(result.map(|page| formatter.format_page(&page)));
        }
        Commands::Raw {
            search,
            response_format,
        } => {
            let format: ResponseFormat = response_format.parse()?;
            let options = search.to_options()?.with_response_format(format);
            print_or_exit(client.raw_data(&options));
        }
        Commands::Pages { search, max_pages } => {
            let options = search.to_options()?;
            walk_pages(client, &options, max_pages, formatter.as_ref());
        }
    }

    Ok(())
}

fn walk_pages(
    client: &Client,
    options: &QueryOptions,
    max_pages: usize,
    formatter: &dyn OutputFormatter,
) {
    let spinner = Spinner::new("Fetching page 1...");
    let mut pages = Vec::new();

    for result in client.iterate_pages(options).take(max_pages) {
        match result {
            Ok(page) => {
                pages.push(page);
                spinner.page(pages.len() + 1);
            }
            Err(e) => {
                spinner.finish();
                eprintln!(
                    "{} {} (after {} pages)",
                    "Error:".ctp_red(),
                    e,
                    pages.len()
                );
                std::process::exit(1);
            }
        }
    }
    spinner.finish();

    if pages.last().is_some_and(|p| p.has_next()) {
        eprintln!(
            "{} stopped after {} pages, more results are available",
            "Note:".ctp_yellow(),
            max_pages
        );
    }
    println!("{}", formatter.format_pages(&pages));
}

fn print_or_exit(result: revwhois_core::Result<String>) {
    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{} {}", "Error:".ctp_red(), e);
            std::process::exit(1);
        }
    }
}
