use crate::prelude::{eprintln, *};
use crate::whois::{WhoisClient, WhoisConfig};
use domain_checker_core::display::{shape_record, DisplayRecord};
use domain_checker_core::error::LookupError;
use domain_checker_core::lookup::{LookupQuery, LookupRequest};

pub mod render;

use crate::error::ErrorBody;
use render::{format_json, format_table};

/// Shown when the local input is blank, before anything is sent
const EMPTY_INPUT_MESSAGE: &str = "Please enter a valid domain.";

/// Shown when the lookup server cannot be reached or answers garbage
const NETWORK_ERROR_MESSAGE: &str = "Error fetching data from server.";

#[derive(Debug, clap::Parser)]
#[command(name = "lookup")]
#[command(about = "Look up a domain and print the result as a table")]
pub struct App {
    /// Domain name to look up (e.g., "example.com")
    pub domain: String,

    /// Which information to show: domain or contact
    #[arg(short = 't', long = "type", default_value = "domain")]
    pub search_type: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Query a running domain-checker server instead of the WHOIS provider
    #[arg(long, env = "DOMAIN_CHECKER_SERVER")]
    pub server: Option<String>,
}

/// Failure the `lookup` subcommand reports to the user as a one-line banner
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Error: {0}")]
pub struct Banner(pub String);

/// Validates a lookup, calls the WHOIS provider and shapes the answer
///
/// Holds no per-request state; one instance serves every request.
#[derive(Debug, Clone)]
pub struct DomainLookup {
    client: WhoisClient,
}

impl DomainLookup {
    pub fn new(config: WhoisConfig) -> Result<Self> {
        Ok(Self {
            client: WhoisClient::new(config)?,
        })
    }

    /// Validate raw parameters, then run the lookup
    ///
    /// Invalid parameters are rejected before the provider is contacted.
    pub async fn lookup(&self, query: &LookupQuery) -> Result<DisplayRecord, LookupError> {
        let request = query.validate().inspect_err(|err| {
            log::warn!("Rejected lookup {:?}: {}", query, err);
        })?;

        self.lookup_request(&request).await
    }

    pub async fn lookup_request(
        &self,
        request: &LookupRequest,
    ) -> Result<DisplayRecord, LookupError> {
        let record = self
            .client
            .fetch_record(&request.domain)
            .await
            .inspect_err(|err| {
                log::error!(
                    "Error fetching data from external API for {}: {}",
                    request.domain,
                    err
                );
            })?;

        log::info!("Looked up {} ({} view)", request.domain, request.mode);

        Ok(shape_record(&record, request.mode))
    }
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let output = render(&app, &global).await?;
    print!("{output}");

    Ok(())
}

/// Run the lookup and render its output, table or JSON
///
/// Every user-facing failure comes back as a [`Banner`].
pub async fn render(app: &App, global: &crate::Global) -> std::result::Result<String, Banner> {
    let domain = app.domain.trim();
    if domain.is_empty() {
        return Err(Banner(EMPTY_INPUT_MESSAGE.to_string()));
    }

    let query = LookupQuery::new(domain, app.search_type.as_str());
    let request = query.validate().map_err(|err| Banner(err.to_string()))?;

    if global.verbose {
        eprintln!("Looking up {} ({} view)...", request.domain, request.mode);
    }

    let record = match &app.server {
        Some(server) => fetch_from_server(server, &query).await,
        None => {
            let lookup =
                DomainLookup::new(global.whois_config()).map_err(|err| Banner(err.to_string()))?;
            lookup
                .lookup_request(&request)
                .await
                .map_err(|err| err.to_string())
        }
    }
    .map_err(Banner)?;

    if app.json {
        let json = format_json(&record).map_err(|err| Banner(err.to_string()))?;
        Ok(f!("{json}\n"))
    } else {
        Ok(format_table(&record, request.mode))
    }
}

/// Call `GET /api/domain-lookup` on a running server
///
/// Errors are the server's own message, or a generic network message when
/// the server is unreachable or its answer cannot be read.
pub async fn fetch_from_server(
    server: &str,
    query: &LookupQuery,
) -> std::result::Result<DisplayRecord, String> {
    let url = f!(
        "{}{}",
        server.trim_end_matches('/'),
        crate::server::LOOKUP_PATH
    );

    let response = reqwest::Client::new()
        .get(&url)
        .query(query)
        .send()
        .await
        .map_err(|e| {
            log::debug!("Request to {} failed: {}", url, e);
            NETWORK_ERROR_MESSAGE.to_string()
        })?;

    let status = response.status();
    if status.is_success() {
        return response
            .json::<DisplayRecord>()
            .await
            .map_err(|_| NETWORK_ERROR_MESSAGE.to_string());
    }

    match response.json::<ErrorBody>().await {
        Ok(body) => Err(body.error),
        Err(_) => Err(status
            .canonical_reason()
            .unwrap_or(NETWORK_ERROR_MESSAGE)
            .to_string()),
    }
}
