use crate::prelude::{eprintln, *};
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

mod error;
mod lookup;
mod prelude;
mod server;
mod whois;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Look up WHOIS domain and contact information"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// WhoisXML API key
    #[clap(long, env = "WHOIS_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// WhoisXML API endpoint
    #[clap(long, env = "WHOIS_API_URL", global = true, default_value = whois::DEFAULT_API_URL)]
    api_url: String,

    /// Timeout in seconds for calls to the WHOIS provider
    #[clap(long, env = "WHOIS_TIMEOUT_SECS", global = true, default_value_t = whois::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Whether to display additional information.
    #[clap(long, env = "DOMAIN_CHECKER_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    /// Provider configuration handed to the lookup orchestrator
    pub fn whois_config(&self) -> whois::WhoisConfig {
        whois::WhoisConfig::new(self.api_key.clone().unwrap_or_default())
            .with_api_url(self.api_url.clone())
            .with_timeout(std::time::Duration::from_secs(self.timeout))
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Run the domain lookup HTTP API
    Serve(crate::server::App),

    /// Look up a domain and print the result as a table
    Lookup(crate::lookup::App),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    let result = match app.command {
        SubCommands::Serve(sub_app) => crate::server::run(sub_app, app.global).await,
        SubCommands::Lookup(sub_app) => crate::lookup::run(sub_app, app.global).await,
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(report) => match report.downcast_ref::<crate::lookup::Banner>() {
            Some(banner) => {
                eprintln!("{}", banner.to_string().red().bold());
                Ok(ExitCode::FAILURE)
            }
            None => Err(report),
        },
    }
}
