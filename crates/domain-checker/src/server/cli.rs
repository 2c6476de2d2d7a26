#[derive(Debug, clap::Parser)]
#[command(name = "serve")]
#[command(about = "Run the domain lookup HTTP API")]
pub struct App {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}
