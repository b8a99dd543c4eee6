use clap::Parser;

/// All provider credentials are optional: a missing key engages that
/// adapter's fallback instead of failing startup.
#[derive(Parser, Debug, Clone)]
#[command(name = "jobfinder", about = "Job search aggregation service")]
pub struct Config {
    /// Listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// RapidAPI key for the JSearch provider
    #[arg(long, env = "JSEARCH_API_KEY")]
    pub jsearch_api_key: Option<String>,

    /// Adzuna application id
    #[arg(long, env = "ADZUNA_APP_ID")]
    pub adzuna_app_id: Option<String>,

    /// Adzuna application key
    #[arg(long, env = "ADZUNA_APP_KEY")]
    pub adzuna_app_key: Option<String>,

    /// Jooble API key
    #[arg(long, env = "JOOBLE_API_KEY")]
    pub jooble_api_key: Option<String>,
}
