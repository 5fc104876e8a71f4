use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the user configuration document (fatal if missing/malformed)
    #[arg(long, default_value = "config/users.json")]
    pub user_config: PathBuf,

    /// Path to the symbol configuration document (fatal if missing/malformed)
    #[arg(long, default_value = "config/symbols.json")]
    pub symbol_config: PathBuf,

    /// Endpoint to subscribe for inbound client order requests
    #[arg(long, default_value = "tcp://localhost:5601")]
    pub order_endpoint: String,

    /// Endpoint to subscribe for inbound execution reports
    #[arg(long, default_value = "tcp://localhost:5602")]
    pub execution_report_endpoint: String,

    /// Endpoint to bind for publishing wire orders to the matching engine
    #[arg(long, default_value = "tcp://*:5603")]
    pub matching_engine_endpoint: String,

    /// Endpoint to bind for publishing order responses to clients
    #[arg(long, default_value = "tcp://*:5604")]
    pub response_endpoint: String,

    /// Endpoint to bind for publishing execution response reports to clients
    #[arg(long, default_value = "tcp://*:5605")]
    pub report_endpoint: String,

    /// Composer idle interval in microseconds when its queue is empty
    #[arg(long, default_value_t = 1000)]
    pub idle_interval_us: u64,
}
