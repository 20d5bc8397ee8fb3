use std::net::SocketAddr;

use clap::Parser;

/// Mint process configuration, read from CLI flags or the matching
/// environment variables (`--help` lists both).
#[derive(Parser, Debug, Clone)]
#[command(arg_required_else_help(true))]
pub struct MintConfig {
    /// Master secret the per-denomination keyset is derived from. Must be
    /// reproduced bit-exactly across restarts for wallets to keep trusting
    /// the mint's keyset.
    #[clap(long, env = "MINT_PRIVATE_KEY")]
    pub privatekey: String,

    #[clap(flatten)]
    pub server: ServerConfig,

    /// `RUST_LOG`-style filter, e.g. `monexo_mint=debug,tower_http=warn`.
    #[clap(long, default_value = "info", env = "MINT_LOG_LEVEL")]
    pub log_level: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ServerConfig {
    #[clap(long, default_value = "[::]:3338", env = "MINT_HOST_PORT")]
    pub host_port: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host_port: "[::]:3338".parse().expect("valid socket address"),
        }
    }
}

impl MintConfig {
    pub fn read_config_with_defaults() -> Self {
        Self::parse()
    }
}
