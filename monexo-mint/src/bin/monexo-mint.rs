use std::env;

use monexomint::{config::MintConfig, mint::Mint, server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    if env::var("MINT_APP_ENV").as_deref() == Ok("dev") {
        match dotenvy::dotenv() {
            Ok(path) => println!(".env read successfully from {}", path.display()),
            Err(e) => println!("no .env file loaded: {e}"),
        }
    }

    let config = MintConfig::read_config_with_defaults();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .init();

    let mint = Mint::new(&config.privatekey)?;
    server::run_server(mint, &config).await
}
