use console::{style, Term};
use monexo_wallet::client::crossplatform::CrossPlatformHttpClient;
use monexo_wallet::wallet::Wallet;
use num_format::{Locale, ToFormattedString};

pub async fn show_balance(wallet: &Wallet<CrossPlatformHttpClient>) -> anyhow::Result<()> {
    let term = Term::stdout();
    term.write_line(&format!(
        "Balance: {}",
        style(wallet.balance().to_formatted_string(&Locale::en)).cyan()
    ))?;
    Ok(())
}
