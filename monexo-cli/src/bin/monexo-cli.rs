use clap::{Parser, Subcommand};
use console::{style, Term};
use monexo_wallet::wallet::Wallet;
use monexocli::cli;
use url::Url;

#[derive(Parser)]
#[command(arg_required_else_help(true))]
struct Opts {
    #[clap(long, env = "MONEXO_MINT_URL", default_value = "http://127.0.0.1:3338/")]
    mint_url: Url,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone)]
enum Command {
    /// Mint a fresh proof for the mint's fixed denomination.
    Mint,

    /// Mint enough to cover `amount`, then split into change and the requested amount.
    Split { amount: i64 },

    /// Show the wallet's balance. Always zero at the start of a process: the
    /// wallet keeps no persistent state.
    Balance,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let term = Term::stdout();
    let mut wallet = Wallet::new(opts.mint_url).await?;

    match opts.command {
        Command::Mint => {
            let proof = wallet.mint().await?;
            term.write_line(&format!(
                "Minted proof worth {} ({})",
                style(proof.amount).cyan(),
                proof.secret_msg
            ))?;
            cli::show_balance(&wallet).await?;
        }
        Command::Split { amount } => {
            while (wallet.balance() as i64) < amount {
                wallet.mint().await?;
            }

            let proofs = wallet.proofs().clone();
            match wallet.split(proofs, amount).await {
                Ok((fst, snd)) => {
                    term.write_line(&format!(
                        "Change: {:?}\nRequested: {:?}",
                        fst.iter().map(|p| p.amount).collect::<Vec<_>>(),
                        snd.iter().map(|p| p.amount).collect::<Vec<_>>(),
                    ))?;
                }
                Err(e) => term.write_line(&format!("Error: {e}"))?,
            }
            cli::show_balance(&wallet).await?;
        }
        Command::Balance => {
            cli::show_balance(&wallet).await?;
        }
    }

    Ok(())
}
