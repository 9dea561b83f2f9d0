use anyhow::Result;
use clap::Parser;
use kaggle_probe::cli::{Cli, Command};
use kaggle_probe::{logging, probe, KaggleApi};

// Probe failures are reported on stdout and still exit 0.
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let mut stdout = std::io::stdout().lock();
    let api = KaggleApi::new(cli.api_endpoint.clone());

    match &cli.command {
        None => {
            probe::run(&cli.probe_config(), move || api, &mut stdout).await?;
        }
        Some(Command::Leaderboard { competition }) => {
            let credentials = cli.credentials();
            probe::leaderboard(credentials.as_ref(), api, competition, &mut stdout).await?;
        }
    }

    Ok(())
}
