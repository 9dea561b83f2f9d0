use clap::{Parser, Subcommand};
use url::Url;

use crate::kaggle::{self, auth, Category, CompetitionListQuery, Credentials, SortBy};
use crate::probe::ProbeConfig;

/// Checks that a Kaggle username/key pair is accepted by the Kaggle API.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Kaggle username, exported as KAGGLE_USERNAME before connecting
    #[arg(long, env = auth::USERNAME_VAR, global = true)]
    pub username: Option<String>,

    /// Kaggle API key or KGAT_ token, exported as KAGGLE_KEY before connecting
    #[arg(long, env = auth::KEY_VAR, hide_env_values = true, global = true)]
    pub key: Option<String>,

    #[arg(long, env = kaggle::ENDPOINT_VAR, default_value = kaggle::DEFAULT_ENDPOINT, global = true)]
    pub api_endpoint: Url,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, default_value_t = SortBy::LatestDeadline)]
    pub sort_by: SortBy,

    #[arg(long)]
    pub category: Option<Category>,

    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a competition's public leaderboard as CSV
    Leaderboard {
        /// Competition slug, e.g. `titanic`
        competition: String,
    },
}

impl Cli {
    /// Both halves are needed to export anything; a lone username or key is
    /// left for the client's own resolution.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.key) {
            (Some(username), Some(key)) => Some(Credentials::new(username, key)),
            _ => None,
        }
    }

    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            credentials: self.credentials(),
            query: CompetitionListQuery {
                page: self.page,
                sort_by: self.sort_by,
                category: self.category,
                search: self.search.clone(),
            },
        }
    }
}
