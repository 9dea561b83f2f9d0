use std::io::{self, Write};

use crate::kaggle::{
    CompetitionClient, CompetitionListQuery, CompetitionSession, Credentials, KaggleApi,
    Unauthenticated,
};

#[derive(Debug, Clone, Default)]
pub struct ProbeConfig {
    /// Exported into the environment before the client is built. When absent
    /// the client falls back to whatever the environment or `kaggle.json`
    /// already holds.
    pub credentials: Option<Credentials>,
    pub query: CompetitionListQuery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Listed { count: usize },
    AuthenticationFailed { message: String },
    ListingFailed { message: String },
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Listed { .. })
    }
}

/// Exports credentials, builds a client with `connect`, authenticates and
/// lists competitions, reporting each step on `out`.
///
/// Failures from either call end up as a single `Error: ..` line and in the
/// returned outcome, never as an `Err`; only writing to `out` can fail.
pub async fn run<C, F, W>(config: &ProbeConfig, connect: F, out: &mut W) -> io::Result<ProbeOutcome>
where
    C: CompetitionClient,
    F: FnOnce() -> C,
    W: Write,
{
    if let Some(credentials) = &config.credentials {
        credentials.export();
        tracing::debug!(username = %credentials.username, "exported credentials");
    }

    let client = connect();

    let session = match client.authenticate().await {
        Ok(session) => session,
        Err(e) => {
            writeln!(out, "Error: {e}")?;
            return Ok(ProbeOutcome::AuthenticationFailed {
                message: e.to_string(),
            });
        }
    };
    writeln!(out, "Authentication successful")?;

    let outcome = match session.competitions_list(&config.query).await {
        Ok(competitions) => {
            writeln!(out, "Found {} competitions", competitions.len())?;
            ProbeOutcome::Listed {
                count: competitions.len(),
            }
        }
        Err(e) => {
            writeln!(out, "Error: {e}")?;
            ProbeOutcome::ListingFailed {
                message: e.to_string(),
            }
        }
    };

    tracing::info!(success = outcome.is_success(), sort_by = %config.query.sort_by, "probe finished");
    Ok(outcome)
}

/// Prints a competition's leaderboard as CSV, or an `Error: ..` line. Returns
/// whether the leaderboard was fetched. An empty leaderboard prints nothing.
pub async fn leaderboard<W: Write>(
    credentials: Option<&Credentials>,
    api: KaggleApi<Unauthenticated>,
    competition: &str,
    out: &mut W,
) -> io::Result<bool> {
    if let Some(credentials) = credentials {
        credentials.export();
    }

    let entries = match api.authenticate().await {
        Ok(session) => session.competition_leaderboard(competition).await,
        Err(e) => Err(e),
    };

    match entries {
        Ok(entries) => {
            tracing::info!(competition, entries = entries.len(), "fetched leaderboard");
            let mut writer = csv::Writer::from_writer(out);
            for entry in &entries {
                writer.serialize(entry)?;
            }
            writer.flush()?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "Error: {e}")?;
            Ok(false)
        }
    }
}
