pub mod cli;
pub mod error;
pub mod kaggle;
pub mod logging;
pub mod probe;

pub use error::KaggleError;
pub use kaggle::{CompetitionClient, CompetitionSession, Credentials, KaggleApi};
pub use probe::{ProbeConfig, ProbeOutcome};
