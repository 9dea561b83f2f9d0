use reqwest::header::{HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::KaggleError;

pub mod auth;
pub mod competitions;

pub use auth::{Authenticated, Credentials, Unauthenticated};
pub use competitions::{Category, Competition, CompetitionListQuery, LeaderboardEntry, SortBy};

use auth::AuthStates;
use competitions::LeaderboardView;

type Result<T> = std::result::Result<T, KaggleError>;

pub const DEFAULT_ENDPOINT: &str = "https://www.kaggle.com/api/v1";
pub const ENDPOINT_VAR: &str = "KAGGLE_API_ENDPOINT";

const CLIENT_USER_AGENT: &str = concat!("kaggle-probe/", env!("CARGO_PKG_VERSION"));

/// Something that can be authenticated and then asked for competitions.
///
/// The probe only talks to this seam, so it can be driven by a stand-in.
#[allow(async_fn_in_trait)]
pub trait CompetitionClient {
    type Session: CompetitionSession;

    async fn authenticate(self) -> Result<Self::Session>;
}

#[allow(async_fn_in_trait)]
pub trait CompetitionSession {
    async fn competitions_list(&self, query: &CompetitionListQuery) -> Result<Vec<Competition>>;
}

#[derive(Debug)]
pub struct KaggleApi<State>
where
    State: AuthStates,
{
    http: reqwest::Client,
    endpoint: Url,
    state: State,
}

impl KaggleApi<Unauthenticated> {
    pub fn new(endpoint: Url) -> KaggleApi<Unauthenticated> {
        KaggleApi {
            http: reqwest::Client::new(),
            endpoint,
            state: Unauthenticated,
        }
    }

    pub fn with_credentials(self, credentials: Credentials) -> KaggleApi<Authenticated> {
        KaggleApi {
            http: self.http,
            endpoint: self.endpoint,
            state: Authenticated(credentials),
        }
    }
}

impl KaggleApi<Authenticated> {
    pub async fn competition_leaderboard(&self, competition: &str) -> Result<Vec<LeaderboardEntry>> {
        let url = self.url(&["competitions", competition, "leaderboard", "view"], None)?;
        let view: LeaderboardView = self.get(url).await?;
        Ok(view.submissions)
    }

    fn url(&self, segments: &[&str], query: Option<String>) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| KaggleError::InvalidEndpoint(self.endpoint.to_string()))?
            .pop_if_empty()
            .extend(segments);
        url.set_query(query.as_deref().filter(|q| !q.is_empty()));
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(%url, "GET");
        let request = self
            .http
            .get(url)
            .header(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let response = self.state.0.authorize(request)?.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(%status, "kaggle api request failed");
            return Err(KaggleError::from_response(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl CompetitionClient for KaggleApi<Unauthenticated> {
    type Session = KaggleApi<Authenticated>;

    /// Resolves credentials from the environment or `kaggle.json`. Like the
    /// official client this makes no request; a bad key only shows up on the
    /// first call.
    async fn authenticate(self) -> Result<KaggleApi<Authenticated>> {
        let credentials = Credentials::from_env()?;
        tracing::info!(username = %credentials.username, "authenticated");
        Ok(self.with_credentials(credentials))
    }
}

impl CompetitionSession for KaggleApi<Authenticated> {
    async fn competitions_list(&self, query: &CompetitionListQuery) -> Result<Vec<Competition>> {
        let url = self.url(&["competitions", "list"], Some(serde_urlencoded::to_string(query)?))?;
        self.get(url).await
    }
}
