use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KaggleError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Grouped,
    Prize,
    EarliestDeadline,
    #[default]
    LatestDeadline,
    NumberOfTeams,
    RecentlyCreated,
}

impl SortBy {
    const ALL: [SortBy; 6] = [
        SortBy::Grouped,
        SortBy::Prize,
        SortBy::EarliestDeadline,
        SortBy::LatestDeadline,
        SortBy::NumberOfTeams,
        SortBy::RecentlyCreated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Grouped => "grouped",
            SortBy::Prize => "prize",
            SortBy::EarliestDeadline => "earliestDeadline",
            SortBy::LatestDeadline => "latestDeadline",
            SortBy::NumberOfTeams => "numberOfTeams",
            SortBy::RecentlyCreated => "recentlyCreated",
        }
    }
}

impl FromStr for SortBy {
    type Err = KaggleError;

    fn from_str(s: &str) -> Result<SortBy, KaggleError> {
        SortBy::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = SortBy::ALL.iter().map(SortBy::as_str).collect();
                KaggleError::invalid_option("sort_by", &names)
            })
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    All,
    Featured,
    Research,
    Recruitment,
    GettingStarted,
    Masters,
    Playground,
}

impl Category {
    const ALL: [Category; 7] = [
        Category::All,
        Category::Featured,
        Category::Research,
        Category::Recruitment,
        Category::GettingStarted,
        Category::Masters,
        Category::Playground,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Featured => "featured",
            Category::Research => "research",
            Category::Recruitment => "recruitment",
            Category::GettingStarted => "gettingStarted",
            Category::Masters => "masters",
            Category::Playground => "playground",
        }
    }
}

impl FromStr for Category {
    type Err = KaggleError;

    fn from_str(s: &str) -> Result<Category, KaggleError> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
                KaggleError::invalid_option("category", &names)
            })
    }
}

/// Query string for `competitions/list`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionListQuery {
    pub page: u32,
    pub sort_by: SortBy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for CompetitionListQuery {
    fn default() -> CompetitionListQuery {
        CompetitionListQuery {
            page: 1,
            sort_by: SortBy::LatestDeadline,
            category: None,
            search: None,
        }
    }
}

impl CompetitionListQuery {
    pub fn sorted_by(sort_by: SortBy) -> CompetitionListQuery {
        CompetitionListQuery {
            sort_by,
            ..CompetitionListQuery::default()
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Competition {
    pub id: Option<i64>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub deadline: Option<String>,
    pub category: Option<String>,
    pub reward: Option<String>,
    pub team_count: Option<i64>,
    pub user_has_entered: Option<bool>,
}

/// One leaderboard row. Serializes with the API's field names, which become
/// the CSV header.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LeaderboardEntry {
    pub team_id: Option<i64>,
    pub team_name: String,
    pub submission_date: Option<String>,
    pub score: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct LeaderboardView {
    pub submissions: Vec<LeaderboardEntry>,
}
