use crate::{error::ReviewError, names::NameMapping};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

const SECONDS_IN_HOUR: f64 = 3600.;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppId(pub u32);

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Playtime(pub u64);

impl Playtime {
    pub fn seconds(&self) -> u64 {
        self.0
    }

    pub fn hours(&self) -> f64 {
        self.0 as f64 / SECONDS_IN_HOUR
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub app_id: AppId,
    /// Empty until names are merged in.
    pub name: String,
    pub playtime: Playtime,
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "* App id: {}", self.app_id)?;
        writeln!(f, "* Name: {}", self.name)?;
        write!(f, "* Total playtime (seconds): {}", self.playtime.seconds())
    }
}

/// Annual playtime of one user. `total` is Steam's own aggregate and does not have to equal
/// the sum over `games`.
#[derive(Debug, Clone, PartialEq)]
pub struct YearInReview {
    pub total: Playtime,
    pub games: Vec<GameRecord>,
}

impl YearInReview {
    /// Parses a `GetUserYearInReview` document. An absent or empty `response` object is how
    /// Steam says there is no review for the user and year.
    pub fn from_document(doc: Value, steam_id: &str, year: u32) -> Result<Self, ReviewError> {
        let response = match doc {
            Value::Object(mut map) => map.remove("response"),
            _ => None,
        };

        let response = match response {
            Some(value) if !is_blank(&value) => value,
            _ => {
                return Err(ReviewError::MissingData {
                    steam_id: steam_id.to_string(),
                    year,
                })
            }
        };

        let response = serde_json::from_value::<YearInReviewResponse>(response)
            .map_err(ReviewError::malformed("year in review"))?;
        let stats = response.stats.playtime_stats;

        Ok(Self {
            total: stats.total_stats.total_playtime_seconds,
            games: stats
                .games
                .into_iter()
                .map(|entry| GameRecord {
                    app_id: entry.appid,
                    name: String::new(),
                    playtime: entry.stats.total_playtime_seconds,
                })
                .collect(),
        })
    }

    pub fn app_ids(&self) -> Vec<AppId> {
        self.games.iter().map(|game| game.app_id).collect()
    }
}

/// `null`, `false`, zero and empty strings, arrays or objects all count as "nothing there".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Fills in every record's name. A record whose app is missing from `names` is an error
/// rather than a placeholder.
pub fn merge_names(
    records: Vec<GameRecord>,
    names: &NameMapping,
) -> Result<Vec<GameRecord>, ReviewError> {
    records
        .into_iter()
        .map(|record| match names.get(&record.app_id) {
            Some(name) => Ok(GameRecord {
                name: name.clone(),
                ..record
            }),
            None => Err(ReviewError::Lookup {
                app_id: record.app_id,
            }),
        })
        .collect()
}

#[derive(Deserialize, Debug)]
struct YearInReviewResponse {
    stats: YearInReviewStats,
}

#[derive(Deserialize, Debug)]
struct YearInReviewStats {
    playtime_stats: PlaytimeStats,
}

#[derive(Deserialize, Debug)]
struct PlaytimeStats {
    total_stats: TotalStats,
    games: Vec<GameEntry>,
}

#[derive(Deserialize, Debug)]
struct TotalStats {
    total_playtime_seconds: Playtime,
}

#[derive(Deserialize, Debug)]
struct GameEntry {
    appid: AppId,
    stats: GameStats,
}

#[derive(Deserialize, Debug)]
struct GameStats {
    total_playtime_seconds: Playtime,
}
