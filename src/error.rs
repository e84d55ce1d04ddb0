use crate::review::AppId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    /// Steam answers with an empty `response` when the user has no review for that year.
    #[error("Steam review not found for {steam_id} in {year}")]
    MissingData { steam_id: String, year: u32 },

    #[error("unexpected {what} payload")]
    MalformedData {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("no name returned for app {app_id}")]
    Lookup { app_id: AppId },

    #[error("request to Steam failed")]
    Transport(#[from] reqwest::Error),
}

impl ReviewError {
    pub fn malformed(what: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::MalformedData { what, source }
    }
}
