use crate::{api_client::SteamApi, error::ReviewError, review::AppId};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

pub type NameMapping = HashMap<AppId, String>;

/// Looks up display names for `app_ids` with a single request.
pub fn resolve(api: &impl SteamApi, app_ids: &[AppId]) -> Result<NameMapping, ReviewError> {
    if app_ids.is_empty() {
        return Ok(NameMapping::new());
    }

    let names = parse_app_names(api.fetch_app_names(app_ids)?)?;
    log::debug!("Resolved {} of {} app names", names.len(), app_ids.len());

    Ok(names)
}

pub fn parse_app_names(doc: Value) -> Result<NameMapping, ReviewError> {
    let response = serde_json::from_value::<AppsResponse>(doc)
        .map_err(ReviewError::malformed("app list"))?;

    Ok(response
        .response
        .apps
        .into_iter()
        .map(|app| (app.appid, app.name))
        .collect())
}

#[derive(Deserialize, Debug)]
struct AppsResponse {
    response: AppsResponseBody,
}

#[derive(Deserialize, Debug)]
struct AppsResponseBody {
    apps: Vec<AppsResponseApp>,
}

#[derive(Deserialize, Debug)]
struct AppsResponseApp {
    appid: AppId,
    name: String,
}
