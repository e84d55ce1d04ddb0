use crate::{error::ReviewError, review::AppId};
use anyhow::Result;
use reqwest::{
    blocking::{Client, RequestBuilder},
    header,
};
use serde_json::Value;

const YEAR_IN_REVIEW_PATH: &str = "ISaleFeatureService/GetUserYearInReview/v1/";
const GET_APPS_PATH: &str = "ICommunityService/GetApps/v1/";

/// The two Steam Web API calls the pipeline needs. Both hand back the raw JSON document;
/// interpreting it is left to the caller.
pub trait SteamApi {
    fn fetch_year_in_review(&self, steam_id: &str, year: u32) -> Result<Value, ReviewError>;

    fn fetch_app_names(&self, app_ids: &[AppId]) -> Result<Value, ReviewError>;
}

impl<T: SteamApi + ?Sized> SteamApi for &T {
    fn fetch_year_in_review(&self, steam_id: &str, year: u32) -> Result<Value, ReviewError> {
        (**self).fetch_year_in_review(steam_id, year)
    }

    fn fetch_app_names(&self, app_ids: &[AppId]) -> Result<Value, ReviewError> {
        (**self).fetch_app_names(app_ids)
    }
}

#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        Ok(Self {
            client: ApiClient::build_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn request(&self, path: &str, query: &[(String, String)]) -> RequestBuilder {
        self.client
            .get(format!("{}/{}", self.base_url, path))
            .query(query)
    }

    fn get(&self, path: &'static str, query: &[(String, String)]) -> Result<Value, ReviewError> {
        log::debug!("GET {}", path);

        let body = self
            .request(path, query)
            .send()?
            .error_for_status()?
            .text()?;

        serde_json::from_str(&body).map_err(ReviewError::malformed(path))
    }

    fn build_client() -> Result<Client> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            )),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        Client::builder()
            .default_headers(headers)
            .build()
            .map_err(Into::into)
    }
}

impl SteamApi for ApiClient {
    fn fetch_year_in_review(&self, steam_id: &str, year: u32) -> Result<Value, ReviewError> {
        let query = [
            ("key".to_string(), self.api_key.clone()),
            ("steamid".to_string(), steam_id.to_string()),
            ("year".to_string(), year.to_string()),
        ];

        self.get(YEAR_IN_REVIEW_PATH, &query)
    }

    fn fetch_app_names(&self, app_ids: &[AppId]) -> Result<Value, ReviewError> {
        log::debug!("Looking up names for {} apps", app_ids.len());

        self.get(GET_APPS_PATH, &app_id_params(&self.api_key, app_ids))
    }
}

/// Steam expects arrays as positional parameters: `appids[0]=..&appids[1]=..`.
pub fn app_id_params(api_key: &str, app_ids: &[AppId]) -> Vec<(String, String)> {
    std::iter::once(("key".to_string(), api_key.to_string()))
        .chain(
            app_ids
                .iter()
                .enumerate()
                .map(|(index, app_id)| (format!("appids[{}]", index), app_id.to_string())),
        )
        .collect()
}
