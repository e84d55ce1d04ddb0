use crate::{
    api_client::SteamApi,
    chart::{Chart, ChartRenderer},
    error::ReviewError,
    names,
    review::{self, YearInReview},
};
use anyhow::Result;

#[derive(Debug)]
pub enum Outcome {
    Rendered,
    /// Carries the `ReviewError::MissingData` that explains what was not found.
    NotFound(ReviewError),
}

#[derive(Debug)]
pub struct Runner<A, R> {
    api: A,
    renderer: R,
}

impl<A: SteamApi, R: ChartRenderer> Runner<A, R> {
    pub fn new(api: A, renderer: R) -> Self {
        Self { api, renderer }
    }

    pub fn run(&mut self, steam_id: &str, year: u32) -> Result<Outcome> {
        let document = self.api.fetch_year_in_review(steam_id, year)?;

        let review = match YearInReview::from_document(document, steam_id, year) {
            Ok(review) => review,
            Err(err @ ReviewError::MissingData { .. }) => return Ok(Outcome::NotFound(err)),
            Err(err) => return Err(err.into()),
        };
        log::info!(
            "Found {} games, {}s played in {}",
            review.games.len(),
            review.total.seconds(),
            year
        );

        let names = names::resolve(&self.api, &review.app_ids())?;
        let review = YearInReview {
            games: review::merge_names(review.games, &names)?,
            ..review
        };
        review
            .games
            .iter()
            .for_each(|game| log::debug!("Game:\n{}", game));

        self.renderer.render(&Chart::from_review(&review, year))?;

        Ok(Outcome::Rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::AppId;
    use serde_json::{json, Value};
    use std::cell::RefCell;

    struct StubApi {
        review: Value,
        apps: Value,
        requested: RefCell<Vec<Vec<AppId>>>,
    }

    impl StubApi {
        fn new(review: Value, apps: Value) -> Self {
            Self {
                review,
                apps,
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl SteamApi for StubApi {
        fn fetch_year_in_review(&self, _: &str, _: u32) -> Result<Value, ReviewError> {
            Ok(self.review.clone())
        }

        fn fetch_app_names(&self, app_ids: &[AppId]) -> Result<Value, ReviewError> {
            self.requested.borrow_mut().push(app_ids.to_vec());
            Ok(self.apps.clone())
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        charts: Vec<Chart>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn render(&mut self, chart: &Chart) -> Result<()> {
            self.charts.push(chart.clone());
            Ok(())
        }
    }

    fn review_with(games: Value) -> Value {
        json!({ "response": { "stats": { "playtime_stats": {
            "total_stats": { "total_playtime_seconds": 7200 },
            "games": games
        } } } })
    }

    #[test]
    fn full_pipeline_renders_once() {
        let api = StubApi::new(
            review_with(json!([
                { "appid": 730, "stats": { "total_playtime_seconds": 3600 } },
                { "appid": 440, "stats": { "total_playtime_seconds": 1800 } }
            ])),
            json!({ "response": { "apps": [
                { "appid": 440, "name": "TF2" },
                { "appid": 730, "name": "CS" }
            ] } }),
        );
        let mut renderer = RecordingRenderer::default();

        let outcome = Runner::new(&api, &mut renderer).run("7656", 2024).unwrap();

        assert!(matches!(outcome, Outcome::Rendered));
        assert_eq!(renderer.charts.len(), 1);
        assert_eq!(renderer.charts[0].labels(), vec!["Total", "CS", "TF2"]);
        assert_eq!(renderer.charts[0].hours(), vec![2.0, 1.0, 0.5]);
        assert_eq!(renderer.charts[0].title, "Playtime by games (2024)");
        assert_eq!(
            *api.requested.borrow(),
            vec![vec![AppId(730), AppId(440)]]
        );
    }

    #[test]
    fn empty_response_is_not_found_and_nothing_is_rendered() {
        let api = StubApi::new(json!({ "response": {} }), json!({}));
        let mut renderer = RecordingRenderer::default();

        let outcome = Runner::new(&api, &mut renderer).run("7656", 2019).unwrap();

        match outcome {
            Outcome::NotFound(reason) => {
                assert_eq!(reason.to_string(), "Steam review not found for 7656 in 2019")
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(renderer.charts.is_empty());
        assert!(api.requested.borrow().is_empty());
    }

    #[test]
    fn zero_games_renders_total_only() {
        let api = StubApi::new(review_with(json!([])), json!({}));
        let mut renderer = RecordingRenderer::default();

        let outcome = Runner::new(&api, &mut renderer).run("7656", 2024).unwrap();

        assert!(matches!(outcome, Outcome::Rendered));
        assert_eq!(renderer.charts[0].labels(), vec!["Total"]);
    }

    #[test]
    fn missing_name_fails_the_run() {
        let api = StubApi::new(
            review_with(json!([
                { "appid": 730, "stats": { "total_playtime_seconds": 3600 } }
            ])),
            json!({ "response": { "apps": [] } }),
        );
        let mut renderer = RecordingRenderer::default();

        let err = Runner::new(&api, &mut renderer)
            .run("7656", 2024)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ReviewError>(),
            Some(ReviewError::Lookup { app_id: AppId(730) })
        ));
        assert!(renderer.charts.is_empty());
    }

    #[test]
    fn malformed_review_fails_the_run() {
        let api = StubApi::new(json!({ "response": { "stats": {} } }), json!({}));
        let mut renderer = RecordingRenderer::default();

        let err = Runner::new(&api, &mut renderer)
            .run("7656", 2024)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ReviewError>(),
            Some(ReviewError::MalformedData { .. })
        ));
    }
}
