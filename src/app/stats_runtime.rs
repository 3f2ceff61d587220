//! Background fetches of the coding-statistics feeds.
//!
//! Each endpoint is requested once at startup on its own task.  Results come
//! back over a channel; if the receiver is gone by then the result is simply
//! dropped.  There is no retry: a failed feed stays "no data".

use std::time::Duration;

use tokio::sync::mpsc;
use url::Url;

use crate::config::AppConfig;
use crate::core::stats::{self, DailyHours, Feed, LanguageShare, StatsError};

use super::state::AppState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub enum StatsUpdate {
    Daily(Result<Vec<DailyHours>, StatsError>),
    Languages(Result<Vec<LanguageShare>, StatsError>),
    Skills(Result<Vec<LanguageShare>, StatsError>),
}

pub fn build_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Fire one request per configured endpoint.
pub fn spawn_stats_fetch(
    tx: &mpsc::UnboundedSender<StatsUpdate>,
    client: &reqwest::Client,
    config: &AppConfig,
) {
    if let Some(url) = config.daily_endpoint.clone() {
        spawn_one(tx.clone(), client.clone(), url, |body| {
            StatsUpdate::Daily(body.and_then(|b| stats::parse_daily(&b)))
        });
    }
    if let Some(url) = config.languages_endpoint.clone() {
        spawn_one(tx.clone(), client.clone(), url, |body| {
            StatsUpdate::Languages(body.and_then(|b| stats::parse_languages(&b)))
        });
    }
    if let Some(url) = config.skills_endpoint.clone() {
        spawn_one(tx.clone(), client.clone(), url, |body| {
            StatsUpdate::Skills(body.and_then(|b| stats::parse_languages(&b)))
        });
    }
}

fn spawn_one<F>(tx: mpsc::UnboundedSender<StatsUpdate>, client: reqwest::Client, url: Url, wrap: F)
where
    F: FnOnce(Result<String, StatsError>) -> StatsUpdate + Send + 'static,
{
    tokio::spawn(async move {
        tracing::debug!(%url, "fetching stats");
        let body = fetch_text(&client, url).await;
        let _ = tx.send(wrap(body));
    });
}

async fn fetch_text(client: &reqwest::Client, url: Url) -> Result<String, StatsError> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}

/// Feeds that will never be requested show "no data" instead of a spinner.
pub fn mark_unfetched(state: &mut AppState, fetching: bool) {
    let config = &state.config;
    if !fetching || config.daily_endpoint.is_none() {
        state.daily = Feed::Unavailable;
    }
    if !fetching || config.languages_endpoint.is_none() {
        state.languages = Feed::Unavailable;
    }
    if !fetching || config.skills_endpoint.is_none() {
        state.skills = Feed::Unavailable;
    }
}

/// Fold a finished fetch into the widget state.
pub fn apply_stats_update(state: &mut AppState, update: StatsUpdate) {
    match update {
        StatsUpdate::Daily(result) => state.daily = into_feed("daily", result),
        StatsUpdate::Languages(result) => state.languages = into_feed("languages", result),
        StatsUpdate::Skills(result) => {
            let relevant = &state.content.skills.relevant;
            state.skills = match into_feed("skills", result) {
                Feed::Ready(shares) => Feed::Ready(stats::proficiency(&shares, relevant)),
                Feed::Pending => Feed::Pending,
                Feed::Unavailable => Feed::Unavailable,
            };
        }
    }
}

fn into_feed<T>(name: &str, result: Result<T, StatsError>) -> Feed<T> {
    match result {
        Ok(value) => {
            tracing::info!(feed = name, "stats loaded");
            Feed::Ready(value)
        }
        Err(e) => {
            tracing::warn!(feed = name, "stats unavailable: {e}");
            Feed::Unavailable
        }
    }
}
