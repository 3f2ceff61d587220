//! Coding-activity statistics: payload shapes and the derived series the
//! charts draw.
//!
//! Only the fields the charts consume are modelled; everything else in the
//! provider's JSON is ignored.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

/// Hours of practice the proficiency bars are measured against.
pub const PROFICIENCY_TARGET_HOURS: f64 = 540.0;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

// ───────────────────────────────────────── wire shapes ───────

#[derive(Debug, Deserialize)]
struct DailyPayload {
    data: Vec<DailyEntry>,
}

#[derive(Debug, Deserialize)]
struct DailyEntry {
    range: DailyRange,
    grand_total: GrandTotal,
}

#[derive(Debug, Deserialize)]
struct DailyRange {
    date: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct GrandTotal {
    total_seconds: f64,
}

#[derive(Debug, Deserialize)]
struct LanguagePayload {
    data: Vec<LanguageShare>,
}

// ───────────────────────────────────────── derived ───────────

/// One bar of the weekly chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyHours {
    pub date: NaiveDate,
    pub hours: f64,
}

impl DailyHours {
    /// Short axis label, e.g. `"Mon, Jan 8"`.
    pub fn label(&self) -> String {
        self.date.format("%a, %b %-d").to_string()
    }
}

/// Share of total coding time spent in one language.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LanguageShare {
    pub name: String,
    pub percent: f64,
}

/// One row of the proficiency widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Proficiency {
    pub name: String,
    /// 0–100, progress toward [`PROFICIENCY_TARGET_HOURS`].
    pub percent: f64,
}

pub fn parse_daily(body: &str) -> Result<Vec<DailyHours>, StatsError> {
    let payload: DailyPayload = serde_json::from_str(body)?;
    Ok(payload
        .data
        .into_iter()
        .map(|d| DailyHours {
            date: d.range.date,
            hours: d.grand_total.total_seconds / 3600.0,
        })
        .collect())
}

pub fn parse_languages(body: &str) -> Result<Vec<LanguageShare>, StatsError> {
    let payload: LanguagePayload = serde_json::from_str(body)?;
    Ok(payload.data)
}

/// Keep only `relevant` languages (in feed order) and scale each share
/// against the practice target.
pub fn proficiency(shares: &[LanguageShare], relevant: &[String]) -> Vec<Proficiency> {
    shares
        .iter()
        .filter(|s| relevant.iter().any(|r| r == &s.name))
        .map(|s| Proficiency {
            name: s.name.clone(),
            percent: (s.percent * (PROFICIENCY_TARGET_HOURS / 100.0) / PROFICIENCY_TARGET_HOURS
                * 100.0)
                .clamp(0.0, 100.0),
        })
        .collect()
}

/// Load state of one feed as seen by its widget.
#[derive(Debug, Clone, PartialEq)]
pub enum Feed<T> {
    Pending,
    Ready(T),
    /// The fetch failed; the widget shows "no data" for the rest of the
    /// session.
    Unavailable,
}

impl<T> Default for Feed<T> {
    fn default() -> Self {
        Feed::Pending
    }
}

impl<T> Feed<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Feed::Ready(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAILY: &str = r#"{"data":[
        {"range":{"date":"2024-01-08","text":"Mon"},"grand_total":{"total_seconds":5400.0,"text":"1 hr 30 mins"}},
        {"range":{"date":"2024-01-09"},"grand_total":{"total_seconds":0}}
    ]}"#;

    const LANGS: &str = r##"{"data":[
        {"name":"Java","percent":41.5,"color":"#b07219"},
        {"name":"Markdown","percent":30.25},
        {"name":"Python","percent":28.25}
    ]}"##;

    #[test]
    fn daily_seconds_become_hours() {
        let days = parse_daily(DAILY).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].hours, 1.5);
        assert_eq!(days[1].hours, 0.0);
        assert_eq!(days[0].label(), "Mon, Jan 8");
    }

    #[test]
    fn languages_parse_ignoring_extra_fields() {
        let langs = parse_languages(LANGS).unwrap();
        assert_eq!(langs[0].name, "Java");
        assert_eq!(langs[1].percent, 30.25);
    }

    #[test]
    fn malformed_payload_is_decode_error() {
        assert!(matches!(parse_daily("{\"data\":5}"), Err(StatsError::Decode(_))));
        assert!(matches!(parse_languages("nope"), Err(StatsError::Decode(_))));
    }

    #[test]
    fn proficiency_filters_and_clamps() {
        let mut langs = parse_languages(LANGS).unwrap();
        langs.push(LanguageShare { name: "HTML".into(), percent: 250.0 });
        let relevant = vec!["Python".to_string(), "Java".to_string(), "HTML".to_string()];
        let rows = proficiency(&langs, &relevant);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Java", "Python", "HTML"]);
        assert!((rows[0].percent - 41.5).abs() < 1e-9);
        assert_eq!(rows[2].percent, 100.0);
    }
}
