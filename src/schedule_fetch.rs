use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::game_fetch::{u32_lenient, u32_or_zero};
use crate::http::get_json;
use crate::league::League;

const MODULEKIT_URL: &str = "https://lscluster.hockeytech.com/feed/";

/// One row of a league schedule, trimmed to what downstream scraping needs.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleGame {
    pub id: u32,
    pub date_played: String,
    pub season_id: u32,
    pub league: String,
    pub home_team: String,
    pub visiting_team: String,
    pub home_score: u32,
    pub visiting_score: u32,
}

/// All games in the league played inside `[start, end]` (inclusive).
/// Seasons without a known feed id are skipped, matching the tables in
/// [`League`]: the caller gets the games we can reach, not an error.
pub fn league_schedule(league: League, start: NaiveDate, end: NaiveDate) -> Result<Vec<ScheduleGame>> {
    let mut games = Vec::new();
    for label in season_labels(start, end) {
        let Some(season_id) = league.season_id(&label) else {
            continue;
        };
        let body = get_json(&schedule_url(league, season_id))
            .with_context(|| format!("schedule fetch failed for {league} {label}"))?;
        let rows = parse_schedule_json(&body, league, season_id)?;
        games.extend(in_window(rows, start, end));
    }
    Ok(games)
}

/// Season labels (`"2021-2022"`) spanned by a date window. A CHL season
/// runs autumn to spring, so dates through April belong to the season
/// labelled with the previous calendar year.
pub fn season_labels(start: NaiveDate, end: NaiveDate) -> Vec<String> {
    let start_year = if start.month() <= 4 {
        start.year() - 1
    } else {
        start.year()
    };
    let end_year = if end.month() <= 4 {
        end.year() - 1
    } else {
        end.year()
    };
    (start_year..=end_year)
        .map(|year| format!("{year}-{}", year + 1))
        .collect()
}

fn schedule_url(league: League, season_id: u32) -> String {
    format!(
        "{MODULEKIT_URL}?feed=modulekit&view=schedule&key={key}&fmt=json&client_code={code}&lang=en&season_id={season_id}&team_id=&league_code=",
        key = league.feed_key(),
        code = league.client_code(),
    )
}

pub fn parse_schedule_json(raw: &str, league: League, season_id: u32) -> Result<Vec<ScheduleGame>> {
    let envelope: SiteKitEnvelope =
        serde_json::from_str(raw).context("invalid schedule json")?;
    Ok(envelope
        .site_kit
        .schedule
        .into_iter()
        .map(|row| ScheduleGame {
            id: row.id,
            date_played: row.date_played,
            season_id,
            league: league.client_code().to_string(),
            home_team: row.home_team_code,
            visiting_team: row.visiting_team_code,
            home_score: row.home_goal_count,
            visiting_score: row.visiting_goal_count,
        })
        .collect())
}

/// Keep rows inside the window; rows with unparseable dates are dropped.
fn in_window(
    rows: Vec<ScheduleGame>,
    start: NaiveDate,
    end: NaiveDate,
) -> impl Iterator<Item = ScheduleGame> {
    rows.into_iter().filter(move |row| {
        NaiveDate::parse_from_str(&row.date_played, "%Y-%m-%d")
            .is_ok_and(|date| date >= start && date <= end)
    })
}

#[derive(Debug, Deserialize)]
struct SiteKitEnvelope {
    #[serde(rename = "SiteKit")]
    site_kit: SiteKitSchedule,
}

#[derive(Debug, Deserialize)]
struct SiteKitSchedule {
    #[serde(rename = "Schedule", default)]
    schedule: Vec<RawScheduleRow>,
}

#[derive(Debug, Deserialize)]
struct RawScheduleRow {
    #[serde(deserialize_with = "u32_lenient")]
    id: u32,
    date_played: String,
    home_team_code: String,
    visiting_team_code: String,
    #[serde(default, deserialize_with = "u32_or_zero")]
    home_goal_count: u32,
    #[serde(default, deserialize_with = "u32_or_zero")]
    visiting_goal_count: u32,
}
