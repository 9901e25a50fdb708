use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;
use crate::game_fetch::{opt_u32_lenient, u32_lenient};
use crate::http::get_json;
use crate::league::League;

const MODULEKIT_URL: &str = "https://lscluster.hockeytech.com/feed/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterPlayer {
    #[serde(alias = "id", deserialize_with = "u32_lenient")]
    pub player_id: u32,
    #[serde(default, deserialize_with = "opt_u32_lenient")]
    pub person_id: Option<u32>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, alias = "tp_jersey_number", deserialize_with = "opt_u32_lenient")]
    pub jersey_number: Option<u32>,
}

/// Fetch a team's roster for one season. The team code and season label
/// must both resolve through the league's lookup tables.
pub fn team_roster(league: League, team_code: &str, season: &str) -> Result<Vec<RosterPlayer>> {
    let season_id = league
        .season_id(season)
        .ok_or_else(|| ScrapeError::UnknownSeason {
            league: league.to_string(),
            season: season.to_string(),
        })?;
    let team_id = league
        .team_id(team_code)
        .ok_or_else(|| ScrapeError::UnknownTeam {
            league: league.to_string(),
            code: team_code.to_string(),
        })?;
    let body = get_json(&roster_url(league, team_id, season_id))
        .with_context(|| format!("roster fetch failed for {league} {team_code} {season}"))?;
    parse_roster_json(&body)
}

fn roster_url(league: League, team_id: u32, season_id: u32) -> String {
    format!(
        "{MODULEKIT_URL}?feed=modulekit&view=roster&key={key}&fmt=json&client_code={code}&league_code=&lang=en&team_id={team_id}&category=profile&season_id={season_id}",
        key = league.feed_key(),
        code = league.client_code(),
    )
}

pub fn parse_roster_json(raw: &str) -> Result<Vec<RosterPlayer>> {
    let envelope: SiteKitEnvelope = serde_json::from_str(raw).context("invalid roster json")?;
    Ok(envelope.site_kit.roster)
}

#[derive(Debug, Deserialize)]
struct SiteKitEnvelope {
    #[serde(rename = "SiteKit")]
    site_kit: SiteKitRoster,
}

#[derive(Debug, Deserialize)]
struct SiteKitRoster {
    #[serde(rename = "Roster", default)]
    roster: Vec<RosterPlayer>,
}
