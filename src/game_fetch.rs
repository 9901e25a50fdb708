use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

use crate::http::get_json;
use crate::league::League;

const GC_FEED_URL: &str = "https://cluster.leaguestat.com/feed/index.php";

/// Play-by-play URL for one game (`tab=pxpverbose`).
pub fn pxp_url(game_id: u32, league: League) -> String {
    game_tab_url(game_id, league, "pxpverbose")
}

/// Game-summary URL for one game (`tab=gamesummary`).
pub fn gamesummary_url(game_id: u32, league: League) -> String {
    game_tab_url(game_id, league, "gamesummary")
}

fn game_tab_url(game_id: u32, league: League, tab: &str) -> String {
    format!(
        "{GC_FEED_URL}?feed=gc&key={key}&client_code={code}&game_id={game_id}&lang_code=en&fmt=json&tab={tab}",
        key = league.feed_key(),
        code = league.client_code(),
    )
}

pub fn fetch_pxp(game_id: u32, league: League) -> Result<Vec<RawPxpEvent>> {
    let body = get_json(&pxp_url(game_id, league))?;
    parse_pxp_json(&body)
}

pub fn fetch_gamesummary(game_id: u32, league: League) -> Result<GameSummary> {
    let body = get_json(&gamesummary_url(game_id, league))?;
    parse_gamesummary_json(&body)
}

pub fn parse_pxp_json(raw: &str) -> Result<Vec<RawPxpEvent>> {
    let envelope: GcEnvelope<PxpTab> =
        serde_json::from_str(raw).context("invalid pxpverbose json")?;
    Ok(envelope.gc.pxpverbose)
}

pub fn parse_gamesummary_json(raw: &str) -> Result<GameSummary> {
    let envelope: GcEnvelope<SummaryTab> =
        serde_json::from_str(raw).context("invalid gamesummary json")?;
    Ok(envelope.gc.gamesummary)
}

#[derive(Debug, Deserialize)]
struct GcEnvelope<T> {
    #[serde(rename = "GC")]
    gc: T,
}

#[derive(Debug, Deserialize)]
struct PxpTab {
    #[serde(rename = "Pxpverbose", default)]
    pxpverbose: Vec<RawPxpEvent>,
}

#[derive(Debug, Deserialize)]
struct SummaryTab {
    #[serde(rename = "Gamesummary")]
    gamesummary: GameSummary,
}

/// One raw play-by-play row. The feed mixes numbers and numeric strings
/// from game to game, so everything the engine needs to interpret is kept
/// as an optional string and coerced by the normalizer, which owns the
/// malformed-field error reporting.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPxpEvent {
    pub event: String,
    #[serde(default, deserialize_with = "opt_stringly")]
    pub period_id: Option<String>,
    /// Seconds elapsed within the period.
    #[serde(default, deserialize_with = "opt_u32_lenient")]
    pub s: Option<u32>,
    #[serde(default, deserialize_with = "opt_stringly")]
    pub home: Option<String>,
    #[serde(default, deserialize_with = "opt_stringly")]
    pub home_win: Option<String>,
    #[serde(default, deserialize_with = "opt_stringly")]
    pub player_id: Option<String>,
    #[serde(default, deserialize_with = "opt_stringly")]
    pub game_goal_id: Option<String>,
    #[serde(default, deserialize_with = "opt_stringly")]
    pub home_player_id: Option<String>,
    #[serde(default, deserialize_with = "opt_stringly")]
    pub visitor_player_id: Option<String>,
    /// `"1"` when the penalty creates a man advantage.
    #[serde(default, deserialize_with = "opt_stringly")]
    pub pp: Option<String>,
    #[serde(default, deserialize_with = "opt_stringly")]
    pub player_served: Option<String>,
    #[serde(default, deserialize_with = "opt_stringly")]
    pub minutes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameSummary {
    pub meta: SummaryMeta,
    pub home: SummaryTeam,
    pub visitor: SummaryTeam,
    #[serde(default)]
    pub goals: Vec<SummaryGoal>,
    pub home_team_lineup: SummaryLineup,
    pub visitor_team_lineup: SummaryLineup,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryMeta {
    #[serde(deserialize_with = "u32_lenient")]
    pub id: u32,
    pub date_played: String,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub home_goal_count: u32,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub visiting_goal_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryTeam {
    pub name: String,
    pub team_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryGoal {
    #[serde(default, deserialize_with = "opt_stringly")]
    pub home: Option<String>,
    pub goal_scorer: PlayerRef,
    #[serde(default)]
    pub assist1_player: Option<PlayerRef>,
    #[serde(default)]
    pub assist2_player: Option<PlayerRef>,
    #[serde(default, deserialize_with = "opt_stringly")]
    pub power_play: Option<String>,
    #[serde(default, deserialize_with = "opt_stringly")]
    pub empty_net: Option<String>,
    #[serde(default, deserialize_with = "opt_stringly")]
    pub penalty_shot: Option<String>,
    #[serde(default, deserialize_with = "opt_stringly")]
    pub short_handed: Option<String>,
    /// On-ice skaters for the scoring team. Populated by the feed for
    /// even-strength goals only.
    #[serde(default)]
    pub plus: Vec<PlayerRef>,
    #[serde(default)]
    pub minus: Vec<PlayerRef>,
}

/// Player reference inside a goal record; `player_id` is the empty string
/// when the slot is unused (e.g. an unassisted goal's assist slots).
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRef {
    #[serde(default, deserialize_with = "opt_stringly")]
    pub player_id: Option<String>,
}

impl PlayerRef {
    pub fn id(&self) -> Option<u32> {
        self.player_id
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryLineup {
    #[serde(default)]
    pub players: Vec<SummarySkater>,
    #[serde(default)]
    pub goalies: Vec<SummaryGoalie>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarySkater {
    #[serde(deserialize_with = "u32_lenient")]
    pub player_id: u32,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub person_id: u32,
    #[serde(default)]
    pub position_str: String,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub goals: u32,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub assists: u32,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub shots: u32,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub shots_on: u32,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub faceoff_wins: u32,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub faceoff_attempts: u32,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub hits: u32,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub pim: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryGoalie {
    #[serde(deserialize_with = "u32_lenient")]
    pub player_id: u32,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub person_id: u32,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub seconds: u32,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub shots_against: u32,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub goals_against: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Stringly {
    Num(i64),
    Text(String),
}

pub(crate) fn opt_stringly<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Stringly>::deserialize(de)?;
    Ok(value.map(|v| match v {
        Stringly::Num(n) => n.to_string(),
        Stringly::Text(s) => s,
    }))
}

pub(crate) fn u32_lenient<'de, D>(de: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Stringly::deserialize(de)? {
        Stringly::Num(n) => u32::try_from(n).map_err(serde::de::Error::custom),
        Stringly::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

pub(crate) fn opt_u32_lenient<'de, D>(de: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Stringly>::deserialize(de)?;
    match value {
        None => Ok(None),
        Some(Stringly::Num(n)) => u32::try_from(n).map(Some).map_err(serde::de::Error::custom),
        Some(Stringly::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed.parse().map(Some).map_err(serde::de::Error::custom)
            }
        }
    }
}

/// Stat counts: empty strings and nulls read as zero, bad digits still fail.
pub(crate) fn u32_or_zero<'de, D>(de: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_u32_lenient(de)?.unwrap_or(0))
}
