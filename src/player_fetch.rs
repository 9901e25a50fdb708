use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::http::get_json;
use crate::league::League;

const MODULEKIT_URL: &str = "https://lscluster.hockeytech.com/feed/";

#[derive(Debug, Clone, Serialize)]
pub struct PlayerProfile {
    pub player_id: u32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthdate: Option<String>,
    pub height_inches: Option<u32>,
    pub weight_lbs: Option<u32>,
    pub shoots: Option<String>,
    pub image_url: Option<String>,
}

impl PlayerProfile {
    fn empty(player_id: u32) -> Self {
        PlayerProfile {
            player_id,
            first_name: None,
            last_name: None,
            birthdate: None,
            height_inches: None,
            weight_lbs: None,
            shoots: None,
            image_url: None,
        }
    }
}

pub fn fetch_player(league: League, player_id: u32) -> Result<PlayerProfile> {
    let body = get_json(&player_url(league, player_id))
        .with_context(|| format!("player fetch failed for {league} player {player_id}"))?;
    parse_player_json(&body, player_id)
}

fn player_url(league: League, player_id: u32) -> String {
    format!(
        "{MODULEKIT_URL}?feed=modulekit&view=player&key={key}&fmt=json&client_code={code}&league_code=&lang=en&player_id={player_id}&category=profile",
        key = league.feed_key(),
        code = league.client_code(),
    )
}

/// The player view replies 200 with an `error` member for unknown ids; that
/// maps to an all-`None` profile rather than a failure.
pub fn parse_player_json(raw: &str, player_id: u32) -> Result<PlayerProfile> {
    let root: Value = serde_json::from_str(raw).context("invalid player json")?;
    let player = root
        .get("SiteKit")
        .and_then(|v| v.get("Player"))
        .unwrap_or(&Value::Null);
    if player.is_null() || player.get("error").is_some() {
        return Ok(PlayerProfile::empty(player_id));
    }

    Ok(PlayerProfile {
        player_id,
        first_name: non_empty_string(player, "first_name"),
        last_name: non_empty_string(player, "last_name"),
        birthdate: non_empty_string(player, "birthdate"),
        height_inches: non_empty_string(player, "height")
            .as_deref()
            .and_then(height_to_inches),
        weight_lbs: non_empty_string(player, "weight").and_then(|w| w.trim().parse().ok()),
        shoots: non_empty_string(player, "shoots"),
        image_url: non_empty_string(player, "primary_image"),
    })
}

fn non_empty_string(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// The feed writes heights as `6'2` or `6.2` (feet and inches); a bare
/// number is whole feet.
pub fn height_to_inches(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let mut parts = if raw.contains('\'') {
        raw.split('\'')
    } else {
        raw.split('.')
    };
    let feet: u32 = parts.next()?.trim().parse().ok()?;
    let inches = match parts.next().map(str::trim).filter(|s| !s.is_empty()) {
        Some(part) => part.trim_end_matches('"').trim().parse().ok()?,
        None => 0,
    };
    Some(feet * 12 + inches)
}
