use anyhow::Context;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::event::normalize_events;
use crate::game_fetch::{GameSummary, RawPxpEvent, fetch_gamesummary, fetch_pxp};
use crate::gamestate::annotate_events;
use crate::league::League;
use crate::stats::{
    TeamGoalies, TeamLineups, goalie_stats, normalize_goals, populate_lineups, seed_lineups,
};

#[derive(Debug, Clone, Serialize)]
pub struct GameInfo {
    pub game_id: u32,
    pub date: String,
    pub league: String,
    pub home_team: String,
    pub home_code: String,
    pub visitor_team: String,
    pub visitor_code: String,
    pub home_goals: u32,
    pub visitor_goals: u32,
}

/// Everything derived from one game: descriptive info, per-skater
/// situational lines, goalie lines.
#[derive(Debug, Clone, Serialize)]
pub struct GameStats {
    pub game_info: GameInfo,
    pub lineups: TeamLineups,
    pub goalies: TeamGoalies,
}

fn game_info(summary: &GameSummary, league: League) -> GameInfo {
    GameInfo {
        game_id: summary.meta.id,
        date: summary.meta.date_played.clone(),
        league: league.client_code().to_string(),
        home_team: summary.home.name.clone(),
        home_code: summary.home.team_code.clone(),
        visitor_team: summary.visitor.name.clone(),
        visitor_code: summary.visitor.team_code.clone(),
        home_goals: summary.meta.home_goal_count,
        visitor_goals: summary.meta.visiting_goal_count,
    }
}

/// The whole pipeline on already-fetched feeds: normalize the play-by-play,
/// reconstruct game states, seed the lineup records, aggregate. Pure and
/// bounded; network never enters here.
pub fn compute_game_stats(
    summary: &GameSummary,
    pxp: &[RawPxpEvent],
    league: League,
) -> Result<GameStats> {
    let events = normalize_events(pxp)?;
    let annotated = annotate_events(&events)?;
    let goals = normalize_goals(&summary.goals)?;

    let mut lineups = seed_lineups(summary);
    populate_lineups(&mut lineups, &goals, &annotated);

    Ok(GameStats {
        game_info: game_info(summary, league),
        lineups,
        goalies: goalie_stats(summary),
    })
}

/// Fetch both feed tabs for a game and compute its stats.
pub fn scrape_game(game_id: u32, league: League) -> anyhow::Result<GameStats> {
    let pxp = fetch_pxp(game_id, league)
        .with_context(|| format!("play-by-play fetch failed for game {game_id}"))?;
    let summary = fetch_gamesummary(game_id, league)
        .with_context(|| format!("game summary fetch failed for game {game_id}"))?;
    let stats = compute_game_stats(&summary, &pxp, league)
        .with_context(|| format!("state reconstruction failed for game {game_id}"))?;
    Ok(stats)
}

/// Scrape many games in parallel. Each game carries its own ledger pair
/// and nothing is shared between games, so they are embarrassingly
/// parallel; one bad game does not sink the batch.
pub fn scrape_games(game_ids: &[u32], league: League) -> Vec<(u32, anyhow::Result<GameStats>)> {
    game_ids
        .par_iter()
        .map(|&game_id| (game_id, scrape_game(game_id, league)))
        .collect()
}
