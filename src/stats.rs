use serde::Serialize;

use crate::error::{Result, ScrapeError};
use crate::event::{Faceoff, Penalty, Shot};
use crate::game_fetch::{GameSummary, SummaryGoal, SummaryLineup};
use crate::gamestate::{GameStateEvents, Situated};

/// Game-state bucket a scoring event is credited under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Situation {
    EvenStrength,
    PowerPlay,
    ShortHanded,
    EmptyNet,
    PenaltyShot,
}

/// Classify by on-ice skater counts, from the acting player's own team
/// perspective.
pub fn situation_from_strengths(own: u8, opposing: u8) -> Situation {
    if own == opposing {
        Situation::EvenStrength
    } else if own > opposing {
        Situation::PowerPlay
    } else {
        Situation::ShortHanded
    }
}

/// Season-to-date style counts copied straight from the game summary,
/// plus the one counter (`penalties_taken`) we derive ourselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneralStats {
    pub goals: u32,
    pub assists: u32,
    pub shot_attempts: u32,
    pub shots_on_goal: u32,
    pub faceoff_wins: u32,
    pub faceoff_attempts: u32,
    pub hits: u32,
    pub pim: u32,
    pub penalties_taken: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvenStrengthStats {
    pub goals: u32,
    pub first_assists: u32,
    pub second_assists: u32,
    pub shots: u32,
    pub faceoff_wins: u32,
    pub faceoff_losses: u32,
    pub on_ice_goals_for: u32,
    pub on_ice_goals_against: u32,
}

/// Power-play and shorthanded buckets share a shape: no plus/minus, which
/// the feed only attributes for even-strength goals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpecialTeamsStats {
    pub goals: u32,
    pub first_assists: u32,
    pub second_assists: u32,
    pub shots: u32,
    pub faceoff_wins: u32,
    pub faceoff_losses: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmptyNetStats {
    pub goals: u32,
    pub first_assists: u32,
    pub second_assists: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PenaltyShotStats {
    pub goals: u32,
}

/// One rostered skater's full stat line for a single game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkaterStats {
    pub player_id: u32,
    pub person_id: u32,
    pub team_code: String,
    pub position: String,
    pub general: GeneralStats,
    pub even_strength: EvenStrengthStats,
    pub powerplay: SpecialTeamsStats,
    pub shorthanded: SpecialTeamsStats,
    pub empty_net: EmptyNetStats,
    pub penalty_shot: PenaltyShotStats,
}

impl SkaterStats {
    fn record_goal(&mut self, situation: Situation) {
        match situation {
            Situation::EvenStrength => self.even_strength.goals += 1,
            Situation::PowerPlay => self.powerplay.goals += 1,
            Situation::ShortHanded => self.shorthanded.goals += 1,
            Situation::EmptyNet => self.empty_net.goals += 1,
            Situation::PenaltyShot => self.penalty_shot.goals += 1,
        }
    }

    fn record_first_assist(&mut self, situation: Situation) {
        match situation {
            Situation::EvenStrength => self.even_strength.first_assists += 1,
            Situation::PowerPlay => self.powerplay.first_assists += 1,
            Situation::ShortHanded => self.shorthanded.first_assists += 1,
            Situation::EmptyNet => self.empty_net.first_assists += 1,
            // Penalty shots cannot be assisted.
            Situation::PenaltyShot => {}
        }
    }

    fn record_second_assist(&mut self, situation: Situation) {
        match situation {
            Situation::EvenStrength => self.even_strength.second_assists += 1,
            Situation::PowerPlay => self.powerplay.second_assists += 1,
            Situation::ShortHanded => self.shorthanded.second_assists += 1,
            Situation::EmptyNet => self.empty_net.second_assists += 1,
            Situation::PenaltyShot => {}
        }
    }

    fn record_shot(&mut self, situation: Situation) {
        match situation {
            Situation::EvenStrength => self.even_strength.shots += 1,
            Situation::PowerPlay => self.powerplay.shots += 1,
            Situation::ShortHanded => self.shorthanded.shots += 1,
            // Strength comparison never yields these.
            Situation::EmptyNet | Situation::PenaltyShot => {}
        }
    }

    fn record_faceoff(&mut self, situation: Situation, won: bool) {
        let bucket: (&mut u32, &mut u32) = match situation {
            Situation::EvenStrength => (
                &mut self.even_strength.faceoff_wins,
                &mut self.even_strength.faceoff_losses,
            ),
            Situation::PowerPlay => (
                &mut self.powerplay.faceoff_wins,
                &mut self.powerplay.faceoff_losses,
            ),
            Situation::ShortHanded => (
                &mut self.shorthanded.faceoff_wins,
                &mut self.shorthanded.faceoff_losses,
            ),
            Situation::EmptyNet | Situation::PenaltyShot => return,
        };
        if won {
            *bucket.0 += 1;
        } else {
            *bucket.1 += 1;
        }
    }
}

/// A goal record from the game summary, normalized for aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    pub is_home: bool,
    pub scorer: Option<u32>,
    pub first_assist: Option<u32>,
    pub second_assist: Option<u32>,
    pub power_play: bool,
    pub empty_net: bool,
    pub penalty_shot: bool,
    pub short_handed: bool,
    pub plus: Vec<u32>,
    pub minus: Vec<u32>,
}

impl Goal {
    /// Flag priority: all clear means even strength, then empty net beats
    /// power play beats shorthanded beats penalty shot.
    pub fn situation(&self) -> Situation {
        if !(self.power_play || self.empty_net || self.penalty_shot || self.short_handed) {
            Situation::EvenStrength
        } else if self.empty_net {
            Situation::EmptyNet
        } else if self.power_play {
            Situation::PowerPlay
        } else if self.short_handed {
            Situation::ShortHanded
        } else {
            Situation::PenaltyShot
        }
    }
}

pub fn normalize_goals(raw: &[SummaryGoal]) -> Result<Vec<Goal>> {
    raw.iter().map(normalize_goal).collect()
}

fn normalize_goal(raw: &SummaryGoal) -> Result<Goal> {
    let is_home = match raw.home.as_deref().map(str::trim) {
        Some("1") => true,
        Some("0") => false,
        other => {
            return Err(ScrapeError::InvalidHomeFlag {
                kind: "goal",
                value: other.unwrap_or("").to_string(),
            });
        }
    };
    Ok(Goal {
        is_home,
        scorer: raw.goal_scorer.id(),
        first_assist: raw.assist1_player.as_ref().and_then(|p| p.id()),
        second_assist: raw.assist2_player.as_ref().and_then(|p| p.id()),
        power_play: flag(raw.power_play.as_deref()),
        empty_net: flag(raw.empty_net.as_deref()),
        penalty_shot: flag(raw.penalty_shot.as_deref()),
        short_handed: flag(raw.short_handed.as_deref()),
        plus: raw.plus.iter().filter_map(|p| p.id()).collect(),
        minus: raw.minus.iter().filter_map(|p| p.id()).collect(),
    })
}

fn flag(value: Option<&str>) -> bool {
    value.map(str::trim) == Some("1")
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamLineups {
    pub home: Vec<SkaterStats>,
    pub visitor: Vec<SkaterStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalieStats {
    pub player_id: u32,
    pub person_id: u32,
    pub name: String,
    pub team_code: String,
    pub minutes: f64,
    pub shots_against: u32,
    pub goals_against: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamGoalies {
    pub home: Vec<GoalieStats>,
    pub visitor: Vec<GoalieStats>,
}

/// One zeroed record per rostered skater, general counts pre-filled from
/// the summary. Records live for the whole game's processing; players with
/// no events keep their zeroed buckets in the output.
pub fn seed_lineups(summary: &GameSummary) -> TeamLineups {
    TeamLineups {
        home: seed_lineup(&summary.home_team_lineup, &summary.home.team_code),
        visitor: seed_lineup(&summary.visitor_team_lineup, &summary.visitor.team_code),
    }
}

fn seed_lineup(lineup: &SummaryLineup, team_code: &str) -> Vec<SkaterStats> {
    lineup
        .players
        .iter()
        .map(|player| SkaterStats {
            player_id: player.player_id,
            person_id: player.person_id,
            team_code: team_code.to_string(),
            position: player.position_str.clone(),
            general: GeneralStats {
                goals: player.goals,
                assists: player.assists,
                shot_attempts: player.shots,
                shots_on_goal: player.shots_on,
                faceoff_wins: player.faceoff_wins,
                faceoff_attempts: player.faceoff_attempts,
                hits: player.hits,
                pim: player.pim,
                penalties_taken: 0,
            },
            even_strength: EvenStrengthStats::default(),
            powerplay: SpecialTeamsStats::default(),
            shorthanded: SpecialTeamsStats::default(),
            empty_net: EmptyNetStats::default(),
            penalty_shot: PenaltyShotStats::default(),
        })
        .collect()
}

/// Goalie lines come straight off the summary; the state engine plays no
/// part in them.
pub fn goalie_stats(summary: &GameSummary) -> TeamGoalies {
    let map = |lineup: &SummaryLineup, team_code: &str| {
        lineup
            .goalies
            .iter()
            .map(|goalie| GoalieStats {
                player_id: goalie.player_id,
                person_id: goalie.person_id,
                name: format!("{} {}", goalie.first_name, goalie.last_name),
                team_code: team_code.to_string(),
                minutes: f64::from(goalie.seconds) / 60.0,
                shots_against: goalie.shots_against,
                goals_against: goalie.goals_against,
            })
            .collect()
    };
    TeamGoalies {
        home: map(&summary.home_team_lineup, &summary.home.team_code),
        visitor: map(&summary.visitor_team_lineup, &summary.visitor.team_code),
    }
}

/// Walk the goal list and the annotated event stream, incrementing each
/// side's player records. Ids that match no rostered skater (empty-net
/// situations credit goalies, for one) are dropped silently.
pub fn populate_lineups(lineups: &mut TeamLineups, goals: &[Goal], events: &GameStateEvents) {
    populate_side(&mut lineups.home, true, goals, events);
    populate_side(&mut lineups.visitor, false, goals, events);
}

fn populate_side(
    lineup: &mut [SkaterStats],
    is_home: bool,
    goals: &[Goal],
    events: &GameStateEvents,
) {
    for goal in goals {
        record_plus_minus(lineup, goal);
    }
    for goal in goals.iter().filter(|g| g.is_home == is_home) {
        record_point_getters(lineup, goal);
    }
    for shot in events.shots.iter().filter(|s| s.event.is_home == is_home) {
        record_shot(lineup, shot, is_home);
    }
    for faceoff in &events.faceoffs {
        record_faceoff(lineup, faceoff, is_home);
    }
    for penalty in events.penalties.iter().filter(|p| p.event.is_home == is_home) {
        record_penalty(lineup, &penalty.event);
    }
}

fn find_player(lineup: &mut [SkaterStats], player_id: u32) -> Option<&mut SkaterStats> {
    lineup.iter_mut().find(|p| p.player_id == player_id)
}

fn record_plus_minus(lineup: &mut [SkaterStats], goal: &Goal) {
    if goal.situation() != Situation::EvenStrength {
        return;
    }
    for id in &goal.plus {
        if let Some(player) = find_player(lineup, *id) {
            player.even_strength.on_ice_goals_for += 1;
        }
    }
    for id in &goal.minus {
        if let Some(player) = find_player(lineup, *id) {
            player.even_strength.on_ice_goals_against += 1;
        }
    }
}

fn record_point_getters(lineup: &mut [SkaterStats], goal: &Goal) {
    let situation = goal.situation();
    if let Some(player) = goal.scorer.and_then(|id| find_player(lineup, id)) {
        player.record_goal(situation);
    }
    if let Some(player) = goal.first_assist.and_then(|id| find_player(lineup, id)) {
        player.record_first_assist(situation);
    }
    if let Some(player) = goal.second_assist.and_then(|id| find_player(lineup, id)) {
        player.record_second_assist(situation);
    }
}

fn record_shot(lineup: &mut [SkaterStats], shot: &Situated<Shot>, is_home: bool) {
    let Some(player) = find_player(lineup, shot.event.player_id) else {
        return;
    };
    let (own, opposing) = shot.relative_strengths(is_home);
    player.record_shot(situation_from_strengths(own, opposing));
}

fn record_faceoff(lineup: &mut [SkaterStats], faceoff: &Situated<Faceoff>, is_home: bool) {
    let taker_id = if is_home {
        faceoff.event.home_player_id
    } else {
        faceoff.event.visitor_player_id
    };
    let Some(player) = find_player(lineup, taker_id) else {
        return;
    };
    let won = faceoff.event.home_won == is_home;
    let (own, opposing) = faceoff.relative_strengths(is_home);
    player.record_faceoff(situation_from_strengths(own, opposing), won);
}

fn record_penalty(lineup: &mut [SkaterStats], penalty: &Penalty) {
    if let Some(player) = find_player(lineup, penalty.player_id) {
        player.general.penalties_taken += 1;
    }
}
