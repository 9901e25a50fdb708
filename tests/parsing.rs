use std::path::Path;

use chl_scrape::game::compute_game_stats;
use chl_scrape::game_fetch::{parse_gamesummary_json, parse_pxp_json};
use chl_scrape::league::League;
use chl_scrape::schedule_fetch::parse_schedule_json;
use chl_scrape::stats::SkaterStats;

fn read_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

#[test]
fn pxp_fixture_parses_with_mixed_field_types() {
    let rows = parse_pxp_json(&read_fixture("pxpverbose.json")).unwrap();
    assert_eq!(rows.len(), 10);

    // `s` arrives both as a number and as a numeric string.
    assert_eq!(rows[0].s, Some(0));
    assert_eq!(rows[3].event, "penalty");
    assert_eq!(rows[3].s, Some(300));
    assert_eq!(rows[3].minutes.as_deref(), Some("2"));
    assert_eq!(rows[3].pp.as_deref(), Some("1"));

    // A shot that is not a goal carries an empty game_goal_id.
    assert_eq!(rows[2].game_goal_id.as_deref(), Some(""));
    assert_eq!(rows[6].game_goal_id.as_deref(), Some("77"));

    // Rows the engine ignores still parse.
    assert_eq!(rows[1].event, "goalie_change");
}

#[test]
fn gamesummary_fixture_parses_lineups_goals_and_meta() {
    let summary = parse_gamesummary_json(&read_fixture("gamesummary.json")).unwrap();

    assert_eq!(summary.meta.id, 26459);
    assert_eq!(summary.meta.date_played, "2023-01-07");
    assert_eq!(summary.meta.home_goal_count, 2);
    assert_eq!(summary.meta.visiting_goal_count, 1);
    assert_eq!(summary.home.team_code, "BAR");
    assert_eq!(summary.visitor.team_code, "OTT");

    assert_eq!(summary.goals.len(), 3);
    assert_eq!(summary.goals[0].goal_scorer.id(), Some(101));
    // Empty player_id slots read as absent ids.
    assert_eq!(
        summary.goals[0].assist2_player.as_ref().and_then(|p| p.id()),
        None
    );
    assert_eq!(summary.goals[1].plus.len(), 3);

    assert_eq!(summary.home_team_lineup.players.len(), 3);
    assert_eq!(summary.visitor_team_lineup.players.len(), 3);
    // pim came through as the empty string and reads as zero.
    assert_eq!(summary.home_team_lineup.players[2].pim, 0);
    assert_eq!(summary.home_team_lineup.goalies[0].seconds, 3600);
}

#[test]
fn schedule_fixture_parses_stringly_rows() {
    let games = parse_schedule_json(&read_fixture("schedule.json"), League::Ohl, 73).unwrap();
    assert_eq!(games.len(), 3);
    assert_eq!(games[0].id, 26459);
    assert_eq!(games[0].date_played, "2023-01-07");
    assert_eq!(games[0].home_team, "BAR");
    assert_eq!(games[0].visiting_team, "OTT");
    assert_eq!(games[0].home_score, 2);
    assert_eq!(games[0].visiting_score, 1);
    assert_eq!(games[0].season_id, 73);
    assert_eq!(games[0].league, "ohl");
}

fn skater(lineup: &[SkaterStats], player_id: u32) -> &SkaterStats {
    lineup
        .iter()
        .find(|p| p.player_id == player_id)
        .unwrap_or_else(|| panic!("player {player_id} missing from lineup"))
}

/// Runs the whole pipeline over the fixture game. The game: the visitor
/// takes a minor at 5:00 of the first, the home side scores on the power
/// play, then both teams trade even-strength goals.
#[test]
fn fixture_game_end_to_end() {
    let summary = parse_gamesummary_json(&read_fixture("gamesummary.json")).unwrap();
    let pxp = parse_pxp_json(&read_fixture("pxpverbose.json")).unwrap();
    let stats = compute_game_stats(&summary, &pxp, League::Ohl).unwrap();

    assert_eq!(stats.game_info.game_id, 26459);
    assert_eq!(stats.game_info.league, "ohl");
    assert_eq!(stats.game_info.home_code, "BAR");
    assert_eq!(stats.game_info.home_goals, 2);
    assert_eq!(stats.game_info.visitor_goals, 1);

    // Home center: won draws at 5v5, lost the one taken on the power play,
    // and scored the power-play goal.
    let c = skater(&stats.lineups.home, 101);
    assert_eq!(c.even_strength.faceoff_wins, 2);
    assert_eq!(c.powerplay.faceoff_losses, 1);
    assert_eq!(c.powerplay.shots, 1);
    assert_eq!(c.powerplay.goals, 1);
    assert_eq!(c.even_strength.on_ice_goals_for, 1);
    assert_eq!(c.even_strength.on_ice_goals_against, 1);

    // Home defenseman: power-play primary assist, then an even-strength
    // goal of his own in the third.
    let d = skater(&stats.lineups.home, 102);
    assert_eq!(d.powerplay.first_assists, 1);
    assert_eq!(d.even_strength.goals, 1);
    assert_eq!(d.even_strength.shots, 1);

    // Home winger: only appears on the minus side of the visitor goal. His
    // coincidental pp=0 penalty never reaches the ledger.
    let w = skater(&stats.lineups.home, 103);
    assert_eq!(w.even_strength.on_ice_goals_against, 1);
    assert_eq!(w.general.penalties_taken, 0);
    assert_eq!(w.general.pim, 0);

    // Visitor center: shorthanded draw won while killing the minor.
    let vc = skater(&stats.lineups.visitor, 201);
    assert_eq!(vc.even_strength.faceoff_losses, 2);
    assert_eq!(vc.shorthanded.faceoff_wins, 1);
    assert_eq!(vc.even_strength.goals, 1);
    assert_eq!(vc.even_strength.shots, 1);

    // Visitor defenseman took the tripping minor and picked up the
    // primary assist on the second goal.
    let vd = skater(&stats.lineups.visitor, 202);
    assert_eq!(vd.general.penalties_taken, 1);
    assert_eq!(vd.even_strength.first_assists, 1);

    let vw = skater(&stats.lineups.visitor, 203);
    assert_eq!(vw.even_strength.shots, 1);
    assert_eq!(vw.even_strength.second_assists, 1);

    // Goalies come straight off the summary.
    assert_eq!(stats.goalies.home.len(), 1);
    let home_goalie = &stats.goalies.home[0];
    assert_eq!(home_goalie.player_id, 190);
    assert_eq!(home_goalie.name, "Mack Guzda");
    assert!((home_goalie.minutes - 60.0).abs() < f64::EPSILON);
    assert_eq!(home_goalie.goals_against, 1);
    assert_eq!(stats.goalies.visitor[0].goals_against, 2);
}
