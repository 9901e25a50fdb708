use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use chl_scrape::League;
use chl_scrape::game::{scrape_game, scrape_games};
use chl_scrape::player_fetch::fetch_player;
use chl_scrape::roster_fetch::team_roster;
use chl_scrape::schedule_fetch::league_schedule;

const USAGE: &str = "\
usage: chl_scrape <command> [args]

commands:
  game     <league> <game_id>            stats for one game
  games    <league> <game_id>...         stats for several games (parallel)
  schedule <league> <start> <end>        games between two YYYY-MM-DD dates
  roster   <league> <team_code> <season> team roster (season as YYYY-YYYY)
  player   <league> <player_id>          player profile

leagues: ohl, whl, lhjmq";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        bail!("{USAGE}");
    };

    match command.as_str() {
        "game" => {
            let [league, game_id] = expect_args(rest)?;
            let league: League = league.parse()?;
            let game_id = parse_game_id(game_id)?;
            print_json(&scrape_game(game_id, league)?)
        }
        "games" => {
            if rest.len() < 2 {
                bail!("games takes a league and at least one game id\n\n{USAGE}");
            }
            let league: League = rest[0].parse()?;
            let game_ids = rest[1..]
                .iter()
                .map(|raw| parse_game_id(raw))
                .collect::<Result<Vec<_>>>()?;
            let mut stats = Vec::new();
            for (game_id, result) in scrape_games(&game_ids, league) {
                match result {
                    Ok(game) => stats.push(game),
                    Err(err) => eprintln!("[WARN] game {game_id}: {err:#}"),
                }
            }
            print_json(&stats)
        }
        "schedule" => {
            let [league, start, end] = expect_args(rest)?;
            let league: League = league.parse()?;
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            print_json(&league_schedule(league, start, end)?)
        }
        "roster" => {
            let [league, team_code, season] = expect_args(rest)?;
            let league: League = league.parse()?;
            print_json(&team_roster(league, team_code, season)?)
        }
        "player" => {
            let [league, player_id] = expect_args(rest)?;
            let league: League = league.parse()?;
            let player_id: u32 = player_id
                .parse()
                .with_context(|| format!("bad player id {player_id:?}"))?;
            print_json(&fetch_player(league, player_id)?)
        }
        other => bail!("unknown command {other:?}\n\n{USAGE}"),
    }
}

fn expect_args<const N: usize>(rest: &[String]) -> Result<[&str; N]> {
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    args.try_into()
        .map_err(|_| anyhow::anyhow!("wrong number of arguments\n\n{USAGE}"))
}

fn parse_game_id(raw: &str) -> Result<u32> {
    raw.parse().with_context(|| format!("bad game id {raw:?}"))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("bad date {raw:?} (expected YYYY-MM-DD)"))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("failed to serialize output")?
    );
    Ok(())
}
