//! Scraper and situational-stats engine for CHL (OHL / WHL / LHJMQ) games
//! served by the HockeyTech feed cluster.
//!
//! The interesting part lives in [`penalty`] and [`gamestate`]: replaying a
//! game's shot/faceoff/penalty stream through per-team penalty ledgers to
//! recover how many skaters each side had on the ice at every event, which
//! is what lets [`stats`] split production into even-strength, power-play,
//! shorthanded, empty-net, and penalty-shot buckets. The fetch modules are
//! thin glue over the feed endpoints, split into pure `parse_*` functions
//! so everything downstream of HTTP is testable offline.

pub mod error;
pub mod event;
pub mod game;
pub mod game_fetch;
pub mod gamestate;
pub mod http;
pub mod league;
pub mod penalty;
pub mod player_fetch;
pub mod roster_fetch;
pub mod schedule_fetch;
pub mod stats;

pub use error::ScrapeError;
pub use game::{GameStats, compute_game_stats, scrape_game, scrape_games};
pub use league::League;
