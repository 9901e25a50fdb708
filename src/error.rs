use thiserror::Error;

/// Errors raised while reconstructing game state or resolving feed lookups.
///
/// Fatal variants abort the whole game's processing: without a usable home
/// indicator or penalty duration the skater-strength reconstruction cannot
/// proceed, and a partial result would misattribute every downstream stat.
/// Events referencing players absent from a lineup are NOT errors; the
/// aggregator drops that slot and keeps going.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("invalid home indicator {value:?} on {kind} event (expected \"1\" or \"0\")")]
    InvalidHomeFlag { kind: &'static str, value: String },

    #[error("penalty duration {value:?} is not a whole number of minutes")]
    MalformedDuration { value: String },

    #[error("player id {value:?} on {kind} event is not numeric")]
    InvalidPlayerId { kind: &'static str, value: String },

    #[error("{kind} event missing field {field:?}")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("unrecognized period label {0:?}")]
    MalformedPeriod(String),

    #[error("events out of order: {next}s follows {prev}s")]
    OutOfOrderEvents { prev: u32, next: u32 },

    #[error("unknown league {0:?} (expected ohl, whl, or lhjmq)")]
    UnknownLeague(String),

    #[error("no season id known for {league} season {season:?}")]
    UnknownSeason { league: String, season: String },

    #[error("no team id known for {league} team code {code:?}")]
    UnknownTeam { league: String, code: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
