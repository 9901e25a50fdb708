use crate::error::{Result, ScrapeError};
use crate::game_fetch::RawPxpEvent;

const PERIOD_SECS: u32 = 1200;
const REGULATION_SECS: u32 = 3 * PERIOD_SECS;

/// A play-by-play event after normalization: absolute game clock, proper
/// booleans, integer ids. Only the three kinds the state engine cares
/// about survive the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Shot(Shot),
    Faceoff(Faceoff),
    Penalty(Penalty),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shot {
    pub time: u32,
    pub is_home: bool,
    pub player_id: u32,
    /// True when the feed links this shot to a goal record.
    pub is_goal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Faceoff {
    pub time: u32,
    pub home_won: bool,
    pub home_player_id: u32,
    pub visitor_player_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Penalty {
    pub time: u32,
    pub is_home: bool,
    /// The penalized player.
    pub player_id: u32,
    /// The player sitting in the box, which can differ from the offender
    /// (bench minors, goalie penalties).
    pub player_served: u32,
    pub duration_secs: u32,
}

impl Event {
    pub fn time(&self) -> u32 {
        match self {
            Event::Shot(shot) => shot.time,
            Event::Faceoff(faceoff) => faceoff.time,
            Event::Penalty(penalty) => penalty.time,
        }
    }
}

/// Filters raw play-by-play rows down to shots, faceoffs, and
/// advantage-creating penalties, and normalizes their fields. The result is
/// stably sorted by game clock; the feed is chronological in practice but
/// the annotator's monotonic ledger cannot tolerate it being wrong.
pub fn normalize_events(raw: &[RawPxpEvent]) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for row in raw {
        let event = match row.event.as_str() {
            "shot" => Event::Shot(normalize_shot(row)?),
            "faceoff" => Event::Faceoff(normalize_faceoff(row)?),
            "penalty" if row.pp.as_deref() == Some("1") => {
                Event::Penalty(normalize_penalty(row)?)
            }
            _ => continue,
        };
        events.push(event);
    }
    events.sort_by_key(Event::time);
    Ok(events)
}

fn normalize_shot(row: &RawPxpEvent) -> Result<Shot> {
    Ok(Shot {
        time: absolute_time(row, "shot")?,
        is_home: home_flag(row.home.as_deref(), "shot")?,
        player_id: numeric_field(row.player_id.as_deref(), "shot", "player_id")?,
        is_goal: row
            .game_goal_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty()),
    })
}

fn normalize_faceoff(row: &RawPxpEvent) -> Result<Faceoff> {
    Ok(Faceoff {
        time: absolute_time(row, "faceoff")?,
        home_won: home_flag(row.home_win.as_deref(), "faceoff")?,
        home_player_id: numeric_field(row.home_player_id.as_deref(), "faceoff", "home_player_id")?,
        visitor_player_id: numeric_field(
            row.visitor_player_id.as_deref(),
            "faceoff",
            "visitor_player_id",
        )?,
    })
}

fn normalize_penalty(row: &RawPxpEvent) -> Result<Penalty> {
    let minutes = row
        .minutes
        .as_deref()
        .ok_or(ScrapeError::MissingField {
            kind: "penalty",
            field: "minutes",
        })?
        .trim();
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| ScrapeError::MalformedDuration {
            value: minutes.to_string(),
        })?;
    let player_served = numeric_field(row.player_served.as_deref(), "penalty", "player_served")?;
    // Bench penalties can omit the offender; the server stands in.
    let player_id = match row.player_id.as_deref() {
        Some(raw) => numeric_field(Some(raw), "penalty", "player_id")?,
        None => player_served,
    };
    Ok(Penalty {
        time: absolute_time(row, "penalty")?,
        is_home: home_flag(row.home.as_deref(), "penalty")?,
        player_id,
        player_served,
        duration_secs: minutes * 60,
    })
}

/// Seconds elapsed since the opening faceoff: `(period - 1) * 1200 + s`
/// for regulation periods, `3600 + s` for overtime (`period_id == "OT"`).
fn absolute_time(row: &RawPxpEvent, kind: &'static str) -> Result<u32> {
    let secs = row.s.ok_or(ScrapeError::MissingField { kind, field: "s" })?;
    let period = row
        .period_id
        .as_deref()
        .ok_or(ScrapeError::MissingField {
            kind,
            field: "period_id",
        })?
        .trim();
    if period.eq_ignore_ascii_case("OT") {
        return Ok(REGULATION_SECS + secs);
    }
    let period: u32 = period
        .parse()
        .map_err(|_| ScrapeError::MalformedPeriod(period.to_string()))?;
    if period == 0 {
        return Err(ScrapeError::MalformedPeriod(period.to_string()));
    }
    Ok((period - 1) * PERIOD_SECS + secs)
}

/// `"1"` / `"0"` to bool. Anything else is fatal: without knowing which
/// team an event belongs to, state reconstruction cannot continue.
fn home_flag(value: Option<&str>, kind: &'static str) -> Result<bool> {
    match value.map(str::trim) {
        Some("1") => Ok(true),
        Some("0") => Ok(false),
        other => Err(ScrapeError::InvalidHomeFlag {
            kind,
            value: other.unwrap_or("").to_string(),
        }),
    }
}

fn numeric_field(value: Option<&str>, kind: &'static str, field: &'static str) -> Result<u32> {
    let raw = value
        .ok_or(ScrapeError::MissingField { kind, field })?
        .trim();
    raw.parse().map_err(|_| ScrapeError::InvalidPlayerId {
        kind,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(event: &str) -> RawPxpEvent {
        RawPxpEvent {
            event: event.to_string(),
            period_id: Some("1".to_string()),
            s: Some(0),
            home: Some("1".to_string()),
            home_win: Some("1".to_string()),
            player_id: Some("100".to_string()),
            game_goal_id: None,
            home_player_id: Some("100".to_string()),
            visitor_player_id: Some("200".to_string()),
            pp: Some("1".to_string()),
            player_served: Some("100".to_string()),
            minutes: Some("2".to_string()),
        }
    }

    #[test]
    fn absolute_clock_spans_periods_and_overtime() {
        let mut row = raw("shot");
        row.period_id = Some("2".to_string());
        row.s = Some(30);
        assert_eq!(absolute_time(&row, "shot").unwrap(), 1230);

        row.period_id = Some("OT".to_string());
        row.s = Some(45);
        assert_eq!(absolute_time(&row, "shot").unwrap(), 3645);
    }

    #[test]
    fn malformed_home_flag_is_fatal() {
        let mut row = raw("shot");
        row.home = Some("yes".to_string());
        let err = normalize_events(&[row]).unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidHomeFlag { .. }));
    }

    #[test]
    fn malformed_penalty_duration_is_fatal() {
        let mut row = raw("penalty");
        row.minutes = Some("two".to_string());
        let err = normalize_events(&[row]).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedDuration { .. }));
    }

    #[test]
    fn non_advantage_penalties_and_other_events_are_dropped() {
        let mut coincidental = raw("penalty");
        coincidental.pp = Some("0".to_string());
        let goalie_change = raw("goalie_change");
        let events = normalize_events(&[coincidental, goalie_change]).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn faceoff_home_field_comes_from_home_win() {
        let mut row = raw("faceoff");
        row.home_win = Some("0".to_string());
        // A garbage `home` value must not matter for faceoffs.
        row.home = Some("x".to_string());
        let events = normalize_events(&[row]).unwrap();
        match &events[0] {
            Event::Faceoff(faceoff) => assert!(!faceoff.home_won),
            other => panic!("expected faceoff, got {other:?}"),
        }
    }

    #[test]
    fn output_is_sorted_by_clock() {
        let mut late = raw("shot");
        late.s = Some(500);
        let mut early = raw("shot");
        early.s = Some(100);
        let events = normalize_events(&[late, early]).unwrap();
        assert_eq!(events[0].time(), 100);
        assert_eq!(events[1].time(), 500);
    }
}
