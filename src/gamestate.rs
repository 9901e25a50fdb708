use crate::error::{Result, ScrapeError};
use crate::event::{Event, Faceoff, Penalty, Shot};
use crate::penalty::PenaltyLedger;

/// An event stamped with both teams' on-ice skater counts at the instant
/// it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Situated<T> {
    pub event: T,
    pub home_strength: u8,
    pub visitor_strength: u8,
}

impl<T> Situated<T> {
    /// Strengths as (own, opposing) from one side's perspective.
    pub fn relative_strengths(&self, is_home: bool) -> (u8, u8) {
        if is_home {
            (self.home_strength, self.visitor_strength)
        } else {
            (self.visitor_strength, self.home_strength)
        }
    }
}

/// The annotated event stream, partitioned by kind for the aggregator.
#[derive(Debug, Clone, Default)]
pub struct GameStateEvents {
    pub shots: Vec<Situated<Shot>>,
    pub faceoffs: Vec<Situated<Faceoff>>,
    pub penalties: Vec<Situated<Penalty>>,
}

/// Replays the normalized event stream through a pair of penalty ledgers
/// and stamps every event with the skater strengths in effect when it
/// happened.
///
/// Per event: both ledgers advance to the event's clock, strengths are
/// read, and only then does the event mutate state — a goal releases a
/// minor on the conceding (shorthanded) side, a new penalty enters the
/// offending side's ledger. The penalty therefore does not affect the
/// strength stamped on its own event.
///
/// The ledgers are monotonic, so a decreasing clock is rejected rather
/// than silently producing wrong strengths.
pub fn annotate_events(events: &[Event]) -> Result<GameStateEvents> {
    let mut home = PenaltyLedger::new();
    let mut visitor = PenaltyLedger::new();
    let mut out = GameStateEvents::default();
    let mut clock = 0u32;

    for event in events {
        let time = event.time();
        if time < clock {
            return Err(ScrapeError::OutOfOrderEvents {
                prev: clock,
                next: time,
            });
        }
        clock = time;

        home.advance(time);
        visitor.advance(time);
        let home_strength = home.strength();
        let visitor_strength = visitor.strength();

        match event {
            Event::Shot(shot) => {
                if shot.is_goal {
                    let conceding = if shot.is_home { &mut visitor } else { &mut home };
                    if conceding.shorthanded() {
                        conceding.on_goal_against(time);
                    }
                }
                out.shots.push(Situated {
                    event: shot.clone(),
                    home_strength,
                    visitor_strength,
                });
            }
            Event::Faceoff(faceoff) => out.faceoffs.push(Situated {
                event: faceoff.clone(),
                home_strength,
                visitor_strength,
            }),
            Event::Penalty(penalty) => {
                let ledger = if penalty.is_home { &mut home } else { &mut visitor };
                ledger.add(penalty.player_served, penalty.duration_secs, time);
                out.penalties.push(Situated {
                    event: penalty.clone(),
                    home_strength,
                    visitor_strength,
                });
            }
        }
    }

    Ok(out)
}
