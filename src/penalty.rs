use std::collections::VecDeque;

/// Skaters per side at full strength, goalie excluded.
pub const FULL_STRENGTH: u8 = 5;
/// A team serves at most two penalties at once.
pub const BOX_SLOTS: usize = 2;
/// Original duration of a minor penalty.
pub const MINOR_SECS: u32 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePenalty {
    pub player_served: u32,
    pub duration_secs: u32,
    pub end_time: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueuedPenalty {
    player_served: u32,
    duration_secs: u32,
}

/// One team's penalty-box state machine. Holds up to [`BOX_SLOTS`] active
/// penalties plus a FIFO queue of assessed-but-not-yet-serving ones, and
/// advances monotonically with the game clock. There is no rollback;
/// callers must feed times in non-decreasing order.
#[derive(Debug, Clone, Default)]
pub struct PenaltyLedger {
    active: Vec<ActivePenalty>,
    waiting: VecDeque<QueuedPenalty>,
}

impl PenaltyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// On-ice skaters right now.
    pub fn strength(&self) -> u8 {
        FULL_STRENGTH - self.active.len() as u8
    }

    pub fn shorthanded(&self) -> bool {
        !self.active.is_empty()
    }

    fn is_active(&self, player_served: u32) -> bool {
        self.active
            .iter()
            .any(|p| p.player_served == player_served)
    }

    /// Record a newly assessed penalty at `time`. It starts serving
    /// immediately if a box slot is free and the player is not already in
    /// the box; otherwise it queues.
    pub fn add(&mut self, player_served: u32, duration_secs: u32, time: u32) {
        if self.active.len() < BOX_SLOTS && !self.is_active(player_served) {
            self.active.push(ActivePenalty {
                player_served,
                duration_secs,
                end_time: time + duration_secs,
            });
        } else {
            self.waiting.push_back(QueuedPenalty {
                player_served,
                duration_secs,
            });
        }
    }

    /// Expire every active penalty whose end time has passed, promoting one
    /// queued penalty per freed slot. A promoted penalty starts serving at
    /// the expiring penalty's end time, not at `time`: box time is
    /// continuous. Runs in passes until a pass expires nothing, so a
    /// promoted penalty that is itself already over cascades.
    pub fn advance(&mut self, time: u32) {
        loop {
            let mut expired = Vec::new();
            let mut i = 0;
            while i < self.active.len() {
                if self.active[i].end_time < time {
                    expired.push(self.active.remove(i));
                } else {
                    i += 1;
                }
            }
            if expired.is_empty() {
                return;
            }
            let expired_players: Vec<u32> =
                expired.iter().map(|p| p.player_served).collect();
            for vacated in &expired {
                self.promote(vacated.player_served, vacated.end_time, &expired_players);
            }
        }
    }

    /// A goal was scored against this team. Releases the first active
    /// minor (majors are never cut short) and promotes one queued penalty,
    /// which starts serving at the goal time.
    pub fn on_goal_against(&mut self, time: u32) {
        let Some(idx) = self
            .active
            .iter()
            .position(|p| p.duration_secs == MINOR_SECS)
        else {
            return;
        };
        let released = self.active.remove(idx);
        self.promote(released.player_served, time, &[released.player_served]);
    }

    /// Move one queued penalty into the box slot vacated by
    /// `vacated_player`. Preference goes to a queued penalty for the same
    /// player (stacked penalties continue back to back); failing that, the
    /// frontmost queued penalty whose player is neither in the box nor in
    /// `barred` (players whose own vacated slot handles their
    /// continuation).
    fn promote(&mut self, vacated_player: u32, start_time: u32, barred: &[u32]) {
        if self.active.len() >= BOX_SLOTS {
            return;
        }
        let idx = self
            .waiting
            .iter()
            .position(|q| q.player_served == vacated_player)
            .or_else(|| {
                self.waiting.iter().position(|q| {
                    !self.is_active(q.player_served) && !barred.contains(&q.player_served)
                })
            });
        if let Some(idx) = idx {
            if let Some(next) = self.waiting.remove(idx) {
                self.active.push(ActivePenalty {
                    player_served: next.player_served,
                    duration_secs: next.duration_secs,
                    end_time: start_time + next.duration_secs,
                });
            }
        }
    }

    #[cfg(test)]
    fn active_end_times(&self) -> Vec<u32> {
        self.active.iter().map(|p| p.end_time).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_penalty_waits_for_a_slot() {
        let mut ledger = PenaltyLedger::new();
        ledger.add(1, MINOR_SECS, 100);
        ledger.add(2, MINOR_SECS, 110);
        ledger.add(3, MINOR_SECS, 120);
        assert_eq!(ledger.strength(), 3);
        ledger.advance(150);
        assert_eq!(ledger.strength(), 3);
    }

    #[test]
    fn same_player_penalties_stack_in_the_queue() {
        let mut ledger = PenaltyLedger::new();
        ledger.add(1, MINOR_SECS, 0);
        ledger.add(1, MINOR_SECS, 30);
        assert_eq!(ledger.strength(), 4, "second penalty for player 1 must queue");
        ledger.advance(121);
        // Continuation starts at the first penalty's end, not at 121.
        assert_eq!(ledger.active_end_times(), vec![240]);
    }

    #[test]
    fn promotion_starts_at_expiry_time() {
        let mut ledger = PenaltyLedger::new();
        ledger.add(1, MINOR_SECS, 0); // ends at 120
        ledger.add(2, MINOR_SECS, 10);
        ledger.add(3, MINOR_SECS, 20); // waits
        ledger.advance(125);
        assert_eq!(ledger.strength(), 3);
        assert!(ledger.active_end_times().contains(&240), "120 + 120");
    }

    #[test]
    fn cascading_expiry_drains_a_long_queue() {
        let mut ledger = PenaltyLedger::new();
        ledger.add(1, MINOR_SECS, 0);
        ledger.add(2, MINOR_SECS, 0);
        ledger.add(3, MINOR_SECS, 0);
        ledger.add(4, MINOR_SECS, 0);
        // 1 and 2 end at 120, the promoted 3 and 4 at 240; by 500 all gone.
        ledger.advance(500);
        assert_eq!(ledger.strength(), 5);
        assert!(!ledger.shorthanded());
    }

    #[test]
    fn advance_is_idempotent() {
        let mut ledger = PenaltyLedger::new();
        ledger.add(1, MINOR_SECS, 0);
        ledger.add(2, 300, 0);
        ledger.advance(121);
        let snapshot = ledger.active_end_times();
        ledger.advance(121);
        assert_eq!(ledger.active_end_times(), snapshot);
    }

    #[test]
    fn goal_release_frees_a_minor_but_never_a_major() {
        let mut ledger = PenaltyLedger::new();
        ledger.add(1, 300, 0);
        ledger.add(2, MINOR_SECS, 60);
        ledger.on_goal_against(90);
        assert_eq!(ledger.strength(), 4);
        // Only the major remains.
        assert_eq!(ledger.active_end_times(), vec![300]);

        // A major-only box is untouched by further goals.
        ledger.on_goal_against(100);
        assert_eq!(ledger.strength(), 4);
    }

    #[test]
    fn goal_release_promotion_starts_at_goal_time() {
        let mut ledger = PenaltyLedger::new();
        ledger.add(1, MINOR_SECS, 0);
        ledger.add(2, MINOR_SECS, 10);
        ledger.add(3, MINOR_SECS, 20); // waits
        ledger.on_goal_against(50);
        assert_eq!(ledger.strength(), 3);
        assert!(ledger.active_end_times().contains(&170), "50 + 120");
    }

    #[test]
    fn queued_penalties_for_one_player_promote_fifo() {
        let mut ledger = PenaltyLedger::new();
        ledger.add(9, MINOR_SECS, 0);
        ledger.add(9, MINOR_SECS, 5);
        ledger.add(9, 300, 6);
        ledger.advance(121);
        // First queued (the minor) goes first.
        assert_eq!(ledger.active_end_times(), vec![240]);
        ledger.advance(241);
        assert_eq!(ledger.active_end_times(), vec![540]);
    }
}
