//! Room progression state machine.

use std::time::Duration;

use storm_castle_core::RoomPhase;
use storm_castle_system_progression::WaveBounds;

/// What a room update asks the world to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RoomStep {
    /// Nothing changed.
    Holding,
    /// The enemy group just emptied.
    Cleared { rooms_cleared: u32 },
    /// The transition countdown elapsed; survivors go back and a new wave is due.
    TransitionDue { rooms_cleared: u32 },
}

/// Tracks the current room, the cleared-room count and the wave-size bounds.
#[derive(Clone, Debug)]
pub(crate) struct RoomController {
    phase: RoomPhase,
    rooms_cleared: u32,
    bounds: WaveBounds,
    transition: Duration,
}

impl RoomController {
    pub(crate) const fn new(transition: Duration) -> Self {
        Self {
            phase: RoomPhase::Populated,
            rooms_cleared: 0,
            bounds: WaveBounds::initial(),
            transition,
        }
    }

    pub(crate) const fn phase(&self) -> RoomPhase {
        self.phase
    }

    pub(crate) const fn rooms_cleared(&self) -> u32 {
        self.rooms_cleared
    }

    pub(crate) const fn bounds(&self) -> WaveBounds {
        self.bounds
    }

    /// Forgets every cleared room and restores the first-room bounds.
    pub(crate) fn restart(&mut self) {
        self.phase = RoomPhase::Populated;
        self.rooms_cleared = 0;
        self.bounds = WaveBounds::initial();
    }

    /// Advances the countdown once the combat pass of a tick has finished.
    ///
    /// The tick that empties the room starts the countdown at zero without
    /// counting its own `dt`.
    pub(crate) fn advance(&mut self, enemies_remaining: bool, dt: Duration) -> RoomStep {
        if enemies_remaining {
            self.phase = RoomPhase::Populated;
            return RoomStep::Holding;
        }

        match self.phase {
            RoomPhase::Populated => {
                self.rooms_cleared = self.rooms_cleared.saturating_add(1);
                self.phase = RoomPhase::Clearing {
                    elapsed: Duration::ZERO,
                };
                RoomStep::Cleared {
                    rooms_cleared: self.rooms_cleared,
                }
            }
            RoomPhase::Clearing { elapsed } => {
                let elapsed = elapsed.saturating_add(dt);
                if elapsed >= self.transition {
                    self.phase = RoomPhase::ReadyForNextRoom;
                    RoomStep::TransitionDue {
                        rooms_cleared: self.rooms_cleared,
                    }
                } else {
                    self.phase = RoomPhase::Clearing { elapsed };
                    RoomStep::Holding
                }
            }
            RoomPhase::ReadyForNextRoom => RoomStep::TransitionDue {
                rooms_cleared: self.rooms_cleared,
            },
        }
    }

    /// Widens the bounds for the rooms cleared so far and reopens the room.
    pub(crate) fn begin_next_room(&mut self) -> WaveBounds {
        self.bounds.widen_for(self.rooms_cleared);
        self.phase = RoomPhase::Populated;
        self.bounds
    }
}
