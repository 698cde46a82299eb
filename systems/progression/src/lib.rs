#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Numeric policy tables governing difficulty growth, unit grants and loot.
//!
//! Every random decision draws from the caller's generator so the world can
//! replay a run exactly from its seed.

use rand::Rng;
use storm_castle_core::{ChestUpgrade, StatKind, StatRegistry, UnitKind};

/// Enemy classes grow stronger every this many cleared rooms.
pub const ESCALATION_INTERVAL: u32 = 3;
/// A new playable unit joins every this many cleared rooms.
pub const GRANT_INTERVAL: u32 = 5;
/// Both wave-size bounds widen every this many cleared rooms.
pub const BOUND_WIDENING_INTERVAL: u32 = 5;
/// Extra headroom added to the upper bound after the very first room.
pub const FIRST_ROOM_UPPER_BONUS: u32 = 2;

/// Reports whether the room just cleared triggers a difficulty escalation.
#[must_use]
pub const fn escalation_due(rooms_cleared: u32) -> bool {
    rooms_cleared != 0 && rooms_cleared % ESCALATION_INTERVAL == 0
}

/// Reports whether the room just cleared grants a new playable unit.
#[must_use]
pub const fn grant_due(rooms_cleared: u32) -> bool {
    rooms_cleared != 0 && rooms_cleared % GRANT_INTERVAL == 0
}

/// Inclusive range the next wave's enemy count is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WaveBounds {
    lower: u32,
    upper: u32,
}

impl WaveBounds {
    /// Bounds used by the first room of every run.
    #[must_use]
    pub const fn initial() -> Self {
        Self { lower: 1, upper: 1 }
    }

    /// Smallest possible wave.
    #[must_use]
    pub const fn lower(&self) -> u32 {
        self.lower
    }

    /// Largest possible wave.
    #[must_use]
    pub const fn upper(&self) -> u32 {
        self.upper
    }

    /// Applies the widening schedule for the room count reached.
    ///
    /// Called once per room transition, before the next wave is drawn.
    pub fn widen_for(&mut self, rooms_cleared: u32) {
        if rooms_cleared == 1 {
            self.upper = self.upper.saturating_add(FIRST_ROOM_UPPER_BONUS);
        }
        if rooms_cleared != 0 && rooms_cleared % BOUND_WIDENING_INTERVAL == 0 {
            self.lower = self.lower.saturating_add(1);
            self.upper = self.upper.saturating_add(1);
        }
    }

    /// Draws a wave size uniformly from the bounds.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.lower..=self.upper)
    }
}

impl Default for WaveBounds {
    fn default() -> Self {
        Self::initial()
    }
}

/// Enemy stat raised by a difficulty escalation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Escalation {
    /// Enemy class that grew stronger.
    pub kind: UnitKind,
    /// Stat raised by one point.
    pub stat: StatKind,
}

/// Picks one enemy class and one of its stats at random and raises it by one.
pub fn escalate_difficulty<R: Rng + ?Sized>(
    rng: &mut R,
    registry: &mut StatRegistry,
) -> Escalation {
    let kind = pick(rng, &UnitKind::ENEMIES);
    let stat = pick(rng, &StatKind::ALL);
    registry.upgrade(kind, stat);
    Escalation { kind, stat }
}

/// Picks the playable class that receives a newly granted unit.
pub fn grant_unit<R: Rng + ?Sized>(rng: &mut R) -> UnitKind {
    pick(rng, &UnitKind::PLAYABLE)
}

/// Rolls the upgrade a chest will grant; called once when the chest spawns.
pub fn roll_chest_upgrade<R: Rng + ?Sized>(rng: &mut R) -> ChestUpgrade {
    let kind = pick(rng, &UnitKind::PLAYABLE);
    let stat = pick(rng, &StatKind::ALL);
    ChestUpgrade { kind, stat }
}

fn pick<R: Rng + ?Sized, T: Copy, const N: usize>(rng: &mut R, choices: &[T; N]) -> T {
    choices[rng.gen_range(0..N)]
}
