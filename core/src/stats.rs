//! Class-wide stat blocks, the registry that shares them and the player roster.

use std::time::Duration;

use crate::{Faction, UnitKind};

/// Shape of the attack cooldown curve used by a class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CadencePattern {
    /// Quick attackers: `1000 / scale + 1000` milliseconds between attacks.
    Melee,
    /// Slow attackers: `1000 / scale + 2000` milliseconds between attacks.
    Heavy,
}

impl CadencePattern {
    /// Fixed portion of the cooldown that the cadence scale never reduces.
    #[must_use]
    pub const fn floor_ms(self) -> u64 {
        match self {
            Self::Melee => 1_000,
            Self::Heavy => 2_000,
        }
    }
}

/// Individual stat that progression and loot may raise by one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatKind {
    /// Health granted to newly spawned units and used as the health-bar maximum.
    Health,
    /// Damage dealt per attack.
    Attack,
    /// Distance covered per simulation tick while walking.
    Speed,
    /// Cadence scale; higher values shorten the attack cooldown.
    AttackCadence,
}

impl StatKind {
    /// Every upgradable stat in roll order.
    pub const ALL: [StatKind; 4] = [
        StatKind::Health,
        StatKind::Attack,
        StatKind::Speed,
        StatKind::AttackCadence,
    ];

    /// Human readable label used in notifications and the stats sheet.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Health => "Health",
            Self::Attack => "Attack",
            Self::Speed => "Speed",
            Self::AttackCadence => "Attack Speed",
        }
    }
}

/// Numeric combat profile shared by every instance of a unit class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatBlock {
    base_health: u32,
    attack: u32,
    speed: u32,
    cadence_scale: u32,
    attack_range: f32,
    area_effect: bool,
    cadence: CadencePattern,
}

impl StatBlock {
    /// Creates a stat block with a cadence scale of one.
    #[must_use]
    pub const fn new(
        base_health: u32,
        attack: u32,
        speed: u32,
        attack_range: f32,
        area_effect: bool,
        cadence: CadencePattern,
    ) -> Self {
        Self {
            base_health,
            attack,
            speed,
            cadence_scale: 1,
            attack_range,
            area_effect,
            cadence,
        }
    }

    /// Hardcoded profile a class starts every run with.
    #[must_use]
    pub const fn default_for(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Warrior => Self::new(5, 2, 5, 0.0, false, CadencePattern::Melee),
            UnitKind::Ranger => Self::new(3, 3, 6, 160.0, false, CadencePattern::Melee),
            UnitKind::Mage => Self::new(1, 5, 4, 120.0, true, CadencePattern::Heavy),
            UnitKind::Skeleton => Self::new(3, 1, 3, 0.0, false, CadencePattern::Melee),
            UnitKind::Zombie => Self::new(2, 2, 1, 0.0, false, CadencePattern::Heavy),
        }
    }

    /// Health a freshly spawned unit receives; also the health-bar maximum.
    #[must_use]
    pub const fn base_health(&self) -> u32 {
        self.base_health
    }

    /// Damage applied to each victim of an attack.
    #[must_use]
    pub const fn attack(&self) -> u32 {
        self.attack
    }

    /// Distance travelled per tick.
    #[must_use]
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// Integer divisor applied to the variable part of the cooldown. Always at least one.
    #[must_use]
    pub const fn cadence_scale(&self) -> u32 {
        self.cadence_scale
    }

    /// Centre-to-centre distance below which an opponent counts as in range.
    #[must_use]
    pub const fn attack_range(&self) -> f32 {
        self.attack_range
    }

    /// Whether one attack damages every opponent in range.
    #[must_use]
    pub const fn is_area_effect(&self) -> bool {
        self.area_effect
    }

    /// Cooldown curve of the class.
    #[must_use]
    pub const fn cadence(&self) -> CadencePattern {
        self.cadence
    }

    /// Minimum time that must accumulate between two attacks.
    #[must_use]
    pub fn attack_cooldown(&self) -> Duration {
        let scale = u64::from(self.cadence_scale.max(1));
        Duration::from_millis(1_000 / scale + self.cadence.floor_ms())
    }

    /// Raises the provided stat by exactly one point.
    pub fn raise(&mut self, stat: StatKind) {
        match stat {
            StatKind::Health => self.base_health = self.base_health.saturating_add(1),
            StatKind::Attack => self.attack = self.attack.saturating_add(1),
            StatKind::Speed => self.speed = self.speed.saturating_add(1),
            StatKind::AttackCadence => self.cadence_scale = self.cadence_scale.saturating_add(1),
        }
    }

    /// Reads the current value of an upgradable stat.
    #[must_use]
    pub const fn value(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Health => self.base_health,
            StatKind::Attack => self.attack,
            StatKind::Speed => self.speed,
            StatKind::AttackCadence => self.cadence_scale,
        }
    }
}

/// Registry of the live stat block for every unit class.
///
/// Entities never copy their class stats; damage, cooldown, speed and the
/// health-bar maximum are looked up here on every use, so upgrades apply to
/// units that are already on the field.
#[derive(Clone, Debug, PartialEq)]
pub struct StatRegistry {
    blocks: [StatBlock; UnitKind::ALL.len()],
}

impl StatRegistry {
    /// Creates a registry populated with the default profile of every class.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: UnitKind::ALL.map(StatBlock::default_for),
        }
    }

    /// Live stats of the provided class.
    #[must_use]
    pub fn get(&self, kind: UnitKind) -> &StatBlock {
        &self.blocks[kind.index()]
    }

    /// Raises one stat of one class by a single point.
    pub fn upgrade(&mut self, kind: UnitKind, stat: StatKind) {
        self.blocks[kind.index()].raise(stat);
    }

    /// Restores the hardcoded defaults for every class.
    pub fn reset_to_defaults(&mut self) {
        *self = Self::new();
    }
}

impl Default for StatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of playable units per class that are waiting to be placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Roster {
    counts: [u32; UnitKind::PLAYABLE.len()],
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            counts: [0; UnitKind::PLAYABLE.len()],
        }
    }

    /// Creates a roster from explicit warrior, ranger and mage counts.
    #[must_use]
    pub const fn from_counts(warriors: u32, rangers: u32, mages: u32) -> Self {
        Self {
            counts: [warriors, rangers, mages],
        }
    }

    /// Units of the class available for placement. Enemy classes always report zero.
    #[must_use]
    pub fn count(&self, kind: UnitKind) -> u32 {
        slot(kind).map_or(0, |index| self.counts[index])
    }

    /// Returns one unit of the class to the roster.
    ///
    /// Returns `false` without changing anything for enemy classes.
    pub fn add(&mut self, kind: UnitKind) -> bool {
        match slot(kind) {
            Some(index) => {
                self.counts[index] = self.counts[index].saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Withdraws one unit of the class for placement.
    ///
    /// Returns `false` when the class has nothing left; counts never go negative.
    pub fn take(&mut self, kind: UnitKind) -> bool {
        match slot(kind) {
            Some(index) if self.counts[index] > 0 => {
                self.counts[index] -= 1;
                true
            }
            _ => false,
        }
    }

    /// Sum of every class count.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Iterates `(class, count)` pairs in playable class order.
    pub fn iter(&self) -> impl Iterator<Item = (UnitKind, u32)> + '_ {
        UnitKind::PLAYABLE.into_iter().zip(self.counts.iter().copied())
    }
}

fn slot(kind: UnitKind) -> Option<usize> {
    match kind.faction() {
        Faction::Player => Some(kind.index()),
        Faction::Enemy => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_follows_class_pattern() {
        let registry = StatRegistry::new();
        assert_eq!(
            registry.get(UnitKind::Warrior).attack_cooldown(),
            Duration::from_millis(2_000)
        );
        assert_eq!(
            registry.get(UnitKind::Zombie).attack_cooldown(),
            Duration::from_millis(3_000)
        );
    }

    #[test]
    fn cooldown_shrinks_but_never_below_floor() {
        for kind in UnitKind::ALL {
            let mut block = StatBlock::default_for(kind);
            let floor = block.cadence().floor_ms();
            let mut previous = block.attack_cooldown();
            assert_eq!(previous, Duration::from_millis(1_000 + floor));
            for scale in 2..=64_u64 {
                block.raise(StatKind::AttackCadence);
                let cooldown = block.attack_cooldown();
                assert_eq!(cooldown, Duration::from_millis(1_000 / scale + floor));
                assert!(cooldown <= previous);
                assert!(cooldown >= Duration::from_millis(floor));
                previous = cooldown;
            }
        }
    }

    #[test]
    fn upgrades_touch_only_the_selected_field() {
        let mut registry = StatRegistry::new();
        registry.upgrade(UnitKind::Ranger, StatKind::Speed);

        let ranger = registry.get(UnitKind::Ranger);
        let default = StatBlock::default_for(UnitKind::Ranger);
        for stat in StatKind::ALL {
            let expected = default.value(stat) + u32::from(stat == StatKind::Speed);
            assert_eq!(ranger.value(stat), expected, "{stat:?}");
        }
        assert_eq!(registry.get(UnitKind::Mage), &StatBlock::default_for(UnitKind::Mage));
    }

    #[test]
    fn reset_restores_hardcoded_profiles() {
        let mut registry = StatRegistry::new();
        registry.upgrade(UnitKind::Zombie, StatKind::AttackCadence);
        registry.upgrade(UnitKind::Warrior, StatKind::Health);
        registry.reset_to_defaults();
        assert_eq!(registry, StatRegistry::new());
    }

    #[test]
    fn roster_rejects_enemy_classes_and_empty_withdrawals() {
        let mut roster = Roster::from_counts(1, 0, 0);
        assert!(!roster.add(UnitKind::Skeleton));
        assert!(!roster.take(UnitKind::Ranger));
        assert!(roster.take(UnitKind::Warrior));
        assert!(!roster.take(UnitKind::Warrior));
        assert_eq!(roster.total(), 0);
    }
}
