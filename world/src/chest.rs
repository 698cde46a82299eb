//! Loot chests sharing the enemy group.

use glam::Vec2;
use storm_castle_core::{ChestSnapshot, ChestUpgrade, EntityId, Rect, CHEST_HEALTH, SPRITE_SIZE};

use crate::combatant::{Body, Combatant};

/// Passive target holding an upgrade that was rolled when it spawned.
#[derive(Clone, Debug)]
pub(crate) struct LootChest {
    id: EntityId,
    position: Vec2,
    health: i32,
    upgrade: ChestUpgrade,
}

impl LootChest {
    pub(crate) const fn new(id: EntityId, position: Vec2, upgrade: ChestUpgrade) -> Self {
        Self {
            id,
            position,
            health: CHEST_HEALTH,
            upgrade,
        }
    }

    pub(crate) const fn upgrade(&self) -> ChestUpgrade {
        self.upgrade
    }

    pub(crate) fn snapshot(&self) -> ChestSnapshot {
        ChestSnapshot {
            id: self.id,
            position: self.position,
            health: self.health,
            upgrade: self.upgrade,
        }
    }
}

impl Body for LootChest {
    fn id(&self) -> EntityId {
        self.id
    }

    fn rect(&self) -> Rect {
        Rect::from_center(self.position, SPRITE_SIZE)
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn take_damage(&mut self, amount: u32) {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.health = self.health.saturating_sub(amount);
    }
}

/// Member of the enemy collision group.
#[derive(Clone, Debug)]
pub(crate) enum Occupant {
    Unit(Combatant),
    Chest(LootChest),
}

impl Occupant {
    pub(crate) fn as_unit(&self) -> Option<&Combatant> {
        match self {
            Self::Unit(unit) => Some(unit),
            Self::Chest(_) => None,
        }
    }

    pub(crate) fn as_unit_mut(&mut self) -> Option<&mut Combatant> {
        match self {
            Self::Unit(unit) => Some(unit),
            Self::Chest(_) => None,
        }
    }

    pub(crate) fn as_chest(&self) -> Option<&LootChest> {
        match self {
            Self::Unit(_) => None,
            Self::Chest(chest) => Some(chest),
        }
    }
}

impl Body for Occupant {
    fn id(&self) -> EntityId {
        match self {
            Self::Unit(unit) => unit.id(),
            Self::Chest(chest) => chest.id(),
        }
    }

    fn rect(&self) -> Rect {
        match self {
            Self::Unit(unit) => unit.rect(),
            Self::Chest(chest) => chest.rect(),
        }
    }

    fn health(&self) -> i32 {
        match self {
            Self::Unit(unit) => unit.health(),
            Self::Chest(chest) => chest.health(),
        }
    }

    fn take_damage(&mut self, amount: u32) {
        match self {
            Self::Unit(unit) => unit.take_damage(amount),
            Self::Chest(chest) => chest.take_damage(amount),
        }
    }
}
