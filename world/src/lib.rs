#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Storm the Castle.
//!
//! The world owns every unit, chest and counter of a run. Adapters mutate it
//! exclusively through [`apply`] and observe it through [`query`] and the
//! events written to the caller's buffer.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use storm_castle_core::{
    Arena, Command, ConfigError, DraftError, EntityId, Event, Faction, GameConfig, Notification,
    NotificationKind, PlacementError, Rect, RoomPhase, Roster, ScreenState, StatRegistry,
    UnitKind, WaveSpawn, SPRITE_SIZE, WELCOME_BANNER,
};
use storm_castle_system_progression as progression;
use storm_castle_system_spawning::{Config as SpawningConfig, Spawning};

mod chest;
mod combatant;
mod notifications;
mod room;

pub use notifications::{BoardEntry, NotificationBoard};

use chest::{LootChest, Occupant};
use combatant::{Body, Combatant, Scratch};
use notifications::NotificationChannel;
use room::{RoomController, RoomStep};

/// Represents the authoritative Storm the Castle world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    arena: Arena,
    rng: ChaCha8Rng,
    spawning: Spawning,
    registry: StatRegistry,
    screen: ScreenState,
    draft: Roster,
    roster: Roster,
    selected: UnitKind,
    stats_visible: bool,
    players: Vec<Combatant>,
    enemies: Vec<Occupant>,
    room: RoomController,
    notifications: NotificationChannel,
    next_entity: u32,
    units_granted: u32,
    scratch: Scratch,
    wave: Vec<WaveSpawn>,
}

impl World {
    /// Creates a new world on the draft screen using the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_validated(GameConfig::default())
    }

    /// Creates a new world on the draft screen using the provided configuration.
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: GameConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            arena: config.arena(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            spawning: Spawning::new(SpawningConfig::new(config.chest_spawn_chance)),
            registry: StatRegistry::new(),
            screen: ScreenState::Draft,
            draft: Roster::empty(),
            roster: Roster::empty(),
            selected: UnitKind::Warrior,
            stats_visible: false,
            players: Vec::new(),
            enemies: Vec::new(),
            room: RoomController::new(config.room_transition()),
            notifications: NotificationChannel::default(),
            next_entity: 0,
            units_granted: 0,
            scratch: Scratch::default(),
            wave: Vec::new(),
            config,
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_entity);
        self.next_entity = self.next_entity.wrapping_add(1);
        id
    }

    /// Centre a sprite dropped at `at` ends up on once it fits inside the arena.
    fn settle(&self, at: Vec2) -> Vec2 {
        Rect::from_center(at, SPRITE_SIZE)
            .clamped_within(&self.arena.bounds())
            .center()
    }

    fn adjust_draft(&mut self, kind: UnitKind, delta: i32, out_events: &mut Vec<Event>) {
        let outcome = if self.screen != ScreenState::Draft {
            Err(DraftError::InvalidScreen)
        } else if kind.faction() != Faction::Player {
            Err(DraftError::NotPlayable)
        } else if delta > 0 {
            if self.draft.total() >= self.config.starting_units {
                Err(DraftError::TooManyUnits)
            } else {
                let _ = self.draft.add(kind);
                Ok(())
            }
        } else {
            if delta < 0 {
                let _ = self.draft.take(kind);
            }
            Ok(())
        };

        match outcome {
            Ok(()) => out_events.push(Event::DraftAdjusted {
                kind,
                count: self.draft.count(kind),
            }),
            Err(reason) => {
                log::warn!("draft change for {} rejected: {reason:?}", kind.name());
                out_events.push(Event::DraftRejected {
                    kind: Some(kind),
                    reason,
                });
            }
        }
    }

    fn start_run(&mut self, out_events: &mut Vec<Event>) {
        let rejection = if self.screen != ScreenState::Draft {
            Some(DraftError::InvalidScreen)
        } else if self.draft.total() != self.config.starting_units {
            Some(DraftError::Incomplete)
        } else {
            None
        };
        if let Some(reason) = rejection {
            log::warn!("run start rejected: {reason:?}");
            out_events.push(Event::DraftRejected { kind: None, reason });
            return;
        }

        self.roster = self.draft;
        self.draft = Roster::empty();
        self.units_granted = self.config.starting_units;
        self.room.restart();
        self.players.clear();
        self.screen = ScreenState::Battle;
        log::info!("run started with {} units", self.roster.total());
        out_events.push(Event::ScreenChanged {
            screen: ScreenState::Battle,
        });
        self.spawn_random_wave(out_events);
    }

    fn check_placement(&self, kind: UnitKind, at: Vec2) -> Result<(), PlacementError> {
        if self.screen != ScreenState::Battle {
            return Err(PlacementError::InvalidScreen);
        }
        if !self.arena.is_below_header(at) {
            return Err(PlacementError::InHeaderBand);
        }
        if self
            .enemies
            .iter()
            .any(|occupant| occupant.rect().contains_point(at))
        {
            return Err(PlacementError::Occupied);
        }
        if self.roster.count(kind) == 0 {
            return Err(PlacementError::RosterEmpty);
        }
        Ok(())
    }

    fn place_unit(&mut self, at: Vec2, out_events: &mut Vec<Event>) {
        let kind = self.selected;
        if let Err(reason) = self.check_placement(kind, at) {
            log::warn!("placement of {} at {at} rejected: {reason:?}", kind.name());
            out_events.push(Event::PlacementRejected { kind, at, reason });
            return;
        }

        let _ = self.roster.take(kind);
        let at = self.settle(at);
        let id = self.allocate_id();
        self.players
            .push(Combatant::spawn(id, kind, at, self.registry.get(kind)));
        out_events.push(Event::UnitPlaced { id, kind, at });
    }

    /// Debug waves may only replace a populated room; a cleared room owes its transition first.
    fn accepts_debug_wave(&self) -> bool {
        self.screen == ScreenState::Battle && self.room.phase() == RoomPhase::Populated
    }

    fn spawn_random_wave(&mut self, out_events: &mut Vec<Event>) {
        let bounds = self.room.bounds();
        let mut wave = std::mem::take(&mut self.wave);
        wave.clear();
        self.spawning
            .compose(&mut self.rng, &bounds, &self.arena, &mut wave);
        self.replace_wave(&wave, out_events);
        self.wave = wave;
    }

    fn replace_wave(&mut self, spawns: &[WaveSpawn], out_events: &mut Vec<Event>) {
        self.enemies.clear();
        let mut enemies = 0;
        let mut chest = false;

        for spawn in spawns {
            match *spawn {
                WaveSpawn::Enemy { kind, at } => {
                    if kind.faction() != Faction::Enemy {
                        log::warn!("skipping {} in enemy wave", kind.name());
                        continue;
                    }
                    let at = self.settle(at);
                    let id = self.allocate_id();
                    self.enemies.push(Occupant::Unit(Combatant::spawn(
                        id,
                        kind,
                        at,
                        self.registry.get(kind),
                    )));
                    enemies += 1;
                }
                WaveSpawn::Chest { at } => {
                    let upgrade = progression::roll_chest_upgrade(&mut self.rng);
                    let at = self.settle(at);
                    let id = self.allocate_id();
                    self.enemies
                        .push(Occupant::Chest(LootChest::new(id, at, upgrade)));
                    chest = true;
                }
            }
        }

        log::debug!("wave spawned: {enemies} enemies, chest: {chest}");
        out_events.push(Event::WaveSpawned { enemies, chest });
    }

    fn advance_battle(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let bounds = self.arena.bounds();

        for index in 0..self.players.len() {
            let unit = &mut self.players[index];
            let stats = *self.registry.get(unit.kind());
            unit.advance(
                &stats,
                &bounds,
                dt,
                &mut self.enemies,
                &mut self.scratch,
                out_events,
            );
            self.remove_destroyed_enemies(out_events);
        }

        for index in 0..self.enemies.len() {
            let Some(unit) = self.enemies[index].as_unit_mut() else {
                continue;
            };
            let stats = *self.registry.get(unit.kind());
            unit.advance(
                &stats,
                &bounds,
                dt,
                &mut self.players,
                &mut self.scratch,
                out_events,
            );
            self.remove_destroyed_players(out_events);
        }

        if self.players.is_empty() && self.roster.total() == 0 {
            self.end_run(out_events);
            return;
        }

        match self.room.advance(!self.enemies.is_empty(), dt) {
            RoomStep::Holding => {}
            RoomStep::Cleared { rooms_cleared } => {
                log::info!("room {rooms_cleared} cleared");
                out_events.push(Event::RoomCleared { rooms_cleared });
                if progression::escalation_due(rooms_cleared) {
                    self.notifications
                        .post(Notification::new(NotificationKind::EnemiesStrengthened));
                }
            }
            RoomStep::TransitionDue { rooms_cleared } => {
                self.finish_room(rooms_cleared, out_events);
            }
        }
    }

    fn remove_destroyed_enemies(&mut self, out_events: &mut Vec<Event>) {
        let mut index = 0;
        while index < self.enemies.len() {
            if !self.enemies[index].is_destroyed() {
                index += 1;
                continue;
            }

            let occupant = self.enemies.remove(index);
            log::debug!("enemy {} destroyed", occupant.id().get());
            out_events.push(Event::EntityDestroyed {
                id: occupant.id(),
                faction: Faction::Enemy,
            });
            if let Occupant::Chest(chest) = occupant {
                let upgrade = chest.upgrade();
                self.registry.upgrade(upgrade.kind, upgrade.stat);
                out_events.push(Event::ChestOpened { upgrade });
                self.notifications
                    .post(Notification::new(NotificationKind::ChestOpened(upgrade)));
            }
        }
    }

    fn remove_destroyed_players(&mut self, out_events: &mut Vec<Event>) {
        let mut index = 0;
        while index < self.players.len() {
            if !self.players[index].is_destroyed() {
                index += 1;
                continue;
            }

            let unit = self.players.remove(index);
            log::debug!("{} {} fell", unit.kind().name(), unit.id().get());
            out_events.push(Event::EntityDestroyed {
                id: unit.id(),
                faction: Faction::Player,
            });
        }
    }

    fn finish_room(&mut self, rooms_cleared: u32, out_events: &mut Vec<Event>) {
        let count = u32::try_from(self.players.len()).unwrap_or(u32::MAX);
        for unit in self.players.drain(..) {
            let _ = self.roster.add(unit.kind());
        }
        out_events.push(Event::UnitsReclaimed { count });

        if progression::escalation_due(rooms_cleared) {
            let escalation = progression::escalate_difficulty(&mut self.rng, &mut self.registry);
            log::info!(
                "{} {} raised",
                escalation.kind.name(),
                escalation.stat.label()
            );
            out_events.push(Event::DifficultyEscalated {
                kind: escalation.kind,
                stat: escalation.stat,
            });
        }

        if progression::grant_due(rooms_cleared) {
            let kind = progression::grant_unit(&mut self.rng);
            let _ = self.roster.add(kind);
            self.units_granted = self.units_granted.saturating_add(1);
            out_events.push(Event::UnitGranted { kind });
            self.notifications
                .post(Notification::new(NotificationKind::UnitJoined(kind)));
        }

        let bounds = self.room.begin_next_room();
        self.spawn_random_wave(out_events);
        out_events.push(Event::NextRoomReady {
            lower_bound: bounds.lower(),
            upper_bound: bounds.upper(),
        });
    }

    fn end_run(&mut self, out_events: &mut Vec<Event>) {
        let rooms_cleared = self.room.rooms_cleared();
        self.players.clear();
        self.enemies.clear();
        self.screen = ScreenState::GameOver;
        log::info!("game over after {rooms_cleared} rooms");
        out_events.push(Event::GameOver { rooms_cleared });
        out_events.push(Event::ScreenChanged {
            screen: ScreenState::GameOver,
        });
    }

    fn return_to_title(&mut self, out_events: &mut Vec<Event>) {
        self.registry.reset_to_defaults();
        self.players.clear();
        self.enemies.clear();
        self.notifications.clear();
        self.draft = Roster::empty();
        self.roster = Roster::empty();
        self.selected = UnitKind::Warrior;
        self.stats_visible = false;
        self.units_granted = 0;
        self.room.restart();
        self.screen = ScreenState::Draft;
        out_events.push(Event::ScreenChanged {
            screen: ScreenState::Draft,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::AdjustDraft { kind, delta } => world.adjust_draft(kind, delta, out_events),
        Command::StartRun => world.start_run(out_events),
        Command::SelectClass { kind } => {
            if kind.faction() == Faction::Player {
                world.selected = kind;
                out_events.push(Event::ClassSelected { kind });
            } else {
                log::warn!("{} cannot be selected", kind.name());
            }
        }
        Command::PlaceUnit { at } => world.place_unit(at, out_events),
        Command::ToggleStatsView => {
            world.stats_visible = !world.stats_visible;
            out_events.push(Event::StatsViewToggled {
                visible: world.stats_visible,
            });
        }
        Command::RegenerateRoom => {
            if world.accepts_debug_wave() {
                world.spawn_random_wave(out_events);
            } else {
                log::warn!("room regeneration ignored outside a populated room");
            }
        }
        Command::ScriptWave { spawns } => {
            if world.accepts_debug_wave() {
                world.replace_wave(&spawns, out_events);
            } else {
                log::warn!("scripted wave ignored outside a populated room");
            }
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            if world.screen == ScreenState::Battle {
                world.advance_battle(dt, out_events);
            }
        }
        Command::ReturnToTitle => {
            if world.screen == ScreenState::GameOver {
                world.return_to_title(out_events);
            } else {
                log::warn!("return to title ignored on {:?}", world.screen);
            }
        }
    }
}

/// Removes and returns every notification posted since the previous drain.
///
/// Presentation layers call this once per frame and hand the result to a
/// [`NotificationBoard`].
pub fn drain_notifications(world: &mut World) -> Vec<Notification> {
    world.notifications.drain()
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use storm_castle_core::{
        Arena, ChestSnapshot, GameConfig, Roster, RoomPhase, ScreenState, StatBlock,
        StatRegistry, StatsLine, UnitKind, UnitSnapshot,
    };
    use storm_castle_system_progression::WaveBounds;

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Play area dimensions.
    #[must_use]
    pub fn arena(world: &World) -> Arena {
        world.arena
    }

    /// Screen currently active.
    #[must_use]
    pub fn screen(world: &World) -> ScreenState {
        world.screen
    }

    /// Progress of the current room.
    #[must_use]
    pub fn room_phase(world: &World) -> RoomPhase {
        world.room.phase()
    }

    /// Rooms cleared during the current or most recent run.
    #[must_use]
    pub fn rooms_cleared(world: &World) -> u32 {
        world.room.rooms_cleared()
    }

    /// Bounds the next wave size is drawn from.
    #[must_use]
    pub fn wave_bounds(world: &World) -> WaveBounds {
        world.room.bounds()
    }

    /// Units waiting to be placed.
    #[must_use]
    pub fn roster(world: &World) -> Roster {
        world.roster
    }

    /// Units distributed on the draft screen.
    #[must_use]
    pub fn draft(world: &World) -> Roster {
        world.draft
    }

    /// Class used by the next placement.
    #[must_use]
    pub fn selected_class(world: &World) -> UnitKind {
        world.selected
    }

    /// Whether the stats sheet is shown.
    #[must_use]
    pub fn stats_visible(world: &World) -> bool {
        world.stats_visible
    }

    /// Units received this run, starting units included.
    #[must_use]
    pub fn units_granted(world: &World) -> u32 {
        world.units_granted
    }

    /// Notifications posted but not yet drained.
    #[must_use]
    pub fn pending_notifications(world: &World) -> usize {
        world.notifications.len()
    }

    /// Player units on the field in placement order.
    #[must_use]
    pub fn players(world: &World) -> Vec<UnitSnapshot> {
        world
            .players
            .iter()
            .map(|unit| unit.snapshot(world.registry.get(unit.kind())))
            .collect()
    }

    /// Enemy units on the field in spawn order.
    #[must_use]
    pub fn enemies(world: &World) -> Vec<UnitSnapshot> {
        world
            .enemies
            .iter()
            .filter_map(|occupant| occupant.as_unit())
            .map(|unit| unit.snapshot(world.registry.get(unit.kind())))
            .collect()
    }

    /// Loot chests on the field in spawn order.
    #[must_use]
    pub fn chests(world: &World) -> Vec<ChestSnapshot> {
        world
            .enemies
            .iter()
            .filter_map(|occupant| occupant.as_chest())
            .map(|chest| chest.snapshot())
            .collect()
    }

    /// Live class stats shared by every unit.
    #[must_use]
    pub fn registry(world: &World) -> &StatRegistry {
        &world.registry
    }

    /// Live stats of one class.
    #[must_use]
    pub fn stat_block(world: &World, kind: UnitKind) -> StatBlock {
        *world.registry.get(kind)
    }

    /// Rows of the stats sheet, one per class in registry order.
    #[must_use]
    pub fn stats_sheet(world: &World) -> Vec<StatsLine> {
        UnitKind::ALL
            .into_iter()
            .map(|kind| {
                let stats = world.registry.get(kind);
                StatsLine {
                    kind,
                    health: stats.base_health(),
                    attack: stats.attack(),
                    speed: stats.speed(),
                    cooldown: stats.attack_cooldown(),
                }
            })
            .collect()
    }
}
