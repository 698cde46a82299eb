#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Storm the Castle engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then reports [`Event`] values describing what
//! happened. Class-wide combat numbers live in a [`StatRegistry`] that every
//! entity reads live instead of copying.

use std::time::Duration;

use glam::Vec2;

mod config;
mod geometry;
mod stats;

pub use config::{ArenaConfig, ConfigError, GameConfig};
pub use geometry::{Arena, Rect, SPRITE_SIZE};
pub use stats::{CadencePattern, Roster, StatBlock, StatKind, StatRegistry};

/// Canonical window caption and banner.
pub const WELCOME_BANNER: &str = "Storm the Castle";

/// Health every loot chest spawns with.
pub const CHEST_HEALTH: i32 = 10;

/// Side of the battle a unit fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Faction {
    /// Units placed by the player from the roster.
    Player,
    /// Units spawned by the room. Loot chests share this collision group.
    Enemy,
}

/// Closed set of unit classes. Classes differ only in stats and artwork.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitKind {
    /// Sturdy close-combat player unit.
    Warrior,
    /// Fast player unit that strikes from a distance.
    Ranger,
    /// Fragile player unit whose attacks hit everything in range.
    Mage,
    /// Quick enemy melee unit.
    Skeleton,
    /// Slow, hard-hitting enemy melee unit.
    Zombie,
}

impl UnitKind {
    /// Every class in registry order.
    pub const ALL: [UnitKind; 5] = [
        UnitKind::Warrior,
        UnitKind::Ranger,
        UnitKind::Mage,
        UnitKind::Skeleton,
        UnitKind::Zombie,
    ];

    /// Classes the player can draft, place and receive upgrades for.
    pub const PLAYABLE: [UnitKind; 3] = [UnitKind::Warrior, UnitKind::Ranger, UnitKind::Mage];

    /// Classes that populate waves.
    pub const ENEMIES: [UnitKind; 2] = [UnitKind::Skeleton, UnitKind::Zombie];

    /// Side the class fights for.
    #[must_use]
    pub const fn faction(self) -> Faction {
        match self {
            Self::Warrior | Self::Ranger | Self::Mage => Faction::Player,
            Self::Skeleton | Self::Zombie => Faction::Enemy,
        }
    }

    /// Display name of the class.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Warrior => "Warrior",
            Self::Ranger => "Ranger",
            Self::Mage => "Mage",
            Self::Skeleton => "Skeleton",
            Self::Zombie => "Zombie",
        }
    }

    /// Position of the class within [`UnitKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Unique identifier assigned to a unit or chest when it enters the field.
///
/// Identifiers grow monotonically, so ordering by id is spawn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Sprite slot a unit currently displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationFrame {
    /// Idle pose.
    Standing,
    /// First half of the walk cycle.
    Walking1,
    /// Second half of the walk cycle.
    Walking2,
    /// Pose held briefly after an attack lands.
    Attacking,
}

impl AnimationFrame {
    /// Reports whether the frame belongs to the walk cycle.
    #[must_use]
    pub const fn is_walking(self) -> bool {
        matches!(self, Self::Walking1 | Self::Walking2)
    }
}

/// Permanent upgrade a chest grants when destroyed. Fixed when the chest spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChestUpgrade {
    /// Playable class whose stat block is raised.
    pub kind: UnitKind,
    /// Stat raised by one point.
    pub stat: StatKind,
}

impl ChestUpgrade {
    /// Human readable description used by the opening notification.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} {} +1", self.kind.name(), self.stat.label())
    }
}

/// Top-level screen the game is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScreenState {
    /// Player distributes the starting units across classes.
    Draft,
    /// Rooms are being fought.
    Battle,
    /// Every unit was lost; the run is over.
    GameOver,
}

/// Progress of the current room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoomPhase {
    /// Enemies remain on the field.
    Populated,
    /// The room was emptied and the transition countdown is running.
    Clearing {
        /// Time accumulated since the room emptied.
        elapsed: Duration,
    },
    /// Countdown elapsed; units were reclaimed and the next wave is being generated.
    ReadyForNextRoom,
}

/// Reasons a placement command is rejected. Rejections never clamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementError {
    /// Units can only be placed while a battle is running.
    InvalidScreen,
    /// The point lies inside the HUD header band.
    InHeaderBand,
    /// The point lands on an existing enemy or chest.
    Occupied,
    /// The selected class has no units left in the roster.
    RosterEmpty,
}

/// Reasons a draft command is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DraftError {
    /// Drafting is only possible on the draft screen.
    InvalidScreen,
    /// Only playable classes can be drafted.
    NotPlayable,
    /// The draft would exceed the number of starting units.
    TooManyUnits,
    /// A run needs exactly the configured number of starting units.
    Incomplete,
}

/// Entry of a scripted wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WaveSpawn {
    /// Spawns an enemy of the given class centred on `at`.
    Enemy {
        /// Enemy class.
        kind: UnitKind,
        /// Centre position.
        at: Vec2,
    },
    /// Spawns a loot chest centred on `at`; its upgrade is rolled on spawn.
    Chest {
        /// Centre position.
        at: Vec2,
    },
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Adds or removes one unit of a class from the pre-run draft.
    AdjustDraft {
        /// Class to adjust.
        kind: UnitKind,
        /// `+1` or `-1`; other magnitudes are clamped to one step.
        delta: i32,
    },
    /// Starts a run with the drafted units.
    StartRun,
    /// Selects the class used by subsequent placements.
    SelectClass {
        /// Playable class to select.
        kind: UnitKind,
    },
    /// Places one unit of the selected class centred on the point.
    PlaceUnit {
        /// Screen-space point.
        at: Vec2,
    },
    /// Shows or hides the class stats sheet.
    ToggleStatsView,
    /// Debug: replaces the wave with a random one without widening the bounds.
    RegenerateRoom,
    /// Debug: replaces the wave with the listed spawns.
    ScriptWave {
        /// Enemies and chests to spawn, in spawn order.
        spawns: Vec<WaveSpawn>,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Leaves the game-over screen, restoring default class stats.
    ReturnToTitle,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms a draft change.
    DraftAdjusted {
        /// Class that changed.
        kind: UnitKind,
        /// New draft count of the class.
        count: u32,
    },
    /// Reports that a draft command was rejected.
    DraftRejected {
        /// Class named by the command, if any.
        kind: Option<UnitKind>,
        /// Specific reason.
        reason: DraftError,
    },
    /// Announces that the world moved to another screen.
    ScreenChanged {
        /// Screen now active.
        screen: ScreenState,
    },
    /// Confirms the class used by placements.
    ClassSelected {
        /// Selected class.
        kind: UnitKind,
    },
    /// Confirms the stats sheet visibility.
    StatsViewToggled {
        /// Whether the sheet is now visible.
        visible: bool,
    },
    /// Confirms that a roster unit entered the field.
    UnitPlaced {
        /// Identifier of the new unit.
        id: EntityId,
        /// Class of the new unit.
        kind: UnitKind,
        /// Centre position.
        at: Vec2,
    },
    /// Reports that a placement was refused.
    PlacementRejected {
        /// Class that was selected.
        kind: UnitKind,
        /// Requested point.
        at: Vec2,
        /// Specific reason.
        reason: PlacementError,
    },
    /// Announces a freshly generated wave.
    WaveSpawned {
        /// Number of enemies spawned.
        enemies: u32,
        /// Whether a chest accompanies the wave.
        chest: bool,
    },
    /// Confirms that an attack landed.
    AttackLanded {
        /// Attacking unit.
        attacker: EntityId,
        /// Damaged unit or chest.
        target: EntityId,
        /// Damage applied.
        damage: u32,
    },
    /// Confirms that a unit or chest reached zero health and left the field.
    EntityDestroyed {
        /// Identifier of the destroyed entity.
        id: EntityId,
        /// Group the entity belonged to.
        faction: Faction,
    },
    /// Confirms that a chest upgrade was committed to the registry.
    ChestOpened {
        /// Upgrade applied.
        upgrade: ChestUpgrade,
    },
    /// The enemy group became empty; the transition countdown started.
    RoomCleared {
        /// Rooms cleared in this run, including this one.
        rooms_cleared: u32,
    },
    /// Surviving player units went back to the roster.
    UnitsReclaimed {
        /// Number of units reclaimed.
        count: u32,
    },
    /// An enemy class grew stronger.
    DifficultyEscalated {
        /// Enemy class.
        kind: UnitKind,
        /// Stat raised by one.
        stat: StatKind,
    },
    /// A new unit joined the roster.
    UnitGranted {
        /// Class of the new unit.
        kind: UnitKind,
    },
    /// The next room is populated.
    NextRoomReady {
        /// Inclusive lower bound used for the wave size.
        lower_bound: u32,
        /// Inclusive upper bound used for the wave size.
        upper_bound: u32,
    },
    /// Every unit was lost.
    GameOver {
        /// Rooms cleared during the run.
        rooms_cleared: u32,
    },
}

/// Category of a player-facing announcement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Enemy stats will rise once the room finishes transitioning.
    EnemiesStrengthened,
    /// A unit joined the roster.
    UnitJoined(UnitKind),
    /// A chest granted an upgrade.
    ChestOpened(ChestUpgrade),
}

/// Announcement queued for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Category of the announcement.
    pub kind: NotificationKind,
    /// Human readable text.
    pub message: String,
}

impl Notification {
    /// Builds the canonical message for the provided kind.
    #[must_use]
    pub fn new(kind: NotificationKind) -> Self {
        let message = match kind {
            NotificationKind::EnemiesStrengthened => "Enemies are getting stronger...".to_owned(),
            NotificationKind::UnitJoined(unit) => {
                format!("A {} has joined your party", unit.name())
            }
            NotificationKind::ChestOpened(upgrade) => {
                format!("Chest opened: {}", upgrade.describe())
            }
        };
        Self { kind, message }
    }
}

/// Immutable representation of a single unit used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitSnapshot {
    /// Unique identifier.
    pub id: EntityId,
    /// Class of the unit.
    pub kind: UnitKind,
    /// Centre position.
    pub position: Vec2,
    /// Remaining health; always positive for units on the field.
    pub health: i32,
    /// Live class maximum used for the health bar.
    pub max_health: u32,
    /// Sprite slot to draw.
    pub frame: AnimationFrame,
}

impl UnitSnapshot {
    /// Screen-space footprint.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.position, SPRITE_SIZE)
    }
}

/// Immutable representation of a loot chest used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChestSnapshot {
    /// Unique identifier.
    pub id: EntityId,
    /// Centre position.
    pub position: Vec2,
    /// Remaining health.
    pub health: i32,
    /// Upgrade granted on destruction.
    pub upgrade: ChestUpgrade,
}

impl ChestSnapshot {
    /// Screen-space footprint.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.position, SPRITE_SIZE)
    }
}

/// One row of the stats sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatsLine {
    /// Class described by the row.
    pub kind: UnitKind,
    /// Live health of newly spawned units.
    pub health: u32,
    /// Live attack damage.
    pub attack: u32,
    /// Live walking speed.
    pub speed: u32,
    /// Live attack cooldown.
    pub cooldown: Duration,
}

impl StatsLine {
    /// Renders the four display lines for the class.
    #[must_use]
    pub fn lines(&self) -> [String; 4] {
        let name = self.kind.name();
        [
            format!("{name} health: {}", self.health),
            format!("{name} attack: {}", self.attack),
            format!("{name} speed: {}", self.speed),
            format!(
                "{name} attack speed: {}s",
                self.cooldown.as_millis() as f64 / 1_000.0
            ),
        ]
    }
}
