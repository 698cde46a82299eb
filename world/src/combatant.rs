//! Units fighting on the field and the per-tick update they share.

use std::time::Duration;

use glam::Vec2;
use storm_castle_core::{
    AnimationFrame, EntityId, Event, Rect, StatBlock, UnitKind, UnitSnapshot, SPRITE_SIZE,
};
use storm_castle_system_targeting::{self as targeting, Approach};

/// Time each walking frame stays on screen before the cycle flips.
pub(crate) const WALK_FRAME_INTERVAL: Duration = Duration::from_millis(400);
/// Time the attack pose is held after a strike.
pub(crate) const ATTACK_POSE_DURATION: Duration = Duration::from_millis(150);

/// Anything on the field that units walk toward and strike.
pub(crate) trait Body {
    fn id(&self) -> EntityId;

    fn rect(&self) -> Rect;

    fn health(&self) -> i32;

    fn take_damage(&mut self, amount: u32);

    fn is_destroyed(&self) -> bool {
        self.health() <= 0
    }
}

/// Buffers reused across unit updates to avoid per-tick allocations.
#[derive(Debug, Default)]
pub(crate) struct Scratch {
    footprints: Vec<Rect>,
    in_range: Vec<usize>,
}

/// Unit of any class placed by the player or spawned by a wave.
#[derive(Clone, Debug)]
pub(crate) struct Combatant {
    id: EntityId,
    kind: UnitKind,
    position: Vec2,
    health: i32,
    since_attack: Duration,
    animation_elapsed: Duration,
    frame: AnimationFrame,
    walking: bool,
}

impl Combatant {
    /// Creates a unit centred on `at` with the class's current base health.
    pub(crate) fn spawn(id: EntityId, kind: UnitKind, at: Vec2, stats: &StatBlock) -> Self {
        Self {
            id,
            kind,
            position: at,
            health: i32::try_from(stats.base_health()).unwrap_or(i32::MAX),
            since_attack: Duration::ZERO,
            animation_elapsed: Duration::ZERO,
            frame: AnimationFrame::Standing,
            walking: false,
        }
    }

    pub(crate) const fn kind(&self) -> UnitKind {
        self.kind
    }

    pub(crate) fn snapshot(&self, stats: &StatBlock) -> UnitSnapshot {
        UnitSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            health: self.health,
            max_health: stats.base_health(),
            frame: self.frame,
        }
    }

    /// Runs one simulation step against the opposing group.
    ///
    /// Damage is applied to `opponents` in place; removing the destroyed ones
    /// is left to the caller so side effects can be committed in group order.
    pub(crate) fn advance<B: Body>(
        &mut self,
        stats: &StatBlock,
        bounds: &Rect,
        dt: Duration,
        opponents: &mut [B],
        scratch: &mut Scratch,
        out_events: &mut Vec<Event>,
    ) {
        self.since_attack = self.since_attack.saturating_add(dt);
        self.animation_elapsed = self.animation_elapsed.saturating_add(dt);
        self.resolve_animation();

        scratch.footprints.clear();
        scratch.footprints.extend(opponents.iter().map(Body::rect));
        if scratch.footprints.is_empty() {
            self.walking = false;
            self.position = self.rect().clamped_within(bounds).center();
            return;
        }

        let range = stats.attack_range();
        if self.frame != AnimationFrame::Attacking {
            match targeting::approach(
                &self.rect(),
                range,
                stats.speed() as f32,
                &scratch.footprints,
            ) {
                Approach::Step(next) => {
                    self.position = next;
                    self.walking = true;
                }
                Approach::Blocked | Approach::Idle => self.walking = false,
            }
        }
        self.position = self.rect().clamped_within(bounds).center();

        if self.since_attack < stats.attack_cooldown() {
            return;
        }

        targeting::collect_in_range(
            &self.rect(),
            range,
            &scratch.footprints,
            &mut scratch.in_range,
        );
        let victims = targeting::victims(&scratch.in_range, stats.is_area_effect());
        if victims.is_empty() {
            return;
        }

        self.frame = AnimationFrame::Attacking;
        self.walking = false;
        self.animation_elapsed = Duration::ZERO;
        self.since_attack = Duration::ZERO;
        for &index in victims {
            let target = &mut opponents[index];
            target.take_damage(stats.attack());
            log::debug!(
                "{} {} struck {} for {}",
                self.kind.name(),
                self.id.get(),
                target.id().get(),
                stats.attack()
            );
            out_events.push(Event::AttackLanded {
                attacker: self.id,
                target: target.id(),
                damage: stats.attack(),
            });
        }
    }

    fn resolve_animation(&mut self) {
        if self.walking {
            if !self.frame.is_walking() {
                self.animation_elapsed = Duration::ZERO;
                self.frame = AnimationFrame::Walking1;
            } else if self.animation_elapsed >= WALK_FRAME_INTERVAL {
                self.frame = match self.frame {
                    AnimationFrame::Walking1 => AnimationFrame::Walking2,
                    _ => AnimationFrame::Walking1,
                };
                self.animation_elapsed = Duration::ZERO;
            }
        } else if self.frame == AnimationFrame::Attacking {
            if self.animation_elapsed >= ATTACK_POSE_DURATION {
                self.frame = AnimationFrame::Standing;
            }
        } else {
            self.frame = AnimationFrame::Standing;
        }
    }
}

impl Body for Combatant {
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
