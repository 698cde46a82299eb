//! Scripted player that drafts a party and deploys it whenever a room is populated.

use glam::Vec2;
use storm_castle_core::{Command, Rect, RoomPhase, Roster, ScreenState, UnitKind, SPRITE_SIZE};
use storm_castle_world::{query, World};

const GRID_MARGIN: f32 = 40.0;
const GRID_SPACING: f32 = 70.0;

/// Issues the commands a player would, based only on world queries.
#[derive(Clone, Debug)]
pub(crate) struct Autopilot {
    draft: Roster,
}

impl Autopilot {
    /// Creates an autopilot that drafts `draft` on the title screen.
    pub(crate) const fn new(draft: Roster) -> Self {
        Self { draft }
    }

    /// Commands to apply before the next tick.
    pub(crate) fn commands(&self, world: &World) -> Vec<Command> {
        match query::screen(world) {
            ScreenState::Draft => self.draft_commands(world),
            ScreenState::Battle if query::room_phase(world) == RoomPhase::Populated => {
                deployment(world)
            }
            ScreenState::Battle | ScreenState::GameOver => Vec::new(),
        }
    }

    fn draft_commands(&self, world: &World) -> Vec<Command> {
        let current = query::draft(world);
        let mut commands = Vec::new();
        for kind in UnitKind::PLAYABLE {
            let wanted = i64::from(self.draft.count(kind));
            let have = i64::from(current.count(kind));
            let delta = if wanted > have { 1 } else { -1 };
            for _ in 0..(wanted - have).unsigned_abs() {
                commands.push(Command::AdjustDraft { kind, delta });
            }
        }
        commands.push(Command::StartRun);
        commands
    }
}

/// Places every roster unit on free grid points in the left third of the arena.
fn deployment(world: &World) -> Vec<Command> {
    let roster = query::roster(world);
    if roster.total() == 0 {
        return Vec::new();
    }

    let mut occupied: Vec<Rect> = query::enemies(world)
        .iter()
        .chain(query::players(world).iter())
        .map(|unit| unit.rect())
        .chain(query::chests(world).iter().map(|chest| chest.rect()))
        .collect();
    let mut points = free_points(world, &mut occupied).into_iter();

    let mut commands = Vec::new();
    for (kind, count) in roster.iter() {
        if count == 0 {
            continue;
        }
        commands.push(Command::SelectClass { kind });
        for at in points.by_ref().take(count as usize) {
            commands.push(Command::PlaceUnit { at });
        }
    }
    commands
}

fn free_points(world: &World, occupied: &mut Vec<Rect>) -> Vec<Vec2> {
    let arena = query::arena(world);
    let half = SPRITE_SIZE / 2.0;
    let mut points = Vec::new();

    let mut x = GRID_MARGIN;
    while x <= arena.width() / 3.0 {
        let mut y = arena.header_band() + half.y;
        while y + half.y <= arena.height() {
            let candidate = Rect::from_center(Vec2::new(x, y), SPRITE_SIZE);
            if !occupied.iter().any(|rect| rect.intersects(&candidate)) {
                occupied.push(candidate);
                points.push(Vec2::new(x, y));
            }
            y += GRID_SPACING;
        }
        x += GRID_SPACING;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use storm_castle_core::Event;
    use storm_castle_world::apply;

    fn run(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            apply(world, command, &mut events);
        }
        events
    }

    #[test]
    fn drafts_then_starts_the_run() {
        let autopilot = Autopilot::new(Roster::from_counts(2, 2, 1));
        let mut world = World::new();
        let commands = autopilot.commands(&world);
        let events = run(&mut world, commands);

        assert_eq!(query::screen(&world), ScreenState::Battle);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::DraftRejected { .. })));
    }

    #[test]
    fn deploys_the_whole_roster_without_rejections() {
        let autopilot = Autopilot::new(Roster::from_counts(2, 2, 1));
        let mut world = World::new();
        let draft = autopilot.commands(&world);
        let _ = run(&mut world, draft);
        let placements = autopilot.commands(&world);
        let events = run(&mut world, placements);

        assert_eq!(query::roster(&world).total(), 0);
        assert_eq!(query::players(&world).len(), 5);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::PlacementRejected { .. })));
        assert!(autopilot.commands(&world).is_empty());
    }
}
