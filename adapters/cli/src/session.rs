//! Fixed-step frame loop driving the world, the HUD and the render surface.

use std::{fmt, time::Duration};

use anyhow::Result;
use storm_castle_core::{Command, Event, Roster, ScreenState, StatsLine};
use storm_castle_rendering::{present, HudState, RenderSurface, Scene};
use storm_castle_world::{apply, drain_notifications, query, World};

use crate::autopilot::Autopilot;

/// Frame loop parameters.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Pacing {
    /// Upper bound on simulated frames.
    pub(crate) frames: u32,
    /// Simulated time per frame.
    pub(crate) frame: Duration,
    /// Presents every n-th frame; zero never presents.
    pub(crate) render_every: u32,
}

/// Outcome of a session.
#[derive(Clone, Debug)]
pub(crate) struct Summary {
    frames: u32,
    game_over: bool,
    rooms_cleared: u32,
    units_granted: u32,
    roster: Roster,
    on_field: usize,
    stats: Vec<StatsLine>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.game_over {
            "game over"
        } else {
            "still fighting"
        };
        writeln!(f, "After {} frames: {status}", self.frames)?;
        writeln!(f, "Rooms cleared: {}", self.rooms_cleared)?;
        writeln!(f, "Units granted: {}", self.units_granted)?;
        writeln!(f, "Units on the field: {}", self.on_field)?;
        for (kind, count) in self.roster.iter() {
            writeln!(f, "{} units in reserve: {count}", kind.name())?;
        }
        for line in self.stats.iter().flat_map(StatsLine::lines) {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Plays until the run ends or the frame budget runs out.
pub(crate) fn play<S>(
    world: &mut World,
    autopilot: &Autopilot,
    pacing: Pacing,
    surface: &mut S,
) -> Result<Summary>
where
    S: RenderSurface + ?Sized,
{
    let mut hud = HudState::new(query::config(world).notification_lifetime());
    let mut events = Vec::new();
    let mut frames = 0;

    while frames < pacing.frames {
        events.clear();
        for command in autopilot.commands(world) {
            apply(world, command, &mut events);
        }
        apply(world, Command::Tick { dt: pacing.frame }, &mut events);
        frames += 1;

        for event in &events {
            match event {
                Event::RoomCleared { rooms_cleared } => {
                    log::info!("room {rooms_cleared} cleared");
                }
                Event::NextRoomReady {
                    lower_bound,
                    upper_bound,
                } => log::info!("next room ready with {lower_bound}..={upper_bound} enemies"),
                _ => {}
            }
        }
        hud.update(pacing.frame, &events, drain_notifications(world));

        if pacing.render_every > 0 && frames % pacing.render_every == 0 {
            present(&Scene::capture(world, &hud), surface)?;
        }
        if query::screen(world) == ScreenState::GameOver {
            present(&Scene::capture(world, &hud), surface)?;
            break;
        }
    }

    Ok(Summary {
        frames,
        game_over: query::screen(world) == ScreenState::GameOver,
        rooms_cleared: query::rooms_cleared(world),
        units_granted: query::units_granted(world),
        roster: query::roster(world),
        on_field: query::players(world).len(),
        stats: query::stats_sheet(world),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::TextSurface;
    use storm_castle_core::GameConfig;

    fn pacing(frames: u32, render_every: u32) -> Pacing {
        Pacing {
            frames,
            frame: Duration::from_millis(16),
            render_every,
        }
    }

    #[test]
    fn session_starts_the_run_and_reports_the_party() {
        let mut world = World::new();
        let autopilot = Autopilot::new(Roster::from_counts(5, 0, 0));
        let mut surface = TextSurface::new(Vec::new());
        let summary = play(&mut world, &autopilot, pacing(2, 0), &mut surface)
            .expect("text surface never fails");

        assert_eq!(query::screen(&world), ScreenState::Battle);
        assert_eq!(summary.frames, 2);
        assert!(!summary.game_over);
        assert_eq!(summary.on_field, 5);
        let text = summary.to_string();
        assert!(text.starts_with("After 2 frames: still fighting\n"));
        assert!(text.contains("Warrior units in reserve: 0"));
        assert!(text.contains("Warrior attack speed: 2s"));
    }

    #[test]
    fn render_cadence_controls_presented_frames() {
        let config = GameConfig {
            seed: 7,
            ..GameConfig::default()
        };
        let mut world = World::with_config(config).expect("valid config");
        let autopilot = Autopilot::new(Roster::from_counts(2, 2, 1));
        let mut out = Vec::new();
        let mut surface = TextSurface::new(&mut out);
        let summary = play(&mut world, &autopilot, pacing(10, 5), &mut surface)
            .expect("vec writes");
        assert_eq!(summary.frames, 10);

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.matches("---- background.png ----").count(), 2);
        assert!(text.contains("[i] Stats page"));
    }

    #[test]
    fn identical_seeds_give_identical_summaries() {
        let summarise = || {
            let config = GameConfig {
                seed: 99,
                chest_spawn_chance: 0.5,
                ..GameConfig::default()
            };
            let mut world = World::with_config(config).expect("valid config");
            let autopilot = Autopilot::new(Roster::from_counts(1, 2, 2));
            let mut surface = TextSurface::new(std::io::sink());
            play(&mut world, &autopilot, pacing(2_000, 0), &mut surface)
                .expect("sink never fails")
                .to_string()
        };
        assert_eq!(summarise(), summarise());
    }
}
