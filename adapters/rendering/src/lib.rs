#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Storm the Castle adapters.
//!
//! The world never deals in pixels. Adapters capture a [`Scene`] from world
//! queries once per frame and hand it to [`present`], which turns it into draw
//! calls on whatever [`RenderSurface`] the adapter provides.

use std::time::Duration;

use anyhow::Result as AnyResult;
use glam::Vec2;
use storm_castle_core::{
    AnimationFrame, EntityId, Event, Notification, Rect, ScreenState, UnitKind, CHEST_HEALTH,
};
use storm_castle_world::{query, NotificationBoard, World};

/// Time the "Room Cleared!" banner stays up after a room empties.
pub const ROOM_BANNER_DURATION: Duration = Duration::from_millis(1_000);

/// Asset drawn behind a health bar.
pub const HEALTH_BAR_BACKGROUND: &str = "health_bar/background.png";
/// Asset covering the missing share of a health bar.
pub const HEALTH_BAR_RED: &str = "health_bar/red.png";
/// Asset covering the remaining share of a health bar.
pub const HEALTH_BAR_GREEN: &str = "health_bar/green.png";

const HEALTH_BAR_HEIGHT: f32 = 6.0;
const HEALTH_BAR_GAP: f32 = 4.0;
const HUD_LINE_SPACING: f32 = 20.0;
const STATS_ORIGIN: Vec2 = Vec2::new(220.0, 90.0);
const STATS_LINE_SPACING: f32 = 22.0;
const NOTIFICATION_ORIGIN: Vec2 = Vec2::new(20.0, 560.0);
const NOTIFICATION_SPACING: f32 = 25.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Default text color.
    pub const BLACK: Color = Color::from_rgb_u8(0, 0, 0);
    /// Highlight used for the selected class.
    pub const GREEN: Color = Color::from_rgb_u8(0, 200, 0);

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Full-screen image drawn first every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backdrop {
    /// Draft screen artwork.
    Title,
    /// Castle room floor.
    Room,
    /// Game-over artwork.
    GameOver,
}

impl Backdrop {
    /// Backdrop shown on the provided screen.
    #[must_use]
    pub const fn for_screen(screen: ScreenState) -> Self {
        match screen {
            ScreenState::Draft => Self::Title,
            ScreenState::Battle => Self::Room,
            ScreenState::GameOver => Self::GameOver,
        }
    }

    /// Asset path of the backdrop.
    #[must_use]
    pub const fn asset(self) -> &'static str {
        match self {
            Self::Title => "title_screen/title.png",
            Self::Room => "background.png",
            Self::GameOver => "game_over/background.png",
        }
    }
}

/// Names the image file for one animation frame of one sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteKey {
    folder: &'static str,
    file: &'static str,
}

impl SpriteKey {
    /// Frame of a unit class.
    #[must_use]
    pub const fn unit(kind: UnitKind, frame: AnimationFrame) -> Self {
        let folder = match kind {
            UnitKind::Warrior => "knight",
            UnitKind::Ranger => "ranger",
            UnitKind::Mage => "mage",
            UnitKind::Skeleton => "skeleton",
            UnitKind::Zombie => "zombie",
        };
        let file = match frame {
            AnimationFrame::Standing => "standing.png",
            AnimationFrame::Walking1 => "walking_1.png",
            AnimationFrame::Walking2 => "walking_2.png",
            AnimationFrame::Attacking => "attacking.png",
        };
        Self { folder, file }
    }

    /// Loot chest artwork.
    #[must_use]
    pub const fn chest() -> Self {
        Self {
            folder: "chest",
            file: "standing.png",
        }
    }

    /// Asset directory of the sprite.
    #[must_use]
    pub const fn folder(&self) -> &'static str {
        self.folder
    }

    /// Path of the frame relative to the asset root.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}/{}", self.folder, self.file)
    }
}

/// Three-layer health bar drawn above a sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthBar {
    frame: Rect,
    fraction: f32,
}

impl HealthBar {
    /// Builds the bar for a sprite occupying `sprite` with `current` out of `max` health.
    ///
    /// `max` is the live class value, so upgrades resize bars of units already
    /// on the field.
    #[must_use]
    pub fn above(sprite: &Rect, current: i32, max: u32) -> Self {
        let fraction = if max == 0 {
            0.0
        } else {
            (current as f32 / max as f32).clamp(0.0, 1.0)
        };
        let origin = Vec2::new(
            sprite.min().x,
            sprite.min().y - HEALTH_BAR_GAP - HEALTH_BAR_HEIGHT,
        );
        Self {
            frame: Rect::from_origin_and_size(
                origin,
                Vec2::new(sprite.size().x, HEALTH_BAR_HEIGHT),
            ),
            fraction,
        }
    }

    /// Share of the bar painted green.
    #[must_use]
    pub const fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Background, red and green layers in drawing order.
    #[must_use]
    pub fn layers(&self) -> [(&'static str, Rect); 3] {
        let size = self.frame.size();
        let green = Rect::from_origin_and_size(
            self.frame.min(),
            Vec2::new(size.x * self.fraction, size.y),
        );
        [
            (HEALTH_BAR_BACKGROUND, self.frame),
            (HEALTH_BAR_RED, self.frame),
            (HEALTH_BAR_GREEN, green),
        ]
    }
}

/// Unit or chest as it should appear this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSprite {
    /// Entity drawn by the sprite.
    pub id: EntityId,
    /// Image to draw.
    pub sprite: SpriteKey,
    /// Screen-space destination.
    pub rect: Rect,
    /// Bar drawn above the sprite.
    pub health_bar: HealthBar,
}

/// Single line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    /// Characters to render.
    pub text: String,
    /// Text color.
    pub color: Color,
    /// Top-left corner.
    pub position: Vec2,
}

impl TextLine {
    fn black(text: String, position: Vec2) -> Self {
        Self {
            text,
            color: Color::BLACK,
            position,
        }
    }
}

/// Cosmetic presentation state that lives outside the world.
#[derive(Clone, Debug)]
pub struct HudState {
    board: NotificationBoard,
    banner_remaining: Duration,
}

impl HudState {
    /// Creates a HUD whose notifications stay visible for `notification_lifetime`.
    #[must_use]
    pub const fn new(notification_lifetime: Duration) -> Self {
        Self {
            board: NotificationBoard::new(notification_lifetime),
            banner_remaining: Duration::ZERO,
        }
    }

    /// Advances timers by `dt`, then takes in the frame's events and drained notifications.
    pub fn update(&mut self, dt: Duration, events: &[Event], notifications: Vec<Notification>) {
        self.board.tick(dt);
        self.banner_remaining = self.banner_remaining.saturating_sub(dt);

        for event in events {
            match event {
                Event::RoomCleared { .. } => self.banner_remaining = ROOM_BANNER_DURATION,
                Event::ScreenChanged { .. } => {
                    self.board.clear();
                    self.banner_remaining = Duration::ZERO;
                }
                _ => {}
            }
        }
        for notification in notifications {
            self.board.show(notification);
        }
    }

    /// Whether the room-cleared banner is showing.
    #[must_use]
    pub fn banner_visible(&self) -> bool {
        !self.banner_remaining.is_zero()
    }

    /// Notifications currently on screen.
    #[must_use]
    pub const fn board(&self) -> &NotificationBoard {
        &self.board
    }
}

/// Everything drawn for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Image covering the whole window.
    pub backdrop: Backdrop,
    /// Units and chests in drawing order.
    pub sprites: Vec<SceneSprite>,
    /// HUD, menus and notifications in drawing order.
    pub text: Vec<TextLine>,
}

impl Scene {
    /// Captures the scene for the world's current screen.
    #[must_use]
    pub fn capture(world: &World, hud: &HudState) -> Self {
        let screen = query::screen(world);
        let mut scene = Self {
            backdrop: Backdrop::for_screen(screen),
            sprites: Vec::new(),
            text: Vec::new(),
        };
        match screen {
            ScreenState::Draft => scene.capture_draft(world),
            ScreenState::Battle => scene.capture_battle(world, hud),
            ScreenState::GameOver => scene.text.push(TextLine::black(
                format!("Rooms cleared: {}", query::rooms_cleared(world)),
                Vec2::new(330.0, 280.0),
            )),
        }
        scene
    }

    fn capture_draft(&mut self, world: &World) {
        self.text.push(TextLine::black(
            query::welcome_banner(world).to_owned(),
            Vec2::new(300.0, 120.0),
        ));
        self.text.push(TextLine::black(
            format!(
                "Choose {} units to start with below:",
                query::config(world).starting_units
            ),
            Vec2::new(200.0, 300.0),
        ));
        let draft = query::draft(world);
        for (index, (kind, count)) in draft.iter().enumerate() {
            self.text.push(TextLine::black(
                format!("{}s: {count}", kind.name()),
                Vec2::new(200.0 + index as f32 * 150.0, 350.0),
            ));
        }
    }

    fn capture_battle(&mut self, world: &World, hud: &HudState) {
        for unit in query::players(world)
            .into_iter()
            .chain(query::enemies(world))
        {
            let rect = unit.rect();
            self.sprites.push(SceneSprite {
                id: unit.id,
                sprite: SpriteKey::unit(unit.kind, unit.frame),
                rect,
                health_bar: HealthBar::above(&rect, unit.health, unit.max_health),
            });
        }
        for chest in query::chests(world) {
            let rect = chest.rect();
            self.sprites.push(SceneSprite {
                id: chest.id,
                sprite: SpriteKey::chest(),
                rect,
                health_bar: HealthBar::above(&rect, chest.health, CHEST_HEALTH.unsigned_abs()),
            });
        }

        let roster = query::roster(world);
        let selected = query::selected_class(world);
        for (index, (kind, count)) in roster.iter().enumerate() {
            self.text.push(TextLine {
                text: format!("[{}] {} units: {count}", index + 1, kind.name()),
                color: if kind == selected {
                    Color::GREEN
                } else {
                    Color::BLACK
                },
                position: Vec2::new(10.0, 10.0 + index as f32 * HUD_LINE_SPACING),
            });
        }
        self.text.push(TextLine::black(
            "[i] Stats page".to_owned(),
            Vec2::new(640.0, 10.0),
        ));
        self.text.push(TextLine::black(
            format!("Rooms cleared: {}", query::rooms_cleared(world)),
            Vec2::new(640.0, 30.0),
        ));
        if hud.banner_visible() {
            self.text.push(TextLine::black(
                "Room Cleared!".to_owned(),
                Vec2::new(640.0, 55.0),
            ));
        }

        if query::stats_visible(world) {
            let lines = query::stats_sheet(world)
                .iter()
                .flat_map(|line| line.lines())
                .collect::<Vec<_>>();
            for (index, text) in lines.into_iter().enumerate() {
                self.text.push(TextLine::black(
                    text,
                    STATS_ORIGIN + Vec2::new(0.0, index as f32 * STATS_LINE_SPACING),
                ));
            }
        }

        for entry in hud.board().visible() {
            self.text.push(TextLine::black(
                entry.notification().message.clone(),
                NOTIFICATION_ORIGIN - Vec2::new(0.0, entry.slot() as f32 * NOTIFICATION_SPACING),
            ));
        }
    }
}

/// Render surface provider capable of accepting draw calls.
pub trait RenderSurface {
    /// Starts a frame by covering the window with the backdrop asset.
    fn begin_frame(&mut self, backdrop: &str) -> AnyResult<()>;

    /// Draws an image asset stretched over `rect`.
    fn draw_image(&mut self, asset: &str, rect: Rect) -> AnyResult<()>;

    /// Draws a line of text with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, color: Color, position: Vec2) -> AnyResult<()>;
}

/// Issues the draw calls for `scene`: backdrop, sprites with their bars, then text.
pub fn present<S>(scene: &Scene, surface: &mut S) -> AnyResult<()>
where
    S: RenderSurface + ?Sized,
{
    surface.begin_frame(scene.backdrop.asset())?;
    for sprite in &scene.sprites {
        surface.draw_image(&sprite.sprite.path(), sprite.rect)?;
        for (asset, rect) in sprite.health_bar.layers() {
            surface.draw_image(asset, rect)?;
        }
    }
    for line in &scene.text {
        surface.draw_text(&line.text, line.color, line.position)?;
    }
    Ok(())
}
