//! Core game model: entities, the formation, collisions and the
//! running/game-over state machine. Nothing in here touches the terminal.

pub mod alien;
pub mod geometry;
pub mod laser;
pub mod obstacle;
pub mod spaceship;
pub mod sprites;
pub mod state;

pub use alien::{Alien, AlienKind, Formation, MysteryShip};
pub use geometry::Rectangle;
pub use laser::{Laser, LaserOwner};
pub use obstacle::{Block, Obstacle};
pub use spaceship::Spaceship;
pub use sprites::SpriteSheet;
pub use state::{GameState, GameStatus, Hud};

/// Opaque image handle handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageId {
    Spaceship,
    Alien(AlienKind),
    MysteryShip,
    Laser,
    Block,
}

/// Anything with a position and an image.
pub trait Sprite {
    fn rect(&self) -> Rectangle;
    fn image(&self) -> ImageId;

    fn draw_item(&self) -> DrawItem {
        DrawItem {
            image: self.image(),
            rect: self.rect(),
        }
    }
}

/// One entry of the render list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawItem {
    pub image: ImageId,
    pub rect: Rectangle,
}

/// Fire-and-forget audio cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    LaserFired,
    Explosion,
}

/// Player input for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub restart: bool,
}

/// Screen geometry, fixed for the lifetime of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub offset: i32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            screen_width: 750,
            screen_height: 700,
            offset: 50,
        }
    }
}

impl ScreenConfig {
    /// Left edge of the play field.
    pub fn left_bound(&self) -> i32 {
        self.offset / 2
    }

    /// Right edge the formation turns around at.
    pub fn right_bound(&self) -> i32 {
        self.screen_width + self.offset
    }
}

/// Removes and returns every member of `group` overlapping `rect`.
pub fn take_colliding<T: Sprite>(rect: &Rectangle, group: &mut Vec<T>) -> Vec<T> {
    let (hit, keep): (Vec<T>, Vec<T>) = std::mem::take(group)
        .into_iter()
        .partition(|member| member.rect().collides(rect));
    *group = keep;
    hit
}

/// True when any member of `group` overlaps `rect`.
pub fn any_colliding<T: Sprite>(rect: &Rectangle, group: &[T]) -> bool {
    group.iter().any(|member| member.rect().collides(rect))
}
