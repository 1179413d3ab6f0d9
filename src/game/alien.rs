use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::Result;
use crate::game::{ImageId, Rectangle, ScreenConfig, Sprite, SpriteSheet};

pub const ALIEN_ROWS: usize = 5;
pub const ALIEN_COLS: usize = 11;
const ALIEN_SPACING: i32 = 55;
const FORMATION_LEFT: i32 = 75;
const FORMATION_TOP: i32 = 110;
/// Vertical step the formation takes each time it turns around.
pub const DROP_DISTANCE: i32 = 2;

const MYSTERY_SHIP_TOP: i32 = 90;
const MYSTERY_SHIP_SPEED: i32 = 3;
pub const MYSTERY_SHIP_POINTS: u32 = 500;

/// Alien tier. The discriminant is the tier value used for scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlienKind {
    Octopus = 1,
    Crab = 2,
    Squid = 3,
}

impl AlienKind {
    pub fn value(&self) -> u32 {
        *self as u32
    }

    pub fn points(&self) -> u32 {
        self.value() * 100
    }

    /// Row 0 is the top of the formation.
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => AlienKind::Squid,
            1 | 2 => AlienKind::Crab,
            _ => AlienKind::Octopus,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alien {
    kind: AlienKind,
    rect: Rectangle,
}

impl Alien {
    pub fn new(kind: AlienKind, rect: Rectangle) -> Self {
        Self { kind, rect }
    }

    pub fn kind(&self) -> AlienKind {
        self.kind
    }

    pub fn step(&mut self, direction: i32) {
        self.rect.x += direction;
    }
}

impl Sprite for Alien {
    fn rect(&self) -> Rectangle {
        self.rect
    }

    fn image(&self) -> ImageId {
        ImageId::Alien(self.kind)
    }
}

/// The marching grid of aliens. All members share one direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formation {
    aliens: Vec<Alien>,
    direction: i32,
}

impl Formation {
    pub fn new(aliens: Vec<Alien>) -> Self {
        Self {
            aliens,
            direction: 1,
        }
    }

    /// Builds the 5x11 starting grid.
    pub fn create(screen: &ScreenConfig, sprites: &SpriteSheet) -> Result<Self> {
        let mut aliens = Vec::with_capacity(ALIEN_ROWS * ALIEN_COLS);
        for row in 0..ALIEN_ROWS {
            let kind = AlienKind::for_row(row);
            let size = sprites.size_of(ImageId::Alien(kind))?;
            for col in 0..ALIEN_COLS {
                let x = FORMATION_LEFT + col as i32 * ALIEN_SPACING + screen.offset / 2;
                let y = FORMATION_TOP + row as i32 * ALIEN_SPACING;
                aliens.push(Alien::new(kind, Rectangle::new(x, y, size.width, size.height)));
            }
        }
        Ok(Self::new(aliens))
    }

    pub fn aliens(&self) -> &[Alien] {
        &self.aliens
    }

    pub fn aliens_mut(&mut self) -> &mut Vec<Alien> {
        &mut self.aliens
    }

    pub fn direction(&self) -> i32 {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.aliens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }

    /// Moves every alien one step sideways, then turns the formation around
    /// and drops it if any alien reached an edge. The right edge wins when
    /// both are touched in the same tick.
    pub fn advance(&mut self, screen: &ScreenConfig) {
        let direction = self.direction;
        for alien in &mut self.aliens {
            alien.step(direction);
        }

        let right_bound = screen.right_bound();
        let left_bound = screen.left_bound();
        if self.aliens.iter().any(|a| a.rect.right() >= right_bound) {
            self.direction = -1;
            self.drop_down(DROP_DISTANCE);
        } else if self.aliens.iter().any(|a| a.rect.left() <= left_bound) {
            self.direction = 1;
            self.drop_down(DROP_DISTANCE);
        }
    }

    pub fn drop_down(&mut self, distance: i32) {
        for alien in &mut self.aliens {
            alien.rect.y += distance;
        }
    }

    /// Uniformly picks one alien, or `None` when the formation is empty.
    pub fn pick_shooter<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Alien> {
        self.aliens.choose(rng)
    }
}

/// Bonus target crossing the top of the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MysteryShip {
    rect: Rectangle,
    speed: i32,
    left_bound: i32,
    right_bound: i32,
}

impl MysteryShip {
    /// Enters from a random side, heading for the opposite one.
    pub fn spawn<R: Rng + ?Sized>(
        screen: &ScreenConfig,
        sprites: &SpriteSheet,
        rng: &mut R,
    ) -> Result<Self> {
        let size = sprites.size_of(ImageId::MysteryShip)?;
        let from_left = rng.gen_bool(0.5);
        let (x, speed) = if from_left {
            (screen.offset / 2, MYSTERY_SHIP_SPEED)
        } else {
            (screen.right_bound() - size.width, -MYSTERY_SHIP_SPEED)
        };
        Ok(Self {
            rect: Rectangle::new(x, MYSTERY_SHIP_TOP, size.width, size.height),
            speed,
            left_bound: screen.left_bound(),
            right_bound: screen.screen_width + screen.offset / 2,
        })
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    /// Moves one step; returns false once the ship is entirely past either bound.
    pub fn update(&mut self) -> bool {
        self.rect.x += self.speed;
        !(self.rect.right() < self.left_bound || self.rect.left() > self.right_bound)
    }
}

impl Sprite for MysteryShip {
    fn rect(&self) -> Rectangle {
        self.rect
    }

    fn image(&self) -> ImageId {
        ImageId::MysteryShip
    }
}
