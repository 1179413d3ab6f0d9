use crate::game::sprites::LASER_SIZE;
use crate::game::{ImageId, Rectangle, Sprite};

pub const PLAYER_LASER_SPEED: i32 = 5;
pub const ALIEN_LASER_SPEED: i32 = -6;
/// How far past the bottom edge a laser may travel before it is dropped.
const BOTTOM_MARGIN: i32 = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaserOwner {
    Player,
    Alien,
}

/// A vertical projectile. Positive speed travels up the screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Laser {
    rect: Rectangle,
    speed: i32,
    owner: LaserOwner,
    screen_height: i32,
}

impl Laser {
    pub fn new(center: (i32, i32), speed: i32, owner: LaserOwner, screen_height: i32) -> Self {
        Self {
            rect: Rectangle::from_center(center.0, center.1, LASER_SIZE.width, LASER_SIZE.height),
            speed,
            owner,
            screen_height,
        }
    }

    pub fn player(center: (i32, i32), screen_height: i32) -> Self {
        Self::new(center, PLAYER_LASER_SPEED, LaserOwner::Player, screen_height)
    }

    pub fn alien(center: (i32, i32), screen_height: i32) -> Self {
        Self::new(center, ALIEN_LASER_SPEED, LaserOwner::Alien, screen_height)
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn owner(&self) -> LaserOwner {
        self.owner
    }

    /// Moves one step; returns false once the laser has left `[0, height + margin]`.
    pub fn update(&mut self) -> bool {
        self.rect.y -= self.speed;
        self.is_on_screen()
    }

    pub fn is_on_screen(&self) -> bool {
        self.rect.y >= 0 && self.rect.y <= self.screen_height + BOTTOM_MARGIN
    }
}

impl Sprite for Laser {
    fn rect(&self) -> Rectangle {
        self.rect
    }

    fn image(&self) -> ImageId {
        ImageId::Laser
    }
}

/// Advances every laser and drops the ones that left the screen.
pub fn update_all(lasers: &mut Vec<Laser>) {
    lasers.retain_mut(Laser::update);
}
