use crate::error::Result;
use crate::game::laser::{self, Laser};
use crate::game::sprites::Size;
use crate::game::{ImageId, Input, Rectangle, ScreenConfig, Sprite, SpriteSheet};
use crate::timer::Cooldown;

const SHIP_SPEED: i32 = 6;
pub const LASER_DELAY_MS: u64 = 300;

/// The player's cannon and its lasers in flight.
#[derive(Clone, Debug)]
pub struct Spaceship {
    rect: Rectangle,
    size: Size,
    speed: i32,
    screen: ScreenConfig,
    lasers: Vec<Laser>,
    cooldown: Cooldown,
}

impl Spaceship {
    pub fn new(screen: ScreenConfig, sprites: &SpriteSheet) -> Result<Self> {
        let size = sprites.size_of(ImageId::Spaceship)?;
        Ok(Self {
            rect: Self::start_rect(&screen, size),
            size,
            speed: SHIP_SPEED,
            screen,
            lasers: Vec::new(),
            cooldown: Cooldown::new(LASER_DELAY_MS),
        })
    }

    fn start_rect(screen: &ScreenConfig, size: Size) -> Rectangle {
        Rectangle::from_midbottom(
            (screen.screen_width + screen.offset) / 2,
            screen.screen_height,
            size.width,
            size.height,
        )
    }

    /// Applies one tick of input at time `now` (ms). Returns true when a
    /// laser was fired so the caller can cue the firing sound.
    pub fn update(&mut self, input: &Input, now: u64) -> bool {
        if input.right {
            self.rect.x += self.speed;
        }
        if input.left {
            self.rect.x -= self.speed;
        }

        let mut fired = false;
        if input.fire && self.cooldown.is_ready() {
            self.lasers
                .push(Laser::player(self.rect.center(), self.screen.screen_height));
            self.cooldown.trigger(now);
            fired = true;
        }

        self.constrain_movement();
        laser::update_all(&mut self.lasers);
        self.cooldown.recharge(now);
        fired
    }

    fn constrain_movement(&mut self) {
        self.rect.set_right(self.rect.right().min(self.screen.screen_width));
        self.rect.set_left(self.rect.left().max(self.screen.offset));
    }

    pub fn can_fire(&self) -> bool {
        self.cooldown.is_ready()
    }

    pub fn lasers(&self) -> &[Laser] {
        &self.lasers
    }

    pub fn lasers_mut(&mut self) -> &mut Vec<Laser> {
        &mut self.lasers
    }

    /// Back to the starting spot with no lasers in flight.
    pub fn reset(&mut self) {
        self.rect = Self::start_rect(&self.screen, self.size);
        self.lasers.clear();
        self.cooldown.reset();
    }
}

impl Sprite for Spaceship {
    fn rect(&self) -> Rectangle {
        self.rect
    }

    fn image(&self) -> ImageId {
        ImageId::Spaceship
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    fn ship() -> Spaceship {
        Spaceship::new(ScreenConfig::default(), &SpriteSheet::builtin()).unwrap()
    }

    fn held(left: bool, right: bool, fire: bool) -> Input {
        Input {
            left,
            right,
            fire,
            restart: false,
        }
    }

    #[test]
    fn starts_bottom_center() {
        let ship = ship();
        assert_eq!(ship.rect().bottom(), 700);
        assert_eq!(ship.rect().center().0, 400);
    }

    #[test]
    fn never_leaves_the_field() {
        let mut ship = ship();
        for tick in 0..200 {
            ship.update(&held(false, true, false), tick * 16);
            assert!(ship.rect().left() >= 50 && ship.rect().right() <= 750);
        }
        assert_eq!(ship.rect().right(), 750);
        for tick in 200..400 {
            ship.update(&held(true, false, false), tick * 16);
            assert!(ship.rect().left() >= 50 && ship.rect().right() <= 750);
        }
        assert_eq!(ship.rect().left(), 50);
    }

    #[test]
    fn fire_is_rate_limited() {
        let mut ship = ship();
        let fire = held(false, false, true);
        assert!(ship.update(&fire, 1_000));
        assert!(!ship.update(&fire, 1_100));
        assert!(!ship.update(&fire, 1_299));
        // Recharged at the end of the 1_300 tick, so the next tick fires.
        assert!(!ship.update(&fire, 1_300));
        assert!(ship.update(&fire, 1_316));
        assert_eq!(ship.lasers().len(), 2);
    }

    #[test]
    fn lasers_leave_from_the_ship_and_climb() {
        let mut ship = ship();
        ship.update(&held(false, false, true), 0);
        let laser = &ship.lasers()[0];
        let (cx, _) = ship.rect().center();
        assert_eq!(laser.rect().center().0, cx);
        assert!(laser.rect().y < ship.rect().center().1);
    }

    #[test]
    fn reset_restores_position_and_clears_lasers() {
        let mut ship = ship();
        let start = ship.rect();
        ship.update(&held(true, false, true), 0);
        assert_ne!(ship.rect(), start);
        ship.reset();
        assert_eq!(ship.rect(), start);
        assert!(ship.lasers().is_empty());
        assert!(ship.can_fire());
    }

    #[test]
    fn missing_image_fails_construction() {
        let sheet = SpriteSheet::builtin().without(ImageId::Spaceship);
        let err = Spaceship::new(ScreenConfig::default(), &sheet).unwrap_err();
        assert_eq!(err, GameError::MissingSprite(ImageId::Spaceship));
    }
}
