use std::collections::HashMap;

use crate::error::{GameError, Result};
use crate::game::{AlienKind, ImageId};

/// Pixel size of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Lasers and blocks are plain filled rectangles of fixed size, so they
/// have no entry in a [`SpriteSheet`].
pub const LASER_SIZE: Size = Size::new(4, 15);
pub const BLOCK_SIZE: Size = Size::new(3, 3);

/// Image handles the game knows how to size. Entities drawn from art take
/// their rectangle dimensions from here when they are created.
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    sizes: HashMap<ImageId, Size>,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SpriteSheet {
    /// Sheet without any images bound.
    pub fn empty() -> Self {
        Self {
            sizes: HashMap::new(),
        }
    }

    /// The stock art sizes.
    pub fn builtin() -> Self {
        Self::empty()
            .with(ImageId::Spaceship, Size::new(60, 32))
            .with(ImageId::Alien(AlienKind::Squid), Size::new(32, 32))
            .with(ImageId::Alien(AlienKind::Crab), Size::new(44, 32))
            .with(ImageId::Alien(AlienKind::Octopus), Size::new(48, 32))
            .with(ImageId::MysteryShip, Size::new(64, 28))
    }

    pub fn with(mut self, image: ImageId, size: Size) -> Self {
        self.sizes.insert(image, size);
        self
    }

    pub fn without(mut self, image: ImageId) -> Self {
        self.sizes.remove(&image);
        self
    }

    pub fn size_of(&self, image: ImageId) -> Result<Size> {
        self.sizes
            .get(&image)
            .copied()
            .ok_or(GameError::MissingSprite(image))
    }

    /// Fails on the first image the game needs that is not bound.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ImageId::Spaceship,
            ImageId::Alien(AlienKind::Squid),
            ImageId::Alien(AlienKind::Crab),
            ImageId::Alien(AlienKind::Octopus),
            ImageId::MysteryShip,
        ];
        for image in required {
            self.size_of(image)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sheet_is_complete() {
        assert!(SpriteSheet::builtin().validate().is_ok());
    }

    #[test]
    fn missing_image_is_reported() {
        let sheet = SpriteSheet::builtin().without(ImageId::MysteryShip);
        assert_eq!(
            sheet.validate(),
            Err(GameError::MissingSprite(ImageId::MysteryShip))
        );
    }

    #[test]
    fn lasers_and_blocks_are_not_art() {
        let sheet = SpriteSheet::builtin();
        assert_eq!(
            sheet.size_of(ImageId::Laser),
            Err(GameError::MissingSprite(ImageId::Laser))
        );
        assert_eq!(
            sheet.size_of(ImageId::Block),
            Err(GameError::MissingSprite(ImageId::Block))
        );
    }
}
