use crate::game::sprites::BLOCK_SIZE;
use crate::game::{take_colliding, ImageId, Rectangle, ScreenConfig, Sprite};

pub const OBSTACLE_COUNT: usize = 4;
/// Distance of the obstacle row's top edge from the bottom of the screen.
const OBSTACLE_RISE: i32 = 100;

/// Bunker shape: 1 marks a block. Arch on top, notch cut out of the base.
pub const GRID: [[u8; 23]; 13] = [
    [0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
    [0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0],
    [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1],
];

pub const GRID_ROWS: usize = GRID.len();
pub const GRID_COLS: usize = GRID[0].len();

/// Width of one obstacle in pixels.
pub const OBSTACLE_WIDTH: i32 = GRID_COLS as i32 * BLOCK_SIZE.width;

/// One destructible 3x3 cell of an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    rect: Rectangle,
}

impl Block {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            rect: Rectangle::new(x, y, BLOCK_SIZE.width, BLOCK_SIZE.height),
        }
    }
}

impl Sprite for Block {
    fn rect(&self) -> Rectangle {
        self.rect
    }

    fn image(&self) -> ImageId {
        ImageId::Block
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Obstacle {
    blocks: Vec<Block>,
}

impl Obstacle {
    /// Lays out one block per set cell of [`GRID`] from the top-left corner `(x, y)`.
    pub fn new(x: f32, y: f32) -> Self {
        let mut blocks = Vec::new();
        for (row, cells) in GRID.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == 1 {
                    let px = x + (col as i32 * BLOCK_SIZE.width) as f32;
                    let py = y + (row as i32 * BLOCK_SIZE.height) as f32;
                    blocks.push(Block::new(px as i32, py as i32));
                }
            }
        }
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_destroyed(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Removes every block overlapping `rect`; returns how many went.
    pub fn erode(&mut self, rect: &Rectangle) -> usize {
        take_colliding(rect, &mut self.blocks).len()
    }
}

/// Four obstacles with equal gaps between each other and the field edges.
pub fn create_obstacles(screen: &ScreenConfig) -> Vec<Obstacle> {
    let count = OBSTACLE_COUNT as f32;
    let gap = (screen.right_bound() as f32 - count * OBSTACLE_WIDTH as f32) / (count + 1.0);
    let y = (screen.screen_height - OBSTACLE_RISE) as f32;
    (0..OBSTACLE_COUNT)
        .map(|i| {
            let x = (i + 1) as f32 * gap + (i as i32 * OBSTACLE_WIDTH) as f32;
            Obstacle::new(x, y)
        })
        .collect()
}

/// Erodes every obstacle at `rect`; true when at least one block went.
pub fn erode_all(obstacles: &mut [Obstacle], rect: &Rectangle) -> bool {
    let mut hit = false;
    for obstacle in obstacles {
        if obstacle.erode(rect) > 0 {
            hit = true;
        }
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_cells() -> usize {
        GRID.iter().flatten().filter(|&&c| c == 1).count()
    }

    #[test]
    fn obstacle_has_one_block_per_set_cell() {
        let obstacle = Obstacle::new(10.0, 20.0);
        assert_eq!(obstacle.blocks().len(), set_cells());
        assert_eq!(obstacle.blocks().len(), 240);
        let first = obstacle.blocks()[0].rect();
        assert_eq!(first, Rectangle::new(22, 20, 3, 3));
    }

    #[test]
    fn obstacles_are_evenly_spaced() {
        let screen = ScreenConfig::default();
        let obstacles = create_obstacles(&screen);
        assert_eq!(obstacles.len(), OBSTACLE_COUNT);

        // Bottom-left block sits in column 0 of the grid.
        let lefts: Vec<i32> = obstacles
            .iter()
            .map(|o| o.blocks().iter().map(|b| b.rect().left()).min().unwrap())
            .collect();
        let steps: Vec<i32> = lefts.windows(2).map(|w| w[1] - w[0]).collect();
        for step in &steps {
            assert!((step - steps[0]).abs() <= 1, "uneven spacing {steps:?}");
        }
        assert_eq!(lefts[0], 104);
        for o in &obstacles {
            assert!(o.blocks().iter().all(|b| b.rect().top() >= 600));
        }
    }

    #[test]
    fn erode_removes_only_overlapping_blocks() {
        let mut obstacle = Obstacle::new(0.0, 0.0);
        let before = obstacle.blocks().len();
        // Laser-sized probe through the top row of the arch.
        let removed = obstacle.erode(&Rectangle::new(30, 0, 4, 3));
        assert_eq!(removed, 2);
        assert_eq!(obstacle.blocks().len(), before - 2);
        assert_eq!(obstacle.erode(&Rectangle::new(500, 500, 4, 4)), 0);
    }

    #[test]
    fn erode_all_reports_hits() {
        let mut obstacles = create_obstacles(&ScreenConfig::default());
        assert!(!erode_all(&mut obstacles, &Rectangle::new(0, 0, 5, 5)));
        let target = obstacles[2].blocks()[0].rect();
        assert!(erode_all(&mut obstacles, &target));
        assert!(!obstacles[2].is_destroyed());
    }
}
