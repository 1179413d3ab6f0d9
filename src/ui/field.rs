use std::collections::HashMap;

use ratatui::prelude::*;

use crate::game::{AlienKind, DrawItem, ImageId, Rectangle};

const BACKGROUND: Color = Color::Rgb(0, 0, 5);

/// Braille-resolution canvas: every terminal cell holds 2x4 dots.
pub struct Canvas {
    width: usize,
    height: usize,
    /// Game pixels per dot.
    scale_x: f32,
    scale_y: f32,
    grid: Vec<Vec<(char, Style)>>,
}

impl Canvas {
    /// Canvas of `width` x `height` cells showing a `field_w` x `field_h` pixel field.
    pub fn new(width: usize, height: usize, field_w: i32, field_h: i32) -> Self {
        let dots_x = (width * 2).max(1) as f32;
        let dots_y = (height * 4).max(1) as f32;
        Self {
            width,
            height,
            scale_x: dots_x / field_w.max(1) as f32,
            scale_y: dots_y / field_h.max(1) as f32,
            grid: vec![vec![(' ', Style::default().bg(BACKGROUND)); width]; height],
        }
    }

    fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
        match (sub_x, sub_y) {
            (0, 0) => 0x01,
            (0, 1) => 0x02,
            (0, 2) => 0x04,
            (0, 3) => 0x40,
            (1, 0) => 0x08,
            (1, 1) => 0x10,
            (1, 2) => 0x20,
            (1, 3) => 0x80,
            _ => 0,
        }
    }

    fn set_dot(&self, map: &mut HashMap<(usize, usize), u8>, bx: i32, by: i32) {
        let (bw, bh) = ((self.width * 2) as i32, (self.height * 4) as i32);
        if bx < 0 || by < 0 || bx >= bw || by >= bh {
            return;
        }
        let (bx, by) = (bx as usize, by as usize);
        *map.entry((bx / 2, by / 4)).or_insert(0) |= Self::braille_bit(bx % 2, by % 4);
    }

    fn write_layer(&mut self, map: &HashMap<(usize, usize), u8>, color: Color, bold: bool) {
        for (&(cx, cy), &bits) in map {
            if cx < self.width && cy < self.height && bits != 0 {
                // Merge with dots already drawn in the cell.
                let existing = self.grid[cy][cx].0 as u32;
                let merged = if (0x2800..=0x28FF).contains(&existing) {
                    (existing - 0x2800) as u8 | bits
                } else {
                    bits
                };
                let ch = char::from_u32(0x2800 + merged as u32).unwrap_or(' ');
                let mut style = Style::default().fg(color).bg(BACKGROUND);
                if bold {
                    style = style.add_modifier(Modifier::BOLD);
                }
                self.grid[cy][cx] = (ch, style);
            }
        }
    }

    fn to_dots(&self, x: i32, y: i32) -> (i32, i32) {
        (
            (x as f32 * self.scale_x) as i32,
            (y as f32 * self.scale_y) as i32,
        )
    }

    /// Fills the rectangle, at least one dot per side so tiny entities stay visible.
    fn fill_rect(&self, map: &mut HashMap<(usize, usize), u8>, rect: &Rectangle) {
        let (x0, y0) = self.to_dots(rect.left(), rect.top());
        let x1 = ((rect.right() as f32 * self.scale_x).ceil() as i32).max(x0 + 1);
        let y1 = ((rect.bottom() as f32 * self.scale_y).ceil() as i32).max(y0 + 1);
        for by in y0..y1 {
            for bx in x0..x1 {
                self.set_dot(map, bx, by);
            }
        }
    }

    fn stamp(&self, map: &mut HashMap<(usize, usize), u8>, rect: &Rectangle, pixels: &[(i32, i32)]) {
        let (cx, cy) = rect.center();
        let (cx, cy) = self.to_dots(cx, cy);
        for &(dx, dy) in pixels {
            self.set_dot(map, cx + dx, cy + dy);
        }
    }

    pub fn draw(&mut self, item: &DrawItem, anim_frame: bool) {
        let mut map = HashMap::new();
        let (color, bold) = match item.image {
            ImageId::Spaceship => {
                self.stamp(&mut map, &item.rect, SHIP);
                (Color::Rgb(80, 255, 80), true)
            }
            ImageId::Alien(kind) => {
                self.stamp(&mut map, &item.rect, alien_pixels(kind, anim_frame));
                let color = match kind {
                    AlienKind::Squid => Color::Rgb(255, 80, 80),
                    AlienKind::Crab => Color::Rgb(80, 255, 150),
                    AlienKind::Octopus => Color::Rgb(200, 180, 255),
                };
                (color, false)
            }
            ImageId::MysteryShip => {
                self.stamp(&mut map, &item.rect, MYSTERY);
                (Color::Rgb(255, 60, 200), true)
            }
            ImageId::Laser => {
                self.fill_rect(&mut map, &item.rect);
                (Color::Rgb(243, 216, 63), true)
            }
            ImageId::Block => {
                self.fill_rect(&mut map, &item.rect);
                (Color::Rgb(243, 216, 63), false)
            }
        };
        self.write_layer(&map, color, bold);
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        self.grid
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

const SHIP: &[(i32, i32)] = &[
    (0, -3),
    (-1, -2), (0, -2), (1, -2),
    (-1, -1), (0, -1), (1, -1),
    (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
    (-4, 1), (-3, 1), (-2, 1), (-1, 1), (0, 1), (1, 1), (2, 1), (3, 1), (4, 1),
];

const MYSTERY: &[(i32, i32)] = &[
    (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
    (-4, 0), (-3, 0), (-1, 0), (1, 0), (3, 0), (4, 0),
    (-3, 1), (-2, 1), (2, 1), (3, 1),
];

fn alien_pixels(kind: AlienKind, frame: bool) -> &'static [(i32, i32)] {
    match (kind, frame) {
        (AlienKind::Squid, true) => &[
            (0, -2),
            (-1, -1), (0, -1), (1, -1),
            (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0),
            (-2, 1), (0, 1), (2, 1),
            (-1, 2), (1, 2),
        ],
        (AlienKind::Squid, false) => &[
            (0, -2),
            (-1, -1), (0, -1), (1, -1),
            (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0),
            (-2, 1), (0, 1), (2, 1),
            (-3, 2), (3, 2),
        ],
        (AlienKind::Crab, true) => &[
            (-1, -2), (1, -2),
            (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
            (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
            (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
            (-3, 2), (-2, 2), (2, 2), (3, 2),
        ],
        (AlienKind::Crab, false) => &[
            (-1, -2), (1, -2),
            (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
            (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
            (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
            (-2, 2), (-1, 2), (1, 2), (2, 2),
        ],
        (AlienKind::Octopus, true) => &[
            (-2, -2), (-1, -2), (0, -2), (1, -2), (2, -2),
            (-3, -1), (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1), (3, -1),
            (-3, 0), (-2, 0), (0, 0), (2, 0), (3, 0),
            (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
            (-2, 2), (2, 2),
        ],
        (AlienKind::Octopus, false) => &[
            (-2, -2), (-1, -2), (0, -2), (1, -2), (2, -2),
            (-3, -1), (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1), (3, -1),
            (-3, 0), (-2, 0), (0, 0), (2, 0), (3, 0),
            (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
            (-3, 2), (3, 2),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_cells(canvas: &Canvas) -> usize {
        canvas
            .grid
            .iter()
            .flatten()
            .filter(|(ch, _)| *ch != ' ')
            .count()
    }

    #[test]
    fn tiny_entities_still_show() {
        let mut canvas = Canvas::new(40, 20, 800, 700);
        canvas.draw(
            &DrawItem {
                image: ImageId::Block,
                rect: Rectangle::new(400, 350, 3, 3),
            },
            false,
        );
        assert!(lit_cells(&canvas) >= 1);
    }

    #[test]
    fn offscreen_dots_are_clipped() {
        let mut canvas = Canvas::new(10, 5, 800, 700);
        canvas.draw(
            &DrawItem {
                image: ImageId::Laser,
                rect: Rectangle::new(-50, -50, 4, 15),
            },
            true,
        );
        canvas.draw(
            &DrawItem {
                image: ImageId::Alien(AlienKind::Crab),
                rect: Rectangle::new(2_000, 100, 44, 32),
            },
            true,
        );
        assert_eq!(lit_cells(&canvas), 0);
    }

    #[test]
    fn layers_merge_within_a_cell() {
        let mut canvas = Canvas::new(4, 4, 8, 16);
        // One game pixel per dot: two dots in the same cell.
        canvas.draw(&DrawItem { image: ImageId::Block, rect: Rectangle::new(0, 0, 1, 1) }, false);
        canvas.draw(&DrawItem { image: ImageId::Block, rect: Rectangle::new(1, 0, 1, 1) }, false);
        assert_eq!(canvas.grid[0][0].0, char::from_u32(0x2800 + 0x09).unwrap());
    }
}
