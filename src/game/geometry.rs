/// Axis-aligned box in screen pixels. `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of the given size whose center lands on `(cx, cy)`.
    pub fn from_center(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        Self::new(cx - width / 2, cy - height / 2, width, height)
    }

    /// Rectangle of the given size whose bottom edge midpoint lands on `(cx, bottom)`.
    pub fn from_midbottom(cx: i32, bottom: i32, width: i32, height: i32) -> Self {
        Self::new(cx - width / 2, bottom - height, width, height)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.width;
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn collides(&self, other: &Rectangle) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_uses_integer_halves() {
        let r = Rectangle::from_center(100, 300, 4, 15);
        assert_eq!(r, Rectangle::new(98, 293, 4, 15));
        assert_eq!(r.center(), (100, 300));
    }

    #[test]
    fn midbottom_anchors_the_bottom_edge() {
        let r = Rectangle::from_midbottom(400, 700, 60, 32);
        assert_eq!(r.bottom(), 700);
        assert_eq!(r.left(), 370);
        assert_eq!(r.right(), 430);
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Rectangle::new(0, 0, 10, 10);
        let b = Rectangle::new(10, 0, 10, 10);
        let c = Rectangle::new(9, 9, 10, 10);
        assert!(!a.collides(&b));
        assert!(a.collides(&c));
        assert!(c.collides(&a));
    }

    #[test]
    fn set_right_keeps_width() {
        let mut r = Rectangle::new(740, 0, 60, 30);
        r.set_right(750);
        assert_eq!(r.left(), 690);
        assert_eq!(r.width, 60);
    }
}
