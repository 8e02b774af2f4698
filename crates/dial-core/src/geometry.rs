//! Plain 2D geometry in surface pixels (y grows downward).

use std::ops::{Add, Sub};

/// A point on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The point `distance` away along `angle_rad`, measured from the +x
    /// axis towards +y (clockwise on screen).
    pub fn polar(self, distance: f32, angle_rad: f32) -> Self {
        Self {
            x: self.x + angle_rad.cos() * distance,
            y: self.y + angle_rad.sin() * distance,
        }
    }

    pub fn distance_to(self, other: Point) -> f32 {
        (other - self).length()
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn min_dimension(self) -> f32 {
        self.width.min(self.height)
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_quarter_turn_points_down() {
        let p = Point::new(10.0, 10.0).polar(5.0, std::f32::consts::FRAC_PI_2);
        assert!((p.x - 10.0).abs() < 1e-4);
        assert!((p.y - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_size_center() {
        let size = Size::new(200.0, 100.0);
        assert_eq!(size.center(), Point::new(100.0, 50.0));
        assert_eq!(size.min_dimension(), 100.0);
    }
}
