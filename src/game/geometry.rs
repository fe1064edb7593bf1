use super::types::Direction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
  pub x: i32,
  pub y: i32,
}

impl Point {
  pub const fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }

  /// The neighbouring cell one step in `direction`.
  pub fn step(self, direction: Direction) -> Self {
    let (dx, dy) = direction.delta();
    Self {
      x: self.x + dx,
      y: self.y + dy,
    }
  }
}

/// Playfield dimensions. Fixed for the lifetime of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
  width: i32,
  height: i32,
}

impl GridSize {
  pub fn new(width: i32, height: i32) -> Self {
    assert!(
      width > 0 && height > 0,
      "grid dimensions must be positive, got {width}x{height}"
    );
    Self { width, height }
  }

  pub fn width(&self) -> i32 {
    self.width
  }

  pub fn height(&self) -> i32 {
    self.height
  }

  pub fn contains(&self, point: Point) -> bool {
    (0..self.width).contains(&point.x) && (0..self.height).contains(&point.y)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn contains_is_half_open_on_both_axes() {
    let grid = GridSize::new(10, 8);
    assert!(grid.contains(Point::new(0, 0)));
    assert!(grid.contains(Point::new(9, 7)));
    assert!(!grid.contains(Point::new(10, 0)));
    assert!(!grid.contains(Point::new(0, 8)));
    assert!(!grid.contains(Point::new(-1, 3)));
    assert!(!grid.contains(Point::new(3, -1)));
  }

  #[test]
  #[should_panic(expected = "grid dimensions must be positive")]
  fn zero_width_grid_is_rejected() {
    GridSize::new(0, 10);
  }

  #[test]
  fn step_applies_direction_delta() {
    let origin = Point::new(5, 5);
    assert_eq!(origin.step(Direction::Up), Point::new(5, 4));
    assert_eq!(origin.step(Direction::Down), Point::new(5, 6));
    assert_eq!(origin.step(Direction::Left), Point::new(4, 5));
    assert_eq!(origin.step(Direction::Right), Point::new(6, 5));
  }
}
