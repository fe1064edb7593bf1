use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
  Up,
  Down,
  Left,
  Right,
}

impl Direction {
  #[cfg(test)]
  pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

  /// Unit movement on the grid. `y` grows downwards.
  pub fn delta(self) -> (i32, i32) {
    match self {
      Direction::Up => (0, -1),
      Direction::Down => (0, 1),
      Direction::Left => (-1, 0),
      Direction::Right => (1, 0),
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Direction::Up => "UP",
      Direction::Down => "DOWN",
      Direction::Left => "LEFT",
      Direction::Right => "RIGHT",
    }
  }
}

/// A connected participant. The snake itself lives in the world's snake map
/// under `id`; a player never holds it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
  pub id: String,
  pub name: String,
}
