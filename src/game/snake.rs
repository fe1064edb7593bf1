use super::geometry::Point;
use super::types::Direction;
use std::collections::VecDeque;

/// A player's body on the grid, head first.
///
/// The body is never empty: it starts with the spawn cell and every mutation
/// either keeps or grows its length. Bounds and collisions are not checked
/// here; the engine resolves them after each step.
#[derive(Debug, Clone)]
pub struct Snake {
  body: VecDeque<Point>,
  direction: Direction,
  alive: bool,
}

impl Snake {
  pub fn new(spawn: Point, direction: Direction) -> Self {
    let mut body = VecDeque::with_capacity(4);
    body.push_back(spawn);
    tracing::debug!(x = spawn.x, y = spawn.y, "snake created");
    Self {
      body,
      direction,
      alive: true,
    }
  }

  #[cfg(test)]
  pub fn from_body(body: Vec<Point>, direction: Direction) -> Option<Self> {
    if body.is_empty() {
      return None;
    }
    Some(Self {
      body: body.into(),
      direction,
      alive: true,
    })
  }

  pub fn head(&self) -> Point {
    *self.body.front().expect("snake body is never empty")
  }

  pub fn body(&self) -> impl ExactSizeIterator<Item = &Point> + '_ {
    self.body.iter()
  }

  pub fn direction(&self) -> Direction {
    self.direction
  }

  pub fn set_direction(&mut self, direction: Direction) {
    self.direction = direction;
  }

  pub fn is_alive(&self) -> bool {
    self.alive
  }

  /// One-way; a dead snake never moves again.
  pub fn kill(&mut self) {
    self.alive = false;
  }

  /// Shifts the snake one cell along its direction, keeping its length.
  pub fn advance(&mut self) {
    if !self.alive {
      tracing::debug!("dead snake cannot move");
      return;
    }
    let new_head = self.head().step(self.direction);
    self.body.push_front(new_head);
    self.body.pop_back();
    tracing::debug!(x = new_head.x, y = new_head.y, "snake moved");
  }

  /// Duplicates the tail cell. The copy is shed by the next `advance`, so the
  /// visible length grows by one from then on.
  pub fn grow(&mut self) {
    let tail = *self.body.back().expect("snake body is never empty");
    self.body.push_back(tail);
    tracing::debug!(len = self.body.len(), "snake grew");
  }

  pub fn head_hits_own_body(&self) -> bool {
    let head = self.head();
    self.body.iter().skip(1).any(|segment| *segment == head)
  }

  pub fn occupies(&self, point: Point) -> bool {
    self.body.iter().any(|segment| *segment == point)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn snake_from(points: &[(i32, i32)], direction: Direction) -> Snake {
    let body = points.iter().map(|(x, y)| Point::new(*x, *y)).collect();
    Snake::from_body(body, direction).expect("test body is not empty")
  }

  #[test]
  fn new_snake_has_single_segment_at_spawn() {
    let snake = Snake::new(Point::new(5, 5), Direction::Right);
    assert_eq!(snake.body().len(), 1);
    assert_eq!(snake.head(), Point::new(5, 5));
    assert_eq!(snake.direction(), Direction::Right);
    assert!(snake.is_alive());
  }

  #[test]
  fn advance_preserves_length_and_shifts_segments_in_every_direction() {
    for direction in Direction::ALL {
      let mut snake = snake_from(&[(5, 5), (4, 5), (3, 5), (3, 6)], direction);
      let before: Vec<Point> = snake.body().copied().collect();

      snake.advance();

      let after: Vec<Point> = snake.body().copied().collect();
      assert_eq!(after.len(), before.len());
      assert_eq!(after[0], before[0].step(direction));
      assert_eq!(&after[1..], &before[..before.len() - 1]);
    }
  }

  #[test]
  fn dead_snake_does_not_advance() {
    let mut snake = snake_from(&[(2, 2)], Direction::Down);
    snake.kill();
    snake.advance();
    assert_eq!(snake.head(), Point::new(2, 2));
    assert!(!snake.is_alive());
  }

  #[test]
  fn grow_duplicates_tail_and_keeps_other_segments() {
    let mut snake = snake_from(&[(5, 5), (4, 5), (3, 5)], Direction::Right);

    snake.grow();

    let body: Vec<Point> = snake.body().copied().collect();
    assert_eq!(
      body,
      vec![Point::new(5, 5), Point::new(4, 5), Point::new(3, 5), Point::new(3, 5)]
    );
  }

  #[test]
  fn grown_snake_keeps_extra_segment_after_next_advance() {
    let mut snake = snake_from(&[(5, 5)], Direction::Right);
    snake.grow();
    snake.advance();
    let body: Vec<Point> = snake.body().copied().collect();
    assert_eq!(body, vec![Point::new(6, 5), Point::new(5, 5)]);
  }

  #[test]
  fn head_on_own_segment_is_detected() {
    let snake = snake_from(&[(4, 5), (5, 5), (4, 5)], Direction::Left);
    assert!(snake.head_hits_own_body());

    let clear = snake_from(&[(4, 5), (5, 5), (5, 6)], Direction::Left);
    assert!(!clear.head_hits_own_body());
  }

  #[test]
  fn from_body_rejects_empty_body() {
    assert!(Snake::from_body(Vec::new(), Direction::Up).is_none());
  }
}
