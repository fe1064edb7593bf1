use super::geometry::{GridSize, Point};
use rand::Rng;

/// The single food item of a world.
///
/// Placement is uniform over the grid and does not look at snake bodies, so
/// food can land on an occupied cell.
#[derive(Debug, Clone)]
pub struct Food {
  position: Point,
}

impl Food {
  pub fn spawn(grid: GridSize) -> Self {
    Self::spawn_with(&mut rand::thread_rng(), grid)
  }

  pub fn spawn_with<R: Rng + ?Sized>(rng: &mut R, grid: GridSize) -> Self {
    Self {
      position: random_cell(rng, grid),
    }
  }

  #[cfg(test)]
  pub fn at(position: Point) -> Self {
    Self { position }
  }

  pub fn position(&self) -> Point {
    self.position
  }

  pub fn respawn(&mut self, grid: GridSize) {
    self.respawn_with(&mut rand::thread_rng(), grid);
  }

  pub fn respawn_with<R: Rng + ?Sized>(&mut self, rng: &mut R, grid: GridSize) {
    self.position = random_cell(rng, grid);
    tracing::debug!(x = self.position.x, y = self.position.y, "food respawned");
  }
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R, grid: GridSize) -> Point {
  Point {
    x: rng.gen_range(0..grid.width()),
    y: rng.gen_range(0..grid.height()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn respawn_stays_within_grid() {
    let grid = GridSize::new(7, 3);
    let mut rng = StdRng::seed_from_u64(42);
    let mut food = Food::spawn_with(&mut rng, grid);
    for _ in 0..500 {
      food.respawn_with(&mut rng, grid);
      assert!(grid.contains(food.position()));
    }
  }

  #[test]
  fn respawn_reaches_every_cell_of_small_grid() {
    let grid = GridSize::new(2, 2);
    let mut rng = StdRng::seed_from_u64(7);
    let mut food = Food::at(Point::new(0, 0));
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
      food.respawn_with(&mut rng, grid);
      seen.insert(food.position());
    }
    assert_eq!(seen.len(), 4);
  }

  #[test]
  fn single_cell_grid_always_places_food_at_origin() {
    let grid = GridSize::new(1, 1);
    let mut food = Food::spawn(grid);
    food.respawn(grid);
    assert_eq!(food.position(), Point::new(0, 0));
  }
}
