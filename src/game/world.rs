use super::food::Food;
use super::geometry::GridSize;
use super::snake::Snake;
use std::collections::HashMap;

/// Grid, live snakes and the single food item.
///
/// Every change to the snake map or the food goes through these methods.
/// The world itself is not synchronized; the engine owns it behind a lock.
#[derive(Debug)]
pub struct GameWorld {
  grid: GridSize,
  snakes: HashMap<String, Snake>,
  food: Food,
}

impl GameWorld {
  pub fn new(grid: GridSize) -> Self {
    let food = Food::spawn(grid);
    tracing::info!(
      width = grid.width(),
      height = grid.height(),
      food_x = food.position().x,
      food_y = food.position().y,
      "world created"
    );
    Self {
      grid,
      snakes: HashMap::new(),
      food,
    }
  }

  #[cfg(test)]
  pub fn with_food(grid: GridSize, food: Food) -> Self {
    Self {
      grid,
      snakes: HashMap::new(),
      food,
    }
  }

  pub fn grid(&self) -> GridSize {
    self.grid
  }

  pub fn food(&self) -> &Food {
    &self.food
  }

  #[cfg(test)]
  pub fn set_food(&mut self, food: Food) {
    self.food = food;
  }

  pub fn snakes(&self) -> impl Iterator<Item = (&String, &Snake)> + '_ {
    self.snakes.iter()
  }

  pub fn snake(&self, player_id: &str) -> Option<&Snake> {
    self.snakes.get(player_id)
  }

  pub fn snake_mut(&mut self, player_id: &str) -> Option<&mut Snake> {
    self.snakes.get_mut(player_id)
  }

  pub fn snake_count(&self) -> usize {
    self.snakes.len()
  }

  pub fn add_snake(&mut self, player_id: &str, snake: Snake) {
    self.snakes.insert(player_id.to_string(), snake);
    tracing::debug!(player_id, "snake added");
  }

  pub fn remove_snake(&mut self, player_id: &str) -> Option<Snake> {
    let removed = self.snakes.remove(player_id);
    if removed.is_some() {
      tracing::debug!(player_id, "snake removed");
    }
    removed
  }

  pub fn respawn_food(&mut self) {
    self.food.respawn(self.grid);
  }
}
