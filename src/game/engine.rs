use super::constants::{SPAWN_DIRECTION, SPAWN_POINT};
use super::geometry::GridSize;
use super::input::parse_direction;
use super::snake::Snake;
use super::types::Player;
use super::world::GameWorld;
use crate::protocol::{GameStateMessage, ServerEvent};
use std::sync::Arc;
use tokio::sync::Mutex;


/// Where the engine sends what it produces. Implementations must not block:
/// they are called while the world lock is held.
pub trait Outbound: Send + Sync {
  fn broadcast_state(&self, state: &GameStateMessage);
  fn notify(&self, player_id: &str, event: &ServerEvent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
  Wall,
  OwnBody,
  OtherSnake,
}

impl CollisionKind {
  fn as_str(self) -> &'static str {
    match self {
      CollisionKind::Wall => "wall",
      CollisionKind::OwnBody => "own_body",
      CollisionKind::OtherSnake => "other_snake",
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
  pub collision: Option<CollisionKind>,
  pub ate_food: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
  InvalidDirection,
  NoLiveSnake,
  Applied(Resolution),
}

pub struct GameEngine {
  grid: GridSize,
  world: Mutex<GameWorld>,
  outbound: Arc<dyn Outbound>,
}

impl GameEngine {
  pub fn new(grid: GridSize, outbound: Arc<dyn Outbound>) -> Self {
    Self::with_world(GameWorld::new(grid), outbound)
  }

  pub fn with_world(world: GameWorld, outbound: Arc<dyn Outbound>) -> Self {
    Self {
      grid: world.grid(),
      world: Mutex::new(world),
      outbound,
    }
  }

  pub fn grid(&self) -> GridSize {
    self.grid
  }

  pub async fn join(&self, player_id: &str, name: String) -> Player {
    let snake = Snake::new(SPAWN_POINT, SPAWN_DIRECTION);
    let mut world = self.world.lock().await;
    world.add_snake(player_id, snake);
    tracing::info!(player_id, name = %name, "player joined");
    Player {
      id: player_id.to_string(),
      name,
    }
  }

  pub async fn leave(&self, player_id: &str) {
    let mut world = self.world.lock().await;
    if world.remove_snake(player_id).is_some() {
      tracing::info!(player_id, "player left");
    }
  }

  pub async fn snapshot(&self) -> GameStateMessage {
    let world = self.world.lock().await;
    GameStateMessage::from_world(&world)
  }

  /// Runs `f` on the current state while the world is still locked, so no
  /// broadcast can be interleaved with whatever `f` does with it.
  pub async fn with_snapshot<R>(&self, f: impl FnOnce(&GameStateMessage) -> R) -> R {
    let world = self.world.lock().await;
    f(&GameStateMessage::from_world(&world))
  }

  pub async fn player_count(&self) -> usize {
    self.world.lock().await.snake_count()
  }

  /// Turns the player's snake, steps it once, resolves the outcome and
  /// broadcasts the resulting state.
  pub async fn apply_move(&self, player_id: &str, direction: Option<&str>) -> MoveOutcome {
    let Some(parsed) = direction.filter(|value| !value.is_empty()).and_then(parse_direction) else {
      tracing::warn!(player_id, ?direction, "ignoring invalid direction");
      return MoveOutcome::InvalidDirection;
    };

    let mut world = self.world.lock().await;
    let Some(snake) = world.snake_mut(player_id) else { return MoveOutcome::NoLiveSnake };
    if !snake.is_alive() {
      return MoveOutcome::NoLiveSnake;
    }
    snake.set_direction(parsed);
    snake.advance();

    let resolution = self.resolve_collisions(&mut world, player_id);
    self.outbound.broadcast_state(&GameStateMessage::from_world(&world));
    MoveOutcome::Applied(resolution)
  }

  /// Wall, own-body and other-snake checks share one outcome; the first hit
  /// kills and evicts the snake, broadcasts, and tells its owner. The food
  /// check always runs afterwards against the head the snake ended on, even
  /// when it just died: the owner still gets `foodEaten` and the food moves.
  fn resolve_collisions(&self, world: &mut GameWorld, player_id: &str) -> Resolution {
    let Some(snake) = world.snake(player_id) else { return Resolution::default() };
    let head = snake.head();

    let collision = if !world.grid().contains(head) {
      Some(CollisionKind::Wall)
    } else if snake.head_hits_own_body() {
      Some(CollisionKind::OwnBody)
    } else if world
      .snakes()
      .any(|(other_id, other)| other_id != player_id && other.occupies(head))
    {
      Some(CollisionKind::OtherSnake)
    } else {
      None
    };

    let mut evicted: Option<Snake> = None;
    if let Some(kind) = collision {
      if let Some(mut snake) = world.remove_snake(player_id) {
        snake.kill();
        evicted = Some(snake);
      }
      tracing::warn!(player_id, cause = kind.as_str(), x = head.x, y = head.y, "snake died");
      self.outbound.broadcast_state(&GameStateMessage::from_world(world));
      self.outbound.notify(
        player_id,
        &ServerEvent::Collision {
          player_id: player_id.to_string(),
        },
      );
    }

    let ate_food = head == world.food().position();
    if ate_food {
      match evicted.as_mut() {
        Some(snake) => snake.grow(),
        None => {
          if let Some(snake) = world.snake_mut(player_id) {
            snake.grow();
          }
        }
      }
      world.respawn_food();
      tracing::info!(player_id, "snake ate food");
      self.outbound.notify(
        player_id,
        &ServerEvent::FoodEaten {
          player_id: player_id.to_string(),
        },
      );
    }

    Resolution { collision, ate_food }
  }
}
