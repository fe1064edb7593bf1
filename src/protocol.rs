use crate::game::geometry::{GridSize, Point};
use crate::game::types::Direction;
use crate::game::world::GameWorld;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SnakeSnapshot {
  pub body: Vec<Point>,
  pub direction: Direction,
  #[serde(rename = "isAlive")]
  pub is_alive: bool,
}

/// Full world state as broadcast after every applied move.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GameStateMessage {
  pub snakes: HashMap<String, SnakeSnapshot>,
  #[serde(rename = "foodPosition")]
  pub food_position: Point,
}

impl GameStateMessage {
  pub fn from_world(world: &GameWorld) -> Self {
    let snakes = world
      .snakes()
      .map(|(player_id, snake)| {
        (
          player_id.clone(),
          SnakeSnapshot {
            body: snake.body().copied().collect(),
            direction: snake.direction(),
            is_alive: snake.is_alive(),
          },
        )
      })
      .collect();
    Self {
      snakes,
      food_position: world.food().position(),
    }
  }

  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string(self)
  }
}

/// Messages addressed to a single connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
  Collision { player_id: String },
  FoodEaten { player_id: String },
  Welcome { player_id: String, name: String, grid: GridSize },
}

impl ServerEvent {
  pub fn to_json(&self) -> serde_json::Result<String> {
    let value = match self {
      ServerEvent::Collision { player_id } => json!({
        "collision": true,
        "playerId": player_id,
      }),
      ServerEvent::FoodEaten { player_id } => json!({
        "foodEaten": true,
        "playerId": player_id,
      }),
      ServerEvent::Welcome { player_id, name, grid } => json!({
        "welcome": true,
        "playerId": player_id,
        "name": name,
        "gridWidth": grid.width(),
        "gridHeight": grid.height(),
      }),
    };
    serde_json::to_string(&value)
  }
}

/// Extracts the requested direction from an inbound text frame.
///
/// Returns `None` for frames that are not JSON objects or whose `direction`
/// field is missing or not a string. Direction names are validated later by
/// the engine.
pub fn decode_move_intent(text: &str) -> Option<String> {
  let value = match serde_json::from_str::<Value>(text) {
    Ok(value) => value,
    Err(error) => {
      tracing::warn!(%error, "failed to parse client message");
      return None;
    }
  };
  value
    .get("direction")
    .and_then(Value::as_str)
    .map(str::to_string)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::game::food::Food;
  use crate::game::snake::Snake;

  #[test]
  fn decode_move_intent_reads_direction_field() {
    assert_eq!(decode_move_intent(r#"{"direction":"up"}"#), Some("up".to_string()));
    assert_eq!(
      decode_move_intent(r#"{"direction":"LEFT","extra":1}"#),
      Some("LEFT".to_string())
    );
  }

  #[test]
  fn decode_move_intent_ignores_malformed_frames() {
    assert_eq!(decode_move_intent("not json"), None);
    assert_eq!(decode_move_intent(r#"{"method":"requestState"}"#), None);
    assert_eq!(decode_move_intent(r#"{"direction":5}"#), None);
    assert_eq!(decode_move_intent(r#"["UP"]"#), None);
    assert_eq!(decode_move_intent(r#"{"direction":null}"#), None);
  }

  #[test]
  fn state_message_uses_wire_field_names() {
    let mut world = GameWorld::with_food(GridSize::new(10, 10), Food::at(Point::new(1, 2)));
    world.add_snake("p1", Snake::new(Point::new(5, 5), Direction::Right));

    let json: Value = serde_json::from_str(&GameStateMessage::from_world(&world).to_json().unwrap()).unwrap();

    assert_eq!(json["foodPosition"], json!({"x": 1, "y": 2}));
    assert_eq!(
      json["snakes"]["p1"],
      json!({"body": [{"x": 5, "y": 5}], "direction": "RIGHT", "isAlive": true})
    );
  }

  #[test]
  fn targeted_events_serialize_to_flag_and_player_id() {
    let collision = ServerEvent::Collision {
      player_id: "abc".to_string(),
    };
    let food = ServerEvent::FoodEaten {
      player_id: "abc".to_string(),
    };
    let collision: Value = serde_json::from_str(&collision.to_json().unwrap()).unwrap();
    let food: Value = serde_json::from_str(&food.to_json().unwrap()).unwrap();
    assert_eq!(collision, json!({"collision": true, "playerId": "abc"}));
    assert_eq!(food, json!({"foodEaten": true, "playerId": "abc"}));
  }

  #[test]
  fn welcome_event_carries_grid_dimensions() {
    let welcome = ServerEvent::Welcome {
      player_id: "p".to_string(),
      name: "Player p".to_string(),
      grid: GridSize::new(40, 30),
    };
    let value: Value = serde_json::from_str(&welcome.to_json().unwrap()).unwrap();
    assert_eq!(value["gridWidth"], 40);
    assert_eq!(value["gridHeight"], 30);
    assert_eq!(value["playerId"], "p");
  }
}
