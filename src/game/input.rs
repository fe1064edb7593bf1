use super::types::Direction;

pub fn parse_direction(value: &str) -> Option<Direction> {
    match value.to_uppercase().as_str() {
        "UP" => Some(Direction::Up),
        "DOWN" => Some(Direction::Down),
        "LEFT" => Some(Direction::Left),
        "RIGHT" => Some(Direction::Right),
        _ => None,
    }
}
