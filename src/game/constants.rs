use super::geometry::Point;
use super::types::Direction;

pub const SPAWN_POINT: Point = Point::new(5, 5);
pub const SPAWN_DIRECTION: Direction = Direction::Right;
pub const DEFAULT_GRID_WIDTH: i32 = 40;
pub const DEFAULT_GRID_HEIGHT: i32 = 40;
pub const DEFAULT_PORT: u16 = 8787;
