pub mod constants;
pub mod engine;
pub mod food;
pub mod geometry;
pub mod input;
pub mod snake;
pub mod types;
pub mod world;
