pub mod bubble;
pub mod camera;
pub mod config;
pub mod controller;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod logging;
pub mod menu;
pub mod messages;
pub mod render;
pub mod shape;
pub mod surface;
pub mod types;
