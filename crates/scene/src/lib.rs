pub mod camera;
pub mod components;
pub mod engine;
pub mod entity;
pub mod light;
pub mod picking;
pub mod render;
pub mod shadow;
pub mod world;

pub use camera::*;
pub use engine::*;
pub use world::*;
