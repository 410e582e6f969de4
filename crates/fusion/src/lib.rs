//! Camera/coordinate/lighting synchronization between a whole-Earth globe
//! renderer and a local 3D scene engine.
//!
//! The globe renderer is consumed through the [`GlobeEngine`] trait; the
//! local side is the concrete [`scene::SceneEngine`]. The
//! [`FusionEngine`] runs one synchronous cycle per frame: globe render,
//! control-mode check, camera mirror, lighting sync, pick routing, local
//! render.

pub mod config;
pub mod engine;
pub mod error;
pub mod lighting;
pub mod mirror;
pub mod mode;
pub mod orbit;
pub mod orchestrator;
pub mod picking;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use lighting::SunState;
pub use mode::{ControlMode, EffectiveMode};
pub use orbit::OrbitController;
pub use orchestrator::FusionEngine;
pub use picking::PickCallback;
