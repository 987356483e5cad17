//! Simulation module
//!
//! Scene data and gameplay rules. Pure and deterministic:
//! - Integer positions and velocities only
//! - Stable iteration order (draw list and mover list order)
//! - No display, switch or buzzer access

pub mod collision;
pub mod layer;
pub mod shape;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{CollisionRule, LineHit, RULE_PRECEDENCE};
pub use layer::{Layer, LayerId, MoverId, MovingLayer, Roles, Scene, ShapeId, stock_scene};
pub use shape::{Region, Shape};
pub use state::{GamePhase, GameState, Player, Scoreboard};
pub use tick::{SimEvent, StepOutcome, StepTuning, resolve_step};
pub use world::World;
