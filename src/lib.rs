//! 2D arena physics engine for a tank-drive lunar rover.
//!
//! This crate is the deterministic world model shared by the
//! interactive visualizer and the reinforcement-learning training
//! stack. An external driver feeds torque inputs through
//! [`PhysicsWorld::apply_control`], advances time with
//! [`PhysicsWorld::step`] at a fixed rate, and reads back rover pose,
//! zone classification, obstacles and collision state. Rendering,
//! keyboard handling and the RL bridge live in separate components on
//! top of this API.
//!
//! All distances are meters, headings are degrees (counter-clockwise
//! positive, folded into `(-180, 180]` at query time). Logging goes
//! through the `log` facade; install any logger implementation to see
//! world events.

pub mod domain;
mod world;

pub use world::{PhysicsWorld, StepOutcome, WorldConfig, WorldError};
