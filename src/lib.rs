//! Per-body rigid-body integrator for a real-time space simulation.
//!
//! A [`RigidBody`] accumulates forces and torques between ticks and is
//! advanced once per tick with [`RigidBody::step`], which folds in gravity,
//! atmospheric drag and the fictitious forces of a rotating frame supplied by
//! an [`Environment`].

pub mod config;
pub mod environment;
pub mod error;
pub mod forces;
pub mod persist;
pub mod rigid_body;
pub mod transform;

pub use config::DynamicsConfig;
pub use environment::AtmosphericState;
pub use environment::BodyKind;
pub use environment::CollisionSink;
pub use environment::DominantBody;
pub use environment::Environment;
pub use environment::FixedEnvironment;
pub use environment::TransformListener;
pub use error::DynamicsError;
pub use error::PersistError;
pub use persist::Reader;
pub use persist::StreamReader;
pub use persist::StreamWriter;
pub use persist::Writer;
pub use rigid_body::RigidBody;
pub use transform::Transform;
