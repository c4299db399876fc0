//! Collaborators a [`RigidBody`](crate::RigidBody) consults while it steps.
//!
//! The frame hierarchy, the atmosphere model, the damage handler and the
//! collision-mesh cache all live outside this crate. They are reached through
//! the traits here and passed in explicitly on every call that needs them.

use cgmath::Vector3;

use crate::transform::Transform;

/// What the dominant body of a frame is, as far as forces are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// A structure such as a space station. Exerts no gravity.
    NonGravitating,
    /// A planet with an atmosphere. Exerts gravity and drag.
    AtmospherePlanet,
    /// Anything else with mass: airless planets, stars.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DominantBody {
    pub mass: f64,
    pub kind: BodyKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AtmosphericState {
    pub pressure: f64,
    pub density: f64,
}

/// Read-only view of the frame a body currently moves in.
pub trait Environment {
    /// Angular velocity of the body's frame relative to inertial space.
    fn frame_angular_velocity(&self) -> Vector3<f64>;

    /// The body the frame is attached to, sole source of gravity and atmosphere.
    fn dominant_body(&self) -> DominantBody;

    /// Atmospheric pressure and density at `distance` from the dominant body's centre.
    fn atmospheric_state(&self, distance: f64) -> AtmosphericState;

    /// Bounding radius of the stepped body's model.
    fn bounding_radius(&self) -> f64;
}

/// Receives damage reports from [`RigidBody::on_collision`](crate::RigidBody::on_collision).
pub trait CollisionSink {
    type Other: ?Sized;

    fn on_damage(&mut self, other: &Self::Other, magnitude: f64);
}

/// Told whenever a body's transform is committed, e.g. a collision-mesh cache
/// that keeps the last position for swept tests.
pub trait TransformListener {
    fn transform_changed(&mut self, orientation: &Transform);
}

impl TransformListener for () {
    fn transform_changed(&mut self, _orientation: &Transform) {}
}

/// An environment whose answers do not depend on where the body is: constant
/// frame rotation, one dominant body, uniform atmosphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedEnvironment {
    pub frame_angular_velocity: Vector3<f64>,
    pub dominant_body: DominantBody,
    pub atmosphere: AtmosphericState,
    pub bounding_radius: f64,
}

impl FixedEnvironment {
    /// Non-rotating frame around a massless, airless structure.
    pub fn empty_space() -> FixedEnvironment {
        FixedEnvironment {
            frame_angular_velocity: Vector3::new(0.0, 0.0, 0.0),
            dominant_body: DominantBody {
                mass: 0.0,
                kind: BodyKind::NonGravitating,
            },
            atmosphere: AtmosphericState::default(),
            bounding_radius: 1.0,
        }
    }

    pub fn with_dominant_body(mut self, mass: f64, kind: BodyKind) -> Self {
        self.dominant_body = DominantBody { mass, kind };
        self
    }

    pub fn with_frame_angular_velocity(mut self, omega: Vector3<f64>) -> Self {
        self.frame_angular_velocity = omega;
        self
    }

    pub fn with_atmosphere(mut self, pressure: f64, density: f64) -> Self {
        self.atmosphere = AtmosphericState { pressure, density };
        self
    }

    pub fn with_bounding_radius(mut self, radius: f64) -> Self {
        self.bounding_radius = radius;
        self
    }
}

impl Default for FixedEnvironment {
    fn default() -> Self {
        FixedEnvironment::empty_space()
    }
}

impl Environment for FixedEnvironment {
    fn frame_angular_velocity(&self) -> Vector3<f64> {
        self.frame_angular_velocity
    }

    fn dominant_body(&self) -> DominantBody {
        self.dominant_body
    }

    fn atmospheric_state(&self, _distance: f64) -> AtmosphericState {
        self.atmosphere
    }

    fn bounding_radius(&self) -> f64 {
        self.bounding_radius
    }
}
