use cgmath::InnerSpace;
use cgmath::Vector3;
use cgmath::Zero;
use log::debug;
use log::trace;
use log::warn;

use crate::config::DynamicsConfig;
use crate::environment::BodyKind;
use crate::environment::CollisionSink;
use crate::environment::Environment;
use crate::environment::TransformListener;
use crate::error::DynamicsError;
use crate::error::PersistError;
use crate::forces;
use crate::persist::Reader;
use crate::persist::Writer;
use crate::transform::Transform;

/// Kinematic and dynamic state of one movable body.
///
/// Forces and torques are accumulated between ticks with the `set_*`/`add_*`
/// calls and consumed by [`RigidBody::step`], which clears them again.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    // Pose
    orientation: Transform,
    previous_orientation: Transform,
    previous_angular_displacement: Vector3<f64>,

    // Accumulators, cleared every step
    force: Vector3<f64>,
    torque: Vector3<f64>,

    // Linear
    velocity: Vector3<f64>,
    mass: f64,

    // Angular, relative to inertial space
    angular_velocity: Vector3<f64>,
    mass_radius: f64,
    angular_inertia: f64,

    enabled: bool,

    // Cached at the end of each step for the next one
    external_force: Vector3<f64>,
    gravity_force: Vector3<f64>,
    atmospheric_force: Vector3<f64>,

    config: DynamicsConfig,
}

impl Default for RigidBody {
    fn default() -> Self {
        RigidBody::new()
    }
}

impl RigidBody {
    /// Unit mass and inertia at the frame origin, at rest and enabled.
    pub fn new() -> RigidBody {
        RigidBody {
            orientation: Transform::identity(),
            previous_orientation: Transform::identity(),
            previous_angular_displacement: Vector3::zero(),
            force: Vector3::zero(),
            torque: Vector3::zero(),
            velocity: Vector3::zero(),
            mass: 1.0,
            angular_velocity: Vector3::zero(),
            mass_radius: 1.0,
            angular_inertia: 1.0,
            enabled: true,
            external_force: Vector3::zero(),
            gravity_force: Vector3::zero(),
            atmospheric_force: Vector3::zero(),
            config: DynamicsConfig::default(),
        }
    }

    pub fn with_config(config: DynamicsConfig) -> Result<RigidBody, DynamicsError> {
        config.validate()?;
        Ok(RigidBody {
            config,
            ..RigidBody::new()
        })
    }

    pub fn config(&self) -> &DynamicsConfig {
        &self.config
    }

    pub fn set_force(&mut self, f: Vector3<f64>) {
        self.force = f;
    }

    pub fn set_torque(&mut self, t: Vector3<f64>) {
        self.torque = t;
    }

    pub fn add_force(&mut self, f: Vector3<f64>) {
        self.force += f;
    }

    pub fn add_torque(&mut self, t: Vector3<f64>) {
        self.torque += t;
    }

    /// Adds a force given in body space.
    pub fn add_rel_force(&mut self, f: Vector3<f64>) {
        self.force += self.orientation.apply_rotation_only(f);
    }

    /// Adds a torque given in body space.
    pub fn add_rel_torque(&mut self, t: Vector3<f64>) {
        self.torque += self.orientation.apply_rotation_only(t);
    }

    pub fn force(&self) -> Vector3<f64> {
        self.force
    }

    pub fn torque(&self) -> Vector3<f64> {
        self.torque
    }

    /// Recomputes the forces the environment will apply at the start of the
    /// next step: gravity, smoothed atmospheric drag, and the centrifugal and
    /// Coriolis terms of a rotating frame.
    pub fn recompute_external_forces<E>(&mut self, env: &E)
    where
        E: Environment + ?Sized,
    {
        let dominant = env.dominant_body();
        let position = self.position();

        self.external_force = match dominant.kind {
            BodyKind::NonGravitating => Vector3::zero(),
            BodyKind::AtmospherePlanet | BodyKind::Other => forces::gravity(
                position,
                self.mass,
                dominant.mass,
                self.config.gravitational_constant,
            ),
        };
        self.gravity_force = self.external_force;

        let speed = self.velocity.magnitude();
        if speed > 0.0 && dominant.kind == BodyKind::AtmospherePlanet {
            let atmosphere = env.atmospheric_state(position.magnitude());
            // Bounding radius stands in for the reference area.
            let area = env.bounding_radius();
            let drag = forces::quadratic_drag(
                self.velocity,
                atmosphere.density,
                area,
                self.config.drag_coefficient,
            );
            self.atmospheric_force =
                forces::low_pass(self.atmospheric_force, drag, self.config.drag_smoothing);
            self.external_force += self.atmospheric_force;
        }

        let omega = env.frame_angular_velocity();
        if omega.magnitude2() > 0.0 {
            self.external_force -= forces::centrifugal(self.mass, omega, position);
            self.external_force -= forces::coriolis(self.mass, omega, self.velocity);
        }
    }

    pub fn external_force(&self) -> Vector3<f64> {
        self.external_force
    }

    pub fn gravity_force(&self) -> Vector3<f64> {
        self.gravity_force
    }

    /// The low-pass filtered drag, not the instantaneous value.
    pub fn atmospheric_force(&self) -> Vector3<f64> {
        self.atmospheric_force
    }

    /// Advances the body by `time_step` seconds with semi-implicit Euler.
    ///
    /// A disabled body only moves its interpolation snapshot forward.
    pub fn step<E, L>(&mut self, time_step: f32, env: &E, listener: &mut L)
    where
        E: Environment + ?Sized,
        L: TransformListener + ?Sized,
    {
        if !self.enabled {
            self.previous_orientation = self.orientation;
            self.previous_angular_displacement = Vector3::zero();
            return;
        }

        let dt = f64::from(time_step);
        self.force += self.external_force;

        self.previous_orientation = self.orientation;
        self.velocity += dt * self.force * (1.0 / self.mass);
        self.angular_velocity += dt * self.torque * (1.0 / self.angular_inertia);

        // The frame may itself rotate; only spin relative to it turns the pose.
        let considered_angular_velocity = self.angular_velocity - env.frame_angular_velocity();

        let mut position = self.position();
        let rate = considered_angular_velocity.magnitude();
        if rate != 0.0 {
            let axis = considered_angular_velocity * (1.0 / rate);
            self.orientation.pre_rotate(axis, rate * dt);
        }
        self.previous_angular_displacement = considered_angular_velocity * dt;

        position += self.velocity * dt;
        self.orientation.set_translation(position);
        listener.transform_changed(&self.orientation);

        trace!(
            "step dt={} vel={:?} force={:?} external={:?}",
            dt,
            self.velocity,
            self.force,
            self.external_force
        );

        self.force = Vector3::zero();
        self.torque = Vector3::zero();
        self.recompute_external_forces(env);
    }

    /// Pose for rendering at fraction `alpha` of the way through the last step.
    ///
    /// Translation is lerped; rotation applies `alpha` of the last step's
    /// angular displacement to the previous pose, so the basis stays rigid.
    pub fn interpolated_pose(&self, alpha: f64) -> Transform {
        let position = alpha * self.orientation.translation()
            + (1.0 - alpha) * self.previous_orientation.translation();

        let mut pose = self.previous_orientation;
        let angle = self.previous_angular_displacement.magnitude() * alpha;
        if angle != 0.0 {
            pose.pre_rotate(self.previous_angular_displacement.normalize(), angle);
        }
        pose.set_translation(position);
        pose
    }

    /// Reverts the pose to where it was before the last step.
    ///
    /// Velocities are left alone.
    pub fn undo_step<L>(&mut self, listener: &mut L)
    where
        L: TransformListener + ?Sized,
    {
        self.orientation = self.previous_orientation;
        debug!("undo step, back at {:?}", self.orientation.translation());
        listener.transform_changed(&self.orientation);
    }

    /// Sets the mass and refreshes the angular inertia. Non-positive or
    /// non-finite masses are rejected and leave the body unchanged.
    pub fn set_mass(&mut self, mass: f64) -> Result<(), DynamicsError> {
        if !mass.is_finite() || mass <= 0.0 {
            warn!("rejected mass {}", mass);
            return Err(DynamicsError::InvalidMass(mass));
        }
        self.mass = mass;
        // solid sphere
        self.angular_inertia = (2.0 / 5.0) * self.mass * self.mass_radius * self.mass_radius;
        Ok(())
    }

    /// Spreads the mass over half of the model's bounding sphere.
    pub fn set_mass_distribution_from_model(
        &mut self,
        bounding_radius: f64,
    ) -> Result<(), DynamicsError> {
        let mass_radius = bounding_radius * 0.5;
        if !mass_radius.is_finite() || mass_radius <= 0.0 {
            warn!("rejected bounding radius {}", bounding_radius);
            return Err(DynamicsError::InvalidMassRadius(mass_radius));
        }
        self.mass_radius = mass_radius;
        self.set_mass(self.mass)
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn mass_radius(&self) -> f64 {
        self.mass_radius
    }

    pub fn angular_inertia(&self) -> f64 {
        self.angular_inertia
    }

    pub fn position(&self) -> Vector3<f64> {
        self.orientation.translation()
    }

    pub fn set_position(&mut self, position: Vector3<f64>) {
        self.orientation.set_translation(position);
    }

    /// Replaces the rotation while keeping the current position. The old pose
    /// becomes the interpolation start so rendering does not jump.
    pub fn set_rotation_matrix(&mut self, rotation: Transform) {
        let position = self.position();
        self.previous_orientation = self.orientation;
        self.orientation = rotation;
        self.previous_angular_displacement = Vector3::zero();
        self.set_position(position);
    }

    /// The orientation with its translation zeroed.
    pub fn rotation_matrix(&self) -> Transform {
        self.orientation.rotation_only()
    }

    pub fn orientation(&self) -> &Transform {
        &self.orientation
    }

    pub fn previous_orientation(&self) -> &Transform {
        &self.previous_orientation
    }

    pub fn previous_angular_displacement(&self) -> Vector3<f64> {
        self.previous_angular_displacement
    }

    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    pub fn set_velocity(&mut self, v: Vector3<f64>) {
        self.velocity = v;
    }

    pub fn angular_velocity(&self) -> Vector3<f64> {
        self.angular_velocity
    }

    pub fn set_angular_velocity(&mut self, w: Vector3<f64>) {
        self.angular_velocity = w;
    }

    pub fn angular_momentum(&self) -> Vector3<f64> {
        self.angular_inertia * self.angular_velocity
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Reports impact damage proportional to `m * v^2` to `sink`. `flags`
    /// come from the collision system and do not affect the result.
    ///
    /// Always returns `true`: the impact is considered handled.
    pub fn on_collision<S>(
        &self,
        other: &S::Other,
        _flags: u32,
        relative_velocity: f64,
        sink: &mut S,
    ) -> bool
    where
        S: CollisionSink + ?Sized,
    {
        let kinetic_energy = self.config.kinetic_energy_multiplier
            * self.mass
            * relative_velocity
            * relative_velocity;
        if kinetic_energy != 0.0 {
            debug!(
                "collision at {} m/s, damage {}",
                relative_velocity, kinetic_energy
            );
            sink.on_damage(other, kinetic_energy);
        }
        true
    }

    /// Writes the persistent state. Cached forces and the interpolation
    /// snapshot are not saved.
    pub fn save<W>(&self, wr: &mut W) -> Result<(), PersistError>
    where
        W: Writer + ?Sized,
    {
        for element in self.orientation.to_array() {
            wr.write_f64(element)?;
        }
        wr.write_vector3(self.force)?;
        wr.write_vector3(self.torque)?;
        wr.write_vector3(self.velocity)?;
        wr.write_vector3(self.angular_velocity)?;
        wr.write_f64(self.mass)?;
        wr.write_f64(self.mass_radius)?;
        wr.write_f64(self.angular_inertia)?;
        wr.write_bool(self.enabled)
    }

    /// Reads a body written by [`RigidBody::save`] using the default config.
    ///
    /// Call [`RigidBody::post_load_fixup`] before the first step.
    pub fn load<R>(rd: &mut R) -> Result<RigidBody, PersistError>
    where
        R: Reader + ?Sized,
    {
        RigidBody::load_with_config(rd, DynamicsConfig::default())
    }

    pub fn load_with_config<R>(
        rd: &mut R,
        config: DynamicsConfig,
    ) -> Result<RigidBody, PersistError>
    where
        R: Reader + ?Sized,
    {
        let mut elements = [0.0; 16];
        for element in elements.iter_mut() {
            *element = rd.read_f64("orientation")?;
        }
        let orientation = Transform::from_array(elements);

        let force = rd.read_vector3("force")?;
        let torque = rd.read_vector3("torque")?;
        let velocity = rd.read_vector3("velocity")?;
        let angular_velocity = rd.read_vector3("angular velocity")?;
        let mass = positive(rd.read_f64("mass")?, "mass")?;
        let mass_radius = positive(rd.read_f64("mass radius")?, "mass radius")?;
        let angular_inertia = positive(rd.read_f64("angular inertia")?, "angular inertia")?;
        let enabled = rd.read_bool("enabled")?;

        Ok(RigidBody {
            orientation,
            previous_orientation: orientation,
            force,
            torque,
            velocity,
            angular_velocity,
            mass,
            mass_radius,
            angular_inertia,
            enabled,
            config,
            ..RigidBody::new()
        })
    }

    /// Rebuilds the cached external forces after a load.
    pub fn post_load_fixup<E>(&mut self, env: &E)
    where
        E: Environment + ?Sized,
    {
        self.recompute_external_forces(env);
        debug!(
            "post-load fixup at {:?}, external force {:?}",
            self.position(),
            self.external_force
        );
    }
}

fn positive(value: f64, field: &'static str) -> Result<f64, PersistError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PersistError::InvalidMass { field, value })
    }
}
