use body_dynamics::AtmosphericState;
use body_dynamics::BodyKind;
use body_dynamics::CollisionSink;
use body_dynamics::DominantBody;
use body_dynamics::Environment;
use body_dynamics::RigidBody;
use cgmath::InnerSpace;
use cgmath::Vector3;
use log::info;
use log::warn;

const EARTH_MASS: f64 = 5.972e24;
const EARTH_RADIUS: f64 = 6.371e6;
const SEA_LEVEL_PRESSURE: f64 = 101_325.0;
const SEA_LEVEL_DENSITY: f64 = 1.225;
const SCALE_HEIGHT: f64 = 8_500.0;

/// A non-rotating frame around a planet with an exponential atmosphere.
struct Planet {
    mass: f64,
    radius: f64,
    ship_radius: f64,
}

impl Environment for Planet {
    fn frame_angular_velocity(&self) -> Vector3<f64> {
        Vector3::new(0.0, 0.0, 0.0)
    }

    fn dominant_body(&self) -> DominantBody {
        DominantBody {
            mass: self.mass,
            kind: BodyKind::AtmospherePlanet,
        }
    }

    fn atmospheric_state(&self, distance: f64) -> AtmosphericState {
        let altitude = (distance - self.radius).max(0.0);
        let falloff = (-altitude / SCALE_HEIGHT).exp();
        AtmosphericState {
            pressure: SEA_LEVEL_PRESSURE * falloff,
            density: SEA_LEVEL_DENSITY * falloff,
        }
    }

    fn bounding_radius(&self) -> f64 {
        self.ship_radius
    }
}

struct Hull {
    integrity: f64,
}

impl CollisionSink for Hull {
    type Other = str;

    fn on_damage(&mut self, other: &str, magnitude: f64) {
        self.integrity -= magnitude;
        warn!("hit {}: damage {:.1}, integrity {:.1}", other, magnitude, self.integrity);
    }
}

fn main() {
    env_logger::init();

    let planet = Planet {
        mass: EARTH_MASS,
        radius: EARTH_RADIUS,
        ship_radius: 20.0,
    };

    let mut space_craft = RigidBody::new();
    if let Err(err) = space_craft.set_mass(10000.0) {
        eprintln!("{}", err);
        return;
    }
    if let Err(err) = space_craft.set_mass_distribution_from_model(planet.ship_radius) {
        eprintln!("{}", err);
        return;
    }
    // A low, slightly sub-orbital pass that decays through the upper atmosphere.
    space_craft.set_position(Vector3::new(EARTH_RADIUS + 120_000.0, 0.0, 0.0));
    space_craft.set_velocity(Vector3::new(0.0, 7_600.0, 0.0));
    space_craft.set_angular_velocity(Vector3::new(0.0, 0.0, 0.001));
    space_craft.recompute_external_forces(&planet);

    let mut hull = Hull { integrity: 1.0e6 };
    let time_step: f32 = 1.0 / 60.0;
    let mut elapsed = 0.0_f64;

    while elapsed < 3.0 * 3600.0 {
        space_craft.add_rel_torque(Vector3::new(0.0, 0.0, -0.01));
        space_craft.step(time_step, &planet, &mut ());
        elapsed += f64::from(time_step);

        let altitude = space_craft.position().magnitude() - planet.radius;
        if altitude < 0.0 {
            let impact_speed = space_craft.velocity().magnitude();
            // back out of the ground before reporting the impact
            space_craft.undo_step(&mut ());
            space_craft.on_collision("surface", 0, impact_speed, &mut hull);
            println!("boom!");
            break;
        }

        if (elapsed as u64) % 600 == 0 && elapsed.fract() < f64::from(time_step) {
            let pose = space_craft.interpolated_pose(0.5);
            info!(
                "t={:.0}s altitude={:.0}m speed={:.1}m/s drag={:.3}N render={:?}",
                elapsed,
                altitude,
                space_craft.velocity().magnitude(),
                space_craft.atmospheric_force().magnitude(),
                pose.translation()
            );
        }
    }
}
