use cgmath::InnerSpace;
use cgmath::Vector3;

pub const GRAVITATION_CONSTANT: f64 = 6.67430e-11;

/// Drag coefficient of a smooth sphere.
pub const DRAG_COEFFICIENT: f64 = 0.1;

/// Fraction of the gap to the instantaneous drag closed on each recompute.
pub const DRAG_SMOOTHING: f64 = 0.01;

/// Newtonian attraction on a body of mass `m1` at `position` towards a mass
/// `m2` sitting at the frame origin.
///
/// Returns zero for a body exactly at the origin.
pub fn gravity(position: Vector3<f64>, m1: f64, m2: f64, g: f64) -> Vector3<f64> {
    let r_squared = position.magnitude2();
    if r_squared == 0.0 {
        return Vector3::new(0.0, 0.0, 0.0);
    }
    let inv_r_squared = 1.0 / r_squared;
    let magnitude = g * (m1 * m2) * inv_r_squared;
    -position * inv_r_squared.sqrt() * magnitude
}

/// Quadratic drag opposing `velocity`: `-1/2 rho v^2 A Cd v_hat`.
pub fn quadratic_drag(
    velocity: Vector3<f64>,
    density: f64,
    area: f64,
    drag_coefficient: f64,
) -> Vector3<f64> {
    let speed = velocity.magnitude();
    if speed == 0.0 {
        return Vector3::new(0.0, 0.0, 0.0);
    }
    -0.5 * density * speed * speed * area * drag_coefficient * velocity.normalize()
}

/// One step of a first-order low-pass filter moving `current` towards `target`.
pub fn low_pass(current: Vector3<f64>, target: Vector3<f64>, smoothing: f64) -> Vector3<f64> {
    current + smoothing * (target - current)
}

/// Centrifugal term `m * w x (w x r)` seen in a frame rotating at `omega`.
/// Subtract it from the net force.
pub fn centrifugal(mass: f64, omega: Vector3<f64>, position: Vector3<f64>) -> Vector3<f64> {
    mass * omega.cross(omega.cross(position))
}

/// Coriolis term `2 m w x v`. Subtract it from the net force.
pub fn coriolis(mass: f64, omega: Vector3<f64>, velocity: Vector3<f64>) -> Vector3<f64> {
    2.0 * mass * omega.cross(velocity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn gravity_points_at_origin() {
        let f = gravity(Vector3::new(0.0, 2.0, 0.0), 3.0, 5.0, GRAVITATION_CONSTANT);
        assert_relative_eq!(f.y, -GRAVITATION_CONSTANT * 15.0 / 4.0, max_relative = 1e-12);
        assert_eq!(f.x, 0.0);
        assert_eq!(f.z, 0.0);
    }

    #[test]
    fn gravity_at_origin_is_zero() {
        let f = gravity(Vector3::new(0.0, 0.0, 0.0), 1.0, 1.0e24, GRAVITATION_CONSTANT);
        assert_eq!(f, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn drag_opposes_motion() {
        let f = quadratic_drag(Vector3::new(10.0, 0.0, 0.0), 1.2, 2.0, DRAG_COEFFICIENT);
        assert_relative_eq!(f.x, -0.5 * 1.2 * 100.0 * 2.0 * 0.1, max_relative = 1e-12);
        assert_eq!(f.y, 0.0);
    }

    #[test]
    fn drag_at_rest_is_zero() {
        let f = quadratic_drag(Vector3::new(0.0, 0.0, 0.0), 1.2, 2.0, DRAG_COEFFICIENT);
        assert_eq!(f, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn low_pass_closes_fraction_of_gap() {
        let target = Vector3::new(100.0, 0.0, -50.0);
        let once = low_pass(Vector3::new(0.0, 0.0, 0.0), target, DRAG_SMOOTHING);
        assert_relative_eq!(once, target * 0.01);
    }

    #[test]
    fn fictitious_forces() {
        let omega = Vector3::new(0.0, 0.0, 2.0);
        // w x (w x r) for r on the x axis points back at the axis
        let c = centrifugal(1.5, omega, Vector3::new(3.0, 0.0, 0.0));
        assert_relative_eq!(c, Vector3::new(-1.5 * 4.0 * 3.0, 0.0, 0.0));
        let k = coriolis(1.5, omega, Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(k, Vector3::new(0.0, 2.0 * 1.5 * 2.0, 0.0));
    }
}
