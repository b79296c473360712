use super::constants::COULOMB_CONSTANT;
use nalgebra::Vector2;

// Point-charge kernels. Charges are in coulombs here; a zero distance contributes
// nothing instead of diverging.

#[inline]
fn distance(displacement: &Vector2<f64>) -> f64 {
    (displacement.x * displacement.x + displacement.y * displacement.y).sqrt()
}

/// Potential `k·q / r` of a point charge at distance `dist`.
#[inline]
pub fn coulomb_potential(dist: f64, q: f64) -> f64 {
    if dist == 0.0 {
        return 0.0;
    }
    COULOMB_CONSTANT * q / dist
}

/// Field of a point charge `q` at the end of `displacement` (field point minus source).
#[inline]
pub fn coulomb_field(displacement: &Vector2<f64>, q: f64) -> Vector2<f64> {
    let r = distance(displacement);
    if r == 0.0 {
        return Vector2::zeros();
    }
    let e = COULOMB_CONSTANT * q / (r * r);
    Vector2::new(e * (displacement.x / r), e * (displacement.y / r))
}

/// Force on `q_target` exerted by `q_source`, with `displacement` pointing from the
/// source to the target. Like signs push the target further along `displacement`.
#[inline]
pub fn coulomb_force(displacement: &Vector2<f64>, q_target: f64, q_source: f64) -> Vector2<f64> {
    let r = distance(displacement);
    if r == 0.0 {
        return Vector2::zeros();
    }
    let f = COULOMB_CONSTANT * q_target * q_source / (r * r);
    Vector2::new(f * (displacement.x / r), f * (displacement.y / r))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn potential_of_unit_charge_at_unit_distance_is_coulomb_constant() {
        assert!(f64_approx_equal(coulomb_potential(1.0, 1.0), COULOMB_CONSTANT));
    }

    #[test]
    fn potential_falls_off_as_inverse_distance() {
        let near = coulomb_potential(2.0, 1e-9);
        let far = coulomb_potential(4.0, 1e-9);
        assert!(f64_approx_equal(near, 2.0 * far));
    }

    #[test]
    fn potential_at_zero_distance_is_skipped() {
        assert_eq!(coulomb_potential(0.0, 5e-9), 0.0);
    }

    #[test]
    fn field_points_away_from_positive_charge() {
        let field = coulomb_field(&Vector2::new(2.0, 0.0), 1e-9);
        assert!(field.x > 0.0);
        assert_eq!(field.y, 0.0);
        assert!(f64_approx_equal(field.x, COULOMB_CONSTANT * 1e-9 / 4.0));
    }

    #[test]
    fn field_points_toward_negative_charge() {
        let field = coulomb_field(&Vector2::new(0.0, 3.0), -1e-9);
        assert!(field.y < 0.0);
        assert_eq!(field.x, 0.0);
    }

    #[test]
    fn field_at_zero_displacement_is_zero() {
        assert_eq!(coulomb_field(&Vector2::zeros(), 1.0), Vector2::zeros());
    }

    #[test]
    fn force_between_like_charges_is_repulsive() {
        let force = coulomb_force(&Vector2::new(-1.0, 0.0), 1.0, 1.0);
        assert!(f64_approx_equal(force.x, -COULOMB_CONSTANT));
    }

    #[test]
    fn force_between_opposite_charges_is_attractive() {
        let force = coulomb_force(&Vector2::new(-2.0, 0.0), 1.0, -1.0);
        assert!(f64_approx_equal(force.x, COULOMB_CONSTANT / 4.0));
    }

    #[test]
    fn force_at_zero_displacement_is_zero() {
        assert_eq!(coulomb_force(&Vector2::zeros(), 1.0, 1.0), Vector2::zeros());
    }

    #[test]
    fn force_on_target_equals_target_charge_times_field() {
        let d = Vector2::new(3.0, 4.0);
        let force = coulomb_force(&d, 2e-9, -5e-9);
        let field = coulomb_field(&d, -5e-9) * 2e-9;
        assert!(f64_approx_equal(force.x, field.x));
        assert!(f64_approx_equal(force.y, field.y));
    }
}
