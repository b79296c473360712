use crate::core::models::ids::ChargeId;
use nalgebra::{Point2, Vector2};

/// Net Coulomb force acting on one charge, derived from a snapshot of the store.
///
/// Never cached: a fresh list is produced on every call to
/// [`forces_on_all`](super::electrostatics::forces_on_all).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceResult {
    /// Id of the charge the force acts on.
    pub id: ChargeId,
    /// Position of that charge, copied at computation time.
    pub position: Point2<f64>,
    /// Net force vector in newtons.
    pub force: Vector2<f64>,
    /// Euclidean norm of `force`.
    pub magnitude: f64,
}

impl ForceResult {
    pub fn new(id: ChargeId, position: Point2<f64>, force: Vector2<f64>) -> Self {
        let magnitude = (force.x * force.x + force.y * force.y).sqrt();
        Self {
            id,
            position,
            force,
            magnitude,
        }
    }

    #[inline]
    pub fn fx(&self) -> f64 {
        self.force.x
    }

    #[inline]
    pub fn fy(&self) -> f64 {
        self.force.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_computes_euclidean_magnitude() {
        let result = ForceResult::new(ChargeId(1), Point2::origin(), Vector2::new(3.0, -4.0));
        assert_eq!(result.magnitude, 5.0);
        assert_eq!(result.fx(), 3.0);
        assert_eq!(result.fy(), -4.0);
    }
}
