use super::force::ForceResult;
use super::potentials;
use crate::core::models::charge::Charge;
use nalgebra::{Point2, Vector2};
use tracing::instrument;

/// Electric potential (V) at `point`, summed over all charges.
///
/// A charge located exactly at `point` contributes nothing.
pub fn potential_at(point: &Point2<f64>, charges: &[Charge]) -> f64 {
    charges
        .iter()
        .map(|c| {
            let dist = (*point - c.position).norm();
            potentials::coulomb_potential(dist, c.charge_coulombs())
        })
        .sum()
}

/// Electric field `(Ex, Ey)` in V/m at `point`, summed over all charges.
///
/// A charge located exactly at `point` contributes nothing.
pub fn field_at(point: &Point2<f64>, charges: &[Charge]) -> Vector2<f64> {
    charges.iter().fold(Vector2::zeros(), |acc, c| {
        acc + potentials::coulomb_field(&(*point - c.position), c.charge_coulombs())
    })
}

/// Net Coulomb force on every charge, in input order.
///
/// Self-interaction is excluded by id, so the result does not depend on the order of
/// `charges`. Coincident charges with distinct ids exert no force on each other. Like
/// charges repel and opposite charges attract.
#[instrument(level = "trace", skip_all, fields(charges = charges.len()))]
pub fn forces_on_all(charges: &[Charge]) -> Vec<ForceResult> {
    charges
        .iter()
        .map(|target| {
            let q_target = target.charge_coulombs();
            let net = charges
                .iter()
                .filter(|source| source.id != target.id)
                .fold(Vector2::zeros(), |acc, source| {
                    let displacement = target.position - source.position;
                    acc + potentials::coulomb_force(
                        &displacement,
                        q_target,
                        source.charge_coulombs(),
                    )
                });
            ForceResult::new(target.id, target.position, net)
        })
        .collect()
}
