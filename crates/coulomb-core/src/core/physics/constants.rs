/// Coulomb constant `k = 1 / (4π ε₀)` in N·m²/C².
pub const COULOMB_CONSTANT: f64 = 8.9875517923e9;

/// Coulombs per nanocoulomb. Charges are stored in nC.
pub const NANOCOULOMB: f64 = 1e-9;
