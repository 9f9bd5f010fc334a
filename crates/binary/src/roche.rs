//! Eggleton (1983) Roche-lobe approximation.

use stellar_core::bounds;
use stellar_core::units::solar_radii_to_au;
use stellar_relations as relations;
use stellar_star::Star;

/// Roche-lobe radius as a fraction of the separation for a donor of mass `donor_mass`
/// orbiting an accretor of mass `accretor_mass`.
///
/// `RL/a = 0.49 q^(2/3) / (0.6 q^(2/3) + ln(1 + q^(1/3)))`, with `q = donor / accretor`
/// clamped so the logarithm and cube root stay in domain.
pub fn roche_lobe_fraction(donor_mass: f64, accretor_mass: f64) -> f64 {
    let (lo, hi) = bounds::MASS_RATIO;
    let q = (donor_mass / accretor_mass).clamp(lo, hi);
    let q_two_thirds = q.powf(2.0 / 3.0);
    let q_one_third = q.cbrt();
    0.49 * q_two_thirds / (0.6 * q_two_thirds + (1.0 + q_one_third).ln())
}

/// Roche-lobe radius in AU.
pub fn roche_lobe_radius_au(donor_mass: f64, accretor_mass: f64, separation_au: f64) -> f64 {
    roche_lobe_fraction(donor_mass, accretor_mass) * separation_au
}

/// Physical radius of a star, converted from solar radii to AU.
pub fn physical_radius_au(star: &Star) -> f64 {
    solar_radii_to_au(relations::radius(star.mass()))
}

/// Whether `star` overflows its Roche lobe with respect to `companion`.
pub fn overfills(star: &Star, companion: &Star, separation_au: f64) -> bool {
    physical_radius_au(star) > roche_lobe_radius_au(star.mass(), companion.mass(), separation_au)
}
