//! Great-circle separation on the unit sphere.
//!
//! [`vincenty_angular_separation`] works on precomputed latitude sines and
//! cosines; [`angular_separation_deg`] is the degree-in, degree-out wrapper
//! used for catalog positions given as (right ascension, declination).

use crate::constants::{DEG_TO_RAD, RAD_TO_DEG};

/// Vincenty's formula for the central angle between two points, in radians.
///
/// Well conditioned at every separation, including near 0 and near 180°
/// where the spherical law of cosines loses precision.
#[inline]
pub fn vincenty_angular_separation(
    sin_lat1: f64,
    cos_lat1: f64,
    sin_lat2: f64,
    cos_lat2: f64,
    delta_lon: f64,
) -> f64 {
    let (sin_delta_lon, cos_delta_lon) = libm::sincos(delta_lon);

    let num = libm::sqrt(
        (cos_lat2 * sin_delta_lon).powi(2)
            + (cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_delta_lon).powi(2),
    );
    let den = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_delta_lon;

    libm::atan2(num, den)
}

/// Angular distance between two (RA, Dec) positions.
///
/// # Arguments
/// * `ra1_deg`, `dec1_deg` - First point in degrees
/// * `ra2_deg`, `dec2_deg` - Second point in degrees
///
/// # Returns
/// Separation in degrees, in `[0, 180]`.
#[inline]
pub fn angular_separation_deg(ra1_deg: f64, dec1_deg: f64, ra2_deg: f64, dec2_deg: f64) -> f64 {
    let (d1_sin, d1_cos) = libm::sincos(dec1_deg * DEG_TO_RAD);
    let (d2_sin, d2_cos) = libm::sincos(dec2_deg * DEG_TO_RAD);
    let delta_lon = (ra2_deg - ra1_deg) * DEG_TO_RAD;

    vincenty_angular_separation(d1_sin, d1_cos, d2_sin, d2_cos, delta_lon) * RAD_TO_DEG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{HALF_PI, PI};

    #[test]
    fn test_same_point() {
        let dist = angular_separation_deg(123.4, -45.6, 123.4, -45.6);
        assert!(dist.abs() < 1e-10);
    }

    #[test]
    fn test_90_degrees_on_equator() {
        let dist = angular_separation_deg(0.0, 0.0, 90.0, 0.0);
        assert!((dist - 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_pole_to_equator() {
        let dist = angular_separation_deg(0.0, 90.0, 0.0, 0.0);
        assert!((dist - 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_antipodes() {
        let dist = angular_separation_deg(0.0, 0.0, 180.0, 0.0);
        assert!((dist - 180.0).abs() < 1e-10);
    }

    #[test]
    fn test_symmetric() {
        let ab = angular_separation_deg(10.0, 20.0, 250.0, -60.0);
        let ba = angular_separation_deg(250.0, -60.0, 10.0, 20.0);
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn test_ra_wraparound() {
        // 359° and 1° are two degrees apart on the equator
        let dist = angular_separation_deg(359.0, 0.0, 1.0, 0.0);
        assert!((dist - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_small_separation_precision() {
        // One arcsecond along the equator
        let one_arcsec = 1.0 / 3600.0;
        let dist = angular_separation_deg(0.0, 0.0, one_arcsec, 0.0);
        assert!((dist - one_arcsec).abs() < 1e-14);
    }

    #[test]
    fn test_vincenty_radians() {
        let sep = vincenty_angular_separation(0.0, 1.0, 1.0, 0.0, 0.0);
        assert!((sep - HALF_PI).abs() < 1e-15);

        let sep = vincenty_angular_separation(0.0, 1.0, 0.0, 1.0, PI);
        assert!((sep - PI).abs() < 1e-15);
    }
}
