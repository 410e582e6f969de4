//! Low-cost solar position approximation.
//!
//! Subsolar-point model: Julian day -> mean longitude/anomaly -> ecliptic
//! longitude -> right ascension/declination -> GMST -> subsolar lat/lon ->
//! unit direction in ECEF. Good to a fraction of a degree, which is far
//! below what scene lighting can show.

use super::{Geodetic, Vec3};
use crate::time::Time;

/// Julian day of the Unix epoch (1970-01-01T00:00:00Z).
const JD_UNIX_EPOCH: f64 = 2_440_587.5;
/// Julian day of J2000.
const JD_J2000: f64 = 2_451_545.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

fn wrap_360(mut d: f64) -> f64 {
    d %= 360.0;
    if d < 0.0 {
        d += 360.0;
    }
    d
}

fn wrap_180(mut d: f64) -> f64 {
    d = wrap_360(d);
    if d > 180.0 {
        d -= 360.0;
    }
    d
}

/// Greenwich Mean Sidereal Time in degrees for a Julian day.
fn gmst_deg(jd: f64) -> f64 {
    let t = (jd - JD_J2000) / 36_525.0;
    wrap_360(
        280.460_618_37 + 360.985_647_366_29 * (jd - JD_J2000) + 0.000_387_933 * t * t
            - (t * t * t) / 38_710_000.0,
    )
}

/// Subsolar point (the geodetic point where the sun is at zenith) for a
/// simulated time in Unix epoch seconds. `None` for non-finite time.
pub fn subsolar_point(time: Time) -> Option<Geodetic> {
    let unix_s = time.seconds();
    if !unix_s.is_finite() {
        return None;
    }

    let jd = JD_UNIX_EPOCH + unix_s / SECONDS_PER_DAY;
    let n = jd - JD_J2000;

    // Mean longitude and anomaly (degrees).
    let l = wrap_360(280.46 + 0.985_647_4 * n);
    let g = wrap_360(357.528 + 0.985_600_3 * n);

    // Ecliptic longitude (degrees).
    let lambda =
        wrap_360(l + 1.915 * g.to_radians().sin() + 0.020 * (2.0 * g).to_radians().sin());
    // Obliquity of the ecliptic (degrees).
    let epsilon = 23.439 - 0.000_000_4 * n;

    // Right ascension and declination.
    let lambda_rad = lambda.to_radians();
    let eps_rad = epsilon.to_radians();
    let alpha = (eps_rad.cos() * lambda_rad.sin())
        .atan2(lambda_rad.cos())
        .to_degrees();
    let delta = (eps_rad.sin() * lambda_rad.sin()).asin().to_degrees();

    let subsolar_lon = wrap_180(alpha - gmst_deg(jd));
    let subsolar_lat = delta;

    Some(Geodetic::from_degrees(subsolar_lat, subsolar_lon, 0.0))
}

/// Unit direction from the Earth center toward the sun, in ECEF.
pub fn sun_direction_ecef(time: Time) -> Option<Vec3> {
    let sub = subsolar_point(time)?;
    let cos_lat = sub.lat_rad.cos();
    Vec3::new(
        cos_lat * sub.lon_rad.cos(),
        cos_lat * sub.lon_rad.sin(),
        sub.lat_rad.sin(),
    )
    .normalized()
}

/// Sun position in ECEF at a fixed distance (meters).
pub fn sun_position_ecef(time: Time, distance_m: f64) -> Option<Vec3> {
    Some(sun_direction_ecef(time)? * distance_m)
}
