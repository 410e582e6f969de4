use super::{Ecef, Geodetic, MEAN_RADIUS_M, Vec3, ecef_to_geodetic, geodetic_to_ecef};

/// Guard for the east-scaling division near the poles. The tangent-plane
/// model is documented unsupported above ~89.9 degrees latitude; the clamp
/// only keeps output finite there.
const MIN_COS_LAT: f64 = 1e-12;

/// Local tangent-plane frame anchored at a fixed base point.
///
/// Point transforms use the spherical model: east/north offsets scale
/// longitude/latitude deltas by `R*cos(lat0)` and `R` (R = mean Earth
/// radius); the vertical offset is the raw height delta. Axes are then
/// permuted into the scene convention: east -> X, up -> Y, north -> Z.
///
/// Direction transforms use the linear part only: the ENU rotation at the
/// base point plus the same axis permutation, re-normalized.
///
/// `to_global` is the exact algebraic inverse of `to_local`; accuracy of
/// the projection itself degrades smoothly away from the base point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LocalFrame {
    base: Geodetic,
    origin_ecef: Ecef,
    sin_lat: f64,
    cos_lat: f64,
    sin_lon: f64,
    cos_lon: f64,
}

impl LocalFrame {
    pub fn new(base: Geodetic) -> Self {
        debug_assert!(
            base.lat_rad.abs() < 89.9f64.to_radians(),
            "tangent-plane frame is unsupported near the poles"
        );
        Self {
            base,
            origin_ecef: geodetic_to_ecef(base),
            sin_lat: base.lat_rad.sin(),
            cos_lat: base.lat_rad.cos(),
            sin_lon: base.lon_rad.sin(),
            cos_lon: base.lon_rad.cos(),
        }
    }

    pub fn base(&self) -> Geodetic {
        self.base
    }

    pub fn origin_ecef(&self) -> Ecef {
        self.origin_ecef
    }

    fn east_scale(&self) -> f64 {
        MEAN_RADIUS_M * self.cos_lat.max(MIN_COS_LAT)
    }

    /// Geodetic point -> scene-frame offset from the base point (meters).
    pub fn to_local(&self, point: Geodetic) -> Vec3 {
        let east = (point.lon_rad - self.base.lon_rad) * self.east_scale();
        let north = (point.lat_rad - self.base.lat_rad) * MEAN_RADIUS_M;
        let up = point.alt_m - self.base.alt_m;
        Vec3::new(east, up, north)
    }

    /// Exact inverse of [`LocalFrame::to_local`].
    pub fn to_global(&self, local: Vec3) -> Geodetic {
        Geodetic::new(
            self.base.lat_rad + local.z / MEAN_RADIUS_M,
            self.base.lon_rad + local.x / self.east_scale(),
            self.base.alt_m + local.y,
        )
    }

    /// ECEF point -> scene-frame offset, via the geodetic inverse.
    pub fn ecef_to_local(&self, point: Ecef) -> Vec3 {
        self.to_local(ecef_to_geodetic(point))
    }

    /// Scene-frame offset -> ECEF point.
    pub fn local_to_ecef(&self, local: Vec3) -> Ecef {
        geodetic_to_ecef(self.to_global(local))
    }

    /// ECEF direction -> scene-frame direction (linear part only).
    ///
    /// Re-normalized so repeated per-frame round trips cannot accumulate
    /// drift. Degenerate input maps to the zero vector.
    pub fn direction_to_local(&self, dir: Vec3) -> Vec3 {
        let east = -self.sin_lon * dir.x + self.cos_lon * dir.y;
        let north = -self.sin_lat * self.cos_lon * dir.x - self.sin_lat * self.sin_lon * dir.y
            + self.cos_lat * dir.z;
        let up = self.cos_lat * self.cos_lon * dir.x
            + self.cos_lat * self.sin_lon * dir.y
            + self.sin_lat * dir.z;
        Vec3::new(east, up, north).normalized().unwrap_or(Vec3::ZERO)
    }

    /// Scene-frame direction -> ECEF direction (linear part only).
    pub fn direction_to_global(&self, dir: Vec3) -> Vec3 {
        let east = dir.x;
        let up = dir.y;
        let north = dir.z;
        let x = -self.sin_lon * east - self.sin_lat * self.cos_lon * north
            + self.cos_lat * self.cos_lon * up;
        let y = self.cos_lon * east - self.sin_lat * self.sin_lon * north
            + self.cos_lat * self.sin_lon * up;
        let z = self.cos_lat * north + self.sin_lat * up;
        Vec3::new(x, y, z).normalized().unwrap_or(Vec3::ZERO)
    }

    /// Straight-line distance from the base point to an ECEF point.
    pub fn distance_from_base(&self, point: Ecef) -> f64 {
        (point.as_vec3() - self.origin_ecef.as_vec3()).length()
    }
}
