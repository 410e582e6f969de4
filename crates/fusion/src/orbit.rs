use foundation::math::Vec3;

/// Minimum camera distance from the orbit target (meters).
const MIN_RADIUS_M: f64 = 1.0;

/// Maximum camera distance from the orbit target (meters).
const MAX_RADIUS_M: f64 = 1.0e7;

/// Pitch clamp (radians above the target's horizontal plane). The bounds
/// are exactly vertical so straight-up/straight-down poses survive
/// adoption unchanged; rotation cannot step past either pole.
const MIN_PITCH_RAD: f64 = -std::f64::consts::FRAC_PI_2;
const MAX_PITCH_RAD: f64 = std::f64::consts::FRAC_PI_2;

/// Default orbit distance when the adopted view ray never meets the ground.
const DEFAULT_RADIUS_M: f64 = 100.0;

const DEFAULT_FOV_Y_RAD: f64 = std::f64::consts::FRAC_PI_3;

/// Orbit-style camera controller for the local scene (scene frame, +Y up).
///
/// Built lazily on first entry to local control. Yaw/pitch/radius around a
/// ground target, clamped on every write.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitController {
    target: Vec3,
    yaw_rad: f64,
    pitch_rad: f64,
    radius_m: f64,
    fov_y_rad: f64,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw_rad: 0.0,
            pitch_rad: std::f64::consts::FRAC_PI_4,
            radius_m: DEFAULT_RADIUS_M,
            fov_y_rad: DEFAULT_FOV_Y_RAD,
        }
    }
}

impl OrbitController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts an existing camera pose (scene frame) so a mode switch keeps
    /// the viewpoint fixed.
    ///
    /// The orbit target is the view ray's ground-plane intersection when
    /// the ray descends, otherwise a point at the default distance along
    /// the ray.
    pub fn from_pose(position: Vec3, direction: Vec3, fov_y_rad: f64) -> Self {
        let mut ctl = Self {
            fov_y_rad,
            ..Self::default()
        };
        ctl.set_from_pose(position, direction);
        ctl
    }

    pub fn set_from_pose(&mut self, position: Vec3, direction: Vec3) {
        let dir = direction.normalized().unwrap_or(Vec3::new(0.0, -1.0, 0.0));
        let t = if dir.y < -1e-9 {
            (-position.y / dir.y).clamp(MIN_RADIUS_M, MAX_RADIUS_M)
        } else {
            DEFAULT_RADIUS_M
        };
        let target = position + dir * t;

        let offset = position - target;
        let radius = offset.length().clamp(MIN_RADIUS_M, MAX_RADIUS_M);
        let pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
        self.target = target;
        self.radius_m = radius;
        self.pitch_rad = pitch.clamp(MIN_PITCH_RAD, MAX_PITCH_RAD);
        self.yaw_rad = offset.x.atan2(offset.z);
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn min_radius_m(&self) -> f64 {
        MIN_RADIUS_M
    }

    pub fn max_radius_m(&self) -> f64 {
        MAX_RADIUS_M
    }

    pub fn pitch_limits_rad(&self) -> (f64, f64) {
        (MIN_PITCH_RAD, MAX_PITCH_RAD)
    }

    pub fn fov_y_rad(&self) -> f64 {
        self.fov_y_rad
    }

    pub fn set_fov_y_rad(&mut self, fov_y_rad: f64) {
        self.fov_y_rad = fov_y_rad;
    }

    /// Rotates around the target; pitch is clamped.
    pub fn rotate(&mut self, d_yaw_rad: f64, d_pitch_rad: f64) {
        self.yaw_rad += d_yaw_rad;
        self.pitch_rad = (self.pitch_rad + d_pitch_rad).clamp(MIN_PITCH_RAD, MAX_PITCH_RAD);
    }

    /// Multiplicative zoom; radius is clamped.
    pub fn zoom(&mut self, factor: f64) {
        self.radius_m = (self.radius_m * factor).clamp(MIN_RADIUS_M, MAX_RADIUS_M);
    }

    pub fn position(&self) -> Vec3 {
        self.target + self.offset_unit() * self.radius_m
    }

    /// Camera up: the tangent toward increasing pitch. Horizontal for a
    /// straight-down camera, so it stays well-defined at the pitch limit.
    pub fn up(&self) -> Vec3 {
        let (sy, cy) = (self.yaw_rad.sin(), self.yaw_rad.cos());
        let (sp, cp) = (self.pitch_rad.sin(), self.pitch_rad.cos());
        Vec3::new(-sy * sp, cp, -cy * sp)
            .normalized()
            .unwrap_or(Vec3::new(0.0, 1.0, 0.0))
    }

    fn offset_unit(&self) -> Vec3 {
        let (sy, cy) = (self.yaw_rad.sin(), self.yaw_rad.cos());
        let (sp, cp) = (self.pitch_rad.sin(), self.pitch_rad.cos());
        Vec3::new(sy * cp, sp, cy * cp)
    }
}
