use foundation::math::Vec2;
use foundation::math::Vec3;
use foundation::time::Time;

/// Camera pose in the globe engine's Earth-fixed frame.
///
/// Invariant: after every mirror write, `direction` and `up` are
/// unit-length and mutually orthogonal (see [`CameraPose::orthonormalized`]).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    /// ECEF position (meters).
    pub position: Vec3,
    /// Unit view direction.
    pub direction: Vec3,
    /// Unit up vector, orthogonal to `direction`.
    pub up: Vec3,
    /// Vertical field of view (radians).
    pub fov_y_rad: f64,
}

impl CameraPose {
    pub fn new(position: Vec3, direction: Vec3, up: Vec3, fov_y_rad: f64) -> Self {
        Self {
            position,
            direction,
            up,
            fov_y_rad,
        }
    }

    /// Restores the unit/orthogonality invariant via Gram-Schmidt.
    ///
    /// `None` when the view direction is degenerate; an up vector parallel
    /// to the direction falls back to a stable perpendicular axis.
    pub fn orthonormalized(self) -> Option<Self> {
        let direction = self.direction.normalized()?;
        let up = match (self.up - direction * direction.dot(self.up)).normalized() {
            Some(up) => up,
            None => perpendicular_to(direction),
        };
        Some(Self {
            position: self.position,
            direction,
            up,
            fov_y_rad: self.fov_y_rad,
        })
    }
}

/// Any perpendicular unit vector; seeded from whichever canonical axis is
/// least aligned with `dir` so the result is well-conditioned.
fn perpendicular_to(dir: Vec3) -> Vec3 {
    let seed = if dir.y.abs() < 0.9 {
        Vec3::new(0.0, 1.0, 0.0)
    } else {
        Vec3::new(1.0, 0.0, 0.0)
    };
    dir.cross(seed)
        .cross(dir)
        .normalized()
        .unwrap_or(Vec3::new(0.0, 1.0, 0.0))
}

/// View frustum parameters carried across mirror writes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frustum {
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

/// The globe/terrain/imagery renderer, consumed at its interface only.
///
/// Contract notes:
/// - `set_camera` rebuilds the engine's frustum with the pose's FOV while
///   preserving the previous aspect/near/far.
/// - `sun_position_fixed` is the ephemeris capability: Earth-fixed sun
///   position (meters) for a simulated time, `None` while the Earth
///   rotation data for that timestamp is unavailable.
/// - `take_clicks` drains queued pointer-down events (canvas pixel space,
///   shared with the scene surface).
pub trait GlobeEngine {
    fn camera(&self) -> CameraPose;
    fn set_camera(&mut self, pose: CameraPose);
    fn frustum(&self) -> Frustum;
    fn sim_time(&self) -> Time;
    fn sun_position_fixed(&self, time: Time) -> Option<Vec3>;
    /// Whether the engine currently applies global illumination.
    fn global_illumination(&self) -> bool;
    fn render(&mut self);
    fn resize(&mut self, width_px: f64, height_px: f64);
    fn set_pointer_events(&mut self, enabled: bool);
    fn take_clicks(&mut self) -> Vec<Vec2>;
    /// Tears the engine instance down; called exactly once from disposal.
    fn destroy(&mut self);
}
