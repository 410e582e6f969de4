use foundation::math::Vec3;

/// Unit quaternion orientation [x, y, z, w].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Compose yaw (around Y) and pitch (around X) rotations.
    pub fn from_yaw_pitch(yaw_rad: f64, pitch_rad: f64) -> Self {
        let half_yaw = yaw_rad * 0.5;
        let half_pitch = pitch_rad * 0.5;
        let (sy, cy) = (half_yaw.sin(), half_yaw.cos());
        let (sp, cp) = (half_pitch.sin(), half_pitch.cos());
        Self {
            x: sp * cy,
            y: cp * sy,
            z: -sp * sy,
            w: cp * cy,
        }
    }

    pub fn rotate(self, v: Vec3) -> Vec3 {
        // q * v * q^-1 via the expanded cross-product form.
        let u = Vec3::new(self.x, self.y, self.z);
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
        }
    }

    pub fn with_orientation(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Quat, Transform};
    use foundation::math::Vec3;

    #[test]
    fn identity_is_origin() {
        let transform = Transform::identity();
        assert_eq!(transform.position, Vec3::ZERO);
        assert_eq!(transform.orientation, Quat::IDENTITY);
    }

    #[test]
    fn identity_rotation_is_noop() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Quat::IDENTITY.rotate(v), v);
    }

    #[test]
    fn yaw_quarter_turn_rotates_x_to_minus_z() {
        let q = Quat::from_yaw_pitch(std::f64::consts::FRAC_PI_2, 0.0);
        let r = q.rotate(Vec3::new(1.0, 0.0, 0.0));
        assert!((r.x).abs() < 1e-12);
        assert!((r.y).abs() < 1e-12);
        assert!((r.z + 1.0).abs() < 1e-12);
    }
}
