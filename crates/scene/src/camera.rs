use foundation::math::Vec3;

use crate::picking::Ray;

/// Perspective camera with an explicit up vector.
///
/// Pose is expressed as position + look target (never Euler angles), so
/// writes from the fusion mirror stay numerically stable.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera3D {
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3, fov_y_rad: f64, near: f64, far: f64) -> Self {
        Self {
            position,
            target,
            up,
            fov_y_rad,
            near,
            far,
        }
    }

    /// Re-aim the camera without touching the frustum.
    pub fn set_look_at(&mut self, position: Vec3, target: Vec3, up: Vec3) {
        self.position = position;
        self.target = target;
        self.up = up;
    }

    /// Unit view direction, or `None` when target coincides with position.
    pub fn direction(&self) -> Option<Vec3> {
        (self.target - self.position).normalized()
    }

    /// Orthonormal (right, up, forward) basis, or `None` when degenerate
    /// (zero direction, or up parallel to the view direction).
    pub fn basis(&self) -> Option<(Vec3, Vec3, Vec3)> {
        let forward = self.direction()?;
        let right = forward.cross(self.up).normalized()?;
        let up = right.cross(forward);
        Some((right, up, forward))
    }

    /// Ray through a pixel center, for a viewport of `width_px` x `height_px`.
    pub fn screen_ray(&self, x_px: f64, y_px: f64, width_px: f64, height_px: f64) -> Option<Ray> {
        if !(width_px > 0.0) || !(height_px > 0.0) {
            return None;
        }
        let (right, up, forward) = self.basis()?;

        let aspect = width_px / height_px;
        let tan_half = (self.fov_y_rad * 0.5).tan();
        let ndc_x = 2.0 * (x_px + 0.5) / width_px - 1.0;
        let ndc_y = 1.0 - 2.0 * (y_px + 0.5) / height_px;

        let dir = forward + right * (ndc_x * tan_half * aspect) + up * (ndc_y * tan_half);
        Some(Ray::new(self.position, dir.normalized()?))
    }
}

#[cfg(test)]
mod tests {
    use super::Camera3D;
    use foundation::math::Vec3;

    fn camera() -> Camera3D {
        Camera3D::look_at(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
            60f64.to_radians(),
            0.1,
            10_000.0,
        )
    }

    #[test]
    fn direction_points_at_target() {
        let cam = camera();
        let dir = cam.direction().unwrap();
        assert!((dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn degenerate_pose_yields_no_basis() {
        let mut cam = camera();
        cam.target = cam.position;
        assert!(cam.basis().is_none());
        // Up parallel to the view direction is equally degenerate.
        let mut cam = camera();
        cam.up = Vec3::new(0.0, 0.0, 1.0);
        assert!(cam.basis().is_none());
    }

    #[test]
    fn center_pixel_ray_matches_view_direction() {
        let cam = camera();
        let ray = cam.screen_ray(639.5, 359.5, 1280.0, 720.0).unwrap();
        assert!((ray.dir - cam.direction().unwrap()).length() < 1e-9);
        assert_eq!(ray.origin, cam.position);
    }

    #[test]
    fn left_half_pixels_bend_left() {
        let cam = camera();
        let ray = cam.screen_ray(0.0, 359.5, 1280.0, 720.0).unwrap();
        // Camera looks down -Z with +Y up, so screen-left is -X.
        assert!(ray.dir.x < 0.0);
    }
}
