use foundation::math::{Ecef, LocalFrame, Vec3};
use scene::SceneEngine;

use crate::engine::{CameraPose, GlobeEngine};

/// Scene-frame up axis, the fallback when a transformed up degenerates.
const LOCAL_UP: Vec3 = Vec3 {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};

/// Copies the globe camera pose into the scene camera.
///
/// The scene camera is written as position + look target (target =
/// position + direction) rather than composed Euler angles; the globe
/// frustum's clip planes are carried across so both cameras describe the
/// same frustum. Returns `false` when the pose is degenerate, leaving the
/// scene camera untouched.
pub fn globe_to_local(frame: &LocalFrame, globe: &dyn GlobeEngine, scene: &mut SceneEngine) -> bool {
    let Some(pose) = globe.camera().orthonormalized() else {
        return false;
    };

    let position = frame.ecef_to_local(Ecef::from_vec3(pose.position));
    let direction = frame.direction_to_local(pose.direction);
    if direction == Vec3::ZERO {
        return false;
    }
    let mut up = frame.direction_to_local(pose.up);
    if up == Vec3::ZERO {
        up = LOCAL_UP;
    }

    scene.set_camera_look_at(position, position + direction, up);
    scene.set_camera_fov(pose.fov_y_rad);
    let frustum = globe.frustum();
    scene.set_camera_clip(frustum.near, frustum.far);
    true
}

/// Copies the scene camera pose back into the globe camera.
///
/// The globe engine rebuilds its frustum from the written pose's FOV,
/// preserving the previous aspect/near/far (see [`GlobeEngine::set_camera`]).
/// Returns `false` when the pose is degenerate, leaving the globe camera
/// untouched.
pub fn local_to_globe(frame: &LocalFrame, scene: &SceneEngine, globe: &mut dyn GlobeEngine) -> bool {
    let camera = scene.camera();
    let Some(direction_local) = camera.direction() else {
        return false;
    };

    let position = frame.local_to_ecef(camera.position).as_vec3();
    let direction = frame.direction_to_global(direction_local);
    if direction == Vec3::ZERO {
        return false;
    }
    let mut up = frame.direction_to_global(camera.up);
    if up == Vec3::ZERO {
        up = frame.direction_to_global(LOCAL_UP);
    }

    let Some(pose) = CameraPose::new(position, direction, up, camera.fov_y_rad).orthonormalized()
    else {
        return false;
    };
    globe.set_camera(pose);
    true
}

#[cfg(test)]
mod tests {
    use super::{globe_to_local, local_to_globe};
    use crate::engine::{CameraPose, Frustum, GlobeEngine};
    use foundation::math::{Geodetic, LocalFrame, Vec2, Vec3, geodetic_to_ecef};
    use foundation::time::Time;
    use scene::SceneEngine;

    struct StubGlobe {
        pose: CameraPose,
        frustum: Frustum,
    }

    impl StubGlobe {
        fn with_pose(pose: CameraPose) -> Self {
            Self {
                pose,
                frustum: Frustum {
                    aspect: 16.0 / 9.0,
                    near: 0.1,
                    far: 1.0e8,
                },
            }
        }
    }

    impl GlobeEngine for StubGlobe {
        fn camera(&self) -> CameraPose {
            self.pose
        }

        fn set_camera(&mut self, pose: CameraPose) {
            self.pose = pose;
        }

        fn frustum(&self) -> Frustum {
            self.frustum
        }

        fn sim_time(&self) -> Time {
            Time(0.0)
        }

        fn sun_position_fixed(&self, _time: Time) -> Option<Vec3> {
            None
        }

        fn global_illumination(&self) -> bool {
            false
        }

        fn render(&mut self) {}
        fn resize(&mut self, _width_px: f64, _height_px: f64) {}
        fn set_pointer_events(&mut self, _enabled: bool) {}

        fn take_clicks(&mut self) -> Vec<Vec2> {
            Vec::new()
        }

        fn destroy(&mut self) {}
    }

    fn beijing_frame() -> LocalFrame {
        LocalFrame::new(Geodetic::from_degrees(39.904, 116.391, 0.0))
    }

    /// Globe pose equivalent to the local pose (0, 1000, 0) looking
    /// straight down.
    fn straight_down_globe_pose(frame: &LocalFrame) -> CameraPose {
        let position = frame.local_to_ecef(Vec3::new(0.0, 1_000.0, 0.0)).as_vec3();
        let direction = frame.direction_to_global(Vec3::new(0.0, -1.0, 0.0));
        let up = frame.direction_to_global(Vec3::new(0.0, 0.0, 1.0));
        CameraPose::new(position, direction, up, 1.0)
    }

    #[test]
    fn straight_down_pose_mirrors_to_local() {
        let frame = beijing_frame();
        let mut scene = SceneEngine::new(1280.0, 720.0);
        let globe = StubGlobe::with_pose(straight_down_globe_pose(&frame));

        assert!(globe_to_local(&frame, &globe, &mut scene));
        let cam = scene.camera();
        assert!((cam.position - Vec3::new(0.0, 1_000.0, 0.0)).length() < 1e-2);
        // Look target sits directly below the camera.
        assert!((cam.target.y - 999.0).abs() < 1e-2);
        assert!((cam.target.x).abs() < 1e-2 && (cam.target.z).abs() < 1e-2);
        assert_eq!(cam.fov_y_rad, 1.0);
    }

    #[test]
    fn mirroring_carries_the_globe_clip_planes() {
        let frame = beijing_frame();
        let mut scene = SceneEngine::new(1280.0, 720.0);
        let globe = StubGlobe::with_pose(straight_down_globe_pose(&frame));

        assert!(globe_to_local(&frame, &globe, &mut scene));
        let cam = scene.camera();
        assert_eq!(cam.near, 0.1);
        assert_eq!(cam.far, 1.0e8);
    }

    #[test]
    fn mirror_round_trip_is_idempotent() {
        let frame = beijing_frame();
        let mut scene = SceneEngine::new(1280.0, 720.0);
        let original = CameraPose::new(
            geodetic_to_ecef(Geodetic::from_degrees(39.906, 116.395, 850.0)).as_vec3(),
            frame.direction_to_global(Vec3::new(0.2, -0.7, 0.4).normalized().unwrap()),
            frame.direction_to_global(Vec3::new(0.0, 0.5, 0.8).normalized().unwrap()),
            0.9,
        )
        .orthonormalized()
        .unwrap();
        let mut globe = StubGlobe::with_pose(original);

        assert!(globe_to_local(&frame, &globe, &mut scene));
        assert!(local_to_globe(&frame, &scene, &mut globe));

        let rt = globe.camera();
        assert!((rt.position - original.position).length() < 1e-3);
        assert!((rt.direction - original.direction).length() < 1e-6);
        assert!((rt.up - original.up).length() < 1e-6);
        assert_eq!(rt.fov_y_rad, original.fov_y_rad);
    }

    #[test]
    fn degenerate_globe_pose_leaves_scene_untouched() {
        let frame = beijing_frame();
        let mut scene = SceneEngine::new(100.0, 100.0);
        let before = scene.camera();
        let globe = StubGlobe::with_pose(CameraPose::new(
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
        ));
        assert!(!globe_to_local(&frame, &globe, &mut scene));
        assert_eq!(scene.camera(), before);
    }

    #[test]
    fn degenerate_scene_pose_leaves_globe_untouched() {
        let frame = beijing_frame();
        let mut scene = SceneEngine::new(100.0, 100.0);
        let pos = Vec3::new(5.0, 5.0, 5.0);
        scene.set_camera_look_at(pos, pos, Vec3::new(0.0, 1.0, 0.0));
        let mut globe = StubGlobe::with_pose(straight_down_globe_pose(&frame));
        let before = globe.camera();
        assert!(!local_to_globe(&frame, &scene, &mut globe));
        assert_eq!(globe.camera(), before);
    }
}
