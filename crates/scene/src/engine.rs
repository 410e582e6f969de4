use foundation::math::{Vec2, Vec3};

use crate::World;
use crate::camera::Camera3D;
use crate::light::{AmbientLight, DebugLine, DirectionalLight};
use crate::picking::{PickHit, PickOptions, pick_screen};
use crate::render::{RenderFrame, collect};
use crate::shadow::ShadowCasterSet;

/// The local 3D engine facade: scene graph, camera, lights, canvas state
/// and a drained pointer-event queue.
///
/// The canvas is a full-size surface stacked above the globe surface;
/// whether it receives pointer events is decided by the fusion control
/// mode, not by the scene itself.
#[derive(Debug)]
pub struct SceneEngine {
    world: World,
    camera: Camera3D,
    sun: Option<DirectionalLight>,
    ambient: AmbientLight,
    debug_line: Option<DebugLine>,
    shadow_casters: ShadowCasterSet,
    width_px: f64,
    height_px: f64,
    pointer_events: bool,
    attached: bool,
    clicks: Vec<Vec2>,
    frames_rendered: u64,
}

impl SceneEngine {
    pub fn new(width_px: f64, height_px: f64) -> Self {
        Self {
            world: World::new(),
            camera: Camera3D::look_at(
                Vec3::new(0.0, 10.0, 10.0),
                Vec3::ZERO,
                Vec3::new(0.0, 1.0, 0.0),
                60f64.to_radians(),
                0.1,
                1.0e7,
            ),
            sun: None,
            ambient: AmbientLight::new(0.3),
            debug_line: None,
            shadow_casters: ShadowCasterSet::new(),
            width_px,
            height_px,
            pointer_events: false,
            attached: true,
            clicks: Vec::new(),
            frames_rendered: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn camera(&self) -> Camera3D {
        self.camera
    }

    pub fn set_camera_look_at(&mut self, position: Vec3, target: Vec3, up: Vec3) {
        self.camera.set_look_at(position, target, up);
    }

    pub fn set_camera_fov(&mut self, fov_y_rad: f64) {
        self.camera.fov_y_rad = fov_y_rad;
    }

    pub fn set_camera_clip(&mut self, near: f64, far: f64) {
        self.camera.near = near;
        self.camera.far = far;
    }

    pub fn render(&mut self) -> RenderFrame {
        self.frames_rendered += 1;
        collect(
            &self.world,
            self.camera,
            self.sun,
            self.ambient,
            self.debug_line,
        )
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Idempotent; does not touch camera or lighting state.
    pub fn resize(&mut self, width_px: f64, height_px: f64) {
        self.width_px = width_px;
        self.height_px = height_px;
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width_px, self.height_px)
    }

    pub fn set_pointer_events(&mut self, enabled: bool) {
        self.pointer_events = enabled;
    }

    pub fn pointer_events(&self) -> bool {
        self.pointer_events
    }

    /// Host-side pointer-down feed. Ignored while pointer events are off
    /// (clicks fall through to the surface beneath).
    pub fn push_click(&mut self, x_px: f64, y_px: f64) {
        if self.pointer_events && self.attached {
            self.clicks.push(Vec2::new(x_px, y_px));
        }
    }

    pub fn take_clicks(&mut self) -> Vec<Vec2> {
        std::mem::take(&mut self.clicks)
    }

    pub fn pick(&self, x_px: f64, y_px: f64) -> Option<PickHit> {
        pick_screen(
            &self.world,
            x_px,
            y_px,
            |x, y| self.camera.screen_ray(x, y, self.width_px, self.height_px),
            PickOptions::default(),
        )
    }

    pub fn sun_light(&self) -> Option<DirectionalLight> {
        self.sun
    }

    /// Lazily creates the directional light, then updates it in place.
    pub fn set_sun_light(&mut self, direction: Vec3, intensity: f64, position: Vec3) {
        match &mut self.sun {
            Some(light) => light.update(direction, intensity, position),
            None => self.sun = Some(DirectionalLight::new(direction, intensity, position)),
        }
    }

    pub fn clear_sun_light(&mut self) {
        self.sun = None;
    }

    pub fn ambient(&self) -> AmbientLight {
        self.ambient
    }

    pub fn set_ambient_intensity(&mut self, intensity: f64) {
        self.ambient = AmbientLight::new(intensity);
    }

    pub fn debug_line(&self) -> Option<DebugLine> {
        self.debug_line
    }

    /// Lazily creates the line primitive, then updates vertices in place.
    pub fn set_debug_line(&mut self, from: Vec3, to: Vec3) {
        match &mut self.debug_line {
            Some(line) => line.set(from, to),
            None => self.debug_line = Some(DebugLine::new(from, to)),
        }
    }

    pub fn clear_debug_line(&mut self) {
        self.debug_line = None;
    }

    pub fn shadow_casters(&self) -> &ShadowCasterSet {
        &self.shadow_casters
    }

    pub fn shadow_casters_mut(&mut self) -> &mut ShadowCasterSet {
        &mut self.shadow_casters
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Removes the canvas from the document; part of fusion disposal.
    pub fn detach(&mut self) {
        self.attached = false;
        self.pointer_events = false;
        self.clicks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::SceneEngine;
    use crate::components::{ComponentBounds, Drawable3D, Transform};
    use foundation::math::Vec3;

    fn engine_with_box() -> SceneEngine {
        let mut engine = SceneEngine::new(1280.0, 720.0);
        let e = engine.world_mut().spawn();
        engine
            .world_mut()
            .set_transform(e, Transform::translate(Vec3::ZERO));
        engine.world_mut().set_drawable_3d(e, Drawable3D::cube(4.0));
        engine
            .world_mut()
            .set_bounds(e, ComponentBounds::from_center_size(Vec3::ZERO, 4.0));
        engine
    }

    #[test]
    fn clicks_require_pointer_events() {
        let mut engine = SceneEngine::new(100.0, 100.0);
        engine.push_click(10.0, 10.0);
        assert!(engine.take_clicks().is_empty());

        engine.set_pointer_events(true);
        engine.push_click(10.0, 10.0);
        assert_eq!(engine.take_clicks().len(), 1);
        assert!(engine.take_clicks().is_empty());
    }

    #[test]
    fn center_click_picks_the_centered_box() {
        let mut engine = engine_with_box();
        engine.set_camera_look_at(
            Vec3::new(0.0, 0.0, 50.0),
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
        );
        let hit = engine.pick(639.5, 359.5).expect("hit");
        assert!(hit.distance > 0.0);
    }

    #[test]
    fn sun_light_is_created_lazily_and_updated_in_place() {
        let mut engine = SceneEngine::new(100.0, 100.0);
        assert!(engine.sun_light().is_none());
        engine.set_sun_light(Vec3::new(0.0, -1.0, 0.0), 0.5, Vec3::ZERO);
        engine.set_sun_light(Vec3::new(1.0, 0.0, 0.0), 0.7, Vec3::ZERO);
        let sun = engine.sun_light().unwrap();
        assert_eq!(sun.direction, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(sun.intensity, 0.7);
    }

    #[test]
    fn detach_disables_input_and_drops_pending_clicks() {
        let mut engine = SceneEngine::new(100.0, 100.0);
        engine.set_pointer_events(true);
        engine.push_click(5.0, 5.0);
        engine.detach();
        assert!(!engine.pointer_events());
        assert!(engine.take_clicks().is_empty());
        engine.push_click(5.0, 5.0);
        assert!(engine.take_clicks().is_empty());
    }
}
