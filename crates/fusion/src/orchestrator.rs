use foundation::math::{Ecef, Geodetic, LocalFrame, Vec3, ecef_to_geodetic};
use runtime::{Event, EventBus, Frame};
use scene::SceneEngine;
use scene::shadow::ShadowCasterSet;

use crate::config::{AutoSwitchMetric, FusionOptions};
use crate::engine::GlobeEngine;
use crate::error::FusionError;
use crate::lighting::{LightingSync, SunState};
use crate::mirror;
use crate::mode::{ControlMode, EffectiveMode, ModeArbiter};
use crate::orbit::OrbitController;
use crate::picking::{PickCallback, PickRouter};

/// Owns both renderers and runs the per-frame synchronization cycle.
///
/// Single-threaded and frame-driven. One cycle is: globe render, control
/// mode check, camera mirror (direction chosen by effective mode),
/// lighting sync, pick routing, local render. `step` is the loop entry
/// point (silent after disposal); `render` is the manual single-frame
/// entry point (errors after disposal).
pub struct FusionEngine<G: GlobeEngine> {
    globe: G,
    scene: SceneEngine,
    local: LocalFrame,
    options: FusionOptions,
    arbiter: ModeArbiter,
    lighting: LightingSync,
    orbit: Option<OrbitController>,
    router: PickRouter,
    bus: EventBus,
    frame: Frame,
    disposed: bool,
}

impl<G: GlobeEngine> FusionEngine<G> {
    /// Validates the options, sizes both surfaces, evaluates the initial
    /// control mode, and runs one mirror + lighting pass so the scene is
    /// consistent before the first frame.
    pub fn new(mut globe: G, options: FusionOptions) -> Result<Self, FusionError> {
        let Some(container) = options.container else {
            globe.destroy();
            return Err(FusionError::MissingContainer);
        };
        if !container.is_valid() {
            globe.destroy();
            return Err(FusionError::InvalidContainer {
                width_px: container.width_px,
                height_px: container.height_px,
            });
        }

        let local = LocalFrame::new(options.base_point());
        globe.resize(container.width_px, container.height_px);
        let mut scene = SceneEngine::new(container.width_px, container.height_px);
        scene.set_ambient_intensity(options.ambient_intensity);

        let initial_metric = Self::metric_for(&local, options.auto_switch_metric, globe.camera().position);
        let arbiter = ModeArbiter::new(
            options.control_mode,
            options.auto_switch_altitude_m,
            options.auto_switch_metric,
            options.auto_switch_hysteresis_m,
            initial_metric,
        );
        let lighting = LightingSync::new(
            options.enable_light_sync,
            options.show_sun_direction_line,
            options.light_distance_m,
        );

        let mut engine = Self {
            globe,
            scene,
            local,
            options,
            arbiter,
            lighting,
            orbit: None,
            router: PickRouter::new(),
            bus: EventBus::new(),
            frame: Frame::new(0, 0.0),
            disposed: false,
        };
        if engine.arbiter.effective() == EffectiveMode::Local {
            engine.enter_local();
        }
        engine.apply_pointer_routing();
        engine.mirror_pass();
        let frame = engine.frame;
        engine
            .lighting
            .update(frame, &engine.globe, &engine.local, &mut engine.scene, &mut engine.bus);
        Ok(engine)
    }

    /// Loop entry point: advances the simulated frame by `dt_s` and runs
    /// one cycle. A no-op once disposed; a failing stage is traced as a
    /// `frame-error` event and the loop carries on.
    pub fn step(&mut self, dt_s: f64) {
        if self.disposed {
            return;
        }
        self.frame = self.frame.advance_by(dt_s);
        if let Err(err) = self.cycle() {
            self.bus.emit(self.frame, "frame-error", err.to_string());
        }
    }

    /// Manual single frame, for `auto_render: false` hosts.
    pub fn render(&mut self) -> Result<(), FusionError> {
        if self.disposed {
            return Err(FusionError::Disposed);
        }
        self.frame = self.frame.advance_by(0.0);
        self.cycle()
    }

    fn cycle(&mut self) -> Result<(), FusionError> {
        self.globe.render();

        let metric = self.current_metric();
        if let Some(target) = self.arbiter.evaluate_auto(metric) {
            self.perform_switch(target);
        }

        if !self.mirror_pass() {
            return Err(FusionError::Stage {
                stage: "mirror",
                reason: "degenerate camera pose; follower left untouched".into(),
            });
        }

        let frame = self.frame;
        self.lighting
            .update(frame, &self.globe, &self.local, &mut self.scene, &mut self.bus);
        self.router.route(
            frame,
            self.arbiter.effective(),
            &mut self.globe,
            &mut self.scene,
            &mut self.bus,
        );
        self.scene.render();
        Ok(())
    }

    /// One mirror write in the direction the effective mode dictates. In
    /// local control the orbit controller is authoritative: its pose is
    /// written to the scene camera first, then reflected into the globe.
    fn mirror_pass(&mut self) -> bool {
        match self.arbiter.effective() {
            EffectiveMode::Globe => mirror::globe_to_local(&self.local, &self.globe, &mut self.scene),
            EffectiveMode::Local => {
                if let Some(orbit) = self.orbit {
                    let position = orbit.position();
                    self.scene
                        .set_camera_look_at(position, orbit.target(), orbit.up());
                    self.scene.set_camera_fov(orbit.fov_y_rad());
                }
                mirror::local_to_globe(&self.local, &self.scene, &mut self.globe)
            }
        }
    }

    /// Explicit mode change. Concrete modes switch immediately; `Auto`
    /// re-evaluates the altitude rule on the spot.
    pub fn set_control_mode(&mut self, mode: ControlMode) {
        if self.disposed {
            return;
        }
        let metric = self.current_metric();
        if let Some(target) = self.arbiter.request(mode, metric) {
            self.perform_switch(target);
        } else {
            self.apply_pointer_routing();
        }
    }

    pub fn set_auto_switch_altitude(&mut self, threshold_m: f64) {
        self.arbiter.set_threshold_m(threshold_m);
    }

    /// The actual switch: hand the authoritative pose over, rewire pointer
    /// events, and run one mirror pass in the new direction so both
    /// cameras agree before the next input arrives.
    fn perform_switch(&mut self, target: EffectiveMode) {
        if target == self.arbiter.effective() {
            return;
        }
        if self.arbiter.effective() == EffectiveMode::Local {
            // Flush the orbit pose into the globe before it stops being
            // authoritative.
            self.mirror_pass();
        }
        self.arbiter.commit(target);
        if target == EffectiveMode::Local {
            self.enter_local();
        }
        self.apply_pointer_routing();
        self.mirror_pass();
        // One immediate local render so the switch is visible even when the
        // host drives frames manually.
        self.scene.render();
        self.bus.emit(
            self.frame,
            "mode",
            match target {
                EffectiveMode::Globe => "effective mode: globe",
                EffectiveMode::Local => "effective mode: local",
            },
        );
    }

    /// Adopts the globe camera's viewpoint into the orbit controller,
    /// constructing it with default limits on first entry.
    fn enter_local(&mut self) {
        mirror::globe_to_local(&self.local, &self.globe, &mut self.scene);
        let camera = self.scene.camera();
        let direction = camera
            .direction()
            .unwrap_or(Vec3::new(0.0, -1.0, 0.0));
        match self.orbit.as_mut() {
            Some(orbit) => {
                orbit.set_from_pose(camera.position, direction);
                orbit.set_fov_y_rad(camera.fov_y_rad);
            }
            None => {
                self.orbit = Some(OrbitController::from_pose(
                    camera.position,
                    direction,
                    camera.fov_y_rad,
                ));
            }
        }
    }

    /// Exactly one surface receives pointer events, selected by effective
    /// mode; the other lets clicks fall through to the layer beneath.
    fn apply_pointer_routing(&mut self) {
        match self.arbiter.effective() {
            EffectiveMode::Globe => {
                self.globe.set_pointer_events(true);
                self.scene.set_pointer_events(false);
            }
            EffectiveMode::Local => {
                self.globe.set_pointer_events(false);
                self.scene.set_pointer_events(true);
            }
        }
    }

    fn current_metric(&self) -> f64 {
        Self::metric_for(
            &self.local,
            self.arbiter.metric(),
            self.globe.camera().position,
        )
    }

    fn metric_for(local: &LocalFrame, metric: AutoSwitchMetric, position_ecef: Vec3) -> f64 {
        match metric {
            AutoSwitchMetric::Altitude => {
                ecef_to_geodetic(Ecef::from_vec3(position_ecef)).alt_m - local.base().alt_m
            }
            AutoSwitchMetric::DistanceFromBase => {
                local.distance_from_base(Ecef::from_vec3(position_ecef))
            }
        }
    }

    pub fn set_pick_handler(&mut self, callback: Option<PickCallback>) {
        self.router.set_callback(callback);
    }

    /// Forwards the new surface size to both engines. Idempotent; camera
    /// state is untouched.
    pub fn resize(&mut self, width_px: f64, height_px: f64) {
        if self.disposed {
            return;
        }
        self.globe.resize(width_px, height_px);
        self.scene.resize(width_px, height_px);
    }

    // Coordinate API, delegated to the local frame.

    pub fn to_local(&self, point: Geodetic) -> Vec3 {
        self.local.to_local(point)
    }

    pub fn to_global(&self, local: Vec3) -> Geodetic {
        self.local.to_global(local)
    }

    pub fn lon_lat_to_local(&self, lon_deg: f64, lat_deg: f64, alt_m: f64) -> Vec3 {
        self.local.to_local(Geodetic::from_degrees(lat_deg, lon_deg, alt_m))
    }

    // Read-only handles.

    pub fn globe(&self) -> &G {
        &self.globe
    }

    pub fn globe_mut(&mut self) -> &mut G {
        &mut self.globe
    }

    pub fn scene(&self) -> &SceneEngine {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneEngine {
        &mut self.scene
    }

    pub fn local_frame(&self) -> &LocalFrame {
        &self.local
    }

    pub fn options(&self) -> &FusionOptions {
        &self.options
    }

    pub fn sun_state(&self) -> Option<SunState> {
        self.lighting.sun_state()
    }

    pub fn requested_mode(&self) -> ControlMode {
        self.arbiter.requested()
    }

    pub fn effective_mode(&self) -> EffectiveMode {
        self.arbiter.effective()
    }

    pub fn orbit_controller(&self) -> Option<&OrbitController> {
        self.orbit.as_ref()
    }

    pub fn orbit_controller_mut(&mut self) -> Option<&mut OrbitController> {
        self.orbit.as_mut()
    }

    /// Shadow-caster registration handle; `None` unless shadows were
    /// enabled at construction.
    pub fn shadow_casters(&self) -> Option<&ShadowCasterSet> {
        self.options
            .enable_shadow
            .then(|| self.scene.shadow_casters())
    }

    pub fn shadow_casters_mut(&mut self) -> Option<&mut ShadowCasterSet> {
        self.options
            .enable_shadow
            .then(|| self.scene.shadow_casters_mut())
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Drains the trace bus; binaries forward these into their logging.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.bus.drain()
    }

    /// Tears everything down exactly once. Lights and the indicator line
    /// are removed, the orbit controller is dropped, both surfaces stop
    /// receiving pointer events, and the globe engine is destroyed.
    /// Subsequent calls are no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.lighting.dispose(&mut self.scene);
        self.scene.shadow_casters_mut().clear();
        self.orbit = None;
        self.router.set_callback(None);
        self.scene.detach();
        self.globe.set_pointer_events(false);
        self.globe.destroy();
        self.bus.emit(self.frame, "dispose", "engine disposed");
    }
}

impl<G: GlobeEngine> Drop for FusionEngine<G> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::FusionEngine;
    use crate::config::{FusionOptions, Viewport};
    use crate::error::FusionError;

    use crate::engine::{CameraPose, Frustum, GlobeEngine};
    use foundation::math::{Geodetic, Vec2, Vec3, geodetic_to_ecef};
    use foundation::time::Time;
    use std::cell::Cell;
    use std::rc::Rc;

    struct NullGlobe {
        pose: CameraPose,
        destroyed: Rc<Cell<bool>>,
    }

    impl NullGlobe {
        fn above(base: Geodetic, alt_m: f64) -> Self {
            let ground = geodetic_to_ecef(base).as_vec3();
            let up = ground.normalized().unwrap();
            Self {
                pose: CameraPose::new(
                    geodetic_to_ecef(Geodetic::new(base.lat_rad, base.lon_rad, alt_m)).as_vec3(),
                    -up,
                    Vec3::new(0.0, 0.0, 1.0),
                    1.0,
                ),
                destroyed: Rc::new(Cell::new(false)),
            }
        }
    }

    impl GlobeEngine for NullGlobe {
        fn camera(&self) -> CameraPose {
            self.pose
        }

        fn set_camera(&mut self, pose: CameraPose) {
            self.pose = pose;
        }

        fn frustum(&self) -> Frustum {
            Frustum {
                aspect: 16.0 / 9.0,
                near: 0.1,
                far: 1.0e8,
            }
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

        fn destroy(&mut self) {
            self.destroyed.set(true);
        }
    }

    fn beijing() -> Geodetic {
        Geodetic::from_degrees(39.904, 116.391, 50.0)
    }

    fn options() -> FusionOptions {
        FusionOptions {
            container: Some(Viewport::new(1280.0, 720.0)),
            base_lat_deg: 39.904,
            base_lon_deg: 116.391,
            base_alt_m: 50.0,
            ..FusionOptions::default()
        }
    }

    #[test]
    fn missing_container_is_fatal() {
        let globe = NullGlobe::above(beijing(), 10_000.0);
        let destroyed = globe.destroyed.clone();
        let result = FusionEngine::new(globe, FusionOptions::default());
        assert!(matches!(result, Err(FusionError::MissingContainer)));
        // The globe handed to a failed constructor must not leak alive.
        assert!(destroyed.get());
    }

    #[test]
    fn invalid_container_is_fatal() {
        let globe = NullGlobe::above(beijing(), 10_000.0);
        let destroyed = globe.destroyed.clone();
        let result = FusionEngine::new(
            globe,
            FusionOptions {
                container: Some(Viewport::new(0.0, 720.0)),
                ..options()
            },
        );
        assert!(matches!(result, Err(FusionError::InvalidContainer { .. })));
        assert!(destroyed.get());
    }

    #[test]
    fn construction_runs_an_initial_mirror() {
        let globe = NullGlobe::above(beijing(), 500.0);
        let engine = FusionEngine::new(globe, options()).unwrap();
        // Straight down from 450 m above the base point: the mirrored
        // scene camera sits on the local up axis.
        let camera = engine.scene().camera();
        assert!((camera.position - Vec3::new(0.0, 450.0, 0.0)).length() < 1e-2);
    }

    #[test]
    fn render_after_dispose_errors_and_step_is_silent() {
        let globe = NullGlobe::above(beijing(), 500.0);
        let mut engine = FusionEngine::new(globe, options()).unwrap();
        engine.dispose();
        assert!(matches!(engine.render(), Err(FusionError::Disposed)));
        let frames = engine.scene().frames_rendered();
        engine.step(1.0 / 60.0);
        assert_eq!(engine.scene().frames_rendered(), frames);
    }

    #[test]
    fn dispose_is_idempotent() {
        let globe = NullGlobe::above(beijing(), 500.0);
        let mut engine = FusionEngine::new(globe, options()).unwrap();
        engine.dispose();
        engine.dispose();
        assert!(engine.is_disposed());
        assert!(engine.globe().destroyed.get());
        assert!(!engine.scene().is_attached());
    }
}
