use foundation::math::{LocalFrame, Vec3};
use runtime::{EventBus, Frame};
use scene::SceneEngine;

use crate::engine::GlobeEngine;

/// Length of the sun-direction indicator line (scene meters).
const SUN_LINE_LENGTH_M: f64 = 1_000.0;

/// Instantaneous sun state in the scene frame. Recomputed every frame;
/// never persisted.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SunState {
    /// Unit direction from the base point toward the sun.
    pub direction_local: Vec3,
    /// Angle above the local horizon (radians).
    pub elevation_rad: f64,
    /// In [0, 1]: 0 at or below the horizon, 1 at the zenith.
    pub intensity: f64,
}

/// Keeps the scene's directional/ambient light pair in sync with the
/// globe's simulated sun.
#[derive(Debug)]
pub struct LightingSync {
    enabled: bool,
    show_line: bool,
    light_distance_m: f64,
    current: Option<SunState>,
    active: bool,
}

impl LightingSync {
    pub fn new(enabled: bool, show_line: bool, light_distance_m: f64) -> Self {
        Self {
            enabled,
            show_line,
            light_distance_m,
            current: None,
            active: false,
        }
    }

    pub fn sun_state(&self) -> Option<SunState> {
        self.current
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// One lighting pass. Runs only while enabled and the globe reports
    /// global illumination; when the ephemeris or rotation data is
    /// unavailable the frame is skipped silently and previous light state
    /// survives untouched.
    pub fn update(
        &mut self,
        frame: Frame,
        globe: &dyn GlobeEngine,
        local: &LocalFrame,
        scene: &mut SceneEngine,
        bus: &mut EventBus,
    ) {
        if !self.enabled || !globe.global_illumination() {
            if self.active {
                scene.clear_sun_light();
                scene.clear_debug_line();
                self.active = false;
                self.current = None;
                bus.emit(frame, "lighting", "disabled; light disposed");
            }
            return;
        }

        let time = globe.sim_time();
        let Some(sun_fixed) = globe.sun_position_fixed(time) else {
            bus.emit(frame, "lighting", "sun position unavailable; frame skipped");
            return;
        };
        let Some(to_sun) = (sun_fixed - local.origin_ecef().as_vec3()).normalized() else {
            bus.emit(frame, "lighting", "degenerate sun vector; frame skipped");
            return;
        };
        let direction_local = local.direction_to_local(to_sun);
        if direction_local == Vec3::ZERO {
            bus.emit(frame, "lighting", "degenerate sun vector; frame skipped");
            return;
        }

        let elevation_rad = direction_local.y.clamp(-1.0, 1.0).asin();
        let intensity = elevation_rad.sin().max(0.0);

        scene.set_sun_light(
            -direction_local,
            intensity,
            direction_local * self.light_distance_m,
        );
        if self.show_line {
            scene.set_debug_line(Vec3::ZERO, direction_local * SUN_LINE_LENGTH_M);
        }

        self.current = Some(SunState {
            direction_local,
            elevation_rad,
            intensity,
        });
        self.active = true;
    }

    /// Part of fusion disposal; also used when light-sync is switched off.
    pub fn dispose(&mut self, scene: &mut SceneEngine) {
        if self.active {
            scene.clear_sun_light();
            scene.clear_debug_line();
            self.active = false;
        }
        self.current = None;
    }
}
