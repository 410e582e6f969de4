//! Headless demo driver: a reference globe engine wired into the fusion
//! cycle, stepping simulated frames and logging what the engine does.

use std::env;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use foundation::math::{Geodetic, Vec2, Vec3, geodetic_to_ecef, solar};
use foundation::time::Time;
use fusion::{
    CameraPose, ControlMode, Frustum, FusionEngine, FusionOptions, GlobeEngine, Viewport,
};
use scene::components::{ComponentBounds, Drawable3D, Transform};

/// Mean Earth-Sun distance (meters).
const AU_M: f64 = 1.496e11;

/// Reference globe renderer, driven by the built-in solar ephemeris.
///
/// Stands in for a real tile-streaming globe: it keeps a camera pose and a
/// simulated wall clock and answers sun queries, nothing more.
struct DemoGlobe {
    pose: CameraPose,
    frustum: Frustum,
    sim_time: Time,
    pointer_events: bool,
    destroyed: bool,
}

impl DemoGlobe {
    fn hovering(base: Geodetic, alt_m: f64, unix_s: f64) -> Self {
        let position =
            geodetic_to_ecef(Geodetic::new(base.lat_rad, base.lon_rad, alt_m)).as_vec3();
        let down = (geodetic_to_ecef(base).as_vec3() - position)
            .normalized()
            .unwrap_or(Vec3::new(0.0, 0.0, -1.0));
        Self {
            pose: CameraPose::new(position, down, Vec3::new(0.0, 0.0, 1.0), 1.0),
            frustum: Frustum {
                aspect: 16.0 / 9.0,
                near: 0.1,
                far: 1.0e8,
            },
            sim_time: Time(unix_s),
            pointer_events: false,
            destroyed: false,
        }
    }
}

impl GlobeEngine for DemoGlobe {
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
        self.sim_time
    }

    fn sun_position_fixed(&self, time: Time) -> Option<Vec3> {
        solar::sun_position_ecef(time, AU_M)
    }

    fn global_illumination(&self) -> bool {
        true
    }

    fn render(&mut self) {
        // Real time drives the simulated clock while the loop runs.
        self.sim_time = self.sim_time + 1.0 / 60.0;
    }

    fn resize(&mut self, _width_px: f64, _height_px: f64) {}

    fn set_pointer_events(&mut self, enabled: bool) {
        self.pointer_events = enabled;
    }

    fn take_clicks(&mut self) -> Vec<Vec2> {
        Vec::new()
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let lat_deg = env_f64("VIEWER_LAT_DEG", 39.904);
    let lon_deg = env_f64("VIEWER_LON_DEG", 116.391);
    let alt_m = env_f64("VIEWER_ALT_M", 50.0);
    let unix_s = env_f64("VIEWER_UNIX_S", 1_710_936_000.0);
    let frames = env_f64("VIEWER_FRAMES", 600.0) as u64;

    let options = FusionOptions {
        container: Some(Viewport::new(1280.0, 720.0)),
        base_lat_deg: lat_deg,
        base_lon_deg: lon_deg,
        base_alt_m: alt_m,
        control_mode: ControlMode::Auto,
        show_sun_direction_line: true,
        enable_shadow: true,
        ..FusionOptions::default()
    };
    info!(
        options = %serde_json::to_string(&options).unwrap_or_default(),
        "starting fusion viewer"
    );

    let globe = DemoGlobe::hovering(options.base_point(), alt_m + 500.0, unix_s);
    let mut engine = match FusionEngine::new(globe, options) {
        Ok(engine) => engine,
        Err(err) => {
            warn!(%err, "construction failed");
            std::process::exit(1);
        }
    };

    // A couple of pickable landmarks around the base point.
    for (x, z) in [(0.0, 0.0), (40.0, -25.0), (-60.0, 80.0)] {
        let entity = engine.scene_mut().world_mut().spawn();
        let world = engine.scene_mut().world_mut();
        world.set_transform(entity, Transform::translate(Vec3::new(x, 5.0, z)));
        world.set_bounds(
            entity,
            ComponentBounds::from_center_size(Vec3::new(x, 5.0, z), 10.0),
        );
        world.set_drawable_3d(entity, Drawable3D::cube(10.0));
        if let Some(casters) = engine.shadow_casters_mut() {
            casters.register(entity);
        }
    }
    engine.set_pick_handler(Some(Box::new(|hit| match hit {
        Some(hit) => info!(entity = hit.entity.index(), distance = hit.distance, "picked"),
        None => info!("pick missed"),
    })));

    for i in 0..frames {
        engine.step(1.0 / 60.0);
        if i == frames / 2 {
            // Drop into local control halfway through the run.
            engine.set_control_mode(ControlMode::Local);
        }
        for event in engine.take_events() {
            info!(
                frame = event.frame_index,
                kind = event.kind,
                "{}",
                event.message
            );
        }
    }

    if let Some(sun) = engine.sun_state() {
        info!(
            elevation_deg = sun.elevation_rad.to_degrees(),
            intensity = sun.intensity,
            "final sun state"
        );
    }
    engine.dispose();
    info!("viewer disposed");
}
