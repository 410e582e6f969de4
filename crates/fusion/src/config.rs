use serde::{Deserialize, Serialize};

use foundation::math::Geodetic;

use crate::mode::ControlMode;

/// Display surface dimensions (the "container").
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width_px: f64,
    pub height_px: f64,
}

impl Viewport {
    pub fn new(width_px: f64, height_px: f64) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.width_px > 0.0
            && self.height_px > 0.0
            && self.width_px.is_finite()
            && self.height_px.is_finite()
    }
}

/// Which quantity the auto control policy compares against its threshold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoSwitchMetric {
    /// Globe-camera ellipsoidal height above the base-point altitude.
    Altitude,
    /// Straight-line distance from the base point.
    DistanceFromBase,
}

/// Construction options. Plain serializable data; the pick callback is set
/// separately via `FusionEngine::set_pick_handler`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionOptions {
    /// Required; missing or degenerate surface is a fatal construction error.
    pub container: Option<Viewport>,
    pub base_lat_deg: f64,
    pub base_lon_deg: f64,
    pub base_alt_m: f64,
    pub auto_render: bool,
    pub enable_light_sync: bool,
    pub show_sun_direction_line: bool,
    pub enable_shadow: bool,
    pub light_distance_m: f64,
    pub ambient_intensity: f64,
    pub control_mode: ControlMode,
    pub auto_switch_altitude_m: f64,
    pub auto_switch_metric: AutoSwitchMetric,
    /// 0.0 = bare threshold inequality (the reference behavior); a positive
    /// band splits the threshold into up/down edges at +-band/2.
    pub auto_switch_hysteresis_m: f64,
}

impl Default for FusionOptions {
    fn default() -> Self {
        Self {
            container: None,
            base_lat_deg: 0.0,
            base_lon_deg: 0.0,
            base_alt_m: 0.0,
            auto_render: true,
            enable_light_sync: true,
            show_sun_direction_line: false,
            enable_shadow: false,
            light_distance_m: 500.0,
            ambient_intensity: 0.3,
            control_mode: ControlMode::Globe,
            auto_switch_altitude_m: 1_000.0,
            auto_switch_metric: AutoSwitchMetric::Altitude,
            auto_switch_hysteresis_m: 0.0,
        }
    }
}

impl FusionOptions {
    pub fn base_point(&self) -> Geodetic {
        Geodetic::from_degrees(self.base_lat_deg, self.base_lon_deg, self.base_alt_m)
    }
}
