use serde::{Deserialize, Serialize};

use crate::config::AutoSwitchMetric;

/// What the caller asked for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    Globe,
    Local,
    Auto,
}

/// What is currently active. `Auto` always resolves to one of these; this
/// is the single source of truth for the mirror direction and input
/// ownership each frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EffectiveMode {
    Globe,
    Local,
}

/// Requested/effective mode split plus the auto-switch policy.
///
/// The arbiter only decides; the orchestrator performs the actual switch
/// (controller attach/detach, pointer rewiring, pose restore) and commits
/// the new effective mode afterwards.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ModeArbiter {
    requested: ControlMode,
    effective: EffectiveMode,
    threshold_m: f64,
    metric: AutoSwitchMetric,
    hysteresis_m: f64,
}

impl ModeArbiter {
    /// `initial_metric_m` seeds the one-time evaluation when the requested
    /// mode is `Auto`.
    pub fn new(
        requested: ControlMode,
        threshold_m: f64,
        metric: AutoSwitchMetric,
        hysteresis_m: f64,
        initial_metric_m: f64,
    ) -> Self {
        let effective = match requested {
            ControlMode::Globe => EffectiveMode::Globe,
            ControlMode::Local => EffectiveMode::Local,
            ControlMode::Auto => {
                if initial_metric_m > threshold_m {
                    EffectiveMode::Globe
                } else {
                    EffectiveMode::Local
                }
            }
        };
        Self {
            requested,
            effective,
            threshold_m,
            metric,
            hysteresis_m: hysteresis_m.max(0.0),
        }
    }

    pub fn requested(&self) -> ControlMode {
        self.requested
    }

    pub fn effective(&self) -> EffectiveMode {
        self.effective
    }

    pub fn metric(&self) -> AutoSwitchMetric {
        self.metric
    }

    pub fn threshold_m(&self) -> f64 {
        self.threshold_m
    }

    pub fn set_threshold_m(&mut self, threshold_m: f64) {
        self.threshold_m = threshold_m;
    }

    /// Per-frame auto policy: returns the mode to switch to, if any.
    ///
    /// With a zero hysteresis band this is the bare inequality (metric
    /// above the threshold means globe, at or below means local); at most
    /// one switch can be signalled per evaluation, so a metric sitting
    /// exactly on the boundary cannot oscillate within a frame.
    pub fn evaluate_auto(&self, metric_m: f64) -> Option<EffectiveMode> {
        if self.requested != ControlMode::Auto {
            return None;
        }
        self.desired_for(metric_m)
    }

    /// Explicit mode request. Returns the switch target, if the effective
    /// mode must change.
    pub fn request(&mut self, mode: ControlMode, metric_m: f64) -> Option<EffectiveMode> {
        self.requested = mode;
        match mode {
            ControlMode::Globe => self.target_if_different(EffectiveMode::Globe),
            ControlMode::Local => self.target_if_different(EffectiveMode::Local),
            ControlMode::Auto => self.desired_for(metric_m),
        }
    }

    /// Commits a switch the orchestrator has finished performing.
    pub fn commit(&mut self, effective: EffectiveMode) {
        self.effective = effective;
    }

    fn desired_for(&self, metric_m: f64) -> Option<EffectiveMode> {
        let up_edge = self.threshold_m + self.hysteresis_m * 0.5;
        let down_edge = self.threshold_m - self.hysteresis_m * 0.5;
        let desired = if metric_m > up_edge {
            EffectiveMode::Globe
        } else if self.hysteresis_m > 0.0 && metric_m >= down_edge {
            // Inside the dead band: hold the current mode.
            self.effective
        } else {
            EffectiveMode::Local
        };
        self.target_if_different(desired)
    }

    fn target_if_different(&self, desired: EffectiveMode) -> Option<EffectiveMode> {
        (desired != self.effective).then_some(desired)
    }
}
