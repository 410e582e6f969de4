use foundation::math::Vec2;
use runtime::{EventBus, Frame};
use scene::picking::PickHit;
use scene::SceneEngine;

use crate::engine::GlobeEngine;
use crate::mode::EffectiveMode;

/// Invoked once per routed click with the resolved hit, or `None` when the
/// ray missed every pickable entity.
pub type PickCallback = Box<dyn FnMut(Option<PickHit>)>;

/// Routes pointer clicks to the engine that owns input this frame.
///
/// Both engines queue clicks in the shared pixel space of the container.
/// Exactly one queue is consulted per frame, selected by effective mode;
/// the other queue is drained and discarded so stale clicks never resolve
/// against a camera that has moved on.
pub struct PickRouter {
    callback: Option<PickCallback>,
}

impl std::fmt::Debug for PickRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickRouter")
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

impl Default for PickRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl PickRouter {
    pub fn new() -> Self {
        Self { callback: None }
    }

    pub fn set_callback(&mut self, callback: Option<PickCallback>) {
        self.callback = callback;
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// One routing pass. Returns the number of clicks resolved against the
    /// scene this frame.
    pub fn route(
        &mut self,
        frame: Frame,
        mode: EffectiveMode,
        globe: &mut dyn GlobeEngine,
        scene: &mut SceneEngine,
        bus: &mut EventBus,
    ) -> usize {
        let globe_clicks = globe.take_clicks();
        let scene_clicks = scene.take_clicks();
        let clicks: Vec<Vec2> = match mode {
            EffectiveMode::Globe => globe_clicks,
            EffectiveMode::Local => scene_clicks,
        };
        if clicks.is_empty() {
            return 0;
        }

        let mut resolved = 0;
        for click in clicks {
            let hit = scene.pick(click.x, click.y);
            if hit.is_some() {
                resolved += 1;
            }
            if let Some(callback) = self.callback.as_mut() {
                callback(hit);
            }
        }
        bus.emit(frame, "pick", format!("{resolved} hit(s) resolved"));
        resolved
    }
}
