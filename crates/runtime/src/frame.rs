use foundation::time::Time;

/// Frame metadata for one synchronization cycle.
///
/// This is the primary timebase for the fusion loop. It is intentionally
/// small and pure so cycles can be recorded and replayed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Delta time since the previous frame (seconds).
    pub dt_s: f64,
    /// Elapsed engine time at the start of the frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    /// Next frame advanced by a host-supplied delta.
    ///
    /// The fusion loop is driven by the host's refresh callback, so dt is
    /// variable rather than a fixed step.
    pub fn advance_by(self, dt_s: f64) -> Self {
        Self {
            index: self.index + 1,
            dt_s,
            time: self.time + dt_s,
        }
    }
}
