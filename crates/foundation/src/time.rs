/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Time(pub f64); // seconds

impl Time {
    pub fn seconds(self) -> f64 {
        self.0
    }

    /// Simulated clock values are Unix epoch seconds.
    pub fn from_unix_ms(ms: f64) -> Self {
        Time(ms / 1_000.0)
    }
}

impl std::ops::Add<f64> for Time {
    type Output = Time;

    fn add(self, dt_s: f64) -> Time {
        Time(self.0 + dt_s)
    }
}
