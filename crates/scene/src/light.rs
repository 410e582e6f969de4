use foundation::math::Vec3;

/// Directional light driving the scene's sun shading.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels (unit, scene frame).
    pub direction: Vec3,
    /// Intensity in [0, 1].
    pub intensity: f64,
    /// Fixed light position for shadow projection.
    pub position: Vec3,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, intensity: f64, position: Vec3) -> Self {
        Self {
            direction,
            intensity: intensity.clamp(0.0, 1.0),
            position,
        }
    }

    /// In-place update; keeps the one light instance alive across frames.
    pub fn update(&mut self, direction: Vec3, intensity: f64, position: Vec3) {
        self.direction = direction;
        self.intensity = intensity.clamp(0.0, 1.0);
        self.position = position;
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AmbientLight {
    pub intensity: f64,
}

impl AmbientLight {
    pub fn new(intensity: f64) -> Self {
        Self {
            intensity: intensity.clamp(0.0, 1.0),
        }
    }
}

/// Single line-segment primitive for the sun-direction indicator.
///
/// Vertex data is updated in place each frame; the primitive is only
/// recreated on first activation or after disposal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DebugLine {
    pub from: Vec3,
    pub to: Vec3,
}

impl DebugLine {
    pub fn new(from: Vec3, to: Vec3) -> Self {
        Self { from, to }
    }

    pub fn set(&mut self, from: Vec3, to: Vec3) {
        self.from = from;
        self.to = to;
    }
}
