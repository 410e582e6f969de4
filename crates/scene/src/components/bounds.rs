use foundation::math::Vec3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ComponentBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl ComponentBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Axis-aligned box centered on `center` with full edge length `size`.
    pub fn from_center_size(center: Vec3, size: f64) -> Self {
        let h = size * 0.5;
        let half = Vec3::new(h, h, h);
        Self::new(center - half, center + half)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::ComponentBounds;
    use foundation::math::Vec3;

    #[test]
    fn contains_point_inside() {
        let bounds = ComponentBounds::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(bounds.contains(Vec3::new(0.5, 0.0, -0.5)));
    }

    #[test]
    fn rejects_point_outside() {
        let bounds = ComponentBounds::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(!bounds.contains(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn from_center_size_is_symmetric() {
        let b = ComponentBounds::from_center_size(Vec3::new(1.0, 2.0, 3.0), 4.0);
        assert_eq!(b.min, Vec3::new(-1.0, 0.0, 1.0));
        assert_eq!(b.max, Vec3::new(3.0, 4.0, 5.0));
    }
}
