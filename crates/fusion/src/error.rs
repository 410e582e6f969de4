#[derive(Debug)]
pub enum FusionError {
    /// No display surface was supplied at construction.
    MissingContainer,
    /// The supplied surface has a degenerate size.
    InvalidContainer { width_px: f64, height_px: f64 },
    /// Manual `render()` after `dispose()`.
    Disposed,
    /// A stage of the frame cycle failed; at the loop boundary this is
    /// traced and the loop continues.
    Stage {
        stage: &'static str,
        reason: String,
    },
}

impl std::fmt::Display for FusionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FusionError::MissingContainer => write!(f, "missing container surface"),
            FusionError::InvalidContainer {
                width_px,
                height_px,
            } => {
                write!(f, "invalid container surface: {width_px}x{height_px}")
            }
            FusionError::Disposed => write!(f, "engine already disposed"),
            FusionError::Stage { stage, reason } => {
                write!(f, "frame stage {stage} failed: {reason}")
            }
        }
    }
}

impl std::error::Error for FusionError {}

#[cfg(test)]
mod tests {
    use super::FusionError;

    #[test]
    fn display_messages() {
        assert_eq!(
            FusionError::MissingContainer.to_string(),
            "missing container surface"
        );
        assert_eq!(
            FusionError::InvalidContainer {
                width_px: 0.0,
                height_px: 720.0
            }
            .to_string(),
            "invalid container surface: 0x720"
        );
    }
}
