use super::body::BodyHandle;

/// Errors raised when shapes are registered with the physics world
///
/// Nothing inside a frame update can fail; these only guard construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unknown body: {0:?}")]
    UnknownBody(BodyHandle),

    #[error("Capsule index out of range: {0}")]
    CapsuleOutOfRange(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_error_display() {
        let err = PhysicsError::InvalidGeometry("radius must be positive, got -1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid geometry: radius must be positive, got -1"
        );

        let err = PhysicsError::CapsuleOutOfRange(3);
        assert_eq!(err.to_string(), "Capsule index out of range: 3");
    }
}
