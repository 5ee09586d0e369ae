use thiserror::Error;

/// Construction-time contract violations in the geometry layer.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridError {
    #[error("hex radius must be finite and positive, got {0}")]
    InvalidRadius(f32),
}
