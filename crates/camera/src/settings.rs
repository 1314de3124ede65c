use serde::{Deserialize, Serialize};

/// Lower bound for the field of view, in degrees.
pub const MIN_FIELD_OF_VIEW: f32 = 1.0;

/// Errors from validating camera settings.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CameraError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("movement speed must not be negative, got {0}")]
    NegativeSpeed(f32),
    #[error("max field of view must be in [1, 180) degrees, got {0}")]
    MaxFieldOfView(f32),
    #[error("field of view {fov} is outside [1, {max}] degrees")]
    FieldOfView { fov: f32, max: f32 },
}

/// Tunable camera constants, applied once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// World units per second.
    pub movement_speed: f32,
    /// Multiplier applied to raw look deltas.
    pub look_sensitivity: f32,
    /// Initial field of view in degrees.
    pub field_of_view: f32,
    /// Upper bound for the field of view in degrees.
    pub max_field_of_view: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            movement_speed: 2.5,
            look_sensitivity: 0.1,
            field_of_view: 45.0,
            max_field_of_view: 90.0,
        }
    }
}

impl CameraSettings {
    pub fn validate(&self) -> Result<(), CameraError> {
        for (field, value) in [
            ("movement_speed", self.movement_speed),
            ("look_sensitivity", self.look_sensitivity),
            ("field_of_view", self.field_of_view),
            ("max_field_of_view", self.max_field_of_view),
        ] {
            if !value.is_finite() {
                return Err(CameraError::NotFinite { field, value });
            }
        }
        if self.movement_speed < 0.0 {
            return Err(CameraError::NegativeSpeed(self.movement_speed));
        }
        if !(MIN_FIELD_OF_VIEW..180.0).contains(&self.max_field_of_view) {
            return Err(CameraError::MaxFieldOfView(self.max_field_of_view));
        }
        if !(MIN_FIELD_OF_VIEW..=self.max_field_of_view).contains(&self.field_of_view) {
            return Err(CameraError::FieldOfView {
                fov: self.field_of_view,
                max: self.max_field_of_view,
            });
        }
        Ok(())
    }
}
