//! Application configuration loaded from YAML.
//!
//! Every section has defaults, so an empty file (or no file) yields the
//! stock demo: 1280x720 window, camera at the origin looking down -Z,
//! procedural crate textures.

use glam::Vec3;
use lightbox_camera::{Camera, CameraError, CameraSettings, PITCH_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid camera settings: {0}")]
    Camera(#[from] CameraError),
    #[error("window size must be non-zero, got {width}x{height}")]
    WindowSize { width: u32, height: u32 },
    #[error("clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    ClipPlanes { near: f32, far: f32 },
    #[error("max frame delta must be positive, got {0}")]
    FrameDelta(f32),
    #[error("invalid camera {field}: {reason}")]
    CameraPose {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Lightbox".into(),
            width: 1280,
            height: 720,
        }
    }
}

/// Initial camera placement plus its tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub world_up: Vec3,
    /// Degrees.
    pub yaw: f32,
    /// Degrees.
    pub pitch: f32,
    #[serde(flatten)]
    pub settings: CameraSettings,
}

impl CameraConfig {
    /// Reject poses that would give the camera a NaN basis.
    fn validate_pose(&self) -> Result<(), ConfigError> {
        let pose = |field: &'static str, reason: &'static str| -> Result<(), ConfigError> {
            Err(ConfigError::CameraPose { field, reason })
        };
        if !self.position.is_finite() {
            return pose("position", "must be finite");
        }
        if !self.world_up.is_finite() || self.world_up.length_squared() == 0.0 {
            return pose("world_up", "must be finite and non-zero");
        }
        if !self.yaw.is_finite() {
            return pose("yaw", "must be finite");
        }
        if !self.pitch.is_finite() {
            return pose("pitch", "must be finite");
        }
        if self.pitch.abs() > PITCH_LIMIT {
            return pose("pitch", "must lie within [-89, 89] degrees");
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            world_up: Vec3::Y,
            yaw: -90.0,
            pitch: 0.0,
            settings: CameraSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub clear_color: [f32; 3],
    pub near: f32,
    pub far: f32,
    pub vsync: bool,
    /// Diffuse map; a procedural texture is used when unset or unreadable.
    pub diffuse_texture: Option<PathBuf>,
    /// Specular map; a procedural texture is used when unset or unreadable.
    pub specular_texture: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.01, 0.01, 0.01],
            near: 0.1,
            far: 100.0,
            vsync: true,
            diffuse_texture: None,
            specular_texture: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Grab and hide the cursor on startup.
    pub capture_cursor: bool,
    /// Cap on a single frame's delta time, in seconds.
    pub max_frame_delta: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            capture_cursor: true,
            max_frame_delta: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub render: RenderConfig,
    pub input: InputConfig,
}

impl AppConfig {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document for a struct
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::WindowSize {
                width: self.window.width,
                height: self.window.height,
            });
        }
        let (near, far) = (self.render.near, self.render.far);
        let clip_ok = near > 0.0 && far > near && far.is_finite();
        if !clip_ok {
            return Err(ConfigError::ClipPlanes { near, far });
        }
        let max_delta = self.input.max_frame_delta;
        if max_delta.is_nan() || max_delta <= 0.0 {
            return Err(ConfigError::FrameDelta(self.input.max_frame_delta));
        }
        self.camera.validate_pose()?;
        self.camera.settings.validate()?;
        Ok(())
    }

    /// Build the session camera from the camera section.
    pub fn build_camera(&self) -> Camera {
        let c = &self.camera;
        Camera::new(c.position, c.world_up, c.yaw, c.pitch).with_settings(&c.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_is_default() {
        let config = AppConfig::from_yaml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_document_fills_defaults() {
        let yaml = "camera:\n  movement_speed: 5.0\n  yaw: 0.0\nwindow:\n  width: 800\n";
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.camera.settings.movement_speed, 5.0);
        assert_eq!(config.camera.settings.look_sensitivity, 0.1);
        assert_eq!(config.camera.yaw, 0.0);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 720);
        assert!(config.render.diffuse_texture.is_none());
    }

    #[test]
    fn yaml_roundtrip() {
        let mut config = AppConfig::default();
        config.camera.position = Vec3::new(1.0, 2.0, 3.0);
        config.render.diffuse_texture = Some(PathBuf::from("textures/box.png"));
        let yaml = config.to_yaml().unwrap();
        let back = AppConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn invalid_camera_settings_rejected() {
        let yaml = "camera:\n  field_of_view: 120.0\n";
        let err = AppConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Camera(CameraError::FieldOfView { .. })));
    }

    #[test]
    fn invalid_window_and_clip_rejected() {
        let err = AppConfig::from_yaml_str("window:\n  height: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::WindowSize { height: 0, .. }));

        let err = AppConfig::from_yaml_str("render:\n  near: 10.0\n  far: 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ClipPlanes { .. }));
    }

    #[test]
    fn degenerate_world_up_rejected() {
        let err = AppConfig::from_yaml_str("camera:\n  world_up: [0.0, 0.0, 0.0]\n").unwrap_err();
        assert!(matches!(err, ConfigError::CameraPose { field: "world_up", .. }));

        let err = AppConfig::from_yaml_str("camera:\n  world_up: [.inf, 1.0, 0.0]\n").unwrap_err();
        assert!(matches!(err, ConfigError::CameraPose { field: "world_up", .. }));
    }

    #[test]
    fn non_finite_pose_rejected() {
        let err = AppConfig::from_yaml_str("camera:\n  yaw: .nan\n").unwrap_err();
        assert!(matches!(err, ConfigError::CameraPose { field: "yaw", .. }));

        let err = AppConfig::from_yaml_str("camera:\n  pitch: .nan\n").unwrap_err();
        assert!(matches!(err, ConfigError::CameraPose { field: "pitch", .. }));

        let err = AppConfig::from_yaml_str("camera:\n  position: [0.0, .nan, 0.0]\n").unwrap_err();
        assert!(matches!(err, ConfigError::CameraPose { field: "position", .. }));
    }

    #[test]
    fn pitch_beyond_limit_rejected() {
        let err = AppConfig::from_yaml_str("camera:\n  pitch: 95.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::CameraPose { field: "pitch", .. }));

        let config = AppConfig::from_yaml_str("camera:\n  pitch: -89.0\n").unwrap();
        let cam = config.build_camera();
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let err = AppConfig::from_yaml_str("window: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "input:\n  capture_cursor: false").unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert!(!config.input.capture_cursor);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yaml");
        let err = AppConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("nope.yaml"));
    }

    #[test]
    fn build_camera_applies_section() {
        let mut config = AppConfig::default();
        config.camera.position = Vec3::new(0.0, 1.0, 5.0);
        config.camera.settings.movement_speed = 10.0;
        let cam = config.build_camera();
        assert_eq!(cam.position(), Vec3::new(0.0, 1.0, 5.0));
        assert_eq!(cam.movement_speed(), 10.0);
        assert!(cam.front().abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }
}
