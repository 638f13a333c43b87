/// Fixed design constants for the fan scene
use nalgebra::{Point3, Vector3};

/// Linear RGB color, components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Perceived intensity, used by renderers that only have a brightness axis
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

/// The two colors the fan is built from
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub body: Rgb,
    pub accent: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            body: Rgb::new(1.0, 1.0, 1.0),
            // 0x212121
            accent: Rgb::new(0.129, 0.129, 0.129),
        }
    }
}

/// Perspective camera constants
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    /// Vertical field of view in radians
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy: 40.0_f32.to_radians(),
            near: 0.1,
            far: 50.0,
            eye: Point3::new(0.0, 3.0, 20.0),
            target: Point3::new(0.0, 0.0, 0.0),
        }
    }
}

/// One directional light plus a flat ambient term
#[derive(Debug, Clone, Copy)]
pub struct LightConfig {
    pub direction: Vector3<f32>,
    pub intensity: f32,
    pub ambient: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: Vector3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
            ambient: 0.2,
        }
    }
}

/// Immutable record of every design constant the scene is built from.
/// Passed to construction once; nothing reads these through globals.
#[derive(Debug, Clone, Copy)]
pub struct FanConfig {
    pub palette: Palette,
    pub camera: CameraConfig,
    pub light: LightConfig,
    /// Where the whole fan stands relative to the world origin
    pub fan_offset: Vector3<f32>,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            fan_offset: Vector3::new(0.0, 0.0, 10.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = FanConfig::default();
        assert!((config.camera.fovy - 40.0_f32.to_radians()).abs() < 1e-6);
        assert_eq!(config.fan_offset, Vector3::new(0.0, 0.0, 10.0));
        assert!((config.light.ambient - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_luminance_extremes() {
        let palette = Palette::default();
        assert!((palette.body.luminance() - 1.0).abs() < 1e-6);
        assert!(palette.accent.luminance() < 0.2);
    }
}
