/// fan3d Core Library - Scene composition and animation state machine
///
/// This library provides the renderer-agnostic core of the interactive fan:
/// primitive tessellation, transformation matrices, a retained-mode scene
/// graph, the fixed fan part hierarchy and the controller that animates it.

pub mod assembly;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use assembly::{FanAssembly, BLADE_COUNT};
pub use config::{CameraConfig, FanConfig, LightConfig, Palette, Rgb};
pub use controller::{FanController, FanSpeed};
pub use geometry::{Mesh, Triangle, Vertex};
pub use projection::Camera;
pub use scene::{Material, Node, NodeId, Scene};
pub use transform::{RotationState, Transform};
