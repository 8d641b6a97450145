//! Core types shared across the cockpit visualization:
//! - Transform for spatial positioning of scene nodes
//! - Time management for the render loop

pub mod time;
pub mod transform;

pub use time::*;
pub use transform::*;

// Re-export commonly used math types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
