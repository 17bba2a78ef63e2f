//! Trimarch engine crate.
//!
//! Owns the platform + GPU runtime, shader setup, and the bounded
//! incremental triangle buffer.

pub mod core;
pub mod device;
pub mod geometry;
pub mod logging;
pub mod render;
pub mod shader;
pub mod window;
