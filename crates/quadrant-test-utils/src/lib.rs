//! Test utilities for the Quadrant sprite batcher.
//!
//! # Overview
//!
//! - `MockGraphicsDevice` - a [`GraphicsDevice`](quadrant_core::GraphicsDevice) that records
//!   every bind, pass and draw instead of talking to a GPU (requires the `mock` feature)
//! - `MockTexture` / `MockPass` - handle and pass types accepted by the mock
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use quadrant_core::GraphicsDevice;
//! use quadrant_test_utils::{MockGraphicsDevice, MockTexture};
//!
//! let mut device = MockGraphicsDevice::new();
//! device.bind_texture(0, &MockTexture::new(1));
//! assert_eq!(device.bound_texture(0), Some(1));
//! assert_eq!(device.count_binds(), 1);
//! # }
//! ```
//!
//! # Design
//!
//! The mock validates every draw it receives (index bounds, triangle count, the 16-bit
//! vertex limit) and panics on violations, so tests fail at the offending call rather
//! than when inspecting results.

#[cfg(feature = "mock")]
pub mod mock_device;

#[cfg(feature = "mock")]
pub use mock_device::*;
