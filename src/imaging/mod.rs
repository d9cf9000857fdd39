//! Image file inspection.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Dimensions** | `image::image_dimensions` (header only) |
//! | **Format detection** | `image::ImageFormat::reading_enabled` |
//!
//! The module is split into:
//! - **Backend**: the [`DimensionProbe`] trait and its error type
//! - **Rust backend**: [`ImageProbe`] and the supported extension list

pub mod backend;
pub mod rust_backend;

pub use backend::{DimensionProbe, Dimensions, ProbeError};
pub use rust_backend::{ImageProbe, is_supported_image, supported_input_extensions};
