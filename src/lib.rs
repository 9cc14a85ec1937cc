//! Product catalog browser with an animated image gallery.
//!
//! The library holds everything that doesn't need a window: the animation
//! driver, the gallery view, the sequential image loader, the HTTP client
//! seam and the catalog controller. The binary wraps it in an eframe shell.

pub mod animation;
pub mod browser;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gallery;
pub mod http;
pub mod image_loader;
pub mod loader;
pub mod surface;

pub use error::{Error, Result};
