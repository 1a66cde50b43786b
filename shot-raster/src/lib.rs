//! Direct pixel access for the screenshot editing pipeline.
//!
//! This crate is the storage-level primitive underneath the image-editing
//! operations (effects, color sampling, compositing): it mediates raw
//! per-pixel access to an already-allocated [`PixelSurface`], with a locking
//! discipline, optional coordinate clipping and optional coordinate
//! offsetting.
//!
//! The building blocks:
//!
//! - [`RegionAccessor`] - locks a sub-rectangle of a surface and exposes raw
//!   get/set operations over it
//! - [`ClipView`] - restricts an accessor to a clip rectangle, with optional
//!   polarity inversion
//! - [`OffsetView`] - addresses an accessor through a translated coordinate
//!   space
//!
//! Views implement the same [`PixelRegion`] capability as the accessor and
//! stack in any order the caller needs.
//!
//! # Example
//!
//! ```
//! use shot_common::Rect;
//! use shot_raster::{ClipView, Color, MemorySurface, PixelFormat, PixelRegion, RegionAccessor};
//!
//! let surface = MemorySurface::new(64, 64, PixelFormat::rgba8888());
//! let mut region = RegionAccessor::with_region(surface, Rect::new(8, 8, 32, 32));
//!
//! let mut masked = ClipView::with_clip(&mut region, Rect::new(4, 4, 8, 8)).invert(true);
//! masked.set_color(6, 6, Color::opaque(255, 0, 0)); // inside the mask: dropped
//! masked.set_color(0, 0, Color::opaque(255, 0, 0)); // outside: written
//!
//! let surface = region.release_surface().unwrap();
//! # let _ = surface;
//! ```

pub mod clip;
pub mod format;
pub mod offset;
pub mod region;
pub mod surface;

pub use clip::ClipView;
pub use format::{Color, PixelFormat};
pub use offset::OffsetView;
pub use region::{PixelRegion, RegionAccessor};
pub use surface::{MemorySurface, PixelSurface, RenderContext};
