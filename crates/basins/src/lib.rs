//! # fos-basins
//!
//! Watershed boundary layers and point containment.
//!
//! A [`WatershedLayer`] holds one resolution of hydrologic-unit polygons
//! (huc6 coarse, huc8 fine) sorted by identifier. Containment is
//! boundary-inclusive, and a point sitting on a shared boundary always
//! resolves to the smallest identifier, so assignment is deterministic.
//!
//! ## Quick Start
//!
//! ```ignore
//! use fos_basins::{Watershed, WatershedLayer};
//! use geo::point;
//!
//! let layer = WatershedLayer::new("huc6", watersheds)?;
//! let station = point!(x: -110.5, y: 43.9);
//! match layer.locate(&station) {
//!     Some(ws) => println!("{} -> {}", ws.id(), ws.name()),
//!     None => println!("outside every basin"),
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `layer` | Watershed polygons, layers, and containment lookup |
//! | `error` | Error types |

mod error;
mod layer;

pub use error::BasinError;
pub use layer::{Watershed, WatershedLayer};
