// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Covey Geom: planar geometry primitives for map annotation clustering.
//!
//! The clustering engine works in a projected planar space (the "map
//! plane"): a finite rectangle with `x` growing east and `y` growing
//! *south*, following the convention of most tiled web maps. This crate
//! provides the pieces every other Covey crate shares:
//!
//! - [`GeoCoord`], a geographic coordinate in degrees, and
//!   [`haversine_meters`] for fast great-circle distances.
//! - The [`Projection`] trait mapping geographic coordinates into the map
//!   plane, with [`WebMercator`] as the batteries-included implementation.
//! - [`Axis`] selection helpers used by the k-d tree.
//! - [`normalize_rect_to_cells`], which snaps a viewport rectangle outward
//!   onto a uniform cell grid.
//!
//! Planar values use [`kurbo`] types (`Point`, `Rect`, `Size`) directly, so
//! callers can lean on kurbo's arithmetic instead of a parallel vocabulary.

mod coord;
mod plane;
mod projection;

pub use coord::{GeoCoord, haversine_meters};
pub use plane::{Axis, axis_value, normalize_rect_to_cells};
pub use projection::{Projection, WebMercator};
