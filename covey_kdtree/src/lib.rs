// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Covey KdTree: a static 2-D k-d tree for map annotations.
//!
//! The tree is built once from a full annotation set and then only queried:
//! there is no insert or remove. That restriction buys a tight layout — all
//! nodes live in one contiguous arena, children are plain `u32` indices into
//! it, and both construction and range search run on explicit work stacks
//! rather than recursion, so memory use stays predictable for very large or
//! pathological inputs.
//!
//! Construction projects every coordinate exactly once, sorts the input once
//! per axis, and rotates a single extra buffer of `N/2` records through the
//! levels of the build, so the whole build allocates a small constant number
//! of arrays regardless of depth.
//!
//! # Example
//!
//! ```rust
//! use covey_geom::{GeoCoord, Projection, WebMercator};
//! use covey_kdtree::KdTree;
//!
//! let tree = KdTree::build(
//!     vec![
//!         (0_u32, GeoCoord::new(40.77, -73.98)),
//!         (1_u32, GeoCoord::new(37.85, -122.68)),
//!     ],
//!     &WebMercator,
//! );
//! assert_eq!(tree.len(), 2);
//!
//! // A world-rect query returns every member.
//! let world = WebMercator.world_rect();
//! let hits = tree.search_range(world.origin(), (world.x1, world.y1).into());
//! assert_eq!(hits.len(), 2);
//! ```
//!
//! # Thread safety
//!
//! A tree owns one reusable search stack (sized to the node count), shared
//! by all queries through a [`core::cell::RefCell`]. This makes [`KdTree`]
//! intentionally `!Sync`: callers that want concurrent queries must give
//! each thread its own tree. Re-entering a search from inside a visit
//! callback panics on the stack borrow for the same reason.

mod build;
mod tree;

pub use tree::{KdEntry, KdTree};
