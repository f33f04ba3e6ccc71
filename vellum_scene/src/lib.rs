// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vellum_scene --heading-base-level=0

//! Vellum Scene: a drawable graph over shared paints.
//!
//! A [`Scene`] is an arena of [`Drawable`] nodes and an arena of
//! [`Paint`](vellum_picture::Paint) values. Nodes refer to each other and to
//! paints through small index handles ([`DrawableId`], [`PaintId`]), so the
//! graph can contain shared subtrees and `Use` cycles without reference
//! counting.
//!
//! # Core concepts
//!
//! - **Drawables**: [`DrawableKind`] is a closed set of node variants:
//!   containers, path drawables with markers, `Use` references, switches,
//!   and marker instances. Each drawable carries independent fill, stroke,
//!   and opacity paint slots, a local transform, and optional clip, filter,
//!   and mask.
//! - **Traversal**: [`Scene::traverse`] and [`Walker`] visit each reachable
//!   drawable once in document order, mask before children, and terminate on
//!   cycles.
//! - **Editing**: [`PaintEditor`] and the [`Scene::update_fills`] family apply
//!   an update to every distinct paint handle that matches a predicate,
//!   either in place or by cloning on write.
//! - **Recording**: [`Scene::record`] draws a subgraph into a
//!   [`Picture`](vellum_picture::Picture).
//! - **Queries**: [`Scene::update_bounds`] and [`Scene::hit_test`].
//!
//! # Example
//!
//! ```
//! use vellum_picture::{Color, Paint, Path, Rect};
//! use vellum_scene::{Drawable, EditMode, Scene};
//!
//! let mut scene = Scene::new();
//! let red = scene.add_paint(Paint::fill(Color::from_rgb8(255, 0, 0)));
//! let mut square = Path::new();
//! square.add_rect(Rect::from_xywh(0.0, 0.0, 8.0, 8.0));
//! let shape = scene.insert(Drawable::path(square).with_fill(red));
//! let root = scene.insert(Drawable::container([shape]));
//!
//! // Recolor everything red into a clone, leaving the original paint intact.
//! let changed = scene
//!     .update_fills(&[root], EditMode::CloneOnWrite, |p| p.color == Color::from_rgb8(255, 0, 0), |p| {
//!         p.color = Color::BLACK;
//!     })
//!     .unwrap();
//! assert_eq!(changed, 1);
//!
//! let picture = scene.record(root, Rect::new(0.0, 0.0, 8.0, 8.0));
//! assert!(!picture.is_empty());
//! ```

#![no_std]

extern crate alloc;

mod bounds;
mod edit;
mod hit;
mod record;
mod scene;
mod walk;

pub use edit::{EditError, EditMode, PaintEditor};
pub use record::{IgnoreAttributes, RecordOptions};
pub use scene::{Drawable, DrawableFlags, DrawableId, DrawableKind, PaintId, PaintSlot, Scene};
pub use walk::{Traverse, VisitedSet, Walker};
