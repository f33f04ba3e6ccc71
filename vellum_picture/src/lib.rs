// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vellum_picture --heading-base-level=0

//! Vellum Picture: a backend-agnostic vector graphics recording IR.
//!
//! This crate defines the value types shared by every layer of Vellum:
//! geometry and 3x3 matrices, paths, paints and their effect chains, a
//! recording [`Canvas`], and the immutable [`Picture`] it produces.
//!
//! # Position in the stack
//!
//! - **Scene**: a graph of drawables that share paints by handle, plus bulk
//!   editing and recording. This lives in `vellum_scene`.
//! - **Recording IR (this crate)**: paths, paints, and canvas commands
//!   captured by value into pictures.
//! - **Players**: consumers that implement [`CommandPlayer`] and turn a
//!   picture into pixels, traces, or another format. `vellum_player_ref`
//!   is a tracing reference player.
//!
//! # Core concepts
//!
//! - **Geometry**: [`Point`], [`Size`], [`Rect`] in `f32`, and [`Matrix`],
//!   a row-major 3x3 transform whose composition is computed in `f64`.
//! - **Paths**: [`Path`] is a fill rule plus an ordered list of
//!   [`PathCommand`]s. [`Path::to_bez_path`] flattens arcs and shapes into a
//!   kurbo path for players.
//! - **Paints**: [`Paint`] bundles style, stroke, and text settings with an
//!   optional [`Shader`], [`ColorFilter`], [`ImageFilter`], and
//!   [`PathEffect`].
//! - **Recording**: [`Canvas`] appends one [`CanvasCommand`] per call and
//!   tracks the total matrix and save count. [`Canvas::end_recording`] and
//!   [`record_picture`] publish the commands as a [`Picture`].
//!
//! Commands own their arguments. A picture never observes edits made to the
//! paths or paints it was recorded from, and it can be shared across threads.
//!
//! # Example
//!
//! ```
//! use vellum_picture::{Color, Matrix, Paint, Path, Rect, record_picture};
//!
//! let mut square = Path::new();
//! square.add_rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
//!
//! let picture = record_picture(Rect::new(0.0, 0.0, 64.0, 64.0), |canvas| {
//!     canvas.save();
//!     canvas.concat(&Matrix::rotation_degrees_about(45.0, 5.0, 5.0));
//!     canvas.draw_path(&square, &Paint::fill(Color::WHITE));
//!     canvas.restore();
//! });
//! assert_eq!(picture.commands().len(), 4);
//! ```
//!
//! # Features
//!
//! - `std` (default): use the standard library for floating point math.
//! - `libm`: use `libm` for floating point math in `no_std` builds.

#![no_std]

extern crate alloc;

mod canvas;
mod effects;
mod geometry;
mod image;
mod matrix;
mod paint;
mod path;
mod picture;
mod text;

pub use peniko::{BlendMode, Color, Compose, Extend, Fill as FillRule, ImageAlphaType, ImageFormat, Mix};

pub use canvas::{Canvas, CanvasCommand, ClipOperation, record_picture};
pub use effects::{
    ColorFilter, GradientStop, ImageFilter, NoiseKind, PathEffect, Shader, TrimMode,
};
pub use geometry::{Point, Rect, Size};
pub use image::Image;
pub use matrix::Matrix;
pub use paint::{FilterQuality, Paint, PaintStyle, StrokeCap, StrokeJoin};
pub use path::{Path, PathCommand};
pub use picture::{CommandPlayer, Picture};
pub use text::{FontSlant, TextAlign, TextBlob, TextEncoding, Typeface};
