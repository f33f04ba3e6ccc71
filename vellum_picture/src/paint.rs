// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint: style, stroke geometry, text styling, and the effect chain.

use peniko::{Brush, ImageQuality};

use crate::effects::{ColorFilter, ImageFilter, PathEffect, Shader};
use crate::text::{TextAlign, TextEncoding, Typeface};
use crate::{BlendMode, Color};

/// Line cap style, re-exported from kurbo.
pub type StrokeCap = kurbo::Cap;

/// Line join style, re-exported from kurbo.
pub type StrokeJoin = kurbo::Join;

/// Which geometry a paint covers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaintStyle {
    /// Fill the interior.
    #[default]
    Fill,
    /// Stroke the outline.
    Stroke,
    /// Fill, then stroke.
    StrokeAndFill,
}

/// Image sampling quality.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterQuality {
    /// Nearest-neighbor sampling.
    #[default]
    None,
    /// Bilinear sampling.
    Low,
    /// Bilinear sampling with mipmaps.
    Medium,
    /// Best available sampling.
    High,
}

impl FilterQuality {
    /// Map to the closest peniko image quality, if any.
    ///
    /// [`FilterQuality::None`] has no peniko counterpart; players should
    /// treat it as nearest-neighbor sampling.
    pub fn to_image_quality(self) -> Option<ImageQuality> {
        match self {
            Self::None => None,
            Self::Low => Some(ImageQuality::Low),
            Self::Medium => Some(ImageQuality::Medium),
            Self::High => Some(ImageQuality::High),
        }
    }
}

/// Style and effect state used by draw commands and layers.
///
/// Paints are plain values. Identity-based sharing between scene nodes is
/// expressed by storing paints in an arena and referring to them by handle;
/// recorded commands capture paints by value.
#[derive(Clone, Debug, PartialEq)]
pub struct Paint {
    /// Fill, stroke, or both.
    pub style: PaintStyle,
    /// Antialias edges.
    pub is_antialias: bool,
    /// Stroke width in local units. Zero is a hairline.
    pub stroke_width: f32,
    /// Cap applied to open stroke ends.
    pub stroke_cap: StrokeCap,
    /// Join applied at stroke corners.
    pub stroke_join: StrokeJoin,
    /// Miter length limit, as a multiple of the stroke width.
    pub stroke_miter: f32,
    /// Requested font for text draws.
    pub typeface: Option<Typeface>,
    /// Text size in local units.
    pub text_size: f32,
    /// Text alignment relative to the anchor.
    pub text_align: TextAlign,
    /// Encoding of text passed to text draws.
    pub text_encoding: TextEncoding,
    /// Request LCD subpixel rendering for text.
    pub lcd_render_text: bool,
    /// Request subpixel glyph positioning.
    pub subpixel_text: bool,
    /// Solid color, used when no shader is set and to modulate alpha otherwise.
    pub color: Color,
    /// Optional color source replacing `color`.
    pub shader: Option<Shader>,
    /// Optional per-pixel color transformation.
    pub color_filter: Option<ColorFilter>,
    /// Optional filter applied when the paint composites a layer.
    pub image_filter: Option<ImageFilter>,
    /// Optional geometry effect applied before drawing.
    pub path_effect: Option<PathEffect>,
    /// Blend mode for compositing into the destination.
    pub blend_mode: BlendMode,
    /// Sampling quality for images and image shaders.
    pub filter_quality: FilterQuality,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            style: PaintStyle::Fill,
            is_antialias: false,
            stroke_width: 0.0,
            stroke_cap: StrokeCap::Butt,
            stroke_join: StrokeJoin::Miter,
            stroke_miter: 4.0,
            typeface: None,
            text_size: 12.0,
            text_align: TextAlign::Left,
            text_encoding: TextEncoding::Utf8,
            lcd_render_text: false,
            subpixel_text: false,
            color: Color::BLACK,
            shader: None,
            color_filter: None,
            image_filter: None,
            path_effect: None,
            blend_mode: BlendMode::default(),
            filter_quality: FilterQuality::None,
        }
    }
}

impl Paint {
    /// A default paint: opaque black fill.
    pub fn new() -> Self {
        Self::default()
    }

    /// An antialiased fill with the given color.
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            is_antialias: true,
            ..Self::default()
        }
    }

    /// An antialiased stroke with the given color and width.
    pub fn stroke(color: Color, width: f32) -> Self {
        Self {
            style: PaintStyle::Stroke,
            color,
            stroke_width: width,
            is_antialias: true,
            ..Self::default()
        }
    }

    /// Set the color, builder style.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the shader, builder style.
    #[must_use]
    pub fn with_shader(mut self, shader: Shader) -> Self {
        self.shader = Some(shader);
        self
    }

    /// Set the color filter, builder style.
    #[must_use]
    pub fn with_color_filter(mut self, filter: ColorFilter) -> Self {
        self.color_filter = Some(filter);
        self
    }

    /// Set the image filter, builder style.
    #[must_use]
    pub fn with_image_filter(mut self, filter: ImageFilter) -> Self {
        self.image_filter = Some(filter);
        self
    }

    /// Set the path effect, builder style.
    #[must_use]
    pub fn with_path_effect(mut self, effect: PathEffect) -> Self {
        self.path_effect = Some(effect);
        self
    }

    /// Set the blend mode, builder style.
    #[must_use]
    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = mode;
        self
    }

    /// Returns `true` if the paint fills geometry.
    #[inline]
    pub fn is_fill(&self) -> bool {
        matches!(self.style, PaintStyle::Fill | PaintStyle::StrokeAndFill)
    }

    /// Returns `true` if the paint strokes geometry.
    #[inline]
    pub fn is_stroke(&self) -> bool {
        matches!(self.style, PaintStyle::Stroke | PaintStyle::StrokeAndFill)
    }

    /// The brush a player should use: the shader's brush if it has one,
    /// otherwise the solid color.
    pub fn to_brush(&self) -> Brush {
        self.shader
            .as_ref()
            .and_then(Shader::to_brush)
            .unwrap_or(Brush::Solid(self.color))
    }

    /// Stroke geometry as a kurbo stroke, including a dash path effect if set.
    pub fn to_stroke(&self) -> kurbo::Stroke {
        let stroke = kurbo::Stroke::new(f64::from(self.stroke_width))
            .with_caps(self.stroke_cap)
            .with_join(self.stroke_join)
            .with_miter_limit(f64::from(self.stroke_miter));
        match &self.path_effect {
            Some(PathEffect::Dash { intervals, phase }) => stroke.with_dashes(
                f64::from(*phase),
                intervals.iter().map(|&len| f64::from(len)),
            ),
            Some(PathEffect::Corner { .. } | PathEffect::Trim { .. }) | None => stroke,
        }
    }
}
