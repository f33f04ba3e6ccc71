// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint effect families: shaders, color filters, image filters, and path effects.
//!
//! Each family is a closed sum type built through named constructors. Players
//! match on the variants exhaustively; adding a variant is a breaking change
//! that every consumer has to handle.

use alloc::boxed::Box;
use alloc::vec::Vec;

use peniko::color::DynamicColor;
use peniko::{Brush, ColorStop, Gradient};

use crate::geometry::{Point, Rect, Size};
use crate::image::Image;
use crate::matrix::Matrix;
use crate::paint::FilterQuality;
use crate::picture::Picture;
use crate::{BlendMode, Color, Extend};

/// A color at a position along a gradient.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GradientStop {
    /// Position in `0..=1`.
    pub offset: f32,
    /// Color at this position.
    pub color: Color,
}

impl GradientStop {
    /// Create a gradient stop.
    #[inline]
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Kind of procedural noise for [`Shader::PerlinNoise`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NoiseKind {
    /// Fractal sum of noise octaves.
    FractalNoise,
    /// Sum of absolute noise octaves.
    Turbulence,
}

/// Source of color for a paint.
#[derive(Clone, Debug, PartialEq)]
pub enum Shader {
    /// A single solid color.
    Color(Color),
    /// Linear gradient between two points.
    LinearGradient {
        /// Start point.
        start: Point,
        /// End point.
        end: Point,
        /// Color stops in order.
        stops: Vec<GradientStop>,
        /// Behavior outside the gradient's extent.
        mode: Extend,
        /// Optional gradient-space transform.
        local_matrix: Option<Matrix>,
    },
    /// Radial gradient around a center point.
    RadialGradient {
        /// Center point.
        center: Point,
        /// Outer radius.
        radius: f32,
        /// Color stops in order.
        stops: Vec<GradientStop>,
        /// Behavior outside the gradient's extent.
        mode: Extend,
        /// Optional gradient-space transform.
        local_matrix: Option<Matrix>,
    },
    /// Gradient between two circles.
    TwoPointConicalGradient {
        /// Center of the start circle.
        start: Point,
        /// Radius of the start circle.
        start_radius: f32,
        /// Center of the end circle.
        end: Point,
        /// Radius of the end circle.
        end_radius: f32,
        /// Color stops in order.
        stops: Vec<GradientStop>,
        /// Behavior outside the gradient's extent.
        mode: Extend,
        /// Optional gradient-space transform.
        local_matrix: Option<Matrix>,
    },
    /// Angular gradient around a center point. Angles are in degrees.
    SweepGradient {
        /// Center point.
        center: Point,
        /// Start angle, in degrees.
        start_angle: f32,
        /// End angle, in degrees.
        end_angle: f32,
        /// Color stops in order.
        stops: Vec<GradientStop>,
        /// Behavior outside the gradient's extent.
        mode: Extend,
        /// Optional gradient-space transform.
        local_matrix: Option<Matrix>,
    },
    /// A picture repeated as a pattern.
    Picture {
        /// Pattern content.
        picture: Picture,
        /// Horizontal tiling.
        tile_x: Extend,
        /// Vertical tiling.
        tile_y: Extend,
        /// Optional pattern-space transform.
        local_matrix: Option<Matrix>,
        /// Pattern cell in picture coordinates.
        tile: Rect,
    },
    /// Procedural Perlin noise.
    PerlinNoise {
        /// Fractal noise or turbulence.
        kind: NoiseKind,
        /// Base frequency along X.
        base_frequency_x: f32,
        /// Base frequency along Y.
        base_frequency_y: f32,
        /// Number of octaves.
        octaves: u32,
        /// Random seed.
        seed: f32,
        /// Optional stitching tile size.
        tile_size: Option<Size>,
    },
}

impl Shader {
    /// A solid color shader.
    #[inline]
    pub const fn color(color: Color) -> Self {
        Self::Color(color)
    }

    /// A linear gradient shader.
    pub fn linear_gradient(
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
        mode: Extend,
        local_matrix: Option<Matrix>,
    ) -> Self {
        Self::LinearGradient {
            start,
            end,
            stops,
            mode,
            local_matrix,
        }
    }

    /// A radial gradient shader.
    pub fn radial_gradient(
        center: Point,
        radius: f32,
        stops: Vec<GradientStop>,
        mode: Extend,
        local_matrix: Option<Matrix>,
    ) -> Self {
        Self::RadialGradient {
            center,
            radius,
            stops,
            mode,
            local_matrix,
        }
    }

    /// A two-point conical gradient shader.
    pub fn two_point_conical_gradient(
        start: Point,
        start_radius: f32,
        end: Point,
        end_radius: f32,
        stops: Vec<GradientStop>,
        mode: Extend,
        local_matrix: Option<Matrix>,
    ) -> Self {
        Self::TwoPointConicalGradient {
            start,
            start_radius,
            end,
            end_radius,
            stops,
            mode,
            local_matrix,
        }
    }

    /// A sweep gradient shader.
    pub fn sweep_gradient(
        center: Point,
        start_angle: f32,
        end_angle: f32,
        stops: Vec<GradientStop>,
        mode: Extend,
        local_matrix: Option<Matrix>,
    ) -> Self {
        Self::SweepGradient {
            center,
            start_angle,
            end_angle,
            stops,
            mode,
            local_matrix,
        }
    }

    /// A picture pattern shader.
    pub fn picture(
        picture: Picture,
        tile_x: Extend,
        tile_y: Extend,
        local_matrix: Option<Matrix>,
        tile: Rect,
    ) -> Self {
        Self::Picture {
            picture,
            tile_x,
            tile_y,
            local_matrix,
            tile,
        }
    }

    /// A Perlin noise shader.
    pub fn perlin_noise(
        kind: NoiseKind,
        base_frequency_x: f32,
        base_frequency_y: f32,
        octaves: u32,
        seed: f32,
        tile_size: Option<Size>,
    ) -> Self {
        Self::PerlinNoise {
            kind,
            base_frequency_x,
            base_frequency_y,
            octaves,
            seed,
            tile_size,
        }
    }

    /// Convert to a peniko brush, if the shader has a direct brush equivalent.
    ///
    /// Local matrices are not part of a brush; players apply them as a paint
    /// transform. Picture and noise shaders return `None`.
    pub fn to_brush(&self) -> Option<Brush> {
        match self {
            Self::Color(color) => Some(Brush::Solid(*color)),
            Self::LinearGradient {
                start,
                end,
                stops,
                mode,
                ..
            } => Some(Brush::Gradient(
                Gradient::new_linear(start.to_kurbo(), end.to_kurbo())
                    .with_extend(*mode)
                    .with_stops(color_stops(stops).as_slice()),
            )),
            Self::RadialGradient {
                center,
                radius,
                stops,
                mode,
                ..
            } => Some(Brush::Gradient(
                Gradient::new_radial(center.to_kurbo(), *radius)
                    .with_extend(*mode)
                    .with_stops(color_stops(stops).as_slice()),
            )),
            Self::TwoPointConicalGradient {
                start,
                start_radius,
                end,
                end_radius,
                stops,
                mode,
                ..
            } => Some(Brush::Gradient(
                Gradient::new_two_point_radial(
                    start.to_kurbo(),
                    *start_radius,
                    end.to_kurbo(),
                    *end_radius,
                )
                .with_extend(*mode)
                .with_stops(color_stops(stops).as_slice()),
            )),
            Self::SweepGradient {
                center,
                start_angle,
                end_angle,
                stops,
                mode,
                ..
            } => Some(Brush::Gradient(
                Gradient::new_sweep(
                    center.to_kurbo(),
                    start_angle.to_radians(),
                    end_angle.to_radians(),
                )
                .with_extend(*mode)
                .with_stops(color_stops(stops).as_slice()),
            )),
            Self::Picture { .. } | Self::PerlinNoise { .. } => None,
        }
    }
}

fn color_stops(stops: &[GradientStop]) -> Vec<ColorStop> {
    stops
        .iter()
        .map(|stop| ColorStop {
            offset: stop.offset,
            color: DynamicColor::from_alpha_color(stop.color),
        })
        .collect()
}

/// Per-pixel color transformation applied after shading.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorFilter {
    /// Blend a constant color over the source with the given mode.
    Blend {
        /// Constant color.
        color: Color,
        /// Blend mode combining `color` (source) with the drawn pixel (destination).
        mode: BlendMode,
    },
    /// 4x5 row-major color matrix applied to unpremultiplied RGBA.
    ColorMatrix {
        /// Matrix rows for R, G, B, A; the fifth column is a bias.
        matrix: [f32; 20],
    },
    /// Per-channel lookup tables. `None` leaves the channel unchanged.
    Table {
        /// Alpha channel table.
        alpha: Option<Box<[u8; 256]>>,
        /// Red channel table.
        red: Option<Box<[u8; 256]>>,
        /// Green channel table.
        green: Option<Box<[u8; 256]>>,
        /// Blue channel table.
        blue: Option<Box<[u8; 256]>>,
    },
    /// Convert luminance to alpha, zeroing color channels.
    LumaColor,
}

impl ColorFilter {
    /// A constant-color blend filter.
    #[inline]
    pub const fn blend_mode(color: Color, mode: BlendMode) -> Self {
        Self::Blend { color, mode }
    }

    /// A color matrix filter.
    #[inline]
    pub const fn color_matrix(matrix: [f32; 20]) -> Self {
        Self::ColorMatrix { matrix }
    }

    /// A lookup-table filter applying the same table to every channel.
    pub fn table(table: [u8; 256]) -> Self {
        Self::Table {
            alpha: Some(Box::new(table)),
            red: Some(Box::new(table)),
            green: Some(Box::new(table)),
            blue: Some(Box::new(table)),
        }
    }

    /// A lookup-table filter with independent per-channel tables.
    pub fn table_argb(
        alpha: Option<[u8; 256]>,
        red: Option<[u8; 256]>,
        green: Option<[u8; 256]>,
        blue: Option<[u8; 256]>,
    ) -> Self {
        Self::Table {
            alpha: alpha.map(Box::new),
            red: red.map(Box::new),
            green: green.map(Box::new),
            blue: blue.map(Box::new),
        }
    }

    /// A luminance-to-alpha filter.
    #[inline]
    pub const fn luma_color() -> Self {
        Self::LumaColor
    }

    /// Returns `true` if the filter never changes the alpha channel.
    pub fn is_alpha_unchanged(&self) -> bool {
        match self {
            Self::Blend { .. } | Self::LumaColor => false,
            Self::ColorMatrix { matrix } => {
                matrix[15..20] == [0.0, 0.0, 0.0, 1.0, 0.0]
            }
            Self::Table { alpha, .. } => alpha.is_none(),
        }
    }
}

/// Raster filter applied to a layer when it is composited.
///
/// Filters form a tree: most variants take an optional input filter, and
/// `None` means "the layer's own content".
#[derive(Clone, Debug, PartialEq)]
pub enum ImageFilter {
    /// Gaussian blur.
    Blur {
        /// Standard deviation along X.
        sigma_x: f32,
        /// Standard deviation along Y.
        sigma_y: f32,
        /// Input filter.
        input: Option<Box<ImageFilter>>,
        /// Optional crop rectangle.
        crop: Option<Rect>,
    },
    /// Blurred, offset, tinted copy under (or instead of) the content.
    DropShadow {
        /// Offset along X.
        dx: f32,
        /// Offset along Y.
        dy: f32,
        /// Blur standard deviation along X.
        sigma_x: f32,
        /// Blur standard deviation along Y.
        sigma_y: f32,
        /// Shadow color.
        color: Color,
        /// Draw only the shadow, not the content.
        shadow_only: bool,
        /// Input filter.
        input: Option<Box<ImageFilter>>,
        /// Optional crop rectangle.
        crop: Option<Rect>,
    },
    /// Translate the input.
    Offset {
        /// Offset along X.
        dx: f32,
        /// Offset along Y.
        dy: f32,
        /// Input filter.
        input: Option<Box<ImageFilter>>,
        /// Optional crop rectangle.
        crop: Option<Rect>,
    },
    /// Apply a color filter to the input.
    ColorFilter {
        /// Color filter to apply.
        filter: ColorFilter,
        /// Input filter.
        input: Option<Box<ImageFilter>>,
        /// Optional crop rectangle.
        crop: Option<Rect>,
    },
    /// Blend two inputs.
    Blend {
        /// Blend mode.
        mode: BlendMode,
        /// Destination input.
        background: Option<Box<ImageFilter>>,
        /// Source input.
        foreground: Option<Box<ImageFilter>>,
        /// Optional crop rectangle.
        crop: Option<Rect>,
    },
    /// Source-over composite of several inputs in order.
    Merge {
        /// Inputs, bottom to top.
        filters: Vec<ImageFilter>,
        /// Optional crop rectangle.
        crop: Option<Rect>,
    },
    /// `k1 * fg * bg + k2 * fg + k3 * bg + k4` per channel.
    Arithmetic {
        /// Product coefficient.
        k1: f32,
        /// Foreground coefficient.
        k2: f32,
        /// Background coefficient.
        k3: f32,
        /// Constant term.
        k4: f32,
        /// Clamp color channels to alpha.
        enforce_premul: bool,
        /// Background input.
        background: Option<Box<ImageFilter>>,
        /// Foreground input.
        foreground: Option<Box<ImageFilter>>,
        /// Optional crop rectangle.
        crop: Option<Rect>,
    },
    /// Morphological dilation.
    Dilate {
        /// Radius along X.
        radius_x: f32,
        /// Radius along Y.
        radius_y: f32,
        /// Input filter.
        input: Option<Box<ImageFilter>>,
        /// Optional crop rectangle.
        crop: Option<Rect>,
    },
    /// Morphological erosion.
    Erode {
        /// Radius along X.
        radius_x: f32,
        /// Radius along Y.
        radius_y: f32,
        /// Input filter.
        input: Option<Box<ImageFilter>>,
        /// Optional crop rectangle.
        crop: Option<Rect>,
    },
    /// Produce an image, ignoring the layer content.
    Image {
        /// Image to draw.
        image: Image,
        /// Source rectangle in image pixels.
        src: Rect,
        /// Destination rectangle in local coordinates.
        dst: Rect,
        /// Sampling quality.
        quality: FilterQuality,
    },
    /// Produce a picture, ignoring the layer content.
    Picture {
        /// Picture to draw.
        picture: Picture,
        /// Region of the picture to use.
        cull: Rect,
    },
    /// Tile the `src` region of the input across `dst`.
    Tile {
        /// Source tile.
        src: Rect,
        /// Destination region.
        dst: Rect,
        /// Input filter.
        input: Option<Box<ImageFilter>>,
    },
}

impl ImageFilter {
    /// A Gaussian blur.
    pub fn blur(sigma_x: f32, sigma_y: f32, input: Option<Self>) -> Self {
        Self::Blur {
            sigma_x,
            sigma_y,
            input: input.map(Box::new),
            crop: None,
        }
    }

    /// A drop shadow.
    pub fn drop_shadow(
        dx: f32,
        dy: f32,
        sigma_x: f32,
        sigma_y: f32,
        color: Color,
        shadow_only: bool,
        input: Option<Self>,
    ) -> Self {
        Self::DropShadow {
            dx,
            dy,
            sigma_x,
            sigma_y,
            color,
            shadow_only,
            input: input.map(Box::new),
            crop: None,
        }
    }

    /// An offset.
    pub fn offset(dx: f32, dy: f32, input: Option<Self>) -> Self {
        Self::Offset {
            dx,
            dy,
            input: input.map(Box::new),
            crop: None,
        }
    }

    /// A color filter stage.
    pub fn color_filter(filter: ColorFilter, input: Option<Self>) -> Self {
        Self::ColorFilter {
            filter,
            input: input.map(Box::new),
            crop: None,
        }
    }

    /// A two-input blend.
    pub fn blend(mode: BlendMode, background: Option<Self>, foreground: Option<Self>) -> Self {
        Self::Blend {
            mode,
            background: background.map(Box::new),
            foreground: foreground.map(Box::new),
            crop: None,
        }
    }

    /// A merge of several inputs.
    pub fn merge(filters: Vec<Self>) -> Self {
        Self::Merge {
            filters,
            crop: None,
        }
    }

    /// An arithmetic composite.
    pub fn arithmetic(
        k1: f32,
        k2: f32,
        k3: f32,
        k4: f32,
        enforce_premul: bool,
        background: Option<Self>,
        foreground: Option<Self>,
    ) -> Self {
        Self::Arithmetic {
            k1,
            k2,
            k3,
            k4,
            enforce_premul,
            background: background.map(Box::new),
            foreground: foreground.map(Box::new),
            crop: None,
        }
    }

    /// A dilation.
    pub fn dilate(radius_x: f32, radius_y: f32, input: Option<Self>) -> Self {
        Self::Dilate {
            radius_x,
            radius_y,
            input: input.map(Box::new),
            crop: None,
        }
    }

    /// An erosion.
    pub fn erode(radius_x: f32, radius_y: f32, input: Option<Self>) -> Self {
        Self::Erode {
            radius_x,
            radius_y,
            input: input.map(Box::new),
            crop: None,
        }
    }

    /// An image source.
    pub fn image(image: Image, src: Rect, dst: Rect, quality: FilterQuality) -> Self {
        Self::Image {
            image,
            src,
            dst,
            quality,
        }
    }

    /// A picture source.
    pub fn picture(picture: Picture, cull: Rect) -> Self {
        Self::Picture { picture, cull }
    }

    /// A tiling stage.
    pub fn tile(src: Rect, dst: Rect, input: Option<Self>) -> Self {
        Self::Tile {
            src,
            dst,
            input: input.map(Box::new),
        }
    }

    /// Set the crop rectangle, builder style.
    ///
    /// Source and tiling variants have no crop and are returned unchanged.
    #[must_use]
    pub fn with_crop(mut self, rect: Rect) -> Self {
        match &mut self {
            Self::Blur { crop, .. }
            | Self::DropShadow { crop, .. }
            | Self::Offset { crop, .. }
            | Self::ColorFilter { crop, .. }
            | Self::Blend { crop, .. }
            | Self::Merge { crop, .. }
            | Self::Arithmetic { crop, .. }
            | Self::Dilate { crop, .. }
            | Self::Erode { crop, .. } => *crop = Some(rect),
            Self::Image { .. } | Self::Picture { .. } | Self::Tile { .. } => {}
        }
        self
    }

    /// Direct inputs of this filter, in evaluation order.
    ///
    /// `None` inputs (the layer content) are not listed.
    pub fn inputs(&self) -> Vec<&Self> {
        match self {
            Self::Blur { input, .. }
            | Self::DropShadow { input, .. }
            | Self::Offset { input, .. }
            | Self::ColorFilter { input, .. }
            | Self::Dilate { input, .. }
            | Self::Erode { input, .. }
            | Self::Tile { input, .. } => input.as_deref().into_iter().collect(),
            Self::Blend {
                background,
                foreground,
                ..
            }
            | Self::Arithmetic {
                background,
                foreground,
                ..
            } => background
                .as_deref()
                .into_iter()
                .chain(foreground.as_deref())
                .collect(),
            Self::Merge { filters, .. } => filters.iter().collect(),
            Self::Image { .. } | Self::Picture { .. } => Vec::new(),
        }
    }
}

/// How [`PathEffect::Trim`] selects the visible part of a path.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TrimMode {
    /// Keep the segment between `start` and `stop`.
    #[default]
    Normal,
    /// Keep everything except that segment.
    Inverted,
}

/// Geometry transformation applied to a path before it is stroked or filled.
#[derive(Clone, Debug, PartialEq)]
pub enum PathEffect {
    /// Dash pattern of alternating on/off lengths.
    Dash {
        /// On/off lengths. An odd count repeats the list.
        intervals: Vec<f32>,
        /// Offset into the pattern.
        phase: f32,
    },
    /// Round sharp corners with the given radius.
    Corner {
        /// Corner radius.
        radius: f32,
    },
    /// Keep a fraction of the path's length.
    Trim {
        /// Start fraction in `0..=1`.
        start: f32,
        /// Stop fraction in `0..=1`.
        stop: f32,
        /// Which part to keep.
        mode: TrimMode,
    },
}

impl PathEffect {
    /// A dash effect.
    pub fn dash(intervals: impl Into<Vec<f32>>, phase: f32) -> Self {
        Self::Dash {
            intervals: intervals.into(),
            phase,
        }
    }

    /// A corner-rounding effect.
    #[inline]
    pub const fn corner(radius: f32) -> Self {
        Self::Corner { radius }
    }

    /// A trim effect.
    #[inline]
    pub const fn trim(start: f32, stop: f32, mode: TrimMode) -> Self {
        Self::Trim { start, stop, mode }
    }
}
