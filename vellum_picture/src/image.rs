// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoded raster images referenced by draw commands and filters.

use alloc::sync::Arc;

use crate::geometry::Rect;
use crate::{ImageAlphaType, ImageFormat};

/// A decoded raster image.
///
/// Pixel data is shared: cloning an image, or recording it into a picture,
/// does not copy the pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel format of the buffer.
    pub format: ImageFormat,
    /// Alpha encoding of the pixels (straight vs premultiplied).
    pub alpha_type: ImageAlphaType,
    /// Tightly packed, row-major pixel data.
    pub data: Arc<[u8]>,
}

impl Image {
    /// Create an RGBA8 image with straight alpha.
    pub fn rgba8(width: u32, height: u32, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            width,
            height,
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::Alpha,
            data: data.into(),
        }
    }

    /// Full image bounds in pixel coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    /// Returns `true` if both images share the same pixel buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}
