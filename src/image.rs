// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::error::{DrawError, DrawResult};
use crate::surface::BYTES_PER_PIXEL;

/// The maximum width/height of an [`Image`].
pub const MAX_IMAGE_SIDE: u32 = 16384;

/// An externally supplied pixel block, normalized to straight RGBA.
///
/// Accepts RGB (alpha assumed 255) or RGBA input; any other data length for
/// the given dimensions is a fatal argument error.
#[derive(Clone, PartialEq)]
pub struct Image {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Image {
    /// Creates an image from straight RGBA data.
    ///
    /// The data length must be exactly `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> DrawResult<Self> {
        Image::check_dimensions(width, height)?;
        if data.len() != width as usize * height as usize * BYTES_PER_PIXEL {
            return Err(DrawError::InvalidImageData);
        }

        Ok(Image {
            data,
            width,
            height,
        })
    }

    /// Creates an image from RGB data, expanding alpha to 255.
    ///
    /// The data length must be exactly `width * height * 3`.
    pub fn from_rgb(width: u32, height: u32, data: &[u8]) -> DrawResult<Self> {
        Image::check_dimensions(width, height)?;
        if data.len() != width as usize * height as usize * 3 {
            return Err(DrawError::InvalidImageData);
        }

        let mut rgba = Vec::with_capacity(width as usize * height as usize * BYTES_PER_PIXEL);
        for rgb in data.chunks(3) {
            rgba.push(rgb[0]);
            rgba.push(rgb[1]);
            rgba.push(rgb[2]);
            rgba.push(255);
        }

        Ok(Image {
            data: rgba,
            width,
            height,
        })
    }

    fn check_dimensions(width: u32, height: u32) -> DrawResult<()> {
        if width == 0 || height == 0 {
            return Err(DrawError::InvalidSize);
        }
        if width > MAX_IMAGE_SIDE || height > MAX_IMAGE_SIDE {
            return Err(DrawError::ImageTooLarge);
        }
        Ok(())
    }

    /// Returns image's width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns image's height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the normalized RGBA data.
    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Returns the RGBA channels of a pixel. Must be in bounds.
    #[inline]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> &[u8; 4] {
        debug_assert!(x < self.width && y < self.height);
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        arrayref::array_ref![self.data, offset, BYTES_PER_PIXEL]
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("data", &"...")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
