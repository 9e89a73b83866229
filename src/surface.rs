// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::color::ColorU8;
use crate::error::{DrawError, DrawResult};

/// Number of bytes per pixel.
pub const BYTES_PER_PIXEL: usize = 4;

// W * H is capped at 2^28 pixels, i.e. one gigabyte of RGBA.
const MAX_PIXELS: u64 = 1 << 28;

/// A container that owns straight (non-premultiplied) RGBA pixels.
///
/// Channel order is R, G, B, A with the origin at the top-left; rows are
/// contiguous, so the stride is always `4 * width` bytes. The surface is
/// only ever borrowed by a drawing context for the duration of a draw call.
#[derive(Clone, PartialEq)]
pub struct Surface {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Surface {
    /// Allocates a new surface, filled with transparent black.
    ///
    /// Fails with [`DrawError::InvalidSize`] when either dimension is zero
    /// and with [`DrawError::SurfaceTooLarge`] when the area exceeds 2^28
    /// pixels.
    pub fn new(width: u32, height: u32) -> DrawResult<Self> {
        if width == 0 || height == 0 {
            return Err(DrawError::InvalidSize);
        }

        let area = u64::from(width) * u64::from(height);
        if area > MAX_PIXELS {
            return Err(DrawError::SurfaceTooLarge);
        }

        Ok(Surface {
            data: vec![0; area as usize * BYTES_PER_PIXEL],
            width,
            height,
        })
    }

    /// Returns surface's width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns surface's height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the row stride in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Returns the internal data.
    ///
    /// Bytes are ordered as RGBA.
    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Returns the mutable internal data.
    ///
    /// Bytes are ordered as RGBA.
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.data.as_mut_slice()
    }

    /// Returns a slice of pixels.
    pub fn pixels(&self) -> &[ColorU8] {
        bytemuck::cast_slice(self.data())
    }

    /// Returns a mutable slice of pixels.
    pub fn pixels_mut(&mut self) -> &mut [ColorU8] {
        bytemuck::cast_slice_mut(self.data_mut())
    }

    /// Returns a pixel color.
    ///
    /// Returns `None` when the position is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<ColorU8> {
        if x < self.width && y < self.height {
            Some(self.pixels()[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Fills the entire surface with a specified color.
    pub fn fill(&mut self, color: ColorU8) {
        for p in self.pixels_mut() {
            *p = color;
        }
    }

    /// Encodes the surface into PNG data.
    ///
    /// The pixels are written as-is: straight RGBA, 8 bits per channel.
    #[cfg(feature = "png-format")]
    pub fn encode_png(&self) -> Result<Vec<u8>, png::EncodingError> {
        let mut data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut data, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.data)?;
        }

        Ok(data)
    }

    /// Saves the surface as a PNG file.
    #[cfg(feature = "png-format")]
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), png::EncodingError> {
        let data = self.encode_png()?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("data", &"...")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
