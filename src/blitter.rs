// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::color::ColorU8;
use crate::composite::{composite_pixel, CompositeMode};
use crate::mask::ClipMask;
use crate::surface::Surface;

/// A span sink for the scanline filler.
///
/// The filler only produces horizontal pixel runs; what a run means is up
/// to the blitter: surface pixels for drawing, stencil bits for clipping.
pub(crate) trait Blitter {
    /// Handles the horizontal run `[x, x + width)` at row `y`.
    ///
    /// The run is guaranteed to be inside the target bounds.
    fn blit_h(&mut self, x: u32, y: u32, width: u32);
}

/// Composites a fixed color into surface pixels, honoring the clip stencil.
pub(crate) struct PixelBlitter<'a> {
    surface: &'a mut Surface,
    clip: Option<&'a ClipMask>,
    red: u8,
    green: u8,
    blue: u8,
    alpha: u8,
    mode: CompositeMode,
}

impl<'a> PixelBlitter<'a> {
    /// `alpha` is the effective source alpha: color alpha scaled by global
    /// alpha and stroke coverage, already rounded.
    pub fn new(
        surface: &'a mut Surface,
        clip: Option<&'a ClipMask>,
        color: ColorU8,
        alpha: u8,
        mode: CompositeMode,
    ) -> Self {
        PixelBlitter {
            surface,
            clip,
            red: color.red(),
            green: color.green(),
            blue: color.blue(),
            alpha,
            mode,
        }
    }
}

impl Blitter for PixelBlitter<'_> {
    fn blit_h(&mut self, x: u32, y: u32, width: u32) {
        let surface_width = self.surface.width();
        let pixels = self.surface.pixels_mut();
        for i in 0..width {
            let px = x + i;
            if let Some(clip) = self.clip {
                if !clip.get(px, y) {
                    continue;
                }
            }

            let index = (y * surface_width + px) as usize;
            pixels[index] = composite_pixel(
                pixels[index],
                self.red,
                self.green,
                self.blue,
                self.alpha,
                self.mode,
            );
        }
    }
}

/// Marks span pixels as visible in a clip stencil.
pub(crate) struct MaskBlitter<'a> {
    mask: &'a mut ClipMask,
}

impl<'a> MaskBlitter<'a> {
    pub fn new(mask: &'a mut ClipMask) -> Self {
        MaskBlitter { mask }
    }
}

impl Blitter for MaskBlitter<'_> {
    fn blit_h(&mut self, x: u32, y: u32, width: u32) {
        for i in 0..width {
            self.mask.set_visible(x + i, y);
        }
    }
}
