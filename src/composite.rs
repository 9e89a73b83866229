// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::color::{ColorU8, ALPHA_U8_OPAQUE, ALPHA_U8_TRANSPARENT};

/// A composition mode.
///
/// These two are the whole contract. Surfaces store straight alpha, and
/// `SourceOver` uses the straight-alpha formula; the premultiplied blend
/// produces different pixel values at partial alpha and must not be
/// reintroduced.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum CompositeMode {
    /// The source is layered over the destination, weighted by the source
    /// alpha. The default.
    SourceOver,
    /// The source replaces the destination, including its alpha.
    Copy,
}

impl Default for CompositeMode {
    #[inline]
    fn default() -> Self {
        CompositeMode::SourceOver
    }
}

/// Composites a source color over one destination pixel.
///
/// `alpha` is the effective source alpha: the color's own alpha already
/// scaled by the global alpha (and the sub-pixel stroke coverage, when
/// stroking). All arithmetic rounds half away from zero.
#[inline]
pub(crate) fn composite_pixel(
    dst: ColorU8,
    red: u8,
    green: u8,
    blue: u8,
    alpha: u8,
    mode: CompositeMode,
) -> ColorU8 {
    match mode {
        CompositeMode::Copy => ColorU8::from_rgba(red, green, blue, alpha),
        CompositeMode::SourceOver => {
            if alpha == ALPHA_U8_TRANSPARENT {
                return dst;
            }
            if alpha == ALPHA_U8_OPAQUE {
                return ColorU8::from_rgba(red, green, blue, ALPHA_U8_OPAQUE);
            }

            let sa = f64::from(alpha) / 255.0;
            let da = 1.0 - sa;
            ColorU8::from_rgba(
                blend_channel(red, dst.red(), sa, da),
                blend_channel(green, dst.green(), sa, da),
                blend_channel(blue, dst.blue(), sa, da),
                (f64::from(alpha) + f64::from(dst.alpha()) * da).round() as u8,
            )
        }
    }
}

#[inline]
fn blend_channel(src: u8, dst: u8, sa: f64, da: f64) -> u8 {
    (f64::from(src) * sa + f64::from(dst) * da).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_over_opaque_ignores_destination() {
        let dst = ColorU8::from_rgba(1, 2, 3, 4);
        let out = composite_pixel(dst, 200, 100, 50, 255, CompositeMode::SourceOver);
        assert_eq!(out, ColorU8::from_rgba(200, 100, 50, 255));
    }

    #[test]
    fn source_over_transparent_is_a_no_op() {
        let dst = ColorU8::from_rgba(1, 2, 3, 4);
        let out = composite_pixel(dst, 200, 100, 50, 0, CompositeMode::SourceOver);
        assert_eq!(out, dst);
    }

    #[test]
    fn source_over_half_alpha_over_white() {
        // Black at alpha 128 over opaque white: 255 * 127/255 = 127.
        let dst = ColorU8::from_rgba(255, 255, 255, 255);
        let out = composite_pixel(dst, 0, 0, 0, 128, CompositeMode::SourceOver);
        assert_eq!(out, ColorU8::from_rgba(127, 127, 127, 255));
    }

    #[test]
    fn copy_replaces_everything() {
        let dst = ColorU8::from_rgba(9, 9, 9, 9);
        let out = composite_pixel(dst, 255, 0, 0, 128, CompositeMode::Copy);
        assert_eq!(out, ColorU8::from_rgba(255, 0, 0, 128));

        // Copy writes even a fully transparent source.
        let out = composite_pixel(dst, 0, 0, 0, 0, CompositeMode::Copy);
        assert_eq!(out, ColorU8::TRANSPARENT);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // src=1, dst=0, sa=128/255: 1*128/255 = 0.50196 -> 1.
        let out = composite_pixel(ColorU8::TRANSPARENT, 1, 0, 0, 128, CompositeMode::SourceOver);
        assert_eq!(out.red(), 1);
    }
}
