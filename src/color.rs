// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/// Fully opaque alpha.
pub const ALPHA_U8_OPAQUE: u8 = 255;

/// Fully transparent alpha.
pub const ALPHA_U8_TRANSPARENT: u8 = 0;

/// A straight (non-premultiplied) RGBA color, one byte per channel.
///
/// The in-memory layout is the surface storage contract itself: R, G, B, A
/// in that order, so a pixel buffer casts directly to a slice of colors on
/// any endianness. RGB carries no alpha scaling; blending applies the
/// alpha weight explicitly.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ColorU8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

unsafe impl bytemuck::Zeroable for ColorU8 {}
unsafe impl bytemuck::Pod for ColorU8 {}

impl ColorU8 {
    /// Transparent black.
    pub const TRANSPARENT: Self = ColorU8 {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Builds a color from its four channels.
    ///
    /// Every `u8` combination is a valid straight color, so nothing is
    /// checked here.
    #[inline]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        ColorU8 { r, g, b, a }
    }

    /// The red channel.
    #[inline]
    pub const fn red(self) -> u8 {
        self.r
    }

    /// The green channel.
    #[inline]
    pub const fn green(self) -> u8 {
        self.g
    }

    /// The blue channel.
    #[inline]
    pub const fn blue(self) -> u8 {
        self.b
    }

    /// The alpha channel.
    #[inline]
    pub const fn alpha(self) -> u8 {
        self.a
    }

    /// Whether alpha is 255.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a == ALPHA_U8_OPAQUE
    }

    /// Scales the RGB channels by alpha.
    ///
    /// Each channel becomes `round(c * a / 255)` with half-away-from-zero
    /// rounding, which keeps every channel at or below the alpha.
    #[inline]
    pub fn premultiply(&self) -> PremultipliedColorU8 {
        PremultipliedColorU8 {
            r: premultiply_u8(self.r, self.a),
            g: premultiply_u8(self.g, self.a),
            b: premultiply_u8(self.b, self.a),
            a: self.a,
        }
    }
}

/// An alpha-scaled RGBA color: each RGB channel is at most its alpha.
///
/// Surfaces never store this form. It exists as a value type for the two
/// conversions and their round-trip law; the blend path works on straight
/// colors only.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PremultipliedColorU8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl PremultipliedColorU8 {
    /// Transparent black.
    pub const TRANSPARENT: Self = PremultipliedColorU8 {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Builds a premultiplied color, checking the channel invariant.
    ///
    /// Returns `None` when any RGB channel exceeds the alpha.
    #[inline]
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Option<Self> {
        if r <= a && g <= a && b <= a {
            Some(PremultipliedColorU8 { r, g, b, a })
        } else {
            None
        }
    }

    /// The red channel, at most the alpha.
    #[inline]
    pub const fn red(self) -> u8 {
        self.r
    }

    /// The green channel, at most the alpha.
    #[inline]
    pub const fn green(self) -> u8 {
        self.g
    }

    /// The blue channel, at most the alpha.
    #[inline]
    pub const fn blue(self) -> u8 {
        self.b
    }

    /// The alpha channel.
    #[inline]
    pub const fn alpha(self) -> u8 {
        self.a
    }

    /// Whether alpha is 255.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a == ALPHA_U8_OPAQUE
    }

    /// Undoes the alpha scaling.
    ///
    /// Each channel becomes `round(c * 255 / a)`, rounding half away from
    /// zero; zero alpha maps to transparent black. At alpha 255 the
    /// division is exact, so no case needs special handling.
    #[inline]
    pub fn demultiply(&self) -> ColorU8 {
        let a = self.a;
        if a == ALPHA_U8_TRANSPARENT {
            return ColorU8::TRANSPARENT;
        }

        ColorU8::from_rgba(
            demultiply_u8(self.r, a),
            demultiply_u8(self.g, a),
            demultiply_u8(self.b, a),
            a,
        )
    }
}

/// Scales one channel by an alpha value: `round(c * a / 255)`, half away
/// from zero.
///
/// `c * a / 255` can never land exactly on .5 (that would need an odd
/// multiple of 255/2), so adding a bias of 127 before the division already
/// yields the correctly rounded quotient in pure integer math.
#[inline]
pub fn premultiply_u8(c: u8, a: u8) -> u8 {
    ((u32::from(c) * u32::from(a) + 127) / 255) as u8
}

// The inverse scaling can tie at .5 (e.g. a = 2), so the rounding mode
// matters here: `f64::round` is exactly the half-away-from-zero the pixel
// contract fixes.
#[inline]
fn demultiply_u8(c: u8, a: u8) -> u8 {
    (f64::from(c) * 255.0 / f64::from(a)).round() as u8
}
