// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/// A shorthand for draw-call results.
pub type DrawResult<T> = std::result::Result<T, DrawError>;

/// A fatal argument error.
///
/// Raised by the entry point that receives the bad value; the surface and
/// the drawing state are left unchanged. There is no recovery path inside
/// the renderer and nothing is retried.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DrawError {
    /// A surface or image dimension is zero.
    InvalidSize,
    /// The surface area exceeds 2^28 pixels.
    SurfaceTooLarge,
    /// A coordinate, angle or matrix component is NaN or infinite.
    NonFiniteArgument,
    /// A rectangle has a negative or non-finite extent.
    InvalidRect,
    /// An arc or ellipse radius is negative.
    InvalidRadius,
    /// A global alpha outside `0..=1`.
    InvalidAlpha,
    /// A line width that is not a positive finite number.
    InvalidLineWidth,
    /// A miter limit that is not a positive finite number.
    InvalidMiterLimit,
    /// The current transform cannot be inverted, but the operation
    /// requires per-pixel inverse mapping.
    NonInvertibleTransform,
    /// An image data length does not match its dimensions.
    InvalidImageData,
    /// An image side exceeds the maximum supported dimension.
    ImageTooLarge,
    /// A source rectangle lies outside the image bounds.
    InvalidSourceRect,
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawError::InvalidSize => write!(f, "width and height must be positive"),
            DrawError::SurfaceTooLarge => write!(f, "surface area exceeds 2^28 pixels"),
            DrawError::NonFiniteArgument => write!(f, "argument is NaN or infinite"),
            DrawError::InvalidRect => write!(f, "rectangle has an invalid extent"),
            DrawError::InvalidRadius => write!(f, "radius must be non-negative"),
            DrawError::InvalidAlpha => write!(f, "global alpha must be in 0..=1"),
            DrawError::InvalidLineWidth => write!(f, "line width must be a positive number"),
            DrawError::InvalidMiterLimit => write!(f, "miter limit must be a positive number"),
            DrawError::NonInvertibleTransform => write!(f, "transform is not invertible"),
            DrawError::InvalidImageData => write!(f, "image data length does not match dimensions"),
            DrawError::ImageTooLarge => write!(f, "image side exceeds the maximum dimension"),
            DrawError::InvalidSourceRect => write!(f, "source rectangle is outside the image"),
        }
    }
}

impl std::error::Error for DrawError {}
