// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/*!
`golden-canvas` is a deterministic, software-only 2D renderer with a
Canvas-style immediate-mode API.

Given identical command sequences, it produces bit-identical pixel buffers
on every platform and build, which makes its output suitable for
golden-image regression testing, server-side rendering and reproducible
screenshots.

Rendering is binary coverage: there is no edge anti-aliasing, no gradients,
no text. Paths are flattened at a fixed tolerance, filled by a scanline
algorithm with non-zero or even-odd winding, clipped by a 1-bit stencil and
composited with straight-alpha `source-over` or `copy`. Strokes are expanded
geometrically into polygons (bodies, joins, caps) and go through the same
filler.

```
use golden_canvas::{Context, Surface};

let mut surface = Surface::new(100, 100).unwrap();
let mut ctx = Context::new(&mut surface);
ctx.set_fill_color(255, 0, 0, 255);
ctx.fill_rect(20.0, 20.0, 60.0, 60.0).unwrap();
```
*/

#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![allow(clippy::approx_constant)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::float_cmp)]
#![allow(clippy::identity_op)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]

mod blitter;
mod canvas;
mod color;
mod composite;
mod error;
mod image;
mod mask;
mod painter;
mod scan;
mod surface;

pub use golden_canvas_path::{
    flatten_path, stroke_outline, LineCap, LineJoin, Path, PathBuilder, PathCommand, Point, Rect,
    Stroke, StrokeOutline, Transform, FLATTEN_TOLERANCE,
};

pub use canvas::Context;
pub use color::{
    premultiply_u8, ColorU8, PremultipliedColorU8, ALPHA_U8_OPAQUE, ALPHA_U8_TRANSPARENT,
};
pub use composite::CompositeMode;
pub use error::{DrawError, DrawResult};
pub use image::{Image, MAX_IMAGE_SIDE};
pub use mask::ClipMask;
pub use scan::FillRule;
pub use surface::{Surface, BYTES_PER_PIXEL};
