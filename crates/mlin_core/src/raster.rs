//! Integer rasterization of lines, rectangles and circles.
//!
//! Every primitive plots pixels one at a time through [`PixelBuffer::set`],
//! so clipping is per pixel and never an error. Coordinates are widened to
//! `i64` internally; pixels whose coordinates do not fit back into `i32` are
//! dropped with the rest of the out-of-bounds pixels.
//!
//! Outlined rectangles draw their corners more than once and filled circles
//! overlap spans near 45 degrees. Both are harmless for solid colors but
//! would double-apply under alpha blending.

use crate::{Color, PixelBuffer};

/// Whether a closed shape is drawn as a solid area or as its boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    Filled,
    #[default]
    Outlined,
}

impl From<bool> for Style {
    fn from(filled: bool) -> Self {
        if filled {
            Style::Filled
        } else {
            Style::Outlined
        }
    }
}

#[inline]
fn plot(buffer: &mut PixelBuffer, x: i64, y: i64, color: Color) {
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        buffer.set(x, y, color);
    }
}

/// Draw a line from (x0, y0) to (x1, y1) inclusive using Bresenham's algorithm.
pub fn draw_line(buffer: &mut PixelBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    line(buffer, x0 as i64, y0 as i64, x1 as i64, y1 as i64, color);
}

fn line(buffer: &mut PixelBuffer, mut x0: i64, mut y0: i64, x1: i64, y1: i64, color: Color) {
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(buffer, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draw a `width` x `height` rectangle with its top-left corner at (x, y).
pub fn draw_rect(
    buffer: &mut PixelBuffer,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    color: Color,
    style: Style,
) {
    let (x, y, w, h) = (x as i64, y as i64, width as i64, height as i64);

    match style {
        Style::Filled => {
            for row in 0..h {
                for col in 0..w {
                    plot(buffer, x + col, y + row, color);
                }
            }
        }
        Style::Outlined => {
            let right = x + w - 1;
            let bottom = y + h - 1;
            line(buffer, x, y, right, y, color); // top
            line(buffer, x, y, x, bottom, color); // left
            line(buffer, x, bottom, right, bottom, color); // bottom
            line(buffer, right, y, right, bottom, color); // right
        }
    }
}

/// Draw a circle of `radius` centred on (cx, cy) using the midpoint algorithm.
///
/// A radius of 0 draws the centre pixel; a negative radius draws nothing.
pub fn draw_circle(
    buffer: &mut PixelBuffer,
    cx: i32,
    cy: i32,
    radius: i32,
    color: Color,
    style: Style,
) {
    let (cx, cy) = (cx as i64, cy as i64);
    let mut x = radius as i64;
    let mut y = 0i64;
    let mut err = 0i64;

    while x >= y {
        match style {
            Style::Filled => {
                for i in (cx - x)..=(cx + x) {
                    plot(buffer, i, cy + y, color);
                    plot(buffer, i, cy - y, color);
                }
                for i in (cx - y)..=(cx + y) {
                    plot(buffer, i, cy + x, color);
                    plot(buffer, i, cy - x, color);
                }
            }
            Style::Outlined => {
                plot(buffer, cx + x, cy + y, color);
                plot(buffer, cx + y, cy + x, color);
                plot(buffer, cx - y, cy + x, color);
                plot(buffer, cx - x, cy + y, color);
                plot(buffer, cx - x, cy - y, color);
                plot(buffer, cx - y, cy - x, color);
                plot(buffer, cx + y, cy - x, color);
                plot(buffer, cx + x, cy - y, color);
            }
        }

        y += 1;
        if err <= 0 {
            err += 2 * y + 1;
        }
        if err > 0 {
            x -= 1;
            err -= 2 * x + 1;
        }
    }
}
