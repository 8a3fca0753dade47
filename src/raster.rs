use anyhow::{bail, Result};
use image::{Rgb, RgbImage};

/// Integer pixel coordinate. May lie outside the canvas; everything clips.
pub type Point = (i32, i32);

/// Inclusive bounding box `[x0, y0, x1, y1]`.
pub type Bounds = [i32; 4];

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Visit every canvas pixel inside the inclusive box, clipped to the canvas.
fn for_each_in_box(
    canvas: &mut RgbImage,
    bounds: Bounds,
    mut f: impl FnMut(i32, i32) -> bool,
    color: Rgb<u8>,
) {
    let [x0, y0, x1, y1] = bounds;
    let max_x = canvas.width() as i32 - 1;
    let max_y = canvas.height() as i32 - 1;

    for y in y0.max(0)..=y1.min(max_y) {
        for x in x0.max(0)..=x1.min(max_x) {
            if f(x, y) {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Fill the ellipse inscribed in `bounds`.
pub fn fill_ellipse(canvas: &mut RgbImage, bounds: Bounds, color: Rgb<u8>) {
    let [x0, y0, x1, y1] = bounds;
    let rx = (x1 - x0) as f32 / 2.0;
    let ry = (y1 - y0) as f32 / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    let cx = x0 as f32 + rx;
    let cy = y0 as f32 + ry;

    for_each_in_box(
        canvas,
        bounds,
        |x, y| {
            let nx = (x as f32 - cx) / rx;
            let ny = (y as f32 - cy) / ry;
            nx * nx + ny * ny <= 1.0
        },
        color,
    );
}

/// Fill a rectangle with circular corners. `radius` is clamped to half the
/// shorter side, so `radius = width / 2` gives a capsule.
pub fn fill_rounded_rect(canvas: &mut RgbImage, bounds: Bounds, radius: i32, color: Rgb<u8>) {
    let [x0, y0, x1, y1] = bounds;
    if x1 < x0 || y1 < y0 {
        return;
    }
    let r = radius.clamp(0, (x1 - x0).min(y1 - y0) / 2);
    // Corner centres span this inner box; a pixel is inside if it lies within
    // `r` of its nearest point on the inner box.
    let (ix0, ix1) = (x0 + r, x1 - r);
    let (iy0, iy1) = (y0 + r, y1 - r);
    let r2 = (r * r) as i64;

    for_each_in_box(
        canvas,
        bounds,
        |x, y| {
            let dx = (x - x.clamp(ix0, ix1)) as i64;
            let dy = (y - y.clamp(iy0, iy1)) as i64;
            dx * dx + dy * dy <= r2
        },
        color,
    );
}

/// Stroke a horizontal or vertical segment `width` pixels thick.
///
/// The stroke is centred on the segment with `width / 2` pixels before it,
/// so a 2 px vertical line at `x` covers columns `x - 1` and `x`.
pub fn draw_line(
    canvas: &mut RgbImage,
    from: Point,
    to: Point,
    width: i32,
    color: Rgb<u8>,
) -> Result<()> {
    if width <= 0 {
        return Ok(());
    }
    let before = width / 2;
    let after = width - before - 1;

    let bounds = if from.0 == to.0 {
        [from.0 - before, from.1.min(to.1), from.0 + after, from.1.max(to.1)]
    } else if from.1 == to.1 {
        [from.0.min(to.0), from.1 - before, from.0.max(to.0), from.1 + after]
    } else {
        bail!("Only axis-aligned lines are supported: {from:?} -> {to:?}");
    };

    for_each_in_box(canvas, bounds, |_, _| true, color);
    Ok(())
}

/// Fill a convex polygon. Edge pixels are included, so a polygon that
/// collapses to a segment still paints that segment.
pub fn fill_polygon(canvas: &mut RgbImage, points: &[Point], color: Rgb<u8>) -> Result<()> {
    if points.len() < 3 {
        bail!("A polygon needs at least 3 points, got {}", points.len());
    }

    let min_x = points.iter().map(|p| p.0).min().unwrap_or(0);
    let max_x = points.iter().map(|p| p.0).max().unwrap_or(0);
    let min_y = points.iter().map(|p| p.1).min().unwrap_or(0);
    let max_y = points.iter().map(|p| p.1).max().unwrap_or(0);

    for_each_in_box(
        canvas,
        [min_x, min_y, max_x, max_y],
        |x, y| {
            let mut pos = false;
            let mut neg = false;
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                let cross = (b.0 - a.0) as i64 * (y - a.1) as i64
                    - (b.1 - a.1) as i64 * (x - a.0) as i64;
                pos |= cross > 0;
                neg |= cross < 0;
            }
            !(pos && neg)
        },
        color,
    );
    Ok(())
}
