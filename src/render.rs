use std::fmt::Write as _;

use rayon::prelude::*;

use crate::config::Style;
use crate::error::ConfigError;
use crate::grid::Point;
use crate::layout::Layout;
use crate::router::Wire;

/// Parse `#rrggbb` into opaque RGBA.
pub fn parse_hex_color(s: &str) -> Result<[u8; 4], ConfigError> {
    let bad = || ConfigError::Color(s.to_string());
    let hex = s.strip_prefix('#').ok_or_else(bad)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(bad());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
    Ok([channel(0)?, channel(2)?, channel(4)?, 255])
}

/// Pixel position of a cell's centre.
#[inline]
pub fn cell_center(p: Point, cell_size: f32) -> (f32, f32) {
    (
        p.x as f32 * cell_size + cell_size / 2.0,
        p.y as f32 * cell_size + cell_size / 2.0,
    )
}

/// Length in pixels of the polyline through a wire's cell centres.
pub fn path_length(wire: &Wire, cell_size: f32) -> f32 {
    wire.cells()
        .windows(2)
        .map(|pair| {
            let (ax, ay) = cell_center(pair[0], cell_size);
            let (bx, by) = cell_center(pair[1], cell_size);
            (bx - ax).hypot(by - ay)
        })
        .sum()
}

/// SVG path data (`M x y L x y ...`) through a wire's cell centres.
pub fn path_data(wire: &Wire, cell_size: f32) -> String {
    let mut d = String::with_capacity(wire.len() * 12);
    for (i, &p) in wire.cells().iter().enumerate() {
        let (x, y) = cell_center(p, cell_size);
        let cmd = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            d.push(' ');
        }
        let _ = write!(d, "{cmd} {x} {y}");
    }
    d
}

/// Render a layout as a standalone SVG document.
///
/// Each wire is a path whose dash offset starts at its own length and is
/// animated to 0, so the line draws itself in. Endpoint markers sit on the
/// first and last cell.
pub fn render_svg(layout: &Layout, style: &Style) -> String {
    let cs = layout.cell_size;
    let stroke_width = cs / 4.0;
    let r = cs / 3.0;

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = layout.width,
        h = layout.height,
    );
    let _ = write!(
        svg,
        "<style>.animated-path{{animation:draw {ms}ms ease-in-out forwards}}@keyframes draw{{to{{stroke-dashoffset:0}}}}</style>",
        ms = style.draw_ms,
    );
    let _ = write!(
        svg,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        style.background
    );

    for wire in &layout.wires {
        let len = path_length(wire, cs);
        let _ = write!(
            svg,
            r#"<path class="animated-path" d="{d}" fill="none" stroke="{stroke}" stroke-width="{stroke_width}" stroke-dasharray="{len:.2}, {len:.2}" stroke-dashoffset="{len:.2}"/>"#,
            d = path_data(wire, cs),
            stroke = style.stroke,
        );
        for p in [wire.first(), wire.last()] {
            let (cx, cy) = cell_center(p, cs);
            let _ = write!(
                svg,
                r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}" stroke="{}"/>"#,
                style.marker_fill, style.marker_outline,
            );
        }
    }

    svg.push_str("</svg>");
    svg
}

#[derive(Clone, Copy)]
enum Shape {
    Segment { a: (f32, f32), b: (f32, f32) },
    Marker { c: (f32, f32) },
}

#[derive(Clone, Copy)]
struct Palette {
    stroke: [u8; 4],
    fill: [u8; 4],
    outline: [u8; 4],
    background: [u8; 4],
}

#[inline]
fn blend(dst: &mut [u8], src: [u8; 4], alpha: f32) {
    let a = alpha.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    for c in 0..3 {
        dst[c] = (dst[c] as f32 + (src[c] as f32 - dst[c] as f32) * a).round() as u8;
    }
    dst[3] = 255;
}

#[inline]
fn dist_to_segment(px: f32, py: f32, a: (f32, f32), b: (f32, f32)) -> f32 {
    let (vx, vy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = vx * vx + vy * vy;
    let t = if len_sq > 0.0 {
        (((px - a.0) * vx + (py - a.1) * vy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (px - (a.0 + t * vx)).hypot(py - (a.1 + t * vy))
}

/// Rasterize the finished picture (no animation) into RGBA bytes of
/// `floor(width) x floor(height)` pixels.
pub fn render_rgba(layout: &Layout, style: &Style) -> Result<Vec<u8>, ConfigError> {
    let palette = Palette {
        stroke: parse_hex_color(&style.stroke)?,
        fill: parse_hex_color(&style.marker_fill)?,
        outline: parse_hex_color(&style.marker_outline)?,
        background: parse_hex_color(&style.background)?,
    };
    let w = layout.width as usize;
    let h = layout.height as usize;
    let mut rgba = vec![0u8; w * h * 4];
    if w == 0 || h == 0 {
        return Ok(rgba);
    }

    let cs = layout.cell_size;
    let half_width = cs / 8.0;
    let r = cs / 3.0;
    // Furthest any shape paints from its centreline, antialiasing included.
    let reach = r + 1.0;

    // Bucket shapes by the grid rows they can touch, keeping draw order.
    let bucket_rows = layout.rows.max(1);
    let mut buckets: Vec<Vec<Shape>> = vec![Vec::new(); bucket_rows];
    let mut push = |shape: Shape, y0: f32, y1: f32| {
        let lo = ((y0.min(y1) - reach) / cs).floor().max(0.0) as usize;
        let hi = (((y0.max(y1) + reach) / cs).floor() as usize).min(bucket_rows - 1);
        for bucket in buckets.iter_mut().take(hi + 1).skip(lo) {
            bucket.push(shape);
        }
    };
    for wire in &layout.wires {
        for pair in wire.cells().windows(2) {
            let a = cell_center(pair[0], cs);
            let b = cell_center(pair[1], cs);
            push(Shape::Segment { a, b }, a.1, b.1);
        }
        for p in [wire.first(), wire.last()] {
            let c = cell_center(p, cs);
            push(Shape::Marker { c }, c.1, c.1);
        }
    }

    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        let py = y as f32 + 0.5;
        let bucket = &buckets[((py / cs) as usize).min(bucket_rows - 1)];
        for x in 0..w {
            let px = x as f32 + 0.5;
            let out = &mut row[x * 4..x * 4 + 4];
            out.copy_from_slice(&palette.background);
            for shape in bucket {
                match *shape {
                    Shape::Segment { a, b } => {
                        let d = dist_to_segment(px, py, a, b);
                        blend(out, palette.stroke, half_width + 0.5 - d);
                    }
                    Shape::Marker { c } => {
                        let d = (px - c.0).hypot(py - c.1);
                        // 1px outline ring around the filled disc.
                        blend(out, palette.outline, r + 1.0 - d);
                        blend(out, palette.fill, r - d);
                    }
                }
            }
        }
    });

    Ok(rgba)
}
