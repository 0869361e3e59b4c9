//! Software line drawing into an RGBA8 frame buffer.

use crate::geometry::Segment;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);
    pub const RED: Rgba = Rgba([255, 0, 0, 255]);
}

/// Drawing state over a borrowed frame: `width * height * 4` bytes, row-major.
/// The draw color starts out red.
pub struct Raster<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
    color: Rgba,
}

impl<'a> Raster<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert!(frame.len() >= (width as usize) * (height as usize) * 4);
        Self {
            frame,
            width,
            height,
            color: Rgba::RED,
        }
    }

    pub fn clear(&mut self, color: Rgba) {
        for px in self.frame.chunks_exact_mut(4) {
            px.copy_from_slice(&color.0);
        }
    }

    pub fn set_draw_color(&mut self, color: Rgba) {
        self.color = color;
    }

    fn plot(&mut self, x: i32, y: i32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
            self.frame[idx..idx + 4].copy_from_slice(&self.color.0);
        }
    }

    /// Line between two pixel centres, endpoints included. The part outside
    /// the frame is cut off before rasterizing.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.draw_clipped(x0 as f64, y0 as f64, x1 as f64, y1 as f64);
    }

    /// Clips to one pixel beyond every edge, so anything that truncates into
    /// the frame survives and `plot` discards the border.
    fn draw_clipped(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        let bounds = (-1.0, -1.0, self.width as f64, self.height as f64);
        if let Some((x0, y0, x1, y1)) = clip((x0, y0, x1, y1), bounds) {
            self.bresenham(x0 as i32, y0 as i32, x1 as i32, y1 as i32);
        }
    }

    /// Endpoints must already lie within a pixel of the frame.
    fn bresenham(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let (mut x0, mut y0) = (x0, y0);
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.plot(x0, y0);
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

    /// Clipped in real coordinates, then truncated toward zero, not rounded.
    pub fn draw_segment(&mut self, line: &Segment) {
        self.draw_clipped(line.p1.x, line.p1.y, line.p2.x, line.p2.y);
    }

    pub fn draw_segments(&mut self, lines: &[Segment]) {
        for line in lines {
            self.draw_segment(line);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.frame[idx..idx + 4]);
        Some(Rgba(px))
    }
}

type Line4 = (f64, f64, f64, f64);

/// Liang-Barsky against `(min_x, min_y, max_x, max_y)`. `None` when nothing
/// of the line is inside, or when a coordinate is not finite.
fn clip(line: Line4, bounds: Line4) -> Option<Line4> {
    let (x0, y0, x1, y1) = line;
    let (min_x, min_y, max_x, max_y) = bounds;
    if ![x0, y0, x1, y1].iter().all(|c| c.is_finite()) {
        return None;
    }
    let dx = x1 - x0;
    let dy = y1 - y0;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, x0 - min_x),
        (dx, max_x - x0),
        (-dy, y0 - min_y),
        (dy, max_y - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else if r < t0 {
            return None;
        } else {
            t1 = t1.min(r);
        }
    }
    // Untouched endpoints are returned as given so in-frame lines truncate
    // exactly as they would unclipped.
    let (ax, ay) = if t0 > 0.0 { (x0 + t0 * dx, y0 + t0 * dy) } else { (x0, y0) };
    let (bx, by) = if t1 < 1.0 { (x0 + t1 * dx, y0 + t1 * dy) } else { (x1, y1) };
    Some((ax, ay, bx, by))
}
