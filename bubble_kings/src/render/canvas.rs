#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]

use std::f32::consts::TAU;

use bevy::color::Srgba;
use bevy::prelude::*;

use crate::render::RenderSurface;

/// Upper bound on the number of segments a single arc is flattened into
const MAX_ARC_SEGMENTS: usize = 256;

/// CPU-side RGBA8 drawing surface.
///
/// Everything is rasterized into a flat byte buffer (4 bytes per pixel, row-major) which
/// the host uploads to a texture every frame. Pixels are sampled at their centres.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    fill_color: Srgba,
    stroke_color: Srgba,
    line_width: f32,
    /// Flattened current path
    path: Vec<Vec2>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; (width * height * 4) as usize],
            fill_color: Srgba::BLACK,
            stroke_color: Srgba::BLACK,
            line_width: 1.0,
            path: Vec::new(),
        }
    }

    /// Raw RGBA bytes, ready to hand to an `Rgba8UnormSrgb` image
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Read back the pixel at (x, y), `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }

    fn put_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Pixel range whose centres may fall inside [min, max], clipped to the canvas
    fn pixel_span(&self, min: Vec2, max: Vec2) -> Option<(i32, i32, i32, i32)> {
        let x0 = (min.x - 0.5).floor().max(0.0) as i32;
        let y0 = (min.y - 0.5).floor().max(0.0) as i32;
        let x1 = ((max.x - 0.5).ceil() as i32).min(self.width as i32 - 1);
        let y1 = ((max.y - 0.5).ceil() as i32).min(self.height as i32 - 1);
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some((x0, y0, x1, y1))
    }

    /// Stamp a filled disc, used to build thick strokes
    fn stamp_disc(&mut self, center: Vec2, radius: f32, rgba: [u8; 4]) {
        let radius_sq = radius * radius;
        let Some((x0, y0, x1, y1)) =
            self.pixel_span(center - Vec2::splat(radius), center + Vec2::splat(radius))
        else {
            return;
        };

        for py in y0..=y1 {
            for px in x0..=x1 {
                let sample = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                if sample.distance_squared(center) <= radius_sq {
                    self.put_pixel(px, py, rgba);
                }
            }
        }
    }
}

impl RenderSurface for PixelCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0u8; (width * height * 4) as usize];
        self.path.clear();
    }

    fn set_fill_color(&mut self, color: Srgba) {
        self.fill_color = color;
    }

    fn set_stroke_style(&mut self, color: Srgba, width: f32) {
        self.stroke_color = color;
        self.line_width = width;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let min = Vec2::new(x, y).min(Vec2::new(x + width, y + height));
        let max = Vec2::new(x, y).max(Vec2::new(x + width, y + height));
        let Some((x0, y0, x1, y1)) = self.pixel_span(min, max) else {
            return;
        };
        let rgba = to_rgba8(self.fill_color);

        for py in y0..=y1 {
            for px in x0..=x1 {
                let sample = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                if sample.cmpge(min).all() && sample.cmplt(max).all() {
                    self.put_pixel(px, py, rgba);
                }
            }
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32, counter_clockwise: bool) {
        let center = Vec2::new(x, y);
        let sweep = arc_sweep(start, end, counter_clockwise);
        let segments = ((sweep.abs() * radius.max(1.0) / 2.0).ceil() as usize).clamp(8, MAX_ARC_SEGMENTS);

        for i in 0..=segments {
            let angle = start + sweep * (i as f32 / segments as f32);
            self.path.push(center + radius * Vec2::new(angle.cos(), angle.sin()));
        }
    }

    fn fill(&mut self) {
        if self.path.len() < 3 {
            return;
        }
        let (min, max) = bounds(&self.path);
        let Some((x0, y0, x1, y1)) = self.pixel_span(min, max) else {
            return;
        };
        let rgba = to_rgba8(self.fill_color);

        for py in y0..=y1 {
            for px in x0..=x1 {
                let sample = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                if winding_number(&self.path, sample) != 0 {
                    self.put_pixel(px, py, rgba);
                }
            }
        }
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let rgba = to_rgba8(self.stroke_color);
        let radius = self.line_width / 2.0;
        let step = radius.max(0.5);
        let path = std::mem::take(&mut self.path);

        // Draw the outline by stamping discs along every segment
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let steps = (a.distance(b) / step).ceil().max(1.0) as usize;
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                self.stamp_disc(a.lerp(b, t), radius, rgba);
            }
        }
        if path.len() == 1 {
            self.stamp_disc(path[0], radius, rgba);
        }

        self.path = path;
    }
}

/// Signed angular distance an arc covers, following canvas rules: a sweep of a full turn
/// or more draws a whole circle, anything else is wrapped into one turn in the requested
/// direction.
fn arc_sweep(start: f32, end: f32, counter_clockwise: bool) -> f32 {
    if counter_clockwise {
        let sweep = start - end;
        if sweep >= TAU { -TAU } else { -sweep.rem_euclid(TAU) }
    } else {
        let sweep = end - start;
        if sweep >= TAU { TAU } else { sweep.rem_euclid(TAU) }
    }
}

fn bounds(points: &[Vec2]) -> (Vec2, Vec2) {
    points.iter().fold(
        (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
        |(min, max), p| (min.min(*p), max.max(*p)),
    )
}

/// Non-zero winding number of `point` against the closed polygon `polygon`
fn winding_number(polygon: &[Vec2], point: Vec2) -> i32 {
    let mut winding = 0;
    for (i, &a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        let side = (b.x - a.x) * (point.y - a.y) - (point.x - a.x) * (b.y - a.y);
        if a.y <= point.y {
            if b.y > point.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding
}

fn to_rgba8(color: Srgba) -> [u8; 4] {
    [
        (color.red * 255.0).clamp(0.0, 255.0) as u8,
        (color.green * 255.0).clamp(0.0, 255.0) as u8,
        (color.blue * 255.0).clamp(0.0, 255.0) as u8,
        (color.alpha * 255.0).clamp(0.0, 255.0) as u8,
    ]
}
