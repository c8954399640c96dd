pub mod canvas;
pub mod renderer;
#[cfg(test)]
pub mod testing;

pub use canvas::PixelCanvas;
pub use renderer::BubbleRenderer;

use bevy::color::Srgba;

/// Fill colour of a bubble that has not been popped yet (#E6E6FF)
pub const UNPOPPED_COLOR: Srgba = Srgba::new(0.902, 0.902, 1.0, 1.0);
/// Outline colour of a bubble (#DDD)
pub const OUTLINE_COLOR: Srgba = Srgba::new(0.867, 0.867, 0.867, 1.0);
/// Width of the bubble outline in surface pixels
pub const OUTLINE_WIDTH: f32 = 2.0;
/// Colour of the shine crescent on an unpopped bubble
pub const SHINE_COLOR: Srgba = Srgba::WHITE;

/// Immediate-mode 2D drawing context.
///
/// Mirrors the small subset of an HTML canvas the game needs: a current fill colour,
/// a current stroke style and a single path built out of arcs. Angles are in radians and
/// grow clockwise on screen, y points down.
pub trait RenderSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Resize the backing store. Existing content is discarded.
    fn resize(&mut self, width: u32, height: u32);

    fn set_fill_color(&mut self, color: Srgba);
    fn set_stroke_style(&mut self, color: Srgba, width: f32);

    /// Fill an axis aligned rectangle with the current fill colour.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Discard the current path.
    fn begin_path(&mut self);

    /// Append an arc to the current path, joined to the previous point by a straight line.
    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32, counter_clockwise: bool);

    /// Fill the current path (implicitly closed) with the current fill colour.
    fn fill(&mut self);

    /// Outline the current path with the current stroke style.
    fn stroke(&mut self);
}
