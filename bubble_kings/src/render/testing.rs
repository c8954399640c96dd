use bevy::color::Srgba;

use crate::render::RenderSurface;

/// One call made against a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    SetFill(Srgba),
    SetStroke(Srgba, f32),
    FillRect,
    BeginPath,
    Arc { x: f32, y: f32, radius: f32 },
    Fill,
    Stroke,
}

/// Surface that only records what was asked of it
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn fills(&self) -> usize {
        self.calls.iter().filter(|c| **c == DrawCall::Fill).count()
    }

    pub fn fill_colors(&self) -> Vec<Srgba> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::SetFill(color) => Some(*color),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn set_fill_color(&mut self, color: Srgba) {
        self.calls.push(DrawCall::SetFill(color));
    }

    fn set_stroke_style(&mut self, color: Srgba, width: f32) {
        self.calls.push(DrawCall::SetStroke(color, width));
    }

    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {
        self.calls.push(DrawCall::FillRect);
    }

    fn begin_path(&mut self) {
        self.calls.push(DrawCall::BeginPath);
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, _start: f32, _end: f32, _counter_clockwise: bool) {
        self.calls.push(DrawCall::Arc { x, y, radius });
    }

    fn fill(&mut self) {
        self.calls.push(DrawCall::Fill);
    }

    fn stroke(&mut self) {
        self.calls.push(DrawCall::Stroke);
    }
}
