pub mod board;
pub mod bubbles;
pub mod config;
pub mod particles;
pub mod render;
pub mod screen;
pub mod systems;

pub const DISPLAY_FACTOR: u32 = 2;
/// Window size before the board resizes it, the default 5x6 board at radius 25
pub const SIZE: bevy::math::UVec2 = bevy::math::UVec2::new(300, 250);
pub const CONFIG_PATH: &str = "bubble_kings.json";
pub const WINDOW_TITLE: &str = "Bubble Kings";
/// #EEF, shows around the board while the window catches up with its size
pub const BACKGROUND_COLOR: bevy::color::Color = bevy::color::Color::srgb(0.933, 0.933, 1.0);
