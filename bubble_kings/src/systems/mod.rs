#![allow(
    clippy::needless_pass_by_value,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use crate::board::GameBoard;
use crate::bubbles::PlayerId;
use crate::config::GameConfig;
use crate::render::{PixelCanvas, RenderSurface};
use crate::screen::BubbleScreen;
use bevy::{
    asset::RenderAssetUsages,
    prelude::*,
    render::render_resource::{TextureFormat, TextureUsages},
    window::{PrimaryWindow, WindowCloseRequested},
};
use bevy_egui::{EguiContexts, egui};

/// The running game: bubbles, renderers and the canvas they draw on
#[derive(Resource)]
pub struct GameScreen(pub BubbleScreen<PixelCanvas>);

/// Resource to store the texture the canvas is uploaded to
#[derive(Resource)]
pub struct RenderTexture(pub Handle<Image>);

/// Resource to track which player the local clicks are credited to (for UI)
#[derive(Resource, Clone, Copy)]
pub struct SelectedPlayer(pub PlayerId);

/// Window pixels per canvas pixel, copied from the config at startup
#[derive(Resource, Clone, Copy)]
pub struct DisplayFactor(pub f32);

pub fn setup(
    mut commands: Commands,
    mut image_assets: ResMut<Assets<Image>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    config: Res<GameConfig>,
    time: Res<Time>,
) {
    let board = GameBoard::new(config.board).unwrap_or_else(|e| {
        error!("Invalid board options: {}, falling back to the default board", e);
        GameBoard::default()
    });

    let mut screen = BubbleScreen::new(&board, PixelCanvas::new(0, 0), config.player, config.rng());
    let (width, height) = (screen.width(), screen.height());
    let factor = config.display_factor as f32;

    // Size the window to fit the board exactly
    if let Ok(mut window) = windows.single_mut() {
        window.resolution.set(width as f32 * factor, height as f32 * factor);
    }

    let texture_handle = image_assets.add(surface_image(screen.surface()));

    commands.spawn((
        Sprite {
            image: texture_handle.clone(),
            custom_size: Some(Vec2::new(width as f32, height as f32)),
            ..default()
        },
        Transform::from_scale(Vec3::splat(factor)),
    ));
    commands.spawn(Camera2d);

    screen.start(time.elapsed_secs_f64() * 1000.0);

    commands.insert_resource(RenderTexture(texture_handle));
    commands.insert_resource(SelectedPlayer(config.player));
    commands.insert_resource(DisplayFactor(factor));
    commands.insert_resource(GameScreen(screen));
}

/// Build an image holding the current canvas content
fn surface_image(canvas: &PixelCanvas) -> Image {
    let mut image = Image::new_target_texture(
        canvas.width(),
        canvas.height(),
        TextureFormat::Rgba8UnormSrgb,
    );
    image.data = Some(canvas.pixels().to_vec());
    image.asset_usage = RenderAssetUsages::default();
    image.texture_descriptor.usage = TextureUsages::COPY_DST | TextureUsages::TEXTURE_BINDING;
    image
}

/// UI system for the egui player window.
///
/// Does nothing if the egui context cannot be accessed.
pub fn ui_system(mut contexts: EguiContexts, mut selected_player: ResMut<SelectedPlayer>) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Window::new("Player").resizable(false).show(ctx, |ui| {
            ui.label("Pop bubbles as:");
            ui.horizontal(|ui| {
                for player in PlayerId::ALL {
                    let is_selected = selected_player.0 == player;
                    if ui.selectable_label(is_selected, player.name()).clicked() {
                        selected_player.0 = player;
                    }
                }
            });
        });
    }
}

/// Push a new player selection into the pop observer
pub fn sync_selected_player(selected_player: Res<SelectedPlayer>, mut screen: ResMut<GameScreen>) {
    if selected_player.is_changed() && screen.0.player() != selected_player.0 {
        info!("Now popping as {}", selected_player.0);
        screen.0.set_player(selected_player.0);
    }
}

/// Handle mouse clicks: translate the cursor into canvas coordinates and try to pop
pub fn handle_mouse_clicks(
    mut screen: ResMut<GameScreen>,
    display_factor: Res<DisplayFactor>,
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    egui_contexts: Option<EguiContexts>,
) {
    if !mouse_button_input.just_pressed(MouseButton::Left) {
        return;
    }

    // Don't process clicks if egui is consuming the input
    if let Some(mut contexts) = egui_contexts {
        if let Ok(ctx) = contexts.ctx_mut()
            && (ctx.wants_pointer_input() || ctx.is_pointer_over_area())
        {
            return;
        }
    }

    let Ok(window) = windows.single() else {
        return;
    };

    let Some(cursor_position) = window.cursor_position() else {
        return;
    };

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    // Convert screen coordinates to world coordinates
    let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, cursor_position) else {
        return;
    };

    let Some(point) = world_to_surface(
        world_pos,
        screen.0.width(),
        screen.0.height(),
        display_factor.0,
    ) else {
        return;
    };

    let popped = screen.0.click(point);
    debug!("Click at {} popped {} bubble(s)", point, popped.len());
}

/// Map a world position onto the canvas sprite centred at the origin.
///
/// World y grows upwards, canvas y grows downwards. Returns `None` outside the canvas.
pub fn world_to_surface(world_pos: Vec2, width: u32, height: u32, factor: f32) -> Option<Vec2> {
    let (width, height) = (width as f32, height as f32);
    let x = world_pos.x / factor + width / 2.0;
    let y = height / 2.0 - world_pos.y / factor;

    if x < 0.0 || y < 0.0 || x >= width || y >= height {
        return None;
    }
    Some(Vec2::new(x, y))
}

/// Frame callback: advance the screen and upload the canvas if anything was rendered
pub fn render_frame(
    time: Res<Time>,
    mut screen: ResMut<GameScreen>,
    mut images: ResMut<Assets<Image>>,
    render_texture: Res<RenderTexture>,
) {
    if !screen.0.on_frame(time.elapsed_secs_f64() * 1000.0) {
        return;
    }

    // get_mut marks the image as modified, which re-uploads it
    if let Some(image) = images.get_mut(&render_texture.0) {
        image.data = Some(screen.0.surface().pixels().to_vec());
    }
}

/// Stop the frame loop when the window is closed
pub fn stop_on_close(mut close_events: MessageReader<WindowCloseRequested>, screen: Res<GameScreen>) {
    if close_events.read().next().is_some() && screen.0.is_running() {
        screen.0.stop();
    }
}
