//! Pop a grid of bubbles, each one bursting into a splat in the popper's color.

use bevy::prelude::*;
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};
use bubble_kings::{
    BACKGROUND_COLOR, CONFIG_PATH, DISPLAY_FACTOR, SIZE, WINDOW_TITLE, config::GameConfig, systems,
};

fn main() {
    let mut app = App::new();
    app.insert_resource(ClearColor(BACKGROUND_COLOR)).add_plugins((
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: WINDOW_TITLE.into(),
                    resolution: (SIZE * DISPLAY_FACTOR).into(),
                    resizable: false,
                    ..default()
                }),
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
        EguiPlugin::default(),
    ));

    // Loaded after the plugins so the log output is not lost
    app.insert_resource(GameConfig::load(CONFIG_PATH))
        .add_systems(Startup, systems::setup)
        .add_systems(EguiPrimaryContextPass, systems::ui_system)
        .add_systems(
            Update,
            (
                systems::sync_selected_player,
                systems::handle_mouse_clicks,
                systems::render_frame,
                systems::stop_on_close,
            )
                .chain(), // Clicks land before the frame that draws their splat
        )
        .run();
}
