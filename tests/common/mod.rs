//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `star_catcher::game::configure_headless` to install gameplay plugins.

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;

use star_catcher::common::tunables::Tunables;

pub fn app_headless() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    // Pin the seed so hazard rolls repeat between runs.
    app.insert_resource(Tunables { rng_seed: Some(11), ..Tunables::default() });

    star_catcher::game::configure_headless(&mut app);
    app
}

/// Boot the app far enough that `OnEnter(Running)` has built the scene.
#[allow(dead_code)]
pub fn app_in_scene() -> App {
    let mut app = app_headless();
    app.update();
    app.update();
    app
}
