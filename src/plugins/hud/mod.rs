//! HUD plugin: the score line in the top-left corner.

use bevy::prelude::*;

use crate::common::state::GameState;

#[derive(Component)]
pub struct ScoreText;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::Running), spawn_score_text);
}

fn spawn_score_text(mut commands: Commands) {
    commands.spawn((
        Name::new("ScoreText"),
        ScoreText,
        Text::new("Score: 0"),
        TextFont { font_size: 32.0, ..default() },
        TextColor(Color::BLACK),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            top: Val::Px(16.0),
            ..default()
        },
    ));
}
