use bevy::prelude::*;

use crate::preludes::combat_preludes::*;
use crate::CombatSet;

pub struct PlayerPlugin;
impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app
        .add_systems(Update, fire_input
            .run_if(resource_exists::<ButtonInput<MouseButton>>)
            .in_set(CombatSet::Input)
        );
    }
}

fn fire_input(
    mut commands: Commands,
    input: Res<ButtonInput<MouseButton>>,
    player: Query<Entity, (With<LocalPlayer>, With<Character>)>,
) {
    let Ok(entity) = player.single() else {
        return;
    };

    if input.just_pressed(MouseButton::Left) {
        commands.trigger_targets(FireIntent(FireCommand::Start), entity);
    }
    if input.just_released(MouseButton::Left) {
        commands.trigger_targets(FireIntent(FireCommand::Stop), entity);
    }
}
