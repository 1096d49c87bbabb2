use bevy::prelude::*;
use mp_arena::AppPlugin;

fn main() -> AppExit {
    App::new().add_plugins(AppPlugin).run()
}
