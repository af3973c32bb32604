#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::components::{GameState, Input};
    use crate::game::{GRID_WIDTH, START_HEIGHT};
    use crate::grid::Grid;
    use crate::menu_types::MenuState;
    use crate::shape::Shape;

    #[test]
    fn test_new_app_has_resources_and_an_active_shape() {
        let mut app = App::new();

        assert!(!app.should_quit);
        assert!(app.menu.state == MenuState::MainMenu);

        let grid = app.world.resource::<Grid>();
        assert_eq!(grid.width(), GRID_WIDTH);
        assert_eq!(grid.height(), START_HEIGHT);

        assert!(app.world.get_resource::<GameState>().is_some());
        assert!(app.world.get_resource::<Input>().is_some());

        let mut query = app.world.query::<&Shape>();
        assert_eq!(query.iter(&app.world).count(), 1);
    }

    #[test]
    fn test_reset_rebuilds_the_round_and_keeps_menu_state() {
        let mut app = App::new();
        app.menu.state = MenuState::Game;

        {
            let mut game_state = app.world.resource_mut::<GameState>();
            game_state.score = 1234.0;
            game_state.game_over = true;
        }

        app.reset();

        let game_state = app.world.resource::<GameState>();
        assert_eq!(game_state.score, 0.0);
        assert!(!game_state.game_over);
        assert!(app.menu.state == MenuState::Game);

        // Exactly one fresh shape after the reset
        let mut query = app.world.query::<&Shape>();
        assert_eq!(query.iter(&app.world).count(), 1);
    }
}
