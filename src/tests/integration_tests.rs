#[cfg(test)]
mod tests {
    use bevy_ecs::prelude::*;

    use crate::components::{GameState, Input, Point};
    use crate::grid::Grid;
    use crate::shape::{J, O, Shape};
    use crate::systems::{game_tick_system, input_system, spawn_shape};
    use crate::tests::test_utils::{count_blocks, create_test_world, fill_row_except};

    #[test]
    fn test_full_game_cycle_scores_and_respawns() {
        let mut world = create_test_world();
        world.resource_mut::<GameState>().next_kind = Some(&J);
        spawn_shape(&mut world);

        let initial_score = world.resource::<GameState>().score;

        // Steer a little, then let gravity run a full piece lifetime
        world.resource_mut::<Input>().left = true;
        input_system(&mut world).unwrap();

        for _ in 0..40 {
            game_tick_system(&mut world, 1.0);
        }

        let final_score = world.resource::<GameState>().score;
        assert!(final_score > initial_score);

        // At least one piece has landed and a fresh one is falling
        {
            let grid = world.resource::<Grid>();
            assert!(count_blocks(grid) >= 4);
        }
        let mut query = world.query::<&Shape>();
        assert_eq!(query.iter(&world).count(), 1);
    }

    #[test]
    fn test_landing_into_a_complete_row_clears_it() {
        let mut world = create_test_world();

        let start_height = {
            let mut grid = world.resource_mut::<Grid>();
            let bottom = grid.height() as i32 - 1;
            // Leave exactly the two columns the O will fill
            fill_row_except(&mut grid, bottom, &[8, 9]);
            grid.height()
        };

        // Drop an O into the gap
        {
            let grid = world.resource::<Grid>();
            let shape = Shape::new(grid, &O, Some(Point::new(8, 0)));
            world.spawn(shape);
        }

        for _ in 0..40 {
            game_tick_system(&mut world, 1.0);
        }

        let game_state = world.resource::<GameState>();
        assert_eq!(game_state.rows_cleared, 1);
        assert_eq!(game_state.combos, 0);
        assert_eq!(game_state.super_combos, 0);

        // A single-row clear deletes the row: the field is shorter now
        let grid = world.resource::<Grid>();
        assert_eq!(grid.height(), start_height - 1);
    }

    #[test]
    fn test_game_over_freezes_play() {
        let mut world = create_test_world();

        // Bury the spawn area so the next piece collides on arrival
        {
            let mut grid = world.resource_mut::<Grid>();
            for y in 0..4 {
                fill_row_except(&mut grid, y, &[]);
            }
        }

        world.resource_mut::<GameState>().next_kind = Some(&J);
        spawn_shape(&mut world);
        assert!(world.resource::<GameState>().game_over);

        // Neither input nor gravity does anything once the game is over
        let origin_before = {
            let mut query = world.query::<&Shape>();
            query.iter(&world).next().unwrap().origin()
        };

        world.resource_mut::<Input>().down = true;
        input_system(&mut world).unwrap();
        game_tick_system(&mut world, 10.0);

        let origin_after = {
            let mut query = world.query::<&Shape>();
            query.iter(&world).next().unwrap().origin()
        };
        assert_eq!(origin_before, origin_after);
    }
}
