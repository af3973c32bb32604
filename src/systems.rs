use bevy_ecs::prelude::*;
use log::{debug, info, trace};

use crate::components::{GameState, Input};
use crate::config::CONFIG;
use crate::game::{
    POINTS_COMBO, POINTS_DROP_STEP, POINTS_LANDED, POINTS_SINGLE_ROW, POINTS_SUPER_COMBO,
};
use crate::grid::{ClearTier, Grid};
use crate::shape::{Direction, DropOutcome, Shape, ShapeError, ShapeType};

/// Spawns the next shape at the top of the field. The kind comes from the
/// queued preview (random on the very first call); the following preview is
/// rerolled until it differs from the kind just spawned, so the same piece
/// never arrives twice in a row. Runs the post-construction overlap check
/// and flips the game-over flag when the field has grown into the spawn
/// area.
pub fn spawn_shape(world: &mut World) {
    // A fresh shape must not inherit stale input
    if let Some(mut input) = world.get_resource_mut::<Input>() {
        input.clear();
    }

    let kind = {
        let game_state = world.resource::<GameState>();
        game_state.next_kind.unwrap_or_else(ShapeType::random)
    };

    let shape = {
        let grid = world.resource::<Grid>();
        Shape::new(grid, kind, None)
    };

    {
        let mut upcoming = ShapeType::random();
        while std::ptr::eq(upcoming, kind) {
            upcoming = ShapeType::random();
        }
        let mut game_state = world.resource_mut::<GameState>();
        game_state.next_kind = Some(upcoming);
    }

    // Second phase of the spawn: an overlap here ends the game. The shape
    // still spawns so the colliding piece stays visible on the board.
    let collides = {
        let grid = world.resource::<Grid>();
        shape.spawn_collides(grid)
    };
    if collides {
        info!("{} spawned into occupied tiles, game over", kind.name);
        world.resource_mut::<GameState>().game_over = true;
    }

    debug!("spawned {}", kind.name);
    world.spawn(shape);
}

/// Drains the input flags gathered since the last tick into shape
/// operations: horizontal shifts, rotation, and a soft-drop gravity step.
///
/// # Errors
///
/// Propagates `ShapeError::RotationOutOfBounds` from an unresolvable
/// wall-kick; the caller terminates on it rather than playing on from a
/// broken state.
pub fn input_system(world: &mut World) -> Result<(), ShapeError> {
    let input = {
        let mut input = world.resource_mut::<Input>();
        let snapshot = input.clone();
        input.clear();
        snapshot
    };

    {
        let game_state = world.resource::<GameState>();
        if game_state.game_over || game_state.paused {
            return Ok(());
        }
    }

    let Some(entity) = active_shape(world) else {
        return Ok(());
    };
    let Some(mut grid) = world.remove_resource::<Grid>() else {
        return Ok(());
    };

    let result: Result<Option<DropOutcome>, ShapeError> = (|| {
        let Some(mut shape) = world.get_mut::<Shape>(entity) else {
            return Ok(None);
        };

        if input.left {
            shape.shift(&grid, Direction::Left, 1);
        }
        if input.right {
            shape.shift(&grid, Direction::Right, 1);
        }
        if input.rotate {
            shape.rotate(&grid)?;
        }
        if input.down {
            return Ok(Some(shape.drop(&mut grid)));
        }
        Ok(None)
    })();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) => {
            world.insert_resource(grid);
            return Err(err);
        }
    };

    let landed = match outcome {
        Some(DropOutcome::Stepped) => {
            award(world, &grid, POINTS_DROP_STEP);
            false
        }
        Some(DropOutcome::Landed) => {
            complete_landing(world, &mut grid, entity);
            true
        }
        None => false,
    };

    world.insert_resource(grid);
    if landed {
        spawn_shape(world);
    }
    Ok(())
}

/// Advances the drop timer and applies one gravity step per elapsed tick
/// interval while the game is running.
pub fn game_tick_system(world: &mut World, delta_seconds: f32) {
    trace!("game tick with delta: {delta_seconds}");

    {
        let game_state = world.resource::<GameState>();
        if game_state.game_over || game_state.paused {
            return;
        }
    }

    let should_drop = {
        let tick_interval = CONFIG.read().unwrap().game.tick_interval();
        let mut game_state = world.resource_mut::<GameState>();
        game_state.drop_timer += delta_seconds;

        let should_drop = game_state.drop_timer >= tick_interval;
        if should_drop {
            game_state.drop_timer = 0.0;
        }
        should_drop
    };

    if !should_drop {
        return;
    }

    let Some(entity) = active_shape(world) else {
        debug!("no active shape, spawning a new one");
        spawn_shape(world);
        return;
    };

    let Some(mut grid) = world.remove_resource::<Grid>() else {
        return;
    };

    let outcome = match world.get_mut::<Shape>(entity) {
        Some(mut shape) => shape.drop(&mut grid),
        None => {
            world.insert_resource(grid);
            return;
        }
    };

    let landed = match outcome {
        DropOutcome::Stepped => {
            award(world, &grid, POINTS_DROP_STEP);
            false
        }
        DropOutcome::Landed => {
            complete_landing(world, &mut grid, entity);
            true
        }
    };

    world.insert_resource(grid);
    if landed {
        spawn_shape(world);
    }
}

/// The entity carrying the active shape, if one exists.
fn active_shape(world: &mut World) -> Option<Entity> {
    let mut query = world.query_filtered::<Entity, With<Shape>>();
    query.iter(world).next()
}

fn award(world: &mut World, grid: &Grid, points: f64) {
    let height = grid.height();
    let mut game_state = world.resource_mut::<GameState>();
    game_state.add_score(points, height);
}

/// Scores the landing, scans for complete rows, converts the tier into
/// points and statistics, and retires the landed shape's entity.
fn complete_landing(world: &mut World, grid: &mut Grid, entity: Entity) {
    award(world, grid, POINTS_LANDED);

    let tier = grid.find_complete_rows();
    let height = grid.height();

    #[allow(clippy::cast_precision_loss)]
    let (points, rows) = match tier {
        ClearTier::None => (0.0, 0),
        ClearTier::Single => (POINTS_SINGLE_ROW, 1),
        ClearTier::Combo => (POINTS_COMBO, 2),
        ClearTier::SuperCombo(count) => (POINTS_SUPER_COMBO * count as f64, count as u32),
    };

    if rows > 0 {
        info!("cleared {rows} rows ({tier:?})");
        let mut game_state = world.resource_mut::<GameState>();
        game_state.add_score(points, height);
        game_state.rows_cleared += rows;
        match tier {
            ClearTier::Combo => game_state.combos += 1,
            ClearTier::SuperCombo(_) => game_state.super_combos += 1,
            _ => {}
        }
    }

    world.despawn(entity);
}
