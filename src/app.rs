#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use std::error;

use crate::components::{GameState, Input};
use crate::config::CONFIG;
use crate::grid::Grid;
use crate::menu::MenuRenderer;
use crate::menu_types::Menu;
use crate::systems::spawn_shape;

pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub menu: Menu,
    pub menu_renderer: MenuRenderer,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        let (width, start_height) = {
            let config = CONFIG.read().unwrap();
            (config.game.width, config.game.start_height)
        };

        let mut world = World::new();
        world.insert_resource(Input::default());
        world.insert_resource(GameState::default());
        world.insert_resource(Grid::new(width, start_height));

        let mut app = Self {
            world,
            should_quit: false,
            menu: Menu::new(),
            menu_renderer: MenuRenderer::new(),
        };

        // Queue the first piece
        spawn_shape(&mut app.world);

        app
    }

    /// Rebuilds the playfield and game state for a fresh round, keeping the
    /// menu where it is.
    pub fn reset(&mut self) {
        let (width, start_height) = {
            let config = CONFIG.read().unwrap();
            (config.game.width, config.game.start_height)
        };

        let current_menu_state = self.menu.state.clone();

        self.world.insert_resource(GameState::default());
        self.world.insert_resource(Input::default());
        self.world.insert_resource(Grid::new(width, start_height));

        // Retire any leftover shape entities from the previous round
        let stale: Vec<Entity> = self
            .world
            .query_filtered::<Entity, With<crate::shape::Shape>>()
            .iter(&self.world)
            .collect();
        for entity in stale {
            self.world.despawn(entity);
        }

        self.menu_renderer = MenuRenderer::new();
        self.menu = Menu::new();
        self.menu.state = current_menu_state;

        spawn_shape(&mut self.world);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
