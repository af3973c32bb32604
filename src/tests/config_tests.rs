#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use crate::config::game::GameConfig;
    use crate::config::loader::{load_config_from_file, save_config_to_file};
    use crate::config::ui::UiConfig;
    use crate::config::Config;
    use crate::game::{GRID_WIDTH, START_HEIGHT, TICKS_PER_SEC};

    #[test]
    fn test_defaults_match_game_constants() {
        let game = GameConfig::default();
        assert_eq!(game.width, GRID_WIDTH);
        assert_eq!(game.start_height, START_HEIGHT);
        assert_eq!(game.ticks_per_sec, TICKS_PER_SEC);

        let ui = UiConfig::default();
        assert!(ui.show_ghost);
        assert!(ui.show_controls);
        assert!(!ui.title_colors.is_empty());
    }

    #[test]
    fn test_tick_interval_guards_against_zero_rate() {
        let mut game = GameConfig::default();
        game.ticks_per_sec = 0;
        assert!((game.tick_interval() - 1.0).abs() < f32::EPSILON);

        game.ticks_per_sec = 4;
        assert!((game.tick_interval() - 0.25).abs() < f32::EPSILON);
    }

    // All file-system assertions live in one test: the loader resolves its
    // path through a process-global environment variable.
    #[test]
    fn test_loader_round_trip_through_env_override() {
        let dir = tempdir().expect("temp dir");
        let config_path = dir.path().join("config.toml");

        // Safety: tests touching GRIDFALL_CONFIG are confined to this one
        // test function
        unsafe {
            std::env::set_var("GRIDFALL_CONFIG", &config_path);
        }

        // First load creates the default file on disk
        let loaded = load_config_from_file().expect("create default config");
        assert_eq!(loaded.game.width, GRID_WIDTH);
        assert!(config_path.exists());

        // A hand-edited file is picked up on the next load
        let custom = "\
[game]
width = 12
start_height = 24
ticks_per_sec = 5

[ui]
show_ghost = false
show_controls = true
title_color_cycle_interval_ms = 100
title_colors = []
";
        fs::write(&config_path, custom).expect("write custom config");
        let loaded = load_config_from_file().expect("load custom config");
        assert_eq!(loaded.game.width, 12);
        assert_eq!(loaded.game.start_height, 24);
        assert_eq!(loaded.game.ticks_per_sec, 5);
        assert!(!loaded.ui.show_ghost);

        // Saving writes parseable TOML back out
        let mut config = Config::default();
        config.game.ticks_per_sec = 7;
        save_config_to_file(&config).expect("save config");

        let text = fs::read_to_string(&config_path).expect("read saved config");
        assert!(text.contains("ticks_per_sec = 7"));

        unsafe {
            std::env::remove_var("GRIDFALL_CONFIG");
        }
    }
}
