#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gridfall::Time;
use gridfall::app::{App, AppResult};
use gridfall::components::{GameState, Input};
use gridfall::config::{self, CONFIG};
use gridfall::menu_types::{MenuOption, MenuState, OptionsOption};
use gridfall::{systems, ui};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it so panics and log output
    // don't tear up the alternate screen
    let log_path = "gridfall.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let stderr_handle = io::stderr();
    let stderr_fd = stderr_handle.as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: redirecting stderr to the log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("starting gridfall");

    // Initialize configuration system before the app reads it
    if config::Config::force_reload() {
        info!("configuration loaded");
    } else {
        error!("failed to load configuration, continuing with defaults");
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let render_rate = Duration::from_millis(33); // ~30 FPS
    let game_rate = Duration::from_millis(50); // Game systems update less often

    let app = App::new();
    let res = run_app(&mut terminal, app, render_rate, game_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("game error: {err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    render_rate: Duration,
    game_rate: Duration,
) -> AppResult<()> {
    let mut last_render = Instant::now();
    let mut last_game_tick = Instant::now();

    app.world.insert_resource(Time::new());

    // Flush any pending input events that might be in the buffer
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    debug!("resources initialized");

    loop {
        // Draw the UI
        if last_render.elapsed() >= render_rate {
            terminal.draw(|f| ui::render(f, &mut app))?;
            last_render = Instant::now();
        }

        // Run game systems
        if last_game_tick.elapsed() >= game_rate {
            let delta_seconds = last_game_tick.elapsed().as_secs_f32();
            last_game_tick = Instant::now();

            {
                let mut time = app.world.resource_mut::<Time>();
                time.update();
            }

            if app.should_quit {
                return Ok(());
            }

            if app.menu.state == MenuState::Game {
                // An unresolvable rotation is a broken game state; bail out
                // loudly instead of playing on
                systems::input_system(&mut app.world)?;
                systems::game_tick_system(&mut app.world, delta_seconds);
            }
        }

        // Process keyboard input
        if event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                debug!("key event: {key:?}");

                if key.kind == KeyEventKind::Release {
                    continue;
                }

                // Allow quitting with 'q' regardless of game state
                if key.code == KeyCode::Char('q') {
                    app.should_quit = true;
                    continue;
                }

                // Menu navigation when not in game
                if app.menu.state != MenuState::Game {
                    match key.code {
                        KeyCode::Up | KeyCode::Char('w') => {
                            app.menu_renderer.prev_option(&mut app.menu);
                        }
                        KeyCode::Down | KeyCode::Char('s') => {
                            app.menu_renderer.next_option(&mut app.menu);
                        }
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            handle_menu_select(&mut app);
                        }
                        KeyCode::Esc => {
                            if app.menu.state == MenuState::Options {
                                app.menu.state = MenuState::MainMenu;
                            }
                        }
                        _ => {}
                    }
                    continue;
                }

                let is_game_over = app.world.resource::<GameState>().game_over;

                if is_game_over && key.code == KeyCode::Enter {
                    app.reset();
                    continue;
                }

                if key.code == KeyCode::Esc {
                    let mut game_state = app.world.resource_mut::<GameState>();
                    if !game_state.game_over {
                        game_state.paused = !game_state.paused;
                        info!("paused: {}", game_state.paused);
                    }
                } else if !is_game_over {
                    // Held keys repeat through the terminal's own key repeat
                    // for movement and soft drop; rotation is one step per
                    // press
                    let mut input = app.world.resource_mut::<Input>();
                    match key.code {
                        KeyCode::Left | KeyCode::Char('a') => input.left = true,
                        KeyCode::Right | KeyCode::Char('d') => input.right = true,
                        KeyCode::Down | KeyCode::Char('s') => input.down = true,
                        KeyCode::Up | KeyCode::Char('w') => {
                            if key.kind == KeyEventKind::Press {
                                input.rotate = true;
                            }
                        }
                        _ => {}
                    }
                }

                let mut game_state = app.world.resource_mut::<GameState>();
                game_state.last_key = Some(key);
            }
        }
    }
}

fn handle_menu_select(app: &mut App) {
    match app.menu.state {
        MenuState::MainMenu => match app.menu.selected_option {
            MenuOption::NewGame => {
                app.menu.state = MenuState::Game;
                app.reset();
            }
            MenuOption::Options => app.menu.state = MenuState::Options,
            MenuOption::Quit => app.should_quit = true,
        },
        MenuState::Options => match app.menu.options_selected {
            OptionsOption::GhostToggle => {
                let mut config = CONFIG.write().unwrap();
                config.ui.show_ghost = !config.ui.show_ghost;
            }
            OptionsOption::ControlsToggle => {
                let mut config = CONFIG.write().unwrap();
                config.ui.show_controls = !config.ui.show_controls;
            }
            OptionsOption::Back => app.menu.state = MenuState::MainMenu,
        },
        MenuState::Game => {}
    }
}
