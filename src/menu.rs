use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::config::CONFIG;
use crate::menu_types::{Menu, MenuOption, MenuState, OptionsOption};

const TITLE: &str = "G R I D F A L L";

/// Draws the main and options menus. Purely cosmetic state (the title color
/// cycle clock) lives here, away from the game world.
pub struct MenuRenderer {
    started: Instant,
}

impl MenuRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn next_option(&mut self, menu: &mut Menu) {
        match menu.state {
            MenuState::MainMenu => {
                menu.selected_option = match menu.selected_option {
                    MenuOption::NewGame => MenuOption::Options,
                    MenuOption::Options => MenuOption::Quit,
                    MenuOption::Quit => MenuOption::NewGame,
                };
            }
            MenuState::Options => {
                menu.options_selected = match menu.options_selected {
                    OptionsOption::GhostToggle => OptionsOption::ControlsToggle,
                    OptionsOption::ControlsToggle => OptionsOption::Back,
                    OptionsOption::Back => OptionsOption::GhostToggle,
                };
            }
            MenuState::Game => {}
        }
    }

    pub fn prev_option(&mut self, menu: &mut Menu) {
        match menu.state {
            MenuState::MainMenu => {
                menu.selected_option = match menu.selected_option {
                    MenuOption::NewGame => MenuOption::Quit,
                    MenuOption::Options => MenuOption::NewGame,
                    MenuOption::Quit => MenuOption::Options,
                };
            }
            MenuState::Options => {
                menu.options_selected = match menu.options_selected {
                    OptionsOption::GhostToggle => OptionsOption::Back,
                    OptionsOption::ControlsToggle => OptionsOption::GhostToggle,
                    OptionsOption::Back => OptionsOption::ControlsToggle,
                };
            }
            MenuState::Game => {}
        }
    }

    // The title cycles through the configured colors on a fixed clock
    fn title_color(&self) -> Color {
        let config = CONFIG.read().unwrap();
        let colors = &config.ui.title_colors;
        if colors.is_empty() {
            return Color::White;
        }

        let interval = config.ui.title_color_cycle_interval_ms.max(1);
        let elapsed = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let index = (elapsed / interval) as usize % colors.len();
        colors[index].color()
    }

    pub fn render(&self, f: &mut Frame, menu: &Menu) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(3), // Title
                Constraint::Length(2),
                Constraint::Length(8), // Options
                Constraint::Fill(2),
            ])
            .split(f.area());

        let title = Paragraph::new(TITLE)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(self.title_color())
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::NONE));
        f.render_widget(title, layout[1]);

        let lines: Vec<Line> = match menu.state {
            MenuState::Options => {
                let config = CONFIG.read().unwrap();
                let ghost = if config.ui.show_ghost { "on" } else { "off" };
                let controls = if config.ui.show_controls { "on" } else { "off" };
                vec![
                    option_line(
                        &format!("Ghost preview: {ghost}"),
                        menu.options_selected == OptionsOption::GhostToggle,
                    ),
                    option_line(
                        &format!("Controls panel: {controls}"),
                        menu.options_selected == OptionsOption::ControlsToggle,
                    ),
                    option_line("Back", menu.options_selected == OptionsOption::Back),
                ]
            }
            _ => vec![
                option_line("New Game", menu.selected_option == MenuOption::NewGame),
                option_line("Options", menu.selected_option == MenuOption::Options),
                option_line("Quit", menu.selected_option == MenuOption::Quit),
            ],
        };

        let options = Paragraph::new(lines).alignment(Alignment::Center);
        f.render_widget(options, layout[3]);
    }
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn option_line(label: &str, selected: bool) -> Line<'static> {
    if selected {
        Line::from(format!("> {label} <")).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Line::from(label.to_string())
    }
}
