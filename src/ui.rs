use crate::app::App;
use crate::components::{GameState, Point};
use crate::config::CONFIG;
use crate::grid::Grid;
use crate::menu_types::MenuState;
use crate::shape::Shape;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render(f: &mut Frame, app: &mut App) {
    if app.menu.state == MenuState::Game {
        render_game(f, app);
    } else {
        app.menu_renderer.render(f, &app.menu);
    }
}

/// Paints one playfield cell (two characters wide) into the board area.
/// Points outside the area are skipped.
pub(crate) fn paint_cell(buf: &mut Buffer, area: Rect, point: Point, color: Color) {
    if point.x < 0 || point.y < 0 {
        return;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (cell_x, cell_y) = (
        area.left().saturating_add(point.x as u16 * 2),
        area.top().saturating_add(point.y as u16),
    );
    if cell_x >= area.right() || cell_y >= area.bottom() {
        return;
    }

    if let Some(cell) = buf.cell_mut((cell_x, cell_y)) {
        cell.set_symbol("█");
        cell.set_fg(color);
        cell.set_bg(Color::Black);
    }

    // Each cell is two characters wide for better proportions
    if cell_x + 1 < area.right() {
        if let Some(cell) = buf.cell_mut((cell_x + 1, cell_y)) {
            cell.set_symbol("█");
            cell.set_fg(color);
            cell.set_bg(Color::Black);
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_game(f: &mut Frame, app: &mut App) {
    // The playfield legitimately changes height during play, so all board
    // sizing starts from the grid's current dimensions.
    let (grid_width, grid_height) = {
        let grid = app.world.resource::<Grid>();
        (grid.width(), grid.height())
    };

    let board_width = grid_width as u16 * 2 + 2; // +2 for borders
    let board_height = grid_height as u16 + 2;
    let min_info_width = 22u16;
    let min_total_width = board_width + min_info_width;
    let min_total_height = board_height + 3;

    if f.area().width < min_total_width || f.area().height < min_total_height {
        let warning = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Gridfall - Paused"),
        );

        let warning_area = centered_rect(50, 30, f.area());
        f.render_widget(warning, warning_area);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Fill(1)])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Title
            Constraint::Length(board_height), // Game board
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(7), // Stats
            Constraint::Length(7), // Next piece preview
            Constraint::Min(5),    // Controls / status
        ])
        .split(main_layout[1]);

    let title = Paragraph::new("GRIDFALL")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_board(f, app, game_layout[1]);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let game_state = app.world.resource::<GameState>();
    let stats = format!(
        "Score: {:.0}\nField height: {}\nRows: {}\nCombos: {}\nSuper combos: {}",
        game_state.score,
        grid_height,
        game_state.rows_cleared,
        game_state.combos,
        game_state.super_combos,
    );
    let next_kind = game_state.next_kind;
    let game_over = game_state.game_over;
    let paused = game_state.paused;

    let stats_widget = Paragraph::new(stats)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    f.render_widget(stats_widget, info_layout[1]);

    if let Some(kind) = next_kind {
        let preview_block = Block::default().borders(Borders::ALL).title("NEXT");
        let preview_area = Rect {
            x: info_layout[2].x,
            y: info_layout[2].y,
            width: 10.min(info_layout[2].width),
            height: 6.min(info_layout[2].height),
        };
        let preview_inner = preview_block.inner(preview_area);
        f.render_widget(preview_block, preview_area);

        for block in kind.blocks(0, Point::new(0, 0)) {
            block.draw(f.buffer_mut(), preview_inner);
        }
    }

    let status = if game_over {
        Paragraph::new("GAME OVER!\nPress Enter to restart")
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
    } else if paused {
        Paragraph::new("PAUSED\nPress Esc to resume")
            .style(Style::default().fg(Color::Yellow))
            .wrap(Wrap { trim: true })
    } else if CONFIG.read().unwrap().ui.show_controls {
        Paragraph::new(
            "Controls:\n\
            ←/→: Move left/right\n\
            ↓: Soft drop\n\
            ↑: Rotate\n\
            Esc: Pause\n\
            Q: Quit\n\
            ",
        )
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: true })
    } else {
        Paragraph::new("")
    };
    f.render_widget(status, info_layout[3]);
}

fn render_board(f: &mut Frame, app: &mut App, area: Rect) {
    let board_block = Block::default().borders(Borders::ALL);
    let inner_area = board_block.inner(area);
    f.render_widget(board_block, area);

    // The ghost preview freezes once the game is over
    let show_ghost = {
        let game_state = app.world.resource::<GameState>();
        !game_state.game_over && CONFIG.read().unwrap().ui.show_ghost
    };

    let shape = {
        let mut query = app.world.query::<&Shape>();
        query.iter(&app.world).next().cloned()
    };

    let grid = app.world.resource::<Grid>();
    grid.for_each(|tile| tile.draw(f.buffer_mut(), inner_area));

    if let Some(shape) = shape {
        shape.draw(grid, f.buffer_mut(), inner_area, show_ghost);
    }

    let game_state = app.world.resource::<GameState>();
    if game_state.game_over {
        let game_over = Paragraph::new("GAME OVER")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let game_over_area = Rect {
            x: inner_area.x + (inner_area.width / 2).saturating_sub(5),
            y: inner_area.y + (inner_area.height / 2),
            width: 10.min(inner_area.width),
            height: 1,
        };

        f.render_widget(game_over, game_over_area);
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
