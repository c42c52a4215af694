use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::projection::GridProjection;
use crate::game::{GameState, SessionState};
use crate::metrics::GameMetrics;

/// What occupies one projected grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Empty,
    Food,
    Body,
    Head,
}

impl Tile {
    fn span(self) -> Span<'static> {
        match self {
            Tile::Head => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Tile::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
            Tile::Food => Span::styled(
                "◆ ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Tile::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        show_help: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with basic stats
        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        // Render game grid or game over screen
        if state.is_game_over() {
            let game_over = self.render_game_over(state, metrics);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(state);
            frame.render_widget(grid, game_area);
        }

        // Render footer with controls
        let controls = self.render_controls(state.session_state());
        frame.render_widget(controls, chunks[2]);

        if show_help {
            let area = centered(game_area, 60, 70);
            frame.render_widget(Clear, area);
            frame.render_widget(self.render_help(), area);
        }
    }

    fn tiles(&self, state: &GameState) -> Vec<Vec<Tile>> {
        let projection = GridProjection::new(state.board());
        let side = projection.side();
        let mut tiles = vec![vec![Tile::Empty; side]; side];

        let mut stamp = |cell, tile| {
            if let Some((col, row)) = projection.project(cell) {
                tiles[row][col] = tile;
            }
        };

        stamp(state.food_position(), Tile::Food);
        for &segment in state.snake().body_segments() {
            stamp(segment, Tile::Body);
        }
        stamp(state.head(), Tile::Head);

        tiles
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let lines: Vec<Line> = self
            .tiles(state)
            .into_iter()
            .map(|row| Line::from(row.into_iter().map(Tile::span).collect::<Vec<_>>()))
            .collect();

        let title = match state.session_state() {
            SessionState::Idle => " Snake - press Enter to start ",
            SessionState::Paused => " Snake - paused ",
            _ => " Snake ",
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(state.length().to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", state.tick_interval().as_millis()), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled(state.session_state().as_str(), Style::default().fg(Color::Cyan)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Length: ", Style::default().fg(Color::Yellow)),
                Span::styled(state.length().to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(Color::Gray)),
                Span::styled(metrics.games_played.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to reset or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, session: SessionState) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let mut spans = vec![
            Span::styled("↑↓←→", key),
            Span::raw(" or "),
            Span::styled("WASD", key),
            Span::raw(" to move | "),
        ];

        if session == SessionState::Idle {
            spans.extend([Span::styled("Enter", key), Span::raw(" to start | ")]);
        } else {
            spans.extend([Span::styled("Space", key), Span::raw(" to pause | ")]);
        }

        spans.extend([
            Span::styled("H", key),
            Span::raw(" for help | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_help(&self) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let row = |keys: &'static str, what: &'static str| {
            Line::from(vec![Span::styled(format!("{keys:>12}  "), key), Span::raw(what)])
        };

        let text = vec![
            Line::from(""),
            Line::from("Steer the snake onto the food. Each bite is worth 10 points,"),
            Line::from("adds a segment and makes the snake a little faster."),
            Line::from("Hitting the wall or your own body ends the game."),
            Line::from(""),
            row("Arrows/WASD", "turn"),
            row("Enter", "start"),
            row("Space/P", "pause or resume"),
            row("R", "reset"),
            row("H/F1", "close this help"),
            row("Q/Esc", "quit"),
        ];

        Paragraph::new(text).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" How to play "),
        )
    }
}

/// A rectangle of `percent_x` by `percent_y` centred in `area`
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Cell, Direction, Snake};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn sample_state() -> GameState {
        GameState::new(
            Snake::new(Cell::new(0, 0), Direction::Right, 4),
            Cell::new(2, -1),
            Board::new(12),
            Duration::from_millis(450),
        )
    }

    #[test]
    fn test_tiles_follow_cells() {
        let renderer = Renderer::new();
        let tiles = renderer.tiles(&sample_state());

        assert_eq!(tiles.len(), 11);
        assert_eq!(tiles[5][5], Tile::Head);
        assert_eq!(tiles[5][4], Tile::Body);
        assert_eq!(tiles[5][2], Tile::Body);
        assert_eq!(tiles[5][1], Tile::Empty);
        assert_eq!(tiles[4][7], Tile::Food);

        let bodies = tiles.iter().flatten().filter(|&&t| t == Tile::Body).count();
        assert_eq!(bodies, 3);
    }

    #[test]
    fn test_render_draws_hud() {
        let renderer = Renderer::new();
        let state = sample_state();
        let metrics = GameMetrics::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();

        terminal
            .draw(|frame| renderer.render(frame, &state, &metrics, false))
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Score:"));
        assert!(screen.contains("450ms"));
        assert!(screen.contains("Enter"));
    }

    #[test]
    fn test_render_help_overlay() {
        let renderer = Renderer::new();
        let state = sample_state();
        let metrics = GameMetrics::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal
            .draw(|frame| renderer.render(frame, &state, &metrics, true))
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("How to play"));
    }
}
