//! Stateless UI rendering for Quantik.

use crate::app::App;
use quantik_client::{Cell, Color as Side, Mode, Move, Orchestrator, StatusState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

const CELL_WIDTH: usize = 5;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(12),   // Board and side panels
            Constraint::Length(3), // Status
            Constraint::Length(2), // Key help
        ])
        .split(frame.area());

    let title = Paragraph::new("Quantik")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(44)])
        .split(chunks[1]);

    let orchestrator = app.session().orchestrator();
    draw_board(frame, body[0], app);
    draw_sidebar(frame, body[1], orchestrator);
    draw_status(frame, chunks[2], app);
    draw_help(frame, chunks[3], orchestrator.mode());
}

fn side_style(side: Side) -> Style {
    let fg = match side {
        Side::Blue => Color::Blue,
        Side::Red => Color::Red,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let orchestrator = app.session().orchestrator();
    let size = app.board_size();
    let half = size / 2;
    let enabled = orchestrator.gate().cells_enabled() && !app.session().is_restarting();

    let mut lines = Vec::new();
    for y in 0..size {
        if y == half && y > 0 {
            lines.push(separator_line(size));
        }
        let mut spans = Vec::new();
        for x in 0..size {
            if x == half && x > 0 {
                spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
            }
            let cell = Cell::new(x, y);
            let (label, base) = match orchestrator.surface().get(cell) {
                Some(placed) => (placed.pawn.to_string(), side_style(placed.color)),
                None if enabled => ("·".to_string(), Style::default().fg(Color::Gray)),
                None => ("·".to_string(), Style::default().fg(Color::DarkGray)),
            };
            let style = if cell == app.cursor() {
                base.bg(Color::White).fg(Color::Black)
            } else {
                base
            };
            spans.push(Span::styled(format!("{:^width$}", label, width = CELL_WIDTH), style));
        }
        lines.push(Line::from(spans));
    }

    let block = Block::default().title("Board").borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

fn separator_line(size: u32) -> Line<'static> {
    let width = size as usize * CELL_WIDTH + 1;
    Line::styled("─".repeat(width), Style::default().fg(Color::DarkGray))
}

fn draw_sidebar(frame: &mut Frame, area: Rect, orchestrator: &Orchestrator) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Inventory
            Constraint::Length(6), // Mode
            Constraint::Min(0),    // Panels
        ])
        .split(area);

    draw_inventory(frame, rows[0], orchestrator);
    draw_mode(frame, rows[1], orchestrator);
    if orchestrator.panels_visible() {
        draw_panels(frame, rows[2], orchestrator);
    }
}

fn draw_inventory(frame: &mut Frame, area: Rect, orchestrator: &Orchestrator) {
    let inventory = orchestrator.inventory();
    let selected = orchestrator.selected().map(|entry| entry.slot);
    let base = side_style(inventory.color());

    let spans: Vec<Span> = inventory
        .entries()
        .iter()
        .map(|entry| {
            let style = if Some(entry.slot) == selected {
                base.add_modifier(Modifier::REVERSED)
            } else {
                base
            };
            Span::styled(format!(" {} ", entry.pawn), style)
        })
        .collect();

    let title = format!("Your pawns ({})", inventory.color());
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().title(title).borders(Borders::ALL)),
        area,
    );
}

fn draw_mode(frame: &mut Frame, area: Rect, orchestrator: &Orchestrator) {
    let mode = orchestrator.mode();
    let mut lines = vec![Line::styled(
        mode.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if mode == Mode::Analysis {
        lines.push(Line::from(vec![
            Span::raw("Playing "),
            Span::styled(orchestrator.human_color().to_string(), side_style(orchestrator.human_color())),
            Span::raw(format!("  depth {}", orchestrator.analysis_depth())),
        ]));
        if orchestrator.human_color() != orchestrator.inventory().color() {
            let shape = orchestrator
                .selected_pawn()
                .map_or_else(|| "-".to_string(), |pawn| pawn.to_string());
            lines.push(Line::raw(format!("Pawn {}", shape)));
        }
        let advance = if orchestrator.gate().advance_enabled() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::styled("[n] next move", advance));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().title("Mode").borders(Borders::ALL)),
        area,
    );
}

fn move_item(index: usize, placement: &Move, score: f64) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::raw(format!("{:>2}. ({}, {}) ", index + 1, placement.x, placement.y)),
        Span::styled(placement.pawn.to_string(), side_style(placement.color)),
        Span::raw(format!("  {:+.2}", score)),
    ]))
}

fn draw_panels(frame: &mut Frame, area: Rect, orchestrator: &Orchestrator) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let panels = orchestrator.panels();
    let analysis: Vec<ListItem> = match panels.analysis() {
        Some(entries) => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| move_item(i, &entry.placement, entry.score))
            .collect(),
        None => vec![ListItem::new("[v] analyse the position")],
    };
    frame.render_widget(
        List::new(analysis).block(Block::default().title("Analysis").borders(Borders::ALL)),
        halves[0],
    );

    let prediction: Vec<ListItem> = match panels.prediction() {
        Some(entries) => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| move_item(i, &entry.placement, entry.score))
            .collect(),
        None => vec![ListItem::new("[p] predict the rest of the game")],
    };
    frame.render_widget(
        List::new(prediction).block(Block::default().title("Prediction").borders(Borders::ALL)),
        halves[1],
    );
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = if app.session().is_restarting() {
        (
            "Starting a new game...".to_string(),
            Style::default().fg(Color::Yellow),
        )
    } else {
        match app.session().orchestrator().status().state() {
            StatusState::Idle => (String::new(), Style::default()),
            StatusState::Waiting(text) => (text.clone(), Style::default().fg(Color::Yellow)),
            StatusState::Error(text) => (
                format!("{}  [Esc] dismiss", text),
                Style::default().fg(Color::Red),
            ),
            StatusState::Win(text) => (
                text.clone(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        }
    };
    frame.render_widget(
        Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_help(frame: &mut Frame, area: Rect, mode: Mode) {
    let mut help = "arrows move  enter place  a-d pawn  m mode  r restart  q quit".to_string();
    if mode == Mode::Analysis {
        help.push_str("\nn next move  s switch color  v analyse  p predict  +/- depth");
    }
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Command;
    use quantik_client::{ClientConfig, HttpMoveService, Pawn, UserAction};
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|frame| draw(frame, app)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        let service = HttpMoveService::new(&ClientConfig::default()).expect("client");
        App::new(Arc::new(service), 3, 4)
    }

    #[test]
    fn test_classic_screen_hides_panels() {
        let screen = render(&app());
        assert!(screen.contains("Classic mode"));
        assert!(screen.contains("Your pawns (BLUE)"));
        assert!(!screen.contains("Prediction"));
    }

    #[test]
    fn test_analysis_screen_shows_panels_and_depth() {
        let mut app = app();
        app.apply(Command::Action(UserAction::SwitchMode));
        let screen = render(&app);
        assert!(screen.contains("Analysis mode"));
        assert!(screen.contains("depth 3"));
        assert!(screen.contains("Prediction"));
    }

    #[test]
    fn test_red_side_shows_chosen_shape() {
        let mut app = app();
        app.apply(Command::Action(UserAction::SwitchMode));
        app.apply(Command::Action(UserAction::ToggleColor));
        app.apply(Command::Action(UserAction::SelectPawn(Pawn::C)));
        let screen = render(&app);
        assert!(screen.contains("Playing RED"));
        assert!(screen.contains("Pawn C"));
    }

    #[test]
    fn test_validation_error_is_rendered() {
        let mut app = app();
        app.apply(Command::ClickCell);
        let screen = render(&app);
        assert!(screen.contains("Please select a pawn."));
    }
}
