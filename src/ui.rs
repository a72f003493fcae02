use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::{App, ToastVariant};
use crate::form::Field;
use crate::location::History;
use crate::report::{row_cells, HEADERS};
use crate::storage::Storage;

const HELP: &str =
    "Tab/↑/↓: field | 0-9 .: edit | Backspace: delete | s: copy link | e: export CSV | q/Esc: quit";

pub fn draw<S: Storage, H: History>(f: &mut Frame, app: &mut App<S, H>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(Field::ALL.len() as u16 + 2),
                Constraint::Min(5),
                Constraint::Length(4),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title = Paragraph::new("Mortgage Calculator")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    render_form(f, app, chunks[1]);
    render_results(f, app, chunks[2]);
    render_footer(f, app, chunks[3]);
    render_toast(f, app);
}

fn render_form<S: Storage, H: History>(f: &mut Frame, app: &App<S, H>, area: Rect) {
    let lines: Vec<Line> = Field::ALL
        .iter()
        .map(|&field| {
            let focused = field == app.focus;
            let marker = if focused { "▶ " } else { "  " };
            let style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(format!("{marker}{:<30}", field.label()), style),
                Span::styled(app.input(field).to_string(), style),
            ])
        })
        .collect();

    let form = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Inputs"));
    f.render_widget(form, area);
}

fn render_results<S: Storage, H: History>(f: &mut Frame, app: &mut App<S, H>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Results");
    let results = app.sync.results();

    if results.is_empty() {
        let empty = Paragraph::new("Enter a mortgage amount to see results.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(HEADERS)
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .height(1);

    let rows: Vec<Row> = results
        .iter()
        .map(|row| {
            let cells = row_cells(row).map(Cell::from);
            let style = if row.is_current_amount {
                Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(cells).style(style).height(1)
        })
        .collect();

    let widths = [Constraint::Length(16); 6];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_symbol("> ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_footer<S: Storage, H: History>(f: &mut Frame, app: &App<S, H>, area: Rect) {
    let link = match app.sync.share_url() {
        Ok(url) => Span::styled(url, Style::default().fg(Color::Cyan)),
        Err(_) => Span::styled("(unavailable)", Style::default().fg(Color::Red)),
    };
    let text = vec![
        Line::from(vec![Span::raw("Link: "), link]),
        Line::from(HELP).style(Style::default().fg(Color::DarkGray)),
    ];

    let footer = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, area);
}

fn render_toast<S: Storage, H: History>(f: &mut Frame, app: &App<S, H>) {
    let Some(toast) = &app.toast else {
        return;
    };

    let screen = f.size();
    let width = (toast.description.chars().count() as u16 + 4).min(screen.width);
    let area = Rect {
        x: screen.x + screen.width.saturating_sub(width),
        y: screen.y,
        width,
        height: 4.min(screen.height),
    };
    let color = match toast.variant {
        ToastVariant::Default => Color::Green,
        ToastVariant::Destructive => Color::Red,
    };

    let body = Paragraph::new(toast.description.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                toast.title.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(Clear, area);
    f.render_widget(body, area);
}
