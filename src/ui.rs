//! Drawing functions for the user list view

use ratatui::{prelude::*, widgets::*};

use crate::constants::{APP_NAME, APP_VERSION};
use crate::loader::LoadState;
use crate::messages::RenderState;
use crate::models::User;

pub fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(0),    // Users
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title(f, state, chunks[0]);
    draw_users(f, state, chunks[1]);
    draw_status_bar(f, state, chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            format!(" {} v{} ", APP_NAME, APP_VERSION),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::raw(" "),
        Span::styled(state.source_url.as_str(), Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_users(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(state_color(&state.users)))
        .title(" Users ");

    match &state.users {
        LoadState::Success { data } if !data.is_empty() => {
            let list = render_user_list(data, state.selected).block(block);
            let mut list_state = ListState::default().with_selected(Some(state.selected));
            f.render_stateful_widget(list, area, &mut list_state);
        }
        other => {
            let paragraph = Paragraph::new(placeholder_line(other))
                .block(block)
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
        }
    }
}

/// Renders the list of users, highlighting the selected one
pub fn render_user_list(users: &[User], selected: usize) -> List<'static> {
    let items: Vec<ListItem> = users
        .iter()
        .enumerate()
        .map(|(i, user)| {
            let style = if i == selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default()
            };
            ListItem::new(format!("{:>3}  {}", user.id, user.display_line())).style(style)
        })
        .collect();

    List::new(items).highlight_symbol("> ")
}

/// Text shown instead of the list while loading, on failure or when empty
pub fn placeholder_line(state: &LoadState<Vec<User>>) -> Line<'static> {
    match state {
        LoadState::Idle => Line::from(Span::styled(
            "Press 'r' to load users.",
            Style::default().fg(Color::DarkGray),
        )),
        LoadState::Loading => Line::from(Span::styled(
            "Loading users...",
            Style::default().fg(Color::Yellow),
        )),
        LoadState::Failure { error } => Line::from(Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::Red),
        )),
        LoadState::Success { .. } => Line::from(Span::styled(
            "No users found",
            Style::default().fg(Color::DarkGray),
        )),
    }
}

/// Border color for a load state
pub fn state_color<T>(state: &LoadState<T>) -> Color {
    match state {
        LoadState::Idle => Color::DarkGray,
        LoadState::Loading => Color::Yellow,
        LoadState::Success { .. } => Color::Green,
        LoadState::Failure { .. } => Color::Red,
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let token = state
        .token
        .map(|t| t.to_string())
        .unwrap_or_else(|| String::from("-"));
    let count = state
        .users
        .data()
        .map(|users| format!(" | {} users", users.len()))
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", state.users.label().to_uppercase()),
            Style::default().fg(Color::Black).bg(state_color(&state.users)),
        ),
        Span::raw(format!(" cycle {}{}", token, count)),
        Span::styled(
            "  r:reload  j/k:move  ?:help  q:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup = centered_rect(50, 40, area);
    let lines = vec![
        Line::from(Span::styled("Keys", Style::default().bold())),
        Line::from(""),
        Line::from("r / F5     reload the list"),
        Line::from("j / Down   next user"),
        Line::from("k / Up     previous user"),
        Line::from("?          toggle this help"),
        Line::from("q / Esc    quit"),
    ];
    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help "),
    );
    f.render_widget(Clear, popup);
    f.render_widget(help, popup);
}

/// Rectangle of `percent_x` x `percent_y` centered in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
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
