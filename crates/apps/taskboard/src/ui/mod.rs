use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{
    io::{self, IsTerminal},
    time::Duration,
};
use taskboard_core::{FilterCriteria, Task, TaskPriority, TaskStatus};

use taskboard::controllers::{AppContext, DashboardController, Outcome};

use crate::commands::route_hint;

pub mod state;

use state::{DashboardState, StatusMessage, describe, next_priority, next_status};

pub async fn run_dashboard(ctx: AppContext, criteria: FilterCriteria) -> Result<()> {
    let mut dashboard = DashboardController::new(ctx);
    let username = dashboard
        .session()
        .map(|s| s.username().to_string())
        .ok_or_else(|| {
            anyhow::anyhow!("Not logged in. Please login first with: taskboard login -u <username>")
        })?;

    if !io::stdout().is_terminal() {
        return Err(anyhow::anyhow!(
            "This command requires an interactive terminal. \
             Use `taskboard list` for scripted output."
        ));
    }

    let mut state = DashboardState::new();
    if let Outcome::Failed(message) = dashboard.load().await {
        state.error(message);
    }
    dashboard.set_criteria(criteria);

    enable_raw_mode().map_err(|e| {
        anyhow::anyhow!(
            "Failed to enable raw mode. Make sure you're running in a proper terminal: {}",
            e
        )
    })?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        disable_raw_mode().ok();
        anyhow::anyhow!("Failed to setup terminal: {}", e)
    })?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut dashboard, &mut state, &username).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    dashboard: &mut DashboardController,
    state: &mut DashboardState,
    username: &str,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, dashboard, state, username))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if state.show_help {
            state.show_help = false;
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char('?') => state.show_help = true,
            KeyCode::Up | KeyCode::Char('k') => state.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => {
                state.select_next(dashboard.board().visible_len())
            }
            KeyCode::Char('r') => {
                dashboard.load().await;
                match dashboard.error() {
                    Some(message) => state.error(message),
                    None => state.info("Tasks reloaded"),
                }
            }
            KeyCode::Char('s') => {
                let criteria = *dashboard.criteria();
                dashboard.set_criteria(criteria.with_status(next_status(criteria.status)));
            }
            KeyCode::Char('p') => {
                let criteria = *dashboard.criteria();
                dashboard.set_criteria(criteria.with_priority(next_priority(criteria.priority)));
            }
            KeyCode::Char('c') => dashboard.set_criteria(FilterCriteria::new()),
            KeyCode::Char('d') => {
                let selected = dashboard.board().visible().get(state.selected).map(|t| t.id);
                if let Some(id) = selected {
                    match dashboard.delete(id).await {
                        Outcome::Failed(message) => state.error(message),
                        _ => state.info(format!("Deleted task #{}", id)),
                    }
                }
            }
            KeyCode::Char('e') => {
                let selected = dashboard.board().visible().get(state.selected).map(|t| t.id);
                if let Some(id) = selected {
                    show_navigation(state, dashboard.edit(id));
                }
            }
            KeyCode::Char('n') => show_navigation(state, dashboard.create()),
            _ => {}
        }

        state.clamp(dashboard.board().visible_len());
    }
}

/// Form screens live in the one-shot commands; point the user at them.
fn show_navigation(state: &mut DashboardState, outcome: Outcome) {
    match outcome {
        Outcome::Navigate(route) => state.info(format!("Run: {}", route_hint(route))),
        Outcome::Failed(message) => state.error(message),
        Outcome::Stay => {}
    }
}

fn ui(f: &mut Frame, dashboard: &DashboardController, state: &DashboardState, username: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Statistics
            Constraint::Min(5),    // Task list
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    let header = Paragraph::new(format!(" Task Dashboard - {} ", username))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    render_stats(f, chunks[1], dashboard);
    render_tasks(f, chunks[2], dashboard, state);
    render_status_bar(f, chunks[3], state);

    if state.show_help {
        render_help_overlay(f);
    }
}

fn render_stats(f: &mut Frame, area: Rect, dashboard: &DashboardController) {
    let stats = dashboard.stats();
    let label = Style::default().add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(vec![
            Span::styled(" Total: ", label),
            Span::raw(stats.total.to_string()),
            Span::styled("   Completed: ", label),
            Span::styled(stats.completed.to_string(), Style::default().fg(Color::Green)),
            Span::styled("   Pending: ", label),
            Span::styled(stats.pending.to_string(), Style::default().fg(Color::Yellow)),
            Span::styled("   On hold: ", label),
            Span::raw(stats.on_hold.to_string()),
        ]),
        Line::from(vec![
            Span::styled(" Priority: ", label),
            Span::styled(
                format!("low {}", stats.priority.low),
                priority_style(TaskPriority::Low),
            ),
            Span::raw(" / "),
            Span::styled(
                format!("medium {}", stats.priority.medium),
                priority_style(TaskPriority::Medium),
            ),
            Span::raw(" / "),
            Span::styled(
                format!("high {}", stats.priority.high),
                priority_style(TaskPriority::High),
            ),
        ]),
    ];

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Statistics "));
    f.render_widget(widget, area);
}

fn render_tasks(
    f: &mut Frame,
    area: Rect,
    dashboard: &DashboardController,
    state: &DashboardState,
) {
    let visible = dashboard.board().visible();
    let title = format!(
        " Tasks ({} of {}, {}) ",
        visible.len(),
        dashboard.board().tasks().len(),
        describe(dashboard.criteria())
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    if visible.is_empty() {
        let empty = Paragraph::new("No tasks available.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = visible.iter().map(|task| task_item(task)).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn task_item(task: &Task) -> ListItem<'static> {
    let status_color = match task.status {
        TaskStatus::Completed => Color::Green,
        TaskStatus::InProgress => Color::Blue,
        TaskStatus::YetToStart => Color::White,
        TaskStatus::Hold => Color::DarkGray,
    };

    ListItem::new(Line::from(vec![
        Span::styled(format!("#{:<4} ", task.id), Style::default().fg(Color::DarkGray)),
        Span::styled(task.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(format!("[{}]", task.status.label()), Style::default().fg(status_color)),
        Span::raw(" "),
        Span::styled(format!("[{}]", task.priority.label()), priority_style(task.priority)),
        Span::styled(format!("  due {}", task.deadline), Style::default().fg(Color::DarkGray)),
    ]))
}

fn priority_style(priority: TaskPriority) -> Style {
    match priority {
        TaskPriority::High => Style::default().fg(Color::Red),
        TaskPriority::Medium => Style::default().fg(Color::Yellow),
        TaskPriority::Low => Style::default().fg(Color::Green),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, state: &DashboardState) {
    let message = match &state.message {
        Some(StatusMessage::Info(text)) => {
            Span::styled(format!(" {} ", text), Style::default().fg(Color::Green))
        }
        Some(StatusMessage::Error(text)) => {
            Span::styled(format!(" {} ", text), Style::default().fg(Color::Red))
        }
        None => Span::raw(""),
    };

    let help = Span::styled(
        " Press '?' for help | 'q' to quit ",
        Style::default().fg(Color::DarkGray),
    );

    let status_bar =
        Paragraph::new(Line::from(vec![message, help])).style(Style::default().bg(Color::Black));
    f.render_widget(status_bar, area);
}

fn render_help_overlay(f: &mut Frame) {
    let area = centered_rect(60, 50, f.area());

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  ↑/↓ j/k  - Select task"),
        Line::from("  s        - Cycle status filter"),
        Line::from("  p        - Cycle priority filter"),
        Line::from("  c        - Clear filters"),
        Line::from("  r        - Reload tasks"),
        Line::from("  d        - Delete selected task"),
        Line::from("  e / n    - Edit selected / new task"),
        Line::from("  ?        - Toggle this help"),
        Line::from("  q        - Quit"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);

    f.render_widget(ratatui::widgets::Clear, area);
    f.render_widget(help, area);
}

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
