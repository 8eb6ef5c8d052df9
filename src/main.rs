//! Restless - keyboard-driven terminal HTTP client
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - session state machine processing events
//! - Network Layer (Tokio) - async request execution

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing_subscriber::EnvFilter;

use restless_tui::app::{AppActor, AppState};
use restless_tui::config::{load_settings, Settings};
use restless_tui::constants::{APP_NAME, APP_VERSION, URL_PLACEHOLDER};
use restless_tui::messages::ui_events::key_to_ui_event;
use restless_tui::messages::{Focus, NetworkCommand, NetworkResponse, RenderState, UiEvent, View};
use restless_tui::models::{DisplayText, HttpMethod};
use restless_tui::network::{Executor, NetworkActor, ReqwestTransport};
use restless_tui::ui::{
    cursor_x, field_block, highlight_json, method_color, pretty_body, render_tabs, status_color,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();

    // Initialize logging to file
    let _log_guard = init_logging(&settings)?;
    tracing::info!(version = APP_VERSION, timeout_secs = settings.timeout.as_secs(), "Starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let transport = Arc::new(ReqwestTransport::new(settings.timeout));
    let executor = Executor::new(transport, settings.timeout);
    tokio::spawn(NetworkActor::new(executor, net_resp_tx).run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::with_draft(settings.seed), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Exiting");
    Ok(())
}

fn init_logging(settings: &Settings) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let dir = match settings.log_file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    let file_name = settings
        .log_file
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log file path has no file name: {}", settings.log_file.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&settings.log_filter)?)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    Ok(guard)
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            let event = match event::read()? {
                Event::Key(key) => key_to_ui_event(key, current_state.view, current_state.focus),
                Event::Resize(width, height) => Some(UiEvent::Resize { width, height }),
                _ => None,
            };

            // The app actor decides whether this quits; the mapping may be stale
            if let Some(event) = event {
                if ui_tx.send(event).is_err() {
                    break;
                }
            }
        }

        // Check for state updates (non-blocking). The app actor drops its
        // sender when the session ends.
        loop {
            match render_rx.try_recv() {
                Ok(state) => current_state = state,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_tab_bar(f, state, main_chunks[0]);

    match state.view {
        View::Request => draw_request_view(f, state, main_chunks[1]),
        View::Response => draw_response_view(f, state, main_chunks[1]),
        View::History => draw_history_view(f, state, main_chunks[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(24)])
        .split(area);

    let titles = [View::Request.title(), View::Response.title(), View::History.title()];
    f.render_widget(render_tabs(&titles, state.view.index()), chunks[0]);

    let brand = Paragraph::new(format!("{} v{}", APP_NAME, APP_VERSION))
        .style(Style::default().fg(Color::DarkGray))
        .right_aligned();
    f.render_widget(brand, chunks[1]);
}

fn draw_request_view(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Method selector
            Constraint::Length(3), // URL
            Constraint::Length(3), // Body
            Constraint::Min(3),    // Headers + params
            Constraint::Length(3), // Header key/value inputs
            Constraint::Length(1), // Exchange status
        ])
        .split(area);

    draw_method_selector(f, state, chunks[0]);
    draw_text_field(f, state, Focus::Url, " URL ", chunks[1]);
    draw_text_field(f, state, Focus::Body, " Body ", chunks[2]);
    draw_header_list(f, state, chunks[3]);

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[4]);
    draw_text_field(f, state, Focus::HeaderKey, " Header Key ", header_chunks[0]);
    draw_text_field(f, state, Focus::HeaderValue, " Header Value (Enter: add) ", header_chunks[1]);

    draw_exchange_status(f, state, chunks[5]);
}

fn draw_method_selector(f: &mut Frame, state: &RenderState, area: Rect) {
    let focused = state.focus == Focus::Method;
    let mut spans = Vec::new();

    for (i, method) in HttpMethod::ALL.iter().enumerate() {
        let selected = match state.method {
            Some(m) => m == *method,
            None => i == 0,
        };
        let style = if selected {
            let base = Style::default().fg(Color::Black).bg(method_color(method.as_str())).bold();
            if focused && i == state.method_cursor {
                base.underlined()
            } else {
                base
            }
        } else {
            Style::default().fg(method_color(method.as_str()))
        };
        spans.push(Span::styled(format!(" {} ", method.as_str()), style));
        spans.push(Span::raw(" "));
    }

    let title = if focused { " Method (←/→) " } else { " Method " };
    let selector = Paragraph::new(Line::from(spans)).block(field_block(title, focused));
    f.render_widget(selector, area);
}

fn draw_text_field(f: &mut Frame, state: &RenderState, field: Focus, title: &str, area: Rect) {
    let focused = state.focus == field;
    let input = match field {
        Focus::Url => &state.url,
        Focus::Body => &state.body,
        Focus::HeaderKey => &state.header_key,
        Focus::HeaderValue => &state.header_value,
        Focus::Method => return,
    };

    let content = if input.is_empty() && field == Focus::Url {
        Line::from(Span::styled(URL_PLACEHOLDER, Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(input.value())
    };

    let paragraph = Paragraph::new(content).block(field_block(title, focused));
    f.render_widget(paragraph, area);

    // Cursor
    if focused && state.focused_field().is_some() {
        let x = cursor_x(area, input.cursor_column());
        f.set_cursor_position(Position::new(x, area.y.saturating_add(1)));
    }
}

fn draw_header_list(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut items: Vec<ListItem> = state
        .headers
        .iter()
        .map(|h| {
            ListItem::new(Line::from(vec![
                Span::styled(h.key.clone(), Style::default().fg(Color::Cyan)),
                Span::raw(": "),
                Span::raw(h.value.clone()),
            ]))
        })
        .collect();

    items.extend(state.params.iter().map(|(k, v)| {
        ListItem::new(Line::from(vec![
            Span::styled("?", Style::default().fg(Color::DarkGray)),
            Span::styled(k.clone(), Style::default().fg(Color::Magenta)),
            Span::raw("="),
            Span::raw(v.clone()),
        ]))
    }));

    if items.is_empty() {
        items.push(ListItem::new(Span::styled(
            "No headers yet",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let title = format!(" Headers ({}) / Params ({}) ", state.headers.len(), state.params.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn draw_exchange_status(f: &mut Frame, state: &RenderState, area: Rect) {
    let line = if state.in_flight {
        Line::from(Span::styled(" Sending request...", Style::default().fg(Color::Yellow)))
    } else if let Some(error) = &state.error {
        Line::from(Span::styled(
            format!(" Error: {}", error),
            Style::default().fg(Color::Red).bold(),
        ))
    } else {
        Line::default()
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_response_view(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(response) = &state.response else {
        let message = match &state.error {
            Some(error) => format!("No response yet.\n\nLast error: {}", error),
            None => String::from("No response yet. Send a request first!"),
        };
        let paragraph = Paragraph::new(message)
            .block(Block::default().borders(Borders::ALL).title(" Response "))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
        return;
    };

    let header_rows = (response.headers.len() as u16).min(8) + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(header_rows),
            Constraint::Min(3),
        ])
        .split(area);

    let summary = Line::from(vec![
        Span::styled(
            format!(" {} ", response.status_text),
            Style::default().fg(status_color(response.status_code)).bold(),
        ),
        Span::raw(format!(
            "  {}ms  {} bytes  at {}",
            response.elapsed.as_millis(),
            response.size,
            response.completed_at.format("%H:%M:%S")
        )),
    ]);
    f.render_widget(
        Paragraph::new(summary).block(Block::default().borders(Borders::ALL).title(" Status ")),
        chunks[0],
    );

    let header_items: Vec<ListItem> = response
        .headers
        .iter()
        .map(|(k, v)| {
            ListItem::new(Line::from(vec![
                Span::styled(k.clone(), Style::default().fg(Color::Cyan)),
                Span::raw(": "),
                Span::raw(v.clone()),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(header_items).block(Block::default().borders(Borders::ALL).title(" Headers ")),
        chunks[1],
    );

    let body = Paragraph::new(highlight_json(&pretty_body(&response.body)))
        .block(Block::default().borders(Borders::ALL).title(" Body (↑/↓ scroll) "))
        .wrap(Wrap { trim: false })
        .scroll((state.response_scroll, 0));
    f.render_widget(body, chunks[2]);
}

fn draw_history_view(f: &mut Frame, state: &RenderState, area: Rect) {
    if state.history.is_empty() {
        let paragraph = Paragraph::new("No requests in history yet.")
            .block(Block::default().borders(Borders::ALL).title(" History "));
        f.render_widget(paragraph, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let items: Vec<ListItem> = state
        .history
        .iter()
        .enumerate()
        .map(|(i, record)| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:>3}. ", i + 1)),
                Span::styled(
                    format!("{:6}", record.method.as_str()),
                    Style::default().fg(method_color(record.method.as_str())).bold(),
                ),
                Span::raw(format!(" {} ", record.url)),
                Span::styled(
                    record.created_at.format("%H:%M:%S").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" History ({}) Enter: recall ", state.history.len())),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.history_selected));
    f.render_stateful_widget(list, chunks[0], &mut list_state);

    let detail = state
        .history
        .get(state.history_selected)
        .map(|record| match record.to_display_text() {
            Ok(text) => text,
            Err(e) => format!("Unable to render record: {}", e),
        })
        .unwrap_or_default();
    let detail = Paragraph::new(highlight_json(&detail))
        .block(Block::default().borders(Borders::ALL).title(" Record "))
        .wrap(Wrap { trim: false });
    f.render_widget(detail, chunks[1]);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.in_flight {
        " Sending... (Tab: switch view | Ctrl+C: quit) "
    } else {
        match state.view {
            View::Request => " Tab: view | ↑/↓: field | ←/→: method | Enter: send / add header | Ctrl+C: quit ",
            View::Response => " Tab: view | ↑/↓: scroll | q: quit ",
            View::History => " Tab: view | ↑/↓: select | Enter: recall | q: quit ",
        }
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}
