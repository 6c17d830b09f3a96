// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use subcal_app::validation::{DEFAULT_CURRENCY_SYMBOL, format_cents_with_symbol, format_date};
use subcal_app::{
    CellStyle, DayCell, DayDataset, DayLabel, DetailPanelSide, DonutGeometry, DonutLayout,
    DonutSegment, Fill, GRID_COLUMNS, GRID_CELLS, GRID_ROWS, MonthGrid, Rgb, ViewCommand,
    ViewEvent, ViewState, WEEKDAY_LABELS, YearMonth, build_grid, layout_donut,
};
use time::{Date, OffsetDateTime};

const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(4);
const POPOVER_WIDTH: u16 = 38;
const DONUT_SUMMARY_WIDTH: u16 = 36;

// Canvas bounds in donut view-box units; wide enough for the outer labels.
const VIEW_BOX_MIN: f64 = -40.0;
const VIEW_BOX_MAX: f64 = 440.0;
const VIEW_BOX_SIZE: f64 = 400.0;
const RING_HALF_WIDTH: f64 = 14.0;
const FOCUSED_RING_HALF_WIDTH: f64 = 24.0;
const RING_SAMPLE_STEP: f64 = 3.0;
const ARC_SAMPLE_STEP_DEG: f64 = 0.75;

pub trait AppRuntime {
    fn load_dataset(&mut self) -> Result<DayDataset>;

    fn today(&self) -> Date {
        OffsetDateTime::now_utc().date()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiOptions {
    pub currency_symbol: String,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InternalEvent {
    ClearStatus { token: u64 },
}

/// UI-local state derived from the dataset and the active month.
#[derive(Debug, Clone)]
struct ViewData {
    dataset: DayDataset,
    grid: MonthGrid,
    donut: DonutLayout,
    cursor: usize,
    donut_focus: usize,
    help_visible: bool,
    status_token: u64,
    today: Date,
    currency_symbol: String,
}

impl ViewData {
    fn new(state: &ViewState, options: &UiOptions, today: Date) -> Self {
        let dataset = DayDataset::new();
        let grid = build_grid(state.active_month, &dataset);
        let donut = layout_donut(dataset.days());
        let cursor = default_cursor(&grid, today);
        Self {
            dataset,
            grid,
            donut,
            cursor,
            donut_focus: 0,
            help_visible: false,
            status_token: 0,
            today,
            currency_symbol: options.currency_symbol.clone(),
        }
    }

    fn cursor_cell(&self) -> Option<&DayCell> {
        self.grid.get(self.cursor)
    }

    fn focused_segment(&self) -> Option<&DonutSegment> {
        self.donut.segments.get(self.donut_focus)
    }

    fn money(&self, cents: i64) -> String {
        format_cents_with_symbol(cents, &self.currency_symbol)
    }
}

pub fn run_app<R: AppRuntime>(
    state: &mut ViewState,
    runtime: &mut R,
    options: &UiOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(state, options, runtime.today());
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = refresh_view_data(state, runtime, &mut view_data) {
        tracing::warn!(error = %format!("{error:#}"), "initial dataset load failed");
        emit_status(
            state,
            &mut view_data,
            &internal_tx,
            format!("load failed: {error:#}"),
        );
    }
    tracing::info!(
        month = %state.active_month,
        view = state.view.label(),
        days = view_data.dataset.len(),
        "ui started"
    );

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    tracing::info!("ui stopped");
    result
}

fn process_internal_events(
    state: &mut ViewState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(ViewCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_DELAY);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut ViewState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(ViewCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn refresh_view_data<R: AppRuntime>(
    state: &mut ViewState,
    runtime: &mut R,
    view_data: &mut ViewData,
) -> Result<()> {
    view_data.today = runtime.today();
    view_data.dataset = runtime.load_dataset().context("load dataset")?;
    view_data.donut = layout_donut(view_data.dataset.days());
    view_data.donut_focus = 0;
    resolve_selection(state, &view_data.dataset);
    rebuild_grid(state, view_data);
    Ok(())
}

/// Points an open detail panel at the freshly loaded copy of its day, or
/// closes it when that day no longer carries charges.
fn resolve_selection(state: &mut ViewState, dataset: &DayDataset) {
    let Some(selected) = state.selected_detail_day.as_ref() else {
        return;
    };
    let fresh = match selected.label {
        DayLabel::InMonth(day) => dataset
            .get(day)
            .filter(|cell| cell.has_subscriptions())
            .cloned(),
        _ => None,
    };
    let events = match fresh {
        Some(cell) if state.is_selected(&cell) => Vec::new(),
        Some(cell) => state.dispatch(ViewCommand::SelectDay(cell)),
        None => state.dispatch(ViewCommand::CloseDetail),
    };
    for event in &events {
        tracing::debug!(?event, "selection re-resolved after load");
    }
}

/// Rebuilds the grid for the active month, keeping the cursor on the same
/// day number when the new month has it (clamped to the month's length).
fn rebuild_grid(state: &ViewState, view_data: &mut ViewData) {
    let kept_day = view_data.cursor_cell().and_then(|cell| match cell.label {
        DayLabel::InMonth(day) => Some(day),
        _ => None,
    });
    view_data.grid = build_grid(state.active_month, &view_data.dataset);
    view_data.cursor = kept_day
        .map(|day| day.min(state.active_month.days_in_month()))
        .and_then(|day| view_data.grid.index_of_day(day))
        .unwrap_or_else(|| default_cursor(&view_data.grid, view_data.today));
}

fn default_cursor(grid: &MonthGrid, today: Date) -> usize {
    let day = if grid.month.contains(today) {
        today.day()
    } else {
        1
    };
    grid.index_of_day(day).unwrap_or(0)
}

fn handle_key_event<R: AppRuntime>(
    state: &mut ViewState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
    {
        return true;
    }

    if view_data.help_visible {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            view_data.help_visible = false;
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Char('v') => {
            dispatch_and_refresh(state, view_data, ViewCommand::ToggleView, internal_tx);
        }
        KeyCode::Char('r') => reload_dataset(state, runtime, view_data, internal_tx),
        _ if state.is_donut_view() => handle_donut_key(state, view_data, internal_tx, key),
        _ => handle_grid_key(state, view_data, internal_tx, key),
    }
    false
}

fn handle_grid_key(
    state: &mut ViewState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let row = GRID_COLUMNS as isize;
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => move_cursor(view_data, -1),
        KeyCode::Char('l') | KeyCode::Right => move_cursor(view_data, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(view_data, -row),
        KeyCode::Char('j') | KeyCode::Down => move_cursor(view_data, row),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(cell) = view_data.cursor_cell().cloned() {
                dispatch_and_refresh(state, view_data, ViewCommand::SelectDay(cell), internal_tx);
            }
        }
        KeyCode::Esc => {
            dispatch_and_refresh(state, view_data, ViewCommand::CloseDetail, internal_tx);
        }
        KeyCode::Char('[') | KeyCode::Char('p') => {
            dispatch_and_refresh(state, view_data, ViewCommand::PrevMonth, internal_tx);
        }
        KeyCode::Char(']') | KeyCode::Char('n') => {
            dispatch_and_refresh(state, view_data, ViewCommand::NextMonth, internal_tx);
        }
        KeyCode::Char('t') => {
            let today = view_data.today;
            dispatch_and_refresh(
                state,
                view_data,
                ViewCommand::GoToMonth(YearMonth::of(today)),
                internal_tx,
            );
            view_data.cursor = default_cursor(&view_data.grid, today);
        }
        _ => {}
    }
}

fn handle_donut_key(
    state: &mut ViewState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let segments = view_data.donut.len();
    match key.code {
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('k') | KeyCode::Up if segments > 0 => {
            view_data.donut_focus = (view_data.donut_focus + segments - 1) % segments;
        }
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('j') | KeyCode::Down
            if segments > 0 =>
        {
            view_data.donut_focus = (view_data.donut_focus + 1) % segments;
        }
        // The donut center doubles as the way back to the calendar.
        KeyCode::Enter | KeyCode::Esc => {
            dispatch_and_refresh(state, view_data, ViewCommand::ToggleView, internal_tx);
        }
        _ => {}
    }
}

fn move_cursor(view_data: &mut ViewData, delta: isize) {
    let last = GRID_CELLS as isize - 1;
    view_data.cursor = (view_data.cursor as isize + delta).clamp(0, last) as usize;
}

fn reload_dataset<R: AppRuntime>(
    state: &mut ViewState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    match refresh_view_data(state, runtime, view_data) {
        Ok(()) => {
            let message = format!("reloaded {} days", view_data.dataset.len());
            emit_status(state, view_data, internal_tx, message);
        }
        Err(error) => {
            tracing::warn!(error = %format!("{error:#}"), "dataset reload failed");
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("load failed: {error:#}"),
            );
        }
    }
}

fn dispatch_and_refresh(
    state: &mut ViewState,
    view_data: &mut ViewData,
    command: ViewCommand,
    internal_tx: &Sender<InternalEvent>,
) {
    let events = state.dispatch(command);
    for event in &events {
        tracing::debug!(?event, "view event");
    }
    if events
        .iter()
        .any(|event| matches!(event, ViewEvent::MonthChanged { .. }))
    {
        rebuild_grid(state, view_data);
    }
    if events
        .iter()
        .any(|event| matches!(event, ViewEvent::ViewChanged(_)))
    {
        view_data.donut_focus = 0;
    }
    if events
        .iter()
        .any(|event| matches!(event, ViewEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &ViewState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(render_header_text(state, view_data))
        .block(Block::default().title("subcal").borders(Borders::ALL));
    frame.render_widget(header, layout[0]);

    if state.is_donut_view() {
        render_donut(frame, layout[1], view_data);
    } else if let Some(selected) = &state.selected_detail_day {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
            .split(layout[1]);
        render_grid(frame, body[0], state, view_data);
        let detail = Paragraph::new(render_detail_text(selected, &view_data.currency_symbol))
            .block(
                Block::default()
                    .title(format!("day {}", selected.label))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(detail, body[1]);
    } else {
        render_grid(frame, layout[1], state, view_data);
    }

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_header_text(state: &ViewState, view_data: &ViewData) -> String {
    let spend = view_data.money(view_data.dataset.monthly_spend_cents());
    let subscriptions = view_data.dataset.subscription_count();
    if state.is_donut_view() {
        format!("spending by day | monthly spend {spend} | {subscriptions} subscriptions")
    } else {
        format!(
            "< {} > | monthly spend {spend} | {subscriptions} subscriptions",
            state.active_month.title()
        )
    }
}

fn grid_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
        .split(area)
}

fn render_grid(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &ViewState,
    view_data: &ViewData,
) {
    let block = Block::default()
        .title(state.active_month.title())
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut row_constraints = vec![Constraint::Length(1)];
    row_constraints.extend(std::iter::repeat_n(
        Constraint::Ratio(1, GRID_ROWS as u32),
        GRID_ROWS,
    ));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(inner);

    for (label, rect) in WEEKDAY_LABELS.iter().zip(grid_columns(rows[0]).iter()) {
        let weekday = Paragraph::new(*label)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(weekday, *rect);
    }

    let mut cursor_rect = None;
    for (row_index, row) in view_data.grid.rows().enumerate() {
        let columns = grid_columns(rows[row_index + 1]);
        for (column_index, cell) in row.iter().enumerate() {
            let index = row_index * GRID_COLUMNS + column_index;
            let rect = columns[column_index];
            let is_cursor = index == view_data.cursor;
            if is_cursor {
                cursor_rect = Some(rect);
            }
            frame.render_widget(
                day_cell_widget(cell, state.is_selected(cell), is_cursor),
                rect,
            );
        }
    }

    if let (Some(anchor), Some(cell)) = (cursor_rect, view_data.cursor_cell())
        && cell.has_subscriptions()
        && !state.is_selected(cell)
    {
        let lines = render_popover_text(cell, &view_data.currency_symbol);
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
        let area = popover_rect(anchor, cell.panel_side, inner, POPOVER_WIDTH, height);
        frame.render_widget(Clear, area);
        let popover = Paragraph::new(lines.join("\n")).block(
            Block::default()
                .title(format!("day {}", cell.label))
                .borders(Borders::ALL),
        );
        frame.render_widget(popover, area);
    }
}

fn day_cell_widget(cell: &DayCell, selected: bool, cursor: bool) -> Paragraph<'static> {
    let mut border = match cell.style {
        CellStyle::Adjacent => Style::default().fg(Color::DarkGray),
        CellStyle::Plain => Style::default(),
        CellStyle::Charged => Style::default().fg(cell
            .fill()
            .primary()
            .map_or(Color::White, terminal_color)),
    };
    if cursor {
        border = border.fg(Color::Yellow).add_modifier(Modifier::BOLD);
    }
    if selected {
        border = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
    }

    let title_style = if cell.is_filler() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let title = Span::styled(format!("{:>2}", cell.label.calendar_day()), title_style);

    let inline = cell.inline_subscriptions();
    let lines = day_cell_labels(cell)
        .into_iter()
        .enumerate()
        .map(|(index, label)| match inline.get(index) {
            Some(subscription) => Line::from(Span::styled(
                label,
                Style::default().fg(terminal_color(subscription.accent_color)),
            )),
            None => Line::from(Span::styled(
                label,
                Style::default().add_modifier(Modifier::BOLD),
            )),
        })
        .collect::<Vec<_>>();

    Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title),
    )
}

/// Inline names plus a `+N` badge for the rest.
fn day_cell_labels(cell: &DayCell) -> Vec<String> {
    let mut labels = cell
        .inline_subscriptions()
        .iter()
        .map(|subscription| subscription.name.clone())
        .collect::<Vec<_>>();
    let overflow = cell.overflow_count();
    if overflow > 0 {
        labels.push(format!("+{overflow}"));
    }
    labels
}

fn render_popover_text(cell: &DayCell, currency_symbol: &str) -> Vec<String> {
    cell.subscriptions
        .iter()
        .flat_map(|subscription| {
            [
                format!(
                    "{} {}",
                    subscription.name,
                    format_cents_with_symbol(subscription.payment_cents, currency_symbol)
                ),
                format!(
                    "  {} | {} since {}",
                    subscription.recurrence_label,
                    format_cents_with_symbol(subscription.total_cents, currency_symbol),
                    format_date(subscription.active_since)
                ),
            ]
        })
        .collect()
}

fn render_detail_text(cell: &DayCell, currency_symbol: &str) -> String {
    let count = cell.subscriptions.len();
    let noun = if count == 1 {
        "subscription"
    } else {
        "subscriptions"
    };
    let mut lines = vec![format!("{count} {noun}"), String::new()];
    for subscription in &cell.subscriptions {
        lines.push(subscription.name.clone());
        lines.push(format!(
            "  {} | {}",
            format_cents_with_symbol(subscription.payment_cents, currency_symbol),
            subscription.recurrence_label
        ));
        lines.push(format!(
            "  total {} since {}",
            format_cents_with_symbol(subscription.total_cents, currency_symbol),
            format_date(subscription.active_since)
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Total Spend {}",
        format_cents_with_symbol(cell.total_payment_cents(), currency_symbol)
    ));
    lines.join("\n")
}

/// Places the popover under the anchor cell, or above it when there is no
/// room below. The side decides which anchor edge it lines up with.
fn popover_rect(
    anchor: Rect,
    side: DetailPanelSide,
    bounds: Rect,
    width: u16,
    height: u16,
) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);
    let x = match side {
        DetailPanelSide::Right => anchor.right().saturating_sub(width),
        DetailPanelSide::Left | DetailPanelSide::Default => anchor.x,
    };
    let x = x.clamp(bounds.x, bounds.right().saturating_sub(width));
    let y = if anchor.bottom().saturating_add(height) <= bounds.bottom() {
        anchor.bottom()
    } else {
        anchor.y.saturating_sub(height).max(bounds.y)
    };
    Rect::new(x, y, width, height)
}

fn render_donut(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(DONUT_SUMMARY_WIDTH)])
        .split(area);

    let geometry = DonutGeometry::default();
    let donut = &view_data.donut;
    let focus = view_data.donut_focus;
    let center_label = if donut.is_empty() {
        "no charges".to_owned()
    } else {
        format!(
            "monthly spend {}",
            view_data.money(view_data.dataset.monthly_spend_cents())
        )
    };

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title("spending by day")
                .borders(Borders::ALL),
        )
        .marker(Marker::Braille)
        .x_bounds([VIEW_BOX_MIN, VIEW_BOX_MAX])
        .y_bounds([VIEW_BOX_MIN, VIEW_BOX_MAX])
        .paint(|ctx| {
            for (index, segment) in donut.segments.iter().enumerate() {
                let half_width = if index == focus {
                    FOCUSED_RING_HALF_WIDTH
                } else {
                    RING_HALF_WIDTH
                };
                for (x, y, color) in arc_samples(segment, &geometry, half_width) {
                    ctx.draw(&Points {
                        coords: &[(x, flip_y(y))],
                        color: terminal_color(color),
                    });
                }
                let anchor = segment.label_anchor;
                ctx.print(
                    anchor.x,
                    flip_y(anchor.y),
                    Line::from(segment_label(segment)),
                );
            }
            ctx.print(
                geometry.center.x - 60.0,
                flip_y(geometry.center.y),
                Line::from(center_label.clone()),
            );
        });
    frame.render_widget(canvas, layout[0]);

    let summary = match view_data.focused_segment() {
        Some(segment) => render_donut_hover_text(segment, &view_data.currency_symbol).join("\n"),
        None => "no subscriptions charged".to_owned(),
    };
    let title = view_data
        .focused_segment()
        .map_or_else(|| "day".to_owned(), |segment| format!("day {}", segment.source_day.label));
    let side = Paragraph::new(summary).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(side, layout[1]);
}

fn segment_label(segment: &DonutSegment) -> String {
    match segment.source_day.subscriptions.split_first() {
        None => String::new(),
        Some((first, [])) => first.name.clone(),
        Some((first, rest)) => format!("{} +{}", first.name, rest.len()),
    }
}

fn render_donut_hover_text(segment: &DonutSegment, currency_symbol: &str) -> Vec<String> {
    let mut lines = segment
        .source_day
        .subscriptions
        .iter()
        .map(|subscription| {
            format!(
                "{}: {} / {}",
                subscription.name,
                format_cents_with_symbol(subscription.payment_cents, currency_symbol),
                subscription.recurrence_label
            )
        })
        .collect::<Vec<_>>();
    lines.push(String::new());
    lines.push(format!(
        "{} of {:.0}°",
        format_cents_with_symbol(segment.payment_cents, currency_symbol),
        segment.sweep_angle_deg
    ));
    lines
}

/// Samples the ring band of one segment. Colors follow the segment fill
/// from the start of the sweep to its end.
fn arc_samples(
    segment: &DonutSegment,
    geometry: &DonutGeometry,
    half_width: f64,
) -> Vec<(f64, f64, Rgb)> {
    let steps = (segment.sweep_angle_deg / ARC_SAMPLE_STEP_DEG).ceil().max(1.0) as usize;
    let mut samples = Vec::new();
    let mut offset = -half_width;
    while offset <= half_width {
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            let Some(color) = fill_color_at(&segment.fill, t) else {
                continue;
            };
            let angle = segment.start_angle_deg + segment.sweep_angle_deg * t;
            let point = geometry.point_at(angle, geometry.radius + offset);
            samples.push((point.x, point.y, color));
        }
        offset += RING_SAMPLE_STEP;
    }
    samples
}

/// Canvas y grows upward; donut view-box y grows downward.
fn flip_y(y: f64) -> f64 {
    VIEW_BOX_SIZE - y
}

fn fill_color_at(fill: &Fill, t: f64) -> Option<Rgb> {
    match fill {
        Fill::None => None,
        Fill::Solid { color } => Some(*color),
        Fill::Linear { stops } => {
            let pct = t.clamp(0.0, 1.0) * 100.0;
            let upper = stops
                .iter()
                .position(|stop| stop.offset_pct >= pct)
                .unwrap_or(stops.len().saturating_sub(1));
            let high = stops.get(upper)?;
            let Some(low) = upper.checked_sub(1).and_then(|index| stops.get(index)) else {
                return Some(high.color);
            };
            let span = high.offset_pct - low.offset_pct;
            let local = if span <= 0.0 {
                1.0
            } else {
                (pct - low.offset_pct) / span
            };
            Some(Rgb::new(
                lerp_channel(low.color.r, high.color.r, local),
                lerp_channel(low.color.g, high.color.g, local),
                lerp_channel(low.color.b, high.color.b, local),
            ))
        }
    }
}

fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    let value = f64::from(from) + (f64::from(to) - f64::from(from)) * t;
    value.round().clamp(0.0, 255.0) as u8
}

fn terminal_color(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn help_overlay_text() -> &'static str {
    "global: q or ctrl+q quit | v toggle grid/donut | r reload dataset | ? help\n\
grid: h/j/k/l or arrows move | enter/space details | esc close details\n\
grid: [/] or p/n month | t today\n\
donut: h/l or arrows segment | enter/esc back to grid\n\
help: esc or ? close"
}

fn status_text(state: &ViewState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }

    let badge = state.view.label().to_ascii_uppercase();
    let hints = if state.is_donut_view() {
        "h/l segment | enter grid | v toggle | r reload | ? help | q quit"
    } else {
        "h/j/k/l move | enter details | esc close | [/] month | t today | v donut | ? help | q quit"
    };
    match &state.status_line {
        Some(status) => format!("{badge} | {status} | {hints}"),
        None => format!("{badge} | {hints}"),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, InternalEvent, UiOptions, ViewData, centered_rect, day_cell_labels,
        emit_status, fill_color_at, handle_key_event, help_overlay_text, popover_rect,
        process_internal_events, refresh_view_data, render, render_detail_text,
        render_donut_hover_text, render_header_text, render_popover_text, segment_label,
        status_text,
    };
    use anyhow::Result;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use subcal_app::{
        DayDataset, DayLabel, DetailPanelSide, Fill, NavDirection, Rgb, ViewCommand, ViewKind,
        ViewState, YearMonth,
    };
    use std::sync::mpsc;
    use time::Date;
    use time::macros::date;

    #[derive(Debug)]
    struct TestRuntime {
        dataset: DayDataset,
        today: Date,
        fail_load: bool,
        load_count: usize,
    }

    impl Default for TestRuntime {
        fn default() -> Self {
            Self {
                dataset: subcal_testkit::demo_dataset(),
                today: date!(2024 - 02 - 15),
                fail_load: false,
                load_count: 0,
            }
        }
    }

    impl AppRuntime for TestRuntime {
        fn load_dataset(&mut self) -> Result<DayDataset> {
            if self.fail_load {
                anyhow::bail!("dataset unavailable");
            }
            self.load_count += 1;
            Ok(self.dataset.clone())
        }

        fn today(&self) -> Date {
            self.today
        }
    }

    fn month(year: i32, month: u8) -> YearMonth {
        YearMonth::new(year, month).expect("valid month")
    }

    fn internal_tx() -> mpsc::Sender<InternalEvent> {
        let (tx, _rx) = mpsc::channel();
        tx
    }

    fn setup_at(active: YearMonth) -> (ViewState, TestRuntime, ViewData) {
        let mut state = ViewState::new(active);
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::new(&state, &UiOptions::default(), runtime.today());
        refresh_view_data(&mut state, &mut runtime, &mut view_data).expect("refresh should work");
        (state, runtime, view_data)
    }

    fn setup() -> (ViewState, TestRuntime, ViewData) {
        setup_at(month(2024, 2))
    }

    fn press(
        state: &mut ViewState,
        runtime: &mut TestRuntime,
        view_data: &mut ViewData,
        code: KeyCode,
    ) -> bool {
        handle_key_event(
            state,
            runtime,
            view_data,
            &internal_tx(),
            KeyEvent::new(code, KeyModifiers::NONE),
        )
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn cursor_starts_on_today_when_month_contains_it() {
        let (_state, _runtime, view_data) = setup();
        // February 2024 starts on a Thursday.
        assert_eq!(view_data.cursor, 4 + 14);
        assert_eq!(
            view_data.cursor_cell().map(|cell| cell.label),
            Some(DayLabel::InMonth(15))
        );
    }

    #[test]
    fn cursor_starts_on_first_day_for_other_months() {
        let (_state, _runtime, view_data) = setup_at(month(2024, 9));
        assert_eq!(view_data.cursor, 0);
        assert_eq!(
            view_data.cursor_cell().map(|cell| cell.label),
            Some(DayLabel::InMonth(1))
        );
    }

    #[test]
    fn cursor_moves_by_cell_and_week_and_clamps_to_grid() {
        let (mut state, mut runtime, mut view_data) = setup();

        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('h'));
        assert_eq!(view_data.cursor, 17);
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Up);
        assert_eq!(view_data.cursor, 10);
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('j'));
        assert_eq!(view_data.cursor, 17);
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Right);
        assert_eq!(view_data.cursor, 18);

        view_data.cursor = 2;
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('k'));
        assert_eq!(view_data.cursor, 0);
        view_data.cursor = 40;
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('l'));
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('l'));
        assert_eq!(view_data.cursor, 41);
    }

    #[test]
    fn enter_toggles_detail_for_charged_day() {
        let (mut state, mut runtime, mut view_data) = setup();
        view_data.cursor = 4 + 6;

        press(&mut state, &mut runtime, &mut view_data, KeyCode::Enter);
        let selected = state
            .selected_detail_day
            .as_ref()
            .map(|cell| cell.label);
        assert_eq!(selected, Some(DayLabel::InMonth(7)));

        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char(' '));
        assert!(state.selected_detail_day.is_none());
    }

    #[test]
    fn enter_on_uncharged_day_keeps_selection_empty() {
        let (mut state, mut runtime, mut view_data) = setup();
        view_data.cursor = 4 + 7;

        press(&mut state, &mut runtime, &mut view_data, KeyCode::Enter);
        assert!(state.selected_detail_day.is_none());
    }

    #[test]
    fn escape_closes_detail() {
        let (mut state, mut runtime, mut view_data) = setup();
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Enter);
        assert!(state.selected_detail_day.is_some());

        press(&mut state, &mut runtime, &mut view_data, KeyCode::Esc);
        assert!(state.selected_detail_day.is_none());
    }

    #[test]
    fn month_keys_rebuild_grid_and_keep_day_under_cursor() {
        let (mut state, mut runtime, mut view_data) = setup();

        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char(']'));
        assert_eq!(state.active_month, month(2024, 3));
        assert_eq!(state.navigation_direction, NavDirection::Next);
        assert_eq!(view_data.grid.month, month(2024, 3));
        // March 2024 starts on a Friday.
        assert_eq!(view_data.cursor, 5 + 14);

        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('p'));
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('['));
        assert_eq!(view_data.grid.month, month(2024, 1));
        assert_eq!(state.navigation_direction, NavDirection::Prev);
    }

    #[test]
    fn month_change_clamps_cursor_day_to_shorter_month() {
        let (mut state, mut runtime, mut view_data) = setup_at(month(2024, 1));
        view_data.cursor = view_data.grid.index_of_day(31).expect("january has 31 days");

        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('n'));
        assert_eq!(
            view_data.cursor_cell().map(|cell| cell.label),
            Some(DayLabel::InMonth(29))
        );
    }

    #[test]
    fn today_key_returns_to_current_month() {
        let (mut state, mut runtime, mut view_data) = setup();
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char(']'));
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char(']'));
        assert_eq!(state.active_month, month(2024, 4));

        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('t'));
        assert_eq!(state.active_month, month(2024, 2));
        assert_eq!(state.navigation_direction, NavDirection::Prev);
        assert_eq!(view_data.cursor, 4 + 14);
    }

    #[test]
    fn donut_view_cycles_focus_and_returns_to_grid() {
        let (mut state, mut runtime, mut view_data) = setup();
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Enter);
        assert!(state.selected_detail_day.is_some());

        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('v'));
        assert_eq!(state.view, ViewKind::Donut);
        assert!(state.selected_detail_day.is_none());
        assert_eq!(view_data.donut.len(), 8);

        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('h'));
        assert_eq!(view_data.donut_focus, 7);
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Right);
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Right);
        assert_eq!(view_data.donut_focus, 1);

        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char(']'));
        assert_eq!(state.active_month, month(2024, 2));

        press(&mut state, &mut runtime, &mut view_data, KeyCode::Enter);
        assert_eq!(state.view, ViewKind::Grid);
        assert_eq!(view_data.donut_focus, 0);
    }

    #[test]
    fn quit_keys_and_help_overlay() {
        let (mut state, mut runtime, mut view_data) = setup();

        assert!(!press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('?')));
        assert!(view_data.help_visible);
        assert!(!press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('q')));
        assert!(!view_data.help_visible);

        assert!(press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('q')));
        assert!(handle_key_event(
            &mut state,
            &mut runtime,
            &mut view_data,
            &internal_tx(),
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        ));
    }

    #[test]
    fn reload_key_reloads_dataset_and_reports_status() {
        let (mut state, mut runtime, mut view_data) = setup();
        assert_eq!(runtime.load_count, 1);

        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('r'));
        assert_eq!(runtime.load_count, 2);
        assert_eq!(state.status_line.as_deref(), Some("reloaded 9 days"));

        runtime.fail_load = true;
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('r'));
        let status = state.status_line.clone().unwrap_or_default();
        assert!(status.starts_with("load failed"));
        assert!(status.contains("dataset unavailable"));
        assert_eq!(view_data.dataset.len(), 9);
    }

    #[test]
    fn reload_points_open_detail_at_fresh_day_or_closes_it() {
        let (mut state, mut runtime, mut view_data) = setup();
        let day_seven = view_data.dataset.get(7).cloned().expect("day 7");
        state.dispatch(ViewCommand::SelectDay(day_seven.clone()));

        let mut edited = day_seven;
        edited.subscriptions[0].payment_cents = 499;
        runtime.dataset.insert(edited.clone()).expect("valid day");
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('r'));

        assert_eq!(state.selected_detail_day.as_ref(), Some(&edited));
        let index = view_data.grid.index_of_day(7).expect("day 7 in grid");
        assert!(
            view_data
                .grid
                .get(index)
                .is_some_and(|cell| state.is_selected(cell))
        );
        assert!(render_detail_text(&edited, "€").contains("€4.99"));

        runtime.dataset = DayDataset::from_cells(
            runtime
                .dataset
                .days()
                .filter(|cell| cell.label != DayLabel::InMonth(7))
                .cloned(),
        )
        .expect("distinct days");
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('r'));
        assert!(state.selected_detail_day.is_none());
        assert_eq!(view_data.dataset.len(), 8);
    }

    #[test]
    fn stale_status_clear_tokens_are_ignored() {
        let (mut state, _runtime, mut view_data) = setup();
        let (tx, rx) = mpsc::channel();

        emit_status(&mut state, &mut view_data, &tx, "first");
        let stale = view_data.status_token;
        emit_status(&mut state, &mut view_data, &tx, "second");

        tx.send(InternalEvent::ClearStatus { token: stale })
            .expect("send clear");
        process_internal_events(&mut state, &mut view_data, &rx);
        assert_eq!(state.status_line.as_deref(), Some("second"));

        tx.send(InternalEvent::ClearStatus {
            token: view_data.status_token,
        })
        .expect("send clear");
        process_internal_events(&mut state, &mut view_data, &rx);
        assert!(state.status_line.is_none());
    }

    #[test]
    fn day_cell_labels_show_two_names_and_overflow_badge() {
        let dataset = subcal_testkit::demo_dataset();
        let busy = dataset.get(12).expect("day 12");
        assert_eq!(
            day_cell_labels(busy),
            vec!["JetBrains".to_owned(), "Discord".to_owned(), "+5".to_owned()]
        );

        let pair = dataset.get(7).expect("day 7");
        assert_eq!(
            day_cell_labels(pair),
            vec!["Make".to_owned(), "AirBnb".to_owned()]
        );
        assert!(day_cell_labels(dataset.get(9).expect("day 9")).is_empty());
    }

    #[test]
    fn popover_lists_every_subscription() {
        let dataset = subcal_testkit::demo_dataset();
        let busy = dataset.get(12).expect("day 12");
        let lines = render_popover_text(busy, "€");
        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0], "JetBrains €5.99");
        assert!(lines.iter().any(|line| line.starts_with("Sketch")));
    }

    #[test]
    fn detail_text_totals_the_day() {
        let dataset = subcal_testkit::demo_dataset();
        let text = render_detail_text(dataset.get(7).expect("day 7"), "€");
        assert!(text.starts_with("2 subscriptions"));
        assert!(text.contains("Make"));
        assert!(text.contains("€2.99 | Every 07th"));
        assert!(text.contains("total €35.88 since 2023-01-01"));
        assert!(text.ends_with("Total Spend €6.92"));

        let single = render_detail_text(dataset.get(2).expect("day 2"), "$");
        assert!(single.starts_with("1 subscription\n"));
        assert!(single.ends_with("Total Spend $6.99"));
    }

    #[test]
    fn header_shows_month_and_monthly_spend() {
        let (mut state, _runtime, view_data) = setup();
        let header = render_header_text(&state, &view_data);
        assert!(header.contains("February 2024"));
        assert!(header.contains("monthly spend €93.56"));
        assert!(header.contains("18 subscriptions"));

        state.view = ViewKind::Donut;
        let header = render_header_text(&state, &view_data);
        assert!(header.starts_with("spending by day"));
        assert!(!header.contains("February"));
    }

    #[test]
    fn donut_hover_and_labels_summarize_segment() {
        let (_state, _runtime, view_data) = setup();
        let busy = view_data
            .donut
            .segments
            .iter()
            .find(|segment| segment.source_day.label == DayLabel::InMonth(12))
            .expect("day 12 segment");

        assert_eq!(segment_label(busy), "JetBrains +6");
        let lines = render_donut_hover_text(busy, "€");
        assert_eq!(lines[0], "JetBrains: €5.99 / Every 12th");
        assert_eq!(lines.len(), 7 + 2);

        let single = &view_data.donut.segments[0];
        assert_eq!(segment_label(single), "Linear");
    }

    #[test]
    fn fill_color_interpolates_between_stops() {
        let red = Rgb::new(255, 0, 0);
        let blue = Rgb::new(0, 0, 255);
        let fill = Fill::from_colors(&[red, blue]);

        assert_eq!(fill_color_at(&fill, 0.0), Some(red));
        assert_eq!(fill_color_at(&fill, 1.0), Some(blue));
        assert_eq!(fill_color_at(&fill, 0.5), Some(Rgb::new(128, 0, 128)));
        assert_eq!(fill_color_at(&Fill::Solid { color: red }, 0.3), Some(red));
        assert_eq!(fill_color_at(&Fill::None, 0.3), None);
    }

    #[test]
    fn popover_follows_panel_side_and_flips_above_near_bottom() {
        let bounds = Rect::new(0, 0, 100, 40);
        let anchor = Rect::new(50, 5, 12, 5);

        let left = popover_rect(anchor, DetailPanelSide::Left, bounds, 30, 8);
        assert_eq!(left, Rect::new(50, 10, 30, 8));

        let right = popover_rect(anchor, DetailPanelSide::Right, bounds, 30, 8);
        assert_eq!(right, Rect::new(32, 10, 30, 8));

        let low = Rect::new(90, 34, 10, 5);
        let flipped = popover_rect(low, DetailPanelSide::Default, bounds, 30, 8);
        assert_eq!(flipped, Rect::new(70, 26, 30, 8));
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(70, 60, area);
        assert!(inner.x >= area.x && inner.right() <= area.right());
        assert!(inner.y >= area.y && inner.bottom() <= area.bottom());
        assert_eq!(inner.width, 70);
    }

    #[test]
    fn status_text_shows_mode_badge_and_hides_under_help() {
        let (mut state, _runtime, mut view_data) = setup();
        let status = status_text(&state, &view_data);
        assert!(status.starts_with("GRID | "));
        assert!(status.contains("[/] month"));

        state.status_line = Some("hello".to_owned());
        assert!(status_text(&state, &view_data).contains("GRID | hello | "));

        state.view = ViewKind::Donut;
        assert!(status_text(&state, &view_data).starts_with("DONUT | "));

        view_data.help_visible = true;
        assert!(status_text(&state, &view_data).is_empty());
    }

    #[test]
    fn help_overlay_lists_navigation_and_toggle_keys() {
        let help = help_overlay_text();
        assert!(help.contains("v toggle grid/donut"));
        assert!(help.contains("[/] or p/n month"));
        assert!(help.contains("ctrl+q quit"));
    }

    #[test]
    fn grid_view_renders_weekdays_and_popover() -> Result<()> {
        let (state, _runtime, view_data) = setup();
        let mut terminal = Terminal::new(TestBackend::new(140, 48))?;
        terminal.draw(|frame| render(frame, &state, &view_data))?;

        let text = buffer_text(&terminal);
        assert!(text.contains("SUN"));
        assert!(text.contains("SAT"));
        assert!(text.contains("February 2024"));
        assert!(text.contains("monthly spend €93.56"));
        // Day 15 is under the cursor and charged.
        assert!(text.contains("Spotify €2.99"));
        Ok(())
    }

    #[test]
    fn detail_panel_renders_when_day_selected() -> Result<()> {
        let (mut state, mut runtime, mut view_data) = setup();
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Enter);

        let mut terminal = Terminal::new(TestBackend::new(140, 48))?;
        terminal.draw(|frame| render(frame, &state, &view_data))?;
        assert!(buffer_text(&terminal).contains("Total Spend"));
        Ok(())
    }

    #[test]
    fn donut_view_renders_canvas_and_summary() -> Result<()> {
        let (mut state, mut runtime, mut view_data) = setup();
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('v'));

        let mut terminal = Terminal::new(TestBackend::new(140, 48))?;
        terminal.draw(|frame| render(frame, &state, &view_data))?;
        let text = buffer_text(&terminal);
        assert!(text.contains("spending by day"));
        assert!(text.contains("Linear: €6.99 / Every 02th"));
        assert!(text.contains("DONUT"));
        Ok(())
    }

    #[test]
    fn empty_dataset_renders_without_segments() -> Result<()> {
        let mut state = ViewState::new(month(2024, 2));
        let mut runtime = TestRuntime {
            dataset: DayDataset::new(),
            ..TestRuntime::default()
        };
        let mut view_data = ViewData::new(&state, &UiOptions::default(), runtime.today());
        refresh_view_data(&mut state, &mut runtime, &mut view_data)?;
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('v'));
        press(&mut state, &mut runtime, &mut view_data, KeyCode::Char('l'));
        assert_eq!(view_data.donut_focus, 0);

        let mut terminal = Terminal::new(TestBackend::new(120, 40))?;
        terminal.draw(|frame| render(frame, &state, &view_data))?;
        assert!(buffer_text(&terminal).contains("no subscriptions charged"));
        Ok(())
    }
}
