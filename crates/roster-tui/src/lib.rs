// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use roster_app::{
    Action, Column, Company, CompanyField, CompanyGrowth, CompanySummary, EditState, EditableCell,
    Employee, EmployeeField, EntityKind, LoadMoreLatch, PendingSeeds, Record, SelectionSet, Store,
    StoreEvent, TableOutput, TableState, header_checked,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

const WHEEL_ROWS: isize = 3;
const DOUBLE_CLICK: Duration = Duration::from_millis(400);
const CHECKBOX_WIDTH: u16 = 3;
const DELETE_WIDTH: u16 = 3;
const COLUMN_SPACING: u16 = 1;
const STATUS_HEIGHT: u16 = 3;
const DELETE_GLYPH: &str = " x ";

/// Where records come from. The UI never generates data itself.
pub trait AppRuntime {
    fn initial_companies(&mut self) -> Vec<Company>;
    fn more_companies(&mut self) -> Vec<Company>;
    fn employees_for(&mut self, pool: &[CompanySummary]) -> Result<Vec<Employee>>;
    fn employee_delay(&self) -> Duration;
    fn coalesce_load_more(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    SeedEmployees { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Companies,
    Employees,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HitRow {
    Header,
    Body(usize),
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HitColumn {
    Checkbox,
    Data(usize),
    Delete,
    Gap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hit {
    pane: Pane,
    row: HitRow,
    column: HitColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Click {
    pane: Pane,
    row: usize,
    column: usize,
    at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PaneAreas {
    companies: Rect,
    employees: Option<Rect>,
    status: Rect,
}

#[derive(Debug, Clone, PartialEq)]
struct ViewData {
    focus: Pane,
    companies: TableState<Company>,
    employees: TableState<Employee>,
    visible_employees: Vec<Employee>,
    help_visible: bool,
    status_line: Option<String>,
    status_token: u64,
    pending_seeds: PendingSeeds,
    load_more: LoadMoreLatch,
    growth: CompanyGrowth,
    employee_delay: Duration,
    screen: Rect,
    last_click: Option<Click>,
}

impl ViewData {
    fn new(coalesce_load_more: bool, employee_delay: Duration) -> Self {
        Self {
            focus: Pane::Companies,
            companies: TableState::new(company_columns(), true),
            employees: TableState::new(employee_columns(), false),
            visible_employees: Vec::new(),
            help_visible: false,
            status_line: None,
            status_token: 0,
            pending_seeds: PendingSeeds::default(),
            load_more: LoadMoreLatch::new(coalesce_load_more),
            growth: CompanyGrowth::default(),
            employee_delay,
            screen: Rect::default(),
            last_click: None,
        }
    }

    fn editing_pane(&self) -> Option<Pane> {
        if self.companies.is_editing() {
            Some(Pane::Companies)
        } else if self.employees.is_editing() {
            Some(Pane::Employees)
        } else {
            None
        }
    }
}

fn company_columns() -> Vec<Column<CompanyField>> {
    vec![
        Column::new(CompanyField::Name, "Name").editable(),
        Column::new(CompanyField::EmployeesCount, "Employees").width(10),
        Column::new(CompanyField::Address, "Address").editable(),
    ]
}

fn employee_columns() -> Vec<Column<EmployeeField>> {
    vec![
        Column::new(EmployeeField::Surname, "Surname").editable(),
        Column::new(EmployeeField::Name, "Name").editable(),
        Column::new(EmployeeField::CompanyName, "Company").editable(),
        Column::new(EmployeeField::WorkPosition, "Position").editable(),
    ]
}

pub fn run_app<R: AppRuntime>(store: &mut Store, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(runtime.coalesce_load_more(), runtime.employee_delay());
    let (width, height) = terminal::size().context("read terminal size")?;
    view_data.screen = Rect::new(0, 0, width, height);
    let (internal_tx, internal_rx) = mpsc::channel();

    bootstrap(store, runtime, &mut view_data, &internal_tx);
    let result = event_loop(
        &mut terminal,
        store,
        runtime,
        &mut view_data,
        &internal_tx,
        &internal_rx,
    );

    let cancelled = view_data.pending_seeds.cancel_all();
    debug!(cancelled, "cancelled pending employee seeding");

    let restored = restore_terminal();
    result.and(restored)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(
        io::stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )
    .context("leave alternate screen")?;
    Ok(())
}

fn event_loop<R: AppRuntime>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: &mut Store,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    internal_rx: &Receiver<InternalEvent>,
) -> Result<()> {
    loop {
        process_internal_events(store, runtime, view_data, internal_tx, internal_rx)?;
        sync_viewports(store, view_data);

        terminal
            .draw(|frame| render(frame, store, view_data))
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(120)).context("poll event")? {
            continue;
        }
        match event::read().context("read event")? {
            Event::Key(key) => {
                if handle_key_event(store, runtime, view_data, internal_tx, key) {
                    info!("quit requested");
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => {
                handle_mouse_event(
                    store,
                    runtime,
                    view_data,
                    internal_tx,
                    mouse,
                    Instant::now(),
                );
            }
            Event::Resize(width, height) => {
                view_data.screen = Rect::new(0, 0, width, height);
            }
            _ => {}
        }
    }
}

fn bootstrap<R: AppRuntime>(
    store: &mut Store,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let companies = runtime.initial_companies();
    info!(count = companies.len(), "loaded initial companies");
    dispatch(store, view_data, internal_tx, Action::SetCompanies(companies));
}

fn process_internal_events<R: AppRuntime>(
    store: &mut Store,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) -> Result<()> {
    while let Ok(event) = rx.try_recv() {
        handle_internal_event(store, runtime, view_data, tx, event)?;
    }
    Ok(())
}

fn handle_internal_event<R: AppRuntime>(
    store: &mut Store,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    event: InternalEvent,
) -> Result<()> {
    match event {
        InternalEvent::ClearStatus { token } if token == view_data.status_token => {
            view_data.status_line = None;
        }
        InternalEvent::ClearStatus { .. } => {}
        InternalEvent::SeedEmployees { token } => {
            let Some(pool) = view_data.pending_seeds.take(token) else {
                debug!(token, "ignoring stale employee seeding");
                return Ok(());
            };
            let employees = match runtime.employees_for(&pool) {
                Ok(employees) => employees,
                Err(error) => {
                    error!(token, %error, "employee seeding failed");
                    return Err(error.context("generate employees for new companies"));
                }
            };
            info!(
                token,
                companies = pool.len(),
                employees = employees.len(),
                "seeded employees"
            );
            dispatch(store, view_data, tx, Action::AppendEmployees(employees));
        }
    }
    Ok(())
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn schedule_employee_seed(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    pool: Vec<CompanySummary>,
) {
    let companies = pool.len();
    let token = view_data.pending_seeds.schedule(pool);
    let delay = view_data.employee_delay;
    debug!(token, companies, ?delay, "scheduled employee seeding");

    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(delay);
        // The loop may be gone by now; nothing left to seed then.
        let _ = sender.send(InternalEvent::SeedEmployees { token });
    });
}

fn emit_status(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    view_data.status_line = Some(message.into());
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

/// Applies `action` and keeps every derived piece of view state in step
/// with what the store reports.
fn dispatch(
    store: &mut Store,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    action: Action,
) -> Vec<StoreEvent> {
    let events = store.dispatch(action);

    let rows_arrived = events.iter().any(|event| {
        matches!(
            event,
            StoreEvent::CompaniesReplaced { .. } | StoreEvent::CompaniesAppended { added: 1.., .. }
        )
    });
    if rows_arrived {
        view_data.load_more.reset();
    }

    if events.iter().any(StoreEvent::touches_companies) {
        let companies = store.state().companies.rows();
        if let Some(pool) = view_data.growth.observe(companies) {
            schedule_employee_seed(view_data, internal_tx, pool);
        }
        view_data.companies.abandon_edit_if_missing(companies);
    }

    let employees_stale = events.iter().any(|event| {
        event.touches_companies()
            || event.touches_employees()
            || matches!(
                event,
                StoreEvent::SelectionChanged {
                    entity: EntityKind::Companies,
                    ..
                }
            )
    });
    if employees_stale {
        refresh_visible_employees(store, view_data);
    }

    sync_viewports(store, view_data);
    events
}

fn refresh_visible_employees(store: &Store, view_data: &mut ViewData) {
    view_data.visible_employees = store.state().visible_employees();
    view_data
        .employees
        .abandon_edit_if_missing(&view_data.visible_employees);
    if !employees_visible(store) && view_data.focus == Pane::Employees {
        view_data.focus = Pane::Companies;
    }
}

fn employees_visible(store: &Store) -> bool {
    !store.state().companies.selected().is_empty()
}

fn load_more_companies<R: AppRuntime>(
    store: &mut Store,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let len = store.state().companies.len();
    if !view_data.load_more.request(len) {
        debug!(len, "load more already requested at this length");
        return;
    }
    let more = runtime.more_companies();
    info!(added = more.len(), len, "loading more companies");
    dispatch(store, view_data, internal_tx, Action::AppendCompanies(more));
}

fn apply_company_outputs<R: AppRuntime>(
    store: &mut Store,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    outputs: Vec<TableOutput<Company>>,
) {
    for output in outputs {
        match output {
            TableOutput::Save {
                row_id,
                field,
                value,
            } => {
                dispatch(
                    store,
                    view_data,
                    internal_tx,
                    Action::UpdateCompany {
                        row_id,
                        field,
                        value,
                    },
                );
            }
            TableOutput::Rejected { field, raw, .. } => {
                let message = rejected_message(&view_data.companies, field, &raw);
                emit_status(view_data, internal_tx, message);
            }
            TableOutput::Select(change) => {
                dispatch(
                    store,
                    view_data,
                    internal_tx,
                    Action::ChangeSelectedCompanies(change),
                );
            }
            TableOutput::Delete(row_id) => {
                if !dispatch(store, view_data, internal_tx, Action::DeleteCompany(row_id))
                    .is_empty()
                {
                    emit_status(view_data, internal_tx, "company deleted");
                }
            }
            TableOutput::LoadMore => load_more_companies(store, runtime, view_data, internal_tx),
        }
    }
}

fn apply_employee_outputs(
    store: &mut Store,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    outputs: Vec<TableOutput<Employee>>,
) {
    for output in outputs {
        match output {
            TableOutput::Save {
                row_id,
                field,
                value,
            } => {
                dispatch(
                    store,
                    view_data,
                    internal_tx,
                    Action::UpdateEmployee {
                        row_id,
                        field,
                        value,
                    },
                );
            }
            TableOutput::Rejected { field, raw, .. } => {
                let message = rejected_message(&view_data.employees, field, &raw);
                emit_status(view_data, internal_tx, message);
            }
            TableOutput::Select(change) => {
                dispatch(
                    store,
                    view_data,
                    internal_tx,
                    Action::ChangeSelectedEmployees(change),
                );
            }
            TableOutput::Delete(row_id) => {
                if !dispatch(store, view_data, internal_tx, Action::DeleteEmployee(row_id))
                    .is_empty()
                {
                    emit_status(view_data, internal_tx, "employee deleted");
                }
            }
            TableOutput::LoadMore => debug!("employees table has no load-more source"),
        }
    }
}

fn rejected_message<R: Record>(table: &TableState<R>, field: R::Field, raw: &str) -> String {
    let label = table.column(field).map_or("value", |column| column.label);
    format!("{label}: expected a whole number, got {raw:?}; fix the value and retry")
}

fn read_only_label<R: Record>(table: &TableState<R>) -> Option<&'static str> {
    let field = table.cursor_field()?;
    table
        .column(field)
        .filter(|column| !column.editable)
        .map(|column| column.label)
}

fn handle_key_event<R: AppRuntime>(
    store: &mut Store,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    match view_data.editing_pane() {
        Some(Pane::Companies) => {
            if let Some(output) = edit_key(&mut view_data.companies, key) {
                apply_company_outputs(store, runtime, view_data, internal_tx, vec![output]);
            }
            return false;
        }
        Some(Pane::Employees) => {
            if let Some(output) = edit_key(&mut view_data.employees, key) {
                apply_employee_outputs(store, view_data, internal_tx, vec![output]);
            }
            return false;
        }
        None => {}
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => {
            view_data.help_visible = true;
            return false;
        }
        KeyCode::Tab => {
            switch_focus(store, view_data, internal_tx);
            return false;
        }
        _ => {}
    }

    let activation = matches!(key.code, KeyCode::Enter | KeyCode::Char('e'));
    match view_data.focus {
        Pane::Companies => {
            let companies = &store.state().companies;
            let Some(outputs) = table_nav_key(
                &mut view_data.companies,
                companies.rows(),
                companies.selected(),
                key,
            ) else {
                return false;
            };
            if activation
                && !companies.is_empty()
                && let Some(label) = read_only_label(&view_data.companies)
            {
                emit_status(view_data, internal_tx, format!("{label} is read-only"));
            }
            apply_company_outputs(store, runtime, view_data, internal_tx, outputs);
        }
        Pane::Employees => {
            let Some(outputs) = table_nav_key(
                &mut view_data.employees,
                &view_data.visible_employees,
                store.state().employees.selected(),
                key,
            ) else {
                return false;
            };
            apply_employee_outputs(store, view_data, internal_tx, outputs);
        }
    }
    false
}

fn switch_focus(store: &Store, view_data: &mut ViewData, internal_tx: &Sender<InternalEvent>) {
    view_data.focus = match view_data.focus {
        Pane::Companies if employees_visible(store) => Pane::Employees,
        Pane::Companies => {
            emit_status(
                view_data,
                internal_tx,
                "select a company to show its employees",
            );
            Pane::Companies
        }
        Pane::Employees => Pane::Companies,
    };
}

/// Keys while a cell is being edited. Enter, Esc and Tab blur, which saves.
fn edit_key<R: Record>(table: &mut TableState<R>, key: KeyEvent) -> Option<TableOutput<R>> {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Tab) {
        return table.commit();
    }
    let cell = table.edit_cell_mut()?;
    match key.code {
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => cell.insert(ch),
        KeyCode::Backspace => cell.backspace(),
        KeyCode::Delete => cell.delete(),
        KeyCode::Left => cell.move_left(),
        KeyCode::Right => cell.move_right(),
        KeyCode::Home => cell.home(),
        KeyCode::End => cell.end(),
        _ => {}
    }
    None
}

fn table_nav_key<R: Record>(
    table: &mut TableState<R>,
    rows: &[R],
    selected: &SelectionSet<R::Id>,
    key: KeyEvent,
) -> Option<Vec<TableOutput<R>>> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    let total = rows.len();
    let page = table.viewport().height.max(1) as isize;
    let output = match key.code {
        KeyCode::Char('j') | KeyCode::Down => table.move_row(1, total),
        KeyCode::Char('k') | KeyCode::Up => table.move_row(-1, total),
        KeyCode::PageDown => table.move_row(page, total),
        KeyCode::PageUp => table.move_row(-page, total),
        KeyCode::Char('g') | KeyCode::Home => table.jump_row(0, total),
        KeyCode::Char('G') | KeyCode::End => table.jump_row(total.saturating_sub(1), total),
        KeyCode::Char('h') | KeyCode::Left => {
            table.move_column(-1);
            None
        }
        KeyCode::Char('l') | KeyCode::Right => {
            table.move_column(1);
            None
        }
        KeyCode::Char(' ') => rows
            .get(table.cursor_row())
            .map(|row| table.toggle_row(row.id())),
        KeyCode::Char('a') => Some(table.toggle_header(rows, selected)),
        KeyCode::Char('d') | KeyCode::Delete => rows
            .get(table.cursor_row())
            .map(|row| table.delete_row(row.id())),
        KeyCode::Enter | KeyCode::Char('e') => return Some(table.activate_at_cursor(rows)),
        _ => return None,
    };
    Some(output.into_iter().collect())
}

fn handle_mouse_event<R: AppRuntime>(
    store: &mut Store,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    mouse: MouseEvent,
    now: Instant,
) {
    let hit = hit_test(store, view_data, mouse.column, mouse.row);
    match (mouse.kind, hit) {
        (MouseEventKind::ScrollDown, Some(hit)) => {
            scroll_pane(store, runtime, view_data, internal_tx, hit.pane, WHEEL_ROWS);
        }
        (MouseEventKind::ScrollUp, Some(hit)) => {
            scroll_pane(store, runtime, view_data, internal_tx, hit.pane, -WHEEL_ROWS);
        }
        (MouseEventKind::Down(MouseButton::Left), Some(hit)) => {
            click(store, runtime, view_data, internal_tx, hit, now);
        }
        (MouseEventKind::Down(MouseButton::Left), None) => {
            commit_edits(store, runtime, view_data, internal_tx);
        }
        _ => {}
    }
}

fn scroll_pane<R: AppRuntime>(
    store: &mut Store,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    pane: Pane,
    delta: isize,
) {
    match pane {
        Pane::Companies => {
            let total = store.state().companies.len();
            let outputs = view_data.companies.scroll(delta, total).into_iter().collect();
            apply_company_outputs(store, runtime, view_data, internal_tx, outputs);
        }
        Pane::Employees => {
            let total = view_data.visible_employees.len();
            let outputs = view_data.employees.scroll(delta, total).into_iter().collect();
            apply_employee_outputs(store, view_data, internal_tx, outputs);
        }
    }
}

fn commit_edits<R: AppRuntime>(
    store: &mut Store,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    if let Some(output) = view_data.companies.commit() {
        apply_company_outputs(store, runtime, view_data, internal_tx, vec![output]);
    }
    if let Some(output) = view_data.employees.commit() {
        apply_employee_outputs(store, view_data, internal_tx, vec![output]);
    }
}

fn click<R: AppRuntime>(
    store: &mut Store,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    hit: Hit,
    now: Instant,
) {
    let on_edited_cell = match hit.pane {
        Pane::Companies => {
            edits_cell(&view_data.companies, store.state().companies.rows(), hit)
        }
        Pane::Employees => edits_cell(&view_data.employees, &view_data.visible_employees, hit),
    };
    if on_edited_cell {
        return;
    }
    commit_edits(store, runtime, view_data, internal_tx);
    view_data.focus = hit.pane;

    let double = register_click(view_data, hit, now);
    match hit.pane {
        Pane::Companies => {
            let companies = &store.state().companies;
            let outputs = click_outputs(
                &mut view_data.companies,
                companies.rows(),
                companies.selected(),
                hit,
                double,
            );
            apply_company_outputs(store, runtime, view_data, internal_tx, outputs);
        }
        Pane::Employees => {
            let outputs = click_outputs(
                &mut view_data.employees,
                &view_data.visible_employees,
                store.state().employees.selected(),
                hit,
                double,
            );
            apply_employee_outputs(store, view_data, internal_tx, outputs);
        }
    }
}

/// Records a click on a data cell and reports whether it completes a
/// double click on the same cell.
fn register_click(view_data: &mut ViewData, hit: Hit, now: Instant) -> bool {
    let (HitRow::Body(row), HitColumn::Data(column)) = (hit.row, hit.column) else {
        view_data.last_click = None;
        return false;
    };
    let current = Click {
        pane: hit.pane,
        row,
        column,
        at: now,
    };
    let double = view_data.last_click.is_some_and(|last| {
        last.pane == current.pane
            && last.row == current.row
            && last.column == current.column
            && now.saturating_duration_since(last.at) <= DOUBLE_CLICK
    });
    view_data.last_click = if double { None } else { Some(current) };
    double
}

fn edits_cell<R: Record>(table: &TableState<R>, rows: &[R], hit: Hit) -> bool {
    let (HitRow::Body(index), HitColumn::Data(column)) = (hit.row, hit.column) else {
        return false;
    };
    let (Some(row), Some(column)) = (rows.get(index), table.columns().get(column)) else {
        return false;
    };
    table.is_editing_cell(row.id(), column.key)
}

fn click_outputs<R: Record>(
    table: &mut TableState<R>,
    rows: &[R],
    selected: &SelectionSet<R::Id>,
    hit: Hit,
    double: bool,
) -> Vec<TableOutput<R>> {
    match (hit.row, hit.column) {
        (HitRow::Header, HitColumn::Checkbox) => vec![table.toggle_header(rows, selected)],
        (HitRow::Body(index), HitColumn::Checkbox) => rows
            .get(index)
            .map(|row| table.toggle_row(row.id()))
            .into_iter()
            .collect(),
        (HitRow::Body(index), HitColumn::Delete) => rows
            .get(index)
            .map(|row| table.delete_row(row.id()))
            .into_iter()
            .collect(),
        (HitRow::Body(index), HitColumn::Data(column)) => {
            let mut outputs = table
                .jump_row(index, rows.len())
                .into_iter()
                .collect::<Vec<_>>();
            table.set_cursor_col(column);
            if double
                && let (Some(row), Some(field)) = (rows.get(index), table.cursor_field())
            {
                outputs.extend(table.activate(row, field));
            }
            outputs
        }
        _ => Vec::new(),
    }
}

fn hit_test(store: &Store, view_data: &ViewData, x: u16, y: u16) -> Option<Hit> {
    let areas = pane_areas(view_data.screen, employees_visible(store));
    let point = Position { x, y };
    if areas.companies.contains(point) {
        let total = store.state().companies.len();
        return Some(hit_in_pane(
            Pane::Companies,
            areas.companies,
            &view_data.companies,
            total,
            point,
        ));
    }
    let employees = areas.employees.filter(|area| area.contains(point))?;
    Some(hit_in_pane(
        Pane::Employees,
        employees,
        &view_data.employees,
        view_data.visible_employees.len(),
        point,
    ))
}

fn hit_in_pane<R: Record>(
    pane: Pane,
    area: Rect,
    table: &TableState<R>,
    total: usize,
    point: Position,
) -> Hit {
    let inner = table_inner(area);
    if !inner.contains(point) {
        return Hit {
            pane,
            row: HitRow::Empty,
            column: HitColumn::Gap,
        };
    }

    let row = match point.y - inner.y {
        0 => HitRow::Header,
        line => {
            let index = table.viewport().offset + usize::from(line - 1);
            if index < total {
                HitRow::Body(index)
            } else {
                HitRow::Empty
            }
        }
    };

    let widths = table_widths(table, inner.width);
    let last = widths.len().saturating_sub(1);
    let mut start = inner.x;
    let mut column = HitColumn::Gap;
    for (index, width) in widths.iter().copied().enumerate() {
        if point.x >= start && point.x < start.saturating_add(width) {
            column = match index {
                0 => HitColumn::Checkbox,
                index if index == last => HitColumn::Delete,
                index => HitColumn::Data(index - 1),
            };
            break;
        }
        start = start.saturating_add(width).saturating_add(COLUMN_SPACING);
    }

    Hit { pane, row, column }
}

fn pane_areas(area: Rect, show_employees: bool) -> PaneAreas {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(STATUS_HEIGHT)])
        .split(area);
    if !show_employees {
        return PaneAreas {
            companies: outer[0],
            employees: None,
            status: outer[1],
        };
    }
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(outer[0]);
    PaneAreas {
        companies: panes[0],
        employees: Some(panes[1]),
        status: outer[1],
    }
}

/// Inside the pane border: one header line followed by the row viewport.
fn table_inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn rows_height(area: Rect) -> usize {
    usize::from(table_inner(area).height.saturating_sub(1))
}

fn sync_viewports(store: &Store, view_data: &mut ViewData) {
    let areas = pane_areas(view_data.screen, employees_visible(store));
    view_data.companies.set_viewport_height(
        rows_height(areas.companies),
        store.state().companies.len(),
    );
    if let Some(area) = areas.employees {
        view_data
            .employees
            .set_viewport_height(rows_height(area), view_data.visible_employees.len());
    }
}

fn table_widths<R: Record>(table: &TableState<R>, width: u16) -> Vec<u16> {
    let hints = table
        .columns()
        .iter()
        .map(|column| column.width)
        .collect::<Vec<_>>();
    column_widths(&hints, width)
}

/// Widths for checkbox, data and delete columns that fill `width` exactly.
/// Columns without a hint share what the hinted ones leave, and the last of
/// them absorbs the remainder.
fn column_widths(hints: &[Option<u16>], width: u16) -> Vec<u16> {
    let spacing = COLUMN_SPACING.saturating_mul(hints.len().saturating_add(1) as u16);
    let fixed = hints
        .iter()
        .flatten()
        .fold(CHECKBOX_WIDTH + DELETE_WIDTH + spacing, |sum, hint| {
            sum.saturating_add(*hint)
        });
    let flexible = hints.iter().filter(|hint| hint.is_none()).count() as u16;
    let remaining = width.saturating_sub(fixed);
    let share = remaining.checked_div(flexible).unwrap_or(0);
    let mut leftover = remaining.saturating_sub(share.saturating_mul(flexible));

    let mut widths = Vec::with_capacity(hints.len() + 2);
    widths.push(CHECKBOX_WIDTH);
    let last_flexible = hints.iter().rposition(Option::is_none);
    for (index, hint) in hints.iter().enumerate() {
        match hint {
            Some(hint) => widths.push(*hint),
            None if Some(index) == last_flexible => {
                widths.push(share.saturating_add(leftover));
                leftover = 0;
            }
            None => widths.push(share),
        }
    }
    widths.push(DELETE_WIDTH);
    widths
}

fn render(frame: &mut ratatui::Frame<'_>, store: &Store, view_data: &ViewData) {
    let areas = pane_areas(frame.area(), employees_visible(store));

    let companies = &store.state().companies;
    let mut companies_title = format!(
        "companies {} | {} selected",
        companies.len(),
        companies.selected().len()
    );
    if !view_data.pending_seeds.is_empty() {
        companies_title.push_str(" | seeding");
    }
    render_table(
        frame,
        areas.companies,
        companies_title,
        &view_data.companies,
        companies.rows(),
        companies.selected(),
        view_data.focus == Pane::Companies,
    );

    if let Some(area) = areas.employees {
        let employees = &store.state().employees;
        render_table(
            frame,
            area,
            format!(
                "employees {} | {} selected",
                view_data.visible_employees.len(),
                employees.selected().len()
            ),
            &view_data.employees,
            &view_data.visible_employees,
            employees.selected(),
            view_data.focus == Pane::Employees,
        );
    }

    let status_widget = Paragraph::new(status_text(view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, areas.status);

    if view_data.help_visible {
        let area = centered_rect(70, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_table<R: Record>(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    title: String,
    table: &TableState<R>,
    rows: &[R],
    selected: &SelectionSet<R::Id>,
    focused: bool,
) {
    let widths = table_widths(table, table_inner(area).width);
    let constraints = widths
        .iter()
        .copied()
        .map(Constraint::Length)
        .collect::<Vec<_>>();

    let mut header_cells = vec![Cell::from(checkbox(header_checked(
        selected.len(),
        rows.len(),
    )))];
    header_cells.extend(
        table
            .columns()
            .iter()
            .map(|column| Cell::from(column.label)),
    );
    header_cells.push(Cell::from(""));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let range = table.visible_range(rows.len());
    let start = range.start;
    let body = rows[range].iter().enumerate().map(|(offset, row)| {
        let index = start + offset;
        let cursor_row = focused && index == table.cursor_row();

        let mut cells = vec![Cell::from(checkbox(selected.contains(row.id())))];
        cells.extend(table.columns().iter().enumerate().map(|(column_index, column)| {
            data_cell(
                table,
                row,
                column,
                cursor_row && column_index == table.cursor_col(),
            )
        }));
        cells.push(Cell::from(DELETE_GLYPH).style(Style::default().fg(Color::Red)));

        let style = if cursor_row {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        Row::new(cells).style(style)
    });

    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let widget = Table::new(body, constraints)
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border),
        );
    frame.render_widget(widget, area);
}

fn data_cell<R: Record>(
    table: &TableState<R>,
    row: &R,
    column: &Column<R::Field>,
    highlighted: bool,
) -> Cell<'static> {
    if let EditState::Edit {
        row_id,
        field,
        cell,
    } = table.edit_state()
        && *row_id == row.id()
        && *field == column.key
    {
        return Cell::from(draft_line(cell))
            .style(Style::default().fg(Color::Black).bg(Color::Yellow));
    }

    let style = if highlighted {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Cell::from(row.field(column.key).display()).style(style)
}

fn draft_line(cell: &EditableCell) -> Line<'static> {
    let cursor = cell.cursor();
    let before = cell.draft().chars().take(cursor).collect::<String>();
    let at = cell
        .draft()
        .chars()
        .nth(cursor)
        .map_or_else(|| " ".to_owned(), String::from);
    let after = cell.draft().chars().skip(cursor + 1).collect::<String>();
    Line::from(vec![
        Span::raw(before),
        Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(after),
    ])
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn status_text(view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }
    let (mode, hints) = if view_data.editing_pane().is_some() {
        ("EDIT", "type to edit | enter/esc/tab save")
    } else {
        (
            "NAV",
            "j/k/h/l g/G pg | space select | a all | enter edit | d del | tab pane | ? help | q quit",
        )
    };
    match &view_data.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn help_overlay_text() -> &'static str {
    "global: q or ctrl+q quit | ? help | tab switch pane\n\
nav: j/k rows | h/l columns | pgup/pgdn page | g/G first/last\n\
rows: space toggle | a select/unselect all | d or del delete\n\
edit: enter or e edit cell | type to change | enter/esc/tab save\n\
mouse: wheel scroll | click checkbox/x | double click edit | click away save\n\
scroll to the last company to load more"
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
