use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers}, execute, terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Terminal, Frame, widgets::{Block, Borders, List, ListItem, Paragraph, ListState, Wrap}, layout::{Layout, Constraint, Direction, Rect}, style::{Style, Modifier, Color}, text::{Line, Span}};

use agenda::{
    application::{
        event_store::{EventStore, StoreError},
        notifier::{MemoryNotifier, Notification, Notifier, Severity},
        samples,
    },
    config::Config,
    domain::{clock::SystemClock, draft::{DraftChange, DraftMode, Field}, event::EventId},
    infrastructure::memory_repo::InMemoryEventRepository,
};

const SHAKE: Duration = Duration::from_millis(300);

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env()?;
    let mut store = EventStore::new(InMemoryEventRepository::new(), config.id_strategy.generator(), Box::new(SystemClock));
    if config.seed_samples {
        samples::seed(&mut store)?;
    }

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, store);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

struct App {
    store: EventStore<InMemoryEventRepository>,
    notifier: MemoryNotifier,
    selected: usize,
    list_state: ListState,
    field: Field,
    shake_until: Option<Instant>,
    last_tick: Instant,
}

impl App {
    fn selected_id(&self) -> Option<EventId> {
        self.store.sidebar().items.get(self.selected).map(|entry| entry.id.clone())
    }

    fn clamp_selection(&mut self) {
        let len = self.store.sidebar().count;
        if len == 0 { self.selected = 0; self.list_state.select(None); }
        else { if self.selected >= len { self.selected = len - 1; } self.list_state.select(Some(self.selected)); }
    }

    fn shaking(&self) -> bool { self.shake_until.is_some_and(|until| Instant::now() < until) }

    fn report(&self, err: &StoreError) {
        if let Some(notification) = err.notification() { self.notifier.notify(&notification); }
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(draft) = self.store.draft() else { return };
        let mut value = draft.display_value(self.field);
        edit(&mut value);
        let change = match self.field {
            Field::Title => DraftChange::Title(value),
            Field::Description => DraftChange::Description(value),
            Field::Start => DraftChange::Start(value),
            Field::End => DraftChange::End(value),
            Field::AllDay | Field::Status => return,
        };
        self.apply(change);
    }

    fn toggle(&mut self) {
        let Some(draft) = self.store.draft() else { return };
        let change = match self.field {
            Field::AllDay => DraftChange::AllDay(!draft.all_day),
            Field::Status => DraftChange::Status(draft.status.cycle()),
            _ => return self.edit_text(|v| v.push(' ')),
        };
        self.apply(change);
    }

    fn apply(&mut self, change: DraftChange) {
        if let Err(err) = self.store.update_draft_field(change) { self.report(&err); }
    }

    fn save(&mut self) {
        match self.store.save() {
            Ok(outcome) => self.notifier.notify(&Notification::success(format!("event {} {}", outcome.id(), outcome.kind()))),
            Err(StoreError::Validation(_)) => self.shake_until = Some(Instant::now() + SHAKE),
            Err(err) => self.report(&err),
        }
        self.clamp_selection();
    }

    fn delete(&mut self) {
        if let Some(event) = self.store.delete() {
            self.notifier.notify(&Notification::success(format!("event {} deleted", event.id)));
        }
        self.clamp_selection();
    }

    fn cycle_field(&mut self, forward: bool) {
        let pos = Field::ALL.iter().position(|f| *f == self.field).unwrap_or(0);
        let len = Field::ALL.len();
        self.field = Field::ALL[if forward { (pos + 1) % len } else { (pos + len - 1) % len }];
    }
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, store: EventStore<InMemoryEventRepository>) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut app = App { store, notifier: MemoryNotifier::new(), selected: 0, list_state: ListState::default(), field: Field::Title, shake_until: None, last_tick: Instant::now() };
    app.clamp_selection();

    loop {
        terminal.draw(|f| draw(f, &mut app))?;

        let timeout = tick_rate.saturating_sub(app.last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only act on key presses; ignore repeats and releases to prevent duplicate input
                if key.kind != KeyEventKind::Press { continue; }
                if app.store.is_editing() { handle_dialog_key(&mut app, key); }
                else if !handle_list_key(&mut app, key) { break; }
            }
        }
        if app.last_tick.elapsed() >= tick_rate {
            app.last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Returns false when the user asked to quit.
fn handle_list_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => return false,
        KeyCode::Up => { if app.selected > 0 { app.selected -= 1; } }
        KeyCode::Down => { if app.selected + 1 < app.store.sidebar().count { app.selected += 1; } }
        KeyCode::Char('n') => {
            app.store.begin_create(None);
            app.field = Field::Title;
        }
        KeyCode::Enter | KeyCode::Char('e') => {
            if let Some(id) = app.selected_id() {
                match app.store.begin_edit(&id).map(|_| ()) {
                    Ok(()) => app.field = Field::Title,
                    Err(err) => app.report(&err),
                }
            }
        }
        _ => {}
    }
    app.clamp_selection();
    true
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => app.delete(),
        KeyCode::Esc => app.store.cancel(),
        KeyCode::Enter => app.save(),
        KeyCode::Tab => app.cycle_field(true),
        KeyCode::BackTab => app.cycle_field(false),
        KeyCode::Backspace => app.edit_text(|v| { v.pop(); }),
        KeyCode::Char(' ') => app.toggle(),
        KeyCode::Char(c) => app.edit_text(|v| v.push(c)),
        _ => {}
    }
}

fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(f.size());

    let help = if app.store.is_editing() {
        "Tab: next field, Space: toggle/cycle, Enter: save, Esc: cancel, Ctrl-D: delete"
    } else {
        "n: new, Enter/e: edit, arrows: move, q: quit"
    };
    let header = Paragraph::new(help).block(Block::default().borders(Borders::ALL).title("agenda"));
    f.render_widget(header, chunks[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    let sidebar = app.store.sidebar();
    let list_items: Vec<ListItem> = sidebar.items.iter().map(|entry| {
        ListItem::new(format!("{}  {}", entry.date, entry.title))
            .style(Style::default().bg(hex_color(&entry.background_color)).fg(Color::Black))
    }).collect();
    let list = List::new(list_items)
        .block(Block::default().borders(Borders::ALL).title(format!("events ({})", sidebar.count)))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, middle[0], &mut app.list_state);

    if app.store.is_editing() { draw_dialog(f, app, middle[1]); } else { draw_details(f, app, middle[1]); }

    let footer = match app.notifier.last() {
        Some(n) => Paragraph::new(n.message).style(Style::default().fg(match n.severity { Severity::Success => Color::Green, Severity::Error => Color::Red })),
        None => Paragraph::new(""),
    };
    f.render_widget(footer.block(Block::default().borders(Borders::ALL).title("notifications")), chunks[2]);
}

fn draw_details(f: &mut Frame, app: &App, area: Rect) {
    let detail = match app.selected_id().and_then(|id| app.store.event(&id).cloned()) {
        Some(e) => {
            let desc = if e.description.is_empty() { "(no description)".to_string() } else { e.description.clone() };
            format!("Title:\n{}\n\nFrom: {}\nTo:   {}\nAll day: {}\nStatus: {}{}\n\nDescription:\n{}",
                e.title, e.start, e.end, e.all_day, e.status(), if e.locked() { " (locked)" } else { "" }, desc)
        }
        None => String::new(),
    };
    let details = Paragraph::new(detail).wrap(Wrap { trim: false }).block(Block::default().borders(Borders::ALL).title("details"));
    f.render_widget(details, area);
}

fn draw_dialog(f: &mut Frame, app: &App, area: Rect) {
    let Some(draft) = app.store.draft() else { return };
    let errors = app.store.field_errors();
    let shaking = app.shaking();
    let lines: Vec<Line> = Field::ALL.iter().map(|&field| {
        let mut style = Style::default();
        if app.store.is_locked() { style = style.fg(Color::DarkGray); }
        if field == app.field { style = style.add_modifier(Modifier::BOLD); }
        let mut spans = vec![Span::styled(format!("{:<12}{}", field.name(), draft.display_value(field)), style)];
        if let Some(message) = errors.get(field) {
            let mut error_style = Style::default().fg(Color::Red);
            if shaking { error_style = error_style.add_modifier(Modifier::REVERSED); }
            spans.push(Span::styled(format!("  {message}"), error_style));
        }
        Line::from(spans)
    }).collect();
    let title = match (app.store.mode(), draft.locked()) {
        (_, true) => "edit event (read-only)",
        (Some(DraftMode::Edit), false) => "edit event",
        _ => "new event",
    };
    let dialog = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(dialog, area);
}

fn hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() { return Color::Reset; }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Reset,
    }
}
