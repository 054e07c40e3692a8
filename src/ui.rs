use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use inventory_manager::{display_row, parse_item_input, Inventory, Item};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Browse,
    AddName { name: String },
    AddPrice { name: String, price: String },
    ConfirmDelete { index: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct App {
    pub inventory: Inventory,
    pub state: TableState,
    pub mode: Mode,
    pub status: Status,
}

impl App {
    pub fn new(inventory: Inventory) -> Self {
        let mut state = TableState::default();
        if !inventory.is_empty() {
            state.select(Some(0));
        }

        let status = match &inventory.last_load().stopped_at {
            Some(err) => Status::Error(format!("File truncated at {}", err)),
            None => Status::Info(format!("Loaded {} items", inventory.len())),
        };

        Self {
            inventory,
            state,
            mode: Mode::Browse,
            status,
        }
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.state.selected().and_then(|i| self.inventory.items().get(i))
    }

    /// Handle one key press; returns false when the app should exit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.mode.clone() {
            Mode::Browse => return self.handle_browse_key(key),
            Mode::AddName { mut name } => match key.code {
                KeyCode::Esc => self.cancel(),
                KeyCode::Enter => {
                    self.mode = Mode::AddPrice {
                        name,
                        price: String::new(),
                    }
                }
                KeyCode::Backspace => {
                    name.pop();
                    self.mode = Mode::AddName { name };
                }
                KeyCode::Char(c) => {
                    name.push(c);
                    self.mode = Mode::AddName { name };
                }
                _ => {}
            },
            Mode::AddPrice { name, mut price } => match key.code {
                KeyCode::Esc => self.cancel(),
                KeyCode::Enter => self.submit_add(&name, &price),
                KeyCode::Backspace => {
                    price.pop();
                    self.mode = Mode::AddPrice { name, price };
                }
                KeyCode::Char(c) => {
                    price.push(c);
                    self.mode = Mode::AddPrice { name, price };
                }
                _ => {}
            },
            Mode::ConfirmDelete { index } => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.delete(index),
                _ => self.cancel(),
            },
        }
        true
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char('a') => {
                self.mode = Mode::AddName {
                    name: String::new(),
                }
            }
            KeyCode::Char('d') => {
                if let Some(index) = self.state.selected() {
                    self.mode = Mode::ConfirmDelete { index };
                }
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Home => self.select_clamped(0),
            KeyCode::End => self.select_clamped(usize::MAX),
            _ => {}
        }
        true
    }

    fn cancel(&mut self) {
        self.mode = Mode::Browse;
        self.status = Status::Info("Cancelled".to_string());
    }

    fn submit_add(&mut self, name: &str, price: &str) {
        let item = match parse_item_input(name, price) {
            Ok(item) => item,
            Err(e) => {
                // Stay in the form so the price can be corrected
                self.status = Status::Error(e.to_string());
                return;
            }
        };

        let label = item.name().to_string();
        self.mode = Mode::Browse;
        match self.inventory.add(item) {
            Ok(()) => {
                self.status = Status::Info(format!("Added {}", label));
                self.select_clamped(usize::MAX);
            }
            Err(e) => self.status = Status::Error(e.to_string()),
        }
    }

    fn delete(&mut self, index: usize) {
        self.mode = Mode::Browse;
        match self.inventory.delete(index) {
            Ok(item) => {
                self.status = Status::Info(format!("Deleted {}", item.name()));
                self.select_clamped(index);
            }
            Err(e) => self.status = Status::Error(e.to_string()),
        }
    }

    fn reload(&mut self) {
        self.status = match self.inventory.load() {
            Ok(report) => match report.stopped_at {
                Some(err) => Status::Error(format!("File truncated at {}", err)),
                None => Status::Info(format!("Reloaded {} items", report.loaded)),
            },
            Err(e) => Status::Error(e.to_string()),
        };
        let selected = self.state.selected().unwrap_or(0);
        self.select_clamped(selected);
    }

    fn select_clamped(&mut self, index: usize) {
        let len = self.inventory.len();
        if len == 0 {
            self.state.select(None);
        } else {
            self.state.select(Some(index.min(len - 1)));
        }
    }

    pub fn next(&mut self) {
        let len = self.inventory.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.inventory.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && !app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Item table
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_table(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);

    match &app.mode {
        Mode::AddName { .. } | Mode::AddPrice { .. } => render_add_form(f, app),
        Mode::ConfirmDelete { index } => render_confirm_delete(f, app, *index),
        Mode::Browse => {}
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let spans = vec![
        Span::styled(
            "Inventory",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Items: {}", app.inventory.len()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Value: {:.2}", app.inventory.total_value()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  |  "),
        Span::styled(
            app.inventory.path().display().to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["#", "Name", "Price"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.inventory.items().iter().enumerate().map(|(i, item)| {
        Row::new(vec![
            Cell::from(format!("{}", i + 1)),
            Cell::from(truncate(item.name(), 40)),
            Cell::from(format!("{:.2}", item.price())).style(Style::default().fg(Color::Green)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(42),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Items "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let (message, color) = match &app.status {
        Status::Info(msg) => (msg.as_str(), Color::Cyan),
        Status::Error(msg) => (msg.as_str(), Color::Red),
    };

    let mut spans = vec![Span::styled(format!(" {} ", message), Style::default().fg(color))];

    for (key, label) in [("a", "Add"), ("d", "Delete"), ("r", "View"), ("↑/↓", "Nav"), ("q", "Quit")] {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(" {}", label)));
    }

    let status = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

fn render_add_form(f: &mut Frame, app: &App) {
    let (name, price, editing_price) = match &app.mode {
        Mode::AddName { name } => (name.as_str(), "", false),
        Mode::AddPrice { name, price } => (name.as_str(), price.as_str(), true),
        _ => return,
    };

    let active = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let idle = Style::default().fg(Color::White);

    let lines = vec![
        Line::from(vec![
            Span::styled("Item Name:  ", if editing_price { idle } else { active }),
            Span::raw(name.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Item Price: ", if editing_price { active } else { idle }),
            Span::raw(price.to_string()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter confirm | Esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let area = centered_rect(50, 8, f.size());
    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Add Item "),
    );

    f.render_widget(Clear, area);
    f.render_widget(form, area);
}

fn render_confirm_delete(f: &mut Frame, app: &App, index: usize) {
    let row = app
        .inventory
        .items()
        .get(index)
        .map(|item| display_row(index + 1, item))
        .unwrap_or_default();

    let lines = vec![
        Line::from(row),
        Line::from(""),
        Line::from(Span::styled(
            "y delete | any other key cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let area = centered_rect(50, 7, f.size());
    let dialog = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Delete Item "),
    );

    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
