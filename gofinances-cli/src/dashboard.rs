use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gofinances_client::{TransactionListController, TransactionsApi};
use gofinances_core::{DashboardSnapshot, LoadStatus, TransactionType};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::sync::mpsc::Receiver;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

use crate::render::{card_values, CARD_TITLES, TABLE_HEADERS};
use crate::worker::{self, DashboardEvent, DashboardRequest};

#[derive(Debug, Default)]
pub struct ViewState {
    pub table: TableState,
    pub status: Option<(String, Color)>,
    pub in_flight: usize,
}

impl ViewState {
    /// Keep the selection inside the current list.
    fn clamp(&mut self, len: usize) {
        match (self.table.selected(), len) {
            (_, 0) => self.table.select(None),
            (None, _) => self.table.select(Some(0)),
            (Some(i), n) if i >= n => self.table.select(Some(n - 1)),
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let current = self.table.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.table.select(Some(next as usize));
    }

    pub fn apply_event(&mut self, ev: DashboardEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.status = Some(match ev {
            DashboardEvent::Loaded { count } => (format!("Loaded {count} transactions"), Color::Gray),
            DashboardEvent::LoadFailed { message } => (
                format!("Could not load transactions: {message} (r to retry)"),
                Color::Red,
            ),
            DashboardEvent::Deleted { id, removed: true } => (format!("Deleted {id}"), Color::Gray),
            DashboardEvent::Deleted { id, removed: false } => {
                (format!("Deleted {id} (it was not listed)"), Color::Yellow)
            }
            DashboardEvent::DeleteFailed { id, message } => {
                (format!("Could not delete {id}: {message}"), Color::Red)
            }
        });
    }
}

pub fn run_dashboard<A: TransactionsApi + 'static>(
    controller: TransactionListController<A>,
) -> Result<()> {
    let (req_tx, req_rx) = tokio::sync::mpsc::unbounded_channel();
    let (ev_tx, ev_rx) = std::sync::mpsc::channel();
    let handle = tokio::spawn(worker::run_worker(controller.clone(), req_rx, ev_tx));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = dashboard_loop(&mut terminal, &controller, &req_tx, &ev_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // late responses must not land on a closed dashboard
    controller.deactivate();
    handle.abort();

    res
}

fn dashboard_loop<A: TransactionsApi>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &TransactionListController<A>,
    requests: &UnboundedSender<DashboardRequest>,
    events: &Receiver<DashboardEvent>,
) -> Result<()> {
    let snapshots = controller.subscribe();
    let mut view = ViewState::default();

    send(requests, &mut view, DashboardRequest::Load);

    loop {
        for ev in events.try_iter() {
            view.apply_event(ev);
        }

        let snap = snapshots.borrow().clone();
        view.clamp(snap.transactions.len());
        terminal.draw(|f| draw(f, &snap, &mut view))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let len = snap.transactions.len();
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Down | KeyCode::Char('j') => view.move_selection(1, len),
                    KeyCode::Up | KeyCode::Char('k') => view.move_selection(-1, len),
                    KeyCode::Char('r') => send(requests, &mut view, DashboardRequest::Load),
                    KeyCode::Char('d') | KeyCode::Delete => {
                        if let Some(t) = view.table.selected().and_then(|i| snap.transactions.get(i)) {
                            let id = t.transaction.id.clone();
                            view.status = Some((format!("Deleting {}…", t.transaction.title), Color::Gray));
                            send(requests, &mut view, DashboardRequest::Delete { id });
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

fn send(requests: &UnboundedSender<DashboardRequest>, view: &mut ViewState, req: DashboardRequest) {
    if requests.send(req).is_ok() {
        view.in_flight += 1;
    } else {
        view.status = Some(("Background worker stopped".to_string(), Color::Red));
    }
}

pub fn draw(f: &mut Frame, snap: &DashboardSnapshot, view: &mut ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, chunks[0]);
    draw_cards(f, chunks[1], snap);
    draw_table(f, chunks[2], snap, view);
    draw_status(f, chunks[3], snap, view);
}

fn draw_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "GoFinances",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            "Listagem",
            Style::default().add_modifier(Modifier::UNDERLINED),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_cards(f: &mut Frame, area: Rect, snap: &DashboardSnapshot) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let values = card_values(snap.balance.as_ref());
    for (i, (title, value)) in CARD_TITLES.iter().zip(values).enumerate() {
        // the total card is highlighted
        let (border, text) = if i == 2 {
            (Style::default().fg(Color::Yellow), Style::default().fg(Color::Yellow))
        } else {
            (Style::default(), Style::default())
        };
        let card = Paragraph::new(Text::from(Line::from(Span::styled(
            value,
            text.add_modifier(Modifier::BOLD),
        ))))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(*title),
        );
        f.render_widget(card, columns[i]);
    }
}

fn draw_table(f: &mut Frame, area: Rect, snap: &DashboardSnapshot, view: &mut ViewState) {
    let header = Row::new(TABLE_HEADERS.map(Cell::from))
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let rows = snap.transactions.iter().map(|t| {
        let value_color = match t.transaction.kind {
            TransactionType::Income => Color::Green,
            TransactionType::Outcome => Color::Red,
        };
        Row::new(vec![
            Cell::from(t.transaction.title.clone()),
            Cell::from(t.formatted_value.clone()).style(Style::default().fg(value_color)),
            Cell::from(t.transaction.category.title.clone()),
            Cell::from(t.formatted_date.clone()),
        ])
    });

    let widths = [
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(25),
        Constraint::Percentage(15),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("transactions"))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    f.render_stateful_widget(table, area, &mut view.table);
}

fn draw_status(f: &mut Frame, area: Rect, snap: &DashboardSnapshot, view: &ViewState) {
    let (text, color) = match (&view.status, &snap.load_error, snap.status) {
        (Some((msg, color)), _, _) => (msg.clone(), *color),
        (None, Some(err), _) => (err.clone(), Color::Red),
        (None, None, LoadStatus::Unloaded) => ("Loading…".to_string(), Color::Gray),
        (None, None, LoadStatus::Loaded) => (String::new(), Color::Gray),
    };
    let busy = if view.in_flight > 0 { " [working]" } else { "" };
    let line = Line::from(vec![
        Span::styled(format!("{text}{busy}"), Style::default().fg(color)),
        Span::styled(
            "  ↑/↓ select  d delete  r reload  q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
