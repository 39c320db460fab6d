// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Terminal front-end for the select chain: four panels, one per level,
//! driven through the same `SelectHost` seam the tests use.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use drilldown_app::{Chain, Level, SelectHost, SelectIds, SelectOption};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use std::io;
use std::time::Duration;
use time::OffsetDateTime;

const PANEL_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectPanel {
    id: String,
    title: &'static str,
    level: Level,
    options: Vec<SelectOption>,
    value: String,
    cursor: usize,
}

impl SelectPanel {
    fn new(id: &str, title: &'static str, level: Level) -> Self {
        Self {
            id: id.to_owned(),
            title,
            level,
            options: Vec::new(),
            value: String::new(),
            cursor: 0,
        }
    }

    fn highlighted_value(&self) -> String {
        self.options
            .get(self.cursor)
            .map(|option| option.value.clone())
            .unwrap_or_default()
    }
}

/// The four select panels. This is the concrete widget provider: the chain
/// reads values and replaces option sets through `SelectHost`, the event
/// loop moves the highlight and commits selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectPanels {
    panels: Vec<SelectPanel>,
}

impl SelectPanels {
    pub fn new(ids: &SelectIds) -> Self {
        Self {
            panels: vec![
                SelectPanel::new(&ids.department, "Department", Level::Department),
                SelectPanel::new(&ids.section, "Section", Level::Section),
                SelectPanel::new(&ids.division, "Division", Level::Division),
                SelectPanel::new(&ids.plant, "Plant", Level::Plant),
            ],
        }
    }

    fn panel(&self, id: &str) -> Option<&SelectPanel> {
        self.panels.iter().find(|panel| panel.id == id)
    }

    fn panel_mut(&mut self, id: &str) -> Option<&mut SelectPanel> {
        self.panels.iter_mut().find(|panel| panel.id == id)
    }
}

impl SelectHost for SelectPanels {
    fn value(&self, id: &str) -> Option<String> {
        self.panel(id).map(|panel| panel.value.clone())
    }

    fn apply(&mut self, id: &str, options: Vec<SelectOption>, selected: &str) {
        if let Some(panel) = self.panel_mut(id) {
            panel.options = options;
            panel.value = selected.to_owned();
            panel.cursor = panel
                .options
                .iter()
                .position(|option| option.value == panel.value)
                .unwrap_or(0);
        }
    }
}

struct App {
    chain: Chain,
    panels: SelectPanels,
    focus: usize,
    fetched_at: OffsetDateTime,
}

impl App {
    fn new(chain: Chain, panels: SelectPanels, fetched_at: OffsetDateTime) -> Self {
        Self {
            chain,
            panels,
            focus: 0,
            fetched_at,
        }
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Tab | KeyCode::Right => {
                self.focus = (self.focus + 1) % PANEL_COUNT;
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.focus = (self.focus + PANEL_COUNT - 1) % PANEL_COUNT;
            }
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Enter => self.commit(),
            _ => {}
        }
        false
    }

    fn move_cursor(&mut self, delta: isize) {
        let panel = &mut self.panels.panels[self.focus];
        if panel.options.is_empty() {
            return;
        }
        let last = panel.options.len() - 1;
        let next = panel.cursor.saturating_add_signed(delta).min(last);
        panel.cursor = next;
    }

    /// Commit the highlighted option of the focused panel and cascade the
    /// levels below it.
    fn commit(&mut self) {
        let panel = &mut self.panels.panels[self.focus];
        let level = panel.level;
        panel.value = panel.highlighted_value();
        self.chain.on_change(&mut self.panels, level);
    }

    fn status_line(&self) -> String {
        let fetched = self
            .fetched_at
            .format(&time::macros::format_description!(
                "[hour]:[minute]:[second] UTC"
            ))
            .unwrap_or_else(|_| self.fetched_at.to_string());
        format!(
            "{} rows · fetched {} · Tab/←→ focus · ↑↓ highlight · Enter select · q quit",
            self.chain.rows().len(),
            fetched
        )
    }
}

/// Run the interactive chain browser until the user quits.
pub fn run_app(chain: Chain, panels: SelectPanels, fetched_at: OffsetDateTime) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut app = App::new(chain, panels, fetched_at);

    let mut result = Ok(());
    loop {
        if let Err(error) = terminal.draw(|frame| render(frame, &app)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if app.handle_key(key) {
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
    result
}

fn render(frame: &mut ratatui::Frame<'_>, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);

    for (index, panel) in app.panels.panels.iter().enumerate() {
        render_panel(frame, columns[index], panel, index == app.focus);
    }

    let status = Paragraph::new(app.status_line()).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, rows[1]);
}

fn render_panel(frame: &mut ratatui::Frame<'_>, area: Rect, panel: &SelectPanel, focused: bool) {
    let picked = panel
        .options
        .iter()
        .find(|option| option.value == panel.value)
        .map_or(panel.value.as_str(), |option| option.label.as_str());
    let title = format!("{} · {picked}", panel.title);

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let items: Vec<ListItem> = panel
        .options
        .iter()
        .map(|option| {
            let item = ListItem::new(option.label.clone());
            if option.value == panel.value {
                item.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(panel.cursor));
    frame.render_stateful_widget(list, area, &mut state);
}
