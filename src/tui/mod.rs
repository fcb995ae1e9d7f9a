//! Ratatui-based terminal UI.
//!
//! Two screens over the same pipeline output: a chart view (series list plus
//! an area chart with look-back toggles) and a dense grid view (three 16-row
//! panels of latest values). `v` switches between them.

use std::io;
use std::time::Duration;

use chrono::{Datelike, NaiveDate, Utc};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tokio::runtime::Runtime;

use crate::app::pipeline::{self, Dashboard, GridRow, SeriesPanel, TerminalGrid};
use crate::data::sample::GRID_SERIES_TARGET;
use crate::data::store::HttpStore;
use crate::domain::{Direction, Emphasis, Trend};
use crate::error::{AppError, EXIT_DATA};
use crate::report::{
    dashboard_summary, format_date_long, format_date_short, format_grid_value, format_value,
};

mod chart;

use chart::AreaChart;

/// Rows per grid panel; three panels make up the 48-cell view.
const GRID_PANEL_ROWS: usize = GRID_SERIES_TARGET / 3;

/// Start the TUI.
pub fn run(runtime: Runtime, store: HttpStore, category: &str) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_DATA, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(runtime, store, category.to_string());
    app.refresh();
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_DATA, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(
                EXIT_DATA,
                format!("Failed to enter alternate screen: {e}"),
            ));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Charts,
    Grid,
}

struct App {
    runtime: Runtime,
    store: HttpStore,
    category: String,
    view: View,
    /// Look-back choice shared across panels: 0 = shorter, 1 = longer.
    window_choice: usize,
    selected: usize,
    dashboard: Option<Dashboard>,
    grid: Option<TerminalGrid>,
    status: String,
    today: NaiveDate,
}

impl App {
    fn new(runtime: Runtime, store: HttpStore, category: String) -> Self {
        Self {
            runtime,
            store,
            category,
            view: View::Charts,
            window_choice: 0,
            selected: 0,
            dashboard: None,
            grid: None,
            status: "Fetching catalog...".to_string(),
            today: Utc::now().date_naive(),
        }
    }

    /// Re-fetch the active view.
    fn refresh(&mut self) {
        self.today = Utc::now().date_naive();
        match self.view {
            View::Charts => {
                let result = self.runtime.block_on(pipeline::load_dashboard(
                    &self.store,
                    &self.category,
                    self.window_choice,
                    self.today,
                ));
                match result {
                    Ok(dashboard) => {
                        self.selected = self
                            .selected
                            .min(dashboard.panels.len().saturating_sub(1));
                        self.status = dashboard_summary(&dashboard);
                        self.dashboard = Some(dashboard);
                    }
                    Err(err) => self.status = format!("{err} - press r to retry"),
                }
            }
            View::Grid => {
                let result = self
                    .runtime
                    .block_on(pipeline::load_terminal_grid(&self.store, GRID_SERIES_TARGET));
                match result {
                    Ok(grid) => {
                        self.status = format!("{} series loaded", grid.rows.len());
                        self.grid = Some(grid);
                    }
                    Err(err) => self.status = format!("{err} - press r to retry"),
                }
            }
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_DATA, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_DATA, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read()
                .map_err(|e| AppError::new(EXIT_DATA, format!("Event read error: {e}")))?
            {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('v') => self.toggle_view(),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Up => {
                if self.view == View::Charts {
                    self.selected = self.selected.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                if self.view == View::Charts {
                    let last = self
                        .dashboard
                        .as_ref()
                        .map(|d| d.panels.len().saturating_sub(1))
                        .unwrap_or(0);
                    self.selected = (self.selected + 1).min(last);
                }
            }
            KeyCode::Char('1') | KeyCode::Left => self.set_window(0),
            KeyCode::Char('2') | KeyCode::Right => self.set_window(1),
            _ => {}
        }
        false
    }

    fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Charts => View::Grid,
            View::Grid => View::Charts,
        };
        let missing = match self.view {
            View::Charts => self.dashboard.is_none(),
            View::Grid => self.grid.is_none(),
        };
        if missing {
            self.refresh();
        }
    }

    fn set_window(&mut self, choice: usize) {
        if self.view == View::Charts && self.window_choice != choice {
            self.window_choice = choice;
            self.refresh();
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

        self.draw_title(frame, chunks[0]);
        match self.view {
            View::Charts => self.draw_charts(frame, chunks[1]),
            View::Grid => self.draw_grid(frame, chunks[1]),
        }
        self.draw_status(frame, chunks[2]);
    }

    fn draw_title(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let label = match self.view {
            View::Charts => "FRED ECONOMIC TERMINAL - CHARTS",
            View::Grid => "FRED ECONOMIC TERMINAL - GRID",
        };
        let title = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        frame.render_widget(title, area);
    }

    fn draw_charts(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(dashboard) = &self.dashboard else {
            let placeholder = Paragraph::new("Loading catalog... (r to retry)")
                .alignment(Alignment::Center);
            frame.render_widget(placeholder, area);
            return;
        };

        if dashboard.panels.is_empty() {
            let message = if self.category.is_empty() {
                "Catalog is empty.".to_string()
            } else {
                format!("No series match category '{}'.", self.category)
            };
            frame.render_widget(
                Paragraph::new(message).alignment(Alignment::Center),
                area,
            );
            return;
        }

        let chunks =
            Layout::horizontal([Constraint::Length(24), Constraint::Min(0)]).split(area);

        let items: Vec<ListItem> = dashboard
            .panels
            .iter()
            .map(|panel| {
                let id: String = panel.meta.id.chars().take(12).collect();
                ListItem::new(format!(
                    "{:<12} {:>4}",
                    id,
                    panel.windows[panel.active_window].label
                ))
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("series"))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let panel = &dashboard.panels[self.selected.min(dashboard.panels.len() - 1)];
        self.draw_chart_panel(frame, chunks[1], panel);
    }

    fn draw_chart_panel(&self, frame: &mut ratatui::Frame<'_>, area: Rect, panel: &SeriesPanel) {
        let title = format!("{} ({})", panel.meta.title, panel.meta.units);
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);

        if panel.points.is_empty() {
            frame.render_widget(
                Paragraph::new("No data in this window.").alignment(Alignment::Center),
                chunks[0],
            );
        } else {
            let data: Vec<(f64, f64)> = panel
                .points
                .iter()
                .map(|o| (o.date.num_days_from_ce() as f64, o.value))
                .collect();
            let (x_bounds, y_bounds) = chart::bounds(&data);
            let widget = AreaChart {
                points: &data,
                x_bounds,
                y_bounds,
                fmt_x: fmt_axis_date,
                fmt_y: fmt_axis_value,
            };
            frame.render_widget(widget, chunks[0]);
        }

        let window_state = panel
            .windows
            .iter()
            .enumerate()
            .map(|(i, w)| {
                if i == panel.active_window {
                    format!("[{}]", w.label)
                } else {
                    w.label.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let footer = match panel.points.last() {
            Some(obs) => format!(
                "Latest: {}  {}   {}  |  {}",
                format_date_long(obs.date),
                format_value(obs.value, Some(&panel.meta.units)),
                window_state,
                panel.meta.frequency,
            ),
            None => format!("{window_state}  |  {}", panel.meta.frequency),
        };
        frame.render_widget(
            Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );
    }

    fn draw_grid(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(grid) = &self.grid else {
            let placeholder =
                Paragraph::new("Loading grid... (r to retry)").alignment(Alignment::Center);
            frame.render_widget(placeholder, area);
            return;
        };

        let panels = Layout::horizontal([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

        for (index, panel_area) in panels.iter().enumerate() {
            draw_grid_panel(frame, *panel_area, grid, index * GRID_PANEL_ROWS);
        }
    }

    fn draw_status(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.view {
            View::Charts => "q quit | v grid | r refresh | up/down select | 1/2 window",
            View::Grid => "q quit | v charts | r refresh",
        };
        let line = Line::from(vec![
            Span::styled(self.status.clone(), Style::default().fg(Color::Yellow)),
            Span::raw("  "),
            Span::styled(help, Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn draw_grid_panel(frame: &mut ratatui::Frame<'_>, area: Rect, grid: &TerminalGrid, start: usize) {
    let mut lines: Vec<Line> = Vec::with_capacity(GRID_PANEL_ROWS + 1);
    lines.push(Line::from(Span::styled(
        format!("{:<10} {:<9} {:>12}", "SERIES ID", "DATE", "VALUE"),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    for index in start..start + GRID_PANEL_ROWS {
        lines.push(match grid.rows.get(index) {
            Some(row) => grid_line(row),
            None => Line::from(""),
        });
    }

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn grid_line(row: &GridRow) -> Line<'static> {
    let id: String = row.meta.id.chars().take(10).collect();
    match row.latest {
        Some(obs) => Line::from(vec![
            Span::raw(format!("{id:<10} ")),
            Span::raw(format!("{:<9} ", format_date_short(obs.date))),
            Span::styled(
                format!("{:>12}", format_grid_value(obs.value)),
                value_style(row.trend),
            ),
        ]),
        None => Line::from(vec![
            Span::raw(format!("{id:<10} ")),
            Span::styled(
                format!("{:<9} {:>12}", "N/A", ""),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    }
}

/// Direction picks the color, emphasis the weight.
fn value_style(trend: Trend) -> Style {
    let base = match trend.direction {
        Direction::Up => Style::default().fg(Color::Green),
        Direction::Down => Style::default().fg(Color::Red),
        Direction::Flat => Style::default().fg(Color::Gray),
    };
    match trend.emphasis {
        Emphasis::High => base.add_modifier(Modifier::BOLD),
        Emphasis::Medium => base,
        Emphasis::None => base.add_modifier(Modifier::DIM),
    }
}

fn fmt_axis_date(v: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(v.round() as i32)
        .map(|d| d.format("%m/%y").to_string())
        .unwrap_or_default()
}

fn fmt_axis_value(v: f64) -> String {
    if v.abs() >= 1000.0 {
        format!("{:.0}", v)
    } else {
        format!("{v:.1}")
    }
}
