use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap,
    },
};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::dashboard::{Dashboard, View};
use crate::intake::{Intake, IntakePhase, REDIRECT_DELAY};
use crate::seed::{REVIEWER_NOTE, SAMPLE_DOCUMENT};
use crate::state::ReviewStore;
use crate::{Category, ItemStatus, ReviewItem, Severity};

/// Which top-level screen is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Upload,
    Dashboard,
}

/// Application state for the TUI.
pub struct App {
    store: ReviewStore,
    intake: Intake,
    document: Option<PathBuf>,
    pub screen: Screen,
    pub dashboard: Dashboard,
    redirect_in: Option<Duration>,
    should_quit: bool,
    show_help: bool,
    status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App.
    ///
    /// `document` is the file handed to the intake simulation; without one the
    /// built-in sample document name is used. With `skip_intake` the dashboard
    /// opens immediately on the store as given.
    pub fn new(store: ReviewStore, document: Option<PathBuf>, skip_intake: bool) -> Self {
        let name = document_name(document.as_ref());
        Self {
            store,
            intake: Intake::new(),
            document,
            screen: if skip_intake {
                Screen::Dashboard
            } else {
                Screen::Upload
            },
            dashboard: Dashboard::new(name),
            redirect_in: None,
            should_quit: false,
            show_help: false,
            status_message: None,
        }
    }

    pub fn store(&self) -> &ReviewStore {
        &self.store
    }

    pub fn intake(&self) -> &Intake {
        &self.intake
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Advance the analysis simulation by `delta`.
    ///
    /// On completion the store is re-seeded and the dashboard opens after
    /// [`REDIRECT_DELAY`].
    pub fn advance(&mut self, delta: Duration) {
        if self.intake.tick(delta) {
            self.store.reset_all();
            let name = self
                .intake
                .file_name()
                .map(str::to_owned)
                .unwrap_or_else(|| document_name(self.document.as_ref()));
            self.dashboard.reset(name);
            self.redirect_in = Some(REDIRECT_DELAY);
            return;
        }

        if let Some(remaining) = self.redirect_in {
            if delta >= remaining {
                self.redirect_in = None;
                self.screen = Screen::Dashboard;
            } else {
                self.redirect_in = Some(remaining - delta);
            }
        }
    }

    /// Handle keyboard input, dispatching to the appropriate screen handler.
    pub fn handle_input(&mut self, key: KeyEvent) {
        if self.show_help {
            // Any key closes help
            self.show_help = false;
            return;
        }

        match self.screen {
            Screen::Upload => self.handle_upload_input(key),
            Screen::Dashboard => self.handle_dashboard_input(key),
        }
    }

    fn handle_upload_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Enter if self.intake.phase() == IntakePhase::Idle => {
                let started = match &self.document {
                    Some(path) => self.intake.start(path),
                    None => self.intake.start_unchecked(SAMPLE_DOCUMENT),
                };
                if let Err(e) = started {
                    self.set_status(format!("Cannot analyze: {}", e));
                }
            }
            _ => {}
        }
    }

    fn handle_dashboard_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Tab => {
                self.dashboard.select_next();
            }
            KeyCode::BackTab => {
                self.dashboard.select_prev();
            }
            KeyCode::Char(c @ '1'..='6') => {
                let idx = c as usize - '1' as usize;
                self.dashboard.select_view(View::ALL[idx]);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.dashboard.cursor_next(&self.store);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.dashboard.cursor_prev();
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(status) = self.dashboard.toggle_selected(&mut self.store) {
                    let msg = match status {
                        ItemStatus::Resolved => "Marked as resolved",
                        ItemStatus::Open => "Reopened",
                    };
                    self.set_status(msg.to_string());
                }
            }
            KeyCode::Char('n') => {
                // Upload new: back to the intake screen
                self.intake.reset();
                self.redirect_in = None;
                self.screen = Screen::Upload;
            }
            _ => {}
        }
    }

    fn set_status(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    /// Render the UI, dispatching to the appropriate screen renderer.
    fn render(&mut self, frame: &mut Frame) {
        // Expire old status messages
        let expired = self
            .status_message
            .as_ref()
            .map(|(_, time)| time.elapsed() >= Duration::from_secs(3))
            .unwrap_or(false);
        if expired {
            self.status_message = None;
        }

        if self.show_help {
            self.render_help(frame);
            return;
        }

        match self.screen {
            Screen::Upload => self.render_upload(frame),
            Screen::Dashboard => self.render_dashboard(frame),
        }
    }

    /// Render the upload / analysis progress screen.
    fn render_upload(&self, frame: &mut Frame) {
        let area = centered_rect(70, 60, frame.area());
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let heading = Paragraph::new(vec![
            Line::from(Span::styled(
                "PhD Report Reviewer",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("Upload your thesis draft for instant analysis"),
        ])
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(heading, chunks[0]);

        match self.intake.phase() {
            IntakePhase::Idle => {
                let target = document_name(self.document.as_ref());
                let body = Paragraph::new(vec![
                    Line::from(format!("Document: {}", target)),
                    Line::from("Supports .PDF, .DOCX, or .TEX (Max 50MB)"),
                    Line::from(""),
                    Line::from("Press Enter to analyze, q to quit"),
                ])
                .block(Block::default().borders(Borders::ALL).title("Upload"))
                .wrap(Wrap { trim: false });
                frame.render_widget(body, chunks[1]);
            }
            IntakePhase::Processing { .. } => {
                let inner = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(2), Constraint::Length(3)])
                    .split(chunks[1]);
                let label = self.intake.stage_label().unwrap_or_default();
                let body = Paragraph::new(vec![
                    Line::from(Span::styled(
                        "Analyzing Document",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(label, Style::default().fg(Color::Blue))),
                ])
                .block(Block::default().borders(Borders::ALL).title("Analysis"));
                frame.render_widget(body, inner[0]);

                let gauge = Gauge::default()
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(self.intake.file_name().unwrap_or_default().to_string()),
                    )
                    .gauge_style(Style::default().fg(Color::Blue))
                    .percent(self.intake.progress_percent());
                frame.render_widget(gauge, inner[1]);
            }
            IntakePhase::Complete => {
                let body = Paragraph::new(vec![
                    Line::from(Span::styled(
                        "Analysis Complete!",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from("Redirecting to dashboard..."),
                ])
                .block(Block::default().borders(Borders::ALL));
                frame.render_widget(body, chunks[1]);
            }
        }

        let status_text = match &self.status_message {
            Some((msg, _)) => msg.clone(),
            None => "Enter: analyze  q: quit".to_string(),
        };
        let status_bar = Paragraph::new(status_text).block(Block::default().borders(Borders::ALL));
        frame.render_widget(status_bar, chunks[2]);
    }

    /// Render sidebar, header, main panel and status bar.
    fn render_dashboard(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(1)])
            .split(rows[0]);

        self.render_sidebar(frame, columns[0]);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(columns[1]);

        self.render_header(frame, main[0]);
        match self.dashboard.view() {
            View::Overview => self.render_overview(frame, main[1]),
            View::Category(category) => self.render_category(frame, main[1], category),
        }

        let status_text = match &self.status_message {
            Some((msg, _)) => msg.clone(),
            None => "Tab/1-6: section  j/k: navigate  Space: toggle resolved  n: upload new  ?: help  q: quit"
                .to_string(),
        };
        let status_bar = Paragraph::new(status_text)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        frame.render_widget(status_bar, rows[1]);
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .dashboard
            .sidebar(&self.store)
            .into_iter()
            .enumerate()
            .map(|(idx, entry)| {
                let mut spans = vec![Span::raw(format!("{} {}", idx + 1, entry.label))];
                if entry.badge > 0 {
                    spans.push(Span::styled(
                        format!(" ({})", entry.badge),
                        Style::default().fg(Color::LightBlue),
                    ));
                }
                let style = if entry.view == self.dashboard.view() {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(spans)).style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Dissertation Check"),
        );
        frame.render_widget(list, area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut title = vec![Span::styled(
            self.dashboard.title(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if let Some(progress) = self.dashboard.progress_line(&self.store) {
            title.push(Span::raw("   "));
            title.push(Span::styled(progress, Style::default().fg(Color::Green)));
        }

        let header = Paragraph::new(vec![
            Line::from(title),
            Line::from(Span::styled(
                self.dashboard.subtitle(),
                Style::default().fg(Color::Gray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    /// Stat cards, category and severity charts, reviewer's note.
    fn render_overview(&self, frame: &mut Frame, area: Rect) {
        let stats = self.store.stats();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(8),
                Constraint::Length(7),
            ])
            .split(area);

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25); 4])
            .split(rows[0]);

        let card_data = [
            ("Total Issues", stats.total_issues, Color::White),
            ("Critical Errors", stats.critical_count, Color::Red),
            ("Major Issues", stats.major_count, Color::Yellow),
            ("Minor Tweaks", stats.minor_count, Color::Blue),
        ];
        for ((title, value, color), card_area) in card_data.into_iter().zip(cards.iter()) {
            let card = Paragraph::new(Line::from(Span::styled(
                value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )))
            .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(card, *card_area);
        }

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let category_bars: Vec<Bar> = self
            .store
            .category_breakdown()
            .into_iter()
            .map(|entry| {
                Bar::default()
                    .value(entry.count as u64)
                    .label(Line::from(entry.category.as_str()))
                    .style(Style::default().fg(Color::Blue))
            })
            .collect();
        let category_chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Issues by Category"),
            )
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(1)
            .data(BarGroup::default().bars(&category_bars));
        frame.render_widget(category_chart, charts[0]);

        let severity_bars = [
            (Severity::Critical, stats.critical_count),
            (Severity::Major, stats.major_count),
            (Severity::Minor, stats.minor_count),
        ]
        .map(|(severity, count)| {
            Bar::default()
                .value(count as u64)
                .label(Line::from(severity.as_str()))
                .style(Style::default().fg(severity_color(severity)))
        });
        let severity_chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Quality Impact Distribution"),
            )
            .bar_width(8)
            .bar_gap(2)
            .data(BarGroup::default().bars(&severity_bars));
        frame.render_widget(severity_chart, charts[1]);

        let note = Paragraph::new(REVIEWER_NOTE)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Reviewer's Note"),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(note, rows[2]);
    }

    /// Finding list on the left, detail of the selected finding on the right.
    fn render_category(&self, frame: &mut Frame, area: Rect, category: Category) {
        let items = self.store.items_by_category(category);

        if items.is_empty() {
            let empty = Paragraph::new("No issues found in this category.")
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(empty, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let list_items: Vec<ListItem> = items
            .iter()
            .map(|item| {
                let marker = if item.is_open() { "○" } else { "✓" };
                let mut style = Style::default().fg(severity_color(item.severity()));
                if !item.is_open() {
                    style = style.add_modifier(Modifier::DIM | Modifier::CROSSED_OUT);
                }
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", marker)),
                    Span::styled(format!("[{}] ", item.severity().as_str().to_uppercase()), style),
                    Span::raw(item.issue().to_string()),
                ]))
            })
            .collect();

        let mut state = ListState::default().with_selected(Some(self.dashboard.cursor));
        let list = List::new(list_items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Findings (j/k, Space to toggle)"),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let detail = match items.get(self.dashboard.cursor) {
            Some(item) => finding_detail(item),
            None => Text::from("No finding selected"),
        };
        let paragraph = Paragraph::new(detail)
            .block(Block::default().borders(Borders::ALL).title("Detail"))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, chunks[1]);
    }

    /// Render the help overlay.
    fn render_help(&self, frame: &mut Frame) {
        let help_text = [
            "Report Review - Keyboard Shortcuts",
            "",
            "Navigation:",
            "  Tab / Shift+Tab - Next / previous section",
            "  1-6             - Jump to section",
            "  j / Down        - Next finding",
            "  k / Up          - Previous finding",
            "",
            "Actions:",
            "  Space / Enter   - Toggle resolved status",
            "  n               - Upload a new document",
            "",
            "Other:",
            "  ?               - Show this help",
            "  q / Esc         - Quit",
            "",
            "Press any key to close this help",
        ];

        let text = Text::from(help_text.iter().map(|&s| Line::from(s)).collect::<Vec<_>>());

        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: false });

        let area = centered_rect(60, 80, frame.area());
        frame.render_widget(paragraph, area);
    }
}

fn document_name(path: Option<&PathBuf>) -> String {
    path.and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| SAMPLE_DOCUMENT.to_string())
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical => Color::Red,
        Severity::Major => Color::Yellow,
        Severity::Minor => Color::Blue,
        Severity::Info => Color::Gray,
    }
}

/// Multi-line card for one finding.
fn finding_detail(item: &ReviewItem) -> Text<'static> {
    let status = match item.status() {
        ItemStatus::Open => Span::styled("OPEN", Style::default().fg(Color::Yellow)),
        ItemStatus::Resolved => Span::styled("RESOLVED", Style::default().fg(Color::Green)),
    };
    Text::from(vec![
        Line::from(vec![
            Span::styled(
                item.severity().as_str().to_uppercase(),
                Style::default()
                    .fg(severity_color(item.severity()))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  Page {}  ", item.page())),
            Span::styled(item.location().to_string(), Style::default().fg(Color::Gray)),
            Span::raw("  "),
            status,
        ]),
        Line::from(""),
        Line::from(Span::styled(
            item.issue().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Correction: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(item.suggestion().to_string()),
        ]),
    ])
}

/// Create a centered rectangle.
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

/// Setup the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Failed to create terminal")
}

/// Restore the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Launch the interactive review dashboard.
///
/// `tick` is the event poll interval; the analysis simulation advances by
/// the real elapsed time between loop iterations.
pub fn run_tui(mut app: App, tick: Duration) -> Result<()> {
    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;

    // Main event loop
    let result = (|| -> Result<()> {
        let mut last_tick = Instant::now();
        loop {
            terminal
                .draw(|f| app.render(f))
                .context("Failed to draw frame")?;

            if app.should_quit {
                break;
            }

            if event::poll(tick).context("Failed to poll events")?
                && let Event::Key(key) = event::read().context("Failed to read event")?
            {
                // Ignore key release events
                if key.kind == event::KeyEventKind::Press {
                    app.handle_input(key);
                }
            }

            let now = Instant::now();
            app.advance(now - last_tick);
            last_tick = now;
        }
        Ok(())
    })();

    // Restore terminal in all cases
    restore_terminal(&mut terminal)?;

    result
}
