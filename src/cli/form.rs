//! Interactive form for classifying an article
//!
//! Two inputs (title, body), one trigger, one result block. Rejected input
//! shows up as a warning line in the result block.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};
use std::io;

use veritas::classifier::{shared, Predictor};
use veritas::config::VeritasConfig;
use veritas::models::{OutputRecord, RawInput, Verdict};
use veritas::reporters::text::OUT_OF_DOMAIN_NOTICE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Body,
}

/// Result of the last submission
#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Prediction(OutputRecord),
    Rejected(String),
}

struct App<'a> {
    predictor: Predictor<'a>,
    title: String,
    body: String,
    focus: Field,
    outcome: Option<Outcome>,
}

impl<'a> App<'a> {
    fn new(predictor: Predictor<'a>) -> Self {
        Self {
            predictor,
            title: String::new(),
            body: String::new(),
            focus: Field::Title,
            outcome: None,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Title => &mut self.title,
            Field::Body => &mut self.body,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Title => Field::Body,
            Field::Body => Field::Title,
        };
    }

    fn submit(&mut self) {
        let input = RawInput::new(self.title.as_str(), self.body.as_str());
        self.outcome = Some(match self.predictor.predict(&input) {
            Ok(record) => Outcome::Prediction(record),
            Err(rejected) => Outcome::Rejected(rejected.to_string()),
        });
    }

    /// Apply one key press. Returns true when the form should close.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') if ctrl => return true,
            KeyCode::F(5) => self.submit(),
            KeyCode::Char('r') if ctrl => self.submit(),
            KeyCode::Enter if ctrl => self.submit(),
            KeyCode::Char('u') if ctrl => self.focused_mut().clear(),
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            KeyCode::Enter => match self.focus {
                Field::Title => self.focus = Field::Body,
                Field::Body => self.body.push('\n'),
            },
            KeyCode::Backspace => {
                self.focused_mut().pop();
            }
            KeyCode::Char(c) if !ctrl => self.focused_mut().push(c),
            _ => {}
        }
        false
    }
}

pub fn run(config: &VeritasConfig) -> Result<()> {
    // Load before touching the terminal so failures print normally
    let artifacts = shared(&config.artifacts.dir).context("Cannot load model artifacts")?;
    let predictor = Predictor::new(artifacts, config.policy, config.validation);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(predictor);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn verdict_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::LikelyReal => Color::Green,
        Verdict::LikelyFake => Color::Red,
        Verdict::Uncertain => Color::Yellow,
        Verdict::OutOfDomain => Color::Blue,
    }
}

fn input_block(label: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(label)
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(8),
            Constraint::Length(1),
        ])
        .split(f.area());

    let header = Paragraph::new(" Veritas | Fake News Detection")
        .style(Style::default().fg(Color::Cyan).bold())
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let cursor = |field: Field| if app.focus == field { "▏" } else { "" };

    let title = Paragraph::new(format!("{}{}", app.title, cursor(Field::Title)))
        .block(input_block(" Title ", app.focus == Field::Title));
    f.render_widget(title, chunks[1]);

    let body = Paragraph::new(format!("{}{}", app.body, cursor(Field::Body)))
        .wrap(Wrap { trim: false })
        .block(input_block(" Article text ", app.focus == Field::Body));
    f.render_widget(body, chunks[2]);

    render_result(f, chunks[3], app.outcome.as_ref());

    let help = " Tab:Switch field  F5/Ctrl+R/Ctrl+Enter:Analyze  Ctrl+U:Clear field  Esc:Quit";
    let footer = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, chunks[4]);
}

fn render_result(f: &mut Frame, area: Rect, outcome: Option<&Outcome>) {
    let block = Block::default().borders(Borders::ALL).title(" Result ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let record = match outcome {
        None => {
            let hint = Paragraph::new("Enter an article and press F5 to analyze.")
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(hint, inner);
            return;
        }
        Some(Outcome::Rejected(message)) => {
            let warning = Paragraph::new(format!("⚠ {message}"))
                .style(Style::default().fg(Color::Yellow))
                .wrap(Wrap { trim: true });
            f.render_widget(warning, inner);
            return;
        }
        Some(Outcome::Prediction(record)) => record,
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let color = verdict_color(record.verdict);
    let status = Line::from(vec![
        Span::styled("Verdict: ", Style::default().bold()),
        Span::styled(record.verdict.to_string(), Style::default().fg(color).bold()),
    ]);
    f.render_widget(Paragraph::new(status), rows[0]);

    let real = record.confidence.real;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(real.clamp(0.0, 1.0))
        .label(format!("REAL {:.1}%", real * 100.0));
    f.render_widget(gauge, rows[1]);

    let details = format!(
        "FAKE: {:.3}  REAL: {:.3}  Non-zero features: {}",
        record.confidence.fake, record.confidence.real, record.non_zero_features
    );
    f.render_widget(
        Paragraph::new(details).style(Style::default().fg(Color::DarkGray)),
        rows[2],
    );

    if record.low_density_warning {
        let notice = Paragraph::new(format!("⚠ {OUT_OF_DOMAIN_NOTICE}"))
            .style(Style::default().fg(Color::Yellow))
            .wrap(Wrap { trim: true });
        f.render_widget(notice, rows[3]);
    }
}
