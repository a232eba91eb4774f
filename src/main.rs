use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton, MouseEvent, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::Env;
use log::{error, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tui_big_text::{BigText, PixelSize};

use lineup_tui::{
    config::{LineupConfig, SubstitutesConfig, SubstitutesPosition},
    data::{DataClient, LineupSource},
    field::{cell_to_field, parse_color, FieldDisplay},
    interactive::InteractiveState,
    layout::{compute_layout, LayoutMode, LineupLayout},
    model::LineupData,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SubstitutesArg {
    None,
    Bottom,
    Left,
    Right,
}

impl SubstitutesArg {
    fn into_config(self) -> SubstitutesConfig {
        let position = match self {
            SubstitutesArg::None | SubstitutesArg::Bottom => SubstitutesPosition::Bottom,
            SubstitutesArg::Left => SubstitutesPosition::Left,
            SubstitutesArg::Right => SubstitutesPosition::Right,
        };
        SubstitutesConfig {
            enabled: self != SubstitutesArg::None,
            position,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Lineup JSON file
    #[arg(short, long, conflicts_with = "url", required_unless_present = "url")]
    file: Option<PathBuf>,

    /// Lineup endpoint returning JSON
    #[arg(short, long)]
    url: Option<String>,

    /// Refresh interval in seconds
    #[arg(short, long, default_value_t = 15)]
    interval: u64,

    #[arg(long, value_enum, default_value_t = LayoutMode::FullPitch)]
    layout: LayoutMode,

    /// Pitch width in canvas pixels
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Pitch height in canvas pixels
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    #[arg(long, value_enum, default_value_t = SubstitutesArg::None)]
    substitutes: SubstitutesArg,

    /// Show a draggable ball
    #[arg(long)]
    ball: bool,

    #[arg(long)]
    no_names: bool,

    #[arg(long)]
    no_numbers: bool,

    /// Home colour as hex, e.g. FF5722
    #[arg(long)]
    home_color: Option<String>,

    /// Away colour as hex
    #[arg(long)]
    away_color: Option<String>,

    /// Home team name for positioning-record feeds
    #[arg(long, default_value = "Home")]
    home_name: String,

    /// Away team name for positioning-record feeds
    #[arg(long, default_value = "Away")]
    away_name: String,

    #[arg(long, default_value = "lineup-tui.log")]
    log_file: PathBuf,
}

impl Args {
    fn source(&self) -> Option<LineupSource> {
        match (&self.file, &self.url) {
            (Some(path), _) => Some(LineupSource::File(path.clone())),
            (None, Some(url)) => Some(LineupSource::Url(url.clone())),
            (None, None) => None,
        }
    }

    fn config(&self) -> LineupConfig {
        let mut config = LineupConfig {
            width: self.width,
            height: self.height,
            layout: self.layout,
            show_player_names: !self.no_names,
            show_jersey_numbers: !self.no_numbers,
            substitutes: self.substitutes.into_config(),
            ..LineupConfig::default()
        };
        config.ball.enabled = self.ball;
        if let Some(color) = &self.home_color {
            config.home_team_color = color.clone();
        }
        if let Some(color) = &self.away_color {
            config.away_team_color = color.clone();
        }
        config
    }
}

type Refresh = Result<LineupData, String>;

struct App {
    should_quit: bool,
    config: LineupConfig,
    source: String,
    lineup: Option<LineupData>,
    layout: Option<LineupLayout>,
    interactive: InteractiveState,
    field_area: Rect,
    last_refresh: Option<DateTime<Local>>,
    last_error: Option<String>,
}

impl App {
    fn new(config: LineupConfig, source: String) -> Self {
        let interactive = InteractiveState::new(&config);
        Self {
            should_quit: false,
            config,
            source,
            lineup: None,
            layout: None,
            interactive,
            field_area: Rect::default(),
            last_refresh: None,
            last_error: None,
        }
    }

    fn relayout(&mut self) {
        let Some(lineup) = &self.lineup else {
            return;
        };
        match compute_layout(
            lineup,
            &self.config,
            Some(self.interactive.overrides()),
            self.interactive.ball_position().filter(|_| self.config.ball.enabled),
        ) {
            Ok(layout) => self.layout = Some(layout),
            Err(err) => {
                error!("layout failed: {err}");
                self.last_error = Some(err.to_string());
                self.layout = None;
            }
        }
    }

    fn on_refresh(&mut self, refresh: Refresh) {
        match refresh {
            Ok(lineup) => {
                self.lineup = Some(lineup);
                self.last_refresh = Some(Local::now());
                self.last_error = None;
                self.relayout();
            }
            Err(err) => self.last_error = Some(err),
        }
    }

    fn on_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') => {
                self.interactive.clear_overrides();
                info!("manual positions cleared");
            }
            KeyCode::Char('l') => {
                self.config.layout = next_layout(self.config.layout);
                // positions dragged in one layout mean nothing in another
                self.interactive.clear_overrides();
                info!("layout switched to {}", self.config.layout);
            }
            KeyCode::Char('n') => self.config.show_player_names = !self.config.show_player_names,
            KeyCode::Char('#') => self.config.show_jersey_numbers = !self.config.show_jersey_numbers,
            KeyCode::Char('s') => {
                self.config.substitutes.enabled = !self.config.substitutes.enabled;
            }
            KeyCode::Char('b') => {
                self.config.ball.enabled = !self.config.ball.enabled;
                if self.config.ball.enabled && self.interactive.ball_position().is_none() {
                    if let Some(ball) = self.config.initial_ball_position() {
                        self.interactive.set_ball_position(ball);
                    }
                }
            }
            _ => return,
        }
        self.relayout();
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        let Some(layout) = &self.layout else {
            return;
        };
        let Some(at) = cell_to_field(self.field_area, layout.canvas, mouse.column, mouse.row) else {
            return;
        };

        let changed = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.interactive.press(at, layout),
            MouseEventKind::Drag(MouseButton::Left) => self.interactive.drag(at),
            MouseEventKind::Up(MouseButton::Left) => self.interactive.release(at).is_some(),
            _ => false,
        };
        if changed {
            self.relayout();
        }
    }
}

fn next_layout(mode: LayoutMode) -> LayoutMode {
    match mode {
        LayoutMode::FullPitch => LayoutMode::HalfPitch,
        LayoutMode::HalfPitch => LayoutMode::SplitPitch,
        LayoutMode::SplitPitch => LayoutMode::FullPitch,
    }
}

fn init_logging(path: &Path) -> Result<()> {
    // the alternate screen owns stdout, so logs go to a file
    let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let source = args.source().context("either --file or --url is required")?;
    let config = args.config();
    info!("starting with {} layout from {source}", config.layout);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, source.to_string());

    let (tx, mut rx) = mpsc::channel::<Refresh>(16);
    let client = Arc::new(DataClient::new().with_team_names(args.home_name.clone(), args.away_name.clone()));
    let interval_secs = args.interval.max(1);

    tokio::spawn(async move {
        loop {
            let refresh = client.load(&source).await.map_err(|err| {
                error!("refresh from {source} failed: {err:#}");
                format!("{err:#}")
            });
            if tx.send(refresh).await.is_err() {
                break;
            }
            tokio::time::sleep(Duration::from_secs(interval_secs)).await;
        }
    });

    let res = run_app(&mut terminal, &mut app, &mut rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("terminal loop failed: {err}");
    }
    res.context("terminal loop failed")
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: &mut mpsc::Receiver<Refresh>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => app.on_key(key.code),
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }

        while let Ok(refresh) = rx.try_recv() {
            app.on_refresh(refresh);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Team header
            Constraint::Min(10),   // Pitch
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_field(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let Some(lineup) = &app.lineup else {
        let p = Paragraph::new(format!("Loading lineup from {}...", app.source)).alignment(Alignment::Center);
        f.render_widget(p, area);
        return;
    };

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let sheets = [
        (&lineup.home_team, &app.config.home_team_color, halves[0]),
        (&lineup.away_team, &app.config.away_team_color, halves[1]),
    ];
    for (sheet, fallback, half) in sheets {
        let color = parse_color(sheet.color.as_deref().unwrap_or(fallback));
        f.render_widget(Block::default().bg(color), half);

        let name = if sheet.name.is_empty() { "-" } else { sheet.name.as_str() };
        if half.width < 4 * name.len() as u16 {
            let p = Paragraph::new(name.to_string())
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center);
            f.render_widget(p, half);
        } else {
            let big = BigText::builder()
                .pixel_size(PixelSize::Quadrant)
                .style(Style::default().fg(Color::White))
                .lines(vec![name.to_string().into()])
                .alignment(Alignment::Center)
                .build();
            f.render_widget(big, half);
        }
    }
}

fn draw_field(f: &mut Frame, app: &mut App, area: Rect) {
    let title = format!(" {} ", app.config.layout.as_str().replace('_', " ").to_uppercase());
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);
    app.field_area = inner;

    match (&app.layout, &app.lineup) {
        (Some(layout), Some(lineup)) => {
            f.render_widget(FieldDisplay::new(layout, &app.config, lineup), inner);
        }
        _ => {
            let message = app.last_error.as_deref().unwrap_or("No lineup yet");
            f.render_widget(Paragraph::new(message.to_string()).alignment(Alignment::Center), inner);
        }
    }
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut content = vec![Span::styled(
        format!(" {} ", app.config.layout),
        Style::default().bg(Color::White).fg(Color::Black).add_modifier(Modifier::BOLD),
    )];

    if let Some(layout) = &app.layout {
        content.push(Span::raw(format!(
            "  {} on pitch, {} on the bench",
            layout.players.len(),
            layout.substitutes.len()
        )));
    }
    let moved = app.interactive.overrides().len();
    if moved > 0 {
        content.push(Span::styled(format!("  [{moved} moved]"), Style::default().fg(Color::Yellow)));
    }
    if let Some(at) = app.last_refresh {
        content.push(Span::raw(format!("  updated {}", at.format("%H:%M:%S"))));
    }
    if let Some(err) = &app.last_error {
        content.push(Span::styled(format!("  {err}"), Style::default().fg(Color::Red)));
    }
    content.push(Span::styled(
        "  q quit  l layout  c reset  n names  # numbers  s bench  b ball",
        Style::default().fg(Color::Cyan),
    ));

    let status_bar = Paragraph::new(Line::from(content)).block(Block::default().borders(Borders::TOP | Borders::BOTTOM));
    f.render_widget(status_bar, area);
}
