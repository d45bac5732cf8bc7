mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::KeyEvent,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};
use typetest::{
    app_dirs::AppDirs,
    config::{self, Config, FileConfigStore},
    error::ConfigError,
    evaluator::{Evaluator, Metrics},
    input::{InputBuffer, KeyAction},
    logging,
    results::TestResults,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    session::{validate_duration, Difficulty, SessionConfig, TextCategory},
    text::select_text,
};

/// timed typing practice with live wpm and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the shown text before the countdown runs out. Speed, accuracy and errors update as you type and are summarised when time is up."
)]
pub struct Cli {
    /// number of seconds to run test (15, 30, 60, 120 or 300)
    #[clap(short = 'd', long, value_parser = parse_duration)]
    duration: Option<u32>,

    /// kind of text to practice on
    #[clap(short = 't', long = "text", value_enum)]
    text_category: Option<TextCategory>,

    /// difficulty of the practice text
    #[clap(short = 'D', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// custom prompt to use instead of the built-in texts
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// read default settings from this file instead of the user config
    #[clap(long)]
    config: Option<PathBuf>,

    /// write logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn parse_duration(s: &str) -> Result<u32, String> {
    let secs = s.parse::<u32>().map_err(|e| e.to_string())?;
    validate_duration(secs).map_err(|e| e.to_string())
}

impl Cli {
    /// Command line values win over the config file
    fn session_config(&self, cfg: &Config) -> Result<SessionConfig, ConfigError> {
        SessionConfig::new(
            self.duration.unwrap_or(cfg.duration_secs),
            self.text_category.unwrap_or(cfg.text_category),
            self.difficulty.unwrap_or(cfg.difficulty),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Typing,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub settings: SessionConfig,
    pub custom_prompt: Option<String>,
    pub evaluator: Evaluator,
    pub input: InputBuffer,
    pub results: Option<TestResults>,
    pub state: AppState,
}

impl App {
    pub fn new(settings: SessionConfig, custom_prompt: Option<String>) -> Self {
        let prompt = custom_prompt
            .clone()
            .unwrap_or_else(|| select_text(&settings));

        Self {
            evaluator: Evaluator::new(prompt, settings.duration_secs()),
            settings,
            custom_prompt,
            input: InputBuffer::default(),
            results: None,
            state: AppState::Typing,
        }
    }

    /// Same text, fresh attempt
    pub fn retry(&mut self) {
        self.evaluator.reset();
        self.clear_attempt();
    }

    /// Fresh attempt on a newly selected text
    pub fn new_text(&mut self) {
        let prompt = self
            .custom_prompt
            .clone()
            .unwrap_or_else(|| select_text(&self.settings));
        self.evaluator.restart(prompt);
        self.clear_attempt();
    }

    fn clear_attempt(&mut self) {
        self.input.clear();
        self.results = None;
        self.state = AppState::Typing;
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        match (self.state, KeyAction::from(key)) {
            (_, KeyAction::Quit) => return Flow::Quit,
            (_, KeyAction::Retry) | (AppState::Results, KeyAction::Insert('r')) => self.retry(),
            (_, KeyAction::New) | (AppState::Results, KeyAction::Insert('n')) => self.new_text(),
            (AppState::Results, _) => {}
            (AppState::Typing, action) => {
                if !self.evaluator.has_finished() && self.input.apply(action) {
                    self.evaluator.on_input(self.input.as_str());
                }
            }
        }

        Flow::Continue
    }

    pub fn on_tick(&mut self, now: Instant) {
        if let Some(metrics) = self.evaluator.advance(now) {
            self.complete(metrics);
        }
    }

    fn complete(&mut self, metrics: Metrics) {
        self.results = Some(TestResults::new(metrics, self.settings.duration_secs()));
        self.state = AppState::Results;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        // logging is optional, the app runs without it
        let _ = logging::init(&path);
    }

    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let cfg = config::load_or_default(&store);

    let settings = match cli.session_config(&cfg) {
        Ok(settings) => settings,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, e.to_string()).exit();
        }
    };

    tracing::info!(
        duration_secs = settings.duration_secs(),
        category = %settings.category,
        difficulty = %settings.difficulty,
        "starting"
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings, cli.prompt);
    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        tracing::error!("event loop failed: {e}");
    }

    res
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        match runner.step() {
            AppEvent::Key(key) => {
                if app.on_key(key) == Flow::Quit {
                    break;
                }
            }
            AppEvent::Resize | AppEvent::Tick => {}
        }

        // steady typing can starve Tick, so the countdown catches up here
        app.on_tick(Instant::now());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::time::Duration;
    use typetest::session::Status;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
    }

    fn test_app(prompt: &str, secs: u32) -> App {
        let settings = SessionConfig::new(secs, TextCategory::Sentences, Difficulty::Easy).unwrap();
        App::new(settings, Some(prompt.to_string()))
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["typetest"]);

        assert_eq!(cli.duration, None);
        assert_eq!(cli.text_category, None);
        assert_eq!(cli.difficulty, None);
        assert_eq!(cli.prompt, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_cli_duration() {
        let cli = Cli::parse_from(["typetest", "-d", "30"]);
        assert_eq!(cli.duration, Some(30));

        let cli = Cli::parse_from(["typetest", "--duration", "300"]);
        assert_eq!(cli.duration, Some(300));
    }

    #[test]
    fn test_cli_rejects_unsupported_duration() {
        let err = Cli::try_parse_from(["typetest", "-d", "45"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        assert!(Cli::try_parse_from(["typetest", "-d", "soon"]).is_err());
    }

    #[test]
    fn test_cli_text_and_difficulty() {
        let cli = Cli::parse_from(["typetest", "-t", "code", "-D", "hard"]);
        assert_eq!(cli.text_category, Some(TextCategory::Code));
        assert_eq!(cli.difficulty, Some(Difficulty::Hard));

        let cli = Cli::parse_from(["typetest", "--text", "paragraphs", "--difficulty", "easy"]);
        assert_eq!(cli.text_category, Some(TextCategory::Paragraphs));
        assert_eq!(cli.difficulty, Some(Difficulty::Easy));
    }

    #[test]
    fn test_cli_overrides_config() {
        let cfg = Config {
            duration_secs: 120,
            text_category: TextCategory::Paragraphs,
            difficulty: Difficulty::Hard,
        };

        let cli = Cli::parse_from(["typetest", "-d", "15"]);
        let settings = cli.session_config(&cfg).unwrap();
        assert_eq!(settings.duration_secs(), 15);
        assert_eq!(settings.category, TextCategory::Paragraphs);
        assert_eq!(settings.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_app_new_with_custom_prompt() {
        let app = test_app("custom test prompt", 60);

        assert_eq!(app.evaluator.target(), "custom test prompt");
        assert_eq!(app.evaluator.remaining_secs(), 60);
        assert_eq!(app.state, AppState::Typing);
        assert!(app.results.is_none());
    }

    #[test]
    fn test_app_new_selects_text() {
        let app = App::new(SessionConfig::default(), None);
        assert!(app.evaluator.target_len() > 0);
    }

    #[test]
    fn test_typing_drives_evaluator() {
        let mut app = test_app("cat", 60);

        type_str(&mut app, "cx");
        assert_eq!(app.evaluator.status(), Status::Active);
        assert_eq!(app.evaluator.errors(), 1);
        assert_eq!(app.evaluator.accuracy(), 50);

        app.on_key(key(KeyCode::Backspace));
        assert_eq!(app.input.as_str(), "c");
        assert_eq!(app.evaluator.typed_text(), "c");
        assert_eq!(app.evaluator.errors(), 1);
        assert_eq!(app.evaluator.accuracy(), 100);
    }

    #[test]
    fn test_enter_types_newline() {
        let mut app = test_app("a\nb", 60);

        type_str(&mut app, "a");
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.evaluator.matched(), 2);
    }

    #[test]
    fn test_countdown_moves_to_results() {
        let mut app = test_app("cat", 15);
        type_str(&mut app, "ca");

        app.on_tick(Instant::now() + Duration::from_secs(16));

        assert_eq!(app.state, AppState::Results);
        let results = app.results.unwrap();
        assert_eq!(results.duration_secs, 15);
        assert_eq!(results.metrics.accuracy, 100);
        assert_eq!(results.metrics.errors, 0);
    }

    #[test]
    fn test_input_ignored_after_results() {
        let mut app = test_app("cat", 15);
        type_str(&mut app, "c");
        app.on_tick(Instant::now() + Duration::from_secs(16));

        type_str(&mut app, "a");
        assert_eq!(app.evaluator.typed_text(), "c");
        assert_eq!(app.state, AppState::Results);
    }

    #[test]
    fn test_retry_from_results() {
        let mut app = test_app("cat", 15);
        type_str(&mut app, "cx");
        app.on_tick(Instant::now() + Duration::from_secs(16));

        app.on_key(key(KeyCode::Char('r')));

        assert_eq!(app.state, AppState::Typing);
        assert_eq!(app.evaluator.status(), Status::Idle);
        assert_eq!(app.evaluator.errors(), 0);
        assert_eq!(app.evaluator.remaining_secs(), 15);
        assert_eq!(app.input.as_str(), "");
        assert!(app.results.is_none());
    }

    #[test]
    fn test_new_text_while_typing() {
        let mut app = App::new(SessionConfig::default(), None);
        type_str(&mut app, "xyz");
        assert!(app.evaluator.is_ticking());

        app.on_key(key(KeyCode::Right));

        assert_eq!(app.evaluator.status(), Status::Idle);
        assert!(!app.evaluator.is_ticking());
        assert_eq!(app.input.as_str(), "");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app("cat", 15);
        assert_eq!(app.on_key(key(KeyCode::Esc)), Flow::Quit);
        assert_eq!(
            app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Flow::Quit
        );
        assert_eq!(app.on_key(key(KeyCode::Char('c'))), Flow::Continue);
    }
}
