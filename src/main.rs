mod ui;

use std::error::Error;
use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::EnvFilter;

use slide_puzzle::{Config, MoveOutcome, Phase, Session, TickOutcome, Ticker};
use ui::{Action, Terminal};

/// Input poll interval while no game clock is running.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn init_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

struct App {
    session: Session,
    ticker: Ticker,
    /// Whether the last completion beat the best time; cleared on a new game.
    new_best: bool,
}

impl App {
    fn new(session: Session) -> Self {
        Self {
            session,
            ticker: Ticker::default(),
            new_best: false,
        }
    }

    fn run(&mut self, terminal: &mut Terminal) -> Result<(), Box<dyn Error>> {
        loop {
            terminal.draw(&self.session, self.new_best)?;

            let timeout = self.ticker.timeout(Instant::now()).unwrap_or(IDLE_POLL);
            if event::poll(timeout)? {
                let action = match event::read()? {
                    Event::Key(key) => ui::key_action(key),
                    Event::Mouse(mouse) => ui::mouse_action(mouse, self.session.size()),
                    _ => None,
                };
                if let Some(action) = action {
                    if action == Action::Quit {
                        info!("quit requested");
                        return Ok(());
                    }
                    self.apply(action)?;
                }
            }

            self.deliver_ticks(Instant::now());
        }
    }

    fn apply(&mut self, action: Action) -> Result<(), Box<dyn Error>> {
        let now = Instant::now();

        match action {
            Action::Quit => {}
            Action::Start if self.session.phase() == Phase::Running => {}
            Action::Start | Action::Restart => {
                self.session.restart()?;
                self.new_best = false;
                self.ticker.arm(now);
            }
            Action::Difficulty(difficulty) => {
                self.session.change_difficulty(difficulty.size())?;
                self.new_best = false;
            }
            Action::Slide(direction) => {
                let outcome = self.session.request_slide(direction);
                self.record(outcome);
            }
            Action::Click(pos) => {
                let outcome = self.session.request_move(pos.row, pos.col);
                self.record(outcome);
            }
        }

        self.ticker.sync(self.session.phase(), now);
        Ok(())
    }

    fn record(&mut self, outcome: MoveOutcome) {
        if let MoveOutcome::Completed { new_best } = outcome {
            self.new_best = new_best;
        }
    }

    fn deliver_ticks(&mut self, now: Instant) {
        for _ in 0..self.ticker.due(now) {
            if self.session.tick() != TickOutcome::Advanced {
                break;
            }
        }
        self.ticker.sync(self.session.phase(), now);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    init_logging(&config)?;

    let mut session = Session::with_config(config.session_config());
    session.change_difficulty(config.difficulty.size())?;
    info!(
        size = session.size(),
        time_limit = session.time_limit(),
        seeded = config.seed.is_some(),
        "slide puzzle ready"
    );

    let mut terminal = Terminal::enter()?;
    let result = App::new(session).run(&mut terminal);
    drop(terminal);
    result
}
