use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::session::{SessionConfig, DEFAULT_TIME_LIMIT};

/// Board sizes offered to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn size(&self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Normal => 4,
            Difficulty::Hard => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn from_size(size: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.size() == size)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "slide-puzzle")]
#[command(about = "Sliding tile puzzle against the clock")]
pub struct Config {
    /// Initial board size
    #[arg(short, long, value_enum, default_value = "easy")]
    pub difficulty: Difficulty,

    /// Seconds allowed per game
    #[arg(
        long,
        default_value_t = DEFAULT_TIME_LIMIT,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub time_limit: u32,

    /// Seed for reproducible shuffles
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (the terminal is used by the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            time_limit: self.time_limit,
            seed: self.seed,
        }
    }

    /// Default log filter; `RUST_LOG` overrides it.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
