//! Command-line arguments and the validated settings derived from them.

use std::time::Duration;

use clap::Parser;

use crate::error::ConfigError;
use crate::fractal::Rule;
use crate::geometry::{Point, Segment};

pub const WINDOW_W: u32 = 800;
pub const WINDOW_H: u32 = 600;
pub const DEFAULT_GENERATIONS: usize = 10;
pub const DEFAULT_DELAY_MS: u64 = 1000;
pub const DEFAULT_SEED: Segment = Segment::new(Point::new(250.0, 300.0), Point::new(550.0, 300.0));

/// Largest generation the viewer agrees to build (Koch generation 11).
pub const MAX_SEGMENTS: u64 = 1 << 22;

#[derive(Parser, Debug)]
#[command(name = "line-fractals")]
#[command(about = "Grow a C, Dragon or Koch curve one generation per frame")]
pub struct Args {
    /// Subdivision rule: C, Dragon or Koch (case-sensitive)
    pub rule: String,

    /// Number of generations to display, counting the seed
    #[arg(short, long, default_value_t = DEFAULT_GENERATIONS)]
    pub generations: usize,

    /// How long each generation stays on screen
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = WINDOW_W)]
    pub width: u32,

    #[arg(long, default_value_t = WINDOW_H)]
    pub height: u32,

    /// Seed segment as x1,y1,x2,y2 in window pixels
    #[arg(long, value_parser = parse_seed, allow_hyphen_values = true)]
    pub seed: Option<Segment>,

    /// Print every displayed generation to stdout
    #[arg(long)]
    pub dump: bool,

    /// Keep the window open after the last generation
    #[arg(long)]
    pub hold: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub rule: String,
    pub generations: usize,
    pub delay: Duration,
    pub width: u32,
    pub height: u32,
    pub seed: Segment,
    pub dump: bool,
    pub hold: bool,
}

impl Config {
    /// Config with default window and pacing for `rule`.
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            generations: DEFAULT_GENERATIONS,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            width: WINDOW_W,
            height: WINDOW_H,
            seed: DEFAULT_SEED,
            dump: false,
            hold: false,
        }
    }

    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let config = Self {
            rule: args.rule,
            generations: args.generations,
            delay: Duration::from_millis(args.delay_ms),
            width: args.width,
            height: args.height,
            seed: args.seed.unwrap_or(DEFAULT_SEED),
            dump: args.dump,
            hold: args.hold,
        };
        config.validate()?;
        Ok(config)
    }

    /// `None` when the rule name is not recognised.
    pub fn resolved_rule(&self) -> Option<Rule> {
        Rule::from_name(&self.rule)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generations == 0 {
            return Err(ConfigError::NoGenerations);
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyWindow {
                width: self.width,
                height: self.height,
            });
        }
        // An unknown rule empties the curve after the seed, so only real
        // rules need sizing.
        if let Some(rule) = self.resolved_rule() {
            let last = u32::try_from(self.generations - 1).unwrap_or(u32::MAX);
            let segments = rule.segment_count(1, last).unwrap_or(u64::MAX);
            if segments > MAX_SEGMENTS {
                return Err(ConfigError::TooManySegments {
                    rule: rule.name().to_string(),
                    generation: last,
                    segments,
                    limit: MAX_SEGMENTS,
                });
            }
        }
        Ok(())
    }
}

/// Parse `x1,y1,x2,y2`.
pub fn parse_seed(s: &str) -> Result<Segment, ConfigError> {
    let coords = s
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ConfigError::InvalidSeed(s.to_string()))?;
    match coords.as_slice() {
        &[x1, y1, x2, y2] if coords.iter().all(|c| c.is_finite()) => {
            Ok(Segment::new(Point::new(x1, y1), Point::new(x2, y2)))
        }
        _ => Err(ConfigError::InvalidSeed(s.to_string())),
    }
}
