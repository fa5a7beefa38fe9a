// Command-line settings. Defaults reproduce the classic 250x250 window with a 20 px border.

use clap::{Parser, ValueEnum};
use tracing::Level;

use crate::error::Error;
use crate::types::inner_span;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EffectKind {
    /// rising heat through the fire palette
    Fire,
    /// four interfering sine waves
    Plasma,
    /// scrolling test card with disc, ring and diagonals
    Rings,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "simple-fire", about = "Procedural fire and plasma in a double-buffered window")]
pub struct Config {
    /// effect drawn every frame
    #[arg(long, value_enum, default_value_t = EffectKind::Fire)]
    pub effect: EffectKind,

    /// surface width in pixels
    #[arg(long, default_value_t = 250)]
    pub width: usize,

    /// surface height in pixels
    #[arg(long, default_value_t = 250)]
    pub height: usize,

    /// border left out of the simulation on every side
    #[arg(long, default_value_t = 20)]
    pub padding: usize,

    /// refresh cap of the window
    #[arg(long, default_value_t = 60)]
    pub fps: usize,

    /// seed for the fire's ignition row (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// window title
    #[arg(long, default_value = "simple-shm")]
    pub title: String,

    /// more logging: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Reject geometry the simulators cannot run on: at least two simulated columns
    /// and one simulated row.
    pub fn validate(&self) -> Result<(), Error> {
        if !inner_span(self.width, self.padding).is_some_and(|cols| cols >= 2) {
            return Err(Error::Config(format!(
                "width {} leaves fewer than 2 columns inside padding {}",
                self.width, self.padding
            )));
        }
        if !inner_span(self.height, self.padding).is_some_and(|rows| rows >= 1) {
            return Err(Error::Config(format!(
                "height {} leaves no rows inside padding {}",
                self.height, self.padding
            )));
        }
        if self.fps == 0 {
            return Err(Error::Config("fps must be at least 1".into()));
        }
        Ok(())
    }

    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("simple-fire").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_the_classic_window() {
        let cfg = parse(&[]);
        assert_eq!(cfg.effect, EffectKind::Fire);
        assert_eq!((cfg.width, cfg.height, cfg.padding), (250, 250, 20));
        assert_eq!(cfg.title, "simple-shm");
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.log_level(), Level::WARN);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn flags() {
        let cfg = parse(&["--effect", "plasma", "--seed", "9", "-vv", "--padding", "0"]);
        assert_eq!(cfg.effect, EffectKind::Plasma);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.log_level(), Level::DEBUG);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn unknown_effect_is_a_usage_error() {
        assert!(Config::try_parse_from(["simple-fire", "--effect", "smoke"]).is_err());
    }

    #[test]
    fn geometry_too_small_for_padding() {
        let narrow = parse(&["--width", "41"]);
        assert!(matches!(narrow.validate(), Err(Error::Config(_))));
        let flat = parse(&["--height", "40"]);
        assert!(matches!(flat.validate(), Err(Error::Config(_))));
        let smallest = parse(&["--width", "42", "--height", "41"]);
        assert!(smallest.validate().is_ok());
        let still = parse(&["--fps", "0"]);
        assert!(still.validate().is_err());
    }

    #[test]
    fn huge_padding_is_rejected_not_wrapped() {
        // 2 * padding would overflow, or wrap to 0 with overflow checks off
        for pad in [u64::MAX.to_string(), (1u64 << 63).to_string()] {
            let cfg = parse(&["--padding", &pad]);
            assert!(matches!(cfg.validate(), Err(Error::Config(_))), "padding {pad}");
        }
    }
}
