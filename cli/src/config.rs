use labyrinth::{BuildConfig, DividerKind, FillerKind, PerfectDivider};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing_subscriber::EnvFilter;

use crate::{Args, FillerArg, VariantArg};

const LOG_FILTER: &str = "info";

// Fillers that always succeed inside an imperfect room
const RANDOM_FILLERS: [FillerKind; 4] = [
    FillerKind::Empty,
    FillerKind::Path,
    FillerKind::Spiral,
    FillerKind::Snake,
];

// ============================================================================
// Logging
// ============================================================================

/// `RUST_LOG` overrides the default filter; logs go to stderr so the maze can be piped
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ============================================================================
// Build Configuration
// ============================================================================

impl From<VariantArg> for DividerKind {
    fn from(variant: VariantArg) -> Self {
        match variant {
            VariantArg::Perfect => Self::Perfect,
            VariantArg::Imperfect => Self::Imperfect,
        }
    }
}

impl From<FillerArg> for FillerKind {
    fn from(filler: FillerArg) -> Self {
        match filler {
            FillerArg::Empty => Self::Empty,
            FillerArg::Path => Self::Path,
            FillerArg::Spiral => Self::Spiral,
            FillerArg::CastellationW => Self::CastellationW,
            FillerArg::CastellationH => Self::CastellationH,
            FillerArg::Snake => Self::Snake,
        }
    }
}

/// With --random the divider and filler are drawn from `rng`. The perfect
/// divider is only drawn when the grid size and exit can carry one.
pub fn build_config<R: Rng>(args: &Args, rng: &mut R) -> BuildConfig {
    let mut config = BuildConfig {
        divider: args.variant.into(),
        filler: args.filler.into(),
        strip_doors: !args.keep_doors,
        snake: !args.no_snake,
        goal: args.goal,
    };

    if args.random {
        let perfect_fits = PerfectDivider::plan(args.width, args.height, args.exit).is_ok();
        config.divider = if perfect_fits && rng.random_bool(0.5) {
            DividerKind::Perfect
        } else {
            DividerKind::Imperfect
        };
        config.filler = RANDOM_FILLERS.choose(rng).copied().unwrap_or_default();
        config.goal = rng.random_bool(0.5);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn args(line: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("labyrinth").chain(line.iter().copied())).unwrap()
    }

    #[test]
    fn flags_map_onto_the_build_config() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = build_config(
            &args(&["--variant", "imperfect", "--filler", "castellation-h", "--keep-doors", "--no-snake"]),
            &mut rng,
        );
        assert_eq!(config.divider, DividerKind::Imperfect);
        assert_eq!(config.filler, FillerKind::CastellationH);
        assert!(!config.strip_doors);
        assert!(!config.snake);
        assert!(!config.goal);
    }

    #[test]
    fn defaults_match_the_library() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(build_config(&args(&[]), &mut rng), BuildConfig::default());
    }

    #[test]
    fn random_choice_is_seeded() {
        let line = ["--random", "-W", "22", "-H", "16"];
        let first = build_config(&args(&line), &mut StdRng::seed_from_u64(7));
        let second = build_config(&args(&line), &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
        assert!(RANDOM_FILLERS.contains(&first.filler));
    }

    #[test]
    fn random_avoids_perfect_when_it_cannot_fit() {
        for seed in 0..32 {
            let config = build_config(&args(&["--random", "-W", "20", "-H", "11"]), &mut StdRng::seed_from_u64(seed));
            assert_eq!(config.divider, DividerKind::Imperfect);
        }
    }
}
