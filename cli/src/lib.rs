use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use labyrinth::{Coord, Labyrinth, Palette};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

pub mod config;
pub mod render;

pub use config::{build_config, init_tracing};

// ============================================================================
// CLI Argument Parsing
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    Perfect,
    Imperfect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FillerArg {
    Empty,
    Path,
    Spiral,
    CastellationW,
    CastellationH,
    Snake,
}

/// Command-line options of the `labyrinth` binary.
#[derive(Parser, Debug)]
#[command(author, version, about = "Labyrinth generator", long_about = None)]
pub struct Args {
    /// Inclusive width; the grid has one more column than this
    #[arg(short = 'W', long, default_value_t = 18)]
    pub width: i32,

    /// Inclusive height
    #[arg(short = 'H', long, default_value_t = 11)]
    pub height: i32,

    /// Divider that lays out the maze
    #[arg(long, value_enum, default_value_t = VariantArg::Perfect)]
    pub variant: VariantArg,

    /// Terminal filler used by the imperfect divider
    #[arg(long, value_enum, default_value_t = FillerArg::Snake)]
    pub filler: FillerArg,

    /// Exit position as "x,y"; chosen automatically when absent
    #[arg(long)]
    pub exit: Option<Coord>,

    /// Draw divider and filler at random
    #[arg(long, default_value_t = false)]
    pub random: bool,

    /// Random seed; fresh from the OS when absent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Leave join markers in the output
    #[arg(long, default_value_t = false)]
    pub keep_doors: bool,

    /// Skip the whole-grid snake pass
    #[arg(long, default_value_t = false)]
    pub no_snake: bool,

    /// Open a block around the spiral target
    #[arg(long, default_value_t = false)]
    pub goal: bool,

    /// Print perfection and unicursality after the maze
    #[arg(long, default_value_t = false)]
    pub check: bool,

    /// Print a JSON snapshot instead of the ASCII rows
    #[cfg(feature = "json")]
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

// ============================================================================
// Run
// ============================================================================

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let config = build_config(&args, &mut rng);
    info!(
        "building {}x{} labyrinth: {:?} divider, {:?} filler",
        args.width, args.height, config.divider, config.filler
    );

    let mut maze = Labyrinth::new(args.width, args.height, Palette::ascii(), config)
        .context("invalid labyrinth size")?;
    if let Some(exit) = args.exit {
        maze.place(exit, 'X', false)
            .with_context(|| format!("cannot place exit at {exit}"))?;
    }
    let report = maze.build().context("failed to build labyrinth")?;
    info!("{}", render::summary(&report));

    print(&args, &maze)?;
    if args.check {
        println!("{}", render::verdict(maze.grid()));
    }
    Ok(())
}

#[cfg(feature = "json")]
fn print(args: &Args, maze: &Labyrinth<char>) -> Result<()> {
    if args.json {
        let snapshot = labyrinth::Snapshot::capture(maze.grid());
        println!("{}", snapshot.to_json()?);
    } else {
        println!("{}", render::ascii(maze)?);
    }
    Ok(())
}

#[cfg(not(feature = "json"))]
fn print(_args: &Args, maze: &Labyrinth<char>) -> Result<()> {
    println!("{}", render::ascii(maze)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exit_and_size() {
        let args = Args::try_parse_from(["labyrinth", "-W", "22", "-H", "16", "--exit", "10,9"]).unwrap();
        assert_eq!((args.width, args.height), (22, 16));
        assert_eq!(args.exit, Some(Coord::new(10, 9)));
        assert_eq!(args.variant, VariantArg::Perfect);
    }

    #[test]
    fn rejects_malformed_exit() {
        assert!(Args::try_parse_from(["labyrinth", "--exit", "ten"]).is_err());
    }

    #[test]
    fn filler_names_are_kebab_case() {
        let args = Args::try_parse_from(["labyrinth", "--filler", "castellation-w"]).unwrap();
        assert_eq!(args.filler, FillerArg::CastellationW);
    }
}
