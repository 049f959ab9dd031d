//! End-to-end scenarios through the public API.

use labyrinth::analysis::{is_perfect, is_unicursal, reachable_from};
use labyrinth::{
    BuildConfig, Coord, DividerKind, Filler, FillerKind, Grid, ImperfectDivider, Labyrinth,
    MazeError, Palette, Rect, Tile,
};

fn perfect(width: i32, height: i32, snake: bool) -> Labyrinth<char> {
    let config = BuildConfig {
        snake,
        ..BuildConfig::default()
    };
    Labyrinth::new(width, height, Palette::ascii(), config).unwrap()
}

#[test]
fn minimal_perfect_maze() {
    let mut maze = perfect(18, 11, true);
    maze.place(Coord::new(0, 0), 'E', false).unwrap();
    maze.place(Coord::new(8, 5), 'X', false).unwrap();
    maze.build().unwrap();

    let grid = maze.grid();
    assert!(is_perfect(grid));
    assert!(is_unicursal(grid));
    assert_eq!(grid.count(Tile::Unassigned), 0);
    assert_eq!(grid.count(Tile::Join), 0);
    assert_eq!(maze.find_first('E'), Coord::new(0, 0));
    assert_eq!(maze.find_first('X'), Coord::new(8, 5));

    let columns: Vec<Vec<char>> = maze.columns().unwrap().map(Iterator::collect).collect();
    assert_eq!(columns.len(), 19);
    assert!(columns.iter().all(|column| column.len() == 12));
}

#[test]
fn perfect_mazes_hold_across_sizes() {
    for (width, height) in [(18, 11), (18, 12), (22, 16), (26, 21), (30, 11), (34, 30)] {
        for snake in [false, true] {
            let mut maze = perfect(width, height, snake);
            maze.build().unwrap();
            assert!(is_perfect(maze.grid()), "{width}x{height}");
            assert!(is_unicursal(maze.grid()), "{width}x{height}");
        }
    }
}

#[test]
fn doors_survive_when_not_stripped() {
    let config = BuildConfig {
        strip_doors: false,
        snake: false,
        ..BuildConfig::default()
    };
    let mut maze = Labyrinth::new(18, 11, Palette::ascii(), config).unwrap();
    let report = maze.build().unwrap();
    assert_eq!(report.doors_stripped, 0);
    assert_eq!(maze.grid().count(Tile::Join), 5);
    // Join cells are still walkable
    let grid = maze.grid();
    assert!(reachable_from(grid, Coord::new(0, 0)).contains(&Coord::new(8, 6)));
}

#[test]
fn misplaced_perfect_exit_is_a_configuration_error() {
    let mut maze = perfect(18, 11, false);
    maze.place(Coord::new(9, 5), 'X', false).unwrap();
    assert!(matches!(maze.build(), Err(MazeError::Configuration { .. })));
}

#[test]
fn every_valid_perfect_shape_builds() {
    for (width, height) in [(22, 13), (22, 14), (22, 17), (30, 13)] {
        let mut maze = perfect(width, height, true);
        maze.build().unwrap();
        assert!(is_perfect(maze.grid()), "{width}x{height}");
        assert!(is_unicursal(maze.grid()), "{width}x{height}");
        assert!(maze.rows().is_ok());
    }
}

#[test]
fn perfect_exit_rows_keep_clear_of_the_edges() {
    for y in 4..=6 {
        let mut maze = perfect(18, 11, true);
        maze.place(Coord::new(8, y), 'X', false).unwrap();
        maze.build().unwrap();
        assert!(is_unicursal(maze.grid()), "exit row {y}");
    }
    let mut maze = perfect(18, 11, false);
    maze.place(Coord::new(8, 9), 'X', false).unwrap();
    assert!(matches!(maze.build(), Err(MazeError::Configuration { .. })));
}

#[test]
fn imperfect_divide_rejects_identical_endpoints() {
    let mut grid = Grid::new(24, 24).unwrap();
    let region = grid.bounds();
    let at = Coord::new(12, 12);
    let err = ImperfectDivider::new(Filler::Snake)
        .divide(&mut grid, region, at, at)
        .unwrap_err();
    assert!(matches!(err, MazeError::DivisionInfeasible { .. }));
}

#[test]
fn out_of_bounds_placement() {
    for (width, height) in [(0, 0), (5, 3), (18, 11)] {
        let mut grid = Grid::new(width, height).unwrap();
        let err = grid.place(Coord::new(-1, 0), Tile::Passable, false).unwrap_err();
        assert!(matches!(err, MazeError::OutOfBounds { .. }));
    }
}

#[test]
fn spiral_needs_an_edge_endpoint() {
    let mut grid = Grid::new(14, 14).unwrap();
    let err = Filler::Spiral { goal: false }
        .fill(&mut grid, Rect::new(0, 0, 14, 14), Coord::new(2, 2), Coord::new(7, 7))
        .unwrap_err();
    assert!(matches!(err, MazeError::FillerPrecondition { .. }));
}

#[test]
fn imperfect_build_with_every_filler() {
    for filler in FillerKind::ALL {
        let config = BuildConfig {
            divider: DividerKind::Imperfect,
            filler,
            ..BuildConfig::default()
        };
        let mut maze = Labyrinth::new(40, 30, Palette::ascii(), config).unwrap();
        match maze.build() {
            Ok(_) => {
                let grid = maze.grid();
                assert_eq!(grid.count(Tile::Unassigned), 0);
                let entrance = maze.find_first('E');
                let exit = maze.find_first('X');
                assert!(reachable_from(grid, entrance).contains(&exit), "{filler:?}");
            }
            // Combs only join opposite corners, which doorways rarely are
            Err(MazeError::FillerPrecondition { filler: name, .. }) => {
                assert!(name.starts_with("castellation"), "{filler:?}");
            }
            Err(err) => panic!("{filler:?}: {err}"),
        }
    }
}
