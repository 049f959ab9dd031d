use labyrinth::analysis::reachable_from;
use labyrinth::{Coord, Filler, Grid, ImperfectDivider, Tile};
use proptest::prelude::*;

fn filler() -> impl Strategy<Value = Filler> {
    prop_oneof![
        Just(Filler::Empty),
        Just(Filler::Path),
        Just(Filler::Snake),
        any::<bool>().prop_map(|goal| Filler::Spiral { goal }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn entrance_always_reaches_exit(
        width in 2i32..40,
        height in 2i32..40,
        exit_x in 0i32..40,
        exit_y in 0i32..40,
        filler in filler(),
    ) {
        let exit = Coord::new(exit_x % (width + 1), exit_y % (height + 1));
        prop_assume!(exit != Coord::new(0, 0));

        let mut grid = Grid::new(width, height).unwrap();
        grid.place(exit, Tile::Exit, false).unwrap();
        ImperfectDivider::new(filler).build(&mut grid).unwrap();

        prop_assert_eq!(grid.find_first(Tile::Entrance), Some(Coord::new(0, 0)));
        prop_assert_eq!(grid.find_first(Tile::Exit), Some(exit));
        prop_assert_eq!(grid.count(Tile::Unassigned), 0);
        prop_assert!(reachable_from(&grid, Coord::new(0, 0)).contains(&exit));
    }
}
