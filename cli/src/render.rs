use anyhow::Result;
use labyrinth::analysis::{is_perfect, is_unicursal, monochrome_blocks};
use labyrinth::{BuildReport, Grid, Labyrinth};

// ============================================================================
// Text Output
// ============================================================================

/// One line per row, top to bottom
pub fn ascii(maze: &Labyrinth<char>) -> Result<String> {
    let rows = maze.rows()?;
    let lines: Vec<String> = rows.into_iter().map(|row| row.into_iter().collect()).collect();
    Ok(lines.join("\n"))
}

#[must_use]
pub fn verdict(grid: &Grid) -> String {
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    format!(
        "perfect: {}, unicursal: {}, uniform blocks: {}",
        yes_no(is_perfect(grid)),
        yes_no(is_unicursal(grid)),
        monochrome_blocks(grid).len()
    )
}

#[must_use]
pub fn summary(report: &BuildReport) -> String {
    format!(
        "{} doors stripped, {} rewrites, {} cells sealed",
        report.doors_stripped, report.rewrites, report.sealed
    )
}
