use anyhow::Result;

fn main() -> Result<()> {
    labyrinth_cli::run()
}
