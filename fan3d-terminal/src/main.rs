/// fan3d Terminal Demo - Interactive Electric Fan
///
/// Renders an animated desk fan with the terminal ASCII rasterizer.
/// Controls:
///   - P: Power on/off
///   - L/H: Low/High speed
///   - O: Toggle oscillation
///   - Q/ESC: Quit

use clap::Parser;
use fan3d_terminal::TerminalApp;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive 3D electric fan in the terminal", long_about = None)]
struct Cli {
    /// Target frame rate of the render loop.
    #[arg(long, default_value_t = 30)]
    fps: u32,
    /// Hide the ground grid.
    #[arg(long)]
    no_grid: bool,
}

fn main() -> fan3d_terminal::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    tracing::info!(fps = cli.fps, grid = !cli.no_grid, "starting fan3d");

    let mut app = TerminalApp::new(cli.fps, !cli.no_grid)?;
    app.run()?;

    tracing::info!("fan3d exited cleanly");
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .try_init();
}
