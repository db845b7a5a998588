use std::env;
use std::io;

use anyhow::Context;
use log::info;

use wireproj::config::RenderConfig;
use wireproj::engine::Engine;
use wireproj::output::PngPresenter;
use wireproj::session::{Session, ShapeSource};
use wireproj::window::Window;

/// Write every render to this PNG path instead of opening a window.
const OUTPUT_ENV: &str = "WIREPROJ_OUTPUT";
/// Load `cube_table.csv` / `tri_prism_table.csv` from this directory.
const VERTICES_DIR_ENV: &str = "WIREPROJ_VERTICES_DIR";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RenderConfig::from_env().context("reading configuration")?;
    let engine = Engine::new(&config).context("building the eye projection")?;

    let source = match env::var_os(VERTICES_DIR_ENV) {
        Some(dir) => ShapeSource::TableDir(dir.into()),
        None => ShapeSource::BuiltIn,
    };
    info!(
        "canvas {}x{}, vertices from {:?}",
        config.canvas_width, config.canvas_height, source
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(engine, source, stdin.lock(), stdout.lock());

    let finished = match env::var_os(OUTPUT_ENV) {
        Some(path) => session.run(&mut PngPresenter::new(path)),
        None => {
            let mut window = Window::new("wireproj", config.canvas_width, config.canvas_height)
                .map_err(anyhow::Error::msg)
                .context("opening the display window")?;
            session.run(&mut window)
        }
    };
    finished.context("interactive session")?;

    Ok(())
}
