//! Native viewer binary.
//!
//! ```text
//! toonscroll [OPTIONS.toml]
//! ```
//!
//! Scroll with the mouse wheel to move between sections, press `\` to
//! toggle the options panel (with the `gui` feature), Escape to quit.

use std::path::Path;

use toonscroll::{Options, Viewer};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("failed to load options from {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    if let Err(e) = Viewer::builder()
        .with_title("toonscroll")
        .with_options(options)
        .build()
        .run()
    {
        log::error!("{e}");
        std::process::exit(1);
    }
}
