//! Show or set the persisted color theme.

use tracing::debug;

use crate::config::{ColorMode, Preferences};

pub fn run(mode: Option<ColorMode>) -> std::io::Result<()> {
    let mut prefs = Preferences::load();
    match mode {
        Some(mode) => {
            prefs.color_mode = mode;
            prefs.save()?;
            debug!(%mode, "theme saved");
            println!("Theme set to {mode}.");
        }
        None => println!("{}", prefs.color_mode),
    }
    Ok(())
}
