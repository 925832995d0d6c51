//! Optional logo shown at the top of every screen.

use std::path::{Path, PathBuf};

/// Logo file names, in lookup order.
pub const LOGO_FILES: [&str; 3] = ["logo.png", "logo.jpeg", "logo.jpg"];

/// Width the logo is displayed at, in CSS pixels.
pub const LOGO_WIDTH: u32 = 300;

/// The first logo file present in `dir`.
#[must_use]
pub fn find_logo(dir: &Path) -> Option<PathBuf> {
    LOGO_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Content type for a logo path.
#[must_use]
pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
