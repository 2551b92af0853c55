//! Web assets compiled into the executable.
//!
//! `web/templates` and `web/static` are embedded at build time, so a single
//! release binary serves the full page shell wherever it is copied.

use include_dir::{Dir, include_dir};
use std::path::Path;

static WEB_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/web");

/// Directories embedded from `web/`, relative to the crate root.
pub const DATA_DIRS: [&str; 2] = ["web/templates", "web/static"];

/// Contents of `templates/<name>`.
pub fn template(name: &str) -> Option<&'static [u8]> {
    WEB_DIR
        .get_file(Path::new("templates").join(name))
        .map(|file| file.contents())
}

/// Contents of `static/<relative>`. `relative` must already be sanitized.
pub fn static_file(relative: &Path) -> Option<&'static [u8]> {
    WEB_DIR
        .get_file(Path::new("static").join(relative))
        .map(|file| file.contents())
}
