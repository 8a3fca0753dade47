use crate::icon::{self, Variant};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Output directory, relative to the working directory.
pub const OUTPUT_DIR: &str = "icons";

/// Every icon the extension ships, in generation order.
pub const ICON_SET: [(u32, Variant); 6] = [
    (128, Variant::Inactive),
    (48, Variant::Inactive),
    (16, Variant::Inactive),
    (128, Variant::Active),
    (48, Variant::Active),
    (16, Variant::Active),
];

/// Create `dir` (and parents) if missing. Succeeds if it already exists.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    log::debug!("Output directory ready: {}", dir.display());
    Ok(())
}

/// Write the whole icon set into `dir`, one file at a time.
///
/// Stops at the first failure; icons written before it stay on disk.
pub fn generate_all(dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_output_dir(dir)?;

    let mut written = Vec::with_capacity(ICON_SET.len());
    for (size, variant) in ICON_SET {
        let path = dir.join(variant.file_name(size));
        log::debug!("Rendering {size}px icon (active: {})", variant.is_active());
        icon::write_icon(size, &path, variant)?;
        println!("Created {}", path.display());
        written.push(path);
    }
    Ok(written)
}
