pub mod destinations;
pub mod walker;

pub use destinations::{FileDestination, OutputDestination, StdoutDestination};
pub use walker::{find_inventory_files, FolderListing, InventoryWalker};

use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, content)
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
