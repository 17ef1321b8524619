use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# brickledger configuration

[input]
# Folder holding the inventory files, relative to this file
# folder = "Sets"
# File names to skip in every run
excluded = []
extensions = ["xml", "csv", "json"]

[colors]
# JSON object mapping color codes to names, e.g. {"5": "Red"}
# mapping = "colors.json"

[output]
filtered_folder = "Filtered"
filtered_prefix = "filtered_"
wanted_list = "wanted_list.xml"
root_tag = "INVENTORY"

[report]
# terminal, markdown or json
format = "terminal"
top = 15
"#;

pub fn init_config(force: bool) -> Result<()> {
    let path = init_config_in(Path::new("."), force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}

/// Write the default configuration into `dir`.
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    log::info!("Wrote default configuration to {}", config_path.display());

    Ok(config_path)
}
