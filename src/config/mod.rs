mod core;
mod loader;
pub mod settings;
pub mod validation;

pub use core::{
    default_extensions, default_filtered_folder, default_filtered_prefix, default_root_tag,
    default_top, default_wanted_list, ColorsConfig, InputConfig, LedgerConfig, OutputConfig,
    ReportConfig, ReportFormat,
};
pub use loader::{
    directory_ancestors, discover_config, load_config, parse_config, resolve_path, LoadedConfig,
    CONFIG_FILE_NAME,
};
pub use settings::{Overrides, Settings};
pub use validation::validate_settings;
