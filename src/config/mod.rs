mod core;
mod loader;

pub use self::core::TestgapConfig;
pub use loader::{
    directory_ancestors, discover_config, load_config, load_from_path, parse_config,
    CONFIG_FILE_NAME,
};
