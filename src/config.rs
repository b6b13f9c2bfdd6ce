//! Manager settings and their loading.
/// Settings file loader
mod loader;
/// Settings types and validation
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    load_from_dir,
    load_from_str,
};
pub use types::{
    ConfigError,
    ManagerSettings,
    PlaceholderConfig,
    ShapeValidation,
    ValidationError,
};
