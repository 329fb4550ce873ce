//! Configuration resolution for mypy-lint.
//!
//! Turns the editor-wide [`Settings`] plus the nearest project config file
//! (`mypy.ini` or `setup.cfg`) into an [`EffectiveConfig`] for one lint run:
//!
//! ```text
//! Settings ──► parse_command ──► EffectiveConfig
//!                                     │
//! ConfigFinder ──► IniDocument ───────┤ project overrides
//!                                     ▼
//!            choose_working_directory / choose_cache_directory
//! ```
//!
//! Nothing here is cached across lint requests except the config-file
//! location lookup, which the host invalidates when config files change.

mod command;
mod error;
mod finder;
mod ini;
mod resolve;
mod settings;
mod workspace;

pub use command::parse_command;
pub use error::ConfigError;
pub use finder::{ConfigFinder, CONFIG_FILE_NAMES};
pub use ini::{IniDocument, IniSection};
pub use resolve::{
    choose_cache_directory, choose_working_directory, project_cache_subdirectory, ConfigResolver,
    EffectiveConfig, CHECKER_SECTION, INCREMENTAL_KEY, PLUGIN_MYPYPATH_KEY, PLUGIN_SECTION,
    SEARCH_PATH_SEPARATOR,
};
pub use settings::{Settings, SettingsStore};
pub use workspace::{ProjectRoots, WorkspaceRoots};
