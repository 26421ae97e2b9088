//! Service adapters: headless implementations of the ports plus config IO.

pub mod converter;
pub mod layout;
pub mod settings;
pub mod toolbar;
pub mod windows;

pub use converter::HtmlConverter;
pub use layout::{LayoutState, StaticLayout};
pub use settings::{
    apply_trigger_rules, ensure_settings_file, get_settings_path, load_target_config,
    parse_target_config, ConfigError,
};
pub use toolbar::{HeadlessToolbar, ToolbarState};
pub use windows::{HeadlessWindowManager, WindowLog};
