use confique::Config;
use std::path::PathBuf;

/// Configuration for the drink record store
#[derive(Debug, Config, Clone, Default)]
pub struct StoreConfig {
    /// JSON snapshot file; records are kept in memory only when unset
    #[config(env = "DRINKS_STORE_PATH")]
    pub path: Option<PathBuf>,

    /// Drop every stored record when the server starts (default: false)
    #[config(env = "DRINKS_STORE_RESET_ON_START", default = false)]
    pub reset_on_start: bool,
}
