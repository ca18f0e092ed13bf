//! Key-value persistence and export file configuration

/// Keys under which each persisted value lives in the key-value store.
pub struct StorageKeys {
    pub theme: &'static str,
    pub coin: &'static str,
    pub days: &'static str,
    pub currency: &'static str,
    pub username: &'static str,
    /// Holds the whole history log as JSON text
    pub history: &'static str,
}

/// Configuration for Application State Persistence
pub struct AppPersistenceConfig {
    /// Default path of the JSON key-value file (overridable with `--state-path`)
    pub state_path: &'static str,
    /// Path eframe uses for window geometry
    pub window_state_path: &'static str,
}

pub struct ExportConfig {
    pub csv_filename: &'static str,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub keys: StorageKeys,
    pub app: AppPersistenceConfig,
    pub export: ExportConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    keys: StorageKeys {
        theme: "theme",
        coin: "coin",
        days: "days",
        currency: "currency",
        username: "username",
        history: "history",
    },
    app: AppPersistenceConfig {
        state_path: ".dashboard_state.json",
        window_state_path: ".window_state.json",
    },
    export: ExportConfig {
        csv_filename: "history.csv",
    },
};
