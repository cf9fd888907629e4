//! Journal settings: process-wide defaults applied when transactions are created or imported.

mod settings_model;

pub use settings_model::JournalSettings;
