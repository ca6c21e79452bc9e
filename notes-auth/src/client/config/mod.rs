mod settings;

pub use settings::{BackendMode, Settings, StorageKind};
