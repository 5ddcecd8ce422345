pub mod app_data;
pub mod backup;
mod manager;
pub mod store;

pub use app_data::{AppData, CURRENT_SCHEMA_VERSION, STORAGE_KEY};
pub use backup::{
    export_backup, import_backup, parse_backup, read_backup, write_backup, BackupFile,
    BackupSection, ImportSummary,
};
pub use manager::{validate_item, InventoryStore, ItemUpdate, NewInventoryItem};
pub use store::{FileStore, KeyValueStore, MemoryStore};
