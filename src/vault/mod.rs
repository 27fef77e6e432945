// Placeholder vault: persistent mappings, storage backends and export/import

pub mod document;
pub mod manager;
pub mod storage;
pub mod transfer;

pub use document::{MergeSummary, VaultDocument};
pub use manager::{Allocation, PlaceholderVault, VaultEntry};
pub use storage::{JsonFileVaultStorage, MemoryVaultStorage, VaultStorage};
pub use transfer::{
    import_document, parse_envelope, settings_envelope, vault_envelope, ExportEnvelope,
    ExportKind, ExportMeta, ImportOutcome, APP_TAG,
};
