pub mod discovery;
pub mod packages_config;
pub mod sources;

pub use packages_config::{LegacyEntry, LegacyManifest, LegacyScope};
pub use sources::{PackageSource, SourceAuth};
