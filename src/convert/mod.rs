pub mod dependencies_file;
pub mod merge;
pub mod orchestrator;
pub mod reconciler;
pub mod references_file;

pub use dependencies_file::{DependenciesFile, PackageRequirement, ResolverStrategy};
pub use merge::MergeOutcome;
pub use orchestrator::{BuildIntegration, ConvertOptions, Converter, PackageInstaller};
