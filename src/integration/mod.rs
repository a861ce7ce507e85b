pub mod msbuild;
pub mod restore;

pub use msbuild::MsBuildIntegration;
pub use restore::CommandInstaller;
