pub mod error;
pub mod path;
pub mod report;
pub mod version;

pub use error::{UpmError, UpmResult};
pub use report::{Level, Reporter};
pub use version::Version;
