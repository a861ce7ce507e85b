use std::env;
use std::path::PathBuf;
use upm::config::Config;
use upm::convert::{ConvertOptions, Converter};
use upm::core::path::dependencies_file;
use upm::core::report::ConsoleReporter;
use upm::core::{UpmError, UpmResult};
use upm::integration::{CommandInstaller, MsBuildIntegration};

pub fn run(
    root: Option<String>,
    manifest: Option<String>,
    force: bool,
    install: bool,
    init_auto_restore: bool,
) -> UpmResult<()> {
    let root = match root {
        Some(path) => PathBuf::from(path),
        None => env::current_dir()
            .map_err(|e| UpmError::Path(format!("Failed to get current directory: {}", e)))?,
    };
    let manifest_path = manifest
        .map(PathBuf::from)
        .unwrap_or_else(|| dependencies_file(&root));

    let config = Config::load()?;
    let reporter = ConsoleReporter;
    let integration = MsBuildIntegration::new(&reporter);
    let installer = CommandInstaller::new(config.install_command.clone());

    let options = ConvertOptions {
        root,
        manifest_path,
        force,
        install_after: install,
        init_auto_restore,
        default_feed: config.default_feed_url,
    };

    Converter::new(options, &reporter, &integration, &installer).run()?;

    println!("✓ conversion finished");
    Ok(())
}
