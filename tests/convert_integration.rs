//! Integration tests for the upm CLI.
//!
//! These tests verify that `upm convert` works end-to-end against a real
//! directory tree. Unit tests for individual functions live in their
//! respective source files.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn upm_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_upm"))
}

fn convert(root: &Path, extra_args: &[&str]) -> std::process::Output {
    upm_command()
        .arg("convert")
        .arg("--root")
        .arg(root)
        .args(extra_args)
        .output()
        .unwrap()
}

fn write_packages_config(dir: &Path, packages: &[(&str, &str)]) {
    fs::create_dir_all(dir).unwrap();
    let mut content = String::from("<packages>\n");
    for (name, version) in packages {
        content.push_str(&format!(
            "  <package id=\"{}\" version=\"{}\" />\n",
            name, version
        ));
    }
    content.push_str("</packages>\n");
    fs::write(dir.join("packages.config"), content).unwrap();
}

#[test]
fn test_convert_generates_manifest_and_references() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_packages_config(&root.join("app"), &[("Newtonsoft.Json", "12.0.3")]);
    write_packages_config(&root.join("lib"), &[("Castle.Core", "4.4.0")]);

    let output = convert(root, &[]);
    assert!(output.status.success(), "convert should succeed");

    let manifest = fs::read_to_string(root.join("upm.dependencies")).unwrap();
    assert!(manifest.contains("nuget Castle.Core 4.4.0"));
    assert!(manifest.contains("nuget Newtonsoft.Json 12.0.3"));
    assert!(manifest.contains("source "));

    assert_eq!(
        fs::read_to_string(root.join("app").join("upm.references")).unwrap(),
        "Newtonsoft.Json\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("lib").join("upm.references")).unwrap(),
        "Castle.Core\n"
    );

    // Legacy files are retired.
    assert!(!root.join("app").join("packages.config").exists());
    assert!(!root.join("lib").join("packages.config").exists());
}

#[test]
fn test_convert_reports_version_conflicts() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_packages_config(&root.join("a"), &[("Shared", "1.0.0")]);
    write_packages_config(&root.join("b"), &[("Shared", "1.2.0")]);
    write_packages_config(&root.join("c"), &[("Shared", "1.1.0")]);

    let output = convert(root, &[]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Shared"));
    assert!(stderr.contains("1.0.0, 1.1.0, 1.2.0"));

    let manifest = fs::read_to_string(root.join("upm.dependencies")).unwrap();
    assert!(manifest.contains("nuget Shared 1.2.0"));
}

#[test]
fn test_convert_consumes_legacy_source_config() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_packages_config(&root.join("app"), &[("Foo", "1.0.0")]);
    fs::write(
        root.join("nuget.config"),
        r#"<configuration>
  <packageSources>
    <add key="internal" value="https://nuget.corp.example.com/feed" />
  </packageSources>
</configuration>"#,
    )
    .unwrap();

    let output = convert(root, &[]);
    assert!(output.status.success());

    let manifest = fs::read_to_string(root.join("upm.dependencies")).unwrap();
    assert!(manifest.contains("source https://nuget.corp.example.com/feed"));
    assert!(!root.join("nuget.config").exists());
}

#[test]
fn test_convert_aborts_on_existing_manifest_without_force() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_packages_config(&root.join("app"), &[("Foo", "1.0.0")]);
    fs::write(root.join("upm.dependencies"), "nuget Bar 1.0.0\n").unwrap();

    let output = convert(root, &[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("upm.dependencies"));
    assert!(stderr.contains("--force"));

    // Nothing was written.
    assert_eq!(
        fs::read_to_string(root.join("upm.dependencies")).unwrap(),
        "nuget Bar 1.0.0\n"
    );
    assert!(root.join("app").join("packages.config").exists());
}

#[test]
fn test_convert_with_force_keeps_existing_entries() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_packages_config(&root.join("app"), &[("Foo", "2.0.0")]);
    fs::write(root.join("upm.dependencies"), "nuget Foo 1.0.0\n").unwrap();

    let output = convert(root, &["--force"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already defined"));

    let manifest = fs::read_to_string(root.join("upm.dependencies")).unwrap();
    assert!(manifest.contains("nuget Foo 1.0.0"));
    assert!(!manifest.contains("2.0.0"));
}

#[test]
fn test_second_run_is_up_to_date() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_packages_config(&root.join("app"), &[("Foo", "1.0.0")]);

    assert!(convert(root, &[]).status.success());
    let manifest_before = fs::read_to_string(root.join("upm.dependencies")).unwrap();
    let references_before = fs::read_to_string(root.join("app").join("upm.references")).unwrap();

    let output = convert(root, &["--force"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("up to date"));

    assert_eq!(
        fs::read_to_string(root.join("upm.dependencies")).unwrap(),
        manifest_before
    );
    assert_eq!(
        fs::read_to_string(root.join("app").join("upm.references")).unwrap(),
        references_before
    );
}

#[test]
fn test_convert_retires_legacy_integration_directory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_packages_config(&root.join("app"), &[("Foo", "1.0.0")]);
    let nuget_dir = root.join(".nuget");
    fs::create_dir_all(&nuget_dir).unwrap();
    fs::write(nuget_dir.join("NuGet.exe"), "binary").unwrap();
    fs::write(nuget_dir.join("NuGet.targets"), "<Project/>").unwrap();

    let output = convert(root, &["--init-auto-restore"]);
    assert!(output.status.success());

    assert!(!nuget_dir.exists());
    let manifest = fs::read_to_string(root.join("upm.dependencies")).unwrap();
    assert!(manifest.contains("nuget Upm.CommandLine"));
    assert!(root.join(".upm").join("upm.targets").exists());
}

#[test]
fn test_convert_rewires_projects_and_solutions() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_packages_config(&root.join("app"), &[("Foo", "1.0.0")]);
    fs::write(
        root.join("All.sln"),
        "Project lines\n\t\t.nuget\\NuGet.targets = .nuget\\NuGet.targets\nEndProject\n",
    )
    .unwrap();
    fs::write(
        root.join("app").join("App.csproj"),
        "<Project>\n  <Import Project=\".nuget\\NuGet.targets\" />\n</Project>\n",
    )
    .unwrap();

    let output = convert(root, &[]);
    assert!(output.status.success());

    let solution = fs::read_to_string(root.join("All.sln")).unwrap();
    assert!(!solution.contains("NuGet.targets"));

    let project = fs::read_to_string(root.join("app").join("App.csproj")).unwrap();
    assert!(!project.contains("NuGet.targets"));
    assert!(project.contains("upm.references"));
}
