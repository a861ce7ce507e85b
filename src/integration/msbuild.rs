use crate::convert::orchestrator::BuildIntegration;
use crate::core::path::REFERENCES_FILE;
use crate::core::{Reporter, UpmResult};
use std::fs;
use std::path::Path;

/// Solution entries that wire the legacy restore tooling into builds.
const LEGACY_SOLUTION_MARKERS: [&str; 3] = [
    ".nuget\\NuGet.exe",
    ".nuget\\NuGet.targets",
    ".nuget\\NuGet.Config",
];

/// Line-based cleanup of legacy restore wiring in solutions and projects.
///
/// Strips the legacy hooks and wires in the reference file; every other
/// line is left byte for byte as the user wrote it.
pub struct MsBuildIntegration<'a> {
    reporter: &'a dyn Reporter,
}

impl<'a> MsBuildIntegration<'a> {
    pub fn new(reporter: &'a dyn Reporter) -> Self {
        Self { reporter }
    }
}

impl BuildIntegration for MsBuildIntegration<'_> {
    fn clean_solution(&self, solution: &Path) -> UpmResult<()> {
        let content = fs::read_to_string(solution)?;
        let kept: Vec<&str> = content
            .lines()
            .filter(|line| {
                !LEGACY_SOLUTION_MARKERS
                    .iter()
                    .any(|marker| line.contains(marker))
            })
            .collect();

        if kept.len() != content.lines().count() {
            fs::write(solution, format!("{}\n", kept.join("\n")))?;
            self.reporter
                .info(&format!("✓ cleaned {}", solution.display()));
        }
        Ok(())
    }

    fn convert_project(&self, project: &Path) -> UpmResult<()> {
        let content = fs::read_to_string(project)?;

        let mut changed = false;
        let mut kept: Vec<String> = Vec::new();
        for line in content.lines() {
            let legacy_hook = (line.contains("<Import") && line.contains("NuGet.targets"))
                || line.contains("<RestorePackages>");
            if legacy_hook {
                changed = true;
            } else {
                kept.push(line.to_string());
            }
        }

        if !content.contains(REFERENCES_FILE) {
            if let Some(position) = kept.iter().position(|line| line.contains("</Project>")) {
                kept.insert(position, "  <ItemGroup>".to_string());
                kept.insert(
                    position + 1,
                    format!("    <None Include=\"{}\" />", REFERENCES_FILE),
                );
                kept.insert(position + 2, "  </ItemGroup>".to_string());
                changed = true;
            }
        }

        if changed {
            fs::write(project, format!("{}\n", kept.join("\n")))?;
            self.reporter
                .info(&format!("✓ converted {}", project.display()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::CollectingReporter;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_clean_solution_strips_legacy_entries() {
        let temp = TempDir::new().unwrap();
        let solution = temp.path().join("All.sln");
        fs::write(
            &solution,
            "Project(\"{guid}\") = \"app\", \"app\\App.csproj\", \"{id}\"\n\
             \t\t.nuget\\NuGet.exe = .nuget\\NuGet.exe\n\
             \t\t.nuget\\NuGet.targets = .nuget\\NuGet.targets\n\
             EndProject\n",
        )
        .unwrap();
        let reporter = CollectingReporter::new();

        MsBuildIntegration::new(&reporter)
            .clean_solution(&solution)
            .unwrap();

        let content = fs::read_to_string(&solution).unwrap();
        assert!(!content.contains("NuGet.exe"));
        assert!(!content.contains("NuGet.targets"));
        assert!(content.contains("App.csproj"));
    }

    #[test]
    fn test_clean_solution_without_legacy_entries_is_untouched() {
        let temp = TempDir::new().unwrap();
        let solution = temp.path().join("All.sln");
        let original = "Project lines\nEndProject\n";
        fs::write(&solution, original).unwrap();
        let reporter = CollectingReporter::new();

        MsBuildIntegration::new(&reporter)
            .clean_solution(&solution)
            .unwrap();

        assert_eq!(fs::read_to_string(&solution).unwrap(), original);
        assert!(reporter.lines().is_empty());
    }

    #[test]
    fn test_convert_project_strips_hooks_and_adds_reference_item() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("App.csproj");
        fs::write(
            &project,
            "<Project>\n\
             \x20 <PropertyGroup>\n\
             \x20   <RestorePackages>true</RestorePackages>\n\
             \x20 </PropertyGroup>\n\
             \x20 <Import Project=\"$(SolutionDir)\\.nuget\\NuGet.targets\" />\n\
             </Project>\n",
        )
        .unwrap();
        let reporter = CollectingReporter::new();

        MsBuildIntegration::new(&reporter)
            .convert_project(&project)
            .unwrap();

        let content = fs::read_to_string(&project).unwrap();
        assert!(!content.contains("RestorePackages"));
        assert!(!content.contains("NuGet.targets"));
        assert!(content.contains("<None Include=\"upm.references\" />"));
    }

    #[test]
    fn test_convert_project_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("App.csproj");
        fs::write(
            &project,
            "<Project>\n  <Import Project=\".nuget\\NuGet.targets\" />\n</Project>\n",
        )
        .unwrap();
        let reporter = CollectingReporter::new();
        let integration = MsBuildIntegration::new(&reporter);

        integration.convert_project(&project).unwrap();
        let first = fs::read_to_string(&project).unwrap();
        integration.convert_project(&project).unwrap();
        let second = fs::read_to_string(&project).unwrap();

        assert_eq!(first, second);
    }
}
