use crate::core::UpmResult;
use std::fs;
use std::path::Path;

/// Outcome of merging lines into a plain-text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Created,
    Appended,
    UpToDate,
}

/// Append `lines` to the file at `path`, or create it with `initial`
/// content when absent.
///
/// Both mergers share this policy: whole-file read-modify-write, no
/// transaction. `initial` runs only when the file is created, so callers
/// can defer side effects (like consuming a legacy source config) to that
/// branch.
pub fn merge_lines(
    path: &Path,
    lines: &[String],
    initial: impl FnOnce() -> UpmResult<String>,
) -> UpmResult<MergeOutcome> {
    if !path.exists() {
        fs::write(path, initial()?)?;
        return Ok(MergeOutcome::Created);
    }

    if lines.is_empty() {
        return Ok(MergeOutcome::UpToDate);
    }

    let mut content = fs::read_to_string(path)?;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(MergeOutcome::Appended)
}

/// Join lines into file content with a trailing newline.
pub fn lines_content(lines: &[String]) -> String {
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_creates_missing_file_from_initial() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("file.txt");

        let outcome =
            merge_lines(&path, &lines(&["ignored"]), || Ok("header\n".to_string())).unwrap();

        assert_eq!(outcome, MergeOutcome::Created);
        assert_eq!(fs::read_to_string(&path).unwrap(), "header\n");
    }

    #[test]
    fn test_appends_without_dropping_existing_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("file.txt");
        fs::write(&path, "first\n").unwrap();

        let outcome = merge_lines(&path, &lines(&["second"]), || unreachable!()).unwrap();

        assert_eq!(outcome, MergeOutcome::Appended);
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_append_repairs_missing_trailing_newline() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("file.txt");
        fs::write(&path, "first").unwrap();

        merge_lines(&path, &lines(&["second"]), || unreachable!()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_nothing_to_add_is_up_to_date() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("file.txt");
        fs::write(&path, "first\n").unwrap();

        let outcome = merge_lines(&path, &[], || unreachable!()).unwrap();

        assert_eq!(outcome, MergeOutcome::UpToDate);
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\n");
    }

    #[test]
    fn test_lines_content() {
        assert_eq!(lines_content(&lines(&["a", "b"])), "a\nb\n");
        assert_eq!(lines_content(&[]), "");
    }
}
