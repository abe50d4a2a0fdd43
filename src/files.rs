//! File read/write primitives behind the `read_file` and `write_file` tools.

use anyhow::{Result, bail};
use std::fs;
use std::path::Path;

/// Reads `path` into a line-numbered view: each line prefixed with a
/// fixed-width 1-based number and a separator.
pub fn read_file(path: &str) -> Result<String> {
    let file_path = Path::new(path);
    if !file_path.exists() {
        bail!("file not found: {path}");
    }
    let content = fs::read_to_string(file_path)?;
    let numbered = content
        .split('\n')
        .enumerate()
        .map(|(index, line)| format!("{:>4} | {line}", index + 1))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(numbered)
}

/// Writes `content` verbatim to `path`, creating missing parent directories,
/// and reports the number of newline-delimited lines written.
pub fn write_file(path: &str, content: &str) -> Result<String> {
    let file_path = Path::new(path);
    if let Some(parent) = file_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    let lines = content.split('\n').count();
    Ok(format!("wrote {lines} lines to {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::Builder;

    /// Drops the fixed-width `nnnn | ` prefix from every line of a
    /// `read_file` view.
    fn strip_line_numbers(view: &str) -> String {
        view.split('\n')
            .map(|line| line.splitn(2, " | ").nth(1).unwrap_or(""))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn read_numbers_lines_from_one() {
        let tmp_dir = Builder::new().prefix("test-files").tempdir().unwrap();
        let path = tmp_dir.path().join("sample.txt");
        std::fs::write(&path, "first\nsecond").unwrap();

        let view = read_file(path.to_str().unwrap()).unwrap();
        assert_eq!(view, "   1 | first\n   2 | second");
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = read_file("definitely/not/here.txt");
        let message = result.unwrap_err().to_string();
        assert!(message.contains("file not found: definitely/not/here.txt"));
    }

    #[test]
    fn write_reports_line_count_and_creates_parents() {
        let tmp_dir = Builder::new().prefix("test-files").tempdir().unwrap();
        let path = tmp_dir.path().join("deep/nested/out.txt");
        let path_str = path.to_str().unwrap();

        let report = write_file(path_str, "a\nb\nc").unwrap();
        assert_eq!(report, format!("wrote 3 lines to {path_str}"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\nc");
    }

    #[test]
    fn write_then_read_round_trips_content() {
        let tmp_dir = Builder::new().prefix("test-files").tempdir().unwrap();
        let path = tmp_dir.path().join("round.txt");
        let path_str = path.to_str().unwrap();
        let content = "alpha\n\nbeta | with separator\ngamma";

        write_file(path_str, content).unwrap();
        let view = read_file(path_str).unwrap();
        assert_eq!(strip_line_numbers(&view), content);
    }

    #[test]
    fn write_overwrites_existing_content() {
        let tmp_dir = Builder::new().prefix("test-files").tempdir().unwrap();
        let path = tmp_dir.path().join("file.txt");
        let path_str = path.to_str().unwrap();

        write_file(path_str, "old").unwrap();
        write_file(path_str, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }
}
