use anyhow::{Context, Result};
use std::io::BufRead;

/// Positional names, or one name per line from `reader` when none were given.
/// Blank lines are skipped and trailing `\r` is dropped.
pub fn collect_names<R: BufRead>(
    args: Vec<String>,
    reader: R,
) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }

    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line.context("failed to read names from stdin")?;
        let trimmed = line.trim_end_matches('\r');
        if !trimmed.trim().is_empty() {
            names.push(trimmed.to_string());
        }
    }
    Ok(names)
}

/// Split a `name<TAB>WxH` line. Lines without a tab keep an empty resolution.
pub fn split_resolution_line(line: &str) -> (&str, &str) {
    match line.rsplit_once('\t') {
        Some((name, resolution)) => (name, resolution),
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_args_win_over_stdin() {
        let names = collect_names(
            vec!["A001C003.mov".to_string()],
            Cursor::new("ignored\n"),
        )
        .unwrap();
        assert_eq!(names, vec!["A001C003.mov"]);
    }

    #[test]
    fn test_stdin_lines() {
        let names =
            collect_names(Vec::new(), Cursor::new("one.mov\r\n\n  \ntwo.mov"))
                .unwrap();
        assert_eq!(names, vec!["one.mov", "two.mov"]);
    }

    #[test]
    fn test_split_resolution_line() {
        assert_eq!(
            split_resolution_line("A001C003\t1920x1080"),
            ("A001C003", "1920x1080")
        );
        assert_eq!(split_resolution_line("GFX_01"), ("GFX_01", ""));
    }
}
