// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::HashSet;

const TITLE_MAX_CHARS: usize = 60;

/// Extracts distinct commands from bash history text, oldest first.
///
/// Timestamp lines written by `HISTTIMEFORMAT` (`#1700000000`) and blank
/// lines are skipped. Repeated commands keep their first position.
pub fn parse_history(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut scripts = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_timestamp_line(trimmed) {
            continue;
        }
        if seen.insert(trimmed.to_owned()) {
            scripts.push(trimmed.to_owned());
        }
    }
    scripts
}

pub fn title_for_script(script: &str) -> String {
    let first_line = script.lines().next().unwrap_or("").trim();
    let mut chars = first_line.chars();
    let title: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{title}…")
    } else {
        title
    }
}

fn is_timestamp_line(line: &str) -> bool {
    line.strip_prefix('#')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::{parse_history, title_for_script};

    #[test]
    fn skips_timestamps_blanks_and_duplicates() {
        let text = "#1700000000\nls -la\n\n#1700000001\ngit status\nls -la\n# a comment\n";
        assert_eq!(
            parse_history(text),
            vec![
                "ls -la".to_owned(),
                "git status".to_owned(),
                "# a comment".to_owned(),
            ]
        );
    }

    #[test]
    fn long_titles_are_truncated() {
        let script = "x".repeat(80);
        let title = title_for_script(&script);
        assert_eq!(title.chars().count(), 61);
        assert!(title.ends_with('…'));
        assert_eq!(title_for_script("echo hi\necho there"), "echo hi");
    }
}
