//! Result ranking for (display name, path) pairs.

use crate::model::{normalize_for_match, ResultEntry};

/// Extensions that launch directly; matching entries rank above documents.
pub const LAUNCHABLE_EXTENSIONS: [&str; 5] = ["exe", "lnk", "msi", "bat", "cmd"];

pub fn is_launchable_path(path: &str) -> bool {
    let lowered = path.to_ascii_lowercase();
    LAUNCHABLE_EXTENSIONS
        .iter()
        .any(|ext| lowered.ends_with(&format!(".{ext}")))
}

/// Rank entries against a query. `usage_bonus` maps an entry name to an
/// extra score from the usage store; pass `|_| 0` when no store is open.
pub fn rank<F>(entries: &[ResultEntry], query: &str, limit: usize, usage_bonus: F) -> Vec<ResultEntry>
where
    F: Fn(&str) -> i64,
{
    if limit == 0 || entries.is_empty() {
        return Vec::new();
    }

    let needle = normalize_for_match(query);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(i64, usize, &ResultEntry)> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            score_entry(entry, &needle)
                .map(|base| (base + usage_bonus(&entry.name), index, entry))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, _, entry)| entry.clone())
        .collect()
}

fn score_entry(entry: &ResultEntry, needle: &str) -> Option<i64> {
    let haystack = entry.normalized_name();
    if haystack.is_empty() {
        return None;
    }

    let mut score = if haystack == needle {
        20_000
    } else if let Some(position) = haystack.find(needle) {
        let tier = if position == 0 { 12_000 } else { 8_000 };
        tier - position as i64 * 4 - excess_length(haystack, needle)
    } else {
        let gaps = subsequence_gaps(haystack, needle)?;
        4_000 - gaps * 10 - excess_length(haystack, needle)
    };

    if is_launchable_path(&entry.path) {
        score += 600;
    }
    Some(score)
}

fn excess_length(haystack: &str, needle: &str) -> i64 {
    (haystack.chars().count() as i64 - needle.chars().count() as i64).max(0)
}

/// Total gap width when `needle` occurs as a subsequence of `haystack`;
/// `None` when it does not occur at all.
fn subsequence_gaps(haystack: &str, needle: &str) -> Option<i64> {
    let mut gaps = 0_i64;
    let mut last_index: Option<usize> = None;
    let mut search_from = 0;

    for needle_char in needle.chars() {
        let (offset, matched) = haystack[search_from..]
            .char_indices()
            .find(|(_, hay_char)| *hay_char == needle_char)?;
        let absolute = search_from + offset;
        if let Some(last) = last_index {
            gaps += haystack[last..absolute].chars().count() as i64 - 1;
        }
        last_index = Some(absolute);
        search_from = absolute + matched.len_utf8();
    }

    Some(gaps)
}

#[cfg(test)]
mod tests {
    use super::{is_launchable_path, rank};
    use crate::model::{EntryKind, ResultEntry};

    fn entry(name: &str, path: &str) -> ResultEntry {
        ResultEntry::new(name, path, EntryKind::File)
    }

    #[test]
    fn exact_match_outranks_prefix_and_substring() {
        let entries = vec![
            entry("Code Helper", "C:\\a\\Code Helper.txt"),
            entry("Code", "C:\\a\\Code.txt"),
            entry("Xcode", "C:\\a\\Xcode.txt"),
        ];
        let ranked = rank(&entries, "code", 10, |_| 0);
        assert_eq!(ranked[0].name, "Code");
        assert_eq!(ranked[1].name, "Code Helper");
        assert_eq!(ranked[2].name, "Xcode");
    }

    #[test]
    fn subsequence_matches_rank_below_substrings() {
        let entries = vec![
            entry("Visual Studio Code", "C:\\a\\code.lnk"),
            entry("vscode", "C:\\a\\vscode.txt"),
        ];
        let ranked = rank(&entries, "vsc", 10, |_| 0);
        assert_eq!(ranked[0].name, "vscode");
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn launchable_paths_get_a_bonus() {
        let entries = vec![
            entry("notes", "C:\\a\\notes.txt"),
            entry("notes", "C:\\a\\notes.exe"),
        ];
        let ranked = rank(&entries, "notes", 10, |_| 0);
        assert_eq!(ranked[0].path, "C:\\a\\notes.exe");
    }

    #[test]
    fn usage_bonus_can_promote_an_entry() {
        let entries = vec![
            entry("Terminal", "C:\\a\\terminal.exe"),
            entry("Terminal Preview", "C:\\a\\terminal-preview.exe"),
        ];
        let ranked = rank(&entries, "term", 10, |name| {
            if name == "Terminal Preview" {
                5_000
            } else {
                0
            }
        });
        assert_eq!(ranked[0].name, "Terminal Preview");
    }

    #[test]
    fn empty_query_and_zero_limit_yield_nothing() {
        let entries = vec![entry("a", "C:\\a")];
        assert!(rank(&entries, "  ", 10, |_| 0).is_empty());
        assert!(rank(&entries, "a", 0, |_| 0).is_empty());
    }

    #[test]
    fn launchable_extension_check_is_case_insensitive() {
        assert!(is_launchable_path("C:\\Apps\\Tool.EXE"));
        assert!(!is_launchable_path("C:\\Apps\\Tool.txt"));
    }
}
