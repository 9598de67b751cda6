use crate::model::{EntryKind, ResultEntry};
use crate::search::rank;
use std::time::Instant;

#[test]
fn ranking_ten_thousand_entries_stays_interactive() {
    let entries: Vec<ResultEntry> = (0..10_000)
        .map(|i| {
            ResultEntry::new(
                &format!("Application Number {i}"),
                &format!("C:\\Apps\\app-{i}.exe"),
                EntryKind::App,
            )
        })
        .collect();

    let started = Instant::now();
    let ranked = rank(&entries, "application 42", 20, |_| 0);
    let elapsed = started.elapsed();

    assert!(!ranked.is_empty());
    assert!(
        elapsed.as_millis() < 500,
        "ranking took {}ms",
        elapsed.as_millis()
    );
}
