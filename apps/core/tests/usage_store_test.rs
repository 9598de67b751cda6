use glint_core::usage_store::UsageStore;

#[test]
fn record_launch_counts_and_updates_recency() {
    let store = UsageStore::open_memory().unwrap();
    store.record_launch("Terminal", "app", 1_000).unwrap();
    store.record_launch("Terminal", "app", 2_000).unwrap();
    store.record_launch("Notepad", "app", 3_000).unwrap();

    let record = store.lookup("Terminal").unwrap().unwrap();
    assert_eq!(record.use_count, 2);
    assert_eq!(record.last_used_epoch_secs, 2_000);

    let most_used = store.most_used(10).unwrap();
    assert_eq!(most_used[0].name, "Terminal");

    let most_recent = store.most_recent(10).unwrap();
    assert_eq!(most_recent[0].name, "Notepad");
}

#[test]
fn lookup_of_unknown_name_is_none() {
    let store = UsageStore::open_memory().unwrap();
    assert!(store.lookup("ghost").unwrap().is_none());
    assert_eq!(store.rank_bonus("ghost"), 0);
}

#[test]
fn rank_bonus_grows_with_use_but_is_capped() {
    let store = UsageStore::open_memory().unwrap();
    store.record_launch("Editor", "app", 10).unwrap();
    let single = store.rank_bonus("Editor");
    assert!(single > 0);

    for i in 0..100 {
        store.record_launch("Editor", "app", 11 + i).unwrap();
    }
    assert_eq!(store.rank_bonus("Editor"), 2_400);
}

#[test]
fn clear_empties_the_store() {
    let store = UsageStore::open_memory().unwrap();
    store.record_launch("Terminal", "app", 1).unwrap();
    store.clear().unwrap();
    assert!(store.most_used(10).unwrap().is_empty());
}

#[test]
fn persists_across_reopen() {
    let path = std::env::temp_dir().join(format!(
        "glint-usagetest-{}.sqlite3",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let store = UsageStore::open(&path).unwrap();
        store.record_launch("Terminal", "app", 42).unwrap();
    }
    let reopened = UsageStore::open(&path).unwrap();
    let record = reopened.lookup("Terminal").unwrap().unwrap();
    assert_eq!(record.use_count, 1);
    assert_eq!(record.last_used_epoch_secs, 42);

    std::fs::remove_file(&path).unwrap();
}
