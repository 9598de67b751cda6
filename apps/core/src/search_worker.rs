//! Per-query search workers and the generation-checked coordinator.
//!
//! Each search runs on its own short-lived thread: a bounded filesystem
//! walk over the configured roots, topped up from the registry App Paths
//! scan when filesystem hits are sparse. Results travel back over a channel
//! tagged with the generation they were started under; the coordinator
//! drops any delivery whose generation is stale, so a superseded worker can
//! finish late without ever being rendered.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use walkdir::WalkDir;

use crate::logging;
use crate::model::{normalize_for_match, EntryKind, ResultEntry};
use crate::registry_apps;
use crate::search::is_launchable_path;

/// Directory depth below each root the walk will descend.
pub const WALK_DEPTH_LIMIT: usize = 3;

/// Hard cap on entries a single worker collects.
pub const WALK_RESULT_CAP: usize = 25;

/// Below this many filesystem hits the registry scan tops the list up.
const REGISTRY_TOPUP_THRESHOLD: usize = 10;

/// How long a cancelled worker gets to acknowledge before it is abandoned.
pub const CANCEL_GRACE: Duration = Duration::from_millis(150);

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub roots: Vec<PathBuf>,
    pub depth_limit: usize,
    pub result_cap: usize,
}

impl SearchOptions {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            depth_limit: WALK_DEPTH_LIMIT,
            result_cap: WALK_RESULT_CAP,
        }
    }
}

#[derive(Debug)]
pub struct SearchDelivery {
    pub generation: u64,
    pub entries: Vec<ResultEntry>,
}

struct WorkerHandle {
    generation: u64,
    cancel: Arc<AtomicBool>,
    done: mpsc::Receiver<()>,
}

pub struct SearchCoordinator {
    options: SearchOptions,
    generation: u64,
    worker: Option<WorkerHandle>,
    tx: mpsc::Sender<SearchDelivery>,
    rx: mpsc::Receiver<SearchDelivery>,
}

impl SearchCoordinator {
    pub fn new(options: SearchOptions) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            options,
            generation: 0,
            worker: None,
            tx,
            rx,
        }
    }

    pub fn current_generation(&self) -> u64 {
        self.generation
    }

    /// Supersede any in-flight worker and start a new one. Returns the new
    /// search's generation.
    pub fn start_search(&mut self, query: &str) -> u64 {
        self.cancel_current();
        self.generation += 1;

        let generation = self.generation;
        let cancel = Arc::new(AtomicBool::new(false));
        let (done_tx, done_rx) = mpsc::channel();
        let tx = self.tx.clone();
        let options = self.options.clone();
        let query = query.to_string();
        let worker_cancel = Arc::clone(&cancel);

        let spawned = thread::Builder::new()
            .name(format!("glint-search-{generation}"))
            .spawn(move || {
                let entries = collect_entries(&query, &options, &worker_cancel);
                if !worker_cancel.load(Ordering::Relaxed) {
                    let _ = tx.send(SearchDelivery {
                        generation,
                        entries,
                    });
                }
                let _ = done_tx.send(());
            });

        match spawned {
            Ok(_) => {
                self.worker = Some(WorkerHandle {
                    generation,
                    cancel,
                    done: done_rx,
                });
            }
            Err(error) => {
                logging::error(&format!("failed to spawn search worker: {error}"));
            }
        }

        generation
    }

    /// Cooperatively cancel the current worker. Waits up to [`CANCEL_GRACE`]
    /// for acknowledgement; a worker that overruns is abandoned and its
    /// late delivery is filtered out by the generation check.
    pub fn cancel_current(&mut self) {
        let Some(handle) = self.worker.take() else {
            return;
        };
        handle.cancel.store(true, Ordering::Relaxed);
        if handle.done.recv_timeout(CANCEL_GRACE).is_err() {
            logging::warn(&format!(
                "search worker (generation {}) ignored cancellation; abandoning it",
                handle.generation
            ));
        }
    }

    /// Drain the delivery channel. Stale deliveries are discarded silently;
    /// the newest current-generation delivery wins.
    pub fn poll_results(&mut self) -> Option<Vec<ResultEntry>> {
        let mut latest = None;
        while let Ok(delivery) = self.rx.try_recv() {
            if delivery.generation == self.generation {
                latest = Some(delivery.entries);
            }
        }
        latest
    }
}

impl Drop for SearchCoordinator {
    fn drop(&mut self) {
        self.cancel_current();
    }
}

fn collect_entries(query: &str, options: &SearchOptions, cancel: &AtomicBool) -> Vec<ResultEntry> {
    let needle = normalize_for_match(query);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut entries: Vec<ResultEntry> = Vec::new();
    'roots: for root in &options.roots {
        if !root.exists() {
            continue;
        }
        let walker = WalkDir::new(root)
            .max_depth(options.depth_limit)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| entry.ok());
        for entry in walker {
            if cancel.load(Ordering::Relaxed) {
                return entries;
            }
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if !normalize_for_match(&name).contains(&needle) {
                continue;
            }
            let path = entry.path().to_string_lossy().into_owned();
            if entries.iter().any(|existing| existing.path == path) {
                continue;
            }
            let kind = if is_launchable_path(&path) {
                EntryKind::App
            } else {
                EntryKind::File
            };
            entries.push(ResultEntry::from_owned(name, path, kind));
            if entries.len() >= options.result_cap {
                break 'roots;
            }
        }
    }

    if entries.len() < REGISTRY_TOPUP_THRESHOLD && !cancel.load(Ordering::Relaxed) {
        let room = options.result_cap - entries.len();
        for app in registry_apps::scan_installed_apps(query, room) {
            if !entries.iter().any(|existing| existing.path == app.path) {
                entries.push(app);
            }
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::{collect_entries, SearchOptions};
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn cancelled_walk_stops_early() {
        let dir = std::env::temp_dir().join(format!(
            "glint-walk-cancel-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        for i in 0..5 {
            std::fs::write(dir.join(format!("match-{i}.txt")), b"x").unwrap();
        }

        let cancel = AtomicBool::new(true);
        let options = SearchOptions::new(vec![dir.clone()]);
        let entries = collect_entries("match", &options, &cancel);
        assert!(entries.is_empty());
        assert!(cancel.load(Ordering::Relaxed));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn walk_caps_results_and_skips_non_matches() {
        let dir = std::env::temp_dir().join(format!(
            "glint-walk-cap-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        for i in 0..30 {
            std::fs::write(dir.join(format!("report-{i}.txt")), b"x").unwrap();
        }
        std::fs::write(dir.join("unrelated.txt"), b"x").unwrap();

        let cancel = AtomicBool::new(false);
        let options = SearchOptions::new(vec![dir.clone()]);
        let entries = collect_entries("report", &options, &cancel);
        assert_eq!(entries.len(), super::WALK_RESULT_CAP);
        assert!(entries.iter().all(|entry| entry.name.contains("report")));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
