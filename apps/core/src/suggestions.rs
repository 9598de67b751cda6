//! Idle-state suggestions: usage data merged with a fixed rule table.

use crate::model::normalize_for_match;
use crate::usage_store::UsageStore;

const RECENT_LIMIT: usize = 5;
const SUGGESTION_LIMIT: usize = 10;

const WEIGHT_RECENT: i64 = 1_000;
const WEIGHT_WORK_HOURS: i64 = 500;
const WEIGHT_EVENING: i64 = 300;

const WORK_HOUR_APPS: [&str; 6] = ["outlook", "teams", "excel", "word", "powerpoint", "chrome"];
const EVENING_APPS: [&str; 5] = ["steam", "discord", "spotify", "vlc", "games"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionSource {
    Frequent,
    Recent,
    WorkHours,
    Evening,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub name: String,
    pub source: SuggestionSource,
    pub weight: i64,
}

/// Build the suggestion list for a (possibly empty) query prefix. The
/// wall-clock hour is passed in by the caller so the rule table is
/// deterministic under test.
pub fn suggestions_for(store: &UsageStore, query: &str, hour: u8) -> Vec<Suggestion> {
    let needle = normalize_for_match(query);
    let mut suggestions = Vec::new();

    if let Ok(frequent) = store.most_used(SUGGESTION_LIMIT) {
        for record in frequent {
            if matches_query(&record.name, &needle) {
                suggestions.push(Suggestion {
                    weight: record.use_count as i64,
                    name: record.name,
                    source: SuggestionSource::Frequent,
                });
            }
        }
    }

    if let Ok(recent) = store.most_recent(RECENT_LIMIT) {
        for record in recent {
            if matches_query(&record.name, &needle) {
                suggestions.push(Suggestion {
                    name: record.name,
                    source: SuggestionSource::Recent,
                    weight: WEIGHT_RECENT,
                });
            }
        }
    }

    let (rule_apps, source, weight) = if (9..=17).contains(&hour) {
        (&WORK_HOUR_APPS[..], SuggestionSource::WorkHours, WEIGHT_WORK_HOURS)
    } else {
        (&EVENING_APPS[..], SuggestionSource::Evening, WEIGHT_EVENING)
    };
    for app in rule_apps {
        if matches_query(app, &needle) {
            suggestions.push(Suggestion {
                name: (*app).to_string(),
                source,
                weight,
            });
        }
    }

    suggestions.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.name.cmp(&b.name)));
    suggestions.truncate(SUGGESTION_LIMIT);
    suggestions
}

fn matches_query(name: &str, needle: &str) -> bool {
    needle.is_empty() || normalize_for_match(name).contains(needle)
}

#[cfg(test)]
mod tests {
    use super::{suggestions_for, SuggestionSource};
    use crate::usage_store::UsageStore;

    #[test]
    fn recents_outrank_rule_table_entries() {
        let store = UsageStore::open_memory().unwrap();
        store.record_launch("Terminal", "app", 100).unwrap();

        let suggestions = suggestions_for(&store, "", 10);
        assert_eq!(suggestions[0].name, "Terminal");
        assert_eq!(suggestions[0].source, SuggestionSource::Recent);
        assert!(suggestions
            .iter()
            .any(|s| s.source == SuggestionSource::WorkHours));
    }

    #[test]
    fn evening_hours_switch_the_rule_table() {
        let store = UsageStore::open_memory().unwrap();
        let suggestions = suggestions_for(&store, "", 22);
        assert!(suggestions
            .iter()
            .all(|s| s.source == SuggestionSource::Evening));
        assert!(suggestions.iter().any(|s| s.name == "spotify"));
    }

    #[test]
    fn query_filters_all_sources() {
        let store = UsageStore::open_memory().unwrap();
        store.record_launch("Spotify Desktop", "app", 100).unwrap();

        let suggestions = suggestions_for(&store, "spot", 22);
        assert!(suggestions.iter().all(|s| {
            crate::model::normalize_for_match(&s.name).contains("spot")
        }));
        assert!(suggestions.iter().any(|s| s.name == "Spotify Desktop"));
        assert!(suggestions.iter().any(|s| s.name == "spotify"));
    }
}
