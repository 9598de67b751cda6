//! Web-search shortcuts: `<engine> <terms>` plus bare URL detection.

pub struct SearchEngine {
    pub keyword: &'static str,
    pub template: &'static str,
}

pub const SEARCH_ENGINES: [SearchEngine; 7] = [
    SearchEngine {
        keyword: "google",
        template: "https://www.google.com/search?q={}",
    },
    SearchEngine {
        keyword: "youtube",
        template: "https://www.youtube.com/results?search_query={}",
    },
    SearchEngine {
        keyword: "stackoverflow",
        template: "https://stackoverflow.com/search?q={}",
    },
    SearchEngine {
        keyword: "github",
        template: "https://github.com/search?q={}",
    },
    SearchEngine {
        keyword: "wikipedia",
        template: "https://en.wikipedia.org/wiki/Special:Search?search={}",
    },
    SearchEngine {
        keyword: "translate",
        template: "https://translate.google.com/?text={}",
    },
    SearchEngine {
        keyword: "maps",
        template: "https://maps.google.com/maps?q={}",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSearch {
    pub engine: &'static str,
    pub terms: String,
    pub url: String,
}

pub fn parse(query: &str) -> Option<WebSearch> {
    let trimmed = query.trim();
    let lowered = trimmed.to_ascii_lowercase();

    for engine in &SEARCH_ENGINES {
        if let Some(rest) = lowered.strip_prefix(engine.keyword) {
            let Some(terms) = rest.strip_prefix(' ') else {
                continue;
            };
            let terms = terms.trim();
            if terms.is_empty() {
                continue;
            }
            let encoded = urlencoding::encode(terms);
            return Some(WebSearch {
                engine: engine.keyword,
                terms: terms.to_string(),
                url: engine.template.replace("{}", &encoded),
            });
        }
    }

    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        return Some(WebSearch {
            engine: "url",
            terms: trimmed.to_string(),
            url: trimmed.to_string(),
        });
    }
    if lowered.starts_with("www.") {
        return Some(WebSearch {
            engine: "url",
            terms: trimmed.to_string(),
            url: format!("https://{trimmed}"),
        });
    }

    None
}
