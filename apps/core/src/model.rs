#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    App,
    File,
    Action,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::App => "app",
            Self::File => "file",
            Self::Action => "action",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub name: String,
    pub path: String,
    pub kind: EntryKind,
    normalized_name: String,
}

impl ResultEntry {
    pub fn new(name: &str, path: &str, kind: EntryKind) -> Self {
        Self::from_owned(name.to_string(), path.to_string(), kind)
    }

    pub fn from_owned(name: String, path: String, kind: EntryKind) -> Self {
        let normalized_name = normalize_for_match(&name);
        Self {
            name,
            path,
            kind,
            normalized_name,
        }
    }

    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Calculation,
    Percentage,
    TextTransform,
    WebSearch,
    SystemCommand,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calculation => "calculation",
            Self::Percentage => "percentage",
            Self::TextTransform => "text_transform",
            Self::WebSearch => "web_search",
            Self::SystemCommand => "system_command",
        }
    }
}

/// Structured description of a non-search action resolved from a query.
/// The payload is what executing the action consumes: the text to copy,
/// the URL to open, or the command line to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescription {
    pub kind: ActionKind,
    pub title: String,
    pub subtitle: String,
    pub payload: String,
}

pub fn normalize_for_match(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}
