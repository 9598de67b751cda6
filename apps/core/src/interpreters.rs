//! Query classification: the interpreter chain consulted synchronously
//! before any search worker is spawned. Pure; no side effects.

use crate::calculator;
use crate::model::{ActionDescription, ActionKind};
use crate::system_commands;
use crate::text_ops;
use crate::web_search;

pub fn classify(query: &str) -> Option<ActionDescription> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }

    if calculator::looks_like_expression(trimmed) {
        if let Some(result) = calculator::evaluate(trimmed) {
            return Some(ActionDescription {
                kind: ActionKind::Calculation,
                title: format!("{trimmed} = {result}"),
                subtitle: "Calculation result (Enter to copy)".to_string(),
                payload: result,
            });
        }
    }

    if let Some(result) = calculator::parse_percentage(trimmed) {
        return Some(ActionDescription {
            kind: ActionKind::Percentage,
            title: result.clone(),
            subtitle: "Percentage calculation (Enter to copy)".to_string(),
            payload: result,
        });
    }

    if let Some((op, payload)) = text_ops::parse_command(trimmed) {
        // A malformed payload still resolves to an inline entry; failures
        // surface as results, never as crashes.
        return Some(match text_ops::apply(op, payload) {
            Ok(result) => ActionDescription {
                kind: ActionKind::TextTransform,
                title: result.clone(),
                subtitle: format!("Text processing: {} (Enter to copy)", op.label()),
                payload: result,
            },
            Err(error) => ActionDescription {
                kind: ActionKind::TextTransform,
                title: format!("Error: {error}"),
                subtitle: format!("Text processing: {}", op.label()),
                payload: String::new(),
            },
        });
    }

    if let Some(search) = web_search::parse(trimmed) {
        return Some(ActionDescription {
            kind: ActionKind::WebSearch,
            title: if search.engine == "url" {
                format!("Open {}", search.terms)
            } else {
                format!("Search {} for '{}'", search.engine, search.terms)
            },
            subtitle: search.url.clone(),
            payload: search.url,
        });
    }

    if let Some((title, command)) = system_commands::parse_volume(trimmed) {
        return Some(ActionDescription {
            kind: ActionKind::SystemCommand,
            title,
            subtitle: "System volume".to_string(),
            payload: command,
        });
    }

    if let Some(command) = system_commands::lookup(trimmed) {
        return Some(ActionDescription {
            kind: ActionKind::SystemCommand,
            title: command.title.to_string(),
            subtitle: format!("Run '{}'", command.command),
            payload: command.command.to_string(),
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::classify;
    use crate::model::ActionKind;

    #[test]
    fn classifies_each_interpreter_kind() {
        assert_eq!(classify("2+2").unwrap().kind, ActionKind::Calculation);
        assert_eq!(
            classify("15% of 200").unwrap().kind,
            ActionKind::Percentage
        );
        assert_eq!(
            classify("text upper hi").unwrap().kind,
            ActionKind::TextTransform
        );
        assert_eq!(
            classify("github walkdir").unwrap().kind,
            ActionKind::WebSearch
        );
        assert_eq!(classify("lock").unwrap().kind, ActionKind::SystemCommand);
        assert_eq!(
            classify("volume 30").unwrap().kind,
            ActionKind::SystemCommand
        );
    }

    #[test]
    fn plain_queries_fall_through_to_search() {
        assert!(classify("terminal").is_none());
        assert!(classify("   ").is_none());
    }

    #[test]
    fn calculation_wins_over_other_interpreters() {
        let action = classify("2+2").unwrap();
        assert_eq!(action.payload, "4");
        assert_eq!(action.title, "2+2 = 4");
    }

    #[test]
    fn text_transform_failure_surfaces_as_inline_error_entry() {
        let action = classify("decode base64 !!bad!!").unwrap();
        assert_eq!(action.kind, ActionKind::TextTransform);
        assert!(action.title.starts_with("Error:"));
        assert!(action.payload.is_empty());
    }
}
