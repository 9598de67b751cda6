//! Text transformation commands: `text upper hello`, `encode base64 hi`,
//! `decode url a%20b`, and friends.

use std::fmt::{Display, Formatter};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOp {
    Upper,
    Lower,
    TitleCase,
    Reverse,
    Base64Encode,
    Base64Decode,
    UrlEncode,
    UrlDecode,
    WordCount,
    RemoveSpaces,
    RemoveNewlines,
}

impl TextOp {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Upper => "uppercase",
            Self::Lower => "lowercase",
            Self::TitleCase => "title case",
            Self::Reverse => "reverse",
            Self::Base64Encode => "base64 encode",
            Self::Base64Decode => "base64 decode",
            Self::UrlEncode => "url encode",
            Self::UrlDecode => "url decode",
            Self::WordCount => "word count",
            Self::RemoveSpaces => "remove spaces",
            Self::RemoveNewlines => "remove newlines",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOpError {
    InvalidBase64,
    InvalidUrlEncoding,
}

impl Display for TextOpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBase64 => write!(f, "input is not valid base64"),
            Self::InvalidUrlEncoding => write!(f, "input is not valid percent-encoding"),
        }
    }
}

impl std::error::Error for TextOpError {}

/// Parse the `<verb> <op> <payload>` command grammar. Verbs: `text`,
/// `encode`, `decode`. Returns `None` for anything else so the query falls
/// through to the next interpreter.
pub fn parse_command(query: &str) -> Option<(TextOp, &str)> {
    let trimmed = query.trim();
    let (verb, rest) = trimmed.split_once(' ')?;
    let (op_token, payload) = rest.trim_start().split_once(' ')?;
    let payload = payload.trim_start();
    if payload.is_empty() {
        return None;
    }

    let op = match (
        verb.to_ascii_lowercase().as_str(),
        op_token.to_ascii_lowercase().as_str(),
    ) {
        ("text", "upper") => TextOp::Upper,
        ("text", "lower") => TextOp::Lower,
        ("text", "title") => TextOp::TitleCase,
        ("text", "reverse") => TextOp::Reverse,
        ("text", "wordcount" | "count") => TextOp::WordCount,
        ("text", "despace") => TextOp::RemoveSpaces,
        ("text", "oneline") => TextOp::RemoveNewlines,
        ("encode", "base64") => TextOp::Base64Encode,
        ("decode", "base64") => TextOp::Base64Decode,
        ("encode", "url") => TextOp::UrlEncode,
        ("decode", "url") => TextOp::UrlDecode,
        _ => return None,
    };

    Some((op, payload))
}

pub fn apply(op: TextOp, text: &str) -> Result<String, TextOpError> {
    match op {
        TextOp::Upper => Ok(text.to_uppercase()),
        TextOp::Lower => Ok(text.to_lowercase()),
        TextOp::TitleCase => Ok(title_case(text)),
        TextOp::Reverse => Ok(text.chars().rev().collect()),
        TextOp::Base64Encode => Ok(BASE64.encode(text.as_bytes())),
        TextOp::Base64Decode => {
            let bytes = BASE64
                .decode(text.trim())
                .map_err(|_| TextOpError::InvalidBase64)?;
            String::from_utf8(bytes).map_err(|_| TextOpError::InvalidBase64)
        }
        TextOp::UrlEncode => Ok(urlencoding::encode(text).into_owned()),
        TextOp::UrlDecode => urlencoding::decode(text)
            .map(|decoded| decoded.into_owned())
            .map_err(|_| TextOpError::InvalidUrlEncoding),
        TextOp::WordCount => Ok(format!(
            "Words: {}, Characters: {}",
            text.split_whitespace().count(),
            text.chars().count()
        )),
        TextOp::RemoveSpaces => Ok(text.replace(' ', "")),
        TextOp::RemoveNewlines => Ok(text.replace('\n', " ").replace('\r', "")),
    }
}

fn title_case(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            output.push(c);
        } else if at_word_start {
            output.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            output.extend(c.to_lowercase());
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::{apply, parse_command, TextOp, TextOpError};

    #[test]
    fn parses_command_grammar() {
        assert_eq!(
            parse_command("text upper hello world"),
            Some((TextOp::Upper, "hello world"))
        );
        assert_eq!(
            parse_command("encode base64 hi"),
            Some((TextOp::Base64Encode, "hi"))
        );
        assert_eq!(parse_command("text upper"), None);
        assert_eq!(parse_command("notepad"), None);
        assert_eq!(parse_command("encode rot13 hi"), None);
    }

    #[test]
    fn case_and_reverse_transforms() {
        assert_eq!(apply(TextOp::Upper, "abc").unwrap(), "ABC");
        assert_eq!(apply(TextOp::TitleCase, "hello wORLD").unwrap(), "Hello World");
        assert_eq!(apply(TextOp::Reverse, "abc").unwrap(), "cba");
    }

    #[test]
    fn base64_round_trips_and_rejects_garbage() {
        let encoded = apply(TextOp::Base64Encode, "glint").unwrap();
        assert_eq!(apply(TextOp::Base64Decode, &encoded).unwrap(), "glint");
        assert_eq!(
            apply(TextOp::Base64Decode, "!!not-base64!!"),
            Err(TextOpError::InvalidBase64)
        );
    }

    #[test]
    fn url_encoding_round_trips() {
        let encoded = apply(TextOp::UrlEncode, "a b&c").unwrap();
        assert_eq!(encoded, "a%20b%26c");
        assert_eq!(apply(TextOp::UrlDecode, &encoded).unwrap(), "a b&c");
    }

    #[test]
    fn word_count_and_whitespace_cleanup() {
        assert_eq!(
            apply(TextOp::WordCount, "one two  three").unwrap(),
            "Words: 3, Characters: 14"
        );
        assert_eq!(apply(TextOp::RemoveSpaces, "a b c").unwrap(), "abc");
        assert_eq!(apply(TextOp::RemoveNewlines, "a\r\nb").unwrap(), "a b");
    }
}
