//! Inline calculator: arithmetic expressions and percentage phrases.
//!
//! Expressions are parsed by a small recursive-descent parser over a
//! character whitelist; anything outside the grammar evaluates to `None`
//! rather than an error, because a query that is not arithmetic simply
//! falls through to the other interpreters.

/// Quick test used by the classifier before attempting a full parse.
pub fn looks_like_expression(query: &str) -> bool {
    query.chars().any(|c| "+-*/()=".contains(c))
}

pub fn evaluate(expression: &str) -> Option<String> {
    let normalized = expression
        .replace('×', "*")
        .replace('÷', "/")
        .trim()
        .trim_end_matches('=')
        .trim()
        .to_string();
    if normalized.is_empty() {
        return None;
    }
    if !normalized
        .chars()
        .all(|c| c.is_ascii_digit() || "+-*/().%^ ".contains(c))
    {
        return None;
    }

    let tokens: Vec<char> = normalized.chars().filter(|c| !c.is_whitespace()).collect();
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expression()?;
    if parser.pos != parser.tokens.len() {
        return None;
    }
    format_number(value)
}

/// `"15% of 200"` and `"200 + 15%"` phrases.
pub fn parse_percentage(text: &str) -> Option<String> {
    let trimmed = text.trim();

    if let Some((left, right)) = split_once_ignore_case(trimmed, " of ") {
        let percentage = parse_number(left.trim().trim_end_matches('%'))?;
        let number = parse_number(right.trim())?;
        let result = percentage / 100.0 * number;
        return Some(format!(
            "{}% of {} = {}",
            trim_float(percentage),
            trim_float(number),
            trim_float(result)
        ));
    }

    if let Some(rest) = trimmed.strip_suffix('%') {
        let (left, right) = rest.split_once('+')?;
        let number = parse_number(left.trim())?;
        let percentage = parse_number(right.trim())?;
        let result = number + number * percentage / 100.0;
        return Some(format!(
            "{} + {}% = {}",
            trim_float(number),
            trim_float(percentage),
            trim_float(result)
        ));
    }

    None
}

struct Parser {
    tokens: Vec<char>,
    pos: usize,
}

// Grammar:
//   expression := term (('+' | '-') term)*
//   term       := factor (('*' | '/' | '%') factor)*
//   factor     := '-' factor | primary ('^' factor)?
//   primary    := number | '(' expression ')'
impl Parser {
    fn expression(&mut self) -> Option<f64> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                '+' => {
                    self.pos += 1;
                    value += self.term()?;
                }
                '-' => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Some(value)
    }

    fn term(&mut self) -> Option<f64> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                '*' => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                '/' => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return None;
                    }
                    value /= divisor;
                }
                '%' => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return None;
                    }
                    value %= divisor;
                }
                _ => break,
            }
        }
        Some(value)
    }

    fn factor(&mut self) -> Option<f64> {
        if self.peek() == Some('-') {
            self.pos += 1;
            return Some(-self.factor()?);
        }
        let base = self.primary()?;
        if self.peek() == Some('^') {
            self.pos += 1;
            let exponent = self.factor()?;
            return Some(base.powf(exponent));
        }
        Some(base)
    }

    fn primary(&mut self) -> Option<f64> {
        match self.peek()? {
            '(' => {
                self.pos += 1;
                let value = self.expression()?;
                if self.peek() != Some(')') {
                    return None;
                }
                self.pos += 1;
                Some(value)
            }
            c if c.is_ascii_digit() || c == '.' => self.number(),
            _ => None,
        }
    }

    fn number(&mut self) -> Option<f64> {
        let start = self.pos;
        let mut seen_dot = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.pos += 1;
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return None;
        }
        let literal: String = self.tokens[start..self.pos].iter().collect();
        literal.parse().ok()
    }

    fn peek(&self) -> Option<char> {
        self.tokens.get(self.pos).copied()
    }
}

fn format_number(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    Some(trim_float(value))
}

fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let rendered = format!("{value:.6}");
    rendered.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn parse_number(text: &str) -> Option<f64> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    text.parse().ok()
}

fn split_once_ignore_case<'a>(text: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    let lowered = text.to_ascii_lowercase();
    let index = lowered.find(separator)?;
    Some((&text[..index], &text[index + separator.len()..]))
}
