//! SQL `LIKE` pattern helpers used by metadata listings
//!
//! Drivers that cannot push a table pattern down to the server (SQLite's
//! `sqlite_master` has no catalog/schema columns) filter names locally with
//! [`like_match`], which follows the same rules the server-side `LIKE`
//! operator applies.

/// Characters accepted as identifier quotes around a name segment
const QUOTE_CHARS: [char; 3] = ['"', '\'', '`'];

/// Case handling for [`like_match`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternCase {
    /// Characters must match exactly
    #[default]
    Sensitive,
    /// ASCII letters match regardless of case (SQLite identifier semantics)
    AsciiInsensitive,
}

impl PatternCase {
    fn eq(self, a: char, b: char) -> bool {
        match self {
            PatternCase::Sensitive => a == b,
            PatternCase::AsciiInsensitive => a.eq_ignore_ascii_case(&b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// `%`
    Any,
    /// `_`
    One,
    Literal(char),
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => {
                // consecutive wildcards collapse
                if tokens.last() != Some(&Token::Any) {
                    tokens.push(Token::Any);
                }
            }
            '_' => tokens.push(Token::One),
            '\\' => tokens.push(Token::Literal(chars.next().unwrap_or('\\'))),
            c => tokens.push(Token::Literal(c)),
        }
    }
    tokens
}

/// Match `text` against a SQL `LIKE` pattern.
///
/// `%` matches any run of characters (including none), `_` matches exactly
/// one character and `\` makes the following character literal.
pub fn like_match(pattern: &str, text: &str, case: PatternCase) -> bool {
    let tokens = tokenize(pattern);
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0usize, 0usize);
    // position right after the last `%` and the text index it was tried at
    let mut resume: Option<(usize, usize)> = None;

    while t < text.len() {
        match tokens.get(p) {
            Some(Token::Any) => {
                resume = Some((p + 1, t));
                p += 1;
                continue;
            }
            Some(Token::One) => {
                p += 1;
                t += 1;
                continue;
            }
            Some(Token::Literal(c)) if case.eq(*c, text[t]) => {
                p += 1;
                t += 1;
                continue;
            }
            _ => {}
        }

        match resume {
            Some((after_any, tried_at)) => {
                p = after_any;
                t = tried_at + 1;
                resume = Some((after_any, t));
            }
            None => return false,
        }
    }

    tokens[p..].iter().all(|token| *token == Token::Any)
}

/// Strip one pair of surrounding identifier quotes from a name segment.
///
/// Some metadata APIs want bare patterns, so `"users"`, `'users'` and
/// `` `users` `` all become `users`. Names that are not wrapped are returned
/// unchanged.
pub fn strip_quotes(name: &str) -> &str {
    let mut chars = name.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if QUOTE_CHARS.contains(&first) && QUOTE_CHARS.contains(&last) => {
            &name[first.len_utf8()..name.len() - last.len_utf8()]
        }
        _ => name,
    }
}
