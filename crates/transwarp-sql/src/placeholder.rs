//! Translation of the neutral `?` parameter marker into a driver's native
//! positional-parameter syntax.
//!
//! Markers inside quoted strings, quoted identifiers, and comments are left
//! alone. Values are never interpolated into the SQL text; only the marker
//! spelling changes.

use transwarp_core::{driver::Placeholder, Error, Result};

/// Rewrites every `?` marker in `sql` into `style`, checking that the
/// statement has exactly `params` markers.
pub fn rewrite_placeholders(sql: &str, style: Placeholder, params: usize) -> Result<String> {
    let mut dst = String::with_capacity(sql.len() + params * 2);
    let mut chars = sql.chars().peekable();
    let mut count = 0;

    while let Some(ch) = chars.next() {
        match ch {
            '?' => {
                count += 1;
                match style {
                    Placeholder::Question => dst.push('?'),
                    Placeholder::QuestionNumbered => {
                        dst.push('?');
                        dst.push_str(&count.to_string());
                    }
                    Placeholder::DollarNumbered => {
                        dst.push('$');
                        dst.push_str(&count.to_string());
                    }
                    Placeholder::Format => dst.push_str("%s"),
                }
            }
            '\'' | '"' | '`' => {
                push(&mut dst, ch, style);
                let mut closed = false;
                while let Some(next) = chars.next() {
                    push(&mut dst, next, style);
                    if next == ch {
                        // A doubled quote is an escaped quote.
                        if chars.peek() == Some(&ch) {
                            if let Some(escaped) = chars.next() {
                                push(&mut dst, escaped, style);
                            }
                            continue;
                        }
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(Error::invalid_statement(format!(
                        "unterminated {ch} quote in `{sql}`"
                    )));
                }
            }
            '-' if chars.peek() == Some(&'-') => {
                dst.push(ch);
                for next in chars.by_ref() {
                    push(&mut dst, next, style);
                    if next == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                dst.push(ch);
                let mut prev = '\0';
                for next in chars.by_ref() {
                    push(&mut dst, next, style);
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => push(&mut dst, ch, style),
        }
    }

    if count != params {
        return Err(Error::invalid_statement(format!(
            "statement has {count} placeholder(s) but {params} parameter(s) were supplied: `{sql}`"
        )));
    }

    Ok(dst)
}

/// Format-style drivers treat `%` as a directive everywhere in the text.
fn push(dst: &mut String, ch: char, style: Placeholder) {
    if ch == '%' && style == Placeholder::Format {
        dst.push_str("%%");
    } else {
        dst.push(ch);
    }
}
