//! Chat text formatting.
//!
//! Messages are authored with `&` colour codes and `{}` placeholders, e.g.
//! `"&r&f{} x{}"`. The codes are rewritten to the section sign understood by
//! clients before arguments are substituted, so argument text is never
//! reinterpreted as a colour code.

use std::fmt::Display;

/// The character clients interpret as the start of a formatting code.
pub const COLOR_CHAR: char = '\u{a7}';

const FORMAT_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

/// Replaces every `alt_char` that precedes a valid formatting code with
/// [`COLOR_CHAR`] and lowercases the code.
#[must_use]
pub fn translate_alternate_color_codes(alt_char: char, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == alt_char
            && let Some(&code) = chars.peek()
            && FORMAT_CODES.contains(code)
        {
            out.push(COLOR_CHAR);
            out.push(code.to_ascii_lowercase());
            chars.next();
            continue;
        }
        out.push(ch);
    }

    out
}

/// Translates `&` codes in `template`, then fills each `{}` with the next
/// argument.
///
/// Placeholders without a matching argument are kept verbatim and surplus
/// arguments are ignored.
#[must_use]
pub fn chat_format(template: &str, args: &[&dyn Display]) -> String {
    let template = translate_alternate_color_codes('&', template);
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template.as_str();

    while let Some(idx) = rest.find("{}") {
        out.push_str(&rest[..idx]);
        match args.next() {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str("{}"),
        }
        rest = &rest[idx + 2..];
    }
    out.push_str(rest);

    out
}

/// Removes formatting codes, leaving the plain text.
#[must_use]
pub fn strip_color(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch == COLOR_CHAR {
            chars.next();
            continue;
        }
        out.push(ch);
    }

    out
}
