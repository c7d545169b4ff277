//! Cosmetic normalization of literal tokens: numeric casing and grouping,
//! delimiter escaping, atom quoting.

/// Normalize an integer token.
///
/// Decimal literals of six or more digits gain underscore grouping every
/// three digits from the right, unless the author already placed
/// underscores. Hexadecimal digits are upper-cased. Octal and binary
/// literals pass through unchanged.
pub fn normalize_integer(token: &str) -> String {
    if let Some(digits) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        return format!("0x{}", digits.to_ascii_uppercase());
    }
    if token.starts_with("0b") || token.starts_with("0o") {
        return token.to_string();
    }

    let (sign, digits) = match token.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", token),
    };

    if digits.len() < 6 || digits.contains('_') {
        return token.to_string();
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let leading = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && i % 3 == leading % 3 {
            grouped.push('_');
        }
        grouped.push(c);
    }
    format!("{}{}", sign, grouped)
}

/// Normalize a float token: the exponent marker and any digits in it are
/// lower-cased (`1.5E3` becomes `1.5e3`).
pub fn normalize_float(token: &str) -> String {
    token.to_ascii_lowercase()
}

/// Escape occurrences of `delimiter` inside literal text by prefixing a
/// backslash. Works for single- and multi-character delimiters; for
/// heredocs the three-quote sequence is escaped as a unit.
pub fn escape_delimiter(text: &str, delimiter: &str) -> String {
    if delimiter.is_empty() || !text.contains(delimiter) {
        return text.to_string();
    }
    let mut escaped = String::with_capacity(text.len() + 2);
    let mut rest = text;
    while let Some(at) = rest.find(delimiter) {
        escaped.push_str(&rest[..at]);
        escaped.push('\\');
        escaped.push_str(delimiter);
        rest = &rest[at + delimiter.len()..];
    }
    escaped.push_str(rest);
    escaped
}

/// Whether an atom body can print without quotes.
pub fn atom_is_plain(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }

    let mut rest = chars.peekable();
    while let Some(c) = rest.next() {
        let is_last = rest.peek().is_none();
        if c.is_ascii_alphanumeric() || c == '_' {
            continue;
        }
        if is_last && (c == '?' || c == '!') {
            continue;
        }
        return false;
    }
    true
}

/// Render an atom body, quoting and escaping when the text is not
/// identifier-like.
pub fn atom_body(name: &str) -> String {
    if atom_is_plain(name) {
        name.to_string()
    } else {
        format!("\"{}\"", escape_delimiter(name, "\""))
    }
}
