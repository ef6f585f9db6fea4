//! SQL quoting helpers.
//!
//! Account names and passwords cannot be bound as prepared-statement
//! parameters in `CREATE USER` or `GRANT`, so those statements are
//! assembled as strings with the helpers here. Usernames come from the
//! directory, not from this process, and are escaped accordingly.

/// Quote a string literal for inclusion in a statement.
pub(crate) fn quote_literal(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        match ch {
            '\'' => quoted.push_str("''"),
            '\\' => quoted.push_str("\\\\"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('\'');
    quoted
}

/// Quote an identifier with backticks.
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Escape wildcard characters in a database-name pattern fragment so the
/// grant matches them literally.
pub(crate) fn escape_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '_' => escaped.push_str("\\_"),
            '%' => escaped.push_str("\\%"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_literal() {
        assert_eq!(quote_literal("alicebot"), "'alicebot'");
        assert_eq!(quote_literal("o'brien"), "'o''brien'");
        assert_eq!(quote_literal(r"back\slash"), r"'back\\slash'");
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("alicebot"), "`alicebot`");
        assert_eq!(quote_identifier("weird`name"), "`weird``name`");
    }

    #[test]
    fn test_escape_pattern() {
        assert_eq!(escape_pattern("alicebot"), "alicebot");
        assert_eq!(escape_pattern("a_b"), r"a\_b");
        assert_eq!(escape_pattern("100%"), r"100\%");
    }
}
