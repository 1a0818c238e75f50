#[inline]
pub fn strip_surrounding_quotes(s: &str) -> &str {
    let b = s.as_bytes();
    if b.len() >= 2 {
        let first = b[0];
        let last = b[b.len() - 1];
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

#[inline]
pub fn is_comment_or_blank(line: &str) -> bool {
    let t = line.trim_start();
    t.is_empty() || t.starts_with('%')
}

/// Splits a comma separated line, honouring single and double quotes.
///
/// Fields are trimmed and their surrounding quotes removed.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes: Option<char> = None;

    for ch in line.chars() {
        match in_quotes {
            Some(q) if ch == q => {
                in_quotes = None;
                cur.push(ch);
            }
            Some(_) => cur.push(ch),
            None if ch == '"' || ch == '\'' => {
                in_quotes = Some(ch);
                cur.push(ch);
            }
            None if ch == ',' => {
                out.push(strip_surrounding_quotes(cur.trim()).to_string());
                cur.clear();
            }
            None => cur.push(ch),
        }
    }
    if !cur.trim().is_empty() || !out.is_empty() {
        out.push(strip_surrounding_quotes(cur.trim()).to_string());
    }
    out
}

/// Splits `name rest...` where `name` may be quoted and contain spaces.
///
/// Returns `None` when the name is empty or a quote is left open.
pub fn split_leading_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    let first = s.chars().next()?;
    if first == '\'' || first == '"' {
        let close = s[1..].find(first)? + 1;
        let name = &s[1..close];
        if name.is_empty() {
            return None;
        }
        return Some((name, s[close + 1..].trim()));
    }
    match s.find(char::is_whitespace) {
        Some(end) => Some((&s[..end], s[end..].trim())),
        None => Some((s, "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_quotes_works() {
        assert_eq!(strip_surrounding_quotes("'a,b'"), "a,b");
        assert_eq!(strip_surrounding_quotes(r#""x""#), "x");
        assert_eq!(strip_surrounding_quotes("nq"), "nq");
        assert_eq!(strip_surrounding_quotes("'"), "'");
    }

    #[test]
    fn split_fields_keeps_quoted_commas() {
        let line = r#"'sunny, warm',85, "85" ,FALSE,no"#;
        let p = split_fields(line);
        assert_eq!(p, vec!["sunny, warm", "85", "85", "FALSE", "no"]);
    }

    #[test]
    fn split_fields_keeps_trailing_empty_field() {
        assert_eq!(split_fields("1,2,"), vec!["1", "2", ""]);
        assert!(split_fields("   ").is_empty());
    }

    #[test]
    fn leading_token_plain_and_quoted() {
        assert_eq!(
            split_leading_token("sepal_length numeric"),
            Some(("sepal_length", "numeric"))
        );
        assert_eq!(
            split_leading_token("'petal width'  REAL"),
            Some(("petal width", "REAL"))
        );
        assert_eq!(split_leading_token("iris"), Some(("iris", "")));
        assert_eq!(split_leading_token("'open numeric"), None);
        assert_eq!(split_leading_token("   "), None);
    }

    #[test]
    fn comments_and_blanks_detected() {
        assert!(is_comment_or_blank("  % note"));
        assert!(is_comment_or_blank(""));
        assert!(!is_comment_or_blank("5.1,3.5"));
    }
}
