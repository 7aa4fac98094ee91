//! Ограниченный набор символов SEPA и приведение свободного текста к нему.

/// Таблица замен; пары применяются по порядку ко всей строке.
const SUBSTITUTIONS: [(&str, &str); 11] = [
    ("Ä", "Ae"),
    ("Ö", "Oe"),
    ("Ü", "Ue"),
    ("ß", "ss"),
    ("ä", "ae"),
    ("ö", "oe"),
    ("ü", "ue"),
    ("&", "+"),
    ("*", "."),
    ("$", "."),
    ("%", "."),
];

/// Символ входит в допустимый набор SEPA.
pub fn is_allowed(c: char) -> bool {
    matches!(
        c,
        ' ' | '\'' | '(' | ')' | '+' | ',' | '-' | '.' | '/' | ':' | '?'
    ) || c.is_ascii_alphanumeric()
}

/// Замена умляутов/спецсимволов, обрезка до `max_len` символов (после
/// замен) и пробел вместо каждого недопустимого символа — длина при этом
/// сохраняется. Никогда не завершается ошибкой.
pub fn sanitize(text: &str, max_len: Option<usize>) -> String {
    let mut s = text.to_string();
    for (from, to) in SUBSTITUTIONS {
        s = s.replace(from, to);
    }
    let truncated: String = match max_len {
        Some(n) => s.chars().take(n).collect(),
        None => s,
    };
    truncated
        .chars()
        .map(|c| if is_allowed(c) { c } else { ' ' })
        .collect()
}
