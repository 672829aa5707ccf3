use std::sync::LazyLock;

use regex::Regex;

/// English finance terms and their Portuguese rendering
const GLOSSARY: &[(&str, &str)] = &[
    ("Business", "Negócios"),
    ("Markets", "Mercados"),
    ("Economy", "Economia"),
    ("Stocks", "Ações"),
    ("Investment", "Investimento"),
    ("Bitcoin", "Bitcoin"),
    ("Ethereum", "Ethereum"),
    ("Crypto", "Cripto"),
    ("Blockchain", "Blockchain"),
];

static GLOSSARY_RE: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    GLOSSARY
        .iter()
        .map(|(en, pt)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(en));
            (Regex::new(&pattern).expect("glossary pattern"), *pt)
        })
        .collect()
});

/// Whole-word, case-insensitive substitution of a few finance terms.
/// Anything not in the glossary passes through untouched.
pub fn translate_to_portuguese(text: &str) -> String {
    let mut translated = text.to_string();
    for (re, pt) in GLOSSARY_RE.iter() {
        if re.is_match(&translated) {
            translated = re.replace_all(&translated, *pt).into_owned();
        }
    }
    translated
}
