use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));

static PHOTO_CREDIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"Foto:.*?\s*data-.*?=".*?""#).expect("photo credit pattern"));

static DATA_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-.*?=".*?""#).expect("data attribute pattern"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Replacements applied in declaration order: HTML entities first, then
/// UTF-8 text that was decoded as Windows-1252.
pub const REPLACEMENTS: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#039;", "'"),
    ("&apos;", "'"),
    ("&mdash;", "\u{2014}"),
    ("&ndash;", "\u{2013}"),
    ("&nbsp;", " "),
    ("&laquo;", "«"),
    ("&raquo;", "»"),
    ("&lsquo;", "\u{2018}"),
    ("&rsquo;", "\u{2019}"),
    ("&ldquo;", "\u{201c}"),
    ("&rdquo;", "\u{201d}"),
    ("&bull;", "•"),
    ("&hellip;", "…"),
    ("&trade;", "™"),
    ("&reg;", "®"),
    ("&copy;", "©"),
    ("&euro;", "€"),
    ("&pound;", "£"),
    ("&yen;", "¥"),
    ("&cent;", "¢"),
    ("&sect;", "§"),
    ("&para;", "¶"),
    ("&deg;", "°"),
    ("&plusmn;", "±"),
    ("&frac12;", "½"),
    ("&frac14;", "¼"),
    ("&frac34;", "¾"),
    ("&times;", "×"),
    ("&divide;", "÷"),
    ("&ne;", "≠"),
    ("&le;", "≤"),
    ("&ge;", "≥"),
    ("&infin;", "∞"),
    ("&sum;", "∑"),
    ("&prod;", "∏"),
    ("&pi;", "π"),
    ("&int;", "∫"),
    ("&radic;", "√"),
    ("&asymp;", "≈"),
    ("&delta;", "δ"),
    ("&Delta;", "Δ"),
    ("&omega;", "ω"),
    ("&Omega;", "Ω"),
    ("&alpha;", "α"),
    ("&beta;", "β"),
    ("&gamma;", "γ"),
    ("&lambda;", "λ"),
    ("&mu;", "μ"),
    ("&nu;", "ν"),
    ("&xi;", "ξ"),
    ("&rho;", "ρ"),
    ("&sigma;", "σ"),
    ("&tau;", "τ"),
    ("&phi;", "φ"),
    ("&chi;", "χ"),
    ("&psi;", "ψ"),
    ("&zeta;", "ζ"),
    ("&theta;", "θ"),
    ("&epsilon;", "ε"),
    ("&eta;", "η"),
    ("&iota;", "ι"),
    ("&kappa;", "κ"),
    // mis-encoded sequences
    ("Ã§", "ç"),
    ("Ã\u{2021}", "Ç"),
    ("Ã¡", "á"),
    ("Ã\u{81}", "Á"),
    ("Ã£", "ã"),
    ("Ã\u{192}", "Ã"),
    ("Ã¢", "â"),
    ("Ã\u{201a}", "Â"),
    ("Ã©", "é"),
    ("Ã\u{2030}", "É"),
    ("Ãª", "ê"),
    ("Ã\u{160}", "Ê"),
    ("Ã\u{ad}", "í"),
    ("Ã\u{8d}", "Í"),
    ("Ã³", "ó"),
    ("Ã\u{201c}", "Ó"),
    ("Ãµ", "õ"),
    ("Ã\u{2022}", "Õ"),
    ("Ã´", "ô"),
    ("Ã\u{201d}", "Ô"),
    ("Ãº", "ú"),
    ("Ã\u{161}", "Ú"),
    ("Ã¼", "ü"),
    ("Ã\u{153}", "Ü"),
    ("â\u{201a}¬", "€"),
    ("â\u{201e}¢", "™"),
    ("â\u{20ac}\u{2122}", "\u{2019}"),
    ("â\u{20ac}\u{2dc}", "\u{2018}"),
    ("â\u{20ac}\u{153}", "\u{201c}"),
    ("â\u{20ac}\u{9d}", "\u{201d}"),
    ("â\u{20ac}\u{201c}", "\u{2013}"),
    ("â\u{20ac}\u{201d}", "\u{2014}"),
    ("Âº", "º"),
    ("Âª", "ª"),
];

/// Strip markup, WordPress attribute debris and broken encodings from `raw`.
///
/// Passes repeat until the text stops changing, so decoded entities that
/// form new markup are stripped as well and the result is stable under a
/// second call. Every pass either shrinks the text or leaves it unchanged.
pub fn normalize(raw: &str) -> String {
    let mut current = clean_pass(raw);
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_pass(text: &str) -> String {
    let stripped = TAG_RE.replace_all(text, "");
    let stripped = PHOTO_CREDIT_RE.replace_all(&stripped, "");
    let stripped = DATA_ATTR_RE.replace_all(&stripped, "");

    let mut fixed = stripped.into_owned();
    for (broken, repaired) in REPLACEMENTS {
        if fixed.contains(broken) {
            fixed = fixed.replace(broken, repaired);
        }
    }

    WHITESPACE_RE.replace_all(&fixed, " ").trim().to_string()
}
