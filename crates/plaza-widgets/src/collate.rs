//! Spanish collation at base strength.
//!
//! Case and accents are ignored when ordering (`"Úrsula"` and `"úrsula"`
//! compare equal, `"árbol"` sorts with the `a`s) while `ñ` stays a letter of
//! its own between `n` and `o`. Separators sort before digits and digits
//! before letters. Equal keys keep their original order when used with a
//! stable sort.

use std::cmp::Ordering;

const DIGIT_BASE: u32 = 0x0020_0000;
const LETTER_BASE: u32 = 0x0040_0000;
const COMBINING_TILDE: char = '\u{0303}';

/// A precomputed primary-strength sort key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SortKey(Vec<u32>);

impl SortKey {
    /// Build the key for `text`.
    pub fn new(text: &str) -> Self {
        let mut chars = text.chars().flat_map(char::to_lowercase).peekable();
        let mut weights = Vec::new();
        while let Some(c) = chars.next() {
            if is_combining_mark(c) {
                continue;
            }
            // "n" followed by a combining tilde is a decomposed "ñ".
            if c == 'n' && chars.peek() == Some(&COMBINING_TILDE) {
                chars.next();
                weights.push(weight('ñ'));
            } else {
                weights.push(weight(c));
            }
        }
        SortKey(weights)
    }
}

/// Compare two strings with Spanish base-strength rules.
pub fn compare(a: &str, b: &str) -> Ordering {
    SortKey::new(a).cmp(&SortKey::new(b))
}

fn weight(c: char) -> u32 {
    if c == 'ñ' {
        return LETTER_BASE + ('n' as u32) * 2 + 1;
    }
    let base = fold(c);
    if base.is_alphabetic() {
        LETTER_BASE + (base as u32) * 2
    } else if base.is_numeric() {
        DIGIT_BASE + base as u32
    } else {
        base as u32
    }
}

// Decomposed input (e.g. "u\u{301}") carries its accents as separate marks.
fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

fn fold(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' | 'ĉ' | 'ċ' => 'c',
        'ď' | 'đ' => 'd',
        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' | 'ĝ' | 'ġ' | 'ģ' => 'g',
        'í' | 'ì' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => 'i',
        'ĺ' | 'ļ' | 'ľ' | 'ł' => 'l',
        'ń' | 'ň' | 'ņ' => 'n',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' | 'ō' | 'ő' => 'o',
        'ŕ' | 'ř' => 'r',
        'ś' | 'š' | 'ş' | 'ș' => 's',
        'ť' | 'ţ' | 'ț' => 't',
        'ú' | 'ù' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}
