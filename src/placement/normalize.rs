//! Optional field normalization for pick-and-place machines that only accept
//! a restricted character set.
//!
//! Value and package strings are transliterated through a fixed table:
//! spaces and commas become `_` and `.`, superscript digits and `±` are
//! spelled out, and Cyrillic letters map to Latin. References are left as is.

use super::ComponentRecord;

/// Replacement for a single character, or `None` to keep it.
fn replacement(ch: char) -> Option<&'static str> {
    let s = match ch {
        ' ' => "_",
        ',' => ".",
        '¹' => "^1_",
        '²' => "^2_",
        '³' => "^3_",
        '±' => "+-",

        'ё' | 'е' | 'э' => "e",
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' | 'ж' => "g",
        'д' => "d",
        'з' => "z",
        'и' | 'й' | 'ы' => "i",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "c",
        'ч' | 'щ' => "ch",
        'ш' => "sh",
        'ъ' | 'ь' | 'Ъ' | 'Ь' => "",
        'ю' => "y",
        'я' => "ya",

        'Ё' | 'Е' | 'Э' => "E",
        'А' => "A",
        'Б' => "B",
        'В' => "V",
        'Г' | 'Ж' => "G",
        'Д' => "D",
        'З' => "Z",
        'И' | 'Й' | 'Ы' => "I",
        'К' => "K",
        'Л' => "L",
        'М' => "M",
        'Н' => "N",
        'О' => "O",
        'П' => "P",
        'Р' => "R",
        'С' => "S",
        'Т' => "T",
        'У' => "U",
        'Ф' => "F",
        'Х' => "H",
        'Ц' => "C",
        'Ч' | 'Щ' => "CH",
        'Ш' => "SH",
        'Ю' => "Y",
        'Я' => "YA",

        _ => return None,
    };
    Some(s)
}

/// Transliterate one field.
pub fn transliterate(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for ch in field.chars() {
        match replacement(ch) {
            Some(s) => out.push_str(s),
            None => out.push(ch),
        }
    }
    out
}

/// Build a record with transliterated value and package.
pub fn normalize_record(record: ComponentRecord) -> ComponentRecord {
    ComponentRecord {
        value: transliterate(&record.value),
        package: transliterate(&record.package),
        ..record
    }
}
