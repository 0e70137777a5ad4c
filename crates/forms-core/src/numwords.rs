//! Spanish cardinal numbers in words
//!
//! Output is uppercase and unaccented, as it appears in notarial text:
//! `1_250_021` becomes `UN MILLON DOSCIENTOS CINCUENTA MIL VEINTIUN`.
//! The apocopated `UN` is used because every amount precedes a noun
//! (`DOLARES`, `MIL`, `MILLONES`); [`to_words_standalone`] gives the
//! `UNO` form for ordinals.

use crate::error::FormError;

/// Largest value that can be written (just under a billion in the long scale)
pub const MAX_IN_WORDS: u64 = 999_999_999_999;

const UNITS: [&str; 10] = [
    "", "UN", "DOS", "TRES", "CUATRO", "CINCO", "SEIS", "SIETE", "OCHO", "NUEVE",
];

const TEENS: [&str; 10] = [
    "DIEZ",
    "ONCE",
    "DOCE",
    "TRECE",
    "CATORCE",
    "QUINCE",
    "DIECISEIS",
    "DIECISIETE",
    "DIECIOCHO",
    "DIECINUEVE",
];

const TWENTIES: [&str; 10] = [
    "VEINTE",
    "VEINTIUN",
    "VEINTIDOS",
    "VEINTITRES",
    "VEINTICUATRO",
    "VEINTICINCO",
    "VEINTISEIS",
    "VEINTISIETE",
    "VEINTIOCHO",
    "VEINTINUEVE",
];

const TENS: [&str; 10] = [
    "", "", "", "TREINTA", "CUARENTA", "CINCUENTA", "SESENTA", "SETENTA", "OCHENTA", "NOVENTA",
];

const HUNDREDS: [&str; 10] = [
    "",
    "CIENTO",
    "DOSCIENTOS",
    "TRESCIENTOS",
    "CUATROCIENTOS",
    "QUINIENTOS",
    "SEISCIENTOS",
    "SETECIENTOS",
    "OCHOCIENTOS",
    "NOVECIENTOS",
];

/// 1..=99
fn tens(n: u64) -> String {
    let (t, u) = ((n / 10) as usize, (n % 10) as usize);
    match t {
        0 => UNITS[u].to_string(),
        1 => TEENS[u].to_string(),
        2 => TWENTIES[u].to_string(),
        _ if u == 0 => TENS[t].to_string(),
        _ => format!("{} Y {}", TENS[t], UNITS[u]),
    }
}

/// 1..=999
fn hundreds(n: u64) -> String {
    if n == 100 {
        return "CIEN".to_string();
    }
    let (h, rest) = ((n / 100) as usize, n % 100);
    match (h, rest) {
        (0, _) => tens(rest),
        (_, 0) => HUNDREDS[h].to_string(),
        _ => format!("{} {}", HUNDREDS[h], tens(rest)),
    }
}

/// 1..=999_999
fn thousands(n: u64) -> String {
    let (t, rest) = (n / 1_000, n % 1_000);
    let head = match t {
        0 => String::new(),
        1 => "MIL".to_string(),
        _ => format!("{} MIL", hundreds(t)),
    };
    join(head, if rest == 0 { String::new() } else { hundreds(rest) })
}

fn join(head: String, tail: String) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail,
        (_, true) => head,
        _ => format!("{} {}", head, tail),
    }
}

/// Write `n` in Spanish words
pub fn to_words(n: u64) -> Result<String, FormError> {
    if n > MAX_IN_WORDS {
        return Err(FormError::NumberTooLarge(n));
    }
    if n == 0 {
        return Ok("CERO".to_string());
    }

    let (millions, rest) = (n / 1_000_000, n % 1_000_000);
    let head = match millions {
        0 => String::new(),
        1 => "UN MILLON".to_string(),
        _ => format!("{} MILLONES", thousands(millions)),
    };

    Ok(join(head, if rest == 0 { String::new() } else { thousands(rest) }))
}

/// Write `n` in words as it reads on its own (`UNO`, `VEINTIUNO`)
pub fn to_words_standalone(n: u64) -> Result<String, FormError> {
    let mut words = to_words(n)?;
    if words.ends_with("UN") {
        words.push('O');
    }
    Ok(words)
}


#[cfg(test)]
mod tests {
    use super::parse_back::words_to_number;
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(n: u64) -> String {
        to_words(n).unwrap()
    }

    #[test]
    fn test_small_numbers() {
        assert_eq!(words(0), "CERO");
        assert_eq!(words(1), "UN");
        assert_eq!(words(15), "QUINCE");
        assert_eq!(words(20), "VEINTE");
        assert_eq!(words(21), "VEINTIUN");
        assert_eq!(words(30), "TREINTA");
        assert_eq!(words(45), "CUARENTA Y CINCO");
        assert_eq!(words(99), "NOVENTA Y NUEVE");
    }

    #[test]
    fn test_hundreds() {
        assert_eq!(words(100), "CIEN");
        assert_eq!(words(101), "CIENTO UN");
        assert_eq!(words(500), "QUINIENTOS");
        assert_eq!(words(777), "SETECIENTOS SETENTA Y SIETE");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(words(1_000), "MIL");
        assert_eq!(words(1_001), "MIL UN");
        assert_eq!(words(1_234), "MIL DOSCIENTOS TREINTA Y CUATRO");
        assert_eq!(words(21_000), "VEINTIUN MIL");
        assert_eq!(words(100_000), "CIEN MIL");
        assert_eq!(words(125_500), "CIENTO VEINTICINCO MIL QUINIENTOS");
    }

    #[test]
    fn test_millions() {
        assert_eq!(words(1_000_000), "UN MILLON");
        assert_eq!(words(2_000_000), "DOS MILLONES");
        assert_eq!(words(1_250_021), "UN MILLON DOSCIENTOS CINCUENTA MIL VEINTIUN");
        assert_eq!(words(1_000_000_000), "MIL MILLONES");
        assert_eq!(
            words(MAX_IN_WORDS),
            "NOVECIENTOS NOVENTA Y NUEVE MIL NOVECIENTOS NOVENTA Y NUEVE MILLONES \
             NOVECIENTOS NOVENTA Y NUEVE MIL NOVECIENTOS NOVENTA Y NUEVE"
        );
    }

    #[test]
    fn test_too_large() {
        assert_eq!(
            to_words(MAX_IN_WORDS + 1),
            Err(FormError::NumberTooLarge(MAX_IN_WORDS + 1))
        );
    }

    #[test]
    fn test_standalone_form() {
        assert_eq!(to_words_standalone(1).unwrap(), "UNO");
        assert_eq!(to_words_standalone(2).unwrap(), "DOS");
        assert_eq!(to_words_standalone(21).unwrap(), "VEINTIUNO");
        assert_eq!(to_words_standalone(31).unwrap(), "TREINTA Y UNO");
        assert_eq!(to_words_standalone(1_000).unwrap(), "MIL");
    }

    #[test]
    fn test_parse_back_examples() {
        assert_eq!(words_to_number("MIL DOSCIENTOS TREINTA Y CUATRO"), Some(1_234));
        assert_eq!(words_to_number("DOS MIL MILLONES"), Some(2_000_000_000));
        assert_eq!(words_to_number("NADA"), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: words read back to the number they were written from
            #[test]
            fn words_round_trip(n in 0u64..=MAX_IN_WORDS) {
                let w = to_words(n).unwrap();
                prop_assert_eq!(words_to_number(&w), Some(n), "{}", w);
            }

            /// Property: output never has doubled or edge spaces
            #[test]
            fn words_are_single_spaced(n in 0u64..=MAX_IN_WORDS) {
                let w = to_words(n).unwrap();
                prop_assert!(!w.contains("  "));
                prop_assert_eq!(w.trim(), w.as_str());
            }
        }
    }
}
