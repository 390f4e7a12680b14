//! Short codes for academic units.
//!
//! Faculties, schools and certification programs carry a 2–4 letter uppercase
//! code. The console proposes one derived from the unit name; the backend
//! enforces uniqueness per entity type.

use crate::errors::ConsoleError;

pub const MIN_CODE_LEN: usize = 2;
pub const MAX_CODE_LEN: usize = 4;

const STOP_WORDS: &[&str] = &["of", "and", "the", "for", "in", "on", "at", "to"];

const UNIT_DESIGNATORS: &[&str] = &[
    "faculty",
    "school",
    "department",
    "college",
    "institute",
    "program",
    "programme",
    "certificate",
    "certification",
    "centre",
    "center",
];

/// How a unit's code is chosen in the create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeMode {
    /// Derived from the name with the given length (2..=4).
    Auto(usize),
    /// Typed by the administrator.
    Manual(String),
}

impl Default for CodeMode {
    fn default() -> Self {
        CodeMode::Auto(3)
    }
}

impl CodeMode {
    /// Produces the code for `name`, validating manual input.
    pub fn resolve(&self, name: &str) -> Result<String, ConsoleError> {
        match self {
            CodeMode::Auto(len) => derive_code(name, *len),
            CodeMode::Manual(code) => {
                let code = code.trim().to_ascii_uppercase();
                if is_valid_code(&code) {
                    Ok(code)
                } else {
                    Err(ConsoleError::Validation(format!(
                        "Code must be {} to {} uppercase letters",
                        MIN_CODE_LEN, MAX_CODE_LEN
                    )))
                }
            }
        }
    }
}

/// `^[A-Z]{2,4}$`
pub fn is_valid_code(code: &str) -> bool {
    (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_uppercase())
}

fn words(name: &str) -> Vec<String> {
    name.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_uppercase)
        .collect()
}

/// Derives a code of exactly `len` letters from `name`.
///
/// Stop words and unit designators ("Faculty", "School", ...) are skipped
/// unless nothing else remains. With at least `len` words the initials of the
/// first `len` are used; otherwise every initial is taken and the rest is
/// filled from the following letters of the last word. Names with too few
/// letters are padded with `X`.
pub fn derive_code(name: &str, len: usize) -> Result<String, ConsoleError> {
    if !(MIN_CODE_LEN..=MAX_CODE_LEN).contains(&len) {
        return Err(ConsoleError::Validation(format!(
            "Code length must be between {} and {}",
            MIN_CODE_LEN, MAX_CODE_LEN
        )));
    }

    let all = words(name);
    if all.is_empty() {
        return Err(ConsoleError::Validation(
            "Name is required to generate a code".to_string(),
        ));
    }

    let significant: Vec<&String> = all
        .iter()
        .filter(|w| {
            let lower = w.to_ascii_lowercase();
            !STOP_WORDS.contains(&lower.as_str()) && !UNIT_DESIGNATORS.contains(&lower.as_str())
        })
        .collect();
    let picked: Vec<&String> = if significant.is_empty() {
        all.iter().collect()
    } else {
        significant
    };

    let mut code: String = picked.iter().take(len).filter_map(|w| w.chars().next()).collect();

    if code.len() < len {
        if let Some(last) = picked.last() {
            code.extend(last.chars().skip(1).take(len - code.len()));
        }
    }
    while code.len() < len {
        code.push('X');
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_significant_word_fills_from_word() {
        assert_eq!(derive_code("Faculty of Engineering", 2).unwrap(), "EN");
        assert_eq!(derive_code("Faculty of Engineering", 3).unwrap(), "ENG");
        assert_eq!(derive_code("Faculty of Engineering", 4).unwrap(), "ENGI");
    }

    #[test]
    fn test_multiple_words_use_initials() {
        assert_eq!(derive_code("School of Computer Science", 2).unwrap(), "CS");
        assert_eq!(derive_code("School of Computer Science", 3).unwrap(), "CSC");
        assert_eq!(
            derive_code("Faculty of Arts, Humanities and Social Sciences", 4).unwrap(),
            "AHSS"
        );
    }

    #[test]
    fn test_only_designators_falls_back_to_all_words() {
        assert_eq!(derive_code("Faculty", 2).unwrap(), "FA");
        assert_eq!(derive_code("The School", 2).unwrap(), "TS");
    }

    #[test]
    fn test_deterministic() {
        let a = derive_code("Faculty of Engineering", 2).unwrap();
        let b = derive_code("Faculty of Engineering", 2).unwrap();
        assert_eq!(a, b);
        assert!(is_valid_code(&a));
    }

    #[test]
    fn test_padding_and_bad_input() {
        assert_eq!(derive_code("B", 3).unwrap(), "BXX");
        assert!(derive_code("", 2).is_err());
        assert!(derive_code("1234", 2).is_err());
        assert!(derive_code("Law", 5).is_err());
    }

    #[test]
    fn test_manual_mode() {
        assert_eq!(
            CodeMode::Manual(" eng ".into()).resolve("ignored").unwrap(),
            "ENG"
        );
        assert!(CodeMode::Manual("E".into()).resolve("x").is_err());
        assert!(CodeMode::Manual("ENG1".into()).resolve("x").is_err());
        assert!(CodeMode::Manual("ENGIN".into()).resolve("x").is_err());
    }
}
