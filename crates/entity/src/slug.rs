//! Generation of the URL-safe identifiers of cities and venues.

use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new("[^a-z0-9_]+").unwrap());

/// Makes a filename-friendly approximation of a string.
///
/// The result only uses the characters `a-z`, `0-9`, `_` and `-`. Non-ASCII characters are
/// transliterated to their closest ASCII representation, and every run of other characters
/// becomes a single `-`. The result never starts nor ends with a `-`.
///
/// This doesn't check for collisions: the uniqueness of the slugs is enforced by the database.
///
/// ```
/// assert_eq!(entity::slugify("Brno – Studentský klub"), "brno-studentsky-klub");
/// ```
pub fn slugify(name: &str) -> String {
    let decoded = deunicode::deunicode(name).to_ascii_lowercase();
    SEPARATORS
        .replace_all(&decoded, "-")
        .trim_matches('-')
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::slugify;

    fn is_well_formed(slug: &str) -> bool {
        !slug.starts_with('-')
            && !slug.ends_with('-')
            && !slug.contains("--")
            && slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    }

    #[test]
    fn transliterates_czech() {
        assert_eq!(slugify("Štěpánka Ú."), "stepanka-u");
        assert_eq!(slugify("Ostrava"), "ostrava");
        assert_eq!(slugify("Hradec Králové"), "hradec-kralove");
    }

    #[test]
    fn keeps_underscores_and_digits() {
        assert_eq!(slugify("Python_Pivo 2"), "python_pivo-2");
    }

    #[test]
    fn collapses_and_trims_separators() {
        assert_eq!(slugify("  --Klub!!  (U Pelikána)--  "), "klub-u-pelikana");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn always_well_formed() {
        let names = [
            "Štěpánka Ú.",
            "Café Über – Straße",
            "Ελληνικά",
            "Москва",
            "東京",
            "naïve façade",
            "a/b\\c?d#e",
            "--leading and trailing--",
            "tab\tnew\nline",
            "emoji 🐍 python",
            "ÀÉÎÕÜ ñ ç ß ø å",
            "under_score__double",
        ];
        for name in names {
            let slug = slugify(name);
            assert!(is_well_formed(&slug), "{name:?} gave {slug:?}");
        }
    }
}
