use std::hash::Hasher;

use rustc_hash::FxHasher;

use super::linguistic::LinguisticComparer;
use super::ordinal;

/// Deterministic hash of a code unit sequence. FxHash carries no per-process
/// seed, so equal inputs hash equally across runs.
pub(crate) fn hash_units(units: impl IntoIterator<Item = u16>) -> i32 {
    let mut hasher = FxHasher::default();
    for unit in units {
        hasher.write_u16(unit);
    }
    let h = hasher.finish();
    (h ^ (h >> 32)) as i32
}

pub(crate) fn ordinal_hash(value: &str, ignore_case: bool) -> i32 {
    if ignore_case {
        hash_units(value.encode_utf16().map(ordinal::fold_unit))
    } else {
        hash_units(value.encode_utf16())
    }
}

/// Hash of the collator's sort key for `units`. Strings that compare equal
/// share a key, and a key equal to that of `""` hashes to 0.
pub(crate) fn linguistic_hash(comparer: &LinguisticComparer, units: &[u16]) -> i32 {
    let key = comparer.sort_key(units);
    if key == comparer.sort_key(&[]) {
        return 0;
    }
    let mut hasher = FxHasher::default();
    hasher.write(&key);
    let h = hasher.finish();
    (h ^ (h >> 32)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    use icu::locale::Locale as IcuLocale;

    use crate::compare::options::CompareOptions;
    use crate::compare::ordinal::units;

    fn hash(value: &str, options: CompareOptions) -> i32 {
        let comparer = LinguisticComparer::new(&IcuLocale::UNKNOWN, options).unwrap();
        linguistic_hash(&comparer, &units(value))
    }

    #[test]
    fn empty_hashes_to_zero() {
        assert_eq!(hash_units(std::iter::empty()), 0);
        assert_eq!(hash("", CompareOptions::NONE), 0);
        assert_eq!(hash("\u{1}", CompareOptions::NONE), 0);
    }

    #[test]
    fn ordinal_hash_is_stable() {
        assert_eq!(ordinal_hash("abc", false), ordinal_hash("abc", false));
        assert_ne!(ordinal_hash("abc", false), ordinal_hash("abd", false));
        assert_ne!(ordinal_hash("abc", false), ordinal_hash("ABC", false));
        assert_eq!(ordinal_hash("abc", true), ordinal_hash("ABC", true));
    }

    #[test]
    fn ignorables_and_canonical_equivalents_hash_equal() {
        assert_eq!(hash("a\u{1}", CompareOptions::NONE), hash("a", CompareOptions::NONE));
        assert_eq!(hash("\u{E9}", CompareOptions::NONE), hash("e\u{301}", CompareOptions::NONE));
    }

    #[test]
    fn folding_flags() {
        assert_eq!(hash("Résumé", CompareOptions::IGNORE_NON_SPACE), hash("Resume", CompareOptions::IGNORE_NON_SPACE));
        assert_eq!(hash("ABC", CompareOptions::IGNORE_CASE), hash("abc", CompareOptions::IGNORE_CASE));
        assert_eq!(hash("co-op", CompareOptions::IGNORE_SYMBOLS), hash("coop", CompareOptions::IGNORE_SYMBOLS));
        assert_eq!(hash("ＡＢＣ", CompareOptions::IGNORE_WIDTH), hash("ABC", CompareOptions::IGNORE_WIDTH));
        assert_eq!(hash("カナ", CompareOptions::IGNORE_KANA_TYPE), hash("かな", CompareOptions::IGNORE_KANA_TYPE));
        assert_ne!(hash("abc", CompareOptions::NONE), hash("ABC", CompareOptions::NONE));
    }
}
