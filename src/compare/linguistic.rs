use std::cmp::Ordering;

use icu::collator::options::{AlternateHandling, CaseLevel, CollatorOptions, Strength};
use icu::collator::{Collator, CollatorBorrowed, CollatorPreferences};
use icu::locale::Locale as IcuLocale;
use icu_normalizer::ComposingNormalizer;
use tracing::debug;

use super::options::CompareOptions;
use crate::error::{GlobalizationError, Result};

/// ICU-backed comparer for the non-ordinal option sets.
pub(crate) struct LinguisticComparer {
    collator: CollatorBorrowed<'static>,
    fold_width: bool,
    fold_kana: bool,
}

impl LinguisticComparer {
    pub(crate) fn new(locale: &IcuLocale, options: CompareOptions) -> Result<Self> {
        let ignore_case = options.contains(CompareOptions::IGNORE_CASE);
        let ignore_non_space = options.contains(CompareOptions::IGNORE_NON_SPACE);

        let mut opts = CollatorOptions::default();
        match (ignore_case, ignore_non_space) {
            (true, true) => {
                opts.strength = Some(Strength::Primary);
            }
            (false, true) => {
                opts.strength = Some(Strength::Primary);
                opts.case_level = Some(CaseLevel::On);
            }
            (true, false) => {
                opts.strength = Some(Strength::Secondary);
            }
            (false, false) => {
                opts.strength = Some(Strength::Tertiary);
            }
        }
        if options.contains(CompareOptions::IGNORE_SYMBOLS) {
            opts.alternate_handling = Some(AlternateHandling::Shifted);
        } else {
            opts.alternate_handling = Some(AlternateHandling::NonIgnorable);
        }

        let prefs = CollatorPreferences::from(locale);
        let collator = match Collator::try_new(prefs, opts) {
            Ok(c) => c,
            Err(e) => {
                debug!(%locale, error = %e, "no collation data for locale, using root");
                let fallback_prefs: CollatorPreferences = Default::default();
                Collator::try_new(fallback_prefs, opts)
                    .map_err(|e| GlobalizationError::CollationData(e.to_string()))?
            }
        };

        Ok(Self {
            collator,
            fold_width: options.contains(CompareOptions::IGNORE_WIDTH),
            fold_kana: options.contains(CompareOptions::IGNORE_KANA_TYPE),
        })
    }

    pub(crate) fn compare(&self, a: &[u16], b: &[u16]) -> Ordering {
        if !self.fold_width && !self.fold_kana {
            return self.collator.compare_utf16(a, b);
        }
        let a = self.prepare(a);
        let b = self.prepare(b);
        self.collator.compare(&a, &b)
    }

    fn prepare(&self, units: &[u16]) -> String {
        let mut text = String::from_utf16_lossy(units);
        if self.fold_kana {
            text = fold_kana(&text);
        }
        if self.fold_width {
            text = ComposingNormalizer::new_nfkc().normalize(&text).to_string();
        }
        text
    }

    /// Sort key at the configured strength. Two inputs compare equal exactly
    /// when their keys are equal.
    pub(crate) fn sort_key(&self, units: &[u16]) -> Vec<u8> {
        let mut key = Vec::new();
        if !self.fold_width && !self.fold_kana {
            let Ok(()) = self.collator.write_sort_key_utf16_to(units, &mut key);
        } else {
            let Ok(()) = self.collator.write_sort_key_to(&self.prepare(units), &mut key);
        }
        key
    }

    fn matches(&self, candidate: &[u16], value: &[u16]) -> bool {
        self.compare(candidate, value) == Ordering::Equal
    }

    /// First start position in `window` of a subrange that collates equal to
    /// `value`. Matches may differ in length from `value` but never exceed
    /// `max_match_len(value.len())`.
    pub(crate) fn index_of(&self, window: &[u16], value: &[u16]) -> Option<usize> {
        if value.is_empty() {
            return Some(0);
        }
        let n = window.len();
        let max_len = max_match_len(value.len());
        (0..n).find(|&i| (i..=n.min(i + max_len)).any(|j| self.matches(&window[i..j], value)))
    }

    pub(crate) fn last_index_of(&self, window: &[u16], value: &[u16]) -> Option<usize> {
        let n = window.len();
        let max_len = max_match_len(value.len());
        (0..n).rev().find(|&i| {
            (i..=n.min(i + max_len))
                .rev()
                .any(|j| self.matches(&window[i..j], value))
        })
    }

    pub(crate) fn starts_with(&self, source: &[u16], prefix: &[u16]) -> bool {
        let max_len = source.len().min(max_match_len(prefix.len()));
        prefix.is_empty() || (0..=max_len).any(|j| self.matches(&source[..j], prefix))
    }

    pub(crate) fn ends_with(&self, source: &[u16], suffix: &[u16]) -> bool {
        let n = source.len();
        let min_start = n.saturating_sub(max_match_len(suffix.len()));
        suffix.is_empty() || (min_start..=n).rev().any(|i| self.matches(&source[i..], suffix))
    }
}

/// Longest source run tried against a value of `value_len` code units.
/// Covers decomposed marks and short runs of ignorable characters.
fn max_match_len(value_len: usize) -> usize {
    value_len.saturating_mul(MAX_EXPANSION).saturating_add(IGNORABLE_SLACK)
}

const MAX_EXPANSION: usize = 4;
const IGNORABLE_SLACK: usize = 8;

/// Maps katakana to the corresponding hiragana.
pub(crate) fn fold_kana(text: &str) -> String {
    text.chars()
        .map(|c| match c as u32 {
            cp @ (0x30A1..=0x30F6 | 0x30FD..=0x30FE) => char::from_u32(cp - 0x60).unwrap_or(c),
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::ordinal::units;

    fn root(options: CompareOptions) -> LinguisticComparer {
        LinguisticComparer::new(&IcuLocale::UNKNOWN, options).unwrap()
    }

    #[test]
    fn tertiary_distinguishes_case() {
        let c = root(CompareOptions::NONE);
        assert_eq!(c.compare(&units("a"), &units("A")), Ordering::Less);
        assert_eq!(c.compare(&units("a"), &units("b")), Ordering::Less);
        assert_eq!(c.compare(&units("abc"), &units("abc")), Ordering::Equal);
    }

    #[test]
    fn ignore_case() {
        let c = root(CompareOptions::IGNORE_CASE);
        assert_eq!(c.compare(&units("abc"), &units("ABC")), Ordering::Equal);
        assert_ne!(c.compare(&units("resume"), &units("résumé")), Ordering::Equal);
    }

    #[test]
    fn ignore_non_space() {
        let c = root(CompareOptions::IGNORE_NON_SPACE);
        assert_eq!(c.compare(&units("resume"), &units("résumé")), Ordering::Equal);
        assert_ne!(c.compare(&units("resume"), &units("Resume")), Ordering::Equal);
    }

    #[test]
    fn ignore_symbols() {
        let c = root(CompareOptions::IGNORE_SYMBOLS);
        assert_eq!(c.compare(&units("co-op"), &units("coop")), Ordering::Equal);
    }

    #[test]
    fn ignore_width() {
        let c = root(CompareOptions::IGNORE_WIDTH);
        assert_eq!(c.compare(&units("ＡＢＣ"), &units("ABC")), Ordering::Equal);
    }

    #[test]
    fn ignore_kana_type() {
        assert_eq!(fold_kana("カタカナ"), "かたかな");
        let c = root(CompareOptions::IGNORE_KANA_TYPE);
        assert_eq!(c.compare(&units("カナ"), &units("かな")), Ordering::Equal);
    }

    #[test]
    fn search_with_case_folding() {
        let c = root(CompareOptions::IGNORE_CASE);
        let source = units("Hello World");
        assert_eq!(c.index_of(&source, &units("WORLD")), Some(6));
        assert_eq!(c.last_index_of(&source, &units("O")), Some(7));
        assert!(c.starts_with(&source, &units("hello")));
        assert!(c.ends_with(&source, &units("world")));
        assert_eq!(c.index_of(&source, &units("xyz")), None);
    }

    #[test]
    fn search_tolerates_ignorables_and_decomposition() {
        let c = root(CompareOptions::NONE);
        let source = units("xa\u{1}b");
        assert_eq!(c.index_of(&source, &units("ab")), Some(1));
        assert!(c.ends_with(&source, &units("ab")));
        let decomposed = units("cafe\u{301}");
        assert_eq!(c.index_of(&decomposed, &units("\u{E9}")), Some(3));
        assert!(c.ends_with(&decomposed, &units("caf\u{E9}")));
    }

    #[test]
    fn search_in_long_source_is_bounded() {
        let c = root(CompareOptions::IGNORE_CASE);
        let mut source = units(&"a".repeat(10_000));
        assert_eq!(c.index_of(&source, &units("b")), None);
        assert_eq!(c.last_index_of(&source, &units("b")), None);
        assert!(!c.ends_with(&source, &units("b")));
        source.extend(units("B"));
        assert_eq!(c.index_of(&source, &units("b")), Some(10_000));
        assert!(c.ends_with(&source, &units("ab")));
    }

    #[test]
    fn sort_keys_agree_with_compare() {
        let c = root(CompareOptions::NONE);
        assert_eq!(c.sort_key(&units("a\u{1}")), c.sort_key(&units("a")));
        assert_eq!(c.sort_key(&units("\u{E9}")), c.sort_key(&units("e\u{301}")));
        assert_ne!(c.sort_key(&units("a")), c.sort_key(&units("A")));
        let width = root(CompareOptions::IGNORE_WIDTH);
        assert_eq!(width.sort_key(&units("ＡＢＣ")), width.sort_key(&units("ABC")));
    }
}
