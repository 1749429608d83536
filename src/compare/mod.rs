//! Locale-scoped string comparison, search and hashing.
//!
//! All offsets, counts and returned indices are in UTF-16 code units. A
//! missing string is passed as `None`.

mod hash;
mod linguistic;
mod options;
mod ordinal;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use icu::locale::Locale as IcuLocale;
use tracing::{debug, trace};

pub use options::CompareOptions;

use crate::error::{GlobalizationError, Result};
use linguistic::LinguisticComparer;
use options::{Mode, Scope};
use ordinal::units;

/// Compares and searches strings for one locale. `""` names the invariant
/// locale.
#[derive(Debug, Clone)]
pub struct Collator {
    name: String,
    locale: IcuLocale,
}

impl Collator {
    pub fn invariant() -> Self {
        Self {
            name: String::new(),
            locale: IcuLocale::UNKNOWN,
        }
    }

    pub fn get_collator(name: Option<&str>) -> Result<Self> {
        let name = name.ok_or(GlobalizationError::null("name"))?;
        if name.is_empty() {
            return Ok(Self::invariant());
        }
        let locale: IcuLocale = name.parse().map_err(|e| {
            debug!(name, error = ?e, "rejected locale name");
            GlobalizationError::CultureNotFound(name.to_string())
        })?;
        debug!(name, %locale, "created collator");
        Ok(Self {
            name: name.to_string(),
            locale,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hash of the collator itself, consistent with `==`.
    pub fn hash_code(&self) -> i32 {
        hash::hash_units(self.name.encode_utf16())
    }

    fn compare_units(&self, a: &[u16], b: &[u16], mode: Mode) -> Result<Ordering> {
        Ok(match mode {
            Mode::Ordinal => ordinal::compare(a, b, false),
            Mode::OrdinalIgnoreCase => ordinal::compare(a, b, true),
            Mode::Linguistic(opts) => LinguisticComparer::new(&self.locale, opts)?.compare(a, b),
        })
    }

    /// Returns -1, 0 or 1. A missing string orders before any present one.
    pub fn compare(&self, a: Option<&str>, b: Option<&str>, options: CompareOptions) -> Result<i32> {
        let mode = options.resolve(Scope::Compare)?;
        let (a, b) = match (a, b) {
            (None, None) => return Ok(0),
            (None, Some(_)) => return Ok(-1),
            (Some(_), None) => return Ok(1),
            (Some(a), Some(b)) => (units(a), units(b)),
        };
        self.compare_units(&a, &b, mode).map(ordering_to_i32)
    }

    /// Compares the suffixes of `a` and `b` starting at the given offsets.
    pub fn compare_from(
        &self,
        a: Option<&str>,
        offset_a: i32,
        b: Option<&str>,
        offset_b: i32,
        options: CompareOptions,
    ) -> Result<i32> {
        let rest = |s: Option<&str>, offset: i32| {
            s.map_or(0, |s| utf16_len(s) - i64::from(offset))
        };
        self.compare_spans(
            a,
            offset_a.into(),
            rest(a, offset_a),
            b,
            offset_b.into(),
            rest(b, offset_b),
            options,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn compare_range(
        &self,
        a: Option<&str>,
        offset_a: i32,
        length_a: i32,
        b: Option<&str>,
        offset_b: i32,
        length_b: i32,
        options: CompareOptions,
    ) -> Result<i32> {
        self.compare_spans(
            a,
            offset_a.into(),
            length_a.into(),
            b,
            offset_b.into(),
            length_b.into(),
            options,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn compare_spans(
        &self,
        a: Option<&str>,
        offset_a: i64,
        length_a: i64,
        b: Option<&str>,
        offset_b: i64,
        length_b: i64,
        options: CompareOptions,
    ) -> Result<i32> {
        if length_a < 0 {
            return Err(GlobalizationError::out_of_range("length1", "must be non-negative"));
        }
        if length_b < 0 {
            return Err(GlobalizationError::out_of_range("length2", "must be non-negative"));
        }
        if offset_a < 0 {
            return Err(GlobalizationError::out_of_range("offset1", "must be non-negative"));
        }
        if offset_b < 0 {
            return Err(GlobalizationError::out_of_range("offset2", "must be non-negative"));
        }
        let a = a.map(units);
        let b = b.map(units);
        let span_a = span(a.as_deref(), offset_a, length_a, "offset1")?;
        let span_b = span(b.as_deref(), offset_b, length_b, "offset2")?;

        let mode = options.resolve(Scope::Compare)?;
        match (span_a, span_b) {
            (None, None) => Ok(0),
            (None, Some(_)) => Ok(-1),
            (Some(_), None) => Ok(1),
            (Some(a), Some(b)) => self.compare_units(a, b, mode).map(ordering_to_i32),
        }
    }

    pub fn index_of(&self, source: Option<&str>, value: Option<&str>, options: CompareOptions) -> Result<i32> {
        self.search_forward(source, value, None, None, options)
    }

    pub fn index_of_from(
        &self,
        source: Option<&str>,
        value: Option<&str>,
        start_index: i32,
        options: CompareOptions,
    ) -> Result<i32> {
        self.search_forward(source, value, Some(start_index), None, options)
    }

    pub fn index_of_range(
        &self,
        source: Option<&str>,
        value: Option<&str>,
        start_index: i32,
        count: i32,
        options: CompareOptions,
    ) -> Result<i32> {
        self.search_forward(source, value, Some(start_index), Some(count), options)
    }

    pub fn index_of_char(&self, source: Option<&str>, value: char, options: CompareOptions) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.search_forward(source, Some(char_str(value, &mut buf)), None, None, options)
    }

    pub fn index_of_char_from(
        &self,
        source: Option<&str>,
        value: char,
        start_index: i32,
        options: CompareOptions,
    ) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.search_forward(source, Some(char_str(value, &mut buf)), Some(start_index), None, options)
    }

    pub fn index_of_char_range(
        &self,
        source: Option<&str>,
        value: char,
        start_index: i32,
        count: i32,
        options: CompareOptions,
    ) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.search_forward(
            source,
            Some(char_str(value, &mut buf)),
            Some(start_index),
            Some(count),
            options,
        )
    }

    fn search_forward(
        &self,
        source: Option<&str>,
        value: Option<&str>,
        start_index: Option<i32>,
        count: Option<i32>,
        options: CompareOptions,
    ) -> Result<i32> {
        let source = units(source.ok_or(GlobalizationError::null("source"))?);
        let value = units(value.ok_or(GlobalizationError::null("value"))?);
        let len = source.len() as i64;
        let start = start_index.map_or(0, i64::from);
        let count = count.map_or(len - start, i64::from);

        if start > len {
            return Err(GlobalizationError::out_of_range("startIndex", "must be within the string"));
        }
        // Empty sources answer before the remaining bounds checks, so a
        // negative start index is accepted here.
        if source.is_empty() {
            trace!(start, "empty source short-circuit");
            return Ok(if value.is_empty() { 0 } else { -1 });
        }
        if start < 0 {
            return Err(GlobalizationError::out_of_range("startIndex", "must be non-negative"));
        }
        if count < 0 || start > len - count {
            return Err(GlobalizationError::out_of_range("count", "must lie within the string"));
        }

        let mode = options.resolve(Scope::Search)?;
        let window = &source[start as usize..(start + count) as usize];
        let found = match mode {
            Mode::Ordinal => ordinal::index_of(window, &value, false),
            Mode::OrdinalIgnoreCase => ordinal::index_of(window, &value, true),
            Mode::Linguistic(opts) => LinguisticComparer::new(&self.locale, opts)?.index_of(window, &value),
        };
        Ok(found.map_or(-1, |i| (start + i as i64) as i32))
    }

    pub fn last_index_of(&self, source: Option<&str>, value: Option<&str>, options: CompareOptions) -> Result<i32> {
        self.search_backward(source, value, None, None, options)
    }

    pub fn last_index_of_from(
        &self,
        source: Option<&str>,
        value: Option<&str>,
        start_index: i32,
        options: CompareOptions,
    ) -> Result<i32> {
        self.search_backward(source, value, Some(start_index), None, options)
    }

    pub fn last_index_of_range(
        &self,
        source: Option<&str>,
        value: Option<&str>,
        start_index: i32,
        count: i32,
        options: CompareOptions,
    ) -> Result<i32> {
        self.search_backward(source, value, Some(start_index), Some(count), options)
    }

    pub fn last_index_of_char(&self, source: Option<&str>, value: char, options: CompareOptions) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.search_backward(source, Some(char_str(value, &mut buf)), None, None, options)
    }

    pub fn last_index_of_char_from(
        &self,
        source: Option<&str>,
        value: char,
        start_index: i32,
        options: CompareOptions,
    ) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.search_backward(source, Some(char_str(value, &mut buf)), Some(start_index), None, options)
    }

    pub fn last_index_of_char_range(
        &self,
        source: Option<&str>,
        value: char,
        start_index: i32,
        count: i32,
        options: CompareOptions,
    ) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.search_backward(
            source,
            Some(char_str(value, &mut buf)),
            Some(start_index),
            Some(count),
            options,
        )
    }

    /// Searches backward from `start_index` over `count` code units, so the
    /// window is `[start_index - count + 1, start_index]`.
    fn search_backward(
        &self,
        source: Option<&str>,
        value: Option<&str>,
        start_index: Option<i32>,
        count: Option<i32>,
        options: CompareOptions,
    ) -> Result<i32> {
        let source = units(source.ok_or(GlobalizationError::null("source"))?);
        let value = units(value.ok_or(GlobalizationError::null("value"))?);
        let mode = options.resolve(Scope::Search)?;

        let len = source.len() as i64;
        let mut start = start_index.map_or(len - 1, i64::from);
        let mut count = count.map_or(start + 1, i64::from);

        if source.is_empty() && (start == -1 || start == 0) {
            trace!(start, "empty source short-circuit");
            return Ok(if value.is_empty() { 0 } else { -1 });
        }
        if start < 0 || start > len {
            return Err(GlobalizationError::out_of_range("startIndex", "must be within the string"));
        }
        if start == len {
            start -= 1;
            if count > 0 {
                count -= 1;
            }
        }
        if count < 0 || start - count + 1 < 0 {
            return Err(GlobalizationError::out_of_range("count", "must lie within the string"));
        }
        if value.is_empty() {
            return Ok(start as i32);
        }

        let low = start - count + 1;
        let window = &source[low as usize..(start + 1) as usize];
        let found = match mode {
            Mode::Ordinal => ordinal::last_index_of(window, &value, false),
            Mode::OrdinalIgnoreCase => ordinal::last_index_of(window, &value, true),
            Mode::Linguistic(opts) => {
                LinguisticComparer::new(&self.locale, opts)?.last_index_of(window, &value)
            }
        };
        Ok(found.map_or(-1, |i| (low + i as i64) as i32))
    }

    pub fn is_prefix(&self, source: Option<&str>, prefix: Option<&str>, options: CompareOptions) -> Result<bool> {
        let source = units(source.ok_or(GlobalizationError::null("source"))?);
        let prefix = units(prefix.ok_or(GlobalizationError::null("prefix"))?);
        Ok(match options.resolve(Scope::Search)? {
            Mode::Ordinal => ordinal::starts_with(&source, &prefix, false),
            Mode::OrdinalIgnoreCase => ordinal::starts_with(&source, &prefix, true),
            Mode::Linguistic(opts) => {
                LinguisticComparer::new(&self.locale, opts)?.starts_with(&source, &prefix)
            }
        })
    }

    pub fn is_suffix(&self, source: Option<&str>, suffix: Option<&str>, options: CompareOptions) -> Result<bool> {
        let source = units(source.ok_or(GlobalizationError::null("source"))?);
        let suffix = units(suffix.ok_or(GlobalizationError::null("suffix"))?);
        Ok(match options.resolve(Scope::Search)? {
            Mode::Ordinal => ordinal::ends_with(&source, &suffix, false),
            Mode::OrdinalIgnoreCase => ordinal::ends_with(&source, &suffix, true),
            Mode::Linguistic(opts) => {
                LinguisticComparer::new(&self.locale, opts)?.ends_with(&source, &suffix)
            }
        })
    }

    /// Deterministic hash of `value` under `options`. The empty string under
    /// `NONE` always hashes to 0.
    pub fn get_hash_code(&self, value: Option<&str>, options: CompareOptions) -> Result<i32> {
        let value = value.ok_or(GlobalizationError::null("source"))?;
        let mode = options.resolve(Scope::Search)?;
        if value.is_empty() && options == CompareOptions::NONE {
            return Ok(0);
        }
        Ok(match mode {
            Mode::Ordinal => hash::ordinal_hash(value, false),
            Mode::OrdinalIgnoreCase => hash::ordinal_hash(value, true),
            Mode::Linguistic(opts) => {
                let comparer = LinguisticComparer::new(&self.locale, opts)?;
                hash::linguistic_hash(&comparer, &units(value))
            }
        })
    }
}

impl Default for Collator {
    fn default() -> Self {
        Self::invariant()
    }
}

impl PartialEq for Collator {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Collator {}

impl Hash for Collator {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Collator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Collator - {}", self.name)
    }
}

fn char_str(c: char, buf: &mut [u8; 4]) -> &str {
    c.encode_utf8(buf)
}

fn utf16_len(s: &str) -> i64 {
    s.encode_utf16().count() as i64
}

/// Bounds-checked `[offset, offset + length)` of a possibly missing string.
/// A missing string has length 0 and yields `None`.
fn span<'a>(units: Option<&'a [u16]>, offset: i64, length: i64, param: &'static str) -> Result<Option<&'a [u16]>> {
    let len = units.map_or(0, |u| u.len() as i64);
    if offset > len - length {
        return Err(GlobalizationError::out_of_range(param, "offset and length exceed the string"));
    }
    Ok(units.map(|u| &u[offset as usize..(offset + length) as usize]))
}

fn ordering_to_i32(ord: Ordering) -> i32 {
    match ord {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}
