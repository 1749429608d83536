use bitflags::bitflags;

use crate::error::{GlobalizationError, Result};

bitflags! {
    /// Comparison flags. Built from a raw `i32` so that values outside the
    /// enumerated set survive until validation rejects them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CompareOptions: i32 {
        const IGNORE_CASE = 0x0000_0001;
        const IGNORE_NON_SPACE = 0x0000_0002;
        const IGNORE_SYMBOLS = 0x0000_0004;
        const IGNORE_KANA_TYPE = 0x0000_0008;
        const IGNORE_WIDTH = 0x0000_0010;
        const ORDINAL_IGNORE_CASE = 0x1000_0000;
        const STRING_SORT = 0x2000_0000;
        const ORDINAL = 0x4000_0000;
    }
}

impl CompareOptions {
    pub const NONE: Self = Self::empty();

    const LINGUISTIC: Self = Self::IGNORE_CASE
        .union(Self::IGNORE_NON_SPACE)
        .union(Self::IGNORE_SYMBOLS)
        .union(Self::IGNORE_KANA_TYPE)
        .union(Self::IGNORE_WIDTH);

    pub const fn from_raw(bits: i32) -> Self {
        Self::from_bits_retain(bits)
    }

    pub(crate) fn resolve(self, scope: Scope) -> Result<Mode> {
        if self == Self::ORDINAL {
            return Ok(Mode::Ordinal);
        }
        if self == Self::ORDINAL_IGNORE_CASE {
            return Ok(Mode::OrdinalIgnoreCase);
        }

        let allowed = match scope {
            Scope::Compare => Self::LINGUISTIC.union(Self::STRING_SORT),
            Scope::Search => Self::LINGUISTIC,
        };
        if self.bits() & !allowed.bits() == 0 {
            return Ok(Mode::Linguistic(self));
        }

        let reason = if self.intersects(Self::ORDINAL.union(Self::ORDINAL_IGNORE_CASE)) {
            "Ordinal and OrdinalIgnoreCase cannot be combined with other flags"
        } else if self.contains(Self::STRING_SORT) && scope == Scope::Search {
            "StringSort is only valid for comparisons"
        } else {
            "value is outside the CompareOptions set"
        };
        Err(GlobalizationError::invalid("options", reason))
    }
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self::NONE
    }
}

/// Which allow-list an operation validates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    Compare,
    /// Searching, prefix/suffix tests and hashing.
    Search,
}

/// A validated option set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Ordinal,
    OrdinalIgnoreCase,
    Linguistic(CompareOptions),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_alone_is_valid_everywhere() {
        for scope in [Scope::Compare, Scope::Search] {
            assert_eq!(CompareOptions::ORDINAL.resolve(scope), Ok(Mode::Ordinal));
            assert_eq!(
                CompareOptions::ORDINAL_IGNORE_CASE.resolve(scope),
                Ok(Mode::OrdinalIgnoreCase)
            );
        }
    }

    #[test]
    fn ordinal_combinations_rejected() {
        let bad = [
            CompareOptions::ORDINAL | CompareOptions::IGNORE_WIDTH,
            CompareOptions::ORDINAL_IGNORE_CASE | CompareOptions::IGNORE_WIDTH,
            CompareOptions::ORDINAL | CompareOptions::IGNORE_SYMBOLS,
            CompareOptions::ORDINAL | CompareOptions::ORDINAL_IGNORE_CASE,
        ];
        for opts in bad {
            for scope in [Scope::Compare, Scope::Search] {
                let err = opts.resolve(scope).unwrap_err();
                assert!(err.is_invalid_argument(), "{opts:?}");
            }
        }
    }

    #[test]
    fn raw_minus_one_rejected() {
        let opts = CompareOptions::from_raw(-1);
        assert!(opts.resolve(Scope::Compare).is_err());
        assert!(opts.resolve(Scope::Search).is_err());
    }

    #[test]
    fn unknown_bit_rejected() {
        let opts = CompareOptions::from_raw(0x0000_0100);
        assert!(opts.resolve(Scope::Compare).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn string_sort_only_for_compare() {
        let opts = CompareOptions::STRING_SORT | CompareOptions::IGNORE_CASE;
        assert_eq!(opts.resolve(Scope::Compare), Ok(Mode::Linguistic(opts)));
        assert!(opts.resolve(Scope::Search).is_err());
    }

    #[test]
    fn linguistic_flags_combine() {
        let opts = CompareOptions::IGNORE_CASE
            | CompareOptions::IGNORE_NON_SPACE
            | CompareOptions::IGNORE_WIDTH
            | CompareOptions::IGNORE_KANA_TYPE
            | CompareOptions::IGNORE_SYMBOLS;
        assert_eq!(opts.resolve(Scope::Search), Ok(Mode::Linguistic(opts)));
        assert_eq!(
            CompareOptions::NONE.resolve(Scope::Search),
            Ok(Mode::Linguistic(CompareOptions::NONE))
        );
    }
}
