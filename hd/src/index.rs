// Descriptor wallet library extending bitcoin & miniscript functionality
// by LNP/BP Association (https://lnp-bp.org)
// Written in 2020-2022 by
//     Dr. Maxim Orlovsky <orlovsky@lnp-bp.org>
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the Apache-2.0 License
// along with this software.
// If not, see <https://opensource.org/licenses/Apache-2.0>.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::{Error, HARDENED_INDEX_BOUNDARY};

/// Child index used at a single derivation step.
///
/// Wraps the value used during derivation: values below
/// [`HARDENED_INDEX_BOUNDARY`] are normal indexes, values at or above it are
/// hardened. The inner value is private, so the zero-based index of either
/// kind is always in range of `0..`[`HARDENED_INDEX_BOUNDARY`].
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default)]
pub struct ChildNumber(u32);

impl ChildNumber {
    /// Constructs non-hardened child number, failing if the index is not
    /// below [`HARDENED_INDEX_BOUNDARY`]
    pub fn normal(index: u32) -> Result<Self, Error> {
        if index >= HARDENED_INDEX_BOUNDARY {
            return Err(Error::IndexOutOfRange(index.to_string()));
        }
        Ok(ChildNumber(index))
    }

    /// Constructs hardened child number from a zero-based index, failing if
    /// the index is not below [`HARDENED_INDEX_BOUNDARY`]
    pub fn hardened(index: u32) -> Result<Self, Error> {
        if index >= HARDENED_INDEX_BOUNDARY {
            return Err(Error::IndexOutOfRange(index.to_string()));
        }
        Ok(ChildNumber(index | HARDENED_INDEX_BOUNDARY))
    }

    /// Constructs child number from the value used during derivation, which
    /// is hardened for all values at or above [`HARDENED_INDEX_BOUNDARY`]
    #[inline]
    pub fn from_derivation_value(value: u32) -> Self { ChildNumber(value) }

    /// Returns value used during derivation, which for normal indexes lies
    /// in range `0..`[`HARDENED_INDEX_BOUNDARY`] and for hardened in range
    /// of [`HARDENED_INDEX_BOUNDARY`]`..=u32::MAX`
    #[inline]
    pub fn derivation_value(self) -> u32 { self.0 }

    /// Returns zero-based index, i.e. not offset by
    /// [`HARDENED_INDEX_BOUNDARY`] for hardened children
    #[inline]
    pub fn index(self) -> u32 { self.0 & !HARDENED_INDEX_BOUNDARY }

    /// Detects whether the child number is hardened
    #[inline]
    pub fn is_hardened(self) -> bool { self.0 >= HARDENED_INDEX_BOUNDARY }

    /// Detects whether the child number is normal (non-hardened)
    #[inline]
    pub fn is_normal(self) -> bool { !self.is_hardened() }

    /// Returns the next child number of the same kind; `None` if the index
    /// is already the last one of its range (normal indexes never become
    /// hardened and hardened never wrap past `u32::MAX`)
    pub fn checked_inc(self) -> Option<Self> {
        let next = self.index() + 1;
        if next >= HARDENED_INDEX_BOUNDARY {
            return None;
        }
        Some(ChildNumber(next | (self.0 & HARDENED_INDEX_BOUNDARY)))
    }

    /// Serializes derivation value as 4 big-endian bytes
    #[inline]
    pub fn to_be_bytes(self) -> [u8; 4] { self.0.to_be_bytes() }
}

impl From<u32> for ChildNumber {
    #[inline]
    fn from(value: u32) -> Self { ChildNumber::from_derivation_value(value) }
}

impl From<ChildNumber> for u32 {
    #[inline]
    fn from(child: ChildNumber) -> Self { child.derivation_value() }
}

impl Display for ChildNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.index(), f)?;
        if self.is_hardened() {
            f.write_str(if f.alternate() { "'" } else { "h" })?;
        }
        Ok(())
    }
}

impl FromStr for ChildNumber {
    type Err = Error;

    /// Parses single derivation path segment: decimal digits with an optional
    /// hardening suffix (`h`, `H` or `'`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (digits, hardened) = match s.strip_suffix(&['h', 'H', '\''][..]) {
            Some(digits) => (digits, true),
            None => (s, false),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedPath(s.to_owned()));
        }
        let index =
            u32::from_str(digits).map_err(|_| Error::IndexOutOfRange(digits.to_owned()))?;
        if index >= HARDENED_INDEX_BOUNDARY {
            return Err(Error::IndexOutOfRange(digits.to_owned()));
        }
        Ok(if hardened {
            ChildNumber(index | HARDENED_INDEX_BOUNDARY)
        } else {
            ChildNumber(index)
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn segment_parsing() {
        let child = ChildNumber::from_str("44'").unwrap();
        assert_eq!(child.derivation_value(), 44 + HARDENED_INDEX_BOUNDARY);
        assert!(child.is_hardened());
        assert_eq!(child.index(), 44);
        assert_eq!(ChildNumber::from_str("44h").unwrap(), child);
        assert_eq!(ChildNumber::from_str("44H").unwrap(), child);

        let child = ChildNumber::from_str("0").unwrap();
        assert_eq!(child.derivation_value(), 0);
        assert!(child.is_normal());

        assert_eq!(
            ChildNumber::from_str("2147483647h").unwrap().derivation_value(),
            u32::MAX
        );
    }

    #[test]
    fn segment_range() {
        assert_eq!(
            ChildNumber::from_str("2147483648"),
            Err(Error::IndexOutOfRange(s!("2147483648")))
        );
        assert_eq!(
            ChildNumber::from_str("2147483648h"),
            Err(Error::IndexOutOfRange(s!("2147483648")))
        );
        assert_eq!(
            ChildNumber::from_str("99999999999"),
            Err(Error::IndexOutOfRange(s!("99999999999")))
        );
    }

    #[test]
    fn malformed_segments() {
        for segment in ["", "h", "'", "-1", "+1", "1x", "0hh", " 1", "1 ", "0x10"] {
            assert_eq!(
                ChildNumber::from_str(segment),
                Err(Error::MalformedPath(segment.to_owned())),
                "segment `{}`",
                segment
            );
        }
    }

    #[test]
    fn display() {
        assert_eq!(ChildNumber::hardened(5).unwrap().to_string(), "5h");
        assert_eq!(format!("{:#}", ChildNumber::hardened(5).unwrap()), "5'");
        assert_eq!(ChildNumber::normal(42).unwrap().to_string(), "42");
        assert_eq!(ChildNumber::from(u32::MAX).to_string(), "2147483647h");
    }

    #[test]
    fn derivation_values() {
        assert_eq!(ChildNumber::from(0x8000_0001), ChildNumber::hardened(1).unwrap());
        assert_eq!(ChildNumber::from(7), ChildNumber::normal(7).unwrap());
        assert_eq!(u32::from(ChildNumber::hardened(0).unwrap()), HARDENED_INDEX_BOUNDARY);
        assert_eq!(ChildNumber::hardened(1).unwrap().to_be_bytes(), [0x80, 0, 0, 1]);
        assert!(ChildNumber::hardened(HARDENED_INDEX_BOUNDARY - 1).is_ok());
    }

    #[test]
    fn constructors_reject_out_of_range() {
        let value = HARDENED_INDEX_BOUNDARY + 5;
        assert_eq!(ChildNumber::normal(value), Err(Error::IndexOutOfRange(value.to_string())));
        assert_eq!(
            ChildNumber::hardened(u32::MAX),
            Err(Error::IndexOutOfRange(u32::MAX.to_string()))
        );
        assert_eq!(
            ChildNumber::normal(HARDENED_INDEX_BOUNDARY),
            Err(Error::IndexOutOfRange(HARDENED_INDEX_BOUNDARY.to_string()))
        );

        // values above the boundary are always hardened, never normal
        let child = ChildNumber::from_derivation_value(value);
        assert!(child.is_hardened());
        assert_eq!(child.index(), 5);
        assert_eq!(child.derivation_value(), value);

        let last = ChildNumber::from_derivation_value(u32::MAX);
        assert_eq!(last.derivation_value(), u32::MAX);
        assert_eq!(last.index(), HARDENED_INDEX_BOUNDARY - 1);
    }

    #[test]
    fn increments() {
        assert_eq!(ChildNumber::from(1).checked_inc(), Some(ChildNumber::from(2)));
        assert_eq!(ChildNumber::from(HARDENED_INDEX_BOUNDARY - 1).checked_inc(), None);
        assert_eq!(ChildNumber::from(u32::MAX).checked_inc(), None);
        assert_eq!(
            ChildNumber::hardened(0).unwrap().checked_inc(),
            Some(ChildNumber::hardened(1).unwrap())
        );
    }
}
