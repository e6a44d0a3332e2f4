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

use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use crate::{ChildNumber, Error};

/// Derivation path from the master key: ordered sequence of child numbers.
///
/// The root `m` is not a segment, so an empty path denotes the master key
/// itself.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default)]
pub struct DerivationPath(Vec<ChildNumber>);

impl Deref for DerivationPath {
    type Target = Vec<ChildNumber>;

    fn deref(&self) -> &Self::Target { &self.0 }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(path: Vec<ChildNumber>) -> Self { Self(path) }
}

impl From<&[ChildNumber]> for DerivationPath {
    fn from(path: &[ChildNumber]) -> Self { Self(path.to_vec()) }
}

impl AsRef<[ChildNumber]> for DerivationPath {
    #[inline]
    fn as_ref(&self) -> &[ChildNumber] { &self.0 }
}

impl Borrow<[ChildNumber]> for DerivationPath {
    #[inline]
    fn borrow(&self) -> &[ChildNumber] { &self.0 }
}

impl IntoIterator for DerivationPath {
    type Item = ChildNumber;
    type IntoIter = std::vec::IntoIter<ChildNumber>;

    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl<'path> IntoIterator for &'path DerivationPath {
    type Item = ChildNumber;
    type IntoIter = std::iter::Copied<std::slice::Iter<'path, ChildNumber>>;

    fn into_iter(self) -> Self::IntoIter { self.0.iter().copied() }
}

impl FromIterator<ChildNumber> for DerivationPath {
    fn from_iter<T: IntoIterator<Item = ChildNumber>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl DerivationPath {
    /// Constructs path pointing to the master key
    #[inline]
    pub fn master() -> DerivationPath { DerivationPath(vec![]) }

    /// Detects whether the path points to the master key
    #[inline]
    pub fn is_master(&self) -> bool { self.0.is_empty() }

    /// Returns a new path extended with one more segment
    pub fn child(&self, child: ChildNumber) -> DerivationPath {
        let mut path = self.0.clone();
        path.push(child);
        DerivationPath(path)
    }

    /// Returns the last segment of the path, if any
    #[inline]
    pub fn terminal(&self) -> Option<ChildNumber> { self.0.last().copied() }

    /// Converts into the inner vector of child numbers
    #[inline]
    pub fn into_inner(self) -> Vec<ChildNumber> { self.0 }
}

impl Display for DerivationPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for child in &self.0 {
            f.write_str("/")?;
            Display::fmt(child, f)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut split = s.split('/');
        if split.next() != Some("m") {
            return Err(Error::MalformedPath(s.to_owned()));
        }
        split
            .map(|segment| match ChildNumber::from_str(segment) {
                // report the whole path, not the lone segment
                Err(Error::MalformedPath(_)) => Err(Error::MalformedPath(s.to_owned())),
                other => other,
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::HARDENED_INDEX_BOUNDARY;

    #[test]
    fn bip44_path() {
        let path = DerivationPath::from_str("m/44'/0'/0'/0/1").unwrap();
        let values = path
            .iter()
            .map(|child| (child.derivation_value(), child.is_hardened()))
            .collect::<Vec<_>>();
        assert_eq!(values, vec![
            (44 + HARDENED_INDEX_BOUNDARY, true),
            (HARDENED_INDEX_BOUNDARY, true),
            (HARDENED_INDEX_BOUNDARY, true),
            (0, false),
            (1, false),
        ]);
        assert_eq!(path.to_string(), "m/44h/0h/0h/0/1");
        assert_eq!(format!("{:#}", path), "m/44'/0'/0'/0/1");
        assert_eq!(path.terminal(), Some(ChildNumber::normal(1).unwrap()));
    }

    #[test]
    fn master_path() {
        let path = DerivationPath::from_str("m").unwrap();
        assert!(path.is_master());
        assert_eq!(path, DerivationPath::master());
        assert_eq!(path.to_string(), "m");
        assert_eq!(path.terminal(), None);
    }

    #[test]
    fn normal_form() {
        let path = DerivationPath::from_str("m/0H/1/2h/2/1000000000").unwrap();
        let normal = path.to_string();
        assert_eq!(normal, "m/0h/1/2h/2/1000000000");
        assert_eq!(DerivationPath::from_str(&normal).unwrap(), path);
        assert_eq!(
            DerivationPath::master().child(ChildNumber::hardened(0).unwrap()).to_string(),
            "m/0h"
        );
    }

    #[test]
    fn malformed_paths() {
        for path in [
            "", "M", "n/0", "/0", "0", "m/", "m//0", "m/0/", "m/-1", "m/a", "m/0x", "m /0",
            "m/0'/1''", "mm/0",
        ] {
            assert_eq!(
                DerivationPath::from_str(path),
                Err(Error::MalformedPath(path.to_owned())),
                "path `{}`",
                path
            );
        }
    }

    #[test]
    fn out_of_range() {
        assert_eq!(
            DerivationPath::from_str("m/2147483648"),
            Err(Error::IndexOutOfRange(s!("2147483648")))
        );
        assert_eq!(
            DerivationPath::from_str("m/0/4294967296h"),
            Err(Error::IndexOutOfRange(s!("4294967296")))
        );
        assert!(DerivationPath::from_str("m/2147483647h").is_ok());
    }
}
