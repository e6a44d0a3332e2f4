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

use std::fmt::{self, Debug, Formatter};
use std::str::FromStr;

use bitcoin::hashes::hex::{self, FromHex};
use zeroize::{Zeroize, Zeroizing};

/// Source of master seed bytes for key derivation.
///
/// Implementors may obtain the seed from mnemonic words, derived entropy or
/// any other material; the derivation engine only consumes the bytes.
pub trait MasterSeedProvider {
    /// Returns master seed bytes, wiped from memory once dropped
    fn master_seed(&self) -> Zeroizing<Vec<u8>>;
}

/// Raw master seed bytes
#[derive(Clone, PartialEq, Eq)]
pub struct Seed(Vec<u8>);

impl Drop for Seed {
    fn drop(&mut self) { self.0.zeroize() }
}

impl Seed {
    /// Constructs seed from raw bytes
    #[inline]
    pub fn with(bytes: impl Into<Vec<u8>>) -> Seed { Seed(bytes.into()) }

    /// Returns seed bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8] { &self.0 }

    /// Returns seed length in bytes
    #[inline]
    pub fn len(&self) -> usize { self.0.len() }

    /// Detects empty seed
    #[inline]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl Debug for Seed {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Seed(<{} bytes>)", self.0.len())
    }
}

impl FromStr for Seed {
    type Err = hex::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Vec::<u8>::from_hex(s).map(Seed) }
}

impl MasterSeedProvider for Seed {
    fn master_seed(&self) -> Zeroizing<Vec<u8>> { Zeroizing::new(self.0.clone()) }
}

impl MasterSeedProvider for [u8] {
    fn master_seed(&self) -> Zeroizing<Vec<u8>> { Zeroizing::new(self.to_vec()) }
}
