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

use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use bitcoin::hashes::hex::{self, FromHex, ToHex};
use bitcoin::hashes::hmac::{Hmac, HmacEngine};
use bitcoin::hashes::{hash160, sha512, Hash, HashEngine};
#[cfg(feature = "serde")]
use serde_with::{hex::Hex, As};
use zeroize::Zeroizing;

/// Key fingerprint: first four bytes of `RIPEMD160(SHA256(pubkey))` of the
/// compressed public key
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub struct Fingerprint(
    #[cfg_attr(feature = "serde", serde(with = "As::<Hex>"))]
    [u8; 4],
);

impl Fingerprint {
    /// Fingerprint value used by master keys in place of the parent one
    pub const ZERO: Fingerprint = Fingerprint([0u8; 4]);

    /// Constructs fingerprint from its byte representation
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self { Fingerprint(bytes) }

    /// Returns byte representation of the fingerprint
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 4] { &self.0 }

    /// Converts into byte representation of the fingerprint
    #[inline]
    pub const fn into_bytes(self) -> [u8; 4] { self.0 }

    /// Detects zero fingerprint
    #[inline]
    pub fn is_zero(&self) -> bool { self.0 == [0u8; 4] }
}

impl From<[u8; 4]> for Fingerprint {
    #[inline]
    fn from(bytes: [u8; 4]) -> Self { Fingerprint(bytes) }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str(&self.0.to_hex()) }
}

impl Debug for Fingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fingerprint").field(&format_args!("{}", self)).finish()
    }
}

impl FromStr for Fingerprint {
    type Err = hex::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let vec = Vec::<u8>::from_hex(s)?;
        let bytes = <[u8; 4]>::try_from(vec.as_slice())
            .map_err(|_| hex::Error::InvalidLength(8, s.len()))?;
        Ok(Fingerprint(bytes))
    }
}

/// Chain code: 32 bytes of extra entropy making derivation of a child key
/// impossible from the parent key alone
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct ChainCode(
    #[cfg_attr(feature = "serde", serde(with = "As::<Hex>"))]
    [u8; 32],
);

impl ChainCode {
    /// Constructs chain code from its byte representation
    #[inline]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self { ChainCode(bytes) }

    /// Returns byte representation of the chain code
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] { &self.0 }

    /// Converts into byte representation of the chain code
    #[inline]
    pub const fn into_bytes(self) -> [u8; 32] { self.0 }
}

impl From<[u8; 32]> for ChainCode {
    #[inline]
    fn from(bytes: [u8; 32]) -> Self { ChainCode(bytes) }
}

impl Display for ChainCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str(&self.0.to_hex()) }
}

impl Debug for ChainCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ChainCode").field(&format_args!("{}", self)).finish()
    }
}

impl FromStr for ChainCode {
    type Err = hex::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let vec = Vec::<u8>::from_hex(s)?;
        let bytes = <[u8; 32]>::try_from(vec.as_slice())
            .map_err(|_| hex::Error::InvalidLength(64, s.len()))?;
        Ok(ChainCode(bytes))
    }
}

/// Computes HMAC-SHA512 of `data` under `key`, returning the 64-byte output
/// in a buffer which is wiped on drop
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> Zeroizing<[u8; 64]> {
    let mut engine = HmacEngine::<sha512::Hash>::new(key);
    engine.input(data);
    Zeroizing::new(Hmac::<sha512::Hash>::from_engine(engine).into_inner())
}

/// Computes fingerprint of a compressed (33-byte) public key
pub fn fingerprint(pubkey: &[u8; 33]) -> Fingerprint {
    let hash = hash160::Hash::hash(pubkey);
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&hash.into_inner()[..4]);
    Fingerprint(bytes)
}
