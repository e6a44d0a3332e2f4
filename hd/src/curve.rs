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

//! Secp256k1 scalar and point operations used by key derivation.
//!
//! All arithmetic is delegated to the [`secp256k1`] library; functions here
//! only map its results onto derivation semantics, where an invalid candidate
//! is reported as `None` so the caller may retry with the next index.

use secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey, Signing, Verification};

use crate::Error;

/// Length of a compressed serialized curve point
pub const POINT_LEN: usize = 33;

/// Parses private key scalar, failing if it is zero or not below the curve
/// order
pub fn secret_key(bytes: &[u8; 32]) -> Result<SecretKey, Error> {
    SecretKey::from_slice(bytes).map_err(|_| Error::InvalidKeyMaterial)
}

/// Interprets 32 big-endian bytes as a tweak scalar; `None` if the value is
/// not below the curve order. Zero is a valid tweak.
#[inline]
pub fn tweak(bytes: [u8; 32]) -> Option<Scalar> { Scalar::from_be_bytes(bytes).ok() }

/// Computes `k·G` for a private key `k`
#[inline]
pub fn public_key<C: Signing>(secp: &Secp256k1<C>, sk: &SecretKey) -> PublicKey {
    PublicKey::from_secret_key(secp, sk)
}

/// Computes `(k + t) mod n`; `None` if the result is zero
#[inline]
pub fn add_secret(sk: SecretKey, tweak: &Scalar) -> Option<SecretKey> { sk.add_tweak(tweak).ok() }

/// Computes `t·G + K`; `None` if the result is the point at infinity
#[inline]
pub fn add_point<C: Verification>(
    secp: &Secp256k1<C>,
    pk: PublicKey,
    tweak: &Scalar,
) -> Option<PublicKey> {
    pk.add_exp_tweak(secp, tweak).ok()
}

/// Serializes point in compressed form (`0x02`/`0x03` prefix + X coordinate)
#[inline]
pub fn serialize_point(pk: &PublicKey) -> [u8; POINT_LEN] { pk.serialize() }

/// Parses compressed point, rejecting uncompressed encodings and points not
/// lying on the curve
pub fn parse_point(bytes: &[u8]) -> Result<PublicKey, Error> {
    match bytes.first() {
        Some(0x02) | Some(0x03) if bytes.len() == POINT_LEN => {
            PublicKey::from_slice(bytes).map_err(|_| Error::InvalidKeyMaterial)
        }
        _ => Err(Error::InvalidKeyMaterial),
    }
}
