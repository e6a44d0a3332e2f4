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

use secp256k1::{PublicKey, Secp256k1, SecretKey, Signing};
#[cfg(feature = "serde")]
use serde_with::{DeserializeAs, DisplayFromStr, SerializeAs};
use zeroize::Zeroizing;

use crate::{
    base58, curve, fingerprint, ChainCode, ChildNumber, Error, Fingerprint, KeyVersion, Network,
    Visibility,
};

/// Length of the binary extended key serialization, in bytes
pub const EXTENDED_KEY_LEN: usize = 78;

/// Key material carried by an extended key
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyData {
    /// Private key scalar
    Private(SecretKey),

    /// Public key point
    Public(PublicKey),
}

impl Debug for KeyData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            KeyData::Private(_) => f.write_str("Private(..)"),
            KeyData::Public(pk) => f.debug_tuple("Public").field(pk).finish(),
        }
    }
}

impl KeyData {
    /// Returns visibility of the key material
    pub fn visibility(&self) -> Visibility {
        match self {
            KeyData::Private(_) => Visibility::Private,
            KeyData::Public(_) => Visibility::Public,
        }
    }

    /// Serializes key material into 33 bytes: `0x00` followed by the scalar
    /// for private keys, or the compressed point for public keys
    pub fn to_bytes(&self) -> Zeroizing<[u8; 33]> {
        let mut data = Zeroizing::new([0u8; 33]);
        match self {
            KeyData::Private(sk) => data[1..].copy_from_slice(&sk.secret_bytes()),
            KeyData::Public(pk) => data.copy_from_slice(&curve::serialize_point(pk)),
        }
        data
    }

    /// Computes public key point for the key material
    pub fn public_key<C: Signing>(&self, secp: &Secp256k1<C>) -> PublicKey {
        match self {
            KeyData::Private(sk) => curve::public_key(secp, sk),
            KeyData::Public(pk) => *pk,
        }
    }
}

/// Extended private or public key, as defined by BIP-32.
///
/// The value is immutable and always valid: every constructor, including
/// parsing, checks that the key material matches the version, that a private
/// scalar lies within `(0, n)`, that a public key is a valid compressed point
/// and that a depth-zero key has no parent fingerprint and child number.
/// Derivation produces new values.
///
/// `Debug` output never includes private key material; `Display` produces
/// the base58check string, which for private keys does include it.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ExtendedKey {
    version: KeyVersion,
    depth: u8,
    parent_fingerprint: Fingerprint,
    child_number: ChildNumber,
    chain_code: ChainCode,
    key: KeyData,
}

impl ExtendedKey {
    /// Constructs extended key, picking version bytes from the network and
    /// the kind of the key material
    pub fn new(
        network: Network,
        depth: u8,
        parent_fingerprint: Fingerprint,
        child_number: ChildNumber,
        chain_code: ChainCode,
        key: KeyData,
    ) -> Result<ExtendedKey, Error> {
        if depth == 0
            && (!parent_fingerprint.is_zero() || child_number.derivation_value() != 0)
        {
            return Err(Error::InvalidDepth);
        }
        Ok(ExtendedKey {
            version: KeyVersion::resolve(network, key.visibility()),
            depth,
            parent_fingerprint,
            child_number,
            chain_code,
            key,
        })
    }

    /// Parses binary serialization of an extended key
    pub fn from_bytes(data: &[u8]) -> Result<ExtendedKey, Error> {
        if data.len() != EXTENDED_KEY_LEN {
            return Err(Error::InvalidLength(data.len()));
        }

        let mut version = [0u8; 4];
        version.copy_from_slice(&data[0..4]);
        let version = KeyVersion::from_bytes(version)?;

        let depth = data[4];
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&data[5..9]);
        let mut child_number = [0u8; 4];
        child_number.copy_from_slice(&data[9..13]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&data[13..45]);

        let key_data = &data[45..78];
        let key = match (version.visibility(), key_data[0]) {
            (Visibility::Private, 0x00) => {
                let mut scalar = Zeroizing::new([0u8; 32]);
                scalar.copy_from_slice(&key_data[1..]);
                KeyData::Private(curve::secret_key(&scalar)?)
            }
            (Visibility::Public, _) => KeyData::Public(curve::parse_point(key_data)?),
            (Visibility::Private, _) => return Err(Error::InvalidKeyMaterial),
        };

        ExtendedKey::new(
            version.network(),
            depth,
            Fingerprint::from_bytes(parent_fingerprint),
            ChildNumber::from_derivation_value(u32::from_be_bytes(child_number)),
            ChainCode::from_bytes(chain_code),
            key,
        )
    }

    /// Produces 78-byte binary serialization of the extended key:
    /// `version ‖ depth ‖ parent fingerprint ‖ child number ‖ chain code ‖
    /// key data`
    pub fn encode(&self) -> Zeroizing<[u8; EXTENDED_KEY_LEN]> {
        let mut data = Zeroizing::new([0u8; EXTENDED_KEY_LEN]);
        data[0..4].copy_from_slice(self.version.as_bytes());
        data[4] = self.depth;
        data[5..9].copy_from_slice(self.parent_fingerprint.as_bytes());
        data[9..13].copy_from_slice(&self.child_number.to_be_bytes());
        data[13..45].copy_from_slice(self.chain_code.as_bytes());
        data[45..78].copy_from_slice(&*self.key.to_bytes());
        data
    }

    /// Returns version bytes of the key
    #[inline]
    pub fn version(&self) -> KeyVersion { self.version }

    /// Returns network the key belongs to
    #[inline]
    pub fn network(&self) -> Network { self.version.network() }

    /// Returns whether the key is private or public
    #[inline]
    pub fn visibility(&self) -> Visibility { self.version.visibility() }

    /// Returns number of derivation steps from the master key
    #[inline]
    pub fn depth(&self) -> u8 { self.depth }

    /// Returns fingerprint of the parent key; zero for master keys
    #[inline]
    pub fn parent_fingerprint(&self) -> Fingerprint { self.parent_fingerprint }

    /// Returns child number this key was derived with
    #[inline]
    pub fn child_number(&self) -> ChildNumber { self.child_number }

    /// Returns chain code of the key
    #[inline]
    pub fn chain_code(&self) -> ChainCode { self.chain_code }

    /// Returns key material
    #[inline]
    pub fn key(&self) -> &KeyData { &self.key }

    /// Returns 33-byte key data as it is serialized
    #[inline]
    pub fn key_data(&self) -> Zeroizing<[u8; 33]> { self.key.to_bytes() }

    /// Returns private key, if present
    pub fn secret_key(&self) -> Option<SecretKey> {
        match self.key {
            KeyData::Private(sk) => Some(sk),
            KeyData::Public(_) => None,
        }
    }

    /// Computes public key of the extended key
    #[inline]
    pub fn public_key<C: Signing>(&self, secp: &Secp256k1<C>) -> PublicKey {
        self.key.public_key(secp)
    }

    /// Computes fingerprint of this key, which is used as parent fingerprint
    /// by its children
    pub fn fingerprint<C: Signing>(&self, secp: &Secp256k1<C>) -> Fingerprint {
        fingerprint(&curve::serialize_point(&self.public_key(secp)))
    }
}

impl Debug for ExtendedKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("version", &format_args!("{}", self.version))
            .field("depth", &self.depth)
            .field("parent_fingerprint", &self.parent_fingerprint)
            .field("child_number", &self.child_number)
            .field("chain_code", &self.chain_code)
            .field("key", &self.key)
            .finish()
    }
}

impl Display for ExtendedKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let encoded = Zeroizing::new(base58::encode_check(&*self.encode()));
        f.write_str(&encoded)
    }
}

impl FromStr for ExtendedKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data = base58::decode_check(s)?;
        ExtendedKey::from_bytes(&data)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ExtendedKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        DisplayFromStr::serialize_as(self, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ExtendedKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        DisplayFromStr::deserialize_as(deserializer)
    }
}
