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

use crate::Error;

/// Magical version bytes for xpub: bitcoin mainnet public key
pub const VERSION_MAGIC_XPUB: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];
/// Magical version bytes for xprv: bitcoin mainnet private key
pub const VERSION_MAGIC_XPRV: [u8; 4] = [0x04, 0x88, 0xAD, 0xE4];
/// Magical version bytes for tpub: bitcoin testnet public key
pub const VERSION_MAGIC_TPUB: [u8; 4] = [0x04, 0x35, 0x87, 0xCF];
/// Magical version bytes for tprv: bitcoin testnet private key
pub const VERSION_MAGIC_TPRV: [u8; 4] = [0x04, 0x35, 0x83, 0x94];

/// unknown network or key visibility name `{_0}`
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, Error)]
#[display(doc_comments)]
pub struct UnknownNameError(
    /// The string which was not recognized
    pub String,
);

/// Bitcoin networks distinguished by extended key version bytes
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "lowercase")
)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
pub enum Network {
    /// Bitcoin mainnet (`xpub`/`xprv`)
    #[display("mainnet")]
    Mainnet,

    /// Bitcoin testnet, signet and regtest (`tpub`/`tprv`)
    #[display("testnet")]
    Testnet,
}

impl FromStr for Network {
    type Err = UnknownNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "bitcoin" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            _ => Err(UnknownNameError(s.to_owned())),
        }
    }
}

/// Whether an extended key carries private or only public key material
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "lowercase")
)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
pub enum Visibility {
    /// Extended public key
    #[display("public")]
    Public,

    /// Extended private key
    #[display("private")]
    Private,
}

impl Visibility {
    /// Detects private visibility
    #[inline]
    pub fn is_private(self) -> bool { self == Visibility::Private }
}

impl FromStr for Visibility {
    type Err = UnknownNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" | "pub" => Ok(Visibility::Public),
            "private" | "prv" => Ok(Visibility::Private),
            _ => Err(UnknownNameError(s.to_owned())),
        }
    }
}

/// Structure holding 4 version bytes with magical numbers representing
/// different versions of extended public and private keys according to BIP-32.
///
/// Only the four BIP-32 versions can be represented: construction from bytes
/// fails on any other value.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct KeyVersion([u8; 4]);

impl KeyVersion {
    /// Constructs version for the given network and key visibility
    pub fn resolve(network: Network, visibility: Visibility) -> KeyVersion {
        match (network, visibility) {
            (Network::Mainnet, Visibility::Public) => KeyVersion(VERSION_MAGIC_XPUB),
            (Network::Mainnet, Visibility::Private) => KeyVersion(VERSION_MAGIC_XPRV),
            (Network::Testnet, Visibility::Public) => KeyVersion(VERSION_MAGIC_TPUB),
            (Network::Testnet, Visibility::Private) => KeyVersion(VERSION_MAGIC_TPRV),
        }
    }

    /// Constructs [`KeyVersion`] from a fixed 4 bytes values, failing with
    /// [`Error::InvalidVersion`] if the bytes are not one of the known
    /// versions
    pub fn from_bytes(version_bytes: [u8; 4]) -> Result<KeyVersion, Error> {
        match version_bytes {
            VERSION_MAGIC_XPUB | VERSION_MAGIC_XPRV | VERSION_MAGIC_TPUB | VERSION_MAGIC_TPRV => {
                Ok(KeyVersion(version_bytes))
            }
            _ => Err(Error::InvalidVersion(u32::from_be_bytes(version_bytes))),
        }
    }

    /// Detects network used by the version bytes
    pub fn network(&self) -> Network {
        match self.0 {
            VERSION_MAGIC_XPUB | VERSION_MAGIC_XPRV => Network::Mainnet,
            _ => Network::Testnet,
        }
    }

    /// Detects whether the version corresponds to an extended public or
    /// private key
    pub fn visibility(&self) -> Visibility {
        match self.0 {
            VERSION_MAGIC_XPUB | VERSION_MAGIC_TPUB => Visibility::Public,
            _ => Visibility::Private,
        }
    }

    /// Converts version into version corresponding to an extended public key
    /// of the same network
    #[inline]
    pub fn to_public(&self) -> KeyVersion { KeyVersion::resolve(self.network(), Visibility::Public) }

    /// Converts version bytes into `u32` representation in big endian format
    #[inline]
    pub fn to_u32(&self) -> u32 { u32::from_be_bytes(self.0) }

    /// Returns internal representation of version bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 4] { &self.0 }

    /// Converts into 4-byte array containing version byte values
    #[inline]
    pub fn into_bytes(self) -> [u8; 4] { self.0 }
}

impl Display for KeyVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let prefix = match self.0 {
            VERSION_MAGIC_XPUB => "xpub",
            VERSION_MAGIC_XPRV => "xprv",
            VERSION_MAGIC_TPUB => "tpub",
            _ => "tprv",
        };
        f.write_str(prefix)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resolution() {
        for network in [Network::Mainnet, Network::Testnet] {
            for visibility in [Visibility::Public, Visibility::Private] {
                let version = KeyVersion::resolve(network, visibility);
                assert_eq!(version.network(), network);
                assert_eq!(version.visibility(), visibility);
                assert_eq!(KeyVersion::from_bytes(version.into_bytes()), Ok(version));
                assert_eq!(version.to_public().visibility(), Visibility::Public);
                assert_eq!(version.to_public().network(), network);
            }
        }
        assert_eq!(KeyVersion::resolve(Network::Mainnet, Visibility::Private).to_u32(), 0x0488ADE4);
        assert_eq!(KeyVersion::resolve(Network::Testnet, Visibility::Public).to_string(), "tpub");
    }

    #[test]
    fn unknown_versions() {
        // SLIP-132 zpub is a valid magic elsewhere but not a BIP-32 version
        assert_eq!(
            KeyVersion::from_bytes([0x04, 0xB2, 0x47, 0x46]),
            Err(Error::InvalidVersion(0x04B24746))
        );
        assert_eq!(KeyVersion::from_bytes([0; 4]), Err(Error::InvalidVersion(0)));
    }

    #[test]
    fn network_names() {
        assert_eq!("mainnet".parse::<Network>(), Ok(Network::Mainnet));
        assert_eq!("Testnet".parse::<Network>(), Ok(Network::Testnet));
        assert_eq!(Network::Testnet.to_string(), "testnet");
        assert_eq!("public".parse::<Visibility>(), Ok(Visibility::Public));
        assert_eq!("prv".parse::<Visibility>(), Ok(Visibility::Private));
        assert_eq!("signet".parse::<Network>(), Err(UnknownNameError(s!("signet"))));
    }
}
