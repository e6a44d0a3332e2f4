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

//! BIP32 hierarchical deterministic key derivation engine.
//!
//! Takes raw master seed bytes and a derivation path and deterministically
//! produces extended private and public keys for secp256k1 networks,
//! serialized in the standard 78-byte form and its base58check rendering
//! (`xprv`, `xpub`, `tprv`, `tpub`).
//!
//! ```
//! # use bip32_hd::{derive_key, Network, Visibility};
//! # use bip32_hd::secp256k1::Secp256k1;
//! let secp = Secp256k1::new();
//! let seed = [0u8, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];
//! let xprv = derive_key(&secp, &seed, "m/0h", Network::Mainnet, Visibility::Private).unwrap();
//! assert_eq!(
//!     xprv.to_string(),
//!     "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7"
//! );
//! ```

// Coding conventions
#![recursion_limit = "256"]
#![deny(dead_code, missing_docs)]

#[macro_use]
extern crate amplify;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde_crate as serde;

pub extern crate secp256k1;

pub mod base58;
mod ckd;
pub mod curve;
mod derive;
mod error;
mod hash;
mod index;
mod master;
mod path;
mod seed;
mod version;
mod xkey;

pub use ckd::{ckd_priv, ckd_pub, neuter};
pub use derive::{derive_key, derive_path};
pub use error::Error;
pub use hash::{fingerprint, hmac_sha512, ChainCode, Fingerprint};
pub use index::ChildNumber;
pub use master::{master_key, MASTER_KEY_SALT, RECOMMENDED_SEED_LEN};
pub use path::DerivationPath;
pub use seed::{MasterSeedProvider, Seed};
pub use version::{
    KeyVersion, Network, UnknownNameError, Visibility, VERSION_MAGIC_TPRV, VERSION_MAGIC_TPUB,
    VERSION_MAGIC_XPRV, VERSION_MAGIC_XPUB,
};
pub use xkey::{ExtendedKey, KeyData, EXTENDED_KEY_LEN};

/// Constant determining BIP32 boundary for u32 values after which index
/// is treated as hardened
pub const HARDENED_INDEX_BOUNDARY: u32 = 1 << 31;
