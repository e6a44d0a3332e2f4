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

//! Hierarchical deterministic wallet keys: BIP32 derivation engine together
//! with master seed providers.
//!
//! The derivation engine lives in the [`hd`] crate; this crate supplies the
//! seeds it consumes, from BIP39 mnemonics (feature `bip39`), from text
//! hashed into entropy, or from random entropy (feature `keygen`).

// Coding conventions
#![recursion_limit = "256"]
#![deny(dead_code, missing_docs)]

#[macro_use]
extern crate amplify;

pub extern crate bip32_hd as hd;

pub mod seed;

pub use seed::SeedType;
#[cfg(feature = "bip39")]
pub use seed::MnemonicSeed;
