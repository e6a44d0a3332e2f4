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

use std::str::FromStr;

use secp256k1::{Secp256k1, Signing, Verification};

use crate::{master_key, DerivationPath, Error, ExtendedKey, KeyData, Network, Visibility};

/// Derives extended key for the path given as a string (like `m/44h/0h/0h`)
/// from the master seed.
///
/// See [`derive_path`] for the derivation procedure.
pub fn derive_key<C: Signing + Verification>(
    secp: &Secp256k1<C>,
    seed: &[u8],
    path: &str,
    network: Network,
    visibility: Visibility,
) -> Result<ExtendedKey, Error> {
    let path = DerivationPath::from_str(path)?;
    derive_path(secp, seed, &path, network, visibility)
}

/// Derives extended key for the path from the master seed.
///
/// The master path returns the master key of the requested visibility.
/// Otherwise private keys are derived from the private master key for every
/// path segment. A public result for a hardened final segment is the
/// neutered final private child; for a normal final segment it is derived by
/// CKDpub from the neutered second-to-last key.
pub fn derive_path<C: Signing + Verification>(
    secp: &Secp256k1<C>,
    seed: &[u8],
    path: &DerivationPath,
    network: Network,
    visibility: Visibility,
) -> Result<ExtendedKey, Error> {
    tracing::debug!(%path, %network, %visibility, "deriving extended key from seed");
    if path.is_master() {
        return master_key(secp, seed, network, visibility);
    }
    master_key(secp, seed, network, Visibility::Private)?.derive_path(secp, path, visibility)
}

impl ExtendedKey {
    /// Derives descendant key at the path relative to this key.
    ///
    /// Private keys follow the same procedure as [`derive_path`]. Public keys
    /// can only derive normal segments, and only into public keys.
    pub fn derive_path<C: Signing + Verification>(
        &self,
        secp: &Secp256k1<C>,
        path: &DerivationPath,
        visibility: Visibility,
    ) -> Result<ExtendedKey, Error> {
        if let KeyData::Public(_) = self.key() {
            if visibility.is_private() {
                return Err(Error::PrivateFromPublic);
            }
            return path.iter().try_fold(*self, |key, child| {
                tracing::debug!(
                    index = child.derivation_value(),
                    hardened = child.is_hardened(),
                    depth = key.depth(),
                    "public derivation step"
                );
                key.derive_public_child(secp, *child)
            });
        }

        let (last, init) = match path.split_last() {
            Some(split) => split,
            None if visibility.is_private() => return Ok(*self),
            None => return self.to_public(secp),
        };
        let parent = init.iter().try_fold(*self, |key, child| {
            tracing::debug!(
                index = child.derivation_value(),
                hardened = child.is_hardened(),
                depth = key.depth(),
                "private derivation step"
            );
            key.derive_private_child(secp, *child)
        })?;

        tracing::debug!(
            index = last.derivation_value(),
            hardened = last.is_hardened(),
            depth = parent.depth(),
            %visibility,
            "final derivation step"
        );
        match visibility {
            Visibility::Private => parent.derive_private_child(secp, *last),
            Visibility::Public if last.is_hardened() => {
                parent.derive_private_child(secp, *last)?.to_public(secp)
            }
            Visibility::Public => parent.to_public(secp)?.derive_public_child(secp, *last),
        }
    }
}
