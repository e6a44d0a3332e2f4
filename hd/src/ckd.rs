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

use secp256k1::{PublicKey, Secp256k1, SecretKey, Signing, Verification};
use zeroize::Zeroizing;

use crate::{
    curve, fingerprint, hmac_sha512, ChainCode, ChildNumber, Error, ExtendedKey, Fingerprint,
    KeyData, Network, HARDENED_INDEX_BOUNDARY,
};

/// Length of HMAC input for a child key derivation step: 33 bytes of key
/// data followed by 4 bytes of child number
const CKD_DATA_LEN: usize = 37;

/// Tries derivation candidates starting from `start`, advancing to the next
/// index whenever `attempt` reports the candidate as invalid. The index never
/// leaves the range of its kind: normal indexes stay below 2^31 and hardened
/// do not wrap past `u32::MAX`.
pub(crate) fn next_valid<T>(
    start: ChildNumber,
    mut attempt: impl FnMut(ChildNumber) -> Option<T>,
) -> Result<(ChildNumber, T), Error> {
    let mut child = start;
    loop {
        if let Some(found) = attempt(child) {
            return Ok((child, found));
        }
        tracing::warn!(
            index = child.derivation_value(),
            hardened = child.is_hardened(),
            "derived child key is invalid, proceeding with the next index"
        );
        child = child
            .checked_inc()
            .ok_or_else(|| Error::RetryBoundsExceeded(start.derivation_value()))?;
    }
}

/// Splits HMAC-SHA512 output into a tweak scalar and a child chain code;
/// `None` if the left half is not below the curve order
fn split_hmac(i: &[u8; 64]) -> Option<(secp256k1::Scalar, ChainCode)> {
    let mut il = Zeroizing::new([0u8; 32]);
    il.copy_from_slice(&i[..32]);
    let tweak = curve::tweak(*il)?;
    let mut ir = [0u8; 32];
    ir.copy_from_slice(&i[32..]);
    Some((tweak, ChainCode::from_bytes(ir)))
}

/// Private parent key to private child key derivation (CKDpriv).
///
/// Hardened children commit to the parent private key, normal children to
/// the parent public key. Candidates whose HMAC output is not below the curve
/// order, or which produce a zero child scalar, are skipped in favour of the
/// next index; the index actually used is recorded in the child.
///
/// `depth` is the depth of the derived child and must be at least 1, otherwise
/// [`Error::ZeroChildDepth`] is returned.
pub fn ckd_priv<C: Signing>(
    secp: &Secp256k1<C>,
    parent: &SecretKey,
    chain_code: &ChainCode,
    child: ChildNumber,
    depth: u8,
    network: Network,
) -> Result<ExtendedKey, Error> {
    if depth == 0 {
        return Err(Error::ZeroChildDepth);
    }
    let parent_point = curve::serialize_point(&curve::public_key(secp, parent));
    let (child, (sk, child_chain_code)) = next_valid(child, |child| {
        let mut data = Zeroizing::new([0u8; CKD_DATA_LEN]);
        if child.is_hardened() {
            data[1..33].copy_from_slice(&parent.secret_bytes());
        } else {
            data[..33].copy_from_slice(&parent_point);
        }
        data[33..].copy_from_slice(&child.to_be_bytes());
        let i = hmac_sha512(chain_code.as_bytes(), &*data);
        let (tweak, child_chain_code) = split_hmac(&i)?;
        let sk = curve::add_secret(*parent, &tweak)?;
        Some((sk, child_chain_code))
    })?;
    tracing::trace!(
        index = child.derivation_value(),
        hardened = child.is_hardened(),
        depth,
        "derived private child"
    );
    ExtendedKey::new(
        network,
        depth,
        fingerprint(&parent_point),
        child,
        child_chain_code,
        KeyData::Private(sk),
    )
}

/// Public parent key to public child key derivation (CKDpub).
///
/// Hardened children (derivation value at or above
/// [`HARDENED_INDEX_BOUNDARY`]) can't be derived and fail without any
/// computation. Candidates whose HMAC output is not below the curve order, or
/// which produce the point at infinity, are skipped in favour of the next
/// index.
///
/// `parent_fingerprint` is recorded in the child as is; it must be the
/// fingerprint of `parent`. `depth` is the child depth and must be at least 1.
pub fn ckd_pub<C: Verification>(
    secp: &Secp256k1<C>,
    parent: &PublicKey,
    chain_code: &ChainCode,
    child: ChildNumber,
    depth: u8,
    parent_fingerprint: Fingerprint,
    network: Network,
) -> Result<ExtendedKey, Error> {
    if child.derivation_value() >= HARDENED_INDEX_BOUNDARY {
        return Err(Error::HardenedPublicDerivationNotSupported(child.derivation_value()));
    }
    if depth == 0 {
        return Err(Error::ZeroChildDepth);
    }
    let parent_point = curve::serialize_point(parent);
    let (child, (pk, child_chain_code)) = next_valid(child, |child| {
        let mut data = [0u8; CKD_DATA_LEN];
        data[..33].copy_from_slice(&parent_point);
        data[33..].copy_from_slice(&child.to_be_bytes());
        let i = hmac_sha512(chain_code.as_bytes(), &data);
        let (tweak, child_chain_code) = split_hmac(&i)?;
        let pk = curve::add_point(secp, *parent, &tweak)?;
        Some((pk, child_chain_code))
    })?;
    tracing::trace!(index = child.derivation_value(), depth, "derived public child");
    ExtendedKey::new(
        network,
        depth,
        parent_fingerprint,
        child,
        child_chain_code,
        KeyData::Public(pk),
    )
}

/// Neuter function (N): converts private key into an extended public key
/// with the same depth, child number, chain code and the supplied parent
/// fingerprint
pub fn neuter<C: Signing>(
    secp: &Secp256k1<C>,
    sk: &SecretKey,
    chain_code: &ChainCode,
    child: ChildNumber,
    depth: u8,
    parent_fingerprint: Fingerprint,
    network: Network,
) -> Result<ExtendedKey, Error> {
    ExtendedKey::new(
        network,
        depth,
        parent_fingerprint,
        child,
        *chain_code,
        KeyData::Public(curve::public_key(secp, sk)),
    )
}

impl ExtendedKey {
    fn child_depth(&self) -> Result<u8, Error> {
        self.depth().checked_add(1).ok_or(Error::DepthExceeded)
    }

    /// Derives private child key; fails for extended public keys
    pub fn derive_private_child<C: Signing>(
        &self,
        secp: &Secp256k1<C>,
        child: ChildNumber,
    ) -> Result<ExtendedKey, Error> {
        let sk = self.secret_key().ok_or(Error::PrivateFromPublic)?;
        ckd_priv(secp, &sk, &self.chain_code(), child, self.child_depth()?, self.network())
    }

    /// Derives public child key.
    ///
    /// For extended private keys the private child is derived first and then
    /// neutered, so hardened children are supported. For extended public keys
    /// CKDpub is used and hardened children fail with
    /// [`Error::HardenedPublicDerivationNotSupported`].
    pub fn derive_public_child<C: Signing + Verification>(
        &self,
        secp: &Secp256k1<C>,
        child: ChildNumber,
    ) -> Result<ExtendedKey, Error> {
        match self.key() {
            KeyData::Private(_) => self.derive_private_child(secp, child)?.to_public(secp),
            KeyData::Public(pk) => ckd_pub(
                secp,
                pk,
                &self.chain_code(),
                child,
                self.child_depth()?,
                self.fingerprint(secp),
                self.network(),
            ),
        }
    }

    /// Converts into extended public key keeping own parent fingerprint,
    /// depth and child number. Public keys are returned unchanged.
    pub fn to_public<C: Signing>(&self, secp: &Secp256k1<C>) -> Result<ExtendedKey, Error> {
        match self.key() {
            KeyData::Private(sk) => neuter(
                secp,
                sk,
                &self.chain_code(),
                self.child_number(),
                self.depth(),
                self.parent_fingerprint(),
                self.network(),
            ),
            KeyData::Public(_) => Ok(*self),
        }
    }
}
