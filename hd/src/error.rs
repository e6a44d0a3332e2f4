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

/// Errors of extended key construction, parsing and derivation
#[derive(Clone, PartialEq, Eq, Hash, Debug, Display, Error)]
#[display(doc_comments)]
pub enum Error {
    /// derivation path `{0}` is malformed: it must start with `m` followed by
    /// `/`-separated decimal indexes with an optional `h`, `H` or `'` suffix
    MalformedPath(String),

    /// derivation index `{0}` is out of range; indexes must be below 2^31
    /// before hardening is applied
    IndexOutOfRange(String),

    /// unknown extended key version bytes {0:08X}
    InvalidVersion(u32),

    /// extended key data has wrong length {0}; 78 bytes are expected
    InvalidLength(usize),

    /// base58check checksum of the extended key does not match its payload
    InvalidChecksum,

    /// extended key string is not a valid base58 encoding
    InvalidBase58,

    /// key material is not valid: zero or out-of-range private key scalar,
    /// invalid public key point, or key kind not matching the version
    InvalidKeyMaterial,

    /// extended key of depth zero must have zero parent fingerprint and
    /// child number
    InvalidDepth,

    /// maximal derivation depth of 255 is exceeded
    DepthExceeded,

    /// derived child key must have depth of at least 1
    ZeroChildDepth,

    /// hardened child {0} can't be derived from an extended public key
    HardenedPublicDerivationNotSupported(u32),

    /// extended private key can't be derived from an extended public key
    PrivateFromPublic,

    /// no valid child key exists between index {0} and the end of its index
    /// range
    RetryBoundsExceeded(u32),
}
