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

use secp256k1::{Secp256k1, Signing};
use zeroize::Zeroizing;

use crate::{
    curve, hmac_sha512, neuter, ChainCode, ChildNumber, Error, ExtendedKey, Fingerprint, KeyData,
    Network, Visibility,
};

/// HMAC key used to stretch the seed into the master key
pub const MASTER_KEY_SALT: &[u8] = b"Bitcoin seed";

/// Seed length range recommended by BIP-32, in bytes
pub const RECOMMENDED_SEED_LEN: std::ops::RangeInclusive<usize> = 16..=64;

/// Generates master extended key from the seed.
///
/// Fails with [`Error::InvalidKeyMaterial`] if the seed stretches into a zero
/// or out-of-range scalar. Seeds of non-recommended length are accepted with
/// a warning.
pub fn master_key<C: Signing>(
    secp: &Secp256k1<C>,
    seed: &[u8],
    network: Network,
    visibility: Visibility,
) -> Result<ExtendedKey, Error> {
    if !RECOMMENDED_SEED_LEN.contains(&seed.len()) {
        tracing::warn!(
            len = seed.len(),
            "seed length is outside of the 16..=64 bytes range recommended by BIP-32"
        );
    }

    let i = hmac_sha512(MASTER_KEY_SALT, seed);
    let mut il = Zeroizing::new([0u8; 32]);
    il.copy_from_slice(&i[..32]);
    let sk = curve::secret_key(&il)?;
    let mut ir = [0u8; 32];
    ir.copy_from_slice(&i[32..]);
    let chain_code = ChainCode::from_bytes(ir);

    tracing::debug!(%network, %visibility, "generated master key");
    match visibility {
        Visibility::Private => ExtendedKey::new(
            network,
            0,
            Fingerprint::ZERO,
            ChildNumber::default(),
            chain_code,
            KeyData::Private(sk),
        ),
        Visibility::Public => {
            neuter(secp, &sk, &chain_code, ChildNumber::default(), 0, Fingerprint::ZERO, network)
        }
    }
}

#[cfg(test)]
mod test {
    use bitcoin::hashes::hex::FromHex;

    use super::*;

    #[test]
    fn vector1_master() {
        let secp = Secp256k1::new();
        let seed = Vec::<u8>::from_hex("000102030405060708090a0b0c0d0e0f").unwrap();
        let xprv = master_key(&secp, &seed, Network::Mainnet, Visibility::Private).unwrap();
        assert_eq!(
            xprv.to_string(),
            "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi"
        );
        assert_eq!(xprv.fingerprint(&secp).to_string(), "3442193e");

        let xpub = master_key(&secp, &seed, Network::Mainnet, Visibility::Public).unwrap();
        assert_eq!(
            xpub.to_string(),
            "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8"
        );
        assert_eq!(xprv.to_public(&secp).unwrap(), xpub);
    }

    #[test]
    fn testnet_master() {
        let secp = Secp256k1::new();
        let seed = [0u8; 32];
        let tprv = master_key(&secp, &seed, Network::Testnet, Visibility::Private).unwrap();
        let tpub = master_key(&secp, &seed, Network::Testnet, Visibility::Public).unwrap();
        assert!(tprv.to_string().starts_with("tprv"));
        assert!(tpub.to_string().starts_with("tpub"));
        let xprv = master_key(&secp, &seed, Network::Mainnet, Visibility::Private).unwrap();
        assert_eq!(tprv.key(), xprv.key());
        assert_eq!(tprv.chain_code(), xprv.chain_code());
    }

    #[test]
    fn unusual_seed_lengths() {
        let secp = Secp256k1::new();
        assert!(master_key(&secp, &[], Network::Mainnet, Visibility::Private).is_ok());
        assert!(master_key(&secp, &[0xAB; 15], Network::Mainnet, Visibility::Private).is_ok());
        assert!(master_key(&secp, &[0xAB; 65], Network::Mainnet, Visibility::Public).is_ok());
    }
}
