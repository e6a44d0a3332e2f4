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

//! Property-based tests for key derivation invariants

use std::str::FromStr;

use bip32_hd::secp256k1::Secp256k1;
use bip32_hd::{
    ckd_priv, ckd_pub, derive_path, master_key, neuter, ChildNumber, DerivationPath, Error,
    ExtendedKey, Network, Visibility, HARDENED_INDEX_BOUNDARY,
};
use proptest::prelude::*;

fn network() -> impl Strategy<Value = Network> {
    prop_oneof![Just(Network::Mainnet), Just(Network::Testnet)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Public child of a private parent equals the public child derived from
    /// the neutered parent
    #[test]
    fn neuter_commutes_with_derivation(
        seed in any::<[u8; 32]>(),
        index in 0..HARDENED_INDEX_BOUNDARY,
        network in network(),
    ) {
        let secp = Secp256k1::new();
        let master = master_key(&secp, &seed, network, Visibility::Private).unwrap();
        let sk = master.secret_key().unwrap();
        let child = ChildNumber::normal(index).unwrap();

        let private_child = ckd_priv(&secp, &sk, &master.chain_code(), child, 1, network).unwrap();
        let neutered_child = neuter(
            &secp,
            &private_child.secret_key().unwrap(),
            &private_child.chain_code(),
            private_child.child_number(),
            private_child.depth(),
            private_child.parent_fingerprint(),
            network,
        )
        .unwrap();

        let neutered_parent = master.to_public(&secp).unwrap();
        let public_child = ckd_pub(
            &secp,
            &neutered_parent.public_key(&secp),
            &neutered_parent.chain_code(),
            child,
            1,
            neutered_parent.fingerprint(&secp),
            network,
        )
        .unwrap();

        prop_assert_eq!(neutered_child, public_child);
        prop_assert_eq!(public_child.parent_fingerprint(), master.fingerprint(&secp));
    }

    /// Requesting a public key gives the neutered private key at every path
    #[test]
    fn public_derivation_matches_private(
        seed in any::<[u8; 32]>(),
        values in proptest::collection::vec(any::<u32>(), 0..5),
        network in network(),
    ) {
        let secp = Secp256k1::new();
        let path = values.into_iter().map(ChildNumber::from).collect::<DerivationPath>();
        let xprv = derive_path(&secp, &seed, &path, network, Visibility::Private).unwrap();
        let xpub = derive_path(&secp, &seed, &path, network, Visibility::Public).unwrap();
        prop_assert_eq!(xprv.to_public(&secp).unwrap(), xpub);
        prop_assert_eq!(xprv.depth() as usize, path.len());
        prop_assert_eq!(xpub.network(), network);
    }

    /// Base58check rendering of derived keys parses back into the same key
    #[test]
    fn serialization_round_trip(
        seed in any::<[u8; 32]>(),
        values in proptest::collection::vec(any::<u32>(), 0..4),
        private in any::<bool>(),
        network in network(),
    ) {
        let secp = Secp256k1::new();
        let visibility = if private { Visibility::Private } else { Visibility::Public };
        let path = values.into_iter().map(ChildNumber::from).collect::<DerivationPath>();
        let xkey = derive_path(&secp, &seed, &path, network, visibility).unwrap();
        prop_assert_eq!(xkey.network(), network);
        let encoded = xkey.to_string();
        prop_assert_eq!(ExtendedKey::from_str(&encoded), Ok(xkey));
        prop_assert_eq!(ExtendedKey::from_bytes(&*xkey.encode()), Ok(xkey));
    }

    /// Public parents never derive hardened children
    #[test]
    fn hardened_public_rejected(
        seed in any::<[u8; 32]>(),
        value in HARDENED_INDEX_BOUNDARY..=u32::MAX,
    ) {
        let secp = Secp256k1::new();
        let xpub = master_key(&secp, &seed, Network::Mainnet, Visibility::Public).unwrap();
        prop_assert_eq!(
            xpub.derive_public_child(&secp, ChildNumber::from(value)),
            Err(Error::HardenedPublicDerivationNotSupported(value))
        );
    }

    /// Indexes from the hardened range can't be constructed as normal ones and
    /// always fail public derivation through the low-level function too
    #[test]
    fn hardened_range_never_normal(
        seed in any::<[u8; 32]>(),
        value in HARDENED_INDEX_BOUNDARY..=u32::MAX,
    ) {
        prop_assert!(ChildNumber::normal(value).is_err());
        prop_assert!(ChildNumber::hardened(value).is_err());
        let child = ChildNumber::from_derivation_value(value);
        prop_assert!(child.is_hardened());
        prop_assert_eq!(child.derivation_value(), value);
        prop_assert_eq!(ChildNumber::hardened(child.index()), Ok(child));

        let secp = Secp256k1::new();
        let xpub = master_key(&secp, &seed, Network::Testnet, Visibility::Public).unwrap();
        prop_assert_eq!(
            ckd_pub(
                &secp,
                &xpub.public_key(&secp),
                &xpub.chain_code(),
                child,
                1,
                xpub.fingerprint(&secp),
                Network::Testnet,
            ),
            Err(Error::HardenedPublicDerivationNotSupported(value))
        );
    }

    /// Displayed path is a normal form which parses back into the same path
    #[test]
    fn path_normal_form(values in proptest::collection::vec(any::<u32>(), 0..8)) {
        let path = values.iter().copied().map(ChildNumber::from).collect::<DerivationPath>();
        let displayed = path.to_string();
        prop_assert_eq!(DerivationPath::from_str(&displayed), Ok(path.clone()));
        prop_assert_eq!(DerivationPath::from_str(&format!("{:#}", path)), Ok(path.clone()));
        let derivation_values = path.iter().map(|child| child.derivation_value()).collect::<Vec<_>>();
        prop_assert_eq!(derivation_values, values);
    }
}
