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

//! Master seed providers: entropy sources and BIP39 mnemonics.

use std::str::FromStr;

#[cfg(feature = "bip39")]
use bip39::Mnemonic;
use bitcoin::hashes::{sha256, Hash};
#[cfg(feature = "bip39")]
use hd::MasterSeedProvider;
use zeroize::Zeroizing;

/// invalid number of mnemonic words `{_0}`; 12, 15, 18, 21 or 24 words are
/// expected
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, Error)]
#[display(doc_comments)]
pub struct WordCountError(
    /// The value which was not recognized
    pub String,
);

/// Size of mnemonic entropy
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display, Default)]
#[repr(u16)]
pub enum SeedType {
    /// 128 bits of entropy, 12 words
    #[display("12")]
    Bit128 = 128,

    /// 160 bits of entropy, 15 words
    #[display("15")]
    Bit160 = 160,

    /// 192 bits of entropy, 18 words
    #[display("18")]
    Bit192 = 192,

    /// 224 bits of entropy, 21 words
    #[display("21")]
    Bit224 = 224,

    /// 256 bits of entropy, 24 words
    #[default]
    #[display("24")]
    Bit256 = 256,
}

impl SeedType {
    /// Returns entropy length in bits
    #[inline]
    pub fn bit_len(self) -> usize { self as usize }

    /// Returns entropy length in bytes
    #[inline]
    pub fn byte_len(self) -> usize { self.bit_len() / 8 }

    /// Returns number of mnemonic words
    #[inline]
    pub fn word_len(self) -> usize {
        match self {
            SeedType::Bit128 => 12,
            SeedType::Bit160 => 15,
            SeedType::Bit192 => 18,
            SeedType::Bit224 => 21,
            SeedType::Bit256 => 24,
        }
    }

    /// Detects seed type from the number of mnemonic words
    pub fn with_word_len(words: usize) -> Option<SeedType> {
        Some(match words {
            12 => SeedType::Bit128,
            15 => SeedType::Bit160,
            18 => SeedType::Bit192,
            21 => SeedType::Bit224,
            24 => SeedType::Bit256,
            _ => return None,
        })
    }

    /// Derives entropy of this size from an arbitrary string: the string
    /// is hashed with SHA256 and the hash is truncated to the entropy length
    pub fn entropy_from_str(self, input: &str) -> Zeroizing<Vec<u8>> {
        let hash = Zeroizing::new(sha256::Hash::hash(input.as_bytes()).into_inner());
        Zeroizing::new(hash[..self.byte_len()].to_vec())
    }

    /// Generates random entropy of this size
    #[cfg(feature = "keygen")]
    pub fn random_entropy(self) -> Zeroizing<Vec<u8>> {
        use bitcoin::secp256k1::rand::{self, RngCore};

        let mut entropy = Zeroizing::new(vec![0u8; self.byte_len()]);
        rand::thread_rng().fill_bytes(&mut entropy);
        entropy
    }
}

impl FromStr for SeedType {
    type Err = WordCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        usize::from_str(s)
            .ok()
            .and_then(SeedType::with_word_len)
            .ok_or_else(|| WordCountError(s.to_owned()))
    }
}

/// BIP39 mnemonic with an optional passphrase, providing master seed for
/// key derivation
#[cfg(feature = "bip39")]
#[derive(Clone)]
pub struct MnemonicSeed {
    mnemonic: Mnemonic,
    passphrase: Zeroizing<String>,
}

#[cfg(feature = "bip39")]
impl std::fmt::Debug for MnemonicSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MnemonicSeed(<{} words>)", self.mnemonic.word_count())
    }
}

#[cfg(feature = "bip39")]
impl MnemonicSeed {
    /// Parses mnemonic words separated by whitespace
    pub fn parse(words: &str, passphrase: &str) -> Result<MnemonicSeed, bip39::Error> {
        let words = Zeroizing::new(words.split_whitespace().collect::<Vec<_>>().join(" "));
        let mnemonic = Mnemonic::parse(words.as_str())?;
        Ok(MnemonicSeed::with(mnemonic, passphrase))
    }

    /// Constructs mnemonic words encoding the entropy
    pub fn from_entropy(entropy: &[u8], passphrase: &str) -> Result<MnemonicSeed, bip39::Error> {
        let mnemonic = Mnemonic::from_entropy(entropy)?;
        Ok(MnemonicSeed::with(mnemonic, passphrase))
    }

    /// Constructs seed provider from mnemonic and passphrase
    pub fn with(mnemonic: Mnemonic, passphrase: &str) -> MnemonicSeed {
        MnemonicSeed {
            mnemonic,
            passphrase: Zeroizing::new(passphrase.to_owned()),
        }
    }

    /// Returns mnemonic
    #[inline]
    pub fn mnemonic(&self) -> &Mnemonic { &self.mnemonic }

    /// Returns seed type matching the number of words
    pub fn seed_type(&self) -> Option<SeedType> {
        SeedType::with_word_len(self.mnemonic.word_count())
    }

    /// Returns mnemonic words in their order
    pub fn words(&self) -> Vec<&'static str> { self.mnemonic.word_iter().collect() }
}

#[cfg(feature = "bip39")]
impl MasterSeedProvider for MnemonicSeed {
    fn master_seed(&self) -> Zeroizing<Vec<u8>> {
        let seed = Zeroizing::new(self.mnemonic.to_seed(self.passphrase.as_str()));
        Zeroizing::new(seed.to_vec())
    }
}
