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

#[macro_use]
extern crate clap;
#[macro_use]
extern crate amplify;

use std::process::ExitCode;
use std::str::FromStr;

use bitcoin::hashes::hex::{self, ToHex};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use wallet::hd::secp256k1::Secp256k1;
use wallet::hd::{
    self, derive_path, master_key, DerivationPath, ExtendedKey, MasterSeedProvider, Network, Seed,
    Visibility,
};
use wallet::{MnemonicSeed, SeedType};

/// Command-line arguments
#[derive(Parser)]
#[derive(Clone, Eq, PartialEq, Debug)]
#[clap(
    author,
    version,
    name = "hd-keys",
    about = "Command-line tool producing BIP32 extended keys from seeds and mnemonics"
)]
pub struct Args {
    /// Increase verbosity of log messages written to stderr; may be repeated.
    /// `RUST_LOG` environment variable overrides this value
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Command to execute
    #[clap(subcommand)]
    pub command: Command,
}

/// Source of the mnemonic for the `seed` command
#[derive(ValueEnum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum SeedSource {
    /// Existing mnemonic words
    Words,
    /// SHA256 hash of an arbitrary string
    String,
    /// Random entropy
    Rand,
}

/// Output of the `seed` command
#[derive(ValueEnum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum SeedOutput {
    /// Mnemonic words
    Words,
    /// Master extended private key for bitcoin mainnet
    Xprv,
    /// Master extended private key for bitcoin testnet
    Tprv,
}

/// Seed format for the `derive` command
#[derive(ValueEnum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum DeriveSource {
    /// BIP39 mnemonic words
    Words,
    /// Raw seed bytes in hexadecimal
    Hex,
}

/// Command to execute
#[derive(Subcommand)]
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Command {
    /// Generate mnemonic words or master extended private key
    Seed {
        /// Where the mnemonic comes from
        #[clap(short, long = "from", value_enum, default_value = "rand")]
        from: SeedSource,

        /// Mnemonic words or string, in the format specified by --from
        #[clap(short, long)]
        input: Option<String>,

        /// What to print
        #[clap(short, long, value_enum, default_value = "words")]
        to: SeedOutput,

        /// Number of mnemonic words to generate (12, 15, 18, 21 or 24);
        /// defaults to 24
        #[clap(short, long)]
        number: Option<SeedType>,

        /// BIP39 passphrase
        #[clap(short, long, default_value = "")]
        passphrase: String,

        /// Number the words and print them one per line
        #[clap(long)]
        pretty: bool,
    },

    /// Derive extended key at the derivation path
    Derive {
        /// Format of the seed input
        #[clap(short, long = "from", value_enum, default_value = "words")]
        from: DeriveSource,

        /// Mnemonic words or hexadecimal seed
        #[clap(short, long)]
        input: String,

        /// BIP39 passphrase, used with --from words
        #[clap(short, long, default_value = "")]
        passphrase: String,

        /// Derivation path, like `m/44h/0h/0h/0/1`
        #[clap(long, default_value = "m")]
        path: DerivationPath,

        /// Produce key for bitcoin testnet
        #[clap(long)]
        testnet: bool,

        /// Produce extended public key
        #[clap(long)]
        public: bool,
    },

    /// Print details of an extended key. Private keys are never printed.
    Inspect {
        /// Extended key in base58check encoding
        xkey: ExtendedKey,
    },
}

impl Command {
    pub fn exec(&self) -> Result<(), Error> {
        match self {
            Command::Seed {
                from,
                input,
                to,
                number,
                passphrase,
                pretty,
            } => Command::seed(*from, input.as_deref(), *to, *number, passphrase, *pretty),
            Command::Derive {
                from,
                input,
                passphrase,
                path,
                testnet,
                public,
            } => {
                let network = if *testnet { Network::Testnet } else { Network::Mainnet };
                let visibility = if *public { Visibility::Public } else { Visibility::Private };
                Command::derive(*from, input, passphrase, path, network, visibility)
            }
            Command::Inspect { xkey } => Command::inspect(xkey),
        }
    }

    fn seed(
        from: SeedSource,
        input: Option<&str>,
        to: SeedOutput,
        number: Option<SeedType>,
        passphrase: &str,
        pretty: bool,
    ) -> Result<(), Error> {
        let mnemonic = mnemonic(from, input, to, number, passphrase)?;
        match to {
            SeedOutput::Words if pretty => {
                for (no, word) in mnemonic.words().into_iter().enumerate() {
                    println!("{}) {}", no + 1, word);
                }
            }
            SeedOutput::Words => println!("{}", mnemonic.mnemonic()),
            SeedOutput::Xprv | SeedOutput::Tprv if pretty => return Err(Error::PrettyKey),
            SeedOutput::Xprv | SeedOutput::Tprv => {
                let network =
                    if to == SeedOutput::Xprv { Network::Mainnet } else { Network::Testnet };
                let secp = Secp256k1::new();
                let xprv = master_key(&secp, &mnemonic.master_seed(), network, Visibility::Private)?;
                println!("{}", xprv);
            }
        }
        Ok(())
    }

    fn derive(
        from: DeriveSource,
        input: &str,
        passphrase: &str,
        path: &DerivationPath,
        network: Network,
        visibility: Visibility,
    ) -> Result<(), Error> {
        let seed = match from {
            DeriveSource::Words => MnemonicSeed::parse(input, passphrase)?.master_seed(),
            DeriveSource::Hex if !passphrase.is_empty() => return Err(Error::PassphraseWithHex),
            DeriveSource::Hex => Seed::from_str(input.trim())?.master_seed(),
        };
        let secp = Secp256k1::new();
        let xkey = derive_path(&secp, &seed, path, network, visibility)?;
        println!("{}", xkey);
        Ok(())
    }

    fn inspect(xkey: &ExtendedKey) -> Result<(), Error> {
        let secp = Secp256k1::new();
        println!("version:            {}", xkey.version());
        println!("network:            {}", xkey.network());
        println!("visibility:         {}", xkey.visibility());
        println!("depth:              {}", xkey.depth());
        println!("parent fingerprint: {}", xkey.parent_fingerprint());
        println!("child number:       {}", xkey.child_number());
        println!("chain code:         {}", xkey.chain_code());
        println!("fingerprint:        {}", xkey.fingerprint(&secp));
        println!("public key:         {}", xkey.public_key(&secp).serialize().to_hex());
        Ok(())
    }
}

/// Resolves mnemonic for the `seed` command, checking the option combination
fn mnemonic(
    from: SeedSource,
    input: Option<&str>,
    to: SeedOutput,
    number: Option<SeedType>,
    passphrase: &str,
) -> Result<MnemonicSeed, Error> {
    let input = input.map(str::trim).filter(|input| !input.is_empty());
    let seed_type = number.unwrap_or_default();
    let mnemonic = match (from, input) {
        (SeedSource::Rand, None) => {
            MnemonicSeed::from_entropy(&seed_type.random_entropy(), passphrase)?
        }
        (SeedSource::String, Some(input)) => {
            MnemonicSeed::from_entropy(&seed_type.entropy_from_str(input), passphrase)?
        }
        (SeedSource::Words, Some(_)) if number.is_some() => return Err(Error::NumberWithWords),
        (SeedSource::Words, Some(_)) if to == SeedOutput::Words => {
            return Err(Error::RedundantWords)
        }
        (SeedSource::Words, Some(input)) => MnemonicSeed::parse(input, passphrase)?,
        _ => return Err(Error::InputMismatch),
    };
    tracing::debug!(words = mnemonic.words().len(), source = ?from, "resolved mnemonic");
    Ok(mnemonic)
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[derive(Clone, Eq, PartialEq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum Error {
    /// --input is required unless you say --from rand
    InputMismatch,

    /// omit --number when you specify --from words
    NumberWithWords,

    /// --from words --to words is redundant
    RedundantWords,

    /// --pretty has no effect on --to xprv or --to tprv
    PrettyKey,

    /// --passphrase applies only to --from words
    PassphraseWithHex,

    /// invalid mnemonic: {0}
    #[from]
    Bip39(bip39::Error),

    /// invalid hexadecimal seed: {0}
    #[from]
    Hex(hex::Error),

    /// {0}
    #[from]
    Derivation(hd::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    match args.command.exec() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
