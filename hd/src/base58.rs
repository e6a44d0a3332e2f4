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

//! Base58check encoding of extended key payloads.
//!
//! Checksum is the first four bytes of double SHA256 of the payload; the
//! alphabet is the Bitcoin one. Decoder failures are mapped onto [`Error`].

use bitcoin::util::base58;
use zeroize::Zeroizing;

use crate::Error;

/// Length of the base58check checksum, in bytes
pub const CHECKSUM_LEN: usize = 4;

impl From<base58::Error> for Error {
    fn from(err: base58::Error) -> Self {
        match err {
            base58::Error::BadChecksum(..) => Error::InvalidChecksum,
            base58::Error::TooShort(len) | base58::Error::InvalidLength(len) => {
                Error::InvalidLength(len)
            }
            _ => Error::InvalidBase58,
        }
    }
}

/// Encodes payload appending four bytes of checksum
#[inline]
pub fn encode_check(payload: &[u8]) -> String { base58::check_encode_slice(payload) }

/// Decodes base58 string verifying and stripping its checksum. The returned
/// payload buffer is wiped on drop.
pub fn decode_check(s: &str) -> Result<Zeroizing<Vec<u8>>, Error> {
    base58::from_check(s).map(Zeroizing::new).map_err(Error::from)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip() {
        let payload = b"extended key payload".to_vec();
        let encoded = encode_check(&payload);
        assert_eq!(*decode_check(&encoded).unwrap(), payload);
        assert_eq!(*decode_check(&encode_check(&[])).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn known_encoding() {
        // version byte 0x00 followed by hash160 of an address
        assert_eq!(
            encode_check(&[
                0x00, 0x62, 0xe9, 0x07, 0xb1, 0x5c, 0xbf, 0x27, 0xd5, 0x42, 0x53, 0x99, 0xeb, 0xf6,
                0xf0, 0xfb, 0x50, 0xeb, 0xb8, 0x8f, 0x18
            ]),
            "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"
        );
    }

    #[test]
    fn decoder_errors() {
        assert_eq!(
            decode_check("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNb").unwrap_err(),
            Error::InvalidChecksum
        );
        assert_eq!(decode_check("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfN0").unwrap_err(), Error::InvalidBase58);
        assert_eq!(decode_check("0OIl").unwrap_err(), Error::InvalidBase58);
        assert_eq!(decode_check("1").unwrap_err(), Error::InvalidLength(1));
    }
}
