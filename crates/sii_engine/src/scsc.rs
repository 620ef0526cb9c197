//! ScsC container: a 4-byte `ScsC` magic, 32-byte HMAC, 16-byte IV, the
//! little-endian decompressed size, then an AES-256-CBC encrypted zlib stream.
use std::io::Read;

use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecryptMut, KeyIvInit};
use flate2::read::ZlibDecoder;
use nom::bytes::complete::{tag, take};
use nom::combinator::rest;
use nom::number::complete::le_u32;
use nom::{Finish, IResult};

use crate::DecodeError;

type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

const AES_BLOCK_LEN: usize = 16;

const ENCRYPTION_KEY: [u8; 32] = [
    0x2a, 0x5f, 0xcb, 0x17, 0x91, 0xd2, 0x2f, 0xb6, 0x02, 0x45, 0xb3, 0xd8, 0x36, 0x9e, 0xd0, 0xb2,
    0xc2, 0x73, 0x71, 0x56, 0x3f, 0xbf, 0x1f, 0x3c, 0x9e, 0xdf, 0x6b, 0x11, 0x82, 0x5a, 0x5d, 0x0a,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScscFile<'a> {
    pub hmac: &'a [u8],
    pub iv: &'a [u8],
    pub decompressed_len: u32,
    pub data: &'a [u8],
}

impl<'a> ScscFile<'a> {
    pub fn parse(content: &'a [u8]) -> Result<Self, DecodeError> {
        container(content)
            .finish()
            .map(|(_, file)| file)
            .map_err(|_| DecodeError::Truncated)
    }

    /// Decrypts and inflates the payload. The HMAC is not verified.
    pub fn decrypt(&self) -> Result<Vec<u8>, DecodeError> {
        if self.data.len() % AES_BLOCK_LEN != 0 {
            return Err(DecodeError::Decrypt(format!(
                "payload length {} is not a multiple of {AES_BLOCK_LEN}",
                self.data.len()
            )));
        }
        let cipher = Aes256CbcDec::new_from_slices(&ENCRYPTION_KEY, self.iv)
            .map_err(|err| DecodeError::Decrypt(err.to_string()))?;
        let mut plain = vec![0; self.data.len()];
        cipher
            .decrypt_padded_b2b_mut::<NoPadding>(self.data, &mut plain)
            .map_err(|err| DecodeError::Decrypt(err.to_string()))?;

        let expected = u64::from(self.decompressed_len);
        let mut inflated = Vec::new();
        ZlibDecoder::new(plain.as_slice())
            .take(expected)
            .read_to_end(&mut inflated)
            .map_err(|err| DecodeError::Decompress(err.to_string()))?;
        if inflated.len() as u64 != expected {
            return Err(DecodeError::Decompress(format!(
                "expected {expected} bytes, got {}",
                inflated.len()
            )));
        }
        Ok(inflated)
    }
}

fn container(input: &[u8]) -> IResult<&[u8], ScscFile<'_>> {
    let (input, _magic) = tag("ScsC")(input)?;
    let (input, hmac) = take(32usize)(input)?;
    let (input, iv) = take(16usize)(input)?;
    let (input, decompressed_len) = le_u32(input)?;
    let (input, data) = rest(input)?;
    Ok((
        input,
        ScscFile {
            hmac,
            iv,
            decompressed_len,
            data,
        },
    ))
}
