// Affix decoding: rebuild a base form from the inflected word and an entry.
//
// Truncation counts are stored as `count + 'A'` (mod 256), so `A` means
// "keep everything".

use morfo_core::AffixEncoding;

use crate::DictionaryError;

/// Byte value encoding a truncation count of zero.
pub const TRUNCATION_BASE: u8 = b'A';

/// Reserved count meaning "remove the entire source word".
pub const REMOVE_ALL: usize = 255;

/// Decode one truncation byte.
#[inline]
pub fn truncation(byte: u8) -> Result<usize, DictionaryError> {
    let count = byte.wrapping_sub(TRUNCATION_BASE) as usize;
    if count == REMOVE_ALL {
        return Err(DictionaryError::UnsupportedTruncation);
    }
    Ok(count)
}

/// Decode `encoded` against `source` into `out` (cleared first).
///
/// - `Suffix`: `source` minus its last `t` bytes, then the literal bytes.
/// - `Prefix`: `source` minus its first `p` and last `t` bytes, then the literal bytes.
/// - `None`: the entry itself.
pub fn decode(
    encoding: AffixEncoding,
    source: &[u8],
    encoded: &[u8],
    out: &mut Vec<u8>,
) -> Result<(), DictionaryError> {
    out.clear();
    if encoded.len() < encoding.header_len() {
        return Err(DictionaryError::MalformedEntry(
            "entry shorter than its truncation header",
        ));
    }
    let (head, literal) = encoded.split_at(encoding.header_len());

    match encoding {
        AffixEncoding::Suffix => {
            let end = keep_until(source, truncation(head[0])?)?;
            out.extend_from_slice(&source[..end]);
        }
        AffixEncoding::Prefix => {
            let start = truncation(head[0])?;
            let end = keep_until(source, truncation(head[1])?)?;
            if start > end {
                return Err(DictionaryError::MalformedEntry(
                    "prefix and suffix truncation overlap",
                ));
            }
            out.extend_from_slice(&source[start..end]);
        }
        AffixEncoding::None => {}
    }
    out.extend_from_slice(literal);
    Ok(())
}

fn keep_until(source: &[u8], truncate: usize) -> Result<usize, DictionaryError> {
    source
        .len()
        .checked_sub(truncate)
        .ok_or(DictionaryError::MalformedEntry("truncation exceeds word length"))
}
