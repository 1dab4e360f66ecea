// Byte-level primitives shared by both automaton variants.
//
// Arc buffers are stored as `u8`, but the v-int continuation test is defined
// on the signed interpretation of each byte (continuation <=> negative).

/// Reinterpret an arc buffer as signed bytes.
#[inline]
pub fn as_signed(bytes: &[u8]) -> &[i8] {
    bytemuck::cast_slice(bytes)
}

/// Decode a v-int starting at `offset`.
///
/// Each byte contributes its low 7 bits, least-significant group first.
/// Decoding continues while the byte, read as `i8`, is negative.
#[inline]
pub fn read_v_int(bytes: &[u8], offset: usize) -> usize {
    let signed = as_signed(bytes);
    let mut pos = offset;
    let mut b = signed[pos];
    let mut value = (b & 0x7F) as usize;
    let mut shift = 7u32;
    while b < 0 {
        pos += 1;
        b = signed[pos];
        value |= ((b & 0x7F) as usize).checked_shl(shift).unwrap_or(0);
        shift += 7;
    }
    value
}

/// Return the offset just past the v-int starting at `offset`.
#[inline]
pub fn skip_v_int(bytes: &[u8], offset: usize) -> usize {
    let signed = as_signed(bytes);
    let mut pos = offset;
    while signed[pos] < 0 {
        pos += 1;
    }
    pos + 1
}

/// Append `value` as a v-int.
pub fn write_v_int(mut value: usize, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Decode a `width`-byte little-endian unsigned integer at `offset`.
#[inline]
pub fn read_le(bytes: &[u8], offset: usize, width: usize) -> usize {
    bytes[offset..offset + width]
        .iter()
        .rev()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize)
}
