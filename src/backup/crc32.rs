//! CRC-32 checksum
//!
//! The standard reflected CRC-32 used by the ZIP format: table-driven,
//! all-ones initial value, complemented final value. Archive consumers
//! verify entries against this checksum, so it must agree bit-exactly
//! with theirs.

const POLYNOMIAL: u32 = 0xEDB8_8320;

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut c = i as u32;
        let mut bit = 0;
        while bit < 8 {
            c = if c & 1 == 1 {
                POLYNOMIAL ^ (c >> 1)
            } else {
                c >> 1
            };
            bit += 1;
        }
        table[i] = c;
        i += 1;
    }
    table
}

static CRC_TABLE: [u32; 256] = build_table();

/// CRC-32 of a byte sequence; the empty sequence checksums to 0
pub fn crc32(data: &[u8]) -> u32 {
    let mut c = u32::MAX;
    for &byte in data {
        c = CRC_TABLE[((c ^ byte as u32) & 0xFF) as usize] ^ (c >> 8);
    }
    c ^ u32::MAX
}
