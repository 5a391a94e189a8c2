//! Fixed prefix-free code for move ranks.
//!
//! Rank 0 is the move the ranker considers most natural, and the code lengths
//! never decrease with rank. The table was built once from move statistics of
//! a large game corpus and has to stay bit-for-bit identical, otherwise
//! previously packed games can no longer be read.

use bit_vec::BitVec;

use crate::error::CodecError;

/// A single codeword, right-aligned in `bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub bits: u32,
    pub len: u8,
}

impl Code {
    const fn new(bits: u32, len: u8) -> Self {
        Code { bits, len }
    }

    /// Appends the codeword to `buffer`, most significant bit first.
    pub fn write(&self, buffer: &mut BitVec) {
        for shift in (0..self.len).rev() {
            buffer.push((self.bits >> shift) & 1 == 1);
        }
    }

    pub fn to_bit_string(&self) -> String {
        format!("{:0width$b}", self.bits, width = self.len as usize)
    }
}

pub const MAX_CODE_LEN: u8 = 31;

/// Looks up the code for `rank`.
pub fn code_for(rank: usize) -> Result<Code, CodecError> {
    CODES
        .get(rank)
        .copied()
        .ok_or(CodecError::RankOutOfRange(rank))
}

pub fn write_rank(buffer: &mut BitVec, rank: usize) -> Result<Code, CodecError> {
    let code = code_for(rank)?;
    code.write(buffer);
    Ok(code)
}

/// Reads one codeword from `bits` and returns its rank.
///
/// Consumes exactly the bits of the matched codeword.
pub fn read_rank<I>(bits: &mut I) -> Result<usize, CodecError>
where
    I: Iterator<Item = bool>,
{
    let mut acc = 0u32;
    for len in 1..=MAX_CODE_LEN {
        let bit = bits.next().ok_or(CodecError::UnexpectedEndOfStream)?;
        acc = (acc << 1) | bit as u32;
        if let Some(rank) = lookup(acc, len) {
            return Ok(rank);
        }
    }
    Err(CodecError::CorruptStream)
}

fn lookup(bits: u32, len: u8) -> Option<usize> {
    // Lengths are sorted, so all codes of one length form a contiguous run.
    let start = CODES.partition_point(|code| code.len < len);
    CODES[start..]
        .iter()
        .take_while(|code| code.len == len)
        .position(|code| code.bits == bits)
        .map(|offset| start + offset)
}

#[rustfmt::skip]
pub static CODES: [Code; 256] = [
    Code::new(0b00, 2),
    Code::new(0b100, 3),
    Code::new(0b1101, 4),
    Code::new(0b1010, 4),
    Code::new(0b0101, 4),
    Code::new(0b11101, 5),
    Code::new(0b10111, 5),
    Code::new(0b01110, 5),
    Code::new(0b01100, 5),
    Code::new(0b01000, 5),
    Code::new(0b111101, 6),
    Code::new(0b111001, 6),
    Code::new(0b111100, 6),
    Code::new(0b110011, 6),
    Code::new(0b110010, 6),
    Code::new(0b110000, 6),
    Code::new(0b101101, 6),
    Code::new(0b101100, 6),
    Code::new(0b011111, 6),
    Code::new(0b011011, 6),
    Code::new(0b010011, 6),
    Code::new(0b011010, 6),
    Code::new(0b1111111, 7),
    Code::new(0b1111101, 7),
    Code::new(0b1111110, 7),
    Code::new(0b1111100, 7),
    Code::new(0b1110000, 7),
    Code::new(0b1100011, 7),
    Code::new(0b0111101, 7),
    Code::new(0b0100101, 7),
    Code::new(0b0100100, 7),
    Code::new(0b11100010, 8),
    Code::new(0b11000101, 8),
    Code::new(0b01111001, 8),
    Code::new(0b111000111, 9),
    Code::new(0b110001001, 9),
    Code::new(0b011110001, 9),
    Code::new(0b011110000, 9),
    Code::new(0b1110001100, 10),
    Code::new(0b1100010000, 10),
    Code::new(0b11100011010, 11),
    Code::new(0b11000100010, 11),
    Code::new(0b111000110110, 12),
    Code::new(0b110001000110, 12),
    Code::new(0b1110001101110, 13),
    Code::new(0b1100010001110, 13),
    Code::new(0b11100011011110, 14),
    Code::new(0b11000100011110, 14),
    Code::new(0b111000110111110, 15),
    Code::new(0b110001000111110, 15),
    Code::new(0b1110001101111110, 16),
    Code::new(0b1100010001111110, 16),
    Code::new(0b11000100011111111, 17),
    Code::new(0b111000110111111111, 18),
    Code::new(0b111000110111111101, 18),
    Code::new(0b110001000111111100, 18),
    Code::new(0b1110001101111111100, 19),
    Code::new(0b1100010001111111011, 19),
    Code::new(0b11100011011111111011, 20),
    Code::new(0b11100011011111110010, 20),
    Code::new(0b11100011011111110000, 20),
    Code::new(0b111000110111111110101, 21),
    Code::new(0b111000110111111100110, 21),
    Code::new(0b111000110111111100010, 21),
    Code::new(0b110001000111111101001, 21),
    Code::new(0b110001000111111101000, 21),
    Code::new(0b1110001101111111101000, 22),
    Code::new(0b1110001101111111000110, 22),
    Code::new(0b1100010001111111010111, 22),
    Code::new(0b1100010001111111010101, 22),
    Code::new(0b11100011011111111010011, 23),
    Code::new(0b11100011011111110011110, 23),
    Code::new(0b11100011011111110001110, 23),
    Code::new(0b11100011011111110001111, 23),
    Code::new(0b11000100011111110101100, 23),
    Code::new(0b111000110111111100111011, 24),
    Code::new(0b111000110111111110100100, 24),
    Code::new(0b111000110111111100111111, 24),
    Code::new(0b111000110111111100111010, 24),
    Code::new(0b110001000111111101011011, 24),
    Code::new(0b110001000111111101010011, 24),
    Code::new(0b110001000111111101010001, 24),
    Code::new(0b1110001101111111001110011, 25),
    Code::new(0b1110001101111111001110001, 25),
    Code::new(0b1110001101111111001110010, 25),
    Code::new(0b1100010001111111010100101, 25),
    Code::new(0b1100010001111111010110100, 25),
    Code::new(0b1100010001111111010100001, 25),
    Code::new(0b11100011011111110011111011, 26),
    Code::new(0b11100011011111110011111001, 26),
    Code::new(0b11100011011111110011111010, 26),
    Code::new(0b11100011011111110011111000, 26),
    Code::new(0b11000100011111110101101011, 26),
    Code::new(0b111000110111111110100101111, 27),
    Code::new(0b110001000111111101011010100, 27),
    Code::new(0b110001000111111101011010101, 27),
    Code::new(0b111000110111111100111000010, 27),
    Code::new(0b111000110111111100111000011, 27),
    Code::new(0b110001000111111101010010011, 27),
    Code::new(0b1110001101111111101001010011, 28),
    Code::new(0b1100010001111111010100100101, 28),
    Code::new(0b1110001101111111001110000011, 28),
    Code::new(0b1110001101111111001110000010, 28),
    Code::new(0b1110001101111111001110000000, 28),
    Code::new(0b11100011011111110011100000010, 29),
    Code::new(0b11000100011111110101000001001, 29),
    Code::new(0b11100011011111110011100000011, 29),
    Code::new(0b11000100011111110101000001000, 29),
    Code::new(0b11000100011111110101000000011, 29),
    Code::new(0b110001000111111101010000011110, 30),
    Code::new(0b111000110111111110100101100110, 30),
    Code::new(0b111000110111111110100101010111, 30),
    Code::new(0b110001000111111101010000001101, 30),
    Code::new(0b111000110111111110100101100010, 30),
    Code::new(0b110001000111111101010000001000, 30),
    Code::new(0b110001000111111101010000000101, 30),
    Code::new(0b110001000111111101010000000000, 30),
    Code::new(0b110001000111111101010000001010, 30),
    Code::new(0b110001000111111101010010001101, 30),
    Code::new(0b110001000111111101010010010011, 30),
    Code::new(0b110001000111111101010010010010, 30),
    Code::new(0b110001000111111101010010010001, 30),
    Code::new(0b110001000111111101010010010000, 30),
    Code::new(0b110001000111111101010010001011, 30),
    Code::new(0b110001000111111101010010001010, 30),
    Code::new(0b110001000111111101010010001001, 30),
    Code::new(0b110001000111111101010010001000, 30),
    Code::new(0b110001000111111101010010000111, 30),
    Code::new(0b110001000111111101010010000110, 30),
    Code::new(0b110001000111111101010010000011, 30),
    Code::new(0b110001000111111101010010000010, 30),
    Code::new(0b110001000111111101010000011011, 30),
    Code::new(0b110001000111111101010000011010, 30),
    Code::new(0b110001000111111101010000011001, 30),
    Code::new(0b110001000111111101010000011000, 30),
    Code::new(0b110001000111111101010000010101, 30),
    Code::new(0b110001000111111101010000010100, 30),
    Code::new(0b110001000111111101010010000101, 30),
    Code::new(0b110001000111111101010010000100, 30),
    Code::new(0b110001000111111101010000011111, 30),
    Code::new(0b110001000111111101010000011101, 30),
    Code::new(0b110001000111111101010000011100, 30),
    Code::new(0b110001000111111101010010000001, 30),
    Code::new(0b110001000111111101010010000000, 30),
    Code::new(0b110001000111111101010000001111, 30),
    Code::new(0b110001000111111101010000001110, 30),
    Code::new(0b110001000111111101010000001100, 30),
    Code::new(0b110001000111111101010000010111, 30),
    Code::new(0b110001000111111101010000010110, 30),
    Code::new(0b110001000111111101010000001001, 30),
    Code::new(0b110001000111111101010000000100, 30),
    Code::new(0b110001000111111101010000000011, 30),
    Code::new(0b110001000111111101010000000010, 30),
    Code::new(0b110001000111111101010000000001, 30),
    Code::new(0b110001000111111101010000001011, 30),
    Code::new(0b110001000111111101010010001111, 30),
    Code::new(0b110001000111111101010010001110, 30),
    Code::new(0b110001000111111101010010001100, 30),
    Code::new(0b1110001101111111101001010111101, 31),
    Code::new(0b1110001101111111101001010111111, 31),
    Code::new(0b1110001101111111101001010100010, 31),
    Code::new(0b1110001101111111101001011011111, 31),
    Code::new(0b1110001101111111101001010100100, 31),
    Code::new(0b1110001101111111101001010111001, 31),
    Code::new(0b1110001101111111101001011011010, 31),
    Code::new(0b1110001101111111101001011010010, 31),
    Code::new(0b1110001101111111101001011010000, 31),
    Code::new(0b1110001101111111101001010111010, 31),
    Code::new(0b1110001101111111101001010001011, 31),
    Code::new(0b1110001101111111101001010001010, 31),
    Code::new(0b1110001101111111101001010001001, 31),
    Code::new(0b1110001101111111101001010001000, 31),
    Code::new(0b1110001101111111101001010000111, 31),
    Code::new(0b1110001101111111101001010000110, 31),
    Code::new(0b1110001101111111101001010000101, 31),
    Code::new(0b1110001101111111101001010000100, 31),
    Code::new(0b1110001101111111101001011010111, 31),
    Code::new(0b1110001101111111101001011010110, 31),
    Code::new(0b1110001101111111101001011010101, 31),
    Code::new(0b1110001101111111101001011010100, 31),
    Code::new(0b1110001101111111101001010110111, 31),
    Code::new(0b1110001101111111101001010110110, 31),
    Code::new(0b1110001101111111101001010010101, 31),
    Code::new(0b1110001101111111101001010010100, 31),
    Code::new(0b1110001101111111101001010110101, 31),
    Code::new(0b1110001101111111101001010110100, 31),
    Code::new(0b1110001101111111101001010010111, 31),
    Code::new(0b1110001101111111101001010010110, 31),
    Code::new(0b1110001101111111101001010110001, 31),
    Code::new(0b1110001101111111101001010110000, 31),
    Code::new(0b1110001101111111101001010010011, 31),
    Code::new(0b1110001101111111101001010010010, 31),
    Code::new(0b1110001101111111101001011101101, 31),
    Code::new(0b1110001101111111101001011101100, 31),
    Code::new(0b1110001101111111101001011101011, 31),
    Code::new(0b1110001101111111101001011101010, 31),
    Code::new(0b1110001101111111101001011100111, 31),
    Code::new(0b1110001101111111101001011100110, 31),
    Code::new(0b1110001101111111101001010010001, 31),
    Code::new(0b1110001101111111101001010010000, 31),
    Code::new(0b1110001101111111101001011100011, 31),
    Code::new(0b1110001101111111101001011100010, 31),
    Code::new(0b1110001101111111101001011100001, 31),
    Code::new(0b1110001101111111101001011100000, 31),
    Code::new(0b1110001101111111101001011101001, 31),
    Code::new(0b1110001101111111101001011101000, 31),
    Code::new(0b1110001101111111101001010001111, 31),
    Code::new(0b1110001101111111101001010001110, 31),
    Code::new(0b1110001101111111101001010000011, 31),
    Code::new(0b1110001101111111101001010000010, 31),
    Code::new(0b1110001101111111101001010001101, 31),
    Code::new(0b1110001101111111101001010001100, 31),
    Code::new(0b1110001101111111101001011001111, 31),
    Code::new(0b1110001101111111101001011001110, 31),
    Code::new(0b1110001101111111101001010000001, 31),
    Code::new(0b1110001101111111101001010000000, 31),
    Code::new(0b1110001101111111101001011011001, 31),
    Code::new(0b1110001101111111101001011011000, 31),
    Code::new(0b1110001101111111101001011100101, 31),
    Code::new(0b1110001101111111101001011100100, 31),
    Code::new(0b1110001101111111101001010101101, 31),
    Code::new(0b1110001101111111101001010101100, 31),
    Code::new(0b1110001101111111101001010110011, 31),
    Code::new(0b1110001101111111101001010110010, 31),
    Code::new(0b1110001101111111101001010101001, 31),
    Code::new(0b1110001101111111101001010101000, 31),
    Code::new(0b1110001101111111101001011101111, 31),
    Code::new(0b1110001101111111101001011101110, 31),
    Code::new(0b1110001101111111101001011001011, 31),
    Code::new(0b1110001101111111101001011001010, 31),
    Code::new(0b1110001101111111101001011000011, 31),
    Code::new(0b1110001101111111101001011000010, 31),
    Code::new(0b1110001101111111101001010101011, 31),
    Code::new(0b1110001101111111101001010101010, 31),
    Code::new(0b1110001101111111101001011001001, 31),
    Code::new(0b1110001101111111101001011001000, 31),
    Code::new(0b1110001101111111101001011000111, 31),
    Code::new(0b1110001101111111101001011000110, 31),
    Code::new(0b1110001101111111101001011000001, 31),
    Code::new(0b1110001101111111101001011000000, 31),
    Code::new(0b1110001101111111101001010111100, 31),
    Code::new(0b1110001101111111101001010100111, 31),
    Code::new(0b1110001101111111101001010100110, 31),
    Code::new(0b1110001101111111101001010111110, 31),
    Code::new(0b1110001101111111101001010100011, 31),
    Code::new(0b1110001101111111101001010100001, 31),
    Code::new(0b1110001101111111101001010100000, 31),
    Code::new(0b1110001101111111101001011011110, 31),
    Code::new(0b1110001101111111101001010100101, 31),
    Code::new(0b1110001101111111101001011011101, 31),
    Code::new(0b1110001101111111101001011011100, 31),
    Code::new(0b1110001101111111101001010111000, 31),
    Code::new(0b1110001101111111101001011011011, 31),
    Code::new(0b1110001101111111101001011010001, 31),
    Code::new(0b1110001101111111101001011010011, 31),
    Code::new(0b1110001101111111101001010111011, 31),
];
