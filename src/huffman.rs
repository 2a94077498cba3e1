//! Canonical Huffman decode tables.
//!
//! A DHT segment describes a table compactly: the number of codes of each
//! length 1..=16 and the symbol values in code order. [`HuffmanTable::build`]
//! converts that description into a two-level lookup structure so decoding a
//! code is a single dereference for codes of up to 8 bits and a double
//! dereference for longer ones, instead of a bit-by-bit tree walk.

use crate::error::{Error, Result};

const LUT_SIZE: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HuffmanTableClass {
    DC,
    AC,
}

/// A Huffman table as transmitted in a DHT segment: the count of codes of
/// each length 1..=16 and the symbol values in canonical code order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanDescription {
    counts: [u8; 16],
    values: Vec<u8>,
}

impl HuffmanDescription {
    /// Requires `values` to hold exactly `counts.iter().sum()` symbols.
    pub fn new(counts: [u8; 16], values: Vec<u8>) -> Result<HuffmanDescription> {
        let total: usize = counts.iter().map(|&count| usize::from(count)).sum();
        if total != values.len() {
            return Err(Error::BadField(format!(
                "huffman description announces {} symbols but carries {}",
                total,
                values.len()
            )));
        }
        Ok(HuffmanDescription { counts, values })
    }

    pub fn counts(&self) -> &[u8; 16] {
        &self.counts
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HighEntry {
    /// No code covers this 8-bit prefix.
    Vacant,
    /// A code of length <= 8 is fully resolved by the first byte.
    Code { value: u8, length: u8 },
    /// Codes longer than 8 bits start with this byte; the second byte
    /// selects the entry in `low[index]`.
    Escape { index: u8 },
}

/// Two-level lookup table over a 16-bit lookahead window.
///
/// The high table is indexed by the first 8 bits and resolves every code of
/// length <= 8 directly. High bytes claimed by longer codes escape to their
/// own 256-entry low table indexed by the second 8 bits.
#[derive(Clone, Debug)]
pub struct HuffmanTable {
    high: [HighEntry; LUT_SIZE],
    // (value, length) pairs; length 0 marks a slot no code reaches.
    low: Vec<[(u8, u8); LUT_SIZE]>,
}

impl HuffmanTable {
    /// Assigns canonical codes to `description` and packs them into the
    /// two-level table.
    ///
    /// Codes of a given length are consecutive integers; moving to the next
    /// length shifts the running code left by one. Fails with
    /// [`Error::InvalidHuffmanTable`] when the counts cannot form a prefix
    /// code within 16 bits.
    pub fn build(description: &HuffmanDescription) -> Result<HuffmanTable> {
        if description.values().len() > 256 {
            return Err(Error::InvalidHuffmanTable("more than 256 symbols"));
        }

        let mut high = [HighEntry::Vacant; LUT_SIZE];
        let mut low: Vec<[(u8, u8); LUT_SIZE]> = Vec::new();

        let mut code: u32 = 0;
        let mut next_value = 0;

        for length in 1..=16usize {
            code <<= 1;
            let count = usize::from(description.counts()[length - 1]);

            for &value in &description.values()[next_value..next_value + count] {
                if code >= 1 << length {
                    return Err(Error::InvalidHuffmanTable(
                        "code counts overflow the code space",
                    ));
                }

                if length <= 8 {
                    // Replicate across every high byte whose top bits match
                    // the code, so one 8-bit read resolves it.
                    let first = (code as usize) << (8 - length);
                    let span = 1 << (8 - length);

                    for slot in &mut high[first..first + span] {
                        if *slot != HighEntry::Vacant {
                            return Err(Error::InvalidHuffmanTable(
                                "overlapping code assignment",
                            ));
                        }
                        *slot = HighEntry::Code {
                            value,
                            length: length as u8,
                        };
                    }
                } else {
                    let prefix = (code >> (length - 8)) as usize;
                    let index = match high[prefix] {
                        HighEntry::Escape { index } => usize::from(index),
                        HighEntry::Vacant => {
                            // One low table per escape byte; there can never
                            // be more than 256 of them.
                            high[prefix] = HighEntry::Escape {
                                index: low.len() as u8,
                            };
                            low.push([(0, 0); LUT_SIZE]);
                            low.len() - 1
                        }
                        HighEntry::Code { .. } => {
                            return Err(Error::InvalidHuffmanTable(
                                "overlapping code assignment",
                            ));
                        }
                    };

                    let first = ((code as usize) << (16 - length)) & 0xFF;
                    let span = 1 << (16 - length);

                    for slot in &mut low[index][first..first + span] {
                        if slot.1 != 0 {
                            return Err(Error::InvalidHuffmanTable(
                                "overlapping code assignment",
                            ));
                        }
                        *slot = (value, length as u8);
                    }
                }

                code += 1;
            }

            next_value += count;
        }

        Ok(HuffmanTable { high, low })
    }

    /// Resolves the next 16 bits of lookahead, left-justified in `bits`.
    ///
    /// Returns the decoded symbol and its code length in bits, or `None` if
    /// no assigned code matches. Callers with fewer than 16 bits remaining
    /// must pad with don't-care bits and discard any unused length.
    pub fn lookup(&self, bits: u16) -> Option<(u8, u8)> {
        match self.high[usize::from(bits >> 8)] {
            HighEntry::Code { value, length } => Some((value, length)),
            HighEntry::Escape { index } => {
                let (value, length) = self.low[usize::from(index)][usize::from(bits & 0xFF)];
                if length == 0 {
                    None
                } else {
                    Some((value, length))
                }
            }
            HighEntry::Vacant => None,
        }
    }
}
