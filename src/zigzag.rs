//! Zigzag-to-natural order tables.
//!
//! Quantization tables are transmitted in zigzag scan order; consumers want
//! them in natural (row-major) order. `natural_order(dim)[i]` is the natural
//! position of the entry at zigzag position `i` for a `dim`×`dim` block.

use std::borrow::Cow;

// The 8x8 table, the only dimension baseline JPEG actually uses.
static UNZIGZAG_8X8: [u8; 64] = [
     0,  1,  8, 16,  9,  2,  3, 10,
    17, 24, 32, 25, 18, 11,  4,  5,
    12, 19, 26, 33, 40, 48, 41, 34,
    27, 20, 13,  6,  7, 14, 21, 28,
    35, 42, 49, 56, 57, 50, 43, 36,
    29, 22, 15, 23, 30, 37, 44, 51,
    58, 59, 52, 45, 38, 31, 39, 46,
    53, 60, 61, 54, 47, 55, 62, 63,
];

/// Returns the zigzag-to-natural mapping for a `dim`×`dim` block, or `None`
/// for dimensions outside 2..=8.
pub(crate) fn natural_order(dim: usize) -> Option<Cow<'static, [u8]>> {
    match dim {
        8 => Some(Cow::Borrowed(&UNZIGZAG_8X8[..])),
        2..=7 => Some(Cow::Owned(scan_order(dim))),
        _ => None,
    }
}

/// Walks the diagonals of a `dim`×`dim` block in zigzag order, recording the
/// row-major position of each step.
fn scan_order(dim: usize) -> Vec<u8> {
    let mut order = Vec::with_capacity(dim * dim);
    let mut row = 0;
    let mut col = 0;
    let mut ascending = true;

    for _ in 0..dim * dim {
        order.push((row * dim + col) as u8);

        if ascending {
            if col + 1 == dim {
                row += 1;
                ascending = false;
            } else if row == 0 {
                col += 1;
                ascending = false;
            } else {
                row -= 1;
                col += 1;
            }
        } else if row + 1 == dim {
            col += 1;
            ascending = true;
        } else if col == 0 {
            row += 1;
            ascending = true;
        } else {
            row += 1;
            col -= 1;
        }
    }

    order
}
