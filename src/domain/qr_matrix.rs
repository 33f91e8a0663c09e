//! Deterministic 29x29 bitmap that visually encodes a URL.
//!
//! **Not a standards-compliant QR code.** There is no error correction, no
//! format or version information and no masking, so phone scanners will not
//! read it. The only guarantee is reproducibility: the same URL always
//! produces the same matrix.
//!
//! # Layout
//!
//! - Three 7x7 finder blocks sit in the top-left, top-right and bottom-left
//!   corners: a one-cell square outline around a filled 3x3 core.
//! - Every other cell, in row-major order, takes the next bit of the URL's
//!   UTF-8 bytes, most-significant bit first.
//! - Once the bits run out the remaining cells stay 0. URLs longer than the
//!   data area (86 full bytes) are truncated, so two URLs sharing that
//!   prefix render identically.

use serde::Serialize;

/// Matrix side length.
pub const QR_SIZE: usize = 29;

/// Finder block side length.
pub const FINDER_SIZE: usize = 7;

/// Number of cells available for URL bits.
pub const DATA_CAPACITY_BITS: usize = QR_SIZE * QR_SIZE - 3 * FINDER_SIZE * FINDER_SIZE;

/// Square grid of cells, `true` meaning filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    cells: [[bool; QR_SIZE]; QR_SIZE],
}

impl QrMatrix {
    pub fn size(&self) -> usize {
        QR_SIZE
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; QR_SIZE]> {
        self.cells.iter()
    }

    /// Rows as 0/1 integers, the shape clients render from.
    pub fn to_bit_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|&cell| u8::from(cell)).collect())
            .collect()
    }
}

impl Serialize for QrMatrix {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_bit_rows().serialize(serializer)
    }
}

/// Whether `(row, col)` lies inside one of the three finder blocks.
pub fn is_reserved(row: usize, col: usize) -> bool {
    let top = row < FINDER_SIZE;
    let bottom = row >= QR_SIZE - FINDER_SIZE;
    let left = col < FINDER_SIZE;
    let right = col >= QR_SIZE - FINDER_SIZE;

    (top && (left || right)) || (bottom && left)
}

fn finder_cell(r: usize, c: usize) -> bool {
    let outline = r == 0 || r == FINDER_SIZE - 1 || c == 0 || c == FINDER_SIZE - 1;
    let core = (2..=4).contains(&r) && (2..=4).contains(&c);
    outline || core
}

fn draw_finder(cells: &mut [[bool; QR_SIZE]; QR_SIZE], top: usize, left: usize) {
    for r in 0..FINDER_SIZE {
        for c in 0..FINDER_SIZE {
            cells[top + r][left + c] = finder_cell(r, c);
        }
    }
}

/// Renders `url` into a [`QrMatrix`].
pub fn synthesize(url: &str) -> QrMatrix {
    let mut cells = [[false; QR_SIZE]; QR_SIZE];

    draw_finder(&mut cells, 0, 0);
    draw_finder(&mut cells, 0, QR_SIZE - FINDER_SIZE);
    draw_finder(&mut cells, QR_SIZE - FINDER_SIZE, 0);

    let mut bits = url
        .bytes()
        .flat_map(|byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1));

    'fill: for (row, cells_row) in cells.iter_mut().enumerate() {
        for (col, cell) in cells_row.iter_mut().enumerate() {
            if is_reserved(row, col) {
                continue;
            }
            match bits.next() {
                Some(bit) => *cell = bit,
                None => break 'fill,
            }
        }
    }

    QrMatrix { cells }
}
