//! DTO for the bitmap rendering endpoint.

use serde::Serialize;

use crate::domain::qr_matrix::QrMatrix;

/// Square bitmap as rows of `0`/`1` cells.
#[derive(Debug, Serialize)]
pub struct QrResponse {
    pub size: usize,
    pub matrix: QrMatrix,
}

impl From<QrMatrix> for QrResponse {
    fn from(matrix: QrMatrix) -> Self {
        Self {
            size: matrix.size(),
            matrix,
        }
    }
}
