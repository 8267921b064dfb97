//! 평탄화된 2차원 결과를 CSV로 내보낸다.
//!
//! 각 행은 `width`개의 값 뒤에 구분자(`,`)를 하나 더 붙여 끝난다. 기존 결과 파일과
//! 바이트 단위로 같은 형식을 유지하기 위한 규칙이다.

use std::fs;
use std::io;
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use thiserror::Error;
use tracing::info;

/// 내보내기 중 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum ExportError {
    /// 선언한 폭×길이와 데이터 개수가 다름
    #[error("행렬 크기 불일치: {width}×{length} 선언, 값 {values}개")]
    Shape {
        width: usize,
        length: usize,
        values: usize,
    },
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] io::Error),
    #[error("CSV 기록 오류: {0}")]
    Csv(#[from] csv::Error),
}

/// 행 우선으로 평탄화된 결과 행렬.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultMatrix {
    width: usize,
    length: usize,
    values: Vec<f64>,
}

impl ResultMatrix {
    /// 선언된 폭(열 수)과 길이(행 수)로 행렬을 만든다.
    ///
    /// 폭이 0이면 길이와 무관하게 값이 비어 있어야 한다. 그런 행렬은 행을 기록하지 않는다.
    pub fn new(width: usize, length: usize, values: Vec<f64>) -> Result<Self, ExportError> {
        if width.checked_mul(length) != Some(values.len()) {
            return Err(ExportError::Shape {
                width,
                length,
                values: values.len(),
            });
        }
        Ok(Self::from_parts(width, length, values))
    }

    /// 크기가 이미 맞춰진 행 우선 데이터.
    pub(crate) fn from_parts(width: usize, length: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(width.checked_mul(length), Some(values.len()));
        Self {
            width,
            length,
            values,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row < self.length && column < self.width {
            self.values.get(column + self.width * row).copied()
        } else {
            None
        }
    }

    /// 기록할 행. 폭이 0이면 비어 있다.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.width.max(1)).take(self.length)
    }
}

/// 행렬을 CSV 형식으로 `writer`에 기록한다.
pub fn to_writer<W: io::Write>(matrix: &ResultMatrix, writer: W) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    for row in matrix.rows() {
        // 빈 마지막 필드가 행 끝의 구분자를 만든다.
        let record = row
            .iter()
            .map(|v| v.to_string())
            .chain(std::iter::once(String::new()));
        wtr.write_record(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// 행렬을 `path`에 CSV 파일로 기록한다. 상위 디렉터리가 없으면 만든다.
pub fn write_matrix(matrix: &ResultMatrix, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    to_writer(matrix, io::BufWriter::new(file))?;
    info!(path = %path.display(), rows = matrix.length(), columns = matrix.width(), "결과 파일 기록 완료");
    Ok(())
}
