//! エラー型定義

use thiserror::Error;

/// 入力検証エラー
///
/// 操作をその場でブロックし、警告として通知する種類のエラー。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Ingrese al menos {min} caracteres")]
    QueryTooShort { min: usize },

    #[error("No hay archivos seleccionados")]
    EmptySelection,

    #[error("Selecciona ambas fechas.")]
    MissingDates,

    #[error("La fecha de inicio ({start}) es posterior a la fecha fin ({end})")]
    InvalidDateRange { start: String, end: String },

    #[error("Fecha inválida (se espera AAAA-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Folio desconocido: {0}")]
    UnknownFolio(String),
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
