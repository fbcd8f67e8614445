use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] comprobantes_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("Error de red: {0}")]
    Http(#[from] reqwest::Error),

    #[error("El servidor respondió {status} para {url}")]
    Status { status: u16, url: String },

    #[error("Archivo ZIP inválido: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Libro Excel inválido: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),
}

impl AppError {
    /// 検証エラー（警告として扱い、ネットワークには出ていない）
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Common(comprobantes_common::Error::Validation(_)))
    }

    /// 通信エラー（接続失敗または2xx以外）
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. })
    }
}

impl From<comprobantes_common::ValidationError> for AppError {
    fn from(err: comprobantes_common::ValidationError) -> Self {
        Self::Common(err.into())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        Self::Common(err.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
