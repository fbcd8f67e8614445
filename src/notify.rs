//! トースト相当の一時通知
//!
//! 文言は画面版と同じものを使う。

use crate::error::AppError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warn,
    Error,
}

impl Severity {
    fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "✔",
            Severity::Info => "ℹ",
            Severity::Warn => "⚠",
            Severity::Error => "✖",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Notification {
    pub fn new(severity: Severity, summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn search_failed() -> Self {
        Self::new(Severity::Error, "Error", "Error al buscar archivos")
    }

    pub fn empty_selection() -> Self {
        Self::new(Severity::Warn, "Advertencia", "No hay archivos seleccionados")
    }

    pub fn download_failed() -> Self {
        Self::new(Severity::Error, "Error", "Error al descargar archivos")
    }

    pub fn missing_dates() -> Self {
        Self::new(Severity::Warn, "Campos requeridos", "Selecciona ambas fechas.")
    }

    pub fn report_downloaded() -> Self {
        Self::new(
            Severity::Success,
            "Descarga completa",
            "El archivo se descargó correctamente.",
        )
    }

    pub fn report_failed() -> Self {
        Self::new(Severity::Error, "Error de descarga", "No se pudo descargar el archivo.")
    }

    /// 検証エラーは警告、それ以外は fallback を使う
    pub fn for_error(err: &AppError, fallback: fn() -> Notification) -> Self {
        if err.is_validation() {
            Self::new(Severity::Warn, "Advertencia", err.to_string())
        } else {
            fallback()
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity.icon(), self.summary, self.detail)
    }
}
