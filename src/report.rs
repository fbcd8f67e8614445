//! 旅費Excelレポートの出力
//!
//! 検証 → ダウンロード → 保存 →（任意）calamine でシート概要を確認。
//! 成功したらフォームをリセットする。

use crate::api::ReportApi;
use crate::download;
use crate::error::Result;
use calamine::{open_workbook_from_rs, Reader, Xlsx};
use comprobantes_common::ReportForm;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// シート名と行数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
}

#[derive(Debug, Clone)]
pub struct SavedReport {
    pub path: PathBuf,
    pub size: usize,
    pub sheets: Option<Vec<SheetSummary>>,
}

/// ダウンロードしたブックの概要
pub fn summarize_workbook(bytes: &[u8]) -> Result<Vec<SheetSummary>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        sheets.push(SheetSummary {
            name,
            rows: range.height(),
        });
    }
    Ok(sheets)
}

pub struct ReportExporter<R: ReportApi> {
    api: Arc<R>,
    download_dir: PathBuf,
}

impl<R: ReportApi> ReportExporter<R> {
    pub fn new(api: Arc<R>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            api,
            download_dir: download_dir.into(),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// レポートを取得して保存
    ///
    /// 検証エラーでは通信しない。成功時のみ form をリセットする。
    pub async fn export(&self, form: &mut ReportForm, inspect: bool) -> Result<SavedReport> {
        let request = form.request()?;
        tracing::debug!(path = %request.path(), "requesting excel report");

        let bytes = self.api.excel_report(&request).await?;
        let path = download::save_bytes(&self.download_dir, &request.file_name(), &bytes)?;

        let sheets = if inspect {
            match summarize_workbook(&bytes) {
                Ok(sheets) => Some(sheets),
                Err(e) => {
                    tracing::warn!("report workbook could not be read: {}", e);
                    None
                }
            }
        } else {
            None
        };

        form.reset();
        Ok(SavedReport {
            path,
            size: bytes.len(),
            sheets,
        })
    }
}
