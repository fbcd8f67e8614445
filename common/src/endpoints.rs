//! REST エンドポイントのURL組み立て
//!
//! - GET {api}/api/files?search=<term>&exactMatch=true
//! - GET {api}/api/files/download-multiple?filenames=<a,b,...>
//! - GET {api}/api/files/preview/<url>
//! - GET {report}/viaticos/reporte-excel/<inicio>/<fin>/<folio>

use crate::error::Result;
use crate::report::ReportRequest;
use crate::types::Comprobante;
use url::{form_urlencoded, Url};

/// 一括ダウンロードの保存名
pub const DOWNLOAD_ARCHIVE_NAME: &str = "archivos_seleccionados.zip";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REPORT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: String,
    report_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, DEFAULT_REPORT_BASE_URL)
    }
}

impl Endpoints {
    pub fn new(api_base: &str, report_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            report_base: report_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn report_base(&self) -> &str {
        &self.report_base
    }

    /// 完全一致検索のURL
    pub fn search_url(&self, term: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/api/files", self.api_base))?;
        url.query_pairs_mut()
            .append_pair("search", term)
            .append_pair("exactMatch", "true");
        Ok(url)
    }

    /// 一括ダウンロードのURL
    ///
    /// filenames はカンマ区切りのまま送る（カンマはエスケープしない）。
    pub fn download_multiple_url(&self, filenames: &str) -> Result<Url> {
        let encoded = form_urlencoded::byte_serialize(filenames.as_bytes())
            .collect::<String>()
            .replace("%2C", ",");
        let url = Url::parse(&format!(
            "{}/api/files/download-multiple?filenames={}",
            self.api_base, encoded
        ))?;
        Ok(url)
    }

    /// 埋め込みビューアに渡すプレビューURL
    pub fn preview_url(&self, resource_path: &str) -> String {
        format!("{}/api/files/preview/{}", self.api_base, resource_path)
    }

    /// Excelレポートのダウンロード URL（folio が空なら全件）
    pub fn report_url(&self, request: &ReportRequest) -> String {
        format!("{}/{}", self.report_base, request.path())
    }
}

/// 選択された項目の resource_path をカンマで連結
pub fn join_filenames<'a>(items: impl IntoIterator<Item = &'a Comprobante>) -> String {
    items
        .into_iter()
        .map(|item| item.resource_path.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
