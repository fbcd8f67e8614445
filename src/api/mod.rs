//! ファイルサーバー / レポートサーバーとの通信
//!
//! セッションやディスパッチャはトレイト越しに呼ぶので、
//! テストではプロセス内の偽実装に差し替えられる。

mod http;

pub use http::HttpClient;

use crate::error::Result;
use comprobantes_common::{Comprobante, ReportRequest};
use std::future::Future;

/// ファイル検索・ダウンロードAPI
pub trait FileApi: Send + Sync + 'static {
    /// 完全一致検索（exactMatch=true）
    fn search(&self, term: &str) -> impl Future<Output = Result<Vec<Comprobante>>> + Send;

    /// カンマ区切りのファイル名をまとめてZIPで取得
    fn download_multiple(&self, filenames: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;

    /// プレビュー用の文書本体
    fn preview(&self, resource_path: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Excelレポート API
pub trait ReportApi: Send + Sync + 'static {
    fn excel_report(&self, request: &ReportRequest) -> impl Future<Output = Result<Vec<u8>>> + Send;
}
