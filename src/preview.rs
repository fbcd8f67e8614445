//! 文書プレビューの読み込み
//!
//! 画面版では埋め込みビューアが担当する部分。ここでは本体を取得して
//! PDFとして読めるかを判定し、PreviewState を Ready / Error に進める。

use crate::api::FileApi;
use crate::download;
use crate::error::Result;
use comprobantes_common::{fallback_file_name, PreviewState, LOAD_ERROR_MESSAGE};
use std::path::{Path, PathBuf};

/// 読み込み済みのプレビュー
#[derive(Debug, Clone)]
pub struct PreviewDocument {
    pub url: String,
    pub resource_path: String,
    pub state: PreviewState,
    bytes: Option<Vec<u8>>,
}

impl PreviewDocument {
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// 「代わりにダウンロード」の保存名
    pub fn fallback_file_name(&self) -> String {
        fallback_file_name(&self.url)
    }
}

/// PDFとして読み込んでページ数を数える
///
/// オブジェクトストリーム内のページも数える。読めなければ None。
pub fn count_pdf_pages(bytes: &[u8]) -> Option<u32> {
    match lopdf::Document::load_mem(bytes) {
        Ok(document) => Some(document.get_pages().len() as u32),
        Err(e) => {
            tracing::debug!("not a readable PDF: {}", e);
            None
        }
    }
}

/// プレビューを取得して状態を決める
///
/// 通信エラーもビューア内のエラー表示として扱う（セッションは継続）。
pub async fn load_preview<A: FileApi>(api: &A, url: String, resource_path: &str) -> PreviewDocument {
    let mut state = PreviewState::new();
    let bytes = match api.preview(resource_path).await {
        Ok(bytes) => {
            match count_pdf_pages(&bytes) {
                Some(pages) => {
                    state.load_succeeded(pages);
                }
                None => {
                    tracing::warn!(%url, "preview is not a PDF document");
                    state.load_failed(LOAD_ERROR_MESSAGE);
                }
            }
            Some(bytes)
        }
        Err(e) => {
            tracing::warn!(%url, "preview load failed: {}", e);
            state.load_failed(LOAD_ERROR_MESSAGE);
            None
        }
    };

    PreviewDocument {
        url,
        resource_path: resource_path.to_string(),
        state,
        bytes,
    }
}

/// 表示できない文書を代わりに保存する
///
/// 取得済みのバイト列があればそれを使い、なければ再取得する。
pub async fn download_instead<A: FileApi>(
    api: &A,
    document: &PreviewDocument,
    dir: &Path,
) -> Result<PathBuf> {
    let file_name = document.fallback_file_name();
    match document.bytes() {
        Some(bytes) => download::save_bytes(dir, &file_name, bytes),
        None => {
            let bytes = api.preview(&document.resource_path).await?;
            download::save_bytes(dir, &file_name, &bytes)
        }
    }
}
