//! プレビューURLの解決と選択ファイルの一括ダウンロード
//!
//! 一括ダウンロードは成功・失敗にかかわらず選択セットを変更しない。

use crate::api::FileApi;
use crate::archive;
use crate::download;
use crate::error::Result;
use crate::preview::{self, PreviewDocument};
use comprobantes_common::{join_filenames, Comprobante, Endpoints, ValidationError, DOWNLOAD_ARCHIVE_NAME};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 保存したZIP
#[derive(Debug, Clone)]
pub struct SavedArchive {
    pub path: PathBuf,
    pub size: usize,
    /// ZIPとして読めなかった場合は空
    pub entries: Vec<String>,
}

pub struct Dispatcher<A: FileApi> {
    api: Arc<A>,
    endpoints: Endpoints,
    download_dir: PathBuf,
}

impl<A: FileApi> Dispatcher<A> {
    pub fn new(api: Arc<A>, endpoints: Endpoints, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            api,
            endpoints,
            download_dir: download_dir.into(),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// 埋め込みビューアに渡すURL（取得はしない）
    pub fn preview_url(&self, item: &Comprobante) -> String {
        self.endpoints.preview_url(&item.resource_path)
    }

    /// プレビューを読み込んで表示状態を決める
    pub async fn load_preview(&self, item: &Comprobante) -> PreviewDocument {
        preview::load_preview(self.api.as_ref(), self.preview_url(item), &item.resource_path).await
    }

    /// 表示できなかった文書をファイルとして保存
    pub async fn download_instead(&self, document: &PreviewDocument) -> Result<PathBuf> {
        preview::download_instead(self.api.as_ref(), document, &self.download_dir).await
    }

    /// 選択された項目をまとめてZIPでダウンロードして保存
    ///
    /// # Errors
    /// 空の選択は `ValidationError::EmptySelection`（通信しない）
    pub async fn download_selection(&self, items: &[&Comprobante]) -> Result<SavedArchive> {
        if items.is_empty() {
            return Err(ValidationError::EmptySelection.into());
        }

        let filenames = join_filenames(items.iter().copied());
        tracing::debug!(count = items.len(), %filenames, "downloading selection");
        let bytes = self.api.download_multiple(&filenames).await?;

        let entries = match archive::list_entries(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("downloaded archive could not be read: {}", e);
                Vec::new()
            }
        };

        let path = download::save_bytes(&self.download_dir, DOWNLOAD_ARCHIVE_NAME, &bytes)?;
        Ok(SavedArchive {
            path,
            size: bytes.len(),
            entries,
        })
    }
}
