//! comprobante の型定義
//!
//! - Comprobante: 検索APIが返す1件の領収書レコード
//! - ItemKey: 選択セットで使う複合キー (id, resource_path)

use serde::{Deserialize, Serialize};
use std::fmt;

/// 検索結果の1件
///
/// サーバーから受け取った後は変更しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comprobante {
    #[serde(rename = "idComprobante")]
    pub id: i64,

    /// 人が読む folio（検索対象のコード）
    #[serde(rename = "folioComprobante")]
    pub folio: String,

    /// プレビュー/ダウンロードURLの組み立てに使うリソースパス
    #[serde(rename = "url")]
    pub resource_path: String,
}

impl Comprobante {
    pub fn new(id: i64, folio: impl Into<String>, resource_path: impl Into<String>) -> Self {
        Self {
            id,
            folio: folio.into(),
            resource_path: resource_path.into(),
        }
    }

    /// 選択セット用のキー
    pub fn key(&self) -> ItemKey {
        ItemKey {
            id: self.id,
            resource_path: self.resource_path.clone(),
        }
    }
}

/// 選択セットのキー
///
/// 文字列連結ではなくタプル相当の比較を行うため、
/// resource_path に区切り文字が含まれていても衝突しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub id: i64,
    pub resource_path: String,
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.id, self.resource_path)
    }
}
