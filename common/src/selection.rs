//! 一括ダウンロード用の選択セット
//!
//! どの検索で得た項目かに関係なく、ItemKey で重複を除いて保持する。
//! 永続化はしない（セッション終了で破棄）。

use crate::types::{Comprobante, ItemKey};
use std::collections::BTreeMap;

/// ItemKey → Comprobante の選択セット
///
/// 反復順はキー順（表示用に安定しているだけで意味は持たない）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    items: BTreeMap<ItemKey, Comprobante>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 選択を切り替える
    ///
    /// # Returns
    /// 切り替え後に選択されていれば true
    pub fn toggle(&mut self, item: &Comprobante) -> bool {
        let key = item.key();
        if self.items.remove(&key).is_some() {
            false
        } else {
            self.items.insert(key, item.clone());
            true
        }
    }

    /// 選択から外す（未選択なら何もしない）
    ///
    /// # Returns
    /// 実際に削除した場合 true
    pub fn remove(&mut self, item: &Comprobante) -> bool {
        self.items.remove(&item.key()).is_some()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, item: &Comprobante) -> bool {
        self.items.contains_key(&item.key())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 表示順の一覧
    pub fn values(&self) -> Vec<&Comprobante> {
        self.items.values().collect()
    }

    /// 表示順の n 番目（0始まり）
    pub fn get(&self, index: usize) -> Option<&Comprobante> {
        self.items.values().nth(index)
    }

    /// 選択中の resource_path 一覧（表示順）
    pub fn resource_paths(&self) -> Vec<&str> {
        self.items.values().map(|item| item.resource_path.as_str()).collect()
    }
}
