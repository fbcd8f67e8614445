//! ダウンロードしたバイト列の保存
//!
//! 同名ファイルがある場合はブラウザと同じく "name (1).ext" のように番号を付ける。

use crate::error::Result;
use std::path::{Path, PathBuf};

/// dir/file_name に保存して実際のパスを返す
pub fn save_bytes(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = unique_path(dir, file_name);
    std::fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "file saved");
    Ok(path)
}

/// 既存ファイルと重ならない保存先
pub fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let extension = name.extension().and_then(|e| e.to_str());

    (1..)
        .map(|n| match extension {
            Some(ext) => dir.join(format!("{} ({}).{}", stem, n, ext)),
            None => dir.join(format!("{} ({})", stem, n)),
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}
