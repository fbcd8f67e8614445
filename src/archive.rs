//! 一括ダウンロードしたZIPの中身の確認

use crate::error::Result;
use std::io::Cursor;
use zip::ZipArchive;

/// ZIP内のファイル名一覧（ディレクトリは除く）
pub fn list_entries(bytes: &[u8]) -> Result<Vec<String>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut names = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        if !entry.is_dir() {
            names.push(entry.name().to_string());
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn build_zip(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in files {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.add_directory("vacia/", SimpleFileOptions::default()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_list_entries() {
        let bytes = build_zip(&[("a.pdf", b"%PDF-1.4"), ("b.pdf", b"%PDF-1.7")]);
        let names = list_entries(&bytes).unwrap();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_not_a_zip() {
        let err = list_entries(b"<html>error</html>").unwrap_err();
        assert!(matches!(err, AppError::Archive(_)));
    }
}
