//! 埋め込みPDFビューアの状態
//!
//! Loading → Ready { num_pages, page: 1 } → ページ移動（1..=num_pages）
//! Loading → Error { message } → 「代わりにダウンロード」

/// 読み込み失敗時にビューアへ表示するメッセージ
pub const LOAD_ERROR_MESSAGE: &str =
    "No se pudo cargar el documento. Puede ser muy grande o estar dañado.";

/// ファイル名が取れない場合の保存名
pub const FALLBACK_FILE_NAME: &str = "documento.pdf";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewState {
    #[default]
    Loading,
    Ready { num_pages: u32, page: u32 },
    Error { message: String },
}

impl PreviewState {
    pub fn new() -> Self {
        Self::Loading
    }

    /// 読み込み完了（Loading からのみ遷移）
    ///
    /// ページ数 0 の文書は表示できないので Error 扱い。
    pub fn load_succeeded(&mut self, num_pages: u32) -> bool {
        if *self != Self::Loading {
            return false;
        }
        *self = if num_pages == 0 {
            Self::Error {
                message: LOAD_ERROR_MESSAGE.to_string(),
            }
        } else {
            Self::Ready { num_pages, page: 1 }
        };
        true
    }

    /// 読み込み失敗（Loading からのみ遷移）
    pub fn load_failed(&mut self, message: impl Into<String>) -> bool {
        if *self != Self::Loading {
            return false;
        }
        *self = Self::Error {
            message: message.into(),
        };
        true
    }

    pub fn can_go_previous(&self) -> bool {
        matches!(self, Self::Ready { page, .. } if *page > 1)
    }

    pub fn can_go_next(&self) -> bool {
        matches!(self, Self::Ready { num_pages, page } if page < num_pages)
    }

    pub fn previous_page(&mut self) -> bool {
        self.go_to(self.page().map_or(0, |p| p.saturating_sub(1)))
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to(self.page().map_or(0, |p| p + 1))
    }

    /// 指定ページへ移動（範囲外・Ready以外は何もしない）
    pub fn go_to(&mut self, target: u32) -> bool {
        match self {
            Self::Ready { num_pages, page } if (1..=*num_pages).contains(&target) => {
                *page = target;
                true
            }
            _ => false,
        }
    }

    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Ready { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// フッター表示 "Página 2 de 5"
    pub fn page_label(&self) -> Option<String> {
        match self {
            Self::Ready { num_pages, page } => Some(format!("Página {} de {}", page, num_pages)),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// 「代わりにダウンロード」で使う保存名
///
/// URLの最後のセグメント。空なら documento.pdf。
pub fn fallback_file_name(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => FALLBACK_FILE_NAME.to_string(),
    }
}
