//! 領収書（comprobante）検索・一括ダウンロードクライアント
//!
//! 共通の型と状態機械は comprobantes_common、ここでは
//! HTTP通信・イベントループ・保存・CLI 周りを扱う。

pub mod api;
pub mod archive;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod download;
pub mod error;
pub mod logging;
pub mod notify;
pub mod preview;
pub mod progress;
pub mod prompt;
pub mod report;
pub mod session;
pub mod shell;
