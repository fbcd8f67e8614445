use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "comprobantes")]
#[command(about = "Buscador, previsualización y descarga de comprobantes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// APIのベースURL（設定ファイルより優先）
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// 保存先ディレクトリ
    #[arg(short = 'd', long, global = true)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// folio を1回だけ検索して結果を表示
    Search {
        /// 検索語（3文字以上）
        #[arg(required = true)]
        term: String,
    },

    /// 対話モード: 入力しながら検索し、選択してZIPでダウンロード
    Browse,

    /// 文書のプレビューURLを表示して読み込みを確認
    Preview {
        /// 検索結果の url（resource path）
        #[arg(required = true)]
        resource_path: String,

        /// 読み込めなかった場合でもファイルとして保存
        #[arg(long)]
        save: bool,
    },

    /// 旅費のExcelレポートをダウンロード
    Report {
        /// 開始日 (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// 終了日 (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,

        /// folio (SP/DA/IVJ/IVAIS/AS/UG/UT)。省略時は全件
        #[arg(long)]
        folio: Option<String>,

        /// 足りない項目を対話で尋ねない
        #[arg(long)]
        no_prompt: bool,

        /// ダウンロードしたブックのシート概要を表示
        #[arg(long)]
        inspect: bool,
    },

    /// 設定の表示・変更
    Config {
        /// APIのベースURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// レポートAPIのベースURLを設定
        #[arg(long)]
        set_report_url: Option<String>,

        /// 既定の保存先を設定
        #[arg(long)]
        set_download_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
