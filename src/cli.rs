use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "material-excel")]
#[command(about = "物料編碼申請資料のExcel変換・検証・統合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 設定ファイル（JSON）
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 申請JSONをSAP匯入用Excelに変換
    Convert {
        /// 入力JSONファイル、またはJSON文字列
        #[arg(short, long)]
        input: Option<String>,

        /// 出力Excelファイル（省略時: SAP_Material_Import_<日時>.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Excelの欄位を検証
    Validate {
        /// 検証するExcelファイル
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 複数のExcelをシート単位で統合
    Merge {
        /// 統合するExcelファイル（2つ以上）
        #[arg(long, num_args = 1..)]
        files: Vec<PathBuf>,

        /// 出力Excelファイル（省略時: Merged_<日時>.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
