use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheet-match")]
#[command(about = "2つの表ファイルをサーバーで照合し、結果をExcelで保存するクライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 照合サーバーのURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 2ファイルのカラム一覧を取得して表示
    Columns {
        /// 照合先ファイル（file1）
        #[arg(required = true)]
        file1: PathBuf,

        /// 入力ファイル（file2）
        #[arg(required = true)]
        file2: PathBuf,
    },

    /// カラムを指定して照合し、結果ファイルを保存
    Match {
        /// 照合先ファイル（file1）
        #[arg(required = true)]
        file1: PathBuf,

        /// 入力ファイル（file2）
        #[arg(required = true)]
        file2: PathBuf,

        /// 照合キー（入力ファイル側）
        #[arg(short = 'i', long)]
        input_column: Option<String>,

        /// 照合キー（照合先ファイル側）
        #[arg(short = 'r', long)]
        reference_column: Option<String>,

        /// 返却カラム（複数指定可）
        #[arg(short = 'c', long = "return-column")]
        return_columns: Vec<String>,

        /// 保存先（デフォルト: ./matched_results.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 未指定のカラムを対話で選ばない
        #[arg(long)]
        no_prompt: bool,
    },

    /// 設定を表示/変更
    Config {
        /// サーバーURLを保存
        #[arg(long)]
        set_server: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
