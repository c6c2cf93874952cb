//! エラー型定義
//!
//! - `Validation`: 送信前のローカル検証エラー（ネットワーク呼び出しなし）
//! - `Server`: 非2xx応答またはJSONエラーペイロード
//! - `Transport`: 通信失敗・レスポンスのデコード失敗
//! - `Download`: 結果ファイルの保存失敗

use thiserror::Error;

/// ローカル検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select both files")]
    MissingFiles,

    #[error("Please select all required columns")]
    MissingColumns,
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("download error: {0}")]
    Download(String),
}

impl Error {
    /// ネットワーク呼び出し前に検出されたエラーか
    pub fn is_local(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Transport(format!("invalid JSON payload: {}", e))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
