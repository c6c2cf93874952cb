use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetMatchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("HTTPクライアント初期化エラー: {0}")]
    HttpClient(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("処理に失敗しました: {0}")]
    Flow(#[from] sheet_match_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetMatchError {
    /// フローのエラーはコントローラが表示済み
    pub fn is_reported(&self) -> bool {
        matches!(self, SheetMatchError::Flow(_))
    }
}

impl From<dialoguer::Error> for SheetMatchError {
    fn from(e: dialoguer::Error) -> Self {
        SheetMatchError::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SheetMatchError>;
