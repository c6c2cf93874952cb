//! Sheet Match Common Library
//!
//! CLIとWeb(WASM)で共有されるコントローラ・型・ユーティリティ
//!
//! - `types`: ファイル選択・カラム一覧・カラム選択
//! - `form`: エンドポイントとmultipartフィールド名
//! - `message`: メッセージ表示と自動消去
//! - `response`: サーバーレスポンスの判定
//! - `controller`: 2段階フロー（カラム取得 → 照合）

pub mod types;
pub mod form;
pub mod error;
pub mod message;
pub mod response;
pub mod controller;

pub use types::{ColumnCatalog, Download, FileSelection, MatchSelection, UploadPair};
pub use form::{MatchForm, COLUMNS_ENDPOINT, MATCH_ENDPOINT, RESULT_FILE_NAME};
pub use error::{Error, Result, ValidationError};
pub use message::{ClearTicket, Notice, Severity, UiStateStore, SUCCESS_CLEAR_DELAY_MS};
pub use response::{classify_match_reply, decode_columns_reply, Reply};
pub use controller::{Flow, MatchService, UploadController, UploadView};
