//! サーバーレスポンスの判定
//!
//! カラム取得APIはステータスで、照合APIはContent-Typeで成否を判定する。

use serde_json::Value;

use crate::error::{Error, Result};
use crate::form::RESULT_FILE_NAME;
use crate::types::{ColumnCatalog, Download};

const COLUMNS_FALLBACK: &str = "Failed to load columns";
const MATCH_FALLBACK: &str = "Failed to process files";

/// トランスポート非依存のHTTP応答
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: &str) -> Self {
        Self::new(status, Some("application/json"), body.as_bytes())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
    }
}

/// カラム取得APIの応答をデコード
///
/// ステータスに関係なく本文はJSONとして読む。読めなければ `Transport`。
pub fn decode_columns_reply(reply: &Reply) -> Result<ColumnCatalog> {
    let payload: Value = serde_json::from_slice(&reply.body)?;

    if !reply.is_success() {
        return Err(server_error(reply.status, &payload, COLUMNS_FALLBACK));
    }

    let catalog: ColumnCatalog = serde_json::from_value(payload)?;
    Ok(catalog)
}

/// 照合APIの応答を判定
///
/// JSONならエラー（2xxでも）、それ以外は結果ファイルとして扱う。
pub fn classify_match_reply(reply: Reply) -> Result<Download> {
    if reply.is_json() {
        let payload: Value = serde_json::from_slice(&reply.body)?;
        return Err(server_error(reply.status, &payload, MATCH_FALLBACK));
    }

    Ok(Download {
        file_name: RESULT_FILE_NAME.to_string(),
        content_type: reply.content_type,
        bytes: reply.body,
    })
}

fn server_error(status: u16, payload: &Value, fallback: &str) -> Error {
    Error::Server {
        status,
        message: error_text(payload).unwrap_or_else(|| fallback.to_string()),
    }
}

/// `{ "error": ... }` から表示用テキストを取り出す（空文字は無視）
fn error_text(payload: &Value) -> Option<String> {
    match payload.get("error")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::String(_) | Value::Null | Value::Bool(false) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

    #[test]
    fn test_columns_success() {
        let reply = Reply::json(
            200,
            r#"{"user_columns":["Name","Email"],"sfdc_columns":["Id","Name","Phone"]}"#,
        );
        let catalog = decode_columns_reply(&reply).expect("デコード失敗");
        assert_eq!(catalog.user_columns, vec!["Name", "Email"]);
        assert_eq!(catalog.sfdc_columns, vec!["Id", "Name", "Phone"]);
    }

    #[test]
    fn test_columns_server_error_message() {
        let reply = Reply::json(400, r#"{"error":"Both files are required"}"#);
        match decode_columns_reply(&reply) {
            Err(Error::Server { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Both files are required");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_columns_server_error_fallback() {
        for body in [r#"{}"#, r#"{"error":""}"#, r#"{"error":null}"#] {
            let reply = Reply::json(500, body);
            match decode_columns_reply(&reply) {
                Err(Error::Server { message, .. }) => assert_eq!(message, "Failed to load columns"),
                other => panic!("unexpected for {}: {:?}", body, other),
            }
        }
    }

    #[test]
    fn test_columns_non_json_body_is_transport_error() {
        let reply = Reply::new(502, Some("text/html"), "<h1>Bad Gateway</h1>");
        assert!(matches!(decode_columns_reply(&reply), Err(Error::Transport(_))));
    }

    #[test]
    fn test_columns_wrong_shape_is_transport_error() {
        let reply = Reply::json(200, r#"{"columns":[]}"#);
        assert!(matches!(decode_columns_reply(&reply), Err(Error::Transport(_))));
    }

    #[test]
    fn test_match_binary_is_download() {
        let reply = Reply::new(200, Some(XLSX), vec![0x50, 0x4b, 0x03, 0x04]);
        let download = classify_match_reply(reply).expect("ダウンロードになるべき");
        assert_eq!(download.file_name, "matched_results.xlsx");
        assert_eq!(download.content_type.as_deref(), Some(XLSX));
        assert_eq!(download.bytes, vec![0x50, 0x4b, 0x03, 0x04]);
    }

    #[test]
    fn test_match_missing_content_type_is_download() {
        let reply = Reply::new(200, None, vec![1, 2, 3]);
        assert!(classify_match_reply(reply).is_ok());
    }

    #[test]
    fn test_match_json_is_error_even_when_ok() {
        let reply = Reply::json(200, r#"{"error":"Column 'x' not found in SFDC file"}"#);
        match classify_match_reply(reply) {
            Err(Error::Server { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, "Column 'x' not found in SFDC file");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_match_json_with_charset() {
        let reply = Reply::new(400, Some("Application/JSON; charset=utf-8"), r#"{}"#);
        match classify_match_reply(reply) {
            Err(Error::Server { message, .. }) => assert_eq!(message, "Failed to process files"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_match_broken_json_is_transport_error() {
        let reply = Reply::new(500, Some("application/json"), "{oops");
        assert!(matches!(classify_match_reply(reply), Err(Error::Transport(_))));
    }

    #[test]
    fn test_error_text_non_string() {
        let payload: Value = serde_json::from_str(r#"{"error":42}"#).unwrap();
        assert_eq!(error_text(&payload), Some("42".to_string()));
    }
}
