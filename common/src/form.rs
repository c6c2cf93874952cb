//! エンドポイントとmultipartフォーム定義

use crate::types::{FileSelection, MatchSelection};

/// カラム取得API
pub const COLUMNS_ENDPOINT: &str = "/get-columns";

/// 照合API
pub const MATCH_ENDPOINT: &str = "/match";

/// 照合結果の保存ファイル名
pub const RESULT_FILE_NAME: &str = "matched_results.xlsx";

pub const FIELD_REFERENCE_FILE: &str = "file1";
pub const FIELD_INPUT_FILE: &str = "file2";
pub const FIELD_INPUT_COLUMN: &str = "match_column_input";
pub const FIELD_REFERENCE_COLUMN: &str = "match_column_sfdc";
pub const FIELD_RETURN_COLUMNS: &str = "return_columns[]";

/// 照合APIへ送るフォーム全体（ファイル + カラム選択）
///
/// ファイルは選択済みのものだけを送る。欠けている場合の判定はサーバー側
/// （`Both files are required`）に任せる。
#[derive(Debug)]
pub struct MatchForm<'a, F> {
    pub files: &'a FileSelection<F>,
    pub selection: &'a MatchSelection,
}

impl<'a, F> MatchForm<'a, F> {
    pub fn new(files: &'a FileSelection<F>, selection: &'a MatchSelection) -> Self {
        Self { files, selection }
    }

    pub fn file_fields(&self) -> Vec<(&'static str, &'a F)> {
        self.files.present_fields()
    }

    /// ファイル以外のフィールドを送信順に返す
    ///
    /// 返却カラムは1件につき1フィールド（同名で繰り返し）
    pub fn text_fields(&self) -> Vec<(&'static str, &'a str)> {
        let selection = self.selection;
        let mut fields = vec![
            (FIELD_INPUT_COLUMN, selection.input_column.as_str()),
            (FIELD_REFERENCE_COLUMN, selection.reference_column.as_str()),
        ];
        fields.extend(
            selection
                .return_columns
                .iter()
                .map(|column| (FIELD_RETURN_COLUMNS, column.as_str())),
        );
        fields
    }
}

/// ベースURLとエンドポイントを結合
///
/// # Examples
/// ```
/// use sheet_match_common::form::endpoint_url;
///
/// assert_eq!(endpoint_url("http://localhost:5000/", "/match"), "http://localhost:5000/match");
/// assert_eq!(endpoint_url("", "/match"), "/match");
/// ```
pub fn endpoint_url(base: &str, endpoint: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), endpoint)
}
