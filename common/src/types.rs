//! データモデル
//!
//! - FileSelection: ユーザーが選んだ2ファイル（未選択あり）
//! - ColumnCatalog: カラム取得APIの結果
//! - MatchSelection: 照合キーと返却カラムの選択
//! - Download: 照合APIが返した結果ファイル

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::form::{FIELD_INPUT_FILE, FIELD_REFERENCE_FILE};

/// ファイル入力の状態
///
/// `reference` は multipart の `file1`（照合先、`sfdc_columns` の元）、
/// `input` は `file2`（照合元、`user_columns` の元）として送信される。
#[derive(Debug, Clone)]
pub struct FileSelection<F> {
    pub reference: Option<F>,
    pub input: Option<F>,
}

impl<F> Default for FileSelection<F> {
    fn default() -> Self {
        Self {
            reference: None,
            input: None,
        }
    }
}

impl<F> FileSelection<F> {
    pub fn new(reference: Option<F>, input: Option<F>) -> Self {
        Self { reference, input }
    }

    /// 両方選択済みなら送信用のペアを返す
    pub fn pair(&self) -> Result<UploadPair<'_, F>> {
        match (&self.reference, &self.input) {
            (Some(reference), Some(input)) => Ok(UploadPair { reference, input }),
            _ => Err(ValidationError::MissingFiles.into()),
        }
    }

    /// 選択済みのファイルだけをフィールド名付きで返す（`file1` → `file2` の順）
    pub fn present_fields(&self) -> Vec<(&'static str, &F)> {
        [
            (FIELD_REFERENCE_FILE, self.reference.as_ref()),
            (FIELD_INPUT_FILE, self.input.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, file)| file.map(|file| (name, file)))
        .collect()
    }
}

/// 送信可能な2ファイル
#[derive(Debug)]
pub struct UploadPair<'a, F> {
    pub reference: &'a F,
    pub input: &'a F,
}

impl<F> Clone for UploadPair<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for UploadPair<'_, F> {}

impl<'a, F> UploadPair<'a, F> {
    pub fn fields(self) -> [(&'static str, &'a F); 2] {
        [
            (FIELD_REFERENCE_FILE, self.reference),
            (FIELD_INPUT_FILE, self.input),
        ]
    }
}

/// カラム取得APIの結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCatalog {
    /// 入力ファイル（file2）のカラム
    pub user_columns: Vec<String>,
    /// 照合先ファイル（file1）のカラム
    pub sfdc_columns: Vec<String>,
}

impl ColumnCatalog {
    pub fn is_empty(&self) -> bool {
        self.user_columns.is_empty() && self.sfdc_columns.is_empty()
    }
}

/// 照合条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSelection {
    pub input_column: String,
    pub reference_column: String,
    pub return_columns: Vec<String>,
}

impl MatchSelection {
    /// 返却カラムは順序を保ったまま重複を除く
    pub fn new(
        input_column: impl Into<String>,
        reference_column: impl Into<String>,
        return_columns: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for column in return_columns {
            if !unique.contains(&column) {
                unique.push(column);
            }
        }

        Self {
            input_column: input_column.into(),
            reference_column: reference_column.into(),
            return_columns: unique,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_column.is_empty()
            || self.reference_column.is_empty()
            || self.return_columns.is_empty()
        {
            return Err(ValidationError::MissingColumns.into());
        }
        Ok(())
    }
}

/// 保存対象の結果ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
