//! 対話式カラム選択モジュール
//!
//! コマンドラインで指定されなかったカラムだけを、取得したカラム一覧から選ばせる。

use crate::error::Result;
use dialoguer::{MultiSelect, Select};
use sheet_match_common::{ColumnCatalog, MatchSelection};

/// コマンドラインで指定されたカラム
#[derive(Debug, Clone, Default)]
pub struct SelectionArgs {
    pub input_column: Option<String>,
    pub reference_column: Option<String>,
    pub return_columns: Vec<String>,
}

impl SelectionArgs {
    /// すべて指定済みならカラム一覧の取得は不要
    pub fn is_complete(&self) -> bool {
        self.input_column.is_some()
            && self.reference_column.is_some()
            && !self.return_columns.is_empty()
    }
}

/// カラムの選び方
pub trait ColumnPicker {
    fn pick_one(&self, prompt: &str, options: &[String]) -> Result<Option<String>>;

    fn pick_many(&self, prompt: &str, options: &[String]) -> Result<Vec<String>>;
}

/// dialoguerによる対話選択
pub struct DialoguerPicker;

impl ColumnPicker for DialoguerPicker {
    fn pick_one(&self, prompt: &str, options: &[String]) -> Result<Option<String>> {
        if options.is_empty() {
            return Ok(None);
        }
        let index = Select::new()
            .with_prompt(prompt)
            .items(options)
            .default(0)
            .interact_opt()?;
        Ok(index.map(|i| options[i].clone()))
    }

    fn pick_many(&self, prompt: &str, options: &[String]) -> Result<Vec<String>> {
        if options.is_empty() {
            return Ok(Vec::new());
        }
        let indexes = MultiSelect::new()
            .with_prompt(prompt)
            .items(options)
            .interact()?;
        Ok(indexes.into_iter().map(|i| options[i].clone()).collect())
    }
}

/// 対話しない（未指定は空のまま。送信前の検証で弾かれる）
pub struct NoPrompt;

impl ColumnPicker for NoPrompt {
    fn pick_one(&self, _prompt: &str, _options: &[String]) -> Result<Option<String>> {
        Ok(None)
    }

    fn pick_many(&self, _prompt: &str, _options: &[String]) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// 指定値を優先し、不足分をpickerで補う
pub fn resolve_selection(
    catalog: &ColumnCatalog,
    args: SelectionArgs,
    picker: &dyn ColumnPicker,
) -> Result<MatchSelection> {
    let input_column = match args.input_column {
        Some(column) => column,
        None => picker
            .pick_one("Match column (input file)", &catalog.user_columns)?
            .unwrap_or_default(),
    };

    let reference_column = match args.reference_column {
        Some(column) => column,
        None => picker
            .pick_one("Match column (reference file)", &catalog.sfdc_columns)?
            .unwrap_or_default(),
    };

    let return_columns = if args.return_columns.is_empty() {
        picker.pick_many("Columns to return (space to toggle)", &catalog.sfdc_columns)?
    } else {
        args.return_columns
    };

    Ok(MatchSelection::new(input_column, reference_column, return_columns))
}
