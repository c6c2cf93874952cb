//! カラム選択コンポーネント
//!
//! 照合キー（入力側・照合先側）と返却カラムのドロップダウン。
//! 選択肢はカラム一覧が更新されるたびに作り直される。

use leptos::html;
use leptos::prelude::*;
use sheet_match_common::ColumnCatalog;

#[component]
pub fn ColumnSelector(
    catalog: ReadSignal<ColumnCatalog>,
    visible: ReadSignal<bool>,
    busy: ReadSignal<bool>,
    input_column_ref: NodeRef<html::Select>,
    reference_column_ref: NodeRef<html::Select>,
    return_columns_ref: NodeRef<html::Select>,
) -> impl IntoView {
    view! {
        <div
            id="columns-section"
            class="columns-section"
            style=move || section_style(visible.get())
        >
            <div class="form-group">
                <label for="match_column_input">"Match column (input file)"</label>
                <select id="match_column_input" name="match_column_input" node_ref=input_column_ref>
                    {move || column_options(catalog.with(|c| c.user_columns.clone()))}
                </select>
            </div>

            <div class="form-group">
                <label for="match_column_sfdc">"Match column (reference file)"</label>
                <select
                    id="match_column_sfdc"
                    name="match_column_sfdc"
                    node_ref=reference_column_ref
                >
                    {move || column_options(catalog.with(|c| c.sfdc_columns.clone()))}
                </select>
            </div>

            <div class="form-group">
                <label for="return_columns">"Columns to return"</label>
                <select
                    id="return_columns"
                    name="return_columns[]"
                    multiple=true
                    node_ref=return_columns_ref
                >
                    {move || column_options(catalog.with(|c| c.sfdc_columns.clone()))}
                </select>
            </div>

            <button
                type="submit"
                id="match-btn"
                class="btn btn-primary"
                disabled=move || busy.get()
            >
                "Match files"
            </button>
        </div>
    }
}

fn column_options(columns: Vec<String>) -> impl IntoView {
    columns
        .into_iter()
        .map(|column| view! { <option value=column.clone()>{column.clone()}</option> })
        .collect_view()
}

fn section_style(visible: bool) -> &'static str {
    if visible {
        "display: block"
    } else {
        "display: none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_style() {
        assert_eq!(section_style(true), "display: block");
        assert_eq!(section_style(false), "display: none");
    }
}
