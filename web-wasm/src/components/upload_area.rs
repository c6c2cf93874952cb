//! アップロードエリアコンポーネント
//!
//! 2つのファイル入力と「カラム読込」ボタン

use leptos::html;
use leptos::prelude::*;

#[component]
pub fn UploadArea<F>(
    file1_ref: NodeRef<html::Input>,
    file2_ref: NodeRef<html::Input>,
    busy: ReadSignal<bool>,
    on_load_columns: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    view! {
        <div class="upload-area">
            <div class="form-group">
                <label for="file1">"Reference file (SFDC export)"</label>
                <input
                    type="file"
                    id="file1"
                    name="file1"
                    accept=".xlsx,.xls,.csv"
                    node_ref=file1_ref
                />
            </div>

            <div class="form-group">
                <label for="file2">"Input file"</label>
                <input
                    type="file"
                    id="file2"
                    name="file2"
                    accept=".xlsx,.xls,.csv"
                    node_ref=file2_ref
                />
            </div>

            <button
                type="button"
                id="load-columns-btn"
                class="btn btn-secondary"
                disabled=move || busy.get()
                on:click={
                    let on_load_columns = on_load_columns.clone();
                    move |_| on_load_columns(())
                }
            >
                "Load columns"
            </button>
        </div>
    }
}
