//! メインアプリケーションコンポーネント

use leptos::ev::SubmitEvent;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use sheet_match_common::{FileSelection, MatchSelection, UploadController};
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlOptionElement};

use crate::api::WebMatchService;
use crate::components::{
    column_selector::ColumnSelector,
    header::Header,
    loading_indicator::LoadingIndicator,
    message_bar::MessageBar,
    upload_area::UploadArea,
};
use crate::page_state::PageState;

type Controller = UploadController<WebMatchService, PageState>;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let state = PageState::new();
    let controller: Controller = UploadController::new(WebMatchService::same_origin(), state);

    let file1_ref = NodeRef::<html::Input>::new();
    let file2_ref = NodeRef::<html::Input>::new();
    let input_column_ref = NodeRef::<html::Select>::new();
    let reference_column_ref = NodeRef::<html::Select>::new();
    let return_columns_ref = NodeRef::<html::Select>::new();

    // カラム読込ハンドラ
    let on_load_columns = move |_| {
        let files = FileSelection::new(selected_file(file1_ref), selected_file(file2_ref));
        spawn_local(async move {
            let _ = controller.request_columns(&files).await;
        });
    };

    // 照合ハンドラ
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let files = FileSelection::new(selected_file(file1_ref), selected_file(file2_ref));
        let selection = MatchSelection::new(
            selected_value(input_column_ref),
            selected_value(reference_column_ref),
            selected_values(return_columns_ref),
        );
        spawn_local(async move {
            let _ = controller.submit_match(&files, &selection).await;
        });
    };

    view! {
        <div class="container">
            <Header />

            <form id="upload-form" on:submit=on_submit>
                <UploadArea
                    file1_ref=file1_ref
                    file2_ref=file2_ref
                    busy=state.loading_columns.read_only()
                    on_load_columns=on_load_columns
                />

                <ColumnSelector
                    catalog=state.catalog.read_only()
                    visible=state.columns_visible.read_only()
                    busy=state.matching.read_only()
                    input_column_ref=input_column_ref
                    reference_column_ref=reference_column_ref
                    return_columns_ref=return_columns_ref
                />
            </form>

            <LoadingIndicator loading=state.loading.read_only() />
            <MessageBar message=state.message.read_only() />
        </div>
    }
}

/// ファイル入力の先頭ファイル
fn selected_file(input: NodeRef<html::Input>) -> Option<File> {
    input.get_untracked()?.files()?.get(0)
}

/// 単一選択ドロップダウンの値（未選択は空文字）
fn selected_value(select: NodeRef<html::Select>) -> String {
    select
        .get_untracked()
        .map(|el| el.value())
        .unwrap_or_default()
}

/// 複数選択ドロップダウンの選択値
fn selected_values(select: NodeRef<html::Select>) -> Vec<String> {
    let Some(el) = select.get_untracked() else {
        return Vec::new();
    };
    let options = el.selected_options();
    (0..options.length())
        .filter_map(|i| options.item(i))
        .filter_map(|option| option.dyn_into::<HtmlOptionElement>().ok())
        .map(|option| option.value())
        .collect()
}
