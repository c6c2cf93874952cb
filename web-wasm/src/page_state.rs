//! ページの状態（Leptosシグナル）
//!
//! コントローラからは `UploadView` として操作され、
//! 各コンポーネントはシグナルを読んで描画する。

use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use sheet_match_common::{
    ClearTicket, ColumnCatalog, Download, Error, Flow, Notice, Result, UiStateStore, UploadView,
};
use wasm_bindgen::JsValue;

use crate::api::match_api::describe_js_error;
use crate::download::trigger_download;

/// ページ全体の状態
#[derive(Clone, Copy)]
pub struct PageState {
    pub loading: RwSignal<bool>,
    pub message: RwSignal<Option<Notice>>,
    pub catalog: RwSignal<ColumnCatalog>,
    pub columns_visible: RwSignal<bool>,
    pub loading_columns: RwSignal<bool>,
    pub matching: RwSignal<bool>,
}

impl PageState {
    pub fn new() -> Self {
        Self {
            loading: RwSignal::new(false),
            message: RwSignal::new(None),
            catalog: RwSignal::new(ColumnCatalog::default()),
            columns_visible: RwSignal::new(false),
            loading_columns: RwSignal::new(false),
            matching: RwSignal::new(false),
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiStateStore for PageState {
    fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    fn set_message(&self, notice: Option<Notice>) {
        self.message.set(notice);
    }

    fn current_message(&self) -> Option<Notice> {
        self.message.get_untracked()
    }

    fn schedule_clear(&self, ticket: ClearTicket) {
        let state = *self;
        Timeout::new(ticket.delay_ms, move || {
            state.expire(ticket);
        })
        .forget();
    }
}

impl UploadView for PageState {
    fn set_busy(&self, flow: Flow, busy: bool) {
        match flow {
            Flow::Columns => self.loading_columns.set(busy),
            Flow::Match => self.matching.set(busy),
        }
    }

    fn replace_columns(&self, catalog: &ColumnCatalog) {
        self.catalog.set(catalog.clone());
    }

    fn reveal_columns(&self) {
        self.columns_visible.set(true);
    }

    fn save_download(&self, download: &Download) -> Result<()> {
        trigger_download(download).map_err(|e| Error::Download(describe_js_error(&e)))
    }

    fn log_failure(&self, flow: Flow, error: &Error) {
        if error.is_local() {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] Error: {}", flow.as_str(), error));
        match error {
            Error::Server { .. } => web_sys::console::warn_1(&line),
            _ => web_sys::console::error_1(&line),
        }
    }
}
