//! 照合サーバー連携（fetch + FormData）
//!
//! `POST /get-columns` と `POST /match` を同一オリジンに送る。
//! 応答は本文をすべて読み込んでから `Reply` にして共通側で判定する。

use sheet_match_common::form::endpoint_url;
use sheet_match_common::{
    Error, MatchForm, MatchService, Reply, Result, UploadPair, COLUMNS_ENDPOINT, MATCH_ENDPOINT,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, RequestInit, Response};

/// ブラウザ版の通信実装
#[derive(Debug, Clone, Copy)]
pub struct WebMatchService {
    base_url: &'static str,
}

impl WebMatchService {
    /// ページと同じオリジンのAPIを使う
    pub const fn same_origin() -> Self {
        Self { base_url: "" }
    }
}

impl MatchService for WebMatchService {
    type File = File;

    async fn post_columns(&self, files: UploadPair<'_, File>) -> Result<Reply> {
        let form = files_form(files.fields()).map_err(transport_error)?;
        post_form(&endpoint_url(self.base_url, COLUMNS_ENDPOINT), &form)
            .await
            .map_err(transport_error)
    }

    async fn post_match(&self, form: &MatchForm<'_, File>) -> Result<Reply> {
        let data = match_form_data(form).map_err(transport_error)?;
        post_form(&endpoint_url(self.base_url, MATCH_ENDPOINT), &data)
            .await
            .map_err(transport_error)
    }
}

/// ファイルだけのフォーム（`file1`, `file2`）
pub fn files_form<'a>(
    files: impl IntoIterator<Item = (&'static str, &'a File)>,
) -> std::result::Result<FormData, JsValue> {
    let form = FormData::new()?;
    for (name, file) in files {
        form.append_with_blob_and_filename(name, file, &file.name())?;
    }
    Ok(form)
}

/// 照合フォーム（ファイル + カラム選択）
pub fn match_form_data(form: &MatchForm<'_, File>) -> std::result::Result<FormData, JsValue> {
    let data = files_form(form.file_fields())?;
    for (name, value) in form.text_fields() {
        data.append_with_str(name, value)?;
    }
    Ok(data)
}

async fn post_form(url: &str, body: &FormData) -> std::result::Result<Reply, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(body);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_str_and_init(url, &opts)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let content_type = resp.headers().get("content-type")?;
    let buffer = JsFuture::from(resp.array_buffer()?).await?;
    let body = js_sys::Uint8Array::new(&buffer).to_vec();

    Ok(Reply {
        status: resp.status(),
        content_type,
        body,
    })
}

fn transport_error(e: JsValue) -> Error {
    Error::Transport(describe_js_error(&e))
}

/// JsValueのエラーを文字列化（Errorオブジェクトならmessage）
pub fn describe_js_error(e: &JsValue) -> String {
    if let Some(text) = e.as_string() {
        return text;
    }
    if let Some(error) = e.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", e)
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use sheet_match_common::{FileSelection, MatchSelection};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn file(name: &str, content: &str) -> File {
        let parts = js_sys::Array::new();
        parts.push(&JsValue::from_str(content));
        File::new_with_str_sequence(&parts, name).expect("File作成失敗")
    }

    #[wasm_bindgen_test]
    fn wasm_files_form_has_both_files() {
        let reference = file("sfdc.xlsx", "a");
        let input = file("input.xlsx", "b");
        let pair = UploadPair {
            reference: &reference,
            input: &input,
        };
        let form = files_form(pair.fields()).expect("FormData作成失敗");

        let file1: File = form.get("file1").dyn_into().expect("file1がFileでない");
        let file2: File = form.get("file2").dyn_into().expect("file2がFileでない");
        assert_eq!(file1.name(), "sfdc.xlsx");
        assert_eq!(file2.name(), "input.xlsx");
    }

    #[wasm_bindgen_test]
    fn wasm_match_form_repeats_return_columns() {
        let files = FileSelection::new(Some(file("sfdc.xlsx", "a")), Some(file("input.xlsx", "b")));
        let selection =
            MatchSelection::new("email", "email", vec!["id".to_string(), "phone".to_string()]);
        let form = MatchForm::new(&files, &selection);

        let data = match_form_data(&form).expect("FormData作成失敗");
        assert_eq!(data.get("match_column_input").as_string().as_deref(), Some("email"));
        assert_eq!(data.get("match_column_sfdc").as_string().as_deref(), Some("email"));
        assert_eq!(data.get_all("return_columns[]").length(), 2);
    }

    #[wasm_bindgen_test]
    fn wasm_match_form_skips_unselected_file() {
        let files = FileSelection::new(None, Some(file("input.xlsx", "b")));
        let selection = MatchSelection::new("email", "email", vec!["id".to_string()]);

        let data = match_form_data(&MatchForm::new(&files, &selection)).expect("FormData作成失敗");
        assert!(!data.has("file1"));
        assert!(data.has("file2"));
    }

    #[wasm_bindgen_test]
    fn wasm_describe_js_error() {
        let error: JsValue = js_sys::Error::new("Failed to fetch").into();
        assert_eq!(describe_js_error(&error), "Failed to fetch");
        assert_eq!(describe_js_error(&JsValue::from_str("plain")), "plain");
    }
}
