//! 結果ファイルのダウンロード
//!
//! Blob → 一時オブジェクトURL → `<a download>` をクリック → URLを解放
//!
//! 保存処理はクリック後に非同期で始まるため、URLの解放は少し遅らせる。

use gloo::timers::callback::Timeout;
use sheet_match_common::Download;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// オブジェクトURLを解放するまでの猶予
pub const REVOKE_DELAY_MS: u32 = 1_000;

/// バイト列からBlobを作る（Content-Typeは応答のものを引き継ぐ）
pub fn blob_from_download(download: &Download) -> Result<Blob, JsValue> {
    let array = js_sys::Uint8Array::from(download.bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&array);

    let options = BlobPropertyBag::new();
    if let Some(content_type) = &download.content_type {
        options.set_type(content_type);
    }
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

/// ブラウザの保存処理を起動
pub fn trigger_download(download: &Download) -> Result<(), JsValue> {
    let blob = blob_from_download(download)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let result = click_anchor(&url, &download.file_name);
    revoke_later(url);
    result
}

/// 保存処理が始まった後でURLを解放
pub fn revoke_later(url: String) {
    Timeout::new(REVOKE_DELAY_MS, move || {
        let _ = Url::revoke_object_url(&url);
    })
    .forget();
}

fn click_anchor(url: &str, file_name: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document body is not available"))?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(url);
    anchor.set_download(file_name);

    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Ok(())
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_test::*;
    use web_sys::Response;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_blob_keeps_size_and_type() {
        let download = Download {
            file_name: "matched_results.xlsx".to_string(),
            content_type: Some(
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            bytes: vec![0x50, 0x4b, 0x03, 0x04],
        };

        let blob = blob_from_download(&download).expect("Blob作成失敗");
        assert_eq!(blob.size() as usize, 4);
        assert_eq!(
            blob.type_(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }

    #[wasm_bindgen_test]
    fn wasm_blob_without_type() {
        let download = Download {
            file_name: "matched_results.xlsx".to_string(),
            content_type: None,
            bytes: vec![1, 2, 3],
        };

        let blob = blob_from_download(&download).expect("Blob作成失敗");
        assert_eq!(blob.size() as usize, 3);
        assert_eq!(blob.type_(), "");
    }

    #[wasm_bindgen_test]
    async fn wasm_object_url_survives_click() {
        let download = Download {
            file_name: "matched_results.xlsx".to_string(),
            content_type: None,
            bytes: vec![0x50, 0x4b],
        };
        let blob = blob_from_download(&download).expect("Blob作成失敗");
        let url = Url::create_object_url_with_blob(&blob).expect("URL作成失敗");

        revoke_later(url.clone());

        // 解放前なのでまだ読める
        let window = web_sys::window().expect("windowがない");
        let resp: Response = JsFuture::from(window.fetch_with_str(&url))
            .await
            .expect("fetch失敗")
            .dyn_into()
            .expect("Responseでない");
        assert!(resp.ok());
    }
}
