//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Sheet Match"</h1>
            <p class="text-muted">
                "Upload two spreadsheets, pick the key columns and download the matched rows."
            </p>
        </header>
    }
}
