//! メッセージ表示コンポーネント

use leptos::prelude::*;
use sheet_match_common::Notice;

#[component]
pub fn MessageBar(message: ReadSignal<Option<Notice>>) -> impl IntoView {
    view! {
        <div
            id="message"
            class=move || message_class(message.get().as_ref())
        >
            {move || message.get().map(|notice| notice.text).unwrap_or_default()}
        </div>
    }
}

/// 空のときは `message` のみ
fn message_class(notice: Option<&Notice>) -> String {
    notice
        .map(Notice::class_name)
        .unwrap_or_else(|| "message".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_class() {
        assert_eq!(message_class(None), "message");
        assert_eq!(
            message_class(Some(&Notice::error("Error: bad column"))),
            "message error"
        );
        assert_eq!(
            message_class(Some(&Notice::success("Columns loaded successfully"))),
            "message success"
        );
    }
}
