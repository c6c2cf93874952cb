//! ローディング表示コンポーネント

use leptos::prelude::*;

#[component]
pub fn LoadingIndicator(loading: ReadSignal<bool>) -> impl IntoView {
    view! {
        <div id="loading" class="loading" style=move || loading_style(loading.get())>
            <div class="spinner" />
            <p class="loading-text">"Processing..."</p>
        </div>
    }
}

fn loading_style(loading: bool) -> &'static str {
    if loading {
        "display: flex"
    } else {
        "display: none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_style() {
        assert_eq!(loading_style(true), "display: flex");
        assert_eq!(loading_style(false), "display: none");
    }
}
