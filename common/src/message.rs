//! メッセージ表示とローディング状態
//!
//! 成功メッセージは5秒後に自動消去される。消去タイマーは発行時の
//! メッセージIDを持ち、その間に別のメッセージへ置き換わっていれば何もしない。

use std::sync::atomic::{AtomicU64, Ordering};

/// 成功メッセージの自動消去までの時間
pub const SUCCESS_CLEAR_DELAY_MS: u32 = 5_000;

static NEXT_NOTICE_ID: AtomicU64 = AtomicU64::new(1);

/// メッセージ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    /// CSSクラス名
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

/// 表示中のメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub text: String,
    pub severity: Severity,
}

impl Notice {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: NEXT_NOTICE_ID.fetch_add(1, Ordering::Relaxed),
            text: text.into(),
            severity,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Error)
    }

    /// `message success` / `message error`
    pub fn class_name(&self) -> String {
        format!("message {}", self.severity.as_str())
    }
}

/// 自動消去の予約
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearTicket {
    pub notice_id: u64,
    pub delay_ms: u32,
}

/// ページ全体で共有されるUI状態
///
/// 実装側は `&self` で更新できるようにする（Leptosのシグナル、`Cell`/`RefCell` など）。
pub trait UiStateStore {
    fn set_loading(&self, loading: bool);

    fn set_message(&self, notice: Option<Notice>);

    fn current_message(&self) -> Option<Notice>;

    /// `ticket.delay_ms` 後に `expire(ticket)` を呼ぶよう予約する
    fn schedule_clear(&self, ticket: ClearTicket);

    /// メッセージを置き換え、成功時は自動消去を予約する
    fn show_message(&self, text: &str, severity: Severity) -> Notice {
        let notice = Notice::new(text, severity);
        self.set_message(Some(notice.clone()));

        if severity == Severity::Success {
            self.schedule_clear(ClearTicket {
                notice_id: notice.id,
                delay_ms: SUCCESS_CLEAR_DELAY_MS,
            });
        }
        notice
    }

    /// 予約時のメッセージがまだ表示中の場合のみ消去する
    fn expire(&self, ticket: ClearTicket) -> bool {
        let is_current = self
            .current_message()
            .is_some_and(|notice| notice.id == ticket.notice_id);
        if is_current {
            self.set_message(None);
        }
        is_current
    }
}
