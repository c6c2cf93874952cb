//! アップロードコントローラ
//!
//! カラム取得 → 照合 の2フローを、通信（`MatchService`）と画面（`UploadView`）の
//! 実装から切り離して扱う。ブラウザ版・CLI版とも同じコントローラを使う。
//!
//! 各フローの状態遷移:
//! `Idle → 検証 → (検証エラーでIdle) | Loading → (成功 | 失敗) → Idle`
//!
//! Loading中はローディング表示と起動ボタンの無効化を行い、
//! どの経路で終わっても最後に必ず解除する。

use crate::error::{Error, Result};
use crate::form::{MatchForm, COLUMNS_ENDPOINT, MATCH_ENDPOINT};
use crate::message::{Severity, UiStateStore};
use crate::response::{classify_match_reply, decode_columns_reply, Reply};
use crate::types::{ColumnCatalog, Download, FileSelection, MatchSelection, UploadPair};

/// 操作フロー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    Columns,
    Match,
}

impl Flow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flow::Columns => "columns",
            Flow::Match => "match",
        }
    }

    pub fn success_text(&self) -> &'static str {
        match self {
            Flow::Columns => "Columns loaded successfully",
            Flow::Match => "Matching completed successfully! File downloaded.",
        }
    }

    fn unexpected_failure_text(&self) -> &'static str {
        match self {
            Flow::Columns => "An error occurred while loading columns",
            Flow::Match => "An error occurred while matching files",
        }
    }

    /// エラーを画面表示用の文言に変換
    pub fn failure_text(&self, error: &Error) -> String {
        match error {
            Error::Validation(reason) => reason.to_string(),
            Error::Server { message, .. } => format!("Error: {}", message),
            Error::Transport(_) | Error::Download(_) => self.unexpected_failure_text().to_string(),
        }
    }
}

/// サーバー通信
///
/// Futureに `Send` を要求しない（ブラウザのイベントループで動かすため）。
#[allow(async_fn_in_trait)]
pub trait MatchService {
    type File;

    /// `POST /get-columns`（`file1`, `file2`）
    async fn post_columns(&self, files: UploadPair<'_, Self::File>) -> Result<Reply>;

    /// `POST /match`（ファイル + カラム選択）
    async fn post_match(&self, form: &MatchForm<'_, Self::File>) -> Result<Reply>;
}

/// コントローラが操作する画面要素
pub trait UploadView: UiStateStore {
    /// フローの起動ボタンを無効化/有効化
    fn set_busy(&self, flow: Flow, busy: bool);

    /// 3つのドロップダウンを作り直す（既存の選択肢は破棄）
    ///
    /// 入力カラム ← `user_columns`、照合カラムと返却カラム ← `sfdc_columns`
    fn replace_columns(&self, catalog: &ColumnCatalog);

    /// カラム選択セクションを表示
    fn reveal_columns(&self);

    /// 結果ファイルを保存
    fn save_download(&self, download: &Download) -> Result<()>;

    /// 開発者向けログ
    fn log_failure(&self, flow: Flow, error: &Error) {
        if error.is_local() {
            tracing::debug!(flow = flow.as_str(), "validation failed: {}", error);
            return;
        }
        match error {
            Error::Server { status, message } => {
                tracing::warn!(flow = flow.as_str(), status, "server rejected request: {}", message)
            }
            _ => tracing::error!(flow = flow.as_str(), "Error: {}", error),
        }
    }
}

/// ローディング表示とボタン無効化を、スコープ終了時に必ず解除する
struct BusyGuard<'a, V: UploadView> {
    view: &'a V,
    flow: Flow,
}

impl<'a, V: UploadView> BusyGuard<'a, V> {
    fn enter(view: &'a V, flow: Flow) -> Self {
        view.set_loading(true);
        view.set_busy(flow, true);
        Self { view, flow }
    }
}

impl<V: UploadView> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_loading(false);
        self.view.set_busy(self.flow, false);
    }
}

/// 2フローのコントローラ
///
/// 戻り値の `Result` は観測用。エラーはすでに画面へ表示済みなので、
/// イベントハンドラ側では捨ててよい。
#[derive(Debug, Clone, Copy)]
pub struct UploadController<S, V> {
    service: S,
    view: V,
}

impl<S, V> UploadController<S, V>
where
    S: MatchService,
    V: UploadView,
{
    pub fn new(service: S, view: V) -> Self {
        Self { service, view }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// カラム取得フロー
    pub async fn request_columns(&self, files: &FileSelection<S::File>) -> Result<ColumnCatalog> {
        let flow = Flow::Columns;
        let pair = match files.pair() {
            Ok(pair) => pair,
            Err(error) => return Err(self.fail(flow, error)),
        };

        let _busy = BusyGuard::enter(&self.view, flow);
        match self.load_columns(pair).await {
            Ok(catalog) => {
                self.view.show_message(flow.success_text(), Severity::Success);
                Ok(catalog)
            }
            Err(error) => Err(self.fail(flow, error)),
        }
    }

    /// 照合フロー
    ///
    /// フォームの既定送信（ページ遷移）の抑止は呼び出し側で行う。
    pub async fn submit_match(
        &self,
        files: &FileSelection<S::File>,
        selection: &MatchSelection,
    ) -> Result<()> {
        let flow = Flow::Match;
        if let Err(error) = selection.validate() {
            return Err(self.fail(flow, error));
        }

        let _busy = BusyGuard::enter(&self.view, flow);
        match self.run_match(MatchForm::new(files, selection)).await {
            Ok(()) => {
                self.view.show_message(flow.success_text(), Severity::Success);
                Ok(())
            }
            Err(error) => Err(self.fail(flow, error)),
        }
    }

    async fn load_columns(&self, files: UploadPair<'_, S::File>) -> Result<ColumnCatalog> {
        tracing::debug!(endpoint = COLUMNS_ENDPOINT, "requesting columns");
        let reply = self.service.post_columns(files).await?;
        tracing::debug!(status = reply.status, "columns response received");

        let catalog = decode_columns_reply(&reply)?;
        self.view.replace_columns(&catalog);
        self.view.reveal_columns();
        Ok(catalog)
    }

    async fn run_match(&self, form: MatchForm<'_, S::File>) -> Result<()> {
        tracing::debug!(
            endpoint = MATCH_ENDPOINT,
            return_columns = form.selection.return_columns.len(),
            "submitting match"
        );
        let reply = self.service.post_match(&form).await?;
        tracing::debug!(
            status = reply.status,
            content_type = reply.content_type.as_deref().unwrap_or(""),
            "match response received"
        );

        let download = classify_match_reply(reply)?;
        self.view.save_download(&download)
    }

    fn fail(&self, flow: Flow, error: Error) -> Error {
        self.view.log_failure(flow, &error);
        self.view.show_message(&flow.failure_text(&error), Severity::Error);
        error
    }
}
