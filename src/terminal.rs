//! ターミナル版の画面
//!
//! - ローディング表示: indicatifのスピナー
//! - メッセージ: 成功はstdout、エラーはstderr
//! - カラム選択セクション: カラム一覧の表示
//! - ダウンロード: 指定パスへ書き出し

use indicatif::{ProgressBar, ProgressStyle};
use sheet_match_common::{
    ClearTicket, ColumnCatalog, Download, Error, Flow, Notice, Result, Severity, UiStateStore,
    UploadView,
};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct TerminalView {
    output: PathBuf,
    spinner: RefCell<Option<ProgressBar>>,
    loading: Cell<bool>,
    busy: RefCell<Vec<Flow>>,
    message: RefCell<Option<Notice>>,
    catalog: RefCell<ColumnCatalog>,
    columns_visible: Cell<bool>,
    saved_path: RefCell<Option<PathBuf>>,
}

impl TerminalView {
    /// `output` はファイルパスまたは既存ディレクトリ
    pub fn new(output: PathBuf) -> Self {
        Self {
            output,
            spinner: RefCell::new(None),
            loading: Cell::new(false),
            busy: RefCell::new(Vec::new()),
            message: RefCell::new(None),
            catalog: RefCell::new(ColumnCatalog::default()),
            columns_visible: Cell::new(false),
            saved_path: RefCell::new(None),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn is_busy(&self, flow: Flow) -> bool {
        self.busy.borrow().contains(&flow)
    }

    pub fn catalog(&self) -> ColumnCatalog {
        self.catalog.borrow().clone()
    }

    pub fn columns_visible(&self) -> bool {
        self.columns_visible.get()
    }

    pub fn saved_path(&self) -> Option<PathBuf> {
        self.saved_path.borrow().clone()
    }

    /// スピナー表示中でも行が崩れないように出力する
    fn print_line(&self, line: &str, to_stderr: bool) {
        let print = || {
            if to_stderr {
                eprintln!("{}", line);
            } else {
                println!("{}", line);
            }
        };
        match self.spinner.borrow().as_ref() {
            Some(spinner) => spinner.suspend(print),
            None => print(),
        }
    }

    fn start_spinner(&self) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Processing...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        *self.spinner.borrow_mut() = Some(spinner);
    }

    fn stop_spinner(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }
}

impl UiStateStore for TerminalView {
    fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
        if loading {
            self.start_spinner();
        } else {
            self.stop_spinner();
        }
    }

    fn set_message(&self, notice: Option<Notice>) {
        if let Some(notice) = &notice {
            match notice.severity {
                Severity::Success => self.print_line(&format!("✔ {}", notice.text), false),
                Severity::Error => self.print_line(&format!("✖ {}", notice.text), true),
            }
        }
        *self.message.borrow_mut() = notice;
    }

    fn current_message(&self) -> Option<Notice> {
        self.message.borrow().clone()
    }

    // 出力済みの行は消せないので予約しない
    fn schedule_clear(&self, ticket: ClearTicket) {
        tracing::debug!(notice_id = ticket.notice_id, "auto-clear skipped on terminal");
    }
}

impl UploadView for TerminalView {
    fn set_busy(&self, flow: Flow, busy: bool) {
        let mut flows = self.busy.borrow_mut();
        flows.retain(|f| *f != flow);
        if busy {
            flows.push(flow);
        }
    }

    fn replace_columns(&self, catalog: &ColumnCatalog) {
        *self.catalog.borrow_mut() = catalog.clone();
    }

    fn reveal_columns(&self) {
        self.columns_visible.set(true);
        let catalog = self.catalog.borrow();
        if catalog.is_empty() {
            tracing::warn!("server returned no columns");
        }
        self.print_line(&format_columns("Input file columns", &catalog.user_columns), false);
        self.print_line(&format_columns("Reference file columns", &catalog.sfdc_columns), false);
    }

    fn save_download(&self, download: &Download) -> Result<()> {
        let path = resolve_output(&self.output, &download.file_name);
        std::fs::write(&path, &download.bytes)
            .map_err(|e| Error::Download(format!("failed to write {}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), bytes = download.bytes.len(), "result saved");
        *self.saved_path.borrow_mut() = Some(path);
        Ok(())
    }
}

/// ディレクトリ指定ならサーバー既定のファイル名を付ける
pub fn resolve_output(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

/// 番号付きのカラム一覧
pub fn format_columns(title: &str, columns: &[String]) -> String {
    let mut text = format!("{} ({}):", title, columns.len());
    for (i, column) in columns.iter().enumerate() {
        text.push_str(&format!("\n  {:>2}) {}", i + 1, column));
    }
    text
}
