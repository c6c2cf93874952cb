use clap::Parser;
use sheet_match::{cli, client, config, error, logging, prompt, terminal};
use cli::{Cli, Commands};
use client::HttpMatchService;
use config::Config;
use error::{Result, SheetMatchError};
use prompt::{resolve_selection, ColumnPicker, DialoguerPicker, NoPrompt, SelectionArgs};
use sheet_match_common::{ColumnCatalog, FileSelection, UploadController};
use std::path::PathBuf;
use std::process::ExitCode;
use terminal::TerminalView;

type Controller = UploadController<HttpMatchService, TerminalView>;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !err.is_reported() {
                eprintln!("✖ {}", err);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Columns { file1, file2 } => {
            let controller = build_controller(&config, cli.server.as_deref(), None)?;
            controller.request_columns(&file_selection(file1, file2)).await?;
        }

        Commands::Match {
            file1,
            file2,
            input_column,
            reference_column,
            return_columns,
            output,
            no_prompt,
        } => {
            let controller = build_controller(&config, cli.server.as_deref(), output)?;
            let files = file_selection(file1, file2);
            let args = SelectionArgs {
                input_column,
                reference_column,
                return_columns,
            };

            // 未指定カラムを選ぶ場合のみカラム一覧を取得
            let catalog = if args.is_complete() || no_prompt {
                ColumnCatalog::default()
            } else {
                controller.request_columns(&files).await?
            };

            let picker: &dyn ColumnPicker = if no_prompt { &NoPrompt } else { &DialoguerPicker };
            let selection = resolve_selection(&catalog, args, picker)?;

            controller.submit_match(&files, &selection).await?;
            if let Some(path) = controller.view().saved_path() {
                println!("→ {}", path.display());
            }
        }

        Commands::Config { set_server, show } => {
            let mut config = config;

            if let Some(url) = set_server {
                config.set_server_url(url)?;
                println!("✔ サーバーURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  サーバー: {}", config.server_url(cli.server.as_deref()));
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  保存ファイル名: {}", config.output_file_name);
                if let Ok(path) = Config::config_path() {
                    println!("  設定ファイル: {}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn build_controller(
    config: &Config,
    server_override: Option<&str>,
    output: Option<PathBuf>,
) -> Result<Controller> {
    let server = config.server_url(server_override);
    tracing::debug!(server = %server, "using match server");

    let service = HttpMatchService::new(&server, config.timeout())?;
    let view = TerminalView::new(config.output_path(output));
    Ok(UploadController::new(service, view))
}

/// 存在しないパスは未選択として扱う
///
/// カラム取得では送信前の検証で、照合ではサーバーの応答でエラー表示になる
fn file_selection(file1: PathBuf, file2: PathBuf) -> FileSelection<PathBuf> {
    FileSelection::new(existing_file(file1), existing_file(file2))
}

fn existing_file(path: PathBuf) -> Option<PathBuf> {
    if path.is_file() {
        Some(path)
    } else {
        tracing::warn!("{}", SheetMatchError::FileNotFound(path.display().to_string()));
        None
    }
}
