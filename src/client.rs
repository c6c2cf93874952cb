//! 照合サーバー連携（reqwest multipart）

use crate::error::{Result, SheetMatchError};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use sheet_match_common::form::endpoint_url;
use sheet_match_common::{
    Error, MatchForm, MatchService, Reply, UploadPair, COLUMNS_ENDPOINT, MATCH_ENDPOINT,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI版の通信実装
#[derive(Debug, Clone)]
pub struct HttpMatchService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMatchService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SheetMatchError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    async fn post(&self, endpoint: &str, form: Form) -> sheet_match_common::Result<Reply> {
        let url = endpoint_url(&self.base_url, endpoint);
        tracing::debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(transport_error)?.to_vec();

        Ok(Reply {
            status,
            content_type,
            body,
        })
    }
}

impl MatchService for HttpMatchService {
    type File = PathBuf;

    async fn post_columns(
        &self,
        files: UploadPair<'_, PathBuf>,
    ) -> sheet_match_common::Result<Reply> {
        let form = files_form(files.fields()).await?;
        self.post(COLUMNS_ENDPOINT, form).await
    }

    async fn post_match(
        &self,
        form: &MatchForm<'_, PathBuf>,
    ) -> sheet_match_common::Result<Reply> {
        let mut data = files_form(form.file_fields()).await?;
        for (name, value) in form.text_fields() {
            data = data.text(name, value.to_string());
        }
        self.post(MATCH_ENDPOINT, data).await
    }
}

async fn files_form<'a>(
    files: impl IntoIterator<Item = (&'static str, &'a PathBuf)>,
) -> sheet_match_common::Result<Form> {
    let mut form = Form::new();
    for (name, path) in files {
        form = form.part(name, file_part(path).await?);
    }
    Ok(form)
}

/// ファイルを読み込んでmultipartパートにする（ファイル名は元のまま）
async fn file_part(path: &Path) -> sheet_match_common::Result<Part> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::Transport(format!("failed to read {}: {}", path.display(), e)))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(Part::bytes(bytes).file_name(file_name))
}

fn transport_error(e: reqwest::Error) -> Error {
    Error::Transport(e.to_string())
}
