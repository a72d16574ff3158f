// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use async_trait::async_trait;
use clap::Subcommand;
use log::error;
use serde_json::Value;
use tokio::fs;

use crate::{
    api::news::{
        CreateNews, DeleteNews, GetNews, GetPageContent, ListNews, UpdateNews, UpdatePageContent,
        UploadNewsImage,
    },
    error::{Error, Result},
    transport::Transport,
};

use super::{parse_json, show};

/// Read and publish news.
#[derive(Debug, Subcommand)]
pub(crate) enum News {
    List,
    Get {
        #[clap()]
        id: u64,
    },
    Create {
        #[arg(value_parser = parse_json)]
        data: Value,
    },
    Update {
        #[clap()]
        id: u64,
        #[arg(value_parser = parse_json)]
        data: Value,
    },
    Delete {
        #[clap()]
        id: u64,
    },
    /// Upload a picture for use in a news body and print its URL.
    UploadImage {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },
}

#[async_trait]
impl super::Command for News {
    async fn execute(self, transport: &Transport) -> Result<()> {
        match self {
            Self::List => show(ListNews, transport).await,
            Self::Get { id } => show(GetNews { news_id: id }, transport).await,
            Self::Create { data } => show(CreateNews { data }, transport).await,
            Self::Update { id, data } => show(UpdateNews { news_id: id, data }, transport).await,
            Self::Delete { id } => show(DeleteNews { news_id: id }, transport).await,
            Self::UploadImage { file } => {
                let Some(file_name) = file.file_name().and_then(|n| n.to_str()) else {
                    error!("The path {} does not name a file", file.display());
                    return Err(Error::Command);
                };
                let upload = UploadNewsImage {
                    file_name: file_name.to_owned(),
                    bytes: fs::read(&file).await?,
                };
                show(upload, transport).await
            }
        }
    }
}

/// Read and edit the static pages, such as `about` and `guide`.
#[derive(Debug, Subcommand)]
pub(crate) enum Content {
    Get {
        #[clap()]
        key: String,
    },
    Update {
        #[clap()]
        key: String,
        #[arg(value_parser = parse_json)]
        data: Value,
    },
}

#[async_trait]
impl super::Command for Content {
    async fn execute(self, transport: &Transport) -> Result<()> {
        match self {
            Self::Get { key } => show(GetPageContent { page_key: key }, transport).await,
            Self::Update { key, data } => {
                show(UpdatePageContent { page_key: key, data }, transport).await
            }
        }
    }
}
