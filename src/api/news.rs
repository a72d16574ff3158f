// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;

use crate::config::UPLOAD_TIMEOUT;

use super::{Call, Executor, Upload};

pub(crate) struct ListNews;

impl From<ListNews> for Call {
    fn from(_: ListNews) -> Self {
        Self::get("/news/")
    }
}

impl Executor for ListNews {
    type Response = Value;
}

pub(crate) struct GetNews {
    pub(crate) news_id: u64,
}

impl From<GetNews> for Call {
    fn from(value: GetNews) -> Self {
        Self::get(format!("/news/{}/", value.news_id))
    }
}

impl Executor for GetNews {
    type Response = Value;
}

pub(crate) struct CreateNews {
    pub(crate) data: Value,
}

impl From<CreateNews> for Call {
    fn from(value: CreateNews) -> Self {
        Self::post("/admin/news/").with_json(value.data)
    }
}

impl Executor for CreateNews {
    type Response = Value;
}

pub(crate) struct UpdateNews {
    pub(crate) news_id: u64,
    pub(crate) data: Value,
}

impl From<UpdateNews> for Call {
    fn from(value: UpdateNews) -> Self {
        Self::put(format!("/admin/news/{}/", value.news_id)).with_json(value.data)
    }
}

impl Executor for UpdateNews {
    type Response = Value;
}

pub(crate) struct DeleteNews {
    pub(crate) news_id: u64,
}

impl From<DeleteNews> for Call {
    fn from(value: DeleteNews) -> Self {
        Self::delete(format!("/admin/news/{}/delete/", value.news_id))
    }
}

impl Executor for DeleteNews {
    type Response = Value;
}

/// Uploads a picture for use in news bodies. Uploads get a longer timeout
/// than ordinary calls.
pub(crate) struct UploadNewsImage {
    pub(crate) file_name: String,
    pub(crate) bytes: Vec<u8>,
}

impl From<UploadNewsImage> for Call {
    fn from(value: UploadNewsImage) -> Self {
        Self::post("/admin/news/upload-image/")
            .with_upload(Upload {
                field: "image",
                file_name: value.file_name,
                bytes: value.bytes,
            })
            .with_timeout(UPLOAD_TIMEOUT)
    }
}

impl Executor for UploadNewsImage {
    type Response = Value;
}

/// One of the editable static pages, e.g. `about` or `guide`.
pub(crate) struct GetPageContent {
    pub(crate) page_key: String,
}

impl From<GetPageContent> for Call {
    fn from(value: GetPageContent) -> Self {
        Self::get(format!("/content/{}/", value.page_key))
    }
}

impl Executor for GetPageContent {
    type Response = Value;
}

pub(crate) struct UpdatePageContent {
    pub(crate) page_key: String,
    pub(crate) data: Value,
}

impl From<UpdatePageContent> for Call {
    fn from(value: UpdatePageContent) -> Self {
        Self::put(format!("/admin/content/{}/", value.page_key)).with_json(value.data)
    }
}

impl Executor for UpdatePageContent {
    type Response = Value;
}
