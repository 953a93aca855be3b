//! Calls to the directory service.
//!
//! Every call takes the config by reference and returns a [`DirectoryResult`];
//! commands decide how the outcome is shown.

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::{
    BusinessConfig,
    error::{DirectoryError, DirectoryResult},
    http::{Client, Response},
    table::{DirectoryPayload, Table},
};

pub const INVALID_CREDENTIALS: &str = "Credenciales inválidas";

/// Body of `POST /login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

/// Success/failure envelope returned by login, save and upload.
#[derive(Debug, Clone, Default, Deserialize)]
struct Ack {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    filename: Option<String>,
}

/// A photo on its way to `POST /upload-photo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    pub first_name: String,
    pub paterno: String,
    pub materno: String,
}

fn status_error(response: &Response, fallback: &str) -> DirectoryError {
    let message = response
        .json::<Ack>()
        .ok()
        .and_then(|ack| ack.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_owned());
    DirectoryError::Status {
        status: response.status,
        message,
    }
}

pub async fn login(config: &BusinessConfig, credentials: &Credentials) -> DirectoryResult<()> {
    let response = Client::post(config.endpoint("login"))
        .json(credentials)?
        .send()
        .await?;

    if response.is_success() {
        info!("Logged in as '{}'", credentials.user);
        Ok(())
    } else if response.status == 401 {
        Err(status_error(&response, INVALID_CREDENTIALS))
    } else {
        let err = status_error(&response, &format!("Error del servidor ({})", response.status));
        error!("Login failed: {err}");
        Err(err)
    }
}

pub async fn fetch_directory(config: &BusinessConfig) -> DirectoryResult<Table> {
    let response = Client::get(config.endpoint("data")).send().await?;
    if !response.is_success() {
        return Err(status_error(&response, "Error al cargar los datos"));
    }
    let payload: DirectoryPayload = response.json()?;
    Ok(Table::from_payload(payload))
}

pub async fn save_directory(config: &BusinessConfig, table: &Table) -> DirectoryResult<()> {
    let response = Client::post(config.endpoint("save"))
        .json(&table.to_payload())?
        .send()
        .await?;
    if response.is_success() {
        Ok(())
    } else {
        Err(status_error(&response, "Error al guardar"))
    }
}

/// Upload a photo and return the name the service stored it under.
///
/// An empty name means the service accepted the request but kept nothing.
pub async fn upload_photo(config: &BusinessConfig, upload: PhotoUpload) -> DirectoryResult<String> {
    let response = Client::post(config.endpoint("upload-photo"))
        .file_field("photo", upload.file_name, upload.mime, upload.bytes)
        .text_field("firstName", upload.first_name)
        .text_field("paterno", upload.paterno)
        .text_field("materno", upload.materno)
        .send()
        .await?;
    if !response.is_success() {
        return Err(status_error(&response, "Error al subir la foto"));
    }
    let ack: Ack = response.json()?;
    Ok(ack.filename.unwrap_or_default())
}

/// Fetch the spreadsheet export as raw bytes.
pub async fn download_export(config: &BusinessConfig) -> DirectoryResult<Vec<u8>> {
    let response = Client::get(config.endpoint("download")).send().await?;
    if response.is_success() {
        Ok(response.body)
    } else {
        Err(status_error(&response, "Error al descargar"))
    }
}
