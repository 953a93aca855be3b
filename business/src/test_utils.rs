//! Mock directory service for command tests.

#![cfg(test)]

use std::time::Duration;

use directory_states::StateCtx;
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use crate::{BusinessConfig, DirectoryEditor, Table, build_state_ctx};

/// A mock server plus a context pointed at it.
pub struct TestContext {
    pub mock_server: MockServer,
    pub ctx: StateCtx,
}

impl TestContext {
    pub async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let ctx = build_state_ctx(BusinessConfig::new(mock_server.uri()));
        Self { mock_server, ctx }
    }

    /// Put `table` in the editor as if it had just been loaded.
    pub fn load_table(&mut self, table: Table) {
        self.ctx.update::<DirectoryEditor>(|editor| editor.load(table));
        self.ctx.run_computed();
    }

    pub fn editor(&self) -> &DirectoryEditor {
        self.ctx.state::<DirectoryEditor>()
    }

    /// Spawn queued commands and apply everything they report.
    pub async fn flush_and_wait(&mut self) {
        self.ctx.sync_computes();
        self.ctx.flush_commands();

        let timeout = Duration::from_secs(5);
        let start = std::time::Instant::now();

        while self.ctx.task_count() > 0 {
            if start.elapsed() > timeout {
                panic!(
                    "Timed out waiting for pending tasks ({} still in JoinSet)",
                    self.ctx.task_count()
                );
            }
            if self.ctx.task_set_mut().join_next().await.is_some() {
                self.ctx.sync_computes();
            }
        }

        self.ctx.sync_computes();
        self.ctx.run_computed();
    }

    pub async fn mock_login(&self, success: bool) {
        let response = if success {
            ResponseTemplate::new(200).set_body_json(json!({ "success": true }))
        } else {
            ResponseTemplate::new(401).set_body_json(json!({
                "success": false,
                "message": "Credenciales inválidas"
            }))
        };

        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(response)
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_data(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path("/api/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_error(&self, http_method: &str, endpoint: &str, status: u16) {
        Mock::given(method(http_method))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "success": false,
                "message": "Error interno"
            })))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_save(&self) {
        Mock::given(method("POST"))
            .and(path("/api/save"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_upload(&self, filename: &str) {
        Mock::given(method("POST"))
            .and(path("/api/upload-photo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "filename": filename
            })))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_download(&self, bytes: &[u8]) {
        Mock::given(method("GET"))
            .and(path("/api/download"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.to_vec()))
            .mount(&self.mock_server)
            .await;
    }
}

pub fn sample_directory() -> Value {
    json!({
        "columns": ["Id", "Nombre", "Apellido Paterno", "Apellido Materno", "Activo", "Foto"],
        "rows": [
            [1, "Ana", "López", "Díaz", "✓", null],
            [2, "Beto", "Ruiz", "Soto", "✗", "beto.jpg"]
        ]
    })
}

pub fn sample_table() -> Table {
    Table::from_payload(
        serde_json::from_value(sample_directory()).unwrap_or_else(|e| panic!("{e}")),
    )
}
