// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::time::{Duration, Instant};

use directory_business::PhotoFile;
use directory_ui::DirectoryApp;
use directory_ui::state::State;
use directory_ui::utils::file_picker::PhotoPicker;
use egui_kittest::Harness;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, DirectoryApp>,
}

impl<'a> TestCtx<'a> {
    pub async fn new_app() -> Self {
        let mock_server = MockServer::start().await;
        let state = State::test(mock_server.uri()).with_picker(FixedPhoto);
        let app = DirectoryApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    /// An app whose persisted session flag is set, with `/api/data` mocked.
    pub async fn logged_in_app() -> Self {
        let mock_server = MockServer::start().await;
        mock_data(&mock_server, sample_directory()).await;

        let mut storage = MemoryStorage::default();
        eframe::set_value(&mut storage, directory_ui::IS_LOGGED_IN_KEY, &true);

        let state = State::test(mock_server.uri()).with_picker(FixedPhoto);
        let app = DirectoryApp::restore(state, Some(&storage as &dyn eframe::Storage));
        let harness = Harness::new_eframe(|_| app);

        let mut ctx = Self {
            mock_server,
            harness,
        };
        ctx.settle().await;
        ctx
    }

    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, DirectoryApp> {
        &mut self.harness
    }

    /// Step frames until every spawned command has finished.
    pub async fn settle(&mut self) {
        let start = Instant::now();
        loop {
            self.harness.step();
            let ctx = &self.harness.state().state().ctx;
            if ctx.task_count() == 0 && ctx.queued_count() == 0 {
                break;
            }
            assert!(
                start.elapsed() < Duration::from_secs(5),
                "Timed out waiting for pending tasks"
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.harness.step();
    }
}

pub async fn mock_data(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn sample_directory() -> Value {
    json!({
        "columns": ["Nombre", "Apellido Paterno", "Apellido Materno", "Activo", "Foto"],
        "rows": [
            ["Ana", "López", "Díaz", "✓", ""],
            ["Beto", "Ruiz", "Soto", "✗", "beto.jpg"]
        ]
    })
}

/// Always picks the same small file.
pub struct FixedPhoto;

impl PhotoPicker for FixedPhoto {
    fn pick_photo(&self) -> Option<PhotoFile> {
        Some(PhotoFile::new("foto.png", b"fake-png".to_vec()))
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl eframe::Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }

    fn flush(&mut self) {}
}
