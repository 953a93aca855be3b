use directory_business::{DirectoryEditor, PendingConfirmation, delete_row_prompt};
use directory_ui::widgets::{TableAction, apply_action};
use kittest::Queryable;
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{FixedPhoto, TestCtx};

mod common;

fn editor<'h>(ctx: &'h mut TestCtx<'_>) -> &'h DirectoryEditor {
    ctx.harness_mut()
        .state()
        .state()
        .ctx
        .state::<DirectoryEditor>()
}

#[tokio::test]
async fn test_toolbar_and_table_are_shown() {
    let mut ctx = TestCtx::logged_in_app().await;
    let harness = ctx.harness_mut();

    for label in [
        "+ Fila",
        "+ Columna",
        "Revertir",
        "Cancelar todo",
        "Limpiar filtros",
        "Descargar Excel",
        "Guardar cambios",
    ] {
        assert!(harness.query_by_label(label).is_some(), "{label} missing");
    }
    assert_eq!(harness.query_all_by_label("Eliminar Fila").count(), 2);
    assert!(harness.query_by_label("Subir foto").is_some());
    assert!(harness.query_by_label("Cambiar foto").is_some());
    assert!(harness.query_by_label("Ya hay foto").is_some());
    assert!(harness.query_by_label("Sin foto").is_some());
}

#[tokio::test]
async fn test_add_row_then_undo() {
    let mut ctx = TestCtx::logged_in_app().await;

    ctx.harness_mut().get_by_label("+ Fila").click();
    ctx.settle().await;
    assert_eq!(editor(&mut ctx).table().row_count(), 3);
    assert_eq!(ctx.harness_mut().query_all_by_label("Eliminar Fila").count(), 3);

    ctx.harness_mut().get_by_label("Revertir").click();
    ctx.settle().await;
    assert_eq!(editor(&mut ctx).table().row_count(), 2);
    assert!(!editor(&mut ctx).can_undo());
}

#[tokio::test]
async fn test_row_delete_asks_first() {
    let mut ctx = TestCtx::logged_in_app().await;

    ctx.harness_mut()
        .get_all_by_label("Eliminar Fila")
        .next()
        .expect("a row")
        .click();
    ctx.settle().await;

    assert_eq!(
        editor(&mut ctx).pending(),
        Some(&PendingConfirmation::DeleteRow { row: 0 })
    );
    assert!(
        ctx.harness_mut()
            .query_by_label(&delete_row_prompt())
            .is_some()
    );

    ctx.harness_mut().get_by_label("Cancelar").click();
    ctx.settle().await;
    assert!(editor(&mut ctx).pending().is_none());
    assert_eq!(editor(&mut ctx).table().row_count(), 2);

    ctx.harness_mut()
        .get_all_by_label("Eliminar Fila")
        .next()
        .expect("a row")
        .click();
    ctx.settle().await;
    ctx.harness_mut().get_by_label("Aceptar").click();
    ctx.settle().await;

    let editor = editor(&mut ctx);
    assert_eq!(editor.table().row_count(), 1);
    assert_eq!(editor.table().cell(0, 0), Some("Beto"));
}

#[tokio::test]
async fn test_open_prompt_blocks_the_page() {
    let mut ctx = TestCtx::logged_in_app().await;

    ctx.harness_mut()
        .get_all_by_label("Eliminar Fila")
        .nth(1)
        .expect("second row")
        .click();
    ctx.settle().await;
    assert_eq!(
        editor(&mut ctx).pending(),
        Some(&PendingConfirmation::DeleteRow { row: 1 })
    );

    ctx.harness_mut().get_by_label("+ Fila").click();
    ctx.settle().await;
    assert_eq!(editor(&mut ctx).table().row_count(), 2);

    ctx.harness_mut().get_by_label("Aceptar").click();
    ctx.settle().await;

    let editor = editor(&mut ctx);
    assert_eq!(editor.table().row_count(), 1);
    assert_eq!(editor.table().cell(0, 0), Some("Ana"));
}

#[tokio::test]
async fn test_select_filter_hides_rows() {
    let mut ctx = TestCtx::logged_in_app().await;

    let state = ctx.harness_mut().state_mut().state_mut();
    apply_action(
        &mut state.ctx,
        &FixedPhoto,
        TableAction::SelectFilter {
            column: 3,
            value: "✗".into(),
        },
    );
    ctx.settle().await;

    assert_eq!(ctx.harness_mut().query_all_by_label("Eliminar Fila").count(), 1);

    ctx.harness_mut().get_by_label("Limpiar filtros").click();
    ctx.settle().await;
    assert_eq!(ctx.harness_mut().query_all_by_label("Eliminar Fila").count(), 2);
}

#[tokio::test]
async fn test_upload_button_stores_returned_filename() {
    let mut ctx = TestCtx::logged_in_app().await;
    Mock::given(method("POST"))
        .and(path("/api/upload-photo"))
        .and(body_string_contains("López"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "filename": "ana_lopez_diaz.png"
        })))
        .expect(1)
        .mount(ctx.mock_server())
        .await;

    ctx.harness_mut().get_by_label("Subir foto").click();
    ctx.settle().await;

    assert_eq!(editor(&mut ctx).table().cell(0, 4), Some("ana_lopez_diaz.png"));
    assert!(
        ctx.harness_mut()
            .query_by_label("Foto subida: ana_lopez_diaz.png")
            .is_some()
    );
    assert_eq!(ctx.harness_mut().query_all_by_label("Cambiar foto").count(), 2);
}

#[tokio::test]
async fn test_save_button_posts_table() {
    let mut ctx = TestCtx::logged_in_app().await;
    Mock::given(method("POST"))
        .and(path("/api/save"))
        .and(body_partial_json(json!({
            "columns": ["Nombre", "Apellido Paterno", "Apellido Materno", "Activo", "Foto"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(ctx.mock_server())
        .await;

    ctx.harness_mut().get_by_label("Guardar cambios").click();
    ctx.settle().await;

    assert!(ctx.harness_mut().query_by_label("Cambios guardados").is_some());
}

#[tokio::test]
async fn test_failed_save_is_shown() {
    let mut ctx = TestCtx::logged_in_app().await;
    Mock::given(method("POST"))
        .and(path("/api/save"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "message": "Error interno"
        })))
        .mount(ctx.mock_server())
        .await;

    ctx.harness_mut().get_by_label("Guardar cambios").click();
    ctx.settle().await;

    assert!(
        ctx.harness_mut()
            .query_by_label("Error al guardar: Error interno")
            .is_some()
    );
}
