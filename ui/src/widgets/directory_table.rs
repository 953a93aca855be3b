//! The editable directory table.
//!
//! Each column header holds the editable name, a delete button and both
//! filters. Cells render by column role. Interactions are collected as
//! [`TableAction`]s while the table borrows the editor, then applied.

use directory_business::{
    ACTIVE_NO, ACTIVE_YES, ColumnRole, DirectoryEditor, DirectoryViewCompute, EditError,
    PhotoUploadCompute, UploadPhotoCommand, UploadPhotoInput, UploadStatus,
};
use directory_states::StateCtx;
use egui::{Frame, Margin, Response, RichText, TextEdit, Ui};
use egui_extras::{Column, TableBuilder};

use crate::utils::colors::{COLOR_GREEN, COLOR_RED, HEADER_BG_COLOR};
use crate::utils::file_picker::PhotoPicker;

const ROW_HEIGHT: f32 = 30.0;
const HEADER_HEIGHT: f32 = 100.0;
const CELL_MIN_WIDTH: f32 = 140.0;
const ACTIONS_WIDTH: f32 = 110.0;
/// Room left under the table for the save button.
const FOOTER_HEIGHT: f32 = 40.0;

/// Select filter label for "no filter".
pub const ALL_OPTION: &str = "Todos";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    RenameColumn { column: usize, name: String },
    RequestDeleteColumn(usize),
    TextFilter { column: usize, value: String },
    SelectFilter { column: usize, value: String },
    UpdateCell { row: usize, column: usize, value: String },
    PickPhoto(usize),
    RequestDeleteRow(usize),
}

pub fn directory_table(
    state_ctx: &mut StateCtx,
    picker: &dyn PhotoPicker,
    ui: &mut Ui,
) -> Response {
    let mut actions = Vec::new();

    let uploading = match state_ctx.compute::<PhotoUploadCompute>().status {
        UploadStatus::Uploading { row } => Some(row),
        _ => None,
    };
    let response = render_table(
        ui,
        state_ctx.state::<DirectoryEditor>(),
        state_ctx.compute::<DirectoryViewCompute>(),
        uploading,
        &mut actions,
    );

    for action in actions {
        apply_action(state_ctx, picker, action);
    }

    response
}

/// Apply one interaction. Edits that no longer fit the table are logged and
/// dropped.
pub fn apply_action(state_ctx: &mut StateCtx, picker: &dyn PhotoPicker, action: TableAction) {
    if let TableAction::PickPhoto(row) = action {
        let Some(file) = picker.pick_photo() else {
            return;
        };
        state_ctx.update::<UploadPhotoInput>(|input| *input = UploadPhotoInput::new(row, file));
        state_ctx.dispatch::<UploadPhotoCommand>();
        return;
    }

    state_ctx.update::<DirectoryEditor>(|editor| {
        if let Err(err) = apply_edit(editor, action) {
            log::warn!("Ignored table edit: {err}");
        }
    });
}

fn apply_edit(editor: &mut DirectoryEditor, action: TableAction) -> Result<(), EditError> {
    match action {
        TableAction::RenameColumn { column, name } => editor.rename_column(column, name),
        TableAction::RequestDeleteColumn(column) => editor.request_delete_column(column),
        TableAction::TextFilter { column, value } => editor.set_text_filter(column, value),
        TableAction::SelectFilter { column, value } => editor.set_select_filter(column, value),
        TableAction::UpdateCell { row, column, value } => editor.update_cell(row, column, value),
        TableAction::RequestDeleteRow(row) => editor.request_delete_row(row),
        TableAction::PickPhoto(_) => Ok(()),
    }
}

fn render_table(
    ui: &mut Ui,
    editor: &DirectoryEditor,
    view: &DirectoryViewCompute,
    uploading: Option<usize>,
    actions: &mut Vec<TableAction>,
) -> Response {
    let table = editor.table();
    let columns = table.column_count();

    if columns == 0 {
        return ui.label("Sin datos");
    }

    let max_height = (ui.available_height() - FOOTER_HEIGHT).max(120.0);

    ui.vertical(|ui| {
        TableBuilder::new(ui)
            .id_salt("directory_table")
            .striped(true)
            .resizable(true)
            .max_scroll_height(max_height)
            .columns(Column::auto().at_least(CELL_MIN_WIDTH), columns)
            .column(Column::exact(ACTIONS_WIDTH))
            .header(HEADER_HEIGHT, |mut header| {
                for (column, name) in table.columns().iter().enumerate() {
                    header.col(|ui| {
                        header_cell(ui, |ui| {
                            render_header(ui, editor, view, column, name, actions);
                        });
                    });
                }
                header.col(|ui| {
                    header_cell(ui, |ui| {
                        ui.strong("Acciones");
                    });
                });
            })
            .body(|mut body| {
                for &row in &view.rows {
                    let Some(cells) = table.row(row) else {
                        continue;
                    };
                    body.row(ROW_HEIGHT, |mut table_row| {
                        for (column, value) in cells.iter().enumerate() {
                            table_row.col(|ui| {
                                render_cell(
                                    ui,
                                    editor.column_role(column),
                                    (row, column),
                                    value,
                                    uploading == Some(row),
                                    actions,
                                );
                            });
                        }
                        table_row.col(|ui| {
                            if ui.button("Eliminar Fila").clicked() {
                                actions.push(TableAction::RequestDeleteRow(row));
                            }
                        });
                    });
                }
            });
    })
    .response
}

fn header_cell(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui)) {
    Frame::NONE
        .fill(HEADER_BG_COLOR)
        .inner_margin(Margin::symmetric(6, 4))
        .show(ui, add_contents);
}

fn render_header(
    ui: &mut Ui,
    editor: &DirectoryEditor,
    view: &DirectoryViewCompute,
    column: usize,
    name: &str,
    actions: &mut Vec<TableAction>,
) {
    let filters = editor.filters();
    let text = filters.text().get(column).map_or("", String::as_str);
    let select = filters.select().get(column).map_or("", String::as_str);
    let options = view.options.get(column).map_or(&[][..], Vec::as_slice);

    ui.vertical(|ui| {
        ui.horizontal(|ui| {
            let mut edited = name.to_owned();
            let name_edit = TextEdit::singleline(&mut edited)
                .id_salt(("column_name", column))
                .desired_width(CELL_MIN_WIDTH - 36.0);
            if ui.add(name_edit).changed() {
                actions.push(TableAction::RenameColumn {
                    column,
                    name: edited,
                });
            }
            if ui
                .small_button("×")
                .on_hover_text("Eliminar columna")
                .clicked()
            {
                actions.push(TableAction::RequestDeleteColumn(column));
            }
        });

        let mut text_filter = text.to_owned();
        let filter_edit = TextEdit::singleline(&mut text_filter)
            .id_salt(("text_filter", column))
            .hint_text("Filtrar...");
        if ui.add(filter_edit).changed() {
            actions.push(TableAction::TextFilter {
                column,
                value: text_filter,
            });
        }

        let selected_text = if select.is_empty() { ALL_OPTION } else { select };
        egui::ComboBox::from_id_salt(("select_filter", column))
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                if ui.selectable_label(select.is_empty(), ALL_OPTION).clicked() {
                    actions.push(TableAction::SelectFilter {
                        column,
                        value: String::new(),
                    });
                }
                // An empty value would read as "no filter".
                for option in options.iter().filter(|option| !option.is_empty()) {
                    if ui
                        .selectable_label(select == option.as_str(), option.as_str())
                        .clicked()
                    {
                        actions.push(TableAction::SelectFilter {
                            column,
                            value: option.clone(),
                        });
                    }
                }
            });
    });
}

fn render_cell(
    ui: &mut Ui,
    role: ColumnRole,
    (row, column): (usize, usize),
    value: &str,
    uploading: bool,
    actions: &mut Vec<TableAction>,
) {
    match role {
        ColumnRole::Active => {
            ui.horizontal(|ui| {
                for (mark, color) in [(ACTIVE_YES, COLOR_GREEN), (ACTIVE_NO, COLOR_RED)] {
                    let label = RichText::new(mark).color(color);
                    if ui.selectable_label(value == mark, label).clicked() && value != mark {
                        actions.push(TableAction::UpdateCell {
                            row,
                            column,
                            value: mark.to_owned(),
                        });
                    }
                }
            });
        }
        ColumnRole::Photo => {
            ui.horizontal(|ui| {
                let has_photo = !value.is_empty();
                if has_photo {
                    ui.label("Ya hay foto").on_hover_text(value);
                } else {
                    ui.weak("Sin foto");
                }
                if uploading {
                    ui.spinner();
                } else {
                    let label = if has_photo { "Cambiar foto" } else { "Subir foto" };
                    if ui.small_button(label).clicked() {
                        actions.push(TableAction::PickPhoto(row));
                    }
                }
            });
        }
        ColumnRole::FirstName
        | ColumnRole::PaternalSurname
        | ColumnRole::MaternalSurname
        | ColumnRole::Plain => {
            let mut edited = value.to_owned();
            let cell_edit = TextEdit::singleline(&mut edited).id_salt(("cell", row, column));
            if ui.add(cell_edit).changed() {
                actions.push(TableAction::UpdateCell {
                    row,
                    column,
                    value: edited,
                });
            }
        }
    }
}
