use anyhow::{Result, anyhow};
use directory_business::{DirectoryEditor, DirectoryViewCompute};
use directory_states::StateCtx;
use tabled::{builder::Builder, settings::Style};
use tracing::instrument;

use crate::commands::load_directory;
use crate::config::Config;
use crate::output::Output;

/// Apply `COLUMN=TEXT` and `COLUMN=VALUE` filters by column name.
pub fn apply_filters(
    editor: &mut DirectoryEditor,
    filters: &[(String, String)],
    selects: &[(String, String)],
) -> Result<()> {
    let lookup = |editor: &DirectoryEditor, name: &str| {
        editor.table().column_index(name).ok_or_else(|| {
            anyhow!(
                "Unknown column '{name}'. Columns: {}",
                editor.table().columns().join(", ")
            )
        })
    };

    for (name, text) in filters {
        let column = lookup(editor, name)?;
        editor.set_text_filter(column, text.as_str())?;
    }
    for (name, value) in selects {
        let column = lookup(editor, name)?;
        editor.set_select_filter(column, value.as_str())?;
    }
    Ok(())
}

/// Render `rows` of the editor's table, prefixed with their row index.
pub fn render_rows(editor: &DirectoryEditor, rows: &[usize]) -> String {
    let table = editor.table();
    let mut builder = Builder::default();
    builder.push_record(std::iter::once("#".to_owned()).chain(table.columns().iter().cloned()));
    for &index in rows {
        if let Some(row) = table.row(index) {
            builder.push_record(std::iter::once(index.to_string()).chain(row.iter().cloned()));
        }
    }
    let mut rendered = builder.build();
    rendered.with(Style::rounded());
    rendered.to_string()
}

#[instrument(skip_all, name = "list", fields(filters = filters.len(), selects = selects.len()))]
pub async fn run_list(
    mut ctx: StateCtx,
    config: &Config,
    filters: Vec<(String, String)>,
    selects: Vec<(String, String)>,
) -> Result<()> {
    let out = Output::stdout();

    load_directory(&mut ctx, config).await?;

    let mut result = Ok(());
    ctx.update::<DirectoryEditor>(|editor| {
        result = apply_filters(editor, &filters, &selects);
    });
    result?;
    ctx.run_computed();

    let editor = ctx.state::<DirectoryEditor>();
    let rows = &ctx.compute::<DirectoryViewCompute>().rows;

    out.header(format!("{} columns", editor.table().column_count()));
    if rows.is_empty() {
        out.dim("No rows match.");
    } else {
        out.print(render_rows(editor, rows));
    }
    out.rows_summary(rows.len(), editor.table().row_count());

    ctx.shutdown().await;
    Ok(())
}
