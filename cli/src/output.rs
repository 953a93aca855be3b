//! What the subcommands print to stdout. Logs go to stderr through tracing.

use std::fmt::Display;

use console::{Term, style};

pub struct Output {
    term: Term,
}

impl Output {
    pub fn stdout() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn line(&self, line: impl AsRef<str>) {
        // A closed stdout is not worth failing the command over.
        drop(self.term.write_line(line.as_ref()));
    }

    pub fn success(&self, message: impl Display) {
        self.line(format!("{} {message}", style("✓").green().bold()));
    }

    pub fn warning(&self, message: impl Display) {
        self.line(format!("{} {message}", style("⚠").yellow().bold()));
    }

    pub fn print(&self, message: impl Display) {
        self.line(message.to_string());
    }

    pub fn header(&self, message: impl Display) {
        self.line(style(message).bold().cyan().to_string());
    }

    pub fn dim(&self, message: impl Display) {
        self.line(style(message).dim().to_string());
    }

    /// `Rows: shown of total`, plus a hint when filters hid some.
    pub fn rows_summary(&self, shown: usize, total: usize) {
        self.line(format!(
            "\n{}: {}",
            style("Rows").bold(),
            style(format!("{shown} of {total}")).cyan()
        ));
        if shown < total {
            self.dim("Filtered. Drop --filter/--select to see every row.");
        }
    }
}
