use std::io::Write;

use tasklist_core::{ListBody, TaskListView};

#[derive(Debug, Clone)]
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    pub fn print_view(&self, out: &mut impl Write, view: &TaskListView) -> anyhow::Result<()> {
        match &view.body {
            ListBody::Placeholder(text) => {
                writeln!(out, "{}", self.paint(text, "2"))?;
            }
            ListBody::Rows(rows) => {
                let width = rows
                    .iter()
                    .map(|row| row.id.to_string().len())
                    .max()
                    .unwrap_or(0);
                for row in rows {
                    let mark = if row.done { "[x]" } else { "[ ]" };
                    let id = self.paint(&format!("{:>width$}", row.id), "33");
                    let text = if row.done {
                        self.paint(&row.text, "9")
                    } else {
                        row.text.clone()
                    };
                    writeln!(out, "{mark} {id}  {text}")?;
                }
            }
        }
        writeln!(
            out,
            "{} (filter: {})",
            view.items_left_label(),
            view.filter
        )?;
        Ok(())
    }
}
