// printer.rs — Echo toolbox operations to the terminal as they happen.

use folio_toolbox::{Operation, ToolEvent, ToolObserver};

/// Prints one line per tool call so the user can follow the bot's work.
pub struct ToolPrinter;

impl ToolObserver for ToolPrinter {
    fn on_operation(&mut self, operation: &Operation) {
        let line = match &operation.event {
            ToolEvent::ListFiles { count } => format!("listed {count} file(s)"),
            ToolEvent::ReadFile { path, .. } => format!("read {path}"),
            ToolEvent::WriteFile { path, size } => format!("wrote {path} ({size} bytes)"),
            ToolEvent::DeleteFile { path } => format!("deleted {path}"),
            ToolEvent::RenameFile { src_path, dst_path } => {
                format!("renamed {src_path} to {dst_path}")
            }
        };
        match &operation.reason {
            Some(reason) => println!("  {line} [{reason}]"),
            None => println!("  {line}"),
        }
    }
}
