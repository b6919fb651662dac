// operation.rs — Operation records emitted by toolbox calls.
//
// One Operation per mutation call: a closed event kind plus a shared
// envelope (reason, timestamp). The drafter persists these as the audit
// trail for a draft's commit; additional observers (e.g. a CLI printer)
// can subscribe to the same stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a single toolbox call did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolEvent {
    /// All files were listed.
    ListFiles { count: usize },
    /// A file was read. `size` is absent when the path was missing.
    ReadFile { path: String, size: Option<usize> },
    /// A file was written.
    WriteFile { path: String, size: usize },
    /// A file was deleted (or a speculative delete hit a missing path).
    DeleteFile { path: String },
    /// A file was renamed.
    RenameFile { src_path: String, dst_path: String },
}

impl ToolEvent {
    /// Stable tool name, used as the recorder's `tool` column.
    pub fn tool_name(&self) -> &'static str {
        match self {
            ToolEvent::ListFiles { .. } => "list_files",
            ToolEvent::ReadFile { .. } => "read_file",
            ToolEvent::WriteFile { .. } => "write_file",
            ToolEvent::DeleteFile { .. } => "delete_file",
            ToolEvent::RenameFile { .. } => "rename_file",
        }
    }
}

/// One recorded mutation-surface call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    #[serde(flatten)]
    pub event: ToolEvent,
    pub reason: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Observer hook receiving every operation as it happens.
pub trait ToolObserver {
    fn on_operation(&mut self, operation: &Operation);
}

/// Ordered, append-only buffer of operations plus observer fan-out.
///
/// Shared by both toolbox strategies so recording behavior is identical.
#[derive(Default)]
pub struct OperationLog {
    operations: Vec<Operation>,
    observers: Vec<Box<dyn ToolObserver>>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_observer(&mut self, observer: Box<dyn ToolObserver>) {
        self.observers.push(observer);
    }

    pub fn record(&mut self, event: ToolEvent, reason: Option<&str>) {
        let operation = Operation {
            event,
            reason: reason.map(str::to_string),
            recorded_at: Utc::now(),
        };
        tracing::debug!(tool = operation.event.tool_name(), "recorded operation");
        for observer in &mut self.observers {
            observer.on_operation(&operation);
        }
        self.operations.push(operation);
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(std::rc::Rc<std::cell::Cell<usize>>);

    impl ToolObserver for Counter {
        fn on_operation(&mut self, _operation: &Operation) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn records_in_order() {
        let mut log = OperationLog::new();
        log.record(
            ToolEvent::WriteFile {
                path: "a".into(),
                size: 1,
            },
            Some("first"),
        );
        log.record(
            ToolEvent::DeleteFile { path: "a".into() },
            None,
        );

        let ops = log.operations();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].event.tool_name(), "write_file");
        assert_eq!(ops[0].reason.as_deref(), Some("first"));
        assert_eq!(ops[1].event.tool_name(), "delete_file");
    }

    #[test]
    fn observers_see_every_operation() {
        let count = std::rc::Rc::new(std::cell::Cell::new(0));
        let mut log = OperationLog::new();
        log.add_observer(Box::new(Counter(count.clone())));

        log.record(ToolEvent::ListFiles { count: 0 }, None);
        log.record(ToolEvent::ListFiles { count: 3 }, None);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn event_serializes_with_tool_tag() {
        let event = ToolEvent::ReadFile {
            path: "src/lib.rs".into(),
            size: Some(12),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["tool"], "read_file");
        assert_eq!(json["path"], "src/lib.rs");
    }
}
