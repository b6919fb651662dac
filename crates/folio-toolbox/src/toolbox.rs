// toolbox.rs — The capability set exposed to bots.

use crate::error::ToolboxError;
use crate::operation::Operation;

/// File operations available to a bot during one generation round.
///
/// Paths are repository-relative, forward-slash separated. Implementations
/// record every call as an [`Operation`] regardless of outcome, so the
/// recorder sees speculative deletes and failed reads too.
pub trait Toolbox {
    /// Enumerate all files visible to this surface.
    fn list_files(&mut self, reason: Option<&str>) -> Result<Vec<String>, ToolboxError>;

    /// Read a file's content, failing with [`ToolboxError::FileNotFound`]
    /// if the path is absent.
    fn read_file(&mut self, path: &str, reason: Option<&str>) -> Result<String, ToolboxError>;

    /// Create or replace a file's content.
    fn write_file(
        &mut self,
        path: &str,
        contents: &str,
        reason: Option<&str>,
    ) -> Result<(), ToolboxError>;

    /// Delete a file. Deleting an absent path is a no-op, not an error:
    /// bots frequently attempt speculative deletes.
    fn delete_file(&mut self, path: &str, reason: Option<&str>) -> Result<(), ToolboxError>;

    /// Move `src` to `dst` (write-then-delete at the semantic level).
    /// Fails with [`ToolboxError::FileNotFound`] when `src` is absent.
    fn rename_file(
        &mut self,
        src: &str,
        dst: &str,
        reason: Option<&str>,
    ) -> Result<(), ToolboxError>;

    /// Operations recorded so far, in call order.
    fn operations(&self) -> &[Operation];
}
