//! Conversation history export.
//!
//! Records are streamed through an [`ExportSink`] chosen by [`Format`].

pub mod formats;
mod traits;

pub use formats::{Format, create_export_sink};
pub use traits::{ExportSink, ExportableConversation};

use crate::Result;
use crate::models::ConversationRecord;

/// Writes `records` to `sink` in order and finalizes it.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns an error if any write or the final flush fails.
pub fn export_history(records: &[ConversationRecord], mut sink: Box<dyn ExportSink>) -> Result<usize> {
    for record in records {
        sink.write(&ExportableConversation::from(record))?;
    }
    sink.finalize()?;
    Ok(records.len())
}
