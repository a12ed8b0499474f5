//! Terminal adapter for the overwrite decision provider

use dialoguer::Confirm;
use stagesync_engine::{ConfirmProvider, OverwriteDecision};
use tracing::warn;

/// Overwrite confirmation over the controlling terminal
///
/// Fails open: when the input device errors (non-interactive run, closed
/// stdin), the copy proceeds rather than blocking the run. Escape and an
/// explicit "no" skip the file; an acknowledgement or empty accept proceeds.
#[derive(Debug, Default)]
pub struct TermConfirm;

impl TermConfirm {
    /// Create a new terminal confirmation provider
    pub fn new() -> Self {
        Self
    }
}

impl ConfirmProvider for TermConfirm {
    fn confirm_overwrite(&mut self, file_name: &str) -> OverwriteDecision {
        let question = format!("'{}' already exists. Overwrite?", file_name);
        match Confirm::new()
            .with_prompt(question)
            .default(true)
            .interact_opt()
        {
            Ok(Some(true)) => OverwriteDecision::Proceed,
            Ok(Some(false)) | Ok(None) => OverwriteDecision::Skip,
            Err(e) => {
                warn!("Overwrite prompt unavailable ({}); proceeding", e);
                OverwriteDecision::Proceed
            }
        }
    }
}
