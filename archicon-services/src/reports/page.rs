//! Form model of the HTML report preferences page.

use std::sync::Arc;

use crate::preferences::PreferenceStore;
use crate::reports::{messages, HELP_ID, HTML_REPORT_POST_PROCESS_COMMAND};

/// Binds the post-process command field to the preference store.
///
/// The field is edited freely; the store only changes on [perform_ok](Self::perform_ok).
pub struct HtmlReportPreferencesPage {
    store: Arc<dyn PreferenceStore>,
    post_process_command: String,
}

impl HtmlReportPreferencesPage {
    /// Create the page with the field loaded from `store`.
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        let post_process_command = store.get_string(HTML_REPORT_POST_PROCESS_COMMAND);
        Self {
            store,
            post_process_command,
        }
    }

    /// Help context of the page.
    pub fn help_id(&self) -> &'static str {
        HELP_ID
    }

    /// Title of the settings group.
    pub fn group_title(&self) -> &'static str {
        messages::SETTINGS_GROUP
    }

    /// Label of the command field.
    pub fn label(&self) -> &'static str {
        messages::POST_PROCESS_COMMAND_LABEL
    }

    /// Description under the command field.
    pub fn description(&self) -> &'static str {
        messages::POST_PROCESS_COMMAND_DESCRIPTION
    }

    /// Current field contents.
    pub fn post_process_command(&self) -> &str {
        &self.post_process_command
    }

    /// Edit the field.
    pub fn set_post_process_command(&mut self, command: impl Into<String>) {
        self.post_process_command = command.into();
    }

    /// Reload the field from the store, discarding edits.
    pub fn reload(&mut self) {
        self.post_process_command = self.store.get_string(HTML_REPORT_POST_PROCESS_COMMAND);
    }

    /// Store the field. Always accepts.
    pub fn perform_ok(&mut self) -> bool {
        self.store
            .set_value(HTML_REPORT_POST_PROCESS_COMMAND, &self.post_process_command);
        true
    }

    /// Clear the field. The store is untouched until [perform_ok](Self::perform_ok).
    pub fn perform_defaults(&mut self) {
        self.post_process_command.clear();
    }
}
