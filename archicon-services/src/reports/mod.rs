//! HTML report preferences.
//!
//! The report generator runs an optional shell command once a report has been
//! written. The command is stored verbatim under
//! [HTML_REPORT_POST_PROCESS_COMMAND]; interpreting it is up to the generator.

pub mod messages;
mod page;

pub use page::HtmlReportPreferencesPage;

use crate::preferences::PreferenceStore;

/// Preference key of the post-process command.
pub const HTML_REPORT_POST_PROCESS_COMMAND: &str = "HTMLReportPostProcessCommand";

/// Help context of the report preferences page.
pub const HELP_ID: &str = "archicon.help.prefsHTMLReport";

/// Register the report preference defaults in `store`.
pub fn initialize_default_preferences(store: &dyn PreferenceStore) {
    store.set_default(HTML_REPORT_POST_PROCESS_COMMAND, "");
}

/// The configured post-process command, or `None` when none is set.
pub fn post_process_command(store: &dyn PreferenceStore) -> Option<String> {
    let command = store.get_string(HTML_REPORT_POST_PROCESS_COMMAND);
    (!command.trim().is_empty()).then_some(command)
}
