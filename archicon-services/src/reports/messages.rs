//! User-facing strings of the report preferences page.

/// Title of the settings group.
pub const SETTINGS_GROUP: &str = "Settings";

/// Label above the command field.
pub const POST_PROCESS_COMMAND_LABEL: &str = "Post-process command:";

/// Explanation below the command field.
pub const POST_PROCESS_COMMAND_DESCRIPTION: &str =
    "A command to run after the HTML report has been generated, for example to copy or \
     upload the report folder. Leave empty to run nothing.";
