use std::fmt;

use serde::Serialize;

/// Ancestor holding a question's title and help text.
pub const QUESTION_CONTAINER: &str = "div.Qr7Oae";

/// Structural category of an input, independent of what it asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    ShortText,
    Paragraph,
    SingleChoice,
    MultiChoice,
    Dropdown,
    Scale,
    Date,
    Time,
    DateTime,
}

impl FieldKind {
    /// Pass order of a run.
    pub const ALL: [FieldKind; 9] = [
        FieldKind::ShortText,
        FieldKind::Paragraph,
        FieldKind::SingleChoice,
        FieldKind::MultiChoice,
        FieldKind::Dropdown,
        FieldKind::Scale,
        FieldKind::Date,
        FieldKind::Time,
        FieldKind::DateTime,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            FieldKind::ShortText => r#"input[type="text"]"#,
            FieldKind::Paragraph => "textarea",
            // Scales are radiogroups too; they get their own pass.
            FieldKind::SingleChoice => r#"div[role="radiogroup"]:not(.lLfZXe)"#,
            FieldKind::MultiChoice => r#"div[role="list"]"#,
            FieldKind::Dropdown => r#"div[role="listbox"]"#,
            FieldKind::Scale => r#"div[role="radiogroup"].lLfZXe"#,
            FieldKind::Date => r#"input[type="date"]"#,
            FieldKind::Time => r#"input[type="time"]"#,
            FieldKind::DateTime => r#"input[type="datetime-local"]"#,
        }
    }

    /// Selector for the options of a group kind. Dropdown options are queried
    /// page-wide once the listbox is open.
    pub fn option_selector(self) -> Option<&'static str> {
        match self {
            FieldKind::SingleChoice | FieldKind::Scale => Some(r#"div[role="radio"]"#),
            FieldKind::MultiChoice => Some(r#"div[role="checkbox"]"#),
            FieldKind::Dropdown => Some(r#"div[role="option"]"#),
            _ => None,
        }
    }

    /// Kinds whose options are enumerated inside each group during the scan.
    pub fn is_group(self) -> bool {
        matches!(
            self,
            FieldKind::SingleChoice | FieldKind::MultiChoice | FieldKind::Scale
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKind::ShortText => "text field",
            FieldKind::Paragraph => "textarea",
            FieldKind::SingleChoice => "radio group",
            FieldKind::MultiChoice => "checkbox group",
            FieldKind::Dropdown => "dropdown",
            FieldKind::Scale => "linear scale",
            FieldKind::Date => "date field",
            FieldKind::Time => "time field",
            FieldKind::DateTime => "datetime field",
        }
    }

    /// Leading words of the per-element failure message.
    pub fn failure_prefix(self) -> &'static str {
        match self {
            FieldKind::ShortText => "Failed to fill text field",
            FieldKind::Paragraph => "Failed to fill textarea",
            FieldKind::SingleChoice => "Failed to select radio in group",
            FieldKind::MultiChoice => "Failed to select checkboxes in group",
            FieldKind::Dropdown => "Failed to select dropdown",
            FieldKind::Scale => "Failed to select scale option",
            FieldKind::Date => "Failed to fill date field",
            FieldKind::Time => "Failed to fill time field",
            FieldKind::DateTime => "Failed to fill datetime field",
        }
    }

    /// File-name friendly tag used for diagnostic captures.
    pub fn slug(self) -> &'static str {
        match self {
            FieldKind::ShortText => "text_field",
            FieldKind::Paragraph => "textarea",
            FieldKind::SingleChoice => "radio",
            FieldKind::MultiChoice => "checkbox",
            FieldKind::Dropdown => "dropdown",
            FieldKind::Scale => "scale",
            FieldKind::Date => "date_field",
            FieldKind::Time => "time_field",
            FieldKind::DateTime => "datetime_field",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the scanner learned about one element. Built fresh on every scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub kind: FieldKind,
    pub visible: bool,
    pub enabled: bool,
    /// Surrounding question text; empty when it could not be read.
    pub question: String,
}

impl FieldDescriptor {
    pub fn is_fillable(&self) -> bool {
        self.visible && self.enabled
    }
}
