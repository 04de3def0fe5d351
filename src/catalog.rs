//! The field catalog: the mapping between the tool's UI field vocabulary
//! and JIRA's field and custom-field identifiers.
//!
//! The catalog is a static table interpreted by the projector and the
//! flattener, so the export columns, header labels, and extraction rules all
//! come from one place instead of parallel per-field match arms.

/// How a field's raw JSON value is turned into a spreadsheet cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain string value (summary, description).
    Text,
    /// Object carrying a `name` property (status, issuetype, priority).
    NameObject,
    /// Object carrying a `displayName` property (assignee).
    ///
    /// Absent values render as `"Unassigned"`, not the empty string.
    PersonObject,
    /// ISO-8601 timestamp rendered as a calendar date.
    Date,
    /// List of strings, joined with `", "` (labels).
    List,
    /// List of objects, each contributing its `name`, joined with `", "`
    /// (fix versions).
    NamedList,
    /// Custom-field value object: use its `value` property when present,
    /// otherwise the raw scalar.
    CustomValue,
    /// Numeric custom field, passed through as a number.
    Numeric,
}

/// One entry in the field catalog.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// The stable UI key used by requests and uploads.
    pub ui_key: &'static str,
    /// The human-readable column header.
    pub display_label: &'static str,
    /// The JIRA field identifier sent to the search API.
    pub jira_key: &'static str,
    /// Extraction strategy for the raw value.
    pub kind: FieldKind,
}

/// The full catalog. `ui_key` is unique within the table.
///
/// The custom-field ids follow the most recent export variant in production,
/// which mapped custom fields to their numeric identifiers explicitly.
pub const CATALOG: &[FieldDescriptor] = &[
    FieldDescriptor {
        ui_key: "summary",
        display_label: "Summary",
        jira_key: "summary",
        kind: FieldKind::Text,
    },
    FieldDescriptor {
        ui_key: "description",
        display_label: "Description",
        jira_key: "description",
        kind: FieldKind::Text,
    },
    FieldDescriptor {
        ui_key: "status",
        display_label: "Status",
        jira_key: "status",
        kind: FieldKind::NameObject,
    },
    FieldDescriptor {
        ui_key: "issuetype",
        display_label: "Issue Type",
        jira_key: "issuetype",
        kind: FieldKind::NameObject,
    },
    FieldDescriptor {
        ui_key: "priority",
        display_label: "Priority",
        jira_key: "priority",
        kind: FieldKind::NameObject,
    },
    FieldDescriptor {
        ui_key: "assignee",
        display_label: "Assignee",
        jira_key: "assignee",
        kind: FieldKind::PersonObject,
    },
    FieldDescriptor {
        ui_key: "created",
        display_label: "Created Date",
        jira_key: "created",
        kind: FieldKind::Date,
    },
    FieldDescriptor {
        ui_key: "updated",
        display_label: "Updated Date",
        jira_key: "updated",
        kind: FieldKind::Date,
    },
    FieldDescriptor {
        ui_key: "labels",
        display_label: "Labels",
        jira_key: "labels",
        kind: FieldKind::List,
    },
    FieldDescriptor {
        ui_key: "fixVersions",
        display_label: "Fix Versions",
        jira_key: "fixVersions",
        kind: FieldKind::NamedList,
    },
    FieldDescriptor {
        ui_key: "T-shirt size",
        display_label: "T-shirt size",
        jira_key: "customfield_10500",
        kind: FieldKind::CustomValue,
    },
    FieldDescriptor {
        ui_key: "groomingDeadline",
        display_label: "Grooming Deadline",
        jira_key: "customfield_13602",
        kind: FieldKind::Date,
    },
    FieldDescriptor {
        ui_key: "BAEffort",
        display_label: "BA Effort",
        jira_key: "customfield_13603",
        kind: FieldKind::Numeric,
    },
];

/// Look up a UI field key in the catalog.
///
/// Returns `None` for keys the catalog does not know. Callers treat unknown
/// keys as literal JIRA field identifiers (see [`jira_key_for`]): the
/// pass-through lets new JIRA fields be exported without a catalog update,
/// at the cost of silently accepting typos. That trade-off is deliberate.
pub fn resolve(ui_key: &str) -> Option<&'static FieldDescriptor> {
    CATALOG.iter().find(|d| d.ui_key == ui_key)
}

/// The JIRA field identifier for a UI key, passing unknown keys through
/// unchanged.
pub fn jira_key_for(ui_key: &str) -> &str {
    match resolve(ui_key) {
        Some(descriptor) => descriptor.jira_key,
        None => ui_key,
    }
}

/// The column header for a UI key, falling back to the raw key itself.
pub fn label_for(ui_key: &str) -> &str {
    match resolve(ui_key) {
        Some(descriptor) => descriptor.display_label,
        None => ui_key,
    }
}
