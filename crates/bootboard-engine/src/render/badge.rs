use bootboard_types::Status;
use serde::Serialize;

use super::markup::Markup;

/// Closed set of status display classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Success,
    Failure,
    Offline,
    Unknown,
}

impl From<Status> for BadgeCategory {
    fn from(status: Status) -> Self {
        match status {
            Status::Pass => BadgeCategory::Success,
            Status::Fail => BadgeCategory::Failure,
            Status::Offline => BadgeCategory::Offline,
            Status::Unknown => BadgeCategory::Unknown,
        }
    }
}

impl BadgeCategory {
    pub const ALL: [BadgeCategory; 4] = [
        BadgeCategory::Success,
        BadgeCategory::Failure,
        BadgeCategory::Offline,
        BadgeCategory::Unknown,
    ];

    pub fn from_raw(raw: Option<&str>) -> Self {
        Status::from_raw(raw).into()
    }

    pub fn label_class(self) -> &'static str {
        match self {
            BadgeCategory::Success => "label-success",
            BadgeCategory::Failure => "label-danger",
            BadgeCategory::Offline => "label-info",
            BadgeCategory::Unknown => "label-warning",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            BadgeCategory::Success => "fa fa-check",
            BadgeCategory::Failure => "fa fa-exclamation-triangle",
            BadgeCategory::Offline => "fa fa-power-off",
            BadgeCategory::Unknown => "fa fa-question",
        }
    }

    /// Tooltip copy of the boot status column.
    pub fn boot_tooltip(self) -> &'static str {
        match self {
            BadgeCategory::Success => "Board booted successfully",
            BadgeCategory::Failure => "Board boot failed",
            BadgeCategory::Offline => "Board offline",
            BadgeCategory::Unknown => "Board boot status unknown",
        }
    }

    /// Short status word for text-only output.
    pub fn short_label(self) -> &'static str {
        match self {
            BadgeCategory::Success => "PASS",
            BadgeCategory::Failure => "FAIL",
            BadgeCategory::Offline => "OFFLINE",
            BadgeCategory::Unknown => "UNKNOWN",
        }
    }

    /// Category of a badge previously built by [`BadgeCategory::badge`].
    pub fn from_markup(markup: &Markup) -> Option<Self> {
        match markup {
            Markup::Tooltip { child, .. } => Self::from_markup(child),
            Markup::Label { class, .. } => Self::ALL
                .into_iter()
                .find(|category| category.label_class() == class.as_str()),
            _ => None,
        }
    }

    pub fn badge(self) -> Markup {
        Markup::tooltip(
            self.boot_tooltip(),
            Markup::Label {
                class: self.label_class().to_string(),
                icon: self.icon().to_string(),
            },
        )
    }
}
