//! Detail-page paths.
//!
//! Boot detail pages are addressed by a fixed hierarchy
//! `board -> job -> kernel -> defconfig_full -> lab_name`; a link at any level
//! carries every ancestor segment it needs.

use bootboard_types::Record;

use crate::error::{Error, Result};

pub const BOOT_HIERARCHY: [&str; 5] = ["board", "job", "kernel", "defconfig_full", "lab_name"];

pub const BOOT_DETAIL_TEMPLATE: &str =
    "/boot/%(board)s/job/%(job)s/kernel/%(kernel)s/defconfig/%(defconfig_full)s/lab/%(lab_name)s/";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(String),
}

/// Path template with `%(name)s` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    segments: Vec<Segment>,
}

impl UrlTemplate {
    /// Parse `template`, requiring its placeholders to be exactly `elements`,
    /// in that order.
    pub fn new(template: &str, elements: &[&str]) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = template;

        while let Some(start) = rest.find("%(") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let end = after.find(")s").ok_or_else(|| {
                Error::Template(format!("unterminated placeholder in '{}'", template))
            })?;
            segments.push(Segment::Field(after[..end].to_string()));
            rest = &after[end + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        let template = Self { segments };
        let fields: Vec<&str> = template.fields().collect();
        if fields != elements {
            return Err(Error::Template(format!(
                "placeholders {:?} do not match elements {:?}",
                fields, elements
            )));
        }
        Ok(template)
    }

    /// Canonical boot detail template (see [`BOOT_DETAIL_TEMPLATE`]).
    pub fn boot_detail() -> Self {
        let literal = |s: &str| Segment::Literal(s.to_string());
        let field = |s: &str| Segment::Field(s.to_string());
        Self {
            segments: vec![
                literal("/boot/"),
                field("board"),
                literal("/job/"),
                field("job"),
                literal("/kernel/"),
                field("kernel"),
                literal("/defconfig/"),
                field("defconfig_full"),
                literal("/lab/"),
                field("lab_name"),
                literal("/"),
            ],
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every placeholder from `record`, in template order.
    /// Returns `None` when the record lacks one of the fields.
    pub fn fill(&self, record: &Record) -> Option<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(name) => out.push_str(record.field(name)?),
            }
        }
        Some(out)
    }
}

/// Depth of a boot link within the detail hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootLevel {
    /// `/boot/all/job/<job>/`
    Job,
    /// `/boot/all/job/<job>/kernel/<kernel>/`
    Kernel,
    /// `/boot/<board>/job/<job>/kernel/<kernel>/`
    Board,
    /// Board path plus `/defconfig/<defconfig_full>/`
    Defconfig,
    /// Defconfig path plus `/lab/<lab_name>/`
    Lab,
}

pub fn boot_link(record: &Record, level: BootLevel) -> Option<String> {
    let board = match level {
        BootLevel::Job | BootLevel::Kernel => "all",
        _ => record.board.as_deref()?,
    };

    let mut path = format!("/boot/{}/job/{}/", board, record.job.as_deref()?);
    if level == BootLevel::Job {
        return Some(path);
    }

    path.push_str(&format!("kernel/{}/", record.kernel.as_deref()?));
    if matches!(level, BootLevel::Kernel | BootLevel::Board) {
        return Some(path);
    }

    path.push_str(&format!("defconfig/{}/", record.defconfig_full.as_deref()?));
    if level == BootLevel::Defconfig {
        return Some(path);
    }

    path.push_str(&format!("lab/{}/", record.lab_name.as_deref()?));
    Some(path)
}

/// Job detail page used by the failed-results summary.
pub fn job_link(record: &Record) -> Option<String> {
    Some(format!(
        "/job/{}/kernel/{}/",
        record.job.as_deref()?,
        record.kernel.as_deref()?
    ))
}

/// Boot page of a failed-boots summary row, keyed by the short defconfig.
pub fn defconfig_boot_link(record: &Record) -> Option<String> {
    Some(format!(
        "/boot/{}/job/{}/kernel/{}/defconfig/{}/",
        record.board.as_deref()?,
        record.job.as_deref()?,
        record.kernel.as_deref()?,
        record.defconfig.as_deref()?
    ))
}
