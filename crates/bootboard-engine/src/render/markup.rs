use serde::Serialize;
use std::fmt::Write;

/// Display projection of a cell.
///
/// Only produced by display-mode rendering; sort and filter values are plain
/// data and never go through this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Markup {
    Empty,
    Text { text: String },
    Small { text: String },
    Icon { class: String },
    /// Status label: a colored `label` span wrapping an icon.
    Label { class: String, icon: String },
    Link {
        href: String,
        class: Option<String>,
        children: Vec<Markup>,
    },
    Tooltip { title: String, child: Box<Markup> },
    Seq { items: Vec<Markup> },
}

impl Markup {
    pub fn text(text: impl Into<String>) -> Self {
        Markup::Text { text: text.into() }
    }

    pub fn small(text: impl Into<String>) -> Self {
        Markup::Small { text: text.into() }
    }

    pub fn icon(class: impl Into<String>) -> Self {
        Markup::Icon {
            class: class.into(),
        }
    }

    pub fn link(href: impl Into<String>, children: Vec<Markup>) -> Self {
        Markup::Link {
            href: href.into(),
            class: None,
            children,
        }
    }

    pub fn table_link(href: impl Into<String>, children: Vec<Markup>) -> Self {
        Markup::Link {
            href: href.into(),
            class: Some("table-link".to_string()),
            children,
        }
    }

    pub fn tooltip(title: impl Into<String>, child: Markup) -> Self {
        Markup::Tooltip {
            title: title.into(),
            child: Box::new(child),
        }
    }

    pub fn seq(items: Vec<Markup>) -> Self {
        Markup::Seq { items }
    }

    /// Visible text with all markup stripped.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Markup::Empty | Markup::Icon { .. } | Markup::Label { .. } => {}
            Markup::Text { text } | Markup::Small { text } => out.push_str(text),
            Markup::Link { children, .. } => children.iter().for_each(|c| c.collect_text(out)),
            Markup::Seq { items } => items.iter().for_each(|c| c.collect_text(out)),
            Markup::Tooltip { child, .. } => child.collect_text(out),
        }
    }

    /// First link target inside this markup, if any.
    pub fn href(&self) -> Option<&str> {
        match self {
            Markup::Link { href, .. } => Some(href),
            Markup::Tooltip { child, .. } => child.href(),
            Markup::Seq { items } => items.iter().find_map(Markup::href),
            _ => None,
        }
    }

    /// Tooltip title of the outermost tooltip, if any.
    pub fn title(&self) -> Option<&str> {
        match self {
            Markup::Tooltip { title, .. } => Some(title),
            Markup::Seq { items } => items.iter().find_map(Markup::title),
            _ => None,
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Markup::Empty => {}
            Markup::Text { text } => out.push_str(&escape(text)),
            Markup::Small { text } => {
                let _ = write!(out, "<small>{}</small>", escape(text));
            }
            Markup::Icon { class } => {
                let _ = write!(out, "<i class=\"{}\"></i>", escape(class));
            }
            Markup::Label { class, icon } => {
                let _ = write!(
                    out,
                    "<span class=\"label {}\"><i class=\"{}\"></i></span>",
                    escape(class),
                    escape(icon)
                );
            }
            Markup::Link {
                href,
                class,
                children,
            } => {
                out.push_str("<a");
                if let Some(class) = class {
                    let _ = write!(out, " class=\"{}\"", escape(class));
                }
                let _ = write!(out, " href=\"{}\">", escape(href));
                children.iter().for_each(|c| c.write_html(out));
                out.push_str("</a>");
            }
            Markup::Tooltip { title, child } => {
                let _ = write!(
                    out,
                    "<span rel=\"tooltip\" data-toggle=\"tooltip\" title=\"{}\">",
                    escape(title)
                );
                child.write_html(out);
                out.push_str("</span>");
            }
            Markup::Seq { items } => items.iter().for_each(|c| c.write_html(out)),
        }
    }
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_link_html() {
        let markup = Markup::tooltip(
            "Boot reports for mainline",
            Markup::table_link("/boot/all/job/mainline/", vec![Markup::text("mainline")]),
        );
        insta::assert_snapshot!(
            markup.to_html(),
            @r#"<span rel="tooltip" data-toggle="tooltip" title="Boot reports for mainline"><a class="table-link" href="/boot/all/job/mainline/">mainline</a></span>"#
        );
    }

    #[test]
    fn test_escaping() {
        let markup = Markup::small("<b>lab & co</b>");
        assert_eq!(markup.to_html(), "<small>&lt;b&gt;lab &amp; co&lt;/b&gt;</small>");
    }

    #[test]
    fn test_text_content_strips_markup() {
        let markup = Markup::seq(vec![
            Markup::text("next"),
            Markup::text(" \u{2013} "),
            Markup::small("master"),
            Markup::icon("fa fa-check"),
        ]);
        assert_eq!(markup.text_content(), "next \u{2013} master");
    }

    #[test]
    fn test_href_and_title_lookup() {
        let markup = Markup::tooltip(
            "Details",
            Markup::link("/boot/x/", vec![Markup::icon("fa fa-search")]),
        );
        assert_eq!(markup.href(), Some("/boot/x/"));
        assert_eq!(markup.title(), Some("Details"));
        assert_eq!(Markup::Empty.href(), None);
    }
}
