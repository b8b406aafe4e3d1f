//! HTML projection of drawn tables and summary panels.

use std::fmt::Write;

use crate::banner::ErrorBanner;
use crate::render::markup::escape;
use crate::summary::{Panel, PanelOutcome};
use crate::table::{Direction, TableStatus, TableView};

const LOADING_MORE: &str =
    "<span class=\"table-process\"><i class=\"fa fa-cog fa-spin\"></i>&nbsp;loading more results&#8230;</span>";

fn message_div(message: &str) -> String {
    format!(
        "<div class=\"pull-center\"><strong>{}</strong></div>",
        escape(message)
    )
}

pub fn banner_html(banner: &ErrorBanner) -> String {
    format!(
        "<div id=\"{}\" class=\"alert alert-danger alert-dismissable\">\
         <button type=\"button\" class=\"close\" data-dismiss=\"alert\" aria-hidden=\"true\">&times;</button>\
         {}</div>",
        escape(&banner.id),
        escape(&banner.message)
    )
}

pub fn table_html(view: &TableView) -> String {
    let mut out = String::new();
    match &view.status {
        TableStatus::Loading => {
            out.push_str(&message_div("Loading..."));
            return out;
        }
        TableStatus::Empty { message } | TableStatus::Error { message, .. } => {
            out.push_str(&message_div(message));
            return out;
        }
        TableStatus::Ready => {}
    }

    if view.loading_more {
        out.push_str(LOADING_MORE);
    }

    out.push_str("<table class=\"table table-hover table-striped\"><thead><tr>");
    for header in &view.headers {
        let mut class = header.class_name.clone().unwrap_or_default();
        if let Some(direction) = header.sorted {
            if !class.is_empty() {
                class.push(' ');
            }
            class.push_str(match direction {
                Direction::Asc => "sorting_asc",
                Direction::Desc => "sorting_desc",
            });
        }
        if class.is_empty() {
            let _ = write!(out, "<th>{}</th>", escape(&header.title));
        } else {
            let _ = write!(
                out,
                "<th class=\"{}\">{}</th>",
                escape(&class),
                escape(&header.title)
            );
        }
    }
    out.push_str("</tr></thead><tbody>");

    for row in &view.rows {
        match &row.detail_url {
            Some(url) => {
                let _ = write!(out, "<tr data-url=\"{}\">", escape(url));
            }
            None => out.push_str("<tr>"),
        }
        for cell in &row.cells {
            let _ = write!(out, "<td>{}</td>", cell.to_html());
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");

    let _ = write!(
        out,
        "<div class=\"dataTables_info\">{}</div>",
        escape(&view.info())
    );
    out
}

pub fn panel_html(panel: &Panel) -> String {
    let columns = panel.headers.len();
    let mut out = String::new();
    let _ = write!(out, "<h3>{}</h3>", escape(panel.title));
    out.push_str("<table class=\"table table-condensed\"><thead><tr>");
    for header in panel.headers {
        let _ = write!(out, "<th>{}</th>", escape(header));
    }
    out.push_str("</tr></thead><tbody>");

    match &panel.outcome {
        PanelOutcome::Rows { rows } => {
            for row in rows {
                out.push_str("<tr>");
                for cell in row {
                    let _ = write!(out, "<td>{}</td>", cell.to_html());
                }
                out.push_str("</tr>");
            }
        }
        PanelOutcome::Empty { message } | PanelOutcome::Error { message, .. } => {
            let _ = write!(
                out,
                "<tr><td colspan=\"{}\" align=\"center\" valign=\"middle\"><h4>{}</h4></td></tr>",
                columns,
                escape(message)
            );
        }
    }
    out.push_str("</tbody></table>");
    out
}
