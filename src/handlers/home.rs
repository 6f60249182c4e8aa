//! Homepage rendering.

use crate::app_state::AppState;
use crate::domain::{Entry, PortfolioPage, SectionName};
use axum::{extract::State, http::StatusCode, response::Html};
use std::fmt::Write;

/// Handler for the homepage (GET /).
///
/// Loads the portfolio sections and the latest entries and renders them
/// as a single HTML document.
///
/// - `200 OK` with the rendered page.
/// - `500 Internal Server Error` if either query fails.
#[tracing::instrument(skip(state))]
pub async fn home_handler(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    // ---
    let sections = state.repository().list_sections().await.map_err(|err| {
        tracing::error!("Failed to load portfolio sections: {err:#}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let entries = state
        .repository()
        .list_entries(Some(state.site().home_entry_limit))
        .await
        .map_err(|err| {
            tracing::error!("Failed to load entries: {err:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let page = PortfolioPage::from_sections(sections);

    Ok(Html(render_page(&state.site().title, &page, &entries)))
}

fn render_page(title: &str, page: &PortfolioPage, entries: &[Entry]) -> String {
    // ---
    let title = escape_html(title);
    let mut html = String::with_capacity(4096);

    // Writing into a String cannot fail.
    let _ = writeln!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<header><h1>{title}</h1></header>\n<main>"
    );

    for name in SectionName::ALL {
        let _ = writeln!(
            html,
            "<section id=\"{id}\">\n<h2>{heading}</h2>\n<p>{content}</p>\n</section>",
            id = name.as_str(),
            heading = name.heading(),
            content = escape_html(page.get(name)),
        );
    }

    if !entries.is_empty() {
        html.push_str("<section id=\"latest\">\n<h2>Latest</h2>\n<ul>\n");
        for entry in entries {
            let _ = writeln!(
                html,
                "<li><article><h3>{}</h3><time datetime=\"{}\">{}</time><p>{}</p></article></li>",
                escape_html(&entry.title),
                entry.created.to_rfc3339(),
                entry.created.format("%Y-%m-%d"),
                escape_html(&entry.content),
            );
        }
        html.push_str("</ul>\n</section>\n");
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// Escapes text for use in HTML element content and quoted attributes.
fn escape_html(input: &str) -> String {
    // ---
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::domain::Section;
    use chrono::{TimeZone, Utc};

    #[test]
    fn escape_html_neutralises_markup() {
        // ---
        assert_eq!(
            escape_html(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;y&#39;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn render_page_lists_sections_in_order() {
        // ---
        let page = PortfolioPage::from_sections(vec![
            Section::new(SectionName::Contact, "mail"),
            Section::new(SectionName::About, "hello"),
        ]);

        let html = render_page("My <Site>", &page, &[]);

        assert!(html.contains("<title>My &lt;Site&gt;</title>"));
        let about = html.find("id=\"about\"").unwrap();
        let contact = html.find("id=\"contact\"").unwrap();
        assert!(about < contact);
        assert!(html.contains("<p>hello</p>"));
        assert!(!html.contains("id=\"latest\""));
    }

    #[test]
    fn render_page_includes_escaped_entries() {
        // ---
        let entry = Entry {
            id: 1,
            title: "Fish & Chips".to_string(),
            content: "<b>bold</b>".to_string(),
            created: Utc.with_ymd_and_hms(2024, 3, 9, 10, 0, 0).unwrap(),
        };

        let html = render_page("Site", &PortfolioPage::default(), &[entry]);

        assert!(html.contains("id=\"latest\""));
        assert!(html.contains("<h3>Fish &amp; Chips</h3>"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains(">2024-03-09</time>"));
    }
}
