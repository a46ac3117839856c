//! Diagnostic endpoint listing served on `/` in debug mode.

use std::fmt::Write;

use crate::http::response::{encode_title, ProfileHeaders};

/// Render the HTML index. `endpoints` are listed in the order given.
pub fn render_index(endpoints: &[String], headers: &ProfileHeaders) -> String {
    let profile = headers.profile();
    let mut html = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(html, "<h1>Available endpoints:</h1>");
    let _ = writeln!(html, "<ul>");
    for endpoint in endpoints {
        let _ = writeln!(
            html,
            r#"<li><a href="/{}">/{}</a></li>"#,
            urlencoding::encode(endpoint),
            escape_html(endpoint)
        );
    }
    let _ = writeln!(html, "</ul>");

    let _ = writeln!(html, "<h2>Configured Response Headers:</h2>");
    let _ = writeln!(html, "<ul>");
    let _ = writeln!(
        html,
        "<li>profile-title: {} ({})</li>",
        encode_title(&profile.title),
        escape_html(&profile.title)
    );
    let _ = writeln!(
        html,
        "<li>profile-update-interval: {}</li>",
        escape_html(&profile.update_interval)
    );
    let _ = writeln!(
        html,
        r#"<li>profile-web-page-url: <a href="{0}">{0}</a></li>"#,
        escape_html(&profile.web_page_url)
    );
    let _ = writeln!(
        html,
        r#"<li>support-url: <a href="{0}">{0}</a></li>"#,
        escape_html(&profile.support_url)
    );
    let _ = writeln!(html, "</ul>");

    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProfileConfig;

    fn headers() -> ProfileHeaders {
        ProfileHeaders::from_config(&ProfileConfig::default()).unwrap()
    }

    #[test]
    fn test_lists_endpoints_and_headers() {
        let html = render_index(&["alpha".to_string(), "beta".to_string()], &headers());

        assert!(html.contains(r#"<li><a href="/alpha">/alpha</a></li>"#));
        assert!(html.contains(r#"<li><a href="/beta">/beta</a></li>"#));
        assert!(html.contains("profile-title: base64:U3Vicy1TZXJ2ZXI= (Subs-Server)"));
        assert!(html.contains("profile-update-interval: 12"));
        assert!(html.contains("support-url: <a href=\"https://github.com/kutovoys/subs-server\">"));
    }

    #[test]
    fn test_empty_listing() {
        let html = render_index(&[], &headers());
        assert!(!html.contains("<li><a"));
        assert!(html.contains("<h1>Available endpoints:</h1>"));
    }

    #[test]
    fn test_names_are_escaped() {
        let html = render_index(&["a <b>&c".to_string()], &headers());
        assert!(html.contains(r#"<a href="/a%20%3Cb%3E%26c">/a &lt;b&gt;&amp;c</a>"#));
    }
}
