//! HTML pages for the browser-facing form flow.

use crate::analysis::models::AnalysisResponse;

/// The transcript submission form served at `GET /`.
pub const FORM_PAGE: &str = include_str!("../../templates/form.html");

const RESULT_STYLE: &str = r#"
        body { font-family: 'Segoe UI', Arial, sans-serif; background: #f4f6fa; margin: 0; padding: 0; }
        .container { max-width: 600px; margin: 40px auto; background: #fff; border-radius: 12px;
                     box-shadow: 0 2px 12px rgba(0,0,0,0.08); padding: 32px 28px 24px 28px; }
        h2 { color: #2d3a4a; margin-top: 0; }
        h3 { color: #4a5a6a; margin-bottom: 6px; }
        pre { background: #f0f3f7; border-radius: 6px; padding: 12px; font-size: 1em;
              overflow-x: auto; white-space: pre-wrap; }
        .sentiment { font-weight: bold; color: #0078d4; }
        .footer { margin-top: 18px; font-size: 0.98em; color: #888; }
        .button { display: inline-block; margin-top: 18px; padding: 8px 18px; background: #0078d4;
                  color: #fff; border-radius: 5px; text-decoration: none; font-weight: 500; }
        .button:hover { background: #005fa3; }
"#;

/// Renders a completed analysis. `log_name` is the file the row was saved to.
pub fn result_page(response: &AnalysisResponse, log_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Call Analysis Result</title>
    <style>{style}</style>
</head>
<body>
    <div class="container">
        <h2>Call Analysis Result</h2>
        <h3>Transcript</h3><pre>{transcript}</pre>
        <h3>Summary</h3><pre>{summary}</pre>
        <h3>Sentiment</h3><pre class="sentiment">{sentiment}</pre>
        <div class="footer">Saved to <b>{log_name}</b></div>
        <a class="button" href="/">Analyze another</a>
    </div>
</body>
</html>
"#,
        style = RESULT_STYLE,
        transcript = escape_html(&response.transcript),
        summary = escape_html(&response.summary),
        sentiment = escape_html(&response.sentiment),
        log_name = escape_html(log_name),
    )
}

/// Renders a failed analysis; `detail` is the JSON error payload.
pub fn error_page(detail: &str) -> String {
    format!("<pre>Error: {}</pre>", escape_html(detail))
}

pub fn escape_html(text: &str) -> String {
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

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_result_page_shows_all_fields_escaped() {
        let response = AnalysisResponse {
            transcript: "Caller: <script>alert(1)</script>".to_string(),
            summary: "Caller tried an injection.".to_string(),
            sentiment: "Negative".to_string(),
        };
        let page = result_page(&response, "call_analysis.csv");

        assert!(page.contains("Caller: &lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!page.contains("<script>"));
        assert!(page.contains("<pre>Caller tried an injection.</pre>"));
        assert!(page.contains(r#"<pre class="sentiment">Negative</pre>"#));
        assert!(page.contains("Saved to <b>call_analysis.csv</b>"));
        assert!(page.contains(r#"href="/""#));
    }

    #[test]
    fn test_error_page_wraps_payload() {
        assert_eq!(
            error_page(r#"{"error":"Empty transcript."}"#),
            "<pre>Error: {&quot;error&quot;:&quot;Empty transcript.&quot;}</pre>"
        );
    }

    #[test]
    fn test_form_posts_transcript_field() {
        assert!(FORM_PAGE.contains(r#"action="/analyze-form""#));
        assert!(FORM_PAGE.contains(r#"name="transcript""#));
    }
}
