use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

/// Default page served until the controller pushes a first screen.
const PLACEHOLDER: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Brainstorm Companion</title>
  <style>
    body { font-family: system-ui, sans-serif; padding: 2rem; max-width: 800px; margin: 0 auto; }
    h1 { color: #333; }
    p { color: #666; }
  </style>
</head>
<body>
  <h1>Brainstorm Companion</h1>
  <p>Waiting for the agent to push a screen...</p>
</body>
</html>
"#;

/// Guarantee the screen document and its containing directory exist.
///
/// Writes the placeholder page if the document is absent. An existing
/// document is never overwritten — the controller owns its content.
pub fn ensure_ready(screen_file: &Path) -> io::Result<()> {
    if let Some(dir) = screen_file.parent() {
        fs::create_dir_all(dir)?;
    }

    if !screen_file.exists() {
        fs::write(screen_file, PLACEHOLDER)?;
        info!(file = %screen_file.display(), "created placeholder screen document");
    }

    Ok(())
}

/// Wrap `helper` in a script block and splice it into `raw` immediately
/// before the first closing body tag, or append it when the document has no
/// body tag. Every other byte of the document passes through untouched.
pub fn inject_helper(raw: &str, helper: &str) -> String {
    let injection = format!("<script>\n{}\n</script>", helper);

    match raw.find("</body>") {
        Some(idx) => {
            let mut html = String::with_capacity(raw.len() + injection.len() + 1);
            html.push_str(&raw[..idx]);
            html.push_str(&injection);
            html.push('\n');
            html.push_str(&raw[idx..]);
            html
        }
        None => format!("{}{}", raw, injection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_ready_creates_directory_and_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let screen = dir.path().join("nested").join("screens").join("screen.html");

        ensure_ready(&screen).unwrap();

        let content = fs::read_to_string(&screen).unwrap();
        assert!(content.starts_with("<!DOCTYPE html>"));
        assert!(content.contains("Waiting for the agent to push a screen"));
        assert!(content.contains("</body>"));
    }

    #[test]
    fn ensure_ready_never_overwrites_an_existing_document() {
        let dir = tempfile::tempdir().unwrap();
        let screen = dir.path().join("screen.html");
        fs::write(&screen, "<html><body>pushed content</body></html>").unwrap();

        ensure_ready(&screen).unwrap();
        ensure_ready(&screen).unwrap();

        let content = fs::read_to_string(&screen).unwrap();
        assert_eq!(content, "<html><body>pushed content</body></html>");
    }

    #[test]
    fn inject_helper_splices_before_the_closing_body_tag() {
        let raw = "<html><body><h1>Hi</h1></body></html>";
        let html = inject_helper(raw, "console.log('x');");

        let marker = html.find("</body>").unwrap();
        let script = html.find("<script>").unwrap();
        assert!(script < marker);
        assert!(html.contains("<script>\nconsole.log('x');\n</script>\n</body>"));

        // Everything outside the injected block is byte-identical.
        assert!(html.starts_with("<html><body><h1>Hi</h1>"));
        assert!(html.ends_with("</body></html>"));
    }

    #[test]
    fn inject_helper_uses_the_first_closing_body_tag() {
        let raw = "<body>a</body><body>b</body>";
        let html = inject_helper(raw, "x");

        assert_eq!(html, "<body>a<script>\nx\n</script>\n</body><body>b</body>");
    }

    #[test]
    fn inject_helper_appends_when_no_body_tag_exists() {
        let raw = "<h1>bare fragment</h1>";
        let html = inject_helper(raw, "x");

        assert_eq!(html, "<h1>bare fragment</h1><script>\nx\n</script>");
    }
}
