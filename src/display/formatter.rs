//! Markdown terminal output

use log::warn;
use std::io::{self, Write};

use crate::ansi::RenderOptions;
use crate::error::Result;
use crate::renderer::Renderer;

/// Print markdown to the terminal with rich formatting (or plain fallback)
pub fn print_markdown(markdown: &str, options: &RenderOptions) -> Result<()> {
    let output = render_or_plain(markdown, options);
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Rendered output, or the source itself if rendering fails
pub fn render_or_plain(markdown: &str, options: &RenderOptions) -> String {
    match Renderer::new(options).render(markdown) {
        Ok(output) => output,
        Err(e) => {
            warn!("Terminal rendering failed ({}), using plain output", e);
            plain(markdown)
        }
    }
}

fn plain(markdown: &str) -> String {
    if markdown.ends_with('\n') {
        markdown.to_string()
    } else {
        format!("{}\n", markdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ascii;

    #[test]
    fn test_render_or_plain_renders() {
        let options = RenderOptions {
            styles: ascii(),
            text_sizing: Some(false),
            ..Default::default()
        };

        let output = render_or_plain("# Header\n\n- Item 1\n- Item 2", &options);

        assert!(output.contains("# Header"));
        assert!(output.contains("• Item 1"));
    }

    #[test]
    fn test_render_failure_falls_back_to_source() {
        let mut options = RenderOptions {
            styles: ascii(),
            text_sizing: Some(false),
            ..Default::default()
        };
        options.styles.emph.format = "{{ .missing }}".to_string();

        let output = render_or_plain("some *emphasis*", &options);

        assert_eq!(output, "some *emphasis*\n");
    }
}
