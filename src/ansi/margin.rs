//! Indentation, padding and word wrapping for block output

use std::io::{self, Write};

use super::color::ColorProfile;
use super::text::{styled, visible_width};
use crate::style::{StyleBlock, StylePrimitive};

/// Wrap `text` at `width` columns without splitting words.
///
/// Long words (and embedded markers) overflow instead of being broken.
/// A width of zero leaves the text untouched.
pub fn word_wrap(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }
    let options = textwrap::Options::new(width).break_words(false);
    textwrap::fill(text, options)
}

/// Writer that indents every line and pads it to the block width
pub struct MarginWriter<'w, W: Write + ?Sized> {
    inner: &'w mut W,
    indent: String,
    pad_style: StylePrimitive,
    profile: ColorProfile,
    width: usize,
    line_width: usize,
    line_start: bool,
}

impl<'w, W: Write + ?Sized> MarginWriter<'w, W> {
    /// `indent_style` is the enclosing scope's style, used for the indent
    /// tokens; padding uses the block's own style.
    pub fn new(
        inner: &'w mut W,
        profile: ColorProfile,
        rules: &StyleBlock,
        width: usize,
        indent_style: &StylePrimitive,
    ) -> Self {
        let count = rules.indent.unwrap_or(0) + rules.margin.unwrap_or(0);
        let token = rules.indent_token.as_deref().unwrap_or(" ");
        let unit = styled(profile, indent_style, token);

        Self {
            inner,
            indent: unit.repeat(count as usize),
            pad_style: rules.primitive.clone(),
            profile,
            width,
            line_width: 0,
            line_start: true,
        }
    }

    fn pad_line(&mut self) -> io::Result<()> {
        if self.width > self.line_width {
            let spaces = " ".repeat(self.width - self.line_width);
            self.inner
                .write_all(styled(self.profile, &self.pad_style, &spaces).as_bytes())?;
        }
        Ok(())
    }
}

impl<W: Write + ?Sized> Write for MarginWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        for segment in text.split_inclusive('\n') {
            if self.line_start {
                self.inner.write_all(self.indent.as_bytes())?;
                self.line_start = false;
            }

            match segment.strip_suffix('\n') {
                Some(line) => {
                    self.inner.write_all(line.as_bytes())?;
                    self.line_width += visible_width(line);
                    self.pad_line()?;
                    self.inner.write_all(b"\n")?;
                    self.line_width = 0;
                    self.line_start = true;
                }
                None => {
                    self.inner.write_all(segment.as_bytes())?;
                    self.line_width += visible_width(segment);
                }
            }
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
