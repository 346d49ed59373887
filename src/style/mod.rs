//! Style module
//!
//! Theme types, the style cascade, and the built-in themes. Custom themes are
//! read from JSON (the classic theme format) or TOML files.

mod cascade;
mod themes;
mod types;

pub use cascade::{cascade_block, cascade_blocks, cascade_primitive, cascade_primitives};
pub use themes::{ascii, dark};
pub use types::{StyleBlock, StyleConfig, StyleList, StylePrimitive, StyleTask};

use crate::error::{Result, TermarkError};
use std::fs;
use std::path::Path;

/// Resolve a theme by built-in name or by file path
pub fn load_theme(name_or_path: &str) -> Result<StyleConfig> {
    match name_or_path {
        "dark" => return Ok(dark()),
        "ascii" | "notty" => return Ok(ascii()),
        _ => {}
    }

    let path = Path::new(name_or_path);
    let content = fs::read_to_string(path).map_err(|e| {
        TermarkError::Config(format!(
            "Cannot read theme '{}': {}. Use 'dark', 'ascii', or a path to a theme file.",
            path.display(),
            e
        ))
    })?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        Ok(toml::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_names() {
        assert_eq!(load_theme("dark").unwrap(), dark());
        assert_eq!(load_theme("ascii").unwrap(), ascii());
        assert_eq!(load_theme("notty").unwrap(), ascii());
    }

    #[test]
    fn test_load_json_theme() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("theme.json");
        fs::write(
            &path,
            r###"{"h2":{"prefix":"## ","kitty_scale":2},"item":{"block_prefix":"- "}}"###,
        )
        .unwrap();

        let theme = load_theme(path.to_str().unwrap()).unwrap();
        assert_eq!(theme.h2.primitive.kitty_scale, Some(2));
        assert_eq!(theme.item.block_prefix, "- ");
    }

    #[test]
    fn test_load_toml_theme() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("theme.toml");
        fs::write(&path, "[h1]\nprefix = \"# \"\nkitty_scale = 3\n").unwrap();

        let theme = load_theme(path.to_str().unwrap()).unwrap();
        assert_eq!(theme.h1.primitive.prefix, "# ");
        assert_eq!(theme.h1.primitive.kitty_scale, Some(3));
    }

    #[test]
    fn test_missing_theme() {
        let err = load_theme("/nonexistent/theme.json").unwrap_err();
        assert!(err.to_string().contains("Cannot read theme"));
    }
}
