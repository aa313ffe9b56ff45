//! `insert` tag: splice files into the document.

use std::fs;
use std::path::{Path, PathBuf};

use crate::parser::Attributes;
use crate::render::{escape_markup, strip_reserved, Context, Warning};
use crate::util::decode_lossy;

/// `<insert a.txt b.txt>`: the contents of each file, escaped so that
/// `<` and `>` in them are kept literally.
///
/// The output starts with a newline; every readable file adds its content
/// and a newline, and every listed file adds one more newline. Unreadable
/// files are reported and skipped.
pub fn insert(ctx: &mut Context<'_>, _content: &str, attrs: &Attributes) -> String {
    if attrs.is_empty() {
        ctx.warn(Warning::InsertWithoutFile);
        return "\n".to_string();
    }

    let mut out = String::from("\n");
    for file in attrs.iter() {
        let path = resolve_path(ctx.options().base_dir.as_deref(), file);
        match fs::read(&path) {
            Ok(bytes) => {
                log::debug!("inserting {}", path.display());
                let (text, lossy) = decode_lossy(bytes);
                if lossy {
                    ctx.warn(Warning::InvalidUtf8 { path: path.clone() });
                }
                out.push_str(&escape_markup(&strip_reserved(&text.replace("\r\n", "\n"))));
                out.push('\n');
            }
            Err(err) => ctx.warn(Warning::MissingInsertFile {
                path,
                reason: err.to_string(),
            }),
        }
        out.push('\n');
    }
    out
}

fn resolve_path(base_dir: Option<&Path>, file: &str) -> PathBuf {
    match base_dir {
        Some(dir) => dir.join(file),
        None => PathBuf::from(file),
    }
}
