// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use camino::{Utf8Component, Utf8Path};

pub const DEFAULT_STEM: &str = "document";

pub fn pretty_path(path: &Utf8Path) -> String {
    let mut segments = Vec::new();
    for c in path.components() {
        match c {
            Utf8Component::Prefix(_) | Utf8Component::RootDir | Utf8Component::CurDir => (),
            Utf8Component::ParentDir => {
                segments.pop();
            }
            Utf8Component::Normal(_) => segments.push(c.as_str()),
        }
    }
    segments.join("/")
}

pub fn split_file_name(path: &Utf8Path) -> Option<(&Utf8Path, &str)> {
    let mut components = path.components();
    let name = components.next_back();
    let base = components.as_path();
    Some((base, name?.as_str()))
}

/// File stem of a document, or [`DEFAULT_STEM`] for paths without one.
pub fn file_stem(path: &Utf8Path) -> &str {
    path.file_stem().filter(|s| !s.is_empty()).unwrap_or(DEFAULT_STEM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_base() {
        assert_eq!(split_file_name("a/b".into()), Some(("a".into(), "b")));
        assert_eq!(split_file_name("a/b/c".into()), Some(("a/b".into(), "c")));
        assert_eq!(split_file_name("./Texpad.toml".into()), Some((".".into(), "Texpad.toml")));
        assert_eq!(split_file_name("a".into()), Some(("".into(), "a")));
        assert_eq!(split_file_name("".into()), None);
    }

    #[test]
    fn test_pretty_path() {
        assert_eq!(pretty_path("./notes/../paper.tex".into()), "paper.tex");
        assert_eq!(pretty_path("/home/me/paper.tex".into()), "home/me/paper.tex");
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("notes/paper.tex".into()), "paper");
        assert_eq!(file_stem("..".into()), "document");
    }
}
