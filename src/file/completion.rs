//! パス補完
//!
//! 入力の最後の `/` までをディレクトリ、それ以降をファイル名の接頭辞とみなして候補を集める

use super::path::expand_path;
use std::fs;
use std::path::{Path, PathBuf};

fn split_input(input: &str) -> (&str, &str) {
    match input.rfind('/') {
        Some(index) => input.split_at(index + 1),
        None => ("", input),
    }
}

/// 入力に続けられるパスの候補（ディレクトリは `/` 付き、昇順）
///
/// 候補は入力のディレクトリ部分をそのまま残した形で返す。
pub fn complete_path(input: &str) -> Vec<String> {
    let (dir_part, prefix) = split_input(input.trim_start());

    let directory: PathBuf = if dir_part.is_empty() {
        PathBuf::from(".")
    } else {
        match expand_path(dir_part) {
            Ok(path) => path,
            Err(_) => return Vec::new(),
        }
    };

    let Ok(entries) = fs::read_dir(&directory) else {
        return Vec::new();
    };

    let show_hidden = prefix.starts_with('.');
    let mut candidates: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(prefix) || (!show_hidden && name.starts_with('.')) {
                return None;
            }
            let suffix = if is_directory(&entry.path()) { "/" } else { "" };
            Some(format!("{}{}{}", dir_part, name, suffix))
        })
        .collect();

    candidates.sort();
    candidates
}

fn is_directory(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_dir()).unwrap_or(false)
}

/// 全候補に共通する接頭辞（文字単位）
pub fn common_prefix(candidates: &[String]) -> String {
    let Some((first, rest)) = candidates.split_first() else {
        return String::new();
    };

    let mut prefix_len = first.len();
    for candidate in rest {
        prefix_len = first
            .char_indices()
            .zip(candidate.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((index, ch), _)| index + ch.len_utf8())
            .min(prefix_len);
    }
    first[..prefix_len].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn common_prefix_of_candidates() {
        let candidates = vec!["src/main.rs".to_string(), "src/mod.rs".to_string()];
        assert_eq!(common_prefix(&candidates), "src/m");
        assert_eq!(common_prefix(&["only".to_string()]), "only");
        assert_eq!(common_prefix(&[]), "");
        assert_eq!(common_prefix(&["abc".to_string(), "xyz".to_string()]), "");
    }

    #[test]
    fn completes_entries_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        File::create(dir.path().join("notebook.md")).unwrap();
        File::create(dir.path().join(".hidden")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let base = format!("{}/", dir.path().display());
        let candidates = complete_path(&format!("{}no", base));
        assert_eq!(
            candidates,
            vec![format!("{}notebook.md", base), format!("{}notes.txt", base)]
        );
        assert_eq!(common_prefix(&candidates), format!("{}note", base));

        let all = complete_path(&base);
        assert_eq!(all.len(), 3);
        assert!(all.contains(&format!("{}nested/", base)));
    }

    #[test]
    fn missing_directory_has_no_candidates() {
        assert!(complete_path("/definitely/not/here/x").is_empty());
    }
}
