use std::path::Path;

use super::categories::CategoryMap;
use super::model::{Category, DocEntry, SourceFiles};

/// VitePress tooling directory, never part of the corpus
const RESERVED_DIR: &str = ".vitepress";

/// Parse every documentation file into a [`DocEntry`], skipping files that
/// are not component or guide pages. Entries follow the order of `files`.
pub fn parse_docs(files: &SourceFiles, categories: &CategoryMap) -> Vec<DocEntry> {
    files
        .iter()
        .filter_map(|(path, content)| parse_file(path, content, categories))
        .collect()
}

/// Parse a single file, or `None` when it does not belong in the corpus.
pub fn parse_file(path: &str, content: &str, categories: &CategoryMap) -> Option<DocEntry> {
    let path = Path::new(path);

    if path.file_name().is_some_and(|name| name == "index.md") {
        return None;
    }
    if path.components().any(|c| c.as_os_str() == RESERVED_DIR) {
        return None;
    }

    let dir = path.parent()?;

    if dir.ends_with("guide") {
        return parse_guide(content);
    }
    if dir.components().any(|c| c.as_os_str() == "components") {
        return Some(parse_component(path, content, categories));
    }

    None
}

fn parse_component(path: &Path, content: &str, categories: &CategoryMap) -> DocEntry {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let slug = file_name.strip_suffix(".md").unwrap_or(&file_name);

    let name = extract_title(content).unwrap_or_else(|| slug_to_name(slug));
    let category = categories.get(slug).copied().unwrap_or_default();

    DocEntry {
        name,
        category,
        description: extract_description(content),
        content: content.trim().to_string(),
    }
}

fn parse_guide(content: &str) -> Option<DocEntry> {
    // A guide without a title has nothing to be looked up by.
    let name = extract_title(content)?;

    Some(DocEntry {
        name,
        category: Category::Guide,
        description: extract_description(content),
        content: content.trim().to_string(),
    })
}

/// Text of the first level-one heading (`# Title`).
pub fn extract_title(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
}

/// First plain line after the level-one heading.
///
/// Blank lines are skipped; reaching another heading or a code fence first
/// means there is no description.
pub fn extract_description(content: &str) -> String {
    let mut past_heading = false;

    for line in content.lines() {
        if line.starts_with("# ") {
            past_heading = true;
            continue;
        }
        if !past_heading {
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with("```") {
            break;
        }
        return trimmed.to_string();
    }

    String::new()
}

/// `date-picker` becomes `DatePicker`.
pub fn slug_to_name(slug: &str) -> String {
    slug.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
