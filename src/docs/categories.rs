use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use super::model::Category;

/// Component slug to sidebar category
pub type CategoryMap = HashMap<String, Category>;

/// Sidebar keys whose section arrays assign categories
const SIDEBAR_KEYS: [&str; 2] = ["/components/", "/lib/"];

static SECTION_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"text:\s*['"]([^'"]+)['"]"#).expect("valid section regex"));

static SECTION_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"link:\s*['"]/(?:components|lib)/([^'"]+)['"]"#).expect("valid link regex")
});

/// Build a slug to category map from the VitePress sidebar configuration.
///
/// This is a best-effort scan of the config text, not a TypeScript parser.
/// Anything it does not understand is ignored, so a malformed config only
/// results in fewer mappings.
pub fn parse_categories(config: &str) -> CategoryMap {
    let mut categories = CategoryMap::new();

    if config.trim().is_empty() {
        return categories;
    }

    for key in SIDEBAR_KEYS {
        for section in sections_for_key(config, key) {
            let Some(caps) = SECTION_TEXT.captures(section) else {
                continue;
            };
            let category = normalize_category_name(&caps[1]);

            for link in SECTION_LINK.captures_iter(section) {
                let slug = link[1].trim_end_matches('/');
                if !slug.is_empty() {
                    categories.insert(slug.to_string(), category);
                }
            }
        }
    }

    categories
}

/// Map a sidebar section title to a [`Category`].
pub fn normalize_category_name(name: &str) -> Category {
    let normalized = name.trim().to_lowercase().replace(' ', "-");

    match normalized.as_str() {
        "form" => Category::Form,
        "data-display" => Category::DataDisplay,
        "feedback" => Category::Feedback,
        "layout" => Category::Layout,
        "navigation" => Category::Navigation,
        "utility" => Category::Utility,
        "overview" => Category::Overview,
        "lib" | "utils" | "utilities" | "hooks" | "types" | "constants" => Category::Lib,
        _ => Category::Utility,
    }
}

/// Top-level `{ ... }` blocks of the array that follows `key`.
fn sections_for_key<'a>(config: &'a str, key: &str) -> Vec<&'a str> {
    let Some(key_start) = find_key(config, key) else {
        return Vec::new();
    };
    let Some(array) = bracketed_span(&config[key_start..]) else {
        return Vec::new();
    };

    let mut sections = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (i, b) in array.bytes().enumerate() {
        match b {
            b'{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some(s) = start.take() {
                        sections.push(&array[s..=i]);
                    }
                }
            }
            _ => {}
        }
    }

    sections
}

/// Byte offset of a quoted `key` followed by a colon.
fn find_key(config: &str, key: &str) -> Option<usize> {
    ['\'', '"'].into_iter().find_map(|quote| {
        let needle = format!("{quote}{key}{quote}");
        let mut from = 0;
        while let Some(pos) = config[from..].find(&needle) {
            let at = from + pos;
            let after = config[at + needle.len()..].trim_start();
            if after.starts_with(':') {
                return Some(at);
            }
            from = at + needle.len();
        }
        None
    })
}

/// The first depth-balanced `[ ... ]` span in `text`, brackets included.
fn bracketed_span(text: &str) -> Option<&str> {
    let open = text.find('[')?;
    let mut depth = 0usize;

    for (i, b) in text.bytes().enumerate().skip(open) {
        match b {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[open..=i]);
                }
            }
            _ => {}
        }
    }

    None
}
