//! Plain-text rendering of query results for tool responses.

use crate::docs::{DocEntry, DocEntrySummary, IconEntry};

/// Package the icons are imported from
const ICON_IMPORT_PATH: &str = "@vacano/ui/icons";

pub fn render_search(query: &str, results: &[DocEntry]) -> String {
    if results.is_empty() {
        return format!("No results found for: {query}");
    }

    let mut out = format!("Found {} result(s) for \"{}\":\n\n", results.len(), query);
    for entry in results {
        out.push_str(&format!("## {} [{}]\n", entry.name, entry.category));
        out.push_str(&entry.description);
        out.push_str("\n\n---\n\n");
    }
    out
}

/// Summaries grouped under a `### <category>` heading per category.
/// Expects `results` sorted by category, as returned by the store.
pub fn render_list(category: &str, results: &[DocEntrySummary]) -> String {
    if results.is_empty() {
        return if category.trim().is_empty() {
            "No components found".to_string()
        } else {
            format!("No components found in category: {category}")
        };
    }

    let mut out = format!("Found {} component(s):\n\n", results.len());
    let mut current = None;
    for entry in results {
        if current != Some(entry.category) {
            if current.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("### {}\n\n", entry.category));
            current = Some(entry.category);
        }
        out.push_str(&format!("- **{}** - {}\n", entry.name, entry.description));
    }
    out
}

/// Icons grouped under their catalog heading, in catalog order.
pub fn render_icons(query: &str, results: &[IconEntry]) -> String {
    if results.is_empty() {
        return format!("No icons found for: {query}");
    }

    let mut out = format!("Found {} icon(s) for \"{}\".\n", results.len(), query);
    out.push_str(&format!("Import from `{ICON_IMPORT_PATH}`.\n\n"));

    let mut current = "";
    for icon in results {
        if icon.category != current {
            out.push_str(&format!("### {}\n\n", icon.category));
            current = &icon.category;
        }
        out.push_str(&format!("- `{}` - {}\n", icon.name, icon.description));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::Category;

    fn summary(name: &str, category: Category) -> DocEntrySummary {
        DocEntrySummary {
            name: name.to_string(),
            category,
            description: format!("{name} description"),
        }
    }

    #[test]
    fn test_render_list_groups_by_category() {
        let text = render_list(
            "",
            &[
                summary("Button", Category::Form),
                summary("Input", Category::Form),
                summary("Getting Started", Category::Guide),
            ],
        );

        assert!(text.starts_with("Found 3 component(s):\n\n### form\n\n- **Button**"));
        assert_eq!(text.matches("### form").count(), 1);
        assert!(text.contains("### guide\n\n- **Getting Started** - Getting Started description"));
    }

    #[test]
    fn test_render_empty_results() {
        assert_eq!(render_list("", &[]), "No components found");
        assert_eq!(render_list("widgets", &[]), "No components found in category: widgets");
        assert_eq!(render_search("zzz", &[]), "No results found for: zzz");
        assert_eq!(render_icons("zzz", &[]), "No icons found for: zzz");
    }

    #[test]
    fn test_render_icons() {
        let icons = vec![
            IconEntry {
                name: "ArrowUp".to_string(),
                description: "Up".to_string(),
                category: "Arrows".to_string(),
            },
            IconEntry {
                name: "ArrowDown".to_string(),
                description: "Down".to_string(),
                category: "Arrows".to_string(),
            },
        ];
        let text = render_icons("arrow", &icons);

        assert!(text.contains("Import from `@vacano/ui/icons`."));
        assert_eq!(text.matches("### Arrows").count(), 1);
        assert!(text.contains("- `ArrowDown` - Down\n"));
    }

    #[test]
    fn test_render_search() {
        let entry = DocEntry {
            name: "DatePicker".to_string(),
            category: Category::Form,
            description: "Pick a date.".to_string(),
            content: "# DatePicker".to_string(),
        };
        let text = render_search("date", &[entry]);
        assert!(text.starts_with("Found 1 result(s) for \"date\":\n\n## DatePicker [form]\nPick a date."));
    }
}
