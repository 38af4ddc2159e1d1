use super::model::IconEntry;

/// Path suffix of the icon catalog page within the docs tree
pub const ICON_CATALOG_SUFFIX: &str = "components/icons.md";

/// Usage example sections of the icon page; their tables are not catalog rows.
const USAGE_SECTIONS: [&str; 5] = ["Basic", "Sizing", "Coloring", "With Buttons", "Inline with Text"];

/// Parse the icon reference tables of the icon catalog page.
pub fn parse_icons(content: &str) -> Vec<IconEntry> {
    let mut icons = Vec::new();
    let mut current_category = "";

    for line in content.lines() {
        let trimmed = line.trim();

        if let Some(heading) = trimmed.strip_prefix("### ") {
            let heading = heading.trim();
            current_category = if USAGE_SECTIONS.contains(&heading) {
                ""
            } else {
                heading
            };
            continue;
        }

        if !current_category.is_empty() && trimmed.starts_with("| `") {
            icons.extend(parse_icon_row(trimmed, current_category));
        }
    }

    icons
}

/// `| `IconName` | Description |`
fn parse_icon_row(row: &str, category: &str) -> Option<IconEntry> {
    let cells: Vec<&str> = row.split('|').collect();
    if cells.len() < 3 {
        return None;
    }

    let name = cells[1].trim().trim_matches('`');
    if name.is_empty() || name == "Icon" {
        return None;
    }

    Some(IconEntry {
        name: name.to_string(),
        description: cells[2].trim().to_string(),
        category: category.to_string(),
    })
}
