use vacano_ui_mcp::docs::{Category, CorpusStore, DocEntry, IconEntry, QueryError, parse_icons};

fn entry(name: &str, category: Category, description: &str, content: &str) -> DocEntry {
    DocEntry {
        name: name.to_string(),
        category,
        description: description.to_string(),
        content: content.to_string(),
    }
}

fn sample_store() -> CorpusStore {
    let store = CorpusStore::new();
    store.reload(vec![
        entry("Modal", Category::Feedback, "A dialog window.", "# Modal\n\nA dialog window."),
        entry("Button", Category::Form, "Clickable.", "# Button\n\nClickable."),
        entry("DatePicker", Category::Form, "Pick a day.", "# DatePicker\n\nPick a day."),
        entry("Getting Started", Category::Guide, "Install it.", "# Getting Started\n\nRun npm install."),
        entry("Card", Category::DataDisplay, "A surface.", "# Card\n\nUse with Button inside."),
    ]);
    store
}

#[test]
fn test_get_by_name_is_case_insensitive() {
    let store = sample_store();

    for query in ["button", "Button", "BUTTON"] {
        let found = store.get_by_name(query).unwrap();
        assert_eq!(found.name, "Button");
    }
    assert!(store.get_by_name("Butt").is_none());
}

#[test]
fn test_get_by_name_returns_first_duplicate() {
    let store = CorpusStore::new();
    store.reload(vec![
        entry("Select", Category::Form, "first", "one"),
        entry("select", Category::Navigation, "second", "two"),
    ]);

    assert_eq!(store.get_by_name("SELECT").unwrap().description, "first");
}

#[test]
fn test_search_matches_name_description_and_content() {
    let store = sample_store();

    // Name-only match
    let names: Vec<_> = store.search("date").unwrap().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["DatePicker"]);

    // Content match keeps corpus order
    let names: Vec<_> = store.search("BUTTON").unwrap().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["Button", "Card"]);

    assert!(store.search("npm install").unwrap().len() == 1);
    assert!(store.search("no such text").unwrap().is_empty());
}

#[test]
fn test_query_whitespace_is_part_of_the_match() {
    let store = CorpusStore::new();
    store.reload(vec![entry("DatePicker", Category::Form, "", "# DatePicker")]);

    assert!(store.search("picker ").unwrap().is_empty());
    assert_eq!(store.search("PICKER").unwrap().len(), 1);
}

#[test]
fn test_get_by_name_does_not_trim() {
    let store = sample_store();
    assert!(store.get_by_name(" Button ").is_none());
}

#[test]
fn test_empty_query_is_an_error_not_an_empty_result() {
    let store = sample_store();

    assert_eq!(store.search(""), Err(QueryError::EmptyQuery));
    assert_eq!(store.search_icons(""), Err(QueryError::EmptyQuery));
    assert_eq!(store.search("zzz"), Ok(Vec::new()));
}

#[test]
fn test_list_sorted_by_category_then_name() {
    let store = sample_store();

    let listed: Vec<_> = store
        .list("")
        .into_iter()
        .map(|s| (s.category.as_str(), s.name))
        .collect();

    assert_eq!(
        listed,
        vec![
            ("data-display", "Card".to_string()),
            ("feedback", "Modal".to_string()),
            ("form", "Button".to_string()),
            ("form", "DatePicker".to_string()),
            ("guide", "Getting Started".to_string()),
        ]
    );
}

#[test]
fn test_list_filters_by_category() {
    let store = sample_store();

    let form: Vec<_> = store.list("FORM").into_iter().map(|s| s.name).collect();
    assert_eq!(form, vec!["Button", "DatePicker"]);

    assert!(store.list("nonexistent-category").is_empty());
}

#[test]
fn test_reload_with_empty_clears_everything() {
    let store = sample_store();
    assert!(!store.search("button").unwrap().is_empty());

    store.reload(Vec::new());

    assert!(store.search("button").unwrap().is_empty());
    assert!(store.list("").is_empty());
    assert!(store.get_by_name("Button").is_none());
}

#[test]
fn test_search_icons() {
    let store = CorpusStore::new();
    store.reload_icons(parse_icons(
        "\
### Actions
| Icon | Description |
|---|---|
| `Save` | Persists changes |
| `Close` | Dismiss a dialog |

### Arrows
| `ArrowUp` | Move up |

### Basic
| `Trash` | usage example |
",
    ));

    let icons = store.search_icons("arrow").unwrap();
    assert_eq!(icons.len(), 1);
    assert_eq!(icons[0].name, "ArrowUp");

    // Category match returns rows in catalog order
    let actions: Vec<_> = store.search_icons("actions").unwrap().into_iter().map(|i| i.name).collect();
    assert_eq!(actions, vec!["Save", "Close"]);

    let dialog = store.search_icons("DIALOG").unwrap();
    assert_eq!(
        dialog,
        vec![IconEntry {
            name: "Close".to_string(),
            description: "Dismiss a dialog".to_string(),
            category: "Actions".to_string(),
        }]
    );

    assert!(store.search_icons("trash").unwrap().is_empty());
}
