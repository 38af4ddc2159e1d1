//! Documentation corpus: data model, parsers and the in-memory store.

mod categories;
mod icons;
mod model;
mod parser;
mod store;

pub use categories::{CategoryMap, normalize_category_name, parse_categories};
pub use icons::{ICON_CATALOG_SUFFIX, parse_icons};
pub use model::{Category, DocEntry, DocEntrySummary, IconEntry, SourceFiles, UnknownCategory};
pub use parser::{extract_description, extract_title, parse_docs, parse_file, slug_to_name};
pub use store::{Corpus, CorpusStats, CorpusStore, QueryError};
