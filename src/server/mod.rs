mod render;
mod tools;

pub use render::{render_icons, render_list, render_search};
pub use tools::{DocsServer, GetComponentDocsRequest, ListComponentsRequest, SearchDocsRequest, SearchIconsRequest};
