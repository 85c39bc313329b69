// src/catalog/tree.rs
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogParseError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog root must be a list of categories, found {found}")]
    NotAList { found: &'static str },
}

/// One addressable category from the marketplace menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDescriptor {
    pub name: String,
    pub url: String,
    pub shard: String,
    pub query: String,
}

impl CategoryDescriptor {
    fn from_node(node: &Value) -> Option<Self> {
        let field = |key: &str| node.get(key).and_then(Value::as_str).map(str::to_owned);
        Some(Self {
            name: field("name")?,
            url: field("url")?,
            shard: field("shard")?,
            query: field("query")?,
        })
    }
}

/// Parse raw catalog JSON and flatten it.
pub fn parse_catalog(raw: &str) -> Result<Vec<CategoryDescriptor>, CatalogParseError> {
    let root: Value = serde_json::from_str(raw)?;
    match &root {
        Value::Array(nodes) => Ok(flatten(nodes)),
        other => Err(CatalogParseError::NotAList {
            found: kind_of(other),
        }),
    }
}

/// Depth-first, pre-order flattening of the category forest.
///
/// Nodes lacking any of `name`/`url`/`shard`/`query` emit nothing, but their
/// `childs` are still walked. An explicit stack of sibling iterators keeps deep
/// menus off the call stack.
pub fn flatten(roots: &[Value]) -> Vec<CategoryDescriptor> {
    let mut out = Vec::new();
    let mut stack = vec![roots.iter()];

    while let Some(siblings) = stack.last_mut() {
        let Some(node) = siblings.next() else {
            stack.pop();
            continue;
        };

        if let Some(descriptor) = CategoryDescriptor::from_node(node) {
            out.push(descriptor);
        }
        if let Some(Value::Array(childs)) = node.get("childs") {
            stack.push(childs.iter());
        }
    }

    out
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
