//! Values handed to the renderer and formatter collaborators.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Key under which the document template is exposed to the renderer.
pub const TEMPLATE_KEY: &str = "template";

/// Key the formatter reads its parser selection from.
pub const PARSER_KEY: &str = "parser";

/// Parser identifier for HTML documents.
pub const HTML_PARSER: &str = "html";

/// Component data supplied when the SSR plugin is created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderContext(Map<String, JsonValue>);

impl RenderContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a context from a JSON value. Non-object values yield an empty context.
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Inserts a value, returning the previous one for that key.
    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) -> Option<JsonValue> {
        self.0.insert(key.into(), value)
    }

    /// Builder-style [`RenderContext::insert`].
    pub fn with(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Looks up a top-level key.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// True when the caller supplied a key that collides with [`TEMPLATE_KEY`].
    pub fn has_reserved_key(&self) -> bool {
        self.0.contains_key(TEMPLATE_KEY)
    }

    /// Removes the reserved template key, returning its value if present.
    pub fn take_reserved(&mut self) -> Option<JsonValue> {
        self.0.remove(TEMPLATE_KEY)
    }

    /// Borrows the underlying map.
    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.0
    }
}

impl From<Map<String, JsonValue>> for RenderContext {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}

/// Root of a render: the current document plus the caller's data.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRoot {
    /// HTML of the document being rendered. Always the build's own output.
    pub template: String,
    /// Caller data, never containing [`TEMPLATE_KEY`].
    pub data: RenderContext,
}

impl RenderRoot {
    /// Pairs a template with render data.
    ///
    /// A `template` entry in `data` is discarded so it can never stand in for
    /// the document.
    pub fn new(template: impl Into<String>, mut data: RenderContext) -> Self {
        data.take_reserved();
        Self {
            template: template.into(),
            data,
        }
    }

    /// Resolves a dot path (`site.title`, `links.0`) against the data.
    pub fn lookup(&self, path: &str) -> Option<&JsonValue> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.data.get(first)?;
        for segment in segments {
            current = match current {
                JsonValue::Object(map) => map.get(segment)?,
                JsonValue::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Flattens the root into the single object shape `{ template, ...data }`.
    pub fn to_json(&self) -> JsonValue {
        let mut map = self.data.as_map().clone();
        map.insert(
            TEMPLATE_KEY.to_string(),
            JsonValue::String(self.template.clone()),
        );
        JsonValue::Object(map)
    }
}

/// Formatter settings supplied when the format plugin is created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatOptions(Map<String, JsonValue>);

impl FormatOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds options from a JSON value. Non-object values yield empty options.
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Looks up a setting.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// The parser the formatter will be asked to use.
    pub fn parser(&self) -> Option<&str> {
        self.get(PARSER_KEY).and_then(JsonValue::as_str)
    }

    /// Returns a copy with `parser` forced to [`HTML_PARSER`], whatever the caller set.
    pub fn with_html_parser(&self) -> Self {
        let mut merged = self.0.clone();
        merged.insert(
            PARSER_KEY.to_string(),
            JsonValue::String(HTML_PARSER.to_string()),
        );
        Self(merged)
    }

    /// Borrows the underlying map.
    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.0
    }
}

impl From<Map<String, JsonValue>> for FormatOptions {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}
