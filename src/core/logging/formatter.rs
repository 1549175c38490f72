use super::record::Record;
use serde_json::{Map, Value};

/// Canonical line layout of the logging library
pub const SIMPLE_FORMAT: &str = "[%datetime%] %channel%.%level_name%: %message% %context% %extra%\n";

/// Converts a record into one output line
pub trait LineFormatter: Send + Sync {
    fn format(&self, record: &Record) -> String;
}

/// The library's built-in line formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl LineFormatter for DefaultFormatter {
    fn format(&self, record: &Record) -> String {
        render(SIMPLE_FORMAT, record)
    }
}

/// Formatter driven by a user supplied `%placeholder%` template
#[derive(Debug, Clone)]
pub struct TemplateFormatter {
    template: String,
}

impl TemplateFormatter {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl LineFormatter for TemplateFormatter {
    fn format(&self, record: &Record) -> String {
        render(&self.template, record)
    }
}

/// Line format selection for a handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineFormat {
    /// Library default, see [`SIMPLE_FORMAT`]
    Default,
    Template(String),
}

impl LineFormat {
    /// `None` selects the library default
    pub fn from_option(template: Option<&str>) -> Self {
        match template {
            Some(template) => LineFormat::Template(template.to_string()),
            None => LineFormat::Default,
        }
    }

    /// Config files have no null, so an empty string means the library default
    pub fn from_config(template: &str) -> Self {
        if template.is_empty() {
            LineFormat::Default
        } else {
            LineFormat::Template(template.to_string())
        }
    }

    pub fn template(&self) -> Option<&str> {
        match self {
            LineFormat::Default => None,
            LineFormat::Template(template) => Some(template),
        }
    }

    pub fn formatter(&self) -> Box<dyn LineFormatter> {
        match self {
            LineFormat::Default => Box::new(DefaultFormatter),
            LineFormat::Template(template) => Box::new(TemplateFormatter::new(template.clone())),
        }
    }
}

/// Substitute every known placeholder in `template`.
///
/// Unknown `%word%` tokens are kept verbatim. `%context.KEY%` and `%extra.KEY%`
/// resolve to the keyed value, or to nothing when the key is absent. A key
/// printed through a dotted placeholder is left out of `%context%` / `%extra%`.
fn render(template: &str, record: &Record) -> String {
    let context = unreferenced(template, "context", &record.context);
    let extra = unreferenced(template, "extra", &record.extra);

    let mut out = String::with_capacity(template.len() + record.message.len());
    let mut rest = template;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        if let Some(end) = after.find(['%', '\n']) {
            if end > 0 && after[end..].starts_with('%') {
                if let Some(value) = placeholder(&after[..end], record, &context, &extra) {
                    out.push_str(&value);
                    rest = &after[end + 1..];
                    continue;
                }
            }
        }

        // Not a placeholder, keep the '%' and rescan from the next char
        out.push('%');
        rest = after;
    }

    out.push_str(rest);
    out
}

fn placeholder(
    token: &str,
    record: &Record,
    context: &Map<String, Value>,
    extra: &Map<String, Value>,
) -> Option<String> {
    let value = match token {
        "message" => replace_newlines(&record.message),
        "level_name" => record.level.name().to_string(),
        "level" => record.level.code().to_string(),
        "channel" => replace_newlines(&record.channel),
        "datetime" => record.formatted_datetime(),
        "context" => map_to_string(context),
        "extra" => map_to_string(extra),
        _ => {
            if let Some(key) = token.strip_prefix("context.") {
                record.context.get(key).map(value_to_string).unwrap_or_default()
            } else if let Some(key) = token.strip_prefix("extra.") {
                record.extra.get(key).map(value_to_string).unwrap_or_default()
            } else {
                return None;
            }
        }
    };
    Some(value)
}

/// Entries of `map` the template does not print through `%prefix.KEY%`
fn unreferenced(template: &str, prefix: &str, map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(key, _)| !template.contains(&format!("%{}.{}%", prefix, key)))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn map_to_string(map: &Map<String, Value>) -> String {
    if map.is_empty() {
        // An empty map renders as an empty list in the canonical format
        return "[]".to_string();
    }
    replace_newlines(&Value::Object(map.clone()).to_string())
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => replace_newlines(s),
        other => replace_newlines(&other.to_string()),
    }
}

fn replace_newlines(s: &str) -> String {
    s.replace("\r\n", " ").replace(['\r', '\n'], " ")
}
