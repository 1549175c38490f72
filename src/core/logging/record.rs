use super::level::Level;
use chrono::{DateTime, Local};
use serde_json::{Map, Value};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::Event;

/// Timestamp layout used in formatted lines
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single log event
#[derive(Debug, Clone)]
pub struct Record {
    pub message: String,
    pub context: Map<String, Value>,
    pub level: Level,
    pub channel: String,
    pub datetime: DateTime<Local>,
    pub extra: Map<String, Value>,
}

impl Record {
    /// Create a record stamped with the current local time
    pub fn new(channel: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Map::new(),
            level,
            channel: channel.into(),
            datetime: Local::now(),
            extra: Map::new(),
        }
    }

    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = context;
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn with_datetime(mut self, datetime: DateTime<Local>) -> Self {
        self.datetime = datetime;
        self
    }

    pub fn formatted_datetime(&self) -> String {
        self.datetime.format(DATETIME_FORMAT).to_string()
    }

    /// Rebuild a record from an event a [`Logger`](super::logger::Logger) emitted.
    /// Events under any other target yield `None`.
    pub fn from_event(event: &Event<'_>) -> Option<Self> {
        let level = Level::from_target(event.metadata().target())?;
        let mut fields = RecordFields::default();
        event.record(&mut fields);

        Some(Self {
            message: fields.message,
            context: fields.context,
            level,
            channel: fields.channel,
            datetime: fields.datetime.unwrap_or_else(Local::now),
            extra: fields.extra,
        })
    }
}

/// Serialise a context or extra map for transport as an event field
pub fn map_field(map: &Map<String, Value>) -> String {
    serde_json::to_string(map).unwrap_or_else(|_| "{}".to_string())
}

#[derive(Default)]
struct RecordFields {
    message: String,
    channel: String,
    datetime: Option<DateTime<Local>>,
    context: Map<String, Value>,
    extra: Map<String, Value>,
}

impl RecordFields {
    fn set(&mut self, name: &str, value: String) {
        match name {
            "message" => self.message = value,
            "channel" => self.channel = value,
            "datetime" => {
                self.datetime = DateTime::parse_from_rfc3339(&value)
                    .ok()
                    .map(|at| at.with_timezone(&Local))
            }
            "context" => self.context = serde_json::from_str(&value).unwrap_or_default(),
            "extra" => self.extra = serde_json::from_str(&value).unwrap_or_default(),
            _ => {}
        }
    }
}

impl Visit for RecordFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.set(field.name(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.set(field.name(), format!("{:?}", value));
    }
}
