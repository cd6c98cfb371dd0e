//! Incremental server-sent event parser for the change stream.

/// A parsed server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SseEvent {
    /// Value of the `event:` field, if present.
    pub event_type: Option<String>,
    /// Joined `data:` lines.
    pub data: String,
}

#[derive(Debug, Default)]
struct EventBuilder {
    event_type: Option<String>,
    data_lines: Vec<String>,
}

impl EventBuilder {
    fn is_empty(&self) -> bool {
        self.event_type.is_none() && self.data_lines.is_empty()
    }

    fn build(&mut self) -> SseEvent {
        let event = SseEvent {
            event_type: self.event_type.take(),
            data: self.data_lines.join("\n"),
        };
        self.data_lines.clear();
        event
    }

    /// Feeds one line; a blank line closes the pending event.
    fn process_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return (!self.is_empty()).then(|| self.build());
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, raw_value) = line.split_once(':').unwrap_or((line, ""));
        let value = raw_value.strip_prefix(' ').unwrap_or(raw_value);
        match field {
            "event" => self.event_type = Some(value.to_owned()),
            "data" => self.data_lines.push(value.to_owned()),
            _ => {}
        }
        None
    }
}

/// Parses a byte stream chunk by chunk.
///
/// Bytes are buffered until a full line arrives, so characters split
/// across chunks decode intact.
#[derive(Debug, Default)]
pub(super) struct SseLineParser {
    line_buffer: Vec<u8>,
    builder: EventBuilder,
}

impl SseLineParser {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Pushes a chunk and returns the events it completed.
    pub(super) fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        let mut events = Vec::new();
        for &byte in chunk {
            if byte == b'\n' {
                let raw = std::mem::take(&mut self.line_buffer);
                let bytes = raw.strip_suffix(b"\r").unwrap_or(&raw);
                let line = String::from_utf8_lossy(bytes);
                events.extend(self.builder.process_line(&line));
            } else {
                self.line_buffer.push(byte);
            }
        }
        events
    }
}
