use serde_json::Value;

use crate::error::DebuggerError;
use crate::hooks::PromptCapture;
use crate::prune::is_truthy;

use super::sink::{ConsoleSink, Tone};

const SECTIONS: [(&str, &str, Tone); 3] = [
    ("char_prompt", "Character Prompt", Tone::Character),
    ("user_prompt", "User Prompt", Tone::User),
    ("world_prompt", "World Prompt", Tone::World),
];

const KEYED_SECTIONS: [(&str, &str, &str, Tone); 2] = [
    (
        "other_chars_prompt",
        "Other Characters Prompts",
        "Character ID",
        Tone::OtherCharacters,
    ),
    ("plugin_prompts", "Plugin Prompts", "Plugin ID", Tone::Plugins),
];

/// Writes one capture as a console group. Verbose mode adds one subgroup per
/// known prompt section.
pub fn render_capture(
    sink: &mut dyn ConsoleSink,
    capture: &PromptCapture,
    verbose: bool,
) -> Result<(), DebuggerError> {
    let title = format!("Prompt Structure (Source: {})", capture.source);
    in_group(sink, &title, Tone::Header, |sink| {
        sink.line(&format!("Timestamp: {}", capture.timestamp_iso()), Tone::Muted)?;
        sink.line(
            &format!("Full Prompt Structure: {}", pretty(Some(&capture.prompt))?),
            Tone::Plain,
        )?;
        if verbose {
            render_sections(sink, &capture.prompt)?;
        }
        Ok(())
    })?;
    sink.flush()?;
    Ok(())
}

/// Runs `body` inside a group. The group is closed even when `body` fails,
/// so a failed capture never shifts the indentation of the next one.
fn in_group<F>(
    sink: &mut dyn ConsoleSink,
    title: &str,
    tone: Tone,
    body: F,
) -> Result<(), DebuggerError>
where
    F: FnOnce(&mut dyn ConsoleSink) -> Result<(), DebuggerError>,
{
    sink.group(title, tone)?;
    let result = body(&mut *sink);
    sink.group_end()?;
    result
}

fn render_sections(sink: &mut dyn ConsoleSink, prompt: &Value) -> Result<(), DebuggerError> {
    for (key, title, tone) in SECTIONS {
        if let Some(part) = prompt.get(key).filter(|v| is_truthy(v)) {
            in_group(sink, title, tone, |sink| render_single_part(sink, part))?;
        }
    }

    for (key, title, entry_label, tone) in KEYED_SECTIONS {
        let entries = keyed_entries(prompt.get(key));
        if entries.is_empty() {
            continue;
        }
        in_group(sink, title, tone, |sink| {
            for (id, part) in &entries {
                let entry_title = format!("{entry_label}: {id}");
                in_group(sink, &entry_title, Tone::Plain, |sink| render_single_part(sink, part))?;
            }
            Ok(())
        })?;
    }

    if let Some(chat_log) = prompt.get("chat_log").filter(|v| is_truthy(v)) {
        in_group(sink, "Chat Log", Tone::ChatLog, |sink| {
            sink.line(&format!("Entries: {}", pretty(Some(chat_log))?), Tone::Plain)?;
            Ok(())
        })?;
    }
    Ok(())
}

fn render_single_part(sink: &mut dyn ConsoleSink, part: &Value) -> Result<(), DebuggerError> {
    sink.line(
        &format!("Text Components: {}", pretty(part.get("text"))?),
        Tone::Plain,
    )?;
    sink.line(
        &format!(
            "Additional Chat Log: {}",
            pretty(part.get("additional_chat_log"))?
        ),
        Tone::Plain,
    )?;
    sink.line(
        &format!("Extensions: {}", pretty(part.get("extension"))?),
        Tone::Plain,
    )?;
    Ok(())
}

/// Missing values print the way the host console shows them.
pub(crate) fn pretty(value: Option<&Value>) -> Result<String, DebuggerError> {
    match value {
        None => Ok("undefined".to_string()),
        Some(v) => Ok(serde_json::to_string_pretty(v)?),
    }
}

fn keyed_entries(value: Option<&Value>) -> Vec<(String, &Value)> {
    match value {
        Some(Value::Object(fields)) => fields.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::sink::WriterSink;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn render(prompt: Value, verbose: bool) -> String {
        let capture = PromptCapture {
            source: "test".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            prompt,
        };
        let mut sink = WriterSink::new(Vec::new(), false, 2);
        render_capture(&mut sink, &capture, verbose).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn header_and_timestamp() {
        let out = render(json!({"a": 1}), false);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("Prompt Structure (Source: test)"));
        assert_eq!(lines.next(), Some("  Timestamp: 2024-05-01T12:00:00.000Z"));
        assert_eq!(lines.next(), Some("  Full Prompt Structure: {"));
        assert!(!out.contains("Character Prompt"));
    }

    #[test]
    fn verbose_prints_present_sections_only() {
        let out = render(
            json!({
                "char_prompt": {"text": [{"content": "hi"}]},
                "chat_log": [{"content": "yo"}]
            }),
            true,
        );
        assert!(out.contains("  Character Prompt\n"));
        assert!(out.contains("    Additional Chat Log: undefined"));
        assert!(out.contains("  Chat Log\n"));
        assert!(!out.contains("User Prompt"));
        assert!(!out.contains("Plugin Prompts"));
    }

    #[test]
    fn keyed_sections_get_one_group_per_id() {
        let out = render(
            json!({
                "other_chars_prompt": {"42": {"text": []}, "7": {"extension": {}}},
                "plugin_prompts": {}
            }),
            true,
        );
        assert!(out.contains("  Other Characters Prompts\n    Character ID: 42\n"));
        assert!(out.contains("    Character ID: 7\n"));
        assert!(!out.contains("Plugin Prompts"));
    }

    /// Fails the first write of a `Timestamp` line, then behaves.
    struct FailOnTimestamp {
        out: Vec<u8>,
        armed: bool,
    }

    impl std::io::Write for FailOnTimestamp {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.armed && buf.starts_with(b"Timestamp") {
                self.armed = false;
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "console gone"));
            }
            self.out.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_write_does_not_leave_group_open() {
        let capture = |source: &str| PromptCapture {
            source: source.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            prompt: json!({"char_prompt": {"text": ["x"]}}),
        };
        let writer = FailOnTimestamp {
            out: Vec::new(),
            armed: true,
        };
        let mut sink = WriterSink::new(writer, false, 2);

        assert!(render_capture(&mut sink, &capture("first"), true).is_err());
        assert_eq!(sink.depth(), 0);

        render_capture(&mut sink, &capture("second"), true).unwrap();
        assert_eq!(sink.depth(), 0);
        let out = String::from_utf8(sink.into_inner().out).unwrap();
        let second = &out[out.find("Prompt Structure (Source: second)").unwrap()..];
        assert!(second.starts_with("Prompt Structure (Source: second)\n  Timestamp: "));
        assert!(second.contains("\n  Character Prompt\n    Text Components: ["));
    }

    #[test]
    fn falsy_sections_are_skipped() {
        let out = render(json!({"user_prompt": "", "world_prompt": null}), true);
        assert!(!out.contains("User Prompt"));
        assert!(!out.contains("World Prompt"));
    }
}
