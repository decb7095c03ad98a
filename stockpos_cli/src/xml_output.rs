use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use std::io::Cursor;

use stockpos_lib::types::OhlcBar;
use stockpos_lib::TickerSummary;

use crate::output::ValidationRow;

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Recursively write a serde_json::Value as XML elements. Null fields are
/// omitted entirely rather than emitted as empty elements.
fn write_value<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &serde_json::Value,
) -> Result<(), quick_xml::Error> {
    match value {
        serde_json::Value::Null => {}
        serde_json::Value::Bool(b) => {
            write_text_element(writer, tag, if *b { "true" } else { "false" })?;
        }
        serde_json::Value::Number(n) => write_text_element(writer, tag, &n.to_string())?,
        serde_json::Value::String(s) => write_text_element(writer, tag, s)?,
        serde_json::Value::Array(arr) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for item in arr {
                write_value(writer, "item", item)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        serde_json::Value::Object(map) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for (key, val) in map {
                write_value(writer, key, val)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
    }
    Ok(())
}

/// Serialize a slice of Serialize items into an XML string.
fn items_to_xml<T: Serialize>(root_tag: &str, item_tag: &str, items: &[T]) -> String {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .expect("write xml decl");

    if items.is_empty() {
        writer
            .write_event(Event::Empty(BytesStart::new(root_tag)))
            .expect("write empty root");
    } else {
        writer
            .write_event(Event::Start(BytesStart::new(root_tag)))
            .expect("write root start");

        for item in items {
            let val = serde_json::to_value(item).expect("serialize to json value");
            write_value(&mut writer, item_tag, &val).expect("write xml value");
        }

        writer
            .write_event(Event::End(BytesEnd::new(root_tag)))
            .expect("write root end");
    }

    let buf = writer.into_inner().into_inner();
    String::from_utf8(buf).expect("valid utf8")
}

pub fn summaries_to_xml(summaries: &[TickerSummary]) -> String {
    items_to_xml("summaries", "summary", summaries)
}

pub fn history_to_xml(bars: &[OhlcBar]) -> String {
    items_to_xml("history", "bar", bars)
}

pub(crate) fn validations_to_xml(rows: &[ValidationRow]) -> String {
    items_to_xml("validations", "ticker", rows)
}
