//! Text-level XML helpers for document parts
//!
//! Template parts are edited as text so that formatting the engine does not
//! understand is preserved byte for byte. These helpers cover the few places
//! where element structure matters.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Escape `&`, `<` and `>` for use inside a text node
pub fn escape_text(value: &str) -> String {
    quick_xml::escape::partial_escape(value).into_owned()
}

/// Check that `xml` is a single well-formed document fragment
///
/// Every start tag must be closed by a matching end tag.
pub fn is_well_formed(xml: &str) -> bool {
    let mut reader = Reader::from_str(xml);
    let mut depth: usize = 0;

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            Ok(Event::Eof) => return depth == 0,
            Ok(_) => {}
            Err(_) => return false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Open,
    Close,
}

/// Positions of `<tag ...>` and `</tag>` in `xml`, skipping self-closing tags
fn scan_tags(xml: &str, tag: &str) -> Vec<(usize, usize, TagKind)> {
    let mut found = Vec::new();

    for (pos, _) in xml.match_indices('<') {
        let rest = &xml[pos + 1..];
        let (kind, name_rest) = match rest.strip_prefix('/') {
            Some(r) => (TagKind::Close, r),
            None => (TagKind::Open, rest),
        };

        let Some(after_name) = name_rest.strip_prefix(tag) else {
            continue;
        };
        // `<w:tr` must not match `<w:trPr`
        if !after_name.starts_with(|c: char| c == '>' || c == '/' || c.is_whitespace()) {
            continue;
        }

        let Some(close) = xml[pos..].find('>') else {
            break;
        };
        let end = pos + close + 1;

        if kind == TagKind::Open && xml[..end].ends_with("/>") {
            continue;
        }
        found.push((pos, end, kind));
    }

    found
}

/// Byte spans of every `<tag>...</tag>` element in `xml`
fn element_spans(xml: &str, tag: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut open = Vec::new();

    for (start, end, kind) in scan_tags(xml, tag) {
        match kind {
            TagKind::Open => open.push(start),
            TagKind::Close => {
                if let Some(s) = open.pop() {
                    spans.push((s, end));
                }
            }
        }
    }

    spans
}

/// Remove every innermost `<tag>` element whose content contains `needle`
///
/// Returns the edited text and the number of elements removed. Occurrences of
/// `needle` outside any such element are left alone.
pub fn drop_elements(xml: &str, tag: &str, needle: &str) -> (String, usize) {
    let mut text = xml.to_string();
    let mut removed = 0;

    if needle.is_empty() {
        return (text, removed);
    }

    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find(needle) {
        let hit = search_from + offset;
        let enclosing = element_spans(&text, tag)
            .into_iter()
            .filter(|&(s, e)| s <= hit && hit + needle.len() <= e)
            .max_by_key(|&(s, _)| s);

        match enclosing {
            Some((s, e)) => {
                text.replace_range(s..e, "");
                removed += 1;
                search_from = s;
            }
            None => search_from = hit + needle.len(),
        }
    }

    (text, removed)
}
