//! spans.rs - Splits markdown text into searchable and protected segments.
//!
//! Substitution rules must never rewrite text that is already literal to the
//! MDX renderer: inline code spans, fenced and indented code blocks, and the
//! spans produced by earlier rules in the same pass. `split_code_spans` asks
//! `pulldown-cmark` where the first two are, so code spans never cross block
//! boundaries and `~~~` fences count the same as backtick fences. Engines then
//! turn each replacement into an `Escaped` segment so later rules skip it.
//!
//! License: MIT OR APACHE 2.0

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use std::ops::Range;

/// One piece of a document during a sanitization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text rules may search. `offset` is the byte position in the input.
    Plain { text: &'a str, offset: usize },
    /// An existing code span or code block, delimiters included.
    Code(&'a str),
    /// Output of a substitution rule.
    Escaped(String),
}

impl Segment<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Plain { text, .. } => text,
            Segment::Code(text) => text,
            Segment::Escaped(text) => text,
        }
    }
}

fn parser_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS | Options::ENABLE_TABLES
}

/// Source ranges of every inline code span and code block, sorted and merged.
pub fn code_ranges(input: &str) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    let mut open_block: Option<Range<usize>> = None;

    for (event, range) in Parser::new_ext(input, parser_options()).into_offset_iter() {
        match event {
            Event::Code(_) => ranges.push(range),
            Event::Start(Tag::CodeBlock(_)) => open_block = Some(range),
            Event::End(TagEnd::CodeBlock) => {
                let block = match open_block.take() {
                    Some(start) => start.start..start.end.max(range.end),
                    None => range,
                };
                ranges.push(block);
            }
            _ => {}
        }
    }
    if let Some(block) = open_block {
        ranges.push(block);
    }

    ranges.sort_by_key(|r| r.start);
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

/// Splits `input` into `Plain` text and the `Code` regions markdown renders
/// literally.
pub fn split_code_spans(input: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut plain_start = 0;

    for range in code_ranges(input) {
        let end = range.end.min(input.len());
        if range.start < plain_start || end <= range.start {
            continue;
        }
        if plain_start < range.start {
            segments.push(Segment::Plain {
                text: &input[plain_start..range.start],
                offset: plain_start,
            });
        }
        segments.push(Segment::Code(&input[range.start..end]));
        plain_start = end;
    }

    if plain_start < input.len() {
        segments.push(Segment::Plain {
            text: &input[plain_start..],
            offset: plain_start,
        });
    }

    segments
}

/// True when `input[start..end]` already sits between a pair of backticks.
///
/// A stray backtick earlier in the paragraph can pair with the opening
/// backtick of an escape, leaving the escaped text outside any code span on
/// the next parse. The surrounding backticks still mark it as escaped.
pub fn is_backtick_wrapped(input: &str, start: usize, end: usize) -> bool {
    let bytes = input.as_bytes();
    if start == 0 || bytes.get(start - 1) != Some(&b'`') || bytes.get(end) != Some(&b'`') {
        return false;
    }
    start < 2 || bytes[start - 2] != b'\\'
}

/// Reassembles segments into the final document text.
pub fn join_segments(segments: &[Segment<'_>]) -> String {
    let len = segments.iter().map(|s| s.as_str().len()).sum();
    let mut out = String::with_capacity(len);
    for segment in segments {
        out.push_str(segment.as_str());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_texts(input: &str) -> Vec<&str> {
        split_code_spans(input)
            .into_iter()
            .filter_map(|s| match s {
                Segment::Code(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn text_without_backticks_is_one_plain_segment() {
        let segments = split_code_spans("plain <Foo> text");
        assert_eq!(
            segments,
            vec![Segment::Plain {
                text: "plain <Foo> text",
                offset: 0
            }]
        );
    }

    #[test]
    fn inline_code_is_protected() {
        let segments = split_code_spans("a `<Foo>` b");
        assert_eq!(
            segments,
            vec![
                Segment::Plain { text: "a ", offset: 0 },
                Segment::Code("`<Foo>`"),
                Segment::Plain { text: " b", offset: 9 },
            ]
        );
    }

    #[test]
    fn closing_run_must_match_length() {
        assert_eq!(code_texts("``a ` <b> ``c"), vec!["``a ` <b> ``"]);
    }

    #[test]
    fn backtick_fence_is_protected() {
        let input = "intro\n\n```rust\nlet v: Vec<T> = x;\n```\n\n<Foo>\n";
        let code = code_texts(input);
        assert_eq!(code.len(), 1);
        assert!(code[0].starts_with("```rust\nlet v: Vec<T> = x;\n```"));
        assert!(split_code_spans(input).last().unwrap().as_str().contains("<Foo>"));
    }

    #[test]
    fn tilde_fence_is_protected() {
        let input = "~~~sh\necho `\n~~~\n\n<Widget/> here\n\nsee `x`\n";
        let code = code_texts(input);
        assert_eq!(code.len(), 2);
        assert!(code[0].starts_with("~~~sh\necho `\n~~~"));
        assert_eq!(code[1], "`x`");
    }

    #[test]
    fn indented_block_is_protected() {
        let input = "para\n\n    let v: Vec<T> = x;\n\nafter <Foo>\n";
        let code = code_texts(input);
        assert_eq!(code.len(), 1);
        assert!(code[0].contains("let v: Vec<T> = x;"));
        assert!(!code[0].contains("after"));
    }

    #[test]
    fn stray_backtick_does_not_reach_into_later_paragraphs() {
        let input = "Press the ` key.\n\n<Foo> renders.\n\nThen run `build`.\n";
        assert_eq!(code_texts(input), vec!["`build`"]);
    }

    #[test]
    fn escaped_backtick_only_escapes_one() {
        // The backslash escapes the first backtick of the run; the second
        // still opens a span.
        let input = r"cost \``<A>` end";
        assert_eq!(code_texts(input), vec!["`<A>`"]);
        assert_eq!(join_segments(&split_code_spans(input)), input);
    }

    #[test]
    fn wrapped_detection() {
        let text = "a ` b `<Foo>`";
        let start = text.find("<Foo>").unwrap();
        assert!(is_backtick_wrapped(text, start, start + 5));
        assert!(!is_backtick_wrapped("x <Foo>`", 2, 7));
        assert!(!is_backtick_wrapped(r"\`<Foo>`", 2, 7));
        assert!(!is_backtick_wrapped("<Foo>", 0, 5));
    }
}
