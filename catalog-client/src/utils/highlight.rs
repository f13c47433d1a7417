const MARK_OPEN: &str = "<mark>";
const MARK_CLOSE: &str = "</mark>";
const BANNER_PREFIX: &str = "--- PAGE ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub marked: bool,
}

/// Splits server-highlighted text into plain and `<mark>`ed runs.
///
/// An opening tag without its closing tag marks the rest of the text;
/// a stray closing tag is dropped.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let open = rest.find(MARK_OPEN);
        let stray_close = rest.find(MARK_CLOSE).filter(|close| open.map_or(true, |o| *close < o));

        if let Some(close) = stray_close {
            push(&mut out, &rest[..close], false);
            rest = &rest[close + MARK_CLOSE.len()..];
            continue;
        }

        match open {
            Some(start) => {
                push(&mut out, &rest[..start], false);
                let inner = &rest[start + MARK_OPEN.len()..];
                match inner.find(MARK_CLOSE) {
                    Some(end) => {
                        push(&mut out, &inner[..end], true);
                        rest = &inner[end + MARK_CLOSE.len()..];
                    }
                    None => {
                        push(&mut out, inner, true);
                        rest = "";
                    }
                }
            }
            None => {
                push(&mut out, rest, false);
                rest = "";
            }
        }
    }

    out
}

fn push<'a>(out: &mut Vec<Segment<'a>>, text: &'a str, marked: bool) {
    if !text.is_empty() {
        out.push(Segment { text, marked });
    }
}

/// Text with the highlight tags removed.
pub fn plain_text(text: &str) -> String {
    segments(text).into_iter().map(|segment| segment.text).collect()
}

/// Number of highlighted runs.
pub fn mark_count(text: &str) -> usize {
    segments(text).iter().filter(|segment| segment.marked).count()
}

/// Drops a leading `--- PAGE n ---` line, returning the page number if present.
pub fn strip_page_banner(text: &str) -> (Option<u32>, &str) {
    let Some(after_prefix) = text.strip_prefix(BANNER_PREFIX) else {
        return (None, text);
    };
    let (line, body) = after_prefix.split_once('\n').unwrap_or((after_prefix, ""));
    match line.trim_end().strip_suffix("---").map(str::trim) {
        Some(number) => match number.parse::<u32>() {
            Ok(page) => (Some(page), body),
            Err(_) => (None, text),
        },
        None => (None, text),
    }
}
