//! Text helpers for log parsing and report rendering

/// `size` spaces
pub fn indent(size: usize) -> String {
    " ".repeat(size)
}

/// Undo the XML escaping the VM applies to dump lines inside its log file
pub fn unescape_xml(line: &str) -> String {
    if !line.contains('&') {
        return line.to_string();
    }
    // `&amp;` must go last, otherwise `&amp;lt;` would turn into `<`
    line.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
