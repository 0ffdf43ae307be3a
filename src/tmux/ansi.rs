const ESC: u8 = 0x1b;

/// Remove CSI escape sequences from captured pane text in a single pass.
///
/// An `ESC [` introducer swallows every following byte up to and including
/// the first ASCII letter. A lone `ESC` not followed by `[` is dropped on its
/// own and the next byte is kept.
pub fn strip_ansi(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != ESC {
            i += 1;
            continue;
        }

        // Every cut lands right after an ASCII byte, so slicing stays on char boundaries
        out.push_str(&s[start..i]);
        i += 1;
        if i < bytes.len() && bytes[i] == b'[' {
            i += 1;
            while i < bytes.len() && !bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            if i < bytes.len() {
                i += 1;
            }
        }
        start = i;
    }

    out.push_str(&s[start..]);
    out
}
