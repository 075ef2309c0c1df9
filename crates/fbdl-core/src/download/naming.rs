//! Local file names for downloaded pages.

/// Extension of the last path segment of `url`, lowercased; `jpg` when absent.
pub fn page_extension(url: &str) -> String {
    let path = url
        .split(|c| c == '?' || c == '#')
        .next()
        .unwrap_or_default();
    let last = path.rsplit('/').next().unwrap_or_default();
    match last.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= 5
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_ascii_lowercase()
        }
        _ => "jpg".to_string(),
    }
}

/// `0000.jpg`, `0001.webp`, ...: zero-padded so lexical order is page order.
pub fn page_file_name(index: usize, url: &str) -> String {
    format!("{:04}.{}", index, page_extension(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_from_last_segment() {
        assert_eq!(page_extension("https://h/a/b/files/mobile/1.jpg"), "jpg");
        assert_eq!(page_extension("https://h/a/b/files/large/abc.WEBP"), "webp");
        assert_eq!(page_extension("https://h/a/b/files/large/p.png?v=2"), "png");
    }

    #[test]
    fn missing_or_odd_extension_defaults_to_jpg() {
        assert_eq!(page_extension("https://h/a/b/files/large/noext"), "jpg");
        assert_eq!(page_extension("https://h/a.b/files/large/x"), "jpg");
        assert_eq!(page_extension("https://h/a/b/files/large/.hidden"), "jpg");
    }

    #[test]
    fn zero_padded_names() {
        assert_eq!(page_file_name(0, "https://h/1.jpg"), "0000.jpg");
        assert_eq!(page_file_name(42, "https://h/x.png"), "0042.png");
        assert_eq!(page_file_name(12345, "https://h/x.png"), "12345.png");
    }
}
