use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// 模糊匹配字符串
pub fn fuzzy_match(text: &str, pattern: &str) -> bool {
    let matcher = SkimMatcherV2::default();
    matcher.fuzzy_match(text, pattern).is_some()
}

/// 获取模糊匹配分数
pub fn fuzzy_score(text: &str, pattern: &str) -> i64 {
    let matcher = SkimMatcherV2::default();
    matcher.fuzzy_match(text, pattern).unwrap_or(0)
}

/// 格式化文件大小
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 去除首尾空白和尾部路径分隔符
pub fn trim_path(path: &str) -> &str {
    path.trim().trim_end_matches(|c| c == '\\' || c == '/')
}

/// 路径末段名；无分隔符时返回整个路径
///
/// 注册表路径和 Windows 文件路径都按 `\` 或 `/` 切分，
/// 不依赖宿主平台的分隔符约定。
pub fn leaf_name(path: &str) -> &str {
    let trimmed = trim_path(path);
    match trimmed.rfind(|c| c == '\\' || c == '/') {
        Some(i) => &trimmed[i + 1..],
        None => trimmed,
    }
}

/// 路径的父目录；无分隔符时返回 None
pub fn parent_path(path: &str) -> Option<&str> {
    let trimmed = trim_path(path);
    trimmed
        .rfind(|c| c == '\\' || c == '/')
        .map(|i| trim_path(&trimmed[..i]))
}

/// 两条路径是否指向同一位置（大小写和尾分隔符不敏感）
pub fn paths_equal(left: &str, right: &str) -> bool {
    trim_path(left).eq_ignore_ascii_case(trim_path(right))
}

/// 是否为绝对路径（盘符或 UNC 前缀）
pub fn is_path_rooted(path: &str) -> bool {
    let bytes = path.as_bytes();
    if path.starts_with("\\\\") {
        return true;
    }
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_name_returns_last_segment() {
        assert_eq!(leaf_name("HKLM\\SOFTWARE\\Foo"), "Foo");
        assert_eq!(leaf_name("C:\\Program Files\\Foo\\"), "Foo");
        assert_eq!(leaf_name("Foo"), "Foo");
    }

    #[test]
    fn parent_path_strips_last_segment() {
        assert_eq!(parent_path("HKLM\\SOFTWARE\\Foo"), Some("HKLM\\SOFTWARE"));
        assert_eq!(parent_path("Foo"), None);
    }

    #[test]
    fn paths_equal_ignores_case_and_trailing_separators() {
        assert!(paths_equal("HKLM\\Software\\Foo\\", "hklm\\SOFTWARE\\foo"));
        assert!(!paths_equal("HKLM\\Software\\Foo", "HKLM\\Software\\Bar"));
    }

    #[test]
    fn is_path_rooted_recognizes_drives_and_unc() {
        assert!(is_path_rooted("C:\\Program Files"));
        assert!(is_path_rooted("d:/tools"));
        assert!(is_path_rooted("\\\\server\\share"));
        assert!(!is_path_rooted("foo.dll"));
        assert!(!is_path_rooted("..\\relative"));
    }

    #[test]
    fn format_size_picks_unit() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
    }
}
