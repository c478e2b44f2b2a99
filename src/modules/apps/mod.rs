pub mod models;

use crate::modules::common::utils;
use crate::modules::store::HierarchicalStore;
use models::AppDescriptor;

/// 卸载注册信息所在的三个根
pub const UNINSTALL_ROOTS: [&str; 3] = [
    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Uninstall",
    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Wow6432Node\\Microsoft\\Windows\\CurrentVersion\\Uninstall",
    "HKEY_CURRENT_USER\\SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Uninstall",
];

/// 枚举卸载注册键，产出程序描述列表
///
/// 打不开的根直接跳过；结果按显示名去重排序。
pub fn list_installed(store: &dyn HierarchicalStore) -> Vec<AppDescriptor> {
    let mut apps = Vec::new();

    for root in UNINSTALL_ROOTS {
        let key = match store.open_key(root) {
            Some(key) => key,
            None => {
                tracing::debug!("无法打开卸载注册根 {}", root);
                continue;
            }
        };

        for name in key.subkey_names() {
            let entry_path = format!("{}\\{}", root, name);
            if let Some(entry) = store.open_key(&entry_path) {
                if let Some(app) = parse_uninstall_entry(&*entry, &entry_path) {
                    apps.push(app);
                }
            }
        }
    }

    dedupe_and_sort(&mut apps);
    apps
}

/// 按名称模糊筛选程序
pub fn filter_by_name(apps: &[AppDescriptor], search: &str) -> Vec<AppDescriptor> {
    let normalized = search.to_lowercase();
    apps.iter()
        .filter(|app| {
            let name = app.display_name.to_lowercase();
            name.contains(&normalized) || utils::fuzzy_match(&name, &normalized)
        })
        .cloned()
        .collect()
}

/// 解析一条卸载注册项
fn parse_uninstall_entry(
    entry: &dyn crate::modules::store::StoreKey,
    entry_path: &str,
) -> Option<AppDescriptor> {
    // 必须有 DisplayName
    let name: String = entry.read_string("DisplayName")?;
    if name.trim().is_empty() {
        return None;
    }

    // 跳过以 KB 开头的补丁
    if name.starts_with("KB") || name.to_lowercase().contains("security update") {
        return None;
    }

    let mut app = AppDescriptor::new(name);
    app.uninstall_key_path = Some(entry_path.to_string());
    app.publisher = entry.read_string("Publisher");
    app.version = entry.read_string("DisplayVersion");
    app.install_location = entry.read_string("InstallLocation").filter(|s| !s.trim().is_empty());
    app.uninstall_command = entry.read_string("UninstallString");
    app.executable_path = entry
        .read_string("DisplayIcon")
        .as_deref()
        .and_then(extract_executable_path);

    // 估算大小 (KB 转字节)
    if let Some(size) = entry.read_u32("EstimatedSize") {
        app.estimated_size = Some(size as u64 * 1024);
    }

    Some(app)
}

/// 从 DisplayIcon 之类的值中提取可执行文件路径
///
/// 形如 `"C:\Foo\foo.exe",0` 的值去掉引号和尾部图标索引。
pub fn extract_executable_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // 去掉尾部 ",<数字>" 图标索引
    let without_index = match trimmed.rfind(',') {
        Some(i) if trimmed[i + 1..].trim().parse::<i32>().is_ok() => &trimmed[..i],
        _ => trimmed,
    };

    let candidate = without_index.trim().trim_matches('"').trim();
    if candidate.is_empty() {
        return None;
    }

    Some(candidate.to_string())
}

fn dedupe_and_sort(apps: &mut Vec<AppDescriptor>) {
    let mut seen = std::collections::HashSet::new();
    apps.retain(|app| seen.insert(app.display_name.to_lowercase()));
    apps.sort_by(|left, right| {
        left.display_name
            .to_lowercase()
            .cmp(&right.display_name.to_lowercase())
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::store::memory::MemoryStore;

    fn store_with_entry() -> MemoryStore {
        let mut store = MemoryStore::new();
        let entry = format!("{}\\Foo App", UNINSTALL_ROOTS[0]);
        store.set_string(&entry, "DisplayName", "Foo App");
        store.set_string(&entry, "Publisher", "Foo Ltd");
        store.set_string(&entry, "InstallLocation", "C:\\Program Files\\Foo");
        store.set_string(&entry, "DisplayIcon", "\"C:\\Program Files\\Foo\\foo.exe\",0");
        store.set_dword(&entry, "EstimatedSize", 1024);
        store
    }

    #[test]
    fn list_installed_builds_descriptors() {
        let store = store_with_entry();
        let apps = list_installed(&store);

        assert_eq!(apps.len(), 1);
        let app = &apps[0];
        assert_eq!(app.display_name, "Foo App");
        assert_eq!(
            app.install_location.as_deref(),
            Some("C:\\Program Files\\Foo")
        );
        assert_eq!(
            app.executable_path.as_deref(),
            Some("C:\\Program Files\\Foo\\foo.exe")
        );
        assert_eq!(
            app.uninstall_key_path.as_deref(),
            Some("HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Uninstall\\Foo App")
        );
        assert_eq!(app.estimated_size, Some(1024 * 1024));
    }

    #[test]
    fn entries_without_display_name_are_skipped() {
        let mut store = store_with_entry();
        store.set_string(
            &format!("{}\\NoName", UNINSTALL_ROOTS[0]),
            "InstallLocation",
            "C:\\x",
        );
        store.set_string(
            &format!("{}\\KB500123", UNINSTALL_ROOTS[2]),
            "DisplayName",
            "KB500123",
        );

        let apps = list_installed(&store);
        assert_eq!(apps.len(), 1);
    }

    #[test]
    fn duplicate_names_across_roots_collapse() {
        let mut store = store_with_entry();
        let wow_entry = format!("{}\\Foo App", UNINSTALL_ROOTS[1]);
        store.set_string(&wow_entry, "DisplayName", "Foo App");

        let apps = list_installed(&store);
        assert_eq!(apps.len(), 1);
    }

    #[test]
    fn extract_executable_path_strips_quotes_and_index() {
        assert_eq!(
            extract_executable_path("\"C:\\Foo\\foo.exe\",0").as_deref(),
            Some("C:\\Foo\\foo.exe")
        );
        assert_eq!(
            extract_executable_path("C:\\Foo\\foo.exe").as_deref(),
            Some("C:\\Foo\\foo.exe")
        );
        assert_eq!(extract_executable_path("  "), None);
    }

    #[test]
    fn filter_by_name_matches_substring() {
        let store = store_with_entry();
        let apps = list_installed(&store);

        assert_eq!(filter_by_name(&apps, "foo").len(), 1);
        assert_eq!(filter_by_name(&apps, "bar").len(), 0);
    }
}
