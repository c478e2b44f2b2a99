use winreg::enums::*;
use winreg::{RegKey, HKEY};

use super::{HierarchicalStore, StoreKey};

/// 真实 Windows 注册表的只读访问
pub struct WindowsRegistry;

impl HierarchicalStore for WindowsRegistry {
    fn open_key<'a>(&'a self, path: &str) -> Option<Box<dyn StoreKey + 'a>> {
        let (hive, subpath) = split_hive(path)?;
        match RegKey::predef(hive).open_subkey_with_flags(subpath, KEY_READ) {
            Ok(key) => Some(Box::new(WindowsKey(key))),
            Err(_) => None,
        }
    }
}

struct WindowsKey(RegKey);

impl StoreKey for WindowsKey {
    fn subkey_names(&self) -> Vec<String> {
        self.0.enum_keys().filter_map(|k| k.ok()).collect()
    }

    fn value_names(&self) -> Vec<String> {
        self.0
            .enum_values()
            .filter_map(|v| v.ok())
            .map(|(name, _)| name)
            .collect()
    }

    fn read_string(&self, name: &str) -> Option<String> {
        self.0.get_value(name).ok()
    }

    fn read_u32(&self, name: &str) -> Option<u32> {
        self.0.get_value::<u32, _>(name).ok()
    }
}

/// 拆出根 HIVE 和剩余子路径，支持长短两种前缀写法
fn split_hive(path: &str) -> Option<(HKEY, &str)> {
    let path = path.trim();

    let prefixes: [(&str, HKEY); 10] = [
        ("HKEY_LOCAL_MACHINE", HKEY_LOCAL_MACHINE),
        ("HKLM", HKEY_LOCAL_MACHINE),
        ("HKEY_CURRENT_USER", HKEY_CURRENT_USER),
        ("HKCU", HKEY_CURRENT_USER),
        ("HKEY_CLASSES_ROOT", HKEY_CLASSES_ROOT),
        ("HKCR", HKEY_CLASSES_ROOT),
        ("HKEY_USERS", HKEY_USERS),
        ("HKU", HKEY_USERS),
        ("HKEY_CURRENT_CONFIG", HKEY_CURRENT_CONFIG),
        ("HKCC", HKEY_CURRENT_CONFIG),
    ];

    for (prefix, hive) in prefixes {
        let matches = path
            .get(..prefix.len())
            .map(|head| head.eq_ignore_ascii_case(prefix))
            .unwrap_or(false);
        if matches {
            let rest = &path[prefix.len()..];
            if rest.is_empty() {
                return Some((hive, ""));
            }
            if let Some(sub) = rest.strip_prefix('\\') {
                return Some((hive, sub));
            }
        }
    }

    None
}
