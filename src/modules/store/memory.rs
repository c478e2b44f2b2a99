use std::collections::BTreeMap;

use super::{HierarchicalStore, PathProber, StoreKey};

/// 内存实现的层级键值存储
///
/// 测试和非 Windows 构建使用；路径比较不区分大小写。
#[derive(Debug, Default)]
pub struct MemoryStore {
    // 键：小写完整路径 → 节点
    keys: BTreeMap<String, MemoryKey>,
}

#[derive(Debug, Default)]
struct MemoryKey {
    // 原始大小写的末段名，枚举子键时返回
    leaf: String,
    values: BTreeMap<String, MemoryValue>,
}

#[derive(Debug, Clone)]
enum MemoryValue {
    Sz(String),
    Dword(u32),
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建键（含所有祖先键）
    pub fn add_key(&mut self, path: &str) {
        let mut partial = String::new();
        for segment in path.split('\\').filter(|s| !s.is_empty()) {
            if !partial.is_empty() {
                partial.push('\\');
            }
            partial.push_str(segment);
            self.keys
                .entry(partial.to_lowercase())
                .or_insert_with(|| MemoryKey {
                    leaf: segment.to_string(),
                    values: BTreeMap::new(),
                });
        }
    }

    /// 设置字符串值；空名称表示默认值
    pub fn set_string(&mut self, key_path: &str, value_name: &str, value: &str) {
        self.add_key(key_path);
        if let Some(key) = self.keys.get_mut(&key_path.to_lowercase()) {
            key.values
                .insert(value_name.to_string(), MemoryValue::Sz(value.to_string()));
        }
    }

    pub fn set_dword(&mut self, key_path: &str, value_name: &str, value: u32) {
        self.add_key(key_path);
        if let Some(key) = self.keys.get_mut(&key_path.to_lowercase()) {
            key.values
                .insert(value_name.to_string(), MemoryValue::Dword(value));
        }
    }
}

impl HierarchicalStore for MemoryStore {
    fn open_key<'a>(&'a self, path: &str) -> Option<Box<dyn StoreKey + 'a>> {
        let normalized = path.trim().trim_end_matches('\\').to_lowercase();
        if self.keys.contains_key(&normalized) {
            Some(Box::new(MemoryKeyHandle {
                store: self,
                path: normalized,
            }))
        } else {
            None
        }
    }
}

struct MemoryKeyHandle<'a> {
    store: &'a MemoryStore,
    path: String,
}

impl StoreKey for MemoryKeyHandle<'_> {
    fn subkey_names(&self) -> Vec<String> {
        let prefix = format!("{}\\", self.path);
        self.store
            .keys
            .range(prefix.clone()..)
            .take_while(|(path, _)| path.starts_with(&prefix))
            .filter(|(path, _)| !path[prefix.len()..].contains('\\'))
            .map(|(_, key)| key.leaf.clone())
            .collect()
    }

    fn value_names(&self) -> Vec<String> {
        self.store
            .keys
            .get(&self.path)
            .map(|key| key.values.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read_string(&self, name: &str) -> Option<String> {
        match self.store.keys.get(&self.path)?.values.get(name)? {
            MemoryValue::Sz(value) => Some(value.clone()),
            MemoryValue::Dword(_) => None,
        }
    }

    fn read_u32(&self, name: &str) -> Option<u32> {
        match self.store.keys.get(&self.path)?.values.get(name)? {
            MemoryValue::Dword(value) => Some(*value),
            MemoryValue::Sz(_) => None,
        }
    }
}

/// 内存实现的路径探测器：预置环境变量和文件列表
#[derive(Debug, Default)]
pub struct MemoryProber {
    vars: BTreeMap<String, String>,
    // 小写路径集合
    files: Vec<String>,
}

impl MemoryProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_var(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    pub fn add_file(&mut self, path: &str) {
        self.files.push(path.to_lowercase());
    }
}

impl PathProber for MemoryProber {
    fn expand_env(&self, value: &str) -> String {
        super::expand_env_vars(value, |name| self.vars.get(name).cloned())
    }

    fn is_file(&self, path: &str) -> bool {
        self.files.iter().any(|f| f == &path.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_key_creates_ancestors() {
        let mut store = MemoryStore::new();
        store.add_key("HKEY_LOCAL_MACHINE\\SOFTWARE\\Foo\\Bar");

        assert!(store.key_exists("HKEY_LOCAL_MACHINE"));
        assert!(store.key_exists("HKEY_LOCAL_MACHINE\\SOFTWARE"));
        assert!(store.key_exists("HKEY_LOCAL_MACHINE\\SOFTWARE\\Foo"));
        assert!(store.key_exists("hkey_local_machine\\software\\foo\\bar"));
    }

    #[test]
    fn subkey_names_lists_direct_children_only() {
        let mut store = MemoryStore::new();
        store.add_key("ROOT\\A\\Deep");
        store.add_key("ROOT\\B");

        let key = store.open_key("ROOT").unwrap();
        assert_eq!(key.subkey_names(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn values_are_typed() {
        let mut store = MemoryStore::new();
        store.set_string("ROOT\\App", "InstallDir", "C:\\Foo");
        store.set_dword("ROOT\\App", "EstimatedSize", 2048);

        let key = store.open_key("ROOT\\App").unwrap();
        assert_eq!(key.read_string("InstallDir").as_deref(), Some("C:\\Foo"));
        assert_eq!(key.read_string("EstimatedSize"), None);
        assert_eq!(key.read_u32("EstimatedSize"), Some(2048));
        assert_eq!(key.read_default(), None);
    }

    #[test]
    fn open_key_is_case_insensitive_and_trims_trailing_separator() {
        let mut store = MemoryStore::new();
        store.add_key("ROOT\\App");

        assert!(store.open_key("root\\APP\\").is_some());
        assert!(store.open_key("root\\missing").is_none());
    }
}
