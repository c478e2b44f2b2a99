pub mod memory;
#[cfg(windows)]
pub mod windows;

use regex::Regex;

/// 只读层级键值存储的访问边界
///
/// 打开失败（不存在、无权限、路径非法）一律返回 None，
/// 扫描逻辑据此跳过节点继续，不走异常控制流。
pub trait HierarchicalStore {
    /// 按完整路径打开键，如 `HKEY_LOCAL_MACHINE\SOFTWARE\Foo`
    fn open_key<'a>(&'a self, path: &str) -> Option<Box<dyn StoreKey + 'a>>;

    /// 探测键是否存在
    fn key_exists(&self, path: &str) -> bool {
        self.open_key(path).is_some()
    }
}

/// 已打开的键句柄
pub trait StoreKey {
    fn subkey_names(&self) -> Vec<String>;

    fn value_names(&self) -> Vec<String>;

    /// 按名称读取字符串值，类型不符或读取失败返回 None
    fn read_string(&self, name: &str) -> Option<String>;

    fn read_u32(&self, name: &str) -> Option<u32>;

    /// 读取默认值（未命名值）
    fn read_default(&self) -> Option<String> {
        self.read_string("")
    }
}

/// 文件系统探测边界：环境变量展开与文件存在性检查
pub trait PathProber {
    /// 展开 `%VAR%` 形式的环境变量，未知变量原样保留
    fn expand_env(&self, value: &str) -> String;

    /// 路径是否指向现有文件（而非目录）
    fn is_file(&self, path: &str) -> bool;
}

/// 基于进程环境和真实文件系统的探测器
pub struct SystemProber;

impl PathProber for SystemProber {
    fn expand_env(&self, value: &str) -> String {
        expand_env_vars(value, |name| std::env::var(name).ok())
    }

    fn is_file(&self, path: &str) -> bool {
        std::path::Path::new(path).is_file()
    }
}

/// 用给定的查找函数展开 `%VAR%` 占位符
pub fn expand_env_vars<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let re = match Regex::new(r"%([^%]+)%") {
        Ok(re) => re,
        Err(_) => return value.to_string(),
    };

    re.replace_all(value, |caps: &regex::Captures| {
        lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}
