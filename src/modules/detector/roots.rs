/// 镜像软件根的有序描述
///
/// 同一棵逻辑子树会在 {机器域, 用户域} × {原生, Wow64 兼容层}
/// 下最多出现四份；列表顺序固定为最具体的前缀在前，
/// 否则非 Wow 前缀会抢先匹配 Wow 路径。
/// 根列表在构造时确定，之后只读。
#[derive(Debug, Clone)]
pub struct MirroredRoots {
    roots: Vec<String>,
}

impl MirroredRoots {
    /// Windows 默认的四个软件根
    pub fn windows_defaults() -> Self {
        Self::new(vec![
            "HKEY_CURRENT_USER\\SOFTWARE\\Wow6432Node".to_string(),
            "HKEY_LOCAL_MACHINE\\SOFTWARE\\Wow6432Node".to_string(),
            "HKEY_CURRENT_USER\\SOFTWARE".to_string(),
            "HKEY_LOCAL_MACHINE\\SOFTWARE".to_string(),
        ])
    }

    /// 自定义根列表；调用方负责把更具体的前缀排在前面
    pub fn new(roots: Vec<String>) -> Self {
        Self { roots }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.roots.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// 判断路径落在哪个根下，返回根下标和相对后缀
    ///
    /// 前缀比较不区分大小写，且要求后面紧跟分隔符，
    /// 根自身不算自己的后缀。
    pub fn split(&self, path: &str) -> Option<(usize, String)> {
        let path = path.trim();

        for (index, root) in self.roots.iter().enumerate() {
            let head = match path.get(..root.len()) {
                Some(head) => head,
                None => continue,
            };
            if !head.eq_ignore_ascii_case(root) {
                continue;
            }

            let rest = &path[root.len()..];
            if let Some(suffix) = rest.strip_prefix('\\') {
                if !suffix.is_empty() {
                    return Some((index, suffix.to_string()));
                }
            }
        }

        None
    }

    /// 用另一个根重建同一相对后缀的路径
    pub fn rebuild(&self, root_index: usize, suffix: &str) -> String {
        format!("{}\\{}", self.roots[root_index], suffix)
    }
}
