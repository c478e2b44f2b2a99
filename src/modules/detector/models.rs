use serde::{Deserialize, Serialize};

/// 候选残留被怀疑的原因标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Evidence {
    /// 键名与程序名完全一致
    NameExactMatch,
    /// 键名与程序名部分相似
    NameSubstringMatch,
    /// 父路径中出现程序名
    PathPrefixMatch,
    /// 某个值显式指向安装目录内部
    ExplicitPathReferenceMatch,
    /// 程序自身的卸载注册键
    IsOwnUninstallEntry,
}

/// 证据权重等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvidenceWeight {
    Informational,
    Strong,
}

impl Evidence {
    pub fn weight(self) -> EvidenceWeight {
        match self {
            Evidence::NameExactMatch
            | Evidence::ExplicitPathReferenceMatch
            | Evidence::IsOwnUninstallEntry => EvidenceWeight::Strong,
            Evidence::NameSubstringMatch | Evidence::PathPrefixMatch => {
                EvidenceWeight::Informational
            }
        }
    }
}

impl std::fmt::Display for Evidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Evidence::NameExactMatch => write!(f, "NameExactMatch"),
            Evidence::NameSubstringMatch => write!(f, "NameSubstringMatch"),
            Evidence::PathPrefixMatch => write!(f, "PathPrefixMatch"),
            Evidence::ExplicitPathReferenceMatch => write!(f, "ExplicitPathReferenceMatch"),
            Evidence::IsOwnUninstallEntry => write!(f, "IsOwnUninstallEntry"),
        }
    }
}

/// 匹配置信度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// 证据集合：无重复、保留发现顺序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceSet {
    tags: Vec<Evidence>,
}

impl EvidenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(tag: Evidence) -> Self {
        Self { tags: vec![tag] }
    }

    /// 加入一个标签，已存在则忽略
    pub fn insert(&mut self, tag: Evidence) -> bool {
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// 并入另一个集合的全部标签
    pub fn union(&mut self, other: &EvidenceSet) {
        for tag in &other.tags {
            self.insert(*tag);
        }
    }

    pub fn contains(&self, tag: Evidence) -> bool {
        self.tags.contains(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Evidence> + '_ {
        self.tags.iter().copied()
    }

    /// 由证据权重推导展示用置信度
    pub fn confidence(&self) -> Confidence {
        if self
            .tags
            .iter()
            .any(|tag| tag.weight() == EvidenceWeight::Strong)
        {
            Confidence::High
        } else if self.tags.len() >= 2 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

impl FromIterator<Evidence> for EvidenceSet {
    fn from_iter<T: IntoIterator<Item = Evidence>>(iter: T) -> Self {
        let mut set = EvidenceSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

/// 候选残留的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateKind {
    /// 注册表键
    StoreKey,
    /// 注册表值
    StoreValue,
    /// 文件或目录（由外部扫描器产出，本引擎不生成）
    FilesystemPath,
}

impl std::fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateKind::StoreKey => write!(f, "RegistryKey"),
            CandidateKind::StoreValue => write!(f, "RegistryValue"),
            CandidateKind::FilesystemPath => write!(f, "FilesystemPath"),
        }
    }
}

/// 一个疑似残留项及其累积证据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub kind: CandidateKind,
    pub parent_path: String,
    pub name: String,
    /// 所属程序显示名，仅用于展示
    pub app_name: String,
    pub evidence: EvidenceSet,
}

impl Candidate {
    fn new(kind: CandidateKind, parent_path: &str, name: &str, app_name: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            parent_path: parent_path.trim_end_matches('\\').to_string(),
            name: name.to_string(),
            app_name: app_name.to_string(),
            evidence: EvidenceSet::new(),
        }
    }

    pub fn store_key(parent_path: &str, name: &str, app_name: &str) -> Self {
        Self::new(CandidateKind::StoreKey, parent_path, name, app_name)
    }

    pub fn store_value(parent_path: &str, name: &str, app_name: &str) -> Self {
        Self::new(CandidateKind::StoreValue, parent_path, name, app_name)
    }

    pub fn with_evidence(mut self, evidence: EvidenceSet) -> Self {
        self.evidence = evidence;
        self
    }

    pub fn full_path(&self) -> String {
        format!("{}\\{}", self.parent_path, self.name)
    }

    pub fn confidence(&self) -> Confidence {
        self.evidence.confidence()
    }
}
