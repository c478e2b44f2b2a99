use crate::modules::apps::models::AppDescriptor;
use crate::modules::common::utils;
use crate::modules::store::{HierarchicalStore, PathProber, StoreKey};

use super::heuristics;
use super::matching;
use super::models::{Candidate, Evidence, EvidenceSet};
use super::roots::MirroredRoots;

/// 永不下钻的子键名（厂商/平台伞形键）
const KEY_SKIP_LIST: [&str; 6] = [
    "Microsoft",
    "Wow6432Node",
    "Windows",
    "Classes",
    "Clients",
    "RegisteredApplications",
];

/// 总是指向安装目录的值名
const INSTALL_DIR_VALUE_NAMES: [&str; 9] = [
    "InstallDir",
    "Install_Dir",
    "Install Directory",
    "InstDir",
    "ApplicationPath",
    "Install folder",
    "Last Stable Install Path",
    "TARGETDIR",
    "JavaHome",
];

/// 总是指向主可执行文件的值名
const EXE_PATH_VALUE_NAMES: [&str; 5] = ["exe64", "exe32", "Executable", "PathToExe", "ExePath"];

/// 可能指向可执行文件也可能指向目录的值名
const EXE_OR_DIR_VALUE_NAMES: [&str; 5] = ["Path", "Path64", "pth", "PlayerPath", "AppPath"];

/// 根下最大递归深度：0 和 1 两层参与分类，不再往下开键
const MAX_SCAN_DEPTH: u32 = 1;

/// 在全部镜像根下递归搜索疑似属于目标程序的子树
pub fn scan_software_roots(
    store: &dyn HierarchicalStore,
    prober: &dyn PathProber,
    roots: &MirroredRoots,
    app: &AppDescriptor,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for root in roots.iter() {
        let key = match store.open_key(root) {
            Some(key) => key,
            None => continue,
        };

        // 根自身不参与分类，从它的子键开始
        for child in key.subkey_names() {
            if is_skipped(&child) {
                continue;
            }
            let child_path = format!("{}\\{}", root, child);
            scan_key(store, prober, app, &child_path, 0, &mut candidates);
        }
    }

    candidates
}

fn scan_key(
    store: &dyn HierarchicalStore,
    prober: &dyn PathProber,
    app: &AppDescriptor,
    path: &str,
    depth: u32,
    candidates: &mut Vec<Candidate>,
) {
    // 打不开的节点静默跳过，继续兄弟节点
    let key = match store.open_key(path) {
        Some(key) => key,
        None => return,
    };

    let name = utils::leaf_name(path);
    let parent = utils::parent_path(path).unwrap_or("");

    let mut evidence: EvidenceSet = heuristics::name_evidence(app, name, parent, depth)
        .into_iter()
        .collect();

    if has_explicit_value_match(&*key, prober, app) {
        evidence.insert(Evidence::ExplicitPathReferenceMatch);
    }

    if !evidence.is_empty() {
        candidates.push(
            Candidate::store_key(parent, name, &app.display_name).with_evidence(evidence),
        );
    }

    if depth >= MAX_SCAN_DEPTH {
        return;
    }

    for child in key.subkey_names() {
        if is_skipped(&child) {
            continue;
        }
        let child_path = format!("{}\\{}", path, child);
        scan_key(store, prober, app, &child_path, depth + 1, candidates);
    }
}

/// 扫描节点下的全部值，第一个命中即停止
fn has_explicit_value_match(
    key: &dyn StoreKey,
    prober: &dyn PathProber,
    app: &AppDescriptor,
) -> bool {
    let install = app.install_location.as_deref().unwrap_or("");

    for value_name in key.value_names() {
        let hit = if name_in_set(&value_name, &INSTALL_DIR_VALUE_NAMES) {
            key.read_string(&value_name)
                .map(|value| matching::paths_match(install, &value))
                .unwrap_or(false)
        } else if name_in_set(&value_name, &EXE_PATH_VALUE_NAMES) {
            key.read_string(&value_name)
                .map(|value| matching::paths_match_exe(install, &value))
                .unwrap_or(false)
        } else if name_in_set(&value_name, &EXE_OR_DIR_VALUE_NAMES) {
            key.read_string(&value_name)
                .map(|value| matching::paths_match_ambiguous(install, &value, prober))
                .unwrap_or(false)
        } else {
            // 名字不在任何集合里时，退回到默认值的目录匹配
            key.read_default()
                .map(|value| matching::paths_match(install, &value))
                .unwrap_or(false)
        };

        if hit {
            return true;
        }
    }

    false
}

fn name_in_set(name: &str, set: &[&str]) -> bool {
    set.iter().any(|entry| entry.eq_ignore_ascii_case(name))
}

fn is_skipped(child_name: &str) -> bool {
    KEY_SKIP_LIST
        .iter()
        .any(|entry| entry.eq_ignore_ascii_case(child_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::detector::models::Confidence;
    use crate::modules::store::memory::{MemoryProber, MemoryStore};

    const LM: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE";

    fn app() -> AppDescriptor {
        AppDescriptor::new("Foo App".to_string())
            .with_install_location("C:\\Program Files\\Foo".to_string())
    }

    fn single_root() -> MirroredRoots {
        MirroredRoots::new(vec![LM.to_string()])
    }

    fn paths(candidates: &[Candidate]) -> Vec<String> {
        candidates.iter().map(|c| c.full_path()).collect()
    }

    #[test]
    fn install_dir_value_marks_explicit_reference() {
        let mut store = MemoryStore::new();
        store.set_string(
            &format!("{}\\Vendor\\Tool12", LM),
            "InstallDir",
            "C:\\Program Files\\Foo\\data",
        );

        let found = scan_software_roots(&store, &MemoryProber::new(), &single_root(), &app());

        assert_eq!(paths(&found), vec![format!("{}\\Vendor\\Tool12", LM)]);
        assert!(found[0]
            .evidence
            .contains(Evidence::ExplicitPathReferenceMatch));
        assert_eq!(found[0].confidence(), Confidence::High);
    }

    #[test]
    fn name_match_alone_produces_candidate() {
        let mut store = MemoryStore::new();
        store.add_key(&format!("{}\\Foo App", LM));

        let found = scan_software_roots(&store, &MemoryProber::new(), &single_root(), &app());

        assert_eq!(paths(&found), vec![format!("{}\\Foo App", LM)]);
        assert!(found[0].evidence.contains(Evidence::NameExactMatch));
    }

    #[test]
    fn nodes_below_depth_limit_are_never_visited() {
        let mut store = MemoryStore::new();
        // 深度 2 的键名与程序名完全一致，但不应被打开
        store.add_key(&format!("{}\\Vendor\\Nested\\Foo App", LM));

        let found = scan_software_roots(&store, &MemoryProber::new(), &single_root(), &app());

        assert!(found.is_empty());
    }

    #[test]
    fn skip_list_children_are_not_descended() {
        let mut store = MemoryStore::new();
        store.add_key(&format!("{}\\Microsoft\\Foo App", LM));
        store.add_key(&format!("{}\\Vendor\\Classes", LM));
        store.set_string(
            &format!("{}\\Vendor\\Classes", LM),
            "InstallDir",
            "C:\\Program Files\\Foo",
        );

        let found = scan_software_roots(&store, &MemoryProber::new(), &single_root(), &app());

        assert!(found.is_empty());
    }

    #[test]
    fn unknown_value_names_fall_back_to_default_value() {
        let mut store = MemoryStore::new();
        let key = format!("{}\\Vendor\\Helper99", LM);
        store.set_string(&key, "SomeOpaqueName", "whatever");
        store.set_string(&key, "", "C:\\Program Files\\Foo");

        let found = scan_software_roots(&store, &MemoryProber::new(), &single_root(), &app());

        assert_eq!(paths(&found), vec![key]);
        assert!(found[0]
            .evidence
            .contains(Evidence::ExplicitPathReferenceMatch));
    }

    #[test]
    fn first_value_hit_adds_single_tag() {
        let mut store = MemoryStore::new();
        let key = format!("{}\\Vendor\\Tool12", LM);
        store.set_string(&key, "InstallDir", "C:\\Program Files\\Foo");
        store.set_string(&key, "Install_Dir", "C:\\Program Files\\Foo\\deep");

        let found = scan_software_roots(&store, &MemoryProber::new(), &single_root(), &app());

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].evidence.len(), 1);
    }

    #[test]
    fn exe_value_matches_via_parent_directory() {
        let mut store = MemoryStore::new();
        let key = format!("{}\\Vendor\\Launcher7", LM);
        store.set_string(&key, "ExePath", "C:\\Program Files\\Foo\\bin\\foo.exe");

        let found = scan_software_roots(&store, &MemoryProber::new(), &single_root(), &app());

        assert_eq!(paths(&found), vec![key]);
    }

    #[test]
    fn missing_install_location_still_matches_by_name() {
        let mut store = MemoryStore::new();
        store.add_key(&format!("{}\\Foo App", LM));
        store.set_string(&format!("{}\\Vendor\\Tool12", LM), "InstallDir", "C:\\Anything");

        let no_location = AppDescriptor::new("Foo App".to_string());
        let found = scan_software_roots(&store, &MemoryProber::new(), &single_root(), &no_location);

        assert_eq!(paths(&found), vec![format!("{}\\Foo App", LM)]);
    }
}
