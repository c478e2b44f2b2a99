use crate::modules::apps::models::AppDescriptor;
use crate::modules::common::utils;
use crate::modules::store::{HierarchicalStore, PathProber};

use super::matching;
use super::models::{Candidate, Evidence, EvidenceSet};

/// COM 类注册的四个固定根
pub const CLSID_KEYS: [&str; 4] = [
    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Classes\\CLSID",
    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Classes\\WOW6432Node\\CLSID",
    "HKEY_CURRENT_USER\\SOFTWARE\\Classes\\CLSID",
    "HKEY_CURRENT_USER\\SOFTWARE\\Classes\\WOW6432Node\\CLSID",
];

/// 扫描进程内服务器路径落在安装目录下的 COM 类注册
pub fn scan_clsid(
    store: &dyn HierarchicalStore,
    prober: &dyn PathProber,
    app: &AppDescriptor,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    let install = app.install_location.as_deref().unwrap_or("");
    let windows_dir = windows_directory(prober);

    for root in CLSID_KEYS {
        let key = match store.open_key(root) {
            Some(key) => key,
            None => continue,
        };

        for raw_name in key.subkey_names() {
            // 枚举出的子键名偶尔带尾部引号，用前先去掉
            let subkey_name = raw_name.trim_end_matches('"');

            let server_path = format!("{}\\{}\\InprocServer32", root, subkey_name);
            let server = match store.open_key(&server_path) {
                Some(server) => server,
                None => continue,
            };

            let target = match server.read_default() {
                Some(target) if !target.is_empty() => target,
                _ => continue,
            };

            let expanded = prober.expand_env(&target);
            let expanded = expanded.trim_matches('"');

            if !utils::is_path_rooted(expanded) {
                continue;
            }
            // 系统目录里的服务器不算残留
            if matching::paths_match(&windows_dir, expanded) {
                continue;
            }

            if matching::paths_match_exe(install, expanded) {
                candidates.push(
                    Candidate::store_key(root, subkey_name, &app.display_name)
                        .with_evidence(EvidenceSet::single(Evidence::ExplicitPathReferenceMatch)),
                );
            }
        }
    }

    candidates
}

fn windows_directory(prober: &dyn PathProber) -> String {
    let dir = prober.expand_env("%WINDIR%");
    if dir.is_empty() || dir.contains('%') {
        "C:\\Windows".to_string()
    } else {
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::store::memory::{MemoryProber, MemoryStore};

    const GUID: &str = "{A1B2C3D4-0000-0000-0000-000000000001}";

    fn app() -> AppDescriptor {
        AppDescriptor::new("Foo App".to_string())
            .with_install_location("C:\\Program Files\\Foo".to_string())
    }

    fn prober() -> MemoryProber {
        let mut prober = MemoryProber::new();
        prober.set_var("WINDIR", "C:\\Windows");
        prober
    }

    fn add_class(store: &mut MemoryStore, root: &str, guid: &str, server: &str) {
        store.set_string(&format!("{}\\{}\\InprocServer32", root, guid), "", server);
    }

    #[test]
    fn server_inside_install_dir_is_flagged() {
        let mut store = MemoryStore::new();
        add_class(
            &mut store,
            CLSID_KEYS[0],
            GUID,
            "C:\\Program Files\\Foo\\foo_com.dll",
        );

        let found = scan_clsid(&store, &prober(), &app());

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].parent_path, CLSID_KEYS[0]);
        assert_eq!(found[0].name, GUID);
        assert!(found[0]
            .evidence
            .contains(Evidence::ExplicitPathReferenceMatch));
    }

    #[test]
    fn trailing_quotes_in_subkey_names_are_stripped() {
        let mut store = MemoryStore::new();
        let quoted = format!("{}\"", GUID);
        add_class(
            &mut store,
            CLSID_KEYS[2],
            &quoted,
            "C:\\Program Files\\Foo\\foo_com.dll",
        );
        // 去引号后的路径也要存在，否则打不开
        add_class(
            &mut store,
            CLSID_KEYS[2],
            GUID,
            "C:\\Program Files\\Foo\\foo_com.dll",
        );

        let found = scan_clsid(&store, &prober(), &app());
        assert!(found.iter().all(|c| c.name == GUID));
    }

    #[test]
    fn system_and_relative_servers_are_ignored() {
        let mut store = MemoryStore::new();
        add_class(&mut store, CLSID_KEYS[0], GUID, "C:\\Windows\\System32\\x.dll");
        add_class(
            &mut store,
            CLSID_KEYS[1],
            GUID,
            "foo_unrooted.dll",
        );

        assert!(scan_clsid(&store, &prober(), &app()).is_empty());
    }

    #[test]
    fn env_vars_in_server_path_are_expanded() {
        let mut store = MemoryStore::new();
        add_class(
            &mut store,
            CLSID_KEYS[0],
            GUID,
            "\"%ProgramFiles%\\Foo\\foo_com.dll\"",
        );

        let mut prober = prober();
        prober.set_var("ProgramFiles", "C:\\Program Files");

        let found = scan_clsid(&store, &prober, &app());
        assert_eq!(found.len(), 1);
    }
}
