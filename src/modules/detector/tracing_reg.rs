use crate::modules::apps::models::AppDescriptor;
use crate::modules::store::HierarchicalStore;

use super::heuristics;
use super::models::{Candidate, EvidenceSet};

/// 诊断跟踪注册所在的固定键
pub const TRACING_KEY: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Tracing";

/// 扫描诊断跟踪注册残留
///
/// 子键名形如 `<程序名>_RASAPI32`，取最后一个 `_` 之前的
/// 前缀做名称相似比较；没有分隔符的子键跳过。
pub fn scan_tracing(store: &dyn HierarchicalStore, app: &AppDescriptor) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    let key = match store.open_key(TRACING_KEY) {
        Some(key) => key,
        None => return candidates,
    };

    for subkey_name in key.subkey_names() {
        let separator = match subkey_name.rfind('_') {
            Some(i) if i > 0 => i,
            _ => continue,
        };

        let prefix = &subkey_name[..separator];
        let subkey_path = format!("{}\\{}", TRACING_KEY, subkey_name);

        let evidence: EvidenceSet = heuristics::name_evidence(app, prefix, &subkey_path, 0)
            .into_iter()
            .collect();

        if !evidence.is_empty() {
            candidates.push(
                Candidate::store_key(TRACING_KEY, &subkey_name, &app.display_name)
                    .with_evidence(evidence),
            );
        }
    }

    candidates
}
