use regex::Regex;

use crate::modules::apps::models::AppDescriptor;
use crate::modules::store::{HierarchicalStore, PathProber};

use super::matching;
use super::models::{Candidate, Evidence, EvidenceSet};

/// 防火墙规则所在的固定键
pub const FIREWALL_RULES_KEY: &str = "HKEY_LOCAL_MACHINE\\SYSTEM\\CurrentControlSet\\Services\\SharedAccess\\Parameters\\FirewallPolicy\\FirewallRules";

/// 扫描指向安装目录内程序的防火墙规则
///
/// 规则值是 `|` 分隔的字段串，应用路径在 `App=` 字段里。
/// 没有标记或缺终止符的规则按格式损坏跳过。
pub fn scan_firewall_rules(
    store: &dyn HierarchicalStore,
    prober: &dyn PathProber,
    app: &AppDescriptor,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    let install = match app.install_location.as_deref() {
        Some(location) if !location.trim().is_empty() => location,
        _ => return candidates,
    };

    let key = match store.open_key(FIREWALL_RULES_KEY) {
        Some(key) => key,
        None => return candidates,
    };

    let marker = match Regex::new(r"(?i)\|App=([^|]+)\|") {
        Ok(marker) => marker,
        Err(_) => return candidates,
    };

    for value_name in key.value_names() {
        let value = match key.read_string(&value_name) {
            Some(value) => value,
            None => continue,
        };

        let rule_path = match marker.captures(&value) {
            Some(caps) => prober.expand_env(&caps[1]),
            None => continue,
        };

        if matching::paths_match(install, &rule_path) {
            candidates.push(
                Candidate::store_value(FIREWALL_RULES_KEY, &value_name, &app.display_name)
                    .with_evidence(EvidenceSet::single(Evidence::ExplicitPathReferenceMatch)),
            );
        }
    }

    candidates
}
