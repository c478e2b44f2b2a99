use crate::modules::apps::models::AppDescriptor;
use crate::modules::common::utils;

use super::models::Evidence;

/// 名称长度低于该值时不做包含/模糊比较，避免短词到处命中
const NAME_MATCH_MIN_LEN: usize = 4;

/// 模糊比较要求的最短程序名
const FUZZY_MIN_LEN: usize = 8;

/// 名称相似度启发式
///
/// 比较键的末段名与程序显示名、安装目录末段，
/// 并检查父路径是否提及程序名。depth 越深证据越弱：
/// 深层的完全同名降级为部分相似。
pub fn name_evidence(
    app: &AppDescriptor,
    short_name: &str,
    parent_path: &str,
    depth: u32,
) -> Vec<Evidence> {
    let mut evidence = Vec::new();

    let name = short_name.trim().to_lowercase();
    if name.is_empty() {
        return evidence;
    }

    let display = app.display_name.trim().to_lowercase();
    let install_leaf = app
        .install_location
        .as_deref()
        .map(|loc| utils::leaf_name(loc).trim().to_lowercase())
        .filter(|leaf| !leaf.is_empty());

    let exact = (!display.is_empty() && name == display)
        || install_leaf.as_deref() == Some(name.as_str());

    if exact {
        if depth == 0 {
            evidence.push(Evidence::NameExactMatch);
        } else {
            evidence.push(Evidence::NameSubstringMatch);
        }
    } else if similar(&name, &display) {
        evidence.push(Evidence::NameSubstringMatch);
    }

    // 父路径中出现程序名也算一条弱证据
    if display.len() >= NAME_MATCH_MIN_LEN && parent_path.to_lowercase().contains(&display) {
        evidence.push(Evidence::PathPrefixMatch);
    }

    evidence
}

/// 部分相似：互相包含，或长名称下的模糊命中
fn similar(name: &str, display: &str) -> bool {
    if display.len() >= NAME_MATCH_MIN_LEN && name.contains(display) {
        return true;
    }
    if name.len() >= NAME_MATCH_MIN_LEN && display.contains(name) {
        return true;
    }
    display.len() >= FUZZY_MIN_LEN && utils::fuzzy_match(name, display)
}
