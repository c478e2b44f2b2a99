use crate::modules::common::utils;
use crate::modules::store::PathProber;

/// 目录匹配：规范化后 candidate 以 base 为前缀即命中
///
/// 两侧都去除空白和尾部分隔符；任一侧为空一律不匹配。
pub fn paths_match(base_path: &str, candidate: &str) -> bool {
    let base = utils::trim_path(base_path);
    if base.is_empty() {
        return false;
    }

    let candidate = utils::trim_path(candidate);
    if candidate.is_empty() {
        return false;
    }

    candidate.to_lowercase().starts_with(&base.to_lowercase())
}

/// 可执行文件匹配：先取 candidate 的父目录再做目录匹配
///
/// 安装目录直接子文件和深层文件都会命中。
pub fn paths_match_exe(base_path: &str, candidate: &str) -> bool {
    match utils::parent_path(candidate) {
        Some(dir) => paths_match(base_path, dir),
        None => false,
    }
}

/// 值可能是目录也可能是可执行文件路径时，先探测再决定规则
///
/// 展开环境变量后指向现有文件按可执行处理，否则按目录处理。
/// 探测失败视为不匹配，绝不中断扫描。
pub fn paths_match_ambiguous(base_path: &str, candidate: &str, prober: &dyn PathProber) -> bool {
    let expanded = prober.expand_env(candidate);
    if prober.is_file(&expanded) {
        paths_match_exe(base_path, candidate)
    } else {
        paths_match(base_path, candidate)
    }
}
