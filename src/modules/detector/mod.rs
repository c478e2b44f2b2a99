pub mod clsid;
pub mod firewall;
pub mod heuristics;
pub mod matching;
pub mod models;
pub mod reconcile;
pub mod roots;
pub mod software;
pub mod tracing_reg;

use crate::modules::apps::models::AppDescriptor;
use crate::modules::common::error::SweepError;
use crate::modules::common::utils;
use crate::modules::store::{HierarchicalStore, PathProber};
use models::{Candidate, Evidence, EvidenceSet};
use roots::MirroredRoots;

/// 残留检测引擎
///
/// 只读、单次调用内同步执行；调用方可以对互不相关的程序
/// 并行发起多次扫描。引擎本身绝不删除任何东西。
pub struct JunkDetector<'a> {
    store: &'a dyn HierarchicalStore,
    prober: &'a dyn PathProber,
    roots: MirroredRoots,
}

impl<'a> JunkDetector<'a> {
    pub fn new(store: &'a dyn HierarchicalStore, prober: &'a dyn PathProber) -> Self {
        Self::with_roots(store, prober, MirroredRoots::windows_defaults())
    }

    /// 自定义镜像根列表（测试和非标准布局用）
    pub fn with_roots(
        store: &'a dyn HierarchicalStore,
        prober: &'a dyn PathProber,
        roots: MirroredRoots,
    ) -> Self {
        Self {
            store,
            prober,
            roots,
        }
    }

    /// 为一个程序找出全部疑似残留，按发现顺序返回
    ///
    /// `_other_apps` 是为后续同级程序交叉抑制预留的扩展点，
    /// 当前的匹配逻辑不使用它。
    pub fn find_junk(
        &self,
        app: &AppDescriptor,
        _other_apps: &[AppDescriptor],
    ) -> Result<Vec<Candidate>, SweepError> {
        // 描述符格式错误属于调用方缺陷，立即报错而不是悄悄返回空
        if app.display_name.trim().is_empty() {
            return Err(SweepError::InvalidDescriptor(
                "程序描述缺少显示名".to_string(),
            ));
        }

        tracing::debug!("开始扫描 {} 的残留", app.display_name);

        let mut candidates = Vec::new();

        if let Some(own_entry) = self.scan_self_entry(app) {
            candidates.push(own_entry);
        }

        let first_software = candidates.len();
        candidates.extend(software::scan_software_roots(
            self.store,
            self.prober,
            &self.roots,
            app,
        ));

        reconcile::reconcile(self.store, &self.roots, &mut candidates, first_software);

        candidates.extend(firewall::scan_firewall_rules(self.store, self.prober, app));
        candidates.extend(tracing_reg::scan_tracing(self.store, app));
        candidates.extend(clsid::scan_clsid(self.store, self.prober, app));

        tracing::debug!(
            "{} 的残留扫描完成，共 {} 个候选",
            app.display_name,
            candidates.len()
        );

        Ok(candidates)
    }

    /// 程序自身的卸载注册键还在就报一个候选
    fn scan_self_entry(&self, app: &AppDescriptor) -> Option<Candidate> {
        let key_path = app.uninstall_key_path.as_deref()?.trim();
        if key_path.is_empty() {
            return None;
        }

        if !self.store.key_exists(key_path) {
            return None;
        }

        let parent = utils::parent_path(key_path)?;
        let name = utils::leaf_name(key_path);

        Some(
            Candidate::store_key(parent, name, &app.display_name)
                .with_evidence(EvidenceSet::single(Evidence::IsOwnUninstallEntry)),
        )
    }
}
