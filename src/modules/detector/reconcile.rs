use crate::modules::common::utils;
use crate::modules::store::HierarchicalStore;

use super::models::{Candidate, CandidateKind};
use super::roots::MirroredRoots;

/// 跨镜像根交叉比对候选键
///
/// `first_source` 之后的候选作为比对源；查重则针对整个列表。
/// 对每个源候选：确定它落在哪个镜像根下，再对其余每个根重建
/// 同后缀路径。列表里已有该路径的候选就并入证据；没有且存储里
/// 确实存在该键时，合成一个继承源证据的新候选。存储里不存在的
/// 路径绝不凭空生成候选。合成的候选立即参与后续查重，同一路径
/// 不会出现两份。
pub fn reconcile(
    store: &dyn HierarchicalStore,
    roots: &MirroredRoots,
    candidates: &mut Vec<Candidate>,
    first_source: usize,
) {
    let snapshot_len = candidates.len();

    for source_index in first_source..snapshot_len {
        if candidates[source_index].kind != CandidateKind::StoreKey {
            continue;
        }

        let source_path = candidates[source_index].full_path();
        let (source_root, suffix) = match roots.split(&source_path) {
            Some(split) => split,
            None => continue,
        };

        for root_index in 0..roots.len() {
            if root_index == source_root {
                continue;
            }

            let mirrored_path = roots.rebuild(root_index, &suffix);

            let existing = candidates.iter().position(|candidate| {
                candidate.kind == CandidateKind::StoreKey
                    && utils::paths_equal(&candidate.full_path(), &mirrored_path)
            });

            match existing {
                Some(target_index) => {
                    if target_index != source_index {
                        let source_evidence = candidates[source_index].evidence.clone();
                        candidates[target_index].evidence.union(&source_evidence);
                    }
                }
                None => {
                    // 只有键确实存在才合成候选
                    if store.key_exists(&mirrored_path) {
                        let parent = utils::parent_path(&mirrored_path).unwrap_or("");
                        let name = utils::leaf_name(&mirrored_path);
                        let app_name = candidates[source_index].app_name.clone();
                        let evidence = candidates[source_index].evidence.clone();

                        candidates.push(
                            Candidate::store_key(parent, name, &app_name)
                                .with_evidence(evidence),
                        );
                    }
                }
            }
        }
    }
}
