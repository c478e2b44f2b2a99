use anyhow::Result;
use clap::Parser;

use crate::modules::apps::{self, models::AppDescriptor};
use crate::modules::detector::models::{Candidate, CandidateKind, Confidence};
use crate::modules::detector::JunkDetector;
use crate::modules::store::SystemProber;

#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// 程序名称 (必需)
    pub program_name: String,

    /// 扫描所有名称匹配的程序，而不只是第一个
    #[arg(long)]
    pub all: bool,

    /// 输出 JSON 文件路径
    #[arg(short, long)]
    pub output: Option<String>,

    /// 详细输出
    #[arg(short, long)]
    pub verbose: bool,
}

pub async fn execute(cmd: ScanCommand) -> Result<()> {
    let store = super::system_store()?;

    let installed = apps::list_installed(store.as_ref());
    let mut matched = apps::filter_by_name(&installed, &cmd.program_name);

    if matched.is_empty() {
        println!("没有找到名称匹配 \"{}\" 的程序", cmd.program_name);
        return Ok(());
    }

    if !cmd.all {
        matched.truncate(1);
    }

    println!(
        "正在扫描 {} 个程序的残留...\n",
        matched.len()
    );

    // 扫描之间互不影响，按程序并行执行
    let mut handles = Vec::new();
    for app in matched {
        let store = store.clone();
        let peers = installed.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let prober = SystemProber;
            let detector = JunkDetector::new(store.as_ref(), &prober);
            detector.find_junk(&app, &peers).map(|found| (app, found))
        }));
    }

    let mut all_candidates: Vec<Candidate> = Vec::new();
    for handle in handles {
        match handle.await? {
            Ok((app, mut found)) => {
                // 展示时按置信度从高到低排列
                found.sort_by(|a, b| b.confidence().cmp(&a.confidence()));
                print_candidates(&app, &found, cmd.verbose);
                all_candidates.extend(found);
            }
            Err(e) => tracing::warn!("残留扫描失败: {}", e),
        }
    }

    // 保存到文件
    if let Some(output) = &cmd.output {
        let json = serde_json::to_string_pretty(&all_candidates)?;
        std::fs::write(output, json)?;
        println!("\n结果已保存到: {}", output);
    }

    Ok(())
}

fn print_candidates(app: &AppDescriptor, candidates: &[Candidate], verbose: bool) {
    println!("== {} ==", app.display_name);

    if candidates.is_empty() {
        println!("  未发现残留\n");
        return;
    }

    let mut key_count = 0;
    let mut value_count = 0;

    for candidate in candidates {
        match candidate.kind {
            CandidateKind::StoreKey => key_count += 1,
            CandidateKind::StoreValue => value_count += 1,
            CandidateKind::FilesystemPath => {}
        }

        let confidence = match candidate.confidence() {
            Confidence::High => "高",
            Confidence::Medium => "中",
            Confidence::Low => "低",
        };

        if verbose {
            let evidence = candidate
                .evidence
                .iter()
                .map(|tag| tag.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "  [{:13}] {} (置信度: {}; 证据: {})",
                candidate.kind.to_string(),
                candidate.full_path(),
                confidence,
                evidence
            );
        } else {
            println!(
                "  [{:13}] {} (置信度: {})",
                candidate.kind.to_string(),
                candidate.full_path(),
                confidence
            );
        }
    }

    println!("  --- 注册表键: {}  注册表值: {} ---\n", key_count, value_count);
}
