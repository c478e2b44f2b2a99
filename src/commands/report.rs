use anyhow::Result;
use clap::Parser;

use crate::modules::apps;
use crate::modules::detector::JunkDetector;
use crate::modules::reporter::{html, models::ScanReport};
use crate::modules::store::SystemProber;

#[derive(Parser, Debug)]
pub struct ReportCommand {
    /// 程序名称 (必需)
    pub program_name: String,

    /// 报告输出路径
    #[arg(short, long, default_value = "sweep-report.html")]
    pub output: String,
}

pub async fn execute(cmd: ReportCommand) -> Result<()> {
    let store = super::system_store()?;

    let installed = apps::list_installed(store.as_ref());
    let matched = apps::filter_by_name(&installed, &cmd.program_name);

    let app = match matched.into_iter().next() {
        Some(app) => app,
        None => {
            println!("没有找到名称匹配 \"{}\" 的程序", cmd.program_name);
            return Ok(());
        }
    };

    let program_name = app.display_name.clone();
    let peers = installed.clone();
    let candidates = {
        let store = store.clone();
        tokio::task::spawn_blocking(move || {
            let prober = SystemProber;
            let detector = JunkDetector::new(store.as_ref(), &prober);
            detector.find_junk(&app, &peers)
        })
        .await??
    };

    let mut report = ScanReport::new(program_name, candidates);
    report
        .candidates
        .sort_by(|a, b| b.confidence().cmp(&a.confidence()));

    let page = html::generate_html_report(&report)?;
    std::fs::write(&cmd.output, page)?;

    println!("报告已生成: {}", cmd.output);

    Ok(())
}
