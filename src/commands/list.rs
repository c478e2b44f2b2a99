use anyhow::Result;
use clap::Parser;

use crate::modules::apps;
use crate::modules::common::utils;

#[derive(Parser, Debug)]
pub struct ListCommand {
    /// 输出格式 (table/json)
    #[arg(long, default_value = "table")]
    pub format: String,

    /// 搜索关键词
    #[arg(short, long)]
    pub search: Option<String>,
}

pub async fn execute(cmd: ListCommand) -> Result<()> {
    tracing::info!("列出已安装程序, search: {:?}", cmd.search);

    let store = super::system_store()?;

    let mut programs = apps::list_installed(store.as_ref());
    if let Some(search) = cmd.search.as_deref() {
        programs = apps::filter_by_name(&programs, search);
    }

    if cmd.format == "json" {
        println!("{}", serde_json::to_string_pretty(&programs)?);
        return Ok(());
    }

    println!("共 {} 个程序:\n", programs.len());

    for program in &programs {
        let size = program
            .estimated_size
            .map(utils::format_size)
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:40} {:12} {:10} {}",
            program.display_name,
            program.version.as_deref().unwrap_or("-"),
            size,
            program.publisher.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
