pub mod list;
pub mod report;
pub mod scan;

use std::sync::Arc;

use clap::Subcommand;

use crate::modules::store::HierarchicalStore;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 列出所有已安装的程序
    List(list::ListCommand),

    /// 扫描程序的卸载残留
    Scan(scan::ScanCommand),

    /// 扫描并生成 HTML 报告
    Report(report::ReportCommand),
}

/// 打开系统注册表存储
#[cfg(windows)]
pub fn system_store() -> anyhow::Result<Arc<dyn HierarchicalStore + Send + Sync>> {
    use crate::modules::store::windows::WindowsRegistry;
    Ok(Arc::new(WindowsRegistry))
}

#[cfg(not(windows))]
pub fn system_store() -> anyhow::Result<Arc<dyn HierarchicalStore + Send + Sync>> {
    use crate::modules::common::error::SweepError;
    Err(SweepError::Unsupported("残留扫描只支持 Windows".to_string()).into())
}
