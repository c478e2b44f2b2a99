use serde::{Deserialize, Serialize};

/// 一次扫描的目标程序描述，扫描期间不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub id: String,
    pub display_name: String,
    pub publisher: Option<String>,
    pub version: Option<String>,
    /// 安装目录
    pub install_location: Option<String>,
    /// 主可执行文件路径（由 DisplayIcon 等线索推出）
    pub executable_path: Option<String>,
    /// 程序自身卸载注册键的完整路径
    pub uninstall_key_path: Option<String>,
    pub uninstall_command: Option<String>,
    pub estimated_size: Option<u64>,
}

impl AppDescriptor {
    pub fn new(display_name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            display_name,
            publisher: None,
            version: None,
            install_location: None,
            executable_path: None,
            uninstall_key_path: None,
            uninstall_command: None,
            estimated_size: None,
        }
    }

    pub fn with_install_location(mut self, install_location: String) -> Self {
        self.install_location = Some(install_location);
        self
    }

    pub fn with_uninstall_key_path(mut self, uninstall_key_path: String) -> Self {
        self.uninstall_key_path = Some(uninstall_key_path);
        self
    }
}
