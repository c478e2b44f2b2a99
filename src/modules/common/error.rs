use thiserror::Error;

#[derive(Error, Debug)]
#[allow(dead_code)]
pub enum SweepError {
    #[error("注册表错误: {0}")]
    Registry(String),

    #[error("文件系统错误: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("程序描述不合法: {0}")]
    InvalidDescriptor(String),

    #[error("未找到: {0}")]
    NotFound(String),

    #[error("当前平台不支持: {0}")]
    Unsupported(String),

    #[error("序列化错误: {0}")]
    Serde(String),

    #[error("其他错误: {0}")]
    Other(String),
}

impl serde::Serialize for SweepError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
