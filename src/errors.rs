use std::fmt;

#[derive(Debug, Clone)]
pub enum IpdbError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    InvalidAddress(String),
    NotFound(String),
    FileOperation(String),
    Serialization(String),
}

impl IpdbError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            IpdbError::DatabaseConfig(_) => "E001",
            IpdbError::DatabaseConnection(_) => "E002",
            IpdbError::DatabaseOperation(_) => "E003",
            IpdbError::InvalidAddress(_) => "E004",
            IpdbError::NotFound(_) => "E005",
            IpdbError::FileOperation(_) => "E006",
            IpdbError::Serialization(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            IpdbError::DatabaseConfig(_) => "Database Configuration Error",
            IpdbError::DatabaseConnection(_) => "Database Connection Error",
            IpdbError::DatabaseOperation(_) => "Database Operation Error",
            IpdbError::InvalidAddress(_) => "Invalid Address",
            IpdbError::NotFound(_) => "Resource Not Found",
            IpdbError::FileOperation(_) => "File Operation Error",
            IpdbError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            IpdbError::DatabaseConfig(msg) => msg,
            IpdbError::DatabaseConnection(msg) => msg,
            IpdbError::DatabaseOperation(msg) => msg,
            IpdbError::InvalidAddress(msg) => msg,
            IpdbError::NotFound(msg) => msg,
            IpdbError::FileOperation(msg) => msg,
            IpdbError::Serialization(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for IpdbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 默认使用简洁格式
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for IpdbError {}

// 便捷的构造函数
impl IpdbError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        IpdbError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        IpdbError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        IpdbError::DatabaseOperation(msg.into())
    }

    pub fn invalid_address<T: Into<String>>(msg: T) -> Self {
        IpdbError::InvalidAddress(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        IpdbError::NotFound(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        IpdbError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        IpdbError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for IpdbError {
    fn from(err: sea_orm::DbErr) -> Self {
        IpdbError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for IpdbError {
    fn from(err: std::io::Error) -> Self {
        IpdbError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for IpdbError {
    fn from(err: serde_json::Error) -> Self {
        IpdbError::Serialization(err.to_string())
    }
}

impl From<std::net::AddrParseError> for IpdbError {
    fn from(err: std::net::AddrParseError) -> Self {
        IpdbError::InvalidAddress(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IpdbError>;
