//! 统一的环境变量管理系统
//!
//! 配置一律通过显式的配置结构体传入各组件；本模块只负责把进程环境
//! 变量读成这些结构体需要的原始值，并给出带变量名的错误信息。

use std::env;
use std::fmt;
use std::str::FromStr;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Environment variable '{}': {}",
            self.variable, self.message
        )
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 读取必需变量；未设置或为空串视为缺失
pub fn required_var(name: &str) -> EnvResult<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(EnvError {
            variable: name.to_string(),
            message: "Required environment variable not set".to_string(),
        }),
    }
}

/// 读取可选变量；未设置或为空串返回 `None`
pub fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// 读取可选变量并解析为目标类型；设置了但解析失败时报错
pub fn parsed_var<T>(name: &str) -> EnvResult<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match optional_var(name) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| EnvError {
            variable: name.to_string(),
            message: format!("Invalid value '{}': {}", raw, e),
        }),
    }
}

/// 解析布尔开关（true/false、1/0、yes/no、on/off）
pub fn bool_var(name: &str, default: bool) -> EnvResult<bool> {
    match optional_var(name) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(EnvError {
                variable: name.to_string(),
                message: format!("Invalid boolean '{}'. Use: true, false, 1, 0, yes, no", raw),
            }),
        },
    }
}
