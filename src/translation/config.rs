//! 翻译配置管理模块
//!
//! 后端凭证和管道参数都封装在 [`TranslationConfig`] 里，由调用方显式
//! 传给 [`TranslationClient`](crate::translation::TranslationClient) 的
//! 构造函数；缺失的配置在构造时报错，而不是在某次请求里才被发现。

use std::time::Duration;

use url::Url;

use crate::env;
use crate::translation::error::{TranslationError, TranslationResult};

/// 配置常量
pub mod constants {
    /// 单个批次的估算 token 预算
    pub const DEFAULT_MAX_BATCH_TOKENS: usize = 1800;

    /// 后端单次补全允许的最大输出长度
    pub const DEFAULT_MAX_COMPLETION_TOKENS: usize = 2048;

    /// 采样温度；偏低的温度让输出行数更稳定
    pub const DEFAULT_TEMPERATURE: f32 = 0.3;

    /// 后端请求超时（秒）；挂起的后端不允许无限期阻塞整个运行
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

    /// 单个批次失败后的重试次数；0 表示每批次只尝试一次
    pub const DEFAULT_MAX_RETRIES: usize = 1;

    /// 默认源语言
    pub const DEFAULT_SOURCE_LANG: &str = "English";

    /// 默认目标语言
    pub const DEFAULT_TARGET_LANG: &str = "Japanese";
}

/// 翻译后端与管道配置
#[derive(Debug, Clone)]
pub struct TranslationConfig {
    /// 后端资源地址，例如 `https://example.openai.azure.com/`
    pub api_base: String,
    /// 后端访问密钥
    pub api_key: String,
    /// 模型部署名
    pub deployment: String,
    /// 后端 API 版本号
    pub api_version: String,
    /// 源语言（自然语言名称，进入系统提示词）
    pub source_lang: String,
    /// 目标语言
    pub target_lang: String,
    /// 单个批次的估算 token 预算
    pub max_batch_tokens: usize,
    /// 补全输出上限
    pub max_completion_tokens: usize,
    /// 采样温度
    pub temperature: f32,
    /// 单次后端请求的超时
    pub request_timeout: Duration,
    /// 每批次的重试次数
    pub max_retries: usize,
}

impl TranslationConfig {
    /// 用后端凭证创建配置，其余参数取默认值
    pub fn new(api_base: &str, api_key: &str, deployment: &str, api_version: &str) -> Self {
        TranslationConfig {
            api_base: api_base.to_string(),
            api_key: api_key.to_string(),
            deployment: deployment.to_string(),
            api_version: api_version.to_string(),
            source_lang: constants::DEFAULT_SOURCE_LANG.to_string(),
            target_lang: constants::DEFAULT_TARGET_LANG.to_string(),
            max_batch_tokens: constants::DEFAULT_MAX_BATCH_TOKENS,
            max_completion_tokens: constants::DEFAULT_MAX_COMPLETION_TOKENS,
            temperature: constants::DEFAULT_TEMPERATURE,
            request_timeout: Duration::from_secs(constants::DEFAULT_REQUEST_TIMEOUT_SECS),
            max_retries: constants::DEFAULT_MAX_RETRIES,
        }
    }

    /// 从进程环境读取配置
    ///
    /// 必需变量：`TRANSLATOR_API_BASE`、`TRANSLATOR_API_KEY`、
    /// `TRANSLATOR_DEPLOYMENT`、`TRANSLATOR_API_VERSION`。
    /// 其余变量可选，未设置时使用默认值。
    pub fn from_env() -> TranslationResult<Self> {
        let mut config = TranslationConfig::new(
            &env::required_var("TRANSLATOR_API_BASE").map_err(config_error)?,
            &env::required_var("TRANSLATOR_API_KEY").map_err(config_error)?,
            &env::required_var("TRANSLATOR_DEPLOYMENT").map_err(config_error)?,
            &env::required_var("TRANSLATOR_API_VERSION").map_err(config_error)?,
        );

        if let Some(lang) = env::optional_var("TRANSLATOR_SOURCE_LANG") {
            config.source_lang = lang;
        }
        if let Some(lang) = env::optional_var("TRANSLATOR_TARGET_LANG") {
            config.target_lang = lang;
        }
        if let Some(budget) = env::parsed_var("TRANSLATOR_MAX_BATCH_TOKENS").map_err(config_error)? {
            config.max_batch_tokens = budget;
        }
        if let Some(secs) = env::parsed_var("TRANSLATOR_TIMEOUT_SECS").map_err(config_error)? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = env::parsed_var("TRANSLATOR_MAX_RETRIES").map_err(config_error)? {
            config.max_retries = retries;
        }

        Ok(config)
    }

    /// 校验配置的完整性
    pub fn validate(&self) -> TranslationResult<()> {
        if self.api_base.trim().is_empty()
            || self.api_key.trim().is_empty()
            || self.deployment.trim().is_empty()
            || self.api_version.trim().is_empty()
        {
            return Err(TranslationError::ConfigError(
                "后端地址、密钥、部署名或 API 版本缺失".to_string(),
            ));
        }
        if Url::parse(&self.api_base).is_err() {
            return Err(TranslationError::ConfigError(format!(
                "后端地址不是合法的 URL: {}",
                self.api_base
            )));
        }
        if self.max_batch_tokens == 0 {
            return Err(TranslationError::ConfigError(
                "批次 token 预算必须大于 0".to_string(),
            ));
        }
        Ok(())
    }

    /// chat-completion 端点的完整 URL
    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.api_base.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

fn config_error(e: crate::env::EnvError) -> TranslationError {
    TranslationError::ConfigError(e.to_string())
}
