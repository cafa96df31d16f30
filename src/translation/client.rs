//! 翻译后端客户端
//!
//! 每个批次对应一次 chat-completion 请求：系统消息携带固定的翻译
//! 指令（要求保留换行），用户消息是批次内原文按换行拼接的正文。
//! 客户端是同步阻塞的，带有有界超时；批次内的失败不向外扩散，由
//! 编排层决定跳过。

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::translation::config::TranslationConfig;
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::pipeline::batch::Batch;

#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// 面向 chat-completion 后端的批次翻译客户端
pub struct TranslationClient {
    client: reqwest::blocking::Client,
    config: TranslationConfig,
    completions_url: String,
    system_prompt: String,
}

impl TranslationClient {
    /// 创建客户端
    ///
    /// 配置在这里校验：凭证缺失立即返回 [`TranslationError::ConfigError`]，
    /// 不会发起任何网络活动。
    pub fn new(config: TranslationConfig) -> TranslationResult<Self> {
        config.validate()?;

        let client = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let completions_url = config.completions_url();
        let system_prompt = format!(
            "You are a professional translator. Translate the following {} text to {}. Preserve line breaks.",
            config.source_lang, config.target_lang
        );

        Ok(TranslationClient {
            client,
            config,
            completions_url,
            system_prompt,
        })
    }

    /// 翻译一个批次，成功时返回后端的多行译文
    ///
    /// 传输错误、非 2xx 状态、缺失补全都算该批次失败；按配置做有限
    /// 次重试，耗尽后把最后一次错误交给调用方。
    pub fn translate_batch(&self, batch: &Batch) -> TranslationResult<String> {
        let source_text = batch.joined_source_text();
        debug!(
            nodes = batch.len(),
            estimated_tokens = batch.estimated_tokens,
            "发送批次翻译请求"
        );

        let mut attempt = 0;
        loop {
            match self.call_backend(&source_text) {
                Ok(translated) => return Ok(translated),
                Err(e) if attempt < self.config.max_retries => {
                    warn!(attempt, error = %e, "翻译后端调用失败，重试");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn call_backend(&self, source_text: &str) -> TranslationResult<String> {
        let request = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: self.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: source_text.to_string(),
                },
            ],
            max_tokens: self.config.max_completion_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(&self.completions_url)
            .header("Content-Type", "application/json")
            .header("api-key", &self.config.api_key)
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(TranslationError::ApiError { status, body });
        }

        let payload: ChatResponse = response.json()?;
        payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| TranslationError::InvalidResponse("后端没有返回任何补全".to_string()))
    }
}
