//! 翻译服务编排模块
//!
//! 把解析、收集、分批、逐批翻译与回写、序列化串成一次完整的运行。
//! 运行是尽力而为的：单个批次失败只让该批次的节点保留原文，后续
//! 批次照常进行；无论翻译成败，文档结构保持不变。

use tracing::{info, warn};

use crate::parsers::storage::{parse_storage, serialize_storage};
use crate::translation::client::TranslationClient;
use crate::translation::config::TranslationConfig;
use crate::translation::error::TranslationResult;
use crate::translation::pipeline::{
    apply_batch_translation, collect_translatable_texts, create_batches,
};

/// 一次翻译运行的统计信息
///
/// `line_mismatches` 大于 0 说明某些批次的译文行数与节点数不一致，
/// 部分节点没有拿到对应译文；调用方可以据此判断译文是否降级。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct PipelineStats {
    /// 收集到的可翻译节点数
    pub nodes_collected: usize,
    /// 划分出的批次数
    pub batches_total: usize,
    /// 后端调用失败（已跳过）的批次数
    pub batches_failed: usize,
    /// 文本被成功替换的节点数
    pub nodes_translated: usize,
    /// 行数不匹配的累计缺口
    pub line_mismatches: usize,
}

/// 一次翻译运行的产物
#[derive(Debug, Clone)]
pub struct TranslatedStorage {
    /// 序列化后的文档，结构与输入一致
    pub markup: String,
    /// 运行统计
    pub stats: PipelineStats,
}

/// 翻译服务
///
/// 持有后端客户端与批次预算；每次 [`translate_storage`] 调用解析一个
/// 新文档，批次严格按收集顺序逐个同步翻译。
///
/// [`translate_storage`]: TranslationService::translate_storage
pub struct TranslationService {
    client: TranslationClient,
    max_batch_tokens: usize,
}

impl TranslationService {
    /// 创建翻译服务
    ///
    /// 配置缺失在此处失败（"翻译不可用"），此后的运行不再有致命
    /// 错误路径。
    pub fn new(config: TranslationConfig) -> TranslationResult<Self> {
        let max_batch_tokens = config.max_batch_tokens;
        let client = TranslationClient::new(config)?;
        Ok(TranslationService {
            client,
            max_batch_tokens,
        })
    }

    /// 翻译一段存储格式文档
    ///
    /// 返回尽力而为的结果：可能全部、部分翻译，后端完全不可用时
    /// 返回结构不变的原文。
    pub fn translate_storage(&self, markup: &str) -> TranslatedStorage {
        let mut stats = PipelineStats::default();
        let mut doc = parse_storage(markup);

        let items = collect_translatable_texts(&doc);
        stats.nodes_collected = items.len();
        if items.is_empty() {
            info!("没有找到需要翻译的文本");
            return TranslatedStorage {
                markup: serialize_storage(&doc),
                stats,
            };
        }

        let batches = create_batches(items, self.max_batch_tokens);
        stats.batches_total = batches.len();
        info!(
            nodes = stats.nodes_collected,
            batches = stats.batches_total,
            "开始逐批翻译"
        );

        for (index, batch) in batches.iter().enumerate() {
            match self.client.translate_batch(batch) {
                Ok(translated) => {
                    let outcome = apply_batch_translation(&mut doc, batch, &translated);
                    stats.nodes_translated += outcome.replaced;
                    stats.line_mismatches += outcome.mismatched_lines;
                    if outcome.mismatched_lines > 0 {
                        warn!(
                            batch = index,
                            nodes = batch.len(),
                            mismatch = outcome.mismatched_lines,
                            "译文行数与节点数不一致"
                        );
                    }
                }
                Err(e) => {
                    stats.batches_failed += 1;
                    warn!(batch = index, error = %e, "批次翻译失败，保留原文继续");
                }
            }
        }

        info!(
            translated = stats.nodes_translated,
            failed_batches = stats.batches_failed,
            mismatches = stats.line_mismatches,
            "翻译运行结束"
        );
        TranslatedStorage {
            markup: serialize_storage(&doc),
            stats,
        }
    }
}
