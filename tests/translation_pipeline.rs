//! 翻译管道集成测试
//!
//! 在本地起一个模拟的 chat-completion 后端，对整条管道做端到端验证：
//! 结构保持、批次划分、部分失败隔离、行数不匹配容忍、配置缺失降级。

use std::time::Duration;

use confluence_translator::translation::{
    translate_storage_content, TranslatedStorage, TranslationConfig, TranslationError,
    TranslationService,
};
use tokio::task;

mod mock_backend {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    /// 后端行为：输入用户正文，返回译文或一个错误状态码
    pub type Behavior = Arc<dyn Fn(&str) -> Result<String, u16> + Send + Sync>;

    pub fn behavior<F>(f: F) -> Behavior
    where
        F: Fn(&str) -> Result<String, u16> + Send + Sync + 'static,
    {
        Arc::new(f)
    }

    pub struct MockBackend {
        pub base_url: String,
        pub requests: Arc<AtomicUsize>,
    }

    impl MockBackend {
        pub fn request_count(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    struct BackendState {
        behavior: Behavior,
        requests: Arc<AtomicUsize>,
    }

    /// 在随机端口上启动模拟后端
    pub async fn spawn(behavior: Behavior) -> MockBackend {
        let requests = Arc::new(AtomicUsize::new(0));
        let state = Arc::new(BackendState {
            behavior,
            requests: requests.clone(),
        });
        let app = Router::new()
            .route(
                "/openai/deployments/:deployment/chat/completions",
                post(completions),
            )
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockBackend {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    async fn completions(
        State(state): State<Arc<BackendState>>,
        Json(request): Json<Value>,
    ) -> impl IntoResponse {
        state.requests.fetch_add(1, Ordering::SeqCst);
        let source = request
            .pointer("/messages/1/content")
            .and_then(Value::as_str)
            .unwrap_or_default();
        match (state.behavior)(source) {
            Ok(translated) => (
                StatusCode::OK,
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": translated}}]
                })),
            ),
            Err(status) => (
                StatusCode::from_u16(status).unwrap(),
                Json(json!({"error": {"message": "mock failure"}})),
            ),
        }
    }
}

use mock_backend::behavior;

fn backend_config(base_url: &str) -> TranslationConfig {
    let mut config = TranslationConfig::new(base_url, "test-key", "gpt-test", "2024-02-01");
    config.max_retries = 0;
    config.request_timeout = Duration::from_secs(5);
    config
}

/// 在阻塞线程上跑一次完整管道
async fn run_pipeline(config: TranslationConfig, markup: String) -> TranslatedStorage {
    task::spawn_blocking(move || {
        let service = TranslationService::new(config).expect("config should be valid");
        service.translate_storage(&markup)
    })
    .await
    .expect("pipeline task should not panic")
}

#[tokio::test]
async fn three_paragraphs_become_one_batch_and_translate_in_order() {
    let backend = mock_backend::spawn(behavior(|_| Ok("X\nY\nZ".to_string()))).await;
    let config = backend_config(&backend.base_url);

    let result = run_pipeline(config, "<p>Hello</p><p>World</p><p>Test</p>".to_string()).await;

    assert_eq!(result.markup, "<p>X</p><p>Y</p><p>Z</p>");
    assert_eq!(result.stats.nodes_collected, 3);
    assert_eq!(result.stats.batches_total, 1);
    assert_eq!(result.stats.nodes_translated, 3);
    assert_eq!(result.stats.line_mismatches, 0);
    assert_eq!(backend.request_count(), 1);
}

#[tokio::test]
async fn structure_and_attributes_survive_translation() {
    let backend = mock_backend::spawn(behavior(|source| {
        Ok(source
            .lines()
            .map(|line| format!("译{}", line))
            .collect::<Vec<_>>()
            .join("\n"))
    }))
    .await;
    let config = backend_config(&backend.base_url);

    let result = run_pipeline(
        config,
        r#"<h1>Title</h1><table data-layout="default"><tbody><tr><th>Key</th><td>Value</td></tr></tbody></table>"#
            .to_string(),
    )
    .await;

    assert_eq!(
        result.markup,
        r#"<h1>译Title</h1><table data-layout="default"><tbody><tr><th>译Key</th><td>译Value</td></tr></tbody></table>"#
    );
}

#[tokio::test]
async fn nested_containers_are_collected_once_each_and_outer_replacement_wins() {
    let backend = mock_backend::spawn(behavior(|source| {
        Ok(source
            .lines()
            .map(|line| format!("译{}", line))
            .collect::<Vec<_>>()
            .join("\n"))
    }))
    .await;
    let config = backend_config(&backend.base_url);

    let result = run_pipeline(
        config,
        r#"<div class="panel"><p>One</p><p>Two</p></div>"#.to_string(),
    )
    .await;

    // div 的汇总文本与两个 p 各占一行；div 先被整体替换，内层节点
    // 随之脱离文档，对它们的回写不再可见
    assert_eq!(result.markup, r#"<div class="panel">译OneTwo</div>"#);
    assert_eq!(result.stats.nodes_collected, 3);
    assert_eq!(result.stats.line_mismatches, 0);
}

#[tokio::test]
async fn thousand_token_nodes_are_translated_one_batch_each() {
    let backend = mock_backend::spawn(behavior(|_| Ok("译".to_string()))).await;
    let config = backend_config(&backend.base_url);

    // 每个段落约 1000 估算 token，预算 1800：每个节点独占一个批次
    let markup: String = (0..5)
        .map(|i| format!("<p>{}</p>", format!("{}", i).repeat(2000)))
        .collect();
    let result = run_pipeline(config, markup).await;

    assert_eq!(result.stats.batches_total, 5);
    assert_eq!(result.stats.batches_failed, 0);
    assert_eq!(result.stats.nodes_translated, 5);
    assert_eq!(backend.request_count(), 5);
    assert_eq!(result.markup, "<p>译</p>".repeat(5));
}

#[tokio::test]
async fn a_short_response_leaves_trailing_nodes_untranslated() {
    let backend = mock_backend::spawn(behavior(|_| Ok("OnlyOne".to_string()))).await;
    let config = backend_config(&backend.base_url);

    let result = run_pipeline(config, "<p>First</p><p>Second</p>".to_string()).await;

    assert_eq!(result.markup, "<p>OnlyOne</p><p>Second</p>");
    assert_eq!(result.stats.nodes_translated, 1);
    assert_eq!(result.stats.line_mismatches, 1);
    assert_eq!(result.stats.batches_failed, 0);
}

#[tokio::test]
async fn a_failing_batch_is_skipped_while_neighbours_apply() {
    let backend = mock_backend::spawn(behavior(|source| {
        if source.contains('B') {
            Err(500)
        } else {
            Ok("译".to_string())
        }
    }))
    .await;
    let config = backend_config(&backend.base_url);

    // 三个超长段落各自成批；中间批次的后端调用失败
    let markup = format!(
        "<p>{}</p><p>{}</p><p>{}</p>",
        "A".repeat(4000),
        "B".repeat(4000),
        "C".repeat(4000)
    );
    let result = run_pipeline(config, markup).await;

    assert_eq!(result.stats.batches_total, 3);
    assert_eq!(result.stats.batches_failed, 1);
    assert_eq!(result.stats.nodes_translated, 2);
    assert_eq!(
        result.markup,
        format!("<p>译</p><p>{}</p><p>译</p>", "B".repeat(4000))
    );
}

#[tokio::test]
async fn an_unreachable_backend_leaves_the_document_unchanged() {
    // 绑定后立即释放端口，保证连接被拒绝
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut config = backend_config(&format!("http://127.0.0.1:{}", port));
    config.request_timeout = Duration::from_secs(2);

    let markup = "<h2>Heading</h2><p>Body text</p>".to_string();
    let result = run_pipeline(config, markup.clone()).await;

    assert_eq!(result.markup, markup);
    assert_eq!(result.stats.batches_failed, result.stats.batches_total);
    assert_eq!(result.stats.nodes_translated, 0);
}

#[tokio::test]
async fn retries_are_bounded_and_counted_per_batch() {
    let backend = mock_backend::spawn(behavior(|_| Err(503))).await;
    let mut config = backend_config(&backend.base_url);
    config.max_retries = 2;

    let result = run_pipeline(config, "<p>Text</p>".to_string()).await;

    assert_eq!(result.stats.batches_failed, 1);
    // 一次初始调用加两次重试
    assert_eq!(backend.request_count(), 3);
}

#[test]
fn missing_credentials_fail_before_any_network_activity() {
    let mut config = TranslationConfig::new("https://example.openai.azure.com", "", "gpt", "v1");
    config.max_retries = 0;

    match TranslationService::new(config.clone()) {
        Err(TranslationError::ConfigError(_)) => {}
        other => panic!("expected ConfigError, got {:?}", other.map(|_| ())),
    }

    // 便捷入口把"不可用"折叠成 None，调用方据此回退到原文
    assert_eq!(translate_storage_content("<p>Hello</p>", &config), None);
}

#[tokio::test]
async fn documents_without_translatable_text_skip_the_backend() {
    let backend = mock_backend::spawn(behavior(|_| Ok("译".to_string()))).await;
    let config = backend_config(&backend.base_url);

    let result = run_pipeline(config, "<pre>code only</pre>".to_string()).await;

    assert_eq!(result.markup, "<pre>code only</pre>");
    assert_eq!(result.stats.nodes_collected, 0);
    assert_eq!(result.stats.batches_total, 0);
    assert_eq!(backend.request_count(), 0);
}
