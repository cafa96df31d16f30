//! Confluence REST 客户端
//!
//! 只负责 API 通信与数据获取：v1 内容接口带 storage 展开，v2 接口
//! 用于新式站点与子页面列表。客户端同步阻塞，复用一个带默认请求头
//! 的连接池。

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::confluence::content::json_id;
use crate::confluence::error::{ConfluenceError, ConfluenceResult};
use crate::env;

/// Confluence 站点配置
#[derive(Debug, Clone)]
pub struct ConfluenceConfig {
    /// 站点基础地址，例如 `https://example.atlassian.net`
    pub base_url: String,
    /// 账号（邮箱）
    pub username: String,
    /// API token
    pub api_token: String,
    /// 是否接受无效证书（内网自签名站点使用）
    pub accept_invalid_certs: bool,
}

impl ConfluenceConfig {
    pub fn new(base_url: &str, username: &str, api_token: &str) -> Self {
        ConfluenceConfig {
            base_url: base_url.to_string(),
            username: username.to_string(),
            api_token: api_token.to_string(),
            accept_invalid_certs: false,
        }
    }

    /// 从进程环境读取配置
    ///
    /// 必需变量：`CONFLUENCE_BASE_URL`、`CONFLUENCE_USERNAME`、
    /// `CONFLUENCE_API_TOKEN`；可选 `CONFLUENCE_ACCEPT_INVALID_CERTS`。
    pub fn from_env() -> ConfluenceResult<Self> {
        let mut config = ConfluenceConfig::new(
            &env::required_var("CONFLUENCE_BASE_URL").map_err(missing)?,
            &env::required_var("CONFLUENCE_USERNAME").map_err(missing)?,
            &env::required_var("CONFLUENCE_API_TOKEN").map_err(missing)?,
        );
        config.accept_invalid_certs =
            env::bool_var("CONFLUENCE_ACCEPT_INVALID_CERTS", false).map_err(missing)?;
        Ok(config)
    }

    /// 校验配置的完整性
    pub fn validate(&self) -> ConfluenceResult<()> {
        if self.base_url.trim().is_empty()
            || self.username.trim().is_empty()
            || self.api_token.trim().is_empty()
        {
            return Err(ConfluenceError::MissingConfig(
                "基础地址、用户名或 API token 缺失".to_string(),
            ));
        }
        if Url::parse(&self.base_url).is_err() {
            return Err(ConfluenceError::MissingConfig(format!(
                "基础地址不是合法的 URL: {}",
                self.base_url
            )));
        }
        Ok(())
    }
}

fn missing(e: crate::env::EnvError) -> ConfluenceError {
    ConfluenceError::MissingConfig(e.to_string())
}

/// Confluence REST 客户端
pub struct ConfluenceClient {
    client: Client,
    base_url: String,
}

impl ConfluenceClient {
    /// 创建客户端；配置不完整在这里立即失败
    pub fn new(config: ConfluenceConfig) -> ConfluenceResult<Self> {
        config.validate()?;

        let credentials = BASE64.encode(format!("{}:{}", config.username, config.api_token));
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {}", credentials)).map_err(|e| {
                ConfluenceError::MissingConfig(format!("凭证无法编码为请求头: {}", e))
            })?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(ConfluenceClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get_json(&self, url: &str, query: &[(&str, String)]) -> ConfluenceResult<Value> {
        debug!(url, "请求 Confluence");
        let response = self.client.get(url).query(query).send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ConfluenceError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ConfluenceError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        Ok(response.json()?)
    }

    /// 按 ID 获取页面（v1，带 storage 正文展开）；404 时回退 v2 接口
    pub fn get_page_content(&self, page_id: &str) -> ConfluenceResult<Value> {
        let url = format!("{}/rest/api/content/{}", self.base_url, page_id);
        match self.get_json(
            &url,
            &[("expand", "body.storage,version,children.page".to_string())],
        ) {
            Err(ConfluenceError::NotFound(_)) => {
                debug!(page_id, "v1 未找到页面，改用 v2 接口");
                self.get_page_v2(page_id)
            }
            other => other,
        }
    }

    /// v2 接口按 ID 获取页面，正文为 storage 格式
    pub fn get_page_v2(&self, page_id: &str) -> ConfluenceResult<Value> {
        let url = format!("{}/wiki/api/v2/pages/{}", self.base_url, page_id);
        self.get_json(&url, &[("body-format", "storage".to_string())])
    }

    /// 获取一个页面的直接子页面（v2）
    pub fn get_page_children_v2(&self, page_id: &str, limit: usize) -> ConfluenceResult<Value> {
        let url = format!("{}/wiki/api/v2/pages/{}/children", self.base_url, page_id);
        self.get_json(&url, &[("limit", limit.to_string())])
    }

    /// 获取空间内容列表（v1）
    pub fn get_space_content(&self, space_key: &str, limit: usize) -> ConfluenceResult<Value> {
        let url = format!("{}/rest/api/content", self.base_url);
        self.get_json(
            &url,
            &[
                ("spaceKey", space_key.to_string()),
                ("limit", limit.to_string()),
                ("expand", "body.storage,version".to_string()),
            ],
        )
    }

    /// 获取空间信息（v1）
    pub fn get_space_info(&self, space_key: &str) -> ConfluenceResult<Value> {
        let url = format!("{}/rest/api/space/{}", self.base_url, space_key);
        self.get_json(&url, &[])
    }

    /// 内容搜索：优先使用 CQL，否则按关键词
    pub fn search_content(
        &self,
        query: &str,
        cql: Option<&str>,
        limit: usize,
    ) -> ConfluenceResult<Value> {
        let url = format!("{}/rest/api/content/search", self.base_url);
        let mut params = vec![("limit", limit.to_string())];
        match cql {
            Some(cql) => params.push(("cql", cql.to_string())),
            None => params.push(("query", query.to_string())),
        }
        self.get_json(&url, &params)
    }

    /// 列出一个空间下的全部页面（v2，按 `_links.next` 翻页）
    pub fn get_all_pages_in_space_v2(&self, space_id: &str) -> ConfluenceResult<Vec<Value>> {
        let mut all_pages = Vec::new();
        let mut start = 0usize;
        let limit = 50usize;

        loop {
            let url = format!("{}/wiki/api/v2/spaces/{}/pages", self.base_url, space_id);
            let data = self.get_json(
                &url,
                &[("limit", limit.to_string()), ("start", start.to_string())],
            )?;
            if let Some(results) = data.get("results").and_then(Value::as_array) {
                all_pages.extend(results.iter().cloned());
            }
            let has_next = data
                .pointer("/_links/next")
                .and_then(Value::as_str)
                .is_some_and(|next| !next.is_empty());
            if !has_next {
                break;
            }
            start += limit;
        }

        Ok(all_pages)
    }

    /// 递归列出一个页面的全部后代（v2）
    pub fn get_all_descendants_v2(
        &self,
        page_id: &str,
        limit: usize,
    ) -> ConfluenceResult<Vec<Value>> {
        let mut descendants = Vec::new();
        self.collect_descendants(page_id, limit, &mut descendants)?;
        Ok(descendants)
    }

    fn collect_descendants(
        &self,
        page_id: &str,
        limit: usize,
        out: &mut Vec<Value>,
    ) -> ConfluenceResult<()> {
        let data = self.get_page_children_v2(page_id, limit)?;
        if let Some(results) = data.get("results").and_then(Value::as_array) {
            for child in results {
                out.push(child.clone());
                if let Some(child_id) = json_id(child) {
                    self.collect_descendants(&child_id, limit, out)?;
                }
            }
        }
        Ok(())
    }
}
