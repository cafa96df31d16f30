//! 页面 ID 提取
//!
//! 用户输入可能是裸的页面 ID，也可能是各种形态的 Confluence URL。

use regex::Regex;
use tracing::debug;

/// 从自由输入中提取数字页面 ID
///
/// 支持的形态：纯数字、`/pages/<id>`、`/wiki/spaces/<key>/pages/<id>`、
/// `viewpage.action?pageId=<id>`、以数字结尾的任意 URL。查询串和锚点
/// 在匹配路径形态之前被去掉。
pub fn extract_page_id(page_input: &str) -> Option<String> {
    let input = page_input.trim();
    if input.is_empty() {
        return None;
    }

    // pageId 出现在查询串里，要在去掉查询串之前检查
    if let Some(caps) = Regex::new(r"pageId=(\d+)").unwrap().captures(input) {
        return Some(caps[1].to_string());
    }

    // 去掉查询串与锚点
    let bare = Regex::new(r"[?#].*$").unwrap().replace(input, "");

    // 纯数字输入
    if !bare.is_empty() && bare.chars().all(|c| c.is_ascii_digit()) {
        return Some(bare.to_string());
    }

    // /pages/<id>，包括 /wiki/spaces/<key>/pages/<id>
    if let Some(caps) = Regex::new(r"/pages/(\d+)").unwrap().captures(&bare) {
        return Some(caps[1].to_string());
    }

    // URL 末尾的数字
    if let Some(caps) = Regex::new(r"(\d+)/?$").unwrap().captures(&bare) {
        return Some(caps[1].to_string());
    }

    debug!(input, "无法从输入中提取页面 ID");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_bare_numeric_id() {
        assert_eq!(extract_page_id("123456789").as_deref(), Some("123456789"));
        assert_eq!(extract_page_id("  42  ").as_deref(), Some("42"));
    }

    #[test]
    fn extracts_from_wiki_space_urls() {
        let url = "https://example.atlassian.net/wiki/spaces/DOC/pages/123456789/Some+Title";
        assert_eq!(extract_page_id(url).as_deref(), Some("123456789"));
    }

    #[test]
    fn extracts_from_plain_pages_urls() {
        assert_eq!(
            extract_page_id("https://wiki.example.com/pages/987654").as_deref(),
            Some("987654")
        );
    }

    #[test]
    fn extracts_from_viewpage_query_parameters() {
        let url = "https://example.atlassian.net/wiki/pages/viewpage.action?pageId=555000";
        assert_eq!(extract_page_id(url).as_deref(), Some("555000"));
    }

    #[test]
    fn strips_query_and_fragment_before_matching() {
        let url = "https://example.atlassian.net/wiki/spaces/DOC/pages/777?focusedCommentId=1#comment";
        assert_eq!(extract_page_id(url).as_deref(), Some("777"));
    }

    #[test]
    fn falls_back_to_a_trailing_number() {
        assert_eq!(
            extract_page_id("https://wiki.example.com/x/321/").as_deref(),
            Some("321")
        );
    }

    #[test]
    fn rejects_inputs_without_an_id() {
        assert_eq!(extract_page_id(""), None);
        assert_eq!(extract_page_id("https://wiki.example.com/overview"), None);
        assert_eq!(extract_page_id("not an id"), None);
    }
}
