// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::document::{Document, DocumentMetadata, ImageRef, UNTITLED};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static NOISE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script, style, nav, header, footer, aside").unwrap());

/// 正文容器选择器，按优先级排列
static CONTENT_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        "article",
        "main",
        ".content",
        ".post-content",
        ".entry-content",
        "#content",
        "body",
    ]
    .iter()
    .map(|s| Selector::parse(s).unwrap())
    .collect()
});

static TITLE_META: Lazy<Vec<Selector>> = Lazy::new(|| {
    [r#"meta[property="og:title"]"#, r#"meta[name="twitter:title"]"#]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
});

static AUTHOR_META: Lazy<Vec<Selector>> = Lazy::new(|| {
    [r#"meta[name="author"]"#, r#"meta[property="article:author"]"#]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
});

static DATE_META: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        r#"meta[property="article:published_time"]"#,
        r#"meta[name="publish_date"]"#,
    ]
    .iter()
    .map(|s| Selector::parse(s).unwrap())
    .collect()
});

static TAG_META: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="article:tag"]"#).unwrap());
static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());
static AUTHOR_CLASS: Lazy<Selector> = Lazy::new(|| Selector::parse(".author").unwrap());
static TIME: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());

const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "svg"];

/// 提取服务
///
/// 从任意HTML中提取标题、正文、图片和元数据。提取过程从不失败，
/// 遇到残缺的HTML时退化为占位标题或空值。
pub struct ExtractionService;

impl ExtractionService {
    /// 提取文档
    ///
    /// # 参数
    ///
    /// * `html` - 原始HTML
    /// * `base_url` - 页面URL，用于解析相对图片地址
    ///
    /// # 返回值
    ///
    /// 返回提取出的文档
    pub fn extract(html: &str, base_url: &str) -> Document {
        let document = Html::parse_document(html);
        // Title reads the full page; everything else ignores scripts, navigation and page chrome
        let cleaned = strip_noise(&document);

        Document {
            source_url: base_url.to_string(),
            title: Self::extract_title(&document),
            body_text: Self::extract_body(&cleaned),
            raw_html: html.to_string(),
            images: Self::extract_images(&cleaned, base_url),
            metadata: Self::extract_metadata(&cleaned),
            scraped_at: Utc::now(),
        }
    }

    fn extract_title(document: &Html) -> String {
        first_meta_content(document, &TITLE_META)
            .or_else(|| first_text(document, &H1))
            .or_else(|| first_text(document, &TITLE))
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// 取第一个命中的正文容器
    fn extract_body(cleaned: &Html) -> String {
        for selector in CONTENT_SELECTORS.iter() {
            let matches: Vec<ElementRef> = cleaned.select(selector).collect();
            if !matches.is_empty() {
                let text = matches
                    .iter()
                    .map(|element| element_text(element))
                    .collect::<Vec<_>>()
                    .join(" ");
                return normalize_whitespace(&text);
            }
        }

        String::new()
    }

    fn extract_images(document: &Html, base_url: &str) -> Vec<ImageRef> {
        let base = Url::parse(base_url).ok();
        let mut seen = HashSet::new();
        let mut images = Vec::new();

        for element in document.select(&IMG) {
            let Some(src) = element.value().attr("src") else {
                continue;
            };
            let Some(url) = resolve_url(base.as_ref(), src) else {
                continue;
            };
            if !is_image_url(&url) {
                continue;
            }

            let absolute = url.to_string();
            if seen.insert(absolute.clone()) {
                let alt = element.value().attr("alt").unwrap_or_default();
                images.push(ImageRef::new(absolute, alt));
            }
        }

        images
    }

    fn extract_metadata(document: &Html) -> DocumentMetadata {
        let author = first_meta_content(document, &AUTHOR_META)
            .or_else(|| first_text(document, &AUTHOR_CLASS));

        let publish_date = first_meta_content(document, &DATE_META).or_else(|| {
            document
                .select(&TIME)
                .next()
                .and_then(|time| time.value().attr("datetime"))
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        });

        let mut tags: Vec<String> = Vec::new();
        for meta in document.select(&TAG_META) {
            if let Some(tag) = meta.value().attr("content").map(str::trim) {
                if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                    tags.push(tag.to_string());
                }
            }
        }

        DocumentMetadata {
            author,
            publish_date,
            tags: (!tags.is_empty()).then_some(tags),
        }
    }
}

/// 将连续空白折叠为单个空格并去除首尾空白
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// 复制文档并移除脚本、样式、导航、页眉、页脚和侧栏
fn strip_noise(document: &Html) -> Html {
    let mut cleaned = document.clone();
    let noise: Vec<_> = cleaned.select(&NOISE).map(|element| element.id()).collect();
    for id in noise {
        if let Some(mut node) = cleaned.tree.get_mut(id) {
            node.detach();
        }
    }
    cleaned
}

// Text nodes are concatenated as-is; inline markup must not split words
fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|element| normalize_whitespace(&element_text(&element)))
        .filter(|text| !text.is_empty())
}

fn first_meta_content(document: &Html, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        document
            .select(selector)
            .next()
            .and_then(|meta| meta.value().attr("content"))
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .map(str::to_string)
    })
}

fn resolve_url(base: Option<&Url>, src: &str) -> Option<Url> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }
    let url = match base {
        Some(base) => base.join(src).ok()?,
        None => Url::parse(src).ok()?,
    };
    matches!(url.scheme(), "http" | "https").then_some(url)
}

/// 判断URL是否像图片：路径以已知图片扩展名结尾，或URL中包含"image"
pub fn is_image_url(url: &Url) -> bool {
    let has_extension = url
        .path()
        .rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    has_extension || url.as_str().contains("image")
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
