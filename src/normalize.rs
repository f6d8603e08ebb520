//! Pure mapping from upstream articles to the reply shape.

use crate::models::{Article, INTRO, MAX_NEWS_ITEMS, NO_SUMMARY, NewsItem, Reply};

/// Map one upstream article to a [`NewsItem`].
///
/// # Arguments
///
/// * `article` - A decoded upstream article
///
/// # Returns
///
/// A [`NewsItem`] with the title verbatim, the description as summary (or
/// [`NO_SUMMARY`] when missing or empty), and the publisher name and URL when
/// present.
pub fn to_news_item(article: Article) -> NewsItem {
    let summary = article
        .description
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| NO_SUMMARY.to_string());

    NewsItem {
        title: article.title,
        summary,
        source: article.source.and_then(|s| s.name),
        url: article.url,
    }
}

/// Keep the first [`MAX_NEWS_ITEMS`] articles in upstream order and map them.
///
/// No re-sorting; an empty input yields an empty list.
pub fn select_news(articles: Vec<Article>) -> Vec<NewsItem> {
    articles
        .into_iter()
        .take(MAX_NEWS_ITEMS)
        .map(to_news_item)
        .collect()
}

/// Wrap mapped items with the fixed intro.
pub fn assemble_reply(news: Vec<NewsItem>) -> Reply {
    Reply {
        intro: INTRO.to_string(),
        news,
    }
}
