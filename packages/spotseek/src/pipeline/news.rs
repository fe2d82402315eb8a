//! Article extraction for the news enrichment stage.

use tracing::warn;

use crate::traits::searcher::SearchHit;
use crate::types::news::NewsArticle;

/// Number of web-search hits requested per place.
pub const NEWS_RESULT_LIMIT: usize = 10;

/// Search text used to find news coverage for a place.
pub fn news_query(place_name: &str) -> String {
    format!("{place_name} ニュース")
}

/// Convert web-search hits into news articles.
///
/// Within each hit, the first metadata block carrying a title ends the
/// scan for that hit: at most one article per hit. A titled block that
/// fails validation is dropped with a warning, and later blocks in the
/// same hit are still not considered.
pub fn articles_from_hits(hits: &[SearchHit]) -> Vec<NewsArticle> {
    let mut articles = Vec::new();

    for hit in hits {
        for meta in &hit.metatags {
            if meta.get("og:title").is_none() {
                continue;
            }

            match serde_json::from_value::<NewsArticle>(meta.clone()) {
                Ok(article) => articles.push(article),
                Err(e) => {
                    warn!(error = %e, link = ?hit.link, "dropping malformed article metadata");
                }
            }
            break;
        }
    }

    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn titled(title: &str) -> serde_json::Value {
        json!({ "og:title": title, "og:site_name": "ニュースサイト" })
    }

    #[test]
    fn test_first_titled_block_wins() {
        let hit = SearchHit::new()
            .with_metatags(titled("最初の記事"))
            .with_metatags(titled("二番目の記事"));

        let articles = articles_from_hits(&[hit]);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "最初の記事");
    }

    #[test]
    fn test_untitled_blocks_are_skipped() {
        let hit = SearchHit::new()
            .with_metatags(json!({ "og:description": "タイトルなし" }))
            .with_metatags(titled("本命の記事"));

        let articles = articles_from_hits(&[hit]);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "本命の記事");
    }

    #[test]
    fn test_malformed_titled_block_ends_the_scan() {
        // Title present but unparseable pubdate: the block is dropped and
        // the later well-formed block is never reached.
        let hit = SearchHit::new()
            .with_metatags(json!({ "og:title": "壊れた記事", "pubdate": "昨日" }))
            .with_metatags(titled("正常な記事"));

        let articles = articles_from_hits(&[hit]);
        assert!(articles.is_empty());
    }

    #[test]
    fn test_hit_without_titles_yields_nothing() {
        let hit = SearchHit::new().with_metatags(json!({ "og:image": "x.png" }));
        assert!(articles_from_hits(&[hit]).is_empty());
    }

    #[test]
    fn test_articles_keep_hit_order() {
        let hits = vec![
            SearchHit::new().with_metatags(titled("一件目")),
            SearchHit::new(),
            SearchHit::new().with_metatags(titled("二件目")),
        ];

        let titles: Vec<_> = articles_from_hits(&hits)
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["一件目", "二件目"]);
    }
}
