// src/integrations/filmix/parser.rs
//
// Parser for the Filmix search listing.
//
// The listing is an HTML fragment of repeated blocks:
//
//   <article class="shortstory line" data-id="12345">
//     ...
//     <h2 class="name" itemprop="name"><a href="...">Title</a></h2>
//     ...
//   </article>
//
// Blocks without an id or a title heading are skipped.

use regex::Regex;

/// One search hit from the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub id: String,
    pub title: String,
}

/// Compiled patterns for the listing markup
pub struct ListingParser {
    article: Regex,
    class_attr: Regex,
    data_id: Regex,
    title_heading: Regex,
    tag: Regex,
}

impl Default for ListingParser {
    fn default() -> Self {
        Self {
            // <article ...attrs...> body </article>
            article: Regex::new(r"(?is)<article\b([^>]*)>(.*?)</article>")
                .expect("article regex should compile"),
            class_attr: Regex::new(r#"(?i)\bclass\s*=\s*["']([^"']*)["']"#)
                .expect("class regex should compile"),
            data_id: Regex::new(r#"(?i)\bdata-id\s*=\s*["']([^"']*)["']"#)
                .expect("data-id regex should compile"),
            // <h2 class="name ..."> title </h2>
            title_heading: Regex::new(
                r#"(?is)<h2\b[^>]*\bclass\s*=\s*["'](?:[^"']*\s)?name(?:\s[^"']*)?["'][^>]*>(.*?)</h2>"#,
            )
            .expect("title regex should compile"),
            tag: Regex::new(r"<[^>]+>").expect("tag regex should compile"),
        }
    }
}

impl ListingParser {
    /// Extract entries in document order
    pub fn parse(&self, html: &str) -> Vec<ListingEntry> {
        self.article
            .captures_iter(html)
            .filter_map(|caps| {
                let attrs = caps.get(1)?.as_str();
                let body = caps.get(2)?.as_str();

                if !self.is_listing_article(attrs) {
                    return None;
                }

                let id = self
                    .data_id
                    .captures(attrs)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().trim().to_string())
                    .filter(|id| !id.is_empty())?;

                let raw_title = self.title_heading.captures(body)?.get(1)?.as_str();
                let title = decode_entities(self.tag.replace_all(raw_title, "").trim());
                if title.is_empty() {
                    return None;
                }

                Some(ListingEntry { id, title })
            })
            .collect()
    }

    fn is_listing_article(&self, attrs: &str) -> bool {
        self.class_attr
            .captures(attrs)
            .and_then(|c| c.get(1))
            .is_some_and(|classes| {
                let classes: Vec<&str> = classes.as_str().split_whitespace().collect();
                classes.contains(&"shortstory") && classes.contains(&"line")
            })
    }
}

/// Decode the handful of entities the listing uses in titles
fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <div class="clr"></div>
        <article class="shortstory line" data-id="1001">
            <div class="short"><a href="/film/1001"><img src="/p.jpg"></a></div>
            <h2 class="name" itemprop="name"><a href="https://filmix.date/film/1001">Интерстеллар</a></h2>
        </article>
        <article class="shortstory line" data-id="">
            <h2 class="name">No id here</h2>
        </article>
        <article class="shortstory line" data-id="1002">
            <div>Missing heading</div>
        </article>
        <article class="promo" data-id="9999">
            <h2 class="name">Advertising block</h2>
        </article>
        <ARTICLE class="line shortstory" data-id="1003">
            <h2 class="name" >Tom &amp; Jerry</h2>
        </ARTICLE>
    "#;

    #[test]
    fn test_parse_listing_entries_in_order() {
        let entries = ListingParser::default().parse(LISTING);
        assert_eq!(
            entries,
            vec![
                ListingEntry {
                    id: "1001".to_string(),
                    title: "Интерстеллар".to_string(),
                },
                ListingEntry {
                    id: "1003".to_string(),
                    title: "Tom & Jerry".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_empty_listing() {
        assert!(ListingParser::default().parse("").is_empty());
        assert!(ListingParser::default()
            .parse("<div>Ничего не найдено</div>")
            .is_empty());
    }

    #[test]
    fn test_heading_with_other_class_ignored() {
        let html = r#"<article class="shortstory line" data-id="5">
            <h2 class="origin-name">Original</h2>
        </article>"#;
        assert!(ListingParser::default().parse(html).is_empty());
    }
}
