use std::time::Duration;

use dom_query::{Document, Selection};
use lexicard_dictionary::{DictionaryFetcher, DictionaryMetadata, FetchError};
use lexicard_types::{CambridgeEntry, CambridgeMeaning};
use reqwest::{Client, StatusCode, Url};

/// Cambridge English-Chinese (Traditional) dictionary scraper
pub struct CambridgeDictionary {
    client: Client,
    base_url: String,
}

impl CambridgeDictionary {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Entry page for `word`; multi-word entries use hyphens
    pub fn entry_url(&self, word: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", self.base_url)))?;

        let slug = word.split_whitespace().collect::<Vec<_>>().join("-");
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(&slug);

        Ok(url)
    }
}

#[async_trait::async_trait]
impl DictionaryFetcher for CambridgeDictionary {
    async fn fetch(&self, word: &str) -> Result<Option<CambridgeEntry>, FetchError> {
        let url = self.entry_url(word)?;
        tracing::debug!("Fetching {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::info!("Word not found: {}", word);
            return Ok(None);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let html = response.text().await?;
        Ok(parse_entry(&html, url.as_str()))
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: "Cambridge".to_string(),
            language: "en-zh-Hant".to_string(),
        }
    }
}

/// Extract meanings from an entry page.
///
/// Only the first entry body is read. A meaning needs an English
/// definition and at least one example; the first translation found in
/// its body is put in front of the definition. Returns `None` when no
/// meaning qualifies.
pub fn parse_entry(html: &str, url: &str) -> Option<CambridgeEntry> {
    let document = Document::from(html);

    let body = document.select(".di-body").first();
    let blocks = if body.exists() {
        body.select(".def-block")
    } else {
        document.select(".def-block")
    };

    let meanings: Vec<CambridgeMeaning> = blocks.iter().filter_map(|b| parse_meaning(&b)).collect();
    if meanings.is_empty() {
        return None;
    }

    Some(CambridgeEntry {
        meanings,
        url: url.to_string(),
    })
}

fn parse_meaning(block: &Selection) -> Option<CambridgeMeaning> {
    let definition = clean_text(&block.select(".ddef_h .ddef_d").first())?;

    let body = block.select(".def-body").first();
    if !body.exists() {
        return None;
    }

    let examples: Vec<String> = body
        .select(".examp")
        .iter()
        .filter_map(|examp| clean_text(&examp.select(".eg").first()))
        .collect();
    if examples.is_empty() {
        return None;
    }

    let definition = match clean_text(&body.select(".trans").first()) {
        Some(translation) => format!("{translation} ({definition})"),
        None => definition,
    };

    Some(CambridgeMeaning {
        definition,
        examples,
    })
}

fn clean_text(selection: &Selection) -> Option<String> {
    if !selection.exists() {
        return None;
    }
    let text = selection.text().split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const ENTRY_HTML: &str = r#"
<html><body>
<div class="entry">
  <div class="di-body">
    <div class="def-block ddef_block">
      <div class="ddef_h"><div class="def ddef_d db">to move along quickly on foot</div></div>
      <div class="def-body ddef_b">
        <span class="trans dtrans">跑，奔跑</span>
        <div class="examp dexamp"><span class="eg deg">He <b>runs</b> every morning.</span><span class="trans">他每天早上跑步。</span></div>
        <div class="examp dexamp"><span class="eg deg">I ran to the shop.</span></div>
      </div>
    </div>
    <div class="def-block ddef_block">
      <div class="ddef_h"><div class="def ddef_d db">to be in charge of</div></div>
      <div class="def-body ddef_b">
        <span class="trans dtrans">經營</span>
      </div>
    </div>
    <div class="def-block ddef_block">
      <div class="ddef_h"><div class="def ddef_d db">to operate</div></div>
      <div class="def-body ddef_b">
        <div class="examp dexamp"><span class="eg deg">The engine runs on diesel.</span></div>
      </div>
    </div>
  </div>
  <div class="di-body">
    <div class="def-block ddef_block">
      <div class="ddef_h"><div class="def ddef_d db">second entry</div></div>
      <div class="def-body ddef_b"><div class="examp"><span class="eg">Ignored.</span></div></div>
    </div>
  </div>
</div>
</body></html>"#;

    #[test]
    fn test_parse_entry() {
        let entry = parse_entry(ENTRY_HTML, "https://dict.test/run").unwrap();

        assert_eq!(entry.url, "https://dict.test/run");
        assert_eq!(entry.meanings.len(), 2);
        assert_eq!(
            entry.meanings[0].definition,
            "跑，奔跑 (to move along quickly on foot)"
        );
        assert_eq!(
            entry.meanings[0].examples,
            vec!["He runs every morning.", "I ran to the shop."]
        );
        // no translation: bare definition
        assert_eq!(entry.meanings[1].definition, "to operate");
    }

    #[test]
    fn test_parse_without_entry_body() {
        let html = r#"<div class="def-block">
            <div class="ddef_h"><span class="ddef_d">a small animal</span></div>
            <div class="def-body"><div class="examp"><span class="eg">A cat  sat.</span></div></div>
        </div>"#;

        let entry = parse_entry(html, "u").unwrap();
        assert_eq!(entry.meanings[0].examples, vec!["A cat sat."]);
    }

    #[test]
    fn test_parse_page_without_meanings() {
        assert!(parse_entry("<html><body><p>Nothing here</p></body></html>", "u").is_none());
    }

    #[test]
    fn test_entry_url() {
        let dict =
            CambridgeDictionary::new("https://dict.test/dictionary/", "test", Duration::from_secs(1))
                .unwrap();

        assert_eq!(
            dict.entry_url("run").unwrap().as_str(),
            "https://dict.test/dictionary/run"
        );
        assert_eq!(
            dict.entry_url(" ice cream ").unwrap().as_str(),
            "https://dict.test/dictionary/ice-cream"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let dict = CambridgeDictionary::new("not a url", "test", Duration::from_secs(1)).unwrap();
        assert!(matches!(dict.entry_url("run"), Err(FetchError::InvalidUrl(_))));
    }

    async fn dictionary_for(server: &MockServer) -> CambridgeDictionary {
        let base = format!("{}/dictionary/english-chinese-traditional", server.uri());
        CambridgeDictionary::new(&base, "test", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dictionary/english-chinese-traditional/run"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ENTRY_HTML))
            .mount(&server)
            .await;

        let entry = dictionary_for(&server).await.fetch("run").await.unwrap().unwrap();

        assert_eq!(entry.meanings.len(), 2);
        assert!(entry.url.ends_with("/english-chinese-traditional/run"));
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = dictionary_for(&server).await.fetch("qwzx").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_fetch_error_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dictionary/english-chinese-traditional/busy"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dictionary/english-chinese-traditional/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dict = dictionary_for(&server).await;

        assert!(matches!(dict.fetch("busy").await, Err(FetchError::RateLimited)));
        assert!(matches!(dict.fetch("broken").await, Err(FetchError::Status(500))));
    }
}
