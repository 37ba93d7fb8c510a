use crate::error::{MenuError, Result};
use reqwest::Client;
use tracing::{info, warn};

pub fn build_client(accept_invalid_certs: bool) -> anyhow::Result<Client> {
    let client = Client::builder()
        // Avoid macOS system proxy lookup that can panic in sandboxed contexts.
        .no_proxy()
        .user_agent("pangyo-menu-api/0.1")
        // The cafeteria site has served broken certificate chains before.
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()?;
    Ok(client)
}

pub async fn download_pdf(client: &Client, url: &str) -> Result<Vec<u8>> {
    info!(%url, "downloading PDF");
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(MenuError::DownloadStatus(status.as_u16()));
    }
    Ok(response.bytes().await?.to_vec())
}

/// Text of the first page only.
pub fn extract_first_page(bytes: &[u8]) -> Result<String> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|err| MenuError::Extract(err.to_string()))?;
    first_page(pages)
}

fn first_page(pages: Vec<String>) -> Result<String> {
    let first = pages.into_iter().next().ok_or(MenuError::NoPages)?;
    if first.trim().is_empty() {
        warn!("first page has no extractable text");
        return Err(MenuError::NoText);
    }
    Ok(first)
}

pub async fn download_and_extract_text(client: &Client, url: &str) -> Result<String> {
    let bytes = download_pdf(client, url).await?;
    let text = tokio::task::spawn_blocking(move || extract_first_page(&bytes)).await??;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_pdf_bytes_fail_extraction() {
        let err = extract_first_page(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, MenuError::Extract(_)));
    }

    #[test]
    fn zero_pages_is_an_error() {
        assert!(matches!(first_page(Vec::new()), Err(MenuError::NoPages)));
    }

    #[test]
    fn blank_first_page_is_an_error() {
        let pages = vec![" \n\t\n".to_string(), "6월 3일(월)".to_string()];
        assert!(matches!(first_page(pages), Err(MenuError::NoText)));
    }

    #[test]
    fn only_the_first_page_is_kept() {
        let pages = vec!["주간메뉴\na b c d e".to_string(), "second".to_string()];
        assert_eq!(first_page(pages).unwrap(), "주간메뉴\na b c d e");
    }

    #[tokio::test]
    async fn malformed_url_is_a_request_error() {
        let client = build_client(false).unwrap();
        let err = download_pdf(&client, "not a url").await.unwrap_err();
        assert!(matches!(err, MenuError::Request(_)));
    }
}
