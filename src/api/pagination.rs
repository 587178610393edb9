//! Pagination engine
//!
//! A paginated sequence starts at one URL and follows the `Link: <...>;
//! rel="next"` response header until a response carries no next link. Pages
//! are requested lazily: the next request is only sent when the consumer polls
//! for the next page.

use std::future::ready;
use std::pin::pin;
use std::sync::Arc;

use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use super::client::ComboCurveClient;
use super::constants::headers;
use super::error::ApiError;
use super::logging::OperationContext;
use super::query::Params;
use super::records::{Record, RecordList, normalize};

/// One buffered HTTP response of a paginated sequence
#[derive(Debug, Clone)]
pub struct Page {
    pub method: Method,
    pub url: String,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Page {
    /// Cursor for the next page, if any
    pub fn next_page_url(&self) -> Option<String> {
        next_page_url(&self.headers)
    }

    /// Parsed body. An empty body parses as `null`.
    pub fn json(&self) -> anyhow::Result<Value> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&self.body).map_err(|source| {
            ApiError::Decode {
                method: self.method.clone(),
                url: self.url.clone(),
                source,
            }
            .into()
        })
    }

    /// Body normalized into records
    pub fn records(&self) -> anyhow::Result<RecordList> {
        normalize(self.json()?)
    }

    /// Value of the `X-Delete-Count` header, if present and numeric
    pub fn delete_count(&self) -> Option<u64> {
        self.headers
            .get(headers::X_DELETE_COUNT)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok())
    }

    /// Raw elements of an array body, for endpoints that return scalars
    pub fn values(&self) -> anyhow::Result<Vec<Value>> {
        Ok(match self.json()? {
            Value::Array(values) => values,
            Value::Null => Vec::new(),
            other => vec![other],
        })
    }
}

/// Extract the `rel="next"` target from the response's `Link` headers
pub fn next_page_url(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(headers::LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(parse_next_link)
}

fn parse_next_link(value: &str) -> Option<String> {
    let mut rest = value;
    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let end = after.find('>')?;
        let target = after[..end].trim();
        let tail = &after[end + 1..];
        let params_end = tail.find('<').unwrap_or(tail.len());

        if tail[..params_end].split(';').any(is_rel_next) && !target.is_empty() {
            return Some(target.to_string());
        }
        rest = &tail[params_end..];
    }
    None
}

fn is_rel_next(param: &str) -> bool {
    let Some((name, value)) = param.split_once('=') else {
        return false;
    };
    let value = value.trim().trim_end_matches(',').trim().trim_matches('"');
    name.trim().eq_ignore_ascii_case("rel")
        && value.split_whitespace().any(|rel| rel.eq_ignore_ascii_case("next"))
}

enum PageState {
    Next { url: String, params: Option<Params>, page: usize },
    Done,
}

/// End a stream right after its first error.
///
/// The failure flag is checked before the inner stream is polled again, so
/// nothing past the error is requested.
pub(crate) fn stop_after_error<S, T>(stream: S) -> impl Stream<Item = anyhow::Result<T>>
where
    S: Stream<Item = anyhow::Result<T>>,
{
    stream::unfold(Some(Box::pin(stream)), |state| async move {
        let mut inner = state?;
        let item = inner.next().await?;
        let rest = if item.is_ok() { Some(inner) } else { None };
        Some((item, rest))
    })
}

impl ComboCurveClient {
    /// Lazily fetch every page of `url`.
    ///
    /// `params` (usually the page-size hint) go on the first request only; the
    /// next-page cursor already encodes the continuation state. The stream ends
    /// when a response has no next link or right after the first error.
    pub fn paginate(
        &self,
        method: Method,
        url: String,
        params: Option<Params>,
    ) -> impl Stream<Item = anyhow::Result<Page>> + '_ {
        let context = self.logger().start_operation(&method, &url);
        let pages = self.page_stream(context.clone(), method, url, params, None);
        self.track_operation(context, pages)
    }

    /// Pass pages through until the first error or the end of `pages`, then
    /// log completion of the operation once with its total page count
    pub(crate) fn track_operation<'a, S>(
        &'a self,
        context: OperationContext,
        pages: S,
    ) -> impl Stream<Item = anyhow::Result<Page>> + 'a
    where
        S: Stream<Item = anyhow::Result<Page>> + 'a,
    {
        stream::unfold(Some((Box::pin(pages), 0usize)), move |state| {
            let context = context.clone();
            async move {
                let (mut pages, count) = state?;
                match pages.next().await {
                    Some(Ok(page)) => Some((Ok(page), Some((pages, count + 1)))),
                    Some(Err(e)) => {
                        self.logger().complete_operation(&context, count, Some(&e.to_string()));
                        Some((Err(e), None))
                    }
                    None => {
                        self.logger().complete_operation(&context, count, None);
                        None
                    }
                }
            }
        })
    }

    pub(crate) fn page_stream(
        &self,
        context: OperationContext,
        method: Method,
        url: String,
        params: Option<Params>,
        body: Option<Arc<Value>>,
    ) -> impl Stream<Item = anyhow::Result<Page>> + '_ {
        let state = PageState::Next { url, params, page: 0 };

        stream::try_unfold(state, move |state| {
            let context = context.clone();
            let method = method.clone();
            let body = body.clone();
            async move {
                let PageState::Next { url, params, page } = state else {
                    return Ok(None);
                };

                let response = self
                    .send_request(&context, &method, &url, params.as_ref(), body.as_deref(), page)
                    .await?;

                let next = match response.next_page_url() {
                    Some(next_url) => PageState::Next {
                        url: next_url,
                        params: None,
                        page: page + 1,
                    },
                    None => PageState::Done,
                };

                Ok(Some((response, next)))
            }
        })
    }

    /// Every page of a GET, buffered
    pub async fn get_pages(&self, url: &str, params: Option<Params>) -> anyhow::Result<Vec<Page>> {
        self.paginate(Method::GET, url.to_string(), params).try_collect().await
    }

    /// Records of each page of a GET, one list per page, fetched lazily
    pub fn get_items_stream(
        &self,
        url: String,
        params: Option<Params>,
    ) -> impl Stream<Item = anyhow::Result<RecordList>> + '_ {
        let records = self
            .paginate(Method::GET, url, params)
            .and_then(|page| ready(page.records()));
        stop_after_error(records)
    }

    /// All records of a GET across every page, in page order
    pub async fn get_items(&self, url: &str, params: Option<Params>) -> anyhow::Result<RecordList> {
        let mut pages = pin!(self.paginate(Method::GET, url.to_string(), params));
        let mut items = Vec::new();
        while let Some(page) = pages.try_next().await? {
            items.extend(page.records()?);
        }
        Ok(items)
    }

    /// First record of a GET; an empty result is [`ApiError::NotFound`]
    pub async fn get_item(&self, url: &str, params: Option<Params>) -> anyhow::Result<Record> {
        self.get_items(url, params)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound { url: url.to_string() }.into())
    }

    /// All raw JSON elements of a GET across every page
    pub async fn get_values(&self, url: &str, params: Option<Params>) -> anyhow::Result<Vec<Value>> {
        let mut pages = pin!(self.paginate(Method::GET, url.to_string(), params));
        let mut values = Vec::new();
        while let Some(page) = pages.try_next().await? {
            values.extend(page.values()?);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers_with_link(link: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("link", HeaderValue::from_str(link).unwrap());
        headers
    }

    #[test]
    fn test_next_link_extraction() {
        let headers = headers_with_link(
            r#"<https://api.combocurve.com/v1/wells?skip=200&take=200>;rel="next""#,
        );
        assert_eq!(
            next_page_url(&headers),
            Some("https://api.combocurve.com/v1/wells?skip=200&take=200".to_string())
        );
    }

    #[test]
    fn test_next_link_among_other_relations() {
        let headers = headers_with_link(
            r#"<https://x.test/a?skip=0>; rel="prev", <https://x.test/a?skip=400>; rel="next", <https://x.test/a?skip=800>; rel="last""#,
        );
        assert_eq!(next_page_url(&headers), Some("https://x.test/a?skip=400".to_string()));
    }

    #[test]
    fn test_no_next_link() {
        assert_eq!(next_page_url(&HeaderMap::new()), None);

        let headers = headers_with_link(r#"<https://x.test/a?skip=0>; rel="prev""#);
        assert_eq!(next_page_url(&headers), None);
    }

    #[test]
    fn test_unquoted_and_multi_valued_rel() {
        let headers = headers_with_link("<https://x.test/b>; rel=next");
        assert_eq!(next_page_url(&headers), Some("https://x.test/b".to_string()));

        let headers = headers_with_link(r#"<https://x.test/c>; rel="last next""#);
        assert_eq!(next_page_url(&headers), Some("https://x.test/c".to_string()));
    }

    fn page(body: &str) -> Page {
        Page {
            method: Method::GET,
            url: "https://x.test/items".to_string(),
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_page_body_helpers() {
        assert_eq!(page("").records().unwrap().len(), 0);
        assert_eq!(page(r#"{"id":"1"}"#).records().unwrap().len(), 1);
        assert_eq!(page(r#"["a","b"]"#).values().unwrap().len(), 2);
    }

    #[test]
    fn test_delete_count_header() {
        let mut deleted = page("");
        assert_eq!(deleted.delete_count(), None);

        deleted.headers.insert("x-delete-count", HeaderValue::from_static("7"));
        assert_eq!(deleted.delete_count(), Some(7));
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let err = page("{not json").records().unwrap_err();
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::Decode { method, url, .. }) => {
                assert_eq!(method, &Method::GET);
                assert_eq!(url, "https://x.test/items");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
