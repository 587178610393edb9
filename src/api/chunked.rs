//! Chunked write engine
//!
//! The API caps how many records one write call accepts and separately
//! paginates the acknowledgement. A chunked write splits the payload into
//! bounded chunks, runs a fresh paginated sequence per chunk against the same
//! URL, and concatenates the results in chunk order.

use std::future::ready;
use std::ops::Range;
use std::pin::pin;
use std::sync::Arc;

use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use reqwest::Method;
use serde_json::Value;

use super::client::ComboCurveClient;
use super::pagination::{Page, stop_after_error};
use super::query::Params;
use super::records::{Record, RecordList, to_value};

/// How a payload of `len` records is split into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkPlan {
    /// One request with no body
    Trigger,
    /// One paginated sequence per index range
    Chunks(Vec<Range<usize>>),
}

/// `None` sends everything as one chunk, `Some(0)` sends a single body-less
/// request. An empty payload with no chunk size is a trigger as well.
pub fn plan_chunks(len: usize, chunk_size: Option<usize>) -> ChunkPlan {
    let size = chunk_size.unwrap_or(len);
    if size == 0 {
        return ChunkPlan::Trigger;
    }

    let ranges = (0..len)
        .step_by(size)
        .map(|start| start..(start + size).min(len))
        .collect();
    ChunkPlan::Chunks(ranges)
}

impl ComboCurveClient {
    /// Lazily run a chunked write, yielding every acknowledgement page.
    ///
    /// Each chunk starts over at `url` with `params`; pages of one chunk are
    /// exhausted before the next chunk is serialized and sent. The first error
    /// ends the stream.
    pub fn chunked_write_pages<'a>(
        &'a self,
        method: Method,
        url: String,
        data: &'a [Record],
        chunk_size: Option<usize>,
        params: Option<Params>,
    ) -> impl Stream<Item = anyhow::Result<Page>> + use<'a> {
        let ranges = match plan_chunks(data.len(), chunk_size) {
            ChunkPlan::Trigger => vec![None],
            ChunkPlan::Chunks(ranges) => ranges.into_iter().map(Some).collect(),
        };
        let bodies = ranges
            .into_iter()
            .map(move |range| range.map(|range| to_value(&data[range])));
        self.write_pages(method, url, bodies, params)
    }

    /// Send each body as its own paginated sequence against `url`, in order.
    /// A `None` body sends a request without one. Bodies are pulled from
    /// `bodies` only when their chunk is about to be sent.
    pub fn write_pages<'a, I>(
        &'a self,
        method: Method,
        url: String,
        bodies: I,
        params: Option<Params>,
    ) -> impl Stream<Item = anyhow::Result<Page>> + 'a
    where
        I: IntoIterator<Item = Option<Value>>,
        I::IntoIter: 'a,
    {
        let context = self.logger().start_operation(&method, &url);
        let chunk_context = context.clone();

        let runs = stream::iter(bodies.into_iter().enumerate())
            .map(move |(index, body)| {
                let size = body.as_ref().and_then(Value::as_array).map_or(0, Vec::len);
                self.logger().log_chunk(&chunk_context, index, size);
                self.page_stream(
                    chunk_context.clone(),
                    method.clone(),
                    url.clone(),
                    params.clone(),
                    body.map(Arc::new),
                )
            })
            .flatten();

        self.track_operation(context, runs)
    }

    /// Records of each acknowledgement page of a chunked write, fetched lazily
    pub fn chunked_write_items_stream<'a>(
        &'a self,
        method: Method,
        url: String,
        data: &'a [Record],
        chunk_size: Option<usize>,
    ) -> impl Stream<Item = anyhow::Result<RecordList>> + use<'a> {
        let records = self
            .chunked_write_pages(method, url, data, chunk_size, None)
            .and_then(|page| ready(page.records()));
        stop_after_error(records)
    }

    /// Run a chunked write and concatenate every page's records in chunk order
    pub async fn chunked_write(
        &self,
        method: Method,
        url: &str,
        data: &[Record],
        chunk_size: Option<usize>,
    ) -> anyhow::Result<RecordList> {
        let mut pages = pin!(self.chunked_write_pages(method, url.to_string(), data, chunk_size, None));
        let mut items = Vec::new();
        while let Some(page) = pages.try_next().await? {
            items.extend(page.records()?);
        }
        Ok(items)
    }

    pub async fn post_items(&self, url: &str, data: &[Record], chunk_size: Option<usize>) -> anyhow::Result<RecordList> {
        self.chunked_write(Method::POST, url, data, chunk_size).await
    }

    pub async fn put_items(&self, url: &str, data: &[Record], chunk_size: Option<usize>) -> anyhow::Result<RecordList> {
        self.chunked_write(Method::PUT, url, data, chunk_size).await
    }

    pub async fn patch_items(&self, url: &str, data: &[Record], chunk_size: Option<usize>) -> anyhow::Result<RecordList> {
        self.chunked_write(Method::PATCH, url, data, chunk_size).await
    }

    pub async fn delete_items(&self, url: &str, data: &[Record], chunk_size: Option<usize>) -> anyhow::Result<RecordList> {
        self.chunked_write(Method::DELETE, url, data, chunk_size).await
    }

    /// Body-less DELETE against a filtered URL, returning the summed
    /// `X-Delete-Count` of every response page
    pub async fn delete_matching(&self, url: &str) -> anyhow::Result<u64> {
        let mut pages = pin!(self.chunked_write_pages(Method::DELETE, url.to_string(), &[], Some(0), None));
        let mut deleted = 0;
        while let Some(page) = pages.try_next().await? {
            deleted += page.delete_count().unwrap_or(0);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_boundaries() {
        assert_eq!(
            plan_chunks(250, Some(100)),
            ChunkPlan::Chunks(vec![0..100, 100..200, 200..250])
        );
        assert_eq!(plan_chunks(200, Some(100)), ChunkPlan::Chunks(vec![0..100, 100..200]));
        assert_eq!(plan_chunks(3, Some(10)), ChunkPlan::Chunks(vec![0..3]));
    }

    #[test]
    fn test_no_chunk_size_is_one_chunk() {
        assert_eq!(plan_chunks(250, None), ChunkPlan::Chunks(vec![0..250]));
    }

    #[test]
    fn test_zero_chunk_size_is_trigger() {
        assert_eq!(plan_chunks(250, Some(0)), ChunkPlan::Trigger);
        assert_eq!(plan_chunks(0, None), ChunkPlan::Trigger);
    }

    #[test]
    fn test_empty_payload_with_chunk_size_sends_nothing() {
        assert_eq!(plan_chunks(0, Some(100)), ChunkPlan::Chunks(Vec::new()));
    }
}
