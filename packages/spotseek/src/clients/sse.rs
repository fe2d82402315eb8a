//! SSE parser for streamed model output.
//!
//! Converts a raw `reqwest` byte stream of `streamGenerateContent`
//! events into plain text fragments. Handles partial lines and
//! buffering; the stream ends when the connection closes.

use bytes::Bytes;
use futures::stream::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::{Result, SeekError};

/// Raw streaming event from the generation API.
#[derive(Debug, serde::Deserialize)]
struct StreamEventRaw {
    #[serde(default)]
    candidates: Vec<StreamCandidateRaw>,
}

#[derive(Debug, serde::Deserialize)]
struct StreamCandidateRaw {
    #[serde(default)]
    content: Option<StreamContentRaw>,
}

#[derive(Debug, serde::Deserialize)]
struct StreamContentRaw {
    #[serde(default)]
    parts: Vec<StreamPartRaw>,
}

#[derive(Debug, serde::Deserialize)]
struct StreamPartRaw {
    #[serde(default)]
    text: Option<String>,
}

/// Stream adapter that converts raw SSE bytes into text fragments.
///
/// Events without any text (e.g. a bare finish reason) come through as
/// empty strings; callers filter those out.
pub struct GeneratedTextStream {
    inner: Pin<Box<dyn Stream<Item = std::result::Result<Bytes, reqwest::Error>> + Send>>,
    buffer: String,
}

impl GeneratedTextStream {
    pub(crate) fn new(
        byte_stream: impl Stream<Item = std::result::Result<Bytes, reqwest::Error>> + Send + 'static,
    ) -> Self {
        Self {
            inner: Box::pin(byte_stream),
            buffer: String::new(),
        }
    }
}

impl Stream for GeneratedTextStream {
    type Item = Result<String>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            // Drain any complete line already buffered
            if let Some(fragment) = try_parse_line(&mut this.buffer) {
                return Poll::Ready(Some(fragment));
            }

            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    match std::str::from_utf8(&bytes) {
                        Ok(text) => this.buffer.push_str(text),
                        Err(e) => {
                            return Poll::Ready(Some(Err(SeekError::Generation(
                                format!("invalid UTF-8 in stream: {e}").into(),
                            ))));
                        }
                    }
                    // Retry the parse with the fresh bytes
                }
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Some(Err(SeekError::Http(Box::new(e)))));
                }
                Poll::Ready(None) => {
                    // Connection closed; whatever is buffered is all there is
                    if this.buffer.trim().is_empty() {
                        return Poll::Ready(None);
                    }
                    if let Some(fragment) = try_parse_line(&mut this.buffer) {
                        return Poll::Ready(Some(fragment));
                    }
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Extract and parse the next complete `data:` line, if one is buffered.
fn try_parse_line(buffer: &mut String) -> Option<Result<String>> {
    loop {
        let newline_pos = buffer.find('\n')?;
        let line = buffer[..newline_pos].trim().to_string();
        buffer.drain(..=newline_pos);

        // Blank lines are event separators; other non-data fields
        // ("event:", "id:", "retry:") carry nothing we use.
        if line.is_empty() {
            continue;
        }

        if let Some(data) = line.strip_prefix("data: ") {
            let data = data.trim();

            match serde_json::from_str::<StreamEventRaw>(data) {
                Ok(raw) => {
                    let fragment = raw
                        .candidates
                        .into_iter()
                        .next()
                        .and_then(|c| c.content)
                        .map(|content| {
                            content
                                .parts
                                .into_iter()
                                .filter_map(|p| p.text)
                                .collect::<String>()
                        })
                        .unwrap_or_default();

                    return Some(Ok(fragment));
                }
                Err(e) => {
                    let snippet: String = data.chars().take(200).collect();
                    return Some(Err(SeekError::Generation(
                        format!("failed to parse stream event: {e} (data: {snippet})").into(),
                    )));
                }
            }
        }
    }
}
