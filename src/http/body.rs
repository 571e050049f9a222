//! Streaming file body module
//!
//! Turns an open file into a lazy response body that yields bounded chunks,
//! so large files are never held in memory whole. The body owns the file
//! handle; dropping the body at any point, including mid-stream when a
//! client disconnects, closes the handle.

use futures_util::stream::try_unfold;
use futures_util::TryStreamExt;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use std::io;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Largest chunk a streamed body will yield at once.
pub const BLOCK_SIZE: usize = 32 * 1024;

/// Response body type shared by all builders: either a complete byte
/// sequence or a lazy stream of file chunks.
pub type ResponseBody = UnsyncBoxBody<Bytes, io::Error>;

/// Empty body (HEAD responses, status-only responses)
pub fn empty() -> ResponseBody {
    Full::new(Bytes::new())
        .map_err(io::Error::other)
        .boxed_unsync()
}

/// Complete in-memory body
pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into())
        .map_err(io::Error::other)
        .boxed_unsync()
}

/// Stream `span` bytes from the file's current position
///
/// Chunks are at most [`BLOCK_SIZE`] bytes. The stream ends after `span`
/// bytes, or early if the file reports end-of-file first; a source with
/// nothing left yields no chunks at all. Read failures surface as body
/// errors and abort the stream.
pub fn range_body(file: File, span: u64) -> ResponseBody {
    let chunks = try_unfold((file, span), |(mut file, remaining)| async move {
        if remaining == 0 {
            return Ok(None);
        }

        let want = usize::try_from(remaining.min(BLOCK_SIZE as u64)).unwrap_or(BLOCK_SIZE);
        let mut buf = vec![0u8; want];
        let read = file.read(&mut buf).await?;
        if read == 0 {
            // EOF before the span was covered: normal termination
            return Ok(None);
        }
        buf.truncate(read);

        Ok(Some((Bytes::from(buf), (file, remaining - read as u64))))
    });

    StreamBody::new(chunks.map_ok(Frame::data)).boxed_unsync()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    async fn open(file: &tempfile::NamedTempFile) -> File {
        File::open(file.path()).await.unwrap()
    }

    fn temp_file(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    async fn collect(body: ResponseBody) -> Vec<u8> {
        body.collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_whole_file() {
        let file = temp_file(b"hello world");
        let body = range_body(open(&file).await, 11);
        assert_eq!(collect(body).await, b"hello world");
    }

    #[tokio::test]
    async fn test_empty_file_yields_nothing() {
        let file = temp_file(b"");
        let mut body = range_body(open(&file).await, 0);
        assert!(body.frame().await.is_none());
    }

    #[tokio::test]
    async fn test_span_shorter_than_file() {
        let file = temp_file(b"abcdefghij");
        let body = range_body(open(&file).await, 4);
        assert_eq!(collect(body).await, b"abcd");
    }

    #[tokio::test]
    async fn test_span_beyond_eof_terminates() {
        // A span longer than the file ends at EOF, not with an error
        let file = temp_file(b"abc");
        let body = range_body(open(&file).await, 100);
        assert_eq!(collect(body).await, b"abc");
    }

    #[tokio::test]
    async fn test_respects_seek_position() {
        use tokio::io::AsyncSeekExt;

        let file = temp_file(b"0123456789");
        let mut fh = open(&file).await;
        fh.seek(std::io::SeekFrom::Start(7)).await.unwrap();
        assert_eq!(collect(range_body(fh, 3)).await, b"789");
    }

    #[tokio::test]
    async fn test_chunks_are_bounded() {
        let content = vec![7u8; BLOCK_SIZE * 2 + 100];
        let file = temp_file(&content);
        let mut body = range_body(open(&file).await, content.len() as u64);

        let mut frames = 0;
        let mut total = 0;
        while let Some(frame) = body.frame().await {
            let data = frame.unwrap().into_data().unwrap();
            assert!(data.len() <= BLOCK_SIZE);
            frames += 1;
            total += data.len();
        }
        assert_eq!(total, content.len());
        assert!(frames >= 3);
    }
}
