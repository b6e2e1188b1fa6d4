// Chunked JSON streaming utilities
use crate::infrastructure::http_response::brotli_compress;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;
use serde::Serialize;

/// Create a chunked streaming response, one length-prefixed frame per item.
pub fn chunked_json_stream<S, T>(stream: S, compress: bool) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = T> + Send + 'static,
    T: Serialize + Send + Sync + 'static,
{
    let byte_stream = stream.then(move |item| async move { encode_frame(&item, compress).await });

    // No Content-Encoding header: frames are compressed individually, not the
    // HTTP body, so clients must not try to decompress the stream as a whole.
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndframe+json")
        .header(header::TRANSFER_ENCODING, "chunked")
        .body(Body::from_stream(byte_stream))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize one item to a frame: 4-byte big-endian length, then the
/// (optionally Brotli-compressed) JSON payload.
pub async fn encode_frame<T: Serialize>(item: &T, compress: bool) -> Result<Bytes, std::io::Error> {
    let json = serde_json::to_vec(item).map_err(std::io::Error::other)?;

    let payload = if compress {
        brotli_compress(json).await?
    } else {
        json
    };

    let length = u32::try_from(payload.len()).map_err(std::io::Error::other)?;
    let mut frame = BytesMut::with_capacity(4 + payload.len());
    frame.put_u32(length);
    frame.put_slice(&payload);

    Ok(frame.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_frame_layout() {
        let frame = encode_frame(&serde_json::json!({"revision": 3}), false).await.unwrap();
        let payload = br#"{"revision":3}"#;

        assert_eq!(&frame[..4], &(payload.len() as u32).to_be_bytes());
        assert_eq!(&frame[4..], payload);
    }

    #[tokio::test]
    async fn test_compressed_frame_length_matches_payload() {
        let item = serde_json::json!({"title": "Payment batch processed ".repeat(20)});
        let frame = encode_frame(&item, true).await.unwrap();

        let declared = u32::from_be_bytes([frame[0], frame[1], frame[2], frame[3]]) as usize;
        assert_eq!(declared, frame.len() - 4);
        assert!(declared < serde_json::to_vec(&item).unwrap().len());
    }
}
