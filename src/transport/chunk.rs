// GELF UDP chunking
//
// A payload that does not fit one datagram is split into at most 128 chunks.
// Each chunk is laid out as:
//
//   0x1e 0x0f | message id (8 bytes) | sequence number | sequence count | data
//
// The collector reassembles chunks sharing a message id.

use crate::error::TransportError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Payload bytes per datagram on a local network.
pub const CHUNK_SIZE_LAN: usize = 8154;

/// Payload bytes per datagram when the path MTU is unknown.
pub const CHUNK_SIZE_WAN: usize = 1420;

pub const MAX_CHUNKS: usize = 128;

pub const MAGIC: [u8; 2] = [0x1e, 0x0f];

pub const HEADER_LEN: usize = 12;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Id shared by all chunks of one message. Unique per process and send.
pub fn message_id() -> [u8; 8] {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let pid = u64::from(std::process::id());
    (nanos ^ seq.rotate_left(40) ^ (pid << 16)).to_be_bytes()
}

/// Split `payload` into datagrams. A payload that fits is returned as is,
/// without a chunk header.
pub fn split(
    payload: &[u8],
    chunk_size: usize,
    id: [u8; 8],
) -> Result<Vec<Vec<u8>>, TransportError> {
    let chunk_size = chunk_size.max(1);
    if payload.len() <= chunk_size {
        return Ok(vec![payload.to_vec()]);
    }

    let count = payload.len().div_ceil(chunk_size);
    if count > MAX_CHUNKS {
        return Err(TransportError::TooManyChunks {
            count,
            max: MAX_CHUNKS,
        });
    }

    Ok(payload
        .chunks(chunk_size)
        .enumerate()
        .map(|(seq, data)| {
            let mut datagram = Vec::with_capacity(HEADER_LEN + data.len());
            datagram.extend_from_slice(&MAGIC);
            datagram.extend_from_slice(&id);
            datagram.push(seq as u8);
            datagram.push(count as u8);
            datagram.extend_from_slice(data);
            datagram
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

    #[test]
    fn test_small_payload_is_not_chunked() {
        let datagrams = split(b"{\"short_message\":\"hi\"}", 64, ID).unwrap();
        assert_eq!(datagrams.len(), 1);
        assert_eq!(datagrams[0], b"{\"short_message\":\"hi\"}");
    }

    #[test]
    fn test_payload_at_limit_is_not_chunked() {
        let payload = vec![7u8; 100];
        let datagrams = split(&payload, 100, ID).unwrap();
        assert_eq!(datagrams.len(), 1);
    }

    #[test]
    fn test_chunk_headers() {
        let payload: Vec<u8> = (0..250u8).collect();
        let datagrams = split(&payload, 100, ID).unwrap();
        assert_eq!(datagrams.len(), 3);

        for (i, datagram) in datagrams.iter().enumerate() {
            assert_eq!(&datagram[0..2], &MAGIC);
            assert_eq!(&datagram[2..10], &ID);
            assert_eq!(datagram[10], i as u8);
            assert_eq!(datagram[11], 3);
        }
        assert_eq!(datagrams[0].len(), HEADER_LEN + 100);
        assert_eq!(datagrams[2].len(), HEADER_LEN + 50);

        let joined: Vec<u8> = datagrams
            .iter()
            .flat_map(|d| d[HEADER_LEN..].iter().copied())
            .collect();
        assert_eq!(joined, payload);
    }

    #[test]
    fn test_too_many_chunks() {
        let payload = vec![0u8; 10 * (MAX_CHUNKS + 1)];
        match split(&payload, 10, ID) {
            Err(TransportError::TooManyChunks { count, max }) => {
                assert_eq!(count, MAX_CHUNKS + 1);
                assert_eq!(max, MAX_CHUNKS);
            }
            other => panic!("expected TooManyChunks, got {:?}", other.map(|d| d.len())),
        }
    }

    #[test]
    fn test_max_chunks_is_allowed() {
        let payload = vec![0u8; 10 * MAX_CHUNKS];
        let datagrams = split(&payload, 10, ID).unwrap();
        assert_eq!(datagrams.len(), MAX_CHUNKS);
        assert_eq!(datagrams[MAX_CHUNKS - 1][11], MAX_CHUNKS as u8);
    }

    #[test]
    fn test_message_ids_differ() {
        assert_ne!(message_id(), message_id());
    }
}
