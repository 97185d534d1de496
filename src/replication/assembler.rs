//! History Batch Assembly
//!
//! A remote page carries one version history and N raw blobs. Each blob
//! becomes one `HistoryBatch`; all of them share the page's version history.

use std::sync::Arc;

use super::types::{DataBlob, HistoryBatch, VersionHistory};

/// Pair every blob of a page with the page's version history.
///
/// Blob order is preserved. No blobs yields no batches.
pub fn assemble_batches(blobs: Vec<DataBlob>, version_history: VersionHistory) -> Vec<HistoryBatch> {
    let version_history = Arc::new(version_history);
    blobs
        .into_iter()
        .map(|raw_event_batch| HistoryBatch {
            version_history: Arc::clone(&version_history),
            raw_event_batch,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replication::types::{EncodingType, VersionHistoryItem};

    fn blob(data: &'static [u8]) -> DataBlob {
        DataBlob::new(EncodingType::Proto3, data)
    }

    fn history() -> VersionHistory {
        VersionHistory::new(&b"branch-a"[..], vec![VersionHistoryItem { event_id: 10, version: 1 }])
    }

    #[test]
    fn test_one_batch_per_blob_in_order() {
        let batches = assemble_batches(vec![blob(b"a"), blob(b"b"), blob(b"c")], history());

        let data: Vec<&[u8]> = batches.iter().map(|b| b.raw_event_batch.data.as_ref()).collect();
        assert_eq!(data, vec![&b"a"[..], &b"b"[..], &b"c"[..]]);
    }

    #[test]
    fn test_batches_share_version_history() {
        let batches = assemble_batches(vec![blob(b"a"), blob(b"b")], history());

        assert!(Arc::ptr_eq(&batches[0].version_history, &batches[1].version_history));
        assert_eq!(*batches[0].version_history, history());
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        assert!(assemble_batches(Vec::new(), history()).is_empty());
    }
}
