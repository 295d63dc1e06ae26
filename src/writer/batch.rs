use crate::core::error::{Error, ErrorKind};
use crate::core::server::SearchServer;
use crate::core::types::{DocId, NewDocument};

/// Outcome of a batch ingestion
#[derive(Debug, Default)]
pub struct IngestReport {
    pub added: Vec<DocId>,
    pub failed: Vec<(DocId, Error)>,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Batch writer for bulk ingestion.
///
/// Buffers documents and adds them on `flush`. A rejected document is
/// reported and skipped; the rest of the batch still goes in.
pub struct BatchIngest<'a> {
    pub server: &'a mut SearchServer,
    pub buffer: Vec<NewDocument>,
    pub batch_size: usize,
    report: IngestReport,
}

impl<'a> BatchIngest<'a> {
    pub fn new(server: &'a mut SearchServer, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        BatchIngest {
            server,
            buffer: Vec::with_capacity(batch_size),
            batch_size,
            report: IngestReport::default(),
        }
    }

    pub fn add(&mut self, doc: NewDocument) {
        self.buffer.push(doc);

        if self.buffer.len() >= self.batch_size {
            self.flush();
        }
    }

    pub fn flush(&mut self) {
        for doc in self.buffer.drain(..) {
            match self.server.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
                Ok(()) => self.report.added.push(doc.id),
                Err(err) if matches!(err.kind, ErrorKind::InvalidDocument | ErrorKind::InvalidWord) => {
                    tracing::warn!(doc_id = doc.id.0, error = %err, "document rejected");
                    self.report.failed.push((doc.id, err));
                }
                Err(err) => {
                    tracing::error!(doc_id = doc.id.0, error = %err, "unexpected ingestion failure");
                    self.report.failed.push((doc.id, err));
                }
            }
        }
    }

    pub fn finish(mut self) -> IngestReport {
        self.flush();
        self.report
    }
}

/// Adds every document, skipping and reporting the ones that fail
pub fn add_documents<I>(server: &mut SearchServer, documents: I) -> IngestReport
where
    I: IntoIterator<Item = NewDocument>,
{
    let mut batch = BatchIngest::new(server, 1000);
    for doc in documents {
        batch.add(doc);
    }
    batch.finish()
}
