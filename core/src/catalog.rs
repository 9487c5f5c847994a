use crate::{DocId, DocMeta};
use std::collections::BTreeMap;

/// Per-document metadata plus the ingestion order of ids.
#[derive(Debug, Default)]
pub struct DocumentCatalog {
    docs: BTreeMap<DocId, DocMeta>,
    order: Vec<DocId>,
}

impl DocumentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caller guarantees `doc_id` is not present yet.
    pub fn insert(&mut self, doc_id: DocId, meta: DocMeta) {
        debug_assert!(!self.docs.contains_key(&doc_id));
        self.docs.insert(doc_id, meta);
        self.order.push(doc_id);
    }

    pub fn contains(&self, doc_id: DocId) -> bool {
        self.docs.contains_key(&doc_id)
    }

    pub fn get(&self, doc_id: DocId) -> Option<&DocMeta> {
        self.docs.get(&doc_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Id at `position` in ingestion order.
    pub fn id_at(&self, position: usize) -> Option<DocId> {
        self.order.get(position).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.order.iter().copied()
    }
}

/// Integer mean of `ratings`, truncated toward zero; 0 for no ratings.
pub fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}
