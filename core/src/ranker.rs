use crate::catalog::DocumentCatalog;
use crate::config::SearchConfig;
use crate::index::InvertedIndex;
use crate::query::ParsedQuery;
use crate::{DocId, DocumentStatus, SearchHit};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// `ln(N / df)`. Only called for terms present in the index, so `df >= 1`.
pub fn inverse_document_freq(document_count: usize, document_frequency: usize) -> f64 {
    (document_count as f64 / document_frequency as f64).ln()
}

/// Accumulate TF-IDF relevance for every document accepted by `predicate`,
/// then drop every document containing a minus word.
pub fn find_all_documents<F>(
    query: &ParsedQuery,
    index: &InvertedIndex,
    catalog: &DocumentCatalog,
    predicate: F,
) -> Vec<SearchHit>
where
    F: Fn(DocId, DocumentStatus, i32) -> bool,
{
    let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();
    for word in &query.plus_words {
        let Some(postings) = index.postings(word) else { continue };
        let idf = inverse_document_freq(catalog.len(), index.document_frequency(word));
        for (&doc_id, &tf) in postings {
            let Some(meta) = catalog.get(doc_id) else { continue };
            if predicate(doc_id, meta.status, meta.rating) {
                *relevance.entry(doc_id).or_insert(0.0) += tf * idf;
            }
        }
    }

    for word in &query.minus_words {
        let Some(postings) = index.postings(word) else { continue };
        for doc_id in postings.keys() {
            relevance.remove(doc_id);
        }
    }

    relevance
        .into_iter()
        .map(|(doc_id, relevance)| SearchHit {
            doc_id,
            relevance,
            rating: catalog.get(doc_id).map_or(0, |meta| meta.rating),
        })
        .collect()
}

/// Relevance descending; within `epsilon`, rating descending.
pub fn compare_hits(lhs: &SearchHit, rhs: &SearchHit, epsilon: f64) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < epsilon {
        rhs.rating.cmp(&lhs.rating)
    } else {
        rhs.relevance.total_cmp(&lhs.relevance)
    }
}

/// Sort and keep the best `config.max_results` hits.
///
/// Closeness within epsilon is not transitive, so the sort itself uses a total
/// order and the epsilon/rating tie-break is applied afterwards by adjacent swaps.
pub fn rank(mut hits: Vec<SearchHit>, config: &SearchConfig) -> Vec<SearchHit> {
    let epsilon = config.relevance_epsilon;
    hits.sort_by(|a, b| b.relevance.total_cmp(&a.relevance).then_with(|| b.rating.cmp(&a.rating)));
    for i in 1..hits.len() {
        let mut j = i;
        while j > 0 && compare_hits(&hits[j - 1], &hits[j], epsilon) == Ordering::Greater {
            hits.swap(j - 1, j);
            j -= 1;
        }
    }
    hits.truncate(config.max_results);
    hits
}
