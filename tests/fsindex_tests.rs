//! Persistence and search-ordering tests for the filesystem vector index.

use std::collections::HashMap;

use campus_assist::document::Document;
use campus_assist::fsindex::FsVectorIndex;
use campus_assist::index::VectorIndex;
use proptest::prelude::*;

fn doc(id: &str, text: &str, embedding: Vec<f32>) -> Document {
    Document {
        id: id.to_string(),
        text: text.to_string(),
        metadata: HashMap::from([("type".to_string(), "news".to_string())]),
        embedding,
    }
}

#[tokio::test]
async fn query_on_absent_collection_returns_empty() {
    let dir = tempfile::tempdir().unwrap();
    let index = FsVectorIndex::new(dir.path());
    let results = index.query("campus_content", &[1.0, 0.0], 5).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn ensure_collection_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let index = FsVectorIndex::new(dir.path());
    index.ensure_collection("campus_content").await.unwrap();
    index.ensure_collection("campus_content").await.unwrap();
}

#[tokio::test]
async fn empty_upsert_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let index = FsVectorIndex::new(dir.path());
    index.upsert("campus_content", &[]).await.unwrap();
    let results = index.query("campus_content", &[1.0, 0.0], 5).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn upsert_same_id_replaces_instead_of_duplicating() {
    let dir = tempfile::tempdir().unwrap();
    let index = FsVectorIndex::new(dir.path());

    let first = doc("news:1", "News: A\nCategory: Events\nold", vec![1.0, 0.0]);
    index.upsert("campus_content", &[first.clone()]).await.unwrap();
    // Unchanged re-upsert: still exactly one row with identical content.
    index.upsert("campus_content", &[first.clone()]).await.unwrap();
    let results = index.query("campus_content", &[1.0, 0.0], 10).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, first.text);

    let updated = doc("news:1", "News: A\nCategory: Events\nnew", vec![0.0, 1.0]);
    index.upsert("campus_content", &[updated.clone()]).await.unwrap();
    let results = index.query("campus_content", &[0.0, 1.0], 10).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "news:1");
    assert_eq!(results[0].text, updated.text);
}

#[tokio::test]
async fn index_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let index = FsVectorIndex::new(dir.path());
        index
            .upsert(
                "campus_content",
                &[
                    doc("news:1", "News: A\nCategory: Events\nX", vec![1.0, 0.0]),
                    doc("project:1", "Project: B\nSkills: Go\nY", vec![0.0, 1.0]),
                ],
            )
            .await
            .unwrap();
    }

    let reopened = FsVectorIndex::new(dir.path());
    let results = reopened.query("campus_content", &[0.0, 1.0], 10).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, "project:1");
}

#[tokio::test]
async fn nearest_neighbor_comes_back_first_with_distance() {
    let dir = tempfile::tempdir().unwrap();
    let index = FsVectorIndex::new(dir.path());
    index
        .upsert(
            "campus_content",
            &[
                doc("news:1", "far", vec![1.0, 0.0]),
                doc("news:2", "near", vec![0.0, 1.0]),
            ],
        )
        .await
        .unwrap();

    let results = index.query("campus_content", &[0.0, 1.0], 1).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "news:2");
    let distance = results[0].distance.unwrap();
    assert!(distance.abs() < 1e-6, "identical vector should have ~zero distance: {distance}");
}

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

/// Generate a document with a normalized embedding.
fn arb_document(dim: usize) -> impl Strategy<Value = Document> {
    ("[a-z]{3,8}", "[a-z ]{5,30}", arb_normalized_embedding(dim))
        .prop_map(|(id, text, embedding)| doc(&id, &text, embedding))
}

mod prop_query_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// For any stored set and query vector, results come back ordered
        /// by non-decreasing distance and bounded by min(n, rows).
        #[test]
        fn results_ordered_ascending_and_bounded(
            documents in proptest::collection::vec(arb_document(DIM), 1..20),
            query in arb_normalized_embedding(DIM),
            n in 1usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (results, unique_count) = rt.block_on(async {
                let dir = tempfile::tempdir().unwrap();
                let index = FsVectorIndex::new(dir.path());

                // Deduplicate by id so upsert replacement does not shrink the set.
                let mut deduped: HashMap<String, Document> = HashMap::new();
                for document in &documents {
                    deduped.entry(document.id.clone()).or_insert_with(|| document.clone());
                }
                let unique: Vec<Document> = deduped.into_values().collect();
                let count = unique.len();

                index.upsert("campus_content", &unique).await.unwrap();
                (index.query("campus_content", &query, n).await.unwrap(), count)
            });

            prop_assert!(results.len() <= n);
            prop_assert!(results.len() <= unique_count);

            for window in results.windows(2) {
                let (a, b) = (window[0].distance.unwrap(), window[1].distance.unwrap());
                prop_assert!(a <= b, "results not in ascending distance order: {a} > {b}");
            }
        }
    }
}
