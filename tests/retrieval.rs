use std::sync::Arc;

use tfidf_docstore::{DocumentSource, Error, Index, MemoryStore, RawDocument, Result};

const EPS: f64 = 1e-9;

fn scenario_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_documents([
        ("a.txt", "The cat sat on the mat"),
        ("b.txt", "Dogs are loyal animals"),
        ("c.txt", ""),
    ]))
}

fn open(store: &Arc<MemoryStore>) -> Index<Arc<MemoryStore>> {
    Index::open(Arc::clone(store)).unwrap()
}

#[test]
fn scenario_ranks_shared_terms_first_and_skips_empty() {
    let index = open(&scenario_store());
    assert_eq!(index.doc_num(), 3);
    assert_eq!(index.matrix().unwrap().len(), 2);

    let hits = index.query("cat and mat", Some(2));
    assert_eq!(hits.ids(), vec!["a.txt", "b.txt"]);
    assert!(hits.list[0].score > hits.list[1].score);
    assert_eq!(hits.list[1].score, 0.0);

    let all = index.query("cat and mat", Some(10));
    assert_eq!(all.len(), 2);
    assert!(!all.ids().contains(&"c.txt"));
}

#[test]
fn replacing_a_document_replaces_its_terms() {
    let store = scenario_store();
    let mut index = open(&store);
    index.add_document("a.txt", "completely different content").unwrap();

    let vectorizer = index.vectorizer().unwrap();
    assert!(!vectorizer.contains_term("cat"));
    assert!(vectorizer.contains_term("completely"));

    let hits = index.query("cat and mat", Some(1));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits.list[0].score, 0.0);
    assert_eq!(index.document("a.txt").unwrap().text, "completely different content");
}

#[test]
fn exact_text_scores_one() {
    let index = open(&scenario_store());
    let hits = index.query("Dogs are loyal animals", Some(1));
    assert_eq!(hits.ids(), vec!["b.txt"]);
    assert!((hits.list[0].score - 1.0).abs() < EPS);
}

#[test]
fn sole_matching_document_is_returned() {
    let store = Arc::new(MemoryStore::with_documents([
        ("1", "apples and oranges"),
        ("2", "trains and planes"),
        ("3", "rivers and lakes"),
    ]));
    let index = open(&store);
    for doc in index.documents() {
        let hits = index.query(&doc.text, Some(1));
        assert_eq!(hits.ids(), vec![doc.id.as_str()]);
    }
}

#[test]
fn empty_document_is_stored_but_never_returned() {
    let store = scenario_store();
    let mut index = open(&store);
    index.add_document("blank.txt", "").unwrap();

    assert_eq!(index.doc_num(), 4);
    assert!(index.document("blank.txt").unwrap().is_empty());
    assert_eq!(index.indexed_num(), 2);
    assert!(!index.query("cat", Some(10)).ids().contains(&"blank.txt"));
}

#[test]
fn reload_of_unchanged_store_is_deterministic() {
    let store = scenario_store();
    let mut index = open(&store);
    let first_dims = index.vectorizer().unwrap().vocab_size();
    let first_matrix = index.matrix().unwrap().to_vec();
    let first_hits = index.query("loyal cat", Some(3));

    index.load().unwrap();
    assert_eq!(index.vectorizer().unwrap().vocab_size(), first_dims);
    assert_eq!(index.matrix().unwrap(), first_matrix.as_slice());
    assert_eq!(index.query("loyal cat", Some(3)), first_hits);
}

#[test]
fn repeated_add_is_idempotent() {
    let once_store = scenario_store();
    let mut once = open(&once_store);
    once.add_document("d.txt", "birds sing at dawn").unwrap();

    let twice_store = scenario_store();
    let mut twice = open(&twice_store);
    twice.add_document("d.txt", "birds sing at dawn").unwrap();
    twice.add_document("d.txt", "birds sing at dawn").unwrap();

    assert_eq!(once.documents(), twice.documents());
    assert_eq!(once.matrix(), twice.matrix());
}

#[test]
fn empty_corpus_returns_nothing() {
    let index = open(&Arc::new(MemoryStore::new()));
    assert!(index.query("anything", Some(3)).is_empty());
    assert!(index.query("anything", None).is_empty());

    let blank = open(&Arc::new(MemoryStore::with_documents([("a", "  "), ("b", "\n\t")])));
    assert!(!blank.is_fitted());
    assert!(blank.query("anything", Some(3)).is_empty());
}

#[test]
fn k_boundaries() {
    let index = open(&scenario_store());
    assert!(index.query("cat", Some(0)).is_empty());
    assert_eq!(index.query("cat", Some(usize::MAX)).len(), 2);
    assert_eq!(index.query("cat", None).len(), 2);
}

#[test]
fn ties_keep_document_order() {
    let store = Arc::new(MemoryStore::with_documents([
        ("z.txt", "zebra"),
        ("m.txt", "moose"),
        ("a.txt", "aardvark"),
    ]));
    let index = open(&store);
    // every document scores 0
    let hits = index.query("unicorn", Some(3));
    assert_eq!(hits.ids(), vec!["a.txt", "m.txt", "z.txt"]);
}

#[test]
fn storage_deletion_is_seen_on_next_load() {
    let store = scenario_store();
    let mut index = open(&store);
    store.remove("a.txt");
    assert_eq!(index.doc_num(), 3);

    index.load().unwrap();
    assert_eq!(index.doc_num(), 2);
    assert!(index.document("a.txt").is_none());
    assert!(!index.query("cat", Some(3)).ids().contains(&"a.txt"));
}

/// A source with one unreadable entry and a switch to fail listing or writing
struct FlakySource {
    inner: MemoryStore,
    fail_list: bool,
    fail_write: bool,
}

impl DocumentSource for FlakySource {
    fn list(&self) -> Result<Vec<RawDocument>> {
        if self.fail_list {
            return Err(Error::StoreList { source: std::io::Error::other("offline") });
        }
        let mut docs = self.inner.list()?;
        docs.push(RawDocument {
            id: "broken.txt".to_string(),
            bytes: Err(Error::StoreRead {
                id: "broken.txt".to_string(),
                source: std::io::Error::other("bad sector"),
            }),
        });
        Ok(docs)
    }

    fn write(&self, id: &str, bytes: &[u8]) -> Result<()> {
        if self.fail_write {
            return Err(Error::StoreWrite { id: id.to_string(), source: std::io::Error::other("read-only") });
        }
        self.inner.write(id, bytes)
    }
}

#[test]
fn unreadable_document_becomes_empty() {
    let source = FlakySource {
        inner: MemoryStore::with_documents([("a.txt", "cat on a mat")]),
        fail_list: false,
        fail_write: false,
    };
    let index: Index<FlakySource> = Index::open(source).unwrap();
    assert_eq!(index.doc_num(), 2);
    assert!(index.document("broken.txt").unwrap().is_empty());
    assert_eq!(index.indexed_num(), 1);
}

#[test]
fn failed_write_does_not_reload() {
    let source = FlakySource {
        inner: MemoryStore::with_documents([("a.txt", "cat on a mat")]),
        fail_list: false,
        fail_write: true,
    };
    let mut index: Index<FlakySource> = Index::open(source).unwrap();
    let before = index.documents().to_vec();
    let err = index.add_document("b.txt", "dogs").unwrap_err();
    assert!(matches!(err, Error::StoreWrite { .. }));
    assert_eq!(index.documents(), before.as_slice());
}

#[test]
fn failed_listing_keeps_previous_state() {
    let source = FlakySource {
        inner: MemoryStore::with_documents([("a.txt", "cat on a mat")]),
        fail_list: false,
        fail_write: false,
    };
    let mut index: Index<FlakySource> = Index::open(source).unwrap();
    let mut broken: Index<FlakySource> = Index::new(FlakySource {
        inner: MemoryStore::new(),
        fail_list: true,
        fail_write: false,
    });
    assert!(matches!(broken.load(), Err(Error::StoreList { .. })));
    assert!(!broken.is_fitted());

    index.load().unwrap();
    assert!(index.is_fitted());
    assert_eq!(index.query("cat", Some(1)).ids(), vec!["a.txt"]);
}
