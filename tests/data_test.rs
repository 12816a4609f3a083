use sentimen_signal::data::{load_data, load_reviews, DataError, ReviewCache};
use sentimen_signal::Sentiment;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_legacy_confidence_column_is_renamed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reviews.csv");
    fs::write(
        &path,
        "ulasan_lengkap,sentimen,deskripsi_topik,detail_topik,skor_sentimen\n\
         Mantap,Positif,Pembayaran Pajak Kendaraan,bayar,0.9\n",
    )
    .unwrap();

    let table = load_data(&path).unwrap();
    assert!(table.has_confidence());
    let review = &table.reviews()[0];
    assert_eq!(review.confidence, Some(0.9));
    assert_eq!(review.topic_id, Some(3));
    assert_eq!(review.topic_text(), "Pembayaran Pajak Kendaraan, bayar");
    assert_eq!(review.fragment, "Mantap");
}

#[test]
fn test_canonical_confidence_wins() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reviews.csv");
    fs::write(
        &path,
        "skor_sentimen,ulasan_lengkap,sentimen,deskripsi_topik,detail_topik,confidence_score\n\
         0.1,Lama,Negatif,Topik Baru,antri,0.7\n",
    )
    .unwrap();

    let table = load_reviews(&path).unwrap();
    assert_eq!(table.reviews()[0].confidence, Some(0.7));
    // unknown description and no id column
    assert_eq!(table.reviews()[0].topic_id, None);
}

#[test]
fn test_optional_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reviews.csv");
    fs::write(
        &path,
        "ulasan_lengkap,sentimen,deskripsi_topik,detail_topik,pecahan_kalimat,id_topik\n\
         \"Lama, tapi beres\",Netral,Topik Baru,proses,tapi beres,6\n",
    )
    .unwrap();

    let table = load_reviews(&path).unwrap();
    assert!(!table.has_confidence());
    let review = &table.reviews()[0];
    assert_eq!(review.text, "Lama, tapi beres");
    assert_eq!(review.sentiment, Sentiment::Netral);
    assert_eq!(review.fragment, "tapi beres");
    assert_eq!(review.topic_id, Some(6));
    assert_eq!(review.confidence, None);
}

#[test]
fn test_missing_required_column_is_no_data() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reviews.csv");
    fs::write(&path, "ulasan_lengkap,sentimen,deskripsi_topik\nA,Positif,B\n").unwrap();

    assert!(matches!(load_reviews(&path), Err(DataError::MissingColumn(column)) if column == "detail_topik"));
    assert!(load_data(&path).is_none());
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    assert!(matches!(load_reviews(&path), Err(DataError::NotFound(_))));
    assert!(load_data(&path).is_none());
}

#[test]
fn test_cache_loads_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reviews.csv");
    fs::write(
        &path,
        "ulasan_lengkap,sentimen,deskripsi_topik,detail_topik\nA,Positif,B,c\n",
    )
    .unwrap();

    let cache = ReviewCache::new();
    let first = cache.get(&path).unwrap();
    assert!(cache.is_cached(&path));

    // no invalidation: later changes to the file are not seen
    fs::remove_file(&path).unwrap();
    let second = cache.get(&path).unwrap();
    assert!(std::rc::Rc::ptr_eq(&first, &second));
    assert_eq!(second.len(), 1);
}
