use super::*;

#[test]
fn default_catalog_is_populated() {
    let words = default_words();
    assert_eq!(words.len(), DEFAULT_WORDS.len());
    assert!(words.len() > 300);
    assert!(words.iter().any(|w| w == "love"));
}

#[test]
fn default_catalog_keeps_duplicates() {
    let count = DEFAULT_WORDS.iter().filter(|w| **w == "the").count();
    assert_eq!(count, 5);
}

#[test]
fn parse_words_skips_blank_lines_and_trims() {
    let words = parse_words("love\n\n  moon  \r\n\t\nstar");
    assert_eq!(words, vec!["love", "moon", "star"]);
}

#[test]
fn load_without_path_uses_builtin_list() {
    let words = load(None).unwrap();
    assert_eq!(words.len(), DEFAULT_WORDS.len());
}

#[test]
fn load_reads_file() {
    let path = std::env::temp_dir().join(format!("magnets-catalog-{}.txt", std::process::id()));
    std::fs::write(&path, "alpha\nbeta\n").unwrap();
    let words = load(Some(&path)).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(words, vec!["alpha", "beta"]);
}

#[test]
fn load_rejects_empty_file() {
    let path = std::env::temp_dir().join(format!("magnets-catalog-empty-{}.txt", std::process::id()));
    std::fs::write(&path, "\n   \n").unwrap();
    let err = load(Some(&path)).unwrap_err();
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(err, CatalogError::Empty(_)));
}

#[test]
fn load_reports_missing_file() {
    let err = load(Some(Path::new("/definitely/not/here/words.txt"))).unwrap_err();
    assert!(matches!(err, CatalogError::Read { .. }));
}
