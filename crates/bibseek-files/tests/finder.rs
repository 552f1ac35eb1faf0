//! Directory scanning tests for the citation-key file finder.

use std::fs;
use std::path::{Path, PathBuf};

use bibseek::Entry;
use bibseek_files::{CitationKeyFileFinder, FileFinder, FinderConfig, FinderError};
use tempfile::TempDir;

fn touch(dir: &Path, relative: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, b"%PDF-1.4").unwrap();
    path
}

fn names(files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn library() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "Smith2020.pdf");
    touch(dir.path(), "Smith2020a.pdf");
    touch(dir.path(), "Smith2020_supplement.pdf");
    touch(dir.path(), "Smith2020.notes.pdf");
    touch(dir.path(), "Smith2020.txt");
    touch(dir.path(), "Jones2019.pdf");
    dir
}

fn pdf() -> Vec<String> {
    vec!["pdf".to_string()]
}

#[test]
fn exact_match_wins_over_appendix_suffix() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "Smith2020.pdf");
    touch(dir.path(), "Smith2020a.pdf");

    let finder = CitationKeyFileFinder::new(FinderConfig::default());
    let files = finder
        .find_for_key(Some("Smith2020"), &[dir.path()], &["pdf"])
        .unwrap();

    assert_eq!(names(&files), vec!["Smith2020.pdf"]);
}

#[test]
fn non_exact_matches_are_sorted() {
    let dir = library();
    let finder = CitationKeyFileFinder::default();
    let files = finder
        .find_for_key(Some("Smith2020"), &[dir.path()], &["pdf"])
        .unwrap();

    assert_eq!(
        names(&files),
        vec![
            "Smith2020.notes.pdf",
            "Smith2020.pdf",
            "Smith2020_supplement.pdf"
        ]
    );
}

#[test]
fn results_are_sorted_by_path_text() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "sub/Smith2020.pdf");
    touch(dir.path(), "sub-x/Smith2020.pdf");

    let finder = CitationKeyFileFinder::default();
    let files = finder
        .find_for_key(Some("Smith2020"), &[dir.path()], &["pdf"])
        .unwrap();

    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("sub-x/Smith2020.pdf"));
    assert!(files[1].ends_with("sub/Smith2020.pdf"));
}

#[test]
fn exact_key_only_skips_prefix_matches() {
    let dir = library();
    let finder = CitationKeyFileFinder::new(FinderConfig::default().with_exact_key_only(true));
    let files = finder
        .find_for_key(Some("Smith2020"), &[dir.path()], &["pdf"])
        .unwrap();

    assert_eq!(names(&files), vec!["Smith2020.pdf"]);
}

#[test]
fn appendix_key_finds_its_own_file() {
    let dir = library();
    let finder = CitationKeyFileFinder::default();
    let files = finder
        .find_for_key(Some("Smith2020a"), &[dir.path()], &["pdf"])
        .unwrap();

    assert_eq!(names(&files), vec!["Smith2020a.pdf"]);
}

#[test]
fn extensions_are_case_sensitive() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "Smith2020.PDF");
    touch(dir.path(), "Smith2020.djvu");

    let finder = CitationKeyFileFinder::default();
    let files = finder
        .find_for_key(Some("Smith2020"), &[dir.path()], &["pdf", "djvu"])
        .unwrap();

    assert_eq!(names(&files), vec!["Smith2020.djvu"]);
}

#[test]
fn scans_nested_directories() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "2020/spring/Smith2020.pdf");

    let finder = CitationKeyFileFinder::default();
    let files = finder
        .find_for_key(Some("Smith2020"), &[dir.path()], &["pdf"])
        .unwrap();

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("2020/spring/Smith2020.pdf"));
}

#[test]
fn directories_named_like_files_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("Smith2020.pdf")).unwrap();

    let finder = CitationKeyFileFinder::default();
    let files = finder
        .find_for_key(Some("Smith2020"), &[dir.path()], &["pdf"])
        .unwrap();

    assert!(files.is_empty());
}

#[test]
fn key_is_sanitized_for_prefix_matching() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "Smith_2020 - Notes.pdf");

    let finder = CitationKeyFileFinder::default();
    let files = finder
        .find_for_key(Some("Smith:2020"), &[dir.path()], &["pdf"])
        .unwrap();

    assert_eq!(names(&files), vec!["Smith_2020 - Notes.pdf"]);
}

#[test]
fn missing_directories_are_skipped() {
    let dir = library();
    let missing = dir.path().join("does-not-exist");

    let finder = CitationKeyFileFinder::default();
    let files = finder
        .find_for_key(Some("Jones2019"), &[missing.as_path(), dir.path()], &["pdf"])
        .unwrap();

    assert_eq!(names(&files), vec!["Jones2019.pdf"]);
}

#[test]
fn overlapping_directories_report_each_file_once() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "sub/Smith2020.pdf");

    let finder = CitationKeyFileFinder::default();
    let files = finder
        .find_for_key(
            Some("Smith2020"),
            &[dir.path().to_path_buf(), dir.path().join("sub")],
            &["pdf"],
        )
        .unwrap();

    assert_eq!(files.len(), 1);
}

#[test]
fn blank_key_finds_nothing() {
    let dir = library();
    let finder = CitationKeyFileFinder::default();

    assert!(finder
        .find_for_key(None, &[dir.path()], &["pdf"])
        .unwrap()
        .is_empty());
    assert!(finder
        .find_for_key(Some(""), &[dir.path()], &["pdf"])
        .unwrap()
        .is_empty());
}

#[test]
fn finds_files_for_record() {
    let dir = library();
    let finder = CitationKeyFileFinder::default();
    let entry = Entry::new()
        .with_citation_key("Jones2019")
        .with_field("author", "Jones");

    let files = finder
        .find_associated_files(&entry, &[dir.path().to_path_buf()], &pdf())
        .unwrap();

    assert_eq!(names(&files), vec!["Jones2019.pdf"]);
}

#[test]
fn finds_files_for_all_records() {
    let dir = library();
    let finder = CitationKeyFileFinder::new(FinderConfig::default().with_exact_key_only(true));
    let entries = vec![
        Entry::new().with_citation_key("Smith2020"),
        Entry::new().with_citation_key("Jones2019"),
        Entry::new().with_citation_key("Miller2001"),
        Entry::new().with_field("title", "No key"),
    ];

    let found = finder
        .find_associated_files_for_all(&entries, &[dir.path().to_path_buf()], &pdf())
        .unwrap();

    assert_eq!(found.len(), 3);
    assert_eq!(names(&found["Smith2020"]), vec!["Smith2020.pdf"]);
    assert_eq!(names(&found["Jones2019"]), vec!["Jones2019.pdf"]);
    assert!(found["Miller2001"].is_empty());
}

#[cfg(unix)]
#[test]
fn follows_symlinked_directories() {
    let papers = tempfile::tempdir().unwrap();
    touch(papers.path(), "Smith2020.pdf");
    let library = tempfile::tempdir().unwrap();
    std::os::unix::fs::symlink(papers.path(), library.path().join("linked")).unwrap();

    let finder = CitationKeyFileFinder::default();
    let files = finder
        .find_for_key(Some("Smith2020"), &[library.path()], &["pdf"])
        .unwrap();

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("linked/Smith2020.pdf"));
}

#[cfg(unix)]
#[test]
fn symlink_alias_is_reported_once() {
    let papers = tempfile::tempdir().unwrap();
    touch(papers.path(), "Smith2020.pdf");
    let library = tempfile::tempdir().unwrap();
    std::os::unix::fs::symlink(papers.path(), library.path().join("linked")).unwrap();

    let finder = CitationKeyFileFinder::default();
    let files = finder
        .find_for_key(Some("Smith2020"), &[papers.path(), library.path()], &["pdf"])
        .unwrap();

    assert_eq!(files.len(), 1);
}

#[cfg(unix)]
#[test]
fn dangling_symlinks_are_skipped() {
    let dir = library();
    std::os::unix::fs::symlink(
        dir.path().join("gone.pdf"),
        dir.path().join("Smith2020_broken.pdf"),
    )
    .unwrap();

    let finder = CitationKeyFileFinder::new(FinderConfig::default().with_exact_key_only(true));
    let files = finder
        .find_for_key(Some("Smith2020"), &[dir.path()], &["pdf"])
        .unwrap();

    assert_eq!(names(&files), vec!["Smith2020.pdf"]);
}

#[cfg(unix)]
#[test]
fn symlink_loop_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("inner")).unwrap();
    std::os::unix::fs::symlink(dir.path(), dir.path().join("inner/back")).unwrap();

    let finder = CitationKeyFileFinder::default();
    let err = finder
        .find_for_key(Some("Smith2020"), &[dir.path()], &["pdf"])
        .unwrap_err();

    assert!(matches!(err, FinderError::Walk { .. }));
}

#[test]
fn loads_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("finder.yaml");
    fs::write(&path, "exact_key_only: true\nextensions: [pdf, ps]\n").unwrap();

    let config = FinderConfig::load(&path).unwrap();
    assert!(config.exact_key_only);
    assert_eq!(config.extensions, vec!["pdf", "ps"]);
}

#[test]
fn invalid_config_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("finder.yaml");
    fs::write(&path, "extensions: {not: a list}\n").unwrap();

    let err = FinderConfig::load(&path).unwrap_err();
    assert!(matches!(err, FinderError::Config { .. }));
    assert!(err.to_string().contains("finder.yaml"));
}
