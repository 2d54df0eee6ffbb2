use super::error::ListingError;
use super::model::{EntryKind, FileEntry};
use chrono::{DateTime, Local};
use std::io::ErrorKind;
use std::path::Path;
use std::time::SystemTime;
use tokio::fs;

/// Extension of `name` including the leading dot. Leading dots do not start
/// an extension, so `.bashrc` has none while `notes.` has `.`.
pub fn file_extension(name: &str) -> String {
    let Some(dot) = name.rfind('.') else { return String::new() };
    if name[..dot].chars().all(|c| c == '.') {
        return String::new();
    }
    name[dot..].to_string()
}

fn format_modified(t: SystemTime) -> String {
    DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn classify(err: std::io::Error, label: &str) -> ListingError {
    match err.kind() {
        ErrorKind::NotFound => ListingError::NotFound(label.to_string()),
        ErrorKind::PermissionDenied => ListingError::Forbidden,
        _ => ListingError::Internal(err),
    }
}

/// Reads every entry of `folder` (non-recursive) in enumeration order.
/// `label` is only used in the not-found message.
pub async fn scan_folder(folder: &Path, label: &str, prefix: Option<&str>) -> Result<Vec<FileEntry>, ListingError> {
    fs::metadata(folder).await.map_err(|e| classify(e, label))?;
    let mut dir = fs::read_dir(folder).await.map_err(|e| classify(e, label))?;

    let mut entries = vec![];
    while let Some(ent) = dir.next_entry().await? {
        let name = ent.file_name().to_string_lossy().into_owned();
        if let Some(p) = prefix {
            if !name.starts_with(p) { continue; }
        }
        // stat semantics: symlinks are followed
        let meta = fs::metadata(ent.path()).await?;
        entries.push(FileEntry {
            extension: file_extension(&name),
            modified_at: format_modified(meta.modified()?),
            kind: if meta.is_dir() { EntryKind::Directory } else { EntryKind::File },
            size_kib: meta.len() as f64 / 1024.0,
            name,
        });
    }
    Ok(entries)
}

/// `count == 0` keeps everything; otherwise keeps the first `count` entries,
/// which must be fewer than the total.
pub fn truncate(mut entries: Vec<FileEntry>, count: i64) -> Result<Vec<FileEntry>, ListingError> {
    let n = usize::try_from(count).map_err(|_| ListingError::invalid_count())?;
    if n == 0 {
        return Ok(entries);
    }
    if n >= entries.len() {
        return Err(ListingError::InvalidParameter("Invalid count parameter".into()));
    }
    entries.truncate(n);
    Ok(entries)
}

/// Stable ascending sort on size.
pub fn sort_by_size(entries: &mut [FileEntry]) {
    entries.sort_by(|a, b| a.size_kib.total_cmp(&b.size_kib));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, size_kib: f64) -> FileEntry {
        FileEntry {
            name: name.into(),
            modified_at: "2024-01-01 00:00:00".into(),
            kind: EntryKind::File,
            size_kib,
            extension: file_extension(name),
        }
    }

    #[test]
    fn extension_follows_last_dot() {
        assert_eq!(file_extension("report.pdf"), ".pdf");
        assert_eq!(file_extension("archive.tar.gz"), ".gz");
        assert_eq!(file_extension("photo.PNG"), ".PNG");
        assert_eq!(file_extension("README"), "");
        assert_eq!(file_extension(".bashrc"), "");
        assert_eq!(file_extension("..hidden"), "");
        assert_eq!(file_extension("notes."), ".");
    }

    #[test]
    fn truncate_zero_keeps_all_even_when_empty() {
        let all = vec![entry("a", 1.0), entry("b", 2.0)];
        assert_eq!(truncate(all.clone(), 0).unwrap(), all);
        assert!(truncate(vec![], 0).unwrap().is_empty());
    }

    #[test]
    fn truncate_slices_a_prefix() {
        let all = vec![entry("a", 1.0), entry("b", 2.0), entry("c", 3.0)];
        let names: Vec<_> = truncate(all, 2).unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn truncate_rejects_negative_and_out_of_range() {
        let all = vec![entry("a", 1.0), entry("b", 2.0)];
        assert!(matches!(truncate(all.clone(), -1), Err(ListingError::InvalidParameter(_))));
        assert!(matches!(truncate(all.clone(), 2), Err(ListingError::InvalidParameter(_))));
        assert!(matches!(truncate(all, 5), Err(ListingError::InvalidParameter(_))));
    }

    #[test]
    fn size_sort_is_stable() {
        let mut v = vec![entry("big", 9.0), entry("x", 1.0), entry("y", 1.0), entry("small", 0.5)];
        sort_by_size(&mut v);
        let names: Vec<_> = v.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["small", "x", "y", "big"]);
    }

    #[test]
    fn modified_time_format() {
        let s = format_modified(SystemTime::UNIX_EPOCH);
        assert_eq!(s.len(), 19);
        assert_eq!(&s[4..5], "-");
        assert_eq!(&s[10..11], " ");
        assert_eq!(&s[13..14], ":");
    }

    #[test]
    fn io_errors_are_classified() {
        assert!(matches!(classify(std::io::Error::from(ErrorKind::PermissionDenied), "f"), ListingError::Forbidden));
        match classify(std::io::Error::from(ErrorKind::NotFound), "photos") {
            ListingError::NotFound(label) => assert_eq!(label, "photos"),
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(matches!(classify(std::io::Error::from(ErrorKind::Other), "f"), ListingError::Internal(_)));
    }
}
