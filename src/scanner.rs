use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

/// What a discovered entry is, which decides how it gets removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    File,
    SymbolicLink,
    EmptyDirectory,
}

/// One entry discovered during a scan. Immutable once recorded; the path is
/// guaranteed to have existed and been readable at the moment of discovery.
#[derive(Debug, Clone)]
pub struct CandidateItem {
    pub path: PathBuf,
    pub kind: CandidateKind,
    pub size_bytes: u64,
}

/// The complete result of one scan: candidate items in discovery order plus
/// the aggregate reclaimable size. Directories contribute 0 bytes.
#[derive(Debug, Default)]
pub struct Inventory {
    pub items: Vec<CandidateItem>,
    pub total_bytes: u64,
}

impl Inventory {
    /// Total reclaimable size in megabytes, rounded to two decimals.
    pub fn total_size_mb(&self) -> f64 {
        (self.total_bytes as f64 / 1_048_576.0 * 100.0).round() / 100.0
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Walk every existing root and build an inventory of deletion candidates:
/// regular files, symbolic links (recorded as leaves, never followed), and
/// directories that are empty once their subtree has been visited.
///
/// Read-only; runs to completion over the full tree. Entries that vanish or
/// cannot be read mid-walk are skipped one at a time, never failing the scan.
/// A root that does not exist yields nothing.
pub fn scan(roots: &[PathBuf]) -> Inventory {
    let mut inventory = Inventory::default();
    for root in roots {
        // A root that is itself a symlink (macOS /tmp) is walked via its
        // real path so the traversal actually descends.
        let root = fs::canonicalize(root).unwrap_or_else(|_| root.clone());
        if !root.is_dir() {
            debug!("skipping absent scan root {}", root.display());
            continue;
        }
        scan_root(&root, &mut inventory);
    }
    inventory
}

fn scan_root(root: &Path, inventory: &mut Inventory) {
    // contents_first visits children before their parent, so by the time a
    // directory entry arrives its subtree has been recorded and the live
    // emptiness check below is meaningful. min_depth(1) keeps the root itself
    // out of the candidate list.
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .contents_first(true);

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!("skipping unreadable entry under {}: {e}", root.display());
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_symlink() || file_type.is_file() {
            // For a symlink this is the link's own metadata, so broken links
            // still count and targets are never sized twice.
            let size = match entry.metadata() {
                Ok(m) => m.len(),
                Err(e) => {
                    debug!("skipping unreadable entry {}: {e}", entry.path().display());
                    continue;
                }
            };
            let kind = if file_type.is_symlink() {
                CandidateKind::SymbolicLink
            } else {
                CandidateKind::File
            };
            inventory.total_bytes += size;
            inventory.items.push(CandidateItem {
                path: entry.into_path(),
                kind,
                size_bytes: size,
            });
        } else if file_type.is_dir() {
            if is_dir_empty(entry.path()) {
                inventory.items.push(CandidateItem {
                    path: entry.into_path(),
                    kind: CandidateKind::EmptyDirectory,
                    size_bytes: 0,
                });
            }
        }
        // Sockets, FIFOs and other special entries are not candidates.
    }
}

/// Live check against current directory contents, not the state seen while
/// walking; a directory emptied by another process mid-scan still qualifies.
fn is_dir_empty(path: &Path) -> bool {
    fs::read_dir(path)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn canonical_tempdir() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = fs::canonicalize(dir.path()).expect("canonicalize temp dir");
        (dir, path)
    }

    fn write_file(path: &Path, len: usize) {
        let mut f = File::create(path).expect("create file");
        f.write_all(&vec![b'x'; len]).expect("write file");
    }

    fn paths_of(inventory: &Inventory) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = inventory.items.iter().map(|i| i.path.clone()).collect();
        paths.sort();
        paths
    }

    #[test]
    fn finds_files_and_empty_dirs_with_rounded_total() {
        let (_guard, root) = canonical_tempdir();
        write_file(&root.join("a.tmp"), 10);
        write_file(&root.join("b.log"), 20);
        fs::create_dir(root.join("empty")).unwrap();

        let inventory = scan(&[root.clone()]);

        assert_eq!(inventory.len(), 3);
        assert_eq!(inventory.total_bytes, 30);
        assert_eq!(inventory.total_size_mb(), 0.0);

        let empty = inventory
            .items
            .iter()
            .find(|i| i.path == root.join("empty"))
            .expect("empty dir recorded");
        assert_eq!(empty.kind, CandidateKind::EmptyDirectory);
        assert_eq!(empty.size_bytes, 0);
    }

    #[test]
    fn directories_never_contribute_to_the_total() {
        let (_guard, root) = canonical_tempdir();
        fs::create_dir(root.join("only-dirs")).unwrap();
        fs::create_dir(root.join("only-dirs-2")).unwrap();

        let inventory = scan(&[root]);
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.total_bytes, 0);
        assert_eq!(inventory.total_size_mb(), 0.0);
    }

    #[test]
    fn records_every_empty_directory_including_nested_ones() {
        let (_guard, root) = canonical_tempdir();
        fs::create_dir(root.join("a")).unwrap();
        fs::create_dir_all(root.join("b").join("c")).unwrap();

        let inventory = scan(&[root.clone()]);

        // "b" holds "c", so only "a" and "c" are empty.
        assert_eq!(
            paths_of(&inventory),
            vec![root.join("a"), root.join("b").join("c")]
        );
        assert!(inventory
            .items
            .iter()
            .all(|i| i.kind == CandidateKind::EmptyDirectory));
        assert_eq!(inventory.total_size_mb(), 0.0);
    }

    #[test]
    fn non_empty_directories_are_traversed_but_not_recorded() {
        let (_guard, root) = canonical_tempdir();
        fs::create_dir(root.join("cache")).unwrap();
        write_file(&root.join("cache").join("blob.bin"), 64);

        let inventory = scan(&[root.clone()]);

        assert_eq!(paths_of(&inventory), vec![root.join("cache").join("blob.bin")]);
        assert_eq!(inventory.total_bytes, 64);
    }

    #[test]
    fn missing_root_yields_an_empty_inventory() {
        let (_guard, root) = canonical_tempdir();
        let gone = root.join("never-created");

        let inventory = scan(&[gone]);
        assert!(inventory.is_empty());
        assert_eq!(inventory.total_bytes, 0);
    }

    #[test]
    fn the_root_itself_is_never_a_candidate() {
        let (_guard, root) = canonical_tempdir();

        let inventory = scan(&[root]);
        assert!(inventory.is_empty());
    }

    #[test]
    fn scanning_twice_yields_identical_results() {
        let (_guard, root) = canonical_tempdir();
        write_file(&root.join("one.tmp"), 100);
        write_file(&root.join("two.tmp"), 200);
        fs::create_dir(root.join("hollow")).unwrap();

        let first = scan(&[root.clone()]);
        let second = scan(&[root]);

        assert_eq!(paths_of(&first), paths_of(&second));
        assert_eq!(first.total_bytes, second.total_bytes);
        assert_eq!(first.total_size_mb(), second.total_size_mb());
    }

    #[test]
    fn megabyte_total_rounds_to_two_decimals() {
        let (_guard, root) = canonical_tempdir();
        // 1.5 MiB plus a little: 1_572_864 + 5_243 = 1_578_107 bytes = 1.505 MiB
        write_file(&root.join("big.tmp"), 1_578_107);

        let inventory = scan(&[root]);
        assert_eq!(inventory.total_size_mb(), 1.51);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_leaf_items_sized_by_the_link_itself() {
        let (_guard, root) = canonical_tempdir();
        write_file(&root.join("target.txt"), 40);
        std::os::unix::fs::symlink(root.join("target.txt"), root.join("alias")).unwrap();

        let inventory = scan(&[root.clone()]);

        assert_eq!(inventory.len(), 2);
        let link = inventory
            .items
            .iter()
            .find(|i| i.path == root.join("alias"))
            .expect("symlink recorded");
        assert_eq!(link.kind, CandidateKind::SymbolicLink);
        let link_len = fs::symlink_metadata(root.join("alias")).unwrap().len();
        assert_eq!(link.size_bytes, link_len);
        assert_eq!(inventory.total_bytes, 40 + link_len);
    }

    #[cfg(unix)]
    #[test]
    fn a_link_to_a_directory_is_not_descended_into() {
        let (_guard, root) = canonical_tempdir();
        fs::create_dir(root.join("real")).unwrap();
        write_file(&root.join("real").join("inner.txt"), 8);
        std::os::unix::fs::symlink(root.join("real"), root.join("doorway")).unwrap();

        let inventory = scan(&[root.clone()]);

        // inner.txt once via its real path, the link once as a leaf; the
        // non-empty "real" directory is not a candidate.
        assert_eq!(
            paths_of(&inventory),
            vec![root.join("doorway"), root.join("real").join("inner.txt")]
        );
        let link = inventory
            .items
            .iter()
            .find(|i| i.path == root.join("doorway"))
            .unwrap();
        assert_eq!(link.kind, CandidateKind::SymbolicLink);
    }

    #[cfg(unix)]
    #[test]
    fn a_self_referential_link_terminates_the_walk() {
        let (_guard, root) = canonical_tempdir();
        std::os::unix::fs::symlink(&root, root.join("loop")).unwrap();

        let inventory = scan(&[root.clone()]);

        assert_eq!(paths_of(&inventory), vec![root.join("loop")]);
        assert_eq!(inventory.items[0].kind, CandidateKind::SymbolicLink);
    }

    #[cfg(unix)]
    #[test]
    fn broken_links_are_still_candidates() {
        let (_guard, root) = canonical_tempdir();
        std::os::unix::fs::symlink(root.join("vanished"), root.join("dangling")).unwrap();

        let inventory = scan(&[root.clone()]);

        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.items[0].kind, CandidateKind::SymbolicLink);
        assert_eq!(inventory.items[0].path, root.join("dangling"));
    }
}
