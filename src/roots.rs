use std::env;
use std::path::PathBuf;

use log::debug;

/// Locations that commonly accumulate temporary files: the user-scope temp
/// directory plus the system-scope one. A location that cannot be resolved is
/// omitted; the result may be shorter than two entries but the call itself
/// never fails.
pub fn resolve_roots() -> Vec<PathBuf> {
    let mut roots = vec![env::temp_dir()];
    if let Some(system) = system_temp_dir() {
        roots.push(system);
    }
    let roots = prune_roots(roots);
    debug!("resolved {} scan root(s)", roots.len());
    roots
}

#[cfg(windows)]
fn system_temp_dir() -> Option<PathBuf> {
    env::var_os("windir").map(|dir| PathBuf::from(dir).join("Temp"))
}

#[cfg(not(windows))]
fn system_temp_dir() -> Option<PathBuf> {
    Some(PathBuf::from("/var/tmp"))
}

/// Collapse duplicate roots and roots nested inside another root, so the same
/// subtree is never walked (and sized) twice. The outermost path wins.
fn prune_roots(roots: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut kept: Vec<PathBuf> = Vec::new();
    for root in roots {
        if kept.iter().any(|k| root.starts_with(k)) {
            continue;
        }
        kept.retain(|k| !k.starts_with(&root));
        kept.push(root);
    }
    kept
}
