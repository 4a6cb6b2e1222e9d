//! Generate static files

use anyhow::Result;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::new_debouncer;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::Site;

/// Generate the static site.
///
/// Every run starts from the files on disk; nothing is cached between builds.
pub fn run(site: &Site) -> Result<()> {
    let start = Instant::now();

    let index = site.load_index()?;
    tracing::info!("Loaded {} posts from {:?}", index.len(), site.content_dir);

    let generator = Generator::new(site)?;
    generator.generate(&index)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

/// Inputs a rebuild depends on, with how deep to watch each
pub fn watch_targets(site: &Site) -> Vec<(PathBuf, RecursiveMode)> {
    let mut targets: Vec<_> = [&site.content_dir, &site.static_dir]
        .into_iter()
        .filter(|dir| dir.exists())
        .map(|dir| (dir.clone(), RecursiveMode::Recursive))
        .collect();

    let config_path = site.config_path();
    if config_path.exists() {
        targets.push((config_path, RecursiveMode::NonRecursive));
    }
    targets
}

/// Editor swap files and VCS noise
pub fn is_ignored(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    path_str.contains(".git")
        || path_str.contains(".DS_Store")
        || path_str.ends_with('~')
        || path_str.ends_with(".swp")
}

/// Rebuild whenever a watched input changes.
///
/// Blocks the calling thread until the watcher shuts down.
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for (path, mode) in watch_targets(site) {
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        match result {
            Ok(events) if events.iter().any(|e| !is_ignored(&e.path)) => {
                tracing::info!("File changed, regenerating...");
                if let Err(e) = reload_and_run(site) {
                    tracing::error!("Generation failed: {:#}", e);
                }
            }
            Ok(_) => {}
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

/// Re-read site.yml before building so config edits apply
pub fn reload_and_run(site: &Site) -> Result<()> {
    let site = Site::new(&site.base_dir)?;
    run(&site)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_malformed_post_fails_build_without_feed() {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("content/posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(posts_dir.join("broken.md"), "---\ntitle: Broken\n---\n").unwrap();

        let site = Site::new(dir.path()).unwrap();
        let err = run(&site).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.md"));
        assert!(!site.feed_path().exists());
    }

    #[test]
    fn test_empty_site_builds_empty_feed() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        run(&site).unwrap();

        let feed = fs::read_to_string(site.feed_path()).unwrap();
        assert!(feed.contains("<channel>"));
        assert!(!feed.contains("<item>"));
    }

    #[test]
    fn test_watch_targets_skip_missing_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert!(watch_targets(&site).is_empty());

        fs::create_dir_all(&site.content_dir).unwrap();
        fs::write(site.config_path(), "title: Watched\n").unwrap();
        let targets = watch_targets(&site);
        assert_eq!(
            targets,
            vec![
                (site.content_dir.clone(), RecursiveMode::Recursive),
                (site.config_path(), RecursiveMode::NonRecursive),
            ]
        );
    }

    #[test]
    fn test_is_ignored() {
        assert!(is_ignored(Path::new("content/posts/.git/index")));
        assert!(is_ignored(Path::new("content/posts/draft.md.swp")));
        assert!(is_ignored(Path::new("content/posts/draft.md~")));
        assert!(!is_ignored(Path::new("content/posts/draft.md")));
    }
}
