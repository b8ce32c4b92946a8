use std::path::Path;
use std::time::Duration;

use notify_debouncer_full::{
    new_debouncer,
    notify::{self, EventKind, RecommendedWatcher, RecursiveMode, Watcher},
    DebounceEventResult, Debouncer, FileIdMap,
};
use tracing::warn;

/// Guard for the running watcher; dropping it stops watching.
pub type ScreenWatcher = Debouncer<RecommendedWatcher, FileIdMap>;

/// Start a debounced watcher on the screen document.
///
/// The containing directory is watched rather than the file itself so that
/// whole-file replacement — the controller's update mechanism — keeps being
/// observed. `on_change` runs once per debounced burst of writes touching
/// the screen file; it is invoked on the watcher's own thread, so it should
/// only hand the notification off (e.g. into a channel).
pub fn start<F>(screen_file: &Path, on_change: F) -> Result<ScreenWatcher, notify::Error>
where
    F: Fn() + Send + 'static,
{
    let file_name = match screen_file.file_name() {
        Some(name) => name.to_os_string(),
        None => return Err(notify::Error::generic("screen path has no file name")),
    };
    let dir = match screen_file.parent() {
        Some(parent) => parent.to_path_buf(),
        None => return Err(notify::Error::generic("screen path has no parent directory")),
    };

    let mut debouncer = new_debouncer(
        Duration::from_millis(200),
        None,
        move |result: DebounceEventResult| match result {
            Ok(events) => {
                let screen_touched = events.iter().any(|event| {
                    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
                        && event
                            .paths
                            .iter()
                            .any(|path| path.file_name() == Some(file_name.as_os_str()))
                });
                if screen_touched {
                    on_change();
                }
            }
            Err(errors) => {
                for e in errors {
                    warn!(err = %e, "screen watcher error");
                }
            }
        },
    )?;

    debouncer.watcher().watch(&dir, RecursiveMode::NonRecursive)?;

    Ok(debouncer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::mpsc;

    #[test]
    fn fires_after_a_write_but_not_on_setup() {
        let dir = tempfile::tempdir().unwrap();
        let screen = dir.path().join("screen.html");
        fs::write(&screen, "<html>one</html>").unwrap();

        let (tx, rx) = mpsc::channel();
        let _watcher = start(&screen, move || {
            let _ = tx.send(());
        })
        .unwrap();

        // Watch setup alone must not produce a notification.
        assert!(rx.recv_timeout(Duration::from_millis(500)).is_err());

        fs::write(&screen, "<html>two</html>").unwrap();
        rx.recv_timeout(Duration::from_secs(5))
            .expect("a write should produce a change notification");
    }

    #[test]
    fn survives_whole_file_replacement() {
        let dir = tempfile::tempdir().unwrap();
        let screen = dir.path().join("screen.html");
        fs::write(&screen, "<html>old</html>").unwrap();

        let (tx, rx) = mpsc::channel();
        let _watcher = start(&screen, move || {
            let _ = tx.send(());
        })
        .unwrap();

        // Replace via rename, the atomic-write pattern a controller may use.
        let staged = dir.path().join("screen.html.tmp");
        fs::write(&staged, "<html>new</html>").unwrap();
        fs::rename(&staged, &screen).unwrap();

        rx.recv_timeout(Duration::from_secs(5))
            .expect("replacing the file should produce a change notification");
    }

    #[test]
    fn ignores_sibling_files() {
        let dir = tempfile::tempdir().unwrap();
        let screen = dir.path().join("screen.html");
        fs::write(&screen, "<html></html>").unwrap();

        let (tx, rx) = mpsc::channel();
        let _watcher = start(&screen, move || {
            let _ = tx.send(());
        })
        .unwrap();

        fs::write(dir.path().join("notes.txt"), "unrelated").unwrap();
        assert!(rx.recv_timeout(Duration::from_millis(700)).is_err());

        fs::write(&screen, "<html>changed</html>").unwrap();
        rx.recv_timeout(Duration::from_secs(5))
            .expect("screen writes are still observed");
    }
}
