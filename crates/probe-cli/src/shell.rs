//! Interactive shell and the operations it shares with the one-shot
//! subcommands. All user-triggered actions run through the harness
//! controller, one at a time.

use anyhow::Result;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use probe_core::config::ProbeConfig;
use probe_core::controller::{Harness, NoticeKind};
use probe_core::render::render_listing;
use probe_core::transcode::{self, DownloadBlob};
use probe_core::ProbeError;

/// Events fed back into the shell loop.
#[derive(Debug)]
pub enum UiEvent {
    /// The dismissal timer for notice `id` fired.
    NoticeExpired { id: u64 },
}

pub struct Shell {
    harness: Harness,
    config: ProbeConfig,
    event_tx: mpsc::Sender<UiEvent>,
}

impl Shell {
    pub fn new(harness: Harness, config: ProbeConfig) -> (Self, mpsc::Receiver<UiEvent>) {
        let (event_tx, event_rx) = mpsc::channel(16);
        (
            Self {
                harness,
                config,
                event_tx,
            },
            event_rx,
        )
    }

    /// Fetch the listing and render it. Failure clears the listing.
    pub async fn do_list(&mut self) -> bool {
        let client = match self.harness.client() {
            Ok(client) => client,
            Err(e) => {
                self.show(e.to_string(), NoticeKind::Error);
                return false;
            }
        };
        if !self.harness.request_started() {
            warn!("a request is already in flight");
            return false;
        }
        let result = client.list_files().await;
        self.harness.request_finished();

        match result {
            Ok(files) => {
                let count = files.len();
                self.harness.files_loaded(files);
                print!("{}", render_listing(self.harness.files()));
                if count == 0 {
                    println!("(no files stored — upload one to get started)");
                }
                self.show(format!("loaded {count} files"), NoticeKind::Success);
                true
            }
            Err(e) => {
                self.harness.list_failed();
                self.show(format!("error loading files: {e}"), NoticeKind::Error);
                false
            }
        }
    }

    /// Encode a local file and upload it; on success refresh the listing.
    pub async fn do_upload(&mut self, path: &Path, name: Option<&str>) -> bool {
        let client = match self.harness.client() {
            Ok(client) => client,
            Err(e) => {
                self.show(e.to_string(), NoticeKind::Error);
                return false;
            }
        };

        let filename = match name {
            Some(n) => n.to_string(),
            None => match path.file_name() {
                Some(n) => n.to_string_lossy().into_owned(),
                None => {
                    self.show(
                        format!("{} has no usable filename", path.display()),
                        NoticeKind::Error,
                    );
                    return false;
                }
            },
        };

        let content = match transcode::encode_file(path) {
            Ok(content) => content,
            Err(e) => {
                self.show(format!("upload error: {e}"), NoticeKind::Error);
                return false;
            }
        };

        if !self.harness.request_started() {
            warn!("a request is already in flight");
            return false;
        }
        let result = client.upload(&filename, content).await;
        self.harness.request_finished();

        match result {
            Ok(()) => {
                self.show(
                    format!("uploaded {filename:?} successfully"),
                    NoticeKind::Success,
                );
                // refresh the listing, as the original harness does
                self.do_list().await;
                true
            }
            Err(e) => {
                self.show(format!("upload error: {e}"), NoticeKind::Error);
                false
            }
        }
    }

    /// Download a stored file, decode it, and write it to disk.
    pub async fn do_download(&mut self, filename: &str, dest: Option<&Path>) -> bool {
        let client = match self.harness.client() {
            Ok(client) => client,
            Err(e) => {
                self.show(e.to_string(), NoticeKind::Error);
                return false;
            }
        };
        if !self.harness.request_started() {
            warn!("a request is already in flight");
            return false;
        }
        let result = client.download(filename).await;
        self.harness.request_finished();

        let payload = match result {
            Ok(payload) => payload,
            Err(e) => {
                self.show(format!("download error: {e}"), NoticeKind::Error);
                return false;
            }
        };

        let blob = match transcode::decode_for_download(&payload.content, &payload.content_type) {
            Ok(blob) => blob,
            Err(e) => {
                self.show(format!("download error: {e}"), NoticeKind::Error);
                return false;
            }
        };

        match self.write_blob(filename, dest, &blob) {
            Ok(path) => {
                self.show(
                    format!(
                        "downloaded {filename:?} ({} bytes, {}) to {}",
                        blob.bytes.len(),
                        blob.content_type,
                        path.display()
                    ),
                    NoticeKind::Success,
                );
                true
            }
            Err(e) => {
                self.show(format!("download error: {e}"), NoticeKind::Error);
                false
            }
        }
    }

    /// Resolve the destination path and write the decoded bytes. Only the
    /// basename of a server-supplied filename is ever used.
    fn write_blob(
        &self,
        filename: &str,
        dest: Option<&Path>,
        blob: &DownloadBlob,
    ) -> Result<PathBuf, ProbeError> {
        let path = match dest {
            Some(p) => p.to_path_buf(),
            None => {
                let basename = Path::new(filename)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "download.bin".to_string());
                match &self.config.download_dir {
                    Some(dir) => dir.join(basename),
                    None => PathBuf::from(basename),
                }
            }
        };
        std::fs::write(&path, &blob.bytes).map_err(|source| ProbeError::FileWrite {
            path: path.display().to_string(),
            source,
        })?;
        Ok(path)
    }

    /// Show a transient notice and schedule its dismissal. The scheduled
    /// event carries the notice id, so a timer outlived by a newer message
    /// dismisses nothing.
    fn show(&mut self, text: String, kind: NoticeKind) {
        match kind {
            NoticeKind::Error => eprintln!("error: {text}"),
            NoticeKind::Success => println!("ok: {text}"),
            NoticeKind::Info => println!("{text}"),
        }
        let id = self.harness.message_shown(text, kind);
        let ttl = Duration::from_secs(self.config.notice_ttl_secs);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let _ = tx.send(UiEvent::NoticeExpired { id }).await;
        });
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::NoticeExpired { id } => {
                if self.harness.message_expired(id) {
                    debug!("notice {id} expired");
                }
            }
        }
    }

    /// Dispatch one shell line. Returns false when the shell should exit.
    async fn handle_line(&mut self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return true;
        };
        let args: Vec<&str> = parts.collect();

        match (command, args.as_slice()) {
            ("url", [url]) => {
                self.harness.set_api_url(url);
                match self.harness.api_url() {
                    Some(url) => println!("api url set to {url}"),
                    None => println!("api url cleared"),
                }
            }
            ("url", []) => match self.harness.api_url() {
                Some(url) => println!("api url: {url}"),
                None => println!("no api url configured"),
            },
            ("list", []) => {
                self.do_list().await;
            }
            ("upload", [path]) => {
                self.do_upload(Path::new(path), None).await;
            }
            ("upload", [path, name]) => {
                self.do_upload(Path::new(path), Some(name)).await;
            }
            ("download", [filename]) => {
                self.do_download(filename, None).await;
            }
            ("download", [filename, dest]) => {
                self.do_download(filename, Some(Path::new(dest))).await;
            }
            ("help", _) => print_help(),
            ("quit" | "exit", _) => return false,
            _ => {
                println!("unrecognized command: {line:?} (try `help`)");
            }
        }
        true
    }
}

fn print_help() {
    println!("commands:");
    println!("  url [BASE]              show or set the API base URL");
    println!("  list                    fetch and render the stored-file listing");
    println!("  upload PATH [NAME]      upload a local file");
    println!("  download NAME [DEST]    download a stored file");
    println!("  help                    this text");
    println!("  quit                    leave the shell");
}

/// Run the interactive shell: one loop over stdin lines, notice-expiry
/// events, and Ctrl+C.
pub async fn run(mut shell: Shell, mut event_rx: mpsc::Receiver<UiEvent>) -> Result<()> {
    println!("storage-probe interactive shell (type `help` for commands)");
    if shell.harness.api_url().is_none() {
        println!("no api url configured yet — set one with `url BASE`");
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("probe> ");
        std::io::stdout().flush()?;

        // Expiry events only mutate notice state; they must not disturb
        // the prompt, so the prompt is reprinted for stdin lines alone.
        let line = loop {
            tokio::select! {
                line = lines.next_line() => break line?,
                Some(event) = event_rx.recv() => {
                    shell.handle_event(event);
                }
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    return Ok(());
                }
            }
        };

        match line {
            Some(line) => {
                if !shell.handle_line(line.trim()).await {
                    break;
                }
            }
            None => break, // stdin closed
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_expiry_event_dismisses_only_its_notice() {
        let (mut shell, _event_rx) = Shell::new(Harness::new(), ProbeConfig::default());

        shell.show("uploaded".to_string(), NoticeKind::Success);
        let first = shell.harness.notice().unwrap().id;
        shell.show("boom".to_string(), NoticeKind::Error);
        let second = shell.harness.notice().unwrap().id;

        // a timer left over from the first notice fires late
        shell.handle_event(UiEvent::NoticeExpired { id: first });
        assert_eq!(shell.harness.notice().unwrap().text, "boom");

        shell.handle_event(UiEvent::NoticeExpired { id: second });
        assert!(shell.harness.notice().is_none());
    }
}
