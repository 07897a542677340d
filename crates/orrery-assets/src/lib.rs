//! Asynchronous model loading.
//!
//! [`ModelLoader`] hands out a [`LoadTicket`] per request and resolves each
//! request on a worker thread; the frame loop drains finished loads once per
//! frame through [`poll_completed`](ModelLoader::poll_completed). From the
//! engine's perspective the suspension point is explicit: nothing blocks,
//! every ticket resolves at most once, and frames keep running while loads
//! are pending.
//!
//! Model files are RON descriptors carrying the model name, an initial
//! scale, and the animation clip list — the engine treats the visual payload
//! itself as opaque.

mod error;

use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{Receiver, Sender, unbounded};
use orrery_scene::Clip;
use serde::Deserialize;
use tracing::{debug, error};

pub use error::LoadError;

/// On-disk model descriptor.
#[derive(Debug, Clone, Deserialize)]
struct ModelDesc {
    name: String,
    #[serde(default = "default_scale")]
    scale: f32,
    #[serde(default)]
    clips: Vec<ClipDesc>,
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
struct ClipDesc {
    name: String,
    duration: f32,
}

/// A loaded model: its name, initial uniform scale, and clip list.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    pub name: String,
    pub scale: f32,
    pub clips: Vec<Clip>,
}

/// Identifies one load request. Resolves at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// A resolved load request.
#[derive(Debug)]
pub struct Completion {
    pub ticket: LoadTicket,
    pub result: Result<ModelData, LoadError>,
}

struct Request {
    ticket: LoadTicket,
    path: PathBuf,
}

/// Loads model descriptors off the frame thread.
///
/// Dropping the loader closes the request channel and ends the worker;
/// in-flight loads are not cancellable, their completions are simply never
/// drained.
pub struct ModelLoader {
    requests: Sender<Request>,
    completions: Receiver<Completion>,
    next_ticket: u64,
}

impl ModelLoader {
    /// Spawns the loader worker.
    #[must_use]
    pub fn new() -> Self {
        let (request_tx, request_rx) = unbounded::<Request>();
        let (completion_tx, completion_rx) = unbounded::<Completion>();

        let spawned = thread::Builder::new()
            .name("model-loader".to_string())
            .spawn(move || {
                for request in request_rx {
                    let result = read_model(&request.path);
                    // The receiver may already be gone during shutdown.
                    let _ = completion_tx.send(Completion {
                        ticket: request.ticket,
                        result,
                    });
                }
            });
        if let Err(err) = spawned {
            // Every future load stalls, matching the no-retry contract;
            // the process keeps running frames.
            error!("failed to spawn model loader worker: {err}");
        }

        Self {
            requests: request_tx,
            completions: completion_rx,
            next_ticket: 0,
        }
    }

    /// Requests a load and returns its ticket.
    ///
    /// The ticket resolves through [`poll_completed`](Self::poll_completed)
    /// exactly once, with either the model data or a [`LoadError`]. If the
    /// worker is gone the ticket never resolves (a permanently stalled slot).
    pub fn load(&mut self, path: impl Into<PathBuf>) -> LoadTicket {
        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        let path = path.into();
        debug!(?ticket, path = %path.display(), "model load requested");
        if self.requests.send(Request { ticket, path }).is_err() {
            error!(?ticket, "model loader worker is gone; load will never complete");
        }
        ticket
    }

    /// Drains every load that finished since the last poll. Called once per
    /// frame by the frame driver.
    pub fn poll_completed(&mut self) -> Vec<Completion> {
        self.completions.try_iter().collect()
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_model(path: &Path) -> Result<ModelData, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let desc: ModelDesc = ron::from_str(&contents).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ModelData {
        name: desc.name,
        scale: desc.scale,
        clips: desc
            .clips
            .into_iter()
            .map(|c| Clip::new(c.name, c.duration))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::{Duration, Instant};

    fn write_model(dir: &tempfile::TempDir, file: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(file);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn wait_for(loader: &mut ModelLoader, count: usize) -> Vec<Completion> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut done = Vec::new();
        while done.len() < count {
            done.extend(loader.poll_completed());
            assert!(Instant::now() < deadline, "loader timed out");
            thread::sleep(Duration::from_millis(1));
        }
        done
    }

    #[test]
    fn test_load_resolves_with_model_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(
            &dir,
            "comet.ron",
            r#"(name: "comet_core", scale: 2.0, clips: [(name: "explode", duration: 1.5)])"#,
        );
        let mut loader = ModelLoader::new();
        let ticket = loader.load(&path);
        let done = wait_for(&mut loader, 1);
        assert_eq!(done[0].ticket, ticket);
        let model = done[0].result.as_ref().unwrap();
        assert_eq!(model.name, "comet_core");
        assert_eq!(model.scale, 2.0);
        assert_eq!(model.clips, vec![Clip::new("explode", 1.5)]);
    }

    #[test]
    fn test_missing_file_resolves_with_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = ModelLoader::new();
        loader.load(dir.path().join("nope.ron"));
        let done = wait_for(&mut loader, 1);
        assert!(matches!(done[0].result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_malformed_descriptor_resolves_with_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(&dir, "bad.ron", "{{not ron}}");
        let mut loader = ModelLoader::new();
        loader.load(&path);
        let done = wait_for(&mut loader, 1);
        assert!(matches!(done[0].result, Err(LoadError::Parse { .. })));
    }

    #[test]
    fn test_each_ticket_resolves_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(&dir, "m.ron", r#"(name: "m")"#);
        let mut loader = ModelLoader::new();
        let a = loader.load(&path);
        let b = loader.load(&path);
        assert_ne!(a, b);
        let done = wait_for(&mut loader, 2);
        let mut tickets: Vec<LoadTicket> = done.iter().map(|c| c.ticket).collect();
        tickets.sort_by_key(|t| t.0);
        assert_eq!(tickets, vec![a, b]);
        // Fully drained: nothing resolves twice.
        assert!(loader.poll_completed().is_empty());
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(&dir, "plain.ron", r#"(name: "craft")"#);
        let mut loader = ModelLoader::new();
        loader.load(&path);
        let done = wait_for(&mut loader, 1);
        let model = done[0].result.as_ref().unwrap();
        assert_eq!(model.scale, 1.0);
        assert!(model.clips.is_empty());
    }
}
