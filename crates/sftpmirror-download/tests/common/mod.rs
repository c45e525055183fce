//! Common test utilities.
//!
//! An in-memory remote tree with a shared call journal, plus recording
//! adapters for the local filesystem, the failure log and events.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use sftpmirror_core::ports::{
    FailureLogError, FailureLogPort, FailureLogWriter, LocalFsError, LocalFsPort,
    MirrorEventEmitterPort, RemoteFsError, RemoteFsPort,
};
use sftpmirror_core::{EntryKind, EntryMeta, MirrorEvent, RemotePath};
use sftpmirror_download::StdLocalFs;

/// One observable side effect, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Stat(String),
    List(String),
    Download(String),
    EnsureDir(PathBuf),
}

/// Shared, ordered journal of calls across fakes.
pub type Journal = Rc<RefCell<Vec<Call>>>;

#[derive(Debug, Clone)]
enum Node {
    Dir(Vec<String>),
    File(Vec<u8>),
    /// Transfer writes these bytes, then fails.
    Broken(Vec<u8>),
    /// Symlink or other non-regular entry; transfers succeed with the target bytes.
    Other(Vec<u8>),
}

/// In-memory remote filesystem keyed by full remote path.
#[derive(Debug)]
pub struct FakeRemote {
    nodes: BTreeMap<String, Node>,
    journal: Journal,
}

impl FakeRemote {
    pub fn new(journal: Journal) -> Self {
        Self {
            nodes: BTreeMap::new(),
            journal,
        }
    }

    /// Add a directory. Children are listed in insertion order.
    pub fn dir(mut self, path: &str) -> Self {
        self.attach(path);
        self.nodes
            .entry(path.to_string())
            .or_insert_with(|| Node::Dir(Vec::new()));
        self
    }

    pub fn file(mut self, path: &str, content: &[u8]) -> Self {
        self.attach(path);
        self.nodes
            .insert(path.to_string(), Node::File(content.to_vec()));
        self
    }

    pub fn broken_file(mut self, path: &str, partial: &[u8]) -> Self {
        self.attach(path);
        self.nodes
            .insert(path.to_string(), Node::Broken(partial.to_vec()));
        self
    }

    pub fn symlink(mut self, path: &str, target_content: &[u8]) -> Self {
        self.attach(path);
        self.nodes
            .insert(path.to_string(), Node::Other(target_content.to_vec()));
        self
    }

    /// Keep a name in its parent's listing but drop the entry itself, as if
    /// it was deleted between list and stat.
    pub fn vanish(mut self, path: &str) -> Self {
        self.nodes.remove(path);
        self
    }

    fn attach(&mut self, path: &str) {
        let (parent, name) = match path.rsplit_once('/') {
            Some(("", name)) => ("/", name),
            Some((parent, name)) => (parent, name),
            None => return,
        };
        if let Some(Node::Dir(children)) = self.nodes.get_mut(parent) {
            if !children.iter().any(|c| c == name) {
                children.push(name.to_string());
            }
        }
    }

    fn log(&self, call: Call) {
        self.journal.borrow_mut().push(call);
    }
}

impl RemoteFsPort for FakeRemote {
    fn stat(&self, path: &str) -> Result<EntryMeta, RemoteFsError> {
        self.log(Call::Stat(path.to_string()));
        match self.nodes.get(path) {
            Some(Node::Dir(_)) => Ok(EntryMeta::directory()),
            Some(Node::File(bytes) | Node::Broken(bytes)) => Ok(EntryMeta::file(bytes.len() as u64)),
            Some(Node::Other(_)) => Ok(EntryMeta::of_kind(EntryKind::Other)),
            None => Err(RemoteFsError::not_found(path)),
        }
    }

    fn list(&self, path: &str) -> Result<Vec<String>, RemoteFsError> {
        self.log(Call::List(path.to_string()));
        match self.nodes.get(path) {
            Some(Node::Dir(children)) => Ok(children.clone()),
            Some(_) => Err(RemoteFsError::protocol(path, "not a directory")),
            None => Err(RemoteFsError::not_found(path)),
        }
    }

    fn download(&self, remote: &str, local: &Path) -> Result<u64, RemoteFsError> {
        self.log(Call::Download(remote.to_string()));
        let write = |bytes: &[u8]| {
            fs::write(local, bytes).map_err(|e| RemoteFsError::local_write(remote, e.to_string()))
        };
        match self.nodes.get(remote) {
            Some(Node::File(bytes) | Node::Other(bytes)) => {
                write(bytes)?;
                Ok(bytes.len() as u64)
            }
            Some(Node::Broken(partial)) => {
                write(partial)?;
                Err(RemoteFsError::protocol(remote, "connection reset"))
            }
            Some(Node::Dir(_)) => Err(RemoteFsError::protocol(remote, "is a directory")),
            None => Err(RemoteFsError::not_found(remote)),
        }
    }
}

/// `StdLocalFs` that journals every `ensure_dir`.
pub struct JournalingLocalFs {
    inner: StdLocalFs,
    journal: Journal,
}

impl JournalingLocalFs {
    pub fn new(journal: Journal) -> Self {
        Self {
            inner: StdLocalFs::new(),
            journal,
        }
    }
}

impl LocalFsPort for JournalingLocalFs {
    fn ensure_dir(&self, path: &Path) -> Result<(), LocalFsError> {
        self.journal
            .borrow_mut()
            .push(Call::EnsureDir(path.to_path_buf()));
        self.inner.ensure_dir(path)
    }

    fn remove_partial(&self, path: &Path) -> Result<(), LocalFsError> {
        self.inner.remove_partial(path)
    }
}

/// Failure log kept in memory.
#[derive(Default)]
pub struct MemoryFailureLog {
    pub opened: RefCell<u32>,
    pub lines: Rc<RefCell<Vec<String>>>,
}

struct MemoryWriter(Rc<RefCell<Vec<String>>>);

impl FailureLogWriter for MemoryWriter {
    fn record(&mut self, path: &RemotePath) -> Result<(), FailureLogError> {
        self.0.borrow_mut().push(path.to_string());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), FailureLogError> {
        Ok(())
    }
}

impl FailureLogPort for MemoryFailureLog {
    fn open(&self) -> Result<Box<dyn FailureLogWriter>, FailureLogError> {
        *self.opened.borrow_mut() += 1;
        self.lines.borrow_mut().clear();
        Ok(Box::new(MemoryWriter(Rc::clone(&self.lines))))
    }
}

impl MemoryFailureLog {
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

/// Event sink that keeps everything.
#[derive(Default)]
pub struct RecordingEmitter {
    pub events: RefCell<Vec<MirrorEvent>>,
}

impl MirrorEventEmitterPort for RecordingEmitter {
    fn emit(&self, event: MirrorEvent) {
        self.events.borrow_mut().push(event);
    }
}

pub fn new_journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// Position of the first matching call, panicking if absent.
pub fn position(journal: &Journal, call: &Call) -> usize {
    journal
        .borrow()
        .iter()
        .position(|c| c == call)
        .unwrap_or_else(|| panic!("{call:?} never happened"))
}

/// How many times a call happened.
pub fn count(journal: &Journal, call: &Call) -> usize {
    journal.borrow().iter().filter(|c| *c == call).count()
}
