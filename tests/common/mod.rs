#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use form_filler::config::{Delays, FillerConfig};
use form_filler::{Error, FieldKind, Result, Surface};

/// One element of the fake page.
#[derive(Debug, Clone)]
pub struct Node {
    pub selectors: Vec<String>,
    pub visible: bool,
    pub enabled: bool,
    pub text: String,
    pub question: String,
    pub parent: Option<usize>,
    pub fail_commit: bool,
}

impl Node {
    fn matches(&self, selector: &str) -> bool {
        self.selectors.iter().any(|s| s == selector)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Set(usize, String),
    Click(usize),
    Scroll(usize),
    Capture(PathBuf),
}

/// In-memory page: selectors match by exact string, handles are node indices.
#[derive(Default)]
pub struct FakePage {
    nodes: Vec<Node>,
    broken_selectors: HashSet<String>,
    actions: Arc<Mutex<Vec<Action>>>,
    reads: Mutex<Vec<usize>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, selector: &str) -> usize {
        self.nodes.push(Node {
            selectors: vec![selector.to_string()],
            visible: true,
            enabled: true,
            text: String::new(),
            question: String::new(),
            parent: None,
            fail_commit: false,
        });
        self.nodes.len() - 1
    }

    pub fn input(&mut self, kind: FieldKind, question: &str) -> usize {
        let id = self.add(kind.selector());
        self.nodes[id].question = question.to_string();
        id
    }

    /// A group of `kind` with `n` options; returns (group, options).
    pub fn group(&mut self, kind: FieldKind, n: usize) -> (usize, Vec<usize>) {
        let group = self.add(kind.selector());
        let option = kind.option_selector().expect("group kind");
        let options = (0..n)
            .map(|i| {
                let id = self.add(option);
                self.nodes[id].parent = Some(group);
                self.nodes[id].text = format!("Option {}", i + 1);
                id
            })
            .collect();
        (group, options)
    }

    /// A dropdown plus its options, first one a placeholder.
    pub fn dropdown(&mut self, n: usize) -> (usize, Vec<usize>) {
        let (listbox, options) = self.detached_dropdown(n);
        for &id in &options {
            self.nodes[id].parent = Some(listbox);
        }
        (listbox, options)
    }

    /// A dropdown whose options are rendered outside the listbox.
    pub fn detached_dropdown(&mut self, n: usize) -> (usize, Vec<usize>) {
        let listbox = self.add(FieldKind::Dropdown.selector());
        let option = FieldKind::Dropdown.option_selector().expect("dropdown options");
        let options = (0..n)
            .map(|i| {
                let id = self.add(option);
                self.nodes[id].text = if i == 0 {
                    "Choose".to_string()
                } else {
                    format!("Choice {i}")
                };
                id
            })
            .collect();
        (listbox, options)
    }

    pub fn node_mut(&mut self, id: usize) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn hide(&mut self, id: usize) {
        self.nodes[id].visible = false;
    }

    pub fn disable(&mut self, id: usize) {
        self.nodes[id].enabled = false;
    }

    pub fn break_selector(&mut self, selector: &str) {
        self.broken_selectors.insert(selector.to_string());
    }

    /// Shared handle on the action log, readable after the page is consumed.
    pub fn action_log(&self) -> Arc<Mutex<Vec<Action>>> {
        Arc::clone(&self.actions)
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }

    /// Nodes whose text was read, in order.
    pub fn reads(&self) -> Vec<usize> {
        self.reads.lock().unwrap().clone()
    }

    pub fn clicks(&self) -> Vec<usize> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::Click(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn values(&self) -> Vec<(usize, String)> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::Set(id, v) => Some((id, v)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, action: Action) {
        self.actions.lock().unwrap().push(action);
    }

    fn node(&self, id: usize) -> Result<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| Error::ElementNotFound(format!("node {id}")))
    }
}

#[async_trait]
impl Surface for FakePage {
    type Handle = usize;

    async fn find_all(&self, selector: &str) -> Result<Vec<usize>> {
        if self.broken_selectors.contains(selector) {
            return Err(Error::Js(format!("query failed for {selector}")));
        }
        Ok((0..self.nodes.len())
            .filter(|&id| self.nodes[id].matches(selector))
            .collect())
    }

    async fn find_within(&self, parent: &usize, selector: &str) -> Result<Vec<usize>> {
        if self.broken_selectors.contains(selector) {
            return Err(Error::Js(format!("query failed for {selector}")));
        }
        Ok((0..self.nodes.len())
            .filter(|&id| self.nodes[id].parent == Some(*parent) && self.nodes[id].matches(selector))
            .collect())
    }

    async fn is_visible(&self, handle: &usize) -> Result<bool> {
        Ok(self.node(*handle)?.visible)
    }

    async fn is_enabled(&self, handle: &usize) -> Result<bool> {
        Ok(self.node(*handle)?.enabled)
    }

    async fn read_text(&self, handle: &usize) -> Result<String> {
        let text = self.node(*handle)?.text.clone();
        self.reads.lock().unwrap().push(*handle);
        Ok(text)
    }

    async fn ancestor_text(&self, handle: &usize, _selector: &str) -> Result<String> {
        Ok(self.node(*handle)?.question.clone())
    }

    async fn set_value(&self, handle: &usize, text: &str) -> Result<()> {
        if self.node(*handle)?.fail_commit {
            return Err(Error::Commit(format!("node {handle} rejected input")));
        }
        self.push(Action::Set(*handle, text.to_string()));
        Ok(())
    }

    async fn click(&self, handle: &usize) -> Result<()> {
        if self.node(*handle)?.fail_commit {
            return Err(Error::Commit(format!("node {handle} rejected click")));
        }
        self.push(Action::Click(*handle));
        Ok(())
    }

    async fn scroll_into_view(&self, handle: &usize) -> Result<()> {
        self.node(*handle)?;
        self.push(Action::Scroll(*handle));
        Ok(())
    }

    async fn capture(&self, path: &Path) -> Result<()> {
        self.push(Action::Capture(path.to_path_buf()));
        Ok(())
    }
}

/// Defaults with pacing removed, a fixed seed and a short wait.
pub fn quick_config() -> FillerConfig {
    let mut config = FillerConfig::default();
    config.delays = Delays::none();
    config.browser.wait_timeout_secs = 0;
    config.behavior.seed = Some(7);
    config
}
