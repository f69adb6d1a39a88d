//! Pipeline orchestration: resolve → render → write, once or in a loop.
//!
//! The engine owns everything that outlives a single pass: the run
//! options, the loaded templates, and the inspector cache. A one-shot
//! build constructs it, calls [`Engine::run`], and is done; watch mode
//! keeps the same engine alive so the cache pays off across rebuilds.

use crate::cache::InspectCache;
use crate::config::{ConfigError, Options};
use crate::output;
use crate::render::{self, RenderError, Templates};
use crate::resolve::{absolutize, ResolveError, Resolver};
use crate::types::RouteTree;
use crate::watch::{ChangeEvent, ChangeKind, WatchError, Watcher};
use std::fs;
use std::io;
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Watch(#[from] WatchError),
    #[error("could not write output: {0}")]
    Io(#[from] io::Error),
}

pub struct Engine {
    options: Options,
    templates: Templates,
    cache: InspectCache,
}

impl Engine {
    /// Validate the options and load templates. Template problems are
    /// caught here, before any scanning happens.
    pub fn new(options: Options) -> Result<Self, EngineError> {
        options.validate()?;
        let templates = Templates::load(options.template_dir.as_deref())?;
        Ok(Self {
            options,
            templates,
            cache: InspectCache::new(),
        })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn cache(&self) -> &InspectCache {
        &self.cache
    }

    /// Resolve the route tree without touching the output file.
    pub fn scan(&mut self) -> Result<RouteTree, EngineError> {
        let mut resolver = Resolver::new(
            &self.options.input_dir,
            &self.options.output_dir,
            &self.options.allowed_extensions,
            &self.options.keywords,
            &mut self.cache,
        );
        Ok(resolver.resolve()?)
    }

    /// One full pass: resolve, render, write the routes file.
    pub fn run(&mut self) -> Result<RouteTree, EngineError> {
        let tree = self.scan()?;
        let text = render::render(&tree, &self.templates)?;
        fs::create_dir_all(&self.options.output_dir)?;
        let output_path = self.options.output_path();
        fs::write(&output_path, text)?;
        info!("{}", output::format_build_summary(&output_path, &tree));
        Ok(tree)
    }

    /// Whether the routes file on disk matches what a fresh pass would
    /// produce. Missing file counts as stale.
    pub fn check(&mut self) -> Result<bool, EngineError> {
        let tree = self.scan()?;
        let expected = render::render(&tree, &self.templates)?;
        let current = fs::read_to_string(self.options.output_path()).unwrap_or_default();
        Ok(current == expected)
    }

    /// Build once, then rebuild on every filesystem change until the
    /// watcher dies.
    ///
    /// Startup events are drained without triggering rebuilds. Real events
    /// invalidate the inspector cache for the touched path, then a burst of
    /// follow-up events is coalesced into the same rebuild. Pass failures
    /// in the loop are logged, not fatal — a half-saved file should not
    /// kill the session.
    pub fn run_watch(&mut self) -> Result<(), EngineError> {
        let watcher = Watcher::watch(&self.options.input_dir)?;
        self.run()?;

        let mut pending_startup = watcher.startup_events();
        loop {
            let event = watcher.recv()?;
            if pending_startup > 0 {
                pending_startup -= 1;
                continue;
            }
            self.apply(&event);

            while let Some(extra) = watcher.try_recv()? {
                if pending_startup > 0 {
                    pending_startup -= 1;
                    continue;
                }
                self.apply(&extra);
            }

            match self.run() {
                Ok(_) => info!("{}", output::format_cache_summary(self.cache.stats())),
                Err(err) => error!("rebuild failed: {err}"),
            }
        }
    }

    /// Cache bookkeeping for one change event.
    fn apply(&mut self, event: &ChangeEvent) {
        info!("{:?}: {}", event.kind, event.path.display());
        match event.kind {
            ChangeKind::Modified | ChangeKind::Removed => {
                self.cache.invalidate(&absolutize(&event.path));
            }
            // New files miss the cache naturally.
            ChangeKind::Added => {}
        }
    }
}
