//! Application context.
//!
//! Built once per process from the plugin's main file and handed around by
//! reference. It owns the plugin metadata, the resolver and the attachment
//! set, and drives the bootstrap sequence:
//!
//! ```text
//! new() ──▶ Constructed ──attach()──▶ Attached ──hooks()/run()──▶ Running
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ports::{Filesystem, HeaderReader},
        services::{
            host::Host,
            lifecycle::{Attachment, DispatchReport, LifecycleDispatcher},
            resolver::Resolver,
        },
    },
    domain::{ClassIdentifier, DomainError, Phase, PluginHeaders, header_value},
    error::KickstartResult,
};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost/wp-content/plugins";

/// Read-only plugin metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    /// Canonical path of the main plugin file.
    pub plugin_file: PathBuf,
    /// `<plugin-dir>/<main-file>`, the host's identifier for the plugin.
    pub basename: String,
    /// Canonical project root (the plugin directory).
    pub path: PathBuf,
    /// Public URL of the plugin directory, with a trailing slash.
    pub url: String,
    pub debug: bool,
    pub headers: PluginHeaders,
}

impl AppInfo {
    /// Header value, `""` when absent.
    pub fn header(&self, name: &str) -> &str {
        header_value(&self.headers, name)
    }

    pub fn version(&self) -> &str {
        self.header("Version")
    }

    /// URL of a file relative to the plugin directory.
    pub fn url_for(&self, relative: &str) -> String {
        format!("{}{}", self.url, relative.trim_start_matches('/'))
    }
}

/// Construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    pub base_url: String,
    pub debug: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            debug: false,
        }
    }
}

/// Everything a factory may need to build an attachment.
pub struct AttachContext<'a> {
    pub info: &'a AppInfo,
    pub filesystem: Arc<dyn Filesystem>,
}

/// Builds one attachment.
pub type AttachmentFactory = fn(&AttachContext<'_>) -> Box<dyn Attachment>;

/// Ordered identifier → factory table.
#[derive(Default)]
pub struct AttachmentRegistry {
    entries: Vec<(ClassIdentifier, AttachmentFactory)>,
}

impl AttachmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Identifiers are not deduplicated.
    pub fn register(
        &mut self,
        identifier: ClassIdentifier,
        factory: AttachmentFactory,
    ) -> &mut Self {
        self.entries.push((identifier, factory));
        self
    }

    /// First factory registered under `identifier`.
    pub fn get(&self, identifier: &ClassIdentifier) -> Option<AttachmentFactory> {
        self.entries
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, factory)| *factory)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &ClassIdentifier> {
        self.entries.iter().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppState {
    Constructed,
    Attached,
    Running,
}

/// Reports of the two bootstrap broadcasts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartReport {
    pub hooks: DispatchReport,
    pub run: DispatchReport,
}

/// The plugin application.
pub struct Application {
    info: AppInfo,
    filesystem: Arc<dyn Filesystem>,
    resolver: Resolver,
    attachments: Vec<Box<dyn Attachment>>,
    state: AppState,
}

impl Application {
    /// Construct from the plugin's main file.
    ///
    /// Fails with [`DomainError::InvalidPluginFile`] when the path is empty
    /// or not an existing file. Header read failures are logged and leave the
    /// headers empty.
    #[instrument(skip_all, fields(plugin_file = %plugin_file.as_ref().display()))]
    pub fn new(
        plugin_file: impl AsRef<Path>,
        options: AppOptions,
        filesystem: Arc<dyn Filesystem>,
        headers: &dyn HeaderReader,
    ) -> KickstartResult<Self> {
        let plugin_file = plugin_file.as_ref();
        let invalid = |reason: &str| DomainError::InvalidPluginFile {
            path: plugin_file.to_path_buf(),
            reason: reason.into(),
        };

        if plugin_file.as_os_str().is_empty() {
            return Err(invalid("no plugin file supplied").into());
        }

        if !filesystem.is_file(plugin_file) {
            return Err(invalid("not an existing file").into());
        }

        let plugin_file = filesystem.canonicalize(plugin_file)?;

        let (root, dir_name, file_name) = match (
            plugin_file.parent(),
            plugin_file.file_name().and_then(|n| n.to_str()),
        ) {
            (Some(root), Some(file)) => {
                let dir = root
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default()
                    .to_owned();
                (root.to_path_buf(), dir, file.to_owned())
            }
            _ => return Err(invalid("cannot determine the plugin directory").into()),
        };

        let basename = if dir_name.is_empty() {
            file_name
        } else {
            format!("{dir_name}/{file_name}")
        };

        let url = format!("{}/{}/", options.base_url.trim_end_matches('/'), dir_name);

        let headers = match headers.read_headers(&plugin_file) {
            Ok(headers) => headers,
            Err(e) => {
                warn!(error = %e, "Could not read plugin headers");
                PluginHeaders::new()
            }
        };

        let resolver = Resolver::new(root.clone(), Arc::clone(&filesystem));

        let info = AppInfo {
            plugin_file,
            basename,
            path: root,
            url,
            debug: options.debug,
            headers,
        };

        info!(basename = %info.basename, version = info.version(), "Application constructed");

        Ok(Self {
            info,
            filesystem,
            resolver,
            attachments: Vec::new(),
            state: AppState::Constructed,
        })
    }

    pub fn info(&self) -> &AppInfo {
        &self.info
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn filesystem(&self) -> Arc<dyn Filesystem> {
        Arc::clone(&self.filesystem)
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn header(&self, name: &str) -> &str {
        self.info.header(name)
    }

    pub fn version(&self) -> &str {
        self.info.version()
    }

    pub fn url(&self, relative: &str) -> String {
        self.info.url_for(relative)
    }

    /// Resolve an identifier inside the plugin directory.
    pub fn resolve(&self, identifier: &ClassIdentifier) -> Option<PathBuf> {
        self.resolver.resolve(identifier)
    }

    pub fn attachments(&self) -> &[Box<dyn Attachment>] {
        &self.attachments
    }

    pub fn attachments_mut(&mut self) -> &mut [Box<dyn Attachment>] {
        &mut self.attachments
    }

    /// Build every attachment in `registry`, in order.
    ///
    /// Only the first call has an effect. Returns the number attached.
    pub fn attach(&mut self, registry: &AttachmentRegistry) -> usize {
        if self.state != AppState::Constructed {
            debug!("Attachments already populated");
            return 0;
        }

        let context = AttachContext {
            info: &self.info,
            filesystem: Arc::clone(&self.filesystem),
        };

        let built: Vec<_> = registry
            .entries
            .iter()
            .map(|(identifier, factory)| {
                debug!(%identifier, "Attaching");
                factory(&context)
            })
            .collect();

        let count = built.len();
        self.attachments.extend(built);
        self.state = AppState::Attached;
        info!(count, "Attached");
        count
    }

    pub fn hooks(&mut self, host: &mut Host) -> DispatchReport {
        LifecycleDispatcher::dispatch(&mut self.attachments, Phase::Hooks, host)
    }

    pub fn run(&mut self, host: &mut Host) -> DispatchReport {
        let report = LifecycleDispatcher::dispatch(&mut self.attachments, Phase::Run, host);
        self.state = AppState::Running;
        report
    }

    pub fn deactivate(&mut self, host: &mut Host) -> DispatchReport {
        LifecycleDispatcher::dispatch(&mut self.attachments, Phase::Deactivate, host)
    }

    /// attach → hooks → run.
    ///
    /// Returns `None` when the application is already running.
    #[instrument(skip_all)]
    pub fn start(&mut self, registry: &AttachmentRegistry, host: &mut Host) -> Option<StartReport> {
        if self.state == AppState::Running {
            debug!("Already started");
            return None;
        }

        self.attach(registry);
        let hooks = self.hooks(host);
        let run = self.run(host);
        Some(StartReport { hooks, run })
    }
}
