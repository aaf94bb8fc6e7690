//! One host run: load the directory file, start the extension, save on exit.

use std::path::PathBuf;
use std::sync::Arc;

use posixid::{
    Context, Plugin, Settings,
    directory::InMemory,
    plugin::{EventArgs, HandlerRegistry, StartupReport},
};

use crate::cli::DirectoryArgs;

pub struct Session {
    path: PathBuf,
    directory: Arc<InMemory>,
    registry: HandlerRegistry,
    startup: StartupReport,
}

impl Session {
    /// Load the directory file and run the startup reconciliation.
    ///
    /// A missing file starts an empty directory.
    pub fn open(
        args: &DirectoryArgs,
        settings: Settings,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let directory = Arc::new(InMemory::load_from_file(&args.file)?);
        tracing::debug!(
            file = %args.file.display(),
            users = directory.user_count(),
            groups = directory.group_count(),
            "Loaded directory"
        );

        let plugin = Arc::new(Plugin::new(Context::new(directory.clone(), settings)));
        let startup = plugin.init()?;

        let mut registry = HandlerRegistry::new();
        plugin.register(&mut registry);

        Ok(Self {
            path: args.file.clone(),
            directory,
            registry,
            startup,
        })
    }

    pub fn directory(&self) -> &InMemory {
        &self.directory
    }

    pub fn startup(&self) -> &StartupReport {
        &self.startup
    }

    /// Hand a lifecycle event to the registered handlers.
    pub fn dispatch(&self, args: EventArgs) -> posixid::Result<EventArgs> {
        self.registry.dispatch(args)
    }

    /// Write the directory back to its file.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.directory.save_to_file(&self.path)?;
        tracing::debug!(file = %self.path.display(), "Saved directory");
        Ok(())
    }
}
