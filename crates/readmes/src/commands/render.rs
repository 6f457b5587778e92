//! `readmes render` command implementation.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, ValueEnum};
use readmes_browser::{
    BROWSER_VIEW, FILE_VIEW, FragmentRenderer, PageActivationFilter, PageData, PageKind,
    PermissionCheck, ReadmeDiscovery, ReadmePipeline, RequestContext, Resource, SkipReason,
    StaticPermissions,
};
use readmes_config::{Backend, CliSettings, Config, RepositoryConfig};
use readmes_render::{
    AssetSink, Flavor, MimetypeResolver, Preview, RegistryPreview, RendererRegistry,
    RequestAssets,
};
use readmes_repo::{DirEntry, FsRepository, GitRepository, NodeKind, Repository};
use readmes_tree::{NodePath, TreeNode, TreeSplicer};

use crate::error::CliError;
use crate::output::Output;
use crate::page::{BROWSER_TEMPLATE, Page};

/// Repository backend selectable on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Fs,
    Git,
}

impl From<BackendArg> for Backend {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Fs => Self::Fs,
            BackendArg::Git => Self::Git,
        }
    }
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Repository path to render (default: repository root).
    #[arg(default_value = "")]
    path: String,

    /// Revision to read (git backend only).
    #[arg(short, long)]
    rev: Option<String>,

    /// Repository root (overrides config).
    #[arg(long)]
    root: Option<PathBuf>,

    /// Repository backend (overrides config).
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Node path of the element README blocks are inserted before
    /// (overrides config).
    #[arg(long)]
    anchor: Option<String>,

    /// XHTML page template (default: built-in browser page).
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover readmes.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;

        let template = match &self.template {
            Some(path) => std::fs::read_to_string(path)?,
            None => BROWSER_TEMPLATE.to_owned(),
        };

        let html = render_page(&config, &template, &self.path, self.rev.as_deref(), &output)?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(html.as_bytes())?;
        stdout.flush()?;

        output.success(&format!("Rendered /{}", self.path.trim_matches('/')));
        Ok(())
    }

    /// Config overrides given on the command line.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            root: self.root.clone(),
            backend: self.backend.map(Backend::from),
            anchor: self.anchor.clone(),
        }
    }
}

/// Render the browser page for `path` at `revision` into HTML.
fn render_page(
    config: &Config,
    template: &str,
    path: &str,
    revision: Option<&str>,
    output: &Output,
) -> Result<String, CliError> {
    let path = path.trim_matches('/');
    let repo = open_repository(&config.repository_resolved)?;
    let preview: Arc<dyn Preview> = Arc::new(
        RegistryPreview::new(Arc::new(RendererRegistry::with_defaults()))
            .with_max_preview_size(config.browser.max_preview_size),
    );
    let resolver = MimetypeResolver::default().with_sniff_bytes(config.browser.sniff_bytes);
    let anchor: NodePath = config.browser.anchor.parse()?;

    let filter = PageActivationFilter::new(
        ReadmePipeline::new(Arc::clone(&repo), Arc::clone(&preview))
            .with_discovery(ReadmeDiscovery::new(&config.browser.readme_prefix))
            .with_resolver(resolver.clone())
            .with_splicer(TreeSplicer::new(anchor)),
    );
    let perm = StaticPermissions::new(config.permissions.granted.iter().cloned());
    perm.require(BROWSER_VIEW, &Resource::new(path, revision))?;

    let mut page = Page::parse(template)?;
    page.set_title(path);
    let mut assets = RequestAssets::new();

    let data = match repo.kind(path, revision)? {
        NodeKind::Directory => {
            let entries = repo.list(path, revision)?;
            page.fill_listing(path, &entries);
            PageData::directory(path, revision, entries)
        }
        NodeKind::File => {
            let data = PageData::file(path, revision);
            perm.require(FILE_VIEW, &data.resource())?;
            let files = FragmentRenderer::new(Arc::clone(&repo), Arc::clone(&preview))
                .with_resolver(resolver);
            page.fill_preview(file_preview(&files, path, revision, &mut assets)?);
            data
        }
    };

    let report = filter.filter(
        PageKind::Browser,
        page.tree_mut(),
        &data,
        &mut RequestContext::new(&perm, &mut assets),
    )?;
    if let Some(report) = report {
        output.info(&format!(
            "READMEs: {} rendered, {} skipped, {} inserted",
            report.rendered.len(),
            report.skipped.len(),
            report.inserted
        ));
        for (path, reason) in &report.skipped {
            output.warning(&format!("  {path}: {reason}"));
        }
    }

    page.inject_assets(&assets, &config.assets);
    Ok(page.to_html())
}

fn open_repository(config: &RepositoryConfig) -> Result<Arc<dyn Repository>, CliError> {
    Ok(match config.backend {
        Backend::Fs => Arc::new(FsRepository::new(config.root.clone())),
        Backend::Git => Arc::new(GitRepository::open(&config.root)?),
    })
}

/// Preview body of a single file page, or `None` if no renderer supports
/// the file.
fn file_preview(
    files: &FragmentRenderer,
    path: &str,
    revision: Option<&str>,
    assets: &mut dyn AssetSink,
) -> Result<Option<TreeNode>, CliError> {
    let file = match files.render_file(&DirEntry::file(path), revision, assets) {
        Ok(file) => file,
        Err(SkipReason::NoRenderer(_)) => return Ok(None),
        Err(SkipReason::ContentUnavailable(e)) => return Err(e.into()),
        Err(SkipReason::RenderingFailed(e)) => return Err(e.into()),
    };
    let class = match file.flavor {
        Flavor::Markdown => "markdown",
        Flavor::Wiki => "wiki",
        Flavor::Other => "code",
    };
    let mut body = TreeNode::new("div").with_attr("class", class);
    file.fragment.append_to(&mut body);
    Ok(Some(body))
}
