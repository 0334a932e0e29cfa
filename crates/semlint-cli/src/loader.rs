//! Document loading from files, directories, stdin and URLs.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ignore::overrides::{Override, OverrideBuilder};

/// Browser-like user agent; some sites reject unknown clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Chrome/120.0.0.0)";

/// Timeout for a whole HTTP request.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// File extensions picked up when walking a directory.
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// Errors fetching a document over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP client could not be set up.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, timeout or body decoding failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying error.
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Status code.
        status: u16,
    },
}

/// Errors turning a target into markup.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Standard input could not be read.
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    /// Directory traversal failed.
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// Directory being walked.
        path: PathBuf,
        /// Underlying error.
        source: ignore::Error,
    },

    /// An `--exclude` pattern is not a valid glob.
    #[error("invalid exclude pattern `{pattern}`: {source}")]
    Pattern {
        /// Offending pattern.
        pattern: String,
        /// Underlying error.
        source: ignore::Error,
    },

    /// HTTP fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The target is neither an existing path nor a URL.
    #[error("no such file, directory or URL: {0}")]
    NotFound(String),
}

/// One document to audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Markup piped on standard input (`-`).
    Stdin,
    /// An HTML file.
    File(PathBuf),
    /// A page fetched over HTTP(S).
    Url(String),
}

impl Target {
    /// Display name used in reports and diagnostics.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
        }
    }

    /// Reads or fetches the raw markup.
    ///
    /// # Errors
    ///
    /// Returns an error if the file, stdin or URL cannot be read.
    pub fn load(&self) -> Result<String, LoadError> {
        match self {
            Self::Stdin => {
                let mut markup = String::new();
                std::io::stdin()
                    .read_to_string(&mut markup)
                    .map_err(LoadError::Stdin)?;
                Ok(markup)
            }
            Self::File(path) => std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            }),
            Self::Url(url) => Ok(fetch(url)?),
        }
    }
}

/// Expands command-line inputs into audit targets.
///
/// Directories are walked for `*.html`/`*.htm` (respecting `.gitignore` and
/// the gitignore-style `exclude` globs),
/// `-` means stdin, and anything that is not a path but looks like a host
/// or URL is fetched.
///
/// # Errors
///
/// Returns an error for inputs that resolve to nothing, or when a
/// directory walk fails.
pub fn resolve_targets(inputs: &[String], exclude: &[String]) -> Result<Vec<Target>, LoadError> {
    let mut targets = Vec::new();
    for input in inputs {
        if input == "-" {
            targets.push(Target::Stdin);
            continue;
        }
        if has_http_scheme(input) {
            targets.push(Target::Url(input.clone()));
            continue;
        }

        let path = Path::new(input);
        if path.is_dir() {
            let found = walk_html(path, exclude)?;
            tracing::debug!("Found {} HTML file(s) under {}", found.len(), path.display());
            targets.extend(found.into_iter().map(Target::File));
        } else if path.is_file() {
            targets.push(Target::File(path.to_path_buf()));
        } else if looks_like_host(input) {
            targets.push(Target::Url(normalize_url(input)));
        } else {
            return Err(LoadError::NotFound(input.clone()));
        }
    }
    Ok(targets)
}

/// Prefixes `https://` when the input has no `http` scheme.
#[must_use]
pub fn normalize_url(input: &str) -> String {
    let input = input.trim();
    if has_http_scheme(input) {
        input.to_string()
    } else {
        format!("https://{input}")
    }
}

/// Fetches a page with a blocking client.
///
/// # Errors
///
/// Returns an error on transport failure, timeout, or a non-2xx status.
pub fn fetch(url: &str) -> Result<String, FetchError> {
    let url = normalize_url(url);
    tracing::info!("Fetching {url}");

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(FetchError::Client)?;

    let response = client
        .get(&url)
        .send()
        .map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })?;

    if !response.status().is_success() {
        return Err(FetchError::Status {
            url,
            status: response.status().as_u16(),
        });
    }

    response
        .text()
        .map_err(|source| FetchError::Transport { url, source })
}

fn has_http_scheme(input: &str) -> bool {
    input
        .get(..4)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("http"))
}

/// `example.com` or `example.com/page`, but not `page.html`.
fn looks_like_host(input: &str) -> bool {
    if input.is_empty()
        || input.chars().any(char::is_whitespace)
        || has_html_extension(Path::new(input))
    {
        return false;
    }
    let host = input.split('/').next().unwrap_or_default();
    host.contains('.') && !host.starts_with('.') && !host.ends_with('.')
}

fn has_html_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| HTML_EXTENSIONS.iter().any(|h| ext.eq_ignore_ascii_case(h)))
}

fn walk_html(root: &Path, exclude: &[String]) -> Result<Vec<PathBuf>, LoadError> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(true)
        .overrides(exclude_overrides(root, exclude)?);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(|source| LoadError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if !path.is_file() || !has_html_extension(path) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Turns exclude globs into ignore-only overrides rooted at `root`.
fn exclude_overrides(root: &Path, exclude: &[String]) -> Result<Override, LoadError> {
    let mut builder = OverrideBuilder::new(root);
    for pattern in exclude {
        builder
            .add(&format!("!{pattern}"))
            .map_err(|source| LoadError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
    }
    builder.build().map_err(|source| LoadError::Pattern {
        pattern: exclude.join(", "),
        source,
    })
}
