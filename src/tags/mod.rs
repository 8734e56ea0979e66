//! HTML tag and Liquid block rendering
//!
//! Both render modes go through [`TagRenderer`]; they differ only in the
//! [`UrlStrategy`] used to turn asset paths into URLs, so the tag shape is
//! defined in exactly one place.

mod origin;

use std::fmt;

use crate::manifest::is_css_path;

pub use origin::{ServerOrigin, UrlStrategy};

/// Header of the tag snippet; the `vite-tag` variable is supplied by the caller
pub const TAG_SNIPPET_HEADER: &str = "{%- # theme-check-disable UndefinedObject -%}";

/// Header of the client snippet, which loads a script from a remote origin
pub const CLIENT_SNIPPET_HEADER: &str = "{%- # theme-check-disable RemoteAsset -%}";

/// Path of the bundler's live-reload client on the dev server
pub const CLIENT_SCRIPT_PATH: &str = "@vite/client";

/// Renders tags with a fixed attribute order: type, crossorigin, rel, as, href/src
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRenderer {
    urls: UrlStrategy,
}

impl TagRenderer {
    /// Create a renderer using the given URL strategy
    pub fn new(urls: UrlStrategy) -> Self {
        Self { urls }
    }

    /// Renderer for production output
    pub fn cdn() -> Self {
        Self::new(UrlStrategy::Cdn)
    }

    /// Renderer pointed at a live dev server
    pub fn dev_server(origin: ServerOrigin) -> Self {
        Self::new(UrlStrategy::DevServer(origin))
    }

    pub fn strategy(&self) -> &UrlStrategy {
        &self.urls
    }

    /// Resolve an asset path for the current mode
    pub fn asset_url(&self, path: &str) -> String {
        self.urls.asset_url(path)
    }

    /// `<script type="module" ...></script>`
    pub fn script_tag(&self, url: &str) -> String {
        let mut attrs = vec![("type", "module")];
        if self.urls.crossorigin() {
            attrs.push(("crossorigin", "anonymous"));
        }
        attrs.push(("src", url));

        format!("<script{}></script>", html_attributes(&attrs))
    }

    /// `<link rel="stylesheet" ...>`
    pub fn style_link_tag(&self, url: &str) -> String {
        format!(
            "<link{}>",
            html_attributes(&[("rel", "stylesheet"), ("href", url)])
        )
    }

    /// `<link rel="modulepreload" as="script" ...>`
    pub fn module_preload_tag(&self, url: &str) -> String {
        let mut attrs = Vec::with_capacity(4);
        if self.urls.crossorigin() {
            attrs.push(("crossorigin", "anonymous"));
        }
        attrs.push(("rel", "modulepreload"));
        attrs.push(("as", "script"));
        attrs.push(("href", url));

        format!("<link{}>", html_attributes(&attrs))
    }

    /// Module script for an asset path
    pub fn script_for(&self, path: &str) -> String {
        self.script_tag(&self.asset_url(path))
    }

    /// Stylesheet link for an asset path
    pub fn style_for(&self, path: &str) -> String {
        self.style_link_tag(&self.asset_url(path))
    }

    /// Modulepreload link for an asset path
    pub fn preload_for(&self, path: &str) -> String {
        self.module_preload_tag(&self.asset_url(path))
    }

    /// Single tag for a dev-mode entry: stylesheet or module script by extension
    pub fn entry_tag(&self, name: &str) -> String {
        if is_css_path(name) {
            self.style_for(name)
        } else {
            self.script_for(name)
        }
    }
}

fn html_attributes(attrs: &[(&str, &str)]) -> String {
    attrs.iter().fold(String::new(), |mut out, (key, value)| {
        out.push_str(&format!(" {}=\"{}\"", key, value));
        out
    })
}

/// Conditional block selecting a tag sequence by key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBlock {
    pub key: String,
    pub tags: Vec<String>,
}

impl TagBlock {
    pub fn new(key: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            key: key.into(),
            tags,
        }
    }
}

impl fmt::Display for TagBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{%- if vite-tag == '{}' -%}}\n  {}\n{{%- endif -%}}",
            self.key,
            self.tags.join("\n  ")
        )
    }
}

/// The rendered tag snippet: a header followed by blocks separated by blank lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snippet {
    pub blocks: Vec<TagBlock>,
}

impl Snippet {
    pub fn new(blocks: Vec<TagBlock>) -> Self {
        Self { blocks }
    }

    /// Keys in block order
    pub fn keys(&self) -> Vec<&str> {
        self.blocks.iter().map(|block| block.key.as_str()).collect()
    }

    /// Block for `key`, if any
    pub fn block(&self, key: &str) -> Option<&TagBlock> {
        self.blocks.iter().find(|block| block.key == key)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n", TAG_SNIPPET_HEADER)?;

        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{}", block)?;
        }

        Ok(())
    }
}

/// Client snippet loading the live-reload script from the dev server
pub fn client_snippet(origin: &ServerOrigin) -> String {
    let renderer = TagRenderer::dev_server(origin.clone());
    format!(
        "{}\n{}",
        CLIENT_SNIPPET_HEADER,
        renderer.script_for(CLIENT_SCRIPT_PATH)
    )
}
