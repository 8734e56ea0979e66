//! Production tag resolution
//!
//! Walks a finalized manifest once and renders one Liquid block per
//! addressable entry, pointing at hashed output files through the theme's
//! `asset_url` filter.

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::manifest::{is_css_path, Chunk, ManifestGraph, COMBINED_STYLESHEET};
use crate::tags::{Snippet, TagBlock, TagRenderer};

/// Renders the production tag snippet from a manifest
#[derive(Debug, Clone)]
pub struct ProductionResolver {
    renderer: TagRenderer,
    css_code_split: bool,
}

impl ProductionResolver {
    /// Create a resolver; `css_code_split` mirrors the bundler's setting
    pub fn new(css_code_split: bool) -> Self {
        Self {
            renderer: TagRenderer::cdn(),
            css_code_split,
        }
    }

    /// Load the manifest at `path` and render it
    pub fn render_file(&self, path: &Path) -> Result<Snippet> {
        let graph = ManifestGraph::load(path)?;
        self.render(&graph)
    }

    /// Render every addressable entry of `graph`, in manifest order
    pub fn render(&self, graph: &ManifestGraph) -> Result<Snippet> {
        let mut blocks = Vec::new();

        for (key, chunk) in graph.iter() {
            if let Some(block) = self.render_chunk(graph, key, chunk)? {
                blocks.push(block);
            }
        }

        debug!(
            "Rendered {} block(s) from {} chunk(s)",
            blocks.len(),
            graph.len()
        );

        Ok(Snippet::new(blocks))
    }

    fn render_chunk(
        &self,
        graph: &ManifestGraph,
        key: &str,
        chunk: &Chunk,
    ) -> Result<Option<TagBlock>> {
        let src = chunk.src.as_deref();

        // The combined stylesheet is emitted without `isEntry`.
        if src == Some(COMBINED_STYLESHEET) && !self.css_code_split {
            let tag = self.renderer.style_for(graph.file_of(key)?);
            return Ok(Some(TagBlock::new(COMBINED_STYLESHEET, vec![tag])));
        }

        if !chunk.is_addressable() {
            return Ok(None);
        }

        let src = src.ok_or_else(|| Error::MissingField {
            chunk: key.to_string(),
            field: "src",
        })?;

        if is_css_path(src) {
            if !self.css_code_split {
                return Ok(None);
            }

            let tag = self.renderer.style_for(graph.file_of(key)?);
            return Ok(Some(TagBlock::new(src, vec![tag])));
        }

        let mut tags = vec![self.renderer.script_for(graph.file_of(key)?)];

        for (import, imported) in graph.imports_of(key)? {
            tags.push(self.renderer.preload_for(graph.file_of(import)?));

            for css in imported.css_files() {
                tags.push(self.renderer.style_for(css));
            }
        }

        for css in chunk.css_files() {
            tags.push(self.renderer.style_for(css));
        }

        Ok(Some(TagBlock::new(src, tags)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cdn(path: &str) -> String {
        format!("{{{{ '{}' | asset_url }}}}", path)
    }

    fn script(path: &str) -> String {
        format!(
            r#"<script type="module" crossorigin="anonymous" src="{}"></script>"#,
            cdn(path)
        )
    }

    fn preload(path: &str) -> String {
        format!(
            r#"<link crossorigin="anonymous" rel="modulepreload" as="script" href="{}">"#,
            cdn(path)
        )
    }

    fn style(path: &str) -> String {
        format!(r#"<link rel="stylesheet" href="{}">"#, cdn(path))
    }

    const THEME_MANIFEST: &str = r#"{
        "theme.js": {
            "isEntry": true,
            "src": "theme.js",
            "file": "theme.A1B2.js",
            "imports": ["vendor"],
            "css": []
        },
        "vendor": {
            "file": "vendor.C3D4.js",
            "css": ["vendor.E5F6.css"]
        }
    }"#;

    #[test]
    fn test_theme_entry_with_vendor_import() {
        let graph = ManifestGraph::from_json(THEME_MANIFEST).unwrap();
        let snippet = ProductionResolver::new(false).render(&graph).unwrap();

        assert_eq!(snippet.keys(), vec!["theme.js"]);
        assert_eq!(
            snippet.block("theme.js").unwrap().tags,
            vec![
                script("theme.A1B2.js"),
                preload("vendor.C3D4.js"),
                style("vendor.E5F6.css"),
            ]
        );
    }

    #[test]
    fn test_full_snippet_text() {
        let graph = ManifestGraph::from_json(THEME_MANIFEST).unwrap();
        let text = ProductionResolver::new(false).render(&graph).unwrap().to_string();

        let expected = format!(
            "{{%- # theme-check-disable UndefinedObject -%}}\n\n\
             {{%- if vite-tag == 'theme.js' -%}}\n  {}\n  {}\n  {}\n{{%- endif -%}}",
            script("theme.A1B2.js"),
            preload("vendor.C3D4.js"),
            style("vendor.E5F6.css"),
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let graph = ManifestGraph::from_json(THEME_MANIFEST).unwrap();
        let resolver = ProductionResolver::new(true);

        let first = resolver.render(&graph).unwrap().to_string();
        let second = resolver.render(&graph).unwrap().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_blocks_follow_manifest_order() {
        let graph = ManifestGraph::from_chunks([
            ("pages/product.ts", Chunk::entry("pages/product.ts", "product.1.js")),
            ("_shared", Chunk::shared("shared.2.js")),
            ("theme.ts", Chunk::entry("theme.ts", "theme.3.js")),
            ("account.ts", Chunk::entry("account.ts", "account.4.js")),
        ]);

        let snippet = ProductionResolver::new(true).render(&graph).unwrap();
        assert_eq!(snippet.keys(), vec!["pages/product.ts", "theme.ts", "account.ts"]);
    }

    #[test]
    fn test_dependency_chunks_never_get_blocks() {
        let graph = ManifestGraph::from_chunks([
            ("_vendor", Chunk::shared("vendor.js").with_css(["vendor.css"])),
            ("lib.ts", Chunk {
                src: Some("lib.ts".to_string()),
                ..Chunk::shared("lib.js")
            }),
        ]);

        let snippet = ProductionResolver::new(true).render(&graph).unwrap();
        assert!(snippet.is_empty());
    }

    fn css_manifest() -> ManifestGraph {
        ManifestGraph::from_chunks([
            ("style.css", Chunk {
                src: Some("style.css".to_string()),
                ..Chunk::shared("style.9F8E.css")
            }),
            ("theme.css", Chunk::entry("theme.css", "theme.1111.css")),
            ("print.scss", Chunk::entry("print.scss", "print.2222.css")),
            ("theme.js", Chunk::entry("theme.js", "theme.3333.js")),
        ])
    }

    #[test]
    fn test_combined_stylesheet_without_code_split() {
        let snippet = ProductionResolver::new(false).render(&css_manifest()).unwrap();

        assert_eq!(snippet.keys(), vec!["style.css", "theme.js"]);
        assert_eq!(
            snippet.block("style.css").unwrap().tags,
            vec![style("style.9F8E.css")]
        );
    }

    #[test]
    fn test_split_stylesheets_with_code_split() {
        let snippet = ProductionResolver::new(true).render(&css_manifest()).unwrap();

        assert_eq!(snippet.keys(), vec!["theme.css", "print.scss", "theme.js"]);
        assert_eq!(
            snippet.block("print.scss").unwrap().tags,
            vec![style("print.2222.css")]
        );
    }

    #[test]
    fn test_import_css_precedes_own_css() {
        let graph = ManifestGraph::from_chunks([
            (
                "main.js",
                Chunk::entry("main.js", "main.1.js")
                    .with_imports(["shared"])
                    .with_css(["main.own.css"]),
            ),
            ("shared", Chunk::shared("shared.2.js").with_css(["shared.a.css"])),
        ]);

        let snippet = ProductionResolver::new(true).render(&graph).unwrap();
        assert_eq!(
            snippet.block("main.js").unwrap().tags,
            vec![
                script("main.1.js"),
                preload("shared.2.js"),
                style("shared.a.css"),
                style("main.own.css"),
            ]
        );
    }

    #[test]
    fn test_only_direct_imports_are_preloaded() {
        // main.js -> a -> b; the bundler lists everything main.js needs itself
        let graph = ManifestGraph::from_chunks([
            ("main.js", Chunk::entry("main.js", "main.1.js").with_imports(["a"])),
            ("a", Chunk::shared("a.1.js").with_imports(["b"])),
            ("b", Chunk::shared("b.1.js").with_css(["b.css"])),
        ]);

        let snippet = ProductionResolver::new(true).render(&graph).unwrap();
        assert_eq!(
            snippet.block("main.js").unwrap().tags,
            vec![script("main.1.js"), preload("a.1.js")]
        );
    }

    #[test]
    fn test_shared_chunk_rendered_for_each_entry() {
        let graph = ManifestGraph::from_chunks([
            ("a.js", Chunk::entry("a.js", "a.1.js").with_imports(["core"])),
            ("b.js", Chunk::entry("b.js", "b.1.js").with_imports(["core"])),
            ("core", Chunk::shared("core.1.js").with_css(["core.css"])),
        ]);

        let snippet = ProductionResolver::new(true).render(&graph).unwrap();

        for (key, file) in [("a.js", "a.1.js"), ("b.js", "b.1.js")] {
            assert_eq!(
                snippet.block(key).unwrap().tags,
                vec![script(file), preload("core.1.js"), style("core.css")]
            );
        }
    }

    #[test]
    fn test_dangling_import_is_fatal() {
        let graph = ManifestGraph::from_chunks([(
            "main.js",
            Chunk::entry("main.js", "main.js").with_imports(["gone"]),
        )]);

        let err = ProductionResolver::new(true).render(&graph).unwrap_err();
        assert!(matches!(err, Error::DanglingImport { .. }));
    }

    #[test]
    fn test_missing_manifest_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProductionResolver::new(true)
            .render_file(&dir.path().join("assets/manifest.json"))
            .unwrap_err();
        assert!(matches!(err, Error::ManifestNotFound { .. }));
    }
}
