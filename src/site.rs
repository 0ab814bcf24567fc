//! Landing page for the assembled mirror.

use crate::config::MirrorConfig;
use crate::error::Result;
use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{title}}</title>
    <style>
        body {
            font-family: 'Inter', sans-serif;
            background-color: #f4f7f9;
            color: #333;
            margin: 0;
            padding: 2em;
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
        }
        .container { max-width: 800px; width: 100%; text-align: center; }
        h1 { color: #2c3e50; margin-bottom: 1.5em; }
        ul {
            list-style-type: none;
            padding: 0;
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
            gap: 1.5em;
        }
        li {
            background-color: #fff;
            border-radius: 8px;
            box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1);
            transition: transform 0.2s ease-in-out, box-shadow 0.2s ease-in-out;
        }
        li:hover { transform: translateY(-5px); box-shadow: 0 8px 12px rgba(0, 0, 0, 0.15); }
        a {
            display: block;
            padding: 2em;
            text-decoration: none;
            color: #3498db;
            font-size: 1.2em;
            font-weight: bold;
        }
        footer { margin-top: 3em; color: #7f8c8d; font-size: 0.9em; }
    </style>
</head>
<body>
    <div class="container">
        <h1>{{title}}</h1>
        <ul>
{{#each sites}}
            <li><a href="./{{key}}/">{{name}}</a></li>
{{/each}}
        </ul>
        <footer>
            <p>{{footer}}</p>
        </footer>
    </div>
</body>
</html>
"#;

/// File name the landing front-end loads the project list from.
pub const MANIFEST_FILE: &str = "fastly.json";

#[derive(Serialize)]
struct SiteEntry<'a> {
    key: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct IndexPage<'a> {
    title: &'a str,
    footer: &'a str,
    sites: Vec<SiteEntry<'a>>,
}

/// Renders the landing page listing every project, in config order.
pub fn render_index(config: &MirrorConfig) -> Result<String> {
    let page = IndexPage {
        title: "文档加速列表",
        footer: "由 8aka-Team 提供",
        sites: config
            .iter()
            .map(|(key, project)| SiteEntry {
                key,
                name: project.display_name(key),
            })
            .collect(),
    };
    Ok(Handlebars::new().render_template(INDEX_TEMPLATE, &page)?)
}

/// Writes `index.html` and the project manifest into `build_dir`.
///
/// Returns the path of the written index.
pub fn write_index(config: &MirrorConfig, build_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(build_dir)?;

    let index_path = build_dir.join("index.html");
    fs::write(&index_path, render_index(config)?)?;
    fs::write(build_dir.join(MANIFEST_FILE), config.to_json()?)?;

    log::info!("Generated index.html at {}", index_path.display());
    Ok(index_path)
}
