//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Site
title: Hi There
description: A blog about common topics in web development
author: ''

# URL
url: http://localhost:4000
root: /

# Directory
content_dir: posts
catalog_file: config.json
public_dir: public
static_dir: static

# "Edit this page" links, e.g. https://github.com/<user>/<repo>/blob/main/posts
edit_url:

# Table of contents
toc:
  auto: true
  max_depth: 6

# Page metadata for posts missing from the catalog
fallback:
  title: Hi There
  keywords: A blog post about common topic in web development
  description: A blog post about common topic in web development
"#;

const CATALOG: &str = r#"[
  {
    "name": "general",
    "posts": [
      {
        "slug": "hello-world",
        "title": "Hello World",
        "description": "Your very first post",
        "tags": ["welcome"],
        "isPublished": true
      }
    ]
  }
]
"#;

const STYLE: &str = r#"body { max-width: 46rem; margin: 0 auto; padding: 1rem; font-family: sans-serif; line-height: 1.6; }
.site-header { display: flex; gap: 1rem; align-items: baseline; }
.categories a { margin-right: .75rem; }
nav.toc { border-left: 3px solid #ddd; padding-left: 1rem; }
.post-meta { color: #666; }
"#;

/// Initialize a new blog in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let catalog_path = target_dir.join("posts/config.json");
    if catalog_path.exists() {
        anyhow::bail!("Catalog already exists: {:?}", catalog_path);
    }

    // Create directory structure
    fs::create_dir_all(target_dir.join("posts/general"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    fs::write(target_dir.join("_config.yml"), CONFIG)?;
    fs::write(&catalog_path, CATALOG)?;
    fs::write(target_dir.join("static/style.css"), STYLE)?;

    // Create a sample post
    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        r#"---
title: Hello World
date: "{}"
authors: []
relates: []
---

Welcome! Every post lives at `posts/<category>/<slug>.md` and is listed in
`posts/config.json`.

## Quick Start

### Create a new post

```bash
$ hi-there new general "My New Post"
```

### Run server

```bash
$ hi-there server
```

### Generate static files

```bash
$ hi-there generate
```
"#,
        today
    );

    fs::write(target_dir.join("posts/general/hello-world.md"), sample_post)?;

    Ok(())
}
