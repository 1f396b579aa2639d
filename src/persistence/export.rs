//! Writes the project out as a real directory tree, ready to serve
//! with any static file server.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::json;

use super::record::{FileRecord, RecordKind};

pub fn export_project(records: &[FileRecord], dest: &Path, project_name: &str) -> io::Result<()> {
    fs::create_dir_all(dest)?;
    for record in records {
        write_record(record, dest)?;
    }

    let package = json!({
        "name": project_name,
        "version": "1.0.0",
        "description": "Generated from Code Playground",
        "main": "index.html",
        "scripts": {
            "serve": "python -m http.server 8000",
            "serve-node": "npx http-server -p 8000",
        },
        "keywords": ["html", "css", "javascript", "playground"],
        "license": "MIT",
    });
    fs::write(
        dest.join("package.json"),
        serde_json::to_string_pretty(&package).unwrap_or_else(|_| "{}".to_string()),
    )?;

    let readme = format!(
        "# {project_name}\n\nGenerated from Code Playground.\n\n\
         Serve the directory with any static file server, e.g.\n\n\
         ```bash\npython -m http.server 8000\n```\n\n\
         then open http://localhost:8000 in your browser.\n"
    );
    fs::write(dest.join("README.md"), readme)?;

    Ok(())
}

fn write_record(record: &FileRecord, dest: &Path) -> io::Result<()> {
    let relative = record.path.trim_start_matches('/');
    let target = dest.join(relative);

    match record.kind {
        RecordKind::File => {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, record.content.as_deref().unwrap_or(""))?;
        }
        RecordKind::Folder => {
            fs::create_dir_all(&target)?;
            if let Some(children) = &record.children {
                for child in children {
                    write_record(child, dest)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileTree;
    use crate::persistence::record::records_from_tree;
    use crate::persistence::seed;

    #[test]
    fn test_exports_seed_project() {
        let dir = tempfile::tempdir().unwrap();
        export_project(&seed::default_project(), dir.path(), "demo").unwrap();

        assert!(dir.path().join("index.html").exists());
        assert!(dir.path().join("style.css").exists());
        assert!(dir.path().join("script.js").exists());
        assert!(dir.path().join("package.json").exists());
        assert!(dir.path().join("README.md").exists());

        let html = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(html.contains("Welcome to Code Playground!"));
    }

    #[test]
    fn test_exports_nested_folders() {
        let mut tree = FileTree::new();
        let dir_id = tree.create_folder("src", None).unwrap();
        let file = tree.create_file("app.js", Some(dir_id)).unwrap();
        tree.update(file, "console.log('nested');");

        let dir = tempfile::tempdir().unwrap();
        export_project(&records_from_tree(&mut tree), dir.path(), "demo").unwrap();

        let written = fs::read_to_string(dir.path().join("src/app.js")).unwrap();
        assert_eq!(written, "console.log('nested');");
    }
}
