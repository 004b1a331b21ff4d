//! HTML index pages for directories without an index file.

use percent_encoding::utf8_percent_encode;
use std::io;
use std::path::Path;

use super::resolve::SEGMENT_ESCAPES;
use super::response::escape_html;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl Entry {
    /// Symlinks are marked `@` even when they point at a directory; only the
    /// link target gets the trailing `/`.
    fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{}@", self.name)
        } else if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    fn link(&self) -> String {
        let mut link = utf8_percent_encode(&self.name, SEGMENT_ESCAPES).to_string();
        if self.is_dir {
            link.push('/');
        }
        link
    }
}

/// Reads `dir` and returns its entries sorted case-insensitively.
pub async fn read_entries(dir: &Path) -> io::Result<Vec<Entry>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let file_type = entry.file_type().await?;
        // Follow symlinks for the directory check, like a browser would.
        let is_dir = if file_type.is_symlink() {
            tokio::fs::metadata(entry.path())
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false)
        } else {
            file_type.is_dir()
        };
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink: file_type.is_symlink(),
        });
    }
    entries.sort_by_cached_key(|entry| entry.name.to_lowercase());
    Ok(entries)
}

pub fn render(url_path: &str, entries: &[Entry]) -> String {
    let title = format!("Directory listing for {}", escape_html(url_path));
    let mut html = String::new();
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for entry in entries {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            entry.link(),
            escape_html(&entry.display_name())
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn renders_escaped_names_and_encoded_links() {
        let entries = vec![
            Entry {
                name: "a b<c>.html".to_string(),
                is_dir: false,
                is_symlink: false,
            },
            Entry {
                name: "ref".to_string(),
                is_dir: true,
                is_symlink: false,
            },
            Entry {
                name: "latest".to_string(),
                is_dir: false,
                is_symlink: true,
            },
            Entry {
                name: "stable".to_string(),
                is_dir: true,
                is_symlink: true,
            },
        ];

        let html = render("/tut/", &entries);

        assert!(html.contains("<title>Directory listing for /tut/</title>"));
        assert!(html.contains("<li><a href=\"a%20b%3Cc%3E.html\">a b&lt;c&gt;.html</a></li>"));
        assert!(html.contains("<li><a href=\"ref/\">ref/</a></li>"));
        assert!(html.contains("<li><a href=\"latest\">latest@</a></li>"));
        assert!(html.contains("<li><a href=\"stable/\">stable@</a></li>"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlinked_directories_are_marked_as_links() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("v2")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("v2"), dir.path().join("stable")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        let html = render("/", &entries);

        assert!(entries[0].is_dir && entries[0].is_symlink);
        assert!(html.contains("<li><a href=\"stable/\">stable@</a></li>"));
        assert!(html.contains("<li><a href=\"v2/\">v2/</a></li>"));
    }

    #[tokio::test]
    async fn entries_are_sorted_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("beta.html"), "").unwrap();
        fs::write(dir.path().join("Alpha.html"), "").unwrap();
        fs::create_dir(dir.path().join("gamma")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, ["Alpha.html", "beta.html", "gamma"]);
        assert!(entries[2].is_dir);
        assert!(!entries[0].is_dir);
    }
}
