//! Note loading for the CLI
//!
//! Notes come either from a JSON array of documents or from a data directory
//! laid out as category folders of Markdown files:
//!
//! ```text
//! data/
//!   guides/
//!     01-quick-start.md
//!     advanced/
//!       search.md
//!   reference/
//!     markdown.md
//! ```
//!
//! Categories and files are read in name order, each category's own files
//! before those of its sub-folders, and ids are assigned from 1 in that order.

use anyhow::{Context, Result};
use notesearch::Searchable;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use walkdir::WalkDir;

/// A note as seen by the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Note ID
    pub id: u64,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Body text
    #[serde(default)]
    pub content: String,
    /// Category folder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Sub-folder within the category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    /// Tags from front matter
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Publication date from front matter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Any other caller-supplied fields
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Searchable for Note {
    fn id(&self) -> u64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn content(&self) -> &str {
        &self.content
    }
}

/// Front matter keys the loader understands
#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    title: Option<String>,
    #[serde(default)]
    tags: Tags,
    date: Option<String>,
}

/// `tags:` written either as a single value or as a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Tags {
    One(String),
    Many(Vec<String>),
}

impl Default for Tags {
    fn default() -> Self {
        Tags::Many(Vec::new())
    }
}

impl From<Tags> for Vec<String> {
    fn from(tags: Tags) -> Self {
        match tags {
            Tags::One(tag) => vec![tag],
            Tags::Many(tags) => tags,
        }
    }
}

/// Load notes from a JSON array file
pub fn load_json(path: &Path) -> Result<Vec<Note>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let notes: Vec<Note> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(notes)
}

/// Load every Markdown note under a data directory
pub fn load_dir(data_dir: &Path) -> Result<Vec<Note>> {
    if !data_dir.is_dir() {
        anyhow::bail!(
            "Data directory not found: {}\nUse --data-dir or --docs to point at your notes.",
            data_dir.display()
        );
    }

    let mut notes = Vec::new();
    let mut next_id = 1;

    for category in subdirectories(data_dir)? {
        let category_name = file_name(&category);

        for path in markdown_files(&category)? {
            if let Some(note) = read_note(&path, next_id, &category_name, None) {
                notes.push(note);
                next_id += 1;
            }
        }

        for sub_dir in subdirectories(&category)? {
            let sub_name = file_name(&sub_dir);
            for path in markdown_files(&sub_dir)? {
                if let Some(note) = read_note(&path, next_id, &category_name, Some(&sub_name)) {
                    notes.push(note);
                    next_id += 1;
                }
            }
        }
    }

    tracing::debug!("Loaded {} notes from {}", notes.len(), data_dir.display());
    Ok(notes)
}

/// Immediate child directories, sorted by name
fn subdirectories(dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read {}", dir.display()))?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// Immediate `.md` files, sorted by name
fn markdown_files(dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read {}", dir.display()))?;
        let is_markdown = entry.path().extension().is_some_and(|ext| ext == "md");
        if entry.file_type().is_file() && is_markdown {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Read one note; unreadable files are logged and skipped
fn read_note(path: &Path, id: u64, category: &str, sub_category: Option<&str>) -> Option<Note> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Error reading {}: {}", path.display(), e);
            return None;
        }
    };

    let (front_matter, body) = split_front_matter(&raw);
    let front_matter = front_matter
        .and_then(|yaml| match serde_yaml::from_str::<FrontMatter>(yaml) {
            Ok(fm) => Some(fm),
            Err(e) => {
                tracing::warn!("Ignoring front matter in {}: {}", path.display(), e);
                None
            }
        })
        .unwrap_or_default();

    let title = front_matter.title.filter(|t| !t.is_empty()).unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    });

    Some(Note {
        id,
        title,
        content: remove_leading_h1(body.trim()),
        category: Some(category.to_string()),
        sub_category: sub_category.map(String::from),
        tags: front_matter.tags.into(),
        date: front_matter.date,
        extra: serde_json::Map::new(),
    })
}

/// Split `---` delimited YAML front matter from the body
fn split_front_matter(raw: &str) -> (Option<&str>, &str) {
    let Some(rest) = raw
        .strip_prefix("---\n")
        .or_else(|| raw.strip_prefix("---\r\n"))
    else {
        return (None, raw);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    // Unterminated front matter is treated as body text
    (None, raw)
}

/// Drop a leading `# ` heading and the blank lines after it
fn remove_leading_h1(content: &str) -> String {
    let mut lines = content.splitn(2, '\n');
    let first = lines.next().unwrap_or("");
    if first.trim().starts_with("# ") {
        lines
            .next()
            .unwrap_or("")
            .trim_start_matches(['\n', '\r'])
            .to_string()
    } else {
        content.to_string()
    }
}
