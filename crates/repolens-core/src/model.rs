//! Core data structures for the repository model

use serde::{Deserialize, Serialize};

/// Language family with a dedicated symbol extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageFamily {
    /// JavaScript, TypeScript and their JSX flavours.
    EcmaScript,
    Python,
}

/// Display language of a file, detected from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Java,
    Kotlin,
    Go,
    Rust,
    Cpp,
    C,
    Php,
    Ruby,
    CSharp,
    Swift,
    Scala,
    Clojure,
    Haskell,
    Vue,
    Svelte,
    Astro,
    Html,
    Css,
    Scss,
    Less,
    Json,
    Yaml,
    Toml,
    Markdown,
    Text,
    Xml,
    Sql,
    Bash,
    PowerShell,
    Batch,
    Dockerfile,
    Unknown,
}

impl Language {
    /// Detect language from a file path's extension.
    pub fn from_path(path: &str) -> Self {
        match extension(path).as_deref() {
            Some("js") | Some("jsx") => Language::JavaScript,
            Some("ts") | Some("tsx") => Language::TypeScript,
            Some("py") | Some("pyw") | Some("pyx") => Language::Python,
            Some("java") => Language::Java,
            Some("kt") => Language::Kotlin,
            Some("go") => Language::Go,
            Some("rs") => Language::Rust,
            Some("cpp") => Language::Cpp,
            Some("c") | Some("h") => Language::C,
            Some("php") => Language::Php,
            Some("rb") => Language::Ruby,
            Some("cs") => Language::CSharp,
            Some("swift") => Language::Swift,
            Some("scala") => Language::Scala,
            Some("clj") => Language::Clojure,
            Some("hs") => Language::Haskell,
            Some("vue") => Language::Vue,
            Some("svelte") => Language::Svelte,
            Some("astro") => Language::Astro,
            Some("html") => Language::Html,
            Some("css") => Language::Css,
            Some("scss") => Language::Scss,
            Some("less") => Language::Less,
            Some("json") => Language::Json,
            Some("yaml") | Some("yml") => Language::Yaml,
            Some("toml") => Language::Toml,
            Some("md") => Language::Markdown,
            Some("txt") => Language::Text,
            Some("xml") => Language::Xml,
            Some("sql") => Language::Sql,
            Some("sh") => Language::Bash,
            Some("ps1") => Language::PowerShell,
            Some("bat") => Language::Batch,
            Some("dockerfile") => Language::Dockerfile,
            _ => Language::Unknown,
        }
    }

    /// The extractor family for this language, if one exists.
    pub fn family(self) -> Option<LanguageFamily> {
        match self {
            Language::JavaScript | Language::TypeScript => Some(LanguageFamily::EcmaScript),
            Language::Python => Some(LanguageFamily::Python),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Kotlin => "kotlin",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::CSharp => "csharp",
            Language::Swift => "swift",
            Language::Scala => "scala",
            Language::Clojure => "clojure",
            Language::Haskell => "haskell",
            Language::Vue => "vue",
            Language::Svelte => "svelte",
            Language::Astro => "astro",
            Language::Html => "html",
            Language::Css => "css",
            Language::Scss => "scss",
            Language::Less => "less",
            Language::Json => "json",
            Language::Yaml => "yaml",
            Language::Toml => "toml",
            Language::Markdown => "markdown",
            Language::Text => "text",
            Language::Xml => "xml",
            Language::Sql => "sql",
            Language::Bash => "bash",
            Language::PowerShell => "powershell",
            Language::Batch => "batch",
            Language::Dockerfile => "dockerfile",
            Language::Unknown => "unknown",
        }
    }
}

/// Extensions whose content is fetched and scanned.
const TEXT_EXTENSIONS: &[&str] = &[
    "js", "ts", "jsx", "tsx", "py", "java", "go", "rs", "cpp", "c", "h", "php", "rb", "cs",
    "swift", "scala", "clj", "hs", "vue", "svelte", "astro", "html", "css", "scss", "less",
    "json", "yaml", "yml", "toml", "md", "txt", "xml", "sql", "sh", "ps1", "bat", "dockerfile",
    "gitignore", "env",
];

/// Whether a path names a text file worth fetching.
pub fn is_text_file(path: &str) -> bool {
    extension(path).is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.as_str()))
}

/// Lowercased extension of the last path segment, without the dot.
///
/// Dotfiles such as `.gitignore` report the part after the dot.
pub fn extension(path: &str) -> Option<String> {
    let name = file_name(path);
    let dot = name.rfind('.')?;
    let ext = &name[dot + 1..];
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}

/// Last segment of a forward-slash path.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// File name without its final extension.
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(dot) => &name[..dot],
    }
}

/// Normalize a path to forward slashes.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// A file handed to the engine: repo-relative path plus its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub path: String,
    pub content: String,
    pub language: Language,
    pub language_family: Option<LanguageFamily>,
}

impl FileDescriptor {
    /// Build a descriptor, normalizing the path and detecting its language.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = normalize_separators(&path.into());
        let language = Language::from_path(&path);
        FileDescriptor {
            language_family: language.family(),
            path,
            content: content.into(),
            language,
        }
    }
}

/// A discovered repository file, before its content is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub path: String,
    pub name: String,
    pub size: u64,
    pub language: Language,
    pub is_text: bool,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        let path = normalize_separators(&path.into());
        FileEntry {
            name: file_name(&path).to_string(),
            language: Language::from_path(&path),
            is_text: is_text_file(&path),
            size,
            path,
        }
    }
}
