//! Python lexical extractor

use super::common::{
    FunctionCollector, LineIndex, collect_calls, path_mentions, path_symbol_name,
    preceded_by_async, push_utility,
};
use crate::extractor::LanguageExtractor;
use crate::rules::{
    PY_CALL_BUILTINS, PY_CONTROLLER_HINTS, PY_KEYWORDS, SERVICE_HINTS, UTILITY_HINTS,
    py_orm_label,
};
use once_cell::sync::Lazy;
use regex::Regex;
use repolens_core::{
    ClassRole, ClassSymbol, Controller, DecoratorKind, DecoratorSymbol, Endpoint, FileAnalysis,
    ImportRecord, LanguageFamily, ModelSymbol,
};

/// `async def` puts the keyword right before `def`.
const ASYNC_WINDOW: usize = 10;

static FUNCTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bdef\s+(\w+)\s*\(").unwrap());

static CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*class\s+(\w+)").unwrap());

static DECORATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*@([A-Za-z_][\w.]*)").unwrap());

static FROM_IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*from\s+([.\w]+)\s+import\b").unwrap());

static IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*import\s+([\w.]+(?:\s+as\s+\w+)?(?:[ \t]*,[ \t]*[\w.]+(?:\s+as\s+\w+)?)*)")
        .unwrap()
});

/// Flask/FastAPI route decorators; group 3 holds the remaining arguments.
static ROUTE_DECORATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"@(?:app|router|bp|blueprint|api)\.(get|post|put|delete|patch|route|api_route)\s*\(\s*['"]([^'"]+)['"]([^)]*)"#,
    )
    .unwrap()
});

static METHODS_ARG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"methods\s*=\s*[\[(]([^\])]*)[\])]").unwrap());

static DJANGO_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bpath\s*\(\s*['"]([^'"]+)['"]"#).unwrap());

static MODEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\bclass\s+(\w+)\s*\(\s*(db\.Model|models\.Model|DeclarativeBase|BaseModel|Base)\b",
    )
    .unwrap()
});

static CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\w+)\s*\(").unwrap());

pub struct PythonExtractor;

impl LanguageExtractor for PythonExtractor {
    fn family(&self) -> LanguageFamily {
        LanguageFamily::Python
    }

    fn extract(&self, path: &str, content: &str) -> FileAnalysis {
        let lines = LineIndex::new(content);
        let mut analysis = FileAnalysis::default();

        let mut collector = FunctionCollector::new(path, PY_KEYWORDS);
        for caps in FUNCTION.captures_iter(content) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let is_async = preceded_by_async(content, whole.start(), ASYNC_WINDOW);
            collector.push(name.as_str(), lines.line_of(whole.start()), is_async);
        }
        analysis.functions = collector.finish();

        for caps in CLASS.captures_iter(content) {
            let Some(name) = caps.get(1) else { continue };
            analysis.classes.push(ClassSymbol {
                name: name.as_str().to_string(),
                file: path.to_string(),
                line: Some(lines.line_of(name.start())),
                role: ClassRole::Class,
            });
        }

        for caps in DECORATOR.captures_iter(content) {
            let Some(name) = caps.get(1) else { continue };
            analysis.decorators.push(DecoratorSymbol {
                name: name.as_str().to_string(),
                file: path.to_string(),
                line: lines.line_of(name.start()),
                kind: DecoratorKind::Decorator,
            });
        }

        extract_imports(&mut analysis, path, content, &lines);
        extract_endpoints(&mut analysis, path, content, &lines);

        for caps in MODEL.captures_iter(content) {
            let (Some(name), Some(base)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            analysis.models.push(ModelSymbol {
                name: name.as_str().to_string(),
                file: path.to_string(),
                line: lines.line_of(name.start()),
                orm: py_orm_label(base.as_str()).to_string(),
            });
        }

        if path_mentions(path, PY_CONTROLLER_HINTS) {
            analysis.controllers.push(Controller {
                name: path_symbol_name(path),
                file: path.to_string(),
            });
        }
        if path_mentions(path, SERVICE_HINTS) {
            analysis.classes.push(ClassSymbol {
                name: path_symbol_name(path),
                file: path.to_string(),
                line: None,
                role: ClassRole::Service,
            });
        }
        if path_mentions(path, UTILITY_HINTS) {
            push_utility(&mut analysis, path);
        }

        collect_calls(
            &mut analysis,
            &CALL,
            content,
            path,
            &lines,
            &[PY_KEYWORDS, PY_CALL_BUILTINS],
        );
        analysis
    }
}

fn extract_imports(analysis: &mut FileAnalysis, path: &str, content: &str, lines: &LineIndex) {
    for caps in FROM_IMPORT.captures_iter(content) {
        let Some(module) = caps.get(1) else { continue };
        analysis.imports.push(ImportRecord {
            file: path.to_string(),
            specifier: module.as_str().to_string(),
            line: lines.line_of(module.start()),
        });
    }
    for caps in IMPORT.captures_iter(content) {
        let Some(list) = caps.get(1) else { continue };
        let line = lines.line_of(list.start());
        for item in list.as_str().split(',') {
            // `import a.b as c` refers to module `a.b`
            let Some(module) = item.split_whitespace().next() else {
                continue;
            };
            analysis.imports.push(ImportRecord {
                file: path.to_string(),
                specifier: module.to_string(),
                line,
            });
        }
    }
}

fn extract_endpoints(analysis: &mut FileAnalysis, path: &str, content: &str, lines: &LineIndex) {
    let framework = if content.contains("fastapi") { "fastapi" } else { "flask" };

    for caps in ROUTE_DECORATOR.captures_iter(content) {
        let (Some(verb), Some(route)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let line = lines.line_of(verb.start());
        let methods = match verb.as_str() {
            "route" | "api_route" => {
                listed_methods(caps.get(3).map_or("", |m| m.as_str()))
            }
            other => vec![other.to_uppercase()],
        };
        for method in methods {
            analysis.endpoints.push(Endpoint {
                method,
                path: route.as_str().to_string(),
                file: path.to_string(),
                line,
                framework: framework.to_string(),
            });
        }
    }

    for caps in DJANGO_PATH.captures_iter(content) {
        let Some(route) = caps.get(1) else { continue };
        analysis.endpoints.push(Endpoint {
            method: "GET".to_string(),
            path: route.as_str().to_string(),
            file: path.to_string(),
            line: lines.line_of(route.start()),
            framework: "django".to_string(),
        });
    }
}

/// Methods from a `methods=[...]` argument, or GET when absent.
fn listed_methods(args: &str) -> Vec<String> {
    let methods: Vec<String> = METHODS_ARG
        .captures(args)
        .and_then(|caps| caps.get(1))
        .map(|list| {
            list.as_str()
                .split(',')
                .map(|m| m.trim().trim_matches(|c| c == '"' || c == '\'').trim())
                .filter(|m| !m.is_empty())
                .map(str::to_uppercase)
                .collect()
        })
        .unwrap_or_default();
    if methods.is_empty() {
        vec!["GET".to_string()]
    } else {
        methods
    }
}
