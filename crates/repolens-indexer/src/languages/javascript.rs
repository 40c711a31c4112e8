//! JavaScript/TypeScript lexical extractor

use super::common::{
    FunctionCollector, LineIndex, collect_calls, path_mentions, path_symbol_name,
    preceded_by_async, push_utility,
};
use crate::extractor::LanguageExtractor;
use crate::rules::{
    COMPONENT_EXTENSIONS, IGNORED_MIDDLEWARE, JS_CALL_BUILTINS, JS_CONTROLLER_HINTS, JS_KEYWORDS,
    SERVICE_HINTS, UTILITY_HINTS, js_orm_label,
};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use repolens_core::{
    ClassRole, ClassSymbol, Controller, DecoratorKind, DecoratorSymbol, Endpoint, FileAnalysis,
    ImportRecord, LanguageFamily, ModelSymbol, NamedSymbol,
};

/// How far before a declaration to look for `async`.
const ASYNC_WINDOW: usize = 20;

static FUNCTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:function\s+(\w+)|const\s+(\w+)\s*=\s*(?:async\s*)?\([^)]*\)\s*=>|(\w+)\s*\([^)]*\)\s*\{|export\s+(?:default\s+)?(?:function\s+)?(\w+))",
        r"(?:const|let|var)\s+(\w+)\s*=\s*(?:async\s*)?\([^)]*\)\s*=>",
        r"(?:export\s+)?(?:default\s+)?function\s+(\w+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bclass\s+(\w+)").unwrap());

static COMPONENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:export\s+)?(?:default\s+)?(?:function|const)\s+(\w+)").unwrap()
});

static HOOK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:const|function)\s+(use[A-Z]\w*)").unwrap());

static TYPE_ALIAS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\btype\s+(\w+)\s*(?:<[^>]*>)?\s*=").unwrap());

static INTERFACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\binterface\s+(\w+)").unwrap());

/// ESM, side-effect, re-export, dynamic and CommonJS forms; group 1 is the specifier.
static IMPORT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"\bimport\s+[\w*{}\s,$]+?\s+from\s+['"]([^'"]+)['"]"#,
        r#"\bimport\s+['"]([^'"]+)['"]"#,
        r#"\bexport\s+(?:\*(?:\s+as\s+\w+)?|\{[^}]*\})\s+from\s+['"]([^'"]+)['"]"#,
        r#"\bimport\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
        r#"\brequire\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static ROUTE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(?:app|router)\.(get|post|put|delete|patch)\s*\(\s*['"`]([^'"`]+)['"`]"#)
        .unwrap()
});

static ROUTE_CHAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\b(?:app|router)\.route\s*\(\s*['"`]([^'"`]+)['"`]\s*\)\s*\.(get|post|put|delete|patch)"#,
    )
    .unwrap()
});

/// Group 1 is the model name, group 2 the ORM evidence.
static MODEL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:const|let|var)\s+(\w+)\s*=\s*(mongoose\.model|sequelize\.define|Model\.extend)",
        r"(?:class|const)\s+(\w+)\s+extends\s+(Model|Document)\b",
        r"(?:const|let|var)\s+(\w+)\s*=\s*(prisma)\.",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static MIDDLEWARE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:app|router)\.use\s*\(\s*(?:\([^)]*\)|(\w+))\s*(?:,\s*(\w+))?\s*\)").unwrap()
});

static DECORATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*@([A-Za-z_]\w*)").unwrap());

static CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Za-z_$][\w$]*)\s*\(").unwrap());

pub struct EcmaScriptExtractor;

impl LanguageExtractor for EcmaScriptExtractor {
    fn family(&self) -> LanguageFamily {
        LanguageFamily::EcmaScript
    }

    fn extract(&self, path: &str, content: &str) -> FileAnalysis {
        let lines = LineIndex::new(content);
        let mut analysis = FileAnalysis::default();

        analysis.functions = extract_functions(path, content, &lines);
        extract_classes(&mut analysis, path, content, &lines);
        if COMPONENT_EXTENSIONS.iter().any(|ext| path.contains(ext)) {
            extract_components(&mut analysis, path, content, &lines);
        }
        extract_hooks_and_types(&mut analysis, path, content, &lines);
        extract_imports(&mut analysis, path, content, &lines);
        extract_endpoints(&mut analysis, path, content, &lines);
        extract_models(&mut analysis, path, content, &lines);
        extract_decorators(&mut analysis, path, content, &lines);

        if path_mentions(path, JS_CONTROLLER_HINTS) {
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
            &[JS_KEYWORDS, JS_CALL_BUILTINS],
        );
        analysis
    }
}

/// First capture group that participated in the match.
fn first_group<'t>(caps: &Captures<'t>) -> Option<regex::Match<'t>> {
    caps.iter().skip(1).flatten().next()
}

fn extract_functions(path: &str, content: &str, lines: &LineIndex) -> Vec<repolens_core::FunctionSymbol> {
    let mut collector = FunctionCollector::new(path, JS_KEYWORDS);
    for pattern in FUNCTION_PATTERNS.iter() {
        for caps in pattern.captures_iter(content) {
            let (Some(whole), Some(name)) = (caps.get(0), first_group(&caps)) else {
                continue;
            };
            let is_async = preceded_by_async(content, whole.start(), ASYNC_WINDOW);
            collector.push(name.as_str(), lines.line_of(whole.start()), is_async);
        }
    }
    collector.finish()
}

fn extract_classes(analysis: &mut FileAnalysis, path: &str, content: &str, lines: &LineIndex) {
    for caps in CLASS.captures_iter(content) {
        let Some(name) = caps.get(1) else { continue };
        analysis.classes.push(ClassSymbol {
            name: name.as_str().to_string(),
            file: path.to_string(),
            line: Some(lines.line_of(name.start())),
            role: ClassRole::Class,
        });
    }
}

fn extract_components(analysis: &mut FileAnalysis, path: &str, content: &str, lines: &LineIndex) {
    for caps in COMPONENT.captures_iter(content) {
        let Some(name) = caps.get(1) else { continue };
        if !name.as_str().starts_with(|c: char| c.is_uppercase()) {
            continue;
        }
        analysis.components.push(named(path, name, lines));
    }
}

fn extract_hooks_and_types(
    analysis: &mut FileAnalysis,
    path: &str,
    content: &str,
    lines: &LineIndex,
) {
    analysis.hooks.extend(
        HOOK.captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|name| named(path, name, lines)),
    );
    for pattern in [&*TYPE_ALIAS, &*INTERFACE] {
        analysis.types.extend(
            pattern
                .captures_iter(content)
                .filter_map(|caps| caps.get(1))
                .map(|name| named(path, name, lines)),
        );
    }
}

fn extract_imports(analysis: &mut FileAnalysis, path: &str, content: &str, lines: &LineIndex) {
    for pattern in IMPORT_PATTERNS.iter() {
        for caps in pattern.captures_iter(content) {
            let Some(spec) = caps.get(1) else { continue };
            analysis.imports.push(ImportRecord {
                file: path.to_string(),
                specifier: spec.as_str().to_string(),
                line: lines.line_of(spec.start()),
            });
        }
    }
}

fn extract_endpoints(analysis: &mut FileAnalysis, path: &str, content: &str, lines: &LineIndex) {
    let mut push = |method: &str, route: &str, offset: usize| {
        analysis.endpoints.push(Endpoint {
            method: method.to_uppercase(),
            path: route.to_string(),
            file: path.to_string(),
            line: lines.line_of(offset),
            framework: "express".to_string(),
        });
    };
    for caps in ROUTE_CALL.captures_iter(content) {
        if let (Some(method), Some(route)) = (caps.get(1), caps.get(2)) {
            push(method.as_str(), route.as_str(), method.start());
        }
    }
    for caps in ROUTE_CHAIN.captures_iter(content) {
        if let (Some(route), Some(method)) = (caps.get(1), caps.get(2)) {
            push(method.as_str(), route.as_str(), route.start());
        }
    }
}

fn extract_models(analysis: &mut FileAnalysis, path: &str, content: &str, lines: &LineIndex) {
    for pattern in MODEL_PATTERNS.iter() {
        for caps in pattern.captures_iter(content) {
            let (Some(name), Some(evidence)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            analysis.models.push(ModelSymbol {
                name: name.as_str().to_string(),
                file: path.to_string(),
                line: lines.line_of(name.start()),
                orm: js_orm_label(evidence.as_str()).to_string(),
            });
        }
    }
}

fn extract_decorators(analysis: &mut FileAnalysis, path: &str, content: &str, lines: &LineIndex) {
    for caps in MIDDLEWARE.captures_iter(content) {
        let Some(name) = first_group(&caps) else { continue };
        if IGNORED_MIDDLEWARE.contains(&name.as_str()) {
            continue;
        }
        analysis.decorators.push(DecoratorSymbol {
            name: name.as_str().to_string(),
            file: path.to_string(),
            line: lines.line_of(name.start()),
            kind: DecoratorKind::Middleware,
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
}

fn named(path: &str, name: regex::Match<'_>, lines: &LineIndex) -> NamedSymbol {
    NamedSymbol {
        name: name.as_str().to_string(),
        file: path.to_string(),
        line: lines.line_of(name.start()),
    }
}
