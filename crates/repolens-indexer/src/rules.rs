//! Fixed keyword and ecosystem tables used by the extractors

/// Words that look like `name(` or `name() {` in JS/TS but are not functions.
pub const JS_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "function", "const", "let", "var", "export",
    "import", "default", "return", "await", "async", "try", "finally", "new", "delete", "typeof",
    "void", "yield", "class", "extends", "super", "with", "defineConfig",
];

/// Global constructors and parsers excluded from JS call sites.
pub const JS_CALL_BUILTINS: &[&str] = &[
    "require", "parseInt", "parseFloat", "String", "Number", "Array", "Object", "Promise",
];

pub const PY_KEYWORDS: &[&str] = &[
    "def", "class", "if", "elif", "else", "for", "while", "try", "except", "finally", "with",
    "as", "import", "from", "return", "yield", "raise", "await", "async", "assert", "break",
    "continue", "pass", "global", "nonlocal", "lambda",
];

/// Builtins excluded from Python call sites.
pub const PY_CALL_BUILTINS: &[&str] = &[
    "print", "len", "range", "set", "list", "dict", "str", "int", "float", "isinstance",
    "getattr", "setattr", "hasattr", "open", "exec", "eval", "super",
];

/// Extensions whose functions may be UI components.
pub const COMPONENT_EXTENSIONS: &[&str] = &[".jsx", ".tsx", ".vue"];

/// Express middleware too generic to report.
pub const IGNORED_MIDDLEWARE: &[&str] =
    &["express.json", "express.static", "cors", "bodyParser", "cookieParser"];

/// Path fragments marking a JS/TS file as a controller.
pub const JS_CONTROLLER_HINTS: &[&str] = &["controller", "route", "api"];

/// Path fragments marking a Python file as a view/controller.
pub const PY_CONTROLLER_HINTS: &[&str] = &["view", "controller", "api"];

pub const SERVICE_HINTS: &[&str] = &["service"];

pub const UTILITY_HINTS: &[&str] = &["utils", "helper"];

/// ORM label for a JS model declaration, keyed by the matched constructor.
pub fn js_orm_label(evidence: &str) -> &'static str {
    match evidence {
        "mongoose.model" | "Document" => "mongoose",
        "sequelize.define" | "Model" => "sequelize",
        "Model.extend" => "bookshelf",
        "prisma" => "prisma",
        _ => "unknown",
    }
}

/// ORM label for a Python model declaration, keyed by its base class.
pub fn py_orm_label(base: &str) -> &'static str {
    match base {
        "models.Model" => "django",
        "BaseModel" => "pydantic",
        _ => "sqlalchemy",
    }
}

/// Databases and the tokens that give them away in source text.
pub const DATABASE_SIGNATURES: &[(&str, &[&str])] = &[
    ("PostgreSQL", &["pg", "postgres", "postgresql", "psycopg2", "asyncpg"]),
    ("MySQL", &["mysql", "mysql2", "pymysql", "aiomysql"]),
    ("MongoDB", &["mongodb", "pymongo", "mongoose", "motor"]),
    ("SQLite", &["sqlite", "sqlite3", "aiosqlite"]),
    ("Redis", &["redis", "ioredis", "aioredis"]),
    ("DynamoDB", &["dynamodb", "aws-sdk", "boto3"]),
    ("Firebase", &["firebase", "firestore", "firebase-admin"]),
    ("Supabase", &["supabase", "@supabase/supabase-js"]),
    ("Prisma", &["prisma", "@prisma/client"]),
    ("Sequelize", &["sequelize", "sequelize-cli"]),
    ("TypeORM", &["typeorm", "typeorm-cli"]),
    ("SQLAlchemy", &["sqlalchemy", "alembic"]),
    ("Django ORM", &["django.db", "django.contrib.auth"]),
    ("Mongoose", &["mongoose"]),
    ("Knex", &["knex"]),
    ("Objection", &["objection"]),
    ("MikroORM", &["mikro-orm"]),
    ("Doctrine", &["doctrine"]),
    ("Entity Framework", &["entity-framework", "ef-core"]),
    ("Hibernate", &["hibernate", "jpa"]),
];

/// Extensions that only produce weak database evidence.
pub const DATABASE_SKIP_EXTENSIONS: &[&str] = &[
    "md", "markdown", "lock", "css", "scss", "less", "html", "svg", "png", "jpg", "jpeg", "txt",
    "xml", "map",
];

/// Manifests and lock files; code evidence is preferred over declared dependencies.
pub const DATABASE_SKIP_FILES: &[&str] = &[
    "package.json", "package-lock.json", "yarn.lock", "pnpm-lock.yaml", "composer.json",
    "composer.lock",
];

/// Directory names never descended into during discovery.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    "node_modules", ".git", "dist", "build", "__pycache__", ".pytest_cache", "target", "bin",
    "obj", ".next", ".nuxt", ".output", "coverage", ".nyc_output", "vendor",
];
