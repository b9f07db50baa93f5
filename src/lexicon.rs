//! Common-English classifier used to rank extracted vocabulary.
//!
//! Speech recognizers already know everyday English; the words worth
//! spending keyword-boost slots on are the project-specific ones. This
//! module only ever influences *ordering*. A common word is ranked below
//! an invented one, never dropped: "name" in "return self.name" is still
//! vocabulary the recognizer should prefer over homophones.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Everyday English plus the generic vocabulary of programming prose.
/// A token made entirely of these carries little biasing value.
const COMMON_WORDS: &[&str] = &[
    // Function words.
    "the", "a", "an", "and", "or", "but", "if", "then", "else", "when", "while", "for", "to",
    "of", "in", "on", "at", "by", "with", "from", "into", "onto", "over", "under", "about",
    "after", "before", "between", "through", "during", "without", "within", "against", "up",
    "down", "out", "off", "not", "no", "yes", "all", "any", "some", "each", "every", "both",
    "few", "more", "most", "other", "same", "such", "only", "own", "so", "than", "too", "very",
    "just", "also", "now", "here", "there", "this", "that", "these", "those", "it", "its",
    "they", "them", "their", "we", "our", "you", "your", "he", "she", "his", "her", "who",
    "what", "which", "where", "why", "how", "as", "is", "are", "was", "were", "be", "been",
    "being", "am", "do", "does", "did", "done", "have", "has", "had", "will", "would", "can",
    "could", "should", "shall", "may", "might", "must",
    // Common verbs.
    "get", "set", "put", "make", "made", "take", "give", "go", "come", "run", "call", "find",
    "found", "look", "seem", "show", "hide", "ask", "tell", "use", "used", "try", "need",
    "want", "keep", "let", "begin", "start", "stop", "end", "open", "close", "read", "write",
    "load", "save", "send", "receive", "move", "turn", "play", "pause", "work", "help",
    "change", "add", "remove", "insert", "append", "push", "pop", "create", "delete", "build",
    "check", "clear", "copy", "paste", "cut", "count", "draw", "drop", "edit", "exit", "fail",
    "fetch", "fill", "fix", "flush", "free", "grow", "handle", "hold", "init", "join", "jump",
    "kill", "know", "leave", "listen", "lock", "unlock", "log", "mark", "match", "merge",
    "mount", "notify", "parse", "pass", "pick", "place", "plan", "post", "press", "print",
    "pull", "quit", "raise", "reach", "refresh", "reload", "render", "repeat", "reply",
    "report", "request", "require", "reset", "resize", "resolve", "restore", "retry",
    "rollback", "rotate", "scan", "schedule", "scroll", "search", "seek", "select", "serve",
    "share", "shift", "skip", "sleep", "sort", "spawn", "split", "stay", "store", "submit",
    "swap", "switch", "sync", "test", "throw", "toggle", "touch", "trace", "track", "train",
    "transform", "translate", "trim", "update", "upload", "download", "validate", "verify",
    "wait", "wake", "walk", "watch", "wrap", "yield", "apply", "bind", "cancel", "clean",
    "click", "clone", "collect", "compare", "compile", "compute", "connect", "convert",
    "decode", "encode", "define", "describe", "detect", "disable", "enable", "enter",
    "escape", "evaluate", "exclude", "include", "execute", "expand", "collapse", "expect",
    "export", "import", "extend", "extract", "filter", "finish", "focus", "format", "forward",
    "generate", "ignore", "invoke", "iterate", "launch", "limit", "link", "list", "map",
    "measure", "migrate", "mock", "modify", "monitor", "navigate", "offer", "order", "paint",
    "patch", "prepare", "preview", "publish", "queue", "quote", "random", "rank", "rebuild",
    "redo", "undo", "reduce", "register", "reject", "release", "rename", "replace", "restart",
    "resume", "retrieve", "review", "route", "sample", "seed", "setup", "shutdown", "sign",
    "signal", "simulate", "snap", "stream", "style", "subscribe", "suggest", "support",
    "suspend", "terminate", "ticket", "time", "transfer", "trigger", "unwrap", "view", "visit",
    "zoom",
    // Common nouns and adjectives.
    "action", "active", "address", "admin", "agent", "alert", "alias", "amount", "anchor",
    "answer", "app", "application", "area", "argument", "array", "arrow", "article", "asset",
    "attribute", "audio", "author", "auto", "average", "back", "background", "badge", "bar",
    "base", "batch", "binary", "bit", "block", "board", "body", "book", "bool", "border",
    "bottom", "box", "branch", "bridge", "broker", "browser", "buffer", "bug", "bundle",
    "button", "byte", "cache", "callback", "canvas", "capacity", "card", "case", "catalog",
    "category", "cell", "center", "chain", "channel", "chapter", "character", "chart",
    "child", "children", "choice", "circle", "city", "client", "clip", "clock", "cloud",
    "cluster", "code", "collection", "color", "column", "command", "comment", "common",
    "company", "component", "condition", "config", "configuration", "connection", "console",
    "constant", "contact", "container", "content", "context", "control", "cookie", "core",
    "corner", "country", "cover", "create", "credit", "current", "cursor", "custom", "cycle",
    "daily", "dark", "dash", "data", "database", "date", "day", "debug", "decimal", "deep",
    "default", "delay", "delta", "demo", "depth", "design", "desktop", "destination",
    "detail", "device", "dialog", "diff", "digit", "direction", "directory", "display",
    "distance", "document", "domain", "done", "dot", "double", "draft", "driver", "dump",
    "duration", "dynamic", "east", "edge", "editor", "element", "email", "empty", "engine",
    "entity", "entry", "env", "environment", "equal", "error", "event", "example", "exit",
    "extension", "extra", "false", "fast", "feature", "feed", "field", "figure", "file",
    "final", "first", "flag", "flat", "float", "flow", "folder", "font", "foot", "footer",
    "force", "foreign", "form", "frame", "front", "full", "game", "gap", "general", "global",
    "good", "graph", "grid", "group", "guard", "guide", "half", "hand", "handler", "hard",
    "hash", "head", "header", "health", "heap", "height", "hidden", "high", "hint", "history",
    "home", "hook", "host", "hour", "house", "http", "icon", "id", "idle", "image", "index",
    "info", "inner", "input", "instance", "integer", "interval", "invalid", "item", "job",
    "json", "key", "keyboard", "keyword", "kind", "label", "language", "large", "last",
    "layer", "layout", "leaf", "left", "length", "letter", "level", "library", "light",
    "like", "line", "local", "location", "logic", "login", "logout", "long", "loop", "low",
    "machine", "macro", "mail", "main", "manager", "manual", "margin", "marker", "mask",
    "master", "matrix", "max", "maximum", "media", "member", "memory", "menu", "meta",
    "method", "metric", "middle", "min", "minimum", "minute", "mobile", "mode", "model",
    "modal", "money", "month", "mouse", "name", "native", "nested", "network", "next",
    "night", "node", "noise", "normal", "north", "note", "null", "number", "object",
    "offline", "offset", "old", "online", "option", "origin", "outer", "output", "overlay",
    "owner", "pack", "package", "padding", "page", "pair", "panel", "paper", "paragraph",
    "parameter", "parent", "part", "partial", "password", "path", "pattern", "payload",
    "peer", "pending", "people", "percent", "person", "phase", "phone", "photo", "picture",
    "piece", "pin", "pipe", "pixel", "plain", "plane", "platform", "player", "plugin",
    "point", "pointer", "policy", "pool", "popup", "port", "position", "prefix", "previous",
    "price", "primary", "priority", "private", "problem", "product", "profile", "program",
    "progress", "project", "prompt", "property", "protocol", "proxy", "public", "quality",
    "query", "question", "radio", "range", "rate", "ratio", "raw", "reason", "record",
    "rect", "ref", "reference", "region", "relation", "remote", "repo", "resource",
    "response", "rest", "right", "ring", "role", "room", "root", "round", "row", "rule",
    "safe", "scale", "scene", "schema", "scope", "score", "screen", "script", "season",
    "second", "secret", "section", "sector", "segment", "self", "sender", "sequence",
    "series", "server", "service", "session", "shadow", "shape", "sheet", "shell", "short",
    "side", "simple", "single", "site", "size", "slice", "slot", "slow", "small", "smart",
    "snapshot", "socket", "soft", "solid", "solution", "song", "source", "south", "space",
    "spec", "speed", "stack", "stage", "stamp", "standard", "star", "state", "static",
    "station", "stats", "status", "step", "stock", "storage", "story", "strategy", "string",
    "strong", "struct", "student", "sub", "subject", "suffix", "suite", "summary", "super",
    "symbol", "system", "tab", "table", "tag", "tail", "target", "task", "team", "temp",
    "template", "term", "terminal", "text", "theme", "thing", "thread", "tile", "timeout",
    "timer", "timestamp", "tiny", "tip", "title", "today", "token", "tool", "top", "topic",
    "total", "trailer", "transaction", "tree", "true", "turn", "twin", "type", "unique",
    "unit", "upper", "uri", "url", "user", "util", "valid", "value", "variable", "vector",
    "vendor", "verbose", "version", "vertical", "video", "visible", "visual", "void",
    "volume", "wall", "warning", "watcher", "water", "web", "week", "weight", "west",
    "wheel", "white", "whole", "wide", "widget", "width", "window", "word", "worker",
    "world", "year", "zero", "zone",
];

static COMMON_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| COMMON_WORDS.iter().copied().collect());

/// Exact lookup against the common-word list (case-insensitive).
pub fn is_common_word(word: &str) -> bool {
    COMMON_SET.contains(word.to_lowercase().as_str())
}

/// Whether a token is ordinary English: either a common word itself, or a
/// compound (camelCase, snake_case, kebab-case) made entirely of common
/// words. Single-letter fragments are ignored; "getX" is as common as
/// "get".
///
/// # Arguments
/// * `token` - An extracted symbol or file stem
pub fn is_common_token(token: &str) -> bool {
    if COMMON_SET.contains(token.to_lowercase().as_str()) {
        return true;
    }
    let parts = split_token_parts(token);
    let meaningful: Vec<&String> = parts.iter().filter(|part| part.len() >= 2).collect();
    if meaningful.is_empty() {
        return false;
    }
    meaningful
        .iter()
        .all(|part| COMMON_SET.contains(part.as_str()))
}

/// Splits an identifier into lowercased word parts at case boundaries and
/// non-alphabetic characters. `"XMLHttpRequest"` splits into `xml`,
/// `http`, `request`.
pub(crate) fn split_token_parts(token: &str) -> Vec<String> {
    let chars: Vec<char> = token.chars().collect();
    let mut parts = Vec::new();
    let mut current = String::new();
    for i in 0..chars.len() {
        let ch = chars[i];
        if !ch.is_alphabetic() {
            if !current.is_empty() {
                parts.push(current.to_lowercase());
                current = String::new();
            }
            continue;
        }
        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars
                .get(i + 1)
                .map(|c| c.is_lowercase())
                .unwrap_or(false);
            // Break on lower->Upper, and before the last capital of an
            // acronym run (the "S" in "HTTPServer").
            if prev.is_lowercase() || (prev.is_uppercase() && next_is_lower) {
                parts.push(current.to_lowercase());
                current = String::new();
            }
        }
        current.push(ch);
    }
    if !current.is_empty() {
        parts.push(current.to_lowercase());
    }
    parts
}

// ==== Tests ====
