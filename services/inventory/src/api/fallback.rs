//! 路由兜底策略
//!
//! 没有路由处理请求时，根据固定的允许列表决定返回 405 还是 404。

use axum::http::{Method, Uri};
use inventory_errors::AppError;
use tracing::debug;

/// 路由模式及其允许的方法，`{name}` 段匹配任意非空段
pub const ALLOWED_ROUTES: &[(&str, &[&str])] = &[
    ("/register", &["POST"]),
    ("/inventory", &["GET"]),
    ("/inventory/{id}", &["GET", "PUT", "DELETE"]),
    ("/inventory/{id}/photo", &["GET", "PUT"]),
    ("/search", &["POST"]),
    ("/RegisterForm.html", &["GET"]),
    ("/SearchForm.html", &["GET"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    MethodNotAllowed,
    NotFound,
}

/// 判定未被处理的请求应返回的结果
pub fn classify(method: &Method, path: &str) -> Fallback {
    let allowed = ALLOWED_ROUTES
        .iter()
        .find(|(pattern, _)| matches_pattern(pattern, path))
        .map(|(_, methods)| *methods);

    match allowed {
        Some(methods) if !is_allowed(methods, method) => Fallback::MethodNotAllowed,
        _ => Fallback::NotFound,
    }
}

fn is_allowed(methods: &[&str], method: &Method) -> bool {
    methods.contains(&method.as_str()) || (*method == Method::HEAD && methods.contains(&"GET"))
}

fn matches_pattern(pattern: &str, path: &str) -> bool {
    let path = match path.strip_suffix('/') {
        Some("") | None => path,
        Some(trimmed) => trimmed,
    };

    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(expected), Some(actual)) => {
                let is_param = expected.starts_with('{') && expected.ends_with('}');
                if is_param {
                    if actual.is_empty() {
                        return false;
                    }
                } else if expected != actual {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

/// 同时用作 `fallback` 与 `method_not_allowed_fallback`
pub async fn route_fallback(method: Method, uri: Uri) -> AppError {
    let outcome = classify(&method, uri.path());
    debug!(%method, path = uri.path(), ?outcome, "Unrouted request");

    match outcome {
        Fallback::MethodNotAllowed => AppError::method_not_allowed("Method Not Allowed"),
        Fallback::NotFound => AppError::not_found("Not Found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(classify(&Method::GET, "/unknown/path"), Fallback::NotFound);
        assert_eq!(classify(&Method::PATCH, "/"), Fallback::NotFound);
    }

    #[test]
    fn test_known_path_wrong_method() {
        assert_eq!(classify(&Method::PATCH, "/inventory/1"), Fallback::MethodNotAllowed);
        assert_eq!(classify(&Method::DELETE, "/inventory/1/photo"), Fallback::MethodNotAllowed);
        assert_eq!(classify(&Method::GET, "/register"), Fallback::MethodNotAllowed);
        assert_eq!(classify(&Method::POST, "/RegisterForm.html"), Fallback::MethodNotAllowed);
    }

    #[test]
    fn test_known_path_allowed_method_falls_to_not_found() {
        assert_eq!(classify(&Method::GET, "/inventory/1"), Fallback::NotFound);
        assert_eq!(classify(&Method::HEAD, "/inventory"), Fallback::NotFound);
    }

    #[test]
    fn test_pattern_matching() {
        assert!(matches_pattern("/inventory/{id}", "/inventory/abc"));
        assert!(matches_pattern("/inventory", "/inventory/"));
        assert!(!matches_pattern("/inventory/{id}", "/inventory//"));
        assert!(!matches_pattern("/inventory", "/inventory//"));
        assert!(matches_pattern("/inventory/{id}/photo", "/inventory/1/photo/"));
        assert!(!matches_pattern("/inventory/{id}", "/inventory/1/photo"));
        assert!(!matches_pattern("/search", "/Search"));
    }
}
