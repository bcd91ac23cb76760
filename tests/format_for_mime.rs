//! End-to-end behavior of `ErrorFormatters::format_for_mime` and the
//! registration operations around it.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use errorfmt::{
    ArgumentError, ErrorCode, ErrorDetails, ErrorFormatters, FormatError, FormatParams,
    FormatterError, Localization, RequestContext, async_trait,
    formatter::{ErrorFormatter, Formatter, from_fn},
    mime::{BUILTIN_MIME_TYPES, DEFAULT_MIME},
};
use serde_json::json;

const HTML_PREFIX: &str = "<html><body><h2>Whoops! Something unexpected happened.</h2><br/><pre>";
const HTML_SUFFIX: &str = "</pre></body></html>";

fn sample_error() -> ErrorDetails {
    ErrorDetails::new("Headline is required")
        .with_code("MISSING_PARAM")
        .with_stack("Error: Headline is required\n    at NewArticle.onPostParamsRetrieved")
}

fn expected_content(mime: &str, error: &ErrorDetails) -> String {
    match mime {
        "application/json" | "text/json" => format!(
            r#"{{"code":"{}","message":"{}","stack":{}}}"#,
            error.code().map(ToString::to_string).unwrap_or_default(),
            error.message(),
            serde_json::to_string(error.stack()).unwrap()
        ),
        "text/html" => format!("{HTML_PREFIX}{}{HTML_SUFFIX}", error.stack()),
        "application/xml" | "text/xml" => format!(
            "<error><message>{}</message><stack>{}</stack><code>{}</code></error>",
            error.message(),
            error.stack(),
            error
                .code()
                .map_or_else(|| "undefined".to_owned(), ToString::to_string)
        ),
        other => panic!("no template for {other}"),
    }
}

#[tokio::test]
async fn test_every_default_mime_uses_its_template() {
    let formatters = ErrorFormatters::new();
    let error = sample_error();

    for mime in BUILTIN_MIME_TYPES {
        let formatted = formatters
            .format_for_mime(FormatParams::new(mime, error.clone()))
            .await
            .unwrap();
        assert_eq!(formatted.mime, mime);
        assert_eq!(formatted.content, expected_content(mime, &error), "{mime}");
    }
}

#[tokio::test]
async fn test_unknown_mime_falls_back_to_html() {
    let formatters = ErrorFormatters::new();
    let error = sample_error();

    for mime in ["image/png", "text/plain", "application/json; charset=utf-8", "", "json"] {
        let formatted = formatters
            .format_for_mime(FormatParams::new(mime, error.clone()))
            .await
            .unwrap();
        assert_eq!(formatted.mime, DEFAULT_MIME);
        assert_eq!(formatted.content, expected_content("text/html", &error));
    }
}

struct CountingFormatter {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ErrorFormatter for CountingFormatter {
    async fn format(&self, params: &FormatParams) -> Result<String, FormatterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(format!("custom:{}", params.error.message()))
    }
}

#[tokio::test]
async fn test_registered_formatter_is_used() {
    let formatters = ErrorFormatters::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let custom = Formatter::custom(CountingFormatter {
        calls: calls.clone(),
    });

    assert!(formatters.register("custom/type", custom.clone()));
    assert_eq!(formatters.get("custom/type"), Some(custom));

    let formatted = formatters
        .format_for_mime(FormatParams::new("custom/type", sample_error()))
        .await
        .unwrap();
    assert_eq!(formatted.mime, "custom/type");
    assert_eq!(formatted.content, "custom:Headline is required");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_non_string_registration_leaves_table_unchanged() {
    let formatters = ErrorFormatters::new();
    let before = formatters.mime_types();
    assert!(!formatters.register(&json!(123), Formatter::Json));
    assert!(!formatters.register(json!(["text/csv"]), Formatter::Json));
    assert_eq!(formatters.mime_types(), before);
}

#[tokio::test]
async fn test_any_string_key_is_matched_exactly() {
    let formatters = ErrorFormatters::new();
    let mime = "application/json; charset=utf-8";
    assert!(formatters.register(mime, Formatter::Xml));
    assert!(formatters.register(&json!("json"), Formatter::Json));

    let error = sample_error();
    let formatted = formatters
        .format_for_mime(FormatParams::new(mime, error.clone()))
        .await
        .unwrap();
    assert_eq!(formatted.mime, mime);
    assert_eq!(formatted.content, expected_content("text/xml", &error));

    let formatted = formatters
        .format_for_mime(FormatParams::new("json", error.clone()))
        .await
        .unwrap();
    assert_eq!(formatted.mime, "json");
}

#[tokio::test]
async fn test_xml_without_code() {
    let formatters = ErrorFormatters::new();
    let formatted = formatters
        .format_for_mime(FormatParams::new(
            "application/xml",
            ErrorDetails::new("boom").with_stack("S"),
        ))
        .await
        .unwrap();
    assert_eq!(
        formatted.content,
        "<error><message>boom</message><stack>S</stack><code>undefined</code></error>"
    );
}

#[test]
fn test_unregister_default_restores_it() {
    let formatters = ErrorFormatters::new();
    formatters.register("application/json", Formatter::Xml);
    assert!(formatters.unregister("application/json"));
    assert_eq!(formatters.get("application/json"), Some(Formatter::Json));
    assert_eq!(
        formatters.default_formatter("application/json"),
        Some(&Formatter::Json)
    );
}

#[test]
fn test_unregister_custom_removes_it() {
    let formatters = ErrorFormatters::new();
    formatters.register("custom/type", Formatter::custom(from_fn(|_| Ok(String::new()))));
    assert!(formatters.unregister("custom/type"));
    assert_eq!(formatters.get("custom/type"), None);
}

#[tokio::test]
async fn test_missing_params_is_argument_error() {
    let formatters = ErrorFormatters::new();
    let calls = Arc::new(AtomicUsize::new(0));
    formatters.register(
        DEFAULT_MIME,
        Formatter::custom(CountingFormatter {
            calls: calls.clone(),
        }),
    );

    let error = formatters
        .format_for_mime(None::<FormatParams>)
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        FormatError::Argument(ArgumentError::ParamsNotObject)
    ));

    let error = formatters.format_for_mime(json!(null)).await.unwrap_err();
    assert_eq!(error.as_argument(), Some(&ArgumentError::ParamsNotObject));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_loose_params_are_validated() {
    let formatters = ErrorFormatters::new();

    let error = formatters
        .format_for_mime(json!({ "mime": "text/html", "error": "not an error object" }))
        .await
        .unwrap_err();
    assert_eq!(error.as_argument(), Some(&ArgumentError::ErrorNotError));

    let error = formatters
        .format_for_mime(json!({ "mime": ["text/html"], "error": { "message": "x" } }))
        .await
        .unwrap_err();
    assert_eq!(error.as_argument(), Some(&ArgumentError::MimeNotString));

    let formatted = formatters
        .format_for_mime(&json!({
            "mime": "text/xml",
            "error": { "message": "Saving failed", "stack": "S", "code": 500 },
            "request": { "method": "POST", "url": "/actions/admin/content/articles/new_article" },
        }))
        .await
        .unwrap();
    assert_eq!(formatted.mime, "text/xml");
    assert_eq!(
        formatted.content,
        "<error><message>Saving failed</message><stack>S</stack><code>500</code></error>"
    );
}

#[tokio::test]
async fn test_json_output_round_trips() {
    let formatters = ErrorFormatters::new();
    let error = ErrorDetails::new("quote \" and <tag> & newline\n")
        .with_code(409)
        .with_stack("Error: conflict\n\tat \"somewhere\"");

    let formatted = formatters
        .format_for_mime(FormatParams::new("application/json", error.clone()))
        .await
        .unwrap();
    let parsed: ErrorDetails = serde_json::from_str(&formatted.content).unwrap();
    assert_eq!(parsed, error);
    assert_eq!(parsed.code(), Some(&ErrorCode::from(409)));
}

#[tokio::test]
async fn test_formatter_error_is_propagated() {
    #[derive(Debug, thiserror::Error)]
    #[error("locale {0} has no error page")]
    struct MissingPage(String);

    let formatters = ErrorFormatters::new();
    formatters.register(
        "text/html",
        Formatter::custom(from_fn(|params| {
            let locale = params
                .localization
                .as_ref()
                .map_or("none", |localization| localization.locale.as_str());
            Err(FormatterError::new(MissingPage(locale.to_owned())))
        })),
    );

    let params = FormatParams::new("image/gif", sample_error())
        .with_localization(Localization::new("sv-SE"));
    let error = formatters.format_for_mime(params).await.unwrap_err();

    let FormatError::Formatter { mime, source } = error else {
        panic!("expected a formatter error");
    };
    assert_eq!(mime, "text/html");
    let inner = source.into_inner();
    let missing = inner.downcast_ref::<MissingPage>().unwrap();
    assert_eq!(missing.0, "sv-SE");
}

#[tokio::test]
async fn test_custom_formatter_sees_context() {
    let formatters = ErrorFormatters::new();
    formatters.register(
        "text/plain",
        Formatter::custom(from_fn(|params| {
            let request = params
                .request
                .as_ref()
                .ok_or_else(|| FormatterError::msg("no request"))?;
            let localized = params
                .localization
                .as_ref()
                .and_then(|localization| localization.get("ERROR_SAVING"))
                .unwrap_or(params.error.message());
            Ok(format!("{} {}: {localized}", request.method, request.url))
        })),
    );

    let params = FormatParams::new("text/plain", ErrorDetails::new("save failed"))
        .with_request(RequestContext::new("POST", "/admin/content/articles/new_article"))
        .with_localization(
            Localization::new("en-US").with_message("ERROR_SAVING", "There was an error saving"),
        );
    let formatted = formatters.format_for_mime(params).await.unwrap();
    assert_eq!(
        formatted.content,
        "POST /admin/content/articles/new_article: There was an error saving"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_shared_registry_across_tasks() {
    let formatters = Arc::new(ErrorFormatters::new());
    let csv = from_fn(|params| Ok(format!("error,{}", params.error.message())));
    formatters.register("text/csv", Formatter::custom(csv));

    let mut handles = Vec::new();
    for i in 0..8 {
        let formatters = formatters.clone();
        handles.push(tokio::spawn(async move {
            let mime = if i % 2 == 0 { "text/csv" } else { "text/json" };
            formatters
                .format_for_mime(FormatParams::new(mime, ErrorDetails::new(format!("e{i}"))))
                .await
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let formatted = handle.await.unwrap().unwrap();
        if i % 2 == 0 {
            assert_eq!(formatted.mime, "text/csv");
            assert_eq!(formatted.content, format!("error,e{i}"));
        } else {
            assert_eq!(formatted.mime, "text/json");
            assert!(formatted.content.contains(&format!("\"message\":\"e{i}\"")));
        }
    }
}

#[test]
fn test_registries_are_isolated() {
    let first = ErrorFormatters::new();
    let second = ErrorFormatters::new();
    first.register("custom/type", Formatter::Json);
    assert_eq!(first.get("custom/type"), Some(Formatter::Json));
    assert_eq!(second.get("custom/type"), None);
}
