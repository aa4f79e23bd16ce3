//! Integration tests for the scraper
//!
//! These tests use wiremock to serve a small dictionary site and run the
//! parser, the dispatcher and the binary against it end-to-end.

use grammar_scraper::config::{Config, SiteConfig, SiteKind};
use grammar_scraper::crawler::{Dispatcher, Fetcher};
use grammar_scraper::model::{MergePolicy, ResultMapping};
use grammar_scraper::sites::{DictionaryCom, SiteParser};
use grammar_scraper::{get_domain, ScrapeError};
use std::io::Write;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

/// Root page listing one index link per letter
fn root_page(base_url: &str, letters: &[&str]) -> ResponseTemplate {
    let items: String = letters
        .iter()
        .map(|letter| {
            format!(
                r#"<li class="W2JN1pnuwI8hO1n0WQkT"><a href="{}/list/{}">{}</a></li>"#,
                base_url, letter, letter
            )
        })
        .collect();
    html(format!("<ul>{}</ul>", items))
}

/// Index page with one word block holding the given words
fn index_page(base_url: &str, words: &[&str]) -> ResponseTemplate {
    let links: String = words
        .iter()
        .map(|word| format!(r#"<a href="{}/browse/{}">{}</a>"#, base_url, word, word))
        .collect();
    html(format!(
        r#"<div class="sw3o2JSDU4SEB11F3dUQ">{}</div>"#,
        links
    ))
}

/// Index page without word blocks
fn empty_index_page() -> ResponseTemplate {
    html("<p>No more words</p>".to_string())
}

/// Detail page with one definition block per `(label, definition, examples)`
fn detail_page(definitions: Vec<(&str, &str, Vec<&str>)>) -> ResponseTemplate {
    let blocks: String = definitions
        .into_iter()
        .map(|(label, definition, examples)| {
            let examples: String = examples
                .iter()
                .map(|e| format!(r#"<span class="luna-example italic">{}</span>"#, e))
                .collect();
            format!(
                r#"<div><span class="luna-label italic">{}</span><span class="one-click-content css-nnyc96 e1q3nk1v1">{}</span>{}</div>"#,
                label, definition, examples
            )
        })
        .collect();
    html(format!(
        r#"<div class="css-10n3ydx e1hk9ate0">{}</div>"#,
        blocks
    ))
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Serves two letters with one word each, each word with one labelled
/// definition and two examples
async fn mount_two_letter_site(server: &MockServer) {
    let base_url = server.uri();

    mount(server, "/", root_page(&base_url, &["a", "b"])).await;

    mount(server, "/list/a", index_page(&base_url, &["alpha"])).await;
    mount(server, "/list/a/1", empty_index_page()).await;
    mount(server, "/list/b", index_page(&base_url, &["beta"])).await;
    mount(server, "/list/b/1", empty_index_page()).await;

    mount(
        server,
        "/browse/alpha",
        detail_page(vec![(
            "noun",
            "the first letter",
            vec!["Alpha comes first.", "From alpha to omega."],
        )]),
    )
    .await;
    mount(
        server,
        "/browse/beta",
        detail_page(vec![(
            "noun",
            "the second letter",
            vec!["Beta follows alpha.", "A beta release."],
        )]),
    )
    .await;
}

fn parser_for(server: &MockServer) -> DictionaryCom {
    let url = Url::parse(&format!("{}/", server.uri())).expect("Failed to parse base URL");
    DictionaryCom::new(url, MergePolicy::Replace).expect("Failed to build parser")
}

fn fetcher() -> Fetcher {
    let config = Config::default();
    Fetcher::new(&config.user_agent, &config.http).expect("Failed to build fetcher")
}

fn config_for(servers: &[&MockServer], output_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.output.directory = output_dir.path().to_path_buf();
    config.sites = servers
        .iter()
        .map(|server| SiteConfig {
            kind: SiteKind::DictionaryCom,
            url: format!("{}/", server.uri()),
        })
        .collect();
    config
}

#[tokio::test]
async fn test_two_letters_one_word_each() {
    let server = MockServer::start().await;
    mount_two_letter_site(&server).await;

    let mapping = parser_for(&server)
        .parse(&fetcher())
        .await
        .expect("Crawl failed");

    assert_eq!(mapping.len(), 2);

    let alpha = mapping.get("alpha").expect("alpha missing");
    assert_eq!(alpha.url, format!("{}/browse/alpha", server.uri()));
    assert_eq!(alpha.description.len(), 1);
    assert_eq!(
        alpha.description["noun. the first letter"],
        vec!["Alpha comes first.", "From alpha to omega."]
    );

    let beta = mapping.get("beta").expect("beta missing");
    assert_eq!(beta.description.len(), 1);
    assert_eq!(
        beta.description["noun. the second letter"],
        vec!["Beta follows alpha.", "A beta release."]
    );
}

#[tokio::test]
async fn test_missing_content_container_skips_word() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount(&server, "/", root_page(&base_url, &["a"])).await;
    mount(&server, "/list/a", index_page(&base_url, &["abyss", "acorn"])).await;
    mount(&server, "/list/a/1", empty_index_page()).await;
    mount(
        &server,
        "/browse/abyss",
        html(r#"<div class="redesigned-layout">abyss</div>"#.to_string()),
    )
    .await;
    mount(
        &server,
        "/browse/acorn",
        detail_page(vec![("noun", "the nut of the oak", vec!["An acorn fell."])]),
    )
    .await;

    let mapping = parser_for(&server)
        .parse(&fetcher())
        .await
        .expect("Crawl failed");

    assert_eq!(mapping.len(), 1);
    assert!(mapping.get("abyss").is_none());
    assert!(mapping.get("acorn").is_some());
}

#[tokio::test]
async fn test_identical_definitions_collapse() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount(&server, "/", root_page(&base_url, &["t"])).await;
    mount(&server, "/list/t", index_page(&base_url, &["tree"])).await;
    mount(&server, "/list/t/1", empty_index_page()).await;
    mount(
        &server,
        "/browse/tree",
        detail_page(vec![
            ("noun", "a woody plant", vec!["An old tree."]),
            ("noun", "a woody plant", vec!["A tall tree.", "Climb the tree."]),
        ]),
    )
    .await;

    let mapping = parser_for(&server)
        .parse(&fetcher())
        .await
        .expect("Crawl failed");

    let tree = mapping.get("tree").expect("tree missing");
    assert_eq!(tree.description.len(), 1);
    assert_eq!(
        tree.description["noun. a woody plant"],
        vec!["A tall tree.", "Climb the tree."]
    );
}

#[tokio::test]
async fn test_pagination_stops_at_first_empty_page() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount(&server, "/", root_page(&base_url, &["c"])).await;
    Mock::given(method("GET"))
        .and(path("/list/c"))
        .respond_with(index_page(&base_url, &["cat"]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/list/c/1"))
        .respond_with(empty_index_page())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/list/c/2"))
        .respond_with(index_page(&base_url, &["never"]))
        .expect(0)
        .mount(&server)
        .await;
    mount(
        &server,
        "/browse/cat",
        detail_page(vec![("noun", "a small feline", vec!["The cat sat."])]),
    )
    .await;

    let mapping = parser_for(&server)
        .parse(&fetcher())
        .await
        .expect("Crawl failed");

    assert_eq!(mapping.len(), 1);
    assert!(mapping.get("never").is_none());

    server.verify().await;
}

#[tokio::test]
async fn test_multiple_pages_per_letter() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount(&server, "/", root_page(&base_url, &["d"])).await;
    mount(&server, "/list/d", index_page(&base_url, &["dog"])).await;
    mount(&server, "/list/d/1", index_page(&base_url, &["dove"])).await;
    mount(&server, "/list/d/2", empty_index_page()).await;
    mount(
        &server,
        "/browse/dog",
        detail_page(vec![("noun", "a canine", vec![])]),
    )
    .await;
    mount(
        &server,
        "/browse/dove",
        detail_page(vec![("noun", "a pigeon", vec![])]),
    )
    .await;

    let mapping = parser_for(&server)
        .parse(&fetcher())
        .await
        .expect("Crawl failed");

    assert_eq!(mapping.len(), 2);
    assert!(mapping.get("dog").is_some());
    assert!(mapping.get("dove").is_some());
}

#[tokio::test]
async fn test_transport_failure_aborts_run() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount(&server, "/", root_page(&base_url, &["e"])).await;
    mount(
        &server,
        "/list/e",
        html(
            r#"<div class="sw3o2JSDU4SEB11F3dUQ"><a href="http://127.0.0.1:1/browse/echo">echo</a></div>"#
                .to_string(),
        ),
    )
    .await;

    let result = parser_for(&server).parse(&fetcher()).await;
    assert!(matches!(result, Err(ScrapeError::Http { .. })));
}

#[tokio::test]
async fn test_dispatcher_writes_domain_file() {
    let server = MockServer::start().await;
    mount_two_letter_site(&server).await;

    let output_dir = TempDir::new().expect("Failed to create temp dir");
    let dispatcher =
        Dispatcher::new(config_for(&[&server], &output_dir)).expect("Failed to build dispatcher");

    let report = dispatcher
        .run_url(&format!("{}/browse/anything?x=1", server.uri()))
        .await
        .expect("Run failed");

    let domain = get_domain(&server.uri());
    assert_eq!(report.domain, domain);
    assert_eq!(report.stats.words, 2);
    assert_eq!(report.stats.examples, 4);
    assert_eq!(
        report.output_path,
        output_dir.path().join(format!("{}.json", domain))
    );

    let content = std::fs::read_to_string(&report.output_path).expect("Output missing");
    let written: ResultMapping = serde_json::from_str(&content).expect("Output is not JSON");
    assert_eq!(written.len(), 2);
}

#[tokio::test]
async fn test_dispatcher_unknown_domain() {
    let server = MockServer::start().await;
    let output_dir = TempDir::new().expect("Failed to create temp dir");
    let dispatcher =
        Dispatcher::new(config_for(&[&server], &output_dir)).expect("Failed to build dispatcher");

    let result = dispatcher.run_url("https://not-registered.example.com/").await;
    assert!(matches!(result, Err(ScrapeError::UnknownSite { .. })));
}

#[tokio::test]
async fn test_sequential_runs_every_site() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;
    mount_two_letter_site(&first).await;
    mount_two_letter_site(&second).await;

    let output_dir = TempDir::new().expect("Failed to create temp dir");
    let dispatcher = Dispatcher::new(config_for(&[&first, &second], &output_dir))
        .expect("Failed to build dispatcher");

    let reports = dispatcher.run_sequential().await.expect("Run failed");

    assert_eq!(reports.len(), 2);
    for server in [&first, &second] {
        let file = output_dir
            .path()
            .join(format!("{}.json", get_domain(&server.uri())));
        assert!(file.exists(), "missing {}", file.display());
    }
}

#[tokio::test]
async fn test_parallel_binary_writes_independent_files() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;
    mount_two_letter_site(&first).await;

    // The second site has a different vocabulary so the files can be told apart.
    let base_url = second.uri();
    mount(&second, "/", root_page(&base_url, &["z"])).await;
    mount(&second, "/list/z", index_page(&base_url, &["zeal"])).await;
    mount(&second, "/list/z/1", empty_index_page()).await;
    mount(
        &second,
        "/browse/zeal",
        detail_page(vec![("noun", "great energy", vec!["With zeal."])]),
    )
    .await;

    let work_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = work_dir.path().join("config.toml");
    let output_dir = work_dir.path().join("out");

    let mut config_file = std::fs::File::create(&config_path).expect("Failed to create config");
    write!(
        config_file,
        "[[site]]\nkind = \"dictionary-com\"\nurl = \"{}/\"\n\n[[site]]\nkind = \"dictionary-com\"\nurl = \"{}/\"\n",
        first.uri(),
        second.uri()
    )
    .expect("Failed to write config");
    drop(config_file);

    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_grammar-scraper"))
        .arg("--config")
        .arg(&config_path)
        .arg("--output-dir")
        .arg(&output_dir)
        .arg("--parralel")
        .arg("--quiet")
        .output()
        .await
        .expect("Failed to run binary");

    assert!(
        output.status.success(),
        "binary failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let read = |server: &MockServer| -> ResultMapping {
        let file = output_dir.join(format!("{}.json", get_domain(&server.uri())));
        let content = std::fs::read_to_string(&file)
            .unwrap_or_else(|e| panic!("missing {}: {}", file.display(), e));
        serde_json::from_str(&content).expect("Output is not JSON")
    };

    let first_words = read(&first);
    let second_words = read(&second);

    assert_eq!(first_words.len(), 2);
    assert!(first_words.get("alpha").is_some());
    assert!(first_words.get("zeal").is_none());

    assert_eq!(second_words.len(), 1);
    assert!(second_words.get("zeal").is_some());
    assert!(second_words.get("alpha").is_none());
}
